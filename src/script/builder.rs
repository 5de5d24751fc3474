//! Standard-template builders: construct P2PKH/P2PK/P2SH/multisig/OP_RETURN scripts from external
//! collaborators ([`PublicKey`], [`Address`]) rather than raw chunks.

use crate::collaborators::{Address, AddressKind, PublicKey, Signature};
use crate::error::{BuildError, MutateError};
use crate::opcode::{
    self, OP_0, OP_CHECKMULTISIG, OP_CHECKSIG, OP_DUP, OP_EQUAL, OP_EQUALVERIFY, OP_HASH160,
    OP_RETURN,
};
use crate::script::Script;
use crate::Encodable;

impl Script {
    /// `OP_DUP OP_HASH160 push(hash160) OP_EQUALVERIFY OP_CHECKSIG` for the given address's hash.
    pub fn build_public_key_hash_out(hash_buffer: [u8; 20]) -> Self {
        let mut script = Script::empty();
        script.append_opcode(OP_DUP);
        script.append_opcode(OP_HASH160);
        script
            .append_push(hash_buffer.to_vec())
            .expect("a 20-byte payload is always pushable");
        script.append_opcode(OP_EQUALVERIFY);
        script.append_opcode(OP_CHECKSIG);
        script
    }

    /// `push(pubkey bytes) OP_CHECKSIG`.
    pub fn build_public_key_out(pubkey: &PublicKey) -> Result<Self, MutateError> {
        let mut script = Script::empty();
        script.append_push(pubkey.to_buffer())?;
        script.append_opcode(OP_CHECKSIG);
        Ok(script)
    }

    /// `OP_HASH160 push(sha256ripemd160(serialize(redeemScript))) OP_EQUAL`.
    pub fn build_script_hash_out(redeem_script: &Script) -> Self {
        let hash = crate::collaborators::sha256ripemd160(&redeem_script.encode_to_vec());
        let mut script = Script::empty();
        script.append_opcode(OP_HASH160);
        script
            .append_push(hash.to_vec())
            .expect("a 20-byte payload is always pushable");
        script.append_opcode(OP_EQUAL);
        script
    }

    /// `OP_RETURN push(data)`. `data` is always treated as raw bytes.
    pub fn build_data_out(data: Vec<u8>) -> Result<Self, MutateError> {
        let mut script = Script::empty();
        script.append_opcode(OP_RETURN);
        script.append_push(data)?;
        Ok(script)
    }

    /// `push(M) push(pubkey)... push(N) OP_CHECKMULTISIG`.
    ///
    /// Unless `no_sorting` is set, `pubkeys` is first sorted ascending by its serialized bytes
    /// (stable, lexicographic) so that the same key set in any presentation order yields identical
    /// serialized output.
    ///
    /// Fails with [`MutateError::InvalidArgument`] if `m` or `pubkeys.len()` falls outside `0..=16`
    /// — both M and N are pushed as small-integer opcodes, which only encode that range.
    pub fn build_multisig_out(
        pubkeys: &[PublicKey],
        m: u8,
        no_sorting: bool,
    ) -> Result<Self, MutateError> {
        if pubkeys.len() > 16 {
            return Err(MutateError::InvalidArgument);
        }
        let n = pubkeys.len() as u8;
        let m_opcode = opcode::small_int(m).ok_or(MutateError::InvalidArgument)?;
        let n_opcode = opcode::small_int(n).ok_or(MutateError::InvalidArgument)?;

        let mut buffers: Vec<Vec<u8>> = pubkeys.iter().map(PublicKey::to_buffer).collect();
        if !no_sorting {
            buffers.sort();
        }

        let mut script = Script::empty();
        script.append_opcode(m_opcode);
        for buffer in buffers {
            script.append_push(buffer)?;
        }
        script.append_opcode(n_opcode);
        script.append_opcode(OP_CHECKMULTISIG);
        Ok(script)
    }

    /// `OP_0 push(signature)... push(serialize(redeemScript))`.
    ///
    /// `redeem_script` is the already-built redeem script (`cachedMultisig` if the caller has one,
    /// else the result of [`Script::build_multisig_out`]); this builder only assembles the
    /// scriptSig around it.
    pub fn build_p2sh_multisig_in(
        signatures: &[Vec<u8>],
        redeem_script: &Script,
    ) -> Result<Self, MutateError> {
        let mut script = Script::empty();
        script.append_opcode(OP_0);
        for signature in signatures {
            script.append_push(signature.clone())?;
        }
        script.append_push(redeem_script.encode_to_vec())?;
        Ok(script)
    }

    /// `push(signature ∥ sigtype) push(pubkey bytes)` (spec §4.7 `buildPublicKeyHashIn`). `sigtype`
    /// defaults to [`Signature::SIGHASH_ALL`] when not overridden by the caller.
    pub fn build_public_key_hash_in(
        pubkey: &PublicKey,
        signature: &[u8],
        sigtype: u8,
    ) -> Result<Self, MutateError> {
        let mut sig_with_type = Vec::with_capacity(signature.len() + 1);
        sig_with_type.extend_from_slice(signature);
        sig_with_type.push(sigtype);

        let mut script = Script::empty();
        script.append_push(sig_with_type)?;
        script.append_push(pubkey.to_buffer())?;
        Ok(script)
    }

    /// As [`Script::build_public_key_hash_in`], using the default sighash type
    /// ([`Signature::SIGHASH_ALL`]).
    #[inline]
    pub fn build_public_key_hash_in_default(
        pubkey: &PublicKey,
        signature: &[u8],
    ) -> Result<Self, MutateError> {
        Script::build_public_key_hash_in(pubkey, signature, Signature::SIGHASH_ALL)
    }

    /// Build the standard output script for `address` (spec §4.7 `fromAddress`): a P2SH address
    /// yields [`Script::build_script_hash_out`]-shaped output keyed on its hash, a P2PKH address
    /// yields [`Script::build_public_key_hash_out`]. Any other address kind is
    /// [`BuildError::UnrecognizedAddress`].
    pub fn from_address(address: &Address) -> Result<Self, BuildError> {
        match address.kind() {
            AddressKind::P2pkh => Ok(Script::build_public_key_hash_out(address.hash_buffer())),
            AddressKind::P2sh => {
                let mut script = Script::empty();
                script.append_opcode(OP_HASH160);
                script.append_push(address.hash_buffer().to_vec())?;
                script.append_opcode(OP_EQUAL);
                Ok(script)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::classify::ScriptType;

    const KEY_A: [u8; 33] = [
        0x02, 0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce, 0x87,
        0x0b, 0x07, 0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81, 0x5b, 0x16,
        0xf8, 0x17, 0x98,
    ];
    const KEY_B: [u8; 33] = [
        0x03, 0xc6, 0x04, 0x7f, 0x94, 0x41, 0xed, 0x7d, 0x6d, 0x30, 0x45, 0x40, 0x6e, 0x95, 0xc0,
        0x7c, 0xd8, 0x5c, 0x77, 0x8e, 0x4b, 0x8c, 0xef, 0x3c, 0xa7, 0xab, 0xac, 0x09, 0xb9, 0x5c,
        0x70, 0x9e, 0xe5,
    ];
    const KEY_C: [u8; 33] = [
        0x02, 0xf9, 0x30, 0x8a, 0x01, 0x92, 0x58, 0xc3, 0x10, 0x49, 0x34, 0x4f, 0x85, 0xf8, 0x9d,
        0x52, 0x29, 0xb5, 0x31, 0xc8, 0x45, 0x83, 0x6f, 0x99, 0xb0, 0x86, 0x01, 0xf1, 0x13, 0xbc,
        0xe0, 0x36, 0xf9,
    ];

    #[test]
    fn e1_build_public_key_hash_out_classifies_back() {
        let script = Script::build_public_key_hash_out([0u8; 20]);
        assert_eq!(script.classify(), ScriptType::PubkeyhashOut);
        assert_eq!(script.public_key_hash().unwrap(), [0u8; 20]);
    }

    #[test]
    fn e2_build_script_hash_out_classifies_back() {
        let redeem = Script::build_public_key_hash_out([0xAB; 20]);
        let out = Script::build_script_hash_out(&redeem);
        assert_eq!(out.classify(), ScriptType::ScripthashOut);
        let expected_hash = crate::collaborators::sha256ripemd160(&redeem.encode_to_vec());
        assert_eq!(out.chunks()[1].payload().unwrap(), &expected_hash[..]);
    }

    #[test]
    fn e3_build_data_out_bound() {
        let short = Script::build_data_out(vec![0u8; 40]).unwrap();
        assert!(short.is_data_out());
        let long = Script::build_data_out(vec![0u8; 41]).unwrap();
        assert!(!long.is_data_out());
    }

    #[test]
    fn e4_deterministic_multisig_across_permutations() {
        let a = PublicKey::from_slice(&KEY_A).unwrap();
        let b = PublicKey::from_slice(&KEY_B).unwrap();
        let c = PublicKey::from_slice(&KEY_C).unwrap();

        let order1 = Script::build_multisig_out(&[a.clone(), b.clone(), c.clone()], 2, false)
            .unwrap()
            .encode_to_vec();
        let order2 = Script::build_multisig_out(&[c.clone(), a.clone(), b.clone()], 2, false)
            .unwrap()
            .encode_to_vec();
        let order3 = Script::build_multisig_out(&[b, c, a], 2, false)
            .unwrap()
            .encode_to_vec();

        assert_eq!(order1, order2);
        assert_eq!(order1, order3);
    }

    #[test]
    fn no_sorting_preserves_input_order() {
        let a = PublicKey::from_slice(&KEY_A).unwrap();
        let b = PublicKey::from_slice(&KEY_B).unwrap();

        let ab = Script::build_multisig_out(&[a.clone(), b.clone()], 1, true).unwrap();
        let ba = Script::build_multisig_out(&[b, a], 1, true).unwrap();
        assert_ne!(ab.encode_to_vec(), ba.encode_to_vec());
    }

    #[test]
    fn multisig_out_classifies_as_multisig() {
        let a = PublicKey::from_slice(&KEY_A).unwrap();
        let b = PublicKey::from_slice(&KEY_B).unwrap();
        let script = Script::build_multisig_out(&[a, b], 2, false).unwrap();
        assert_eq!(script.classify(), ScriptType::MultisigOut);
    }

    #[test]
    fn e5_build_public_key_hash_in_shape() {
        let pubkey = PublicKey::from_slice(&KEY_A).unwrap();
        let sig72 = vec![0x30; 72];
        let script = Script::build_public_key_hash_in(&pubkey, &sig72, Signature::SIGHASH_ALL)
            .unwrap();
        assert_eq!(script.len(), 2);
        assert_eq!(script.chunks()[1].payload().unwrap(), &KEY_A[..]);
        let sig_push = script.chunks()[0].payload().unwrap();
        assert_eq!(*sig_push.last().unwrap(), 0x01);
    }

    #[test]
    fn p2sh_multisig_in_embeds_redeem_script() {
        let a = PublicKey::from_slice(&KEY_A).unwrap();
        let b = PublicKey::from_slice(&KEY_B).unwrap();
        let redeem = Script::build_multisig_out(&[a, b], 2, false).unwrap();
        let sigs = vec![vec![0x30; 72], vec![0x30; 71]];
        let scriptsig = Script::build_p2sh_multisig_in(&sigs, &redeem).unwrap();
        assert_eq!(scriptsig.chunks()[0].opcode(), OP_0);
        assert_eq!(
            scriptsig.chunks().last().unwrap().payload().unwrap(),
            &redeem.encode_to_vec()[..]
        );
    }

    #[test]
    fn from_address_dispatches_on_kind() {
        let p2pkh = Address::new([0x11; 20], AddressKind::P2pkh);
        let script = Script::from_address(&p2pkh).unwrap();
        assert_eq!(script.classify(), ScriptType::PubkeyhashOut);

        let p2sh = Address::new([0x22; 20], AddressKind::P2sh);
        let script = Script::from_address(&p2sh).unwrap();
        assert_eq!(script.classify(), ScriptType::ScripthashOut);
    }
}
