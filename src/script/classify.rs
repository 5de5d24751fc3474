//! Classifier (spec §4.5): recognize the standard output/input templates.
//!
//! The upstream source binds classification methods by name into a map and iterates it, which
//! leaves the tie-break order implicit in iteration order. Per the Design Notes (spec §9) this
//! module instead walks an explicit `const` array of `(ScriptType, fn(&[Chunk]) -> bool)` pairs in
//! definition order, so the contract in §4.5 — "the first match wins" — is visible in the source.

use crate::chunk::Chunk;
use crate::collaborators::PublicKey;
use crate::error::ClassifyError;
use crate::opcode::{
    self, OP_0, OP_CHECKMULTISIG, OP_CHECKSIG, OP_DUP, OP_EQUAL, OP_EQUALVERIFY, OP_HASH160,
    OP_RETURN,
};
use crate::script::Script;
use crate::Decodable;

/// The standard output/input templates this crate recognizes (spec §4.5).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScriptType {
    /// `push(pubkey) OP_CHECKSIG`.
    PubkeyOut,
    /// `push(signature)` (a lone P2PK scriptSig).
    PubkeyIn,
    /// `OP_DUP OP_HASH160 push(hash160) OP_EQUALVERIFY OP_CHECKSIG`.
    PubkeyhashOut,
    /// `push(signature) push(pubkey)`.
    PubkeyhashIn,
    /// `OP_HASH160 push(hash160) OP_EQUAL`.
    ScripthashOut,
    /// Push-only script whose last push is a serialized redeem script of standard shape.
    ScripthashIn,
    /// `push(M) push(pubkey)... push(N) OP_CHECKMULTISIG`.
    MultisigOut,
    /// `OP_0 push(signature)...` (a bare-multisig scriptSig).
    MultisigIn,
    /// `OP_RETURN [push(data)]`.
    DataOut,
    /// Matches none of the above.
    Unknown,
}

/// Ordered recognition rules; the first predicate that matches wins (spec §4.5). The order here
/// *is* the tie-break contract — `PubkeyhashIn` is listed before `ScripthashIn` so the two resolve
/// in favor of `PubkeyhashIn` when a script structurally matches both.
const RULES: &[(ScriptType, fn(&[Chunk]) -> bool)] = &[
    (ScriptType::PubkeyhashOut, is_pubkeyhash_out),
    (ScriptType::PubkeyhashIn, is_pubkeyhash_in),
    (ScriptType::PubkeyOut, is_pubkey_out),
    (ScriptType::PubkeyIn, is_pubkey_in),
    (ScriptType::ScripthashOut, is_scripthash_out),
    (ScriptType::ScripthashIn, is_scripthash_in),
    (ScriptType::MultisigOut, is_multisig_out),
    (ScriptType::MultisigIn, is_multisig_in),
    (ScriptType::DataOut, is_data_out),
];

impl Script {
    /// Classify this script against the standard templates (spec §4.5), in the order of [`RULES`].
    pub fn classify(&self) -> ScriptType {
        for (kind, predicate) in RULES {
            if predicate(&self.chunks) {
                return *kind;
            }
        }
        ScriptType::Unknown
    }

    /// True iff [`Script::classify`] does not return [`ScriptType::Unknown`].
    #[inline]
    pub fn is_standard(&self) -> bool {
        self.classify() != ScriptType::Unknown
    }

    /// True iff this script classifies as [`ScriptType::DataOut`].
    #[inline]
    pub fn is_data_out(&self) -> bool {
        self.classify() == ScriptType::DataOut
    }

    /// The 20-byte public-key hash embedded in a `PubkeyhashOut` script.
    ///
    /// Fails with [`ClassifyError::PreconditionFailed`] if this script does not classify as
    /// `PubkeyhashOut` (spec §7).
    pub fn public_key_hash(&self) -> Result<[u8; 20], ClassifyError> {
        if self.classify() != ScriptType::PubkeyhashOut {
            return Err(ClassifyError::PreconditionFailed);
        }
        let payload = self.chunks[2].payload().expect("validated by is_pubkeyhash_out");
        let mut hash = [0u8; 20];
        hash.copy_from_slice(payload);
        Ok(hash)
    }
}

fn is_pubkeyhash_out(chunks: &[Chunk]) -> bool {
    matches!(
        chunks,
        [
            Chunk::Bare(OP_DUP),
            Chunk::Bare(OP_HASH160),
            Chunk::Push { payload, .. },
            Chunk::Bare(OP_EQUALVERIFY),
            Chunk::Bare(OP_CHECKSIG),
        ] if payload.len() == 20
    )
}

fn is_der_sig_length(len: usize) -> bool {
    matches!(len, 0x47 | 0x48 | 0x49)
}

fn is_pubkeyhash_in(chunks: &[Chunk]) -> bool {
    match chunks {
        [Chunk::Push { payload: sig, .. }, Chunk::Push { payload: pk, .. }] => {
            is_der_sig_length(sig.len()) && PublicKey::is_valid(pk)
        }
        _ => false,
    }
}

fn is_pubkey_out(chunks: &[Chunk]) -> bool {
    match chunks {
        [Chunk::Push { payload, .. }, Chunk::Bare(OP_CHECKSIG)] => PublicKey::is_valid(payload),
        _ => false,
    }
}

fn is_pubkey_in(chunks: &[Chunk]) -> bool {
    matches!(chunks, [Chunk::Push { payload, .. }] if payload.len() == 0x47)
}

fn is_scripthash_out(chunks: &[Chunk]) -> bool {
    matches!(
        chunks,
        [
            Chunk::Bare(OP_HASH160),
            Chunk::Push { payload, .. },
            Chunk::Bare(OP_EQUAL),
        ] if payload.len() == 20
    )
}

fn is_scripthash_in(chunks: &[Chunk]) -> bool {
    match chunks.last() {
        Some(Chunk::Push { payload, .. }) if !chunks.is_empty() => {
            match Script::decode(&mut payload.as_slice()) {
                Ok(redeem) => redeem.classify() != ScriptType::Unknown,
                Err(_) => false,
            }
        }
        _ => false,
    }
}

fn is_multisig_out(chunks: &[Chunk]) -> bool {
    if chunks.len() <= 3 {
        return false;
    }
    let Some(Chunk::Bare(m)) = chunks.first() else {
        return false;
    };
    if !opcode::is_small_int(*m) {
        return false;
    }
    let Some(Chunk::Bare(n)) = chunks.get(chunks.len() - 2) else {
        return false;
    };
    if !opcode::is_small_int(*n) {
        return false;
    }
    if chunks.last().map(Chunk::opcode) != Some(OP_CHECKMULTISIG) {
        return false;
    }
    chunks[1..chunks.len() - 2].iter().all(Chunk::is_push)
}

fn is_multisig_in(chunks: &[Chunk]) -> bool {
    if chunks.len() < 2 {
        return false;
    }
    if chunks[0].opcode() != OP_0 {
        return false;
    }
    chunks[1..]
        .iter()
        .all(|chunk| matches!(chunk, Chunk::Push { payload, .. } if payload.len() == 0x47))
}

fn is_data_out(chunks: &[Chunk]) -> bool {
    match chunks {
        [Chunk::Bare(OP_RETURN)] => true,
        [Chunk::Bare(OP_RETURN), Chunk::Push { payload, .. }] => payload.len() <= 40,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;

    fn hex_script(s: &str) -> Script {
        let raw = hex::decode(s).unwrap();
        Script::decode(&mut raw.as_slice()).unwrap()
    }

    #[test]
    fn e1_pubkeyhash_out() {
        let script = hex_script("76a914000000000000000000000000000000000000000088ac");
        assert_eq!(script.classify(), ScriptType::PubkeyhashOut);
        assert_eq!(script.public_key_hash().unwrap(), [0u8; 20]);
    }

    #[test]
    fn e2_scripthash_out() {
        let script = hex_script("a914000000000000000000000000000000000000000087");
        assert_eq!(script.classify(), ScriptType::ScripthashOut);
    }

    #[test]
    fn e3_data_out() {
        let script = hex_script("6a0548656c6c6f");
        assert_eq!(script.classify(), ScriptType::DataOut);
        assert!(script.is_data_out());
    }

    #[test]
    fn data_out_bare_return_only() {
        let script = Script::from_chunks(vec![Chunk::Bare(OP_RETURN)]);
        assert_eq!(script.classify(), ScriptType::DataOut);
    }

    #[test]
    fn data_out_over_40_bytes_is_unknown() {
        let mut script = Script::empty();
        script.append_opcode(OP_RETURN);
        script.append(vec![0u8; 41]).unwrap();
        assert_eq!(script.classify(), ScriptType::Unknown);
        assert!(!script.is_data_out());
    }

    #[test]
    fn public_key_hash_precondition_failed_on_wrong_shape() {
        let script = Script::empty();
        assert_eq!(
            script.public_key_hash(),
            Err(ClassifyError::PreconditionFailed)
        );
    }

    #[test]
    fn ambiguous_script_prefers_pubkeyhash_in_over_scripthash_in() {
        // A script that is both a plausible PUBKEYHASH_IN (sig + valid pubkey) and, because a
        // valid pubkey happens to also parse as a (degenerate) script, a plausible SCRIPTHASH_IN.
        // The classifier order (spec §4.5) resolves this in favor of PUBKEYHASH_IN.
        let sig = vec![0u8; 0x47];
        let compressed_generator = vec![
            0x02, 0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce,
            0x87, 0x0b, 0x07, 0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81,
            0x5b, 0x16, 0xf8, 0x17, 0x98,
        ];
        let script = Script::from_chunks(vec![
            Chunk::push(0x47, sig).unwrap(),
            Chunk::push(33, compressed_generator).unwrap(),
        ]);
        assert_eq!(script.classify(), ScriptType::PubkeyhashIn);
    }

    #[test]
    fn multisig_out_and_in() {
        let pk1 = vec![0x02; 33];
        let pk2 = vec![0x03; 33];
        let out = Script::from_chunks(vec![
            Chunk::Bare(opcode::OP_1),
            Chunk::push(33, pk1).unwrap(),
            Chunk::push(33, pk2).unwrap(),
            Chunk::Bare(opcode::OP_2),
            Chunk::Bare(OP_CHECKMULTISIG),
        ]);
        assert_eq!(out.classify(), ScriptType::MultisigOut);

        let input = Script::from_chunks(vec![
            Chunk::Bare(OP_0),
            Chunk::push(0x47, vec![0u8; 0x47]).unwrap(),
        ]);
        assert_eq!(input.classify(), ScriptType::MultisigIn);
    }
}
