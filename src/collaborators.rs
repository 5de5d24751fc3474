//! The small, well-defined interfaces this crate consumes from its external collaborators:
//! public-key validity/serialization, address hash/kind, and hash160.
//!
//! These collaborators' *internal design* is out of scope for this crate — their broader
//! responsibilities (key derivation, base58check/cashaddr text encoding, transaction signing)
//! belong elsewhere. What lives here is only the narrow contract the script builders and
//! classifier actually call.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// A SEC-encoded secp256k1 public key.
///
/// Validity is delegated to `secp256k1::PublicKey::from_slice`, which checks both the encoding
/// (33-byte compressed or 65-byte uncompressed prefix) and that the point is actually on the
/// curve — this crate does not reimplement elliptic-curve arithmetic, it only calls into the
/// `secp256k1` dependency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    inner: secp256k1::PublicKey,
    /// The exact bytes this key was constructed from, preserved verbatim so that
    /// [`PublicKey::to_buffer`] round-trips the caller's chosen serialization (compressed or
    /// uncompressed) rather than always re-compressing.
    buffer: Vec<u8>,
}

impl PublicKey {
    /// Parse a SEC-encoded public key, validating it against the curve.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let inner = secp256k1::PublicKey::from_slice(bytes).ok()?;
        Some(PublicKey {
            inner,
            buffer: bytes.to_vec(),
        })
    }

    /// True iff `bytes` decodes as a valid SEC-encoded public key.
    #[inline]
    pub fn is_valid(bytes: &[u8]) -> bool {
        secp256k1::PublicKey::from_slice(bytes).is_ok()
    }

    /// The exact bytes this key was parsed from.
    #[inline]
    pub fn to_buffer(&self) -> Vec<u8> {
        self.buffer.clone()
    }

    /// The underlying `secp256k1` key, for collaborators that need curve operations this crate
    /// itself does not perform (signing, ECDH, etc).
    #[inline]
    pub fn inner(&self) -> &secp256k1::PublicKey {
        &self.inner
    }
}

/// Which standard template an [`Address`] names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// Pay-to-public-key-hash.
    P2pkh,
    /// Pay-to-script-hash.
    P2sh,
}

/// A decoded Bitcoin address: a 20-byte payload hash plus a kind tag.
///
/// This crate does not implement base58check or cashaddr text encoding — those belong to a
/// dedicated address-encoding crate. `Address` carries only the contract the script builders
/// need: the payload hash and which standard template it names.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    hash: [u8; 20],
    kind: AddressKind,
}

impl Address {
    /// Build an address from its decoded hash and kind.
    #[inline]
    pub fn new(hash: [u8; 20], kind: AddressKind) -> Self {
        Address { hash, kind }
    }

    /// Construct a P2PKH address from a public key, hashing it with [`sha256ripemd160`].
    #[inline]
    pub fn from_public_key(pubkey: &PublicKey) -> Self {
        Address::new(sha256ripemd160(&pubkey.to_buffer()), AddressKind::P2pkh)
    }

    /// The 20-byte payload hash.
    #[inline]
    pub fn hash_buffer(&self) -> [u8; 20] {
        self.hash
    }

    /// Which standard template this address names.
    #[inline]
    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// True if this address names a pay-to-script-hash output.
    #[inline]
    pub fn is_pay_to_script_hash(&self) -> bool {
        self.kind == AddressKind::P2sh
    }

    /// True if this address names a pay-to-public-key-hash output.
    #[inline]
    pub fn is_pay_to_public_key_hash(&self) -> bool {
        self.kind == AddressKind::P2pkh
    }
}

/// `sha256(bytes)`, then `ripemd160` of that digest — Bitcoin's "hash160". Composed from two
/// focused RustCrypto crates rather than hand-rolled.
pub fn sha256ripemd160(bytes: &[u8]) -> [u8; 20] {
    let sha256 = Sha256::digest(bytes);
    let ripemd = Ripemd160::digest(sha256);
    ripemd.into()
}

/// Signature-hash-type constants.
pub struct Signature;

impl Signature {
    /// Sign a commitment to the whole transaction — the default sighash type.
    pub const SIGHASH_ALL: u8 = 0x01;
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPRESSED_GENERATOR: [u8; 33] = [
        0x02, 0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce, 0x87,
        0x0b, 0x07, 0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81, 0x5b, 0x16,
        0xf8, 0x17, 0x98,
    ];

    #[test]
    fn valid_public_key_round_trips() {
        assert!(PublicKey::is_valid(&COMPRESSED_GENERATOR));
        let key = PublicKey::from_slice(&COMPRESSED_GENERATOR).unwrap();
        assert_eq!(key.to_buffer(), COMPRESSED_GENERATOR.to_vec());
    }

    #[test]
    fn invalid_public_key_rejected() {
        assert!(!PublicKey::is_valid(&[0u8; 33]));
        assert!(!PublicKey::is_valid(&[0x02; 10]));
    }

    #[test]
    fn hash160_of_empty_matches_known_vector() {
        // hash160("") = ripemd160(sha256("")).
        let got = sha256ripemd160(b"");
        let expected =
            hex::decode("b472a266d0bd89c13706a4132ccfb16f7c3b9fcb").unwrap();
        assert_eq!(got.to_vec(), expected);
    }

    #[test]
    fn address_kind_accessors() {
        let addr = Address::new([0u8; 20], AddressKind::P2sh);
        assert!(addr.is_pay_to_script_hash());
        assert!(!addr.is_pay_to_public_key_hash());
    }
}
