//! Parsing, serialization, classification, and construction of Bitcoin transaction scripts.
//!
//! This crate is a codec: it turns the canonical byte encoding of a Bitcoin script into an
//! ordered sequence of [`chunk::Chunk`]s and back, renders and parses the human-readable text
//! form, recognizes the standard output/input templates
//! ([`script::classify::ScriptType`]), and builds scripts for those templates
//! ([`script::builder`]). It does not execute scripts, compute signature hashes, or perform
//! elliptic-curve operations beyond the narrow [`collaborators::PublicKey::is_valid`] check the
//! classifier needs.

pub mod bytes_io;
pub mod chunk;
pub mod collaborators;
pub mod error;
pub mod opcode;
pub mod script;
pub mod var_int;

pub use chunk::Chunk;
pub use error::{Error, Result};
pub use script::{classify::ScriptType, Script};

use bytes::BufMut;

/// Types that know their own encoded length and can write themselves into a [`BufMut`].
pub trait Encodable {
    /// Length in bytes of the encoded form.
    fn encoded_len(&self) -> usize;

    /// Write the encoded form into `buf`. Never fails: callers are responsible for ensuring
    /// `buf` has enough remaining capacity, or use [`Encodable::encode`] instead.
    fn encode_raw<B: BufMut>(&self, buf: &mut B);

    /// Write the encoded form into `buf`, checking capacity first.
    #[inline]
    fn encode<B: BufMut>(&self, buf: &mut B) -> std::result::Result<(), error::CapacityError> {
        if buf.remaining_mut() < self.encoded_len() {
            return Err(error::CapacityError);
        }
        self.encode_raw(buf);
        Ok(())
    }

    /// Encode into a freshly allocated byte vector.
    #[inline]
    fn encode_to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_raw(&mut buf);
        buf
    }
}

/// Types that can be parsed out of a [`bytes::Buf`].
pub trait Decodable: Sized {
    /// The error returned when decoding fails.
    type Error;

    /// Parse `Self` from the front of `buf`, advancing the cursor past what was consumed.
    fn decode<B: bytes::Buf>(buf: &mut B) -> std::result::Result<Self, Self::Error>;
}
