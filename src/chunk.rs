//! [`Chunk`]: the unit of a parsed script, either a bare opcode or a push with payload.
//!
//! Modeled as a tagged variant whose invariants are enforced by construction rather than checked
//! ad hoc at every call site.

use thiserror::Error;

use crate::opcode::{self, OP_PUSHBYTES_MAX, OP_PUSHBYTES_MIN, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4};

/// A chunk failed one of its length invariants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ChunkError {
    /// A direct-length push opcode's payload length did not equal the opcode value.
    #[error("direct push opcode {opcode:#04x} requires a payload of exactly {opcode} bytes, got {len}")]
    DirectLengthMismatch { opcode: u8, len: usize },
    /// An `OP_PUSHDATA1` payload was too long for a 1-byte length field.
    #[error("OP_PUSHDATA1 payload too long: {0} bytes (max 255)")]
    PushData1TooLong(usize),
    /// An `OP_PUSHDATA2` payload was too long for a 2-byte length field.
    #[error("OP_PUSHDATA2 payload too long: {0} bytes (max 65535)")]
    PushData2TooLong(usize),
    /// An `OP_PUSHDATA4` payload was too long for a 4-byte length field.
    #[error("OP_PUSHDATA4 payload too long: {0} bytes (max 4294967295)")]
    PushData4TooLong(usize),
    /// The opcode given to [`Chunk::push`] is not a push opcode at all.
    #[error("opcode {0:#04x} is not a push opcode")]
    NotAPushOpcode(u8),
}

/// One element of a parsed [`crate::script::Script`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Chunk {
    /// An opcode with no payload.
    Bare(u8),
    /// A push opcode together with its payload. The declared length is always `payload.len()` by
    /// construction — there is nowhere to store a declared length that disagrees with the
    /// payload, so a length mismatch cannot exist once a `Push` value exists.
    Push { opcode: u8, payload: Vec<u8> },
}

impl Chunk {
    /// Build a bare (payload-less) chunk.
    #[inline]
    pub fn bare(opcode: u8) -> Self {
        Chunk::Bare(opcode)
    }

    /// Build a push chunk, checking that `opcode` is a push opcode and that `payload`'s length is
    /// legal for it.
    pub fn push(opcode: u8, payload: Vec<u8>) -> Result<Self, ChunkError> {
        let len = payload.len();
        match opcode {
            OP_PUSHBYTES_MIN..=OP_PUSHBYTES_MAX => {
                if len != opcode as usize {
                    return Err(ChunkError::DirectLengthMismatch { opcode, len });
                }
            }
            OP_PUSHDATA1 => {
                if len >= 1 << 8 {
                    return Err(ChunkError::PushData1TooLong(len));
                }
            }
            OP_PUSHDATA2 => {
                if len >= 1 << 16 {
                    return Err(ChunkError::PushData2TooLong(len));
                }
            }
            OP_PUSHDATA4 => {
                if len > u32::MAX as usize {
                    return Err(ChunkError::PushData4TooLong(len));
                }
            }
            _ => return Err(ChunkError::NotAPushOpcode(opcode)),
        }
        Ok(Chunk::Push { opcode, payload })
    }

    /// Build a push chunk using the minimum-encoding rule: the smallest push opcode capable of
    /// carrying `payload`'s length. An empty payload yields `None` (appending an empty payload is
    /// a no-op at the mutator layer).
    pub fn push_minimal(payload: Vec<u8>) -> Result<Option<Self>, crate::error::MutateError> {
        let len = payload.len();
        if len == 0 {
            return Ok(None);
        }
        let opcode = if len < OP_PUSHDATA1 as usize {
            len as u8
        } else if len < 1 << 8 {
            OP_PUSHDATA1
        } else if len < 1 << 16 {
            OP_PUSHDATA2
        } else if len <= u32::MAX as usize {
            OP_PUSHDATA4
        } else {
            return Err(crate::error::MutateError::PayloadTooLarge(len));
        };
        Ok(Some(
            Chunk::push(opcode, payload).expect("minimal opcode selection always satisfies its own length bound"),
        ))
    }

    /// The chunk's opcode value, regardless of whether it carries a payload.
    #[inline]
    pub fn opcode(&self) -> u8 {
        match self {
            Chunk::Bare(opcode) => *opcode,
            Chunk::Push { opcode, .. } => *opcode,
        }
    }

    /// The chunk's payload, if it has one.
    #[inline]
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Chunk::Bare(_) => None,
            Chunk::Push { payload, .. } => Some(payload),
        }
    }

    /// True if this chunk is a push opcode carrying a payload.
    #[inline]
    pub fn is_push(&self) -> bool {
        matches!(self, Chunk::Push { .. })
    }

    /// Length in bytes of the encoded chunk (opcode byte, plus any length prefix, plus payload).
    pub fn encoded_len(&self) -> usize {
        match self {
            Chunk::Bare(_) => 1,
            Chunk::Push { opcode, payload } => {
                1 + match *opcode {
                    OP_PUSHDATA1 => 1,
                    OP_PUSHDATA2 => 2,
                    OP_PUSHDATA4 => 4,
                    _ => 0,
                } + payload.len()
            }
        }
    }

    /// True if this chunk's opcode is `OP_0` or `OP_1..OP_16` (a small-integer literal).
    #[inline]
    pub fn is_small_int(&self) -> bool {
        matches!(self, Chunk::Bare(opcode) if opcode::is_small_int(*opcode))
    }
}
