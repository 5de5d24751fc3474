//! [`Script`]: an ordered sequence of [`Chunk`]s, with byte-level parsing/serialization
//! (spec §4.2, §4.3), the mutator API (§4.6), the text form (§4.4), classification (§4.5), and
//! the standard-template builders (§4.7).
//!
//! The teacher's `transaction::script::Script` is a thin newtype over raw bytes with a few ad hoc
//! pattern checks (`is_op_return`, `is_p2pkh`) against fixed byte offsets. This module keeps that
//! shape — a newtype with `Encodable` plus convenience predicates — but generalizes the payload
//! from raw bytes to a parsed [`Chunk`] sequence, since the richer spec needs push-data awareness
//! (PUSHDATA1/2/4), a text form, and a mutator API that all operate at chunk granularity.

pub mod builder;
pub mod classify;
pub mod mutate;
pub mod text;

use std::convert::TryFrom;

use bytes::{Buf, BufMut};

use crate::bytes_io::{ScriptReader, ScriptWriter};
use crate::chunk::Chunk;
use crate::error::DecodeError;
use crate::opcode::{self, OP_PUSHBYTES_MAX, OP_PUSHBYTES_MIN, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4};
use crate::{Decodable, Encodable};

/// An ordered sequence of chunks (spec §3). Equality is chunk-wise, which is equivalent to
/// byte-equality of the serialized form because encoding is deterministic per chunk (spec §6.3).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Script {
    chunks: Vec<Chunk>,
}

impl Script {
    /// A script with no chunks (spec §4.7 `empty()`).
    #[inline]
    pub fn empty() -> Self {
        Script { chunks: Vec::new() }
    }

    /// Build a script directly from an already-assembled chunk sequence.
    #[inline]
    pub fn from_chunks(chunks: Vec<Chunk>) -> Self {
        Script { chunks }
    }

    /// The chunk sequence, borrowed.
    #[inline]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// The chunk sequence, consuming `self`.
    #[inline]
    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }

    /// Number of chunks.
    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True if the script has no chunks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// True iff every chunk's opcode is `<= OP_16` (spec §4.5 `is_push_only`). This holds for
    /// scripts built purely from pushes and small-integer literals, such as scriptSigs and P2SH
    /// redeem-script inputs that contain no control-flow or crypto opcodes.
    pub fn is_push_only(&self) -> bool {
        self.chunks
            .iter()
            .all(|chunk| chunk.opcode() <= opcode::OP_16)
    }
}

impl From<Script> for Vec<u8> {
    #[inline]
    fn from(script: Script) -> Self {
        script.encode_to_vec()
    }
}

impl TryFrom<Vec<u8>> for Script {
    type Error = DecodeError;

    #[inline]
    fn try_from(raw: Vec<u8>) -> Result<Self, Self::Error> {
        Script::decode(&mut raw.as_slice())
    }
}

impl Encodable for Script {
    #[inline]
    fn encoded_len(&self) -> usize {
        self.chunks.iter().map(Chunk::encoded_len).sum()
    }

    fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        let mut writer = ScriptWriter::new(buf);
        for chunk in &self.chunks {
            match chunk {
                Chunk::Bare(opcode) => writer.write_u8(*opcode),
                Chunk::Push { opcode, payload } => {
                    writer.write_u8(*opcode);
                    match *opcode {
                        OP_PUSHDATA1 => writer.write_u8(payload.len() as u8),
                        OP_PUSHDATA2 => writer.write_u16_le(payload.len() as u16),
                        OP_PUSHDATA4 => writer.write_u32_le(payload.len() as u32),
                        _ => {}
                    }
                    writer.write_bytes(payload);
                }
            }
        }
    }
}

impl Decodable for Script {
    type Error = DecodeError;

    fn decode<B: Buf>(buf: &mut B) -> Result<Self, Self::Error> {
        let mut reader = ScriptReader::new(buf);
        let mut chunks = Vec::new();
        while !reader.is_empty() {
            let opcode = reader.read_u8()?;
            let chunk = match opcode {
                OP_PUSHBYTES_MIN..=OP_PUSHBYTES_MAX => {
                    let payload = reader.read_bytes(opcode as usize)?;
                    Chunk::Push { opcode, payload }
                }
                OP_PUSHDATA1 => {
                    let len = reader.read_u8()? as usize;
                    let payload = reader.read_bytes(len)?;
                    Chunk::Push { opcode, payload }
                }
                OP_PUSHDATA2 => {
                    let len = reader.read_u16_le()? as usize;
                    let payload = reader.read_bytes(len)?;
                    Chunk::Push { opcode, payload }
                }
                OP_PUSHDATA4 => {
                    let len = reader.read_u32_le()? as usize;
                    let payload = reader.read_bytes(len)?;
                    Chunk::Push { opcode, payload }
                }
                other => Chunk::Bare(other),
            };
            chunks.push(chunk);
        }
        Ok(Script { chunks })
    }
}
