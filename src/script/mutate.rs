//! Mutator API (spec §4.6): append/prepend chunks, select the minimum push opcode by payload
//! length, strip `OP_CODESEPARATOR`, and compare scripts chunk-wise.
//!
//! The upstream `append`/`prepend` accept a grab-bag of input types (a number, an opcode object, a
//! byte buffer, a prebuilt chunk). Per the Design Notes (spec §9) this crate instead exposes a
//! small closed set of typed entry points — [`Script::append_opcode`], [`Script::append_push`],
//! [`Script::append_chunk`], [`Script::extend`] — and a [`ScriptAppendable`] facade that
//! `append`/`prepend` dispatch over, resolved at compile time via monomorphization rather than a
//! runtime type switch.

use crate::chunk::Chunk;
use crate::error::MutateError;
use crate::opcode::OP_CODESEPARATOR;
use crate::script::Script;

/// Anything [`Script::append`]/[`Script::prepend`] can accept.
///
/// Implemented for a closed set of types: a bare opcode value (`u8`), an opcode name (`&str`), a
/// byte payload (`&[u8]`/`Vec<u8>`), and a prebuilt [`Chunk`]. Any other type is an
/// [`MutateError::InvalidArgument`] at the call site — there is no blanket impl, so attempting to
/// append an unsupported type is a compile error rather than a runtime one.
pub trait ScriptAppendable {
    /// Convert `self` into the chunk it should become, or fail if it is a 0-byte payload (a
    /// documented no-op, spec §4.6) in which case `Ok(None)` means "append nothing".
    fn into_chunk(self) -> Result<Option<Chunk>, MutateError>;
}

impl ScriptAppendable for u8 {
    #[inline]
    fn into_chunk(self) -> Result<Option<Chunk>, MutateError> {
        Ok(Some(Chunk::Bare(self)))
    }
}

impl ScriptAppendable for &str {
    fn into_chunk(self) -> Result<Option<Chunk>, MutateError> {
        crate::opcode::from_name(self)
            .map(|opcode| Some(Chunk::Bare(opcode)))
            .ok_or(MutateError::InvalidArgument)
    }
}

impl ScriptAppendable for &[u8] {
    #[inline]
    fn into_chunk(self) -> Result<Option<Chunk>, MutateError> {
        Chunk::push_minimal(self.to_vec())
    }
}

impl ScriptAppendable for Vec<u8> {
    #[inline]
    fn into_chunk(self) -> Result<Option<Chunk>, MutateError> {
        Chunk::push_minimal(self)
    }
}

impl ScriptAppendable for Chunk {
    #[inline]
    fn into_chunk(self) -> Result<Option<Chunk>, MutateError> {
        Ok(Some(self))
    }
}

impl Script {
    /// Append a bare opcode.
    #[inline]
    pub fn append_opcode(&mut self, opcode: u8) -> &mut Self {
        self.chunks.push(Chunk::Bare(opcode));
        self
    }

    /// Append `payload` as a push chunk, selecting the opcode via the minimum-encoding rule
    /// (spec §4.6). A 0-byte payload is a documented no-op.
    pub fn append_push(&mut self, payload: Vec<u8>) -> Result<&mut Self, MutateError> {
        if let Some(chunk) = Chunk::push_minimal(payload)? {
            self.chunks.push(chunk);
        }
        Ok(self)
    }

    /// Append a prebuilt chunk as-is.
    #[inline]
    pub fn append_chunk(&mut self, chunk: Chunk) -> &mut Self {
        self.chunks.push(chunk);
        self
    }

    /// Append every chunk of `other` to the end of this script, in order.
    #[inline]
    pub fn extend(&mut self, other: Script) -> &mut Self {
        self.chunks.extend(other.chunks);
        self
    }

    /// Append `item`, dispatching on its type via [`ScriptAppendable`] (spec §4.6 `append`).
    pub fn append<T: ScriptAppendable>(&mut self, item: T) -> Result<&mut Self, MutateError> {
        if let Some(chunk) = item.into_chunk()? {
            self.chunks.push(chunk);
        }
        Ok(self)
    }

    /// Prepend `item`, dispatching on its type via [`ScriptAppendable`] (spec §4.6 `prepend`).
    pub fn prepend<T: ScriptAppendable>(&mut self, item: T) -> Result<&mut Self, MutateError> {
        if let Some(chunk) = item.into_chunk()? {
            self.chunks.insert(0, chunk);
        }
        Ok(self)
    }

    /// A script identical to `self` except every `OP_CODESEPARATOR` chunk is removed, preserving
    /// the order of the remaining chunks (spec §4.6 `removeCodeseparators`).
    pub fn remove_codeseparators(&self) -> Script {
        Script::from_chunks(
            self.chunks
                .iter()
                .filter(|chunk| chunk.opcode() != OP_CODESEPARATOR)
                .cloned()
                .collect(),
        )
    }
}
