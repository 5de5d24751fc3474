//! Error types surfaced by this crate.
//!
//! Each concern gets its own small `thiserror` enum, composed into a unifying [`Error`] for callers
//! that don't care which stage failed.

use thiserror::Error as ThisError;

/// `buf` did not have enough remaining capacity for an [`crate::Encodable::encode`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
#[error("destination buffer has insufficient capacity")]
pub struct CapacityError;

/// Error surfaced while decoding a byte-encoded script into chunks.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum DecodeError {
    /// The byte stream ended before a chunk could be fully read.
    #[error("truncated script: stream ended mid-chunk")]
    Truncated,
}

/// Error surfaced while parsing a script's text form.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ParseError {
    /// A token did not resolve to any known opcode and was not a direct-push length.
    #[error("unknown opcode token: {0}")]
    UnknownOpcode(String),
    /// A direct-push or `OP_PUSHDATA*` token was not followed by a length token.
    #[error("missing length token after push opcode")]
    MissingLength,
    /// A length token was not a valid base-10 integer.
    #[error("length token is not a valid integer: {0}")]
    InvalidLength(String),
    /// A push opcode's length token was not followed by a payload token.
    #[error("missing payload token after length")]
    MissingPayload,
    /// A payload token was missing the required `0x` prefix.
    #[error("payload token missing 0x prefix: {0}")]
    MissingHexPrefix(String),
    /// A payload token's hex digits failed to decode.
    #[error("payload is not valid hex: {0}")]
    InvalidHex(String),
    /// A payload token's decoded length did not match the declared length.
    #[error("payload length does not match declared length")]
    LengthMismatch,
    /// The chunk built from the parsed tokens violated a chunk invariant.
    #[error(transparent)]
    Chunk(#[from] crate::chunk::ChunkError),
    /// Parsing the pure-hex shortcut failed at the byte level.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Error surfaced by the mutator API.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum MutateError {
    /// A payload was too long to be pushed by any push opcode (>= 2^32 bytes).
    #[error("payload too large to push: {0} bytes")]
    PayloadTooLarge(usize),
    /// `append`/`prepend` received an input type it does not support.
    #[error("unsupported input type for append/prepend")]
    InvalidArgument,
}

/// Error surfaced by the builders.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum BuildError {
    /// `from_address` was given an address that is neither P2PKH nor P2SH.
    #[error("address is neither pay-to-public-key-hash nor pay-to-script-hash")]
    UnrecognizedAddress,
    /// A push assembled by a builder violated a chunk invariant (e.g. an oversized redeem script).
    #[error(transparent)]
    Mutate(#[from] MutateError),
}

/// Error surfaced by classification-dependent accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum ClassifyError {
    /// An accessor that requires a specific template was called on a script of another shape.
    #[error("script does not match the required template")]
    PreconditionFailed,
}

/// The unified error type for this crate.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum Error {
    /// See [`DecodeError`].
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// See [`ParseError`].
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// See [`MutateError`].
    #[error(transparent)]
    Mutate(#[from] MutateError),
    /// See [`BuildError`].
    #[error(transparent)]
    Build(#[from] BuildError),
    /// See [`ClassifyError`].
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    /// See [`crate::chunk::ChunkError`].
    #[error(transparent)]
    Chunk(#[from] crate::chunk::ChunkError),
}

/// Convenience alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
