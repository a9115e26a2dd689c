// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! Native crypto engine interface library - Error module

use thiserror::Error;

/// Engine Error
#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// Algorithm not present in the engine's own listing
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Context size is zero or does not match what the engine requires
    #[error("invalid context size: {0}")]
    InvalidContextSize(usize),

    /// Native context allocation failed
    #[error("context allocation failed")]
    AllocationFailed,

    /// Context has not been initialized for the requested operation
    #[error("context not initialized for this operation")]
    InvalidContext,

    /// Key length not valid for the selected algorithm
    #[error("invalid key length: {0}")]
    InvalidKeyLength(usize),

    /// IV length not valid for the selected algorithm
    #[error("invalid iv length: {0}")]
    InvalidIvLength(usize),

    /// Authentication tag length not valid
    #[error("invalid tag length: {0}")]
    InvalidTagLength(usize),

    /// Caller-supplied output buffer too small for the engine to write into
    #[error("output buffer too small")]
    BufferTooSmall,

    /// AEAD tag verification failed during finalize
    #[error("authentication tag mismatch")]
    AuthTagMismatch,

    /// Operation only valid for authenticated modes
    #[error("operation requires an authenticated mode")]
    NotAead,

    /// Random generator failure
    #[error("random generator failure")]
    RandomFailure,
}
