// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! Provider error type

use ncp_engine_interface::EngineError;

/// Errors surfaced by the provider API.
///
/// Double-free and use-after-free of native contexts have no variants here:
/// context ownership is moved into release, so those states are
/// unrepresentable rather than detected.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum NcpError {
    /// The requested algorithm name resolves to nothing in the registry.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The engine could not produce a usable context for the algorithm.
    #[error("native context allocation failed")]
    ContextAllocation,

    /// The caller-supplied output buffer cannot hold the result.
    #[error("output buffer too small: needed {needed} bytes, got {provided}")]
    InsufficientBuffer {
        /// Bytes the operation required.
        needed: usize,
        /// Bytes the caller provided.
        provided: usize,
    },

    /// AEAD tag verification failed, or the ciphertext was too short to carry
    /// a tag at all.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The digest and cipher name tables overlap; the registry refuses to
    /// build because lookup would be ambiguous.
    #[error("algorithm registry conflict: {0}")]
    RegistryConflict(String),

    /// The cipher key has a length the algorithm does not accept.
    #[error("invalid key")]
    InvalidKey,

    /// The IV has a length the algorithm does not accept.
    #[error("invalid IV")]
    InvalidIv,

    /// A cipher operation was attempted before `init`.
    #[error("cipher not initialized")]
    CipherNotInitialized,

    /// A MAC finalize was attempted before a key was set.
    #[error("MAC key not set")]
    MacKeyNotSet,

    /// The engine reported a failure the provider does not translate.
    #[error("engine failure: {0}")]
    Engine(#[from] EngineError),
}
