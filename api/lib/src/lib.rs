// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

#![warn(missing_docs)]

//! NCP provider API library
//!
//! Managed streaming primitives (digests, ciphers, HMAC, CSPRNG) layered over
//! a native crypto engine's fixed C-style surface. The provider owns every
//! native context it allocates: contexts are released deterministically via
//! `close`, and a background cleanup worker reclaims whatever is merely
//! dropped.
//!
//! Entry point is [`Provider`], which resolves public algorithm names through
//! the [`registry`] and hands out primitive instances bound to engine
//! contexts.

mod aead;
mod cipher;
mod digest;
mod dispatch;
mod error;
mod handle;
mod mac;
mod provider;
pub mod registry;
mod reaper;
mod rng;
mod view;

#[cfg(test)]
mod tests;

pub use cipher::Cipher;
pub use digest::Digest;
pub use error::NcpError;
pub use mac::Hmac;
pub use ncp_engine_interface::AlgorithmKind;
pub use ncp_engine_interface::CipherOp;
pub use ncp_engine_interface::AEAD_TAG_LEN;
pub use provider::Provider;
pub use registry::AlgorithmEntry;
pub use rng::SecureRandom;
pub use view::ByteView;
pub use view::OpaqueBytes;

/// Provider Result
pub type NcpResult<T> = Result<T, NcpError>;

#[cfg(feature = "mock-engine")]
type NativeEngine = ncp_engine_mock::MockEngine;

#[cfg(not(feature = "mock-engine"))]
compile_error!("an engine feature must be enabled (enable `mock-engine`)");

lazy_static::lazy_static! {
    static ref ENGINE: NativeEngine = NativeEngine::default();
}

/// The process-wide engine instance every primitive talks to.
pub(crate) fn engine() -> &'static NativeEngine {
    &ENGINE
}
