// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! Provider entry point

use ncp_engine_interface::AlgorithmKind;
use ncp_engine_interface::Engine;

use crate::engine;
use crate::registry;
use crate::registry::AlgorithmEntry;
use crate::registry::AlgorithmRegistry;
use crate::Cipher;
use crate::Digest;
use crate::Hmac;
use crate::NcpError;
use crate::NcpResult;
use crate::SecureRandom;

/// Entry point for constructing primitives by public algorithm name.
///
/// Cheap to construct; all instances share the process-wide registry and
/// engine.
#[derive(Clone, Copy)]
pub struct Provider {
    registry: &'static AlgorithmRegistry,
}

impl Provider {
    /// Binds to the process-wide registry, building it on first use.
    ///
    /// # Errors
    /// * `NcpError::RegistryConflict` - the engine's digest and cipher name
    ///   sets produced overlapping public names
    pub fn new() -> NcpResult<Self> {
        Ok(Self {
            registry: registry::shared()?,
        })
    }

    /// A fresh streaming digest for a public digest name or alias.
    pub fn message_digest(&self, name: &str) -> NcpResult<Digest> {
        let engine_name = self
            .registry
            .resolve_digest(name)
            .ok_or_else(|| NcpError::UnsupportedAlgorithm(name.to_string()))?;
        Digest::new(engine_name)
    }

    /// A fresh cipher for a public cipher name or alias. Returned unkeyed;
    /// call [`Cipher::init`] before use.
    pub fn cipher(&self, name: &str) -> NcpResult<Cipher> {
        let engine_name = self
            .registry
            .resolve_cipher(name)
            .ok_or_else(|| NcpError::UnsupportedAlgorithm(name.to_string()))?;
        Cipher::new(engine_name)
    }

    /// A fresh HMAC over the digest named by a public digest name or alias.
    /// Returned unkeyed; call [`Hmac::init`] before use.
    pub fn hmac(&self, digest_name: &str) -> NcpResult<Hmac> {
        let engine_name = self
            .registry
            .resolve_digest(digest_name)
            .ok_or_else(|| NcpError::UnsupportedAlgorithm(digest_name.to_string()))?;
        // The digest may hash yet not be a supported MAC base.
        let mac_bases = engine().list_algorithms(AlgorithmKind::Mac);
        if !mac_bases.iter().any(|base| base == engine_name) {
            return Err(NcpError::UnsupportedAlgorithm(digest_name.to_string()));
        }
        Ok(Hmac::new(engine_name))
    }

    /// The engine-backed random source.
    pub fn secure_random(&self) -> SecureRandom {
        SecureRandom::default()
    }

    /// Every public name this provider resolves, with what it points at.
    pub fn name_table(&self) -> Vec<(String, AlgorithmEntry)> {
        self.registry.name_table()
    }
}
