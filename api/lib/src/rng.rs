// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! Engine-backed CSPRNG

use ncp_engine_interface::Engine;

use crate::engine;
use crate::NcpResult;

/// Cryptographically secure random source delegating to the engine RNG.
#[derive(Default, Debug)]
pub struct SecureRandom {}

impl SecureRandom {
    /// Fills `out` with random bytes. Empty buffers are a no-op.
    pub fn next_bytes(&self, out: &mut [u8]) -> NcpResult<()> {
        if out.is_empty() {
            return Ok(());
        }
        Ok(engine().rand_bytes(out)?)
    }

    /// Mixes caller entropy into the engine RNG.
    pub fn set_seed(&self, seed: &[u8]) -> NcpResult<()> {
        Ok(engine().rand_seed(seed)?)
    }

    /// Draws `len` fresh random bytes as seed material.
    pub fn generate_seed(&self, len: usize) -> NcpResult<Vec<u8>> {
        let mut seed = vec![0u8; len];
        self.next_bytes(&mut seed)?;
        Ok(seed)
    }
}
