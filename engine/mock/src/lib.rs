// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! Mock implementation of the native crypto engine interface.
//!
//! A pure-software engine for tests and development. Contexts are raw heap
//! blocks holding a [`ContextSlot`], handed out and reclaimed through the
//! same alloc/free protocol a real native engine would use, so the provider
//! layer's ownership and reclamation machinery is exercised for real.

mod cipher;
mod digest;

use std::mem;
use std::ptr::NonNull;

use hmac::Mac;
use ncp_engine_interface::AlgorithmKind;
use ncp_engine_interface::CipherOp;
use ncp_engine_interface::Engine;
use ncp_engine_interface::EngineError;
use ncp_engine_interface::EngineResult;
use ncp_engine_interface::RawContext;
use ncp_engine_interface::AEAD_TAG_LEN;
use parking_lot::Mutex;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::cipher::CipherState;
use crate::cipher::CIPHER_ALGORITHMS;
use crate::digest::DigestState;
use crate::digest::DIGEST_ALGORITHMS;

/// Digest algorithms the mock HMAC entry point accepts as a base.
const MAC_ALGORITHMS: &[&str] = &["MD5", "SHA1", "SHA224", "SHA256", "SHA384", "SHA512"];

/// Upper bound on HMAC output across the supported bases (SHA-512).
const MAC_MAX_LEN: usize = 64;

/// What lives inside a mock context block.
enum SlotState {
    Empty,
    Digest(DigestState),
    Cipher(CipherState),
}

/// The mock engine's context layout. Real engines hold opaque C state here;
/// the mock holds a tagged Rust enum of the same shape, behind a lock so
/// state access never aliases.
struct ContextSlot {
    state: Mutex<SlotState>,
}

/// Software mock of the native crypto engine.
#[derive(Default, Debug)]
pub struct MockEngine {}

/// Reborrows a context block as its slot.
///
/// The block stays alive until `free_context`, which consumes the
/// `RawContext` by value, so the shared reborrow is valid for the duration
/// of any engine call. Mutation goes through the slot's lock.
fn slot<'a>(ctx: &'a RawContext) -> &'a ContextSlot {
    unsafe { &*(ctx.as_ptr() as *const ContextSlot) }
}

impl Engine for MockEngine {
    fn list_algorithms(&self, kind: AlgorithmKind) -> Vec<String> {
        let names: &[&str] = match kind {
            AlgorithmKind::Digest => DIGEST_ALGORITHMS,
            AlgorithmKind::Cipher => CIPHER_ALGORITHMS,
            AlgorithmKind::Mac => MAC_ALGORITHMS,
        };
        names.iter().map(|name| name.to_string()).collect()
    }

    fn context_size(&self, kind: AlgorithmKind, algorithm: &str) -> EngineResult<usize> {
        let known = match kind {
            AlgorithmKind::Digest => DIGEST_ALGORITHMS.contains(&algorithm),
            AlgorithmKind::Cipher => CIPHER_ALGORITHMS.contains(&algorithm),
            AlgorithmKind::Mac => MAC_ALGORITHMS.contains(&algorithm),
        };
        if !known {
            return Err(EngineError::UnknownAlgorithm(algorithm.to_string()));
        }
        Ok(mem::size_of::<ContextSlot>())
    }

    fn alloc_context(&self, size: usize) -> EngineResult<RawContext> {
        if size != mem::size_of::<ContextSlot>() {
            return Err(EngineError::InvalidContextSize(size));
        }
        let block = Box::new(ContextSlot {
            state: Mutex::new(SlotState::Empty),
        });
        let ptr = NonNull::new(Box::into_raw(block) as *mut u8)
            .ok_or(EngineError::AllocationFailed)?;
        tracing::trace!(size, "allocated mock context");
        Ok(RawContext::new(ptr, size))
    }

    unsafe fn free_context(&self, ctx: RawContext) {
        tracing::trace!("freeing mock context");
        drop(unsafe { Box::from_raw(ctx.as_ptr() as *mut ContextSlot) });
    }

    fn md_init(&self, ctx: &RawContext, algorithm: &str) -> EngineResult<()> {
        *slot(ctx).state.lock() = SlotState::Digest(DigestState::new(algorithm)?);
        Ok(())
    }

    fn md_update(&self, ctx: &RawContext, data: &[u8]) -> EngineResult<()> {
        match &mut *slot(ctx).state.lock() {
            SlotState::Digest(state) => {
                state.update(data);
                Ok(())
            }
            _ => Err(EngineError::InvalidContext),
        }
    }

    fn md_update_byte(&self, ctx: &RawContext, byte: u8) -> EngineResult<()> {
        self.md_update(ctx, &[byte])
    }

    unsafe fn md_update_raw(
        &self,
        ctx: &RawContext,
        data: *const u8,
        len: usize,
    ) -> EngineResult<()> {
        let bytes = unsafe { std::slice::from_raw_parts(data, len) };
        self.md_update(ctx, bytes)
    }

    fn md_final(&self, ctx: &RawContext, out: &mut [u8]) -> EngineResult<usize> {
        match &mut *slot(ctx).state.lock() {
            SlotState::Digest(state) => state.finalize_into(out),
            _ => Err(EngineError::InvalidContext),
        }
    }

    fn md_len(&self, ctx: &RawContext) -> EngineResult<usize> {
        match &*slot(ctx).state.lock() {
            SlotState::Digest(state) => Ok(state.output_size()),
            _ => Err(EngineError::InvalidContext),
        }
    }

    fn cipher_init(
        &self,
        ctx: &RawContext,
        algorithm: &str,
        key: &[u8],
        iv: &[u8],
        op: CipherOp,
    ) -> EngineResult<()> {
        *slot(ctx).state.lock() = SlotState::Cipher(CipherState::new(algorithm, key, iv, op)?);
        Ok(())
    }

    fn cipher_update(
        &self,
        ctx: &RawContext,
        input: &[u8],
        out: &mut [u8],
    ) -> EngineResult<usize> {
        match &mut *slot(ctx).state.lock() {
            SlotState::Cipher(state) => state.update(input, out),
            _ => Err(EngineError::InvalidContext),
        }
    }

    fn cipher_final(&self, ctx: &RawContext, out: &mut [u8]) -> EngineResult<usize> {
        match &mut *slot(ctx).state.lock() {
            SlotState::Cipher(state) => state.finalize(out),
            _ => Err(EngineError::InvalidContext),
        }
    }

    fn cipher_block_size(&self, algorithm: &str) -> EngineResult<usize> {
        if !CIPHER_ALGORITHMS.contains(&algorithm) {
            return Err(EngineError::UnknownAlgorithm(algorithm.to_string()));
        }
        // Stream-style AES modes: the engine reports its true (degenerate)
        // per-call granularity, exactly like OpenSSL does. Compensating is
        // the provider layer's job.
        Ok(1)
    }

    fn original_iv(&self, ctx: &RawContext) -> EngineResult<Vec<u8>> {
        match &*slot(ctx).state.lock() {
            SlotState::Cipher(state) => Ok(state.iv().to_vec()),
            _ => Err(EngineError::InvalidContext),
        }
    }

    fn get_tag(&self, ctx: &RawContext) -> EngineResult<[u8; AEAD_TAG_LEN]> {
        match &*slot(ctx).state.lock() {
            SlotState::Cipher(state) => state.tag(),
            _ => Err(EngineError::InvalidContext),
        }
    }

    fn set_tag(&self, ctx: &RawContext, tag: &[u8]) -> EngineResult<()> {
        match &mut *slot(ctx).state.lock() {
            SlotState::Cipher(state) => state.set_expected_tag(tag),
            _ => Err(EngineError::InvalidContext),
        }
    }

    fn mac_max_len(&self) -> usize {
        MAC_MAX_LEN
    }

    fn hmac(
        &self,
        digest_algorithm: &str,
        key: &[u8],
        data: &[u8],
        out: &mut [u8],
    ) -> EngineResult<usize> {
        macro_rules! mac_with {
            ($digest:ty) => {{
                let mut mac = <hmac::Hmac<$digest>>::new_from_slice(key)
                    .map_err(|_| EngineError::InvalidKeyLength(key.len()))?;
                mac.update(data);
                let bytes = mac.finalize().into_bytes();
                if out.len() < bytes.len() {
                    return Err(EngineError::BufferTooSmall);
                }
                out[..bytes.len()].copy_from_slice(&bytes);
                bytes.len()
            }};
        }

        Ok(match digest_algorithm {
            "MD5" => mac_with!(md5::Md5),
            "SHA1" => mac_with!(sha1::Sha1),
            "SHA224" => mac_with!(sha2::Sha224),
            "SHA256" => mac_with!(sha2::Sha256),
            "SHA384" => mac_with!(sha2::Sha384),
            "SHA512" => mac_with!(sha2::Sha512),
            other => return Err(EngineError::UnknownAlgorithm(other.to_string())),
        })
    }

    fn rand_bytes(&self, out: &mut [u8]) -> EngineResult<()> {
        OsRng
            .try_fill_bytes(out)
            .map_err(|_| EngineError::RandomFailure)
    }

    fn rand_seed(&self, seed: &[u8]) -> EngineResult<()> {
        // The OS RNG backing the mock does not take caller entropy.
        tracing::trace!(len = seed.len(), "seed material accepted and discarded");
        Ok(())
    }
}
