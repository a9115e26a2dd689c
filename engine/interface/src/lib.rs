// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

#![warn(missing_docs)]

//! Native crypto engine interface library
//!
//! Defines the fixed C-style surface a native cryptographic engine exposes to
//! the provider layer: context allocation, streaming init/update/finalize for
//! digests and ciphers, AEAD tag access, one-shot HMAC and a CSPRNG. The
//! provider core is written against [`Engine`] only; concrete engines (the
//! software mock, or bindings to a real native library) live in sibling
//! crates.

mod error;

use std::ptr::NonNull;

pub use error::EngineError;

/// Engine Result
pub type EngineResult<T> = Result<T, EngineError>;

/// Length in bytes of the authentication tag appended by authenticated modes.
pub const AEAD_TAG_LEN: usize = 16;

/// Kind of algorithm, used when querying the engine's supported sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    /// Message digests
    Digest,

    /// Block / stream / AEAD ciphers
    Cipher,

    /// Keyed message authentication codes
    Mac,
}

/// Direction a cipher context is keyed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CipherOp {
    /// Plaintext in, ciphertext out
    Encrypt,

    /// Ciphertext in, plaintext out
    Decrypt,
}

/// An opaque block of engine-owned memory holding in-progress cryptographic
/// state (partial hash state, key schedule, AEAD scratch).
///
/// A `RawContext` is uniquely owned: it is produced by
/// [`Engine::alloc_context`] and consumed exactly once by
/// [`Engine::free_context`]. The type is deliberately neither `Clone` nor
/// `Copy` so double-free is unrepresentable; use-after-free is prevented by
/// `free_context` taking the context by value.
#[derive(Debug, PartialEq, Eq)]
pub struct RawContext {
    ptr: NonNull<u8>,
    size: usize,
}

// The block is exclusively owned by whoever holds the RawContext, so moving
// that ownership to another thread (the cleanup worker) is sound.
unsafe impl Send for RawContext {}

impl RawContext {
    /// Wraps a freshly allocated context block. Engine implementations only.
    pub fn new(ptr: NonNull<u8>, size: usize) -> Self {
        Self { ptr, size }
    }

    /// Base address of the context block.
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Size in bytes of the context block, as reported by
    /// [`Engine::context_size`] at allocation time.
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Native crypto engine trait.
///
/// All calls are synchronous and block the calling thread until the engine
/// returns. A single context must only be driven from one logical stream of
/// operations at a time; concurrent update/finalize calls on the same context
/// are undefined and guarding against them is a caller obligation. Distinct
/// contexts may be used freely from different threads.
pub trait Engine: Send + Sync {
    /// Returns the names of all algorithms of `kind` this engine supports.
    fn list_algorithms(&self, kind: AlgorithmKind) -> Vec<String>;

    /// Returns the context size in bytes required for `algorithm`.
    ///
    /// # Errors
    /// * `EngineError::UnknownAlgorithm` - algorithm absent from the engine's
    ///   own listing
    fn context_size(&self, kind: AlgorithmKind, algorithm: &str) -> EngineResult<usize>;

    /// Reserves a context block of `size` bytes.
    fn alloc_context(&self, size: usize) -> EngineResult<RawContext>;

    /// Returns a context block to the engine's allocator.
    ///
    /// # Safety
    /// `ctx` must have been returned by [`Engine::alloc_context`] on this
    /// engine. Taking the context by value makes a second call
    /// unrepresentable for safe callers.
    unsafe fn free_context(&self, ctx: RawContext);

    /// (Re)initializes digest state for the named algorithm. Idempotent;
    /// called repeatedly to implement digest reset.
    fn md_init(&self, ctx: &RawContext, algorithm: &str) -> EngineResult<()>;

    /// Feeds a slice into the digest context.
    fn md_update(&self, ctx: &RawContext, data: &[u8]) -> EngineResult<()>;

    /// Feeds a single byte into the digest context.
    fn md_update_byte(&self, ctx: &RawContext, byte: u8) -> EngineResult<()>;

    /// Feeds `len` bytes at `data` into the digest context without a
    /// managed-side copy.
    ///
    /// # Safety
    /// `data` must be valid for reads of `len` bytes for the duration of the
    /// call.
    unsafe fn md_update_raw(&self, ctx: &RawContext, data: *const u8, len: usize)
        -> EngineResult<()>;

    /// Writes the digest into `out` and returns the number of bytes written.
    /// The context is left in an engine-defined state; callers re-init before
    /// reuse.
    fn md_final(&self, ctx: &RawContext, out: &mut [u8]) -> EngineResult<usize>;

    /// Digest output length in bytes for an initialized digest context.
    fn md_len(&self, ctx: &RawContext) -> EngineResult<usize>;

    /// Keys a cipher context for the named algorithm and direction.
    fn cipher_init(
        &self,
        ctx: &RawContext,
        algorithm: &str,
        key: &[u8],
        iv: &[u8],
        op: CipherOp,
    ) -> EngineResult<()>;

    /// Feeds input through the cipher, writing any produced bytes to `out`.
    /// Returns the number of bytes written, which may be zero when the engine
    /// buffers internally.
    fn cipher_update(&self, ctx: &RawContext, input: &[u8], out: &mut [u8])
        -> EngineResult<usize>;

    /// Finalizes the cipher stream, writing any remaining bytes to `out`.
    ///
    /// # Errors
    /// * `EngineError::AuthTagMismatch` - AEAD decrypt tag verification
    ///   failed
    fn cipher_final(&self, ctx: &RawContext, out: &mut [u8]) -> EngineResult<usize>;

    /// Block size in bytes the engine reports for `algorithm`. Some engines
    /// report degenerate values (e.g. 1 for stream-style AES modes); the
    /// provider layer compensates.
    fn cipher_block_size(&self, algorithm: &str) -> EngineResult<usize>;

    /// The IV the context was initialized with.
    fn original_iv(&self, ctx: &RawContext) -> EngineResult<Vec<u8>>;

    /// Reads the authentication tag computed by an authenticated encrypt
    /// finalize.
    fn get_tag(&self, ctx: &RawContext) -> EngineResult<[u8; AEAD_TAG_LEN]>;

    /// Sets the expected authentication tag ahead of an authenticated decrypt
    /// finalize.
    fn set_tag(&self, ctx: &RawContext, tag: &[u8]) -> EngineResult<()>;

    /// Upper bound on HMAC output length across supported digests.
    fn mac_max_len(&self) -> usize;

    /// One-shot HMAC over `data` with `key`, writing into `out`. Returns the
    /// number of bytes written.
    fn hmac(
        &self,
        digest_algorithm: &str,
        key: &[u8],
        data: &[u8],
        out: &mut [u8],
    ) -> EngineResult<usize>;

    /// Fills `out` with cryptographically secure random bytes.
    fn rand_bytes(&self, out: &mut [u8]) -> EngineResult<()>;

    /// Mixes caller-supplied seed material into the engine RNG.
    fn rand_seed(&self, seed: &[u8]) -> EngineResult<()>;
}
