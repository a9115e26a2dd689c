// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! Streaming message digest

use ncp_engine_interface::AlgorithmKind;
use ncp_engine_interface::Engine;

use crate::dispatch::StreamDispatcher;
use crate::engine;
use crate::handle::NativeHandle;
use crate::ByteView;
use crate::NcpError;
use crate::NcpResult;

/// A streaming message digest bound to a native context.
///
/// Producing a digest consumes the accumulated input and leaves the instance
/// reset, ready for a fresh message. Dropping the instance hands its context
/// to the cleanup worker; [`Digest::close`] releases it inline.
pub struct Digest {
    handle: NativeHandle,
    engine_name: &'static str,
    digest_len: usize,
}

impl Digest {
    /// Allocates and initializes digest state for an engine-native algorithm
    /// name. Callers normally go through [`crate::Provider::message_digest`],
    /// which resolves public names first.
    pub(crate) fn new(engine_name: &'static str) -> NcpResult<Self> {
        let handle = NativeHandle::allocate(AlgorithmKind::Digest, engine_name)?;
        engine().md_init(handle.ctx(), engine_name)?;
        let digest_len = engine().md_len(handle.ctx())?;
        Ok(Self {
            handle,
            engine_name,
            digest_len,
        })
    }

    /// Digest output length in bytes.
    pub fn digest_len(&self) -> usize {
        self.digest_len
    }

    /// Feeds a single byte.
    pub fn update_byte(&mut self, byte: u8) -> NcpResult<()> {
        StreamDispatcher::new(&self.handle).update_byte(byte)
    }

    /// Feeds a slice. Empty input is a no-op.
    pub fn update(&mut self, data: &[u8]) -> NcpResult<()> {
        StreamDispatcher::new(&self.handle).update(data)
    }

    /// Feeds the visible span of a view and advances its cursor to the limit.
    pub fn update_view(&mut self, view: &mut ByteView<'_>) -> NcpResult<()> {
        StreamDispatcher::new(&self.handle).update_view(view)
    }

    /// Produces the digest of everything fed so far and resets.
    pub fn digest(&mut self) -> NcpResult<Vec<u8>> {
        let mut out = vec![0u8; self.digest_len];
        self.digest_into(&mut out)?;
        Ok(out)
    }

    /// Writes the digest into `out`, returning the number of bytes written,
    /// and resets.
    pub fn digest_into(&mut self, out: &mut [u8]) -> NcpResult<usize> {
        if out.len() < self.digest_len {
            return Err(NcpError::InsufficientBuffer {
                needed: self.digest_len,
                provided: out.len(),
            });
        }
        let written = StreamDispatcher::new(&self.handle).finalize_into(out)?;
        self.reset()?;
        Ok(written)
    }

    /// Discards accumulated input.
    pub fn reset(&mut self) -> NcpResult<()> {
        engine().md_init(self.handle.ctx(), self.engine_name)?;
        Ok(())
    }

    /// Releases the native context now, on this thread.
    pub fn close(self) {
        let Self { handle, .. } = self;
        handle.release();
    }
}
