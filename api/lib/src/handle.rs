// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! Owned native context handle

use ncp_engine_interface::AlgorithmKind;
use ncp_engine_interface::Engine;
use ncp_engine_interface::EngineError;
use ncp_engine_interface::RawContext;

use crate::engine;
use crate::reaper;
use crate::NcpError;
use crate::NcpResult;

/// Exclusive owner of one engine context.
///
/// The context is freed exactly once, along one of two paths: the explicit
/// [`NativeHandle::release`] call a primitive's `close` forwards to, or the
/// `Drop` impl, which hands the context to the cleanup worker. `release`
/// consumes the handle, so the drop path sees `None` and does nothing.
pub(crate) struct NativeHandle {
    ctx: Option<RawContext>,
}

impl NativeHandle {
    /// Sizes and allocates a context for the named engine algorithm.
    pub(crate) fn allocate(kind: AlgorithmKind, algorithm: &str) -> NcpResult<Self> {
        let size = engine()
            .context_size(kind, algorithm)
            .map_err(|err| match err {
                EngineError::UnknownAlgorithm(name) => NcpError::UnsupportedAlgorithm(name),
                other => NcpError::Engine(other),
            })?;
        if size == 0 {
            return Err(NcpError::ContextAllocation);
        }
        let ctx = engine()
            .alloc_context(size)
            .map_err(|_| NcpError::ContextAllocation)?;
        tracing::trace!(algorithm, size, "allocated native context");
        Ok(Self { ctx: Some(ctx) })
    }

    /// The live context. Infallible by construction: `ctx` is only `None`
    /// after `release`, which consumed the handle.
    pub(crate) fn ctx(&self) -> &RawContext {
        match &self.ctx {
            Some(ctx) => ctx,
            None => unreachable!("context already released"),
        }
    }

    /// Frees the context now, on the calling thread.
    pub(crate) fn release(mut self) {
        if let Some(ctx) = self.ctx.take() {
            unsafe { engine().free_context(ctx) };
        }
    }
}

impl Drop for NativeHandle {
    fn drop(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            reaper::enqueue(Box::new(move || unsafe {
                engine().free_context(ctx);
            }));
        }
    }
}
