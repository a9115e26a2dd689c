// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! Update routing for streaming digests
//!
//! Picks the cheapest engine entry point for each input shape: raw-backed
//! views go to the engine without a copy, slice-backed views feed the visible
//! subrange directly, opaque views are staged through a scratch buffer. In
//! every case the view's cursor advances to its limit afterwards.

use ncp_engine_interface::Engine;

use crate::engine;
use crate::handle::NativeHandle;
use crate::view::Backing;
use crate::ByteView;
use crate::NcpResult;

pub(crate) struct StreamDispatcher<'h> {
    handle: &'h NativeHandle,
}

impl<'h> StreamDispatcher<'h> {
    pub(crate) fn new(handle: &'h NativeHandle) -> Self {
        Self { handle }
    }

    pub(crate) fn update_byte(&self, byte: u8) -> NcpResult<()> {
        engine().md_update_byte(self.handle.ctx(), byte)?;
        Ok(())
    }

    pub(crate) fn update(&self, data: &[u8]) -> NcpResult<()> {
        if data.is_empty() {
            return Ok(());
        }
        engine().md_update(self.handle.ctx(), data)?;
        Ok(())
    }

    pub(crate) fn update_view(&self, view: &mut ByteView<'_>) -> NcpResult<()> {
        let remaining = view.remaining();
        if remaining == 0 {
            return Ok(());
        }
        let start = view.position();
        match view.backing() {
            Backing::Direct { ptr, .. } => {
                // In-bounds by the view's position/limit invariants.
                unsafe {
                    engine().md_update_raw(self.handle.ctx(), ptr.add(start), remaining)?;
                }
                view.advance_to_limit();
            }
            Backing::Array(data) => {
                engine().md_update(self.handle.ctx(), &data[start..start + remaining])?;
                view.advance_to_limit();
            }
            Backing::Opaque(_) => {
                let scratch = view.take_remaining();
                engine().md_update(self.handle.ctx(), &scratch)?;
            }
        }
        Ok(())
    }

    pub(crate) fn finalize_into(&self, out: &mut [u8]) -> NcpResult<usize> {
        Ok(engine().md_final(self.handle.ctx(), out)?)
    }
}
