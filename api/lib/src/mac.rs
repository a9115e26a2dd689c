// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! Keyed message authentication

use ncp_engine_interface::Engine;

use crate::engine;
use crate::ByteView;
use crate::NcpError;
use crate::NcpResult;

/// HMAC over an engine-supported digest.
///
/// Input is buffered managed-side and the MAC is computed one-shot through
/// the engine at [`Hmac::do_final`], which also resets the buffer for the
/// next message. No native context is held, so there is nothing to close.
pub struct Hmac {
    digest_name: &'static str,
    key: Option<zeroize::Zeroizing<Vec<u8>>>,
    buffer: Vec<u8>,
}

impl Hmac {
    pub(crate) fn new(digest_name: &'static str) -> Self {
        Self {
            digest_name,
            key: None,
            buffer: Vec::new(),
        }
    }

    /// Sets (or replaces) the key and discards any buffered input.
    pub fn init(&mut self, key: &[u8]) {
        self.key = Some(zeroize::Zeroizing::new(key.to_vec()));
        self.buffer.clear();
    }

    /// Feeds a single byte.
    pub fn update_byte(&mut self, byte: u8) {
        self.buffer.push(byte);
    }

    /// Feeds a slice.
    pub fn update(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Feeds the visible span of a view and advances its cursor to the limit.
    pub fn update_view(&mut self, view: &mut ByteView<'_>) {
        let chunk = view.take_remaining();
        self.buffer.extend_from_slice(&chunk);
    }

    /// Upper bound on MAC output length in bytes.
    pub fn mac_len(&self) -> usize {
        engine().mac_max_len()
    }

    /// Computes the MAC over everything fed since the last reset and resets
    /// the buffer.
    pub fn do_final(&mut self) -> NcpResult<Vec<u8>> {
        let key = self.key.as_ref().ok_or(NcpError::MacKeyNotSet)?;
        let mut out = vec![0u8; engine().mac_max_len()];
        let written = engine().hmac(self.digest_name, key, &self.buffer, &mut out)?;
        out.truncate(written);
        self.buffer.clear();
        Ok(out)
    }

    /// Discards buffered input, keeping the key.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}
