// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! Streaming cipher

use ncp_engine_interface::AlgorithmKind;
use ncp_engine_interface::CipherOp;
use ncp_engine_interface::Engine;
use ncp_engine_interface::EngineError;
use ncp_engine_interface::AEAD_TAG_LEN;

use crate::aead::AeadFramer;
use crate::engine;
use crate::handle::NativeHandle;
use crate::NcpError;
use crate::NcpResult;

/// Families whose public block size differs from what the engine reports.
/// The engine reports 1 for stream-style AES modes; callers sizing buffers
/// expect the AES block.
const BLOCK_SIZE_OVERRIDES: &[(&str, usize)] = &[("AES", 16)];

fn forced_block_size(engine_name: &str) -> Option<usize> {
    let upper = engine_name.to_ascii_uppercase();
    BLOCK_SIZE_OVERRIDES
        .iter()
        .find(|(family, _)| upper.contains(family))
        .map(|(_, size)| *size)
}

/// A streaming cipher bound to a native context.
///
/// Keyed with [`Cipher::init`]; before that, every data operation fails with
/// [`NcpError::CipherNotInitialized`]. For authenticated algorithms
/// [`Cipher::do_final`] speaks the inline-tag framing protocol: the tag is
/// appended to the ciphertext on encrypt and split off the input tail on
/// decrypt. A finished authenticated stream must be re-keyed with `init`
/// before further use.
pub struct Cipher {
    pub(crate) handle: NativeHandle,
    engine_name: &'static str,
    op: Option<CipherOp>,
    block_size: Option<usize>,
}

impl Cipher {
    /// Allocates a context for an engine-native algorithm name. Callers
    /// normally go through [`crate::Provider::cipher`], which resolves public
    /// names first.
    pub(crate) fn new(engine_name: &'static str) -> NcpResult<Self> {
        let handle = NativeHandle::allocate(AlgorithmKind::Cipher, engine_name)?;
        Ok(Self {
            handle,
            engine_name,
            op: None,
            block_size: None,
        })
    }

    /// Keys the cipher for `op` with `key` and `iv`. May be called again to
    /// re-key for a new message.
    pub fn init(&mut self, op: CipherOp, key: &[u8], iv: &[u8]) -> NcpResult<()> {
        engine()
            .cipher_init(self.handle.ctx(), self.engine_name, key, iv, op)
            .map_err(|err| match err {
                EngineError::InvalidKeyLength(_) => NcpError::InvalidKey,
                EngineError::InvalidIvLength(_) => NcpError::InvalidIv,
                other => NcpError::Engine(other),
            })?;
        self.op = Some(op);
        self.block_size = None;
        Ok(())
    }

    /// Whether the algorithm authenticates its output.
    pub fn is_authenticated(&self) -> bool {
        self.engine_name.to_ascii_lowercase().contains("gcm")
    }

    /// Public block size in bytes. Families in the override table get their
    /// real block size regardless of the engine-reported value.
    pub fn block_size(&mut self) -> NcpResult<usize> {
        if let Some(size) = self.block_size {
            return Ok(size);
        }
        let size = match forced_block_size(self.engine_name) {
            Some(size) => size,
            None => engine().cipher_block_size(self.engine_name)?,
        };
        self.block_size = Some(size);
        Ok(size)
    }

    /// Upper bound on the output of a `do_final` over `input_len` bytes:
    /// the length rounded up to a block multiple, plus the tag on
    /// authenticated encrypt.
    pub fn output_size(&mut self, input_len: usize) -> NcpResult<usize> {
        let block = self.block_size()?;
        let mut size = input_len.div_ceil(block) * block;
        if self.is_authenticated() && self.op == Some(CipherOp::Encrypt) {
            size += AEAD_TAG_LEN;
        }
        Ok(size)
    }

    /// Feeds input through the cipher, returning the number of bytes written
    /// to `out`. Authenticated modes may buffer and return 0 until finalize.
    pub fn update(&mut self, input: &[u8], out: &mut [u8]) -> NcpResult<usize> {
        self.ensure_initialized()?;
        if input.is_empty() {
            return Ok(0);
        }
        engine()
            .cipher_update(self.handle.ctx(), input, out)
            .map_err(|err| match err {
                EngineError::BufferTooSmall => NcpError::InsufficientBuffer {
                    needed: input.len(),
                    provided: out.len(),
                },
                other => NcpError::Engine(other),
            })
    }

    /// Like [`Cipher::update`] but returns an owned, right-sized vector.
    pub fn update_vec(&mut self, input: &[u8]) -> NcpResult<Vec<u8>> {
        self.ensure_initialized()?;
        let mut out = vec![0u8; self.output_size(input.len())?];
        let written = self.update(input, &mut out)?;
        out.truncate(written);
        Ok(out)
    }

    /// Processes the final chunk of the stream and finalizes, returning the
    /// number of bytes written to `out` (tag included on authenticated
    /// encrypt).
    ///
    /// # Errors
    /// * `NcpError::InsufficientBuffer` - `out` is smaller than
    ///   [`Cipher::output_size`] of the input length
    pub fn do_final(&mut self, input: &[u8], out: &mut [u8]) -> NcpResult<usize> {
        self.ensure_initialized()?;
        let needed = self.output_size(input.len())?;
        if out.len() < needed {
            return Err(NcpError::InsufficientBuffer {
                needed,
                provided: out.len(),
            });
        }
        if self.is_authenticated() {
            match self.op {
                Some(CipherOp::Encrypt) => AeadFramer::seal(self, input, out),
                Some(CipherOp::Decrypt) => AeadFramer::open(self, input, out),
                None => Err(NcpError::CipherNotInitialized),
            }
        } else {
            let mut written = self.update(input, out)?;
            written += engine().cipher_final(self.handle.ctx(), &mut out[written..])?;
            Ok(written)
        }
    }

    /// Like [`Cipher::do_final`] but returns an owned, right-sized vector.
    pub fn do_final_vec(&mut self, input: &[u8]) -> NcpResult<Vec<u8>> {
        self.ensure_initialized()?;
        let mut out = vec![0u8; self.output_size(input.len())?];
        let written = self.do_final(input, &mut out)?;
        out.truncate(written);
        Ok(out)
    }

    /// The IV this cipher was keyed with.
    pub fn iv(&self) -> NcpResult<Vec<u8>> {
        self.ensure_initialized()?;
        Ok(engine().original_iv(self.handle.ctx())?)
    }

    /// Releases the native context now, on this thread.
    pub fn close(self) {
        let Self { handle, .. } = self;
        handle.release();
    }

    fn ensure_initialized(&self) -> NcpResult<()> {
        if self.op.is_none() {
            return Err(NcpError::CipherNotInitialized);
        }
        Ok(())
    }
}
