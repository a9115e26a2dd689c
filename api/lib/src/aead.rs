// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! AEAD tag framing
//!
//! Authenticated modes carry their 16-byte tag inline in the ciphertext: seal
//! appends it after the final ciphertext bytes, open splits it off the input
//! tail and hands it to the engine for verification before finalizing. The
//! [`crate::Cipher`] finalize path routes through here for authenticated
//! algorithms.

use ncp_engine_interface::Engine;
use ncp_engine_interface::EngineError;
use ncp_engine_interface::AEAD_TAG_LEN;

use crate::cipher::Cipher;
use crate::engine;
use crate::NcpError;
use crate::NcpResult;

pub(crate) struct AeadFramer;

impl AeadFramer {
    /// Encrypts `input`, finalizes, and appends the tag. Returns ciphertext
    /// length including the tag.
    pub(crate) fn seal(cipher: &mut Cipher, input: &[u8], out: &mut [u8]) -> NcpResult<usize> {
        let mut written = cipher.update(input, out)?;
        written += engine().cipher_final(cipher.handle.ctx(), &mut out[written..])?;
        let tag = engine().get_tag(cipher.handle.ctx())?;
        if out.len() < written + AEAD_TAG_LEN {
            return Err(NcpError::InsufficientBuffer {
                needed: written + AEAD_TAG_LEN,
                provided: out.len(),
            });
        }
        out[written..written + AEAD_TAG_LEN].copy_from_slice(&tag);
        Ok(written + AEAD_TAG_LEN)
    }

    /// Splits the tag off the input tail, decrypts the body, and verifies at
    /// finalize. Returns plaintext length.
    pub(crate) fn open(cipher: &mut Cipher, input: &[u8], out: &mut [u8]) -> NcpResult<usize> {
        if input.len() < AEAD_TAG_LEN {
            // Too short to even carry a tag; indistinguishable from a forged
            // message.
            return Err(NcpError::AuthenticationFailed);
        }
        let (body, tag) = input.split_at(input.len() - AEAD_TAG_LEN);
        engine().set_tag(cipher.handle.ctx(), tag)?;
        let mut written = cipher.update(body, out)?;
        written += engine()
            .cipher_final(cipher.handle.ctx(), &mut out[written..])
            .map_err(|err| match err {
                EngineError::AuthTagMismatch => NcpError::AuthenticationFailed,
                other => NcpError::Engine(other),
            })?;
        Ok(written)
    }
}
