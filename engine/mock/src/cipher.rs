// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! Mock Engine - Cipher state module
//!
//! CTR modes stream: every update produces output immediately. GCM modes
//! buffer the whole message and seal/open at finalize with a detached 16-byte
//! tag, which reproduces the tag protocol the provider layer has to drive
//! (get-tag after encrypt finalize, set-tag before decrypt finalize).

use aes::Aes128;
use aes::Aes192;
use aes::Aes256;
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::consts::U16;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::AeadCore;
use aes_gcm::aead::AeadInPlace;
use aes_gcm::Aes128Gcm;
use aes_gcm::Aes256Gcm;
use aes_gcm::AesGcm;
use aes_gcm::KeyInit;
use cipher::KeyIvInit;
use cipher::StreamCipher;
use ctr::Ctr128BE;
use ncp_engine_interface::CipherOp;
use ncp_engine_interface::EngineError;
use ncp_engine_interface::EngineResult;
use ncp_engine_interface::AEAD_TAG_LEN;
use zeroize::Zeroizing;

type Aes192Gcm = AesGcm<Aes192, U12>;

/// Cipher algorithms the mock engine reports as supported.
pub(crate) const CIPHER_ALGORITHMS: &[&str] = &[
    "AES-128-CTR",
    "AES-192-CTR",
    "AES-256-CTR",
    "AES-128-GCM",
    "AES-192-GCM",
    "AES-256-GCM",
];

const GCM_IV_LEN: usize = 12;
const CTR_IV_LEN: usize = 16;

/// Keyed cipher state stored inside a mock context slot.
pub(crate) struct CipherState {
    op: CipherOp,
    iv: Vec<u8>,
    kind: CipherKind,
}

enum CipherKind {
    Ctr(Box<dyn StreamCipher + Send>),
    Gcm(GcmState),
}

struct GcmState {
    key: Zeroizing<Vec<u8>>,
    buffer: Vec<u8>,
    tag: Option<[u8; AEAD_TAG_LEN]>,
    expected_tag: Option<[u8; AEAD_TAG_LEN]>,
}

fn key_len(algorithm: &str) -> EngineResult<usize> {
    if algorithm.contains("-128-") {
        Ok(16)
    } else if algorithm.contains("-192-") {
        Ok(24)
    } else if algorithm.contains("-256-") {
        Ok(32)
    } else {
        Err(EngineError::UnknownAlgorithm(algorithm.to_string()))
    }
}

impl CipherState {
    pub(crate) fn new(
        algorithm: &str,
        key: &[u8],
        iv: &[u8],
        op: CipherOp,
    ) -> EngineResult<Self> {
        if !CIPHER_ALGORITHMS.contains(&algorithm) {
            return Err(EngineError::UnknownAlgorithm(algorithm.to_string()));
        }
        if key.len() != key_len(algorithm)? {
            return Err(EngineError::InvalidKeyLength(key.len()));
        }

        let kind = if algorithm.ends_with("CTR") {
            if iv.len() != CTR_IV_LEN {
                return Err(EngineError::InvalidIvLength(iv.len()));
            }
            let stream: Box<dyn StreamCipher + Send> = match key.len() {
                16 => Box::new(
                    Ctr128BE::<Aes128>::new_from_slices(key, iv)
                        .map_err(|_| EngineError::InvalidKeyLength(key.len()))?,
                ),
                24 => Box::new(
                    Ctr128BE::<Aes192>::new_from_slices(key, iv)
                        .map_err(|_| EngineError::InvalidKeyLength(key.len()))?,
                ),
                _ => Box::new(
                    Ctr128BE::<Aes256>::new_from_slices(key, iv)
                        .map_err(|_| EngineError::InvalidKeyLength(key.len()))?,
                ),
            };
            CipherKind::Ctr(stream)
        } else {
            if iv.len() != GCM_IV_LEN {
                return Err(EngineError::InvalidIvLength(iv.len()));
            }
            CipherKind::Gcm(GcmState {
                key: Zeroizing::new(key.to_vec()),
                buffer: Vec::new(),
                tag: None,
                expected_tag: None,
            })
        };

        Ok(Self {
            op,
            iv: iv.to_vec(),
            kind,
        })
    }

    pub(crate) fn iv(&self) -> &[u8] {
        &self.iv
    }

    pub(crate) fn update(&mut self, input: &[u8], out: &mut [u8]) -> EngineResult<usize> {
        match &mut self.kind {
            CipherKind::Ctr(stream) => {
                if out.len() < input.len() {
                    return Err(EngineError::BufferTooSmall);
                }
                out[..input.len()].copy_from_slice(input);
                stream.apply_keystream(&mut out[..input.len()]);
                Ok(input.len())
            }
            CipherKind::Gcm(gcm) => {
                gcm.buffer.extend_from_slice(input);
                Ok(0)
            }
        }
    }

    pub(crate) fn finalize(&mut self, out: &mut [u8]) -> EngineResult<usize> {
        let op = self.op;
        let iv = self.iv.clone();
        match &mut self.kind {
            CipherKind::Ctr(_) => Ok(0),
            CipherKind::Gcm(gcm) => {
                let mut buffer = std::mem::take(&mut gcm.buffer);
                match op {
                    CipherOp::Encrypt => {
                        let tag = gcm_seal(&gcm.key, &iv, &mut buffer)?;
                        if out.len() < buffer.len() {
                            return Err(EngineError::BufferTooSmall);
                        }
                        out[..buffer.len()].copy_from_slice(&buffer);
                        gcm.tag = Some(tag);
                        Ok(buffer.len())
                    }
                    CipherOp::Decrypt => {
                        // Finalizing a decrypt without an expected tag cannot
                        // verify anything; treat it as a verification failure.
                        let expected = gcm.expected_tag.ok_or(EngineError::AuthTagMismatch)?;
                        gcm_open(&gcm.key, &iv, &mut buffer, &expected)?;
                        if out.len() < buffer.len() {
                            return Err(EngineError::BufferTooSmall);
                        }
                        out[..buffer.len()].copy_from_slice(&buffer);
                        Ok(buffer.len())
                    }
                }
            }
        }
    }

    pub(crate) fn tag(&self) -> EngineResult<[u8; AEAD_TAG_LEN]> {
        match &self.kind {
            CipherKind::Gcm(gcm) => gcm.tag.ok_or(EngineError::InvalidContext),
            CipherKind::Ctr(_) => Err(EngineError::NotAead),
        }
    }

    pub(crate) fn set_expected_tag(&mut self, tag: &[u8]) -> EngineResult<()> {
        match &mut self.kind {
            CipherKind::Gcm(gcm) => {
                let mut expected = [0u8; AEAD_TAG_LEN];
                if tag.len() != AEAD_TAG_LEN {
                    return Err(EngineError::InvalidTagLength(tag.len()));
                }
                expected.copy_from_slice(tag);
                gcm.expected_tag = Some(expected);
                Ok(())
            }
            CipherKind::Ctr(_) => Err(EngineError::NotAead),
        }
    }
}

fn gcm_seal(key: &[u8], iv: &[u8], buffer: &mut [u8]) -> EngineResult<[u8; AEAD_TAG_LEN]> {
    match key.len() {
        16 => seal_with::<Aes128Gcm>(key, iv, buffer),
        24 => seal_with::<Aes192Gcm>(key, iv, buffer),
        _ => seal_with::<Aes256Gcm>(key, iv, buffer),
    }
}

fn gcm_open(
    key: &[u8],
    iv: &[u8],
    buffer: &mut [u8],
    tag: &[u8; AEAD_TAG_LEN],
) -> EngineResult<()> {
    match key.len() {
        16 => open_with::<Aes128Gcm>(key, iv, buffer, tag),
        24 => open_with::<Aes192Gcm>(key, iv, buffer, tag),
        _ => open_with::<Aes256Gcm>(key, iv, buffer, tag),
    }
}

fn seal_with<A>(key: &[u8], iv: &[u8], buffer: &mut [u8]) -> EngineResult<[u8; AEAD_TAG_LEN]>
where
    A: KeyInit + AeadInPlace + AeadCore<NonceSize = U12, TagSize = U16>,
{
    let aead = A::new_from_slice(key).map_err(|_| EngineError::InvalidKeyLength(key.len()))?;
    let nonce = GenericArray::from_slice(iv);
    let tag = aead
        .encrypt_in_place_detached(nonce, &[], buffer)
        .map_err(|_| EngineError::InvalidContext)?;
    Ok(tag.into())
}

fn open_with<A>(
    key: &[u8],
    iv: &[u8],
    buffer: &mut [u8],
    tag: &[u8; AEAD_TAG_LEN],
) -> EngineResult<()>
where
    A: KeyInit + AeadInPlace + AeadCore<NonceSize = U12, TagSize = U16>,
{
    let aead = A::new_from_slice(key).map_err(|_| EngineError::InvalidKeyLength(key.len()))?;
    let nonce = GenericArray::from_slice(iv);
    aead.decrypt_in_place_detached(nonce, &[], buffer, GenericArray::from_slice(tag))
        .map_err(|_| EngineError::AuthTagMismatch)
}
