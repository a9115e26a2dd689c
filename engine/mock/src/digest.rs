// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! Mock Engine - Digest state module

use digest::DynDigest;
use ncp_engine_interface::EngineError;
use ncp_engine_interface::EngineResult;

/// Digest algorithms the mock engine reports as supported. Names follow the
/// engine-native spelling (no hyphen between family and bit length for the
/// SHA-2 family).
pub(crate) const DIGEST_ALGORITHMS: &[&str] = &[
    "BLAKE2b512",
    "BLAKE2s256",
    "MD5",
    "SHA1",
    "SHA224",
    "SHA256",
    "SHA384",
    "SHA512",
    "SHA512-224",
    "SHA512-256",
    "SHA3-224",
    "SHA3-256",
    "SHA3-384",
    "SHA3-512",
];

/// Streaming digest state stored inside a mock context slot.
pub(crate) struct DigestState {
    hasher: Box<dyn DynDigest + Send>,
}

impl DigestState {
    pub(crate) fn new(algorithm: &str) -> EngineResult<Self> {
        Ok(Self {
            hasher: new_hasher(algorithm)?,
        })
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    pub(crate) fn output_size(&self) -> usize {
        self.hasher.output_size()
    }

    pub(crate) fn finalize_into(&mut self, out: &mut [u8]) -> EngineResult<usize> {
        let size = self.hasher.output_size();
        if out.len() < size {
            return Err(EngineError::BufferTooSmall);
        }
        self.hasher
            .finalize_into_reset(&mut out[..size])
            .map_err(|_| EngineError::BufferTooSmall)?;
        Ok(size)
    }
}

fn new_hasher(algorithm: &str) -> EngineResult<Box<dyn DynDigest + Send>> {
    Ok(match algorithm {
        "BLAKE2b512" => Box::new(blake2::Blake2b512::default()),
        "BLAKE2s256" => Box::new(blake2::Blake2s256::default()),
        "MD5" => Box::new(md5::Md5::default()),
        "SHA1" => Box::new(sha1::Sha1::default()),
        "SHA224" => Box::new(sha2::Sha224::default()),
        "SHA256" => Box::new(sha2::Sha256::default()),
        "SHA384" => Box::new(sha2::Sha384::default()),
        "SHA512" => Box::new(sha2::Sha512::default()),
        "SHA512-224" => Box::new(sha2::Sha512_224::default()),
        "SHA512-256" => Box::new(sha2::Sha512_256::default()),
        "SHA3-224" => Box::new(sha3::Sha3_224::default()),
        "SHA3-256" => Box::new(sha3::Sha3_256::default()),
        "SHA3-384" => Box::new(sha3::Sha3_384::default()),
        "SHA3-512" => Box::new(sha3::Sha3_512::default()),
        other => return Err(EngineError::UnknownAlgorithm(other.to_string())),
    })
}
