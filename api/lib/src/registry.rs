// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! Algorithm name registry
//!
//! Maps public algorithm names and their aliases to engine-native names. The
//! tables below list every name the provider knows how to publish; at build
//! time they are filtered down to what the running engine actually reports,
//! so a leaner engine simply publishes fewer names. Built once per process.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use ncp_engine_interface::AlgorithmKind;
use ncp_engine_interface::Engine;

use crate::engine;
use crate::NcpError;
use crate::NcpResult;

/// Digest name pairs: engine-native name, public name.
const DIGEST_NAMES: &[(&str, &str)] = &[
    ("BLAKE2b512", "BLAKE2b512"),
    ("BLAKE2s256", "BLAKE2s256"),
    ("MD4", "MD4"),
    ("MD5", "MD5"),
    ("RIPEMD160", "RIPEMD160"),
    ("SHA1", "SHA1"),
    ("SHA224", "SHA-224"),
    ("SHA256", "SHA-256"),
    ("SHA3-224", "SHA3-224"),
    ("SHA3-256", "SHA3-256"),
    ("SHA3-384", "SHA3-384"),
    ("SHA3-512", "SHA3-512"),
    ("SHA384", "SHA-384"),
    ("SHA512", "SHA-512"),
    ("SHA512-224", "SHA-512/224"),
    ("SHA512-256", "SHA-512/256"),
    ("SM3", "SM3"),
    ("whirlpool", "Whirlpool"),
];

/// Cipher name pairs: engine-native name, public name.
const CIPHER_NAMES: &[(&str, &str)] = &[
    ("AES-128-CBC", "AES-128-CBC"),
    ("AES-128-CFB", "AES-128-CFB"),
    ("AES-128-CFB1", "AES-128-CFB1"),
    ("AES-128-CFB8", "AES-128-CFB8"),
    ("AES-128-CTR", "AES-128-CTR"),
    ("AES-128-ECB", "AES-128-ECB"),
    ("AES-128-GCM", "AES-128-GCM"),
    ("AES-128-OCB", "AES-128-OCB"),
    ("AES-128-OFB", "AES-128-OFB"),
    ("AES-128-XTS", "AES-128-XTS"),
    ("AES-192-CBC", "AES-192-CBC"),
    ("AES-192-CFB", "AES-192-CFB"),
    ("AES-192-CFB1", "AES-192-CFB1"),
    ("AES-192-CFB8", "AES-192-CFB8"),
    ("AES-192-CTR", "AES-192-CTR"),
    ("AES-192-ECB", "AES-192-ECB"),
    ("AES-192-GCM", "AES-192-GCM"),
    ("AES-192-OCB", "AES-192-OCB"),
    ("AES-192-OFB", "AES-192-OFB"),
    ("AES-256-CBC", "AES-256-CBC"),
    ("AES-256-CFB", "AES-256-CFB"),
    ("AES-256-CFB1", "AES-256-CFB1"),
    ("AES-256-CFB8", "AES-256-CFB8"),
    ("AES-256-CTR", "AES-256-CTR"),
    ("AES-256-ECB", "AES-256-ECB"),
    ("AES-256-GCM", "AES-256-GCM"),
    ("AES-256-OCB", "AES-256-OCB"),
    ("AES-256-OFB", "AES-256-OFB"),
    ("AES-256-XTS", "AES-256-XTS"),
    ("ARIA-128-CBC", "ARIA-128-CBC"),
    ("ARIA-128-CCM", "ARIA-128-CCM"),
    ("ARIA-128-CFB", "ARIA-128-CFB"),
    ("ARIA-128-CTR", "ARIA-128-CTR"),
    ("ARIA-128-ECB", "ARIA-128-ECB"),
    ("ARIA-128-GCM", "ARIA-128-GCM"),
    ("ARIA-128-OFB", "ARIA-128-OFB"),
    ("ARIA-192-CBC", "ARIA-192-CBC"),
    ("ARIA-192-CCM", "ARIA-192-CCM"),
    ("ARIA-192-CFB", "ARIA-192-CFB"),
    ("ARIA-192-CTR", "ARIA-192-CTR"),
    ("ARIA-192-ECB", "ARIA-192-ECB"),
    ("ARIA-192-GCM", "ARIA-192-GCM"),
    ("ARIA-192-OFB", "ARIA-192-OFB"),
    ("ARIA-256-CBC", "ARIA-256-CBC"),
    ("ARIA-256-CCM", "ARIA-256-CCM"),
    ("ARIA-256-CFB", "ARIA-256-CFB"),
    ("ARIA-256-CTR", "ARIA-256-CTR"),
    ("ARIA-256-ECB", "ARIA-256-ECB"),
    ("ARIA-256-GCM", "ARIA-256-GCM"),
    ("ARIA-256-OFB", "ARIA-256-OFB"),
    ("BF-CBC", "BF-CBC"),
    ("BF-CFB", "BF-CFB"),
    ("BF-ECB", "BF-ECB"),
    ("BF-OFB", "BF-OFB"),
    ("CAMELLIA-128-CBC", "CAMELLIA-128-CBC"),
    ("CAMELLIA-128-CFB", "CAMELLIA-128-CFB"),
    ("CAMELLIA-128-CTR", "CAMELLIA-128-CTR"),
    ("CAMELLIA-128-ECB", "CAMELLIA-128-ECB"),
    ("CAMELLIA-128-OFB", "CAMELLIA-128-OFB"),
    ("CAMELLIA-192-CBC", "CAMELLIA-192-CBC"),
    ("CAMELLIA-192-CFB", "CAMELLIA-192-CFB"),
    ("CAMELLIA-192-CTR", "CAMELLIA-192-CTR"),
    ("CAMELLIA-192-ECB", "CAMELLIA-192-ECB"),
    ("CAMELLIA-192-OFB", "CAMELLIA-192-OFB"),
    ("CAMELLIA-256-CBC", "CAMELLIA-256-CBC"),
    ("CAMELLIA-256-CFB", "CAMELLIA-256-CFB"),
    ("CAMELLIA-256-CTR", "CAMELLIA-256-CTR"),
    ("CAMELLIA-256-ECB", "CAMELLIA-256-ECB"),
    ("CAMELLIA-256-OFB", "CAMELLIA-256-OFB"),
    ("CAST5-CBC", "CAST5-CBC"),
    ("CAST5-CFB", "CAST5-CFB"),
    ("CAST5-ECB", "CAST5-ECB"),
    ("CAST5-OFB", "CAST5-OFB"),
    ("ChaCha20", "ChaCha20"),
    ("ChaCha20-Poly1305", "ChaCha20-Poly1305"),
    ("DES-CBC", "DES-CBC"),
    ("DES-CFB", "DES-CFB"),
    ("DES-ECB", "DES-ECB"),
    ("DES-EDE", "DES-EDE"),
    ("DES-EDE-CBC", "DES-EDE-CBC"),
    ("DES-EDE3", "DES-EDE3"),
    ("DES-EDE3-CBC", "DES-EDE3-CBC"),
    ("DES-OFB", "DES-OFB"),
    ("IDEA-CBC", "IDEA-CBC"),
    ("IDEA-CFB", "IDEA-CFB"),
    ("IDEA-ECB", "IDEA-ECB"),
    ("IDEA-OFB", "IDEA-OFB"),
    ("RC2-40-CBC", "RC2-40-CBC"),
    ("RC2-64-CBC", "RC2-64-CBC"),
    ("RC2-CBC", "RC2-CBC"),
    ("RC2-CFB", "RC2-CFB"),
    ("RC2-ECB", "RC2-ECB"),
    ("RC2-OFB", "RC2-OFB"),
    ("RC4", "RC4"),
    ("RC4-40", "RC4-40"),
    ("SEED-CBC", "SEED-CBC"),
    ("SEED-CFB", "SEED-CFB"),
    ("SEED-ECB", "SEED-ECB"),
    ("SEED-OFB", "SEED-OFB"),
    ("SM4-CBC", "SM4-CBC"),
    ("SM4-CFB", "SM4-CFB"),
    ("SM4-CTR", "SM4-CTR"),
    ("SM4-ECB", "SM4-ECB"),
    ("SM4-OFB", "SM4-OFB"),
    ("id-aes128-CCM", "id-aes128-CCM"),
    ("id-aes128-GCM", "id-aes128-GCM"),
    ("id-aes128-wrap", "id-aes128-wrap"),
    ("id-aes192-CCM", "id-aes192-CCM"),
    ("id-aes192-GCM", "id-aes192-GCM"),
    ("id-aes192-wrap", "id-aes192-wrap"),
    ("id-aes256-CCM", "id-aes256-CCM"),
    ("id-aes256-GCM", "id-aes256-GCM"),
    ("id-aes256-wrap", "id-aes256-wrap"),
];

/// What a resolvable public name points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlgorithmEntry {
    /// Which primitive family the name belongs to.
    pub kind: AlgorithmKind,
    /// The engine-native spelling the provider passes over the engine
    /// surface.
    pub engine_name: &'static str,
}

/// Resolved name tables for one engine.
#[derive(Clone, Debug, Default)]
pub struct AlgorithmRegistry {
    digests: BTreeMap<String, &'static str>,
    ciphers: BTreeMap<String, &'static str>,
}

lazy_static::lazy_static! {
    // Init-once, teardown-never. A build failure is stored and cloned out to
    // every caller rather than retried.
    static ref REGISTRY: Result<AlgorithmRegistry, NcpError> = AlgorithmRegistry::from_engine();
}

/// The process-wide registry, built on first use.
pub(crate) fn shared() -> NcpResult<&'static AlgorithmRegistry> {
    REGISTRY.as_ref().map_err(Clone::clone)
}

/// Derives the digit-glued alias for a public digest name: a name of the
/// shape `<letters>-<digits>` gains the spelling with the hyphen removed, so
/// `SHA-512` also resolves as `SHA512`. Names like `SHA3-256` (digit in the
/// stem) or `SHA-512/224` (non-digit tail) get no alias.
fn digit_glued_alias(name: &str) -> Option<String> {
    let (stem, tail) = name.split_at(name.rfind('-')?);
    let tail = &tail[1..];
    if stem.is_empty() || stem.contains(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if tail.is_empty() || !tail.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(format!("{stem}{tail}"))
}

impl AlgorithmRegistry {
    /// Builds the registry from the live engine's algorithm lists.
    fn from_engine() -> NcpResult<Self> {
        let digests = engine().list_algorithms(AlgorithmKind::Digest);
        let ciphers = engine().list_algorithms(AlgorithmKind::Cipher);
        Self::build(&digests, &ciphers)
    }

    /// Builds the registry against explicit live-algorithm sets.
    pub(crate) fn build(live_digests: &[String], live_ciphers: &[String]) -> NcpResult<Self> {
        let mut registry = Self::default();

        for &(engine_name, public_name) in DIGEST_NAMES {
            if live_digests.iter().any(|live| live == engine_name) {
                registry.digests.insert(public_name.to_string(), engine_name);
            }
        }
        let mut aliases = BTreeMap::new();
        for (public_name, engine_name) in &registry.digests {
            if let Some(alias) = digit_glued_alias(public_name) {
                aliases.insert(alias, *engine_name);
            }
        }
        if let Some(sha1) = registry.digests.get("SHA1").copied() {
            // Legacy JCA spelling.
            aliases.insert("SHA".to_string(), sha1);
        }
        for (alias, engine_name) in aliases {
            registry.digests.entry(alias).or_insert(engine_name);
        }

        for &(engine_name, public_name) in CIPHER_NAMES {
            if live_ciphers.iter().any(|live| live == engine_name) {
                registry.ciphers.insert(public_name.to_string(), engine_name);
            }
        }
        let mut aliases = BTreeMap::new();
        for (public_name, engine_name) in &registry.ciphers {
            let stripped = public_name.replace('-', "");
            if stripped != *public_name {
                aliases.insert(stripped, *engine_name);
            }
        }
        for (alias, engine_name) in aliases {
            registry.ciphers.entry(alias).or_insert(engine_name);
        }

        registry.assert_disjoint()?;
        tracing::debug!(
            digests = registry.digests.len(),
            ciphers = registry.ciphers.len(),
            "algorithm registry built"
        );
        Ok(registry)
    }

    /// A name resolving as both a digest and a cipher would make lookup
    /// order-dependent; refuse to build instead.
    fn assert_disjoint(&self) -> NcpResult<()> {
        let digest_names: BTreeSet<&String> = self.digests.keys().collect();
        let cipher_names: BTreeSet<&String> = self.ciphers.keys().collect();
        let overlap: Vec<&str> = digest_names
            .intersection(&cipher_names)
            .map(|name| name.as_str())
            .collect();
        if overlap.is_empty() {
            Ok(())
        } else {
            Err(NcpError::RegistryConflict(overlap.join(", ")))
        }
    }

    /// Resolves a public digest name or alias to its engine-native name.
    pub fn resolve_digest(&self, name: &str) -> Option<&'static str> {
        self.digests.get(name).copied()
    }

    /// Resolves a public cipher name or alias to its engine-native name.
    pub fn resolve_cipher(&self, name: &str) -> Option<&'static str> {
        self.ciphers.get(name).copied()
    }

    /// Every resolvable public name with what it points at, sorted by name.
    pub fn name_table(&self) -> Vec<(String, AlgorithmEntry)> {
        let mut table: Vec<(String, AlgorithmEntry)> = Vec::new();
        for (name, &engine_name) in &self.digests {
            table.push((
                name.clone(),
                AlgorithmEntry {
                    kind: AlgorithmKind::Digest,
                    engine_name,
                },
            ));
        }
        for (name, &engine_name) in &self.ciphers {
            table.push((
                name.clone(),
                AlgorithmEntry {
                    kind: AlgorithmKind::Cipher,
                    engine_name,
                },
            ));
        }
        table.sort_by(|a, b| a.0.cmp(&b.0));
        table
    }
}
