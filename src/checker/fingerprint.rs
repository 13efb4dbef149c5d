//! Content fingerprints
//!
//! A fingerprint is the uppercase hex digest of a site's full response body.

use crate::WatchError;
use md5::Md5;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

/// Hex-encoded content digest, always uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wraps an existing hex digest, normalizing it to uppercase
    pub fn from_hex(hex: &str) -> Self {
        Self(hex.to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Digest used to fingerprint content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Sha512,
    /// Digest written by earlier tools; lets existing hashes compare equal
    Md5,
}

impl DigestAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Md5 => "md5",
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = WatchError;

    /// Accepts `sha256`/`sha-256`, `sha512`/`sha-512` and `md5`, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            "md5" => Ok(Self::Md5),
            _ => Err(WatchError::DigestUnavailable(s.to_string())),
        }
    }
}

/// Incremental hasher fed with body chunks
pub enum ContentHasher {
    Sha256(Sha256),
    Sha512(Sha512),
    Md5(Md5),
}

impl ContentHasher {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        match algorithm {
            DigestAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
            DigestAlgorithm::Sha512 => Self::Sha512(Sha512::new()),
            DigestAlgorithm::Md5 => Self::Md5(Md5::new()),
        }
    }

    pub fn update(&mut self, chunk: &[u8]) {
        match self {
            Self::Sha256(h) => h.update(chunk),
            Self::Sha512(h) => h.update(chunk),
            Self::Md5(h) => h.update(chunk),
        }
    }

    pub fn finalize(self) -> Fingerprint {
        let hex = match self {
            Self::Sha256(h) => hex::encode_upper(h.finalize()),
            Self::Sha512(h) => hex::encode_upper(h.finalize()),
            Self::Md5(h) => hex::encode_upper(h.finalize()),
        };
        Fingerprint(hex)
    }
}

/// Fingerprints a complete body in one call
pub fn fingerprint_bytes(algorithm: DigestAlgorithm, bytes: &[u8]) -> Fingerprint {
    let mut hasher = ContentHasher::new(algorithm);
    hasher.update(bytes);
    hasher.finalize()
}
