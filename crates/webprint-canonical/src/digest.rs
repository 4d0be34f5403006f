use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};
use thiserror::Error;

use crate::identifiers::HashId;

/// Supported digest algorithms for hash identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigestAlg {
    /// SHA-256, the only algorithm hash identifiers are defined over.
    #[serde(rename = "sha-256")]
    Sha256,
}

impl DigestAlg {
    /// Digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            DigestAlg::Sha256 => 32,
        }
    }
}

/// Errors raised by digest providers.
#[derive(Debug, Error)]
pub enum DigestError {
    /// The host has no digest primitive. Callers should fall back to the
    /// encoded identifier instead of a weaker hash.
    #[error("no cryptographic digest primitive is available")]
    CryptographicUnavailable,
    /// The host primitive exists but failed.
    #[error("digest backend failed: {0}")]
    Backend(String),
    /// The backend returned a digest of the wrong size.
    #[error("digest has {actual} bytes, expected {expected}")]
    InvalidLength {
        /// Bytes the algorithm produces.
        expected: usize,
        /// Bytes the backend returned.
        actual: usize,
    },
}

/// Source of cryptographic digests.
///
/// Digesting is asynchronous because some hosts only expose their primitive
/// through a promise. Implementations must never substitute a weaker
/// algorithm when theirs is missing; they report
/// [`DigestError::CryptographicUnavailable`] instead.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait DigestProvider: fmt::Debug + Send + Sync {
    /// Algorithm this provider computes.
    fn algorithm(&self) -> DigestAlg;

    /// Digests `data`, returning the raw digest bytes.
    async fn digest(&self, data: &[u8]) -> Result<Vec<u8>, DigestError>;

    /// Digests `data` and renders it as a lowercase hex [`HashId`].
    async fn digest_hex(&self, data: &[u8]) -> Result<HashId, DigestError> {
        let bytes = self.digest(data).await?;
        let expected = self.algorithm().output_len();
        if bytes.len() != expected {
            return Err(DigestError::InvalidLength {
                expected,
                actual: bytes.len(),
            });
        }
        HashId::from_digest(&bytes).map_err(|e| DigestError::Backend(e.to_string()))
    }
}

/// Pure-Rust SHA-256 provider; always available.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Digest;

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl DigestProvider for Sha256Digest {
    fn algorithm(&self) -> DigestAlg {
        DigestAlg::Sha256
    }

    async fn digest(&self, data: &[u8]) -> Result<Vec<u8>, DigestError> {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Ok(hasher.finalize().to_vec())
    }
}

/// Provider for hosts without any digest primitive.
///
/// Every call fails with [`DigestError::CryptographicUnavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableDigest;

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl DigestProvider for UnavailableDigest {
    fn algorithm(&self) -> DigestAlg {
        DigestAlg::Sha256
    }

    async fn digest(&self, _data: &[u8]) -> Result<Vec<u8>, DigestError> {
        Err(DigestError::CryptographicUnavailable)
    }
}
