use thiserror::Error;
use webprint_canonical::DigestError;

/// Errors from identity derivation.
///
/// Only hashing can fail; normalization, serialization and encoding are total.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// The host offers no digest primitive. Recoverable: the encoded
    /// identifier is still available as a weaker identity.
    #[error("cryptographic digest unavailable; fall back to the encoded identifier")]
    CryptographicUnavailable,
    /// The digest primitive exists but failed.
    #[error("hash derivation failed: {0}")]
    Digest(DigestError),
}

impl IdentityError {
    /// True for [`IdentityError::CryptographicUnavailable`].
    pub fn is_crypto_unavailable(&self) -> bool {
        matches!(self, IdentityError::CryptographicUnavailable)
    }
}

impl From<DigestError> for IdentityError {
    fn from(err: DigestError) -> Self {
        match err {
            DigestError::CryptographicUnavailable => IdentityError::CryptographicUnavailable,
            other => IdentityError::Digest(other),
        }
    }
}

/// Errors raised while reading a raw fingerprint document.
#[derive(Error, Debug)]
pub enum FingerprintError {
    /// Document is not valid JSON or has the wrong shape.
    #[error("invalid fingerprint document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a single collection probe.
///
/// Never escapes the collector: it is logged and the probe's fallback used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The host lacks the interface the probe reads.
    #[error("{0} is not supported by this host")]
    Unsupported(String),
    /// The interface exists but the read failed.
    #[error("probe failed: {0}")]
    Failed(String),
    /// The probe gave up waiting for the host.
    #[error("probe timed out after {0} ms")]
    TimedOut(u64),
}
