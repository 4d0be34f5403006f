//! Identity derivation: canonical serialization, encoded and hash identifiers.
//!
//! Serialization is RFC 8785 canonical JSON of the normalized fingerprint
//! with every number rendered as a JSON string:
//! `serialize(n) = jcs(stringify_numbers(json(n)))`. Object keys come out
//! sorted, so the result never depends on field declaration order.
//!
//! Identifiers derived from that text:
//! - encoded: `base64url_nopad(utf8(serialize(n)))`, reversible;
//! - hash: `hex(sha256(utf8(serialize(n))))`, 64 lowercase characters.

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use webprint_canonical::{
    encode_url_safe, Canonicalizer, DigestProvider, EncodedId, HashId, ProfileId, Sha256Digest,
};

use crate::errors::IdentityError;
use crate::normalized::{normalize, NormalizedFingerprint};
use crate::raw::RawFingerprint;

/// Profile stamped on canonical serializations.
pub const SERIALIZATION_PROFILE: &str = "webprint-canonical-v1";

/// Input accepted by the identity operations.
///
/// `Raw` input is always normalized before serialization.
#[derive(Debug, Clone, Copy)]
pub enum FingerprintInput<'a> {
    /// A raw fingerprint; normalized first.
    Raw(&'a RawFingerprint),
    /// An already normalized fingerprint.
    Normalized(&'a NormalizedFingerprint),
}

impl<'a> FingerprintInput<'a> {
    /// Returns the normalized form, normalizing raw input.
    pub fn normalized(self) -> Cow<'a, NormalizedFingerprint> {
        match self {
            FingerprintInput::Raw(raw) => Cow::Owned(normalize(raw)),
            FingerprintInput::Normalized(normalized) => Cow::Borrowed(normalized),
        }
    }
}

impl<'a> From<&'a RawFingerprint> for FingerprintInput<'a> {
    fn from(raw: &'a RawFingerprint) -> Self {
        FingerprintInput::Raw(raw)
    }
}

impl<'a> From<&'a NormalizedFingerprint> for FingerprintInput<'a> {
    fn from(normalized: &'a NormalizedFingerprint) -> Self {
        FingerprintInput::Normalized(normalized)
    }
}

/// Both identifiers derived from one serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintIds {
    /// Reversible URL-safe identifier.
    pub encoded: EncodedId,
    /// One-way hash identifier.
    pub hash: HashId,
}

/// The strongest identifier the host could produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Identifier {
    /// SHA-256 hash identifier.
    Hash(HashId),
    /// Encoded identifier, used when no digest primitive exists.
    Encoded(EncodedId),
}

impl Identifier {
    /// Identifier text.
    pub fn as_str(&self) -> &str {
        match self {
            Identifier::Hash(id) => id.as_str(),
            Identifier::Encoded(id) => id.as_str(),
        }
    }

    /// True when the identifier is a hash.
    pub fn is_hash(&self) -> bool {
        matches!(self, Identifier::Hash(_))
    }
}

/// Derives identifiers with a configurable digest provider.
///
/// Stateless apart from its configuration; clones share the provider and
/// concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct IdentityDeriver {
    canonicalizer: Canonicalizer,
    digest: Arc<dyn DigestProvider>,
}

impl Default for IdentityDeriver {
    fn default() -> Self {
        Self::new(Arc::new(Sha256Digest))
    }
}

impl IdentityDeriver {
    /// Creates a deriver hashing through `digest`.
    pub fn new(digest: Arc<dyn DigestProvider>) -> Self {
        Self {
            canonicalizer: canonicalizer(),
            digest,
        }
    }

    /// Creates a deriver that owns `digest`.
    pub fn with_digest(digest: impl DigestProvider + 'static) -> Self {
        Self::new(Arc::new(digest))
    }

    /// Canonical serialization of the (normalized) input.
    pub fn serialize<'a>(&self, input: impl Into<FingerprintInput<'a>>) -> String {
        let input: FingerprintInput<'a> = input.into();
        canonical_text(&self.canonicalizer, &input.normalized())
    }

    /// Encoded identifier of the input.
    pub fn encode<'a>(&self, input: impl Into<FingerprintInput<'a>>) -> EncodedId {
        encode_str(&self.serialize(input))
    }

    /// Hash identifier of the input.
    ///
    /// # Errors
    ///
    /// [`IdentityError::CryptographicUnavailable`] when the provider has no
    /// primitive; [`IdentityError::Digest`] when the primitive fails.
    pub async fn hash<'a>(
        &self,
        input: impl Into<FingerprintInput<'a>>,
    ) -> Result<HashId, IdentityError> {
        let serialization = self.serialize(input);
        self.hash_str(&serialization).await
    }

    /// Hashes an existing canonical serialization.
    pub async fn hash_str(&self, serialization: &str) -> Result<HashId, IdentityError> {
        let id = self.digest.digest_hex(serialization.as_bytes()).await?;
        debug!(
            hash = id.prefix(12),
            len = serialization.len(),
            "derived hash identifier"
        );
        Ok(id)
    }

    /// Both identifiers from a single serialization.
    pub async fn derive<'a>(
        &self,
        input: impl Into<FingerprintInput<'a>>,
    ) -> Result<FingerprintIds, IdentityError> {
        let serialization = self.serialize(input);
        let hash = self.hash_str(&serialization).await?;
        Ok(FingerprintIds {
            encoded: encode_str(&serialization),
            hash,
        })
    }

    /// Hash identifier, or the encoded identifier when the host has no
    /// digest primitive. Other digest failures still surface.
    pub async fn derive_or_encoded<'a>(
        &self,
        input: impl Into<FingerprintInput<'a>>,
    ) -> Result<Identifier, IdentityError> {
        let serialization = self.serialize(input);
        match self.hash_str(&serialization).await {
            Ok(hash) => Ok(Identifier::Hash(hash)),
            Err(IdentityError::CryptographicUnavailable) => {
                warn!("no digest primitive; using encoded identifier");
                Ok(Identifier::Encoded(encode_str(&serialization)))
            }
            Err(err) => Err(err),
        }
    }
}

fn canonicalizer() -> Canonicalizer {
    Canonicalizer::new(ProfileId::new(SERIALIZATION_PROFILE.to_string())).with_stringified_numbers()
}

fn canonical_text(canonicalizer: &Canonicalizer, fingerprint: &NormalizedFingerprint) -> String {
    // serde_json maps non-finite floats to null, so only a map with
    // non-string keys could fail here, and the normalized form has none.
    let result = canonicalizer
        .canonicalize_serializable(fingerprint)
        .expect("normalized fingerprint has string-keyed maps only");
    result.into_string().expect("canonical JSON is UTF-8")
}

/// Canonical serialization of a normalized fingerprint.
///
/// Deterministic and injective: equal inputs give identical text, distinct
/// inputs give distinct text.
pub fn serialize(fingerprint: &NormalizedFingerprint) -> String {
    canonical_text(&canonicalizer(), fingerprint)
}

/// URL-safe, unpadded base64 of arbitrary text.
pub fn encode_str(serialization: &str) -> EncodedId {
    EncodedId::new(encode_url_safe(serialization))
}

/// Encoded identifier of a raw or normalized fingerprint.
pub fn encode<'a>(input: impl Into<FingerprintInput<'a>>) -> EncodedId {
    let input: FingerprintInput<'a> = input.into();
    encode_str(&canonical_text(&canonicalizer(), &input.normalized()))
}

/// Hash identifier of a raw or normalized fingerprint, using the pure-Rust
/// SHA-256 provider.
pub async fn hash<'a>(input: impl Into<FingerprintInput<'a>>) -> Result<HashId, IdentityError> {
    IdentityDeriver::default().hash(input).await
}

/// Hash identifier of an existing canonical serialization.
pub async fn hash_str(serialization: &str) -> Result<HashId, IdentityError> {
    IdentityDeriver::default().hash_str(serialization).await
}
