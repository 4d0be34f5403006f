//! Canonical primitives for webprint identifiers.
//!
//! Everything that decides the exact bytes behind an identifier lives in this
//! crate: RFC 8785 canonical JSON, the URL-safe base64 alphabet, and the
//! digest providers used to hash canonical bytes. The crate knows nothing
//! about fingerprints; `webprint-core` feeds it.
//!
#![deny(missing_docs)]

/// Canonicalization helpers for deterministic serialization.
pub mod canonicalizer;
/// Digest providers and the hex hash identifier.
pub mod digest;
/// URL-safe base64 encoding without padding.
pub mod encoding;
/// Validated identifier newtypes.
pub mod identifiers;
/// Validation helpers used by identifier types.
pub mod validation;
#[cfg(all(feature = "web-crypto", target_arch = "wasm32"))]
/// Digest provider backed by the host's `crypto.subtle`.
pub mod web_crypto;

pub use canonicalizer::{
    stringify_numbers, CanonicalizationError, CanonicalizationResult, Canonicalizer,
};
pub use digest::{DigestAlg, DigestError, DigestProvider, Sha256Digest, UnavailableDigest};
pub use encoding::{decode_url_safe, encode_url_safe, EncodingError};
pub use identifiers::{EncodedId, HashId, ProfileId};
pub use validation::ValidationError;
#[cfg(all(feature = "web-crypto", target_arch = "wasm32"))]
pub use web_crypto::SubtleDigest;
