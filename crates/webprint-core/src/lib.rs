//! Browser fingerprint normalization and identity derivation.
//!
//! This crate provides:
//! - The raw fingerprint record a client-side collector produces
//! - Normalization to a canonical, deterministically ordered subset
//! - Identity derivation: canonical serialization, a reversible URL-safe
//!   identifier and a SHA-256 hash identifier
//! - A capability-probe interface and collector for hosts that gather the
//!   raw record themselves
//!
//! Core invariants:
//! - `normalize` is pure and total; equal raw records normalize equally
//! - Volatile fields (timestamp, benchmark, local IPs, canvas) never reach
//!   the normalized form
//! - Serialization is canonical JSON, independent of field order
//! - Hashing never falls back to a weaker digest; a missing primitive is
//!   reported as [`IdentityError::CryptographicUnavailable`]
//!
//! ## Quick Start
//!
//! ```rust
//! use webprint_core::{encode, hash, normalize, serialize, RawFingerprint};
//!
//! let raw = RawFingerprint::from_json(r#"{"userAgent":"UA1","platform":"Win32"}"#)?;
//! let normalized = normalize(&raw);
//! let canonical = serialize(&normalized);
//! assert_eq!(encode(&normalized).decode_utf8()?, canonical);
//!
//! let id = futures::executor::block_on(hash(&raw))?;
//! assert_eq!(id.as_str().len(), 64);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
#![deny(missing_docs)]

/// Probe fan-out into a raw fingerprint.
pub mod collector;
/// Error types for identity derivation, parsing and probing.
pub mod errors;
/// Identity derivation from normalized fingerprints.
pub mod identity;
/// Normalized fingerprint and the normalizer.
pub mod normalized;
/// Capability probe traits, slices and flags.
pub mod probe;
/// Quirk rules over identity strings.
pub mod quirks;
/// Raw fingerprint record.
pub mod raw;
/// Types shared by the raw and normalized forms.
pub mod shared;

pub use collector::{Collector, CollectorBuilder};
pub use errors::{FingerprintError, IdentityError, ProbeError};
pub use identity::{
    encode, encode_str, hash, hash_str, serialize, FingerprintIds, FingerprintInput, Identifier,
    IdentityDeriver, SERIALIZATION_PROFILE,
};
pub use normalized::{normalize, NormalizedFingerprint, NormalizedScreen};
pub use probe::{
    AsyncProbe, AudioSample, CapabilityFlags, LocalAddresses, LocaleInfo, NavigatorInfo,
    PluginInventory, Probe, RenderInfo, StaticProbe,
};
pub use quirks::{QuirkMatcher, QuirkRule, QuirkRules};
pub use raw::{
    DoNotTrack, MimeTypeInfo, NetworkInfo, PerformanceBenchmark, PluginInfo, RawFingerprint,
    StorageInfo, WebGlInfo,
};
pub use shared::{FontCheck, Quirks, Reported, ScreenInfo, TouchSupport, UNKNOWN};
pub use webprint_canonical::{
    DigestError, DigestProvider, EncodedId, HashId, Sha256Digest, UnavailableDigest,
};
#[cfg(all(feature = "web-crypto", target_arch = "wasm32"))]
pub use webprint_canonical::SubtleDigest;
