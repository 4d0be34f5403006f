use crate::encoding::{decode_url_safe, EncodingError};
use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new instance without validation; callers are responsible for conformity.
            pub fn new(value: String) -> Self {
                Self(value)
            }

            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if !Regex::new($pattern).expect("invalid regex").is_match(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }

            /// Returns the identifier text.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the identifier, returning its text.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    ProfileId,
    "Identifier for canonicalization profiles (pattern: `[A-Za-z0-9_-]{16,128}`)",
    r"^[A-Za-z0-9_-]{16,128}$"
);
newtype!(
    EncodedId,
    "Reversible identifier: base64url text without padding.",
    r"^[A-Za-z0-9_-]*$"
);
newtype!(
    HashId,
    "One-way identifier: 64 lowercase hex characters of a SHA-256 digest.",
    r"^[0-9a-f]{64}$"
);

impl EncodedId {
    /// Recovers the bytes behind the identifier.
    pub fn decode(&self) -> Result<Vec<u8>, EncodingError> {
        decode_url_safe(&self.0)
    }

    /// Recovers the canonical text behind the identifier.
    pub fn decode_utf8(&self) -> Result<String, EncodingError> {
        String::from_utf8(self.decode()?).map_err(EncodingError::from)
    }
}

impl HashId {
    /// Renders raw digest bytes as a hash identifier.
    ///
    /// Rejects anything other than a 32-byte digest.
    pub fn from_digest(bytes: &[u8]) -> Result<Self, ValidationError> {
        if bytes.len() != 32 {
            return Err(ValidationError::WrongLength {
                field: "digest",
                expected: 32,
                actual: bytes.len(),
            });
        }
        Ok(Self(hex::encode(bytes)))
    }

    /// Returns the first `n` hex characters, handy for log lines.
    pub fn prefix(&self, n: usize) -> &str {
        &self.0[..n.min(self.0.len())]
    }
}
