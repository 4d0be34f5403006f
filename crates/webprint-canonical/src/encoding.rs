//! URL-safe base64 without padding.
//!
//! The alphabet is the standard one with `+` replaced by `-` and `/` by `_`;
//! trailing `=` is never emitted. Decoding tolerates padded input so text
//! produced by other encoders still round-trips.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use thiserror::Error;

/// Errors raised when decoding an encoded identifier.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// Input is not valid base64url.
    #[error("invalid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Decoded bytes are not UTF-8.
    #[error("decoded bytes are not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Encodes bytes as base64url without padding.
pub fn encode_url_safe(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes base64url text, with or without trailing padding.
pub fn decode_url_safe(text: &str) -> Result<Vec<u8>, EncodingError> {
    Ok(URL_SAFE_NO_PAD.decode(text.trim_end_matches('='))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    #[test]
    fn substitutes_url_unsafe_characters() {
        // 0xfb 0xff encodes to "+/8=" in the standard alphabet.
        let bytes = [0xfbu8, 0xff];
        assert_eq!(STANDARD.encode(bytes), "+/8=");
        assert_eq!(encode_url_safe(bytes), "-_8");
    }

    #[test]
    fn decode_accepts_padding() {
        assert_eq!(decode_url_safe("-_8=").unwrap(), vec![0xfb, 0xff]);
        assert_eq!(decode_url_safe("-_8").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn decode_rejects_standard_alphabet() {
        assert!(decode_url_safe("+/8").is_err());
    }

    #[test]
    fn empty_input_round_trips() {
        assert_eq!(encode_url_safe(""), "");
        assert!(decode_url_safe("").unwrap().is_empty());
    }
}
