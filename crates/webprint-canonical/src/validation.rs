use thiserror::Error;

/// Rejections raised when building identifiers from untrusted input.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Identifier text outside its alphabet or length range.
    #[error("{field} '{value}' does not match its identifier pattern")]
    PatternMismatch {
        /// Identifier type that rejected the text.
        field: &'static str,
        /// Rejected text.
        value: String,
    },
    /// Raw bytes of the wrong size, such as a truncated digest.
    #[error("{field} has {actual} bytes, expected {expected}")]
    WrongLength {
        /// What was being measured.
        field: &'static str,
        /// Required byte count.
        expected: usize,
        /// Byte count supplied.
        actual: usize,
    },
}
