//! Error types for the dday-protocol crate.
//!
//! These errors are produced by the strict parsers (`FromStr` impls and
//! explicit validation helpers). The embed link decoder never returns them:
//! it falls back to documented defaults instead.

use thiserror::Error;

/// Errors that can occur when parsing protocol values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The style name is not one of `flat`, `3d` or `pixel`.
    #[error("unknown widget style: {0:?}")]
    InvalidStyle(String),

    /// The color is neither a palette name nor a hex color.
    #[error("invalid theme color: {0:?}")]
    InvalidColor(String),

    /// The image reference could not be parsed as an absolute URL.
    #[error("invalid image URL {input:?}: {reason}")]
    InvalidImageUrl {
        /// The rejected input.
        input: String,
        /// Why the input was rejected.
        reason: String,
    },

    /// The image URL uses a scheme that cannot be shared in a link.
    #[error("image URL scheme {0:?} is not shareable (expected http or https)")]
    UnshareableImageScheme(String),

    /// The manual date entry is not a valid `YYYY-MM-DD` date.
    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ProtocolError::InvalidStyle("neon".to_string());
        assert_eq!(err.to_string(), "unknown widget style: \"neon\"");

        let err = ProtocolError::UnshareableImageScheme("blob".to_string());
        assert!(err.to_string().contains("not shareable"));

        let err = ProtocolError::InvalidDate("2024-13-".to_string());
        assert_eq!(err.to_string(), "invalid date \"2024-13-\": expected YYYY-MM-DD");
    }
}
