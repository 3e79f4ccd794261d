//! Error types for xmlgroup operations
//!
//! This module defines all error types used throughout the crate. The
//! transforms themselves are total; errors only arise at the parsing and
//! serialization boundaries, and when addressing the generic tree by path.

use thiserror::Error;

/// Error types for xmlgroup operations
#[derive(Debug, Error)]
pub enum XmlGroupError {
    /// Source XML could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Input does not conform to the generic group/attribute vocabulary
    #[error("Invalid generic document: {0}")]
    InvalidGeneric(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Bad path into the generic tree
    #[error("Bad path: {0}")]
    BadPath(String),

    /// Bad parameter provided to a function
    #[error("Bad parameter: {0}")]
    BadParam(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "core")]
impl From<quick_xml::Error> for XmlGroupError {
    fn from(err: quick_xml::Error) -> Self {
        XmlGroupError::Parse(err.to_string())
    }
}

#[cfg(feature = "core")]
impl From<quick_xml::events::attributes::AttrError> for XmlGroupError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        XmlGroupError::Parse(format!("Malformed attribute: {}", err))
    }
}

#[cfg(feature = "core")]
impl From<quick_xml::encoding::EncodingError> for XmlGroupError {
    fn from(err: quick_xml::encoding::EncodingError) -> Self {
        XmlGroupError::Parse(format!("Encoding error: {}", err))
    }
}

/// Result type alias for xmlgroup operations
pub type XmlGroupResult<T> = Result<T, XmlGroupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = XmlGroupError::BadPath("a//b".to_string());
        assert!(err.to_string().contains("Bad path: a//b"));

        let err = XmlGroupError::InvalidGeneric("missing name".to_string());
        assert_eq!(err.to_string(), "Invalid generic document: missing name");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: XmlGroupError = io_err.into();
        assert!(matches!(err, XmlGroupError::Io(_)));
    }
}
