//! Unified error types for the atomdoc library.
//!
//! This module provides a single error type covering both specification
//! violations detected while building the document model and transport
//! failures raised by the underlying XML event stream.
use thiserror::Error;

/// Main error type for atomdoc operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document or a constructed element violates the Atom 1.0
    /// specification. The message names the offending element or attribute.
    #[error("Atom specification violation: {0}")]
    Spec(String),

    /// XML parsing or serialization error from the underlying event stream
    #[error("XML error: {0}")]
    Xml(String),
}

/// Result type for atomdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.to_string())
    }
}
