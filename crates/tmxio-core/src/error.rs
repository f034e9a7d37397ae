//! Error types for TMX operations

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Errors that can occur while reading a TMX document
#[derive(Error, Debug)]
pub enum TmxError {
    /// Error reading the input file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The content is not a decodable TMX document
    #[error("TMX decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl TmxError {
    /// Whether the failure came from the storage layer
    pub fn is_io(&self) -> bool {
        matches!(self, TmxError::Io(_))
    }

    /// Whether the failure came from decoding the markup
    pub fn is_decode(&self) -> bool {
        matches!(self, TmxError::Decode(_))
    }
}

/// Structural or syntactic decode failures
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Malformed XML
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed or duplicated attribute
    #[error("XML attribute error: {0}")]
    Attribute(#[from] AttrError),

    /// Names or CDATA that are not valid UTF-8
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The input holds no element at all
    #[error("document has no root element")]
    MissingRoot,

    /// Input ended while an element was still open
    #[error("unexpected end of input inside <{element}>")]
    UnexpectedEof { element: String },

    /// An element other than the one the mapping expects
    #[error("expected element <{expected}> but found <{found}>")]
    UnexpectedElement {
        expected: &'static str,
        found: String,
    },

    /// A child that may occur once appeared again
    #[error("element <{parent}> contains more than one <{child}>")]
    DuplicateChild {
        parent: &'static str,
        child: &'static str,
    },
}

/// Result type for TMX operations
pub type Result<T> = std::result::Result<T, TmxError>;
