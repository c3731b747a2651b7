//! Protocol error types.

use thiserror::Error;
use veazzy_core::AddressError;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while decoding or encoding control messages.
///
/// Recoverable problems (a non-numeric status body, a missing body, an
/// unknown attribute) are not errors; they are reported as
/// [`Diagnostic`](crate::Diagnostic)s on a successful decode.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// An address-typed attribute could not be parsed.
    #[error("invalid address in '{attribute}' attribute: {source}")]
    InvalidAddress {
        attribute: String,
        #[source]
        source: AddressError,
    },

    /// The XML token stream is malformed.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute of the payload element is malformed.
    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// IO error while writing a stanza.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Written stanza is not valid UTF-8.
    #[error("stanza is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The document contains no payload element.
    #[error("no payload element found")]
    MissingElement,

    /// The document ended before the payload element was closed.
    #[error("document ended before </{element}>")]
    UnexpectedEof { element: String },
}

impl ProtocolError {
    /// Creates an invalid address error.
    pub fn invalid_address(attribute: impl Into<String>, source: AddressError) -> Self {
        Self::InvalidAddress {
            attribute: attribute.into(),
            source,
        }
    }
}
