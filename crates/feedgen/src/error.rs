//! Error types for feed rendering.

use std::string::FromUtf8Error;

use feedgen_xml::XmlError;

/// Error during feed rendering.
///
/// Any field failure aborts the whole render; no partial feed is returned.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FeedError {
    /// Media URL could not be parsed while deriving its MIME type.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Parse failure.
        source: url::ParseError,
    },

    /// Tree printing error.
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Encoded output was not valid UTF-8.
    #[error("UTF-8 error")]
    Utf8(#[from] FromUtf8Error),
}
