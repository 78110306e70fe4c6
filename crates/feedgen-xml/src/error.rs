//! Error types for tree construction and printing.

use std::string::FromUtf8Error;

/// Error building or printing an element tree.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum XmlError {
    /// Branch node constructed without children and without attributes.
    #[error("element <{name}> needs child elements or attributes")]
    EmptyBranch {
        /// Element name.
        name: String,
    },

    /// Writer I/O error.
    #[error("XML write error")]
    Io(#[from] std::io::Error),

    /// Writer error.
    #[error("XML error")]
    Xml(#[from] quick_xml::Error),

    /// Printed bytes were not valid UTF-8.
    #[error("UTF-8 error")]
    Utf8(#[from] FromUtf8Error),
}
