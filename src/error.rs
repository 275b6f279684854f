//! Error types for schema parsing and data extraction
//!
//! Every failure is terminal for the operation in progress. Errors carry
//! enough context (file path, attribute name, offending value) to render a
//! user-facing message without further lookup.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the siphon engine
#[derive(Error, Debug)]
pub enum Error {
    /// A data or schema file could not be opened or read
    #[error("cannot read '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A schema file could not be written
    #[error("cannot write '{}': {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The schema document is not well-formed
    #[error("malformed schema document: {0}")]
    Parse(String),

    /// A required attribute is absent from a schema element
    #[error("element <{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    /// An attribute is present but its value does not parse
    #[error("attribute '{attribute}' has invalid value '{value}'")]
    InvalidAttribute { attribute: String, value: String },

    /// Two enumeration cases share an ID
    #[error("duplicate enumeration case ID {0}")]
    DuplicateEnumId(u8),

    /// An enumeration would grow past 255 cases
    #[error("an enumeration may hold at most 255 cases")]
    MaxCasesExceeded,

    /// Binary row data failed validation during extraction
    #[error("corrupt row data: {0}")]
    Corrupt(String),
}

impl Error {
    pub(crate) fn missing_attribute(element: &str, attribute: &str) -> Self {
        Error::MissingAttribute {
            element: element.to_owned(),
            attribute: attribute.to_owned(),
        }
    }

    pub(crate) fn invalid_attribute(attribute: &str, value: &str) -> Self {
        Error::InvalidAttribute {
            attribute: attribute.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// Result type for siphon operations
pub type Result<T> = std::result::Result<T, Error>;
