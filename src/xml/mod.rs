//! Minimal XML tree reader/writer for schema documents
//!
//! Schema documents only use a small slice of XML: nested elements with
//! attributes, comments, and the five predefined entities. This module
//! implements exactly that slice, with a writer whose output is stable
//! (two-space indentation, self-closing empty elements) so that a document
//! produced by [`write_document`] re-parses and re-writes byte-identically.

mod read;
mod write;

pub use read::parse_document;
pub use write::write_document;

use crate::error::{Error, Result};

/// One element of a schema document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element name (`database`, `table`, a column type token, or `case`)
    pub name: String,
    /// Attributes in document order
    attributes: Vec<(String, String)>,
    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Look up an attribute, failing with `MissingAttribute` if absent
    pub fn require_attribute(&self, name: &str) -> Result<&str> {
        self.attribute(name)
            .ok_or_else(|| Error::missing_attribute(&self.name, name))
    }

    /// Append an attribute. Order is preserved on output.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }

    /// Attributes in document order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_lookup() {
        let mut el = Element::new("table");
        el.set_attribute("name", "Patients");
        el.set_attribute("file", "patients.dat");

        assert_eq!(el.attribute("name"), Some("Patients"));
        assert_eq!(el.attribute("file"), Some("patients.dat"));
        assert_eq!(el.attribute("missing"), None);
    }

    #[test]
    fn test_require_attribute_error_names_element() {
        let el = Element::new("table");
        let err = el.require_attribute("file").unwrap_err();
        match err {
            Error::MissingAttribute { element, attribute } => {
                assert_eq!(element, "table");
                assert_eq!(attribute, "file");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
