//! Enumeration cases for `enum`-typed columns
//!
//! An enumeration maps small integer case IDs, as stored in the data file,
//! to display strings. IDs are unique and at most 255 cases may exist.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Maximum number of cases one enumeration may hold
pub const MAX_CASES: usize = 255;

/// Mapping from one-byte case IDs to display values, owned by a column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enumeration {
    cases: BTreeMap<u8, String>,
}

impl Enumeration {
    /// Create an empty enumeration
    pub fn new() -> Self {
        Enumeration::default()
    }

    /// Add a case under the lowest unused ID and return that ID
    pub fn add_case(&mut self, value: impl Into<String>) -> Result<u8> {
        if self.cases.len() >= MAX_CASES {
            return Err(Error::MaxCasesExceeded);
        }
        // The capacity check above guarantees a free ID exists.
        let id = (0..=u8::MAX)
            .find(|id| !self.cases.contains_key(id))
            .expect("enumeration below capacity has a free ID");
        self.cases.insert(id, value.into());
        Ok(id)
    }

    /// Add a case under an explicit ID
    pub fn add_case_with_id(&mut self, id: u8, value: impl Into<String>) -> Result<()> {
        if self.cases.len() >= MAX_CASES {
            return Err(Error::MaxCasesExceeded);
        }
        if self.cases.contains_key(&id) {
            return Err(Error::DuplicateEnumId(id));
        }
        self.cases.insert(id, value.into());
        Ok(())
    }

    /// Move a case to a new ID. Fails if the new ID is taken, leaving the
    /// enumeration unchanged. Moving a nonexistent case is a no-op.
    pub fn change_id(&mut self, id: u8, new_id: u8) -> Result<()> {
        if id == new_id {
            return Ok(());
        }
        if self.cases.contains_key(&new_id) {
            return Err(Error::DuplicateEnumId(new_id));
        }
        if let Some(value) = self.cases.remove(&id) {
            self.cases.insert(new_id, value);
        }
        Ok(())
    }

    /// Set the display value for an ID, inserting the case if absent
    pub fn change_value(&mut self, id: u8, value: impl Into<String>) {
        self.cases.insert(id, value.into());
    }

    /// Remove a case. Removing a nonexistent ID is a no-op.
    pub fn remove_id(&mut self, id: u8) {
        self.cases.remove(&id);
    }

    /// Look up the display value for an ID
    pub fn value(&self, id: u8) -> Option<&str> {
        self.cases.get(&id).map(String::as_str)
    }

    /// Number of cases
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Cases in ascending ID order
    pub fn cases(&self) -> impl Iterator<Item = (u8, &str)> {
        self.cases.iter().map(|(id, value)| (*id, value.as_str()))
    }

    /// Discard all cases
    pub fn clear(&mut self) {
        self.cases.clear();
    }
}
