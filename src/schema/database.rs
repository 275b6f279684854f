//! Databases: named, sorted collections of tables plus the schema codec

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::xml::{self, Element};

use super::table::Table;

/// An ordered collection of tables, kept sorted by table name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    name: String,
    tables: Vec<Table>,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Self {
        Database {
            name: name.into(),
            tables: Vec::new(),
        }
    }

    /// Read and decode a schema document from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Database> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_owned(),
            source,
        })?;
        text.parse()
    }

    /// Encode and write the schema document to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_xml()).map_err(|source| Error::FileWrite {
            path: path.to_owned(),
            source,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Tables in name order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table_at(&self, index: usize) -> Option<&Table> {
        self.tables.get(index)
    }

    pub fn table_at_mut(&mut self, index: usize) -> Option<&mut Table> {
        self.tables.get_mut(index)
    }

    /// Insert a table, restoring the by-name ordering
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
        self.tables.sort_by(|a, b| a.name().cmp(b.name()));
    }

    /// Remove the table at `index`. Out-of-range indices are ignored.
    pub fn remove_table(&mut self, index: usize) {
        if index < self.tables.len() {
            self.tables.remove(index);
        }
    }

    /// Drop all tables and the database name
    pub fn clear(&mut self) {
        self.tables.clear();
        self.name.clear();
    }

    /// Encode the schema document. The output round-trips byte-identically
    /// through [`Database::from_str`].
    pub fn to_xml(&self) -> String {
        let mut root = Element::new("database");
        root.set_attribute("name", &self.name);
        for table in &self.tables {
            root.children.push(table.to_xml());
        }
        xml::write_document(&root)
    }
}

impl FromStr for Database {
    type Err = Error;

    /// Decode a schema document. Nothing is returned on failure, so a caller
    /// never observes a partially-built database.
    fn from_str(text: &str) -> Result<Database> {
        let root = xml::parse_document(text)?;
        if root.name != "database" {
            return Err(Error::Parse(format!(
                "expected <database> root element, found <{}>",
                root.name
            )));
        }
        let name = root.require_attribute("name")?.to_owned();

        let mut database = Database::new(name);
        for child in &root.children {
            if child.name != "table" {
                return Err(Error::Parse(format!(
                    "unexpected element <{}> inside <database>",
                    child.name
                )));
            }
            database.add_table(Table::from_xml(child)?);
        }
        Ok(database)
    }
}
