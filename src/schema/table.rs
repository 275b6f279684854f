//! Table descriptors: a binary file, its row geometry, and its columns

use crate::error::Result;
use crate::xml::Element;

use super::column::{Column, ColumnType};
use super::parse_u32_attribute;

/// Describes one binary record file and how to cut it into rows
///
/// A `row_length` of 0 marks a variable-length table: each row carries its
/// own total length in a four-byte field two bytes into the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    file_name: String,
    data_offset: u32,
    row_length: u32,
    columns: Vec<Column>,
}

impl Default for Table {
    fn default() -> Self {
        Table {
            name: String::new(),
            file_name: String::new(),
            data_offset: 0,
            row_length: 1,
            columns: Vec::new(),
        }
    }
}

impl Table {
    pub fn new(
        name: impl Into<String>,
        file_name: impl Into<String>,
        data_offset: u32,
        row_length: u32,
    ) -> Self {
        Table {
            name: name.into(),
            file_name: file_name.into(),
            data_offset,
            row_length,
            columns: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Name of the backing data file, resolved against a
    /// [`DataDir`](crate::extract::DataDir) at extraction time
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn set_file_name(&mut self, file_name: impl Into<String>) {
        self.file_name = file_name.into();
    }

    /// Absolute offset of the first row within the data file
    pub fn data_offset(&self) -> u32 {
        self.data_offset
    }

    pub fn set_data_offset(&mut self, data_offset: u32) {
        self.data_offset = data_offset;
    }

    /// Fixed byte stride between rows, or 0 for variable-length rows
    pub fn row_length(&self) -> u32 {
        self.row_length
    }

    pub fn set_row_length(&mut self, row_length: u32) {
        self.row_length = row_length;
    }

    pub fn is_variable_length(&self) -> bool {
        self.row_length == 0
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Columns in declaration order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn column_at_mut(&mut self, index: usize) -> Option<&mut Column> {
        self.columns.get_mut(index)
    }

    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Remove the column at `index`, shifting later columns down.
    /// Out-of-range indices are ignored.
    pub fn remove_column(&mut self, index: usize) {
        if index < self.columns.len() {
            self.columns.remove(index);
        }
    }

    /// Reset to the default-constructed state
    pub fn clear(&mut self) {
        *self = Table::default();
    }

    /// Build a table from its `<table>` element. A `varstring` column forces
    /// the table into variable-length mode.
    pub(crate) fn from_xml(element: &Element) -> Result<Table> {
        let name = element.require_attribute("name")?.to_owned();
        let file_name = element.require_attribute("file")?.to_owned();
        let data_offset = parse_u32_attribute(element, "data_offset")?;
        let mut row_length = parse_u32_attribute(element, "row_length")?;

        let mut columns = Vec::with_capacity(element.children.len());
        for child in &element.children {
            let column = Column::from_xml(child)?;
            if column.column_type() == ColumnType::VarString {
                row_length = 0;
            }
            columns.push(column);
        }

        Ok(Table {
            name,
            file_name,
            data_offset,
            row_length,
            columns,
        })
    }

    pub(crate) fn to_xml(&self) -> Element {
        let mut element = Element::new("table");
        element.set_attribute("name", &self.name);
        element.set_attribute("file", &self.file_name);
        element.set_attribute("data_offset", self.data_offset.to_string());
        element.set_attribute("row_length", self.row_length.to_string());
        for column in &self.columns {
            element.children.push(column.to_xml());
        }
        element
    }
}
