//! Column descriptors and the closed set of column types

use crate::error::{Error, Result};
use crate::xml::Element;

use super::enumeration::Enumeration;
use super::parse_u32_attribute;

/// The type of data a column holds
///
/// All multi-byte encodings are little-endian. The `token` strings double as
/// the element names in schema documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Type not yet determined; decodes to the literal "unknown"
    #[default]
    Unknown,
    /// One byte, zero is false
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    /// Fixed span of raw bytes, rendered as hex pairs
    Blob,
    /// Fixed-length, NUL-terminated or padded string
    String,
    /// Variable-length string sized by the row's own length field
    VarString,
    /// Packed ASCII phone number, 7 or 10 digits
    Phone,
    /// Day count since 1700-02-28
    Date,
    /// Fixed-point cents in a signed 32-bit integer
    Currency,
    /// One-byte case ID resolved through the column's enumeration
    Enum,
}

impl ColumnType {
    /// Every type, in schema-document token order
    pub const ALL: [ColumnType; 15] = [
        ColumnType::Unknown,
        ColumnType::Bool,
        ColumnType::Int8,
        ColumnType::UInt8,
        ColumnType::Int16,
        ColumnType::UInt16,
        ColumnType::Int32,
        ColumnType::UInt32,
        ColumnType::Blob,
        ColumnType::String,
        ColumnType::VarString,
        ColumnType::Phone,
        ColumnType::Date,
        ColumnType::Currency,
        ColumnType::Enum,
    ];

    /// The short name used as this type's element name in schema documents
    pub fn token(self) -> &'static str {
        match self {
            ColumnType::Unknown => "unknown",
            ColumnType::Bool => "bool",
            ColumnType::Int8 => "int8",
            ColumnType::UInt8 => "uint8",
            ColumnType::Int16 => "int16",
            ColumnType::UInt16 => "uint16",
            ColumnType::Int32 => "int32",
            ColumnType::UInt32 => "uint32",
            ColumnType::Blob => "blob",
            ColumnType::String => "string",
            ColumnType::VarString => "varstring",
            ColumnType::Phone => "phone",
            ColumnType::Date => "date",
            ColumnType::Currency => "currency",
            ColumnType::Enum => "enum",
        }
    }

    /// Resolve a schema-document token, case-sensitively
    pub fn from_token(token: &str) -> Option<ColumnType> {
        Self::ALL.iter().copied().find(|ty| ty.token() == token)
    }

    /// Whether columns of this type carry a meaningful `length`
    pub fn needs_length(self) -> bool {
        matches!(self, ColumnType::Blob | ColumnType::String)
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// One field of a table's row layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Column {
    name: String,
    ty: ColumnType,
    offset: u32,
    length: u32,
    indexed: bool,
    /// Case mapping, meaningful for `enum`-typed columns
    pub enumeration: Enumeration,
}

impl Column {
    /// Create a column. `length` is kept only for types that use it and is
    /// zeroed otherwise.
    pub fn new(
        name: impl Into<String>,
        ty: ColumnType,
        offset: u32,
        length: u32,
        indexed: bool,
    ) -> Self {
        Column {
            name: name.into(),
            ty,
            offset,
            length: if ty.needs_length() { length } else { 0 },
            indexed,
            enumeration: Enumeration::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn column_type(&self) -> ColumnType {
        self.ty
    }

    pub fn set_column_type(&mut self, ty: ColumnType) {
        self.ty = ty;
    }

    /// Byte offset of this column from the start of each row
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: u32) {
        self.offset = offset;
    }

    /// Element count, meaningful only when [`ColumnType::needs_length`] holds
    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn set_length(&mut self, length: u32) {
        self.length = length;
    }

    /// Whether a relational output adapter should index this column
    pub fn indexed(&self) -> bool {
        self.indexed
    }

    pub fn set_indexed(&mut self, indexed: bool) {
        self.indexed = indexed;
    }

    pub fn needs_length(&self) -> bool {
        self.ty.needs_length()
    }

    /// Build a column from its schema-document element. The element name is
    /// the type token; an unrecognized name is rejected.
    pub(crate) fn from_xml(element: &Element) -> Result<Column> {
        let ty = ColumnType::from_token(&element.name).ok_or_else(|| {
            Error::Parse(format!("unrecognized column element <{}>", element.name))
        })?;

        let name = element.require_attribute("name")?.to_owned();
        let offset = parse_u32_attribute(element, "offset")?;

        let length = if ty.needs_length() {
            let length = parse_u32_attribute(element, "length")?;
            if length < 1 {
                let raw = element.attribute("length").unwrap_or_default();
                return Err(Error::invalid_attribute("length", raw));
            }
            length
        } else {
            0
        };

        let indexed = element.attribute("indexed") == Some("true");

        let mut column = Column {
            name,
            ty,
            offset,
            length,
            indexed,
            enumeration: Enumeration::new(),
        };

        if ty == ColumnType::Enum {
            for case in &element.children {
                if case.name != "case" {
                    return Err(Error::Parse(format!(
                        "unexpected element <{}> inside <enum>",
                        case.name
                    )));
                }
                let raw_id = case.require_attribute("id")?;
                let id: u8 = raw_id
                    .trim()
                    .parse::<i64>()
                    .ok()
                    .filter(|id| (0..=255).contains(id))
                    .map(|id| id as u8)
                    .ok_or_else(|| Error::invalid_attribute("id", raw_id))?;
                let value = case.require_attribute("value")?;
                column.enumeration.add_case_with_id(id, value)?;
            }
        } else if !element.children.is_empty() {
            return Err(Error::Parse(format!(
                "column element <{}> cannot have children",
                element.name
            )));
        }

        Ok(column)
    }

    /// Serialize to a schema-document element named after the type token
    pub(crate) fn to_xml(&self) -> Element {
        let mut element = Element::new(self.ty.token());
        element.set_attribute("name", &self.name);
        element.set_attribute("offset", self.offset.to_string());
        if self.needs_length() {
            element.set_attribute("length", self.length.to_string());
        }
        if self.indexed {
            element.set_attribute("indexed", "true");
        }
        if self.ty == ColumnType::Enum {
            for (id, value) in self.enumeration.cases() {
                let mut case = Element::new("case");
                case.set_attribute("id", id.to_string());
                case.set_attribute("value", value);
                element.children.push(case);
            }
        }
        element
    }
}
