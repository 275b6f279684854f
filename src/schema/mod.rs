//! The schema data model and its document codec
//!
//! A [`Database`] holds [`Table`]s, which hold [`Column`]s, which may hold an
//! [`Enumeration`]. The whole graph is value-typed: adding a table or column
//! copies it, and discarding a column discards its enumeration. The textual
//! schema document format is decoded with [`str::parse`] /
//! [`Database::from_file`] and encoded with [`Database::to_xml`] /
//! [`Database::save`].

mod column;
mod database;
mod enumeration;
mod table;

pub use column::{Column, ColumnType};
pub use database::Database;
pub use enumeration::{Enumeration, MAX_CASES};
pub use table::Table;

use crate::error::{Error, Result};
use crate::xml::Element;

/// Parse a required attribute as decimal `u32`.
fn parse_u32_attribute(element: &Element, name: &str) -> Result<u32> {
    let raw = element.require_attribute(name)?;
    raw.trim()
        .parse()
        .map_err(|_| Error::invalid_attribute(name, raw))
}
