//! Siphon - schema-driven extraction of tabular data from binary record files
//!
//! A user-authored schema document describes how a proprietary binary file is
//! laid out: tables, their row geometry, and each column's type and byte
//! offset. This crate decodes that schema, cuts the backing files into rows
//! (fixed stride or self-describing variable length), and renders every cell
//! as display text in an arena-backed result grid.
//!
//! ```no_run
//! use bumpalo::Bump;
//! use siphon::{DataDir, Database};
//!
//! # fn main() -> siphon::Result<()> {
//! let db = Database::from_file("clinic.xml")?;
//! let dir = DataDir::new("/srv/clinic/data");
//!
//! let arena = Bump::new();
//! for table in db.tables() {
//!     let grid = table.extract(&dir, &arena, 0)?;
//!     for row in grid.rows() {
//!         println!("{}", row.join("\t"));
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extract;
pub mod schema;
pub mod xml;

pub use error::{Error, Result};
pub use extract::{DataDir, ResultSet};
pub use schema::{Column, ColumnType, Database, Enumeration, Table};
