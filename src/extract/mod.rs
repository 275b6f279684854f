//! Turning a table definition plus a binary file into a grid of text
//!
//! Extraction is synchronous and single-pass: map the backing file, locate
//! every row, decode every (row, column) pair, and intern the decoded text
//! in the caller's arena. All failures are terminal; no partial grid is ever
//! returned.

mod decode;
mod locate;
mod result;
mod source;

pub use decode::decode_cell;
pub use locate::locate_rows;
pub use result::{arena_capacity_hint, ResultSet};
pub use source::{DataDir, FileBytes};

use bumpalo::Bump;

use crate::error::Result;
use crate::schema::Table;

impl Table {
    /// Extract this table's data from its backing file under `dir`.
    ///
    /// A `row_limit` of 0 means all rows; otherwise only the first
    /// `row_limit` rows are extracted. Cell text is allocated in `arena`,
    /// which the returned grid borrows.
    pub fn extract<'a>(
        &self,
        dir: &DataDir,
        arena: &'a Bump,
        row_limit: u32,
    ) -> Result<ResultSet<'a>> {
        let data = dir.open(self.file_name())?;
        let rows = locate::locate_rows(self, &data, row_limit)?;

        tracing::debug!(
            table = self.name(),
            rows = rows.len(),
            columns = self.column_count(),
            "extracting table"
        );

        let mut cells = Vec::with_capacity(rows.len() * self.column_count());
        let mut scratch = String::new();
        for range in &rows {
            let row = &data[range.clone()];
            for column in self.columns() {
                decode::decode_cell(column, row, &mut scratch)?;
                cells.push(result::intern(arena, &scratch));
            }
        }

        Ok(ResultSet::from_cells(rows.len(), self.column_count(), cells))
    }
}
