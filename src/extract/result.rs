//! The decoded output grid of one extraction
//!
//! Cell text lives in a `bumpalo` arena supplied by the caller: one
//! allocation block serves many small cells, oversized cells get their own
//! block, and dropping the arena releases everything at once. Because each
//! extraction uses its own arena, extractions of independent tables can run
//! concurrently.

use bumpalo::Bump;

/// A dense row-major grid of decoded cell text
///
/// Immutable once built; borrows the arena the cells were allocated in.
#[derive(Debug)]
pub struct ResultSet<'a> {
    rows: usize,
    columns: usize,
    cells: Vec<&'a str>,
}

impl<'a> ResultSet<'a> {
    pub(crate) fn from_cells(rows: usize, columns: usize, cells: Vec<&'a str>) -> Self {
        debug_assert_eq!(cells.len(), rows * columns);
        ResultSet {
            rows,
            columns,
            cells,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// The cells of row `index`, in column order
    pub fn row(&self, index: usize) -> Option<&[&'a str]> {
        if index >= self.rows || self.columns == 0 {
            return None;
        }
        let start = index * self.columns;
        Some(&self.cells[start..start + self.columns])
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&'a str> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        Some(self.cells[row * self.columns + column])
    }

    /// Iterate rows in order
    pub fn rows(&self) -> impl Iterator<Item = &[&'a str]> {
        self.cells.chunks_exact(self.columns.max(1)).take(self.rows)
    }
}

/// Arena capacity hint for a grid of the given shape; most cells are short.
pub fn arena_capacity_hint(rows: usize, columns: usize) -> usize {
    rows * columns * 5
}

/// Copy `text` into the arena, returning an arena-backed slice.
pub(crate) fn intern<'a>(arena: &'a Bump, text: &str) -> &'a str {
    arena.alloc_str(text)
}
