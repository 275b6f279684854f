//! Read-only access to backing data files
//!
//! A [`DataDir`] resolves table file names against a base directory and hands
//! back the file's bytes. Files are memory-mapped where possible and read
//! into a buffer otherwise; either way the bytes are immutable for the
//! lifetime of the extraction.

use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::error::{Error, Result};

/// Base directory for a database's data files
///
/// Passed explicitly into every extraction, so independent tables and
/// databases can be extracted concurrently against different directories.
#[derive(Debug, Clone)]
pub struct DataDir {
    base: PathBuf,
}

impl DataDir {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        DataDir { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Open `file_name` relative to the base directory and return its bytes
    pub fn open(&self, file_name: &str) -> Result<FileBytes> {
        let path = self.base.join(file_name);
        let file = File::open(&path).map_err(|source| Error::FileRead {
            path: path.clone(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| Error::FileRead {
                path: path.clone(),
                source,
            })?
            .len();

        if len == 0 {
            return Ok(FileBytes(Repr::Buffered(Vec::new())));
        }

        // SAFETY: the mapping is read-only, and extraction never mutates the
        // file while the map is alive. A concurrent writer truncating the
        // file out from under us is outside this crate's contract.
        match unsafe { Mmap::map(&file) } {
            Ok(map) => {
                tracing::debug!(path = %path.display(), len, "mapped data file");
                Ok(FileBytes(Repr::Mapped(map)))
            }
            Err(_) => {
                let bytes = std::fs::read(&path).map_err(|source| Error::FileRead {
                    path: path.clone(),
                    source,
                })?;
                tracing::debug!(path = %path.display(), len, "buffered data file");
                Ok(FileBytes(Repr::Buffered(bytes)))
            }
        }
    }
}

/// The full contents of one data file
#[derive(Debug)]
pub struct FileBytes(Repr);

#[derive(Debug)]
enum Repr {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl std::ops::Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match &self.0 {
            Repr::Mapped(map) => map,
            Repr::Buffered(bytes) => bytes,
        }
    }
}
