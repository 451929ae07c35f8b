//! File-based record source.
//!
//! Reads a JSONL file once, at construction. The lines are handed out on the
//! first drain; later drains return nothing.

use crate::model::error::InputError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Read-once JSONL file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    pending: Vec<String>,
}

impl FileSource {
    /// Open and read the whole file.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` for other I/O errors.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let reader = BufReader::new(File::open(path)?);
        let pending = reader.lines().collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            path: path.to_path_buf(),
            pending,
        })
    }

    /// Path the records were read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take every line not handed out yet.
    pub fn drain_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }
}
