//! Persistence contract for the function index.
//!
//! The index is stored as JSON lines: one record per line with `name`,
//! `file`, `start_line` and `end_line` fields. The format is deliberately
//! flat and language-neutral instead of a serialized parse tree, so the file
//! is greppable and no parser internals leak into the on-disk format.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{FunctionIndex, FunctionRecord};

/// Errors from loading or saving an index.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("index file not found: {0}")]
    NotFound(PathBuf),

    #[error("index I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed index record at line {line}: {source}")]
    Malformed {
        line: usize,
        source: serde_json::Error,
    },
}

/// Storage interface for a [`FunctionIndex`].
///
/// The core only needs save and load; where the bytes go is an implementation
/// decision behind this trait.
pub trait IndexStore {
    fn save(&self, index: &FunctionIndex, destination: &Path) -> Result<(), StorageError>;
    fn load(&self, source: &Path) -> Result<FunctionIndex, StorageError>;
}

/// JSON-lines index store.
#[derive(Debug, Default)]
pub struct JsonlStore;

impl JsonlStore {
    pub fn new() -> Self {
        Self
    }
}

impl IndexStore for JsonlStore {
    fn save(&self, index: &FunctionIndex, destination: &Path) -> Result<(), StorageError> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out = Vec::new();
        for record in index.records() {
            // Records are plain data; serializing them cannot fail.
            let line =
                serde_json::to_string(record).expect("function record serializes to JSON");
            out.extend_from_slice(line.as_bytes());
            out.push(b'\n');
        }

        let mut file = fs::File::create(destination)?;
        file.write_all(&out)?;
        Ok(())
    }

    fn load(&self, source: &Path) -> Result<FunctionIndex, StorageError> {
        if !source.exists() {
            return Err(StorageError::NotFound(source.to_path_buf()));
        }

        let content = fs::read_to_string(source)?;
        let mut index = FunctionIndex::new();

        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: FunctionRecord =
                serde_json::from_str(line).map_err(|source| StorageError::Malformed {
                    line: i + 1,
                    source,
                })?;
            index.push(record);
        }

        Ok(index)
    }
}
