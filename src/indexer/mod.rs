//! Repository indexer: walk, parse, record.
//!
//! One pass over the repository produces a complete [`FunctionIndex`].
//! Per-file failures are diagnostics, never fatal; only an unreadable root
//! aborts the pass.

pub mod parser;
pub mod walker;

use std::path::Path;

use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::config::IndexerConfig;
use crate::diagnostics::{Diagnostics, Stage};
use crate::index::{FunctionIndex, FunctionRecord};

pub use parser::{FunctionDef, PythonParser};
pub use walker::Walker;

/// Builds a [`FunctionIndex`] from a repository root.
pub struct Indexer {
    config: IndexerConfig,
    parser: PythonParser,
}

impl Indexer {
    pub fn new(config: IndexerConfig) -> Result<Self> {
        Ok(Self {
            parser: PythonParser::new()?,
            config,
        })
    }

    /// Walk `root` and index every function definition found.
    ///
    /// Files are visited in lexical path order, so records for a given name
    /// appear in file order, then source order within a file. Files that fail
    /// to read or parse are skipped and reported through `diagnostics`.
    pub fn build_index(&mut self, root: &Path, diagnostics: &mut Diagnostics) -> Result<FunctionIndex> {
        if !root.is_dir() {
            bail!("repository root is not a readable directory: {}", root.display());
        }

        let files = Walker::new(root.to_path_buf(), &self.config).collect_files();
        info!("indexing {} files under {}", files.len(), root.display());

        let mut index = FunctionIndex::new();

        for file in &files {
            let rel = relative_key(root, file);

            let source = match std::fs::read_to_string(file) {
                Ok(source) => source,
                Err(e) => {
                    diagnostics.record(rel, Stage::FileRead, e.to_string());
                    continue;
                }
            };

            let defs = match self.parser.parse_functions(&source) {
                Ok(defs) => defs,
                Err(e) => {
                    diagnostics.record(rel, Stage::Parse, e.to_string());
                    continue;
                }
            };

            debug!("{}: {} definitions", rel, defs.len());
            for def in defs {
                index.push(FunctionRecord {
                    name: def.name,
                    file: rel.clone(),
                    start_line: def.start_line,
                    end_line: Some(def.end_line),
                });
            }
        }

        info!(
            "indexed {} definitions across {} files",
            index.len(),
            index.file_count()
        );
        Ok(index)
    }
}

/// Repository-relative path with forward-slash separators, so records are
/// portable across platforms.
fn relative_key(root: &Path, file: &Path) -> String {
    let rel = file.strip_prefix(root).unwrap_or(file);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
