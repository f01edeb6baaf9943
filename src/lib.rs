pub mod cli;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod index;
pub mod indexer;
pub mod locator;
pub mod logging;
pub mod repo;
pub mod summarizer;

pub use config::Config;
pub use diagnostics::{Diagnostic, Diagnostics, Stage};
pub use index::{FunctionIndex, FunctionRecord, IndexStore, JsonlStore, StorageError};
pub use indexer::Indexer;
pub use locator::{Extraction, Locator};
