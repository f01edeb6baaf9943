//! Repository acquisition.
//!
//! The indexer and locator only ever see a readable directory; this module is
//! the thin glue that produces one from a remote URL.

pub mod cloner;

pub use cloner::{clone_repo, repo_name_from_url};
