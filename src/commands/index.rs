//! Index command: build the function index and persist it.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::index::{IndexStore, JsonlStore};
use crate::indexer::Indexer;

pub async fn run(root: &Path) -> Result<()> {
    let config = Config::load(root)?;
    let mut indexer = Indexer::new(config.indexer.clone())?;
    let mut diagnostics = Diagnostics::new();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(format!("Indexing {}", root.display()));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let started = Instant::now();
    let index = indexer.build_index(root, &mut diagnostics)?;
    spinner.finish_and_clear();

    let index_path = config.index_path(root);
    JsonlStore::new().save(&index, &index_path)?;

    println!(
        "Indexed {} definitions across {} files in {:.2}s",
        index.len(),
        index.file_count(),
        started.elapsed().as_secs_f64()
    );
    println!("Index written to {}", index_path.display());

    diagnostics.print_summary();
    Ok(())
}
