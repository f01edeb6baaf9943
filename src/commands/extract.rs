//! Extract command: print the source text of every matching definition.

use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::index::{IndexStore, JsonlStore};
use crate::locator::Locator;

pub async fn run(name: &str, root: &Path) -> Result<()> {
    let config = Config::load(root)?;
    let index = JsonlStore::new().load(&config.index_path(root))?;
    let locator = Locator::new(index, root.to_path_buf());

    let mut diagnostics = Diagnostics::new();
    let results = locator.extract(name, &mut diagnostics);

    if results.is_empty() && diagnostics.is_empty() {
        println!("No definition of '{}' found in the index.", name);
        return Ok(());
    }

    for extraction in &results {
        println!("// {}", extraction.file);
        println!("{}\n", extraction.code);
    }

    diagnostics.print_summary();
    Ok(())
}
