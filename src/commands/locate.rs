//! Locate command: print where a function is defined.

use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::index::{IndexStore, JsonlStore};
use crate::locator::Locator;

pub async fn run(name: &str, root: &Path) -> Result<()> {
    let config = Config::load(root)?;
    let index = JsonlStore::new().load(&config.index_path(root))?;
    let locator = Locator::new(index, root.to_path_buf());

    let records = locator.locate(name);
    if records.is_empty() {
        println!("No definition of '{}' found in the index.", name);
        return Ok(());
    }

    for record in records {
        let (start, end) = record.line_span();
        println!("{}:{}-{}", record.file, start, end);
    }
    Ok(())
}
