//! Clone command: fetch a remote repository so it can be indexed.

use std::path::Path;

use anyhow::Result;

use crate::repo::clone_repo;

pub async fn run(url: &str, dest: &Path) -> Result<()> {
    let path = clone_repo(url, dest)?;
    println!("Repository ready at {}", path.display());
    Ok(())
}
