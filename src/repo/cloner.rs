use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::Repository;
use tracing::info;

/// Derive the checkout directory name from a repository URL.
///
/// `https://host/org/project.git` becomes `project`.
pub fn repo_name_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url)
        .trim_end_matches(".git")
        .to_string()
}

/// Clone `url` into `dest_dir/<name>`, reusing an existing checkout.
pub fn clone_repo(url: &str, dest_dir: &Path) -> Result<PathBuf> {
    let repo_path = dest_dir.join(repo_name_from_url(url));

    if repo_path.exists() {
        info!("repository already exists at {}", repo_path.display());
        return Ok(repo_path);
    }

    std::fs::create_dir_all(dest_dir)
        .with_context(|| format!("failed to create {}", dest_dir.display()))?;

    info!("cloning {} into {}", url, repo_path.display());
    Repository::clone(url, &repo_path).with_context(|| format!("failed to clone {}", url))?;
    info!("clone complete");

    Ok(repo_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_repo_name_from_url() {
        assert_eq!(repo_name_from_url("https://github.com/org/proj.git"), "proj");
        assert_eq!(repo_name_from_url("https://github.com/org/proj"), "proj");
        assert_eq!(repo_name_from_url("https://github.com/org/proj/"), "proj");
        assert_eq!(repo_name_from_url("git@host:org/proj.git"), "proj");
    }

    #[test]
    fn test_existing_checkout_is_reused() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("proj");
        fs::create_dir_all(&existing).unwrap();

        let path = clone_repo("https://example.invalid/org/proj.git", dir.path()).unwrap();
        assert_eq!(path, existing);
    }
}
