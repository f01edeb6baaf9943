use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::PathBuf;

use ignore::WalkBuilder;

use crate::config::IndexerConfig;

/// Walks a repository root respecting .gitignore and the configured ignore
/// patterns, yielding only files with a recognized source extension.
pub struct Walker {
    root: PathBuf,
    extensions: HashSet<String>,
    ignore_patterns: Vec<String>,
}

impl Walker {
    pub fn new(root: PathBuf, config: &IndexerConfig) -> Self {
        Self {
            root,
            extensions: config.extensions.iter().cloned().collect(),
            ignore_patterns: config.ignore_patterns.clone(),
        }
    }

    fn walk(&self) -> impl Iterator<Item = PathBuf> + '_ {
        let mut builder = WalkBuilder::new(&self.root);
        builder.git_ignore(true);
        builder.git_global(true);
        builder.git_exclude(true);
        builder.hidden(true);

        builder
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .filter(|entry| {
                let path_str = entry.path().to_string_lossy();
                !self
                    .ignore_patterns
                    .iter()
                    .any(|pattern| path_str.contains(pattern.as_str()))
            })
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(OsStr::to_str)
                    .map(|ext| self.extensions.contains(ext))
                    .unwrap_or(false)
            })
            .map(|entry| entry.into_path())
    }

    /// All eligible files in lexical path order.
    ///
    /// Sorting makes discovery order (and therefore index record order)
    /// deterministic across runs and platforms.
    pub fn collect_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self.walk().collect();
        files.sort();
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn test_config() -> IndexerConfig {
        IndexerConfig {
            extensions: vec!["py".to_string()],
            ignore_patterns: vec!["__pycache__".to_string()],
        }
    }

    #[test]
    fn test_walker_finds_python_files_only() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();

        fs::write(src.join("app.py"), "def main(): pass\n").unwrap();
        fs::write(src.join("util.py"), "def helper(): pass\n").unwrap();
        fs::write(src.join("readme.md"), "# Readme\n").unwrap();

        let walker = Walker::new(dir.path().to_path_buf(), &test_config());
        let files = walker.collect_files();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "py"));
    }

    #[test]
    fn test_walker_order_is_lexical() {
        let dir = tempdir().unwrap();
        for name in ["b.py", "a.py", "c.py"] {
            fs::write(dir.path().join(name), "x = 1\n").unwrap();
        }

        let walker = Walker::new(dir.path().to_path_buf(), &test_config());
        let files = walker.collect_files();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.py", "b.py", "c.py"]);
    }

    #[test]
    fn test_walker_skips_ignored_directories() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("__pycache__");
        fs::create_dir_all(&cache).unwrap();

        fs::write(dir.path().join("app.py"), "def main(): pass\n").unwrap();
        fs::write(cache.join("app.py"), "def stale(): pass\n").unwrap();

        let walker = Walker::new(dir.path().to_path_buf(), &test_config());
        let files = walker.collect_files();

        assert_eq!(files.len(), 1);
        assert!(!files[0].to_string_lossy().contains("__pycache__"));
    }
}
