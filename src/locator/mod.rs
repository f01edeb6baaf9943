//! Function locator: name -> index records -> literal source text.
//!
//! The locator never re-parses. It maps each record's repository-relative
//! path back to a file under the current root (which may differ from the
//! root the index was built against) and re-reads raw lines at the recorded
//! offsets.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::diagnostics::{Diagnostics, Stage};
use crate::index::{FunctionIndex, FunctionRecord};

/// The extracted source text of one matching definition. Ephemeral; produced
/// per lookup and owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub name: String,
    /// Path relative to the current root, forward-slash separators.
    pub file: String,
    /// Trimmed literal source of the definition's line span.
    pub code: String,
}

/// Resolves function names against a previously built index and a repository
/// root that may have moved since the index was built.
pub struct Locator {
    index: FunctionIndex,
    root: PathBuf,
}

impl Locator {
    pub fn new(index: FunctionIndex, root: PathBuf) -> Self {
        Self { index, root }
    }

    /// Every record whose name equals `name`, case-sensitively, in the
    /// index's stored order. Empty is success, not an error.
    pub fn locate(&self, name: &str) -> Vec<&FunctionRecord> {
        self.index.find_by_name(name)
    }

    /// Extract the literal source of every definition of `name`.
    ///
    /// Records whose file cannot be resolved or read are skipped with a
    /// diagnostic; the survivors keep `locate`'s ordering.
    pub fn extract(&self, name: &str, diagnostics: &mut Diagnostics) -> Vec<Extraction> {
        let mut results = Vec::new();

        for record in self.locate(name) {
            let Some(path) = resolve_path(&self.root, &record.file) else {
                diagnostics.record(
                    record.file.clone(),
                    Stage::Resolve,
                    "no file under the current root matches this path suffix",
                );
                continue;
            };

            match slice_lines(&path, record) {
                Ok(code) => results.push(Extraction {
                    name: record.name.clone(),
                    file: relative_display(&self.root, &path),
                    code,
                }),
                Err(message) => {
                    diagnostics.record(path.display().to_string(), Stage::FileRead, message);
                }
            }
        }

        results
    }
}

/// Find a file under `root` whose path ends with the trailing segments of
/// `relative`.
///
/// The direct join is tried first; the depth-first suffix search only runs
/// when the recorded path does not exist verbatim under `root` (e.g. the
/// repository was re-cloned one directory deeper). The walk is sorted, so the
/// first-match-wins tie-break is at least deterministic.
pub fn resolve_path(root: &Path, relative: &str) -> Option<PathBuf> {
    let normalized = relative.replace('\\', "/");
    let wanted: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
    if wanted.is_empty() {
        return None;
    }

    let direct = root.join(&normalized);
    if direct.is_file() {
        return Some(direct);
    }

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| {
            let rel = match entry.path().strip_prefix(root) {
                Ok(rel) => rel,
                Err(_) => return false,
            };
            let segments: Vec<String> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            segments.len() >= wanted.len()
                && segments[segments.len() - wanted.len()..]
                    .iter()
                    .zip(&wanted)
                    .all(|(seg, want)| seg == want)
        })
        .map(|entry| entry.into_path())
}

/// Read the record's line span `[start_line-1, end_line)` and trim it.
fn slice_lines(path: &Path, record: &FunctionRecord) -> Result<String, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let lines: Vec<&str> = content.lines().collect();

    let (start, end) = record.line_span();
    if start == 0 || start > lines.len() {
        return Err(format!(
            "recorded start line {} is outside the file ({} lines)",
            start,
            lines.len()
        ));
    }

    let end = end.min(lines.len());
    Ok(lines[start - 1..end].join("\n").trim().to_string())
}

fn relative_display(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn record(name: &str, file: &str, start: usize, end: Option<usize>) -> FunctionRecord {
        FunctionRecord {
            name: name.to_string(),
            file: file.to_string(),
            start_line: start,
            end_line: end,
        }
    }

    #[test]
    fn test_resolve_path_direct_join() {
        let dir = tempdir().unwrap();
        let pkg = dir.path().join("src/utils");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("helpers.py"), "def h(): pass\n").unwrap();

        let found = resolve_path(dir.path(), "src/utils/helpers.py").unwrap();
        assert_eq!(found, pkg.join("helpers.py"));
    }

    #[test]
    fn test_resolve_path_suffix_under_deeper_root() {
        // Index built against <repo>, files now live under <root>/checkout/<repo layout>.
        let dir = tempdir().unwrap();
        let nested = dir.path().join("checkout/src/utils");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("helpers.py"), "def h(): pass\n").unwrap();

        let found = resolve_path(dir.path(), "src/utils/helpers.py").unwrap();
        assert_eq!(found, nested.join("helpers.py"));
    }

    #[test]
    fn test_resolve_path_matches_whole_segments_only() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("myutils.py"), "x = 1\n").unwrap();

        // A raw string-suffix comparison would accept "myutils.py".
        assert!(resolve_path(dir.path(), "utils.py").is_none());
    }

    #[test]
    fn test_resolve_path_handles_backslash_separators() {
        let dir = tempdir().unwrap();
        let pkg = dir.path().join("src");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("app.py"), "x = 1\n").unwrap();

        assert!(resolve_path(dir.path(), "src\\app.py").is_some());
    }

    #[test]
    fn test_resolve_path_not_found_is_none() {
        let dir = tempdir().unwrap();
        assert!(resolve_path(dir.path(), "missing/file.py").is_none());
    }

    #[test]
    fn test_extract_trims_and_preserves_order() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        fs::write(a.join("util.py"), "# header\n\ndef helper():\n    return 1\n").unwrap();
        fs::write(
            b.join("util.py"),
            "x = 0\n".repeat(9) + "def helper():\n    y = 2\n    return y\n",
        )
        .unwrap();

        let index: FunctionIndex = [
            record("helper", "a/util.py", 3, Some(4)),
            record("helper", "b/util.py", 10, Some(12)),
        ]
        .into_iter()
        .collect();

        let locator = Locator::new(index, dir.path().to_path_buf());
        let mut diags = Diagnostics::new();
        let results = locator.extract("helper", &mut diags);

        assert!(diags.is_empty());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].file, "a/util.py");
        assert_eq!(results[0].code, "def helper():\n    return 1");
        assert_eq!(results[1].file, "b/util.py");
        assert_eq!(results[1].code, "def helper():\n    y = 2\n    return y");
    }

    #[test]
    fn test_extract_skips_unresolved_records() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("here.py"), "def f():\n    pass\n").unwrap();

        let index: FunctionIndex = [
            record("f", "gone/elsewhere.py", 1, Some(2)),
            record("f", "here.py", 1, Some(2)),
        ]
        .into_iter()
        .collect();

        let locator = Locator::new(index, dir.path().to_path_buf());
        let mut diags = Diagnostics::new();
        let results = locator.extract("f", &mut diags);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file, "here.py");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.entries()[0].stage, Stage::Resolve);
    }

    #[test]
    fn test_extract_missing_end_line_takes_single_line() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.py"), "def single(): return 3\nx = 4\n").unwrap();

        let index: FunctionIndex = [record("single", "one.py", 1, None)].into_iter().collect();
        let locator = Locator::new(index, dir.path().to_path_buf());

        let mut diags = Diagnostics::new();
        let results = locator.extract("single", &mut diags);
        assert_eq!(results[0].code, "def single(): return 3");
    }

    #[test]
    fn test_extract_out_of_range_start_is_diagnostic() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("short.py"), "x = 1\n").unwrap();

        let index: FunctionIndex = [record("f", "short.py", 40, Some(42))].into_iter().collect();
        let locator = Locator::new(index, dir.path().to_path_buf());

        let mut diags = Diagnostics::new();
        let results = locator.extract("f", &mut diags);

        assert!(results.is_empty());
        assert_eq!(diags.entries()[0].stage, Stage::FileRead);
    }

    #[test]
    fn test_locate_unknown_name_is_empty() {
        let locator = Locator::new(FunctionIndex::new(), PathBuf::from("."));
        assert!(locator.locate("nonexistent_fn").is_empty());
    }
}
