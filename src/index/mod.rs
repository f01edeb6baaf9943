//! Function index data model.
//!
//! A [`FunctionIndex`] is the durable output of an indexing pass: one
//! [`FunctionRecord`] per function-definition node, kept in discovery order
//! with a by-name lookup on top.

pub mod storage;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use storage::{IndexStore, JsonlStore, StorageError};

/// One indexed function definition.
///
/// Names are not unique within a repository: the same name may be defined in
/// several files, or several times in one file. `(file, start_line)` is
/// implicitly unique because each definition occupies a distinct location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// Function name as written at the definition site.
    pub name: String,
    /// Repository-relative path, forward-slash separators.
    pub file: String,
    /// 1-based line of the `def` keyword.
    pub start_line: usize,
    /// 1-based inclusive last line of the definition. `None` when the parser
    /// could not report it; extraction then falls back to the single start line.
    pub end_line: Option<usize>,
}

impl FunctionRecord {
    /// The inclusive 1-based line span, with the single-line fallback applied.
    pub fn line_span(&self) -> (usize, usize) {
        (self.start_line, self.end_line.unwrap_or(self.start_line))
    }
}

/// Insertion-ordered multimap from function name to its definitions.
///
/// Built once per indexing pass and read-only afterwards; rebuilding replaces
/// the whole index rather than mutating it.
#[derive(Debug, Default, Clone)]
pub struct FunctionIndex {
    records: Vec<FunctionRecord>,
    by_name: HashMap<String, Vec<usize>>,
}

impl FunctionIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, preserving discovery order.
    pub fn push(&mut self, record: FunctionRecord) {
        debug_assert!(record.start_line >= 1);
        debug_assert!(record
            .end_line
            .map(|end| record.start_line <= end)
            .unwrap_or(true));

        self.by_name
            .entry(record.name.clone())
            .or_default()
            .push(self.records.len());
        self.records.push(record);
    }

    /// All records whose name equals `name`, in discovery order.
    ///
    /// An unknown name yields an empty vector, never an error.
    pub fn find_by_name(&self, name: &str) -> Vec<&FunctionRecord> {
        self.by_name
            .get(name)
            .map(|positions| positions.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// All records in discovery order.
    pub fn records(&self) -> &[FunctionRecord] {
        &self.records
    }

    /// Number of indexed definitions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct files contributing records.
    pub fn file_count(&self) -> usize {
        let mut files: Vec<&str> = self.records.iter().map(|r| r.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        files.len()
    }
}

impl FromIterator<FunctionRecord> for FunctionIndex {
    fn from_iter<I: IntoIterator<Item = FunctionRecord>>(iter: I) -> Self {
        let mut index = Self::new();
        for record in iter {
            index.push(record);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, file: &str, start: usize, end: Option<usize>) -> FunctionRecord {
        FunctionRecord {
            name: name.to_string(),
            file: file.to_string(),
            start_line: start,
            end_line: end,
        }
    }

    #[test]
    fn test_find_by_name_preserves_insertion_order() {
        let mut index = FunctionIndex::new();
        index.push(record("helper", "a/util.py", 3, Some(4)));
        index.push(record("main", "a/util.py", 7, Some(9)));
        index.push(record("helper", "b/util.py", 10, Some(12)));

        let matches = index.find_by_name("helper");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].file, "a/util.py");
        assert_eq!(matches[1].file, "b/util.py");
    }

    #[test]
    fn test_unknown_name_is_empty_not_error() {
        let index = FunctionIndex::new();
        assert!(index.find_by_name("nonexistent_fn").is_empty());
    }

    #[test]
    fn test_duplicate_names_in_one_file_are_kept() {
        let mut index = FunctionIndex::new();
        index.push(record("handler", "app.py", 1, Some(2)));
        index.push(record("handler", "app.py", 5, Some(6)));

        assert_eq!(index.find_by_name("handler").len(), 2);
        assert_eq!(index.len(), 2);
        assert_eq!(index.file_count(), 1);
    }

    #[test]
    fn test_line_span_fallback() {
        let with_end = record("f", "a.py", 3, Some(8));
        assert_eq!(with_end.line_span(), (3, 8));

        let without_end = record("f", "a.py", 3, None);
        assert_eq!(without_end.line_span(), (3, 3));
    }
}
