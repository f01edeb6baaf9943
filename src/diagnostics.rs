//! Non-fatal failure collection for batch operations.
//!
//! Indexing and extraction are partial-failure operations: a single bad file
//! or unresolvable record must never abort the batch. Failures land here as
//! `(context, stage, message)` entries and are reported at the end.

use std::collections::HashMap;

/// Stage at which a non-fatal failure occurred.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Stage {
    /// A source file failed to parse.
    Parse,
    /// An index record's file could not be located under the current root.
    Resolve,
    /// A resolved file could not be read or sliced.
    FileRead,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Parse => write!(f, "parse"),
            Stage::Resolve => write!(f, "resolve"),
            Stage::FileRead => write!(f, "file read"),
        }
    }
}

/// One recorded failure.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// What was being processed, usually a path.
    pub context: String,
    pub stage: Stage,
    pub message: String,
}

/// Collects diagnostics during a batch operation.
///
/// The core is single-threaded, so this is a plain vector with no locking.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure and log it.
    pub fn record(&mut self, context: impl Into<String>, stage: Stage, message: impl Into<String>) {
        let diag = Diagnostic {
            context: context.into(),
            stage,
            message: message.into(),
        };
        tracing::warn!(context = %diag.context, stage = %diag.stage, "{}", diag.message);
        self.entries.push(diag);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Print a per-stage summary to stderr, showing a few examples per stage.
    pub fn print_summary(&self) {
        if self.entries.is_empty() {
            return;
        }

        let mut by_stage: HashMap<Stage, Vec<&Diagnostic>> = HashMap::new();
        for diag in &self.entries {
            by_stage.entry(diag.stage).or_default().push(diag);
        }

        eprintln!("{} files/records skipped:", self.entries.len());
        for (stage, diags) in &by_stage {
            eprintln!("  {}: {}", stage, diags.len());
            for diag in diags.iter().take(5) {
                eprintln!("    - {}: {}", diag.context, diag.message);
            }
            if diags.len() > 5 {
                eprintln!("    ... and {} more", diags.len() - 5);
            }
        }
    }
}
