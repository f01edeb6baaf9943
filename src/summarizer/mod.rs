//! LLM-based per-file summarization glue.
//!
//! Independent of the function index: this pipeline reads source files and
//! writes JSON summaries, nothing more. The client is constructed explicitly
//! and passed in; there is no process-wide client state.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::SummarizerConfig;

const SYSTEM_PROMPT: &str =
    "You are an expert at structurally analyzing and summarizing Python code.";

const USER_PROMPT_TEMPLATE: &str = r#"The following is a single Python file. Summarize its core structure and functionality.

Respond with JSON only, containing these fields:

- file: (string) the file name
- description: (string) the file's main role and behavior
- key_functions: (list of strings) names of the important functions
- key_classes: (list of strings) names of the important classes
- depends_on: (list of strings) external modules or internal files this file imports

Do not add comments or prose outside the JSON.

File name: {filename}

```python
{code}
```"#;

/// Structured summary of one source file, as returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSummary {
    pub file: String,
    pub description: String,
    #[serde(default)]
    pub key_functions: Vec<String>,
    #[serde(default)]
    pub key_classes: Vec<String>,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

/// Summary envelope as persisted to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSummary {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: FileSummary,
}

/// Chat-completions client. Built once and passed to the pipeline.
pub struct LlmClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_prompt_bytes: usize,
}

impl LlmClient {
    pub fn new(config: &SummarizerConfig, api_key: String) -> Self {
        let base = config.api_url.trim_end_matches('/');
        let endpoint = if base.ends_with("/chat/completions") {
            base.to_string()
        } else {
            format!("{}/chat/completions", base)
        };

        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_prompt_bytes: config.max_prompt_bytes,
        }
    }

    /// Summarize one file's source text.
    pub async fn summarize_file(&self, filename: &str, code: &str) -> Result<FileSummary> {
        let prompt = build_prompt(filename, code, self.max_prompt_bytes);

        let response: serde_json::Value = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": SYSTEM_PROMPT},
                    {"role": "user", "content": prompt}
                ],
                "temperature": self.temperature
            }))
            .send()
            .await
            .context("summarization request failed")?
            .error_for_status()
            .context("summarization request rejected")?
            .json()
            .await
            .context("summarization response was not JSON")?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow!("no message content in response: {response}"))?;

        let body = strip_code_fences(content.trim());
        serde_json::from_str(body).with_context(|| format!("model did not return valid summary JSON: {body}"))
    }
}

/// Build the user prompt, truncating the code to the configured byte budget
/// on a character boundary.
fn build_prompt(filename: &str, code: &str, max_bytes: usize) -> String {
    let mut cut = code.len().min(max_bytes);
    while !code.is_char_boundary(cut) {
        cut -= 1;
    }

    USER_PROMPT_TEMPLATE
        .replace("{filename}", filename)
        .replace("{code}", &code[..cut])
}

/// Strip a surrounding markdown code fence from a model response.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the fence line.
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim_start_matches('\n').trim_end_matches('`').trim()
}

const EXCLUDED_DIRS: &[&str] = &[
    "tests",
    "test",
    "__pycache__",
    "venv",
    ".venv",
    "build",
    "dist",
    "migrations",
    "bin",
    ".git",
    ".github",
    "libs",
    "third_party",
    ".mypy_cache",
    ".pytest_cache",
    ".idea",
    ".vscode",
    "node_modules",
    "logs",
    "notebooks",
];

const EXCLUDED_FILES: &[&str] = &["__init__.py", "setup.py"];

/// Whether a file is worth sending to the model.
pub fn should_summarize(path: &Path, size_bytes: u64) -> bool {
    if path.extension().map(|e| e != "py").unwrap_or(true) {
        return false;
    }
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        if EXCLUDED_FILES.contains(&name) {
            return false;
        }
    }
    let excluded: HashSet<&str> = EXCLUDED_DIRS.iter().copied().collect();
    if path
        .components()
        .any(|c| excluded.contains(c.as_os_str().to_string_lossy().as_ref()))
    {
        return false;
    }
    // Near-empty files produce noise summaries.
    size_bytes >= 30
}

/// Summarize every eligible file under `root`, writing one JSON file per
/// source file into `out_dir`. Per-file failures are logged and skipped.
pub async fn summarize_repo(client: &LlmClient, root: &Path, out_dir: &Path) -> Result<usize> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut written = 0;

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        if !should_summarize(rel, size) {
            continue;
        }

        info!("summarizing {}", rel.display());
        let code = match std::fs::read_to_string(entry.path()) {
            Ok(code) => code,
            Err(e) => {
                warn!("skipping {}: {}", rel.display(), e);
                continue;
            }
        };

        let filename = rel.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        let summary = match client.summarize_file(&filename, &code).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("failed to summarize {}: {:#}", rel.display(), e);
                continue;
            }
        };

        let stored = StoredSummary {
            generated_at: Utc::now(),
            summary,
        };
        let out_path = out_dir.join(format!("{}.json", flatten_rel_path(rel)));
        let content = serde_json::to_string_pretty(&stored)?;
        std::fs::write(&out_path, content)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        written += 1;
    }

    info!("wrote {} summaries to {}", written, out_dir.display());
    Ok(written)
}

/// `src/utils/helpers.py` becomes `src__utils__helpers.py` so every summary
/// lands flat in one directory.
fn flatten_rel_path(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("__")
}
