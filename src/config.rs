use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".fnlocate";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub indexer: IndexerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub summarizer: SummarizerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// File extensions to index.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Path fragments to skip (in addition to .gitignore).
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["py".to_string()]
}

fn default_ignore_patterns() -> Vec<String> {
    vec![
        "__pycache__".to_string(),
        ".venv".to_string(),
        "venv".to_string(),
        "node_modules".to_string(),
        "build".to_string(),
        "dist".to_string(),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Index file path, relative to the .fnlocate directory.
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            index_file: default_index_file(),
        }
    }
}

fn default_index_file() -> String {
    "index.jsonl".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Chat-completions endpoint base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model name sent with each request.
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Source files are truncated to this many bytes before prompting.
    #[serde(default = "default_max_prompt_bytes")]
    pub max_prompt_bytes: usize,

    /// Output directory for per-file summaries, relative to .fnlocate.
    #[serde(default = "default_summaries_dir")]
    pub summaries_dir: String,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_prompt_bytes: default_max_prompt_bytes(),
            summaries_dir: default_summaries_dir(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_prompt_bytes() -> usize {
    6000
}

fn default_summaries_dir() -> String {
    "summaries".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write rotating log files under the logging directory.
    #[serde(default)]
    pub enabled: bool,

    /// Also log to stderr.
    #[serde(default = "default_true")]
    pub stderr: bool,

    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log directory, relative to the project root unless absolute.
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_log_prefix")]
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stderr: default_true(),
            level: default_log_level(),
            directory: default_log_directory(),
            file_prefix: default_log_prefix(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from(".fnlocate/logs")
}

fn default_log_prefix() -> String {
    "fnlocate".to_string()
}

impl Config {
    /// Load configuration from the .fnlocate directory, falling back to
    /// defaults when no config file exists.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;

            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to the .fnlocate directory.
    pub fn save(&self, root: &Path) -> Result<()> {
        let config_dir = root.join(CONFIG_DIR);
        let config_path = config_dir.join(CONFIG_FILE);

        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;

        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Path to the .fnlocate directory under a project root.
    pub fn fnlocate_dir(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR)
    }

    /// Path to the persisted function index.
    pub fn index_path(&self, root: &Path) -> PathBuf {
        Self::fnlocate_dir(root).join(&self.storage.index_file)
    }

    /// Path to the summaries output directory.
    pub fn summaries_path(&self, root: &Path) -> PathBuf {
        Self::fnlocate_dir(root).join(&self.summarizer.summaries_dir)
    }
}
