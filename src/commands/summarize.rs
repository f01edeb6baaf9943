//! Summarize command: generate per-file LLM summaries.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::summarizer::{summarize_repo, LlmClient};

pub async fn run(root: &Path) -> Result<()> {
    let config = Config::load(root)?;
    let api_key = std::env::var("OPENAI_API_KEY")
        .context("OPENAI_API_KEY environment variable is not set")?;

    let client = LlmClient::new(&config.summarizer, api_key);
    let out_dir = config.summaries_path(root);

    let written = summarize_repo(&client, root, &out_dir).await?;
    println!("Wrote {} summaries to {}", written, out_dir.display());
    Ok(())
}
