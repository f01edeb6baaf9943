use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use fnlocate::cli::{Cli, Commands};
use fnlocate::config::Config;
use fnlocate::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let config = Config::load(&project_root).unwrap_or_default();

    // The guard must be held until program exit so pending logs are flushed.
    let _logging_guard = init_logging(&config.logging, &project_root)?;

    tracing::debug!("fnlocate starting in {}", project_root.display());

    let cli = Cli::parse();

    match cli.command {
        Commands::Clone { url, dest } => {
            fnlocate::commands::clone::run(&url, &dest).await?;
        }
        Commands::Index { root } => {
            fnlocate::commands::index::run(&root).await?;
        }
        Commands::Locate { name, root } => {
            fnlocate::commands::locate::run(&name, &root).await?;
        }
        Commands::Extract { name, root } => {
            fnlocate::commands::extract::run(&name, &root).await?;
        }
        Commands::Summarize { root } => {
            fnlocate::commands::summarize::run(&root).await?;
        }
    }

    Ok(())
}
