use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fnlocate")]
#[command(author, version, about = "Index a Python repository and extract function definitions by name")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clone a remote repository for indexing
    Clone {
        /// Git repository URL
        url: String,

        /// Destination directory for checkouts
        #[arg(short, long, default_value = ".")]
        dest: PathBuf,
    },

    /// Build the function index for a repository
    Index {
        /// Repository root to index
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// List where a function is defined
    Locate {
        /// Function name, matched exactly and case-sensitively
        name: String,

        /// Repository root holding the index
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// Print the source of every definition of a function
    Extract {
        /// Function name, matched exactly and case-sensitively
        name: String,

        /// Repository root holding the index
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// Generate per-file LLM summaries for a repository
    Summarize {
        /// Repository root to summarize
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },
}
