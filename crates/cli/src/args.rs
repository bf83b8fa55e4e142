//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// news-classifier: classify news articles and detect duplicates with a hosted LLM
#[derive(Parser, Debug)]
#[command(name = "news-classifier")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify an article into category and type
    Classify(ClassifyArgs),

    /// Check whether an article duplicates recent history
    Similar(SimilarArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Validate configuration and show status
    Doctor(DoctorArgs),
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Article title
    #[arg(long)]
    pub title: String,

    /// Article content
    #[arg(long, conflicts_with = "file")]
    pub content: Option<String>,

    /// File containing article content (use - for stdin)
    #[arg(long, conflicts_with = "content")]
    pub file: Option<PathBuf>,

    /// Report other/other instead of nothing when no classification is available
    #[arg(long)]
    pub fallback: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SimilarArgs {
    /// Title of the new article
    #[arg(long)]
    pub title: String,

    /// Recent article summary (repeatable, oldest first)
    #[arg(long = "history", conflicts_with = "history_file")]
    pub history: Vec<String>,

    /// File with one recent article summary per line, oldest first (use - for stdin)
    #[arg(long)]
    pub history_file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
