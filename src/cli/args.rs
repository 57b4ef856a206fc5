//! CLI argument structures
//!
//! The main CLI structure and the `sort` and `words` subcommands.

use crate::sort::ConflictPolicy;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Sort files by extension and chart word frequencies
#[derive(Parser)]
#[command(name = "sortwords")]
#[command(about = "sortwords - Sort files into folders by extension and chart word frequencies", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy every file under SOURCE into OUTPUT/<extension>/
    Sort(SortArgs),

    /// Count word frequencies in a text and chart the most common words
    Words(WordsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SortArgs {
    /// Source folder path
    pub source: PathBuf,

    /// Output folder path
    pub output: PathBuf,

    /// Maximum number of files copied at once
    #[arg(long, value_name = "N")]
    pub max_parallel: Option<usize>,

    /// What to do when a destination file already exists
    #[arg(long, value_enum)]
    pub on_conflict: Option<ConflictPolicy>,

    /// File that receives the INFO-level log of the run
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Show a progress bar while copying
    #[arg(long)]
    pub progress: bool,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct WordsArgs {
    /// URL of the text to download
    #[arg(long, conflicts_with = "input")]
    pub url: Option<String>,

    /// Read the text from a local file instead of downloading it
    #[arg(short = 'i', long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Number of words to chart
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,

    /// Worker pool size for the map and reduce stages
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Width of the longest bar, in columns
    #[arg(long, value_name = "COLUMNS")]
    pub width: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the chart as text even when stdout is a terminal
    #[arg(long)]
    pub plain: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
