//! CLI arguments and parsing

use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Pull the paginated anime catalog into a single snapshot file
#[derive(Parser, Debug, Clone)]
#[command(name = "anime-snapshot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog endpoint; the page number is appended as `?page=N`
    #[arg(long, env = "base_url")]
    pub base_url: Option<String>,

    /// Output file (default: data/anime_data.<format>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Log file, appended to
    #[arg(long, default_value = "logs/pull-data.log")]
    pub log_file: PathBuf,

    /// Attempts per page on connection errors and timeouts
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Seconds to wait between attempts
    #[arg(long, default_value_t = 5)]
    pub retry_delay: u64,

    /// Seconds to wait between pages
    #[arg(long, default_value_t = 1)]
    pub page_delay: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
