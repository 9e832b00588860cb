//! anime-snapshot CLI
//!
//! Pulls the catalog into `data/anime_data.csv`

use anime_snapshot::cli::{Cli, Runner};
use anime_snapshot::logging;
use clap::Parser;

#[tokio::main]
async fn main() {
    // A missing .env is fine; flags and the real environment still apply
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = logging::init(Some(cli.log_file.as_path()), cli.verbose) {
        eprintln!("Warning: {e:#}; logging to console only");
        if let Err(e) = logging::init(None, cli.verbose) {
            eprintln!("Warning: {e:#}");
        }
    }

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
