//! CLI entry point for rendering land value heat overlays

use clap::Parser;
use landheat::io::cli::{Cli, FileProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> landheat::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet {
        "landheat=warn"
    } else {
        "landheat=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let processor = FileProcessor::new(cli);
    processor.process().map(|_| ())
}
