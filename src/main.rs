//! CLI entry point for the wave function collapse tile generator

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wavetile::io::cli::{Cli, RunProcessor};

fn main() -> wavetile::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let processor = RunProcessor::new(cli);
    processor.process()
}
