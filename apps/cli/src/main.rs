//! IntelScout CLI - single-target competitive intelligence.
//!
//! Plans a competitor's careers/blog/changelog URLs, scouts job listings and
//! news headlines, and prints a report. Always exits 0 once the run starts.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
