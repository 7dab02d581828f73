//! LinkEmbed CLI: turn media links in HTML into inline embeds.
//!
//! Runs the content filter over a file or stdin and writes the result to
//! stdout, the same pass a host application runs at render time.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
