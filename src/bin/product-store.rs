//! product-store CLI Binary
//!
//! Command-line interface for the file-backed product catalog.

use clap::Parser;
use product_store::logging::init_logging;
use product_store::tooling::cli::{Cli, CliContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli.load_config()?;
    let logging = cli.logging_config(&config.logging);
    init_logging(Some(&logging))?;

    let context = CliContext::new(config);
    let output = context.execute(&cli.command).await?;
    println!("{}", output);
    Ok(())
}
