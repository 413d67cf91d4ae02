//! Sanket CLI - Payment-record spreadsheet enrichment
//!
//! Usage:
//!   sanket enrich --input rows.xlsx --output out.csv   Enrich a spreadsheet
//!   sanket preview --input rows.xlsx --output out.html Write an HTML preview
//!   sanket reference                                   Inspect reference tables
//!   sanket serve --port 3000                           Start the web server

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Enrich {
            input,
            output,
            format,
            preview,
        } => commands::cmd_enrich(
            &cli.reference_dir,
            &input,
            &output,
            format.as_deref(),
            preview.as_deref(),
        ),
        Commands::Preview { input, output } => {
            commands::cmd_preview(&cli.reference_dir, &input, &output)
        }
        Commands::Reference => commands::cmd_reference(&cli.reference_dir),
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(&cli.reference_dir, &host, port, static_dir.as_deref()).await,
    }
}
