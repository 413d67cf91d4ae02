//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sanket - Enrich payment-record spreadsheets against reference tables
#[derive(Parser)]
#[command(name = "sanket")]
#[command(about = "Payment-record spreadsheet enrichment tool", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory containing the reference JSON datasets
    #[arg(long, default_value = "json", global = true)]
    pub reference_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enrich a spreadsheet and write the merged rows
    Enrich {
        /// Spreadsheet to enrich (XLSX or CSV, first sheet only)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the merged rows
        #[arg(short, long)]
        output: PathBuf,

        /// Output format: csv or json (inferred from the output extension
        /// if omitted)
        #[arg(short, long)]
        format: Option<String>,

        /// Also write an HTML preview to this path
        #[arg(long)]
        preview: Option<PathBuf>,
    },

    /// Render the merged rows as an HTML preview table
    Preview {
        /// Spreadsheet to enrich (XLSX or CSV, first sheet only)
        #[arg(short, long)]
        input: PathBuf,

        /// Output HTML file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show reference-table diagnostics
    Reference,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve instead of the
        /// built-in page
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}
