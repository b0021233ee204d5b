//! Command-line interface for crm-link.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **match**: Link an ERP customer export to a CRM company export
//! - **apply**: Push accepted links back to the CRM, one write per entry
//! - **serve**: Start the JSON API server
//!
//! ## Usage
//!
//! ```text
//! # Propose links between two exports
//! crm-link match --customers fishbowl.json --companies copper.json
//!
//! # JSON output for scripting, saved for the apply step
//! crm-link match --customers fishbowl.json --companies copper.json \
//!     --format json -o report.json
//!
//! # Preview the writes, then do them for real
//! crm-link apply --matches report.json --dry-run
//! crm-link apply --matches report.json --overrides fixes.json
//!
//! # Start the API server
//! crm-link serve --port 8080
//! ```

use clap::{Parser, Subcommand};

pub mod apply;
pub mod match_cmd;

#[derive(Parser)]
#[command(name = "crm-link")]
#[command(version)]
#[command(about = "Match and link ERP customer records to CRM companies")]
#[command(
    long_about = "crm-link links customer records from an ERP export to company records in a CRM export.\n\nIt matches on account number, then account order id, then a normalized name+address key, and reports every proposed link with the strategy that produced it and a confidence tier. Accepted links can be written back to the CRM so future runs match by identifier."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Propose links between an ERP export and a CRM export
    Match(match_cmd::MatchArgs),

    /// Write accepted links back to the CRM
    Apply(apply::ApplyArgs),

    /// Start the API server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
