//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    catalog::CatalogCommands, matching::MatchArgs, rfp::RfpCommands, run::RunArgs,
};

#[derive(Parser)]
#[command(name = "bidkit")]
#[command(author, version, about = "Bidkit RFP Response Toolkit")]
#[command(
    long_about = "A toolkit for drafting priced responses to industrial cable and electrical-product RFPs from plain JSON fixture files."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Data directory holding the JSON fixture files
    #[arg(long, global = true, env = "BIDKIT_DATA", default_value = "data")]
    pub data: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full response pipeline and print the bid
    Run(RunArgs),

    /// Candidate RFP inspection
    #[command(subcommand)]
    Rfp(RfpCommands),

    /// Product catalog inspection
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Match one RFP's requirements against the catalog
    Match(MatchArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables and dashboards
    #[default]
    Auto,
    /// JSON (for programming)
    Json,
    /// Comma-separated values (for spreadsheets)
    Csv,
    /// Tab-separated values (for piping)
    Tsv,
}
