//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    bulk::BulkCommands,
    completions::CompletionsArgs,
    import::ImportArgs,
    list::ListArgs,
    rm::RmCommands,
    set::SetCommands,
    status::StatusArgs,
    test::TestCommands,
};

#[derive(Parser)]
#[command(name = "sit")]
#[command(author, version, about = "Server Inventory Toolkit")]
#[command(
    long_about = "A console for a server inventory service: CSV import with column mapping, bulk updates across a selection, and connectivity testing."
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
    /// Inventory service base URL (overrides config and SIT_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format for list output
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List servers or applications
    List(ListArgs),

    /// Show the inventory status dashboard
    Status(StatusArgs),

    /// Import entities from a CSV file with column mapping
    Import(ImportArgs),

    /// Bulk operations across a server selection
    #[command(subcommand)]
    Bulk(BulkCommands),

    /// Run connectivity tests and merge the results
    #[command(subcommand)]
    Test(TestCommands),

    /// Update a single field on one entity
    #[command(subcommand)]
    Set(SetCommands),

    /// Delete an entity
    #[command(subcommand)]
    Rm(RmCommands),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned table for terminals
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
    /// JSON format (for programming)
    Json,
    /// Just ids, one per line
    Id,
}
