//! `sit set` command - Single-field partial updates

use clap::Subcommand;
use console::style;
use miette::Result;
use serde_json::{Map, Value};

use crate::core::EntityKind;

use crate::cli::GlobalOpts;

use super::client;

#[derive(Subcommand, Debug)]
pub enum SetCommands {
    /// Update one server's shutdown status
    ShutdownStatus(ShutdownStatusArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShutdownStatusArgs {
    /// Server id
    pub id: i64,

    /// New shutdown status value
    pub status: String,
}

pub fn run(cmd: SetCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        SetCommands::ShutdownStatus(args) => {
            let client = client(global)?;
            let mut fields = Map::new();
            fields.insert(
                "shutdown_status".to_string(),
                Value::String(args.status.clone()),
            );
            client
                .update(EntityKind::Server, args.id, &fields)
                .map_err(|e| miette::miette!("{}", e))?;
            println!(
                "{} Status updated for server {}",
                style("✓").green(),
                style(args.id).cyan()
            );
            Ok(())
        }
    }
}
