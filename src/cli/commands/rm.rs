//! `sit rm` command - Delete entities

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};

use crate::core::EntityKind;

use crate::cli::GlobalOpts;

use super::client;

#[derive(Subcommand, Debug)]
pub enum RmCommands {
    /// Delete a server
    Server(RmArgs),

    /// Delete an application
    App(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Entity id
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: RmCommands, global: &GlobalOpts) -> Result<()> {
    let (kind, args) = match cmd {
        RmCommands::Server(args) => (EntityKind::Server, args),
        RmCommands::App(args) => (EntityKind::Application, args),
    };

    if !args.yes && console::user_attended() {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Are you sure you want to delete {} {}?",
                kind.as_str(),
                args.id
            ))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            return Ok(());
        }
    }

    let client = client(global)?;
    let mut inventory = client
        .load_inventory()
        .map_err(|e| miette::miette!("{}", e))?;

    client
        .delete(kind, args.id)
        .map_err(|e| miette::miette!("{}", e))?;

    // drop it from the local list instead of refetching
    let remaining = match kind {
        EntityKind::Server => {
            inventory.remove_server(args.id);
            inventory.servers.len()
        }
        EntityKind::Application => {
            inventory.remove_application(args.id);
            inventory.applications.len()
        }
    };

    println!(
        "{} {} deleted successfully ({} remaining)",
        style("✓").green(),
        kind.label(),
        style(remaining).cyan()
    );
    Ok(())
}
