//! `sit bulk` command - Bulk operations across a server selection

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, MultiSelect};
use miette::{IntoDiagnostic, Result};

use crate::core::entity::{server_type, SERVER_TYPES};
use crate::core::{AppAssignment, BulkError, BulkPatch, Inventory, Selection};

use crate::cli::GlobalOpts;

use super::client;

#[derive(Subcommand, Debug)]
pub enum BulkCommands {
    /// Apply a sparse update to every selected server in one batch
    Update(UpdateArgs),
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Server ids to select; omit to pick interactively
    pub ids: Vec<i64>,

    /// Select every visible server instead of naming ids
    #[arg(long, conflicts_with = "ids")]
    pub all: bool,

    /// Restrict visibility for --all (same filter as `sit list servers --search`)
    #[arg(long, requires = "all")]
    pub search: Option<String>,

    /// New server type
    #[arg(long, value_name = "TYPE")]
    pub server_type: Option<String>,

    /// New shutdown status
    #[arg(long, value_name = "STATUS")]
    pub shutdown_status: Option<String>,

    /// Assign the selection to this application
    #[arg(long, value_name = "APP_ID", conflicts_with = "clear_application")]
    pub application: Option<i64>,

    /// Unassign the selection from any application
    #[arg(long)]
    pub clear_application: bool,

    /// Show what would change without sending the update
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(cmd: BulkCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        BulkCommands::Update(args) => run_update(args, global),
    }
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let patch = build_patch(&args)?;
    if patch.is_empty() {
        return Err(miette::miette!(
            "No updates specified. Set --server-type, --shutdown-status, --application, or --clear-application."
        ));
    }

    let client = client(global)?;
    let mut inventory = client
        .load_inventory()
        .map_err(|e| miette::miette!("{}", e))?;

    if let Some(app_id) = args.application {
        if inventory.application(app_id).is_none() {
            println!(
                "{} Application {} is not in the loaded list",
                style("Warning:").yellow(),
                app_id
            );
        }
    }

    let selection = build_selection(&args, &inventory)?;
    let mut selection = match selection {
        Some(sel) if !sel.is_empty() => sel,
        _ => return Err(miette::miette!("{}", BulkError::NoSelection)),
    };

    println!(
        "{} {} server(s)",
        if args.dry_run {
            style("Would update").yellow()
        } else {
            style("Updating").green()
        },
        style(selection.len()).cyan()
    );

    if args.dry_run {
        for id in selection.ids() {
            if let Some(server) = inventory.server(*id) {
                println!("  {} {} ({})", style("*").dim(), style(&server.name).cyan(), id);
            }
        }
        let updates = patch.to_updates();
        println!(
            "\n{} {}",
            style("Updates:").bold(),
            serde_json::Value::Object(updates)
        );
        return Ok(());
    }

    client
        .bulk_update(selection.ids(), &patch.to_updates())
        .map_err(|e| miette::miette!("{}", e))?;

    // storage is the source of truth; drop the selection and refetch rather
    // than patching the local list speculatively
    selection.clear();
    let servers = client.list_servers().map_err(|e| miette::miette!("{}", e))?;
    inventory.servers = servers;

    println!(
        "{} Bulk update successful. {} server(s) loaded.",
        style("✓").green(),
        style(inventory.servers.len()).cyan()
    );
    Ok(())
}

fn build_patch(args: &UpdateArgs) -> Result<BulkPatch> {
    if let Some(stype) = &args.server_type {
        if server_type(stype).is_none() {
            return Err(miette::miette!(
                "Invalid server type '{}'. Valid values: {}",
                stype,
                SERVER_TYPES
                    .iter()
                    .map(|t| t.key)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
    }

    let application = if args.clear_application {
        AppAssignment::Clear
    } else if let Some(id) = args.application {
        AppAssignment::Assign(id)
    } else {
        AppAssignment::Unchanged
    };

    Ok(BulkPatch {
        server_type: args.server_type.clone(),
        shutdown_status: args.shutdown_status.clone(),
        application,
    })
}

/// Resolve the selection from ids, --all, or an interactive pick
fn build_selection(args: &UpdateArgs, inventory: &Inventory) -> Result<Option<Selection>> {
    let known: Vec<i64> = inventory.servers.iter().map(|s| s.id).collect();
    let mut selection = Selection::new();

    if args.all {
        let visible: Vec<i64> = inventory
            .filter_servers(args.search.as_deref().unwrap_or(""))
            .iter()
            .map(|s| s.id)
            .collect();
        selection.select_all(&visible);
        return Ok(Some(selection));
    }

    if !args.ids.is_empty() {
        for id in &args.ids {
            selection.toggle(*id);
        }
        let before = selection.len();
        selection.retain_known(&known);
        let stale = before - selection.len();
        if stale > 0 {
            println!(
                "{} {} selected id(s) are not in the loaded list and were ignored",
                style("Warning:").yellow(),
                stale
            );
        }
        return Ok(Some(selection));
    }

    if !console::user_attended() {
        return Ok(None);
    }

    let labels: Vec<String> = inventory
        .servers
        .iter()
        .map(|s| format!("{} ({})", s.name, s.hostname))
        .collect();
    if labels.is_empty() {
        return Ok(None);
    }
    let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Select servers to update")
        .items(&labels)
        .interact()
        .into_diagnostic()?;
    for idx in chosen {
        selection.toggle(inventory.servers[idx].id);
    }
    Ok(Some(selection))
}
