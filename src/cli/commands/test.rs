//! `sit test` command - Connectivity tests and result merging

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::style_status;
use crate::core::{EntityKind, Inventory};

use crate::cli::GlobalOpts;

use super::client;

#[derive(Subcommand, Debug)]
pub enum TestCommands {
    /// Probe one server and merge the outcome into the loaded list
    Server(TestOneArgs),

    /// Probe one application and its grouped servers
    App(TestOneArgs),

    /// Probe every server in one request
    Servers,

    /// Probe every application in one request
    Apps,
}

#[derive(clap::Args, Debug)]
pub struct TestOneArgs {
    /// Entity id
    pub id: i64,
}

pub fn run(cmd: TestCommands, global: &GlobalOpts) -> Result<()> {
    let client = client(global)?;
    let mut inventory = client
        .load_inventory()
        .map_err(|e| miette::miette!("{}", e))?;

    match cmd {
        TestCommands::Server(args) => {
            let outcome = client
                .test_server(args.id)
                .map_err(|e| miette::miette!("{}", e))?;
            // merged in place; no refetch needed after a single probe
            if inventory.apply_server_outcome(args.id, &outcome) {
                if let Some(server) = inventory.server(args.id) {
                    print_server_line(
                        &server.name,
                        &server.status,
                        server.test_response.as_deref(),
                    );
                    if !global.quiet {
                        println!(
                            "{} Server {} tested",
                            style("✓").green(),
                            style(&server.name).cyan()
                        );
                    }
                }
            } else {
                println!(
                    "{} Server {} is no longer in the loaded list; result: {}",
                    style("Warning:").yellow(),
                    args.id,
                    style_status(&outcome.status)
                );
            }
        }
        TestCommands::App(args) => {
            let outcome = client
                .test_application(args.id)
                .map_err(|e| miette::miette!("{}", e))?;
            match inventory.apply_application_outcome(args.id, &outcome) {
                Some(children) => {
                    if let Some(app) = inventory.application(args.id) {
                        println!(
                            "{} {} {}",
                            style("Application").bold(),
                            style(&app.name).cyan(),
                            style_status(&app.status)
                        );
                    }
                    for server in inventory.servers_in_application(Some(args.id)) {
                        print_server_line(
                            &server.name,
                            &server.status,
                            server.test_response.as_deref(),
                        );
                    }
                    if !global.quiet {
                        println!(
                            "{} Application test completed ({} server(s) updated)",
                            style("✓").green(),
                            style(children).cyan()
                        );
                    }
                }
                None => println!(
                    "{} Application {} is no longer in the loaded list",
                    style("Warning:").yellow(),
                    args.id
                ),
            }
        }
        TestCommands::Servers => {
            let entries = client
                .test_all(EntityKind::Server)
                .map_err(|e| miette::miette!("{}", e))?;
            let merged = inventory.apply_server_results(&entries);
            print_all_servers(&inventory);
            summarize(global, entries.len(), merged, "server");
        }
        TestCommands::Apps => {
            let entries = client
                .test_all(EntityKind::Application)
                .map_err(|e| miette::miette!("{}", e))?;
            let merged = inventory.apply_application_results(&entries);
            for app in &inventory.applications {
                println!("  {:<24} {}", app.name, style_status(&app.status));
            }
            summarize(global, entries.len(), merged, "application");
        }
    }
    Ok(())
}

fn print_server_line(name: &str, status: &str, message: Option<&str>) {
    match message {
        Some(msg) if !msg.is_empty() => {
            println!("  {:<24} {} - {}", name, style_status(status), style(msg).dim())
        }
        _ => println!("  {:<24} {}", name, style_status(status)),
    }
}

fn print_all_servers(inventory: &Inventory) {
    for server in &inventory.servers {
        print_server_line(&server.name, &server.status, server.test_response.as_deref());
    }
}

fn summarize(global: &GlobalOpts, tested: usize, merged: usize, entity: &str) {
    if global.quiet {
        return;
    }
    let skipped = tested.saturating_sub(merged);
    if skipped > 0 {
        println!(
            "{} Tested {} {}(s); {} result(s) referenced entities no longer loaded",
            style("✓").green(),
            style(merged).cyan(),
            entity,
            style(skipped).dim()
        );
    } else {
        println!(
            "{} All {}s tested successfully ({})",
            style("✓").green(),
            entity,
            style(merged).cyan()
        );
    }
}
