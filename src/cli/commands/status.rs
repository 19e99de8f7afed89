//! `sit status` command - Inventory status dashboard

use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::GlobalOpts;

use super::client;

#[derive(clap::Args, Debug)]
pub struct StatusArgs {}

pub fn run(_args: StatusArgs, global: &GlobalOpts) -> Result<()> {
    let client = client(global)?;
    let inventory = client
        .load_inventory()
        .map_err(|e| miette::miette!("{}", e))?;
    let stats = inventory.server_stats();

    println!("{}", style("Inventory Status").bold());
    println!("{}", style("─".repeat(50)).dim());

    let mut summary = Builder::default();
    summary.push_record(["Metric", "Count"]);
    summary.push_record(["Total Servers", &stats.total.to_string()]);
    summary.push_record(["Online", &stats.online.to_string()]);
    summary.push_record(["Offline", &stats.offline.to_string()]);
    summary.push_record(["Issues", &stats.issues.to_string()]);
    summary.push_record(["Pending", &stats.pending.to_string()]);
    println!("{}", summary.build().with(Style::sharp()));

    if !inventory.applications.is_empty() {
        println!();
        println!("{}", style("Applications").bold());

        let mut apps = Builder::default();
        apps.push_record(["Application", "Status", "Servers"]);
        for app in &inventory.applications {
            let grouped = inventory.servers_in_application(Some(app.id)).len();
            apps.push_record([app.name.as_str(), app.status.as_str(), &grouped.to_string()]);
        }
        let ungrouped = inventory.servers_in_application(None).len();
        if ungrouped > 0 {
            apps.push_record(["(no application)", "-", &ungrouped.to_string()]);
        }
        println!("{}", apps.build().with(Style::sharp()));
    }

    if !global.quiet {
        println!();
        println!(
            "{} server(s) across {} application(s).",
            style(stats.total).cyan(),
            style(inventory.applications.len()).cyan()
        );
    }

    Ok(())
}
