//! `sit list` command - List servers or applications

use miette::Result;

use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::type_name;
use crate::core::{EntityKind, Inventory};

use super::{client, parse_entity_kind};

const SERVER_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 8),
    ColumnDef::new("name", "NAME", 24),
    ColumnDef::new("hostname", "HOSTNAME", 28),
    ColumnDef::new("port", "PORT", 6),
    ColumnDef::new("type", "TYPE", 12),
    ColumnDef::new("status", "STATUS", 10),
    ColumnDef::new("application", "APPLICATION", 24),
];

const APPLICATION_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 8),
    ColumnDef::new("name", "NAME", 24),
    ColumnDef::new("status", "STATUS", 10),
    ColumnDef::new("servers", "SERVERS", 8),
    ColumnDef::new("description", "DESCRIPTION", 40),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Entity kind to list (server, application)
    #[arg(value_parser = parse_entity_kind)]
    pub kind: EntityKind,

    /// Case-insensitive substring filter (name, hostname, type, owner, application)
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let client = client(global)?;
    let inventory = client
        .load_inventory()
        .map_err(|e| miette::miette!("{}", e))?;
    let query = args.search.as_deref().unwrap_or("");

    match args.kind {
        EntityKind::Server => list_servers(&inventory, query, global),
        EntityKind::Application => list_applications(&inventory, query, global),
    }

    Ok(())
}

fn list_servers(inventory: &Inventory, query: &str, global: &GlobalOpts) {
    let servers = inventory.filter_servers(query);

    if global.format == OutputFormat::Json {
        match serde_json::to_string_pretty(&servers) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("failed to serialize servers: {e}"),
        }
        return;
    }

    let rows: Vec<TableRow> = servers
        .iter()
        .map(|s| {
            TableRow::new(s.id)
                .cell("id", CellValue::Id(s.id))
                .cell("name", CellValue::Text(s.name.clone()))
                .cell("hostname", CellValue::Text(s.hostname.clone()))
                .cell("port", CellValue::Number(s.port))
                .cell("type", CellValue::Text(type_name(&s.server_type).to_string()))
                .cell("status", CellValue::Status(s.status.clone()))
                .cell(
                    "application",
                    CellValue::Text(inventory.application_name(s.application_id)),
                )
        })
        .collect();

    TableFormatter::new(SERVER_COLUMNS, "server")
        .quiet(global.quiet)
        .output(&rows, global.format);
}

fn list_applications(inventory: &Inventory, query: &str, global: &GlobalOpts) {
    let applications = inventory.filter_applications(query);

    if global.format == OutputFormat::Json {
        match serde_json::to_string_pretty(&applications) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("failed to serialize applications: {e}"),
        }
        return;
    }

    let rows: Vec<TableRow> = applications
        .iter()
        .map(|a| {
            let grouped = inventory.servers_in_application(Some(a.id)).len();
            TableRow::new(a.id)
                .cell("id", CellValue::Id(a.id))
                .cell("name", CellValue::Text(a.name.clone()))
                .cell("status", CellValue::Status(a.status.clone()))
                .cell("servers", CellValue::Number(grouped as i64))
                .cell(
                    "description",
                    match &a.description {
                        Some(d) if !d.is_empty() => CellValue::Text(d.clone()),
                        _ => CellValue::Empty,
                    },
                )
        })
        .collect();

    TableFormatter::new(APPLICATION_COLUMNS, "application")
        .quiet(global.quiet)
        .output(&rows, global.format);
}
