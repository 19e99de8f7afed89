//! `sit import` command - Import entities from CSV files
//!
//! One flow handles both entity kinds: parse the upload, map CSV columns
//! onto the kind's fields (auto-suggested, then adjusted via `--map` or
//! prompts), materialize the rows, and submit them as a single batch.

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Select};
use miette::{IntoDiagnostic, Result};
use serde_json::Value;
use std::path::PathBuf;

use crate::api::StorageClient;
use crate::core::EntityKind;
use crate::import::{field_spec, field_specs, ImportSession, Record};

use crate::cli::GlobalOpts;

use super::{client, parse_entity_kind};

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Entity kind to import (server, application)
    #[arg(value_parser = parse_entity_kind)]
    pub kind: Option<EntityKind>,

    /// CSV file to import
    pub file: Option<PathBuf>,

    /// Generate a CSV template for the entity kind
    #[arg(long)]
    pub template: bool,

    /// Map a field to a CSV header (repeatable, e.g. --map hostname=Host;
    /// an empty header unsets the field)
    #[arg(long, value_name = "FIELD=HEADER")]
    pub map: Vec<String>,

    /// Accept the current mapping without prompting
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Validate and materialize without submitting
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    if args.template {
        let kind = args.kind.ok_or_else(|| {
            miette::miette!(
                "Entity kind required for template generation. Usage: sit import --template server"
            )
        })?;
        return generate_template(kind);
    }

    let kind = args
        .kind
        .ok_or_else(|| miette::miette!("Entity kind required. Usage: sit import server data.csv"))?;

    let file_path = args
        .file
        .clone()
        .ok_or_else(|| miette::miette!("CSV file required. Usage: sit import server data.csv"))?;

    if !file_path.exists() {
        return Err(miette::miette!("File not found: {}", file_path.display()));
    }
    let text = std::fs::read_to_string(&file_path).into_diagnostic()?;

    println!(
        "{} Importing {}s from {}{}",
        style("→").blue(),
        style(kind.as_str()).cyan(),
        style(file_path.display()).yellow(),
        if args.dry_run {
            style(" (dry run)").dim().to_string()
        } else {
            String::new()
        }
    );

    let mut session =
        ImportSession::new(kind, &text).map_err(|e| miette::miette!("{}", e))?;

    apply_overrides(&mut session, &args.map)?;

    let interactive = !args.yes && !args.dry_run && console::user_attended();
    if interactive {
        adjust_mapping(&mut session)?;
    }

    println!();
    print_mapping(&session);
    println!();

    let records = session.confirm().map_err(|e| miette::miette!("{}", e))?;
    let dropped = session.row_count() - records.len();

    if args.dry_run {
        for record in &records {
            println!("{} would import {}", style("○").dim(), render_record(record));
        }
        print_summary(&session, &records, dropped, None);
        return Ok(());
    }

    let client = client(global)?;
    submit(&client, &session, &records, interactive)?;

    // the success payload is not trusted to enumerate rows; refetch instead
    let loaded = match kind {
        EntityKind::Server => client.list_servers().map(|s| s.len()),
        EntityKind::Application => client.list_applications().map(|a| a.len()),
    }
    .map_err(|e| miette::miette!("{}", e))?;

    print_summary(&session, &records, dropped, Some(loaded));
    Ok(())
}

/// Submit the batch. A rejected submit leaves the session (and its mapping)
/// intact; interactively the user may retry without re-uploading.
fn submit(
    client: &StorageClient,
    session: &ImportSession,
    records: &[Record],
    interactive: bool,
) -> Result<()> {
    loop {
        match client.import(session.kind(), records) {
            Ok(()) => return Ok(()),
            Err(err) => {
                eprintln!("{} {}", style("✗").red(), err);
                let retry = interactive
                    && Confirm::with_theme(&ColorfulTheme::default())
                        .with_prompt("Retry the import with the same mapping?")
                        .default(false)
                        .interact()
                        .into_diagnostic()?;
                if !retry {
                    return Err(miette::miette!("{}", err));
                }
            }
        }
    }
}

/// Apply `--map field=HEADER` overrides onto the auto-suggested mapping
fn apply_overrides(session: &mut ImportSession, overrides: &[String]) -> Result<()> {
    let kind = session.kind();
    for entry in overrides {
        let (field, header) = entry.split_once('=').ok_or_else(|| {
            miette::miette!("Invalid --map value '{}'. Expected FIELD=HEADER", entry)
        })?;
        let spec = field_spec(kind, field.trim()).ok_or_else(|| {
            miette::miette!(
                "Unknown field '{}' for {} import. Fields: {}",
                field,
                kind.as_str(),
                field_specs(kind)
                    .iter()
                    .map(|f| f.name)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?;
        let header = header.trim();
        if header.is_empty() {
            session.mapping_mut().unset(spec.name);
        } else if !session.headers().iter().any(|h| h == header) {
            return Err(miette::miette!(
                "Header '{}' not found in the CSV. Headers: {}",
                header,
                session.headers().join(", ")
            ));
        } else {
            session.mapping_mut().set(spec.name, header.to_string());
        }
    }
    Ok(())
}

/// Walk every field with a Select over the CSV headers
fn adjust_mapping(session: &mut ImportSession) -> Result<()> {
    let theme = ColorfulTheme::default();
    let headers: Vec<String> = session.headers().to_vec();
    let mut items: Vec<String> = vec!["(unmapped)".to_string()];
    items.extend(headers.iter().cloned());

    for spec in session.specs() {
        let current = session
            .mapping()
            .get(spec.name)
            .and_then(|h| headers.iter().position(|x| x == h))
            .map(|i| i + 1)
            .unwrap_or(0);

        let prompt = if spec.required {
            format!("Column for {} (required)", spec.label)
        } else {
            format!("Column for {}", spec.label)
        };

        let chosen = Select::with_theme(&theme)
            .with_prompt(prompt)
            .items(&items)
            .default(current)
            .interact()
            .into_diagnostic()?;

        if chosen == 0 {
            session.mapping_mut().unset(spec.name);
        } else {
            session.mapping_mut().set(spec.name, headers[chosen - 1].clone());
        }
    }
    Ok(())
}

fn print_mapping(session: &ImportSession) {
    println!("{}", style("Column mapping").bold());
    for spec in session.specs() {
        let marker = if spec.required { "*" } else { " " };
        let assigned = match session.mapping().get(spec.name) {
            Some(header) => style(header).cyan().to_string(),
            None => style("(unmapped)").dim().to_string(),
        };
        println!("  {:<12}{} ← {}", spec.label, marker, assigned);
    }
}

fn render_record(record: &Record) -> String {
    record
        .iter()
        .map(|(k, v)| match v {
            Value::String(s) => format!("{k}={s}"),
            other => format!("{k}={other}"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_summary(
    session: &ImportSession,
    records: &[Record],
    dropped: usize,
    loaded: Option<usize>,
) {
    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Import Summary").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  Rows processed:   {}", style(session.row_count()).cyan());
    println!("  Records imported: {}", style(records.len()).green());
    if dropped > 0 {
        println!("  Blank rows dropped: {}", style(dropped).dim());
    }
    match loaded {
        Some(count) => println!(
            "  {} list now has {} entries",
            session.kind().label(),
            style(count).cyan()
        ),
        None => println!(
            "{}",
            style("Dry run complete. Nothing was submitted.").yellow()
        ),
    }
}

/// Generate a CSV template for an entity kind
fn generate_template(kind: EntityKind) -> Result<()> {
    let headers: Vec<&str> = field_specs(kind).iter().map(|f| f.name).collect();
    println!("{}", headers.join(","));
    match kind {
        EntityKind::Server => println!("web1,10.0.0.1,80,http,Jane Smith"),
        EntityKind::Application => println!("Storefront,Customer-facing web shop"),
    }

    // usage hint goes to stderr so redirected output stays clean
    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to file: sit import --template {} > {}s.csv",
        style("→").blue(),
        kind.as_str(),
        kind.as_str()
    );
    Ok(())
}
