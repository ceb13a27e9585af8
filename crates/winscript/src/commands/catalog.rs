//! Catalog browsing commands

use anyhow::Result;
use camino::Utf8Path;
use console::style;
use tabled::{settings::Style, Table, Tabled};
use winscript_core::types::CategoryGroup;

use super::{load_catalog, load_runtime_config};
use crate::cli::{CatalogCommands, CatalogListArgs, CatalogTableArgs};
use crate::output;

pub async fn run(cmd: CatalogCommands, config_dir: Option<&Utf8Path>) -> Result<()> {
    match cmd {
        CatalogCommands::List(args) => list(args, config_dir).await,
        CatalogCommands::Optimizations(args) => optimizations(args, config_dir).await,
        CatalogCommands::Tweaks(args) => tweaks(args, config_dir).await,
    }
}

#[derive(Tabled)]
struct ApplicationRow {
    id: String,
    name: String,
    variants: String,
    description: String,
}

async fn list(args: CatalogListArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let config = load_runtime_config(config_dir)?;
    let catalog = load_catalog(&config, &args.source).await?;
    let groups = catalog.search(args.search.as_deref().unwrap_or(""));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if groups.is_empty() {
        output::info("No applications match");
        return Ok(());
    }

    for group in &groups {
        print_group(group);
    }
    Ok(())
}

fn print_group(group: &CategoryGroup<'_>) {
    println!(
        "\n{} {}",
        style(group.category).bold().underlined(),
        style(format!("({})", group.applications.len())).dim()
    );

    let rows: Vec<ApplicationRow> = group
        .applications
        .iter()
        .map(|app| ApplicationRow {
            id: app.id.clone(),
            name: app.name.clone(),
            variants: if app.has_options() {
                app.options
                    .iter()
                    .map(|opt| opt.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            } else {
                "-".to_string()
            },
            description: app.description.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
}

#[derive(Tabled)]
struct NamedRow {
    id: String,
    name: String,
    description: String,
}

async fn optimizations(args: CatalogTableArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let config = load_runtime_config(config_dir)?;
    let catalog = load_catalog(&config, &args.source).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog.optimizations)?);
        return Ok(());
    }

    let rows: Vec<NamedRow> = catalog
        .optimizations
        .iter()
        .map(|opt| NamedRow {
            id: opt.id.clone(),
            name: opt.name.clone(),
            description: opt.description.clone(),
        })
        .collect();
    print_named(rows, "No optimizations in the catalog");
    Ok(())
}

async fn tweaks(args: CatalogTableArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let config = load_runtime_config(config_dir)?;
    let catalog = load_catalog(&config, &args.source).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog.tweaks)?);
        return Ok(());
    }

    let rows: Vec<NamedRow> = catalog
        .tweaks
        .iter()
        .map(|tweak| NamedRow {
            id: tweak.id.clone(),
            name: tweak.name.clone(),
            description: tweak.description.clone(),
        })
        .collect();
    print_named(rows, "No tweaks in the catalog");
    Ok(())
}

fn print_named(rows: Vec<NamedRow>, empty: &str) {
    if rows.is_empty() {
        output::info(empty);
        return;
    }
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
}
