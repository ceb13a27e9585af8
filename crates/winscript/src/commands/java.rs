//! Java version commands

use anyhow::{bail, Result};
use tabled::{settings::Style, Table, Tabled};
use winscript_core::java;

use crate::cli::{JavaCommands, JavaListArgs, JavaRenderArgs};

pub fn run(cmd: JavaCommands) -> Result<()> {
    match cmd {
        JavaCommands::List(args) => list(args),
        JavaCommands::Render(args) => render(args),
    }
}

#[derive(Tabled)]
struct VersionRow {
    version: &'static str,
    folder: String,
    archive: &'static str,
}

fn list(args: JavaListArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(java::versions())?);
        return Ok(());
    }

    let rows: Vec<VersionRow> = java::versions()
        .iter()
        .map(|entry| VersionRow {
            version: entry.version,
            folder: entry.jdk_folder_name(),
            archive: entry.zip_url,
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
    Ok(())
}

fn render(args: JavaRenderArgs) -> Result<()> {
    if java::resolve(&args.version).is_none() {
        let known: Vec<_> = java::versions().iter().map(|e| e.version).collect();
        bail!(
            "Java version {} is not supported (known: {})",
            args.version,
            known.join(", ")
        );
    }

    println!("{}", java::render(&args.version)?);
    Ok(())
}
