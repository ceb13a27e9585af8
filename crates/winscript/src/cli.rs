//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// winscript - Build one PowerShell script that sets up a Windows machine
#[derive(Parser, Debug)]
#[command(name = "winscript")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding config.yaml (default: ~/.winscript)
    #[arg(long, global = true, env = "WINSCRIPT_CONFIG_DIR")]
    pub config_dir: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version(VersionArgs),

    /// Serve the script-generation endpoint
    Serve(ServeArgs),

    /// Generate an installation script
    Generate(GenerateArgs),

    /// Encode or decode shareable selection tokens
    #[command(subcommand)]
    Token(TokenCommands),

    /// Browse the catalog
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Java versions known to the installer
    #[command(subcommand)]
    Java(JavaCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Where the catalog comes from
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogSource {
    /// Read the catalog from a local JSON/YAML file instead of the hosted store
    #[arg(long, value_name = "FILE")]
    pub catalog_file: Option<Utf8PathBuf>,
}

// Serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides server.bind)
    #[arg(short, long)]
    pub bind: Option<String>,

    #[command(flatten)]
    pub source: CatalogSource,
}

// Generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Request file: {selectedApps, selectedOptimizations, selectedTweaks}
    #[arg(short, long, value_name = "FILE", conflicts_with = "token", required_unless_present = "token")]
    pub selection: Option<Utf8PathBuf>,

    /// Selection token, or a whole link carrying one
    #[arg(short, long)]
    pub token: Option<String>,

    #[command(flatten)]
    pub source: CatalogSource,

    /// Write the script to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,

    /// Also copy the script to the clipboard
    #[arg(long)]
    pub copy: bool,
}

// Token commands
#[derive(Subcommand, Debug)]
pub enum TokenCommands {
    /// Encode a selection file into a token
    Encode(TokenEncodeArgs),

    /// Decode a token
    Decode(TokenDecodeArgs),
}

#[derive(Args, Debug)]
pub struct TokenEncodeArgs {
    /// Selection file: {apps, optimizations, tweaks}
    #[arg(short, long, value_name = "FILE")]
    pub selection: Utf8PathBuf,

    /// Print a full link on this base URL instead of the bare token
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct TokenDecodeArgs {
    /// Token, or a whole link carrying one
    pub token: String,

    /// Validate against the catalog and drop stale entries
    #[arg(long)]
    pub validate: bool,

    #[command(flatten)]
    pub source: CatalogSource,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Catalog commands
#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List applications by category
    List(CatalogListArgs),

    /// List optimizations
    Optimizations(CatalogTableArgs),

    /// List tweaks
    Tweaks(CatalogTableArgs),
}

#[derive(Args, Debug)]
pub struct CatalogListArgs {
    /// Only show applications whose name or description matches
    #[arg(short, long)]
    pub search: Option<String>,

    #[command(flatten)]
    pub source: CatalogSource,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CatalogTableArgs {
    #[command(flatten)]
    pub source: CatalogSource,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Java commands
#[derive(Subcommand, Debug)]
pub enum JavaCommands {
    /// List supported versions
    List(JavaListArgs),

    /// Print the installer block for one version
    Render(JavaRenderArgs),
}

#[derive(Args, Debug)]
pub struct JavaListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct JavaRenderArgs {
    /// Exact version, e.g. 21.0.2
    #[arg(id = "java_version", value_name = "VERSION")]
    pub version: String,
}

// Completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
