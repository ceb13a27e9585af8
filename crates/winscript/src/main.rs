//! winscript CLI - Windows setup script configurator
//!
//! This is the main entry point for the winscript command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Must run before any TLS operation
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let config_dir = cli.config_dir.as_deref();
    match cli.command {
        Commands::Version(args) => commands::version::run(args),
        Commands::Serve(args) => commands::serve::run(args, config_dir).await,
        Commands::Generate(args) => commands::generate::run(args, config_dir).await,
        Commands::Token(args) => commands::token::run(args, config_dir).await,
        Commands::Catalog(args) => commands::catalog::run(args, config_dir).await,
        Commands::Java(args) => commands::java::run(args),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

/// Initialize tracing with appropriate verbosity
///
/// Logs go to stderr so a script printed on stdout can be piped as is.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
