//! Quay CLI - resolve configuration resources from the command line

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use quay::util::diagnostic;
use quay::util::GlobalContext;
use quay::ResourceError;

/// Exit code for a resource that was searched for and not found.
const EXIT_NOT_FOUND: i32 = 2;

fn main() {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("quay=debug")
    } else {
        EnvFilter::new("quay=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        std::process::exit(report(&e, color));
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    let mut ctx = GlobalContext::new()?.load_config(cli.config.as_deref())?;
    ctx.set_verbose(cli.verbose);
    ctx.set_color(color);

    // Execute command
    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args, &ctx),
        Commands::Candidates(args) => commands::candidates::execute(args, &ctx),
        Commands::Locations(args) => commands::locations::execute(args, &ctx),
        Commands::Check(args) => commands::check::execute(args, &ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print an error and pick the exit code.
fn report(err: &anyhow::Error, color: bool) -> i32 {
    match err.downcast_ref::<ResourceError>() {
        Some(resource_err) => {
            diagnostic::emit(&resource_err.to_diagnostic(), color);
            if resource_err.is_not_found() {
                EXIT_NOT_FOUND
            } else {
                1
            }
        }
        None => {
            eprintln!("error: {:#}", err);
            1
        }
    }
}
