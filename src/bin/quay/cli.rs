//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Quay - resolve configuration resources across ordered search locations
#[derive(Parser)]
#[command(name = "quay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file applied on top of the global and project config
    #[arg(long, global = true, value_name = "FILE", env = "QUAY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a resource and write its contents
    Resolve(ResolveArgs),

    /// Show the candidate file names tried for a profile
    Candidates(CandidatesArgs),

    /// Show the search locations for a request
    Locations(LocationsArgs),

    /// Check values for path traversal
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Application name
    pub application: String,

    /// Comma-separated profiles (e.g. `local,cloud`)
    pub profile: String,

    /// Label (branch or tag) of the configuration source
    pub label: String,

    /// Relative path of the resource
    pub path: String,

    /// Package a resolved directory as a ZIP archive
    #[arg(long)]
    pub archive: bool,

    /// Write the resource to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Extra search location, searched before the configured ones
    #[arg(short = 'l', long = "location", value_name = "LOCATION")]
    pub locations: Vec<String>,

    /// Search locations last-to-first
    #[arg(long)]
    pub reverse: bool,
}

#[derive(Args)]
pub struct CandidatesArgs {
    /// Comma-separated profiles
    pub profile: String,

    /// Relative path of the resource
    pub path: String,
}

#[derive(Args)]
pub struct LocationsArgs {
    /// Application name
    pub application: String,

    /// Comma-separated profiles
    pub profile: String,

    /// Label (branch or tag) of the configuration source
    pub label: String,

    /// Extra search location, listed before the configured ones
    #[arg(short = 'l', long = "location", value_name = "LOCATION")]
    pub locations: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Values to check
    #[arg(required = true)]
    pub values: Vec<String>,

    /// Check the values as search locations rather than resource paths
    #[arg(long)]
    pub location: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
