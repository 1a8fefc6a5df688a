//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::{generate::GenerateArgs, roles::RolesArgs, serve::ServeArgs};

#[derive(Parser, Debug)]
#[command(name = "campaign-crew")]
#[command(
    about = "Campaign Crew - marketing agents that collaborate on a campaign until one gives a final answer",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Extra YAML config merged over .campaign-crew/config.yaml
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the crew on a campaign request
    Generate(GenerateArgs),

    /// Serve the web form and JSON API
    Serve(ServeArgs),

    /// List the crew's roles, routing and tools
    Roles(RolesArgs),

    /// Print the effective configuration (secrets omitted)
    Config,
}
