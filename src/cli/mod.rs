//! Command-line interface.

pub mod commands;
pub mod output;
pub mod service;
pub mod types;

use std::process::ExitCode;

pub use types::{Cli, Commands};

/// Report a command error and produce the failure exit code.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ExitCode {
    if json_mode {
        let body = serde_json::json!({
            "error": format!("{err:#}"),
            "code": "ERROR",
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{} {err:#}", console::style("Error:").red().bold());
    }
    ExitCode::FAILURE
}
