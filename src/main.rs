//! Campaign Crew CLI entry point.

use clap::Parser;
use std::process::ExitCode;

use campaign_crew::cli::{commands, handle_error, Cli, Commands};
use campaign_crew::infrastructure::config::ConfigLoader;
use campaign_crew::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match ConfigLoader::load_with(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&LogConfig::from_settings(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => return handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, &config, cli.json).await,
        Commands::Serve(args) => commands::serve::execute(args, &config, cli.json)
            .await
            .map(|()| ExitCode::SUCCESS),
        Commands::Roles(args) => commands::roles::execute(args, cli.json).map(|()| ExitCode::SUCCESS),
        Commands::Config => commands::config::execute(&config, cli.json).map(|()| ExitCode::SUCCESS),
    };

    result.unwrap_or_else(|err| handle_error(err, cli.json))
}
