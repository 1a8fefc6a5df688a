use campaign_crew::cli::{Cli, Commands};
use campaign_crew::services::DEFAULT_REQUEST;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_generate_with_request() {
    let cli = Cli::try_parse_from(vec![
        "campaign-crew",
        "generate",
        "Launch a solar backpack",
        "--max-steps",
        "12",
        "--transcript",
    ])
    .unwrap();

    match cli.command {
        Commands::Generate(args) => {
            assert_eq!(args.request, "Launch a solar backpack");
            assert_eq!(args.max_steps, Some(12));
            assert!(args.transcript);
        }
        _ => panic!("Wrong top-level command"),
    }
    assert!(!cli.json);
}

#[test]
fn test_parse_generate_defaults_request() {
    let cli = Cli::try_parse_from(vec!["campaign-crew", "generate"]).unwrap();

    match cli.command {
        Commands::Generate(args) => {
            assert_eq!(args.request, DEFAULT_REQUEST);
            assert!(args.max_steps.is_none());
            assert!(!args.transcript);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_generate_rejects_zero_steps() {
    let result = Cli::try_parse_from(vec!["campaign-crew", "generate", "x", "-m", "0"]);
    assert!(result.is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(vec![
        "campaign-crew",
        "roles",
        "--prompts",
        "--json",
        "--config",
        "team.yaml",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("team.yaml")));
    match cli.command {
        Commands::Roles(args) => assert!(args.prompts),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_serve_overrides() {
    let cli = Cli::try_parse_from(vec![
        "campaign-crew",
        "serve",
        "--host",
        "0.0.0.0",
        "-p",
        "9000",
        "--cors",
    ])
    .unwrap();

    match cli.command {
        Commands::Serve(args) => {
            assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
            assert_eq!(args.port, Some(9000));
            assert!(args.cors);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_config_command() {
    let cli = Cli::try_parse_from(vec!["campaign-crew", "config"]).unwrap();
    assert!(matches!(cli.command, Commands::Config));
}

#[test]
fn test_unknown_command_fails() {
    assert!(Cli::try_parse_from(vec!["campaign-crew", "swarm"]).is_err());
}
