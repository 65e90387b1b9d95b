use std::path::PathBuf;

use clap::Parser;

use super::*;

#[test]
fn parse_connect_with_network() {
	let cli = Cli::try_parse_from(["w3w", "connect", "--network", "rootstock"]).unwrap();

	match cli.command {
		Commands::Connect(args) => assert_eq!(args.network, Some(CliNetwork::Rootstock)),
		_ => panic!("Expected Connect command"),
	}
}

#[test]
fn parse_connect_defaults_to_config_network() {
	let cli = Cli::try_parse_from(["w3w", "connect"]).unwrap();

	match cli.command {
		Commands::Connect(args) => assert_eq!(args.network, None),
		_ => panic!("Expected Connect command"),
	}
}

#[test]
fn parse_switch_requires_network() {
	assert!(Cli::try_parse_from(["w3w", "switch"]).is_err());
	assert!(Cli::try_parse_from(["w3w", "switch", "polygon"]).is_err());

	let cli = Cli::try_parse_from(["w3w", "switch", "ethereum"]).unwrap();
	match cli.command {
		Commands::Switch(args) => assert_eq!(Network::from(args.network), Network::Ethereum),
		_ => panic!("Expected Switch command"),
	}
}

#[test]
fn parse_role_none_clears() {
	let cli = Cli::try_parse_from(["w3w", "role", "none"]).unwrap();

	match cli.command {
		Commands::Role(args) => assert_eq!(Option::<Role>::from(args.role), None),
		_ => panic!("Expected Role command"),
	}

	let cli = Cli::try_parse_from(["w3w", "role", "freelancer"]).unwrap();
	match cli.command {
		Commands::Role(args) => assert_eq!(Option::<Role>::from(args.role), Some(Role::Freelancer)),
		_ => panic!("Expected Role command"),
	}
}

#[test]
fn verbose_flag_short_and_long() {
	let short_cli = Cli::try_parse_from(["w3w", "-vv", "status"]).unwrap();
	assert_eq!(short_cli.verbose, 2);

	let long_cli = Cli::try_parse_from(["w3w", "--verbose", "status"]).unwrap();
	assert_eq!(long_cli.verbose, 1);
}

#[test]
fn global_flags_after_subcommand() {
	let cli = Cli::try_parse_from([
		"w3w",
		"disconnect",
		"-f",
		"json",
		"--rpc-url",
		"http://127.0.0.1:8545",
		"--state-file",
		"/tmp/session.json",
	])
	.unwrap();

	assert_eq!(cli.format, OutputFormat::Json);
	let overrides = cli.overrides();
	assert_eq!(overrides.rpc_url.as_deref(), Some("http://127.0.0.1:8545"));
	assert_eq!(overrides.state_file, Some(PathBuf::from("/tmp/session.json")));
	assert_eq!(overrides.poll_interval_ms, None);
}

#[test]
fn watch_interval_becomes_override() {
	let cli = Cli::try_parse_from(["w3w", "watch", "--interval-ms", "250"]).unwrap();
	assert_eq!(cli.overrides().poll_interval_ms, Some(250));
}

#[test]
fn default_format_is_text() {
	let cli = Cli::try_parse_from(["w3w", "status"]).unwrap();
	assert_eq!(cli.format, OutputFormat::Text);
}

#[test]
fn command_name_outlives_parsed_cli() {
	use crate::output::{ErrorCode, ResultBuilder};

	let name = Cli::try_parse_from(["w3w", "switch", "ethereum"]).unwrap().command.name();
	let result = ResultBuilder::<()>::new(name)
		.failure(ErrorCode::SwitchFailed, "network switch failed")
		.build();

	assert_eq!(result.command, "switch");
	assert!(!result.ok);
}
