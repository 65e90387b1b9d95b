use w3w::{Address, Network, Role};

use super::*;

fn connected_session() -> Session {
	Session {
		account: Some(Address::from("0x71C7656EC7ab88b098defB751B7401B5f6d8976F")),
		network: Some(Network::Rootstock),
		connecting: false,
		role: None,
	}
}

#[test]
fn result_builder_success() {
	let result: CommandResult<SessionData> = ResultBuilder::new("status")
		.data(SessionData::from(&connected_session()))
		.build();

	assert!(result.ok);
	assert_eq!(result.command, "status");
	assert_eq!(result.schema_version, SCHEMA_VERSION);
	assert!(result.error.is_none());
	assert!(result.timings.is_some());
}

#[test]
fn result_builder_error() {
	let result: CommandResult<SessionData> = ResultBuilder::new("switch")
		.failure(ErrorCode::SwitchFailed, "network switch failed")
		.build();

	assert!(!result.ok);
	assert!(result.data.is_none());
	assert_eq!(result.error.as_ref().unwrap().code, ErrorCode::SwitchFailed);
}

#[test]
fn result_without_data_is_not_ok() {
	let result: CommandResult<()> = ResultBuilder::new("status").build();
	assert!(!result.ok);
}

#[test]
fn error_code_display_matches_serde() {
	for code in [ErrorCode::ProviderUnavailable, ErrorCode::ChainUnrecognized, ErrorCode::InvalidInput] {
		let serialized = serde_json::to_value(code).unwrap();
		assert_eq!(serialized, serde_json::Value::String(code.to_string()));
	}
}

#[test]
fn output_format_parse() {
	use clap::ValueEnum;

	assert_eq!(OutputFormat::from_str("json", false).unwrap(), OutputFormat::Json);
	assert_eq!(OutputFormat::from_str("TEXT", true).unwrap(), OutputFormat::Text);
	assert!(OutputFormat::from_str("toml", true).is_err());
	assert_eq!(OutputFormat::default(), OutputFormat::Text);
}

#[test]
fn session_data_serializes_camel_case() {
	let result: CommandResult<SessionData> = ResultBuilder::new("connect")
		.data(SessionData::from(&connected_session()))
		.untimed()
		.build();

	let json = serde_json::to_value(&result).unwrap();
	assert_eq!(json["ok"], true);
	assert_eq!(json["schemaVersion"], 1);
	assert_eq!(json["data"]["state"], "connected");
	assert_eq!(json["data"]["network"], "rootstock");
	assert_eq!(json["data"]["chainId"], "0x1e");
	assert_eq!(json["data"]["nextStep"], serde_json::json!({"step": "chooseRole"}));
	assert!(json["data"].get("role").is_none());
	assert!(json.get("timings").is_none());
}

#[test]
fn session_text_lists_fields() {
	let mut session = connected_session();
	session.role = Some(Role::Client);

	let text = SessionData::from(&session).to_text();

	assert!(text.contains("State:   connected"));
	assert!(text.contains("Network: rootstock (0x1e)"));
	assert!(text.contains("Role:    client"));
	assert!(text.contains("Next:    continue as client"));
}

#[test]
fn disconnected_text_prompts_for_wallet() {
	let text = SessionData::from(&Session::default()).to_text();
	assert_eq!(text, "State:   disconnected\nNext:    connect a wallet");
}

#[test]
fn event_text_abbreviates_account() {
	let data = EventData {
		outcome: EventOutcome::AccountChanged(Address::from("0x71C7656EC7ab88b098defB751B7401B5f6d8976F")),
		session: SessionData::from(&connected_session()),
	};
	assert_eq!(data.to_text(), "[event] account changed to 0x71C7...976F");
}
