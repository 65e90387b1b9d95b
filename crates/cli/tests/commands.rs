//! Command flows against a scripted provider and a temporary state file.

use std::path::Path;
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use w3w::{ConnectionState, JsonFileStore, MockProvider, Network, NextStep, RecordingNotifier, Role, WalletSession};
use w3w_cli::commands::{self, connect, disconnect, role, status, switch};
use w3w_cli::config::Settings;
use w3w_cli::error::CliError;
use w3w_cli::output::{ErrorCode, SessionData};
use w3w_protocol::{ProviderRpcError, methods};

type TestSession = WalletSession<MockProvider, JsonFileStore, RecordingNotifier>;

fn session_at(path: &Path, provider: &MockProvider) -> TestSession {
	let mut wallet = WalletSession::new(Some(provider.clone()), JsonFileStore::open(path), RecordingNotifier::new());
	wallet.initialize();
	wallet
}

fn settings_for(dir: &TempDir) -> Settings {
	Settings {
		rpc_url: None,
		state_file: dir.path().join("session.json"),
		poll_interval: Duration::from_millis(2000),
		default_network: Network::Ethereum,
	}
}

#[tokio::test]
async fn connect_then_status_after_restart() {
	let tmp = TempDir::new().unwrap();
	let path = tmp.path().join("session.json");
	let provider = MockProvider::new();
	provider
		.respond(methods::ETH_REQUEST_ACCOUNTS, json!(["0xABC"]))
		.respond(methods::ETH_CHAIN_ID, json!("0x1e"));

	let mut wallet = session_at(&path, &provider);
	let data = connect::execute(&mut wallet, Network::Rootstock).await.unwrap();
	assert_eq!(data.state, ConnectionState::Connected);
	assert_eq!(data.next_step, NextStep::ChooseRole);

	let data = role::execute(&mut wallet, Some(Role::Freelancer));
	assert_eq!(data.role.as_deref(), Some("freelancer"));
	drop(wallet);

	let restarted = session_at(&path, &MockProvider::new());
	let data = status::execute(&restarted);
	assert_eq!(
		data,
		SessionData {
			state: ConnectionState::Connected,
			account: Some("0xABC".into()),
			network: Some("rootstock".into()),
			chain_id: Some("0x1e".into()),
			role: Some("freelancer".into()),
			next_step: NextStep::Continue(Role::Freelancer),
		}
	);
}

#[tokio::test]
async fn connect_with_switch_reports_connected() {
	let tmp = TempDir::new().unwrap();
	let provider = MockProvider::new();
	provider
		.respond(methods::ETH_REQUEST_ACCOUNTS, json!(["0xABC"]))
		.respond(methods::ETH_CHAIN_ID, json!("0x1"))
		.respond(methods::WALLET_SWITCH_ETHEREUM_CHAIN, json!(null));

	let mut wallet = session_at(&tmp.path().join("session.json"), &provider);
	let data = connect::execute(&mut wallet, Network::Rootstock).await.unwrap();

	assert_eq!(data.state, ConnectionState::Connected);
	assert_eq!(data.network.as_deref(), Some("rootstock"));
	assert_eq!(data.chain_id.as_deref(), Some("0x1e"));
}

#[tokio::test]
async fn switch_failure_surfaces_switch_failed() {
	let tmp = TempDir::new().unwrap();
	let provider = MockProvider::new();
	provider.fail(methods::WALLET_SWITCH_ETHEREUM_CHAIN, ProviderRpcError::user_rejected());

	let mut wallet = session_at(&tmp.path().join("session.json"), &provider);
	let err: CliError = switch::execute(&mut wallet, Network::Rootstock).await.unwrap_err();

	assert_eq!(err.to_command_error().code, ErrorCode::SwitchFailed);
	assert_eq!(wallet.notifier().last().unwrap().message, "Failed to switch network");
}

#[test]
fn disconnect_twice_leaves_empty_state_file() {
	let tmp = TempDir::new().unwrap();
	let path = tmp.path().join("session.json");
	std::fs::write(&path, r#"{"walletAccount":"0xabc","userRole":"client","currentNetwork":"ethereum"}"#).unwrap();

	let mut wallet = session_at(&path, &MockProvider::new());
	assert_eq!(status::execute(&wallet).state, ConnectionState::Connected);

	let first = disconnect::execute(&mut wallet);
	let second = disconnect::execute(&mut wallet);

	assert_eq!(first, second);
	assert_eq!(second.state, ConnectionState::Disconnected);
	let persisted: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
	assert_eq!(persisted, json!({}));
}

#[tokio::test]
async fn assembled_session_without_rpc_url_has_no_provider() {
	let tmp = TempDir::new().unwrap();
	let mut wallet = commands::assemble(&settings_for(&tmp)).unwrap();
	wallet.initialize();

	assert!(!wallet.has_provider());
	let err: CliError = connect::execute(&mut wallet, Network::Ethereum).await.unwrap_err();
	let cmd = err.to_command_error();
	assert_eq!(cmd.code, ErrorCode::ProviderUnavailable);
	assert_eq!(err.exit_code(), 1);
	assert_eq!(wallet.session().connection_state(), ConnectionState::Disconnected);
}

#[test]
fn assembled_session_with_rpc_url_has_provider() {
	let tmp = TempDir::new().unwrap();
	let mut settings = settings_for(&tmp);
	settings.rpc_url = Some("http://127.0.0.1:8545".parse().unwrap());

	let wallet = commands::assemble(&settings).unwrap();
	assert!(wallet.has_provider());
	assert_eq!(wallet.provider().unwrap().endpoint(), "http://127.0.0.1:8545/");
}
