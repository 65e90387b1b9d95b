//! CLI configuration: config file, environment and flag precedence.
//!
//! Files live under the platform config directory (`~/.config/w3w/` on
//! Linux):
//!
//! - `config.json` - [`CliConfig`], written by hand
//! - `session.json` - the persisted wallet session (see [`w3w::JsonFileStore`])
//!
//! Every setting resolves as flag > environment > config file > default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;
use w3w::Network;

use crate::error::{CliError, Result};

/// Schema version for the config file.
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable naming the JSON-RPC endpoint.
pub const RPC_URL_ENV: &str = "W3W_RPC_URL";

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

const APP_DIR: &str = "w3w";
const CONFIG_FILE: &str = "config.json";
const STATE_FILE: &str = "session.json";

/// Contents of `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
	#[serde(default)]
	pub schema: u32,
	/// JSON-RPC endpoint acting as the wallet provider.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rpc_url: Option<String>,
	/// Poll interval of `watch`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub poll_interval_ms: Option<u64>,
	/// Network `connect` asks for when `--network` is not given.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_network: Option<Network>,
}

impl CliConfig {
	/// Creates a config with current [`SCHEMA_VERSION`].
	pub fn new() -> Self {
		Self {
			schema: SCHEMA_VERSION,
			..Default::default()
		}
	}
}

/// Default file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
	pub config_file: PathBuf,
	pub state_file: PathBuf,
}

impl ConfigPaths {
	/// Paths under the platform config directory.
	pub fn platform() -> Self {
		let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
		Self::in_dir(base.join(APP_DIR))
	}

	pub fn in_dir(dir: impl AsRef<Path>) -> Self {
		let dir = dir.as_ref();
		Self {
			config_file: dir.join(CONFIG_FILE),
			state_file: dir.join(STATE_FILE),
		}
	}
}

/// Reads a config file. A missing file is the default config.
pub fn load_config(path: &Path) -> Result<CliConfig> {
	let content = match fs::read_to_string(path) {
		Ok(content) => content,
		Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
			debug!(target = "w3w.config", path = %path.display(), "no config file");
			return Ok(CliConfig::default());
		}
		Err(err) => return Err(err.into()),
	};

	serde_json::from_str(&content).map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
	pub rpc_url: Option<String>,
	pub state_file: Option<PathBuf>,
	pub config_file: Option<PathBuf>,
	pub poll_interval_ms: Option<u64>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
	/// `None` means no provider: wallet operations report it as unavailable.
	pub rpc_url: Option<Url>,
	pub state_file: PathBuf,
	pub poll_interval: Duration,
	pub default_network: Network,
}

impl Settings {
	/// Resolves settings from flags, the process environment and the config file.
	pub fn load(overrides: &Overrides) -> Result<Self> {
		let paths = ConfigPaths::platform();
		let config_file = overrides.config_file.clone().unwrap_or_else(|| paths.config_file.clone());
		let file = load_config(&config_file)?;
		let env_rpc_url = std::env::var(RPC_URL_ENV).ok();
		Self::resolve(overrides, env_rpc_url, file, &paths)
	}

	/// Applies precedence: flag > environment > config file > default.
	pub fn resolve(overrides: &Overrides, env_rpc_url: Option<String>, file: CliConfig, paths: &ConfigPaths) -> Result<Self> {
		let rpc_url = overrides
			.rpc_url
			.clone()
			.or(env_rpc_url.filter(|value| !value.trim().is_empty()))
			.or(file.rpc_url)
			.map(|raw| parse_rpc_url(&raw))
			.transpose()?;

		let poll_interval_ms = overrides
			.poll_interval_ms
			.or(file.poll_interval_ms)
			.unwrap_or(DEFAULT_POLL_INTERVAL_MS);
		if poll_interval_ms == 0 {
			return Err(CliError::Config("poll interval must be greater than zero".into()));
		}

		Ok(Self {
			rpc_url,
			state_file: overrides.state_file.clone().unwrap_or_else(|| paths.state_file.clone()),
			poll_interval: Duration::from_millis(poll_interval_ms),
			default_network: file.default_network.unwrap_or_default(),
		})
	}
}

fn parse_rpc_url(raw: &str) -> Result<Url> {
	let url = Url::parse(raw.trim()).map_err(|e| CliError::Config(format!("invalid RPC URL {raw:?}: {e}")))?;
	match url.scheme() {
		"http" | "https" => Ok(url),
		scheme => Err(CliError::Config(format!(
			"invalid RPC URL {raw:?}: unsupported scheme {scheme}"
		))),
	}
}

#[cfg(test)]
mod tests {
	use tempfile::TempDir;

	use super::*;

	fn paths() -> ConfigPaths {
		ConfigPaths::in_dir("/tmp/w3w-test")
	}

	#[test]
	fn defaults_without_any_source() {
		let settings = Settings::resolve(&Overrides::default(), None, CliConfig::default(), &paths()).unwrap();

		assert_eq!(settings.rpc_url, None);
		assert_eq!(settings.state_file, PathBuf::from("/tmp/w3w-test/session.json"));
		assert_eq!(settings.poll_interval, Duration::from_millis(2000));
		assert_eq!(settings.default_network, Network::Ethereum);
	}

	#[test]
	fn flag_beats_env_beats_file() {
		let file = CliConfig {
			rpc_url: Some("http://file.example:8545".into()),
			..CliConfig::new()
		};
		let env = Some("http://env.example:8545".to_string());

		let from_file = Settings::resolve(&Overrides::default(), None, file.clone(), &paths()).unwrap();
		assert_eq!(from_file.rpc_url.unwrap().host_str(), Some("file.example"));

		let from_env = Settings::resolve(&Overrides::default(), env.clone(), file.clone(), &paths()).unwrap();
		assert_eq!(from_env.rpc_url.unwrap().host_str(), Some("env.example"));

		let overrides = Overrides {
			rpc_url: Some("https://flag.example".into()),
			..Default::default()
		};
		let from_flag = Settings::resolve(&overrides, env, file, &paths()).unwrap();
		assert_eq!(from_flag.rpc_url.unwrap().host_str(), Some("flag.example"));
	}

	#[test]
	fn blank_env_value_is_ignored() {
		let file = CliConfig {
			rpc_url: Some("http://file.example".into()),
			..CliConfig::new()
		};
		let settings = Settings::resolve(&Overrides::default(), Some("  ".into()), file, &paths()).unwrap();
		assert_eq!(settings.rpc_url.unwrap().host_str(), Some("file.example"));
	}

	#[test]
	fn invalid_rpc_urls_are_config_errors() {
		for raw in ["not a url", "ws://node.example"] {
			let overrides = Overrides {
				rpc_url: Some(raw.into()),
				..Default::default()
			};
			let err = Settings::resolve(&overrides, None, CliConfig::default(), &paths()).unwrap_err();
			assert!(matches!(err, CliError::Config(_)), "{raw}: {err}");
		}
	}

	#[test]
	fn zero_poll_interval_is_rejected() {
		let overrides = Overrides {
			poll_interval_ms: Some(0),
			..Default::default()
		};
		assert!(Settings::resolve(&overrides, None, CliConfig::default(), &paths()).is_err());
	}

	#[test]
	fn config_file_round_trip() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("config.json");
		fs::write(
			&path,
			r#"{ "schema": 1, "rpcUrl": "http://127.0.0.1:8545", "pollIntervalMs": 500, "defaultNetwork": "rootstock" }"#,
		)
		.unwrap();

		let config = load_config(&path).unwrap();
		assert_eq!(config.default_network, Some(Network::Rootstock));

		let settings = Settings::resolve(&Overrides::default(), None, config, &ConfigPaths::in_dir(tmp.path())).unwrap();
		assert_eq!(settings.poll_interval, Duration::from_millis(500));
		assert_eq!(settings.default_network, Network::Rootstock);
		assert_eq!(settings.state_file, tmp.path().join("session.json"));
	}

	#[test]
	fn missing_config_is_default_and_malformed_is_error() {
		let tmp = TempDir::new().unwrap();
		assert_eq!(load_config(&tmp.path().join("absent.json")).unwrap(), CliConfig::default());

		let path = tmp.path().join("config.json");
		fs::write(&path, "{ rpcUrl: ").unwrap();
		assert!(matches!(load_config(&path), Err(CliError::Config(_))));
	}
}
