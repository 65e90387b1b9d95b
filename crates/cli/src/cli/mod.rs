#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{Args, Parser, Subcommand, ValueEnum};
use w3w::{Network, Role};

use crate::config::Overrides;
use crate::output::OutputFormat;

/// Root CLI for w3w.
#[derive(Parser, Debug)]
#[command(name = "w3w")]
#[command(about = "Web3Work wallet session manager")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format: text (default) or json
	#[arg(short = 'f', long, global = true, value_enum, default_value = "text")]
	pub format: OutputFormat,

	/// JSON-RPC endpoint acting as the wallet provider (overrides W3W_RPC_URL)
	#[arg(long, global = true, value_name = "URL")]
	pub rpc_url: Option<String>,

	/// Session state file (default: ~/.config/w3w/session.json)
	#[arg(long, global = true, value_name = "PATH")]
	pub state_file: Option<PathBuf>,

	/// Config file (default: ~/.config/w3w/config.json)
	#[arg(long, global = true, value_name = "PATH")]
	pub config: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Show the persisted session without contacting the wallet.
	Status,
	/// Request account access and record the account and network.
	Connect(ConnectArgs),
	/// Switch the wallet to another network, registering it if needed.
	Switch(SwitchArgs),
	/// Forget the connected account, role and network.
	Disconnect,
	/// Set or clear the marketplace role.
	Role(RoleArgs),
	/// Follow wallet account and chain changes until interrupted.
	Watch(WatchArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ConnectArgs {
	/// Network to switch to after connecting (default: config defaultNetwork, else ethereum)
	#[arg(long, short = 'n', value_enum)]
	pub network: Option<CliNetwork>,
}

#[derive(Args, Debug, Clone)]
pub struct SwitchArgs {
	#[arg(value_enum, value_name = "NETWORK")]
	pub network: CliNetwork,
}

#[derive(Args, Debug, Clone)]
pub struct RoleArgs {
	#[arg(value_enum, value_name = "ROLE")]
	pub role: CliRole,
}

#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
	/// Poll interval in milliseconds (default: config pollIntervalMs, else 2000)
	#[arg(long, value_name = "MS")]
	pub interval_ms: Option<u64>,
}

/// Network argument (CLI wrapper for w3w::Network)
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CliNetwork {
	Ethereum,
	Rootstock,
}

impl From<CliNetwork> for Network {
	fn from(network: CliNetwork) -> Self {
		match network {
			CliNetwork::Ethereum => Network::Ethereum,
			CliNetwork::Rootstock => Network::Rootstock,
		}
	}
}

/// Role argument; `none` clears the role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CliRole {
	Freelancer,
	Client,
	None,
}

impl From<CliRole> for Option<Role> {
	fn from(role: CliRole) -> Self {
		match role {
			CliRole::Freelancer => Some(Role::Freelancer),
			CliRole::Client => Some(Role::Client),
			CliRole::None => None,
		}
	}
}

impl Commands {
	/// Name used in the result envelope.
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Status => "status",
			Commands::Connect(_) => "connect",
			Commands::Switch(_) => "switch",
			Commands::Disconnect => "disconnect",
			Commands::Role(_) => "role",
			Commands::Watch(_) => "watch",
		}
	}
}

impl Cli {
	/// Command-line values that take part in config resolution.
	pub fn overrides(&self) -> Overrides {
		let poll_interval_ms = match &self.command {
			Commands::Watch(args) => args.interval_ms,
			_ => None,
		};
		Overrides {
			rpc_url: self.rpc_url.clone(),
			state_file: self.state_file.clone(),
			config_file: self.config.clone(),
			poll_interval_ms,
		}
	}
}

/// Help colours: bold yellow headers, green literals.
pub fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Yellow.on_default().bold())
		.usage(AnsiColor::Yellow.on_default().bold())
		.literal(AnsiColor::Green.on_default())
		.placeholder(AnsiColor::Cyan.on_default())
		.valid(AnsiColor::Green.on_default())
}
