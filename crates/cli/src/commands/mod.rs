//! Command implementations.
//!
//! Every command runs against one [`WalletSession`] assembled from the
//! resolved [`Settings`]. One-shot commands return their data and the
//! dispatcher prints the envelope; `watch` streams one envelope per event.

pub mod connect;
pub mod disconnect;
pub mod role;
pub mod status;
pub mod switch;
pub mod watch;

use std::time::Instant;

use tracing::debug;
use w3w::{JsonFileStore, WalletSession};
use w3w_runtime::HttpProvider;

use crate::cli::{Cli, Commands};
use crate::config::Settings;
use crate::error::Result;
use crate::notifier::TerminalNotifier;
use crate::output::{OutputFormat, ResultBuilder, SessionData, print_result};

/// Session type the CLI runs commands against.
pub type CliSession = WalletSession<HttpProvider, JsonFileStore, TerminalNotifier>;

pub async fn dispatch(cli: Cli, format: OutputFormat) -> Result<()> {
	let start = Instant::now();
	let settings = Settings::load(&cli.overrides())?;
	let mut wallet = assemble(&settings)?;
	wallet.initialize();

	let name = cli.command.name();
	let result = match cli.command {
		Commands::Status => Ok(status::execute(&wallet)),
		Commands::Connect(args) => {
			let network = args.network.map(Into::into).unwrap_or(settings.default_network);
			connect::execute(&mut wallet, network).await
		}
		Commands::Switch(args) => switch::execute(&mut wallet, args.network.into()).await,
		Commands::Disconnect => Ok(disconnect::execute(&mut wallet)),
		Commands::Role(args) => Ok(role::execute(&mut wallet, args.role.into())),
		Commands::Watch(_) => {
			let outcome = watch::execute(&mut wallet, settings.poll_interval, format).await;
			wallet.teardown();
			return outcome;
		}
	};

	wallet.teardown();
	let data = result?;
	emit_success(name, data, start, format);
	Ok(())
}

/// Builds the session: an HTTP provider when an RPC URL is configured, the state file as store.
pub fn assemble(settings: &Settings) -> Result<CliSession> {
	let provider = settings
		.rpc_url
		.as_ref()
		.map(|url| HttpProvider::new(url.as_str()))
		.transpose()?;
	debug!(
		target = "w3w.cli",
		rpc_url = settings.rpc_url.as_ref().map(|u| u.as_str()),
		state_file = %settings.state_file.display(),
		"assembling wallet session"
	);
	Ok(WalletSession::new(provider, JsonFileStore::open(&settings.state_file), TerminalNotifier))
}

fn emit_success(command: &'static str, data: SessionData, start: Instant, format: OutputFormat) {
	let result = ResultBuilder::new(command).started_at(start).data(data).build();
	print_result(&result, format);
}
