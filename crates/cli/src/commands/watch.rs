//! `w3w watch` - follow wallet changes until interrupted.
//!
//! A [`ChainWatcher`] polls the node and raises provider events on the same
//! provider the session is subscribed to; each applied event is printed as
//! its own result record (one JSON object per line with `-f json`).

use std::time::Duration;

use tracing::info;
use w3w::SessionError;
use w3w_runtime::ChainWatcher;

use super::CliSession;
use crate::error::Result;
use crate::output::{EventData, OutputFormat, ResultBuilder, SessionData, TextOutput};

pub async fn execute(wallet: &mut CliSession, interval: Duration, format: OutputFormat) -> Result<()> {
	let Some(provider) = wallet.provider().cloned() else {
		return Err(SessionError::ProviderUnavailable.into());
	};

	let watcher = ChainWatcher::spawn(provider, interval);
	info!(target = "w3w.cli", interval = ?interval, "watching wallet");

	loop {
		tokio::select! {
			outcome = wallet.next_event() => {
				let Some(outcome) = outcome else { break };
				let data = EventData {
					outcome,
					session: SessionData::from(&wallet.session()),
				};
				print_event(data, format)?;
			}
			_ = tokio::signal::ctrl_c() => {
				info!(target = "w3w.cli", "received Ctrl+C, stopping watch");
				break;
			}
		}
	}

	watcher.stop();
	Ok(())
}

fn print_event(data: EventData, format: OutputFormat) -> Result<()> {
	match format {
		OutputFormat::Text => println!("{}", data.to_text()),
		OutputFormat::Json => {
			let record = ResultBuilder::new("watch").untimed().data(data).build();
			println!("{}", serde_json::to_string(&record)?);
		}
	}
	Ok(())
}
