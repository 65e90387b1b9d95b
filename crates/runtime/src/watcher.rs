//! Polling bridge that turns node state into provider events.

use std::time::Duration;

use serde_json::Value;
use tokio::task::JoinHandle;
use w3w_protocol::{ProviderEvent, methods};

use crate::http::HttpProvider;

/// Last observed accounts/chain. The first observation only sets the
/// baseline; later ones yield an event when the value differs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchState {
	accounts: Option<Vec<String>>,
	chain_id: Option<String>,
}

impl WatchState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn observe_accounts(&mut self, accounts: Vec<String>) -> Option<ProviderEvent> {
		let previous = self.accounts.replace(accounts.clone())?;
		(previous != accounts).then_some(ProviderEvent::AccountsChanged(accounts))
	}

	pub fn observe_chain(&mut self, chain_id: String) -> Option<ProviderEvent> {
		let previous = self.chain_id.replace(chain_id.clone())?;
		(previous != chain_id).then_some(ProviderEvent::ChainChanged(chain_id))
	}
}

/// Background task polling `eth_accounts` and `eth_chainId`.
///
/// Events go out through the provider's [`EventHub`](crate::EventHub).
/// The task is aborted when the watcher is dropped.
pub struct ChainWatcher {
	handle: JoinHandle<()>,
}

impl ChainWatcher {
	/// Starts polling `provider` every `interval`. Requires a tokio runtime.
	pub fn spawn(provider: HttpProvider, interval: Duration) -> Self {
		let handle = tokio::spawn(async move {
			let mut ticker = tokio::time::interval(interval);
			ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
			let mut state = WatchState::new();

			loop {
				ticker.tick().await;

				match provider.call(methods::ETH_ACCOUNTS, Value::Null).await {
					Ok(value) => match serde_json::from_value::<Vec<String>>(value) {
						Ok(accounts) => {
							if let Some(event) = state.observe_accounts(accounts) {
								provider.events().emit(event);
							}
						}
						Err(e) => tracing::warn!(error = %e, "eth_accounts returned a non-list"),
					},
					Err(e) => tracing::warn!(error = %e, "polling eth_accounts failed"),
				}

				match provider.call(methods::ETH_CHAIN_ID, Value::Null).await {
					Ok(Value::String(chain_id)) => {
						if let Some(event) = state.observe_chain(chain_id) {
							provider.events().emit(event);
						}
					}
					Ok(other) => tracing::warn!(value = %other, "eth_chainId returned a non-string"),
					Err(e) => tracing::warn!(error = %e, "polling eth_chainId failed"),
				}
			}
		});

		Self { handle }
	}

	/// Stops polling. Equivalent to dropping.
	pub fn stop(self) {}
}

impl Drop for ChainWatcher {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_observation_sets_baseline() {
		let mut state = WatchState::new();
		assert_eq!(state.observe_accounts(vec!["0xabc".into()]), None);
		assert_eq!(state.observe_chain("0x1".into()), None);
	}

	#[test]
	fn changes_produce_events() {
		let mut state = WatchState::new();
		state.observe_accounts(vec!["0xabc".into()]);
		state.observe_chain("0x1".into());

		assert_eq!(state.observe_accounts(vec!["0xabc".into()]), None);
		assert_eq!(
			state.observe_accounts(vec!["0xdef".into()]),
			Some(ProviderEvent::AccountsChanged(vec!["0xdef".into()]))
		);
		assert_eq!(state.observe_accounts(vec![]), Some(ProviderEvent::AccountsChanged(vec![])));
		assert_eq!(state.observe_chain("0x1e".into()), Some(ProviderEvent::ChainChanged("0x1e".into())));
		assert_eq!(state.observe_chain("0x1e".into()), None);
	}
}
