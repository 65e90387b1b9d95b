//! Provider-level events.

use serde::{Deserialize, Serialize};

use crate::methods::{EVENT_ACCOUNTS_CHANGED, EVENT_CHAIN_CHANGED};

/// Notification raised by a wallet provider outside any request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ProviderEvent {
	/// Exposed accounts changed. An empty list means the wallet disconnected.
	#[serde(rename = "accountsChanged")]
	AccountsChanged(Vec<String>),
	/// Active chain changed; carries the hex chain id.
	#[serde(rename = "chainChanged")]
	ChainChanged(String),
}

impl ProviderEvent {
	/// The provider's event name (`accountsChanged` / `chainChanged`).
	pub fn name(&self) -> &'static str {
		match self {
			ProviderEvent::AccountsChanged(_) => EVENT_ACCOUNTS_CHANGED,
			ProviderEvent::ChainChanged(_) => EVENT_CHAIN_CHANGED,
		}
	}
}
