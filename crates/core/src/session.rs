//! The session record.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::network::Network;
use crate::role::Role;

/// Snapshot of the wallet connection.
///
/// Owned and mutated by [`WalletSession`](crate::WalletSession); everything
/// else sees clones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
	pub account: Option<Address>,
	pub network: Option<Network>,
	/// True only while a connect request is in flight.
	pub connecting: bool,
	pub role: Option<Role>,
}

/// Connection lifecycle derived from a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
	Disconnected,
	Connecting,
	Connected,
}

/// What the landing flow should ask of the user next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "step", content = "role")]
pub enum NextStep {
	ConnectWallet,
	ChooseRole,
	Continue(Role),
}

impl Session {
	pub fn connection_state(&self) -> ConnectionState {
		if self.connecting {
			ConnectionState::Connecting
		} else if self.account.is_some() {
			ConnectionState::Connected
		} else {
			ConnectionState::Disconnected
		}
	}

	pub fn is_connected(&self) -> bool {
		self.connection_state() == ConnectionState::Connected
	}

	pub fn next_step(&self) -> NextStep {
		match (&self.account, self.role) {
			(None, _) => NextStep::ConnectWallet,
			(Some(_), None) => NextStep::ChooseRole,
			(Some(_), Some(role)) => NextStep::Continue(role),
		}
	}
}
