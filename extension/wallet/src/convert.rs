//! Conversions between page-supplied values and session types.

use serde::Serialize;
use w3w::{ConnectionState, Network, NextStep, ParseNetworkError, ParseRoleError, Role, Session};

/// Network named by the page; a missing name means Ethereum.
pub fn parse_network(value: Option<&str>) -> Result<Network, ParseNetworkError> {
	match value.map(str::trim) {
		None | Some("") => Ok(Network::default()),
		Some(name) => name.parse(),
	}
}

/// Role named by the page; a missing or empty name clears the role.
pub fn parse_role(value: Option<&str>) -> Result<Option<Role>, ParseRoleError> {
	match value.map(str::trim) {
		None | Some("") => Ok(None),
		Some(name) => name.parse().map(Some),
	}
}

/// Session snapshot as handed to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
	#[serde(flatten)]
	pub session: Session,
	pub state: ConnectionState,
	pub chain_id: Option<&'static str>,
	pub next_step: NextStep,
}

impl From<&Session> for SessionView {
	fn from(session: &Session) -> Self {
		Self {
			session: session.clone(),
			state: session.connection_state(),
			chain_id: session.network.map(Network::chain_id),
			next_step: session.next_step(),
		}
	}
}
