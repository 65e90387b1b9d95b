//! Marketplace roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which side of the marketplace the connected user is acting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	/// Browses and accepts jobs.
	Freelancer,
	/// Posts jobs and hires.
	Client,
}

impl Role {
	/// Persisted form (`freelancer` / `client`).
	pub fn as_str(self) -> &'static str {
		match self {
			Role::Freelancer => "freelancer",
			Role::Client => "client",
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0} (expected freelancer or client)")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
	type Err = ParseRoleError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"freelancer" => Ok(Role::Freelancer),
			"client" => Ok(Role::Client),
			_ => Err(ParseRoleError(s.to_string())),
		}
	}
}
