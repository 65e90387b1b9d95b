//! Wallet account addresses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An account address as issued by the wallet.
///
/// Opaque: compared byte-for-byte, never checksummed or lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
	pub fn new(raw: impl Into<String>) -> Self {
		Self(raw.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Abbreviated form for headers and badges: `0x1234...abcd`.
	///
	/// Addresses of ten characters or fewer are returned whole.
	pub fn short(&self) -> String {
		let chars: Vec<char> = self.0.chars().collect();
		if chars.len() <= 10 {
			return self.0.clone();
		}
		let head: String = chars[..6].iter().collect();
		let tail: String = chars[chars.len() - 4..].iter().collect();
		format!("{head}...{tail}")
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<String> for Address {
	fn from(raw: String) -> Self {
		Self(raw)
	}
}

impl From<&str> for Address {
	fn from(raw: &str) -> Self {
		Self(raw.to_string())
	}
}

impl AsRef<str> for Address {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
