//! Provider error object.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Well-known provider error codes (EIP-1193 and wallet extensions).
pub mod codes {
	/// The user rejected the request.
	pub const USER_REJECTED: i64 = 4001;
	/// The requested method/account has not been authorized.
	pub const UNAUTHORIZED: i64 = 4100;
	/// The provider does not support the method.
	pub const UNSUPPORTED_METHOD: i64 = 4200;
	/// The provider is disconnected from all chains.
	pub const DISCONNECTED: i64 = 4900;
	/// The chain is not registered with the wallet; add it before switching.
	pub const CHAIN_NOT_ADDED: i64 = 4902;
}

/// Error object a provider rejects a request with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRpcError {
	pub code: i64,
	pub message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
}

impl ProviderRpcError {
	pub fn new(code: i64, message: impl Into<String>) -> Self {
		Self {
			code,
			message: message.into(),
			data: None,
		}
	}

	pub fn user_rejected() -> Self {
		Self::new(codes::USER_REJECTED, "User rejected the request.")
	}

	pub fn chain_not_added(chain_id: &str) -> Self {
		Self::new(
			codes::CHAIN_NOT_ADDED,
			format!("Unrecognized chain ID \"{chain_id}\". Try adding the chain using wallet_addEthereumChain first."),
		)
	}
}

impl fmt::Display for ProviderRpcError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} (code {})", self.message, self.code)
	}
}
