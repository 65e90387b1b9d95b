//! Chain management parameters (EIP-3085 / EIP-3326).

use serde::{Deserialize, Serialize};

/// Parameter of `wallet_switchEthereumChain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchEthereumChainParameter {
	pub chain_id: String,
}

impl SwitchEthereumChainParameter {
	pub fn new(chain_id: impl Into<String>) -> Self {
		Self { chain_id: chain_id.into() }
	}
}

/// Native currency descriptor inside [`AddEthereumChainParameter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
	pub name: String,
	pub symbol: String,
	pub decimals: u8,
}

/// Parameter of `wallet_addEthereumChain`.
///
/// Sent only after a switch attempt reported the chain as unknown to the
/// wallet ([`codes::CHAIN_NOT_ADDED`](crate::codes::CHAIN_NOT_ADDED)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEthereumChainParameter {
	pub chain_id: String,
	pub chain_name: String,
	pub native_currency: NativeCurrency,
	pub rpc_urls: Vec<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub block_explorer_urls: Vec<String>,
}
