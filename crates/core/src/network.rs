//! Supported networks and their fixed chain parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use w3w_protocol::{AddEthereumChainParameter, NativeCurrency};

/// Ethereum mainnet chain id.
pub const ETHEREUM_CHAIN_ID: &str = "0x1";
/// Rootstock mainnet chain id (30).
pub const ROOTSTOCK_CHAIN_ID: &str = "0x1e";
/// Public Rootstock RPC node registered with wallets that lack the chain.
pub const ROOTSTOCK_RPC_URL: &str = "https://public-node.rsk.co";
/// Rootstock block explorer.
pub const ROOTSTOCK_EXPLORER_URL: &str = "https://explorer.rsk.co/";

const ROOTSTOCK_CHAIN_NUMBER: u64 = 30;

/// A network the marketplace can operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
	#[default]
	Ethereum,
	Rootstock,
}

impl Network {
	pub const ALL: [Network; 2] = [Network::Ethereum, Network::Rootstock];

	/// Hex chain id as sent to the provider.
	pub fn chain_id(self) -> &'static str {
		match self {
			Network::Ethereum => ETHEREUM_CHAIN_ID,
			Network::Rootstock => ROOTSTOCK_CHAIN_ID,
		}
	}

	/// Persisted form (`ethereum` / `rootstock`).
	pub fn as_str(self) -> &'static str {
		match self {
			Network::Ethereum => "ethereum",
			Network::Rootstock => "rootstock",
		}
	}

	pub fn display_name(self) -> &'static str {
		match self {
			Network::Ethereum => "Ethereum",
			Network::Rootstock => "Rootstock",
		}
	}

	/// Maps a provider chain id to a network.
	///
	/// `0x`-prefixed ids are read as hex, bare ids as decimal, so `0x1e`,
	/// `0x1E` and `30` all mean Rootstock. Anything else, including ids that
	/// do not parse, is treated as Ethereum.
	pub fn from_chain_id(chain_id: &str) -> Network {
		let trimmed = chain_id.trim();
		let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
			Some(hex) => u64::from_str_radix(hex, 16).ok(),
			None => trimmed.parse::<u64>().ok(),
		};

		match parsed {
			Some(ROOTSTOCK_CHAIN_NUMBER) => Network::Rootstock,
			_ => Network::Ethereum,
		}
	}

	/// Parameters for `wallet_addEthereumChain`, for networks a wallet may not know.
	///
	/// Ethereum mainnet ships with every wallet and has none.
	pub fn add_chain_params(self) -> Option<AddEthereumChainParameter> {
		match self {
			Network::Ethereum => None,
			Network::Rootstock => Some(AddEthereumChainParameter {
				chain_id: ROOTSTOCK_CHAIN_ID.to_string(),
				chain_name: "RSK Mainnet".to_string(),
				native_currency: NativeCurrency {
					name: "RSK BTC".to_string(),
					symbol: "RBTC".to_string(),
					decimals: 18,
				},
				rpc_urls: vec![ROOTSTOCK_RPC_URL.to_string()],
				block_explorer_urls: vec![ROOTSTOCK_EXPLORER_URL.to_string()],
			}),
		}
	}
}

impl fmt::Display for Network {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a persisted or user-supplied network name is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network: {0} (expected ethereum or rootstock)")]
pub struct ParseNetworkError(pub String);

impl FromStr for Network {
	type Err = ParseNetworkError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"ethereum" => Ok(Network::Ethereum),
			"rootstock" => Ok(Network::Rootstock),
			_ => Err(ParseNetworkError(s.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn chain_ids_map_back_to_networks() {
		for network in Network::ALL {
			assert_eq!(Network::from_chain_id(network.chain_id()), network);
		}
	}

	#[test]
	fn rootstock_id_is_case_insensitive_and_accepts_decimal() {
		assert_eq!(Network::from_chain_id("0x1E"), Network::Rootstock);
		assert_eq!(Network::from_chain_id("30"), Network::Rootstock);
	}

	#[test]
	fn unknown_chain_defaults_to_ethereum() {
		assert_eq!(Network::from_chain_id("0x89"), Network::Ethereum);
		assert_eq!(Network::from_chain_id("0xaa36a7"), Network::Ethereum);
		assert_eq!(Network::from_chain_id("not-a-chain"), Network::Ethereum);
		assert_eq!(Network::from_chain_id(""), Network::Ethereum);
	}

	#[test]
	fn only_rootstock_carries_add_chain_params() {
		assert!(Network::Ethereum.add_chain_params().is_none());

		let params = Network::Rootstock.add_chain_params().unwrap();
		assert_eq!(params.chain_id, "0x1e");
		assert_eq!(params.rpc_urls, vec!["https://public-node.rsk.co"]);
		assert_eq!(params.block_explorer_urls, vec!["https://explorer.rsk.co/"]);
		assert_eq!(params.native_currency.symbol, "RBTC");
		assert_eq!(params.native_currency.decimals, 18);
	}

	#[test]
	fn persisted_names_round_trip() {
		assert_eq!("rootstock".parse::<Network>().unwrap(), Network::Rootstock);
		assert_eq!("Ethereum".parse::<Network>().unwrap(), Network::Ethereum);
		assert!("polygon".parse::<Network>().is_err());
		assert_eq!(Network::Rootstock.to_string(), "rootstock");
	}
}
