//! Wire types for the EIP-1193 wallet provider surface.
//!
//! This crate only describes the shapes exchanged with a wallet provider;
//! it performs no I/O. It is shared by the runtime (which talks to providers)
//! and by the session manager (which interprets their answers).
//!
//! # Main Types
//!
//! - [`ProviderRequest`] - `{ method, params }` argument of `provider.request(..)`
//! - [`ProviderRpcError`] - error object returned by a provider, with a numeric `code`
//! - [`AddEthereumChainParameter`] / [`SwitchEthereumChainParameter`] - chain management params
//! - [`ProviderEvent`] - `accountsChanged` / `chainChanged` notifications
//! - [`jsonrpc`] - JSON-RPC 2.0 envelopes used when the provider is a plain node endpoint

pub mod chain;
pub mod error;
pub mod event;
pub mod jsonrpc;
pub mod methods;

pub use chain::{AddEthereumChainParameter, NativeCurrency, SwitchEthereumChainParameter};
pub use error::{ProviderRpcError, codes};
pub use event::ProviderEvent;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Argument object of an EIP-1193 `request` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRequest {
	pub method: String,
	#[serde(default, skip_serializing_if = "Value::is_null")]
	pub params: Value,
}

impl ProviderRequest {
	pub fn new(method: impl Into<String>, params: Value) -> Self {
		Self {
			method: method.into(),
			params,
		}
	}

	/// Request without parameters.
	pub fn bare(method: impl Into<String>) -> Self {
		Self::new(method, Value::Null)
	}
}
