//! JSON-RPC 2.0 envelopes for node-backed providers.
//!
//! An injected wallet takes bare `{method, params}` objects; a node endpoint
//! wants them wrapped with a version tag and a correlation id.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProviderRpcError;

/// Protocol version tag sent with every request.
pub const VERSION: &str = "2.0";

/// Outbound request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
	pub jsonrpc: String,
	/// Correlates the response with this request
	pub id: u64,
	pub method: String,
	/// Positional params; nodes reject a missing array for some methods, so default to `[]`
	pub params: Value,
}

impl Request {
	pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
		let params = if params.is_null() { Value::Array(Vec::new()) } else { params };
		Self {
			jsonrpc: VERSION.to_string(),
			id,
			method: method.into(),
			params,
		}
	}
}

/// Inbound response. Exactly one of `result` / `error` is expected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
	#[serde(default)]
	pub jsonrpc: Option<String>,
	#[serde(default)]
	pub id: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub result: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<ProviderRpcError>,
}

impl Response {
	/// Splits the envelope into the call outcome. A response with neither
	/// field set resolves to `null`.
	pub fn into_result(self) -> Result<Value, ProviderRpcError> {
		match (self.result, self.error) {
			(_, Some(err)) => Err(err),
			(Some(value), None) => Ok(value),
			(None, None) => Ok(Value::Null),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::codes;

	#[test]
	fn null_params_become_empty_array() {
		let req = Request::new(7, "eth_chainId", Value::Null);
		assert_eq!(
			serde_json::to_value(&req).unwrap(),
			json!({"jsonrpc": "2.0", "id": 7, "method": "eth_chainId", "params": []})
		);
	}

	#[test]
	fn error_response_wins_over_result() {
		let resp: Response = serde_json::from_value(json!({
			"jsonrpc": "2.0",
			"id": 1,
			"error": {"code": 4902, "message": "Unrecognized chain"}
		}))
		.unwrap();

		let err = resp.into_result().unwrap_err();
		assert_eq!(err.code, codes::CHAIN_NOT_ADDED);
	}

	#[test]
	fn success_response_yields_result() {
		let resp: Response = serde_json::from_str(r#"{"jsonrpc":"2.0","id":3,"result":"0x1e"}"#).unwrap();
		assert_eq!(resp.into_result().unwrap(), json!("0x1e"));
	}
}
