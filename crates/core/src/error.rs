//! Error types for session operations and stores.

use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Why a session operation did not complete.
///
/// Every variant has already been logged and shown to the user as a notice
/// by the time a caller sees it; none of them is fatal.
#[derive(Debug, Error)]
pub enum SessionError {
	/// No wallet provider is present in this environment.
	#[error("no wallet provider available")]
	ProviderUnavailable,

	/// The user declined the request in their wallet.
	#[error("request rejected by user")]
	UserRejected(#[source] w3w_runtime::Error),

	/// A provider call failed or answered with something unusable.
	#[error("wallet request failed: {0}")]
	RequestFailed(#[source] w3w_runtime::Error),

	/// The wallet granted access but exposed no account.
	#[error("wallet returned no accounts")]
	NoAccounts,

	/// The wallet does not know the chain and no parameters exist to register it.
	#[error("chain {chain_id} is not registered with the wallet")]
	ChainUnrecognized { chain_id: String },

	/// Switching (or registering) the chain failed.
	#[error("network switch failed: {0}")]
	SwitchFailed(#[source] w3w_runtime::Error),
}

impl SessionError {
	/// Classifies a failed provider request made while connecting.
	pub fn from_request(err: w3w_runtime::Error) -> Self {
		if err.is_user_rejected() {
			SessionError::UserRejected(err)
		} else {
			SessionError::RequestFailed(err)
		}
	}

	/// Stable machine-readable kind.
	pub fn kind(&self) -> &'static str {
		match self {
			SessionError::ProviderUnavailable => "PROVIDER_UNAVAILABLE",
			SessionError::UserRejected(_) => "USER_REJECTED",
			SessionError::RequestFailed(_) => "REQUEST_FAILED",
			SessionError::NoAccounts => "NO_ACCOUNTS",
			SessionError::ChainUnrecognized { .. } => "CHAIN_UNRECOGNIZED",
			SessionError::SwitchFailed(_) => "SWITCH_FAILED",
		}
	}
}

/// Errors from durable store backends.
#[derive(Debug, Error)]
pub enum StoreError {
	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
	use w3w_protocol::ProviderRpcError;

	use super::*;

	#[test]
	fn rejected_requests_are_classified() {
		let err = SessionError::from_request(ProviderRpcError::user_rejected().into());
		assert_eq!(err.kind(), "USER_REJECTED");

		let err = SessionError::from_request(w3w_runtime::Error::Transport("refused".into()));
		assert_eq!(err.kind(), "REQUEST_FAILED");
		assert!(err.to_string().contains("refused"));
	}
}
