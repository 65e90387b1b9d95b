//! Error types for provider calls.

use thiserror::Error;
use w3w_protocol::{ProviderRpcError, codes};

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors a provider call can end with.
#[derive(Debug, Error)]
pub enum Error {
	/// The provider rejected the request with an error object.
	#[error("Provider error {code}: {message}")]
	Rpc { code: i64, message: String },

	/// The request never produced a provider answer (network, HTTP status, JS bridge).
	#[error("Transport error: {0}")]
	Transport(String),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// The provider answered with a value of the wrong shape.
	#[error("Unexpected response to {method}: {reason}")]
	UnexpectedResponse { method: String, reason: String },

	/// Event or response channel closed unexpectedly.
	#[error("Channel closed unexpectedly")]
	ChannelClosed,

	/// [`MockProvider`](crate::MockProvider) received a method it has no script for.
	#[error("No scripted response for {0}")]
	Unscripted(String),
}

impl Error {
	/// Returns the provider error code if this is an RPC rejection.
	pub fn code(&self) -> Option<i64> {
		match self {
			Error::Rpc { code, .. } => Some(*code),
			_ => None,
		}
	}

	/// Returns true if the user declined the request in their wallet.
	pub fn is_user_rejected(&self) -> bool {
		self.code() == Some(codes::USER_REJECTED)
	}

	/// Returns true if the wallet does not know the requested chain.
	pub fn is_chain_not_added(&self) -> bool {
		self.code() == Some(codes::CHAIN_NOT_ADDED)
	}
}

impl From<ProviderRpcError> for Error {
	fn from(err: ProviderRpcError) -> Self {
		Error::Rpc {
			code: err.code,
			message: err.message,
		}
	}
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		Error::Transport(err.to_string())
	}
}
