use thiserror::Error;
use w3w::{SessionError, StoreError};

use crate::output::{CommandError, ErrorCode};

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	/// Invalid flag, environment value or config file.
	#[error("configuration error: {0}")]
	Config(String),

	#[error(transparent)]
	Session(#[from] SessionError),

	#[error(transparent)]
	Provider(#[from] w3w_runtime::Error),

	#[error(transparent)]
	Store(#[from] StoreError),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Anyhow(#[from] anyhow::Error),
}

impl CliError {
	/// Process exit status: 2 for unusable configuration, 1 for everything else.
	pub fn exit_code(&self) -> i32 {
		match self {
			CliError::Config(_) => 2,
			_ => 1,
		}
	}

	/// Convert this error to a CommandError for structured output
	pub fn to_command_error(&self) -> CommandError {
		let (code, details) = match self {
			CliError::Config(_) => (ErrorCode::InvalidInput, None),
			CliError::Session(err) => (session_error_code(err), session_error_details(err)),
			CliError::Provider(err) => (
				ErrorCode::RequestFailed,
				err.code().map(|code| serde_json::json!({ "providerCode": code })),
			),
			CliError::Store(_) | CliError::Io(_) => (ErrorCode::IoError, None),
			CliError::Json(_) | CliError::Anyhow(_) => (ErrorCode::InternalError, None),
		};

		CommandError {
			code,
			message: self.to_string(),
			details,
		}
	}
}

fn session_error_code(err: &SessionError) -> ErrorCode {
	match err {
		SessionError::ProviderUnavailable => ErrorCode::ProviderUnavailable,
		SessionError::UserRejected(_) => ErrorCode::UserRejected,
		SessionError::RequestFailed(_) => ErrorCode::RequestFailed,
		SessionError::NoAccounts => ErrorCode::NoAccounts,
		SessionError::ChainUnrecognized { .. } => ErrorCode::ChainUnrecognized,
		SessionError::SwitchFailed(_) => ErrorCode::SwitchFailed,
	}
}

fn session_error_details(err: &SessionError) -> Option<serde_json::Value> {
	match err {
		SessionError::ProviderUnavailable => Some(serde_json::json!({
			"hint": "set --rpc-url, W3W_RPC_URL or rpcUrl in the config file",
		})),
		SessionError::ChainUnrecognized { chain_id } => Some(serde_json::json!({ "chainId": chain_id })),
		SessionError::UserRejected(source) | SessionError::RequestFailed(source) | SessionError::SwitchFailed(source) => {
			source.code().map(|code| serde_json::json!({ "providerCode": code }))
		}
		SessionError::NoAccounts => None,
	}
}

#[cfg(test)]
mod tests {
	use w3w_runtime::Error as ProviderError;

	use super::*;

	#[test]
	fn session_errors_map_to_codes() {
		let err = CliError::from(SessionError::ProviderUnavailable);
		let cmd = err.to_command_error();
		assert_eq!(cmd.code, ErrorCode::ProviderUnavailable);
		assert!(cmd.details.is_some());
		assert_eq!(err.exit_code(), 1);

		let err = CliError::from(SessionError::SwitchFailed(ProviderError::Rpc {
			code: 4001,
			message: "User rejected the request.".into(),
		}));
		let cmd = err.to_command_error();
		assert_eq!(cmd.code, ErrorCode::SwitchFailed);
		assert_eq!(cmd.details.unwrap()["providerCode"], 4001);
	}

	#[test]
	fn config_errors_exit_with_two() {
		let err = CliError::Config("rpcUrl is not a valid URL".into());
		assert_eq!(err.exit_code(), 2);
		assert_eq!(err.to_command_error().code, ErrorCode::InvalidInput);
		assert_eq!(err.to_string(), "configuration error: rpcUrl is not a valid URL");
	}

	#[test]
	fn unrecognized_chain_reports_chain_id() {
		let err = CliError::from(SessionError::ChainUnrecognized {
			chain_id: "0x1".into(),
		});
		assert_eq!(err.to_command_error().details.unwrap()["chainId"], "0x1");
	}
}
