//! Structured output envelope for all CLI commands.
//!
//! ## Output Contract
//!
//! Every command produces a result envelope on stdout:
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "ok": true,
//!   "command": "connect",
//!   "data": { "account": "0xABC", "network": "rootstock", ... },
//!   "timings": { "durationMs": 12 }
//! }
//! ```
//!
//! On failure:
//!
//! ```json
//! {
//!   "ok": false,
//!   "command": "switch",
//!   "error": { "code": "SWITCH_FAILED", "message": "network switch failed: ..." }
//! }
//! ```
//!
//! User-facing notices are not part of the envelope; they go to stderr.

#[cfg(test)]
mod tests;

use std::fmt;
use std::io::{self, Write};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use w3w::{ConnectionState, EventOutcome, NextStep, Session};

/// Version of the envelope layout below.
pub const SCHEMA_VERSION: u32 = 1;

/// How results are rendered on stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
	#[default]
	Text,
	Json,
}

/// Envelope printed for every command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T> {
	pub schema_version: u32,
	pub ok: bool,
	pub command: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timings: Option<Timings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
	pub code: ErrorCode,
	pub message: String,
	/// Provider code, chain id or a hint, when one applies.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<serde_json::Value>,
}

/// Stable failure codes for scripts consuming `-f json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	/// No RPC endpoint configured, so there is no wallet provider
	ProviderUnavailable,
	UserRejected,
	RequestFailed,
	NoAccounts,
	/// The wallet does not know the chain and it cannot be registered
	ChainUnrecognized,
	SwitchFailed,
	/// Invalid flag, environment value or config file
	InvalidInput,
	IoError,
	InternalError,
}

impl ErrorCode {
	pub fn as_str(self) -> &'static str {
		match self {
			ErrorCode::ProviderUnavailable => "PROVIDER_UNAVAILABLE",
			ErrorCode::UserRejected => "USER_REJECTED",
			ErrorCode::RequestFailed => "REQUEST_FAILED",
			ErrorCode::NoAccounts => "NO_ACCOUNTS",
			ErrorCode::ChainUnrecognized => "CHAIN_UNRECOGNIZED",
			ErrorCode::SwitchFailed => "SWITCH_FAILED",
			ErrorCode::InvalidInput => "INVALID_INPUT",
			ErrorCode::IoError => "IO_ERROR",
			ErrorCode::InternalError => "INTERNAL_ERROR",
		}
	}
}

impl fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timings {
	pub duration_ms: u64,
}

/// Assembles a [`CommandResult`]. Timing runs from construction unless
/// [`started_at`](Self::started_at) or [`untimed`](Self::untimed) says otherwise.
pub struct ResultBuilder<T> {
	command: &'static str,
	data: Option<T>,
	error: Option<CommandError>,
	started: Option<Instant>,
}

impl<T> ResultBuilder<T> {
	pub fn new(command: &'static str) -> Self {
		Self {
			command,
			data: None,
			error: None,
			started: Some(Instant::now()),
		}
	}

	pub fn started_at(mut self, start: Instant) -> Self {
		self.started = Some(start);
		self
	}

	/// Omit timings, for per-event records of long-running commands.
	pub fn untimed(mut self) -> Self {
		self.started = None;
		self
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	pub fn error(mut self, error: CommandError) -> Self {
		self.error = Some(error);
		self
	}

	pub fn failure(self, code: ErrorCode, message: impl Into<String>) -> Self {
		self.error(CommandError {
			code,
			message: message.into(),
			details: None,
		})
	}

	/// A result is ok only with data and without an error.
	pub fn build(self) -> CommandResult<T> {
		CommandResult {
			schema_version: SCHEMA_VERSION,
			ok: self.error.is_none() && self.data.is_some(),
			command: self.command,
			timings: self.started.map(|start| Timings {
				duration_ms: start.elapsed().as_millis() as u64,
			}),
			data: self.data,
			error: self.error,
		}
	}
}

/// Writes `result` to stdout: pretty JSON, or the data's text rendering.
pub fn print_result<T: Serialize + TextOutput>(result: &CommandResult<T>, format: OutputFormat) {
	let rendered = match format {
		OutputFormat::Json => match serde_json::to_string_pretty(result) {
			Ok(json) => json,
			Err(err) => {
				tracing::error!(target = "w3w.cli", error = %err, "failed to serialize result");
				return;
			}
		},
		OutputFormat::Text => match (&result.data, &result.error) {
			(_, Some(error)) => error_line(error),
			(Some(data), None) => data.to_text(),
			(None, None) => return,
		},
	};
	let _ = writeln!(io::stdout().lock(), "{rendered}");
}

pub fn print_error_stderr(error: &CommandError) {
	let _ = writeln!(io::stderr().lock(), "{}", error_line(error));
}

fn error_line(error: &CommandError) -> String {
	format!("Error [{}]: {}", error.code, error.message)
}

/// Human-readable rendering of command data for `--format text`.
pub trait TextOutput {
	fn to_text(&self) -> String;
}

impl TextOutput for () {
	fn to_text(&self) -> String {
		String::new()
	}
}

/// Session snapshot as reported by every command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
	pub state: ConnectionState,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub account: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub network: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub chain_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
	pub next_step: NextStep,
}

impl From<&Session> for SessionData {
	fn from(session: &Session) -> Self {
		Self {
			state: session.connection_state(),
			account: session.account.as_ref().map(|a| a.as_str().to_string()),
			network: session.network.map(|n| n.as_str().to_string()),
			chain_id: session.network.map(|n| n.chain_id().to_string()),
			role: session.role.map(|r| r.as_str().to_string()),
			next_step: session.next_step(),
		}
	}
}

impl TextOutput for SessionData {
	fn to_text(&self) -> String {
		let mut lines = vec![format!("State:   {}", state_label(self.state))];
		if let Some(ref account) = self.account {
			lines.push(format!("Account: {account}"));
		}
		if let (Some(network), Some(chain_id)) = (&self.network, &self.chain_id) {
			lines.push(format!("Network: {network} ({chain_id})"));
		}
		if let Some(ref role) = self.role {
			lines.push(format!("Role:    {role}"));
		}
		lines.push(format!("Next:    {}", next_step_label(self.next_step)));
		lines.join("\n")
	}
}

/// One applied provider event, as streamed by `watch`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventData {
	pub outcome: EventOutcome,
	pub session: SessionData,
}

impl TextOutput for EventData {
	fn to_text(&self) -> String {
		let what = match &self.outcome {
			EventOutcome::Disconnected => "wallet disconnected".to_string(),
			EventOutcome::AccountChanged(account) => format!("account changed to {}", account.short()),
			EventOutcome::Unchanged => "no change".to_string(),
			EventOutcome::Reinitialized(Some(network)) => format!("chain changed to {}", network.display_name()),
			EventOutcome::Reinitialized(None) => "chain changed".to_string(),
			EventOutcome::Ignored => "ignored".to_string(),
		};
		format!("[event] {what}")
	}
}

fn state_label(state: ConnectionState) -> &'static str {
	match state {
		ConnectionState::Disconnected => "disconnected",
		ConnectionState::Connecting => "connecting",
		ConnectionState::Connected => "connected",
	}
}

fn next_step_label(step: NextStep) -> String {
	match step {
		NextStep::ConnectWallet => "connect a wallet".to_string(),
		NextStep::ChooseRole => "choose a role (freelancer or client)".to_string(),
		NextStep::Continue(role) => format!("continue as {role}"),
	}
}
