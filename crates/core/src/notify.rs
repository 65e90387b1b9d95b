//! User-facing notices.
//!
//! Every session operation ends in at most one short notice. Hosts decide
//! how to show it: a toast in the browser, a coloured line in a terminal,
//! or a log record.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{error, info};

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
	Success,
	Error,
	Info,
}

/// A one-line message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
	pub level: NoticeLevel,
	pub message: String,
}

impl Notice {
	pub fn success(message: impl Into<String>) -> Self {
		Self::new(NoticeLevel::Success, message)
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self::new(NoticeLevel::Error, message)
	}

	pub fn info(message: impl Into<String>) -> Self {
		Self::new(NoticeLevel::Info, message)
	}

	fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
		Self {
			level,
			message: message.into(),
		}
	}
}

/// Notice texts shown by the session manager.
pub mod messages {
	use crate::network::Network;

	pub const PROVIDER_MISSING_ON_CONNECT: &str = "MetaMask not detected! Please install MetaMask to connect.";
	pub const PROVIDER_MISSING: &str = "MetaMask not detected!";
	pub const CONNECTED: &str = "Wallet connected successfully!";
	pub const CONNECT_FAILED: &str = "Failed to connect wallet";
	pub const SWITCH_FAILED: &str = "Failed to switch network";
	pub const DISCONNECTED: &str = "Wallet disconnected";

	pub fn switched(network: Network) -> String {
		format!("Switched to {} network", network.display_name())
	}
}

/// Fire-and-forget sink for [`Notice`]s.
pub trait Notifier {
	fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for &N {
	fn notify(&self, notice: Notice) {
		(**self).notify(notice)
	}
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
	fn notify(&self, notice: Notice) {
		(**self).notify(notice)
	}
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
	fn notify(&self, notice: Notice) {
		(**self).notify(notice)
	}
}

/// Emits notices as log records under the `w3w.notice` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
	fn notify(&self, notice: Notice) {
		match notice.level {
			NoticeLevel::Error => error!(target = "w3w.notice", "{}", notice.message),
			NoticeLevel::Success | NoticeLevel::Info => info!(target = "w3w.notice", "{}", notice.message),
		}
	}
}

/// Keeps every notice in memory. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
	notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn notices(&self) -> Vec<Notice> {
		self.notices.lock().clone()
	}

	pub fn last(&self) -> Option<Notice> {
		self.notices.lock().last().cloned()
	}

	/// Returns and clears the recorded notices.
	pub fn take(&self) -> Vec<Notice> {
		std::mem::take(&mut *self.notices.lock())
	}
}

impl Notifier for RecordingNotifier {
	fn notify(&self, notice: Notice) {
		self.notices.lock().push(notice);
	}
}
