//! JSON-RPC provider backed by a node HTTP endpoint.
//!
//! Plain nodes have no notion of "provider events"; [`HttpProvider`] owns an
//! [`EventHub`] that [`ChainWatcher`](crate::ChainWatcher) feeds by polling.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::Value;
use w3w_protocol::jsonrpc::{Request, Response};

use crate::error::{Error, Result};
use crate::handlers::{EventHub, Subscription};
use crate::provider::{EventSink, Provider};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// [`Provider`] speaking JSON-RPC 2.0 over HTTP.
///
/// Cheap to clone; clones share the client, id counter and event hub.
#[derive(Clone)]
pub struct HttpProvider {
	client: reqwest::Client,
	endpoint: Arc<str>,
	last_id: Arc<AtomicU64>,
	hub: EventHub,
}

impl HttpProvider {
	/// Creates a provider for `endpoint` with the default request timeout.
	pub fn new(endpoint: &str) -> Result<Self> {
		Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
	}

	pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self> {
		let client = reqwest::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| Error::Transport(format!("Failed to create HTTP client: {e}")))?;

		Ok(Self {
			client,
			endpoint: Arc::from(endpoint),
			last_id: Arc::new(AtomicU64::new(0)),
			hub: EventHub::new(),
		})
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// The hub provider events are delivered through.
	pub fn events(&self) -> &EventHub {
		&self.hub
	}

	/// Sends one JSON-RPC call and awaits its result.
	///
	/// Inherent so callers that need a `Send` future (spawned tasks) can use it directly.
	pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
		let id = self.last_id.fetch_add(1, Ordering::SeqCst);
		let request = Request::new(id, method, params);

		tracing::debug!(id, method, endpoint = %self.endpoint, "sending provider request");

		let response = self.client.post(&*self.endpoint).json(&request).send().await?;
		let status = response.status();
		if !status.is_success() {
			return Err(Error::Transport(format!("unexpected status {status} from {}", self.endpoint)));
		}

		let body: Response = response.json().await?;
		if let Some(resp_id) = body.id {
			if resp_id != id {
				return Err(Error::UnexpectedResponse {
					method: method.to_string(),
					reason: format!("response id {resp_id} does not match request id {id}"),
				});
			}
		}

		body.into_result().map_err(|err| {
			tracing::debug!(id, method, code = err.code, "provider rejected request");
			Error::from(err)
		})
	}
}

impl Provider for HttpProvider {
	async fn request(&self, method: &str, params: Value) -> Result<Value> {
		self.call(method, params).await
	}

	fn subscribe(&self, sink: EventSink) -> Subscription {
		self.hub.subscribe(sink)
	}
}

impl std::fmt::Debug for HttpProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HttpProvider").field("endpoint", &self.endpoint).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::provider::event_channel;

	#[test]
	fn endpoint_is_kept_verbatim() {
		let provider = HttpProvider::new("http://127.0.0.1:8545").unwrap();
		assert_eq!(provider.endpoint(), "http://127.0.0.1:8545");
	}

	#[test]
	fn clones_share_event_hub() {
		let provider = HttpProvider::new("http://127.0.0.1:8545").unwrap();
		let clone = provider.clone();
		let (tx, _rx) = event_channel();

		let _sub = provider.subscribe(tx);
		assert_eq!(clone.events().len(), 1);
	}

	#[tokio::test]
	async fn unreachable_endpoint_is_a_transport_error() {
		let provider = HttpProvider::with_timeout("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
		let err = provider.call("eth_chainId", Value::Null).await.unwrap_err();
		assert!(matches!(err, Error::Transport(_)), "got {err:?}");
	}
}
