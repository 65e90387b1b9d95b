//! Scriptable in-memory provider.
//!
//! Responses are scripted per method: one-shot replies are consumed in FIFO
//! order, after which the sticky reply (if any) answers every further call.
//! Every request is logged so callers can assert on the exact traffic.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use w3w_protocol::{ProviderEvent, ProviderRequest, ProviderRpcError};

use crate::error::{Error, Result};
use crate::handlers::{EventHub, Subscription};
use crate::provider::{EventSink, Provider};

type Reply = std::result::Result<Value, ProviderRpcError>;
type Probe = Arc<dyn Fn(&ProviderRequest) + Send + Sync>;

#[derive(Default)]
struct Script {
	queue: VecDeque<Reply>,
	sticky: Option<Reply>,
}

#[derive(Default)]
struct Inner {
	scripts: Mutex<HashMap<String, Script>>,
	log: Mutex<Vec<ProviderRequest>>,
	probe: Mutex<Option<Probe>>,
	hub: EventHub,
}

/// In-memory [`Provider`] driven by scripted replies.
///
/// Clones share scripts, log and subscribers.
#[derive(Clone, Default)]
pub struct MockProvider {
	inner: Arc<Inner>,
}

impl MockProvider {
	pub fn new() -> Self {
		Self::default()
	}

	/// Answers every call to `method` with `value`.
	pub fn respond(&self, method: &str, value: Value) -> &Self {
		self.script(method, |s| s.sticky = Some(Ok(value)))
	}

	/// Answers the next unanswered call to `method` with `value`.
	pub fn respond_once(&self, method: &str, value: Value) -> &Self {
		self.script(method, |s| s.queue.push_back(Ok(value)))
	}

	/// Rejects every call to `method` with `err`.
	pub fn fail(&self, method: &str, err: ProviderRpcError) -> &Self {
		self.script(method, |s| s.sticky = Some(Err(err)))
	}

	/// Rejects the next unanswered call to `method` with `err`.
	pub fn fail_once(&self, method: &str, err: ProviderRpcError) -> &Self {
		self.script(method, |s| s.queue.push_back(Err(err)))
	}

	/// Installs a callback run at the start of every request, before the reply is produced.
	pub fn on_request(&self, probe: impl Fn(&ProviderRequest) + Send + Sync + 'static) -> &Self {
		*self.inner.probe.lock() = Some(Arc::new(probe));
		self
	}

	/// Every request received so far, oldest first.
	pub fn requests(&self) -> Vec<ProviderRequest> {
		self.inner.log.lock().clone()
	}

	/// Requests received for `method`.
	pub fn requests_for(&self, method: &str) -> Vec<ProviderRequest> {
		self.inner.log.lock().iter().filter(|r| r.method == method).cloned().collect()
	}

	/// Number of requests received for `method`.
	pub fn calls(&self, method: &str) -> usize {
		self.inner.log.lock().iter().filter(|r| r.method == method).count()
	}

	/// Raises a provider event to all current subscribers.
	pub fn emit(&self, event: ProviderEvent) -> usize {
		self.inner.hub.emit(event)
	}

	/// Number of live subscriptions.
	pub fn subscriber_count(&self) -> usize {
		self.inner.hub.len()
	}

	fn script(&self, method: &str, f: impl FnOnce(&mut Script)) -> &Self {
		f(self.inner.scripts.lock().entry(method.to_string()).or_default());
		self
	}

	fn next_reply(&self, method: &str) -> Option<Reply> {
		let mut scripts = self.inner.scripts.lock();
		let script = scripts.get_mut(method)?;
		script.queue.pop_front().or_else(|| script.sticky.clone())
	}
}

impl Provider for MockProvider {
	async fn request(&self, method: &str, params: Value) -> Result<Value> {
		let request = ProviderRequest::new(method, params);
		self.inner.log.lock().push(request.clone());

		// Cloned out so the probe may call back into this provider.
		let probe = self.inner.probe.lock().clone();
		if let Some(probe) = probe {
			probe(&request);
		}

		match self.next_reply(method) {
			Some(Ok(value)) => Ok(value),
			Some(Err(err)) => Err(err.into()),
			None => Err(Error::Unscripted(method.to_string())),
		}
	}

	fn subscribe(&self, sink: EventSink) -> Subscription {
		self.inner.hub.subscribe(sink)
	}
}

impl std::fmt::Debug for MockProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MockProvider")
			.field("requests", &self.inner.log.lock().len())
			.field("subscribers", &self.inner.hub.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;
	use w3w_protocol::methods;

	use super::*;
	use crate::provider::event_channel;

	#[tokio::test]
	async fn once_replies_precede_sticky_reply() {
		let provider = MockProvider::new();
		provider
			.respond_once(methods::ETH_CHAIN_ID, json!("0x1e"))
			.respond(methods::ETH_CHAIN_ID, json!("0x1"));

		assert_eq!(provider.request(methods::ETH_CHAIN_ID, Value::Null).await.unwrap(), json!("0x1e"));
		assert_eq!(provider.request(methods::ETH_CHAIN_ID, Value::Null).await.unwrap(), json!("0x1"));
		assert_eq!(provider.request(methods::ETH_CHAIN_ID, Value::Null).await.unwrap(), json!("0x1"));
		assert_eq!(provider.calls(methods::ETH_CHAIN_ID), 3);
	}

	#[tokio::test]
	async fn scripted_failure_carries_code() {
		let provider = MockProvider::new();
		provider.fail_once(methods::WALLET_SWITCH_ETHEREUM_CHAIN, ProviderRpcError::chain_not_added("0x1e"));

		let err = provider
			.request(methods::WALLET_SWITCH_ETHEREUM_CHAIN, json!([{"chainId": "0x1e"}]))
			.await
			.unwrap_err();
		assert!(err.is_chain_not_added());
	}

	#[tokio::test]
	async fn unscripted_method_is_an_error() {
		let provider = MockProvider::new();
		let err = provider.request("eth_blockNumber", Value::Null).await.unwrap_err();
		assert!(matches!(err, Error::Unscripted(m) if m == "eth_blockNumber"));
	}

	#[tokio::test]
	async fn request_as_deserializes_result() {
		let provider = MockProvider::new();
		provider.respond(methods::ETH_ACCOUNTS, json!(["0xabc", "0xdef"]));

		let accounts: Vec<String> = provider.request_as(methods::ETH_ACCOUNTS, Value::Null).await.unwrap();
		assert_eq!(accounts, vec!["0xabc", "0xdef"]);

		let err = provider.request_as::<u64>(methods::ETH_ACCOUNTS, Value::Null).await.unwrap_err();
		assert!(matches!(err, Error::UnexpectedResponse { .. }));
	}

	#[tokio::test]
	async fn probe_sees_request_before_reply() {
		let provider = MockProvider::new();
		let seen = Arc::new(Mutex::new(Vec::new()));
		let seen_in_probe = Arc::clone(&seen);
		provider
			.respond(methods::ETH_CHAIN_ID, json!("0x1"))
			.on_request(move |req| seen_in_probe.lock().push(req.method.clone()));

		provider.request(methods::ETH_CHAIN_ID, Value::Null).await.unwrap();
		assert_eq!(*seen.lock(), vec!["eth_chainId".to_string()]);
	}

	#[test]
	fn emit_reaches_subscribers_until_dropped() {
		let provider = MockProvider::new();
		let (tx, mut rx) = event_channel();
		let sub = provider.subscribe(tx);

		assert_eq!(provider.emit(ProviderEvent::AccountsChanged(vec![])), 1);
		assert_eq!(rx.try_recv().unwrap(), ProviderEvent::AccountsChanged(vec![]));

		drop(sub);
		assert_eq!(provider.subscriber_count(), 0);
		assert_eq!(provider.emit(ProviderEvent::AccountsChanged(vec![])), 0);
	}
}
