//! The wallet provider capability.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::mpsc;
use w3w_protocol::ProviderEvent;

use crate::error::{Error, Result};
use crate::handlers::Subscription;

/// Sending half handed to [`Provider::subscribe`].
pub type EventSink = mpsc::UnboundedSender<ProviderEvent>;

/// Receiving half kept by whoever consumes provider events.
pub type EventStream = mpsc::UnboundedReceiver<ProviderEvent>;

/// Creates a connected sink/stream pair for provider events.
pub fn event_channel() -> (EventSink, EventStream) {
	mpsc::unbounded_channel()
}

/// A wallet provider: request/response calls plus provider-level events.
///
/// Mirrors the EIP-1193 object a browser wallet injects. Futures are not
/// required to be `Send`; browser providers are single-threaded.
#[allow(async_fn_in_trait)]
pub trait Provider {
	/// Performs `request({ method, params })`.
	async fn request(&self, method: &str, params: Value) -> Result<Value>;

	/// Registers `sink` for `accountsChanged` / `chainChanged`.
	///
	/// The returned [`Subscription`] unregisters the sink when dropped.
	fn subscribe(&self, sink: EventSink) -> Subscription;

	/// Performs a request and deserializes the result.
	async fn request_as<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
		let value = self.request(method, params).await?;
		serde_json::from_value(value).map_err(|e| Error::UnexpectedResponse {
			method: method.to_string(),
			reason: e.to_string(),
		})
	}
}
