//! Event subscription infrastructure.
//!
//! [`EventHub`] stores event sinks in an [`IndexMap`] for O(1) removal with
//! stable delivery order; [`Subscription`] is the RAII handle that removes a
//! sink again.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::Mutex;
use w3w_protocol::ProviderEvent;

use crate::provider::EventSink;

/// Unique identifier for event handlers.
pub type HandlerId = u64;

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

/// Returns a new globally-unique handler ID.
pub fn next_handler_id() -> HandlerId {
	NEXT_HANDLER_ID.fetch_add(1, Ordering::SeqCst)
}

type SinkMap = Mutex<IndexMap<HandlerId, EventSink>>;

/// RAII handle that unregisters an event handler on drop.
///
/// The dropper is an arbitrary closure so providers backed by foreign
/// listener APIs (e.g. `removeListener` on an injected wallet) can release
/// their own resources. It is not required to be `Send`.
pub struct Subscription {
	id: HandlerId,
	dropper: Option<Box<dyn FnOnce(HandlerId)>>,
}

impl Subscription {
	/// Creates a subscription with a custom dropper function.
	pub fn new(id: HandlerId, dropper: impl FnOnce(HandlerId) + 'static) -> Self {
		Self {
			id,
			dropper: Some(Box::new(dropper)),
		}
	}

	/// Returns this subscription's handler ID.
	pub fn id(&self) -> HandlerId {
		self.id
	}

	/// Explicitly unsubscribes. Equivalent to dropping.
	pub fn unsubscribe(mut self) {
		self.release();
	}

	fn release(&mut self) {
		if let Some(dropper) = self.dropper.take() {
			dropper(self.id);
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.release();
	}
}

impl std::fmt::Debug for Subscription {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Subscription")
			.field("id", &self.id)
			.field("active", &self.dropper.is_some())
			.finish()
	}
}

/// Fan-out point for provider events.
///
/// Cloning shares the same sink table.
#[derive(Clone, Default)]
pub struct EventHub {
	sinks: Arc<SinkMap>,
}

impl EventHub {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `sink`. The subscription holds a weak reference, so dropping
	/// it after the hub is gone is a no-op.
	pub fn subscribe(&self, sink: EventSink) -> Subscription {
		let id = next_handler_id();
		self.sinks.lock().insert(id, sink);

		let weak: Weak<SinkMap> = Arc::downgrade(&self.sinks);
		Subscription::new(id, move |id| {
			if let Some(map) = weak.upgrade() {
				map.lock().shift_remove(&id);
			}
		})
	}

	/// Delivers `event` to every registered sink and returns how many took it.
	///
	/// Sinks whose receiver is gone are pruned.
	pub fn emit(&self, event: ProviderEvent) -> usize {
		let mut sinks = self.sinks.lock();
		sinks.retain(|id, sink| {
			let delivered = sink.send(event.clone()).is_ok();
			if !delivered {
				tracing::debug!(id, event = event.name(), "pruning closed event sink");
			}
			delivered
		});
		sinks.len()
	}

	/// Number of registered sinks.
	pub fn len(&self) -> usize {
		self.sinks.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl std::fmt::Debug for EventHub {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventHub").field("sinks", &self.len()).finish()
	}
}
