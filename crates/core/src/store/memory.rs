//! In-process store.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::KeyValueStore;
use crate::error::StoreError;

/// Volatile [`KeyValueStore`]. Clones share the same entries, so a clone
/// handed to a second session behaves like the same storage after a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Store pre-populated with `entries`.
	pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
		let map = entries.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
		Self {
			entries: Arc::new(Mutex::new(map)),
		}
	}

	/// Copy of all entries.
	pub fn snapshot(&self) -> BTreeMap<String, String> {
		self.entries.lock().clone()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.lock().is_empty()
	}
}

impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Option<String> {
		self.entries.lock().get(key).cloned()
	}

	fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
		self.entries.lock().insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&mut self, key: &str) -> Result<(), StoreError> {
		self.entries.lock().remove(key);
		Ok(())
	}
}
