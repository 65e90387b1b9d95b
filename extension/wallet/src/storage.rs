//! Session persistence in the page's `localStorage`.

use std::io;

use w3w::{KeyValueStore, StoreError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::provider::js_message;

/// [`KeyValueStore`] over `window.localStorage`.
pub struct LocalStorageStore {
	storage: Storage,
}

impl LocalStorageStore {
	/// Returns `None` when storage is unavailable (private mode, sandboxed frame).
	pub fn detect() -> Option<Self> {
		let storage = web_sys::window()?.local_storage().ok()??;
		Some(Self { storage })
	}
}

impl KeyValueStore for LocalStorageStore {
	fn get(&self, key: &str) -> Option<String> {
		self.storage.get_item(key).ok().flatten()
	}

	fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
		self.storage.set_item(key, value).map_err(store_error)
	}

	fn remove(&mut self, key: &str) -> Result<(), StoreError> {
		self.storage.remove_item(key).map_err(store_error)
	}
}

fn store_error(err: JsValue) -> StoreError {
	StoreError::Io(io::Error::other(js_message(&err)))
}
