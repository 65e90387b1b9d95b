//! Durable key-value storage for the session.
//!
//! The layout is deliberately flat and string-typed so it maps one-to-one
//! onto browser `localStorage`:
//!
//! | key | value |
//! |-----|-------|
//! | [`keys::ACCOUNT`] | account address |
//! | [`keys::ROLE`] | `freelancer` \| `client` |
//! | [`keys::NETWORK`] | `ethereum` \| `rootstock` |
//!
//! A missing key means "unset".

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;

/// Persisted key names.
pub mod keys {
	pub const ACCOUNT: &str = "walletAccount";
	pub const ROLE: &str = "userRole";
	pub const NETWORK: &str = "currentNetwork";

	/// Every key owned by the session, cleared together on disconnect.
	pub const ALL: [&str; 3] = [ACCOUNT, ROLE, NETWORK];
}

/// String-keyed durable storage.
pub trait KeyValueStore {
	fn get(&self, key: &str) -> Option<String>;

	fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

	/// Removes `key`. Removing an absent key succeeds.
	fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
	fn get(&self, key: &str) -> Option<String> {
		(**self).get(key)
	}

	fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
		(**self).set(key, value)
	}

	fn remove(&mut self, key: &str) -> Result<(), StoreError> {
		(**self).remove(key)
	}
}
