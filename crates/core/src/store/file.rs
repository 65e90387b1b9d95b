//! JSON file store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::KeyValueStore;
use crate::error::StoreError;

/// [`KeyValueStore`] persisted as a flat JSON object.
///
/// Entries are cached in memory and the whole file is rewritten on every
/// change. A missing file is an empty store; an unreadable one is logged
/// and treated as empty.
#[derive(Debug)]
pub struct JsonFileStore {
	path: PathBuf,
	entries: BTreeMap<String, String>,
}

impl JsonFileStore {
	pub fn open(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		let entries = load_json(&path).unwrap_or_default();
		Self { path, entries }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Writes `entries` and adopts them only once the file holds them.
	fn commit(&mut self, entries: BTreeMap<String, String>) -> Result<(), StoreError> {
		save_json(&self.path, &entries)?;
		self.entries = entries;
		Ok(())
	}
}

impl KeyValueStore for JsonFileStore {
	fn get(&self, key: &str) -> Option<String> {
		self.entries.get(key).cloned()
	}

	fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
		if self.entries.get(key).map(String::as_str) == Some(value) {
			return Ok(());
		}
		let mut entries = self.entries.clone();
		entries.insert(key.to_string(), value.to_string());
		self.commit(entries)
	}

	fn remove(&mut self, key: &str) -> Result<(), StoreError> {
		if !self.entries.contains_key(key) {
			return Ok(());
		}
		let mut entries = self.entries.clone();
		entries.remove(key);
		self.commit(entries)
	}
}

fn load_json(path: &Path) -> Option<BTreeMap<String, String>> {
	let content = match fs::read_to_string(path) {
		Ok(content) => content,
		Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
		Err(err) => {
			warn!(target = "w3w.store", path = %path.display(), error = %err, "cannot read session store");
			return None;
		}
	};

	match serde_json::from_str(&content) {
		Ok(entries) => Some(entries),
		Err(err) => {
			warn!(target = "w3w.store", path = %path.display(), error = %err, "ignoring malformed session store");
			None
		}
	}
}

fn save_json(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}
	fs::write(path, serde_json::to_string_pretty(entries)?)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use tempfile::TempDir;

	use super::*;

	#[test]
	fn missing_file_is_empty_store() {
		let tmp = TempDir::new().unwrap();
		let store = JsonFileStore::open(tmp.path().join("nonexistent.json"));
		assert_eq!(store.get("walletAccount"), None);
	}

	#[test]
	fn values_survive_reopen() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("nested/dir/session.json");

		let mut store = JsonFileStore::open(&path);
		store.set("walletAccount", "0xABC").unwrap();
		store.set("currentNetwork", "rootstock").unwrap();

		let reopened = JsonFileStore::open(&path);
		assert_eq!(reopened.get("walletAccount").as_deref(), Some("0xABC"));
		assert_eq!(reopened.get("currentNetwork").as_deref(), Some("rootstock"));
	}

	#[test]
	fn remove_is_idempotent() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("session.json");

		let mut store = JsonFileStore::open(&path);
		store.set("userRole", "client").unwrap();
		store.remove("userRole").unwrap();
		store.remove("userRole").unwrap();

		assert_eq!(JsonFileStore::open(&path).get("userRole"), None);
	}

	#[test]
	fn malformed_file_is_treated_as_empty() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("session.json");
		fs::write(&path, "{not json").unwrap();

		let mut store = JsonFileStore::open(&path);
		assert_eq!(store.get("walletAccount"), None);

		store.set("walletAccount", "0xabc").unwrap();
		assert_eq!(JsonFileStore::open(&path).get("walletAccount").as_deref(), Some("0xabc"));
	}

	#[test]
	fn failed_write_leaves_entries_untouched() {
		let tmp = TempDir::new().unwrap();
		let blocker = tmp.path().join("blocker");
		fs::write(&blocker, "").unwrap();

		let mut store = JsonFileStore::open(blocker.join("session.json"));
		assert!(store.set("walletAccount", "0xABC").is_err());
		assert_eq!(store.get("walletAccount"), None);
	}

	#[test]
	fn failed_remove_keeps_entry() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("state/session.json");

		let mut store = JsonFileStore::open(&path);
		store.set("userRole", "client").unwrap();
		fs::remove_dir_all(tmp.path().join("state")).unwrap();
		fs::write(tmp.path().join("state"), "").unwrap();

		assert!(store.remove("userRole").is_err());
		assert_eq!(store.get("userRole").as_deref(), Some("client"));
	}
}
