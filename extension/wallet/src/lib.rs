//! Browser bridge for the w3w wallet session.
//!
//! Built with `wasm-pack` and loaded by the marketplace page. [`WalletBridge`]
//! drives a [`WalletSession`] whose provider is the injected
//! `window.ethereum`, whose store is `localStorage`, and whose notices go to
//! a page callback. Provider events are applied on the page's event loop as
//! soon as no other wallet operation is running.

pub mod convert;
pub mod notifier;
pub mod provider;
pub mod storage;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{Function, Promise, Reflect};
use serde::Serialize;
use tokio::sync::watch;
use w3w::{KeyValueStore, MemoryStore, Session, SessionError, WalletSession};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::console;

use crate::convert::{SessionView, parse_network, parse_role};
use crate::notifier::PageNotifier;
use crate::provider::InjectedProvider;
use crate::storage::LocalStorageStore;

type BridgeSession = WalletSession<InjectedProvider, Box<dyn KeyValueStore>, PageNotifier>;

const BUSY: &str = "a wallet operation is already in progress";

#[wasm_bindgen(start)]
pub fn start() {
	console_error_panic_hook::set_once();
}

/// Page-facing handle on one wallet session.
#[wasm_bindgen]
pub struct WalletBridge {
	session: Rc<RefCell<BridgeSession>>,
	view: watch::Receiver<Session>,
	has_provider: bool,
}

#[wasm_bindgen]
impl WalletBridge {
	/// `on_notice` receives `{ level, message }` for every notice.
	#[wasm_bindgen(constructor)]
	pub fn new(on_notice: Option<Function>) -> WalletBridge {
		let provider = InjectedProvider::detect();
		let store: Box<dyn KeyValueStore> = match LocalStorageStore::detect() {
			Some(store) => Box::new(store),
			None => {
				console::warn_1(&"localStorage unavailable; the wallet session will not survive a reload".into());
				Box::new(MemoryStore::new())
			}
		};

		let has_provider = provider.is_some();
		let session = Rc::new(RefCell::new(WalletSession::new(
			provider.clone(),
			store,
			PageNotifier::new(on_notice),
		)));
		let view = session.borrow().subscribe();

		if let Some(provider) = provider {
			let weak = Rc::downgrade(&session);
			provider.on_event(move || schedule_drain(weak.clone()));
		}

		WalletBridge {
			session,
			view,
			has_provider,
		}
	}

	/// Restores the persisted session and starts listening for wallet events.
	pub fn initialize(&self) -> Result<JsValue, JsValue> {
		let mut wallet = self.session.try_borrow_mut().map_err(|_| busy())?;
		wallet.initialize();
		to_js(&SessionView::from(&wallet.session()))
	}

	/// Connects the wallet; resolves to the session, rejects with an `Error` carrying `kind`.
	#[allow(clippy::await_holding_refcell_ref)]
	pub fn connect(&self, network: Option<String>) -> Promise {
		let session = Rc::clone(&self.session);
		future_to_promise(async move {
			let preferred = parse_network(network.as_deref()).map_err(|e| js_error("INVALID_INPUT", &e.to_string()))?;
			let mut wallet = session.try_borrow_mut().map_err(|_| busy())?;
			let result = wallet.connect(preferred).await;
			wallet.drain_events();
			let snapshot = result.map_err(session_error)?;
			to_js(&SessionView::from(&snapshot))
		})
	}

	/// Switches the wallet's network; resolves to the network name.
	#[wasm_bindgen(js_name = switchNetwork)]
	#[allow(clippy::await_holding_refcell_ref)]
	pub fn switch_network(&self, network: String) -> Promise {
		let session = Rc::clone(&self.session);
		future_to_promise(async move {
			let target = parse_network(Some(&network)).map_err(|e| js_error("INVALID_INPUT", &e.to_string()))?;
			let mut wallet = session.try_borrow_mut().map_err(|_| busy())?;
			let result = wallet.switch_network(target).await;
			wallet.drain_events();
			let network = result.map_err(session_error)?;
			Ok(JsValue::from_str(network.as_str()))
		})
	}

	pub fn disconnect(&self) -> Result<JsValue, JsValue> {
		let mut wallet = self.session.try_borrow_mut().map_err(|_| busy())?;
		wallet.disconnect();
		to_js(&SessionView::from(&wallet.session()))
	}

	/// Sets the role; `undefined` or `""` clears it.
	#[wasm_bindgen(js_name = setRole)]
	pub fn set_role(&self, role: Option<String>) -> Result<JsValue, JsValue> {
		let role = parse_role(role.as_deref()).map_err(|e| js_error("INVALID_INPUT", &e.to_string()))?;
		let mut wallet = self.session.try_borrow_mut().map_err(|_| busy())?;
		wallet.set_role(role);
		to_js(&SessionView::from(&wallet.session()))
	}

	/// Current session snapshot. Readable while a connect is pending.
	pub fn session(&self) -> Result<JsValue, JsValue> {
		let snapshot = self.view.borrow().clone();
		to_js(&SessionView::from(&snapshot))
	}

	#[wasm_bindgen(js_name = hasProvider)]
	pub fn has_provider(&self) -> bool {
		self.has_provider
	}

	/// Calls `callback(session)` after every session change until the bridge is freed.
	#[wasm_bindgen(js_name = onChange)]
	pub fn on_change(&self, callback: Function) {
		let mut view = self.view.clone();
		spawn_local(async move {
			while view.changed().await.is_ok() {
				let snapshot = view.borrow_and_update().clone();
				let delivered = to_js(&SessionView::from(&snapshot)).and_then(|value| callback.call1(&JsValue::NULL, &value));
				if let Err(err) = delivered {
					console::error_1(&err);
				}
			}
		});
	}

	/// Stops listening for wallet events.
	pub fn teardown(&self) -> Result<(), JsValue> {
		let mut wallet = self.session.try_borrow_mut().map_err(|_| busy())?;
		wallet.teardown();
		Ok(())
	}
}

/// Applies queued provider events once the current JS task has finished.
///
/// A running operation holds the session; it drains the queue itself when done.
fn schedule_drain(session: Weak<RefCell<BridgeSession>>) {
	spawn_local(async move {
		let Some(session) = session.upgrade() else { return };
		if let Ok(mut wallet) = session.try_borrow_mut() {
			wallet.drain_events();
		}
	});
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
	value
		.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
		.map_err(JsValue::from)
}

fn js_error(kind: &str, message: &str) -> JsValue {
	let error = js_sys::Error::new(message);
	// Setting a property on a fresh Error object cannot fail.
	let _ = Reflect::set(&error, &JsValue::from_str("kind"), &JsValue::from_str(kind));
	error.into()
}

fn session_error(err: SessionError) -> JsValue {
	js_error(err.kind(), &err.to_string())
}

fn busy() -> JsValue {
	js_error("BUSY", BUSY)
}
