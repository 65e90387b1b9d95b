//! EIP-1193 provider backed by the page's injected `window.ethereum`.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise, Reflect};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use w3w_protocol::methods::{EVENT_ACCOUNTS_CHANGED, EVENT_CHAIN_CHANGED};
use w3w_protocol::{ProviderEvent, ProviderRequest};
use w3w_runtime::{Error, EventSink, Provider, Result, Subscription, next_handler_id};
use web_sys::console;

type EventHook = Rc<RefCell<Option<Rc<dyn Fn()>>>>;

/// The wallet object a browser extension injects into the page.
///
/// Clones share the JS object and the event hook.
#[derive(Clone)]
pub struct InjectedProvider {
	ethereum: JsValue,
	hook: EventHook,
}

impl InjectedProvider {
	/// Returns the injected provider, or `None` when no wallet is installed.
	pub fn detect() -> Option<Self> {
		let window = web_sys::window()?;
		let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
		if ethereum.is_undefined() || ethereum.is_null() {
			return None;
		}
		Some(Self {
			ethereum,
			hook: Rc::new(RefCell::new(None)),
		})
	}

	/// Runs `hook` after each provider event has been queued on a subscribed sink.
	pub fn on_event(&self, hook: impl Fn() + 'static) {
		*self.hook.borrow_mut() = Some(Rc::new(hook));
	}
}

impl Provider for InjectedProvider {
	async fn request(&self, method: &str, params: Value) -> Result<Value> {
		let request = ProviderRequest::new(method, params);
		let arg = request
			.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
			.map_err(|e| Error::Transport(e.to_string()))?;

		let call = function(&self.ethereum, "request").map_err(|e| Error::Transport(js_message(&e)))?;
		let returned = call.call1(&self.ethereum, &arg).map_err(rpc_error)?;
		let value = JsFuture::from(Promise::resolve(&returned)).await.map_err(rpc_error)?;

		if value.is_undefined() || value.is_null() {
			return Ok(Value::Null);
		}
		serde_wasm_bindgen::from_value(value).map_err(|e| Error::UnexpectedResponse {
			method: method.to_string(),
			reason: e.to_string(),
		})
	}

	fn subscribe(&self, sink: EventSink) -> Subscription {
		let accounts_sink = sink.clone();
		let accounts_hook = Rc::clone(&self.hook);
		let on_accounts = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
			match serde_wasm_bindgen::from_value::<Vec<String>>(value) {
				Ok(accounts) => {
					if accounts_sink.send(ProviderEvent::AccountsChanged(accounts)).is_ok() {
						fire(&accounts_hook);
					}
				}
				Err(err) => console::warn_1(&format!("ignoring malformed accountsChanged payload: {err}").into()),
			}
		});

		let chain_hook = Rc::clone(&self.hook);
		let on_chain = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| match value.as_string() {
			Some(chain_id) => {
				if sink.send(ProviderEvent::ChainChanged(chain_id)).is_ok() {
					fire(&chain_hook);
				}
			}
			None => console::warn_1(&"ignoring chainChanged without a chain id".into()),
		});

		listen(&self.ethereum, "on", EVENT_ACCOUNTS_CHANGED, on_accounts.as_ref());
		listen(&self.ethereum, "on", EVENT_CHAIN_CHANGED, on_chain.as_ref());

		let ethereum = self.ethereum.clone();
		Subscription::new(next_handler_id(), move |_| {
			listen(&ethereum, "removeListener", EVENT_ACCOUNTS_CHANGED, on_accounts.as_ref());
			listen(&ethereum, "removeListener", EVENT_CHAIN_CHANGED, on_chain.as_ref());
			drop((on_accounts, on_chain));
		})
	}
}

impl std::fmt::Debug for InjectedProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("InjectedProvider")
			.field("hooked", &self.hook.borrow().is_some())
			.finish_non_exhaustive()
	}
}

fn fire(hook: &EventHook) {
	let hook = hook.borrow().clone();
	if let Some(hook) = hook {
		hook();
	}
}

/// Calls `ethereum[method](event, callback)`, logging failures to the console.
fn listen(ethereum: &JsValue, method: &str, event: &str, callback: &JsValue) {
	let result = function(ethereum, method).and_then(|f| f.call2(ethereum, &JsValue::from_str(event), callback));
	if let Err(err) = result {
		console::warn_1(&format!("window.ethereum.{method}({event}) failed: {}", js_message(&err)).into());
	}
}

fn function(target: &JsValue, name: &str) -> std::result::Result<Function, JsValue> {
	Reflect::get(target, &JsValue::from_str(name))?
		.dyn_into::<Function>()
		.map_err(|_| JsValue::from_str(&format!("window.ethereum.{name} is not a function")))
}

/// Maps a rejected request to [`Error::Rpc`] when the wallet supplied a numeric `code`.
fn rpc_error(err: JsValue) -> Error {
	let code = Reflect::get(&err, &JsValue::from_str("code")).ok().and_then(|code| code.as_f64());
	match code {
		Some(code) => Error::Rpc {
			code: code as i64,
			message: js_message(&err),
		},
		None => Error::Transport(js_message(&err)),
	}
}

/// Best-effort human text for a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
	if let Some(text) = value.as_string() {
		return text;
	}
	if let Some(message) = Reflect::get(value, &JsValue::from_str("message")).ok().and_then(|m| m.as_string()) {
		return message;
	}
	format!("{value:?}")
}
