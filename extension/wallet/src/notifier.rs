use js_sys::Function;
use w3w::{Notice, NoticeLevel, Notifier};
use wasm_bindgen::JsValue;
use web_sys::console;

use crate::provider::js_message;

/// Hands notices to a page callback (`{ level, message }`), or the console without one.
#[derive(Debug, Default)]
pub struct PageNotifier {
	callback: Option<Function>,
}

impl PageNotifier {
	pub fn new(callback: Option<Function>) -> Self {
		Self { callback }
	}
}

impl Notifier for PageNotifier {
	fn notify(&self, notice: Notice) {
		let Some(callback) = &self.callback else {
			log_to_console(&notice);
			return;
		};
		let delivered = serde_wasm_bindgen::to_value(&notice)
			.map_err(JsValue::from)
			.and_then(|value| callback.call1(&JsValue::NULL, &value));
		if let Err(err) = delivered {
			console::error_1(&format!("notice callback failed: {}", js_message(&err)).into());
			log_to_console(&notice);
		}
	}
}

fn log_to_console(notice: &Notice) {
	let message = JsValue::from_str(&notice.message);
	match notice.level {
		NoticeLevel::Error => console::error_1(&message),
		NoticeLevel::Success | NoticeLevel::Info => console::info_1(&message),
	}
}
