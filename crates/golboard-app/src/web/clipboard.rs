//! Async Clipboard API (`navigator.clipboard`).

use golboard_core::clipboard::{BoxFuture, ClipboardError, ClipboardResult, PlatformClipboard};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::Navigator;

use super::js_error_message;

pub struct NavigatorClipboard {
    navigator: Navigator,
}

impl NavigatorClipboard {
    pub fn new(navigator: Navigator) -> Self {
        Self { navigator }
    }
}

impl PlatformClipboard for NavigatorClipboard {
    /// Insecure contexts and older browsers do not expose `navigator.clipboard`.
    fn is_available(&self) -> bool {
        js_sys::Reflect::get(&self.navigator, &JsValue::from_str("clipboard"))
            .map(|clipboard| !clipboard.is_undefined() && !clipboard.is_null())
            .unwrap_or(false)
    }

    fn write_text(&self, text: &str) -> BoxFuture<'_, ClipboardResult<()>> {
        let promise = self.navigator.clipboard().write_text(text);
        Box::pin(async move {
            JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| ClipboardError::Rejected(js_error_message(&e)))
        })
    }
}
