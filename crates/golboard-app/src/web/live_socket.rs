//! Calls into the LiveView client: `liveSocket.execJS` and `hook.pushEvent`.

use golboard_core::{EventSink, ScriptBridge, SurfaceEvent};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

use super::js_error_message;

/// Call `target[name](...args)` with `target` as `this`.
fn call_method(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let method: js_sys::Function = js_sys::Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
    let args: js_sys::Array = args.iter().collect();
    method.apply(target, &args)
}

/// Runs declarative JS commands through the page's `liveSocket`.
#[derive(Clone)]
pub struct LiveSocketBridge {
    live_socket: JsValue,
}

impl LiveSocketBridge {
    pub fn new(live_socket: JsValue) -> Self {
        Self { live_socket }
    }
}

impl ScriptBridge<Element> for LiveSocketBridge {
    fn execute(&self, element: &Element, script: &str) {
        let args = [JsValue::from(element.clone()), JsValue::from_str(script)];
        if let Err(e) = call_method(&self.live_socket, "execJS", &args) {
            log::error!("execJS failed: {}", js_error_message(&e));
        }
    }
}

/// Pushes surface events to the server through the hook's `pushEvent`.
pub struct HookSink {
    hook: JsValue,
}

impl HookSink {
    pub fn new(hook: JsValue) -> Self {
        Self { hook }
    }
}

impl EventSink for HookSink {
    fn push_event(&self, event: SurfaceEvent) {
        let payload = match serde_wasm_bindgen::to_value(&event.offset()) {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("Failed to encode {} payload: {}", event.name(), e);
                return;
            }
        };
        let args = [JsValue::from_str(event.name()), payload];
        if let Err(e) = call_method(&self.hook, "pushEvent", &args) {
            log::error!("pushEvent failed: {}", js_error_message(&e));
        }
    }
}
