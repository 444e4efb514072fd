//! WebAssembly entry point and LiveView hook bindings.
//!
//! This is the composition root: it builds the DOM-backed capabilities, hands
//! them to the core components and keeps the listener closures alive. Used
//! from the page like
//! ```js
//! Hooks.Draw = {
//!     mounted() { this.draw = DrawHook.mount(this.el, this, {}); },
//!     destroyed() { this.draw.free(); },
//! };
//! installCopyListener(liveSocket, {});
//! installHelpers(liveSocket, {});
//! ```

mod clipboard;
mod dom;
mod live_socket;

use std::cell::RefCell;
use std::rc::Rc;

use golboard_core::helpers::{ExecTimeout, toggled_aria_expanded};
use golboard_core::{
    ClipboardBridge, CoordinateNormalizer, CopyEvent, CopyPayload, CopyTarget, HookConfig,
    RawPointerSample, ScriptBridge, SurfaceEvent, TouchSample,
};
use kurbo::Point;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, CustomEvent, Element, Event, EventTarget, MouseEvent, TouchEvent,
};

use clipboard::NavigatorClipboard;
use dom::{ElementSurface, WebDocument};
use live_socket::{HookSink, LiveSocketBridge};

type WebNormalizer = CoordinateNormalizer<ElementSurface, HookSink>;

/// Best-effort text for a thrown JS value.
fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Parse an optional options object; `undefined` and `null` mean defaults.
fn parse_config(options: JsValue) -> Result<HookConfig, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(HookConfig::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(JsValue::from)
}

/// Non-empty field of a JS object.
fn field(object: &JsValue, name: &str) -> Option<JsValue> {
    js_sys::Reflect::get(object, &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// Event listener removed from its target when dropped.
struct Listener {
    target: EventTarget,
    event: String,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn new<F>(target: &EventTarget, event: &str, passive: bool, callback: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        if passive {
            let options = AddEventListenerOptions::new();
            options.set_passive(true);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )?;
        } else {
            target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        }
        Ok(Self {
            target: target.clone(),
            event: event.to_string(),
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(&self.event, self.callback.as_ref().unchecked_ref());
    }
}

fn pointer_listener(
    target: &EventTarget,
    event: &str,
    normalizer: &Rc<RefCell<WebNormalizer>>,
    handler: fn(&mut WebNormalizer, RawPointerSample) -> Option<SurfaceEvent>,
) -> Result<Listener, JsValue> {
    let normalizer = Rc::clone(normalizer);
    Listener::new(target, event, false, move |event: Event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        // Client coordinates stay correct when the event lands on a child
        // of the surface; offsetX/offsetY would be relative to that child.
        let sample = RawPointerSample::client(f64::from(event.client_x()), f64::from(event.client_y()));
        if let Ok(mut normalizer) = normalizer.try_borrow_mut() {
            handler(&mut normalizer, sample);
        }
    })
}

fn touch_listener(
    target: &EventTarget,
    event: &str,
    passive: bool,
    normalizer: &Rc<RefCell<WebNormalizer>>,
    handler: fn(&mut WebNormalizer, &TouchSample) -> Option<SurfaceEvent>,
) -> Result<Listener, JsValue> {
    let normalizer = Rc::clone(normalizer);
    Listener::new(target, event, passive, move |event: Event| {
        let Some(event) = event.dyn_ref::<TouchEvent>() else {
            return;
        };
        let sample = touch_sample(event);
        if let Ok(mut normalizer) = normalizer.try_borrow_mut() {
            handler(&mut normalizer, &sample);
        }
    })
}

/// Active contacts and (Safari-only) pinch scale of a touch event.
fn touch_sample(event: &TouchEvent) -> TouchSample {
    let touches = event.touches();
    let points = (0..touches.length())
        .filter_map(|i| touches.get(i))
        .map(|touch| Point::new(f64::from(touch.client_x()), f64::from(touch.client_y())))
        .collect();
    TouchSample {
        touches: points,
        scale: field(event, "scale").and_then(|scale| scale.as_f64()),
    }
}

/// Draw hook attached to one surface element.
///
/// Dropping it (`free()` from JS) removes every listener.
#[wasm_bindgen]
pub struct DrawHook {
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl DrawHook {
    /// Attach to `element`. `hook` is the LiveView hook object whose
    /// `pushEvent` receives the `draw` and `click` events.
    pub fn mount(element: Element, hook: JsValue, options: JsValue) -> Result<DrawHook, JsValue> {
        let config = parse_config(options)?;
        let normalizer = Rc::new(RefCell::new(CoordinateNormalizer::with_config(
            ElementSurface::new(element.clone()),
            HookSink::new(hook),
            config.surface,
        )));

        let target: &EventTarget = element.as_ref();
        let listeners = vec![
            pointer_listener(target, "mousedown", &normalizer, WebNormalizer::pointer_down)?,
            pointer_listener(target, "mousemove", &normalizer, WebNormalizer::pointer_move)?,
            pointer_listener(target, "mouseup", &normalizer, WebNormalizer::pointer_up)?,
            touch_listener(target, "touchstart", true, &normalizer, WebNormalizer::touch_start)?,
            touch_listener(target, "touchmove", true, &normalizer, WebNormalizer::touch_move)?,
            touch_listener(target, "touchend", false, &normalizer, WebNormalizer::touch_end)?,
        ];

        log::debug!("Draw hook mounted on <{}>", element.tag_name().to_lowercase());
        Ok(Self {
            _listeners: listeners,
        })
    }
}

/// Build a copy event from a `phx:copy` style DOM event.
///
/// `detail.to` is either a selector string (pushed by the server) or an
/// element; the event target is `None` when dispatched on the window.
fn copy_event(event: &Event) -> CopyEvent<Element> {
    let detail = event
        .dyn_ref::<CustomEvent>()
        .map(CustomEvent::detail)
        .unwrap_or(JsValue::UNDEFINED);
    let string = |name: &str| field(&detail, name).and_then(|value| value.as_string());

    let payload = CopyPayload {
        text: string("text"),
        to: string("to"),
        el: string("el"),
    };
    let target = event.target().and_then(|target| target.dyn_into::<Element>().ok());

    let mut copy = CopyEvent::from_payload(payload, target);
    if let Some(node) = field(&detail, "to").and_then(|to| to.dyn_into::<Element>().ok()) {
        copy.to = Some(CopyTarget::Node(node));
    }
    copy
}

/// Window listener serving copy requests.
#[wasm_bindgen]
pub struct CopyListener {
    _listener: Listener,
}

/// Listen for copy events on the window and fulfil them.
#[wasm_bindgen(js_name = installCopyListener)]
pub fn install_copy_listener(live_socket: JsValue, options: JsValue) -> Result<CopyListener, JsValue> {
    let config = parse_config(options)?;
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let bridge = Rc::new(ClipboardBridge::with_config(
        WebDocument::new(document),
        NavigatorClipboard::new(window.navigator()),
        LiveSocketBridge::new(live_socket),
        config.copy.clone(),
    ));

    let listener = Listener::new(window.as_ref(), &config.copy.event, false, move |event: Event| {
        let event = copy_event(&event);
        let bridge = Rc::clone(&bridge);
        wasm_bindgen_futures::spawn_local(async move {
            // Malformed requests are logged by the bridge itself.
            let _ = bridge.handle(event).await;
        });
    })?;

    log::debug!("Copy listener installed for {}", config.copy.event);
    Ok(CopyListener {
        _listener: listener,
    })
}

/// Window listeners for the ARIA toggle and delayed script execution.
#[wasm_bindgen]
pub struct HelperListeners {
    _listeners: Vec<Listener>,
}

#[wasm_bindgen(js_name = installHelpers)]
pub fn install_helpers(live_socket: JsValue, options: JsValue) -> Result<HelperListeners, JsValue> {
    let config = parse_config(options)?;
    let window = web_sys::window().ok_or("No window")?;
    let bridge = LiveSocketBridge::new(live_socket);

    let toggle = Listener::new(
        window.as_ref(),
        &config.helpers.toggle_aria_event,
        false,
        |event: Event| {
            let Some(element) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let current = element.get_attribute("aria-expanded");
            let next = toggled_aria_expanded(current.as_deref());
            if let Err(e) = element.set_attribute("aria-expanded", next) {
                log::warn!("Failed to toggle aria-expanded: {}", js_error_message(&e));
            }
        },
    )?;

    let timer_window = window.clone();
    let exec_timeout = Listener::new(
        window.as_ref(),
        &config.helpers.exec_timeout_event,
        false,
        move |event: Event| {
            let Some(element) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let detail = event
                .dyn_ref::<CustomEvent>()
                .map(CustomEvent::detail)
                .unwrap_or(JsValue::UNDEFINED);
            let request: ExecTimeout = match serde_wasm_bindgen::from_value(detail) {
                Ok(request) => request,
                Err(e) => {
                    log::warn!("Invalid exec-timeout payload: {}", e);
                    return;
                }
            };
            let (Some(delay), Some(attribute)) = (request.delay_ms(), request.attribute()) else {
                return;
            };

            let attribute = attribute.to_string();
            let bridge = bridge.clone();
            let run = Closure::once_into_js(move || {
                match element.get_attribute(&attribute) {
                    Some(script) if !script.is_empty() => bridge.execute(&element, &script),
                    _ => {}
                }
            });
            let delay = i32::try_from(delay).unwrap_or(i32::MAX);
            if let Err(e) = timer_window
                .set_timeout_with_callback_and_timeout_and_arguments_0(run.unchecked_ref(), delay)
            {
                log::error!("Failed to schedule script: {}", js_error_message(&e));
            }
        },
    )?;

    Ok(HelperListeners {
        _listeners: vec![toggle, exec_timeout],
    })
}

/// Initialize logging for the hooks.
#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // A logger already installed by the embedding page wins.
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("golboard hooks loaded");
}
