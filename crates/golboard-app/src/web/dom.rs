//! DOM-backed surface and document.

use golboard_core::{Surface, SurfaceBounds};
use golboard_core::clipboard::{ClipboardError, ClipboardResult, Document, NodeText};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlDocument, HtmlElement, HtmlTextAreaElement};

use super::js_error_message;

/// Inline style keeping the scratch node off-screen, invisible and inert.
const SCRATCH_STYLE: [(&str, &str); 5] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "-9999px"),
    ("opacity", "0"),
    ("pointer-events", "none"),
];

/// The hook's element, measured on every sample.
pub struct ElementSurface {
    element: Element,
}

impl ElementSurface {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl Surface for ElementSurface {
    fn bounds(&self) -> SurfaceBounds {
        let rect = self.element.get_bounding_client_rect();
        SurfaceBounds::new(rect.left(), rect.top(), rect.width(), rect.height())
    }
}

/// The page's document.
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl Document for WebDocument {
    type Node = Element;

    fn query_selector(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn node_text(&self, node: &Element) -> NodeText {
        let value = js_sys::Reflect::get(node, &JsValue::from_str("value"))
            .ok()
            .and_then(|value| value.as_string());
        NodeText {
            rendered: node.dyn_ref::<HtmlElement>().map(HtmlElement::inner_text),
            markup: Some(node.inner_html()),
            value,
        }
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn insert_scratch(&self, text: &str) -> ClipboardResult<Element> {
        let scratch_error = |e: JsValue| ClipboardError::Scratch(js_error_message(&e));

        let body = self
            .document
            .body()
            .ok_or_else(|| ClipboardError::Scratch("document has no body".to_string()))?;
        let textarea: HtmlTextAreaElement = self
            .document
            .create_element("textarea")
            .map_err(scratch_error)?
            .dyn_into()
            .map_err(|_| ClipboardError::Scratch("created element is not a textarea".to_string()))?;

        textarea.set_value(text);
        textarea.set_attribute("readonly", "").map_err(scratch_error)?;
        textarea.set_attribute("aria-hidden", "true").map_err(scratch_error)?;
        textarea.set_tab_index(-1);
        let style = textarea.style();
        for (name, value) in SCRATCH_STYLE {
            style.set_property(name, value).map_err(scratch_error)?;
        }

        body.append_child(&textarea).map_err(scratch_error)?;
        Ok(textarea.into())
    }

    fn select_contents(&self, node: &Element) {
        if let Some(textarea) = node.dyn_ref::<HtmlTextAreaElement>() {
            let _ = textarea.focus();
            textarea.select();
        }
    }

    fn exec_copy(&self) -> ClipboardResult<bool> {
        let document = self
            .document
            .dyn_ref::<HtmlDocument>()
            .ok_or_else(|| ClipboardError::Command("not an HTML document".to_string()))?;
        document
            .exec_command("copy")
            .map_err(|e| ClipboardError::Command(js_error_message(&e)))
    }

    fn remove_node(&self, node: &Element) {
        node.remove();
    }
}
