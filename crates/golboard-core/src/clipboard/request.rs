//! Copy request payloads and their resolution against a document.

use serde::{Deserialize, Serialize};

use super::{CopyError, Document};

/// Payload of a copy event as pushed by the server or dispatched by markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyPayload {
    /// Literal text to copy.
    #[serde(default)]
    pub text: Option<String>,
    /// Selector of the node to copy from.
    #[serde(default)]
    pub to: Option<String>,
    /// Selector of the element whose copy attributes are consulted.
    #[serde(default)]
    pub el: Option<String>,
}

/// Node reference carried by a copy event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyTarget<N> {
    Selector(String),
    Node(N),
}

/// A copy event before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyEvent<N> {
    pub text: Option<String>,
    pub to: Option<CopyTarget<N>>,
    pub el: Option<String>,
    /// Element the event was dispatched on; `None` when dispatched on the window.
    pub target: Option<N>,
}

impl<N> CopyEvent<N> {
    pub fn from_payload(payload: CopyPayload, target: Option<N>) -> Self {
        Self {
            text: payload.text,
            to: payload.to.map(CopyTarget::Selector),
            el: payload.el,
            target,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            to: None,
            el: None,
            target: None,
        }
    }

    pub fn selector(selector: impl Into<String>) -> Self {
        Self {
            text: None,
            to: Some(CopyTarget::Selector(selector.into())),
            el: None,
            target: None,
        }
    }

    pub fn with_target(mut self, target: N) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_trigger(mut self, selector: impl Into<String>) -> Self {
        self.el = Some(selector.into());
        self
    }
}

/// Where the copied text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopySource<N> {
    Text(String),
    Node(N),
}

/// A validated copy request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest<N> {
    pub source: CopySource<N>,
    /// Element whose copy attributes decide the follow-up script.
    pub trigger: Option<N>,
}

impl<N: Clone> CopyRequest<N> {
    /// Resolve an event against `document`.
    ///
    /// Literal text wins over any node reference. Without text, an explicit
    /// `to` is used, else the element the event was dispatched on.
    pub fn resolve<D>(event: CopyEvent<N>, document: &D) -> Result<Self, CopyError>
    where
        D: Document<Node = N>,
    {
        let trigger = match event.el.as_deref() {
            Some(selector) => document.query_selector(selector),
            None => event.target.clone(),
        };

        let source = match (event.text.filter(|text| !text.is_empty()), event.to) {
            (Some(text), _) => CopySource::Text(text),
            (None, Some(CopyTarget::Node(node))) => CopySource::Node(node),
            (None, Some(CopyTarget::Selector(selector))) => match document.query_selector(&selector) {
                Some(node) => CopySource::Node(node),
                None => return Err(CopyError::TargetNotFound(selector)),
            },
            (None, None) => match event.target {
                Some(node) => CopySource::Node(node),
                None => return Err(CopyError::MissingSource),
            },
        };

        Ok(Self { source, trigger })
    }

    /// The text to place on the clipboard.
    pub fn text<D>(&self, document: &D) -> String
    where
        D: Document<Node = N>,
    {
        match &self.source {
            CopySource::Text(text) => text.clone(),
            CopySource::Node(node) => document.node_text(node).resolve(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{MemoryDocument, MemoryNode, NodeId};

    fn document() -> (MemoryDocument, NodeId, NodeId) {
        let document = MemoryDocument::new();
        let panel = document.insert("#panel", MemoryNode::with_text("hello"));
        let button = document.insert("#button", MemoryNode::default());
        (document, panel, button)
    }

    #[test]
    fn test_text_wins() {
        let (document, panel, _) = document();
        let event = CopyEvent {
            text: Some("abc".into()),
            to: Some(CopyTarget::Node(panel)),
            el: None,
            target: None,
        };
        let request = CopyRequest::resolve(event, &document).unwrap();
        assert_eq!(request.source, CopySource::Text("abc".into()));
        assert_eq!(request.text(&document), "abc");
    }

    #[test]
    fn test_selector_is_queried() {
        let (document, panel, _) = document();
        let request = CopyRequest::resolve(CopyEvent::selector("#panel"), &document).unwrap();
        assert_eq!(request.source, CopySource::Node(panel));
        assert_eq!(request.text(&document), "hello");
    }

    #[test]
    fn test_missing_selector() {
        let (document, _, _) = document();
        let result = CopyRequest::resolve(CopyEvent::selector("#missing"), &document);
        assert_eq!(result, Err(CopyError::TargetNotFound("#missing".into())));
    }

    #[test]
    fn test_event_target_is_implicit_source() {
        let (document, panel, _) = document();
        let event = CopyEvent::from_payload(CopyPayload::default(), Some(panel));
        let request = CopyRequest::resolve(event, &document).unwrap();
        assert_eq!(request.source, CopySource::Node(panel));
        assert_eq!(request.trigger, Some(panel));
    }

    #[test]
    fn test_empty_payload_on_window() {
        let (document, _, _) = document();
        let event = CopyEvent::from_payload(CopyPayload::default(), None);
        assert_eq!(CopyRequest::resolve(event, &document), Err(CopyError::MissingSource));
    }

    #[test]
    fn test_empty_text_counts_as_absent() {
        let (document, panel, _) = document();
        let payload = CopyPayload {
            text: Some(String::new()),
            to: Some("#panel".into()),
            el: None,
        };
        let request = CopyRequest::resolve(CopyEvent::from_payload(payload, None), &document).unwrap();
        assert_eq!(request.source, CopySource::Node(panel));
    }

    #[test]
    fn test_trigger_from_el_selector() {
        let (document, panel, button) = document();
        let event = CopyEvent::text("abc").with_target(panel).with_trigger("#button");
        let request = CopyRequest::resolve(event, &document).unwrap();
        assert_eq!(request.trigger, Some(button));
    }

    #[test]
    fn test_unmatched_el_leaves_trigger_unresolved() {
        let (document, panel, _) = document();
        let event = CopyEvent::text("abc").with_target(panel).with_trigger("#nope");
        let request = CopyRequest::resolve(event, &document).unwrap();
        assert_eq!(request.trigger, None);
    }

    #[test]
    fn test_payload_from_json() {
        let payload: CopyPayload = serde_json::from_str(r##"{"to": "#panel"}"##).unwrap();
        assert_eq!(payload.to.as_deref(), Some("#panel"));
        assert_eq!(payload.text, None);
    }
}
