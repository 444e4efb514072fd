//! Clipboard copy bridge.
//!
//! Copy requests arrive as window events whose payload names either literal
//! text or a node to copy from. The bridge resolves the text, writes it with
//! the platform clipboard (falling back to a scratch node and the legacy
//! copy command), then runs the success/error script stored on the
//! triggering element.

mod bridge;
mod fallback;
mod memory;
mod request;

pub use bridge::ClipboardBridge;
pub use fallback::fallback_copy;
pub use memory::{MemoryClipboard, MemoryDocument, MemoryNode, NodeId, RecordingBridge};
pub use request::{CopyEvent, CopyPayload, CopyRequest, CopySource, CopyTarget};

use crate::config::CopyConfig;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Copy requests that violate the caller contract.
///
/// These abort the request before any clipboard write and never trigger a
/// declarative script.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CopyError {
    #[error("invalid copy request: expected payload.text or payload.to")]
    MissingSource,
    #[error("copy target not found: {0}")]
    TargetNotFound(String),
}

/// Failures of a copy mechanism.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard unavailable")]
    Unavailable,
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
    #[error("copy command failed: {0}")]
    Command(String),
    #[error("scratch node error: {0}")]
    Scratch(String),
}

/// Result type for clipboard mechanisms.
pub type ClipboardResult<T> = Result<T, ClipboardError>;

/// Boxed future for async operations (single-threaded, not `Send`).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Final result of a copy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Success,
    Failure,
}

impl CopyOutcome {
    /// Attribute on the triggering element holding the script for this outcome.
    pub fn attribute<'a>(&self, config: &'a CopyConfig) -> &'a str {
        match self {
            Self::Success => &config.success_attribute,
            Self::Failure => &config.error_attribute,
        }
    }
}

/// Text a node can provide, in the order it is preferred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeText {
    /// Rendered text (`innerText`).
    pub rendered: Option<String>,
    /// Raw markup (`innerHTML`).
    pub markup: Option<String>,
    /// Form value (`value`).
    pub value: Option<String>,
}

impl NodeText {
    /// First non-empty source, or the empty string.
    pub fn resolve(self) -> String {
        [self.rendered, self.markup, self.value]
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty())
            .unwrap_or_default()
    }
}

/// The document copy requests are resolved against.
pub trait Document {
    type Node: Clone;

    /// First node matching `selector`; `None` also for invalid selectors.
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;

    fn node_text(&self, node: &Self::Node) -> NodeText;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Attach an off-screen, invisible, non-interactive editable node holding `text`.
    fn insert_scratch(&self, text: &str) -> ClipboardResult<Self::Node>;

    /// Focus `node` and select all of its content.
    fn select_contents(&self, node: &Self::Node);

    /// Run the legacy copy command on the current selection.
    fn exec_copy(&self) -> ClipboardResult<bool>;

    fn remove_node(&self, node: &Self::Node);
}

/// The asynchronous platform clipboard.
pub trait PlatformClipboard {
    fn is_available(&self) -> bool;

    fn write_text(&self, text: &str) -> BoxFuture<'_, ClipboardResult<()>>;
}

/// Executes declarative script references against an element.
pub trait ScriptBridge<N> {
    fn execute(&self, element: &N, script: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_text_priority() {
        let text = NodeText {
            rendered: Some("hello".into()),
            markup: Some("<b>hello</b>".into()),
            value: None,
        };
        assert_eq!(text.resolve(), "hello");
    }

    #[test]
    fn test_node_text_skips_empty() {
        let text = NodeText {
            rendered: Some(String::new()),
            markup: Some(String::new()),
            value: Some("typed".into()),
        };
        assert_eq!(text.resolve(), "typed");
        assert_eq!(NodeText::default().resolve(), "");
    }

    #[test]
    fn test_outcome_attribute() {
        let config = CopyConfig::default();
        assert_eq!(CopyOutcome::Success.attribute(&config), "data-copy-success");
        assert_eq!(CopyOutcome::Failure.attribute(&config), "data-copy-error");
    }
}
