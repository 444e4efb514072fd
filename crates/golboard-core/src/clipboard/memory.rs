//! In-memory document, clipboard and script bridge.
//!
//! Used by the tests and by headless tooling that has no browser.

use super::{
    BoxFuture, ClipboardError, ClipboardResult, Document, NodeText, PlatformClipboard,
    ScriptBridge,
};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

/// Handle to a node of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A node with its text sources and attributes.
#[derive(Debug, Clone, Default)]
pub struct MemoryNode {
    pub text: NodeText,
    pub attributes: HashMap<String, String>,
}

impl MemoryNode {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: NodeText {
                rendered: Some(text.into()),
                ..NodeText::default()
            },
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// Document backed by a node arena and a selector table.
pub struct MemoryDocument {
    nodes: RefCell<Vec<MemoryNode>>,
    selectors: RefCell<HashMap<String, NodeId>>,
    /// Scratch nodes currently attached.
    scratch: RefCell<HashSet<NodeId>>,
    selected: Cell<Option<NodeId>>,
    copied: RefCell<Vec<String>>,
    exec_result: RefCell<ClipboardResult<bool>>,
    exec_panics: Cell<bool>,
    scratch_fails: Cell<bool>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self {
            nodes: RefCell::new(Vec::new()),
            selectors: RefCell::new(HashMap::new()),
            scratch: RefCell::new(HashSet::new()),
            selected: Cell::new(None),
            copied: RefCell::new(Vec::new()),
            exec_result: RefCell::new(Ok(true)),
            exec_panics: Cell::new(false),
            scratch_fails: Cell::new(false),
        }
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node reachable through `selector`.
    pub fn insert(&self, selector: impl Into<String>, node: MemoryNode) -> NodeId {
        let id = self.push(node);
        self.selectors.borrow_mut().insert(selector.into(), id);
        id
    }

    /// Add a node that no selector matches.
    pub fn insert_detached(&self, node: MemoryNode) -> NodeId {
        self.push(node)
    }

    fn push(&self, node: MemoryNode) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(node);
        NodeId(nodes.len() - 1)
    }

    pub fn set_attribute(&self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(id.0) {
            node.attributes.insert(name.into(), value.into());
        }
    }

    /// Result the legacy copy command reports from now on.
    pub fn set_exec_result(&self, result: ClipboardResult<bool>) {
        *self.exec_result.borrow_mut() = result;
    }

    pub fn set_exec_panics(&self, panics: bool) {
        self.exec_panics.set(panics);
    }

    pub fn set_scratch_fails(&self, fails: bool) {
        self.scratch_fails.set(fails);
    }

    /// Number of scratch nodes still attached.
    pub fn scratch_count(&self) -> usize {
        self.scratch.borrow().len()
    }

    /// Texts placed on the clipboard by the legacy copy command.
    pub fn copied(&self) -> Vec<String> {
        self.copied.borrow().clone()
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.selectors.borrow().get(selector).copied()
    }

    fn node_text(&self, node: &NodeId) -> NodeText {
        self.nodes
            .borrow()
            .get(node.0)
            .map(|node| node.text.clone())
            .unwrap_or_default()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow().get(node.0)?.attributes.get(name).cloned()
    }

    fn insert_scratch(&self, text: &str) -> ClipboardResult<NodeId> {
        if self.scratch_fails.get() {
            return Err(ClipboardError::Scratch("document has no body".to_string()));
        }
        let id = self.push(MemoryNode {
            text: NodeText {
                value: Some(text.to_string()),
                ..NodeText::default()
            },
            attributes: HashMap::from([("readonly".to_string(), String::new())]),
        });
        self.scratch.borrow_mut().insert(id);
        Ok(id)
    }

    fn select_contents(&self, node: &NodeId) {
        self.selected.set(Some(*node));
    }

    fn exec_copy(&self) -> ClipboardResult<bool> {
        if self.exec_panics.get() {
            panic!("copy command panicked");
        }
        let result = self.exec_result.borrow().clone();
        if let (Ok(true), Some(selected)) = (&result, self.selected.get()) {
            let text = self.node_text(&selected).resolve();
            self.copied.borrow_mut().push(text);
        }
        result
    }

    fn remove_node(&self, node: &NodeId) {
        self.scratch.borrow_mut().remove(node);
        if self.selected.get() == Some(*node) {
            self.selected.set(None);
        }
    }
}

/// Platform clipboard double recording every accepted write.
pub struct MemoryClipboard {
    available: Cell<bool>,
    rejection: RefCell<Option<String>>,
    attempts: Cell<usize>,
    written: RefCell<Vec<String>>,
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self {
            available: Cell::new(true),
            rejection: RefCell::new(None),
            attempts: Cell::new(0),
            written: RefCell::new(Vec::new()),
        }
    }
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard the platform does not expose.
    pub fn unavailable() -> Self {
        let clipboard = Self::default();
        clipboard.available.set(false);
        clipboard
    }

    /// A clipboard that rejects every write with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        let clipboard = Self::default();
        *clipboard.rejection.borrow_mut() = Some(reason.into());
        clipboard
    }

    /// Number of writes attempted, accepted or not.
    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }

    pub fn written(&self) -> Vec<String> {
        self.written.borrow().clone()
    }
}

impl PlatformClipboard for MemoryClipboard {
    fn is_available(&self) -> bool {
        self.available.get()
    }

    fn write_text(&self, text: &str) -> BoxFuture<'_, ClipboardResult<()>> {
        let text = text.to_string();
        Box::pin(async move {
            if !self.available.get() {
                return Err(ClipboardError::Unavailable);
            }
            self.attempts.set(self.attempts.get() + 1);
            if let Some(reason) = self.rejection.borrow().clone() {
                return Err(ClipboardError::Rejected(reason));
            }
            self.written.borrow_mut().push(text);
            Ok(())
        })
    }
}

/// Script bridge that records what it was asked to run.
pub struct RecordingBridge<N> {
    executed: RefCell<Vec<(N, String)>>,
}

impl<N> Default for RecordingBridge<N> {
    fn default() -> Self {
        Self {
            executed: RefCell::new(Vec::new()),
        }
    }
}

impl<N: Clone> RecordingBridge<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executed(&self) -> Vec<(N, String)> {
        self.executed.borrow().clone()
    }
}

impl<N: Clone> ScriptBridge<N> for RecordingBridge<N> {
    fn execute(&self, element: &N, script: &str) {
        self.executed
            .borrow_mut()
            .push((element.clone(), script.to_string()));
    }
}
