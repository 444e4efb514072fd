//! Manual copy through a scratch node and the legacy copy command.

use super::{CopyOutcome, Document};

/// Scratch node removed from the document when dropped.
struct ScratchNode<'a, D: Document> {
    document: &'a D,
    node: D::Node,
}

impl<D: Document> Drop for ScratchNode<'_, D> {
    fn drop(&mut self) {
        self.document.remove_node(&self.node);
    }
}

/// Copy `text` by selecting it in a temporary node and running the legacy
/// copy command.
///
/// The scratch node is detached on every exit path, including a panic in
/// the copy command.
pub fn fallback_copy<D: Document>(document: &D, text: &str) -> CopyOutcome {
    let scratch = match document.insert_scratch(text) {
        Ok(node) => ScratchNode { document, node },
        Err(e) => {
            log::error!("legacy copy error: {}", e);
            return CopyOutcome::Failure;
        }
    };

    document.select_contents(&scratch.node);
    match document.exec_copy() {
        Ok(true) => CopyOutcome::Success,
        Ok(false) => {
            log::warn!("legacy copy command reported failure");
            CopyOutcome::Failure
        }
        Err(e) => {
            log::error!("legacy copy error: {}", e);
            CopyOutcome::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{ClipboardError, MemoryDocument};

    #[test]
    fn test_success_cleans_up() {
        let document = MemoryDocument::new();
        assert_eq!(fallback_copy(&document, "abc"), CopyOutcome::Success);
        assert_eq!(document.copied(), vec!["abc".to_string()]);
        assert_eq!(document.scratch_count(), 0);
    }

    #[test]
    fn test_command_false_cleans_up() {
        let document = MemoryDocument::new();
        document.set_exec_result(Ok(false));
        assert_eq!(fallback_copy(&document, "abc"), CopyOutcome::Failure);
        assert!(document.copied().is_empty());
        assert_eq!(document.scratch_count(), 0);
    }

    #[test]
    fn test_command_error_cleans_up() {
        let document = MemoryDocument::new();
        document.set_exec_result(Err(ClipboardError::Command("denied".into())));
        assert_eq!(fallback_copy(&document, "abc"), CopyOutcome::Failure);
        assert_eq!(document.scratch_count(), 0);
    }

    #[test]
    fn test_panicking_command_cleans_up() {
        let document = MemoryDocument::new();
        document.set_exec_panics(true);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            fallback_copy(&document, "abc")
        }));
        assert!(result.is_err());
        assert_eq!(document.scratch_count(), 0);
    }

    #[test]
    fn test_scratch_failure() {
        let document = MemoryDocument::new();
        document.set_scratch_fails(true);
        assert_eq!(fallback_copy(&document, "abc"), CopyOutcome::Failure);
        assert_eq!(document.scratch_count(), 0);
    }
}
