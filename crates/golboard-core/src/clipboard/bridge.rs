//! Copy request handling.

use super::fallback::fallback_copy;
use super::request::{CopyEvent, CopyRequest};
use super::{CopyError, CopyOutcome, Document, PlatformClipboard, ScriptBridge};
use crate::config::CopyConfig;

/// Fulfils copy requests and reports the outcome through the script bridge.
///
/// Every call is independent: overlapping requests each get their own
/// scratch node and their own report.
pub struct ClipboardBridge<D, C, B> {
    document: D,
    clipboard: C,
    scripts: B,
    config: CopyConfig,
}

impl<D, C, B> ClipboardBridge<D, C, B>
where
    D: Document,
    C: PlatformClipboard,
    B: ScriptBridge<D::Node>,
{
    pub fn new(document: D, clipboard: C, scripts: B) -> Self {
        Self::with_config(document, clipboard, scripts, CopyConfig::default())
    }

    pub fn with_config(document: D, clipboard: C, scripts: B, config: CopyConfig) -> Self {
        Self {
            document,
            clipboard,
            scripts,
            config,
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn scripts(&self) -> &B {
        &self.scripts
    }

    /// Handle one copy event.
    ///
    /// Malformed requests are logged and returned as `Err` without touching
    /// the clipboard or running any script.
    pub async fn handle(&self, event: CopyEvent<D::Node>) -> Result<CopyOutcome, CopyError> {
        let request = CopyRequest::resolve(event, &self.document).inspect_err(|e| {
            log::error!("{}", e);
        })?;

        let text = request.text(&self.document);
        let outcome = self.write(&text).await;
        self.report(request.trigger.as_ref(), outcome);
        Ok(outcome)
    }

    /// Write `text` with the platform clipboard, falling back to the legacy
    /// copy command when it is missing or rejects the write.
    pub async fn write(&self, text: &str) -> CopyOutcome {
        if self.clipboard.is_available() {
            match self.clipboard.write_text(text).await {
                Ok(()) => return CopyOutcome::Success,
                Err(e) => log::error!("clipboard api error: {}", e),
            }
        } else {
            log::debug!("platform clipboard unavailable, using legacy copy");
        }
        fallback_copy(&self.document, text)
    }

    /// Run the script stored on `trigger` for `outcome`, if any.
    pub fn report(&self, trigger: Option<&D::Node>, outcome: CopyOutcome) {
        let Some(element) = trigger else {
            return;
        };
        let attribute = outcome.attribute(&self.config);
        match self.document.attribute(element, attribute) {
            Some(script) if !script.is_empty() => self.scripts.execute(element, &script),
            _ => {}
        }
    }
}
