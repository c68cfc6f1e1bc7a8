//! Clipboard access with duplicate-write suppression.

use std::sync::Arc;

use droidctl_services::ClipboardService;
use tracing::debug;

/// Reads and writes the shared OS clipboard.
///
/// Pasting from a client sets the device clipboard, which the client may
/// then receive back and set again. Writing identical content would notify
/// clipboard listeners twice, so identical writes are skipped.
pub struct ClipboardMediator {
    clipboard: Option<Arc<dyn ClipboardService>>,
}

impl ClipboardMediator {
    pub fn new(clipboard: Option<Arc<dyn ClipboardService>>) -> Self {
        Self { clipboard }
    }

    /// Current clipboard text.
    ///
    /// `None` if there is no clipboard service or the clipboard is empty.
    pub fn get_text(&self) -> Option<String> {
        self.clipboard
            .as_ref()?
            .text()
            .filter(|text| !text.is_empty())
    }

    /// Replace the clipboard text.
    ///
    /// Returns `false` without writing if the clipboard already holds
    /// exactly `text`, or if there is no clipboard service.
    pub fn set_text(&self, text: &str) -> bool {
        let Some(clipboard) = &self.clipboard else {
            return false;
        };

        if clipboard.text().as_deref() == Some(text) {
            debug!("clipboard already holds the requested text");
            return false;
        }

        let written = clipboard.set_text(text);
        debug!(len = text.len(), written, "clipboard write");
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droidctl_services::mock::MockClipboard;

    fn mediator(clipboard: &MockClipboard) -> ClipboardMediator {
        ClipboardMediator::new(Some(Arc::new(clipboard.clone())))
    }

    #[test]
    fn no_service_means_no_text() {
        let mediator = ClipboardMediator::new(None);
        assert_eq!(mediator.get_text(), None);
        assert!(!mediator.set_text("hello"));
    }

    #[test]
    fn empty_clipboard_reads_as_none() {
        let clipboard = MockClipboard::with_text("");
        assert_eq!(mediator(&clipboard).get_text(), None);
        assert_eq!(mediator(&MockClipboard::new()).get_text(), None);
    }

    #[test]
    fn repeated_write_is_suppressed() {
        let clipboard = MockClipboard::new();
        let mediator = mediator(&clipboard);

        assert!(mediator.set_text("copied"));
        assert!(!mediator.set_text("copied"));
        assert_eq!(clipboard.writes(), vec!["copied".to_string()]);
        assert_eq!(mediator.get_text().as_deref(), Some("copied"));
    }

    #[test]
    fn comparison_is_exact() {
        let clipboard = MockClipboard::with_text("Copied");
        let mediator = mediator(&clipboard);
        assert!(mediator.set_text("copied"));
        assert!(mediator.set_text("copied "));
        assert_eq!(clipboard.writes().len(), 2);
    }

    #[test]
    fn write_result_is_returned() {
        let clipboard = MockClipboard::new();
        clipboard.reject_writes(true);
        assert!(!mediator(&clipboard).set_text("x"));
        assert_eq!(clipboard.writes().len(), 1);
        assert_eq!(clipboard.content(), None);
    }
}
