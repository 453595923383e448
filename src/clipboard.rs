//! Cross-platform clipboard helper.
//!
//! [`ClipboardWriter`] is the seam the copy menus write through; the
//! production implementation is a thin wrapper around the `arboard` crate,
//! tests substitute a recording writer.

/// Destination for copied text.
pub trait ClipboardWriter {
    /// Place `text` on the clipboard. Returns `Err(String)` describing the
    /// failure; callers decide whether that is fatal.
    fn copy(&mut self, text: &str) -> Result<(), String>;
}

/// The system clipboard via `arboard`.
///
/// On some platforms or in headless CI environments clipboard initialization
/// may fail — callers should treat errors as non-fatal (the CLI prints a
/// warning on failure).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), String> {
        let mut ctx = arboard::Clipboard::new().map_err(|e| format!("clipboard init: {}", e))?;
        ctx.set_text(text.to_owned())
            .map_err(|e| format!("clipboard set: {}", e))
    }
}

/// Copy `s` to the system clipboard. Convenience for the one-shot CLI paths.
pub fn copy_to_clipboard(s: &str) -> Result<(), String> {
    SystemClipboard.copy(s)
}
