//! Copying bookmark URLs to the system clipboard

use anyhow::{Context, Result, bail};
use arboard::Clipboard;

/// Maximum URL length accepted for copying (data: URLs can be large, but not this large)
const MAX_CLIPBOARD_URL_BYTES: usize = 2 * 1024 * 1024;

/// Clipboard access seam, mocked in tests
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_url(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        bail!("Bookmark has no URL to copy");
    }
    if url.len() > MAX_CLIPBOARD_URL_BYTES {
        bail!("URL too large for clipboard ({} bytes, max {})", url.len(), MAX_CLIPBOARD_URL_BYTES);
    }
    Ok(())
}

fn copy_with_provider(url: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_url(url)?;
    provider.set_text(url)
}

/// Copy a bookmark URL to the system clipboard
///
/// # Errors
///
/// Returns an error if the URL is empty or larger than 2MB, or if the system
/// clipboard is unavailable (headless session, access denied).
pub fn copy_url(url: &str) -> Result<()> {
    // Validate before touching the clipboard so headless runs get the real error
    validate_url(url)?;

    let mut clipboard = SystemClipboard::new()?;
    copy_with_provider(url, &mut clipboard)
}
