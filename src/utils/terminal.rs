//! Terminal output sanitization
//!
//! Bookmark titles and URLs come from a file any browser extension can write to. The CLI runs
//! them through [`strip_ansi_codes`] before printing so that escape sequences embedded in a
//! title cannot move the cursor, recolor the terminal or ring the bell.

/// Strips ANSI CSI escape sequences and control characters from a string
///
/// Tabs, newlines and carriage returns are kept.
///
/// # Examples
///
/// ```
/// use bookmark_index::utils::strip_ansi_codes;
///
/// let title = "\x1b[31mRed title\x1b[0m";
/// assert_eq!(strip_ansi_codes(title), "Red title");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        // CSI sequence: ESC [ params final-letter
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for next_ch in chars.by_ref() {
                if next_ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_color_codes() {
        assert_eq!(strip_ansi_codes("\x1b[1m\x1b[31mBold Red\x1b[0m title"), "Bold Red title");
    }

    #[test]
    fn test_strip_cursor_movement() {
        assert_eq!(strip_ansi_codes("\x1b[2J\x1b[H Cleared"), " Cleared");
    }

    #[test]
    fn test_strip_bell_and_backspace() {
        assert_eq!(strip_ansi_codes("Alert!\x07\x08"), "Alert!");
    }

    #[test]
    fn test_plain_and_unicode_text_untouched() {
        assert_eq!(strip_ansi_codes("Rust 🦀 Programming Language"), "Rust 🦀 Programming Language");
        assert_eq!(strip_ansi_codes("a\tb\nc\rd"), "a\tb\nc\rd");
        assert_eq!(strip_ansi_codes(""), "");
    }

    #[test]
    fn test_unterminated_sequence_is_dropped() {
        assert_eq!(strip_ansi_codes("title\x1b[31"), "title");
    }
}
