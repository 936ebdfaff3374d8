use std::borrow::Cow;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Maximum bookmarks file size: 64MB
pub const MAX_BOOKMARK_FILE_BYTES: u64 = 64 * 1024 * 1024;

/// Validates that a file's size is within [`MAX_BOOKMARK_FILE_BYTES`]
///
/// Takes an open file handle so the check and the subsequent read see the
/// same file.
///
/// # Errors
///
/// Returns an error if the file metadata cannot be read or the file is too large.
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_BOOKMARK_FILE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_BOOKMARK_FILE_BYTES
        );
    }

    Ok(())
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use bookmark_index::format_path_with_tilde;
///
/// let path = PathBuf::from("/home/alice/.config/chromium/Default/Bookmarks");
/// // Returns "~/.config/chromium/Default/Bookmarks" for alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    let home = dirs::home_dir();
    format_path_with_tilde_internal(path, home.as_deref())
}

pub(crate) fn format_path_with_tilde_internal(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home
        && !home.as_os_str().is_empty()
        && let Ok(rest) = path.strip_prefix(home)
    {
        return if rest.as_os_str().is_empty() {
            "~".to_string()
        } else {
            format!("~/{}", rest.display())
        };
    }

    match path.to_string_lossy() {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_validate_file_size_small_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();

        assert!(validate_file_size(file.as_file(), file.path()).is_ok());
    }

    #[test]
    fn test_validate_file_size_too_large() {
        let file = NamedTempFile::new().unwrap();
        // Sparse file: sets the length without writing 64MB
        file.as_file().set_len(MAX_BOOKMARK_FILE_BYTES + 1).unwrap();

        let err = validate_file_size(file.as_file(), file.path()).unwrap_err();
        assert!(err.to_string().contains("File too large"));
    }

    #[test]
    fn test_format_path_with_tilde() {
        let home = PathBuf::from("/home/testuser");

        let path = PathBuf::from("/home/testuser/.config/chromium/Default/Bookmarks");
        assert_eq!(
            format_path_with_tilde_internal(&path, Some(&home)),
            "~/.config/chromium/Default/Bookmarks"
        );

        // Path not under home
        let path2 = PathBuf::from("/opt/bookmarks.json");
        assert_eq!(format_path_with_tilde_internal(&path2, Some(&home)), "/opt/bookmarks.json");

        // Sibling directory sharing the prefix is not under home
        let path3 = PathBuf::from("/home/testuser2/Bookmarks");
        assert_eq!(
            format_path_with_tilde_internal(&path3, Some(&home)),
            "/home/testuser2/Bookmarks"
        );

        assert_eq!(format_path_with_tilde_internal(&home, Some(&home)), "~");
    }

    #[test]
    fn test_format_path_without_home() {
        let path = PathBuf::from("/some/random/path");
        assert_eq!(format_path_with_tilde_internal(&path, None), "/some/random/path");
    }
}
