//! Small helpers shared by fetching and output.

use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary) and
/// get `"…(+N bytes)"` appended.
///
/// # Arguments
///
/// * `s` - The string to truncate
/// * `max` - Maximum number of bytes kept from `s`
///
/// # Returns
///
/// `s` unchanged if it fits, otherwise its prefix followed by the count of
/// dropped bytes.
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Ensure the directory holding `file` exists and is writable.
///
/// Creates missing directories, then writes and removes a probe file. A bare
/// file name is checked against the current directory.
///
/// # Arguments
///
/// * `file` - Path of the file about to be written
///
/// # Returns
///
/// `Ok(())` if the parent directory exists and is writable.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The probe file cannot be written (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %file))]
pub async fn ensure_writable_parent(file: &str) -> Result<(), Box<dyn Error>> {
    let dir = match Path::new(file).parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    fs::create_dir_all(&dir).await?;
    let probe = dir.join("..__probe_write__");
    fs::write(&probe, b"").await?;
    let _ = fs::remove_file(&probe).await;
    info!(dir = %dir.display(), "Output directory is writable");
    Ok(())
}
