use std::env;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Largest corpus or config file we will read: 10MB
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Reject files above [`MAX_FILE_SIZE_BYTES`].
///
/// Takes the already opened file so the size check and the read see the same
/// inode.
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_FILE_SIZE_BYTES
        );
    }

    Ok(())
}

/// Formats a path with ~ substitution for the home directory
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy().into_owned();
    if let Some(home) = home
        && !home.is_empty()
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }
    path_str
}
