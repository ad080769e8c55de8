use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Overrides the data directory (recent searches live here)
pub const DATA_DIR_ENV: &str = "DASHBOARD_SEARCH_DATA_DIR";

const APP_DIR_NAME: &str = "dashboard-search";

/// Directory for persistent state: `$DASHBOARD_SEARCH_DATA_DIR`, else the
/// platform data dir (`~/.local/share/dashboard-search` on Linux)
pub fn get_data_dir() -> Result<PathBuf> {
    resolve_data_dir(env::var_os(DATA_DIR_ENV).map(PathBuf::from))
}

fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir
        && !dir.as_os_str().is_empty()
    {
        return Ok(dir);
    }
    let base = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/dash"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/dash"));
    }

    #[test]
    fn test_empty_override_ignored() {
        // Falls through to the platform dir, which may be missing in CI sandboxes
        if let Ok(dir) = resolve_data_dir(Some(PathBuf::new())) {
            assert!(dir.ends_with(APP_DIR_NAME));
        }
    }
}
