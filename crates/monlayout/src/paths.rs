// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};

/// `$XDG_<kind>_HOME/monlayout`, else `$HOME/<home_rel>/monlayout`, else
/// `<last_resort>/monlayout`.
fn app_dir(var: &str, home_rel: &str, last_resort: &str) -> PathBuf {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(home_rel)))
        .unwrap_or_else(|| PathBuf::from(last_resort))
        .join("monlayout")
}

pub fn default_log_path(file: &str) -> PathBuf {
    app_dir("XDG_STATE_HOME", ".local/state", "/tmp").join(file)
}

pub fn default_config_path() -> PathBuf {
    app_dir("XDG_CONFIG_HOME", ".config", ".").join("monlayout.rune")
}

pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
