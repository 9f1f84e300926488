use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Directory name of the cellar below the home directory
const CELLAR_DIR: &str = ".carafe";

/// Get the cellar directory holding every carafe and `config.json`
///
/// Returns `$CARAFE_HOME` or `~/.carafe` if not set
pub fn cellar_dir() -> Result<PathBuf> {
    if let Some(custom) = env::var_os("CARAFE_HOME").filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(custom));
    }

    Ok(home_dir()?.join(CELLAR_DIR))
}

/// Get the home directory
pub fn home_dir() -> Result<PathBuf> {
    directories::BaseDirs::new()
        .context("Failed to get home directory")
        .map(|bd| bd.home_dir().to_path_buf())
}

/// Get the user's desktop directory
///
/// Uses the XDG user dirs when available, falling back to `~/Desktop`
pub fn desktop_dir() -> Result<PathBuf> {
    if let Some(desktop) = directories::UserDirs::new()
        .as_ref()
        .and_then(|dirs| dirs.desktop_dir())
    {
        return Ok(desktop.to_path_buf());
    }

    Ok(home_dir()?.join("Desktop"))
}
