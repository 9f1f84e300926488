//! Normalization of user-supplied executable paths.
//!
//! Three spellings are accepted for a program inside a carafe and all end up
//! relative to the carafe's `drive_c`:
//! - `Program Files/App/app.exe`
//! - `C:/Program Files/App/app.exe` (or `C:Program Files/...`)
//! - `/home/me/.carafe/games/drive_c/Program Files/App/app.exe`

use std::path::Path;

use crate::error::CarafeError;

/// Virtual drive prefix understood by the runtime
pub const DRIVE_PREFIX: &str = "C:";

/// Reduce `raw` to a path relative to `drive_root`, without touching the disk
pub fn normalize(raw: &str, drive_root: &Path) -> String {
    let mut location = raw.trim();

    if let Some(rest) = location.strip_prefix(DRIVE_PREFIX) {
        location = rest;
    }

    let drive_root = drive_root.to_string_lossy();
    if let Some(rest) = location.strip_prefix(drive_root.as_ref()) {
        location = rest;
    }

    if let Some(rest) = location.strip_prefix('/') {
        location = rest;
    }

    location.trim().to_string()
}

/// Normalize `raw` and require a regular file at `drive_root/<result>`
pub fn resolve(raw: &str, drive_root: &Path) -> Result<String, CarafeError> {
    let location = normalize(raw, drive_root);
    let absolute = drive_root.join(&location);
    if location.is_empty() || !absolute.is_file() {
        tracing::debug!(raw, resolved = ?absolute, "location is not a file");
        return Err(CarafeError::LocationNotFound(raw.trim().to_string()));
    }
    Ok(location)
}

/// Trim and strip one pair of matching surrounding quotes
///
/// Paths dragged into a terminal frequently arrive quoted.
pub fn unquote(raw: &str) -> String {
    let mut value = raw.trim();
    for quote in ['\'', '"'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            value = &value[1..value.len() - 1];
        }
    }
    value.trim().to_string()
}
