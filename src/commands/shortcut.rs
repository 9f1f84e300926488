use crate::select::{Choice, LINK_KEYWORD};
use crate::shortcut::{Shortcut, ShortcutKind, ShortcutTarget};
use crate::util::paths;
use crate::{prompt, ui, Carafe};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn execute(
    carafe: &Carafe<'_>,
    location: Option<String>,
    output_folder: Option<PathBuf>,
    name: Option<String>,
    kind: Option<ShortcutKind>,
) -> Result<()> {
    carafe.ensure_exists()?;

    let output_folder = match output_folder {
        Some(folder) => expand(folder),
        None => paths::desktop_dir()?,
    };
    if !output_folder.is_dir() {
        return Err(crate::CarafeError::OutputFolderMissing(output_folder).into());
    }

    let target = match location.as_deref() {
        Some(LINK_KEYWORD) => ShortcutTarget::Link,
        Some(raw) => ShortcutTarget::Path(carafe.resolve_location(raw)?),
        None => {
            let executables = carafe.executables()?;
            match prompt::executable(carafe.name(), &executables, carafe.link())? {
                Choice::Index(index) => ShortcutTarget::Path(executables[index].clone()),
                Choice::Link => ShortcutTarget::Link,
            }
        }
    };

    let kind = match kind {
        Some(kind) => kind,
        None => {
            ui::info("carafe can make two types of shortcut\nOne type needs carafe, but it can auto-update the link\nThe other type is a pure wine shortcut, but is static");
            prompt::shortcut_kind()?
        }
    };

    let shortcut = match kind {
        ShortcutKind::Tool => {
            let carafe_exe =
                std::env::current_exe().context("Failed to locate the carafe executable")?;
            Shortcut::tool(carafe, &carafe_exe, &target)
        }
        ShortcutKind::Runtime => Shortcut::runtime(carafe, &target)?,
    };

    let file_stem = name.unwrap_or_else(|| carafe.name().to_string());
    let file = shortcut.write(&output_folder, &file_stem)?;
    ui::success("Created", format!("shortcut {}", file.display()));
    Ok(())
}

/// Expand `~` and variables in a folder given on the command line
fn expand(folder: PathBuf) -> PathBuf {
    let raw = folder.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => folder.clone(),
    }
}
