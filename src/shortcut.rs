use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs;
use std::path::{Path, PathBuf};

use crate::carafe::Carafe;
use crate::error::CarafeError;

/// First line of every shortcut, so it can be opened directly
const SHEBANG: &str = "#!/usr/bin/env xdg-open";

/// Flavour of generated `.desktop` file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShortcutKind {
    /// Re-invokes carafe, so later link changes are picked up
    #[value(alias = "carafe")]
    Tool,
    /// Calls the runtime directly with a fixed prefix and program
    #[value(alias = "wine")]
    Runtime,
}

impl ShortcutKind {
    pub fn description(self) -> &'static str {
        match self {
            ShortcutKind::Tool => "carafe shortcut (needs carafe, follows the link)",
            ShortcutKind::Runtime => "wine shortcut (static, calls wine directly)",
        }
    }
}

/// Program a shortcut points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutTarget {
    /// Whatever the carafe's link is when the shortcut runs
    Link,
    /// Path relative to `drive_c`
    Path(String),
}

/// A rendered `.desktop` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub name: String,
    pub exec: String,
    pub path: Option<PathBuf>,
}

impl Shortcut {
    /// Shortcut re-running `carafe_exe <name> start [-l "<path>"]`
    pub fn tool(carafe: &Carafe<'_>, carafe_exe: &Path, target: &ShortcutTarget) -> Self {
        let mut exec = format!("{} {} start", carafe_exe.display(), carafe.name());
        if let ShortcutTarget::Path(path) = target {
            exec.push_str(&format!(" -l \"{path}\""));
        }

        Self {
            name: carafe.name().to_string(),
            exec,
            path: None,
        }
    }

    /// Shortcut calling the runtime with explicit prefix variables
    pub fn runtime(carafe: &Carafe<'_>, target: &ShortcutTarget) -> Result<Self, CarafeError> {
        let location = match target {
            ShortcutTarget::Link => carafe
                .link()
                .ok_or_else(|| CarafeError::NoLink(carafe.name().to_string()))?,
            ShortcutTarget::Path(path) => path.as_str(),
        };

        let environment = carafe.launcher().environment().format_assignments();
        let exec = format!("env {environment} {} \"C:/{location}\"", carafe.wine());
        let path = carafe
            .drive()
            .join(location)
            .parent()
            .map(Path::to_path_buf);

        Ok(Self {
            name: carafe.name().to_string(),
            exec,
            path,
        })
    }

    pub fn render(&self) -> String {
        let mut contents = format!(
            "{SHEBANG}\n[Desktop Entry]\nName={}\nType=Application\nExec={}\n",
            self.name, self.exec
        );
        if let Some(path) = &self.path {
            contents.push_str(&format!("Path={}\n", path.display()));
        }
        contents
    }

    /// Write `<folder>/<file_stem>.desktop`, returning the written path
    pub fn write(&self, folder: &Path, file_stem: &str) -> Result<PathBuf> {
        if !folder.is_dir() {
            return Err(CarafeError::OutputFolderMissing(folder.to_path_buf()).into());
        }

        let file = folder.join(format!("{file_stem}.desktop"));
        fs::write(&file, self.render())
            .with_context(|| format!("Failed to write shortcut {:?}", file))?;
        make_executable(&file)?;
        Ok(file)
    }
}

#[cfg(unix)]
fn make_executable(file: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut permissions = fs::metadata(file)
        .with_context(|| format!("Failed to stat {:?}", file))?
        .permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    fs::set_permissions(file, permissions)
        .with_context(|| format!("Failed to mark {:?} executable", file))
}

#[cfg(not(unix))]
fn make_executable(_file: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cellar::Cellar;
    use crate::config::ConfigField;
    use tempfile::TempDir;

    fn cellar() -> (TempDir, Cellar) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("cellar");
        fs::create_dir_all(root.join("games/drive_c")).unwrap();
        let cellar = Cellar::at(&root).unwrap();
        (temp, cellar)
    }

    #[test]
    fn test_tool_shortcut_link() {
        let (_temp, cellar) = cellar();
        let carafe = cellar.carafe("games").unwrap();
        let shortcut = Shortcut::tool(&carafe, Path::new("/usr/bin/carafe"), &ShortcutTarget::Link);

        assert_eq!(
            shortcut.render(),
            "#!/usr/bin/env xdg-open\n[Desktop Entry]\nName=games\nType=Application\nExec=/usr/bin/carafe games start\n"
        );
    }

    #[test]
    fn test_tool_shortcut_path() {
        let (_temp, cellar) = cellar();
        let carafe = cellar.carafe("games").unwrap();
        let target = ShortcutTarget::Path("Game/game.exe".to_string());
        let shortcut = Shortcut::tool(&carafe, Path::new("/usr/bin/carafe"), &target);

        assert_eq!(
            shortcut.exec,
            "/usr/bin/carafe games start -l \"Game/game.exe\""
        );
        assert!(shortcut.path.is_none());
    }

    #[test]
    fn test_runtime_shortcut() {
        let (_temp, cellar) = cellar();
        cellar.store().write("games", ConfigField::Arch, "win32").unwrap();
        let carafe = cellar.carafe("games").unwrap();
        let target = ShortcutTarget::Path("Game/game.exe".to_string());

        let shortcut = Shortcut::runtime(&carafe, &target).unwrap();
        let prefix = cellar.root().join("games");

        assert_eq!(
            shortcut.exec,
            format!(
                "env WINEPREFIX=\"{}\" WINEARCH=\"win32\" {} \"C:/Game/game.exe\"",
                prefix.display(),
                carafe.wine()
            )
        );
        assert_eq!(shortcut.path, Some(prefix.join("drive_c/Game")));
        assert!(shortcut.render().ends_with(&format!(
            "Path={}\n",
            prefix.join("drive_c/Game").display()
        )));
    }

    #[test]
    fn test_runtime_shortcut_link_without_link() {
        let (_temp, cellar) = cellar();
        let carafe = cellar.carafe("games").unwrap();
        let err = Shortcut::runtime(&carafe, &ShortcutTarget::Link).unwrap_err();
        assert_eq!(err, CarafeError::NoLink("games".to_string()));
    }

    #[test]
    fn test_runtime_shortcut_uses_link() {
        let (_temp, cellar) = cellar();
        cellar.store().write("games", ConfigField::Link, "game.exe").unwrap();
        let carafe = cellar.carafe("games").unwrap();

        let shortcut = Shortcut::runtime(&carafe, &ShortcutTarget::Link).unwrap();
        assert!(shortcut.exec.ends_with("\"C:/game.exe\""));
        assert_eq!(shortcut.path, Some(cellar.root().join("games/drive_c")));
    }

    #[test]
    fn test_write_requires_folder() {
        let (temp, cellar) = cellar();
        let carafe = cellar.carafe("games").unwrap();
        let shortcut = Shortcut::tool(&carafe, Path::new("carafe"), &ShortcutTarget::Link);

        assert!(shortcut.write(&temp.path().join("nope"), "games").is_err());

        let file = shortcut.write(temp.path(), "My Game").unwrap();
        assert_eq!(file, temp.path().join("My Game.desktop"));
        assert!(fs::read_to_string(&file).unwrap().contains("Name=games"));
    }

    #[test]
    fn test_kind_aliases() {
        assert_eq!(ShortcutKind::from_str("tool", false), Ok(ShortcutKind::Tool));
        assert_eq!(ShortcutKind::from_str("carafe", false), Ok(ShortcutKind::Tool));
        assert_eq!(ShortcutKind::from_str("wine", false), Ok(ShortcutKind::Runtime));
        assert!(ShortcutKind::from_str("menu", false).is_err());
    }
}
