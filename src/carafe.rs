use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::cellar::Cellar;
use crate::config::{ConfigField, CONFIG_FILE_NAME};
use crate::error::CarafeError;
use crate::launcher::{Launcher, OutputMode, PrefixEnvironment, Tool};
use crate::location;
use crate::settings::{DEFAULT_WINE, DEFAULT_WINETRICKS};

/// Names that collide with the config file or the global settings
pub const RESERVED_NAMES: &[&str] = &[CONFIG_FILE_NAME, DEFAULT_WINE, DEFAULT_WINETRICKS];

/// Names additionally refused as copy/rename targets
const RESERVED_TARGETS: &[&str] = &["-h", "--help", "list"];

/// Virtual `C:` root inside a carafe
pub const DRIVE_DIR: &str = "drive_c";

/// Windows system directory, skipped during executable discovery
const SYSTEM_DIR: &str = "windows";

/// Output of the last logged run
pub const LOG_FILE: &str = "log";

/// Make a user-supplied name safe to use as a directory name
pub fn normalize_name(name: &str) -> String {
    name.replace(' ', "").replace('/', "-")
}

fn validate_name(name: &str) -> Result<(), CarafeError> {
    if name.is_empty() {
        return Err(CarafeError::EmptyName(name.to_string()));
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(CarafeError::ReservedName(name.to_string()));
    }
    Ok(())
}

/// Everything `info` reports about a carafe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarafeInfo {
    pub arch: Option<String>,
    pub link: Option<String>,
    pub executables: Vec<String>,
}

/// A single carafe, viewed through the cellar's config
#[derive(Debug)]
pub struct Carafe<'a> {
    cellar: &'a Cellar,
    name: String,
    prefix: PathBuf,
    arch: Option<String>,
    link: Option<String>,
    wine: String,
}

impl<'a> Carafe<'a> {
    pub(crate) fn open(cellar: &'a Cellar, name: &str) -> Result<Self> {
        validate_name(name)?;

        let record = cellar.document()?.record(name).cloned().unwrap_or_default();
        let wine = record
            .wine
            .clone()
            .unwrap_or_else(|| cellar.settings().wine.clone());

        Ok(Self {
            cellar,
            name: name.to_string(),
            prefix: cellar.root().join(name),
            arch: record.arch,
            link: record.link,
            wine,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn drive(&self) -> PathBuf {
        self.prefix.join(DRIVE_DIR)
    }

    pub fn log_file(&self) -> PathBuf {
        self.prefix.join(LOG_FILE)
    }

    pub fn arch(&self) -> Option<&str> {
        self.arch.as_deref()
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Runtime executable used for this carafe
    pub fn wine(&self) -> &str {
        &self.wine
    }

    pub fn exists(&self) -> bool {
        self.prefix.is_dir()
    }

    /// Fail with [`CarafeError::NotFound`] unless the carafe directory exists
    pub fn ensure_exists(&self) -> Result<(), CarafeError> {
        if self.exists() {
            Ok(())
        } else {
            Err(CarafeError::NotFound(self.name.clone()))
        }
    }

    pub fn launcher(&self) -> Launcher<'a> {
        Launcher::new(
            self.cellar.settings(),
            PrefixEnvironment::new(&self.prefix, self.arch.clone()),
            self.log_file(),
        )
    }

    pub fn runtime(&self) -> Tool<'_> {
        Tool {
            name: DEFAULT_WINE,
            location: &self.wine,
        }
    }

    pub fn winetricks(&self) -> Tool<'a> {
        Tool {
            name: DEFAULT_WINETRICKS,
            location: &self.cellar.settings().winetricks,
        }
    }

    /// Create the prefix directory and let the runtime initialize it
    pub fn create(&mut self, arch: Option<&str>) -> Result<()> {
        if self.exists() {
            return Err(CarafeError::AlreadyExists(self.name.clone()).into());
        }

        // Nothing is written until the runtime is known to exist
        let runtime = self.runtime();
        self.cellar
            .settings()
            .require_tool(runtime.name, runtime.location)?;

        fs::create_dir_all(&self.prefix)
            .with_context(|| format!("Failed to create carafe directory {:?}", self.prefix))?;

        let store = self.cellar.store();
        store.remove_entry(&self.name)?;
        self.arch = arch.map(str::to_string);
        self.link = None;
        if let Some(arch) = arch {
            store.write(&self.name, ConfigField::Arch, arch)?;
        }

        self.launcher()
            .run(self.runtime(), &["wineboot", "--init"], None, OutputMode::Log)
    }

    /// Run an installer from the host filesystem inside the carafe
    pub fn install(&self, executable: &str) -> Result<()> {
        self.ensure_exists()?;

        let executable = location::unquote(executable);
        if !Path::new(&executable).is_file() {
            return Err(CarafeError::ExecutableNotFound(executable).into());
        }

        let launcher = self.launcher();
        if executable.to_lowercase().ends_with(".msi") {
            launcher.run(
                self.runtime(),
                &["msiexec", "/i", executable.as_str()],
                None,
                OutputMode::Log,
            )
        } else {
            launcher.run(self.runtime(), &[executable.as_str()], None, OutputMode::Log)
        }
    }

    /// Start a program, `target` being relative to `drive_c`
    pub fn start(&self, target: &str, args: &[String], keep_log: bool) -> Result<()> {
        self.ensure_exists()?;

        let path = self.drive().join(target);
        let mode = if keep_log {
            OutputMode::Log
        } else {
            OutputMode::Discard
        };

        let mut command_args = vec![path.clone().into_os_string()];
        command_args.extend(args.iter().map(Into::into));

        self.launcher()
            .run(self.runtime(), command_args.as_slice(), path.parent(), mode)
    }

    /// Duplicate the carafe under `new_name`, returning the normalized name
    pub fn copy(&self, new_name: &str) -> Result<String> {
        self.ensure_exists()?;

        let new_name = normalize_name(new_name);
        validate_name(&new_name)?;
        if RESERVED_TARGETS.contains(&new_name.as_str()) {
            return Err(CarafeError::ReservedName(new_name).into());
        }

        let new_prefix = self.cellar.root().join(&new_name);
        if new_prefix.is_dir() {
            return Err(CarafeError::AlreadyExists(new_name).into());
        }

        copy_tree(&self.prefix, &new_prefix)?;

        let store = self.cellar.store();
        if let Some(arch) = &self.arch {
            store.write(&new_name, ConfigField::Arch, arch)?;
        }
        if let Some(link) = &self.link {
            store.write(&new_name, ConfigField::Link, link)?;
        }

        let copied_log = new_prefix.join(LOG_FILE);
        if let Err(err) = fs::remove_file(&copied_log) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(file = ?copied_log, %err, "could not remove copied log");
            }
        }

        Ok(new_name)
    }

    /// Copy to `new_name`, then remove this carafe
    ///
    /// Not atomic: an interruption between both steps leaves two carafes.
    pub fn rename(&self, new_name: &str) -> Result<String> {
        let new_name = self.copy(new_name)?;
        self.remove()?;
        Ok(new_name)
    }

    /// Delete the carafe, and the cellar itself when it ends up empty
    pub fn remove(&self) -> Result<()> {
        self.cellar.store().remove_entry(&self.name)?;
        self.ensure_exists()?;

        fs::remove_dir_all(&self.prefix)
            .with_context(|| format!("Failed to remove carafe directory {:?}", self.prefix))?;

        self.cellar.prune()
    }

    pub fn info(&self) -> Result<CarafeInfo> {
        self.ensure_exists()?;
        Ok(CarafeInfo {
            arch: self.arch.clone(),
            link: self.link.clone(),
            executables: self.executables()?,
        })
    }

    /// Store `target` (relative to `drive_c`) as the default program
    pub fn set_link(&mut self, target: &str) -> Result<()> {
        self.ensure_exists()?;
        self.cellar
            .store()
            .write(&self.name, ConfigField::Link, target)?;
        self.link = Some(target.to_string());
        Ok(())
    }

    /// Sanitize a user location against this carafe's drive
    pub fn resolve_location(&self, raw: &str) -> Result<String, CarafeError> {
        location::resolve(raw, &self.drive())
    }

    /// Contents of the last run's log, if any
    pub fn read_log(&self) -> Result<Option<String>> {
        self.ensure_exists()?;
        let log_file = self.log_file();
        if !log_file.is_file() {
            return Ok(None);
        }
        let bytes =
            fs::read(&log_file).with_context(|| format!("Failed to read log {:?}", log_file))?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// All `.exe` files below `drive_c` outside the Windows directory
    ///
    /// Hidden files and directories are skipped.
    /// Paths are relative to `drive_c`, `/`-separated and sorted.
    pub fn executables(&self) -> Result<Vec<String>> {
        let drive = self.drive();
        if !drive.is_dir() {
            return Ok(Vec::new());
        }

        let system = drive.join(SYSTEM_DIR);
        let mut executables = Vec::new();
        let walker = WalkDir::new(&drive)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| entry.path() != system.as_path() && !is_hidden(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(%err, "skipping unreadable entry");
                    continue;
                }
            };
            let is_exe = entry.file_name().to_string_lossy().ends_with(".exe");
            if !is_exe || !entry.path().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&drive) {
                let parts: Vec<_> = relative
                    .components()
                    .map(|part| part.as_os_str().to_string_lossy().into_owned())
                    .collect();
                executables.push(parts.join("/"));
            }
        }

        executables.sort();
        Ok(executables)
    }
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Recursively copy `from` into a new directory `to`, recreating symlinks as symlinks
fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from) {
        let entry = entry.with_context(|| format!("Failed to walk {:?}", from))?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .with_context(|| format!("Unexpected path {:?}", entry.path()))?;
        let target = to.join(relative);
        let file_type = entry.file_type();

        if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else if file_type.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory {:?}", target))?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!("Failed to copy {:?} -> {:?}", entry.path(), target)
            })?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(source: &Path, target: &Path) -> Result<()> {
    let link = fs::read_link(source)
        .with_context(|| format!("Failed to read symlink {:?}", source))?;
    std::os::unix::fs::symlink(&link, target)
        .with_context(|| format!("Failed to create symlink {:?}", target))
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, target: &Path) -> Result<()> {
    if source.is_dir() {
        return Ok(());
    }
    fs::copy(source, target)
        .map(|_| ())
        .with_context(|| format!("Failed to copy {:?} -> {:?}", source, target))
}
