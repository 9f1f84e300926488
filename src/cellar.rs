use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::carafe::Carafe;
use crate::config::{ConfigDocument, ConfigStore};
use crate::settings::Settings;
use crate::util::paths;

/// Cellar - the directory holding every carafe
///
/// Built once per invocation; owns the config store and the settings resolved
/// from it.
#[derive(Debug)]
pub struct Cellar {
    root: PathBuf,
    store: ConfigStore,
    settings: Settings,
}

impl Cellar {
    /// Create a Cellar at the default location
    pub fn new() -> Result<Self> {
        Self::at(paths::cellar_dir()?)
    }

    /// Create a Cellar rooted at `root`
    pub fn at(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let store = ConfigStore::new(&root);
        let document = store.read()?;
        let settings = Settings::from_document(&document, store.path());
        tracing::debug!(?root, wine = %settings.wine, "cellar opened");

        Ok(Self {
            root,
            store,
            settings,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn document(&self) -> Result<ConfigDocument> {
        self.store.read()
    }

    /// Names of all carafes, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read carafe directory {:?}", self.root))?
        {
            let entry = entry?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        names.sort();
        Ok(names)
    }

    /// Open the carafe called `name`, validating the name
    pub fn carafe(&self, name: &str) -> Result<Carafe<'_>> {
        Carafe::open(self, name)
    }

    /// Remove the cellar root when nothing is left inside it
    pub(crate) fn prune(&self) -> Result<()> {
        let mut entries = fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read carafe directory {:?}", self.root))?;
        if entries.next().is_none() {
            tracing::debug!(root = ?self.root, "removing empty cellar");
            fs::remove_dir_all(&self.root)
                .with_context(|| format!("Failed to remove {:?}", self.root))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_missing_root() {
        let temp = TempDir::new().unwrap();
        let cellar = Cellar::at(temp.path().join("never-created")).unwrap();
        assert!(cellar.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_only_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("office")).unwrap();
        fs::create_dir_all(temp.path().join("games")).unwrap();
        fs::write(temp.path().join("config.json"), r#"{"games":{}}"#).unwrap();

        let cellar = Cellar::at(temp.path()).unwrap();
        assert_eq!(cellar.list().unwrap(), vec!["games", "office"]);
    }

    #[test]
    fn test_settings_follow_document() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.json"),
            r#"{"wine":"/opt/wine/bin/wine","winetricks":"/opt/winetricks"}"#,
        )
        .unwrap();
        let cellar = Cellar::at(temp.path()).unwrap();
        assert_eq!(cellar.settings().wine, "/opt/wine/bin/wine");
        assert_eq!(cellar.settings().winetricks, "/opt/winetricks");
    }

    #[test]
    fn test_prune_keeps_non_empty_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("cellar");
        fs::create_dir_all(root.join("games")).unwrap();
        let cellar = Cellar::at(&root).unwrap();

        cellar.prune().unwrap();
        assert!(root.exists());

        fs::remove_dir_all(root.join("games")).unwrap();
        cellar.prune().unwrap();
        assert!(!root.exists());
    }
}
