use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the config document inside the cellar
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Per-carafe settings stored under the carafe's name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarafeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wine: Option<String>,
    #[serde(flatten)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

/// Settable fields of a [`CarafeRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Arch,
    Link,
    Wine,
}

impl ConfigField {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigField::Arch => "arch",
            ConfigField::Link => "link",
            ConfigField::Wine => "wine",
        }
    }
}

/// The whole `config.json` document
///
/// Top-level `wine`/`winetricks` override the global tool locations, every
/// other key is a carafe name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winetricks: Option<String>,
    #[serde(flatten)]
    pub carafes: BTreeMap<String, CarafeRecord>,
}

impl ConfigDocument {
    pub fn is_empty(&self) -> bool {
        self.wine.is_none() && self.winetricks.is_none() && self.carafes.is_empty()
    }

    pub fn record(&self, name: &str) -> Option<&CarafeRecord> {
        self.carafes.get(name)
    }

    pub fn set(&mut self, name: &str, field: ConfigField, value: impl Into<String>) {
        let record = self.carafes.entry(name.to_string()).or_default();
        let value = Some(value.into());
        match field {
            ConfigField::Arch => record.arch = value,
            ConfigField::Link => record.link = value,
            ConfigField::Wine => record.wine = value,
        }
    }
}

/// Owner of `config.json`; every call is a full read-modify-write
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: PathBuf,
    file: PathBuf,
}

impl ConfigStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let file = root.join(CONFIG_FILE_NAME);
        Self { root, file }
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Load the document, returning an empty one when nothing is stored
    ///
    /// A persisted `{}` is deleted on sight.
    pub fn read(&self) -> Result<ConfigDocument> {
        if !self.root.is_dir() || !self.file.is_file() {
            return Ok(ConfigDocument::default());
        }

        let contents = fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read config file {:?}", self.file))?;
        let document: ConfigDocument = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.file))?;

        if document.is_empty() {
            self.discard();
        }

        Ok(document)
    }

    /// Set one field of a carafe's record, creating the record if needed
    pub fn write(&self, name: &str, field: ConfigField, value: &str) -> Result<()> {
        let mut document = self.read()?;
        document.set(name, field, value);
        tracing::debug!(carafe = name, field = field.as_str(), value, "updating config");
        self.persist(&document)
    }

    /// Drop a carafe's record, deleting the file if nothing remains
    pub fn remove_entry(&self, name: &str) -> Result<()> {
        let mut document = self.read()?;
        document.carafes.remove(name);
        if document.is_empty() {
            self.discard();
            return Ok(());
        }
        self.persist(&document)
    }

    fn persist(&self, document: &ConfigDocument) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create config directory {:?}", self.root))?;

        let contents =
            serde_json::to_string(document).context("Failed to serialize carafe config")?;
        fs::write(&self.file, contents)
            .with_context(|| format!("Failed to write config file {:?}", self.file))?;
        Ok(())
    }

    fn discard(&self) {
        if let Err(err) = fs::remove_file(&self.file) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(file = ?self.file, %err, "could not remove empty config");
            }
        }
    }
}
