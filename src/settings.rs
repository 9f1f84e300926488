use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};

use crate::config::ConfigDocument;
use crate::error::CarafeError;

pub const DEFAULT_WINE: &str = "wine";
pub const DEFAULT_WINETRICKS: &str = "winetricks";

/// What to do with the exit status of a launched program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitPolicy {
    /// carafe does not supervise the program it starts
    #[default]
    Ignore,
    /// A non-zero exit of the program fails the carafe command
    Propagate,
}

impl ExitPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "ignore" => Some(ExitPolicy::Ignore),
            "propagate" => Some(ExitPolicy::Propagate),
            _ => None,
        }
    }
}

/// Tool locations and launch policy, resolved once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub wine: String,
    pub winetricks: String,
    pub exit_policy: ExitPolicy,
    config_file: PathBuf,
}

impl Settings {
    pub fn from_document(document: &ConfigDocument, config_file: &Path) -> Self {
        let exit_policy = env::var("CARAFE_EXIT_STATUS")
            .ok()
            .and_then(|value| ExitPolicy::from_name(&value))
            .unwrap_or_default();

        Self {
            wine: tool_location(document.wine.as_deref(), DEFAULT_WINE),
            winetricks: tool_location(document.winetricks.as_deref(), DEFAULT_WINETRICKS),
            exit_policy,
            config_file: config_file.to_path_buf(),
        }
    }

    /// Verify that `location` resolves to an executable for tool `name`
    pub fn require_tool(&self, name: &str, location: &str) -> Result<PathBuf, CarafeError> {
        which::which(location).map_err(|err| {
            tracing::debug!(tool = name, location, %err, "tool lookup failed");
            CarafeError::ToolMissing {
                name: name.to_string(),
                location: location.to_string(),
                config_file: self.config_file.clone(),
            }
        })
    }
}

/// Expand `~` and `$VAR` in a configured location, keeping it verbatim on failure
fn tool_location(configured: Option<&str>, default: &str) -> String {
    match configured.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => shellexpand::full(value)
            .map(|expanded| expanded.into_owned())
            .unwrap_or_else(|_| value.to_string()),
        None => default.to_string(),
    }
}
