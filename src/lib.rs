// Public API
pub mod cli;
pub mod commands;
pub mod ui;

// Core domain types
mod carafe;
mod cellar;
mod config;
mod error;
mod launcher;
mod location;
mod prompt;
mod select;
mod settings;
mod shortcut;
mod util;

// Re-export main types
pub use carafe::{Carafe, CarafeInfo};
pub use cellar::Cellar;
pub use config::{CarafeRecord, ConfigDocument, ConfigField, ConfigStore};
pub use error::CarafeError;
pub use launcher::{OutputMode, PrefixEnvironment};
pub use settings::{ExitPolicy, Settings};
pub use shortcut::{Shortcut, ShortcutKind, ShortcutTarget};
