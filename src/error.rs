use std::path::PathBuf;

use thiserror::Error;

/// Domain failures reported to the user before carafe exits with status 1.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CarafeError {
    /// Name is empty after normalization.
    #[error("The name '{0}' is not allowed because it appears empty")]
    EmptyName(String),

    /// Name collides with the config file, a global setting or a CLI keyword.
    #[error("The name '{0}' is not allowed because it is reserved")]
    ReservedName(String),

    #[error("{0} is already a carafe\nPlease see the list with 'carafe list'")]
    AlreadyExists(String),

    #[error(
        "{0} is not a known carafe\nFor a list of all carafes: 'carafe list'\nOr add a new one with 'carafe {0} create'"
    )]
    NotFound(String),

    /// Sanitized location has no regular file below `drive_c`.
    #[error("Location provided could not be found: {0}")]
    LocationNotFound(String),

    /// Host path given to `install` does not exist.
    #[error("The specified executable could not be found: {0}")]
    ExecutableNotFound(String),

    #[error("{0} has no default/linked program path\nPlease add one with 'carafe {0} link'")]
    NoLink(String),

    #[error(
        "There are currently no executables found for carafe '{0}'\nPlease add them with 'carafe {0} install'"
    )]
    NoExecutables(String),

    #[error("The output folder does not seem to exist: {}", .0.display())]
    OutputFolderMissing(PathBuf),

    /// Runtime or maintenance tool is not installed or misconfigured.
    #[error("{}", tool_missing_message(.name, .location, .config_file))]
    ToolMissing {
        name: String,
        location: String,
        config_file: PathBuf,
    },

    /// Launched program exited unsuccessfully under `ExitPolicy::Propagate`.
    #[error("'{program}' exited with status {code}")]
    ChildFailed { program: String, code: i32 },
}

fn tool_missing_message(name: &str, location: &str, config_file: &std::path::Path) -> String {
    let config = config_file.display();
    if location == name {
        format!(
            "The required tool '{name}' could not be found\n\
             Please install it using your package manager\n\
             (Most required tools will be installed with wine)\n\
             Or set a custom location in '{config}'\n\
             (In the main object set '{name}' to the correct path)"
        )
    } else {
        format!(
            "The required tool '{name}' could not be found\n\
             The path was manually changed in the config file\n\
             The location is set to '{location}'\n\
             Please remove the custom location from '{config}'\n\
             Or update the path to the correct '{name}' location"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_missing_default_location() {
        let err = CarafeError::ToolMissing {
            name: "wine".to_string(),
            location: "wine".to_string(),
            config_file: PathBuf::from("/home/u/.carafe/config.json"),
        };
        let message = err.to_string();
        assert!(message.contains("install it using your package manager"));
        assert!(message.contains("/home/u/.carafe/config.json"));
    }

    #[test]
    fn test_tool_missing_custom_location() {
        let err = CarafeError::ToolMissing {
            name: "winetricks".to_string(),
            location: "/opt/bin/winetricks".to_string(),
            config_file: PathBuf::from("config.json"),
        };
        let message = err.to_string();
        assert!(message.contains("manually changed"));
        assert!(message.contains("/opt/bin/winetricks"));
    }

    #[test]
    fn test_not_found_mentions_create() {
        let message = CarafeError::NotFound("games".to_string()).to_string();
        assert!(message.contains("carafe games create"));
    }
}
