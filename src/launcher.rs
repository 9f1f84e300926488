use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::error::CarafeError;
use crate::settings::{ExitPolicy, Settings};

/// Where the runtime's stdout/stderr go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Combined output truncates and fills the carafe's log file
    Log,
    /// Output is thrown away and runtime debug channels are silenced
    Discard,
}

impl OutputMode {
    /// Logged runs are installers and maintenance tools that may ask questions
    pub fn inherits_stdin(self) -> bool {
        self == OutputMode::Log
    }
}

/// An external program, by its name and the location it was configured at
#[derive(Debug, Clone, Copy)]
pub struct Tool<'a> {
    pub name: &'a str,
    pub location: &'a str,
}

/// Variables isolating a spawned runtime inside one carafe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixEnvironment {
    pub prefix: PathBuf,
    pub arch: Option<String>,
}

impl PrefixEnvironment {
    pub fn new(prefix: impl Into<PathBuf>, arch: Option<String>) -> Self {
        Self {
            prefix: prefix.into(),
            arch,
        }
    }

    /// Variables to set for the given output mode
    pub fn vars(&self, mode: OutputMode) -> Vec<(&'static str, String)> {
        let mut vars = vec![("WINEPREFIX", self.prefix.display().to_string())];
        if let Some(arch) = &self.arch {
            vars.push(("WINEARCH", arch.clone()));
        }
        if mode == OutputMode::Discard {
            vars.push(("WINEDEBUG", "-all".to_string()));
        }
        vars
    }

    /// Render as `NAME="value"` assignments for an `env` command line
    pub fn format_assignments(&self) -> String {
        self.vars(OutputMode::Log)
            .iter()
            .map(|(name, value)| format!("{name}=\"{value}\""))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Spawns tools inside a carafe and waits for them
#[derive(Debug)]
pub struct Launcher<'a> {
    settings: &'a Settings,
    environment: PrefixEnvironment,
    log_file: PathBuf,
}

impl<'a> Launcher<'a> {
    pub fn new(settings: &'a Settings, environment: PrefixEnvironment, log_file: PathBuf) -> Self {
        Self {
            settings,
            environment,
            log_file,
        }
    }

    pub fn environment(&self) -> &PrefixEnvironment {
        &self.environment
    }

    /// Run `tool` with `args`, routing output according to `mode`
    ///
    /// The child's exit status only matters under [`ExitPolicy::Propagate`].
    pub fn run<S: AsRef<OsStr>>(
        &self,
        tool: Tool<'_>,
        args: &[S],
        cwd: Option<&Path>,
        mode: OutputMode,
    ) -> Result<()> {
        let program = self.settings.require_tool(tool.name, tool.location)?;

        let mut command = Command::new(&program);
        command.args(args);
        if mode.inherits_stdin() {
            command.stdin(Stdio::inherit());
        } else {
            command.stdin(Stdio::null());
        }
        for (name, value) in self.environment.vars(mode) {
            command.env(name, value);
        }
        if let Some(cwd) = cwd {
            command.current_dir(cwd);
        }

        match mode {
            OutputMode::Log => {
                let log = File::create(&self.log_file)
                    .with_context(|| format!("Failed to create log file {:?}", self.log_file))?;
                let err_log = log
                    .try_clone()
                    .with_context(|| format!("Failed to share log file {:?}", self.log_file))?;
                command.stdout(log).stderr(err_log);
            }
            OutputMode::Discard => {
                command.stdout(Stdio::null()).stderr(Stdio::null());
            }
        }

        tracing::debug!(?program, ?cwd, ?mode, prefix = ?self.environment.prefix, "spawning");
        let status = command
            .status()
            .with_context(|| format!("Failed to run {}", program.display()))?;
        self.check_status(tool.name, status)
    }

    fn check_status(&self, name: &str, status: ExitStatus) -> Result<()> {
        tracing::debug!(tool = name, %status, "finished");
        match self.settings.exit_policy {
            ExitPolicy::Ignore => Ok(()),
            ExitPolicy::Propagate if status.success() => Ok(()),
            ExitPolicy::Propagate => Err(CarafeError::ChildFailed {
                program: name.to_string(),
                code: status.code().unwrap_or(-1),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vars_log_mode() {
        let env = PrefixEnvironment::new("/cellar/games", Some("win32".to_string()));
        let vars = env.vars(OutputMode::Log);
        assert_eq!(
            vars,
            vec![
                ("WINEPREFIX", "/cellar/games".to_string()),
                ("WINEARCH", "win32".to_string()),
            ]
        );
    }

    #[test]
    fn test_vars_discard_mode_silences_debug() {
        let env = PrefixEnvironment::new("/cellar/games", None);
        let vars = env.vars(OutputMode::Discard);
        assert!(vars.contains(&("WINEDEBUG", "-all".to_string())));
        assert!(!vars.iter().any(|(name, _)| *name == "WINEARCH"));
    }

    #[test]
    fn test_only_logged_runs_inherit_stdin() {
        assert!(OutputMode::Log.inherits_stdin());
        assert!(!OutputMode::Discard.inherits_stdin());
    }

    #[test]
    fn test_format_assignments() {
        let env = PrefixEnvironment::new("/cellar/my games", Some("win64".to_string()));
        assert_eq!(
            env.format_assignments(),
            "WINEPREFIX=\"/cellar/my games\" WINEARCH=\"win64\""
        );
    }

    #[cfg(unix)]
    mod spawn {
        use super::super::*;
        use crate::config::ConfigDocument;
        use serial_test::serial;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        fn fake_tool(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("fake-wine");
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn settings(policy: ExitPolicy) -> Settings {
            let mut settings =
                Settings::from_document(&ConfigDocument::default(), Path::new("config.json"));
            settings.exit_policy = policy;
            settings
        }

        #[test]
        #[serial]
        fn test_log_mode_captures_output_and_env() {
            let temp = TempDir::new().unwrap();
            let tool = fake_tool(temp.path(), "echo \"prefix=$WINEPREFIX arch=$WINEARCH $*\"\necho oops >&2");
            let settings = settings(ExitPolicy::Ignore);
            let log = temp.path().join("log");
            let launcher = Launcher::new(
                &settings,
                PrefixEnvironment::new("/cellar/games", Some("win32".to_string())),
                log.clone(),
            );

            let location = tool.to_string_lossy();
            launcher
                .run(
                    Tool { name: "wine", location: &location },
                    &["wineboot", "--init"],
                    None,
                    OutputMode::Log,
                )
                .unwrap();

            let contents = fs::read_to_string(&log).unwrap();
            assert!(contents.contains("prefix=/cellar/games arch=win32 wineboot --init"));
            assert!(contents.contains("oops"));
        }

        #[test]
        #[serial]
        fn test_exit_status_policy() {
            let temp = TempDir::new().unwrap();
            let tool = fake_tool(temp.path(), "exit 3");
            let location = tool.to_string_lossy();
            let args: [&str; 0] = [];

            let ignore = settings(ExitPolicy::Ignore);
            let launcher = Launcher::new(
                &ignore,
                PrefixEnvironment::new(temp.path(), None),
                temp.path().join("log"),
            );
            launcher
                .run(Tool { name: "wine", location: &location }, &args, None, OutputMode::Discard)
                .unwrap();

            let propagate = settings(ExitPolicy::Propagate);
            let launcher = Launcher::new(
                &propagate,
                PrefixEnvironment::new(temp.path(), None),
                temp.path().join("log"),
            );
            let err = launcher
                .run(Tool { name: "wine", location: &location }, &args, None, OutputMode::Discard)
                .unwrap_err();
            assert!(err.to_string().contains("exited with status 3"));
        }
    }
}
