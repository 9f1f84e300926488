use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::shortcut::ShortcutKind;

/// carafe - a tiny management tool for wine bottles/carafes
///
/// Every carafe is an isolated wine prefix stored in ~/.carafe (or
/// $CARAFE_HOME). Create one, install a program into it, link the program and
/// start it by name.
///
/// The first argument is always the carafe name, so a carafe may share its
/// name with a command. Everything after it is parsed by [`Action`].
#[derive(Parser, Debug)]
#[command(
    name = "carafe",
    author,
    version,
    about,
    long_about = None,
    override_usage = "carafe {<CARAFE_NAME>,list} <COMMAND>",
    after_help = "Run 'carafe <CARAFE_NAME> --help' for the list of commands\n\
                  carafe is MIT licensed, see the README.md for documentation"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Name of the carafe to manage, or `list` to show all carafes
    #[arg(value_name = "CARAFE_NAME")]
    pub carafe: Option<String>,

    /// Command to run on the carafe, followed by its arguments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub arguments: Vec<String>,
}

impl Cli {
    /// Parse the arguments following the carafe name into a command
    pub fn into_invocation(self) -> Result<Invocation, clap::Error> {
        let action = Action::try_parse_from(&self.arguments)?;
        Ok(Invocation {
            verbose: self.verbose || action.verbose,
            carafe: self.carafe,
            command: action.command,
        })
    }
}

/// Everything after the carafe name
#[derive(Parser, Debug)]
#[command(
    name = "carafe",
    no_binary_name = true,
    override_usage = "carafe {<CARAFE_NAME>,list} <COMMAND>",
    after_help = "carafe is MIT licensed, see the README.md for documentation"
)]
pub struct Action {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// A fully parsed command line
#[derive(Debug)]
pub struct Invocation {
    pub verbose: bool,
    pub carafe: Option<String>,
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new carafe, you should start here
    Create {
        /// Change the default arch, e.g. to win32
        #[arg(long, value_name = "ARCH")]
        arch: Option<String>,
    },

    /// Run an external exe/msi inside the carafe to install software
    Install {
        /// Location of the external executable to run inside the carafe
        #[arg(short, long, value_name = "PATH")]
        executable: Option<String>,
    },

    /// Start a program inside an existing carafe
    Start {
        /// Keep the wine log (can be multiple GBs and will slow down wine)
        #[arg(short, long)]
        keep_log: bool,

        /// Instead of starting the link or --location, ask for the path
        #[arg(short, long)]
        ask: bool,

        /// Location of the executable inside the carafe to start
        #[arg(short, long, value_name = "PATH")]
        location: Option<String>,

        /// Any arguments will directly be passed to the started executable
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        arguments: Vec<String>,
    },

    /// Change the name of an existing carafe
    Rename {
        /// New name of the carafe
        newname: String,
    },

    /// Duplicate an existing carafe to a new one
    Copy {
        /// Name of the new carafe
        newname: String,
    },

    /// Delete an existing carafe
    Remove,

    /// Print all information about a carafe
    Info,

    /// Connect the startup link (recommended)
    Link {
        /// Location of the executable inside the carafe to link
        #[arg(short, long, value_name = "PATH")]
        location: Option<String>,
    },

    /// Create a .desktop shortcut to a carafe
    Shortcut {
        /// Location of the executable inside the carafe to shortcut,
        /// normally a path, but can be set to 'link' as well
        #[arg(short, long, value_name = "PATH")]
        location: Option<String>,

        /// Which folder to place the shortcut, default is the user desktop
        #[arg(short, long, value_name = "DIR")]
        output_folder: Option<PathBuf>,

        /// Name of the new shortcut, default is the name of the carafe
        #[arg(short, long, value_name = "NAME")]
        name: Option<String>,

        /// The type of shortcut to make
        #[arg(short = 't', long = "type", value_enum, value_name = "TYPE")]
        kind: Option<ShortcutKind>,
    },

    /// Show the output of the last logged command
    Log,

    /// Edit the windows registry
    Regedit,

    /// Configure all wine settings
    Winecfg,

    /// Install winetricks components
    Winetricks {
        /// Any arguments will directly be passed to winetricks
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        arguments: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Invocation {
        Cli::try_parse_from(args)
            .unwrap()
            .into_invocation()
            .unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
        Action::command().debug_assert();
    }

    #[test]
    fn test_parse_name_and_verb() {
        let invocation = parse(&["carafe", "games", "create", "--arch", "win32"]);
        assert_eq!(invocation.carafe.as_deref(), Some("games"));
        match invocation.command {
            Some(Commands::Create { arch }) => assert_eq!(arch.as_deref(), Some("win32")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[rstest]
    #[case("copy")]
    #[case("start")]
    #[case("install")]
    #[case("create")]
    fn test_name_may_be_a_verb(#[case] name: &str) {
        let invocation = parse(&["carafe", name, "info"]);
        assert_eq!(invocation.carafe.as_deref(), Some(name));
        assert!(matches!(invocation.command, Some(Commands::Info)));
    }

    #[test]
    fn test_parse_list() {
        let invocation = parse(&["carafe", "list"]);
        assert_eq!(invocation.carafe.as_deref(), Some("list"));
        assert!(invocation.command.is_none());
    }

    #[test]
    fn test_parse_verbose_anywhere() {
        assert!(parse(&["carafe", "-v", "games", "info"]).verbose);
        assert!(parse(&["carafe", "games", "info", "-v"]).verbose);
        assert!(!parse(&["carafe", "games", "info"]).verbose);
    }

    #[test]
    fn test_parse_unknown_verb_fails() {
        let cli = Cli::try_parse_from(["carafe", "games", "explode"]).unwrap();
        assert!(cli.into_invocation().is_err());
    }

    #[test]
    fn test_parse_start_passthrough() {
        let invocation = parse(&[
            "carafe", "games", "start", "-k", "-l", "C:/game.exe", "--windowed", "-x",
        ]);
        match invocation.command {
            Some(Commands::Start {
                keep_log,
                ask,
                location,
                arguments,
            }) => {
                assert!(keep_log);
                assert!(!ask);
                assert_eq!(location.as_deref(), Some("C:/game.exe"));
                assert_eq!(arguments, vec!["--windowed", "-x"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_shortcut_type_alias() {
        let invocation = parse(&["carafe", "games", "shortcut", "-t", "wine"]);
        match invocation.command {
            Some(Commands::Shortcut { kind, .. }) => assert_eq!(kind, Some(ShortcutKind::Runtime)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_winetricks_args() {
        let invocation = parse(&["carafe", "games", "winetricks", "-q", "corefonts"]);
        match invocation.command {
            Some(Commands::Winetricks { arguments }) => {
                assert_eq!(arguments, vec!["-q", "corefonts"])
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
