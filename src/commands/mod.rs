use crate::carafe::normalize_name;
use crate::cli::{Action, Commands, Invocation};
use crate::Cellar;
use anyhow::Result;
use clap::CommandFactory;

mod copy;
mod create;
mod info;
mod install;
mod link;
mod list;
mod log;
mod remove;
mod rename;
mod shortcut;
mod start;
mod tools;

/// Keyword accepted instead of a carafe name
const LIST_KEYWORD: &str = "list";

pub fn execute(invocation: Invocation) -> Result<()> {
    let Some(raw_name) = invocation.carafe else {
        Action::command().print_help()?;
        return Ok(());
    };

    let name = normalize_name(&raw_name);

    // Cellar is the root entry point; settings are resolved once here
    let cellar = Cellar::new()?;

    if name == LIST_KEYWORD {
        return list::execute(&cellar);
    }

    let Some(command) = invocation.command else {
        Action::command().print_help()?;
        return Ok(());
    };

    let mut carafe = cellar.carafe(&name)?;

    match command {
        Commands::Create { arch } => create::execute(&mut carafe, arch),

        Commands::Install { executable } => install::execute(&carafe, executable),

        Commands::Start {
            keep_log,
            ask,
            location,
            arguments,
        } => start::execute(&carafe, keep_log, ask, location, arguments),

        Commands::Rename { newname } => rename::execute(&carafe, newname),

        Commands::Copy { newname } => copy::execute(&carafe, newname),

        Commands::Remove => remove::execute(&carafe),

        Commands::Info => info::execute(&carafe),

        Commands::Link { location } => link::execute(&mut carafe, location),

        Commands::Shortcut {
            location,
            output_folder,
            name,
            kind,
        } => shortcut::execute(&carafe, location, output_folder, name, kind),

        Commands::Log => log::execute(&carafe),

        Commands::Regedit => tools::regedit(&carafe),

        Commands::Winecfg => tools::winecfg(&carafe),

        Commands::Winetricks { arguments } => tools::winetricks(&carafe, arguments),
    }
}
