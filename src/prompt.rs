use anyhow::{bail, Context, Result};
use dialoguer::{Input, Select};
use is_terminal::IsTerminal;
use std::io::{self, BufRead, Write};

use crate::error::CarafeError;
use crate::select::{choose, Choice};
use crate::shortcut::ShortcutKind;

/// Ask the user to pick one of the discovered executables
///
/// Lists `index: C:/path` lines (and `link: C:/path` when offered) and asks
/// again until the answer parses.
pub fn executable(carafe: &str, executables: &[String], link: Option<&str>) -> Result<Choice> {
    if executables.is_empty() {
        return Err(CarafeError::NoExecutables(carafe.to_string()).into());
    }

    for (index, exe) in executables.iter().enumerate() {
        println!("{index}: C:/{exe}");
    }
    if let Some(link) = link {
        println!("link: C:/{link}");
    }

    let suffix = if link.is_some() {
        " (or choose 'link')"
    } else {
        ""
    };
    let prompt = format!("Choose the number of the application location{suffix}");

    loop {
        let answer = ask(&prompt, true)?;
        if let Some(choice) = choose(&answer, executables.len(), link.is_some()) {
            return Ok(choice);
        }
    }
}

/// Ask for the host path of an installer
pub fn installer_location() -> Result<String> {
    ask("To install a program to the carafe, enter the location", false)
}

/// Ask which kind of shortcut to write
pub fn shortcut_kind() -> Result<ShortcutKind> {
    let kinds = [ShortcutKind::Tool, ShortcutKind::Runtime];
    let labels: Vec<&str> = kinds.iter().map(|kind| kind.description()).collect();
    let index = Select::new()
        .with_prompt("Choose the type of shortcut to make")
        .items(&labels)
        .default(0)
        .interact()
        .context("Failed to read the shortcut type")?;
    Ok(kinds[index])
}

/// Read one answer, interactively on a terminal and line by line when piped
fn ask(prompt: &str, allow_empty: bool) -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Input::new()
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text()
            .context("Failed to read the answer");
    }

    eprint!("{prompt}: ");
    io::stderr().flush().ok();
    match read_answer(&mut stdin.lock())? {
        Some(answer) => Ok(answer),
        None => bail!("No answer was given to '{prompt}'"),
    }
}

/// Next line of `reader` without its line ending, `None` at end of input
fn read_answer(reader: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .context("Failed to read the answer")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
