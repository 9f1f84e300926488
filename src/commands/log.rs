use crate::{ui, Carafe};
use anyhow::Result;

pub fn execute(carafe: &Carafe<'_>) -> Result<()> {
    match carafe.read_log()? {
        Some(contents) => print!("{contents}"),
        None => ui::info(format!("No logs for '{}' carafe yet", carafe.name())),
    }
    Ok(())
}
