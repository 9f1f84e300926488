use crate::select::Choice;
use crate::{prompt, ui, Carafe};
use anyhow::Result;

pub fn execute(carafe: &mut Carafe<'_>, location: Option<String>) -> Result<()> {
    carafe.ensure_exists()?;

    let target = match location {
        Some(location) => carafe.resolve_location(&location)?,
        None => {
            let executables = carafe.executables()?;
            let Choice::Index(index) = prompt::executable(carafe.name(), &executables, None)?
            else {
                anyhow::bail!("A carafe can not be linked to its own link");
            };
            executables[index].clone()
        }
    };

    carafe.set_link(&target)?;
    ui::success("Linked", format!("'{}' to C:/{target}", carafe.name()));
    Ok(())
}
