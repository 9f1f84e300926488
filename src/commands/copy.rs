use crate::{ui, Carafe};
use anyhow::Result;

pub fn execute(carafe: &Carafe<'_>, newname: String) -> Result<()> {
    let progress = ui::Progress::new("Copying", format!("carafe '{}'", carafe.name()));
    let copied = progress.finish("Copied", carafe.copy(&newname))?;
    ui::success("Done", format!("'{}' was copied to '{copied}'", carafe.name()));
    Ok(())
}
