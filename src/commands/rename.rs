use crate::{ui, Carafe};
use anyhow::Result;

pub fn execute(carafe: &Carafe<'_>, newname: String) -> Result<()> {
    let progress = ui::Progress::new("Renaming", format!("carafe '{}'", carafe.name()));
    let renamed = progress.finish("Renamed", carafe.rename(&newname))?;
    ui::success("Done", format!("'{}' is now called '{renamed}'", carafe.name()));
    Ok(())
}
