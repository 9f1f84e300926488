use crate::{ui, Carafe};
use anyhow::Result;

pub fn execute(carafe: &Carafe<'_>) -> Result<()> {
    carafe.remove()?;
    ui::success("Removed", format!("carafe '{}'", carafe.name()));
    Ok(())
}
