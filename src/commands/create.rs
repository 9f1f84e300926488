use crate::{ui, Carafe};
use anyhow::Result;

pub fn execute(carafe: &mut Carafe<'_>, arch: Option<String>) -> Result<()> {
    let progress = ui::Progress::new("Creating", format!("carafe '{}'", carafe.name()));
    progress.finish("Created", carafe.create(arch.as_deref()))?;
    ui::info(format!(
        "Install a program with 'carafe {} install'",
        carafe.name()
    ));
    Ok(())
}
