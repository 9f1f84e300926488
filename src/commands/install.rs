use crate::{prompt, ui, Carafe};
use anyhow::Result;

pub fn execute(carafe: &Carafe<'_>, executable: Option<String>) -> Result<()> {
    carafe.ensure_exists()?;

    let executable = match executable {
        Some(executable) => executable,
        None => prompt::installer_location()?,
    };

    let progress = ui::Progress::new(
        "Installing",
        format!("{} into '{}'", executable.trim(), carafe.name()),
    );
    progress.finish("Installed", carafe.install(&executable))?;
    ui::info(format!(
        "Link the installed program with 'carafe {} link'",
        carafe.name()
    ));
    Ok(())
}
