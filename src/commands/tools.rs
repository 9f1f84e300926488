use crate::launcher::OutputMode;
use crate::{ui, Carafe};
use anyhow::Result;

pub fn regedit(carafe: &Carafe<'_>) -> Result<()> {
    run_runtime_tool(carafe, "regedit")
}

pub fn winecfg(carafe: &Carafe<'_>) -> Result<()> {
    run_runtime_tool(carafe, "winecfg")
}

pub fn winetricks(carafe: &Carafe<'_>, arguments: Vec<String>) -> Result<()> {
    carafe.ensure_exists()?;
    carafe
        .launcher()
        .run(carafe.winetricks(), &arguments, None, OutputMode::Log)?;
    ui::success("Finished", format!("winetricks for '{}'", carafe.name()));
    Ok(())
}

fn run_runtime_tool(carafe: &Carafe<'_>, program: &str) -> Result<()> {
    carafe.ensure_exists()?;
    carafe
        .launcher()
        .run(carafe.runtime(), &[program], None, OutputMode::Log)?;
    ui::success("Finished", format!("{program} for '{}'", carafe.name()));
    Ok(())
}
