use crate::{ui, Cellar};
use anyhow::Result;

pub fn execute(cellar: &Cellar) -> Result<()> {
    let carafes = cellar.list()?;
    if carafes.is_empty() {
        ui::info("There are currently no carafes configured");
        ui::info("Use 'carafe <carafe_name> create' to add a new carafe");
        return Ok(());
    }

    ui::status("Carafes", "The following carafes are currently configured:");
    for name in &carafes {
        println!("{name}");
    }
    ui::info("Run 'carafe <carafe_name> info' for more information");
    Ok(())
}
