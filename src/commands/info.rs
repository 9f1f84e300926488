use crate::{ui, Carafe};
use anyhow::Result;

pub fn execute(carafe: &Carafe<'_>) -> Result<()> {
    let info = carafe.info()?;
    let name = carafe.name();

    ui::status("Carafe", format!("All information about carafe '{name}':"));
    match &info.arch {
        Some(arch) => ui::info(format!("Configured with custom arch: {arch}")),
        None => ui::info("Configured with default system arch"),
    }
    match &info.link {
        Some(link) => ui::info(format!(
            "A link for easy startup is configured to the following:\n{link}"
        )),
        None => ui::info("No link is currently configured"),
    }
    ui::info(format!(
        "When a carafe is linked, you can start the program with 'carafe {name} start'\n\
         To modify the link, use 'carafe {name} link'"
    ));

    if info.executables.is_empty() {
        ui::info("There are currently no executables found for this carafe");
        ui::info(format!("Please add them with 'carafe {name} install'"));
        return Ok(());
    }

    ui::status("Executables", "The current list of executables looks like this:");
    for exe in &info.executables {
        println!("C:/{exe}");
    }
    ui::info(format!("You can add more with 'carafe {name} install'"));
    Ok(())
}
