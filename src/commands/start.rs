use crate::select::{self, Choice, Request, Resolution};
use crate::{prompt, Carafe};
use anyhow::Result;

pub fn execute(
    carafe: &Carafe<'_>,
    keep_log: bool,
    ask: bool,
    location: Option<String>,
    arguments: Vec<String>,
) -> Result<()> {
    carafe.ensure_exists()?;

    let request = Request {
        ask,
        location: location.as_deref(),
        link: carafe.link(),
    };

    let target = match select::resolve(carafe.name(), request)? {
        Resolution::Location(raw) => carafe.resolve_location(raw)?,
        Resolution::Link(link) => link.to_string(),
        Resolution::Prompt { include_link } => {
            let executables = carafe.executables()?;
            let link = carafe.link().filter(|_| include_link);
            match prompt::executable(carafe.name(), &executables, link)? {
                Choice::Index(index) => executables[index].clone(),
                Choice::Link => link.unwrap_or_default().to_string(),
            }
        }
    };

    tracing::debug!(carafe = carafe.name(), location = %target, keep_log, "starting");
    carafe.start(&target, &arguments, keep_log)
}
