use carafe::cli::Cli;
use carafe::{commands, ui};
use clap::Parser;

fn main() {
    let invocation = Cli::parse()
        .into_invocation()
        .unwrap_or_else(|err| err.exit());

    // Initialize tracing; RUST_LOG wins over --verbose
    let default_filter = if invocation.verbose {
        "carafe=debug"
    } else {
        "carafe=warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = commands::execute(invocation) {
        ui::error(format!("{err:#}"));
        std::process::exit(1);
    }
}
