mod cli;
mod commands;
mod prompter;
mod settings;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (warn unless RUST_LOG says otherwise)
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("classpoints=warn,classpoints_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = settings::load_config(args.config.as_deref())?;
    settings::apply_credentials(
        &mut config,
        args.access_key.as_deref(),
        args.secret_key.as_deref(),
    );

    match args.command {
        Some(Command::Entry { id, name, deltas }) => {
            commands::entry::run(config, &id, name.as_deref(), &deltas)
        }
        Some(Command::Title { text }) => commands::title::run(config, text.as_deref()),
        Some(Command::Export { upload }) => commands::export::run(config, upload),
        Some(Command::Upload { file }) => commands::upload::run(config, &file),
        Some(Command::Show { json }) => commands::show::run(config, json),
        Some(Command::Lookup { id }) => commands::lookup::run(config, &id),
        Some(Command::About) => commands::about::run(config),
        None => commands::shell::run(config),
    }
}
