// src/main.rs

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands, SettingsCommands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Suggest { names, json }) => commands::cmd_suggest(&names, json),
        Some(Commands::Scan {
            user,
            profile,
            apps,
            max_items,
        }) => commands::cmd_scan(user.as_deref(), profile, apps, max_items),
        Some(Commands::Settings(settings_cmd)) => match settings_cmd {
            SettingsCommands::Init { path, force } => commands::cmd_settings_init(path, force),
            SettingsCommands::Show { path } => commands::cmd_settings_show(path),
        },
        Some(Commands::Generate {
            settings,
            output,
            archive_output,
            profile,
            skip_archive,
        }) => commands::cmd_generate(commands::GenerateOptions {
            settings,
            output,
            archive_output,
            profile,
            skip_archive,
        }),
        Some(Commands::Completions { shell }) => commands::cmd_completions(shell),
        None => {
            // No command provided, show help
            println!("lunx v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'lunx --help' for usage information");
            Ok(())
        }
    }
}
