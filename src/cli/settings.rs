// src/cli/settings.rs
//! Settings file commands

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Write a settings file with default values
    Init {
        /// Settings file path (default: ~/lunx_settings.json)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration of a settings file
    Show {
        /// Settings file path (default: ~/lunx_settings.json)
        path: Option<PathBuf>,
    },
}
