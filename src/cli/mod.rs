// src/cli/mod.rs
//! CLI definitions for lunx
//!
//! This module contains the command-line interface definitions using clap.
//! The command implementations are in the `commands` module.
//!
//! - `suggest` - Look up Linux equivalents for Windows application names
//! - `scan` - Enumerate profile folders and installed applications
//! - `settings` - Create or inspect a settings file
//! - `generate` - Build the archive (optional) and the migration script
//! - `completions` - Shell completion scripts

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

mod settings;

pub use settings::SettingsCommands;

#[derive(Parser)]
#[command(name = "lunx")]
#[command(author = "lunx contributors")]
#[command(version)]
#[command(about = "Plan a Windows to Linux migration and generate the migration script", long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Suggest Linux packages for Windows application names
    Suggest {
        /// Application display names, e.g. "Google Chrome"
        #[arg(required = true)]
        names: Vec<String>,

        /// Print suggestions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Enumerate profile folders and installed applications
    Scan {
        /// Windows user name (profile is C:/Users/<user>)
        #[arg(short, long)]
        user: Option<String>,

        /// Profile directory to scan instead, e.g. a mounted Windows disk
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// JSON export of uninstall registry entries
        #[arg(short, long)]
        apps: Option<PathBuf>,

        /// Stop each enumeration after this many records
        #[arg(long)]
        max_items: Option<usize>,
    },

    /// Settings file management
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Generate the migration script (and archive, if enabled)
    Generate {
        /// Settings file to read
        #[arg(short, long)]
        settings: PathBuf,

        /// Script output path (default: ~/migrate_to_linux.sh)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Archive output path (default: next to the script)
        #[arg(long)]
        archive_output: Option<PathBuf>,

        /// Source profile directory; selected items are looked up by name here
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Do not create the archive, only reference it from the script
        #[arg(long)]
        skip_archive: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::parse_from([
            "lunx",
            "-v",
            "generate",
            "--settings",
            "s.json",
            "-o",
            "out.sh",
            "--skip-archive",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Generate {
                settings,
                output,
                skip_archive,
                ..
            }) => {
                assert_eq!(settings, PathBuf::from("s.json"));
                assert_eq!(output, Some(PathBuf::from("out.sh")));
                assert!(skip_archive);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_suggest_requires_names() {
        assert!(Cli::try_parse_from(["lunx", "suggest"]).is_err());
    }
}
