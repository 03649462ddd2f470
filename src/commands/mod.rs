// src/commands/mod.rs
//! Command handlers for the lunx CLI

mod generate;
mod scan;
mod settings;
mod suggest;

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;

pub use generate::{GenerateOptions, cmd_generate};
pub use scan::cmd_scan;
pub use settings::{cmd_settings_init, cmd_settings_show};
pub use suggest::cmd_suggest;

/// Print a shell completion script to stdout
pub fn cmd_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "lunx", &mut io::stdout());
    Ok(())
}
