// src/script/mod.rs
//! Migration script synthesis
//!
//! Turns the selected data items, the per-application candidate lists and a
//! [`MigrationConfig`] into one self-contained bash script that runs on the
//! target Linux machine. The script has four parts:
//!
//! - target resolution and a confirmation gate
//! - stage 1: archive extraction or direct copy, then permission repair
//! - stage 2: package installation with ordered fallbacks
//! - stage 3: finalization and summary
//!
//! Synthesis is pure. Apart from the `# Date:` header line the output is a
//! deterministic function of its inputs; use [`synthesize_at`] to pin the
//! timestamp.

pub mod builder;
pub mod package_manager;
mod rsync;
mod stages;

pub use builder::ScriptBuilder;
pub use package_manager::{ManagerFamily, PackageManagerCommands};
pub use rsync::RsyncFlags;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::migration::{DataItem, MigrationConfig};

/// Directory created under the target home for migrated data
pub const MIGRATION_SUBDIR: &str = "migrated_windows_data";

/// Staging directory, relative to the script, used by direct-copy mode
pub const STAGING_DIR: &str = "./source_windows_data";

/// Format of the `# Date:` header line
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configurations that cannot produce a script
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("archive mode was selected but no data items were provided")]
    ArchiveWithoutItems,

    #[error("archive mode was selected but the archive name is empty")]
    EmptyArchiveName,
}

/// Check that `config` can be rendered for `items`
pub fn validate(items: &[DataItem], config: &MigrationConfig) -> Result<(), ConfigurationError> {
    if config.use_archive {
        if items.is_empty() {
            return Err(ConfigurationError::ArchiveWithoutItems);
        }
        if config.archive_name.trim().is_empty() {
            return Err(ConfigurationError::EmptyArchiveName);
        }
    }
    Ok(())
}

/// Render the migration script, stamped with the current local time
pub fn synthesize(
    items: &[DataItem],
    app_candidate_lists: &[Vec<String>],
    config: &MigrationConfig,
) -> Result<String, ConfigurationError> {
    synthesize_at(
        items,
        app_candidate_lists,
        config,
        chrono::Local::now().naive_local(),
    )
}

/// Render the migration script with a fixed generation timestamp
pub fn synthesize_at(
    items: &[DataItem],
    app_candidate_lists: &[Vec<String>],
    config: &MigrationConfig,
    generated_at: NaiveDateTime,
) -> Result<String, ConfigurationError> {
    validate(items, config)?;

    let mut b = ScriptBuilder::new();
    stages::emit_header(&mut b, &generated_at.format(DATE_FORMAT).to_string());
    stages::emit_helpers(&mut b);
    stages::emit_target_resolution(&mut b, config);
    stages::emit_confirmation(&mut b);

    b.separator();
    if config.use_archive {
        stages::emit_archive_extraction(&mut b, items, &config.archive_name);
    } else {
        stages::emit_direct_copy(&mut b, items, config);
    }
    stages::emit_permission_repair(&mut b);

    stages::emit_installation(&mut b, app_candidate_lists, config);
    stages::emit_finalization(&mut b, config);

    Ok(b.build())
}
