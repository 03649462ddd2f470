// src/lib.rs

//! lunx: Windows to Linux migration planner
//!
//! Plans the move of a user's data and applications from a Windows machine
//! to a Linux one. The library resolves Windows application names to Linux
//! package candidates and synthesizes a self-contained bash script that
//! copies or extracts the user's folders and installs the equivalents on
//! the target system.
//!
//! # Architecture
//!
//! - Pure core: [`equivalents`] and [`script`] perform no I/O and no logging
//! - Records: [`migration`] holds the types exchanged between the layers
//! - Discovery: [`discovery`] enumerates profile folders and applications,
//!   optionally on cancellable background workers
//! - Side effects: [`archive`] runs `tar`, [`settings`] reads and writes the
//!   settings file

pub mod archive;
pub mod discovery;
pub mod equivalents;
mod error;
pub mod migration;
pub mod script;
pub mod settings;

pub use archive::{ArchivePlan, Compression};
pub use equivalents::{EquivalenceEntry, has_equivalent, normalize, resolve};
pub use error::{Error, Result};
pub use migration::{ApplicationRecord, DataItem, ItemKind, MigrationConfig};
pub use script::{ConfigurationError, synthesize, synthesize_at};
pub use settings::{SelectedApp, Settings};
