// src/discovery/mod.rs
//! Source-system discovery
//!
//! Produces the plain records the synthesizer consumes: the source user
//! profile and its standard folders, and installed applications filtered
//! from uninstall entries. Long enumerations can run on a background worker
//! and be cancelled between records.

mod apps;
mod profile;
mod worker;

pub use apps::{
    SkipReason, SystemFolders, UninstallEntry, filter_entries, filter_entry,
    load_uninstall_entries, skip_reason,
};
pub use profile::{
    STANDARD_FOLDERS, item_size, list_user_items, resolve_profile, resolve_profile_with,
};
pub use worker::{CancellationToken, Enumeration, EnumerationEvent, spawn_enumeration};
