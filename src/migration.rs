// src/migration.rs

//! Migration data model
//!
//! Plain records exchanged between the enumeration side, the settings file
//! and the script synthesizer. None of these types perform I/O except
//! [`DataItem::from_path`], which stats the path once at selection time.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default package manager command
pub const DEFAULT_PACKAGE_MANAGER: &str = "apt";

/// Default archive file name used when archive mode is enabled
pub const DEFAULT_ARCHIVE_NAME: &str = "win_migrator_backup.tar.gz";

/// An installed application discovered on the source system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// Display name as reported by the source system
    pub name: String,
    /// Install location (may be empty)
    #[serde(default)]
    pub install_location: String,
    /// Display version (may be empty)
    #[serde(default)]
    pub version: String,
}

impl ApplicationRecord {
    pub fn new(
        name: impl Into<String>,
        install_location: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            install_location: install_location.into(),
            version: version.into(),
        }
    }
}

/// Filesystem kind of a selected data item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Directory,
    /// Vanished, or neither a regular file nor a directory
    Other,
}

/// A selected migration unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataItem {
    pub path: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub is_symlink: bool,
}

impl DataItem {
    pub fn new(path: impl Into<String>, kind: ItemKind, is_symlink: bool) -> Self {
        Self {
            path: path.into(),
            kind,
            is_symlink,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self::new(path, ItemKind::Directory, false)
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self::new(path, ItemKind::File, false)
    }

    /// Build an item from the current state of `path`.
    ///
    /// Symlinks report the kind of their target. Paths that cannot be
    /// stat'ed are kept as [`ItemKind::Other`] so the script can skip them
    /// with a warning instead of losing the selection.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let is_symlink = fs::symlink_metadata(path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        let text = path.to_string_lossy();
        let kind = match fs::metadata(path) {
            // A filesystem root has no name to migrate it under
            _ if !has_item_name(&text) => ItemKind::Other,
            Ok(meta) if meta.is_dir() => ItemKind::Directory,
            Ok(meta) if meta.is_file() => ItemKind::File,
            _ => ItemKind::Other,
        };
        Self::new(text, kind, is_symlink)
    }

    /// Final path component, accepting both `/` and `\` separators.
    ///
    /// This is the name the item is expected under in the staging directory
    /// and the name it receives inside the migration subdirectory.
    pub fn name(&self) -> &str {
        item_name(&self.path)
    }

    /// False for root-like paths such as `/` or `C:\`
    pub fn has_name(&self) -> bool {
        has_item_name(&self.path)
    }
}

/// Final component of a Windows or Unix path
pub fn item_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rfind(['/', '\\']) {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    }
}

/// Whether `path` ends in a component usable as a migration name.
///
/// Empty names and bare drive specifiers (`C:`) are rejected.
pub fn has_item_name(path: &str) -> bool {
    let name = item_name(path);
    let bytes = name.as_bytes();
    let drive = bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
    !name.is_empty() && !drive
}

/// Configuration for one synthesis call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Copy directory contents rather than creating empty placeholders
    pub copy_full: bool,
    /// Target user on the destination system; empty means the invoking user
    pub linux_user: String,
    /// Package manager command, e.g. `apt` or `pacman -S`
    pub package_manager_spec: String,
    /// Extract a prepared archive instead of copying from a staging directory
    pub use_archive: bool,
    /// File name of the archive expected next to the script
    pub archive_name: String,
    /// Preserve ACLs and extended attributes when copying
    pub preserve_permissions: bool,
    /// Copy symlinks as links instead of following them
    pub copy_symlinks: bool,
    /// Emit the path-fixing placeholder section
    pub fix_paths: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            copy_full: true,
            linux_user: String::new(),
            package_manager_spec: DEFAULT_PACKAGE_MANAGER.to_string(),
            use_archive: false,
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            preserve_permissions: true,
            copy_symlinks: true,
            fix_paths: false,
        }
    }
}
