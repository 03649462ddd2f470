// src/settings.rs

//! Persisted migration settings
//!
//! A settings file records the user's selections between runs: the source
//! and target users, script options, the selected folders and the selected
//! applications with their suggested Linux equivalents. Files are pretty
//! JSON; a path ending in `.toml` is read and written as TOML instead.
//! Missing fields fall back to the same defaults as [`MigrationConfig`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::equivalents;
use crate::migration::{
    DEFAULT_ARCHIVE_NAME, DEFAULT_PACKAGE_MANAGER, DataItem, MigrationConfig, item_name,
};
use crate::Result;

/// File name used when no settings path is given
pub const DEFAULT_SETTINGS_FILE: &str = "lunx_settings.json";

/// File name used when no script output path is given
pub const DEFAULT_SCRIPT_FILE: &str = "migrate_to_linux.sh";

/// Suggestion text meaning "no equivalent"
const NO_SUGGESTION: &str = "-";

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_package_manager() -> String {
    DEFAULT_PACKAGE_MANAGER.to_string()
}

fn default_archive_name() -> String {
    DEFAULT_ARCHIVE_NAME.to_string()
}

fn default_true() -> bool {
    true
}

/// A selected application as stored in the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedApp {
    pub name: String,
    #[serde(default)]
    pub version: String,
    /// Comma-separated candidates, or `-` when none were known
    #[serde(default)]
    pub linux_equivalents_suggestion: String,
}

impl SelectedApp {
    /// Record an application with the resolver's current suggestion
    pub fn suggested(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        let candidates = equivalents::resolve(&name);
        let suggestion = if candidates.is_empty() {
            NO_SUGGESTION.to_string()
        } else {
            candidates.join(", ")
        };
        Self {
            name,
            version: version.into(),
            linux_equivalents_suggestion: suggestion,
        }
    }

    /// Candidates from the stored suggestion, resolving the name again when
    /// the suggestion is blank or `-`
    pub fn candidates(&self) -> Vec<String> {
        let stored: Vec<String> = self
            .linux_equivalents_suggestion
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != NO_SUGGESTION)
            .map(str::to_string)
            .collect();
        if stored.is_empty() {
            equivalents::resolve(&self.name)
        } else {
            stored
        }
    }
}

/// Settings file contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub windows_user: String,
    #[serde(default)]
    pub linux_user: String,
    #[serde(default = "default_package_manager")]
    pub package_manager: String,
    #[serde(default = "default_true")]
    pub copy_full_folders: bool,
    #[serde(default)]
    pub create_archive: bool,
    #[serde(default = "default_archive_name")]
    pub archive_name: String,
    #[serde(default = "default_true")]
    pub script_preserve_permissions: bool,
    #[serde(default = "default_true")]
    pub script_copy_symlinks: bool,
    #[serde(default)]
    pub script_fix_paths: bool,
    #[serde(default)]
    pub selected_folders_paths: Vec<String>,
    #[serde(default)]
    pub selected_apps_details: Vec<SelectedApp>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            windows_user: String::new(),
            linux_user: String::new(),
            package_manager: default_package_manager(),
            copy_full_folders: true,
            create_archive: false,
            archive_name: default_archive_name(),
            script_preserve_permissions: true,
            script_copy_symlinks: true,
            script_fix_paths: false,
            selected_folders_paths: Vec::new(),
            selected_apps_details: Vec::new(),
        }
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

impl Settings {
    /// Load settings from a JSON or TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings = if is_toml(path) {
            toml::from_str(&content)?
        } else {
            serde_json::from_str(content.trim_start_matches('\u{feff}'))?
        };
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to a JSON or TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut content = if is_toml(path) {
            toml::to_string_pretty(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        if !content.ends_with('\n') {
            content.push('\n');
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Script options for the synthesizer
    pub fn migration_config(&self) -> MigrationConfig {
        MigrationConfig {
            copy_full: self.copy_full_folders,
            linux_user: self.linux_user.trim().to_string(),
            package_manager_spec: self.package_manager.clone(),
            use_archive: self.create_archive,
            archive_name: self.archive_name.trim().to_string(),
            preserve_permissions: self.script_preserve_permissions,
            copy_symlinks: self.script_copy_symlinks,
            fix_paths: self.script_fix_paths,
        }
    }

    /// Stat each selected path as stored
    pub fn data_items(&self) -> Vec<DataItem> {
        self.selected_folders_paths
            .iter()
            .map(DataItem::from_path)
            .collect()
    }

    /// Stat each selected item by name under `profile`.
    ///
    /// Used when the source profile is reachable at a different location,
    /// such as a mounted Windows disk.
    pub fn data_items_under(&self, profile: &Path) -> Vec<DataItem> {
        self.selected_folders_paths
            .iter()
            .map(|stored| {
                let path = profile.join(item_name(stored));
                debug!("Remapped {} to {}", stored, path.display());
                DataItem::from_path(path)
            })
            .collect()
    }

    /// Candidate lists for the selected applications.
    ///
    /// Applications with no stored suggestion and no resolver match are
    /// left out.
    pub fn app_candidate_lists(&self) -> Vec<Vec<String>> {
        self.selected_apps_details
            .iter()
            .map(SelectedApp::candidates)
            .filter(|candidates| !candidates.is_empty())
            .collect()
    }

    /// True when nothing is selected for migration
    pub fn is_empty_selection(&self) -> bool {
        self.selected_folders_paths.is_empty() && self.app_candidate_lists().is_empty()
    }
}

/// Default settings file location in the user's home directory
pub fn default_settings_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_SETTINGS_FILE)
}

/// Default script output location in the user's home directory
pub fn default_script_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_SCRIPT_FILE)
}
