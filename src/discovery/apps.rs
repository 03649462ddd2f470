// src/discovery/apps.rs

//! Installed-application records from uninstall entries
//!
//! An [`UninstallEntry`] carries the values of one uninstall registry key,
//! typically exported on the source machine with
//! `Get-ItemProperty ...\Uninstall\* | ConvertTo-Json`. Entries that are
//! updates, components, drivers or other non-user-facing items are dropped;
//! the rest become [`ApplicationRecord`]s.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::migration::ApplicationRecord;
use crate::Result;

/// Name fragments of non-user-facing entries, dropped when no install
/// location value is present
const NON_APP_KEYWORDS: &[&str] = &[
    "driver",
    "redistributable",
    "module",
    "package",
    "host adapter",
    "provider",
    "service pack",
];

/// Names kept even when installed under the Windows system folder
const SYSTEM_FOLDER_KEEP: &[&str] = &["python", "git", "node.js"];

/// Names too generic to be useful without an install location
const GENERIC_NAMES: &[&str] = &["windows", "microsoft windows", "host process"];

/// Values of one uninstall key, named as in the registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UninstallEntry {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub display_version: Option<String>,
    /// `None` when the value is absent from the key
    #[serde(default)]
    pub install_location: Option<String>,
    #[serde(default)]
    pub system_component: Option<u32>,
    #[serde(default)]
    pub release_type: Option<String>,
    #[serde(default)]
    pub parent_key_name: Option<String>,
}

impl UninstallEntry {
    /// Entry with only a display name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            display_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.install_location = Some(location.into());
        self
    }
}

/// Windows system locations, lowercased for prefix comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemFolders {
    pub system_root: String,
    pub program_files: String,
    pub program_files_x86: String,
}

impl Default for SystemFolders {
    fn default() -> Self {
        Self::new(
            r"C:\Windows",
            r"C:\Program Files",
            r"C:\Program Files (x86)",
        )
    }
}

impl SystemFolders {
    pub fn new(system_root: &str, program_files: &str, program_files_x86: &str) -> Self {
        Self {
            system_root: system_root.to_lowercase(),
            program_files: program_files.to_lowercase(),
            program_files_x86: program_files_x86.to_lowercase(),
        }
    }

    /// Read `SystemRoot`, `ProgramFiles` and `ProgramFiles(x86)`, falling
    /// back to the stock locations
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let read = |key: &str, fallback: String| {
            std::env::var(key)
                .map(|v| v.to_lowercase())
                .unwrap_or(fallback)
        };
        Self {
            system_root: read("SystemRoot", defaults.system_root),
            program_files: read("ProgramFiles", defaults.program_files),
            program_files_x86: read("ProgramFiles(x86)", defaults.program_files_x86),
        }
    }
}

/// Why an entry was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoDisplayName,
    SystemComponent,
    Update,
    ChildComponent,
    Hotfix,
    NonApplication,
    SystemFolder,
    GenericName,
}

/// Check an entry against the filtering rules, in order
pub fn skip_reason(entry: &UninstallEntry, folders: &SystemFolders) -> Option<SkipReason> {
    let name = entry.display_name.as_deref().unwrap_or("");
    if name.trim().is_empty() {
        return Some(SkipReason::NoDisplayName);
    }
    let lower_name = name.to_lowercase();

    if entry.system_component == Some(1) {
        return Some(SkipReason::SystemComponent);
    }
    if entry
        .release_type
        .as_deref()
        .is_some_and(|r| r.contains("Update"))
    {
        return Some(SkipReason::Update);
    }
    if entry
        .parent_key_name
        .as_deref()
        .is_some_and(|p| !p.is_empty())
    {
        return Some(SkipReason::ChildComponent);
    }
    if is_kb_hotfix(name) {
        return Some(SkipReason::Hotfix);
    }
    if entry.install_location.is_none()
        && NON_APP_KEYWORDS.iter().any(|k| lower_name.contains(k))
    {
        return Some(SkipReason::NonApplication);
    }

    let location = entry.install_location.as_deref().unwrap_or("").to_lowercase();
    if !location.is_empty()
        && location.starts_with(&folders.system_root)
        && !location.starts_with(&folders.program_files)
        && !location.starts_with(&folders.program_files_x86)
        && !SYSTEM_FOLDER_KEEP.iter().any(|k| lower_name.contains(k))
    {
        return Some(SkipReason::SystemFolder);
    }
    if location.is_empty() && GENERIC_NAMES.contains(&lower_name.as_str()) {
        return Some(SkipReason::GenericName);
    }

    None
}

/// `KB` followed by digits, e.g. `KB5034441`
fn is_kb_hotfix(name: &str) -> bool {
    match name.strip_prefix("KB") {
        Some(rest) if name.chars().count() > 5 => {
            rest.chars().take(6).all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

/// Convert an entry to a record unless a filtering rule drops it
pub fn filter_entry(entry: &UninstallEntry, folders: &SystemFolders) -> Option<ApplicationRecord> {
    if let Some(reason) = skip_reason(entry, folders) {
        debug!(
            "Skipping uninstall entry {:?}: {:?}",
            entry.display_name, reason
        );
        return None;
    }
    let trimmed = |v: &Option<String>| v.as_deref().unwrap_or("").trim().to_string();
    Some(ApplicationRecord::new(
        trimmed(&entry.display_name),
        trimmed(&entry.install_location),
        trimmed(&entry.display_version),
    ))
}

/// Filter a sequence of entries; duplicates are kept
pub fn filter_entries<'a, I>(
    entries: I,
    folders: &'a SystemFolders,
) -> impl Iterator<Item = ApplicationRecord> + 'a
where
    I: IntoIterator<Item = UninstallEntry>,
    I::IntoIter: 'a,
{
    entries
        .into_iter()
        .filter_map(move |entry| filter_entry(&entry, folders))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<UninstallEntry>),
    One(UninstallEntry),
}

/// Load uninstall entries from a JSON export.
///
/// Accepts an array or a single object, with or without a UTF-8 BOM.
pub fn load_uninstall_entries(path: &Path) -> Result<Vec<UninstallEntry>> {
    let content = fs::read_to_string(path)?;
    let content = content.trim_start_matches('\u{feff}');
    let entries = match serde_json::from_str::<OneOrMany>(content)? {
        OneOrMany::Many(entries) => entries,
        OneOrMany::One(entry) => vec![entry],
    };
    info!(
        "Loaded {} uninstall entries from {}",
        entries.len(),
        path.display()
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folders() -> SystemFolders {
        SystemFolders::default()
    }

    #[test]
    fn test_plain_application_kept_and_trimmed() {
        let entry = UninstallEntry {
            display_name: Some("  VLC media player ".to_string()),
            display_version: Some("3.0.20 ".to_string()),
            install_location: Some(r"C:\Program Files\VideoLAN\VLC".to_string()),
            ..Default::default()
        };
        let record = filter_entry(&entry, &folders()).unwrap();
        assert_eq!(record.name, "VLC media player");
        assert_eq!(record.version, "3.0.20");
        assert_eq!(record.install_location, r"C:\Program Files\VideoLAN\VLC");
    }

    #[test]
    fn test_registry_flags_drop_entries() {
        let f = folders();
        let mut component = UninstallEntry::named("Some Component");
        component.system_component = Some(1);
        assert_eq!(skip_reason(&component, &f), Some(SkipReason::SystemComponent));

        let mut update = UninstallEntry::named("Office Fix");
        update.release_type = Some("Security Update".to_string());
        assert_eq!(skip_reason(&update, &f), Some(SkipReason::Update));

        let mut child = UninstallEntry::named("Child");
        child.parent_key_name = Some("OfficeSuite".to_string());
        assert_eq!(skip_reason(&child, &f), Some(SkipReason::ChildComponent));

        assert_eq!(
            skip_reason(&UninstallEntry::default(), &f),
            Some(SkipReason::NoDisplayName)
        );
    }

    #[test]
    fn test_kb_hotfix_heuristic() {
        assert!(is_kb_hotfix("KB5034441"));
        assert!(is_kb_hotfix("KB123456 rollup"));
        assert!(!is_kb_hotfix("KB12"));
        assert!(!is_kb_hotfix("KBackup Tool"));
        assert!(!is_kb_hotfix("kb5034441"));
    }

    #[test]
    fn test_keywords_need_missing_location() {
        let f = folders();
        let driver = UninstallEntry::named("Realtek Audio Driver");
        assert_eq!(skip_reason(&driver, &f), Some(SkipReason::NonApplication));

        let located = UninstallEntry::named("Realtek Audio Driver")
            .with_location(r"C:\Program Files\Realtek");
        assert_eq!(skip_reason(&located, &f), None);
    }

    #[test]
    fn test_system_folder_rule() {
        let f = folders();
        let sys = UninstallEntry::named("Internal Tool").with_location(r"C:\Windows\System32\tool");
        assert_eq!(skip_reason(&sys, &f), Some(SkipReason::SystemFolder));

        let python = UninstallEntry::named("Python 3.12").with_location(r"C:\Windows\py");
        assert_eq!(skip_reason(&python, &f), None);
    }

    #[test]
    fn test_generic_names_without_location() {
        let f = folders();
        assert_eq!(
            skip_reason(&UninstallEntry::named("Windows"), &f),
            Some(SkipReason::GenericName)
        );
        let located = UninstallEntry::named("Host Process").with_location(r"D:\Apps\host");
        assert_eq!(skip_reason(&located, &f), None);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let entries = vec![
            UninstallEntry::named("Firefox"),
            UninstallEntry::named("Firefox"),
        ];
        let f = folders();
        assert_eq!(filter_entries(entries, &f).count(), 2);
    }

    #[test]
    fn test_load_array_and_single_object() {
        let dir = tempfile::tempdir().unwrap();
        let many = dir.path().join("many.json");
        fs::write(
            &many,
            "\u{feff}[{\"DisplayName\":\"GIMP 2.10\",\"DisplayVersion\":\"2.10\",\"PSPath\":\"x\"},{\"DisplayName\":null,\"SystemComponent\":1}]",
        )
        .unwrap();
        let entries = load_uninstall_entries(&many).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].display_name.as_deref(), Some("GIMP 2.10"));
        assert_eq!(entries[1].system_component, Some(1));

        let one = dir.path().join("one.json");
        fs::write(&one, "{\"DisplayName\":\"Steam\"}").unwrap();
        assert_eq!(load_uninstall_entries(&one).unwrap().len(), 1);
    }
}
