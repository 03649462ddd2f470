// src/discovery/profile.rs

//! Source profile resolution and standard user folder listing

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::migration::DataItem;
use crate::{Error, Result};

/// Standard profile folders offered for migration, in display order
pub const STANDARD_FOLDERS: &[&str] = &[
    "Desktop",
    "Documents",
    "Downloads",
    "Pictures",
    "Music",
    "Videos",
    "AppData",
    "Favorites",
    "Links",
    "Contacts",
    "Saved Games",
    "Searches",
];

/// Root of per-user profiles on the source system
const USERS_ROOT: &str = "C:/Users";

/// Resolve the source profile directory from the process environment.
///
/// See [`resolve_profile_with`] for the lookup order.
pub fn resolve_profile(username: Option<&str>) -> Result<PathBuf> {
    resolve_profile_with(username, |key| std::env::var(key).ok())
}

/// Resolve the source profile directory using `env` for variable lookup.
///
/// An explicit username maps to `C:/Users/<username>`. Otherwise
/// `USERPROFILE` is used, then `HOMEDRIVE` joined with `HOMEPATH`. The
/// resolved directory must exist.
pub fn resolve_profile_with<F>(username: Option<&str>, env: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    let candidate = match username.map(str::trim).filter(|u| !u.is_empty()) {
        Some(user) => PathBuf::from(format!("{}/{}", USERS_ROOT, user)),
        None => match non_empty("USERPROFILE") {
            Some(profile) => PathBuf::from(profile),
            None => match (non_empty("HOMEDRIVE"), non_empty("HOMEPATH")) {
                (Some(drive), Some(path)) => PathBuf::from(format!("{}{}", drive, path)),
                _ => {
                    return Err(Error::NotFound(
                        "could not determine the user profile directory".to_string(),
                    ));
                }
            },
        },
    };

    if !candidate.is_dir() {
        return Err(Error::NotFound(format!(
            "user profile path not found: {}",
            candidate.display()
        )));
    }

    debug!("Resolved source profile: {}", candidate.display());
    Ok(candidate)
}

/// Lazily yield the standard folders that exist under `profile`
pub fn list_user_items(profile: PathBuf) -> impl Iterator<Item = DataItem> {
    STANDARD_FOLDERS.iter().filter_map(move |folder| {
        let path = profile.join(folder);
        // symlink_metadata so dangling links are still offered
        if path.symlink_metadata().is_ok() {
            Some(DataItem::from_path(&path))
        } else {
            debug!("Skipping missing folder: {}", path.display());
            None
        }
    })
}

/// Total size in bytes of the regular files at or below `path`.
///
/// Symlinks are counted as links, not followed. Entries that cannot be
/// read are skipped.
pub fn item_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .follow_root_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.metadata().ok())
        .filter(|meta| meta.is_file())
        .map(|meta| meta.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::ItemKind;
    use std::collections::HashMap;
    use std::fs;

    fn env_from(pairs: &[(&str, String)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_userprofile_used_first() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().to_string_lossy().to_string();
        let env = env_from(&[
            ("USERPROFILE", profile.clone()),
            ("HOMEDRIVE", "Z:".to_string()),
            ("HOMEPATH", "/nowhere".to_string()),
        ]);
        assert_eq!(resolve_profile_with(None, env).unwrap(), PathBuf::from(profile));
    }

    #[test]
    fn test_homedrive_homepath_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_from(&[
            ("USERPROFILE", "  ".to_string()),
            ("HOMEDRIVE", String::new()),
            ("HOMEPATH", dir.path().to_string_lossy().to_string()),
        ]);
        // Empty HOMEDRIVE counts as unset
        assert!(matches!(resolve_profile_with(None, env), Err(Error::NotFound(_))));

        let env = env_from(&[
            ("HOMEDRIVE", dir.path().to_string_lossy().to_string()),
            ("HOMEPATH", "/".to_string()),
        ]);
        assert!(resolve_profile_with(None, env).is_ok());
    }

    #[test]
    fn test_nothing_set_is_not_found() {
        let result = resolve_profile_with(None, |_| None);
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let result = resolve_profile_with(Some("no-such-user-lunx"), |_| None);
        match result {
            Err(Error::NotFound(msg)) => assert!(msg.contains("C:/Users/no-such-user-lunx")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_list_user_items_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Music")).unwrap();
        fs::create_dir(dir.path().join("Desktop")).unwrap();
        fs::create_dir(dir.path().join("Saved Games")).unwrap();
        fs::create_dir(dir.path().join("NotStandard")).unwrap();
        fs::write(dir.path().join("Links"), b"not a folder").unwrap();

        let items: Vec<DataItem> = list_user_items(dir.path().to_path_buf()).collect();
        let names: Vec<&str> = items.iter().map(DataItem::name).collect();
        assert_eq!(names, vec!["Desktop", "Music", "Links", "Saved Games"]);
        assert_eq!(items[2].kind, ItemKind::File);
    }

    #[test]
    fn test_item_size_sums_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("Documents");
        fs::create_dir_all(docs.join("Taxes")).unwrap();
        fs::write(docs.join("a.txt"), b"hello").unwrap();
        fs::write(docs.join("Taxes/2023.pdf"), vec![0u8; 1000]).unwrap();

        assert_eq!(item_size(&docs), 1005);
        assert_eq!(item_size(&docs.join("a.txt")), 5);
        assert_eq!(item_size(&dir.path().join("Missing")), 0);
    }
}
