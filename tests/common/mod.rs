// tests/common/mod.rs

//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use lunx::{DataItem, MigrationConfig};

/// Fixed generation time so scripts compare byte for byte
pub fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Direct-copy configuration targeting `alice` with apt
pub fn alice_config() -> MigrationConfig {
    MigrationConfig {
        copy_full: true,
        linux_user: "alice".to_string(),
        package_manager_spec: "apt".to_string(),
        use_archive: false,
        preserve_permissions: true,
        copy_symlinks: true,
        fix_paths: false,
        ..Default::default()
    }
}

pub fn desktop() -> Vec<DataItem> {
    vec![DataItem::directory("Desktop")]
}

pub fn lists(lists: &[&[&str]]) -> Vec<Vec<String>> {
    lists
        .iter()
        .map(|l| l.iter().map(|s| s.to_string()).collect())
        .collect()
}

/// Script text without the `# Date:` line
pub fn without_date(script: &str) -> String {
    script
        .lines()
        .filter(|line| !line.starts_with("# Date:"))
        .collect::<Vec<_>>()
        .join("\n")
}
