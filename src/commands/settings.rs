// src/commands/settings.rs

//! Settings file commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use lunx::settings::{self, Settings};

fn settings_path(path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(settings::default_settings_path)
}

/// Write a settings file with default values
pub fn cmd_settings_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = settings_path(path);
    if path.exists() && !force {
        return Err(anyhow::anyhow!(
            "Settings file already exists: {} (use --force to overwrite)",
            path.display()
        ));
    }

    Settings::default()
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}

/// Print the effective configuration of a settings file
pub fn cmd_settings_show(path: Option<PathBuf>) -> Result<()> {
    let path = settings_path(path);
    let settings = load(&path)?;
    let config = settings.migration_config();

    println!("Settings: {}", path.display());
    println!(
        "  Windows user:         {}",
        display_or(&settings.windows_user, "(current user)")
    );
    println!(
        "  Linux user:           {}",
        display_or(&config.linux_user, "(user running the script)")
    );
    println!(
        "  Package manager:      {}",
        display_or(&config.package_manager_spec, "(none, installation skipped)")
    );
    println!("  Copy full folders:    {}", config.copy_full);
    if config.use_archive {
        println!("  Archive:              {}", config.archive_name);
    } else {
        println!("  Archive:              off (direct copy)");
    }
    println!("  Preserve permissions: {}", config.preserve_permissions);
    println!("  Copy symlinks:        {}", config.copy_symlinks);
    println!("  Fix paths:            {}", config.fix_paths);

    println!();
    println!("Selected items ({}):", settings.selected_folders_paths.len());
    for path in &settings.selected_folders_paths {
        println!("  {}", path);
    }

    println!();
    println!("Selected applications ({}):", settings.selected_apps_details.len());
    for app in &settings.selected_apps_details {
        let candidates = app.candidates();
        let suggestion = if candidates.is_empty() {
            "no known equivalent".to_string()
        } else {
            candidates.join(", ")
        };
        println!("  {} -> {}", app.name, suggestion);
    }
    Ok(())
}

pub(crate) fn load(path: &Path) -> Result<Settings> {
    Settings::load(path).with_context(|| format!("Failed to load settings from {}", path.display()))
}

fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}
