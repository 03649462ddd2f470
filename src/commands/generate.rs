// src/commands/generate.rs

//! Migration script generation
//!
//! Loads a settings file, optionally packs the selected items into an
//! archive, then writes the migration script and prints how to run it on
//! the target machine.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use lunx::discovery;
use lunx::script::{self, STAGING_DIR};
use lunx::settings;
use lunx::{ArchivePlan, DataItem, ItemKind};

use super::settings::load;

/// Options for `lunx generate`
pub struct GenerateOptions {
    pub settings: PathBuf,
    pub output: Option<PathBuf>,
    pub archive_output: Option<PathBuf>,
    pub profile: Option<PathBuf>,
    pub skip_archive: bool,
}

/// Generate the migration script described by a settings file
pub fn cmd_generate(opts: GenerateOptions) -> Result<()> {
    let settings = load(&opts.settings)?;
    if settings.is_empty_selection() {
        return Err(anyhow::anyhow!(
            "Nothing to migrate: no items and no applications with equivalents are selected in {}",
            opts.settings.display()
        ));
    }

    let mut config = settings.migration_config();
    let items = match &opts.profile {
        Some(profile) => settings.data_items_under(profile),
        None => settings.data_items(),
    };
    let app_lists = settings.app_candidate_lists();

    for item in items.iter().filter(|i| i.kind == ItemKind::Other) {
        if !item.has_name() {
            warn!("Selected item {} is a filesystem root; the script will skip it", item.path);
            continue;
        }
        warn!(
            "Selected item not found: {} (the script will skip it; use --profile to point at the source profile)",
            item.path
        );
    }

    script::validate(&items, &config)?;

    let output = opts.output.unwrap_or_else(settings::default_script_path);
    let mut archive_created = None;

    if config.use_archive {
        if opts.skip_archive {
            info!("Skipping archive creation; the script expects {}", config.archive_name);
        } else {
            let archive_path = opts.archive_output.unwrap_or_else(|| {
                output
                    .parent()
                    .unwrap_or_else(|| Path::new("."))
                    .join(&config.archive_name)
            });
            let profile = archive_base(opts.profile.as_deref(), &settings.windows_user);
            let existing: Vec<DataItem> = items
                .iter()
                .filter(|i| i.kind != ItemKind::Other)
                .cloned()
                .collect();
            if existing.is_empty() {
                return Err(anyhow::anyhow!(
                    "None of the selected items exist here; cannot create the archive"
                ));
            }

            let plan = ArchivePlan::new(&archive_path, &existing, profile.as_deref());
            println!("Creating archive {} ...", archive_path.display());
            plan.run().context("Archive creation failed")?;
            config.archive_name = plan.file_name();
            archive_created = Some(archive_path);
        }
    }

    let content = script::synthesize(&items, &app_lists, &config)?;
    write_script(&output, &content)?;
    println!("Migration script saved to {}", output.display());

    match &archive_created {
        Some(path) => println!(
            "The script expects the archive '{}' in the same directory (created at {}).",
            config.archive_name,
            path.display()
        ),
        None if config.use_archive => println!(
            "The script expects the archive '{}' in the same directory.",
            config.archive_name
        ),
        None => {}
    }

    print_instructions(&output, &config.archive_name, config.use_archive, !items.is_empty());
    Ok(())
}

/// Profile directory used to store archive members relative to it
fn archive_base(profile: Option<&Path>, windows_user: &str) -> Option<PathBuf> {
    if let Some(profile) = profile {
        return Some(profile.to_path_buf());
    }
    let user = Some(windows_user).filter(|u| !u.trim().is_empty());
    match discovery::resolve_profile(user) {
        Ok(profile) => Some(profile),
        Err(e) => {
            warn!("Could not determine the Windows profile ({}); archive will use absolute paths", e);
            None
        }
    }
}

/// Write the script with LF line endings, executable on Unix
fn write_script(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o755)) {
            warn!("Could not make {} executable: {}", path.display(), e);
        }
    }

    info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

fn print_instructions(script: &Path, archive_name: &str, use_archive: bool, has_items: bool) {
    let name = script
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| settings::DEFAULT_SCRIPT_FILE.to_string());
    let staging = STAGING_DIR.trim_start_matches("./");

    println!();
    println!("To use the generated script on your Linux system:");
    if use_archive && has_items {
        println!("  1. Copy {} and {} to the Linux machine, e.g. into a new empty folder.", name, archive_name);
    } else {
        println!("  1. Copy {} to the Linux machine, e.g. into a new empty folder.", name);
    }
    if !use_archive && has_items {
        println!("  2. Next to the script, create a directory named {}", staging);
        println!("     and copy the selected Windows folders into it, keeping their names.");
    } else {
        println!("  2. No staging directory is needed.");
    }
    println!("  3. Open a terminal in that folder.");
    println!("  4. Make the script executable if needed: chmod +x {}", name);
    println!("  5. Run it as a normal user (sudo is used when needed): ./{}", name);
    println!("  6. Follow the prompts. Review the script before running it.");
}
