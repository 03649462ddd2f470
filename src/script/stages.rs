// src/script/stages.rs

//! Stage emitters for the migration script
//!
//! Each function appends one stage to a [`ScriptBuilder`]. Only target
//! resolution and archive discovery/extraction use `die`; every other
//! command is wrapped with `tolerate` so a failure prints a warning and the
//! script carries on.

use super::builder::{ScriptBuilder, escape, quote};
use super::package_manager::PackageManagerCommands;
use super::rsync::RsyncFlags;
use super::{MIGRATION_SUBDIR, STAGING_DIR};
use crate::migration::{DataItem, ItemKind, MigrationConfig};

/// Candidate entries treated as "no suggestion"
const PLACEHOLDER_CANDIDATES: &[&str] = &["-"];

/// Script preamble: shebang, header comments and shell options
pub(crate) fn emit_header(b: &mut ScriptBuilder, generated_at: &str) {
    b.line("#!/bin/bash");
    b.comment("----------------------------------------");
    b.comment("Windows to Linux Migration Script");
    b.comment(format!("Generated by lunx {}", env!("CARGO_PKG_VERSION")));
    b.comment(format!("Date: {}", generated_at));
    b.comment("This script is intended to be run on the target Linux system.");
    b.comment("Review this script carefully before execution.");
    b.comment("----------------------------------------");
    b.blank();
    b.line("set -uo pipefail");
    b.blank();
}

/// Warning and fatal-error helpers plus runtime counters
pub(crate) fn emit_helpers(b: &mut ScriptBuilder) {
    b.line("warn() {");
    b.line("  echo \"Warning: $*\"");
    b.line("}");
    b.blank();
    b.line("die() {");
    b.line("  echo \"ERROR: $*\"");
    b.line("  exit 1");
    b.line("}");
    b.blank();
    b.line("PACKAGES_INSTALLED=0");
    b.blank();
}

/// Stage 0: resolve the target user, privilege helper and home directory
pub(crate) fn emit_target_resolution(b: &mut ScriptBuilder, config: &MigrationConfig) {
    b.separator();
    b.line("echo 'Starting Windows to Linux migration process'");
    b.separator();
    b.blank();

    b.comment("Determine target Linux user");
    let configured_user = config.linux_user.trim();
    if configured_user.is_empty() {
        b.line("TARGET_LINUX_USER=\"$(whoami)\"");
        b.echo("No specific Linux user provided, using current user: $TARGET_LINUX_USER");
        b.if_block("[ \"$TARGET_LINUX_USER\" = \"root\" ]", |b| {
            b.line("INPUT_USER=\"\"");
            b.line(
                "read -r -p \"Running as root. Enter target non-root username for data migration (e.g., 'myuser'): \" INPUT_USER",
            );
            b.if_block("[ -z \"$INPUT_USER\" ]", |b| {
                b.die("No target username provided when running as root. Aborting.");
            });
            b.line("TARGET_LINUX_USER=\"$INPUT_USER\"");
        });
    } else {
        b.line(format!("TARGET_LINUX_USER={}", quote(configured_user)));
        b.echo("Target Linux user specified: $TARGET_LINUX_USER");
    }
    b.blank();

    b.comment("Privileged operations go through sudo unless already root");
    b.line("SUDO_CMD=\"\"");
    b.if_block("[ \"$(id -u)\" -ne 0 ]", |b| {
        b.echo("INFO: This script is not running as root. sudo will be used for privileged operations.");
        b.if_else(
            "command -v sudo >/dev/null 2>&1",
            |b| {
                b.line("SUDO_CMD=\"sudo\"");
            },
            |b| {
                b.warn("sudo command not found, but script is not root. Privileged operations might fail.");
            },
        );
    });
    b.blank();

    b.line("TARGET_GROUP=\"$(id -gn \"$TARGET_LINUX_USER\" 2>/dev/null || echo \"$TARGET_LINUX_USER\")\"");
    match configured_user {
        "" => {
            b.if_else(
                "[ \"$TARGET_LINUX_USER\" = \"root\" ]",
                |b| {
                    b.line("TARGET_HOME=\"/root\"");
                },
                |b| {
                    b.line("TARGET_HOME=\"/home/$TARGET_LINUX_USER\"");
                },
            );
        }
        "root" => {
            b.line("TARGET_HOME=\"/root\"");
        }
        user => {
            b.line(format!("TARGET_HOME={}", quote(&format!("/home/{}", user))));
        }
    }
    b.if_block("[ ! -d \"$TARGET_HOME\" ]", |b| {
        b.warn("Target home directory $TARGET_HOME does not exist.");
        b.line("CREATE_HOME_CONFIRM=\"\"");
        b.line("read -r -p \"Create $TARGET_HOME now? (yes/no): \" CREATE_HOME_CONFIRM");
        b.if_else(
            "[ \"$CREATE_HOME_CONFIRM\" = \"yes\" ]",
            |b| {
                b.if_else(
                    "[ \"$(id -u)\" -eq 0 ] || [ -n \"$SUDO_CMD\" ]",
                    |b| {
                        b.require(
                            "$SUDO_CMD mkdir -p \"$TARGET_HOME\"",
                            "Could not create $TARGET_HOME.",
                        );
                        b.tolerate(
                            "$SUDO_CMD chown \"$TARGET_LINUX_USER:$TARGET_GROUP\" \"$TARGET_HOME\"",
                            "Could not chown $TARGET_HOME",
                        );
                        b.echo("Created $TARGET_HOME.");
                    },
                    |b| {
                        b.die("Please create $TARGET_HOME manually or run this script as root to create it.");
                    },
                );
            },
            |b| {
                b.die("Aborting as target home directory does not exist.");
            },
        );
    });
    b.blank();

    b.line(format!("MIGRATED_DATA_DIR=\"$TARGET_HOME/{}\"", escape(MIGRATION_SUBDIR)));
    b.blank();
    b.echo("Target Linux user: $TARGET_LINUX_USER");
    b.echo("Target home directory: $TARGET_HOME");
    b.echo("Migrated data will be placed in: $MIGRATED_DATA_DIR");
    b.blank();
}

/// Confirmation gate before any destructive stage; declining exits with 0
pub(crate) fn emit_confirmation(b: &mut ScriptBuilder) {
    b.line("CONFIRM=\"\"");
    b.line("read -r -p \"Do you want to proceed with the migration to $TARGET_LINUX_USER's home? (yes/no): \" CONFIRM");
    b.if_block(
        "[[ \"$CONFIRM\" != \"yes\" && \"$CONFIRM\" != \"YES\" && \"$CONFIRM\" != \"y\" && \"$CONFIRM\" != \"Y\" ]]",
        |b| {
            b.echo("Migration aborted by user.");
            b.line("exit 0");
        },
    );
    b.blank();
}

/// Stage 1, archive mode: locate and extract the archive (fatal on failure)
pub(crate) fn emit_archive_extraction(b: &mut ScriptBuilder, items: &[DataItem], archive_name: &str) {
    let name = escape(archive_name.trim());

    b.line("echo '[1/3] Preparing to extract archive...'");
    let names: Vec<&str> = items.iter().map(DataItem::name).collect();
    b.comment(format!("Archive contents: {}", names.join(", ")));
    b.line(format!("ARCHIVE_FILE_PATH=\"./{}\"", name));
    b.if_block("[ ! -f \"$ARCHIVE_FILE_PATH\" ]", |b| {
        b.echo("ERROR: Archive '$ARCHIVE_FILE_PATH' not found in the current directory.");
        b.echo("Please place it alongside this script or provide the full path if it's elsewhere.");
        b.line("ARCHIVE_FILE_PATH_INPUT=\"\"");
        b.line(format!(
            "read -r -e -p \"Enter full path to '{}' (or press Enter to abort): \" ARCHIVE_FILE_PATH_INPUT",
            name
        ));
        b.if_block(
            "[ -z \"$ARCHIVE_FILE_PATH_INPUT\" ] || [ ! -f \"$ARCHIVE_FILE_PATH_INPUT\" ]",
            |b| {
                b.die("Archive not found at specified path or input aborted. Aborting migration.");
            },
        );
        b.line("ARCHIVE_FILE_PATH=\"$ARCHIVE_FILE_PATH_INPUT\"");
    });
    b.echo("Creating migration directory: $MIGRATED_DATA_DIR");
    b.require(
        "$SUDO_CMD mkdir -p \"$MIGRATED_DATA_DIR\"",
        "Could not create $MIGRATED_DATA_DIR.",
    );
    b.echo("Extracting archive '$ARCHIVE_FILE_PATH' to '$MIGRATED_DATA_DIR'...");
    b.require(
        "$SUDO_CMD tar -xvf \"$ARCHIVE_FILE_PATH\" -C \"$MIGRATED_DATA_DIR\"",
        "Archive extraction failed.",
    );
    b.echo("Archive extracted successfully.");
}

/// Stage 1, direct-copy mode: copy each item from the staging directory
pub(crate) fn emit_direct_copy(b: &mut ScriptBuilder, items: &[DataItem], config: &MigrationConfig) {
    b.line("echo '[1/3] Preparing for direct data copy (rsync)...'");
    b.comment("Selected folders are expected in the staging directory next to this script.");
    b.line(format!("SOURCE_BASE_DIR={}", quote(STAGING_DIR)));
    b.echo("Data will be copied from: $SOURCE_BASE_DIR (relative to script location)");
    b.echo("Target for copied data: $MIGRATED_DATA_DIR");
    b.tolerate(
        "$SUDO_CMD mkdir -p \"$MIGRATED_DATA_DIR\"",
        "Could not create $MIGRATED_DATA_DIR.",
    );

    if items.is_empty() {
        b.echo("No specific items selected for direct copy. If you have data, ensure it's in '$MIGRATED_DATA_DIR' or '$SOURCE_BASE_DIR' for manual handling.");
        return;
    }

    b.echo("Copying selected items from '$SOURCE_BASE_DIR' to '$MIGRATED_DATA_DIR'...");
    b.if_block("[ ! -d \"$SOURCE_BASE_DIR\" ]", |b| {
        b.warn("Source data directory '$SOURCE_BASE_DIR' not found. Create it and place your Windows folders (Desktop, Documents, etc.) inside it.");
    });
    b.if_block("! command -v rsync >/dev/null 2>&1", |b| {
        b.warn("rsync is not installed. Copying data will fail until it is installed.");
    });

    let total = items.len();
    for (index, item) in items.iter().enumerate() {
        emit_copy_item(b, item, index + 1, total, config);
    }
}

fn emit_copy_item(
    b: &mut ScriptBuilder,
    item: &DataItem,
    position: usize,
    total: usize,
    config: &MigrationConfig,
) {
    let name = escape(item.name());
    let src = format!("$SOURCE_BASE_DIR/{}", name);
    let dst = format!("$MIGRATED_DATA_DIR/{}", name);
    let flags = RsyncFlags::for_item(item, config).render();

    b.echo(format!("Processing item {} ({}/{})", name, position, total));
    if !item.has_name() {
        b.warn(format!(
            "Skipping '{}' (a filesystem root cannot be migrated as a single item).",
            escape(&item.path)
        ));
        return;
    }
    b.if_else(
        format!("[ -e \"{src}\" ] || [ -L \"{src}\" ]"),
        |b| match (item.kind, config.copy_full) {
            (ItemKind::Directory, true) => {
                b.echo(format!("Copying directory contents: '{src}/' to '{dst}/'"));
                b.tolerate(
                    format!("$SUDO_CMD mkdir -p \"{dst}\""),
                    format!("Could not create '{dst}'."),
                );
                b.tolerate(
                    format!(
                        "$SUDO_CMD rsync {flags} --info=progress2 --no-inc-recursive \"{src}/\" \"{dst}/\""
                    ),
                    format!("rsync failed for {name}. Check permissions and paths."),
                );
            }
            (ItemKind::Directory, false) => {
                b.echo(format!(
                    "Creating directory structure for: '{dst}' (full copy not selected)"
                ));
                b.tolerate(
                    format!("$SUDO_CMD mkdir -p \"{dst}\""),
                    format!("Could not create '{dst}'."),
                );
            }
            (ItemKind::File, _) => {
                b.echo(format!("Copying file: '{src}' to '{dst}'"));
                b.tolerate(
                    format!("$SUDO_CMD mkdir -p \"$(dirname \"{dst}\")\""),
                    format!("Could not create the parent directory of '{dst}'."),
                );
                b.tolerate(
                    format!("$SUDO_CMD rsync {flags} --info=progress2 \"{src}\" \"{dst}\""),
                    format!("rsync failed for {name}."),
                );
            }
            (ItemKind::Other, _) => {
                b.warn(format!(
                    "Skipping '{name}' (not a file or directory when this script was generated)."
                ));
            }
        },
        |b| {
            b.warn(format!(
                "Source '{src}' not found. Please ensure it exists in '$SOURCE_BASE_DIR'. Skipping {name}."
            ));
        },
    );
}

/// End of stage 1: hand the migration subdirectory to the target user
pub(crate) fn emit_permission_repair(b: &mut ScriptBuilder) {
    b.blank();
    b.separator();
    b.line("echo 'Setting final permissions for migrated data...'");
    b.tolerate(
        "$SUDO_CMD chown -R \"$TARGET_LINUX_USER:$TARGET_GROUP\" \"$MIGRATED_DATA_DIR\"",
        "Failed to change ownership of migrated data. Please check permissions manually.",
    );
    b.tolerate(
        "$SUDO_CMD chmod -R u+rwX,go=rX \"$MIGRATED_DATA_DIR\"",
        "Failed to set basic permissions (u=rwX,go=rX) on migrated data.",
    );
    b.line("echo 'Permissions set for migrated data directory.'");
    b.blank();
}

/// Candidates with blanks and placeholders removed
pub(crate) fn clean_candidates(candidates: &[String]) -> Vec<&str> {
    candidates
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty() && !PLACEHOLDER_CANDIDATES.contains(c))
        .collect()
}

/// Stage 2: refresh package metadata, then try each candidate list in order
pub(crate) fn emit_installation(
    b: &mut ScriptBuilder,
    app_candidate_lists: &[Vec<String>],
    config: &MigrationConfig,
) {
    b.separator();

    if app_candidate_lists.is_empty() {
        b.line("echo '[2/3] No applications selected for installation.'");
        return;
    }

    let Some(commands) = PackageManagerCommands::from_spec(&config.package_manager_spec) else {
        b.line("echo '[2/3] No package manager configured. Skipping application installation.'");
        return;
    };

    b.line("echo '[2/3] Installing equivalent Linux applications...'");
    b.line("echo 'Attempting to update package lists... (may require sudo password)'");
    b.tolerate(
        format!("$SUDO_CMD {}", commands.update),
        "Failed to update package lists. Application installations might fail or install older versions.",
    );

    for candidates in app_candidate_lists {
        let original = escape(&candidates.join(", "));
        let cleaned = clean_candidates(candidates);
        if cleaned.is_empty() {
            b.echo(format!(
                "Skipping an application entry as no valid equivalents were provided: '{}'",
                original
            ));
            continue;
        }

        b.echo(format!(
            "Attempting to install an equivalent for: (Original suggestions: {})",
            original
        ));
        b.line("INSTALLED_PACKAGE=\"\"");
        b.for_each("PKG", &cleaned, |b| {
            b.echo("  Trying to install package: '$PKG'...");
            b.if_block(format!("$SUDO_CMD {} \"$PKG\"", commands.install), |b| {
                b.echo("  Successfully installed '$PKG'.");
                b.line("INSTALLED_PACKAGE=\"$PKG\"");
                b.line("break");
            });
            b.warn("Failed to install '$PKG'. Trying next alternative if available.");
        });
        b.if_else(
            "[ -n \"$INSTALLED_PACKAGE\" ]",
            |b| {
                b.line("PACKAGES_INSTALLED=$((PACKAGES_INSTALLED + 1))");
            },
            |b| {
                b.warn(format!(
                    "Could not install any of the suggested equivalents for this application set: {}. You may need to find and install them manually.",
                    original
                ));
            },
        );
    }
}

/// Stage 3: optional path-fixing placeholder and the final summary
pub(crate) fn emit_finalization(b: &mut ScriptBuilder, config: &MigrationConfig) {
    b.blank();
    b.separator();
    b.line("echo '[3/3] Finalizing migration...'");

    if config.fix_paths {
        b.line("echo 'Path fixing (experimental):'");
        b.comment("Rewriting Windows paths inside migrated files is not performed yet.");
        b.comment("It depends heavily on the applications and data being migrated.");
        b.comment("Example (review and test before enabling):");
        b.comment("  find \"$MIGRATED_DATA_DIR\" -type f -print0 | xargs -0 $SUDO_CMD sed -i \"s|C:/Users/<name>|$MIGRATED_DATA_DIR|gI\"");
        b.line("echo 'Path fixing is complex and usually requires manual review. This step is currently a placeholder.'");
    }

    b.line("echo ''");
    b.line("echo '----------------------------------------------------------------------'");
    b.line("echo 'Migration process finished!'");
    b.line("echo '----------------------------------------------------------------------'");
    b.echo("Your Windows data (if selected and copied/extracted) should be available at: $MIGRATED_DATA_DIR");
    b.echo("Installed applications (if selected) should be available in your Linux system's application menu.");
    b.echo("Please review the output above for any warnings or errors that may have occurred.");
    b.if_block("[ \"$PACKAGES_INSTALLED\" -gt 0 ]", |b| {
        b.echo("$PACKAGES_INSTALLED application(s) were installed. It is recommended to reboot your Linux system.");
    });
    b.line("echo '----------------------------------------------------------------------'");
    b.line("exit 0");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(emit: impl FnOnce(&mut ScriptBuilder)) -> String {
        let mut b = ScriptBuilder::new();
        emit(&mut b);
        b.build()
    }

    #[test]
    fn test_explicit_user_skips_root_prompt() {
        let config = MigrationConfig {
            linux_user: "alice".to_string(),
            ..Default::default()
        };
        let script = render(|b| emit_target_resolution(b, &config));
        assert!(script.contains("TARGET_LINUX_USER=\"alice\""));
        assert!(script.contains("TARGET_HOME=\"/home/alice\""));
        assert!(!script.contains("whoami"));
        assert!(!script.contains("INPUT_USER"));
        assert!(script.contains("MIGRATED_DATA_DIR=\"$TARGET_HOME/migrated_windows_data\""));
    }

    #[test]
    fn test_runtime_user_prompts_for_root() {
        let script = render(|b| emit_target_resolution(b, &MigrationConfig::default()));
        assert!(script.contains("TARGET_LINUX_USER=\"$(whoami)\""));
        assert!(script.contains("read -r -p \"Running as root."));
        assert!(script.contains("die \"No target username provided"));
    }

    #[test]
    fn test_user_value_is_escaped() {
        let config = MigrationConfig {
            linux_user: "bob\"; rm -rf /".to_string(),
            ..Default::default()
        };
        let script = render(|b| emit_target_resolution(b, &config));
        assert!(script.contains("TARGET_LINUX_USER=\"bob\\\"; rm -rf /\""));
    }

    #[test]
    fn test_confirmation_declines_with_success() {
        let script = render(emit_confirmation);
        assert!(script.contains("echo \"Migration aborted by user.\"\n  exit 0"));
    }

    #[test]
    fn test_archive_stage_is_fatal() {
        let items = vec![DataItem::directory("Desktop")];
        let script = render(|b| emit_archive_extraction(b, &items, "backup.tar.gz"));
        assert!(script.contains("ARCHIVE_FILE_PATH=\"./backup.tar.gz\""));
        assert!(script.contains("|| die \"Archive extraction failed.\""));
        assert!(script.contains("# Archive contents: Desktop"));
    }

    #[test]
    fn test_directory_without_full_copy_creates_placeholder() {
        let config = MigrationConfig {
            copy_full: false,
            ..Default::default()
        };
        let items = vec![DataItem::directory("Music")];
        let script = render(|b| emit_direct_copy(b, &items, &config));
        assert!(script.contains("$SUDO_CMD mkdir -p \"$MIGRATED_DATA_DIR/Music\""));
        assert!(!script.contains("rsync -"));
    }

    #[test]
    fn test_file_item_creates_parent() {
        let items = vec![DataItem::file(r"C:\Users\bob\todo.txt")];
        let script = render(|b| emit_direct_copy(b, &items, &MigrationConfig::default()));
        assert!(script.contains("mkdir -p \"$(dirname \"$MIGRATED_DATA_DIR/todo.txt\")\""));
        assert!(script.contains(
            "$SUDO_CMD rsync -aAX --info=progress2 \"$SOURCE_BASE_DIR/todo.txt\" \"$MIGRATED_DATA_DIR/todo.txt\""
        ));
    }

    #[test]
    fn test_vanished_item_is_skipped_with_warning() {
        let items = vec![DataItem::new("Links", ItemKind::Other, false)];
        let script = render(|b| emit_direct_copy(b, &items, &MigrationConfig::default()));
        assert!(script.contains("warn \"Skipping 'Links'"));
        assert!(!script.contains("die "));
    }

    #[test]
    fn test_root_item_never_copies_staging_dir() {
        let items = vec![DataItem::directory("/"), DataItem::directory(r"C:\")];
        let script = render(|b| emit_direct_copy(b, &items, &MigrationConfig::default()));
        assert!(script.contains("warn \"Skipping '/' (a filesystem root"));
        assert!(script.contains("warn \"Skipping 'C:\\\\' (a filesystem root"));
        assert!(!script.contains("\"$SOURCE_BASE_DIR/\""));
        assert!(!script.contains("rsync -"));
    }

    #[test]
    fn test_empty_candidate_lists_are_noted() {
        let lists = vec![vec!["-".to_string(), " ".to_string()]];
        let script = render(|b| emit_installation(b, &lists, &MigrationConfig::default()));
        assert!(script.contains("Skipping an application entry"));
        assert!(!script.contains("for PKG in"));
    }

    #[test]
    fn test_blank_package_manager_skips_stage() {
        let config = MigrationConfig {
            package_manager_spec: "  ".to_string(),
            ..Default::default()
        };
        let lists = vec![vec!["vlc".to_string()]];
        let script = render(|b| emit_installation(b, &lists, &config));
        assert!(script.contains("No package manager configured"));
        assert!(!script.contains("INSTALLED_PACKAGE"));
    }

    #[test]
    fn test_install_loop_breaks_on_success() {
        let config = MigrationConfig {
            package_manager_spec: "pacman -S".to_string(),
            ..Default::default()
        };
        let lists = vec![vec!["gimp".to_string(), "krita".to_string()]];
        let script = render(|b| emit_installation(b, &lists, &config));
        assert!(script.contains("$SUDO_CMD pacman -Syu --noconfirm || warn"));
        assert!(script.contains("for PKG in \"gimp\" \"krita\"; do"));
        assert!(script.contains("if $SUDO_CMD pacman -S --noconfirm --needed \"$PKG\"; then"));
        assert!(script.contains("    break\n"));
    }

    #[test]
    fn test_fix_paths_placeholder_only() {
        let config = MigrationConfig {
            fix_paths: true,
            ..Default::default()
        };
        let script = render(|b| emit_finalization(b, &config));
        assert!(script.contains("This step is currently a placeholder."));
        // The example command stays commented out
        assert!(script.lines().filter(|l| l.contains("sed -i")).all(|l| l.starts_with('#')));
        assert!(script.ends_with("exit 0\n"));
    }
}
