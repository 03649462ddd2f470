// tests/synthesis.rs

//! Integration tests for migration script synthesis.
//!
//! These tests check the observable structure of generated scripts: stage
//! order, fatal versus tolerated commands, and the exact commands emitted
//! for a typical direct-copy migration.

mod common;

use common::{alice_config, desktop, fixed_time, lists, without_date};
use lunx::script::synthesize_at;
use lunx::{ConfigurationError, DataItem, ItemKind, MigrationConfig, synthesize};

#[test]
fn test_end_to_end_direct_copy() {
    let script = synthesize_at(&desktop(), &lists(&[&["vlc", "mpv"]]), &alice_config(), fixed_time())
        .unwrap();

    assert!(script.starts_with("#!/bin/bash\n"));
    assert!(script.contains("TARGET_LINUX_USER=\"alice\""));
    assert!(script.contains("TARGET_HOME=\"/home/alice\""));
    assert!(script.contains("MIGRATED_DATA_DIR=\"$TARGET_HOME/migrated_windows_data\""));
    assert!(script.contains(
        "$SUDO_CMD rsync -aAX --info=progress2 --no-inc-recursive \"$SOURCE_BASE_DIR/Desktop/\" \"$MIGRATED_DATA_DIR/Desktop/\""
    ));
    assert!(script.contains("$SUDO_CMD apt update || warn"));
    assert!(script.contains("for PKG in \"vlc\" \"mpv\"; do"));
    assert!(script.contains("if $SUDO_CMD apt install -y \"$PKG\"; then"));
    assert!(script.contains(
        "$SUDO_CMD chown -R \"$TARGET_LINUX_USER:$TARGET_GROUP\" \"$MIGRATED_DATA_DIR\""
    ));
    assert!(script.contains("$SUDO_CMD chmod -R u+rwX,go=rX \"$MIGRATED_DATA_DIR\""));
    assert!(script.trim_end().ends_with("exit 0"));
}

#[test]
fn test_synthesis_is_deterministic_apart_from_date() {
    let items = vec![
        DataItem::directory("Documents"),
        DataItem::file("notes.txt"),
    ];
    let apps = lists(&[&["gimp", "krita"], &["vlc"]]);
    let config = alice_config();

    let first = synthesize(&items, &apps, &config).unwrap();
    let second = synthesize(&items, &apps, &config).unwrap();
    assert_eq!(without_date(&first), without_date(&second));

    let pinned_a = synthesize_at(&items, &apps, &config, fixed_time()).unwrap();
    let pinned_b = synthesize_at(&items, &apps, &config, fixed_time()).unwrap();
    assert_eq!(pinned_a, pinned_b);
}

#[test]
fn test_archive_mode_configuration_errors() {
    let config = MigrationConfig {
        use_archive: true,
        ..alice_config()
    };
    assert_eq!(
        synthesize(&[], &[], &config).unwrap_err(),
        ConfigurationError::ArchiveWithoutItems
    );

    let config = MigrationConfig {
        use_archive: true,
        archive_name: String::new(),
        ..alice_config()
    };
    assert_eq!(
        synthesize(&desktop(), &[], &config).unwrap_err(),
        ConfigurationError::EmptyArchiveName
    );
}

#[test]
fn test_missing_source_only_warns() {
    let items = vec![DataItem::directory("Saved Games")];
    let script = synthesize_at(&items, &[], &alice_config(), fixed_time()).unwrap();

    let warning = script
        .lines()
        .find(|line| line.contains("warn \"Source") && line.contains("Saved Games"))
        .expect("missing-source warning");
    assert!(warning.contains("Skipping Saved Games"));

    // The only exits are the confirmation decline and the final exit
    for line in script.lines().filter(|l| l.contains("exit 1")) {
        assert!(!line.contains("Saved Games"), "fatal exit for item: {}", line);
    }
}

#[test]
fn test_no_carriage_returns() {
    let items = vec![DataItem::directory("Docs\r\nwith break")];
    let config = MigrationConfig {
        linux_user: "ali\rce".to_string(),
        ..alice_config()
    };
    let apps = lists(&[&["pkg\r\none"]]);
    let script = synthesize_at(&items, &apps, &config, fixed_time()).unwrap();
    assert!(!script.contains('\r'));
    assert!(script.contains("TARGET_LINUX_USER=\"ali ce\""));
}

#[test]
fn test_fatal_commands_limited_to_resolution_and_archive() {
    let config = MigrationConfig {
        use_archive: true,
        linux_user: String::new(),
        ..alice_config()
    };
    let script = synthesize_at(&desktop(), &lists(&[&["vlc"]]), &config, fixed_time()).unwrap();

    let stage_two = script.find("[2/3]").unwrap();
    let after_extraction = &script[stage_two..];
    assert!(!after_extraction.contains("die "));
    assert!(!after_extraction.contains("exit 1"));

    assert!(script.contains("|| die \"Archive extraction failed.\""));
    assert!(script.contains("TARGET_LINUX_USER=\"$(whoami)\""));
}

#[test]
fn test_partial_inputs_are_accepted() {
    let items = vec![
        DataItem::directory("Desktop"),
        DataItem::new("Links", ItemKind::Other, false),
    ];
    let script = synthesize_at(&items, &[], &alice_config(), fixed_time()).unwrap();
    assert!(script.contains("Processing item Desktop (1/2)"));
    assert!(script.contains("Processing item Links (2/2)"));
    assert!(script.contains("No applications selected for installation."));
}

#[test]
fn test_unrecognized_manager_used_verbatim() {
    let config = MigrationConfig {
        package_manager_spec: "xbps-install -Sy".to_string(),
        ..alice_config()
    };
    let script = synthesize_at(&[], &lists(&[&["firefox"]]), &config, fixed_time()).unwrap();
    assert!(script.contains("if $SUDO_CMD xbps-install -Sy \"$PKG\"; then"));
}
