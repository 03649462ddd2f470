// src/commands/scan.rs

//! Source system scan
//!
//! Enumerates the standard profile folders and the installed applications
//! on background workers and prints records as they arrive.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use lunx::discovery::{
    self, CancellationToken, Enumeration, EnumerationEvent, SystemFolders,
};
use lunx::{ApplicationRecord, DataItem, ItemKind};

/// Summary of one drained enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DrainSummary {
    /// Records handed to the caller
    shown: usize,
    /// Records remained when the enumeration stopped
    stopped_early: bool,
}

/// Consume a running enumeration, cancelling it after `max_items` records.
///
/// Records that were already queued when the limit was reached are
/// discarded and only mark the summary as stopped early.
fn drain<T>(
    run: Enumeration<T>,
    max_items: Option<usize>,
    mut on_record: impl FnMut(&T),
) -> Result<DrainSummary> {
    let mut shown = 0;
    let mut discarded = false;
    let mut worker_cancelled = false;

    for event in run.events.iter() {
        match event {
            EnumerationEvent::Discovered(record) => {
                if max_items.is_some_and(|max| shown >= max) {
                    discarded = true;
                    continue;
                }
                on_record(&record);
                shown += 1;
                if max_items.is_some_and(|max| shown >= max) {
                    run.token.cancel();
                }
            }
            EnumerationEvent::Finished { cancelled, .. } => {
                worker_cancelled = cancelled;
            }
            EnumerationEvent::Failed(message) => {
                return Err(anyhow::anyhow!(message));
            }
        }
    }

    run.join()?;
    Ok(DrainSummary {
        shown,
        stopped_early: discarded || worker_cancelled,
    })
}

fn kind_label(item: &DataItem) -> &'static str {
    match (item.kind, item.is_symlink) {
        (_, true) => "link",
        (ItemKind::Directory, false) => "dir",
        (ItemKind::File, false) => "file",
        (ItemKind::Other, false) => "other",
    }
}

fn stopped_note(stopped_early: bool) -> &'static str {
    if stopped_early { " (stopped early)" } else { "" }
}

/// Format bytes as a human-readable string
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Scan a source profile and, optionally, an uninstall-entry export
pub fn cmd_scan(
    user: Option<&str>,
    profile: Option<PathBuf>,
    apps: Option<PathBuf>,
    max_items: Option<usize>,
) -> Result<()> {
    let profile = match profile {
        Some(dir) => {
            if !dir.is_dir() {
                return Err(anyhow::anyhow!(
                    "Profile directory not found: {}",
                    dir.display()
                ));
            }
            dir
        }
        None => discovery::resolve_profile(user)
            .context("Could not locate the Windows profile; pass --profile")?,
    };
    info!("Scanning profile {}", profile.display());

    let folders_profile = profile.clone();
    let folders = discovery::spawn_enumeration(
        "folders",
        move || {
            Ok(discovery::list_user_items(folders_profile).map(|item| {
                // Sized on the worker; large folders take a while to walk
                let size = discovery::item_size(Path::new(&item.path));
                Ok((item, size))
            }))
        },
        CancellationToken::new(),
    )?;

    // Start both workers before draining either
    let applications = match apps {
        Some(path) => Some(discovery::spawn_enumeration(
            "apps",
            move || {
                let entries = discovery::load_uninstall_entries(&path)?;
                let system = SystemFolders::from_env();
                Ok(entries
                    .into_iter()
                    .filter_map(move |entry| discovery::filter_entry(&entry, &system))
                    .map(Ok))
            },
            CancellationToken::new(),
        )?),
        None => None,
    };

    println!("Folders in {}:", profile.display());
    let mut total_bytes = 0;
    let summary = drain(folders, max_items, |(item, size): &(DataItem, u64)| {
        total_bytes += size;
        println!("  [{}] {} ({})", kind_label(item), item.name(), format_bytes(*size));
    })?;
    println!(
        "{} folder(s) found, {} total{}",
        summary.shown,
        format_bytes(total_bytes),
        stopped_note(summary.stopped_early)
    );

    if let Some(run) = applications {
        println!();
        println!("Installed applications:");
        let summary = drain(run, max_items, |app: &ApplicationRecord| {
            let version = if app.version.is_empty() { "-" } else { app.version.as_str() };
            let candidates = lunx::resolve(&app.name);
            let suggestion = if candidates.is_empty() {
                "-".to_string()
            } else {
                candidates.join(", ")
            };
            println!("  {} ({}) -> {}", app.name, version, suggestion);
        })
        .context("Application enumeration failed")?;
        println!(
            "{} application(s) found{}",
            summary.shown,
            stopped_note(summary.stopped_early)
        );
    }

    Ok(())
}
