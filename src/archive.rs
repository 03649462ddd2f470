// src/archive.rs

//! Archive creation for archive-mode migrations
//!
//! The selected items are packed with the system `tar` so the generated
//! script can extract them on the target machine with `tar -xvf`, which
//! detects the compression on its own.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};
use wait_timeout::ChildExt;

use crate::migration::DataItem;
use crate::{Error, Result};

/// Upper bound for one `tar` run
pub const ARCHIVE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Compression applied by `tar`, chosen from the archive extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Xz,
    Bzip2,
    Zstd,
}

impl Compression {
    /// Detect from a file name (case-insensitive)
    pub fn from_file_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Self::Gzip
        } else if name.ends_with(".tar.xz") || name.ends_with(".txz") {
            Self::Xz
        } else if name.ends_with(".tar.bz2") || name.ends_with(".tbz2") {
            Self::Bzip2
        } else if name.ends_with(".tar.zst") || name.ends_with(".tzst") {
            Self::Zstd
        } else {
            Self::None
        }
    }

    /// `tar` flag selecting this compression
    pub fn tar_flag(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Gzip => Some("-z"),
            Self::Xz => Some("-J"),
            Self::Bzip2 => Some("-j"),
            Self::Zstd => Some("--zstd"),
        }
    }
}

/// Arguments for one `tar` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePlan {
    pub output: PathBuf,
    pub compression: Compression,
    /// Directory passed to `-C`; members are relative to it when set
    pub base_dir: Option<PathBuf>,
    pub members: Vec<PathBuf>,
}

impl ArchivePlan {
    /// Plan an archive of `items` written to `output`.
    ///
    /// Members are stored relative to `profile` when every item lives under
    /// it, so the archive extracts to `Desktop/`, `Documents/` and so on.
    /// Otherwise absolute paths are stored.
    pub fn new(output: impl Into<PathBuf>, items: &[DataItem], profile: Option<&Path>) -> Self {
        let output = output.into();
        let compression = Compression::from_file_name(&output.to_string_lossy());
        let paths: Vec<PathBuf> = items
            .iter()
            .filter(|item| {
                if !item.has_name() {
                    warn!("Leaving filesystem root {} out of the archive", item.path);
                }
                item.has_name()
            })
            .map(|item| PathBuf::from(&item.path))
            .collect();

        let relative = profile.filter(|p| p.is_absolute()).and_then(|base| {
            paths
                .iter()
                .map(|p| {
                    p.strip_prefix(base)
                        .ok()
                        .filter(|rel| !rel.as_os_str().is_empty())
                        .map(Path::to_path_buf)
                })
                .collect::<Option<Vec<_>>>()
                .map(|members| (base.to_path_buf(), members))
        });

        match relative {
            Some((base, members)) => Self {
                output,
                compression,
                base_dir: Some(base),
                members,
            },
            None => {
                if profile.is_some() {
                    warn!("Archiving with absolute paths; not every item is under the profile directory");
                }
                Self {
                    output,
                    compression,
                    base_dir: None,
                    members: paths,
                }
            }
        }
    }

    /// File name the migration script should look for
    pub fn file_name(&self) -> String {
        self.output
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Full `tar` argument list
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-c".into()];
        if let Some(flag) = self.compression.tar_flag() {
            args.push(flag.into());
        }
        args.push("-f".into());
        args.push(self.output.clone().into_os_string());
        if let Some(base) = &self.base_dir {
            args.push("-C".into());
            args.push(base.clone().into_os_string());
        }
        args.push("--".into());
        args.extend(self.members.iter().map(|m| m.clone().into_os_string()));
        args
    }

    /// Create the archive with the default timeout
    pub fn run(&self) -> Result<()> {
        self.run_with_timeout(ARCHIVE_TIMEOUT)
    }

    pub fn run_with_timeout(&self, timeout: Duration) -> Result<()> {
        if self.members.is_empty() {
            return Err(Error::Archive("no items to archive".to_string()));
        }
        let tar = which::which("tar")
            .map_err(|e| Error::Archive(format!("tar not found in PATH: {}", e)))?;

        let args = self.args();
        info!("Creating archive {}", self.output.display());
        debug!("Archive command: {} {:?}", tar.display(), args);

        let mut child = Command::new(&tar)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Archive(format!("failed to spawn tar: {}", e)))?;

        // Drain stderr concurrently so a chatty tar cannot fill the pipe
        let stderr = child.stderr.take();
        let reader = thread::spawn(move || {
            let mut text = String::new();
            if let Some(mut stderr) = stderr {
                let _ = stderr.read_to_string(&mut text);
            }
            text
        });

        match child.wait_timeout(timeout)? {
            Some(status) => {
                let stderr = reader.join().unwrap_or_default();
                if status.success() {
                    info!("Archive created: {}", self.output.display());
                    Ok(())
                } else {
                    let code = status.code().unwrap_or(-1);
                    Err(Error::Archive(format!(
                        "tar exited with code {}: {}",
                        code,
                        stderr.trim()
                    )))
                }
            }
            None => {
                let _ = child.kill();
                let _ = child.wait();
                Err(Error::Archive(format!(
                    "archive creation timed out after {} seconds",
                    timeout.as_secs()
                )))
            }
        }
    }
}
