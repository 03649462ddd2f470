// src/script/rsync.rs

//! Copy flag policy for direct-copy mode

use crate::migration::{DataItem, ItemKind, MigrationConfig};

/// rsync flags for one data item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsyncFlags {
    /// Archive mode plus ACLs and extended attributes
    pub preserve_permissions: bool,
    /// Copy the target of symlinks instead of the links themselves
    pub follow_symlinks: bool,
}

impl RsyncFlags {
    /// Flags for copying `item` under `config`.
    ///
    /// Directory trees follow their inner links when symlink copying is off;
    /// a single file is only followed when the item itself is a link.
    pub fn for_item(item: &DataItem, config: &MigrationConfig) -> Self {
        let follow_symlinks = match item.kind {
            ItemKind::Directory => !config.copy_symlinks,
            _ => item.is_symlink && !config.copy_symlinks,
        };
        Self {
            preserve_permissions: config.preserve_permissions,
            follow_symlinks,
        }
    }

    /// Render as a single short-option cluster
    pub fn render(&self) -> String {
        let links = if self.follow_symlinks { "L" } else { "" };
        if self.preserve_permissions {
            // -a keeps owner, group, times, devices and specials
            format!("-aAX{}", links)
        } else {
            let links = if self.follow_symlinks { "L" } else { "l" };
            format!("-r{}tgoD", links)
        }
    }
}
