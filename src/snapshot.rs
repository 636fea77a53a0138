use crate::errors::{OptionsError, Result};
use crate::mask::VersionMask;
use crate::options::{OpenClOptions, OptionInfo};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One registry entry as persisted between processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub name: String,
    pub supported: bool,
    pub enabled: bool,
    pub avail: u32,
    pub core: VersionMask,
    pub opt: VersionMask,
}

/// Every entry of an [`OpenClOptions`], sorted by name.
///
/// Restoring a snapshot reproduces the flag state without re-running
/// feature discovery or re-reading pragmas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsSnapshot {
    pub entries: Vec<SnapshotEntry>,
}

impl OptionsSnapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| OptionsError::Snapshot(e.to_string()))
    }

    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| OptionsError::Snapshot(e.to_string()))
    }
}

impl OpenClOptions {
    pub fn snapshot(&self) -> OptionsSnapshot {
        let entries = self
            .opt_map
            .iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(name, info)| SnapshotEntry {
                name: name.clone(),
                supported: info.supported,
                enabled: info.enabled,
                avail: info.avail,
                core: info.core,
                opt: info.opt,
            })
            .collect();
        OptionsSnapshot { entries }
    }

    /// Bulk-set supported/enabled flags from `snapshot`.
    ///
    /// Known entries keep their catalog metadata; only names missing from the
    /// registry take `avail`/`core`/`opt` from the snapshot. Entries absent
    /// from the snapshot keep their current state.
    pub fn restore(&mut self, snapshot: &OptionsSnapshot) {
        for entry in &snapshot.entries {
            let info = self.opt_map.entry(entry.name.clone()).or_insert_with(|| {
                warn!(name = %entry.name, "restoring option missing from catalog");
                OptionInfo::new(entry.avail, entry.core, entry.opt)
            });
            info.supported = entry.supported;
            info.enabled = entry.enabled;
        }
        debug!(entries = snapshot.entries.len(), "restore");
    }
}
