//! Installation manifest (manifest.json)
//!
//! The manifest at the target root records every item category/name and file
//! path ever installed there. Merging is a deduplicating set union per
//! category: the sets never shrink across merges, only `installedAt` is
//! replaced with the current run's time. A manifest that cannot be parsed is
//! treated as absent (cold start) with a warning, never as a fatal error.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PromptkitError, Result};
use crate::ui;

/// Current manifest schema version
pub const MANIFEST_VERSION: &str = "1";

/// Manifest file name at the target root
pub const MANIFEST_FILE: &str = "manifest.json";

/// Persisted record of everything installed at one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    #[serde(rename = "installedAt")]
    pub installed_at: String,
    #[serde(default)]
    pub commands: BTreeSet<String>,
    #[serde(default)]
    pub agents: BTreeSet<String>,
    /// Paths relative to the target root
    #[serde(default)]
    pub files: BTreeSet<String>,
}

impl Manifest {
    /// Load the manifest from a target root.
    ///
    /// Missing file is a cold start. An unreadable or unparseable manifest is
    /// also a cold start, reported as a warning.
    pub fn load(root: &Path) -> Option<Manifest> {
        let path = root.join(MANIFEST_FILE);
        if !path.exists() {
            return None;
        }
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                ui::warn(&format!(
                    "could not read existing manifest {}: {e}; starting fresh",
                    path.display()
                ));
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                let err = PromptkitError::ManifestParseFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                };
                ui::warn(&format!("{err}; starting fresh"));
                None
            }
        }
    }

    /// Merge an installation outcome into a previously persisted manifest.
    ///
    /// Set contents are a deduplicating union, so the merge is idempotent,
    /// associative and commutative; `installed_at` is always replaced with
    /// the given run time and `version` with the current schema version.
    pub fn merge(
        existing: Option<Manifest>,
        installed_commands: &BTreeSet<String>,
        installed_agents: &BTreeSet<String>,
        installed_files: &BTreeSet<String>,
        run_time: DateTime<Utc>,
    ) -> Manifest {
        let (mut commands, mut agents, mut files) = match existing {
            Some(prior) => (prior.commands, prior.agents, prior.files),
            None => (BTreeSet::new(), BTreeSet::new(), BTreeSet::new()),
        };
        commands.extend(installed_commands.iter().cloned());
        agents.extend(installed_agents.iter().cloned());
        files.extend(installed_files.iter().cloned());

        Manifest {
            version: MANIFEST_VERSION.to_string(),
            installed_at: run_time.to_rfc3339_opts(SecondsFormat::Secs, true),
            commands,
            agents,
            files,
        }
    }

    /// Persist the manifest at the target root
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = root.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            PromptkitError::ManifestSerializeFailed {
                reason: e.to_string(),
            }
        })?;
        std::fs::write(&path, json).map_err(|e| PromptkitError::FileWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
