//! Installation planning and execution
//!
//! Planning classifies every selected item against a fresh index of the
//! target's existing files: destination missing means install, destination
//! present means skip unless the operator forced overwriting. The
//! classification is a pure function of (item, destination-exists, force);
//! dry-run renders the identical decision list instead of writing.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{PromptkitError, Result};
use crate::progress::ProgressReporter;
use crate::resolver::{Category, ContentItem};
use crate::ui;

/// Per-item installation decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InstallAction {
    Install,
    SkipExisting,
    Overwrite,
}

/// A classified item together with its destination relative to the target root
#[derive(Debug, Clone)]
pub struct InstallationDecision {
    pub item: ContentItem,
    pub action: InstallAction,
    pub dest: PathBuf,
}

impl InstallationDecision {
    pub fn dest_display(&self) -> String {
        self.dest.display().to_string()
    }
}

/// Snapshot of the files already present at one target location
///
/// Scanned fresh from the filesystem at plan time, scoped to a single target
/// root, and keyed by target-relative paths (`commands/explore.md`).
#[derive(Debug, Clone, Default)]
pub struct ExistingIndex {
    files: BTreeSet<PathBuf>,
}

impl ExistingIndex {
    /// Scan a target root for already-installed content files
    pub fn scan(root: &Path) -> Self {
        let mut files = BTreeSet::new();
        for category in Category::ALL {
            let dir = root.join(category.dir_name());
            let Ok(entries) = std::fs::read_dir(&dir) else {
                continue;
            };
            for entry in entries.flatten() {
                if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                    files.insert(PathBuf::from(category.dir_name()).join(entry.file_name()));
                }
            }
        }
        Self { files }
    }

    pub fn contains(&self, dest: &Path) -> bool {
        self.files.contains(dest)
    }

    /// Whether an item with this name is present for the category
    pub fn contains_item(&self, category: Category, name: &str) -> bool {
        self.contains(&dest_path(category, name))
    }

    #[allow(dead_code)] // used in tests
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Target-relative destination path for an item
pub fn dest_path(category: Category, name: &str) -> PathBuf {
    PathBuf::from(category.dir_name()).join(format!("{name}.md"))
}

/// Classify every selected item against the existing file index.
///
/// Input order only affects output order; each classification depends solely
/// on the item, the destination's existence and the force flag.
pub fn plan(
    selected: &[ContentItem],
    existing: &ExistingIndex,
    force: bool,
) -> Vec<InstallationDecision> {
    selected
        .iter()
        .map(|item| {
            let dest = dest_path(item.category, &item.name);
            let action = if !existing.contains(&dest) {
                InstallAction::Install
            } else if force {
                InstallAction::Overwrite
            } else {
                InstallAction::SkipExisting
            };
            InstallationDecision {
                item: item.clone(),
                action,
                dest,
            }
        })
        .collect()
}

/// Outcome of executing a plan, grouped for the final summary and the
/// manifest merge
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    pub installed: Vec<InstallationDecision>,
    pub skipped: Vec<InstallationDecision>,
    pub overwritten: Vec<InstallationDecision>,
    pub failed: Vec<InstallationDecision>,
}

impl ExecutionReport {
    /// Items written this run (installed or overwritten)
    pub fn written(&self) -> impl Iterator<Item = &InstallationDecision> {
        self.installed.iter().chain(self.overwritten.iter())
    }
}

/// Execute a plan against the target root.
///
/// Write failures are item-scoped: the file is reported and skipped, the
/// rest of the plan proceeds.
pub fn execute(
    decisions: Vec<InstallationDecision>,
    root: &Path,
    reporter: &mut dyn ProgressReporter,
) -> ExecutionReport {
    let to_write = decisions
        .iter()
        .filter(|d| d.action != InstallAction::SkipExisting)
        .count();
    reporter.init(to_write as u64);

    let mut report = ExecutionReport::default();
    for decision in decisions {
        match decision.action {
            InstallAction::SkipExisting => report.skipped.push(decision),
            InstallAction::Install | InstallAction::Overwrite => {
                reporter.update_item(&decision.dest_display());
                match write_item(root, &decision) {
                    Ok(()) => {
                        if decision.action == InstallAction::Overwrite {
                            report.overwritten.push(decision);
                        } else {
                            report.installed.push(decision);
                        }
                    }
                    Err(e) => {
                        ui::warn(&e.to_string());
                        report.failed.push(decision);
                    }
                }
            }
        }
    }
    reporter.finish();
    report
}

fn write_item(root: &Path, decision: &InstallationDecision) -> Result<()> {
    let target = root.join(&decision.dest);
    ensure_parent_dir(&target)?;
    std::fs::copy(&decision.item.source_path, &target)
        .map_err(|e| PromptkitError::FileWriteFailed {
            path: target.display().to_string(),
            reason: e.to_string(),
        })
        .map(|_| ())
}

/// Ensure parent directory exists for a path
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| PromptkitError::FileWriteFailed {
            path: parent.display().to_string(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}
