//! Content resolution from the bundled and workspace source trees
//!
//! Discovery checks the bundled tree first. When it yields at least one item
//! for a category, its results are used exclusively; the workspace tree is
//! only consulted as a fallback. Both trees share the same two-level layout:
//! `<category>/<subpackage>/<item>.md`.
//!
//! Resolution is a pure read. A file that cannot be read is skipped with a
//! warning; an empty registry is a valid result.

pub mod metadata;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{PromptkitError, Result};
use crate::ui;

/// Content category, mirrored in source and target directory names
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    Commands,
    Agents,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Commands, Category::Agents];

    /// Directory name used under source and target roots
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Commands => "commands",
            Category::Agents => "agents",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A named content item discovered from a source tree
///
/// Immutable once resolved for the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub name: String,
    pub description: String,
    pub source_path: PathBuf,
    pub category: Category,
}

/// Registry of resolved items for one category, keyed by unique name
pub type ContentRegistry = BTreeMap<String, ContentItem>;

/// The two alternative source tree roots
#[derive(Debug, Clone)]
pub struct SourceLayout {
    /// Pre-packaged tree, checked first and used exclusively when non-empty
    pub bundled_root: PathBuf,
    /// Fallback tree scanned across all subpackages
    pub workspace_root: PathBuf,
}

impl SourceLayout {
    /// Resolve source roots from the environment
    ///
    /// `PROMPTKIT_BUNDLED_DIR` and `PROMPTKIT_WORKSPACE_DIR` override the
    /// defaults (a `bundled/` directory next to the executable, and
    /// `./packages` under the working directory).
    pub fn from_env() -> Result<Self> {
        let bundled_root = match std::env::var_os("PROMPTKIT_BUNDLED_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_bundled_root()?,
        };
        let workspace_root = match std::env::var_os("PROMPTKIT_WORKSPACE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()?.join("packages"),
        };
        Ok(Self {
            bundled_root,
            workspace_root,
        })
    }
}

fn default_bundled_root() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join("bundled"))
}

/// Resolve all content items for a category
///
/// Bundled tree wins exclusively when it yields at least one item; otherwise
/// the workspace tree is scanned. No items in either tree is a valid empty
/// registry.
pub fn resolve(layout: &SourceLayout, category: Category) -> ContentRegistry {
    let bundled = scan_tree(&layout.bundled_root, category);
    if !bundled.is_empty() {
        return bundled;
    }
    scan_tree(&layout.workspace_root, category)
}

/// Scan one source tree root for `<category>/<subpackage>/<item>.md` files
///
/// Within a tree, the first occurrence of a name wins; entries are visited in
/// sorted order so duplicate resolution is deterministic.
fn scan_tree(root: &Path, category: Category) -> ContentRegistry {
    let category_dir = root.join(category.dir_name());
    let mut registry = ContentRegistry::new();

    if !category_dir.is_dir() {
        return registry;
    }

    let walker = WalkDir::new(&category_dir)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                ui::warn(&format!("skipping unreadable entry: {e}"));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let description = match std::fs::read_to_string(path) {
            Ok(content) => metadata::parse_header(&content).description,
            Err(e) => {
                let err = PromptkitError::FileReadFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                };
                ui::warn(&format!("{err}; skipping"));
                continue;
            }
        };

        registry.entry(name.to_string()).or_insert(ContentItem {
            name: name.to_string(),
            description,
            source_path: path.to_path_buf(),
            category,
        });
    }

    registry
}
