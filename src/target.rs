//! Installation target locations
//!
//! Two alternative targets exist: the global one under the home directory and
//! the local one under the current working directory. An item present at the
//! other target is reported as an informational conflict but never blocks
//! installation at the current one.

use std::path::PathBuf;

use crate::error::{PromptkitError, Result};

/// Directory name used for both the global and the local target
pub const TARGET_DIR_NAME: &str = ".promptkit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallTarget {
    Global,
    Local,
}

impl InstallTarget {
    pub fn from_option(value: &str) -> Option<Self> {
        match value {
            "global" => Some(InstallTarget::Global),
            "local" => Some(InstallTarget::Local),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InstallTarget::Global => "global",
            InstallTarget::Local => "local",
        }
    }

    /// Resolve the target root directory.
    ///
    /// The global root honors `PROMPTKIT_GLOBAL_DIR` so tests can redirect it
    /// away from the real home directory.
    pub fn root(&self) -> Result<PathBuf> {
        match self {
            InstallTarget::Global => {
                if let Some(dir) = std::env::var_os("PROMPTKIT_GLOBAL_DIR") {
                    return Ok(PathBuf::from(dir));
                }
                dirs::home_dir()
                    .map(|home| home.join(TARGET_DIR_NAME))
                    .ok_or(PromptkitError::HomeDirNotFound)
            }
            InstallTarget::Local => Ok(std::env::current_dir()?.join(TARGET_DIR_NAME)),
        }
    }
}

impl std::fmt::Display for InstallTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
