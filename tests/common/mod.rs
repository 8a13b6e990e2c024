//! Common test utilities for promptkit integration tests

use std::path::PathBuf;

use tempfile::TempDir;

/// A test workspace for integration tests
///
/// Holds a temp directory with separate bundled, workspace and global-target
/// trees; the local target lands under the workspace path itself.
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to workspace root (the command's working directory)
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        std::fs::create_dir_all(path.join("bundled")).expect("Failed to create bundled dir");
        std::fs::create_dir_all(path.join("packages")).expect("Failed to create packages dir");
        Self { temp, path }
    }

    /// Bundled (primary) source tree root
    pub fn bundled_dir(&self) -> PathBuf {
        self.path.join("bundled")
    }

    /// Workspace (secondary) source tree root
    pub fn packages_dir(&self) -> PathBuf {
        self.path.join("packages")
    }

    /// Global target root (redirected away from the real home directory)
    pub fn global_dir(&self) -> PathBuf {
        self.path.join("global-target")
    }

    /// Local target root under the working directory
    pub fn local_dir(&self) -> PathBuf {
        self.path.join(".promptkit")
    }

    /// Write a content item with a frontmatter description into a source tree
    pub fn write_item(
        &self,
        tree: &std::path::Path,
        category: &str,
        subpackage: &str,
        name: &str,
        description: &str,
    ) {
        let dir = tree.join(category).join(subpackage);
        std::fs::create_dir_all(&dir).expect("Failed to create item directory");
        let content = format!("---\ndescription: {description}\n---\n\n# {name}\n");
        std::fs::write(dir.join(format!("{name}.md")), content).expect("Failed to write item");
    }

    /// Write a file relative to the workspace root
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file relative to the workspace root
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists relative to the workspace root
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Parse the manifest at a target root
    pub fn read_manifest(&self, target: &std::path::Path) -> serde_json::Value {
        let content =
            std::fs::read_to_string(target.join("manifest.json")).expect("Failed to read manifest");
        serde_json::from_str(&content).expect("Failed to parse manifest")
    }

    /// String entries of a manifest array field
    pub fn manifest_names(&self, target: &std::path::Path, field: &str) -> Vec<String> {
        self.read_manifest(target)[field]
            .as_array()
            .expect("manifest field should be an array")
            .iter()
            .map(|v| v.as_str().expect("manifest entry should be a string").to_string())
            .collect()
    }
}

/// Build a promptkit command wired to the workspace's source and target trees
pub fn promptkit_cmd(workspace: &TestWorkspace) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("promptkit").expect("binary should build");
    cmd.current_dir(&workspace.path);
    cmd.env("PROMPTKIT_BUNDLED_DIR", workspace.bundled_dir());
    cmd.env("PROMPTKIT_WORKSPACE_DIR", workspace.packages_dir());
    cmd.env("PROMPTKIT_GLOBAL_DIR", workspace.global_dir());
    cmd
}
