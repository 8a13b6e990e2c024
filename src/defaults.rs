//! Recommended default selections
//!
//! Passed into the prompt schema and the init flow as an immutable value, so
//! tests can substitute alternative defaults instead of patching a hidden
//! module-level list.

/// Item names preselected in the multi-select prompts and installed by the
/// default (bulk) mode
#[derive(Debug, Clone)]
pub struct InstallDefaults {
    pub commands: Vec<String>,
    pub agents: Vec<String>,
}

impl InstallDefaults {
    /// The stock recommendation shipped with the tool
    pub fn recommended() -> Self {
        Self {
            commands: to_names(&["explore", "plan", "commit", "review"]),
            agents: to_names(&["code-reviewer", "test-writer"]),
        }
    }
}

fn to_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
