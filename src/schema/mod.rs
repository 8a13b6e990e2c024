//! Declarative prompt schema
//!
//! A schema is an ordered sequence of properties; order is semantically
//! significant because visibility conditions may reference properties
//! resolved earlier in the same pass. Conditions are parsed into an AST when
//! the schema is built, so a malformed condition fails the run before any
//! prompt is shown or any file is written.

pub mod condition;
pub mod engine;

pub use condition::Expr;
pub use engine::PromptEngine;

use crate::error::Result;
use crate::options::{normalize_key, OptionValue};

/// How a property is presented when it requires interactive input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Boolean confirmation
    Confirm,
    /// Single choice from an enumerated set
    Select,
    /// Free-form text
    Text,
    /// Multi-select from a dynamic candidate list
    MultiSelect,
}

/// One property in the prompt schema
#[derive(Debug, Clone)]
pub struct SchemaProperty {
    pub key: String,
    pub kind: PromptKind,
    pub message: String,
    pub help: Option<String>,
    pub default: Option<OptionValue>,
    pub condition: Option<Expr>,
    /// Enumerated values for [`PromptKind::Select`]
    pub choices: Vec<String>,
    /// Decorated candidate labels for [`PromptKind::MultiSelect`]
    pub candidates: Vec<String>,
    /// A confirmation answered negatively aborts the entire run
    pub hard_gate: bool,
}

impl SchemaProperty {
    pub fn new(key: &str, kind: PromptKind, message: &str) -> Self {
        Self {
            key: normalize_key(key),
            kind,
            message: message.to_string(),
            help: None,
            default: None,
            condition: None,
            choices: Vec::new(),
            candidates: Vec::new(),
            hard_gate: false,
        }
    }

    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    pub fn with_default(mut self, default: OptionValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Attach a visibility condition, parsed eagerly
    pub fn visible_when(mut self, condition: &str) -> Result<Self> {
        self.condition = Some(Expr::parse(condition)?);
        Ok(self)
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_candidates(mut self, candidates: Vec<String>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn hard_gate(mut self) -> Self {
        self.hard_gate = true;
        self
    }
}

/// Ordered prompt schema for one run
#[derive(Debug, Clone, Default)]
pub struct PromptSchema {
    properties: Vec<SchemaProperty>,
}

impl PromptSchema {
    pub fn new(properties: Vec<SchemaProperty>) -> Self {
        Self { properties }
    }

    pub fn properties(&self) -> &[SchemaProperty] {
        &self.properties
    }
}

/// Fixed expansion table applied when one designated control field resolves
/// to its designated bulk value
///
/// Assigned fields are marked as explicitly provided, so later conditional
/// checks in the same pass see them as already resolved. This is a documented
/// table, not inference.
#[derive(Debug, Clone)]
pub struct CascadeTable {
    pub control: String,
    pub trigger: String,
    pub assigns: Vec<(String, OptionValue)>,
}

impl CascadeTable {
    pub fn new(control: &str, trigger: &str, assigns: Vec<(&str, OptionValue)>) -> Self {
        Self {
            control: normalize_key(control),
            trigger: trigger.to_string(),
            assigns: assigns
                .into_iter()
                .map(|(key, value)| (normalize_key(key), value))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_builder() {
        let prop = SchemaProperty::new("installationType", PromptKind::Select, "Where to install?")
            .with_choices(["global", "local"])
            .with_default(OptionValue::Str("global".to_string()))
            .visible_when("install_mode == 'custom'")
            .unwrap();

        assert_eq!(prop.key, "installation_type");
        assert_eq!(prop.choices, vec!["global", "local"]);
        assert!(prop.condition.is_some());
        assert!(!prop.hard_gate);
    }

    #[test]
    fn test_malformed_condition_fails_schema_build() {
        let result = SchemaProperty::new("x", PromptKind::Confirm, "?")
            .visible_when("a == 'b' && c == 'd' || e == 'f'");
        assert!(result.is_err());
    }

    #[test]
    fn test_cascade_table_normalizes_keys() {
        let cascade = CascadeTable::new(
            "installMode",
            "default",
            vec![("installationType", OptionValue::Str("global".to_string()))],
        );
        assert_eq!(cascade.control, "install_mode");
        assert_eq!(cascade.assigns[0].0, "installation_type");
    }
}
