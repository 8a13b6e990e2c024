//! Conditional prompt engine
//!
//! Walks the schema in declared order and decides, per property, whether the
//! operator has to be asked at all:
//!
//! 1. an explicitly provided value wins unconditionally and is never prompted;
//! 2. in non-interactive mode a missing value receives its declared default;
//! 3. a property whose visibility condition evaluates false against the
//!    current option state is skipped (its declared default still applies);
//! 4. everything else is prompted according to its kind.
//!
//! Resolving the cascade control field to its bulk value expands the fixed
//! assignment table before any later property is examined, so conditions
//! later in the same pass see those fields as already resolved.

use inquire::{Confirm, MultiSelect, Select, Text};

use crate::error::{PromptkitError, Result};
use crate::options::{OptionValue, OptionsState};
use crate::schema::{CascadeTable, PromptKind, PromptSchema, SchemaProperty};

/// Recover the canonical item name from a decorated multi-select label.
///
/// Labels may carry a ` - description` suffix and/or a ` (annotation)`
/// suffix; the canonical name is the substring up to whichever delimiter
/// occurs first, trimmed. Decorations are display-only.
pub fn canonical_name(label: &str) -> String {
    let cut = [label.find(" - "), label.find('(')]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(label.len());
    label[..cut].trim().to_string()
}

/// Drives one pass over the schema, filling the option state
pub struct PromptEngine<'a> {
    schema: &'a PromptSchema,
    cascade: &'a CascadeTable,
    non_interactive: bool,
}

impl<'a> PromptEngine<'a> {
    pub fn new(schema: &'a PromptSchema, cascade: &'a CascadeTable, non_interactive: bool) -> Self {
        Self {
            schema,
            cascade,
            non_interactive,
        }
    }

    /// Resolve every schema property in declared order.
    ///
    /// Deterministic: identical option state and identical interactive
    /// answers yield identical final options.
    pub fn run(&self, options: &mut OptionsState) -> Result<()> {
        for property in self.schema.properties() {
            self.resolve_property(property, options)?;
        }
        Ok(())
    }

    fn resolve_property(&self, property: &SchemaProperty, options: &mut OptionsState) -> Result<()> {
        if options.is_explicit(&property.key) {
            self.check_hard_gate(property, options)?;
            self.apply_cascade(&property.key, options);
            return Ok(());
        }

        if self.non_interactive {
            if let Some(default) = &property.default {
                options.set(&property.key, default.clone());
                self.apply_cascade(&property.key, options);
            }
            return Ok(());
        }

        if let Some(condition) = &property.condition {
            if !condition.eval(options) {
                if let Some(default) = &property.default {
                    options.set(&property.key, default.clone());
                    self.apply_cascade(&property.key, options);
                }
                return Ok(());
            }
        }

        let answer = prompt(property)?;
        options.set(&property.key, answer);
        self.check_hard_gate(property, options)?;
        self.apply_cascade(&property.key, options);
        Ok(())
    }

    /// A hard-gate confirmation answered negatively aborts the whole run
    /// before any later property is processed.
    fn check_hard_gate(&self, property: &SchemaProperty, options: &OptionsState) -> Result<()> {
        if property.hard_gate && options.get_bool(&property.key) == Some(false) {
            return Err(PromptkitError::Cancelled);
        }
        Ok(())
    }

    /// Expand the cascade table when the control field resolved to the bulk
    /// value. Fields the caller already provided explicitly are left alone.
    fn apply_cascade(&self, key: &str, options: &mut OptionsState) {
        if key != self.cascade.control {
            return;
        }
        if options.get_str(&self.cascade.control) != Some(self.cascade.trigger.as_str()) {
            return;
        }
        for (field, value) in &self.cascade.assigns {
            if !options.is_explicit(field) {
                options.set_explicit(field, value.clone());
            }
        }
    }
}

fn prompt(property: &SchemaProperty) -> Result<OptionValue> {
    match property.kind {
        PromptKind::Confirm => prompt_confirm(property),
        PromptKind::Select => prompt_select(property),
        PromptKind::Text => prompt_text(property),
        PromptKind::MultiSelect => prompt_multi_select(property),
    }
}

fn prompt_confirm(property: &SchemaProperty) -> Result<OptionValue> {
    let mut confirm = Confirm::new(&property.message);
    if let Some(OptionValue::Bool(default)) = property.default {
        confirm = confirm.with_default(default);
    }
    if let Some(help) = &property.help {
        confirm = confirm.with_help_message(help);
    }
    Ok(OptionValue::Bool(confirm.prompt()?))
}

fn prompt_select(property: &SchemaProperty) -> Result<OptionValue> {
    let mut select = Select::new(&property.message, property.choices.clone());
    if let Some(OptionValue::Str(default)) = &property.default {
        if let Some(idx) = property.choices.iter().position(|c| c == default) {
            select = select.with_starting_cursor(idx);
        }
    }
    if let Some(help) = &property.help {
        select = select.with_help_message(help);
    }
    Ok(OptionValue::Str(select.prompt()?))
}

fn prompt_text(property: &SchemaProperty) -> Result<OptionValue> {
    let mut text = Text::new(&property.message);
    if let Some(OptionValue::Str(default)) = &property.default {
        text = text.with_default(default);
    }
    if let Some(help) = &property.help {
        text = text.with_help_message(help);
    }
    Ok(OptionValue::Str(text.prompt()?))
}

fn prompt_multi_select(property: &SchemaProperty) -> Result<OptionValue> {
    let preselected = preselected_indices(property);
    let mut multi = MultiSelect::new(&property.message, property.candidates.clone())
        .with_default(&preselected);
    if let Some(help) = &property.help {
        multi = multi.with_help_message(help);
    }
    let selected = multi.prompt()?;
    // Decorations never reach the returned selection
    Ok(OptionValue::List(
        selected.iter().map(|label| canonical_name(label)).collect(),
    ))
}

/// Candidate indices whose canonical names appear in the declared default
fn preselected_indices(property: &SchemaProperty) -> Vec<usize> {
    let Some(OptionValue::List(defaults)) = &property.default else {
        return Vec::new();
    };
    property
        .candidates
        .iter()
        .enumerate()
        .filter(|(_, label)| defaults.contains(&canonical_name(label)))
        .map(|(idx, _)| idx)
        .collect()
}
