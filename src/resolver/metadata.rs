//! Tolerant parsing of content item metadata headers
//!
//! Every content item file may begin with a YAML frontmatter block (between
//! the first `---` line and the next). Only the `description` field matters
//! to the resolver. Missing or malformed metadata is never fatal: the parse
//! degrades to an empty description.

use serde_yaml::Value;

/// Typed metadata extracted from a content item header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMeta {
    pub description: String,
}

/// Extract metadata from the frontmatter block at the start of `content`.
///
/// Returns an empty [`HeaderMeta`] when the block is absent, unterminated,
/// not valid YAML, or not a mapping.
pub fn parse_header(content: &str) -> HeaderMeta {
    let Some(value) = frontmatter_value(content) else {
        return HeaderMeta::default();
    };

    let description = value
        .as_mapping()
        .and_then(|m| m.get(Value::String("description".to_string())))
        .and_then(header_field_as_string)
        .unwrap_or_default();

    HeaderMeta { description }
}

/// Parse the frontmatter block (between first `---` and second `---`) as YAML.
/// Returns `None` if no valid block exists.
fn frontmatter_value(content: &str) -> Option<Value> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < 3 || lines[0].trim() != "---" {
        return None;
    }
    let end_idx = lines[1..].iter().position(|l| l.trim() == "---")?;
    let frontmatter_str = lines[1..=end_idx].join("\n");
    let value: Value = serde_yaml::from_str(&frontmatter_str).ok()?;
    if value.as_mapping().is_none() && !value.is_null() {
        return None;
    }
    Some(value)
}

fn header_field_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
