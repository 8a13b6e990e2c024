//! Visibility condition micro-language
//!
//! Conditions are written as strings in the schema declaration, e.g.
//! `"install_mode == 'custom' && install_commands == true"`, and parsed once
//! at schema build time into a small AST. An expression is either a single
//! comparison or a homogeneous conjunction/disjunction of comparisons; mixing
//! `&&` and `||` within one expression is rejected as a schema error.
//!
//! Evaluation never fails: a comparison against an unset field is simply
//! non-matching.

use crate::error::{PromptkitError, Result};
use crate::options::{normalize_key, OptionValue, OptionsState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
}

/// Literal a field is compared against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Bool(bool),
    Str(String),
}

/// A single `field == literal` / `field != literal` comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub field: String,
    pub op: CompareOp,
    pub literal: Literal,
}

impl Comparison {
    /// Evaluate against the current option state.
    ///
    /// An unset field is non-matching regardless of the operator. A value of
    /// a different type than the literal never satisfies `==` and always
    /// satisfies `!=`.
    fn eval(&self, options: &OptionsState) -> bool {
        let Some(value) = options.get(&self.field) else {
            return false;
        };
        let equal = match (&self.literal, value) {
            (Literal::Bool(lit), OptionValue::Bool(v)) => lit == v,
            (Literal::Str(lit), OptionValue::Str(v)) => lit == v,
            _ => false,
        };
        match self.op {
            CompareOp::Eq => equal,
            CompareOp::Ne => !equal,
        }
    }
}

/// Parsed visibility condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Single(Comparison),
    All(Vec<Comparison>),
    Any(Vec<Comparison>),
}

impl Expr {
    /// Parse a condition string into an expression.
    ///
    /// Returns a schema error when `&&` and `||` appear in the same
    /// expression (operator precedence would have to be guessed) or when a
    /// comparison is malformed.
    pub fn parse(input: &str) -> Result<Self> {
        let has_and = input.contains("&&");
        let has_or = input.contains("||");

        if has_and && has_or {
            return Err(PromptkitError::SchemaInvalid {
                message: format!("condition mixes '&&' and '||': {input}"),
            });
        }

        if has_and {
            let comparisons = parse_comparisons(input, "&&")?;
            return Ok(Expr::All(comparisons));
        }
        if has_or {
            let comparisons = parse_comparisons(input, "||")?;
            return Ok(Expr::Any(comparisons));
        }
        Ok(Expr::Single(parse_comparison(input)?))
    }

    /// Evaluate the condition: a conjunction requires all comparisons true,
    /// a disjunction at least one.
    pub fn eval(&self, options: &OptionsState) -> bool {
        match self {
            Expr::Single(c) => c.eval(options),
            Expr::All(cs) => cs.iter().all(|c| c.eval(options)),
            Expr::Any(cs) => cs.iter().any(|c| c.eval(options)),
        }
    }
}

fn parse_comparisons(input: &str, separator: &str) -> Result<Vec<Comparison>> {
    input.split(separator).map(parse_comparison).collect()
}

fn parse_comparison(input: &str) -> Result<Comparison> {
    let (field, op, literal) = if let Some((lhs, rhs)) = input.split_once("!=") {
        (lhs, CompareOp::Ne, rhs)
    } else if let Some((lhs, rhs)) = input.split_once("==") {
        (lhs, CompareOp::Eq, rhs)
    } else {
        return Err(PromptkitError::SchemaInvalid {
            message: format!("comparison has no operator: {input}"),
        });
    };

    let field = field.trim();
    if field.is_empty() {
        return Err(PromptkitError::SchemaInvalid {
            message: format!("comparison has no field: {input}"),
        });
    }

    Ok(Comparison {
        field: normalize_key(field),
        op,
        literal: parse_literal(literal.trim(), input)?,
    })
}

fn parse_literal(raw: &str, context: &str) -> Result<Literal> {
    if raw.is_empty() {
        return Err(PromptkitError::SchemaInvalid {
            message: format!("comparison has no literal: {context}"),
        });
    }
    if let Some(quoted) = strip_quotes(raw) {
        return Ok(Literal::Str(quoted.to_string()));
    }
    match raw {
        "true" => Ok(Literal::Bool(true)),
        "false" => Ok(Literal::Bool(false)),
        bare => Ok(Literal::Str(bare.to_string())),
    }
}

fn strip_quotes(raw: &str) -> Option<&str> {
    for quote in ['\'', '"'] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return Some(&raw[1..raw.len() - 1]);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options_with(pairs: &[(&str, OptionValue)]) -> OptionsState {
        let mut options = OptionsState::new();
        for (key, value) in pairs {
            options.set(key, value.clone());
        }
        options
    }

    #[test]
    fn test_parse_single_comparison() {
        let expr = Expr::parse("install_mode == 'custom'").unwrap();
        assert_eq!(
            expr,
            Expr::Single(Comparison {
                field: "install_mode".to_string(),
                op: CompareOp::Eq,
                literal: Literal::Str("custom".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_conjunction() {
        let expr = Expr::parse("a == 'x' && b != true").unwrap();
        let Expr::All(comparisons) = expr else {
            panic!("expected conjunction");
        };
        assert_eq!(comparisons.len(), 2);
        assert_eq!(comparisons[1].op, CompareOp::Ne);
        assert_eq!(comparisons[1].literal, Literal::Bool(true));
    }

    #[test]
    fn test_parse_disjunction() {
        let expr = Expr::parse("a == 'x' || a == 'y'").unwrap();
        assert!(matches!(expr, Expr::Any(ref cs) if cs.len() == 2));
    }

    #[test]
    fn test_parse_rejects_mixed_operators() {
        let err = Expr::parse("a == 'x' && b == 'y' || c == 'z'").unwrap_err();
        assert!(matches!(err, PromptkitError::SchemaInvalid { .. }));
    }

    #[test]
    fn test_parse_rejects_missing_operator() {
        assert!(Expr::parse("install_mode").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_field() {
        assert!(Expr::parse("== 'custom'").is_err());
    }

    #[test]
    fn test_parse_normalizes_field_alias() {
        let expr = Expr::parse("installMode == 'custom'").unwrap();
        let Expr::Single(c) = expr else { panic!() };
        assert_eq!(c.field, "install_mode");
    }

    #[test]
    fn test_eval_string_equality() {
        let expr = Expr::parse("install_mode == 'custom'").unwrap();
        let options = options_with(&[("install_mode", OptionValue::Str("custom".to_string()))]);
        assert!(expr.eval(&options));

        let options = options_with(&[("install_mode", OptionValue::Str("default".to_string()))]);
        assert!(!expr.eval(&options));
    }

    #[test]
    fn test_eval_bool_literal() {
        let expr = Expr::parse("install_commands == true").unwrap();
        let options = options_with(&[("install_commands", OptionValue::Bool(true))]);
        assert!(expr.eval(&options));
    }

    #[test]
    fn test_eval_unset_field_is_non_matching() {
        let options = OptionsState::new();
        assert!(!Expr::parse("missing == 'x'").unwrap().eval(&options));
        // Even a negated comparison does not match an unset field
        assert!(!Expr::parse("missing != 'x'").unwrap().eval(&options));
    }

    #[test]
    fn test_eval_type_mismatch() {
        let options = options_with(&[("flag", OptionValue::Bool(true))]);
        assert!(!Expr::parse("flag == 'true'").unwrap().eval(&options));
        assert!(Expr::parse("flag != 'true'").unwrap().eval(&options));
    }

    #[test]
    fn test_eval_conjunction_requires_all() {
        let expr = Expr::parse("a == 'x' && b == 'y'").unwrap();
        let options = options_with(&[
            ("a", OptionValue::Str("x".to_string())),
            ("b", OptionValue::Str("y".to_string())),
        ]);
        assert!(expr.eval(&options));

        let options = options_with(&[("a", OptionValue::Str("x".to_string()))]);
        assert!(!expr.eval(&options));
    }

    #[test]
    fn test_eval_disjunction_requires_one() {
        let expr = Expr::parse("a == 'x' || a == 'y'").unwrap();
        let options = options_with(&[("a", OptionValue::Str("y".to_string()))]);
        assert!(expr.eval(&options));

        let options = options_with(&[("a", OptionValue::Str("z".to_string()))]);
        assert!(!expr.eval(&options));
    }

    #[test]
    fn test_eval_is_deterministic() {
        let expr = Expr::parse("a == 'x' && b != 'y'").unwrap();
        let options = options_with(&[
            ("a", OptionValue::Str("x".to_string())),
            ("b", OptionValue::Str("z".to_string())),
        ]);
        assert_eq!(expr.eval(&options), expr.eval(&options));
    }
}
