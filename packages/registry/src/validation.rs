//! # Property Validation
//!
//! Checks an element's props against its component schema.
//!
//! Validation is advisory: every property is checked, all issues are
//! collected, and nothing here blocks an edit. The property editor decides
//! how to surface the result.

use crate::{ComponentDefinition, PropKind, PropValue};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    Required,
    Pattern,
    BelowMin,
    AboveMax,
    InvalidOption,
    KindMismatch,
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::Required | IssueKind::Pattern | IssueKind::BelowMin | IssueKind::AboveMax => {
                Severity::Error
            }
            IssueKind::InvalidOption | IssueKind::KindMismatch => Severity::Warning,
        }
    }
}

/// A problem with one property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub prop: String,
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    fn new(prop: &str, kind: IssueKind, message: String) -> Self {
        Self {
            prop: prop.to_string(),
            kind,
            severity: kind.severity(),
            message,
        }
    }
}

/// Validate props against a definition's schema.
///
/// Properties hidden by their `conditional` rule are skipped. Props that the
/// schema does not declare are ignored.
pub fn validate_props(
    definition: &ComponentDefinition,
    props: &BTreeMap<String, PropValue>,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (name, schema) in &definition.prop_schema {
        if !schema.is_visible(props, &definition.prop_schema) {
            continue;
        }

        let value = props.get(name).filter(|v| !is_empty(v));

        let Some(value) = value else {
            if schema.required {
                issues.push(ValidationIssue::new(
                    name,
                    IssueKind::Required,
                    format!("{} is required", schema.label),
                ));
            }
            continue;
        };

        if !schema.kind.accepts(value) {
            issues.push(ValidationIssue::new(
                name,
                IssueKind::KindMismatch,
                format!("{} expects a {:?} value", schema.label, schema.kind),
            ));
            continue;
        }

        if let Some(measure) = measure(schema.kind, value) {
            if let Some(min) = schema.min {
                if measure < min {
                    issues.push(ValidationIssue::new(
                        name,
                        IssueKind::BelowMin,
                        format!("{} must be at least {}", schema.label, min),
                    ));
                }
            }
            if let Some(max) = schema.max {
                if measure > max {
                    issues.push(ValidationIssue::new(
                        name,
                        IssueKind::AboveMax,
                        format!("{} must be at most {}", schema.label, max),
                    ));
                }
            }
        }

        if let (Some(pattern), Some(text)) = (&schema.pattern, value.as_str()) {
            // Patterns are checked at registration, a bad one here is skipped.
            if let Ok(re) = Regex::new(pattern) {
                if !re.is_match(text) {
                    issues.push(ValidationIssue::new(
                        name,
                        IssueKind::Pattern,
                        format!("{} does not match {}", schema.label, pattern),
                    ));
                }
            }
        }

        if schema.kind == PropKind::Select && !schema.options.is_empty() {
            if let Some(text) = value.as_str() {
                if !schema.option_values().any(|o| o == text) {
                    issues.push(ValidationIssue::new(
                        name,
                        IssueKind::InvalidOption,
                        format!("\"{}\" is not a valid {}", text, schema.label),
                    ));
                }
            }
        }
    }

    issues
}

fn is_empty(value: &PropValue) -> bool {
    match value {
        PropValue::Null => true,
        PropValue::String(s) => s.is_empty(),
        _ => false,
    }
}

/// The quantity `min`/`max` bound for a kind
fn measure(kind: PropKind, value: &PropValue) -> Option<f64> {
    match kind {
        PropKind::Number => value.as_f64(),
        PropKind::String | PropKind::Color | PropKind::Image | PropKind::Select => {
            value.as_str().map(|s| s.chars().count() as f64)
        }
        PropKind::Array => value.as_array().map(|a| a.len() as f64),
        PropKind::Boolean | PropKind::Object => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PropSchema, SelectOption};
    use serde_json::json;

    fn definition() -> ComponentDefinition {
        ComponentDefinition::new("field", "Field")
            .with_prop("label", PropSchema::new(PropKind::String, "Label").required())
            .with_prop(
                "size",
                PropSchema::new(PropKind::Number, "Size").with_range(Some(8.0), Some(96.0)),
            )
            .with_prop(
                "email",
                PropSchema::new(PropKind::String, "Email").with_pattern(r"^[^@\s]+@[^@\s]+$"),
            )
            .with_prop(
                "mode",
                PropSchema::new(PropKind::Select, "Mode")
                    .with_default(json!("plain"))
                    .with_options(vec![
                        SelectOption { label: "Plain".into(), value: "plain".into() },
                        SelectOption { label: "Fancy".into(), value: "fancy".into() },
                    ]),
            )
            .with_prop(
                "flourish",
                PropSchema::new(PropKind::String, "Flourish")
                    .required()
                    .visible_when("mode", json!("fancy")),
            )
    }

    fn props(value: serde_json::Value) -> BTreeMap<String, PropValue> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_props_produce_no_issues() {
        let issues = validate_props(
            &definition(),
            &props(json!({ "label": "Name", "size": 12, "email": "a@b.c" })),
        );
        assert!(issues.is_empty(), "{:?}", issues);
    }

    #[test]
    fn test_all_issues_are_collected() {
        let issues = validate_props(
            &definition(),
            &props(json!({ "label": "", "size": 200, "email": "nope" })),
        );

        let kinds: Vec<IssueKind> = issues.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![IssueKind::Pattern, IssueKind::Required, IssueKind::AboveMax]
        );
        assert!(issues.iter().all(|i| i.severity == Severity::Error));
    }

    #[test]
    fn test_below_min() {
        let issues = validate_props(&definition(), &props(json!({ "label": "x", "size": 2 })));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::BelowMin);
        assert_eq!(issues[0].prop, "size");
    }

    #[test]
    fn test_hidden_props_are_not_checked() {
        let issues = validate_props(&definition(), &props(json!({ "label": "x" })));
        assert!(issues.is_empty());

        let issues = validate_props(
            &definition(),
            &props(json!({ "label": "x", "mode": "fancy" })),
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].prop, "flourish");
        assert_eq!(issues[0].kind, IssueKind::Required);
    }

    #[test]
    fn test_kind_mismatch_and_invalid_option_are_warnings() {
        let issues = validate_props(
            &definition(),
            &props(json!({ "label": "x", "size": "big", "mode": "loud" })),
        );

        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
        assert!(issues.iter().any(|i| i.kind == IssueKind::KindMismatch));
        assert!(issues.iter().any(|i| i.kind == IssueKind::InvalidOption));
    }
}
