use crate::PropValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value kind of a component property.
///
/// Closed set: adding a kind means adding a variant here and handling it in
/// every exhaustive match (validation, type mapping, the property editor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropKind {
    String,
    Number,
    Boolean,
    Color,
    Image,
    Select,
    Array,
    Object,
}

impl PropKind {
    /// Check whether a JSON value has the shape this kind expects
    pub fn accepts(&self, value: &PropValue) -> bool {
        match self {
            PropKind::String | PropKind::Color | PropKind::Image | PropKind::Select => {
                value.is_string()
            }
            PropKind::Number => value.is_number(),
            PropKind::Boolean => value.is_boolean(),
            PropKind::Array => value.is_array(),
            PropKind::Object => value.is_object(),
        }
    }

    /// Kinds whose values are edited and validated as text
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            PropKind::String | PropKind::Color | PropKind::Image | PropKind::Select
        )
    }
}

/// One choice of a `select` property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Visibility rule: the property is only shown (and validated) while
/// another property holds a given value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    pub prop: String,
    pub equals: PropValue,
}

/// Schema of a single component property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropSchema {
    pub kind: PropKind,

    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<PropValue>,

    #[serde(default)]
    pub required: bool,

    /// Lower bound: numeric value for numbers, character count for text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Upper bound: numeric value for numbers, character count for text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<Conditional>,
}

impl PropSchema {
    pub fn new(kind: PropKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            default: None,
            required: false,
            min: None,
            max: None,
            pattern: None,
            options: Vec::new(),
            conditional: None,
        }
    }

    pub fn with_default(mut self, default: PropValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn visible_when(mut self, prop: impl Into<String>, equals: PropValue) -> Self {
        self.conditional = Some(Conditional {
            prop: prop.into(),
            equals,
        });
        self
    }

    /// Evaluate the visibility rule against the element's props, falling back
    /// to the controlling property's default when the element does not set it.
    pub fn is_visible(
        &self,
        props: &BTreeMap<String, PropValue>,
        schema: &BTreeMap<String, PropSchema>,
    ) -> bool {
        let Some(rule) = &self.conditional else {
            return true;
        };

        let current = props
            .get(&rule.prop)
            .or_else(|| schema.get(&rule.prop).and_then(|s| s.default.as_ref()));

        current == Some(&rule.equals)
    }

    pub fn option_values(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_accepts_matching_values() {
        assert!(PropKind::String.accepts(&json!("hi")));
        assert!(PropKind::Color.accepts(&json!("#fff")));
        assert!(PropKind::Number.accepts(&json!(4.5)));
        assert!(PropKind::Boolean.accepts(&json!(true)));
        assert!(PropKind::Array.accepts(&json!([1, 2])));
        assert!(PropKind::Object.accepts(&json!({ "a": 1 })));

        assert!(!PropKind::Number.accepts(&json!("4")));
        assert!(!PropKind::Boolean.accepts(&json!(0)));
    }

    #[test]
    fn test_conditional_uses_default_of_controlling_prop() {
        let mut schema = BTreeMap::new();
        schema.insert(
            "variant".to_string(),
            PropSchema::new(PropKind::Select, "Variant").with_default(json!("primary")),
        );
        let href = PropSchema::new(PropKind::String, "Link").visible_when("variant", json!("link"));

        let mut props = BTreeMap::new();
        assert!(!href.is_visible(&props, &schema));

        props.insert("variant".to_string(), json!("link"));
        assert!(href.is_visible(&props, &schema));
    }

    #[test]
    fn test_schema_deserializes_camel_case() {
        let json = r#"{
            "kind": "select",
            "label": "Size",
            "default": "md",
            "options": [
                { "label": "Small", "value": "sm" },
                { "label": "Medium", "value": "md" }
            ]
        }"#;

        let schema: PropSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.kind, PropKind::Select);
        assert_eq!(schema.option_values().collect::<Vec<_>>(), vec!["sm", "md"]);
        assert!(!schema.required);
    }
}
