use crate::{PropSchema, PropValue, Target};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catalog entry describing one component type.
///
/// Definitions are immutable once registered. Templates contain `{{name}}`
/// placeholders that the code emitters expand; besides the property names,
/// `children`, `style`, `className` and `id` are reserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    #[serde(rename = "type")]
    pub type_id: String,

    /// Human-readable name shown in the component palette
    pub name: String,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether elements of this type may contain child elements
    #[serde(default)]
    pub accepts_children: bool,

    #[serde(default)]
    pub prop_schema: BTreeMap<String, PropSchema>,

    /// Explicit starting props, layered over the schema defaults
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub default_props: BTreeMap<String, PropValue>,

    #[serde(default)]
    pub export_templates: BTreeMap<Target, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub test_templates: BTreeMap<Target, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub story_templates: BTreeMap<Target, String>,
}

fn default_category() -> String {
    "general".to_string()
}

impl ComponentDefinition {
    pub fn new(type_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            name: name.into(),
            category: default_category(),
            description: None,
            accepts_children: false,
            prop_schema: BTreeMap::new(),
            default_props: BTreeMap::new(),
            export_templates: BTreeMap::new(),
            test_templates: BTreeMap::new(),
            story_templates: BTreeMap::new(),
        }
    }

    pub fn with_prop(mut self, name: impl Into<String>, schema: PropSchema) -> Self {
        self.prop_schema.insert(name.into(), schema);
        self
    }

    pub fn with_template(mut self, target: Target, template: impl Into<String>) -> Self {
        self.export_templates.insert(target, template.into());
        self
    }

    pub fn with_children(mut self) -> Self {
        self.accepts_children = true;
        self
    }

    pub fn template(&self, target: Target) -> Option<&str> {
        self.export_templates.get(&target).map(String::as_str)
    }

    pub fn test_template(&self, target: Target) -> Option<&str> {
        self.test_templates.get(&target).map(String::as_str)
    }

    pub fn story_template(&self, target: Target) -> Option<&str> {
        self.story_templates.get(&target).map(String::as_str)
    }

    pub fn schema(&self, prop: &str) -> Option<&PropSchema> {
        self.prop_schema.get(prop)
    }

    /// Props a new element of this type starts with
    pub fn defaults(&self) -> BTreeMap<String, PropValue> {
        let mut props: BTreeMap<String, PropValue> = self
            .prop_schema
            .iter()
            .filter_map(|(name, schema)| schema.default.clone().map(|v| (name.clone(), v)))
            .collect();

        for (name, value) in &self.default_props {
            props.insert(name.clone(), value.clone());
        }

        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PropKind;
    use serde_json::json;

    #[test]
    fn test_defaults_layer_explicit_props_over_schema() {
        let mut def = ComponentDefinition::new("button", "Button")
            .with_prop(
                "text",
                PropSchema::new(PropKind::String, "Label").with_default(json!("Button")),
            )
            .with_prop("disabled", PropSchema::new(PropKind::Boolean, "Disabled"));
        def.default_props.insert("text".to_string(), json!("Go"));

        let defaults = def.defaults();
        assert_eq!(defaults.get("text"), Some(&json!("Go")));
        assert!(!defaults.contains_key("disabled"));
    }

    #[test]
    fn test_deserialize_definition() {
        let json = r#"{
            "type": "divider",
            "name": "Divider",
            "exportTemplates": { "html": "<hr id=\"{{id}}\">" }
        }"#;

        let def: ComponentDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.type_id, "divider");
        assert_eq!(def.category, "general");
        assert_eq!(def.template(Target::Html), Some("<hr id=\"{{id}}\">"));
        assert_eq!(def.template(Target::React), None);
    }
}
