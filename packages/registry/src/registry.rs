use crate::{ComponentDefinition, PropKind, PropValue, RegistryError};
use regex::Regex;
use std::collections::BTreeMap;

const BUILTIN_CATALOG: &str = include_str!("catalog.json");

/// Mapping from component type id to its definition
#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: BTreeMap<String, ComponentDefinition>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the bundled component catalog
    pub fn builtin() -> Self {
        // The bundled catalog is covered by `test_builtin_catalog_loads`.
        Self::from_json(BUILTIN_CATALOG).expect("bundled catalog.json is valid")
    }

    /// Load a registry from a JSON array of definitions
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.extend_from_json(json)?;
        Ok(registry)
    }

    /// Register every definition in a JSON array
    pub fn extend_from_json(&mut self, json: &str) -> Result<(), RegistryError> {
        let definitions: Vec<ComponentDefinition> = serde_json::from_str(json)?;
        for definition in definitions {
            self.register(definition)?;
        }
        Ok(())
    }

    /// Register a single definition after checking it is well formed
    pub fn register(&mut self, definition: ComponentDefinition) -> Result<(), RegistryError> {
        if definition.type_id.trim().is_empty() {
            return Err(RegistryError::EmptyType);
        }

        if self.definitions.contains_key(&definition.type_id) {
            return Err(RegistryError::DuplicateType(definition.type_id));
        }

        check_definition(&definition)?;

        self.definitions
            .insert(definition.type_id.clone(), definition);
        Ok(())
    }

    pub fn get(&self, type_id: &str) -> Option<&ComponentDefinition> {
        self.definitions.get(type_id)
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.definitions.contains_key(type_id)
    }

    /// Registered type ids in sorted order
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.definitions.values()
    }

    /// Definitions grouped by palette category
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&ComponentDefinition>> {
        let mut groups: BTreeMap<&str, Vec<&ComponentDefinition>> = BTreeMap::new();
        for definition in self.definitions.values() {
            groups
                .entry(definition.category.as_str())
                .or_default()
                .push(definition);
        }
        groups
    }

    /// Starting props for a type; empty for unknown types
    pub fn default_props(&self, type_id: &str) -> BTreeMap<String, PropValue> {
        self.get(type_id)
            .map(ComponentDefinition::defaults)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn check_definition(definition: &ComponentDefinition) -> Result<(), RegistryError> {
    for (prop, schema) in &definition.prop_schema {
        if let Some(pattern) = &schema.pattern {
            Regex::new(pattern).map_err(|source| RegistryError::InvalidPattern {
                type_id: definition.type_id.clone(),
                prop: prop.clone(),
                source,
            })?;
        }

        if schema.kind == PropKind::Select && schema.options.is_empty() {
            return Err(RegistryError::MissingOptions {
                type_id: definition.type_id.clone(),
                prop: prop.clone(),
            });
        }

        if let Some(rule) = &schema.conditional {
            if !definition.prop_schema.contains_key(&rule.prop) {
                return Err(RegistryError::UnknownConditional {
                    type_id: definition.type_id.clone(),
                    prop: prop.clone(),
                    depends_on: rule.prop.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PropSchema, Target};

    #[test]
    fn test_builtin_catalog_loads() {
        let registry = Registry::builtin();
        assert!(!registry.is_empty());

        for type_id in ["button", "text", "heading", "image", "container", "card", "input", "link"] {
            let def = registry.get(type_id).unwrap_or_else(|| panic!("missing {}", type_id));
            for target in Target::ALL {
                assert!(
                    def.template(target).is_some(),
                    "{} has no {} template",
                    type_id,
                    target
                );
            }
        }
    }

    #[test]
    fn test_builtin_container_types_accept_children() {
        let registry = Registry::builtin();
        assert!(registry.get("container").unwrap().accepts_children);
        assert!(registry.get("card").unwrap().accepts_children);
        assert!(!registry.get("button").unwrap().accepts_children);
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let mut registry = Registry::new();
        registry
            .register(ComponentDefinition::new("badge", "Badge"))
            .unwrap();

        let err = registry
            .register(ComponentDefinition::new("badge", "Badge 2"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateType(t) if t == "badge"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let def = ComponentDefinition::new("field", "Field").with_prop(
            "value",
            PropSchema::new(PropKind::String, "Value").with_pattern("(unclosed"),
        );

        let err = Registry::new().register(def).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidPattern { .. }));
    }

    #[test]
    fn test_select_without_options_rejected() {
        let def = ComponentDefinition::new("toggle", "Toggle")
            .with_prop("mode", PropSchema::new(PropKind::Select, "Mode"));

        let err = Registry::new().register(def).unwrap_err();
        assert!(matches!(err, RegistryError::MissingOptions { .. }));
    }

    #[test]
    fn test_conditional_must_reference_existing_prop() {
        let def = ComponentDefinition::new("toggle", "Toggle").with_prop(
            "label",
            PropSchema::new(PropKind::String, "Label")
                .visible_when("missing", serde_json::json!(true)),
        );

        let err = Registry::new().register(def).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownConditional { .. }));
    }

    #[test]
    fn test_default_props_for_unknown_type_is_empty() {
        let registry = Registry::builtin();
        assert!(registry.default_props("does-not-exist").is_empty());
        assert_eq!(
            registry.default_props("button").get("text"),
            Some(&serde_json::json!("Button"))
        );
    }

    #[test]
    fn test_from_json_reports_malformed_input() {
        assert!(matches!(
            Registry::from_json("{ not json"),
            Err(RegistryError::Json(_))
        ));
    }
}
