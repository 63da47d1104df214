//! Prop value types in generated code

use pagesmith_registry::{PropKind, PropSchema, Target};
use std::collections::BTreeMap;

/// Maps schema kinds onto a target language's type syntax.
/// Implementations can target different languages.
pub trait TypeMapping: Send + Sync {
    /// Type of a bare kind
    fn type_name(&self, kind: PropKind) -> &'static str;

    /// Type of one schema entry; may be narrower than its kind
    fn schema_type(&self, schema: &PropSchema) -> String {
        self.type_name(schema.kind).to_string()
    }

    /// Single property (name + type + optional marker)
    fn property(&self, name: &str, schema: &PropSchema) -> String;

    /// Complete interface for a prop schema
    fn interface(&self, name: &str, schema: &BTreeMap<String, PropSchema>) -> String;
}

/// TypeScript mapping used by the React, Vue and Angular targets
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptMapping;

impl TypeMapping for TypeScriptMapping {
    fn type_name(&self, kind: PropKind) -> &'static str {
        match kind {
            PropKind::String | PropKind::Color | PropKind::Image | PropKind::Select => "string",
            PropKind::Number => "number",
            PropKind::Boolean => "boolean",
            PropKind::Array => "unknown[]",
            PropKind::Object => "Record<string, unknown>",
        }
    }

    /// Select props narrow to a union of their option literals
    fn schema_type(&self, schema: &PropSchema) -> String {
        if schema.kind == PropKind::Select {
            let literals: Vec<String> = schema
                .option_values()
                .map(|v| serde_json::Value::String(v.to_string()).to_string())
                .collect();
            if !literals.is_empty() {
                return literals.join(" | ");
            }
        }
        self.type_name(schema.kind).to_string()
    }

    fn property(&self, name: &str, schema: &PropSchema) -> String {
        let optional_marker = if schema.required { "" } else { "?" };
        format!("{}{}: {};", name, optional_marker, self.schema_type(schema))
    }

    fn interface(&self, name: &str, schema: &BTreeMap<String, PropSchema>) -> String {
        let mut parts = vec![format!("interface {} {{", name)];
        for (prop, entry) in schema {
            parts.push(format!("  {}", self.property(prop, entry)));
        }
        parts.push("}".to_string());
        parts.join("\n")
    }
}

/// Type mapping of a target; `None` for untyped targets
pub fn type_mapping(target: Target) -> Option<&'static dyn TypeMapping> {
    static TYPESCRIPT: TypeScriptMapping = TypeScriptMapping;
    match target {
        Target::React | Target::Vue | Target::Angular => Some(&TYPESCRIPT),
        Target::Html => None,
    }
}
