use pagesmith_editor::ElementId;
use pagesmith_registry::Target;
use thiserror::Error;

/// Errors that abort emission of one element tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmitError {
    #[error("Component \"{type_id}\" has no {target} template")]
    MissingTemplate { type_id: String, target: Target },

    #[error("Element {element_id} is nested deeper than {max} levels")]
    DepthExceeded { element_id: ElementId, max: usize },
}

/// Non-fatal problem found while emitting
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmitWarning {
    pub element_id: ElementId,
    pub element_type: String,
    pub message: String,
}

impl EmitWarning {
    pub fn unknown_type(element_id: &ElementId, element_type: &str) -> Self {
        Self {
            element_id: element_id.clone(),
            element_type: element_type.to_string(),
            message: format!("Unknown component type \"{}\"", element_type),
        }
    }
}
