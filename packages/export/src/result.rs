use pagesmith_codegen::{EmitWarning, FileDescriptor};
use pagesmith_editor::ElementId;
use serde::{Deserialize, Serialize};

/// An element that could not be exported, or a failure of the whole
/// export when no element is named
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportIssue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    pub message: String,
}

impl ExportIssue {
    pub fn element(id: &ElementId, type_id: &str, message: impl Into<String>) -> Self {
        Self {
            element_id: Some(id.clone()),
            element_type: Some(type_id.to_string()),
            message: message.into(),
        }
    }

    pub fn general(message: impl Into<String>) -> Self {
        Self {
            element_id: None,
            element_type: None,
            message: message.into(),
        }
    }
}

/// Size figures of an export. The score is advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetrics {
    pub file_count: usize,
    pub line_count: usize,
    pub byte_size: usize,
    pub element_count: usize,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    /// `true` iff `errors` is empty
    pub success: bool,
    pub files: Vec<FileDescriptor>,
    pub errors: Vec<ExportIssue>,
    pub warnings: Vec<EmitWarning>,
    pub metrics: ExportMetrics,
}

impl ExportResult {
    /// Result of an export that produced nothing at all
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            errors: vec![ExportIssue::general(message)],
            ..Self::default()
        }
    }

    pub fn file(&self, path: &str) -> Option<&FileDescriptor> {
        self.files.iter().find(|file| file.path == path)
    }
}
