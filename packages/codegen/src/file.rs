use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Component,
    Style,
    Test,
    Story,
    Config,
    Documentation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    TypeScript,
    JavaScript,
    Tsx,
    Jsx,
    Vue,
    Html,
    Css,
    Json,
    Markdown,
}

impl SourceLanguage {
    /// Script language for auxiliary files next to a component
    pub fn script(typed: bool) -> Self {
        if typed {
            SourceLanguage::TypeScript
        } else {
            SourceLanguage::JavaScript
        }
    }

    /// JSX-capable script language
    pub fn jsx(typed: bool) -> Self {
        if typed {
            SourceLanguage::Tsx
        } else {
            SourceLanguage::Jsx
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SourceLanguage::TypeScript => "ts",
            SourceLanguage::JavaScript => "js",
            SourceLanguage::Tsx => "tsx",
            SourceLanguage::Jsx => "jsx",
            SourceLanguage::Vue => "vue",
            SourceLanguage::Html => "html",
            SourceLanguage::Css => "css",
            SourceLanguage::Json => "json",
            SourceLanguage::Markdown => "md",
        }
    }
}

/// One generated file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Path relative to the project root
    pub path: String,
    /// File name (last path segment)
    pub name: String,
    pub content: String,
    pub kind: FileKind,
    pub language: SourceLanguage,
}

impl FileDescriptor {
    pub fn new(
        path: impl Into<String>,
        content: impl Into<String>,
        kind: FileKind,
        language: SourceLanguage,
    ) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or(&path).to_string();
        Self {
            path,
            name,
            content: content.into(),
            kind,
            language,
        }
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    pub fn byte_size(&self) -> usize {
        self.content.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_path() {
        let file = FileDescriptor::new(
            "src/components/ButtonEl1.tsx",
            "x\ny\n",
            FileKind::Component,
            SourceLanguage::Tsx,
        );
        assert_eq!(file.name, "ButtonEl1.tsx");
        assert_eq!(file.line_count(), 2);
        assert_eq!(
            serde_json::to_value(&file).unwrap()["language"],
            serde_json::json!("tsx")
        );
    }
}
