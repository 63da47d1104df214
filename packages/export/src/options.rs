use pagesmith_registry::Target;
use serde::{Deserialize, Serialize};

/// How generated component files are grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PackageScope {
    /// All components in one file
    SingleFile,
    /// One file per exported element
    #[default]
    PerComponent,
    /// Component files plus manifest, build config, entry point and styles
    FullProject,
}

/// Styling approach of a full project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StylingChoice {
    #[default]
    Css,
    CssModules,
    Tailwind,
    StyledComponents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Optimizations {
    pub minify: bool,
    pub tree_shake: bool,
    pub code_split: bool,
}

impl Optimizations {
    pub fn enabled_count(&self) -> usize {
        [self.minify, self.tree_shake, self.code_split]
            .into_iter()
            .filter(|on| *on)
            .count()
    }
}

/// Export configuration; also the `export` block of `pagesmith.config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    pub target: Target,
    pub typed_output: bool,
    pub include_tests: bool,
    pub include_story_files: bool,
    pub package_scope: PackageScope,
    pub styling: StylingChoice,
    pub optimizations: Optimizations,
    pub project_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            target: Target::React,
            typed_output: false,
            include_tests: false,
            include_story_files: false,
            package_scope: PackageScope::default(),
            styling: StylingChoice::default(),
            optimizations: Optimizations::default(),
            project_name: "pagesmith-app".to_string(),
        }
    }
}

impl ExportOptions {
    pub fn for_target(target: Target) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn typed(mut self, typed_output: bool) -> Self {
        self.typed_output = typed_output;
        self
    }

    pub fn scope(mut self, package_scope: PackageScope) -> Self {
        self.package_scope = package_scope;
        self
    }

    pub fn with_tests(mut self) -> Self {
        self.include_tests = true;
        self
    }

    pub fn with_stories(mut self) -> Self {
        self.include_story_files = true;
        self
    }

    pub fn styled_with(mut self, styling: StylingChoice) -> Self {
        self.styling = styling;
        self
    }
}
