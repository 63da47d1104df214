use anyhow::Context;
use pagesmith_editor::EditorConfig;
use pagesmith_export::ExportOptions;
use pagesmith_registry::Registry;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "pagesmith.config.json";

/// Pagesmith configuration file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Export defaults; command-line flags override them
    pub export: ExportOptions,

    /// Editing defaults (grid, history limit, duplicate offset)
    pub editor: EditorConfig,

    /// Extra component definitions merged over the built-in catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Built-in catalog plus the configured extra definitions
    pub fn registry(&self, cwd: &Path) -> anyhow::Result<Registry> {
        let mut registry = Registry::builtin();
        if let Some(catalog) = &self.catalog {
            let path = cwd.join(catalog);
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Cannot read catalog {}", path.display()))?;
            registry
                .extend_from_json(&json)
                .with_context(|| format!("Cannot load catalog {}", path.display()))?;
        }
        Ok(registry)
    }
}
