//! Editor configuration

use crate::GridConfig;
use serde::{Deserialize, Serialize};

/// Offset applied to a duplicated subtree's root
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Default for Offset {
    fn default() -> Self {
        Self { x: 20.0, y: 20.0 }
    }
}

/// Settings for a [`DocumentStore`](crate::DocumentStore).
///
/// Doubles as the `editor` block of `pagesmith.config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub grid: GridConfig,

    /// Maximum undo levels (0 = unlimited)
    pub history_limit: usize,

    pub duplicate_offset: Offset,

    /// Snap positions of newly added elements
    pub snap_on_add: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            history_limit: 0,
            duplicate_offset: Offset::default(),
            snap_on_add: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "grid": { "size": 10 }, "historyLimit": 5 }"#).unwrap();

        assert_eq!(config.grid.size, 10.0);
        assert!(config.grid.enabled);
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.duplicate_offset, Offset { x: 20.0, y: 20.0 });
        assert!(config.snap_on_add);
    }
}
