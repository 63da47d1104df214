use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output framework a component can be exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    React,
    Vue,
    Angular,
    Html,
}

impl Target {
    pub const ALL: [Target; 4] = [Target::React, Target::Vue, Target::Angular, Target::Html];

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::React => "react",
            Target::Vue => "vue",
            Target::Angular => "angular",
            Target::Html => "html",
        }
    }

    /// Whether the target language always carries static types,
    /// independent of export options.
    pub fn always_typed(&self) -> bool {
        matches!(self, Target::Angular)
    }

    /// Whether the target can carry static types at all.
    pub fn supports_types(&self) -> bool {
        !matches!(self, Target::Html)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "react" => Ok(Target::React),
            "vue" => Ok(Target::Vue),
            "angular" => Ok(Target::Angular),
            "html" => Ok(Target::Html),
            other => Err(format!(
                "Unknown target: {}. Use: react, vue, angular, or html",
                other
            )),
        }
    }
}
