use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of an element, unique within a document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Sequential ID generator for elements within a document.
///
/// IDs are `{prefix}-{n}`. The counter only moves forward, so an id freed by
/// a delete (and possibly restored by undo) is never handed out again.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            count: 0,
        }
    }

    /// Generate the next sequential id
    pub fn next_id(&mut self) -> ElementId {
        self.count += 1;
        ElementId(format!("{}-{}", self.prefix, self.count))
    }

    /// Advance past an id issued elsewhere (e.g. loaded from a file) so the
    /// generator never produces it.
    pub fn observe(&mut self, id: &ElementId) {
        let Some(rest) = id.as_str().strip_prefix(&self.prefix) else {
            return;
        };
        if let Some(n) = rest.strip_prefix('-').and_then(|n| n.parse::<u64>().ok()) {
            self.count = self.count.max(n);
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("el")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::new("el");

        assert_eq!(gen.next_id().as_str(), "el-1");
        assert_eq!(gen.next_id().as_str(), "el-2");
        assert_eq!(gen.next_id().as_str(), "el-3");
    }

    #[test]
    fn test_observe_skips_loaded_ids() {
        let mut gen = IdGenerator::new("el");
        gen.observe(&ElementId::from("el-41"));
        gen.observe(&ElementId::from("el-7"));
        gen.observe(&ElementId::from("other-99"));
        gen.observe(&ElementId::from("el-abc"));

        assert_eq!(gen.next_id().as_str(), "el-42");
    }
}
