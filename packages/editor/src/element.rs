//! Element data model
//!
//! [`Element`] is the nested, serializable form of a document node: what
//! the code emitters walk and what document files contain. Inside the store
//! the same data lives flat in a [`Tree`](crate::Tree) arena.

use crate::ElementId;
use chrono::{DateTime, Utc};
use pagesmith_registry::PropValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canvas coordinates of an element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z,
        }
    }
}

/// Layout intent, edited independently of props
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f64>,
    #[serde(default)]
    pub responsive: bool,
    /// Locked elements cannot be dragged or reparented
    #[serde(default)]
    pub locked: bool,
}

/// Free-form style overrides
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Styling {
    /// CSS property → value
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Starts at 1, incremented on every change to the element
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Metadata {
    pub fn new(now: DateTime<Utc>, author: Option<String>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
            version: 1,
            author,
        }
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.version += 1;
        self.updated_at = now;
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::default(), None)
    }
}

/// A node of the document with its subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,

    #[serde(rename = "type")]
    pub type_id: String,

    #[serde(default)]
    pub props: BTreeMap<String, PropValue>,

    #[serde(default)]
    pub children: Vec<Element>,

    /// Lookup-only back-reference; `None` for roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ElementId>,

    #[serde(default)]
    pub position: Position,

    #[serde(default)]
    pub constraints: Constraints,

    #[serde(default)]
    pub styling: Styling,

    #[serde(default)]
    pub metadata: Metadata,
}

impl Element {
    /// Minimal element, mostly useful for tests and fixtures
    pub fn new(id: impl Into<ElementId>, type_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_id: type_id.into(),
            props: BTreeMap::new(),
            children: Vec::new(),
            parent: None,
            position: Position::default(),
            constraints: Constraints::default(),
            styling: Styling::default(),
            metadata: Metadata::default(),
        }
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: PropValue) -> Self {
        self.props.insert(name.into(), value);
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn with_child(mut self, mut child: Element) -> Self {
        child.parent = Some(self.id.clone());
        self.children.push(child);
        self
    }

    /// Number of elements in this subtree, including itself
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Element::subtree_len).sum::<usize>()
    }

    /// Visit this element and its descendants in pre-order
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id.as_str() == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }
}

/// Input of the `add` operation: an element without id and metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewElement {
    #[serde(rename = "type")]
    pub type_id: String,

    #[serde(default)]
    pub props: BTreeMap<String, PropValue>,

    #[serde(default)]
    pub position: Position,

    #[serde(default)]
    pub constraints: Constraints,

    #[serde(default)]
    pub styling: Styling,

    /// Parent to append to; `None` appends a root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ElementId>,

    /// Insertion index among the parent's children; appends when `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl NewElement {
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            ..Default::default()
        }
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: PropValue) -> Self {
        self.props.insert(name.into(), value);
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn inside(mut self, parent: &ElementId) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    pub fn at_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_styling(mut self, styling: Styling) -> Self {
        self.styling = styling;
        self
    }
}

/// Partial update merged onto an existing element.
///
/// Props merge key by key; a `null` value removes the key. The other fields
/// replace the current value when present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, PropValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<Styling>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prop(mut self, name: impl Into<String>, value: PropValue) -> Self {
        self.props.insert(name.into(), value);
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    pub fn styling(mut self, styling: Styling) -> Self {
        self.styling = Some(styling);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
            && self.position.is_none()
            && self.constraints.is_none()
            && self.styling.is_none()
            && self.author.is_none()
    }

    pub(crate) fn merge_props(&self, props: &mut BTreeMap<String, PropValue>) {
        for (name, value) in &self.props {
            if value.is_null() {
                props.remove(name);
            } else {
                props.insert(name.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_element_json_shape() {
        let json = r#"{
            "id": "el-1",
            "type": "card",
            "props": { "title": "Hello" },
            "position": { "x": 10, "y": 20 },
            "children": [
                { "id": "el-2", "type": "button", "parent": "el-1" }
            ]
        }"#;

        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.type_id, "card");
        assert_eq!(element.position, Position::new(10.0, 20.0));
        assert_eq!(element.metadata.version, 1);
        assert_eq!(element.children[0].parent, Some(ElementId::from("el-1")));
        assert_eq!(element.subtree_len(), 2);
        assert!(element.find("el-2").is_some());
    }

    #[test]
    fn test_patch_merges_props_and_removes_nulls() {
        let mut props = BTreeMap::new();
        props.insert("text".to_string(), json!("Old"));
        props.insert("variant".to_string(), json!("primary"));

        let patch = ElementPatch::new()
            .prop("text", json!("New"))
            .prop("variant", serde_json::Value::Null)
            .prop("disabled", json!(true));
        patch.merge_props(&mut props);

        assert_eq!(props.get("text"), Some(&json!("New")));
        assert_eq!(props.get("disabled"), Some(&json!(true)));
        assert!(!props.contains_key("variant"));
    }

    #[test]
    fn test_empty_patch() {
        assert!(ElementPatch::new().is_empty());
        assert!(!ElementPatch::new().position(Position::new(1.0, 1.0)).is_empty());
    }
}
