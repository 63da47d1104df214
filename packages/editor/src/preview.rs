//! Preview resolution
//!
//! Turns the tree into what a canvas needs to paint: resolved props with
//! registry defaults filled in, a display label, and validation issues.
//! Elements whose type is not in the registry become placeholders so the
//! document always stays paintable.

use crate::{ElementId, Tree};
use pagesmith_registry::{validate_props, PropValue, Registry, ValidationIssue};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewNode {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub type_id: String,
    /// Set when the type is unknown to the registry
    pub placeholder: bool,
    pub label: String,
    /// Element props layered over the definition's defaults
    pub props: BTreeMap<String, PropValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ValidationIssue>,
    pub children: Vec<PreviewNode>,
}

/// Resolve every root of `tree`, in order
pub fn preview_tree(tree: &Tree, registry: &Registry) -> Vec<PreviewNode> {
    tree.roots()
        .iter()
        .filter_map(|id| preview_node(tree, registry, id))
        .collect()
}

fn preview_node(tree: &Tree, registry: &Registry, id: &ElementId) -> Option<PreviewNode> {
    let node = tree.get(id.as_str())?;
    let children = node
        .children
        .iter()
        .filter_map(|c| preview_node(tree, registry, c))
        .collect();

    let Some(definition) = registry.get(&node.type_id) else {
        warn!(id = %node.id, type_id = %node.type_id, "Unknown component type in preview");
        return Some(PreviewNode {
            id: node.id.clone(),
            type_id: node.type_id.clone(),
            placeholder: true,
            label: format!("Unknown component \"{}\"", node.type_id),
            props: node.props.clone(),
            issues: Vec::new(),
            children,
        });
    };

    let mut props = definition.defaults();
    props.extend(node.props.iter().map(|(k, v)| (k.clone(), v.clone())));

    Some(PreviewNode {
        id: node.id.clone(),
        type_id: node.type_id.clone(),
        placeholder: false,
        label: definition.name.clone(),
        issues: validate_props(definition, &node.props),
        props,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Element;
    use serde_json::json;

    #[test]
    fn test_unknown_type_becomes_placeholder() {
        let tree = Tree::from_elements(&[
            Element::new("a", "card").with_child(Element::new("b", "hologram")),
        ])
        .unwrap();

        let preview = preview_tree(&tree, &Registry::builtin());
        assert_eq!(preview.len(), 1);
        assert!(!preview[0].placeholder);

        let child = &preview[0].children[0];
        assert!(child.placeholder);
        assert_eq!(child.label, "Unknown component \"hologram\"");
    }

    #[test]
    fn test_defaults_filled_under_element_props() {
        let tree = Tree::from_elements(&[
            Element::new("a", "button").with_prop("text", json!("Go")),
        ])
        .unwrap();

        let preview = preview_tree(&tree, &Registry::builtin());
        assert_eq!(preview[0].props.get("text"), Some(&json!("Go")));
        assert_eq!(preview[0].props.get("variant"), Some(&json!("primary")));
    }
}
