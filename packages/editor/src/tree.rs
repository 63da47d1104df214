//! # Element Arena
//!
//! Flat table of nodes keyed by id. Structure lives in the ordered
//! `children` lists; `parent` is a lookup cache kept in sync at every
//! insert, remove and reparent.

use crate::{Constraints, Element, ElementId, Metadata, MutationError, Position, Styling};
use pagesmith_registry::PropValue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One element as stored in the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub type_id: String,
    pub props: BTreeMap<String, PropValue>,
    pub children: Vec<ElementId>,
    pub parent: Option<ElementId>,
    pub position: Position,
    pub constraints: Constraints,
    pub styling: Styling,
    pub metadata: Metadata,
}

impl Node {
    /// Copy of an element's own fields, without its subtree
    fn from_element(element: &Element, parent: Option<ElementId>) -> Self {
        Self {
            id: element.id.clone(),
            type_id: element.type_id.clone(),
            props: element.props.clone(),
            children: Vec::new(),
            parent,
            position: element.position,
            constraints: element.constraints.clone(),
            styling: element.styling.clone(),
            metadata: element.metadata.clone(),
        }
    }
}

/// The element tree of a document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tree {
    nodes: BTreeMap<ElementId, Node>,
    roots: Vec<ElementId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from nested elements.
    ///
    /// `parent` fields are recomputed from the nesting. A `parent` that is set
    /// but disagrees with the nesting, or an id used twice, is an error.
    pub fn from_elements(elements: &[Element]) -> Result<Self, MutationError> {
        let mut tree = Self::new();
        for element in elements {
            tree.load_element(element, None)?;
        }
        Ok(tree)
    }

    fn load_element(
        &mut self,
        element: &Element,
        parent: Option<&ElementId>,
    ) -> Result<(), MutationError> {
        if let Some(declared) = &element.parent {
            if Some(declared) != parent {
                return Err(MutationError::InvalidStructure(format!(
                    "{} declares parent {} but is nested under {}",
                    element.id,
                    declared,
                    parent.map(ElementId::as_str).unwrap_or("the root")
                )));
            }
        }

        let node = Node::from_element(element, parent.cloned());
        self.insert(node, parent, None)?;

        for child in &element.children {
            self.load_element(child, Some(&element.id))?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// All nodes in id order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ElementId> {
        self.nodes.keys()
    }

    /// Children of `parent`, or the roots for `None`
    pub fn children_of(&self, parent: Option<&ElementId>) -> Option<&[ElementId]> {
        match parent {
            Some(id) => self.nodes.get(id.as_str()).map(|n| n.children.as_slice()),
            None => Some(&self.roots),
        }
    }

    /// Position of `id` within its parent's children (or the roots)
    pub fn index_of(&self, id: &str) -> Option<usize> {
        let node = self.nodes.get(id)?;
        self.children_of(node.parent.as_ref())?
            .iter()
            .position(|c| c.as_str() == id)
    }

    /// `id` and all of its descendants, pre-order
    pub fn descendants(&self, id: &str) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<&ElementId> = match self.nodes.get_key_value(id) {
            Some((key, _)) => vec![key],
            None => return out,
        };

        while let Some(current) = stack.pop() {
            out.push(current.clone());
            if let Some(node) = self.nodes.get(current) {
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }

    /// Whether `ancestor` is `id` itself or one of its ancestors
    pub fn is_ancestor_or_self(&self, ancestor: &str, id: &str) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self
                .nodes
                .get(cur)
                .and_then(|n| n.parent.as_ref())
                .map(ElementId::as_str);
        }
        false
    }

    /// Insert a childless node under `parent` (or as a root).
    ///
    /// `index` is clamped to the sibling count; `None` appends.
    pub(crate) fn insert(
        &mut self,
        mut node: Node,
        parent: Option<&ElementId>,
        index: Option<usize>,
    ) -> Result<(), MutationError> {
        if self.nodes.contains_key(&node.id) {
            return Err(MutationError::DuplicateId(node.id));
        }
        if !node.children.is_empty() {
            return Err(MutationError::InvalidStructure(
                "Only childless nodes can be inserted".to_string(),
            ));
        }

        let siblings = match parent {
            Some(parent_id) => {
                &mut self
                    .nodes
                    .get_mut(parent_id)
                    .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?
                    .children
            }
            None => &mut self.roots,
        };

        let at = index.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(at, node.id.clone());

        node.parent = parent.cloned();
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Remove `id` and its whole subtree; returns the removed ids pre-order
    pub(crate) fn remove_subtree(&mut self, id: &str) -> Result<Vec<ElementId>, MutationError> {
        let parent = self
            .nodes
            .get(id)
            .ok_or_else(|| MutationError::NodeNotFound(ElementId::from(id)))?
            .parent
            .clone();

        self.detach(id, parent.as_ref());

        let removed = self.descendants(id);
        for removed_id in &removed {
            self.nodes.remove(removed_id);
        }
        Ok(removed)
    }

    /// Move `id` under `new_parent` at `index` (clamped; appends when `None`)
    pub(crate) fn reparent(
        &mut self,
        id: &str,
        new_parent: Option<&ElementId>,
        index: Option<usize>,
    ) -> Result<(), MutationError> {
        let old_parent = self
            .nodes
            .get(id)
            .ok_or_else(|| MutationError::NodeNotFound(ElementId::from(id)))?
            .parent
            .clone();

        if let Some(target) = new_parent {
            if !self.nodes.contains_key(target) {
                return Err(MutationError::ParentNotFound(target.clone()));
            }
            if self.is_ancestor_or_self(id, target.as_str()) {
                return Err(MutationError::CycleDetected);
            }
        }

        self.detach(id, old_parent.as_ref());

        let key = ElementId::from(id);
        let siblings = match new_parent {
            Some(parent_id) => match self.nodes.get_mut(parent_id) {
                Some(parent) => &mut parent.children,
                None => return Err(MutationError::ParentNotFound(parent_id.clone())),
            },
            None => &mut self.roots,
        };
        let at = index.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(at, key);

        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = new_parent.cloned();
        }
        Ok(())
    }

    fn detach(&mut self, id: &str, parent: Option<&ElementId>) {
        let siblings = match parent {
            Some(parent_id) => match self.nodes.get_mut(parent_id) {
                Some(p) => &mut p.children,
                None => return,
            },
            None => &mut self.roots,
        };
        siblings.retain(|c| c.as_str() != id);
    }

    /// Nested copy of the subtree rooted at `id`
    pub fn materialize(&self, id: &str) -> Option<Element> {
        let node = self.nodes.get(id)?;
        Some(Element {
            id: node.id.clone(),
            type_id: node.type_id.clone(),
            props: node.props.clone(),
            children: node
                .children
                .iter()
                .filter_map(|c| self.materialize(c.as_str()))
                .collect(),
            parent: node.parent.clone(),
            position: node.position,
            constraints: node.constraints.clone(),
            styling: node.styling.clone(),
            metadata: node.metadata.clone(),
        })
    }

    /// Nested copies of every root, in order
    pub fn materialize_roots(&self) -> Vec<Element> {
        self.roots
            .iter()
            .filter_map(|id| self.materialize(id.as_str()))
            .collect()
    }

    /// Verify the arena invariants: every node reachable exactly once from
    /// the roots, and every `parent` matching the list that holds the node.
    pub fn check_integrity(&self) -> Result<(), MutationError> {
        let mut seen: BTreeSet<&ElementId> = BTreeSet::new();
        let mut stack: Vec<(&ElementId, Option<&ElementId>)> =
            self.roots.iter().map(|id| (id, None)).collect();

        while let Some((id, expected_parent)) = stack.pop() {
            if !seen.insert(id) {
                return Err(MutationError::InvalidStructure(format!(
                    "{} is reachable more than once",
                    id
                )));
            }

            let node = self.nodes.get(id).ok_or_else(|| {
                MutationError::InvalidStructure(format!("{} is listed but not stored", id))
            })?;

            if node.parent.as_ref() != expected_parent {
                return Err(MutationError::InvalidStructure(format!(
                    "{} has a stale parent reference",
                    id
                )));
            }

            stack.extend(node.children.iter().map(|c| (c, Some(id))));
        }

        if seen.len() != self.nodes.len() {
            return Err(MutationError::InvalidStructure(format!(
                "{} orphaned node(s)",
                self.nodes.len() - seen.len()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        let card = Element::new("a", "card")
            .with_child(Element::new("b", "button"))
            .with_child(Element::new("c", "container").with_child(Element::new("d", "text")));

        Tree::from_elements(&[card, Element::new("e", "image")]).unwrap()
    }

    #[test]
    fn test_from_elements_builds_parent_links() {
        let tree = sample();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.roots(), &[ElementId::from("a"), ElementId::from("e")]);
        assert_eq!(tree.get("d").unwrap().parent, Some(ElementId::from("c")));
        tree.check_integrity().unwrap();
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Tree::from_elements(&[Element::new("a", "x"), Element::new("a", "y")]).unwrap_err();
        assert_eq!(err, MutationError::DuplicateId(ElementId::from("a")));
    }

    #[test]
    fn test_mismatched_parent_rejected() {
        let mut child = Element::new("b", "button");
        child.parent = Some(ElementId::from("zzz"));
        let mut root = Element::new("a", "card");
        root.children.push(child);

        assert!(matches!(
            Tree::from_elements(&[root]),
            Err(MutationError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_descendants_pre_order() {
        let tree = sample();
        let ids: Vec<String> = tree.descendants("a").iter().map(|i| i.to_string()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert!(tree.descendants("missing").is_empty());
    }

    #[test]
    fn test_remove_subtree_cascades() {
        let mut tree = sample();
        let removed = tree.remove_subtree("c").unwrap();

        assert_eq!(removed, vec![ElementId::from("c"), ElementId::from("d")]);
        assert!(!tree.contains("d"));
        assert_eq!(tree.get("a").unwrap().children, vec![ElementId::from("b")]);
        tree.check_integrity().unwrap();
    }

    #[test]
    fn test_reparent_rejects_cycles() {
        let mut tree = sample();
        assert_eq!(
            tree.reparent("a", Some(&ElementId::from("d")), None),
            Err(MutationError::CycleDetected)
        );
        assert_eq!(
            tree.reparent("a", Some(&ElementId::from("a")), None),
            Err(MutationError::CycleDetected)
        );
        tree.check_integrity().unwrap();
    }

    #[test]
    fn test_reparent_to_root_with_index() {
        let mut tree = sample();
        tree.reparent("d", None, Some(0)).unwrap();

        assert_eq!(tree.roots()[0], ElementId::from("d"));
        assert_eq!(tree.get("d").unwrap().parent, None);
        assert!(tree.get("c").unwrap().children.is_empty());
        assert_eq!(tree.index_of("e"), Some(2));
        tree.check_integrity().unwrap();
    }

    #[test]
    fn test_materialize_round_trips_structure() {
        let tree = sample();
        let roots = tree.materialize_roots();
        let rebuilt = Tree::from_elements(&roots).unwrap();
        assert_eq!(rebuilt, tree);
    }
}
