use crate::{ElementId, Tree};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Selected, hovered and dragged elements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    selected: BTreeSet<ElementId>,
    hovered: Option<ElementId>,
    dragging: Option<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` clears; otherwise replace the selection with `id`, or toggle
    /// its membership when `multi` is set.
    pub fn select(&mut self, id: Option<&ElementId>, multi: bool) {
        match id {
            None => self.selected.clear(),
            Some(id) if multi => {
                if !self.selected.remove(id) {
                    self.selected.insert(id.clone());
                }
            }
            Some(id) => {
                self.selected.clear();
                self.selected.insert(id.clone());
            }
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ElementId> {
        self.selected.iter()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn hovered(&self) -> Option<&ElementId> {
        self.hovered.as_ref()
    }

    pub(crate) fn set_hovered(&mut self, id: Option<ElementId>) {
        self.hovered = id;
    }

    pub fn dragging(&self) -> Option<&ElementId> {
        self.dragging.as_ref()
    }

    pub(crate) fn set_dragging(&mut self, id: Option<ElementId>) {
        self.dragging = id;
    }

    /// Drop every reference to an element that is not in `tree`
    pub(crate) fn prune(&mut self, tree: &Tree) {
        self.selected.retain(|id| tree.contains(id.as_str()));
        if self.hovered.as_ref().is_some_and(|id| !tree.contains(id.as_str())) {
            self.hovered = None;
        }
        if self.dragging.as_ref().is_some_and(|id| !tree.contains(id.as_str())) {
            self.dragging = None;
        }
    }
}

/// Passive record of another participant's focus. Nothing reconciles
/// these with local edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorState {
    #[serde(default)]
    pub selected: Vec<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<ElementId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_select_replaces() {
        let mut selection = Selection::new();
        selection.select(Some(&ElementId::from("a")), false);
        selection.select(Some(&ElementId::from("b")), false);

        assert_eq!(selection.len(), 1);
        assert!(selection.is_selected("b"));
    }

    #[test]
    fn test_multi_select_toggles() {
        let mut selection = Selection::new();
        selection.select(Some(&ElementId::from("a")), true);
        selection.select(Some(&ElementId::from("b")), true);
        assert_eq!(selection.len(), 2);

        selection.select(Some(&ElementId::from("a")), true);
        assert_eq!(selection.len(), 1);
        assert!(!selection.is_selected("a"));
    }

    #[test]
    fn test_none_clears() {
        let mut selection = Selection::new();
        selection.select(Some(&ElementId::from("a")), true);
        selection.select(None, true);
        assert!(selection.is_empty());
    }
}
