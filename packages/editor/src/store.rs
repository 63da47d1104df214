//! # Document Store
//!
//! Owns the element tree, selection, drag state and history. Its methods
//! are the only way to change a document.
//!
//! ## Edit Lifecycle
//!
//! ```text
//! present tree ─clone→ Transaction ─ops→ working tree ─commit→ new present
//!                                          └ no change → dropped, no history
//! ```
//!
//! Every successful edit produces exactly one history entry, however many
//! elements it touched. A rejected or empty edit leaves history alone.

use crate::{
    CursorState, DragProposal, DragSession, DropOutcome, EditorConfig, EditorError, Element,
    ElementId, ElementPatch, History, IdGenerator, Metadata, Mutation, MutationError,
    MutationOutcome, NewElement, Node, PlacementEngine, PlacementError, Position, Selection, Tree,
};
use chrono::{DateTime, Utc};
use pagesmith_registry::{validate_props, Registry, ValidationIssue};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Editable document with undo/redo
#[derive(Debug)]
pub struct DocumentStore {
    registry: Arc<Registry>,
    config: EditorConfig,
    history: History,
    selection: Selection,
    placement: PlacementEngine,
    ids: IdGenerator,
    drag: Option<DragSession>,
    cursors: BTreeMap<String, CursorState>,
    /// Incremented whenever the present tree changes
    revision: u64,
}

impl DocumentStore {
    /// Empty document
    pub fn new(registry: Arc<Registry>, config: EditorConfig) -> Self {
        Self::with_tree(registry, config, Tree::new(), IdGenerator::default())
    }

    /// Document from nested elements. Ids must be unique and declared
    /// parents must match the nesting.
    pub fn load(
        registry: Arc<Registry>,
        config: EditorConfig,
        elements: &[Element],
    ) -> Result<Self, EditorError> {
        let tree = Tree::from_elements(elements)?;
        tree.check_integrity()?;

        let mut ids = IdGenerator::default();
        for id in tree.ids() {
            ids.observe(id);
        }

        info!(elements = tree.len(), "Loaded document");
        Ok(Self::with_tree(registry, config, tree, ids))
    }

    /// Document from a JSON array of elements
    pub fn from_json(
        registry: Arc<Registry>,
        config: EditorConfig,
        json: &str,
    ) -> Result<Self, EditorError> {
        let elements: Vec<Element> = serde_json::from_str(json)?;
        Self::load(registry, config, &elements)
    }

    /// Document from a JSON file
    pub fn open(
        registry: Arc<Registry>,
        config: EditorConfig,
        path: impl AsRef<Path>,
    ) -> Result<Self, EditorError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(registry, config, &json)
    }

    fn with_tree(
        registry: Arc<Registry>,
        config: EditorConfig,
        tree: Tree,
        ids: IdGenerator,
    ) -> Self {
        Self {
            history: History::with_max_levels(tree, config.history_limit),
            placement: PlacementEngine::new(config.grid),
            registry,
            config,
            selection: Selection::new(),
            ids,
            drag: None,
            cursors: BTreeMap::new(),
            revision: 0,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tree(&self) -> &Tree {
        self.history.present()
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.tree().get(id)
    }

    /// Nested copy of one element and its subtree
    pub fn element(&self, id: &str) -> Option<Element> {
        self.tree().materialize(id)
    }

    /// Nested copies of all roots: the document as exported
    pub fn roots(&self) -> Vec<Element> {
        self.tree().materialize_roots()
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(&self.roots())?)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn placement(&self) -> &PlacementEngine {
        &self.placement
    }

    /// Drop zones and grid are owned by the canvas; edit them here
    pub fn placement_mut(&mut self) -> &mut PlacementEngine {
        &mut self.placement
    }

    pub fn is_valid_drop_target(&self, zone_id: &str, type_id: &str) -> bool {
        self.placement
            .is_valid_drop_target(self.tree(), zone_id, type_id)
    }

    // ========================================================================
    // Edits
    // ========================================================================

    /// Add an element. Never fails: a parent that does not exist degrades
    /// to a root append.
    pub fn add(&mut self, element: NewElement) -> ElementId {
        let label = format!("Add {}", element.type_id);
        self.transaction(label, |tx| tx.add(element))
    }

    /// Merge `patch` into an element; false when absent or the patch is empty
    pub fn update(&mut self, id: &str, patch: ElementPatch) -> bool {
        self.transaction(format!("Update {}", id), |tx| tx.update(id, &patch))
    }

    /// Remove an element and all its descendants
    pub fn delete(&mut self, id: &str) -> bool {
        self.transaction(format!("Delete {}", id), |tx| tx.delete(id))
            .is_some()
    }

    /// Deep copy with fresh ids, appended as a root
    pub fn duplicate(&mut self, id: &str) -> Option<ElementId> {
        self.transaction(format!("Duplicate {}", id), |tx| tx.duplicate(id))
    }

    /// Reparent an element after validating the placement
    pub fn move_element(
        &mut self,
        id: &str,
        new_parent: Option<&ElementId>,
        index: Option<usize>,
    ) -> Result<(), PlacementError> {
        self.try_transaction(format!("Move {}", id), |tx| {
            tx.move_element(id, new_parent, index)
        })
    }

    /// Apply one serialized mutation
    pub fn apply(&mut self, mutation: Mutation) -> MutationOutcome {
        let label = mutation.label();
        self.transaction(label, |tx| tx.apply(mutation))
    }

    /// Apply mutations as one history entry. The first rejection rolls the
    /// whole batch back.
    pub fn apply_all(
        &mut self,
        mutations: Vec<Mutation>,
    ) -> Result<Vec<MutationOutcome>, PlacementError> {
        let label = match mutations.as_slice() {
            [single] => single.label(),
            many => format!("Apply {} changes", many.len()),
        };

        self.try_transaction(label, |tx| {
            let mut outcomes = Vec::with_capacity(mutations.len());
            for mutation in mutations {
                match tx.apply(mutation) {
                    MutationOutcome::Rejected(reason) => return Err(reason),
                    outcome => outcomes.push(outcome),
                }
            }
            Ok(outcomes)
        })
    }

    /// Run several operations against one working copy, committed as a
    /// single history entry when anything changed
    pub fn transaction<T>(
        &mut self,
        label: impl Into<String>,
        f: impl FnOnce(&mut Transaction<'_>) -> T,
    ) -> T {
        match self.try_transaction::<T, Infallible>(label, |tx| Ok(f(tx))) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Like [`transaction`](Self::transaction), but an `Err` discards every
    /// change made inside the closure
    pub fn try_transaction<T, E>(
        &mut self,
        label: impl Into<String>,
        f: impl FnOnce(&mut Transaction<'_>) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut tx = Transaction {
            tree: self.history.present().clone(),
            registry: self.registry.as_ref(),
            config: &self.config,
            placement: &self.placement,
            ids: &mut self.ids,
            now: Utc::now(),
            changed: false,
        };

        let value = f(&mut tx)?;

        let Transaction { tree, changed, .. } = tx;
        if changed {
            self.commit(tree, label.into());
        }
        Ok(value)
    }

    fn commit(&mut self, tree: Tree, label: String) {
        self.history.commit(tree, Some(label));
        self.after_change();
        debug!(
            revision = self.revision,
            label = self.history.undo_label().unwrap_or_default(),
            "Committed edit"
        );
    }

    fn after_change(&mut self) {
        self.revision += 1;
        let tree = self.history.present();
        self.selection.prune(tree);
        if self
            .drag
            .as_ref()
            .is_some_and(|d| d.dragged().any(|id| !tree.contains(id.as_str())))
        {
            self.drag = None;
        }
    }

    // ========================================================================
    // History
    // ========================================================================

    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        self.after_change();
        debug!(revision = self.revision, "Undo");
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        self.after_change();
        debug!(revision = self.revision, "Redo");
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.history.undo_label()
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.history.redo_label()
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// `None` clears; unknown ids are ignored
    pub fn select(&mut self, id: Option<&ElementId>, multi: bool) {
        if let Some(id) = id {
            if !self.tree().contains(id.as_str()) {
                return;
            }
        }
        self.selection.select(id, multi);
    }

    pub fn hover(&mut self, id: Option<&ElementId>) {
        let hovered = id.filter(|id| self.tree().contains(id.as_str())).cloned();
        self.selection.set_hovered(hovered);
    }

    // ========================================================================
    // Drag
    // ========================================================================

    /// Start dragging `id`; the whole selection moves along when `id` is
    /// part of it
    pub fn begin_drag(&mut self, id: &ElementId, pointer: (f64, f64)) -> Result<(), PlacementError> {
        let dragged: Vec<ElementId> = if self.selection.is_selected(id.as_str()) {
            self.selection.ids().cloned().collect()
        } else {
            vec![id.clone()]
        };

        let session = DragSession::begin(self.tree(), id, &dragged, pointer)?;
        debug!(primary = %id, count = dragged.len(), "Drag started");

        self.selection.set_dragging(Some(id.clone()));
        self.drag = Some(session);
        Ok(())
    }

    /// Update the proposal; `None` when no drag is in progress
    pub fn drag_to(&mut self, pointer: (f64, f64), hovered_zone: Option<&str>) -> Option<DragProposal> {
        let tree = self.history.present();
        let session = self.drag.as_mut()?;
        Some(session.update(
            tree,
            &self.placement,
            pointer,
            hovered_zone.map(str::to_string),
        ))
    }

    /// Validate and commit the drag as one history entry
    pub fn end_drag(&mut self) -> DropOutcome {
        let Some(session) = self.drag.take() else {
            return DropOutcome::NotDragging;
        };
        self.selection.set_dragging(None);

        if let Err(reason) = session.validate(self.tree(), &self.placement) {
            debug!(primary = %session.primary(), %reason, "Drop rejected");
            return DropOutcome::Rejected(reason);
        }

        let targets = session.targets();
        let label = match targets.len() {
            1 => format!("Move {}", session.primary()),
            n => format!("Move {} elements", n),
        };

        let moved = self.transaction(label, |tx| {
            targets
                .into_iter()
                .filter(|(id, position)| tx.set_position(id.as_str(), *position))
                .map(|(id, _)| id)
                .collect()
        });
        DropOutcome::Committed { moved }
    }

    /// Abandon the drag; false when none was in progress
    pub fn cancel_drag(&mut self) -> bool {
        self.selection.set_dragging(None);
        self.drag.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Property issues of one element; empty for unknown elements or types
    pub fn validate(&self, id: &str) -> Vec<ValidationIssue> {
        let Some(node) = self.get(id) else {
            return Vec::new();
        };
        match self.registry.get(&node.type_id) {
            Some(definition) => validate_props(definition, &node.props),
            None => Vec::new(),
        }
    }

    /// Issues of every element that has any
    pub fn validate_all(&self) -> BTreeMap<ElementId, Vec<ValidationIssue>> {
        self.tree()
            .ids()
            .filter_map(|id| {
                let issues = self.validate(id.as_str());
                (!issues.is_empty()).then(|| (id.clone(), issues))
            })
            .collect()
    }

    // ========================================================================
    // Cursors
    // ========================================================================

    pub fn set_cursor(&mut self, peer: impl Into<String>, cursor: CursorState) {
        self.cursors.insert(peer.into(), cursor);
    }

    pub fn remove_cursor(&mut self, peer: &str) -> Option<CursorState> {
        self.cursors.remove(peer)
    }

    pub fn cursors(&self) -> &BTreeMap<String, CursorState> {
        &self.cursors
    }
}

/// Working copy of the tree inside a [`DocumentStore::transaction`]
pub struct Transaction<'a> {
    tree: Tree,
    registry: &'a Registry,
    config: &'a EditorConfig,
    placement: &'a PlacementEngine,
    ids: &'a mut IdGenerator,
    now: DateTime<Utc>,
    changed: bool,
}

impl Transaction<'_> {
    /// Tree as modified so far
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    fn fresh_id(&mut self) -> ElementId {
        loop {
            let id = self.ids.next_id();
            if !self.tree.contains(id.as_str()) {
                return id;
            }
        }
    }

    pub fn add(&mut self, element: NewElement) -> ElementId {
        let id = self.fresh_id();
        let parent = element
            .parent
            .filter(|p| self.tree.contains(p.as_str()));

        let position = if self.config.snap_on_add {
            self.placement.snap_position(element.position)
        } else {
            element.position
        };

        let mut props = self.registry.default_props(&element.type_id);
        props.extend(element.props);

        let node = Node {
            id: id.clone(),
            type_id: element.type_id,
            props,
            children: Vec::new(),
            parent: None,
            position,
            constraints: element.constraints,
            styling: element.styling,
            metadata: Metadata::new(self.now, element.author),
        };

        // A fresh id under a parent that exists cannot be refused
        if let Err(err) = self.tree.insert(node, parent.as_ref(), element.index) {
            unreachable!("arena refused a fresh element: {}", err);
        }

        self.changed = true;
        debug!(%id, parent = ?parent, "Added element");
        id
    }

    pub fn update(&mut self, id: &str, patch: &ElementPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        let Some(node) = self.tree.get_mut(id) else {
            return false;
        };

        patch.merge_props(&mut node.props);
        if let Some(position) = patch.position {
            node.position = position;
        }
        if let Some(constraints) = &patch.constraints {
            node.constraints = constraints.clone();
        }
        if let Some(styling) = &patch.styling {
            node.styling = styling.clone();
        }
        if let Some(author) = &patch.author {
            node.metadata.author = Some(author.clone());
        }
        node.metadata.touch(self.now);

        self.changed = true;
        true
    }

    /// Ids removed (target first); `None` when absent
    pub fn delete(&mut self, id: &str) -> Option<Vec<ElementId>> {
        let removed = self.tree.remove_subtree(id).ok()?;
        self.changed = true;
        debug!(id, count = removed.len(), "Deleted subtree");
        Some(removed)
    }

    pub fn duplicate(&mut self, id: &str) -> Option<ElementId> {
        let source = self.tree.descendants(id);
        if source.is_empty() {
            return None;
        }

        let mut mapping: BTreeMap<ElementId, ElementId> = BTreeMap::new();
        let offset = self.config.duplicate_offset;

        // Pre-order guarantees each parent is inserted before its children
        for (i, old_id) in source.iter().enumerate() {
            let Some(original) = self.tree.get(old_id.as_str()).cloned() else {
                continue;
            };
            let new_id = self.fresh_id();
            let parent = if i == 0 {
                None
            } else {
                original.parent.as_ref().and_then(|p| mapping.get(p)).cloned()
            };
            let position = if i == 0 {
                original.position.offset(offset.x, offset.y)
            } else {
                original.position
            };

            let node = Node {
                id: new_id.clone(),
                children: Vec::new(),
                parent: None,
                position,
                metadata: Metadata::new(self.now, original.metadata.author.clone()),
                ..original
            };
            if let Err(err) = self.tree.insert(node, parent.as_ref(), None) {
                unreachable!("arena refused a duplicated element: {}", err);
            }
            mapping.insert(old_id.clone(), new_id);
        }

        self.changed = true;
        let root = mapping.get(id).cloned();
        debug!(source = id, copy = ?root, count = mapping.len(), "Duplicated subtree");
        root
    }

    pub fn move_element(
        &mut self,
        id: &str,
        new_parent: Option<&ElementId>,
        index: Option<usize>,
    ) -> Result<(), PlacementError> {
        let key = ElementId::from(id);
        self.placement
            .validate_move(&self.tree, self.registry, &key, new_parent)?;
        self.tree
            .reparent(id, new_parent, index)
            .map_err(placement_error)?;

        if let Some(node) = self.tree.get_mut(id) {
            node.metadata.touch(self.now);
        }
        self.changed = true;
        Ok(())
    }

    /// Set one element's position; false when absent or unchanged
    pub fn set_position(&mut self, id: &str, position: Position) -> bool {
        match self.tree.get_mut(id) {
            Some(node) if node.position != position => {
                node.position = position;
                node.metadata.touch(self.now);
                self.changed = true;
                true
            }
            _ => false,
        }
    }

    pub fn apply(&mut self, mutation: Mutation) -> MutationOutcome {
        match mutation {
            Mutation::Add { element } => MutationOutcome::Added(self.add(element)),
            Mutation::Update { id, patch } => {
                if self.update(id.as_str(), &patch) {
                    MutationOutcome::Updated
                } else {
                    MutationOutcome::NoOp
                }
            }
            Mutation::Delete { id } => match self.delete(id.as_str()) {
                Some(removed) => MutationOutcome::Deleted(removed),
                None => MutationOutcome::NoOp,
            },
            Mutation::Duplicate { id } => match self.duplicate(id.as_str()) {
                Some(copy) => MutationOutcome::Duplicated(copy),
                None => MutationOutcome::NoOp,
            },
            Mutation::Move {
                id,
                new_parent,
                index,
            } => match self.move_element(id.as_str(), new_parent.as_ref(), index) {
                Ok(()) => MutationOutcome::Moved,
                Err(reason) => MutationOutcome::Rejected(reason),
            },
        }
    }
}

fn placement_error(err: MutationError) -> PlacementError {
    match err {
        MutationError::NodeNotFound(id) => PlacementError::ElementNotFound(id),
        MutationError::ParentNotFound(id) => PlacementError::ParentNotFound(id),
        MutationError::CycleDetected
        | MutationError::DuplicateId(_)
        | MutationError::InvalidStructure(_) => PlacementError::CycleDetected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> DocumentStore {
        DocumentStore::new(Arc::new(Registry::builtin()), EditorConfig::default())
    }

    #[test]
    fn test_add_fills_defaults_and_snaps() {
        let mut store = store();
        let id = store.add(NewElement::new("button").at(43.0, 38.0));

        let node = store.get(id.as_str()).unwrap();
        assert_eq!(node.position, Position::new(40.0, 40.0));
        assert_eq!(node.props.get("text"), Some(&json!("Button")));
        assert_eq!(node.metadata.version, 1);
        assert_eq!(store.revision(), 1);
        assert_eq!(store.undo_label(), Some("Add button"));
    }

    #[test]
    fn test_add_with_missing_parent_appends_root() {
        let mut store = store();
        let id = store.add(NewElement::new("text").inside(&ElementId::from("ghost")));
        assert_eq!(store.tree().roots(), &[id]);
    }

    #[test]
    fn test_update_bumps_version() {
        let mut store = store();
        let id = store.add(NewElement::new("button"));
        assert!(store.update(id.as_str(), ElementPatch::new().prop("text", json!("Go"))));

        let node = store.get(id.as_str()).unwrap();
        assert_eq!(node.metadata.version, 2);
        assert_eq!(node.props.get("text"), Some(&json!("Go")));
    }

    #[test]
    fn test_no_ops_leave_history_alone() {
        let mut store = store();
        let id = store.add(NewElement::new("button"));

        assert!(!store.update("ghost", ElementPatch::new().prop("text", json!("x"))));
        assert!(!store.update(id.as_str(), ElementPatch::new()));
        assert!(!store.delete("ghost"));
        assert!(store.duplicate("ghost").is_none());

        assert_eq!(store.revision(), 1);
        assert!(store.undo());
        assert!(!store.can_undo());
    }

    #[test]
    fn test_failed_transaction_rolls_back() {
        let mut store = store();
        let result: Result<(), &str> = store.try_transaction("Batch", |tx| {
            tx.add(NewElement::new("button"));
            Err("abort")
        });

        assert!(result.is_err());
        assert!(store.tree().is_empty());
        assert!(!store.can_undo());
    }

    #[test]
    fn test_select_ignores_unknown_ids() {
        let mut store = store();
        let id = store.add(NewElement::new("button"));
        store.select(Some(&ElementId::from("ghost")), false);
        assert!(store.selection().is_empty());

        store.select(Some(&id), false);
        store.hover(Some(&id));
        assert!(store.selection().is_selected(id.as_str()));
        assert_eq!(store.selection().hovered(), Some(&id));
    }

    #[test]
    fn test_validate_reports_schema_issues() {
        let mut store = store();
        let id = store.add(NewElement::new("button").with_prop("text", json!("")));

        let issues = store.validate(id.as_str());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].prop, "text");
        assert!(store.validate_all().contains_key(&id));
    }

    #[test]
    fn test_load_continues_id_sequence() {
        let elements = vec![Element::new("el-7", "button")];
        let mut store =
            DocumentStore::load(Arc::new(Registry::builtin()), EditorConfig::default(), &elements)
                .unwrap();

        let id = store.add(NewElement::new("text"));
        assert_eq!(id, ElementId::from("el-8"));
    }
}
