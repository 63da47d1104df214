//! # Undo/Redo History
//!
//! Snapshot-based history for the document tree.
//!
//! ## Design
//!
//! - Every committed edit stores the complete resulting tree, not a diff
//! - `past` / `present` / `future` stacks; undo and redo only move
//!   already-built snapshots between them
//! - A new commit clears `future` (linear history)
//! - Each snapshot may carry a label describing the edit that produced it
//!
//! Snapshots are shared through `Arc`, so moving them between stacks never
//! copies a tree. Building a new snapshot costs one full tree clone.

use crate::Tree;
use std::sync::Arc;

/// Immutable copy of the tree at one point in history
#[derive(Debug, Clone)]
pub struct Snapshot {
    tree: Arc<Tree>,
    label: Option<String>,
}

impl Snapshot {
    pub fn new(tree: Tree, label: Option<String>) -> Self {
        Self {
            tree: Arc::new(tree),
            label,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Description of the edit that produced this snapshot
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Undo/redo stacks around the present tree
#[derive(Debug)]
pub struct History {
    /// Prior snapshots (most recent last)
    past: Vec<Snapshot>,

    present: Snapshot,

    /// Undone snapshots (next redo last)
    future: Vec<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl History {
    /// Create a history with no limit on undo levels
    pub fn new(tree: Tree) -> Self {
        Self::with_max_levels(tree, 0)
    }

    pub fn with_max_levels(tree: Tree, max_levels: usize) -> Self {
        Self {
            past: Vec::new(),
            present: Snapshot::new(tree, None),
            future: Vec::new(),
            max_levels,
        }
    }

    pub fn present(&self) -> &Tree {
        self.present.tree()
    }

    /// Install a new present tree, pushing the old one onto `past`
    pub fn commit(&mut self, tree: Tree, label: Option<String>) {
        let previous = std::mem::replace(&mut self.present, Snapshot::new(tree, label));
        self.past.push(previous);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.past.len() > self.max_levels {
            let excess = self.past.len() - self.max_levels;
            self.past.drain(..excess);
        }

        // New edit invalidates the abandoned future
        self.future.clear();
    }

    /// Step back one snapshot; false when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.past.pop() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.present, previous);
                self.future.push(current);
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot; false when there is nothing to redo
    pub fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.present, next);
                self.past.push(current);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    /// Label of the edit the next undo reverts
    pub fn undo_label(&self) -> Option<&str> {
        if self.can_undo() {
            self.present.label()
        } else {
            None
        }
    }

    /// Label of the edit the next redo reapplies
    pub fn redo_label(&self) -> Option<&str> {
        self.future.last().and_then(Snapshot::label)
    }

    /// Drop all history, keeping the present tree
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
