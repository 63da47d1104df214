//! # Document Mutations
//!
//! Serializable form of the store's editing operations.
//!
//! The store exposes one method per operation; [`Mutation`] names the same
//! operations as data so that scripted edits (CLI, browser bridge) can be
//! replayed through [`DocumentStore::apply`](crate::DocumentStore::apply).
//!
//! ## Mutation Semantics
//!
//! ### Add
//! - Never fails; a missing parent degrades to a root append
//!
//! ### Update / Delete / Duplicate
//! - No-op when the element does not exist
//! - Delete removes the element and all descendants
//!
//! ### Move
//! - Validated by the placement engine before anything changes
//! - Fails if it would create a cycle or the target rejects the type

use crate::{ElementId, ElementPatch, NewElement, PlacementError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    Add {
        element: NewElement,
    },

    Update {
        id: ElementId,
        patch: ElementPatch,
    },

    Delete {
        id: ElementId,
    },

    Duplicate {
        id: ElementId,
    },

    #[serde(rename_all = "camelCase")]
    Move {
        id: ElementId,
        #[serde(default)]
        new_parent: Option<ElementId>,
        #[serde(default)]
        index: Option<usize>,
    },
}

impl Mutation {
    /// Short description used as the history label
    pub fn label(&self) -> String {
        match self {
            Mutation::Add { element } => format!("Add {}", element.type_id),
            Mutation::Update { id, .. } => format!("Update {}", id),
            Mutation::Delete { id } => format!("Delete {}", id),
            Mutation::Duplicate { id } => format!("Duplicate {}", id),
            Mutation::Move { id, .. } => format!("Move {}", id),
        }
    }
}

/// What applying a mutation did
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Added(ElementId),
    Updated,
    /// Ids removed, the target first, then its descendants
    Deleted(Vec<ElementId>),
    Duplicated(ElementId),
    Moved,
    /// The target did not exist; nothing changed
    NoOp,
    Rejected(PlacementError),
}

impl MutationOutcome {
    pub fn is_change(&self) -> bool {
        !matches!(self, MutationOutcome::NoOp | MutationOutcome::Rejected(_))
    }
}

/// Structural errors raised by the tree arena
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(ElementId),

    #[error("Parent not found: {0}")]
    ParentNotFound(ElementId),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Duplicate element id: {0}")]
    DuplicateId(ElementId),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}
