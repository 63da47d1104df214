//! # Pagesmith Editor
//!
//! Document model of the page builder: the element tree, its edit
//! operations, undo/redo, selection and drag-and-drop placement.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ registry: component definitions + schemas   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: DocumentStore                       │
//! │  - Tree arena (ids, parent links)           │
//! │  - Snapshot history (undo/redo)             │
//! │  - Selection, hover, drag                   │
//! │  - Placement: grid snap, drop zones         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ codegen / export: Element tree → source     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pagesmith_editor::{DocumentStore, EditorConfig, NewElement};
//! use pagesmith_registry::Registry;
//! use std::sync::Arc;
//!
//! let mut store = DocumentStore::new(Arc::new(Registry::builtin()), EditorConfig::default());
//! let id = store.add(NewElement::new("button").at(43.0, 38.0));
//!
//! assert_eq!(store.get(id.as_str()).unwrap().position.x, 40.0);
//! assert!(store.undo());
//! assert!(store.tree().is_empty());
//! ```

mod config;
mod drag;
mod element;
mod errors;
mod history;
mod ids;
mod mutations;
mod placement;
mod preview;
mod selection;
mod store;
mod tree;

pub use config::{EditorConfig, Offset};
pub use drag::{DragProposal, DragSession, DropOutcome};
pub use element::{Constraints, Element, ElementPatch, Metadata, NewElement, Position, Styling};
pub use errors::EditorError;
pub use history::{History, Snapshot};
pub use ids::{ElementId, IdGenerator};
pub use mutations::{Mutation, MutationError, MutationOutcome};
pub use placement::{DropZone, GridConfig, PlacementEngine, PlacementError, Rect};
pub use preview::{preview_tree, PreviewNode};
pub use selection::{CursorState, Selection};
pub use store::{DocumentStore, Transaction};
pub use tree::{Node, Tree};
