//! Tests for scripted mutation sequences
//!
//! This tests:
//! - Serialized mutations replayed through the store
//! - Batches committed as one history entry
//! - Rollback of a batch containing a rejected move
//! - Document integrity after every step

use pagesmith_editor::{
    DocumentStore, EditorConfig, ElementId, Mutation, MutationOutcome, PlacementError,
};
use pagesmith_registry::Registry;
use serde_json::json;
use std::sync::Arc;

fn store() -> DocumentStore {
    DocumentStore::new(Arc::new(Registry::builtin()), EditorConfig::default())
}

fn mutations(json: serde_json::Value) -> Vec<Mutation> {
    serde_json::from_value(json).unwrap()
}

#[test]
fn test_scripted_sequence_from_json() {
    let mut store = store();
    let script = mutations(json!([
        { "op": "add", "element": { "type": "card", "position": { "x": 10, "y": 10 } } },
        { "op": "add", "element": { "type": "button", "parent": "el-1", "props": { "text": "Go" } } },
        { "op": "update", "id": "el-2", "patch": { "props": { "variant": "secondary" } } },
        { "op": "duplicate", "id": "el-1" },
        { "op": "move", "id": "el-2", "newParent": null, "index": 0 }
    ]));

    let mut outcomes = Vec::new();
    for mutation in script {
        outcomes.push(store.apply(mutation));
        store.tree().check_integrity().unwrap();
    }

    assert_eq!(outcomes[0], MutationOutcome::Added(ElementId::from("el-1")));
    assert_eq!(outcomes[2], MutationOutcome::Updated);
    assert_eq!(outcomes[3], MutationOutcome::Duplicated(ElementId::from("el-3")));
    assert_eq!(outcomes[4], MutationOutcome::Moved);

    assert_eq!(
        store.tree().roots(),
        &[
            ElementId::from("el-2"),
            ElementId::from("el-1"),
            ElementId::from("el-3")
        ]
    );
    // Each applied mutation is its own undo step
    assert_eq!(store.revision(), 5);
}

#[test]
fn test_missing_targets_are_no_ops() {
    let mut store = store();
    let script = mutations(json!([
        { "op": "update", "id": "ghost", "patch": { "props": { "text": "x" } } },
        { "op": "delete", "id": "ghost" },
        { "op": "duplicate", "id": "ghost" }
    ]));

    for mutation in script {
        assert_eq!(store.apply(mutation), MutationOutcome::NoOp);
    }
    assert!(!store.can_undo());
}

#[test]
fn test_batch_is_single_history_entry() {
    let mut store = store();
    let outcomes = store
        .apply_all(mutations(json!([
            { "op": "add", "element": { "type": "container" } },
            { "op": "add", "element": { "type": "heading", "parent": "el-1" } },
            { "op": "add", "element": { "type": "text", "parent": "el-1" } }
        ])))
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(store.tree().len(), 3);
    assert_eq!(store.undo_label(), Some("Apply 3 changes"));

    assert!(store.undo());
    assert!(store.tree().is_empty());
}

#[test]
fn test_rejected_move_rolls_back_batch() {
    let mut store = store();
    store.apply_all(mutations(json!([
        { "op": "add", "element": { "type": "card" } },
        { "op": "add", "element": { "type": "image" } }
    ])))
    .unwrap();
    let before = store.tree().clone();

    let result = store.apply_all(mutations(json!([
        { "op": "update", "id": "el-1", "patch": { "props": { "title": "Gallery" } } },
        { "op": "move", "id": "el-1", "newParent": "el-2" }
    ])));

    assert_eq!(
        result,
        Err(PlacementError::ChildrenNotAccepted {
            type_id: "image".to_string()
        })
    );
    assert_eq!(store.tree(), &before);
    assert_eq!(store.undo_label(), Some("Apply 2 changes"));
}

#[test]
fn test_delete_then_undo_then_new_edit_clears_redo() {
    let mut store = store();
    let card = store.apply(serde_json::from_value(json!({
        "op": "add", "element": { "type": "card" }
    }))
    .unwrap());
    let MutationOutcome::Added(card) = card else {
        panic!("expected an add");
    };

    let deleted = store.apply(Mutation::Delete { id: card.clone() });
    assert_eq!(deleted, MutationOutcome::Deleted(vec![card.clone()]));

    assert!(store.undo());
    assert!(store.can_redo());
    assert_eq!(store.redo_label(), Some(format!("Delete {}", card).as_str()));

    store.apply(Mutation::Duplicate { id: card });
    assert!(!store.can_redo());
}
