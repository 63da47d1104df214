//! Browser bindings. Structured values cross the boundary as JSON strings
//! in the same camelCase shapes the Rust types serialize to.

use pagesmith_editor::{
    preview_tree, DocumentStore, DropOutcome, DropZone, EditorConfig, Element, ElementId,
    ElementPatch, Mutation, MutationOutcome, NewElement,
};
use pagesmith_export::{export_project, ExportOptions};
use pagesmith_registry::Registry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt::Display;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(context: &str, err: impl Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

fn parse<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| js_error(&format!("Invalid {}", what), e))
}

fn to_json(value: &impl Serialize) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_error("Serialization error", e))
}

fn config_from(config_json: Option<String>) -> Result<EditorConfig, JsValue> {
    match config_json {
        Some(json) => parse("editor config", &json),
        None => Ok(EditorConfig::default()),
    }
}

fn mutation_outcome(outcome: &MutationOutcome) -> Value {
    match outcome {
        MutationOutcome::Added(id) => json!({ "kind": "added", "id": id }),
        MutationOutcome::Updated => json!({ "kind": "updated" }),
        MutationOutcome::Deleted(ids) => json!({ "kind": "deleted", "ids": ids }),
        MutationOutcome::Duplicated(id) => json!({ "kind": "duplicated", "id": id }),
        MutationOutcome::Moved => json!({ "kind": "moved" }),
        MutationOutcome::NoOp => json!({ "kind": "noOp" }),
        MutationOutcome::Rejected(reason) => {
            json!({ "kind": "rejected", "reason": reason.to_string() })
        }
    }
}

fn drop_outcome(outcome: &DropOutcome) -> Value {
    match outcome {
        DropOutcome::Committed { moved } => json!({ "kind": "committed", "moved": moved }),
        DropOutcome::Rejected(reason) => json!({ "kind": "rejected", "reason": reason.to_string() }),
        DropOutcome::NotDragging => json!({ "kind": "notDragging" }),
    }
}

/// Editing session over one document with the built-in component catalog
#[wasm_bindgen]
pub struct Editor {
    store: DocumentStore,
}

#[wasm_bindgen]
impl Editor {
    /// Empty document; `config_json` is an editor config, defaults when absent
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<Editor, JsValue> {
        let config = config_from(config_json)?;
        Ok(Self {
            store: DocumentStore::new(Arc::new(Registry::builtin()), config),
        })
    }

    /// Document from a JSON array of nested elements
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(document_json: &str, config_json: Option<String>) -> Result<Editor, JsValue> {
        let config = config_from(config_json)?;
        let store = DocumentStore::from_json(Arc::new(Registry::builtin()), config, document_json)
            .map_err(|e| js_error("Load error", e))?;
        Ok(Self { store })
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        to_json(&self.store.roots())
    }

    #[wasm_bindgen(getter)]
    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// Add an element (`NewElement` JSON); returns its id
    pub fn add(&mut self, element_json: &str) -> Result<String, JsValue> {
        let element: NewElement = parse("element", element_json)?;
        Ok(self.store.add(element).to_string())
    }

    pub fn update(&mut self, id: &str, patch_json: &str) -> Result<bool, JsValue> {
        let patch: ElementPatch = parse("patch", patch_json)?;
        Ok(self.store.update(id, patch))
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.store.delete(id)
    }

    pub fn duplicate(&mut self, id: &str) -> Option<String> {
        self.store.duplicate(id).map(|id| id.to_string())
    }

    #[wasm_bindgen(js_name = moveElement)]
    pub fn move_element(
        &mut self,
        id: &str,
        new_parent: Option<String>,
        index: Option<usize>,
    ) -> Result<(), JsValue> {
        let new_parent = new_parent.map(ElementId::from);
        self.store
            .move_element(id, new_parent.as_ref(), index)
            .map_err(|e| js_error("Move rejected", e))
    }

    /// Apply one `Mutation` JSON (`{ "op": "add", ... }`) as one undo step
    pub fn apply(&mut self, mutation_json: &str) -> Result<String, JsValue> {
        let mutation: Mutation = parse("mutation", mutation_json)?;
        to_json(&mutation_outcome(&self.store.apply(mutation)))
    }

    /// Apply a JSON array of mutations as one undo step; all or nothing
    #[wasm_bindgen(js_name = applyAll)]
    pub fn apply_all(&mut self, mutations_json: &str) -> Result<String, JsValue> {
        let mutations: Vec<Mutation> = parse("mutations", mutations_json)?;
        let outcomes = self
            .store
            .apply_all(mutations)
            .map_err(|e| js_error("Batch rejected", e))?;
        let outcomes: Vec<Value> = outcomes.iter().map(mutation_outcome).collect();
        to_json(&outcomes)
    }

    pub fn undo(&mut self) -> bool {
        self.store.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.store.redo()
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    /// `None` clears the selection unless `multi` is set
    pub fn select(&mut self, id: Option<String>, multi: bool) {
        let id = id.map(ElementId::from);
        self.store.select(id.as_ref(), multi);
    }

    pub fn hover(&mut self, id: Option<String>) {
        let id = id.map(ElementId::from);
        self.store.hover(id.as_ref());
    }

    pub fn selection(&self) -> Result<String, JsValue> {
        to_json(self.store.selection())
    }

    #[wasm_bindgen(js_name = setDropZones)]
    pub fn set_drop_zones(&mut self, zones_json: &str) -> Result<(), JsValue> {
        let zones: Vec<DropZone> = parse("drop zones", zones_json)?;
        self.store.placement_mut().set_drop_zones(zones);
        Ok(())
    }

    #[wasm_bindgen(js_name = beginDrag)]
    pub fn begin_drag(&mut self, id: &str, x: f64, y: f64) -> Result<(), JsValue> {
        self.store
            .begin_drag(&ElementId::from(id), (x, y))
            .map_err(|e| js_error("Cannot drag", e))
    }

    /// Current drop proposal as JSON; `None` without a drag in progress
    #[wasm_bindgen(js_name = dragTo)]
    pub fn drag_to(&mut self, x: f64, y: f64, zone: Option<String>) -> Result<Option<String>, JsValue> {
        self.store
            .drag_to((x, y), zone.as_deref())
            .map(|proposal| to_json(&proposal))
            .transpose()
    }

    #[wasm_bindgen(js_name = endDrag)]
    pub fn end_drag(&mut self) -> Result<String, JsValue> {
        to_json(&drop_outcome(&self.store.end_drag()))
    }

    #[wasm_bindgen(js_name = cancelDrag)]
    pub fn cancel_drag(&mut self) -> bool {
        self.store.cancel_drag()
    }

    /// Validation issues of one element
    pub fn validate(&self, id: &str) -> Result<String, JsValue> {
        to_json(&self.store.validate(id))
    }

    /// Render-ready tree with placeholders for unknown types
    pub fn preview(&self) -> Result<String, JsValue> {
        to_json(&preview_tree(self.store.tree(), self.store.registry()))
    }

    /// Export the document's roots; `options_json` is `ExportOptions`
    pub fn export(&self, options_json: &str) -> Result<String, JsValue> {
        let options: ExportOptions = parse("export options", options_json)?;
        let result = export_project(&self.store.roots(), self.store.registry(), &options);
        to_json(&result)
    }
}

/// Export a JSON array of elements with the built-in catalog
#[wasm_bindgen(js_name = exportProject)]
pub fn export_project_js(elements_json: &str, options_json: &str) -> Result<String, JsValue> {
    let elements: Vec<Element> = parse("elements", elements_json)?;
    let options: ExportOptions = parse("export options", options_json)?;
    let registry = Registry::builtin();
    to_json(&export_project(&elements, &registry, &options))
}

/// Built-in component definitions as JSON
#[wasm_bindgen]
pub fn catalog() -> Result<String, JsValue> {
    let registry = Registry::builtin();
    let definitions: Vec<_> = registry.definitions().collect();
    to_json(&definitions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_drag_export() {
        let mut editor = Editor::new(None).unwrap();
        let id = editor
            .add(r#"{ "type": "button", "position": { "x": 40, "y": 40 }, "props": { "text": "Click me" } }"#)
            .unwrap();

        editor.begin_drag(&id, 0.0, 0.0).unwrap();
        let proposal: Value = serde_json::from_str(&editor.drag_to(33.0, 7.0, None).unwrap().unwrap()).unwrap();
        assert_eq!(proposal["position"]["x"], json!(80.0));
        let outcome: Value = serde_json::from_str(&editor.end_drag().unwrap()).unwrap();
        assert_eq!(outcome["kind"], "committed");

        let result: Value = serde_json::from_str(&editor.export(r#"{ "target": "html" }"#).unwrap()).unwrap();
        assert_eq!(result["success"], json!(true));
        let content = result["files"][0]["content"].as_str().unwrap();
        assert!(content.contains("Click me"));
        assert!(content.contains("left: 80px"));
    }

    #[test]
    fn test_apply_and_undo() {
        let mut editor = Editor::new(Some(r#"{ "grid": { "enabled": false } }"#.to_string())).unwrap();
        let outcome: Value =
            serde_json::from_str(&editor.apply(r#"{ "op": "add", "element": { "type": "card" } }"#).unwrap())
                .unwrap();
        assert_eq!(outcome, json!({ "kind": "added", "id": "el-1" }));
        assert!(editor.can_undo());

        assert!(editor.undo());
        assert_eq!(editor.to_json().unwrap(), "[]");
        assert!(editor.can_redo());
    }

    #[test]
    fn test_export_project_function() {
        let json = export_project_js(
            r#"[{ "id": "el-1", "type": "heading", "props": { "text": "Hello" } }]"#,
            r#"{ "target": "vue", "typedOutput": true }"#,
        )
        .unwrap();
        let result: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(result["files"][0]["name"], "HeadingEl1.vue");
    }

    #[test]
    fn test_catalog() {
        let definitions: Vec<Value> = serde_json::from_str(&catalog().unwrap()).unwrap();
        assert!(definitions.iter().any(|d| d["type"] == "button"));
    }
}
