pub mod catalog;
pub mod export;
pub mod init;
pub mod validate;

pub use catalog::{catalog, CatalogArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::{Context, Result};
use pagesmith_editor::{DocumentStore, EditorConfig};
use pagesmith_registry::Registry;
use std::path::Path;
use std::sync::Arc;

/// Open a document file; ids and parent links are checked on load
pub(crate) fn open_document(
    registry: Arc<Registry>,
    editor: EditorConfig,
    path: &Path,
) -> Result<DocumentStore> {
    DocumentStore::open(registry, editor, path)
        .with_context(|| format!("Cannot load document {}", path.display()))
}
