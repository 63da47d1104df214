//! # Pagesmith Registry
//!
//! Static catalog of component definitions for the page builder.
//!
//! Every element placed on the canvas references a component type by id.
//! The registry answers three questions about a type:
//!
//! - which properties it has and how they are validated ([`PropSchema`])
//! - which props a freshly dropped element starts with
//! - which template each code target ([`Target`]) expands it into
//!
//! The registry owns no document state. Both the editor (validation,
//! defaults) and the code emitters (templates) read from it.
//!
//! ```rust,ignore
//! use pagesmith_registry::{Registry, Target};
//!
//! let registry = Registry::builtin();
//! let button = registry.get("button").unwrap();
//! assert!(button.template(Target::Html).is_some());
//! ```

mod definition;
mod error;
mod registry;
mod schema;
mod target;
pub mod validation;

pub use definition::ComponentDefinition;
pub use error::RegistryError;
pub use registry::Registry;
pub use schema::{Conditional, PropKind, PropSchema, SelectOption};
pub use target::Target;
pub use validation::{validate_props, IssueKind, Severity, ValidationIssue};

/// Property values are plain JSON values; the schema decides how they are read.
pub type PropValue = serde_json::Value;

/// Wildcard accepted anywhere a list of component types is expected.
pub const ANY_TYPE: &str = "*";
