//! # Pagesmith Codegen
//!
//! Turns element trees into source files for React, Vue, Angular and plain
//! HTML from the templates of the component registry.
//!
//! ```text
//! Element tree ──→ Emitter (per target) ──→ FileDescriptor + warnings
//!                    │
//!                    ├─ template substitution ({{prop}}, {{children}}, {{style}})
//!                    ├─ identifiers (button + el-3 → ButtonEl3, ButtonEl3_2 on collision)
//!                    └─ prop types (TypeScript, when typed)
//! ```
//!
//! Output is deterministic: no clock, no randomness, ordered maps only.
//! Unknown component types never fail an emission; they become a marked
//! placeholder plus an [`EmitWarning`].
//!
//! [`Emitter::emit_module`] writes several roots into one file for
//! single-file packaging.

mod auxiliary;
mod context;
mod emitter;
mod error;
mod file;
mod render;
mod style;
mod targets;

pub mod names;
pub mod template;
pub mod types;

pub use auxiliary::{emit_story, emit_test, AuxiliaryOutput};
pub use context::{CodeWriter, EmitContext};
pub use emitter::{emitter_for, Emission, Emitter};
pub use error::{EmitError, EmitWarning};
pub use file::{FileDescriptor, FileKind, SourceLanguage};
pub use style::{css_inline, react_object};
pub use targets::{AngularEmitter, HtmlEmitter, ReactEmitter, VueEmitter};
pub use types::{type_mapping, TypeMapping, TypeScriptMapping};

/// Deepest element nesting an emitter will follow
pub const MAX_DEPTH: usize = 64;
