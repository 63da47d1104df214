//! # Pagesmith Export
//!
//! Packages generated components for download or writing to disk.
//!
//! ```text
//! elements ──→ target emitter ──→ component files ─┐
//!          ├─→ test emitter   ──→ test files      ─┼─→ ExportResult
//!          └─→ story emitter  ──→ story files     ─┤    { files, errors,
//!   options ─→ package.json, tsconfig, vite/angular ┘      warnings, metrics }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pagesmith_editor::Element;
//! use pagesmith_export::{export_project, ExportOptions};
//! use pagesmith_registry::{Registry, Target};
//! use serde_json::json;
//!
//! let registry = Registry::builtin();
//! let button = Element::new("el-1", "button")
//!     .with_prop("text", json!("Click me"))
//!     .at(80.0, 40.0);
//!
//! let result = export_project(&[button], &registry, &ExportOptions::for_target(Target::Html));
//! assert!(result.success);
//! assert!(result.files[0].content.contains("Click me"));
//! ```

mod manifest;
mod metrics;
mod options;
mod packager;
mod project;
mod result;

pub use manifest::{dependencies, package_json, Dependencies};
pub use metrics::score;
pub use options::{ExportOptions, Optimizations, PackageScope, StylingChoice};
pub use packager::export_project;
pub use result::{ExportIssue, ExportMetrics, ExportResult};
