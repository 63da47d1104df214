use crate::metrics::measure;
use crate::project::{project_files, Exported};
use crate::{ExportIssue, ExportOptions, ExportResult, PackageScope};
use pagesmith_codegen::names::{pascal_case, Identifiers};
use pagesmith_codegen::{
    emit_story, emit_test, emitter_for, EmitContext, EmitError, Emission, Emitter,
    FileDescriptor,
};
use pagesmith_editor::Element;
use pagesmith_registry::Registry;
use std::any::Any;
use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, info, instrument, warn};

/// Export `elements` (normally the document roots, each emitted with its
/// whole subtree) as one package.
///
/// Never fails: elements that cannot be emitted become entries of
/// `errors` and the rest of the export continues. A panic anywhere in
/// packaging yields a result with no files and one error.
#[instrument(skip_all, fields(target = %options.target, elements = elements.len()))]
pub fn export_project(
    elements: &[Element],
    registry: &Registry,
    options: &ExportOptions,
) -> ExportResult {
    guarded(|| package(elements, registry, options))
}

fn guarded(run: impl FnOnce() -> ExportResult) -> ExportResult {
    match panic::catch_unwind(AssertUnwindSafe(run)) {
        Ok(result) => result,
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            error!(reason = %reason, "Export aborted");
            ExportResult::failed(format!("Export failed: {}", reason))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Files of one package, rejecting a second file at the same path
#[derive(Default)]
struct Collector {
    files: Vec<FileDescriptor>,
    paths: BTreeSet<String>,
    errors: Vec<ExportIssue>,
}

impl Collector {
    fn push(&mut self, element: &Element, file: FileDescriptor) {
        if !self.paths.insert(file.path.clone()) {
            warn!(id = %element.id, path = %file.path, "Output path collision");
            self.errors.push(ExportIssue::element(
                &element.id,
                &element.type_id,
                format!("Output path {} is already used by another element", file.path),
            ));
            return;
        }
        self.files.push(file);
    }
}

fn package(elements: &[Element], registry: &Registry, options: &ExportOptions) -> ExportResult {
    let ctx = EmitContext::new(registry).typed(options.typed_output);
    let target = options.target;
    let emitter = emitter_for(target);
    let mut names = Identifiers::new();

    let mut out = Collector::default();
    let mut warnings = Vec::new();
    let mut components: Vec<(&Element, String, FileDescriptor)> = Vec::new();

    for element in elements {
        let ident = names.of(element);
        let Emission { file, warnings: emit_warnings } =
            match emitter.emit_named(element, &ident, &ctx) {
                Ok(emission) => emission,
                Err(err) => {
                    warn!(id = %element.id, type_id = %element.type_id, error = %err, "Element not exported");
                    out.errors.push(issue(element, &err));
                    continue;
                }
            };
        debug!(id = %element.id, path = %file.path, "Emitted component");
        warnings.extend(emit_warnings);

        if options.include_tests {
            let test = emit_test(element, &ident, &ctx, target);
            warnings.extend(test.warnings);
            if let Some(file) = test.file {
                out.push(element, file);
            }
        }
        if options.include_story_files {
            let story = emit_story(element, &ident, &ctx, target);
            warnings.extend(story.warnings);
            if let Some(file) = story.file {
                out.push(element, file);
            }
        }
        components.push((element, ident, file));
    }

    let exported: Vec<Exported> = components
        .iter()
        .map(|(_, ident, _)| Exported::named(ident))
        .collect();

    let mut files = if options.package_scope == PackageScope::SingleFile {
        let roots: Vec<&Element> = components.iter().map(|(element, _, _)| *element).collect();
        module(emitter.as_ref(), &roots, options, &ctx, &mut out.errors)
            .into_iter()
            .collect()
    } else {
        let mut component_files = Collector::default();
        for (element, _, file) in components {
            component_files.push(element, file);
        }
        out.errors.append(&mut component_files.errors);
        component_files.files
    };
    files.append(&mut out.files);

    if options.package_scope == PackageScope::FullProject {
        files.extend(project_files(options, &exported));
    }

    let element_count = elements.iter().map(Element::subtree_len).sum();
    let metrics = measure(&files, element_count, &options.optimizations);
    info!(
        files = metrics.file_count,
        errors = out.errors.len(),
        warnings = warnings.len(),
        "Export finished"
    );

    ExportResult {
        success: out.errors.is_empty(),
        files,
        errors: out.errors,
        warnings,
        metrics,
    }
}

fn issue(element: &Element, err: &EmitError) -> ExportIssue {
    ExportIssue::element(&element.id, &element.type_id, err.to_string())
}

/// Every successfully emitted root in one file named after the project.
/// Warnings were already collected per element.
fn module(
    emitter: &dyn Emitter,
    roots: &[&Element],
    options: &ExportOptions,
    ctx: &EmitContext,
    errors: &mut Vec<ExportIssue>,
) -> Option<FileDescriptor> {
    if roots.is_empty() {
        return None;
    }
    let name = pascal_case(&options.project_name);
    let name = if name.is_empty() { "App".to_string() } else { name };

    match emitter.emit_module(roots, &name, ctx) {
        Ok(emission) => Some(emission.file),
        Err(err) => {
            warn!(error = %err, "Single-file module not emitted");
            errors.push(ExportIssue::general(err.to_string()));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_becomes_failed_result() {
        let result = guarded(|| panic!("allocation failed"));

        assert!(!result.success);
        assert!(result.files.is_empty());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].message, "Export failed: allocation failed");
        assert_eq!(result.errors[0].element_id, None);
    }

    #[test]
    fn test_formatted_panic_message() {
        let result = guarded(|| panic!("{} files", 3));
        assert_eq!(result.errors[0].message, "Export failed: 3 files");
    }
}
