use crate::names::identifier;
use crate::targets::{AngularEmitter, HtmlEmitter, ReactEmitter, VueEmitter};
use crate::{EmitContext, EmitError, EmitWarning, FileDescriptor};
use pagesmith_editor::Element;
use pagesmith_registry::Target;

/// Output of one emitter call
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub file: FileDescriptor,
    pub warnings: Vec<EmitWarning>,
}

/// Generates component files for one target from element subtrees.
///
/// Emitters hold no state between calls; the same input always produces
/// byte-identical output.
pub trait Emitter: Send + Sync {
    fn target(&self) -> Target;

    /// Component file for `element`, whose root component is called
    /// `ident` and names the file
    fn emit_named(
        &self,
        element: &Element,
        ident: &str,
        ctx: &EmitContext,
    ) -> Result<Emission, EmitError>;

    /// One file holding every root of `elements`, named after `name`.
    /// Imports appear once and every identifier in the file is unique.
    fn emit_module(
        &self,
        elements: &[&Element],
        name: &str,
        ctx: &EmitContext,
    ) -> Result<Emission, EmitError>;

    fn emit_element(&self, element: &Element, ctx: &EmitContext) -> Result<Emission, EmitError> {
        let ident = identifier(&element.type_id, element.id.as_str());
        self.emit_named(element, &ident, ctx)
    }
}

pub fn emitter_for(target: Target) -> Box<dyn Emitter> {
    match target {
        Target::React => Box::new(ReactEmitter),
        Target::Vue => Box::new(VueEmitter),
        Target::Angular => Box::new(AngularEmitter),
        Target::Html => Box::new(HtmlEmitter),
    }
}
