use crate::render::Renderer;
use crate::types::type_mapping;
use crate::{
    CodeWriter, EmitContext, EmitError, EmitWarning, Emission, Emitter, FileDescriptor,
    FileKind, SourceLanguage,
};
use pagesmith_editor::Element;
use pagesmith_registry::Target;
use std::collections::BTreeMap;

/// Function components, one per element. The root is the default export;
/// descendants are module-local and referenced as `<Ident />`. In a module
/// of several roots the first is the default export and the rest are
/// named exports.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactEmitter;

impl ReactEmitter {
    fn render(
        &self,
        roots: &[&Element],
        reserved: Option<&str>,
        ctx: &EmitContext,
    ) -> Result<(String, Vec<EmitWarning>), EmitError> {
        let typed = ctx.is_typed(Target::React);
        let mut renderer = Renderer::new(ctx, Target::React);
        if let (Some(ident), Some(first)) = (reserved, roots.first()) {
            renderer.reserve(first, ident);
        }
        for root in roots {
            renderer.identify(root);
        }

        let mut w = CodeWriter::new();
        w.add_line("import React from \"react\";");
        w.blank_line();

        for (i, element) in roots.iter().enumerate() {
            let mut locals = Vec::new();
            let root = renderer.components(element, 0, &mut locals)?;
            if i > 0 {
                w.blank_line();
            }

            let props_type = format!("{}Props", root.ident);
            let signature = if typed {
                let empty = BTreeMap::new();
                let schema = ctx
                    .registry
                    .get(&element.type_id)
                    .map(|def| &def.prop_schema)
                    .unwrap_or(&empty);
                if let Some(mapping) = type_mapping(Target::React) {
                    w.add_line(&format!("export {}", mapping.interface(&props_type, schema)));
                    w.blank_line();
                }
                format!("_props: {}", props_type)
            } else {
                "_props".to_string()
            };

            for local in &locals {
                w.add_line(&format!("function {}() {{", local.ident));
                write_return(&mut w, &local.markup);
                w.add_line("}");
                w.blank_line();
            }

            let export = if i == 0 { "export default" } else { "export" };
            w.add_line(&format!("{} function {}({}) {{", export, root.ident, signature));
            write_return(&mut w, &root.markup);
            w.add_line("}");
            w.blank_line();
            w.add_line(&format!("{}.displayName = \"{}\";", root.ident, root.ident));
        }

        Ok((w.get_output(), renderer.into_warnings()))
    }

    fn emission(
        &self,
        name: &str,
        content: String,
        warnings: Vec<EmitWarning>,
        ctx: &EmitContext,
    ) -> Emission {
        let language = SourceLanguage::jsx(ctx.is_typed(Target::React));
        let file_name = format!("{}.{}", name, language.extension());
        Emission {
            file: FileDescriptor::new(
                ctx.path_for(&file_name),
                content,
                FileKind::Component,
                language,
            ),
            warnings,
        }
    }
}

impl Emitter for ReactEmitter {
    fn target(&self) -> Target {
        Target::React
    }

    fn emit_named(
        &self,
        element: &Element,
        ident: &str,
        ctx: &EmitContext,
    ) -> Result<Emission, EmitError> {
        let (content, warnings) = self.render(&[element], Some(ident), ctx)?;
        Ok(self.emission(ident, content, warnings, ctx))
    }

    fn emit_module(
        &self,
        elements: &[&Element],
        name: &str,
        ctx: &EmitContext,
    ) -> Result<Emission, EmitError> {
        let (content, warnings) = self.render(elements, None, ctx)?;
        Ok(self.emission(name, content, warnings, ctx))
    }
}

fn write_return(w: &mut CodeWriter, markup: &str) {
    w.indent();
    w.add_line("return (");
    w.indent();
    w.add_block(markup);
    w.dedent();
    w.add_line(");");
    w.dedent();
}
