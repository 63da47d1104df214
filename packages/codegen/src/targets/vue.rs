use crate::render::Renderer;
use crate::types::type_mapping;
use crate::{
    CodeWriter, EmitContext, EmitError, Emission, Emitter, FileDescriptor, FileKind,
    SourceLanguage,
};
use pagesmith_editor::Element;
use pagesmith_registry::Target;
use std::collections::BTreeMap;

/// Single-file components with the whole subtree inlined in `<template>`.
/// A module of several roots places them side by side in one template and
/// declares the union of their props.
#[derive(Debug, Clone, Copy, Default)]
pub struct VueEmitter;

impl VueEmitter {
    fn render(
        &self,
        roots: &[&Element],
        reserved: Option<&str>,
        name: &str,
        ctx: &EmitContext,
    ) -> Result<Emission, EmitError> {
        let typed = ctx.is_typed(Target::Vue);
        let mut renderer = Renderer::new(ctx, Target::Vue);
        if let (Some(ident), Some(first)) = (reserved, roots.first()) {
            renderer.reserve(first, ident);
        }
        for root in roots {
            renderer.identify(root);
        }

        let mut parts = Vec::with_capacity(roots.len());
        for root in roots {
            let markup = renderer.inline(root, 0)?;
            if roots.len() > 1 {
                parts.push(format!("<!-- {} -->\n{}", renderer.identify(root), markup));
            } else {
                parts.push(markup);
            }
        }

        let mut w = CodeWriter::new();
        w.add_line("<template>");
        w.indent();
        w.add_block(&parts.join("\n"));
        w.dedent();
        w.add_line("</template>");

        let mut schema = BTreeMap::new();
        for root in roots {
            if let Some(definition) = ctx.registry.get(&root.type_id) {
                for (prop, entry) in &definition.prop_schema {
                    schema.entry(prop.clone()).or_insert_with(|| entry.clone());
                }
            }
        }

        if !schema.is_empty() {
            w.blank_line();
            match type_mapping(Target::Vue).filter(|_| typed) {
                Some(mapping) => {
                    let props_type = format!("{}Props", name);
                    w.add_line("<script setup lang=\"ts\">");
                    w.add_block(&mapping.interface(&props_type, &schema));
                    w.blank_line();
                    w.add_line(&format!("defineProps<{}>();", props_type));
                }
                None => {
                    let names: Vec<String> = schema
                        .keys()
                        .map(|name| serde_json::Value::String(name.clone()).to_string())
                        .collect();
                    w.add_line("<script setup>");
                    w.add_line(&format!("defineProps([{}]);", names.join(", ")));
                }
            }
            w.add_line("</script>");
        }

        let file_name = format!("{}.vue", name);
        Ok(Emission {
            file: FileDescriptor::new(
                ctx.path_for(&file_name),
                w.get_output(),
                FileKind::Component,
                SourceLanguage::Vue,
            ),
            warnings: renderer.into_warnings(),
        })
    }
}

impl Emitter for VueEmitter {
    fn target(&self) -> Target {
        Target::Vue
    }

    fn emit_named(
        &self,
        element: &Element,
        ident: &str,
        ctx: &EmitContext,
    ) -> Result<Emission, EmitError> {
        self.render(&[element], Some(ident), ident, ctx)
    }

    fn emit_module(
        &self,
        elements: &[&Element],
        name: &str,
        ctx: &EmitContext,
    ) -> Result<Emission, EmitError> {
        self.render(elements, None, name, ctx)
    }
}
