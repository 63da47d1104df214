use crate::names::kebab_case;
use crate::render::Renderer;
use crate::template::escape_template_literal;
use crate::types::type_mapping;
use crate::{
    CodeWriter, EmitContext, EmitError, EmitWarning, Emission, Emitter, FileDescriptor,
    FileKind, SourceLanguage,
};
use pagesmith_editor::Element;
use pagesmith_registry::Target;

/// Standalone components with an inline template. Always TypeScript.
/// A module of several roots holds one decorated class per root under a
/// single import.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngularEmitter;

impl AngularEmitter {
    fn render(
        &self,
        roots: &[&Element],
        reserved: Option<&str>,
        ctx: &EmitContext,
    ) -> Result<(String, Vec<EmitWarning>), EmitError> {
        let mut renderer = Renderer::new(ctx, Target::Angular);
        if let (Some(ident), Some(first)) = (reserved, roots.first()) {
            renderer.reserve(first, ident);
        }
        for root in roots {
            renderer.identify(root);
        }

        let mut components = Vec::with_capacity(roots.len());
        for root in roots {
            let markup = renderer.inline(root, 0)?;
            components.push((renderer.identify(root), markup, inputs(root, ctx)));
        }

        let mut w = CodeWriter::new();
        if components.iter().all(|(_, _, inputs)| inputs.is_empty()) {
            w.add_line("import { Component } from \"@angular/core\";");
        } else {
            w.add_line("import { Component, Input } from \"@angular/core\";");
        }

        for (ident, markup, inputs) in &components {
            w.blank_line();
            w.add_line("@Component({");
            w.indent();
            w.add_line(&format!("selector: \"app-{}\",", kebab_case(ident)));
            w.add_line("standalone: true,");
            w.add_line("template: `");
            w.indent();
            w.add_block(&escape_template_literal(markup));
            w.dedent();
            w.add_line("`,");
            w.dedent();
            w.add_line("})");

            if inputs.is_empty() {
                w.add_line(&format!("export class {}Component {{}}", ident));
            } else {
                w.add_line(&format!("export class {}Component {{", ident));
                w.indent();
                for input in inputs {
                    w.add_line(input);
                }
                w.dedent();
                w.add_line("}");
            }
        }

        Ok((w.get_output(), renderer.into_warnings()))
    }
}

/// `@Input` declarations for the props of `element`'s definition
fn inputs(element: &Element, ctx: &EmitContext) -> Vec<String> {
    match (
        ctx.registry.get(&element.type_id),
        type_mapping(Target::Angular),
    ) {
        (Some(definition), Some(mapping)) => definition
            .prop_schema
            .iter()
            .map(|(name, schema)| {
                let ty = mapping.schema_type(schema);
                if schema.required {
                    format!("@Input({{ required: true }}) {}!: {};", name, ty)
                } else {
                    format!("@Input() {}?: {};", name, ty)
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn emission(
    name: &str,
    content: String,
    warnings: Vec<EmitWarning>,
    ctx: &EmitContext,
) -> Emission {
    let file_name = format!("{}.component.ts", kebab_case(name));
    Emission {
        file: FileDescriptor::new(
            ctx.path_for(&file_name),
            content,
            FileKind::Component,
            SourceLanguage::TypeScript,
        ),
        warnings,
    }
}

impl Emitter for AngularEmitter {
    fn target(&self) -> Target {
        Target::Angular
    }

    fn emit_named(
        &self,
        element: &Element,
        ident: &str,
        ctx: &EmitContext,
    ) -> Result<Emission, EmitError> {
        let (content, warnings) = self.render(&[element], Some(ident), ctx)?;
        Ok(emission(ident, content, warnings, ctx))
    }

    fn emit_module(
        &self,
        elements: &[&Element],
        name: &str,
        ctx: &EmitContext,
    ) -> Result<Emission, EmitError> {
        let (content, warnings) = self.render(elements, None, ctx)?;
        Ok(emission(name, content, warnings, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_registry::Registry;
    use serde_json::json;

    #[test]
    fn test_component_decorator() {
        let registry = Registry::builtin();
        let ctx = EmitContext::new(&registry);
        let button = Element::new("el-3", "button").with_prop("text", json!("Send `now`"));

        let emission = AngularEmitter.emit_element(&button, &ctx).unwrap();
        let code = &emission.file.content;

        assert_eq!(emission.file.path, "src/components/button-el-3.component.ts");
        assert_eq!(emission.file.language, SourceLanguage::TypeScript);
        assert!(code.contains("selector: \"app-button-el-3\","));
        assert!(code.contains("export class ButtonEl3Component {"));
        assert!(code.contains("@Input({ required: true }) text!: string;"));
        assert!(code.contains(r#"@Input() variant?: "primary" | "secondary" | "link";"#));
        assert!(code.contains("Send \\`now\\`</button>"));
    }

    #[test]
    fn test_unknown_type_placeholder() {
        let registry = Registry::builtin();
        let ctx = EmitContext::new(&registry);
        let emission = AngularEmitter
            .emit_element(&Element::new("el-9", "hologram"), &ctx)
            .unwrap();

        assert_eq!(emission.warnings.len(), 1);
        assert!(emission.file.content.contains("Unknown component \"hologram\""));
        assert!(emission.file.content.contains("export class HologramEl9Component {}"));
    }
}
