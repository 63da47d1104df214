use crate::names::kebab_case;
use crate::render::Renderer;
use crate::template::escape_markup;
use crate::{
    CodeWriter, EmitContext, EmitError, Emission, Emitter, FileDescriptor, FileKind,
    SourceLanguage,
};
use pagesmith_editor::Element;
use pagesmith_registry::Target;

/// Standalone HTML documents. Untyped; the type table is ignored. A module
/// of several roots places them one after another in the same `<body>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEmitter;

impl HtmlEmitter {
    fn render(
        &self,
        roots: &[&Element],
        reserved: Option<&str>,
        name: &str,
        ctx: &EmitContext,
    ) -> Result<Emission, EmitError> {
        let mut renderer = Renderer::new(ctx, Target::Html);
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
        w.add_line("<!DOCTYPE html>");
        w.add_line("<html lang=\"en\">");
        w.add_line("<head>");
        w.indent();
        w.add_line("<meta charset=\"UTF-8\">");
        w.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
        w.add_line(&format!("<title>{}</title>", escape_markup(name)));
        w.dedent();
        w.add_line("</head>");
        w.add_line("<body>");
        w.indent();
        w.add_block(&parts.join("\n"));
        w.dedent();
        w.add_line("</body>");
        w.add_line("</html>");

        Ok(Emission {
            file: FileDescriptor::new(
                ctx.path_for(&format!("{}.html", kebab_case(name))),
                w.get_output(),
                FileKind::Component,
                SourceLanguage::Html,
            ),
            warnings: renderer.into_warnings(),
        })
    }
}

impl Emitter for HtmlEmitter {
    fn target(&self) -> Target {
        Target::Html
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

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_registry::Registry;
    use serde_json::json;

    #[test]
    fn test_full_document() {
        let registry = Registry::builtin();
        let ctx = EmitContext::new(&registry).typed(true);
        let button = Element::new("el-1", "button")
            .with_prop("text", json!("Click me"))
            .with_prop("variant", json!("primary"))
            .at(80.0, 40.0);

        let emission = HtmlEmitter.emit_element(&button, &ctx).unwrap();
        let html = &emission.file.content;

        assert_eq!(emission.file.name, "button-el-1.html");
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains("<title>ButtonEl1</title>"));
        assert!(html.contains(
            r#"  <button id="el-1" class="btn btn-primary " style="position: absolute; left: 80px; top: 40px">Click me</button>"#
        ));
        assert!(html.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn test_nested_markup() {
        let registry = Registry::builtin();
        let ctx = EmitContext::new(&registry);
        let page = Element::new("page", "container").with_child(
            Element::new("hero", "card").with_child(Element::new("cta", "link")),
        );

        let html = HtmlEmitter.emit_element(&page, &ctx).unwrap().file.content;
        assert!(html.contains("<!-- CardHero -->"));
        assert!(html.contains("<!-- LinkCta -->"));
    }
}
