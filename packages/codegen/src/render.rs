//! Tree walking shared by the emitters

use crate::names::Identifiers;
use crate::style;
use crate::template::{escape_markup, substitute, value_text};
use crate::{EmitContext, EmitError, EmitWarning, MAX_DEPTH};
use pagesmith_editor::Element;
use pagesmith_registry::Target;
use tracing::warn;

/// An element rendered as its own component, children as references
#[derive(Debug, Clone)]
pub(crate) struct LocalComponent {
    pub ident: String,
    pub markup: String,
}

pub(crate) struct Renderer<'a> {
    ctx: &'a EmitContext<'a>,
    target: Target,
    warnings: Vec<EmitWarning>,
    identifiers: Identifiers,
}

impl<'a> Renderer<'a> {
    pub fn new(ctx: &'a EmitContext<'a>, target: Target) -> Self {
        Self {
            ctx,
            target,
            warnings: Vec::new(),
            identifiers: Identifiers::default(),
        }
    }

    pub fn into_warnings(self) -> Vec<EmitWarning> {
        self.warnings
    }

    /// Identifier of `element`, unique within this render
    pub fn identify(&mut self, element: &Element) -> String {
        self.identifiers.of(element)
    }

    /// Give `element` the identifier `ident` ahead of rendering
    pub fn reserve(&mut self, element: &Element, ident: &str) {
        self.identifiers.assign(element, ident);
    }

    /// Markup with every descendant inlined, each preceded by a comment
    /// naming its identifier
    pub fn inline(&mut self, element: &Element, depth: usize) -> Result<String, EmitError> {
        check_depth(element, depth)?;
        self.identify(element);

        let mut parts = Vec::with_capacity(element.children.len());
        for child in &element.children {
            let ident = self.identify(child);
            let markup = self.inline(child, depth + 1)?;
            parts.push(format!("<!-- {} -->\n{}", ident, markup));
        }
        self.markup(element, &parts.join("\n"))
    }

    /// Render `element` as a component whose children are referenced as
    /// `<Ident />`. Descendant components are pushed onto `locals`, each
    /// after its own descendants.
    pub fn components(
        &mut self,
        element: &Element,
        depth: usize,
        locals: &mut Vec<LocalComponent>,
    ) -> Result<LocalComponent, EmitError> {
        check_depth(element, depth)?;
        let ident = self.identify(element);

        let mut refs = Vec::with_capacity(element.children.len());
        for child in &element.children {
            refs.push(format!("<{} />", self.identify(child)));
        }
        let markup = self.markup(element, &refs.join("\n"))?;

        for child in &element.children {
            let component = self.components(child, depth + 1, locals)?;
            locals.push(component);
        }
        Ok(LocalComponent { ident, markup })
    }

    /// Expand the element's template with `children` in the children slot
    pub fn markup(&mut self, element: &Element, children: &str) -> Result<String, EmitError> {
        let Some(definition) = self.ctx.registry.get(&element.type_id) else {
            warn!(id = %element.id, type_id = %element.type_id, "Unknown component type");
            self.warnings
                .push(EmitWarning::unknown_type(&element.id, &element.type_id));
            return Ok(placeholder(element, children));
        };

        let template =
            definition
                .template(self.target)
                .ok_or_else(|| EmitError::MissingTemplate {
                    type_id: element.type_id.clone(),
                    target: self.target,
                })?;

        let style = match self.target {
            Target::React => style::react_object(element),
            _ => style::css_inline(element),
        };

        Ok(substitute(template, |name| match name {
            "children" => children.to_string(),
            "style" => style.clone(),
            "id" => escape_markup(element.id.as_str()),
            "className" => element
                .styling
                .class_name
                .as_deref()
                .map(escape_markup)
                .unwrap_or_default(),
            prop => element
                .props
                .get(prop)
                .map(|value| escape_markup(&value_text(value)))
                .unwrap_or_default(),
        }))
    }
}

fn check_depth(element: &Element, depth: usize) -> Result<(), EmitError> {
    if depth > MAX_DEPTH {
        return Err(EmitError::DepthExceeded {
            element_id: element.id.clone(),
            max: MAX_DEPTH,
        });
    }
    Ok(())
}

/// Clearly marked stand-in for an element of unknown type
fn placeholder(element: &Element, children: &str) -> String {
    let type_id = escape_markup(&element.type_id);
    let open = format!(
        "<div id=\"{}\" data-unknown-type=\"{}\">",
        escape_markup(element.id.as_str()),
        type_id
    );
    let label = format!("Unknown component \"{}\"", type_id);

    if children.is_empty() {
        return format!("{}{}</div>", open, label);
    }

    let mut out = format!("{}\n  {}", open, label);
    for line in children.lines() {
        out.push('\n');
        if !line.is_empty() {
            out.push_str("  ");
        }
        out.push_str(line);
    }
    out.push_str("\n</div>");
    out
}
