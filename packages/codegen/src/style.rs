//! Inline style rendering
//!
//! An element's `style` placeholder carries its canvas position, its size
//! constraints and its style overrides, in the syntax of the target.

use crate::names::camel_case;
use crate::template::escape_markup;
use pagesmith_editor::Element;

/// Ordered `(css-property, value)` pairs; override keys come last and
/// replace layout properties of the same name.
pub fn declarations(element: &Element) -> Vec<(String, StyleValue)> {
    let mut decls: Vec<(String, StyleValue)> = vec![
        ("position".into(), StyleValue::Keyword("absolute".into())),
        ("left".into(), StyleValue::Px(element.position.x)),
        ("top".into(), StyleValue::Px(element.position.y)),
    ];

    let c = &element.constraints;
    let sizes = [
        ("width", c.width),
        ("height", c.height),
        ("min-width", c.min_width),
        ("min-height", c.min_height),
        ("max-width", c.max_width),
        ("max-height", c.max_height),
    ];
    for (property, value) in sizes {
        if let Some(v) = value {
            decls.push((property.into(), StyleValue::Px(v)));
        }
    }

    if element.position.z != 0.0 {
        decls.push(("z-index".into(), StyleValue::Number(element.position.z)));
    }

    for (property, value) in &element.styling.overrides {
        let value = StyleValue::Keyword(value.clone());
        match decls.iter_mut().find(|(p, _)| p == property) {
            Some(existing) => existing.1 = value,
            None => decls.push((property.clone(), value)),
        }
    }
    decls
}

#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Px(f64),
    Number(f64),
    Keyword(String),
}

/// `position: absolute; left: 80px; top: 40px`
pub fn css_inline(element: &Element) -> String {
    declarations(element)
        .into_iter()
        .map(|(property, value)| {
            let value = match value {
                StyleValue::Px(v) => format!("{}px", v),
                StyleValue::Number(v) => v.to_string(),
                StyleValue::Keyword(k) => escape_markup(&k),
            };
            format!("{}: {}", escape_markup(&property), value)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// `{ position: "absolute", left: 80, top: 40 }`
pub fn react_object(element: &Element) -> String {
    let entries: Vec<String> = declarations(element)
        .into_iter()
        .map(|(property, value)| {
            let value = match value {
                StyleValue::Px(v) | StyleValue::Number(v) => v.to_string(),
                StyleValue::Keyword(k) => {
                    serde_json::Value::String(k).to_string()
                }
            };
            format!("{}: {}", js_key(&camel_case(&property)), value)
        })
        .collect();

    format!("{{ {} }}", entries.join(", "))
}

fn js_key(key: &str) -> String {
    let plain = !key.is_empty()
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !key.starts_with(|c: char| c.is_ascii_digit());
    if plain {
        key.to_string()
    } else {
        serde_json::Value::String(key.to_string()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element() -> Element {
        let mut element = Element::new("el-1", "button").at(80.0, 40.0);
        element.constraints.width = Some(120.0);
        element
            .styling
            .overrides
            .insert("background-color".into(), "#fff".into());
        element
    }

    #[test]
    fn test_css_inline() {
        assert_eq!(
            css_inline(&element()),
            "position: absolute; left: 80px; top: 40px; width: 120px; background-color: #fff"
        );
    }

    #[test]
    fn test_react_object() {
        assert_eq!(
            react_object(&element()),
            r##"{ position: "absolute", left: 80, top: 40, width: 120, backgroundColor: "#fff" }"##
        );
    }

    #[test]
    fn test_override_replaces_layout_property() {
        let mut element = element();
        element
            .styling
            .overrides
            .insert("position".into(), "relative".into());
        assert!(css_inline(&element).starts_with("position: relative; left: 80px"));
    }
}
