//! Identifier derivation
//!
//! Generated code names each element after its type and id, so that the
//! same document always yields the same names: `button` + `el-3` becomes
//! `ButtonEl3`, with file names in kebab case (`button-el-3`).

use pagesmith_editor::{Element, ElementId};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// PascalCase identifier for an element
pub fn identifier(type_id: &str, id: &str) -> String {
    let mut ident = pascal_case(type_id);
    ident.push_str(&pascal_case(id));
    match ident.chars().next() {
        None => "Element".to_string(),
        Some(first) if first.is_ascii_digit() => format!("C{}", ident),
        Some(_) => ident,
    }
}

/// Identifiers handed out within one output unit.
///
/// An element whose natural identifier is already taken by another element
/// gets the first free `_2`, `_3`, ... suffix. Natural identifiers never
/// contain `_`, so a suffixed name cannot shadow a later natural one.
#[derive(Debug, Clone, Default)]
pub struct Identifiers {
    assigned: BTreeMap<ElementId, String>,
    taken: BTreeSet<String>,
}

impl Identifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier of `element`; the same element always gets the same one
    pub fn of(&mut self, element: &Element) -> String {
        if let Some(ident) = self.assigned.get(&element.id) {
            return ident.clone();
        }

        let base = identifier(&element.type_id, element.id.as_str());
        let mut ident = base.clone();
        let mut n = 2;
        while self.taken.contains(&ident) {
            ident = format!("{}_{}", base, n);
            n += 1;
        }
        if ident != base {
            debug!(id = %element.id, identifier = %ident, "Disambiguated identifier");
        }
        self.assign(element, &ident);
        ident
    }

    /// Pin `element` to `ident`
    pub fn assign(&mut self, element: &Element, ident: &str) {
        self.taken.insert(ident.to_string());
        self.assigned.insert(element.id.clone(), ident.to_string());
    }
}

/// Join the alphanumeric words of `text`, each capitalized
pub fn pascal_case(text: &str) -> String {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// `ButtonEl3` → `button-el-3`
pub fn kebab_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    let mut prev: Option<char> = None;

    for c in ident.chars() {
        if !c.is_ascii_alphanumeric() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            prev = None;
            continue;
        }

        if let Some(p) = prev {
            let boundary = (c.is_ascii_uppercase() && !p.is_ascii_uppercase())
                || (c.is_ascii_digit() && !p.is_ascii_digit())
                || (c.is_ascii_alphabetic() && p.is_ascii_digit());
            if boundary && !out.ends_with('-') {
                out.push('-');
            }
        }
        out.push(c.to_ascii_lowercase());
        prev = Some(c);
    }

    out.trim_end_matches('-').to_string()
}

/// CSS property → JS style key: `font-size` → `fontSize`,
/// `-webkit-transform` → `WebkitTransform`
pub fn camel_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut upper = false;

    for c in property.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
