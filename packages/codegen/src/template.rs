//! # Template Substitution
//!
//! Templates hold `{{name}}` placeholders where `name` is made of ASCII
//! letters, digits and underscores. Any other use of braces is literal
//! text, so JSX such as `style={{{style}}}` or `style={{ ...{{style}} }}`
//! passes through with only the inner placeholder replaced.
//!
//! Multi-line replacements are indented to the column of the placeholder
//! when it starts its line. An empty replacement standing alone on a line
//! removes the line.

use pagesmith_registry::PropValue;

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Expand every placeholder of `template` through `resolve`.
///
/// `resolve` returns final text: escaping is the caller's business.
pub fn substitute(template: &str, mut resolve: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let name_len = after
            .find(|c: char| !is_ident_char(c))
            .unwrap_or(after.len());

        if name_len == 0 || !after[name_len..].starts_with("}}") {
            // Not a placeholder; keep one brace and rescan from the next
            out.push_str(&rest[..start + 1]);
            rest = &rest[start + 1..];
            continue;
        }

        out.push_str(&rest[..start]);
        rest = &after[name_len + 2..];

        let value = resolve(&after[..name_len]);
        let line_start = out.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let leading = &out[line_start..];
        let alone = leading.chars().all(char::is_whitespace);

        if value.is_empty() {
            if alone && (rest.is_empty() || rest.starts_with('\n')) && line_start > 0 {
                out.truncate(line_start - 1);
            }
            continue;
        }

        if alone && value.contains('\n') {
            let indent = leading.to_string();
            let mut lines = value.lines();
            if let Some(first) = lines.next() {
                out.push_str(first);
            }
            for line in lines {
                out.push('\n');
                if !line.is_empty() {
                    out.push_str(&indent);
                }
                out.push_str(line);
            }
        } else {
            out.push_str(&value);
        }
    }

    out.push_str(rest);
    out
}

/// Placeholder names used by `template`, in order of appearance
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let name_len = after
            .find(|c: char| !is_ident_char(c))
            .unwrap_or(after.len());

        if name_len > 0 && after[name_len..].starts_with("}}") {
            names.push(&after[..name_len]);
            rest = &after[name_len + 2..];
        } else {
            rest = &rest[start + 1..];
        }
    }
    names
}

/// Escape text for markup content and attribute values
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for the inside of a quoted script string literal
pub fn escape_script(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '`' => out.push_str("\\`"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '$' => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape markup for embedding in a script template literal
pub fn escape_template_literal(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// Plain-text form of a prop value. Strings are used as is, `null` is
/// empty, arrays and objects become compact JSON.
pub fn value_text(value: &PropValue) -> String {
    match value {
        PropValue::Null => String::new(),
        PropValue::String(s) => s.clone(),
        PropValue::Bool(b) => b.to_string(),
        PropValue::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
