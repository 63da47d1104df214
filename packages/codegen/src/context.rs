use pagesmith_registry::{Registry, Target};

/// Inputs shared by every emitter call
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    pub registry: &'a Registry,
    /// Emit type annotations where the target supports them
    pub typed_output: bool,
    /// Directory component files are placed in
    pub component_dir: &'a str,
}

impl<'a> EmitContext<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            typed_output: false,
            component_dir: "src/components",
        }
    }

    pub fn typed(mut self, typed_output: bool) -> Self {
        self.typed_output = typed_output;
        self
    }

    pub fn in_dir(mut self, component_dir: &'a str) -> Self {
        self.component_dir = component_dir;
        self
    }

    /// Whether output for `target` carries types. Angular is always typed;
    /// plain HTML never is.
    pub fn is_typed(&self, target: Target) -> bool {
        target.supports_types() && (self.typed_output || target.always_typed())
    }

    pub fn path_for(&self, file_name: &str) -> String {
        if self.component_dir.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", self.component_dir.trim_end_matches('/'), file_name)
        }
    }
}

/// Indentation-aware output buffer
#[derive(Debug, Default)]
pub struct CodeWriter {
    buffer: String,
    indent_level: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn add_line(&mut self, text: &str) {
        if !text.is_empty() {
            self.add_indent();
        }
        self.add(text);
        self.add("\n");
    }

    /// Write each line of `block` at the current indentation
    pub fn add_block(&mut self, block: &str) {
        for line in block.lines() {
            self.add_line(line);
        }
    }

    pub fn blank_line(&mut self) {
        self.add("\n");
    }

    fn add_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str("  ");
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn get_output(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_is_reindented() {
        let mut writer = CodeWriter::new();
        writer.add_line("<body>");
        writer.indent();
        writer.add_block("<div>\n  <p>Hi</p>\n\n</div>");
        writer.dedent();
        writer.add_line("</body>");

        assert_eq!(
            writer.get_output(),
            "<body>\n  <div>\n    <p>Hi</p>\n\n  </div>\n</body>\n"
        );
    }

    #[test]
    fn test_typed_rules() {
        let registry = Registry::new();
        let ctx = EmitContext::new(&registry);
        assert!(!ctx.is_typed(Target::React));
        assert!(ctx.is_typed(Target::Angular));
        assert!(!ctx.typed(true).is_typed(Target::Html));
        assert!(ctx.typed(true).is_typed(Target::Vue));
    }
}
