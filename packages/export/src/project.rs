//! Project files around the generated components

use crate::manifest::{package_json, package_name};
use crate::{ExportOptions, StylingChoice};
use pagesmith_codegen::names::kebab_case;
use pagesmith_codegen::{CodeWriter, FileDescriptor, FileKind, SourceLanguage};
use pagesmith_registry::Target;
use serde_json::json;

/// Component a project re-exports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exported {
    pub ident: String,
    pub kebab: String,
}

impl Exported {
    pub fn named(ident: &str) -> Self {
        Self {
            ident: ident.to_string(),
            kebab: kebab_case(ident),
        }
    }
}

fn is_typed(options: &ExportOptions) -> bool {
    let target = options.target;
    target.supports_types() && (options.typed_output || target.always_typed())
}

/// Everything a full project adds to the component files
pub fn project_files(options: &ExportOptions, exported: &[Exported]) -> Vec<FileDescriptor> {
    let typed = is_typed(options);
    let mut files = vec![FileDescriptor::new(
        "package.json",
        package_json(options),
        FileKind::Config,
        SourceLanguage::Json,
    )];

    if typed {
        files.push(FileDescriptor::new(
            "tsconfig.json",
            tsconfig(options.target),
            FileKind::Config,
            SourceLanguage::Json,
        ));
    }
    files.push(build_config(options, typed));
    if options.styling == StylingChoice::Tailwind {
        files.push(FileDescriptor::new(
            "tailwind.config.js",
            TAILWIND_CONFIG,
            FileKind::Config,
            SourceLanguage::JavaScript,
        ));
    }
    files.push(FileDescriptor::new(
        "README.md",
        readme(options, exported),
        FileKind::Documentation,
        SourceLanguage::Markdown,
    ));
    let stylesheet = stylesheet(options, typed);
    files.push(entry(options.target, typed, exported, &stylesheet.path));
    files.push(stylesheet);
    files
}

fn tsconfig(target: Target) -> String {
    let mut compiler_options = json!({
        "target": "ES2022",
        "module": "ESNext",
        "moduleResolution": "bundler",
        "lib": ["ES2022", "DOM", "DOM.Iterable"],
        "strict": true,
        "skipLibCheck": true,
        "isolatedModules": true,
        "noEmit": true,
    });
    match target {
        Target::React => compiler_options["jsx"] = json!("react-jsx"),
        Target::Vue => compiler_options["jsx"] = json!("preserve"),
        Target::Angular => {
            compiler_options["experimentalDecorators"] = json!(true);
            compiler_options["useDefineForClassFields"] = json!(false);
            compiler_options["noEmit"] = json!(false);
            compiler_options["outDir"] = json!("./dist/out-tsc");
        }
        Target::Html => {}
    }

    let config = json!({
        "compilerOptions": compiler_options,
        "include": ["src"],
    });
    let mut out = serde_json::to_string_pretty(&config).unwrap_or_default();
    out.push('\n');
    out
}

fn build_config(options: &ExportOptions, typed: bool) -> FileDescriptor {
    if options.target == Target::Angular {
        return FileDescriptor::new(
            "angular.json",
            angular_json(options),
            FileKind::Config,
            SourceLanguage::Json,
        );
    }

    let plugin = match options.target {
        Target::React => Some(("react", "@vitejs/plugin-react")),
        Target::Vue => Some(("vue", "@vitejs/plugin-vue")),
        _ => None,
    };
    let opt = &options.optimizations;

    let mut w = CodeWriter::new();
    w.add_line("import { defineConfig } from \"vite\";");
    if let Some((name, module)) = plugin {
        w.add_line(&format!("import {} from \"{}\";", name, module));
    }
    w.blank_line();
    w.add_line("export default defineConfig({");
    w.indent();
    if let Some((name, _)) = plugin {
        w.add_line(&format!("plugins: [{}()],", name));
    }
    w.add_line("build: {");
    w.indent();
    w.add_line(&format!(
        "minify: {},",
        if opt.minify { "\"esbuild\"" } else { "false" }
    ));
    w.add_line(&format!("cssCodeSplit: {},", opt.code_split));
    w.add_line("rollupOptions: {");
    w.indent();
    w.add_line(&format!("treeshake: {},", opt.tree_shake));
    if !opt.code_split {
        w.add_line("output: { inlineDynamicImports: true },");
    }
    w.dedent();
    w.add_line("},");
    w.dedent();
    w.add_line("},");
    if options.include_tests {
        w.add_line("test: { environment: \"jsdom\" },");
    }
    w.dedent();
    w.add_line("});");

    let language = SourceLanguage::script(typed);
    FileDescriptor::new(
        format!("vite.config.{}", language.extension()),
        w.get_output(),
        FileKind::Config,
        language,
    )
}

fn angular_json(options: &ExportOptions) -> String {
    let name = package_name(&options.project_name);
    let opt = &options.optimizations;
    let styles = match options.styling {
        StylingChoice::CssModules => "src/styles.module.css",
        _ => "src/styles.css",
    };

    let config = json!({
        "$schema": "./node_modules/@angular/cli/lib/config/schema.json",
        "version": 1,
        "newProjectRoot": "projects",
        "projects": {
            name.clone(): {
                "projectType": "application",
                "root": "",
                "sourceRoot": "src",
                "prefix": "app",
                "architect": {
                    "build": {
                        "builder": "@angular-devkit/build-angular:application",
                        "options": {
                            "outputPath": format!("dist/{}", name),
                            "browser": "src/main.ts",
                            "tsConfig": "tsconfig.json",
                            "styles": [styles],
                            "optimization": opt.minify || opt.tree_shake,
                            "namedChunks": opt.code_split,
                        }
                    },
                    "serve": {
                        "builder": "@angular-devkit/build-angular:dev-server",
                        "options": { "buildTarget": format!("{}:build", name) }
                    }
                }
            }
        }
    });
    let mut out = serde_json::to_string_pretty(&config).unwrap_or_default();
    out.push('\n');
    out
}

fn readme(options: &ExportOptions, exported: &[Exported]) -> String {
    let name = package_name(&options.project_name);
    let (dev, build) = match options.target {
        Target::Angular => ("npm start", "npm run build"),
        _ => ("npm run dev", "npm run build"),
    };

    let mut w = CodeWriter::new();
    w.add_line(&format!("# {}", name));
    w.blank_line();
    w.add_line(&format!(
        "Generated {} project with {} component{}.",
        options.target,
        exported.len(),
        if exported.len() == 1 { "" } else { "s" }
    ));
    w.blank_line();
    w.add_line("## Getting started");
    w.blank_line();
    w.add_line("```sh");
    w.add_line("npm install");
    w.add_line(dev);
    w.add_line("```");
    w.blank_line();
    w.add_line(&format!("Build for production with `{}`.", build));
    if options.include_tests {
        w.add_line("Run the generated tests with `npm test`.");
    }
    if options.include_story_files {
        w.add_line("Browse the stories with `npm run storybook`.");
    }
    if !exported.is_empty() {
        w.blank_line();
        w.add_line("## Components");
        w.blank_line();
        for component in exported {
            w.add_line(&format!("- `{}`", component.ident));
        }
    }
    w.get_output()
}

/// Barrel file re-exporting every component; an index page for HTML
fn entry(target: Target, typed: bool, exported: &[Exported], stylesheet: &str) -> FileDescriptor {
    let mut w = CodeWriter::new();

    if target == Target::Html {
        w.add_line("<!DOCTYPE html>");
        w.add_line("<html lang=\"en\">");
        w.add_line("<head>");
        w.indent();
        w.add_line("<meta charset=\"UTF-8\">");
        w.add_line("<title>Pages</title>");
        if stylesheet.ends_with(".css") {
            w.add_line(&format!("<link rel=\"stylesheet\" href=\"{}\">", stylesheet));
        } else {
            w.add_line(&format!("<script type=\"module\" src=\"{}\"></script>", stylesheet));
        }
        w.dedent();
        w.add_line("</head>");
        w.add_line("<body>");
        w.indent();
        w.add_line("<ul>");
        w.indent();
        for component in exported {
            w.add_line(&format!(
                "<li><a href=\"src/components/{}.html\">{}</a></li>",
                component.kebab, component.ident
            ));
        }
        w.dedent();
        w.add_line("</ul>");
        w.dedent();
        w.add_line("</body>");
        w.add_line("</html>");
        return FileDescriptor::new(
            "index.html",
            w.get_output(),
            FileKind::Config,
            SourceLanguage::Html,
        );
    }

    let style_import = stylesheet.strip_prefix("src/").unwrap_or(stylesheet);
    w.add_line(&format!("import \"./{}\";", style_import));
    w.blank_line();
    for component in exported {
        let line = match target {
            Target::React => format!(
                "export {{ default as {} }} from \"./components/{}\";",
                component.ident, component.ident
            ),
            Target::Vue => format!(
                "export {{ default as {} }} from \"./components/{}.vue\";",
                component.ident, component.ident
            ),
            _ => format!(
                "export {{ {}Component }} from \"./components/{}.component\";",
                component.ident, component.kebab
            ),
        };
        w.add_line(&line);
    }

    let language = SourceLanguage::script(typed);
    FileDescriptor::new(
        format!("src/index.{}", language.extension()),
        w.get_output(),
        FileKind::Config,
        language,
    )
}

fn stylesheet(options: &ExportOptions, typed: bool) -> FileDescriptor {
    match options.styling {
        StylingChoice::Css => FileDescriptor::new(
            "src/styles.css",
            BASE_CSS,
            FileKind::Style,
            SourceLanguage::Css,
        ),
        StylingChoice::CssModules => FileDescriptor::new(
            "src/styles.module.css",
            BASE_CSS,
            FileKind::Style,
            SourceLanguage::Css,
        ),
        StylingChoice::Tailwind => FileDescriptor::new(
            "src/styles.css",
            format!("@tailwind base;\n@tailwind components;\n@tailwind utilities;\n\n{}", BASE_CSS),
            FileKind::Style,
            SourceLanguage::Css,
        ),
        StylingChoice::StyledComponents => {
            let (import, call) = match options.target {
                Target::React => (
                    "import { createGlobalStyle } from \"styled-components\";",
                    "export const GlobalStyle = createGlobalStyle`",
                ),
                _ => (
                    "import { injectGlobal } from \"@emotion/css\";",
                    "injectGlobal`",
                ),
            };
            let mut w = CodeWriter::new();
            w.add_line(import);
            w.blank_line();
            w.add_line(call);
            w.indent();
            w.add_block(BASE_CSS);
            w.dedent();
            w.add_line("`;");

            let language = SourceLanguage::script(typed);
            FileDescriptor::new(
                format!("src/global-style.{}", language.extension()),
                w.get_output(),
                FileKind::Style,
                language,
            )
        }
    }
}

const TAILWIND_CONFIG: &str = r#"/** @type {import('tailwindcss').Config} */
export default {
  content: ["./index.html", "./src/**/*.{html,js,ts,jsx,tsx,vue}"],
  theme: { extend: {} },
  plugins: [],
};
"#;

const BASE_CSS: &str = r#"*,
*::before,
*::after {
  box-sizing: border-box;
}

body {
  position: relative;
  margin: 0;
  font-family: system-ui, sans-serif;
}

.btn {
  padding: 8px 16px;
  border: 1px solid transparent;
  border-radius: 4px;
  cursor: pointer;
}

.btn-primary {
  background: #2563eb;
  color: #fff;
}

.btn-secondary {
  background: #e5e7eb;
  color: #111827;
}

.btn-link {
  background: none;
  color: #2563eb;
}

.card {
  border-radius: 8px;
  background: #fff;
  padding: 16px;
}

.card-elevation-1 {
  box-shadow: 0 1px 3px rgba(0, 0, 0, 0.12);
}

.card-elevation-2 {
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
}

.container {
  position: relative;
}
"#;
