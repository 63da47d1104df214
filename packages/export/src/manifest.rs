//! `package.json` of a full project
//!
//! Dependencies come from fixed tables: one per target, one per styling
//! choice, plus tooling for types, tests and stories when enabled.

use crate::{ExportOptions, StylingChoice};
use pagesmith_codegen::names::kebab_case;
use pagesmith_registry::Target;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

type Table = &'static [(&'static str, &'static str)];

const VITE: Table = &[("vite", "^5.0.0")];

const REACT: Table = &[("react", "^18.2.0"), ("react-dom", "^18.2.0")];
const REACT_DEV: Table = &[("@vitejs/plugin-react", "^4.2.0")];
const REACT_TYPES: Table = &[("@types/react", "^18.2.0"), ("@types/react-dom", "^18.2.0")];

const VUE: Table = &[("vue", "^3.4.0")];
const VUE_DEV: Table = &[("@vitejs/plugin-vue", "^5.0.0")];
const VUE_TYPES: Table = &[("vue-tsc", "^1.8.0")];

const ANGULAR: Table = &[
    ("@angular/common", "^17.0.0"),
    ("@angular/compiler", "^17.0.0"),
    ("@angular/core", "^17.0.0"),
    ("@angular/platform-browser", "^17.0.0"),
    ("rxjs", "~7.8.0"),
    ("tslib", "^2.6.0"),
    ("zone.js", "~0.14.0"),
];
const ANGULAR_DEV: Table = &[
    ("@angular-devkit/build-angular", "^17.0.0"),
    ("@angular/cli", "^17.0.0"),
    ("@angular/compiler-cli", "^17.0.0"),
];

const TYPESCRIPT: Table = &[("typescript", "~5.3.0")];

const VITEST: Table = &[("jsdom", "^23.0.0"), ("vitest", "^1.2.0")];
const REACT_TESTING: Table = &[("@testing-library/react", "^14.1.0")];
const VUE_TESTING: Table = &[("@vue/test-utils", "^2.4.0")];
const ANGULAR_TESTING: Table = &[
    ("@types/jasmine", "~5.1.0"),
    ("jasmine-core", "~5.1.0"),
    ("karma", "~6.4.0"),
    ("karma-chrome-launcher", "~3.2.0"),
    ("karma-jasmine", "~5.1.0"),
];

const STORYBOOK: Table = &[("storybook", "^7.6.0")];

const TAILWIND: Table = &[
    ("autoprefixer", "^10.4.0"),
    ("postcss", "^8.4.0"),
    ("tailwindcss", "^3.4.0"),
];
const STYLED_COMPONENTS: Table = &[("styled-components", "^6.1.0")];
const EMOTION: Table = &[("@emotion/css", "^11.11.0")];

fn storybook_framework(target: Target) -> (&'static str, &'static str) {
    match target {
        Target::React => ("@storybook/react-vite", "^7.6.0"),
        Target::Vue => ("@storybook/vue3-vite", "^7.6.0"),
        Target::Angular => ("@storybook/angular", "^7.6.0"),
        Target::Html => ("@storybook/html-vite", "^7.6.0"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependencies {
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
}

impl Dependencies {
    fn runtime(&mut self, table: &[(&str, &str)]) {
        for (name, version) in table {
            self.dependencies
                .insert(name.to_string(), version.to_string());
        }
    }

    fn dev(&mut self, table: &[(&str, &str)]) {
        for (name, version) in table {
            self.dev_dependencies
                .insert(name.to_string(), version.to_string());
        }
    }
}

/// Resolve the dependency tables for `options`
pub fn dependencies(options: &ExportOptions) -> Dependencies {
    let target = options.target;
    let typed = target.supports_types() && (options.typed_output || target.always_typed());
    let mut deps = Dependencies::default();

    match target {
        Target::React => {
            deps.runtime(REACT);
            deps.dev(VITE);
            deps.dev(REACT_DEV);
            if typed {
                deps.dev(REACT_TYPES);
            }
        }
        Target::Vue => {
            deps.runtime(VUE);
            deps.dev(VITE);
            deps.dev(VUE_DEV);
            if typed {
                deps.dev(VUE_TYPES);
            }
        }
        Target::Angular => {
            deps.runtime(ANGULAR);
            deps.dev(ANGULAR_DEV);
        }
        Target::Html => deps.dev(VITE),
    }
    if typed {
        deps.dev(TYPESCRIPT);
    }

    match options.styling {
        StylingChoice::Css | StylingChoice::CssModules => {}
        StylingChoice::Tailwind => deps.dev(TAILWIND),
        StylingChoice::StyledComponents if target == Target::React => {
            deps.runtime(STYLED_COMPONENTS)
        }
        StylingChoice::StyledComponents => deps.runtime(EMOTION),
    }

    if options.include_tests {
        match target {
            Target::React => {
                deps.dev(VITEST);
                deps.dev(REACT_TESTING);
            }
            Target::Vue => {
                deps.dev(VITEST);
                deps.dev(VUE_TESTING);
            }
            Target::Angular => deps.dev(ANGULAR_TESTING),
            Target::Html => deps.dev(VITEST),
        }
    }

    if options.include_story_files {
        deps.dev(STORYBOOK);
        deps.dev(&[storybook_framework(target)]);
    }

    deps
}

fn scripts(options: &ExportOptions) -> BTreeMap<&'static str, &'static str> {
    let mut scripts = BTreeMap::new();
    match options.target {
        Target::Angular => {
            scripts.insert("start", "ng serve");
            scripts.insert("build", "ng build");
            if options.include_tests {
                scripts.insert("test", "ng test");
            }
        }
        _ => {
            scripts.insert("dev", "vite");
            scripts.insert("build", "vite build");
            scripts.insert("preview", "vite preview");
            if options.include_tests {
                scripts.insert("test", "vitest run");
            }
        }
    }
    if options.include_story_files {
        scripts.insert("storybook", "storybook dev -p 6006");
    }
    scripts
}

/// Pretty-printed `package.json`
pub fn package_json(options: &ExportOptions) -> String {
    let deps = dependencies(options);
    let mut manifest = json!({
        "name": package_name(&options.project_name),
        "version": "0.1.0",
        "private": true,
        "type": "module",
        "scripts": scripts(options),
        "dependencies": deps.dependencies,
    });
    if !deps.dev_dependencies.is_empty() {
        manifest["devDependencies"] = json!(deps.dev_dependencies);
    }

    let mut out = serde_json::to_string_pretty(&manifest).unwrap_or_default();
    out.push('\n');
    out
}

/// npm package name for a free-form project name
pub fn package_name(project_name: &str) -> String {
    let name = kebab_case(project_name);
    if name.is_empty() {
        "pagesmith-app".to_string()
    } else {
        name
    }
}
