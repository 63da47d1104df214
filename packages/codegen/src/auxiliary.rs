//! Test and story files
//!
//! Same lookup as the component emitters with a different template: the
//! definition's own test/story template for the target when it has one,
//! otherwise a default skeleton. Besides the element's props (escaped for
//! script strings) these templates see `componentName`, `importPath`, `id`
//! and `args`, a JSON object of the resolved props.

use crate::names::kebab_case;
use crate::template::{escape_script, substitute, value_text};
use crate::{EmitContext, EmitWarning, FileDescriptor, FileKind, SourceLanguage};
use pagesmith_editor::Element;
use pagesmith_registry::Target;
use tracing::warn;

/// Output of an auxiliary emitter; `file` is `None` when the element was
/// skipped
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuxiliaryOutput {
    pub file: Option<FileDescriptor>,
    pub warnings: Vec<EmitWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Purpose {
    Test,
    Story,
}

impl Purpose {
    fn noun(&self) -> &'static str {
        match self {
            Purpose::Test => "test",
            Purpose::Story => "story",
        }
    }
}

/// Test file for the component `ident` emitted from `element`
pub fn emit_test(
    element: &Element,
    ident: &str,
    ctx: &EmitContext,
    target: Target,
) -> AuxiliaryOutput {
    emit_auxiliary(element, ident, ctx, target, Purpose::Test)
}

/// Story file for the component `ident` emitted from `element`
pub fn emit_story(
    element: &Element,
    ident: &str,
    ctx: &EmitContext,
    target: Target,
) -> AuxiliaryOutput {
    emit_auxiliary(element, ident, ctx, target, Purpose::Story)
}

fn emit_auxiliary(
    element: &Element,
    ident: &str,
    ctx: &EmitContext,
    target: Target,
    purpose: Purpose,
) -> AuxiliaryOutput {
    let Some(definition) = ctx.registry.get(&element.type_id) else {
        warn!(id = %element.id, type_id = %element.type_id, purpose = purpose.noun(), "Skipping auxiliary file");
        return AuxiliaryOutput {
            file: None,
            warnings: vec![EmitWarning {
                element_id: element.id.clone(),
                element_type: element.type_id.clone(),
                message: format!(
                    "Skipped {} for unknown component type \"{}\"",
                    purpose.noun(),
                    element.type_id
                ),
            }],
        };
    };

    let custom = match purpose {
        Purpose::Test => definition.test_template(target),
        Purpose::Story => definition.story_template(target),
    };
    let template = custom.unwrap_or_else(|| default_template(target, purpose));

    let typed = ctx.is_typed(target);
    let kebab = kebab_case(ident);

    let (component_name, import_path) = match target {
        Target::React => (ident.to_string(), format!("./{}", ident)),
        Target::Vue => (ident.to_string(), format!("./{}.vue", ident)),
        Target::Angular => (format!("{}Component", ident), format!("./{}.component", kebab)),
        Target::Html => (ident.to_string(), format!("./{}.html", kebab)),
    };

    let props = &element.props;
    let args = serde_json::Value::Object(
        props.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
    )
    .to_string();

    let content = substitute(template, |name| match name {
        "componentName" => component_name.clone(),
        "importPath" => import_path.clone(),
        "id" => escape_script(element.id.as_str()),
        "args" => args.clone(),
        prop => props
            .get(prop)
            .map(|value| escape_script(&value_text(value)))
            .unwrap_or_default(),
    });

    let (file_name, language) = match (purpose, target) {
        (Purpose::Test, Target::React) => {
            let language = SourceLanguage::jsx(typed);
            (format!("{}.test.{}", ident, language.extension()), language)
        }
        (Purpose::Test, Target::Vue) => {
            let language = SourceLanguage::script(typed);
            (format!("{}.spec.{}", ident, language.extension()), language)
        }
        (Purpose::Test, Target::Angular) => (
            format!("{}.component.spec.ts", kebab),
            SourceLanguage::TypeScript,
        ),
        (Purpose::Test, Target::Html) => {
            (format!("{}.test.js", kebab), SourceLanguage::JavaScript)
        }
        (Purpose::Story, Target::React) => {
            let language = SourceLanguage::jsx(typed);
            (format!("{}.stories.{}", ident, language.extension()), language)
        }
        (Purpose::Story, Target::Vue) => {
            let language = SourceLanguage::script(typed);
            (format!("{}.stories.{}", ident, language.extension()), language)
        }
        (Purpose::Story, Target::Angular) => (
            format!("{}.component.stories.ts", kebab),
            SourceLanguage::TypeScript,
        ),
        (Purpose::Story, Target::Html) => {
            (format!("{}.stories.js", kebab), SourceLanguage::JavaScript)
        }
    };

    let kind = match purpose {
        Purpose::Test => FileKind::Test,
        Purpose::Story => FileKind::Story,
    };

    AuxiliaryOutput {
        file: Some(FileDescriptor::new(
            ctx.path_for(&file_name),
            content,
            kind,
            language,
        )),
        warnings: Vec::new(),
    }
}

fn default_template(target: Target, purpose: Purpose) -> &'static str {
    match (purpose, target) {
        (Purpose::Test, Target::React) => REACT_TEST,
        (Purpose::Test, Target::Vue) => VUE_TEST,
        (Purpose::Test, Target::Angular) => ANGULAR_TEST,
        (Purpose::Test, Target::Html) => HTML_TEST,
        (Purpose::Story, Target::React) | (Purpose::Story, Target::Vue) => COMPONENT_STORY,
        (Purpose::Story, Target::Angular) => ANGULAR_STORY,
        (Purpose::Story, Target::Html) => HTML_STORY,
    }
}

const REACT_TEST: &str = r##"import { render } from "@testing-library/react";
import { describe, it, expect } from "vitest";
import {{componentName}} from "{{importPath}}";

describe("{{componentName}}", () => {
  it("renders", () => {
    const { container } = render(<{{componentName}} />);
    expect(container.querySelector("#{{id}}")).toBeTruthy();
  });
});
"##;

const VUE_TEST: &str = r##"import { mount } from "@vue/test-utils";
import { describe, it, expect } from "vitest";
import {{componentName}} from "{{importPath}}";

describe("{{componentName}}", () => {
  it("renders", () => {
    const wrapper = mount({{componentName}});
    expect(wrapper.find("#{{id}}").exists()).toBe(true);
  });
});
"##;

const ANGULAR_TEST: &str = r##"import { TestBed } from "@angular/core/testing";
import { {{componentName}} } from "{{importPath}}";

describe("{{componentName}}", () => {
  it("renders", async () => {
    await TestBed.configureTestingModule({ imports: [{{componentName}}] }).compileComponents();
    const fixture = TestBed.createComponent({{componentName}});
    fixture.detectChanges();
    expect(fixture.nativeElement.querySelector("#{{id}}")).toBeTruthy();
  });
});
"##;

const HTML_TEST: &str = r##"import { readFileSync } from "node:fs";
import { describe, it, expect } from "vitest";

describe("{{componentName}}", () => {
  it("contains the element", () => {
    const html = readFileSync(new URL("{{importPath}}", import.meta.url), "utf8");
    expect(html).toContain("id=\"{{id}}\"");
  });
});
"##;

const COMPONENT_STORY: &str = r##"import {{componentName}} from "{{importPath}}";

export default {
  title: "Components/{{componentName}}",
  component: {{componentName}},
};

export const Default = {
  args: {{args}},
};
"##;

const ANGULAR_STORY: &str = r##"import { {{componentName}} } from "{{importPath}}";

export default {
  title: "Components/{{componentName}}",
  component: {{componentName}},
};

export const Default = {
  args: {{args}},
};
"##;

const HTML_STORY: &str = r##"import page from "{{importPath}}?raw";

export default {
  title: "Pages/{{componentName}}",
};

export const Default = () => page;
"##;
