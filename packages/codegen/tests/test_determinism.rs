/// Determinism tests - ensure emission is deterministic and reproducible
///
/// These tests validate that:
/// - Same input produces identical output across multiple emissions
/// - No map iteration order leaks into generated code
/// - Output is byte-for-byte identical for every target
use pagesmith_codegen::{emitter_for, emit_story, emit_test, EmitContext, Emission};
use pagesmith_editor::Element;
use pagesmith_registry::{Registry, Target};
use serde_json::json;

fn landing_page() -> Element {
    let mut hero = Element::new("hero", "card")
        .with_prop("title", json!("Build pages fast"))
        .at(20.0, 20.0)
        .with_child(Element::new("cta", "button").with_prop("text", json!("Get started")))
        .with_child(
            Element::new("blurb", "text")
                .with_prop("content", json!("Drag, drop, export."))
                .with_prop("size", json!(18)),
        );
    hero.styling.overrides.insert("padding".into(), "24px".into());
    hero.styling.overrides.insert("border-radius".into(), "8px".into());
    hero.styling.class_name = Some("hero".into());

    Element::new("page", "container")
        .with_child(hero)
        .with_child(Element::new("logo", "image").with_prop("src", json!("/logo.svg")))
}

#[test]
fn test_emission_determinism_every_target() {
    let registry = Registry::builtin();
    let page = landing_page();

    for target in Target::ALL {
        for typed in [false, true] {
            let ctx = EmitContext::new(&registry).typed(typed);

            // Emit 10 times
            let results: Vec<Emission> = (0..10)
                .map(|_| {
                    emitter_for(target)
                        .emit_element(&page, &ctx)
                        .expect("Emission failed")
                })
                .collect();

            // All results should be identical
            for i in 1..results.len() {
                assert_eq!(
                    results[0], results[i],
                    "{} emission {} differs from emission 0",
                    target, i
                );
            }
        }
    }
}

#[test]
fn test_prop_insertion_order_does_not_leak() {
    let registry = Registry::builtin();
    let ctx = EmitContext::new(&registry);

    let a = Element::new("el-1", "text")
        .with_prop("content", json!("Hi"))
        .with_prop("color", json!("#ff0000"))
        .with_prop("size", json!(12));
    let b = Element::new("el-1", "text")
        .with_prop("size", json!(12))
        .with_prop("content", json!("Hi"))
        .with_prop("color", json!("#ff0000"));

    for target in Target::ALL {
        let emitter = emitter_for(target);
        assert_eq!(
            emitter.emit_element(&a, &ctx).unwrap(),
            emitter.emit_element(&b, &ctx).unwrap(),
            "{} output depends on prop insertion order",
            target
        );
    }
}

#[test]
fn test_auxiliary_determinism() {
    let registry = Registry::builtin();
    let ctx = EmitContext::new(&registry).typed(true);
    let page = landing_page();

    for target in Target::ALL {
        let tests: Vec<_> = (0..5)
            .map(|_| emit_test(&page, "ContainerPage", &ctx, target))
            .collect();
        let stories: Vec<_> = (0..5)
            .map(|_| emit_story(&page, "ContainerPage", &ctx, target))
            .collect();

        for i in 1..5 {
            assert_eq!(tests[0], tests[i]);
            assert_eq!(stories[0], stories[i]);
        }
    }
}
