use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagesmith_codegen::{emitter_for, EmitContext};
use pagesmith_editor::Element;
use pagesmith_registry::{Registry, Target};
use serde_json::json;

fn card_grid(cards: usize) -> Element {
    let mut page = Element::new("page", "container");
    for i in 0..cards {
        page = page.with_child(
            Element::new(format!("card-{}", i), "card")
                .with_prop("title", json!(format!("Card {}", i)))
                .at((i % 4) as f64 * 240.0, (i / 4) as f64 * 180.0)
                .with_child(
                    Element::new(format!("text-{}", i), "text")
                        .with_prop("content", json!("Card description")),
                )
                .with_child(
                    Element::new(format!("button-{}", i), "button")
                        .with_prop("text", json!("Open")),
                ),
        );
    }
    page
}

fn emit_single_button(c: &mut Criterion) {
    let registry = Registry::builtin();
    let ctx = EmitContext::new(&registry);
    let button = Element::new("el-1", "button").with_prop("text", json!("Click me"));

    for target in Target::ALL {
        let emitter = emitter_for(target);
        c.bench_function(&format!("emit_button_{}", target), |b| {
            b.iter(|| emitter.emit_element(black_box(&button), &ctx))
        });
    }
}

fn emit_card_grid(c: &mut Criterion) {
    let registry = Registry::builtin();
    let ctx = EmitContext::new(&registry).typed(true);
    let page = card_grid(40);

    for target in Target::ALL {
        let emitter = emitter_for(target);
        c.bench_function(&format!("emit_card_grid_40_{}", target), |b| {
            b.iter(|| emitter.emit_element(black_box(&page), &ctx))
        });
    }
}

criterion_group!(benches, emit_single_button, emit_card_grid);
criterion_main!(benches);
