use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dae_animation_core::{load_animation, Element, Loader};

/// Root with a shared time source and `width` child animations, each with its
/// own output source, sampler and channel.
fn wide_document(width: usize) -> Element {
    let mut root = Element::new("animation").with_attr("id", "root").with_child(
        Element::new("source")
            .with_attr("id", "time")
            .with_child(Element::new("float_array").with_text("0 0.25 0.5 0.75 1")),
    );
    for i in 0..width {
        let values = format!("values-{i}");
        let sampler = format!("sampler-{i}");
        root = root.with_child(
            Element::new("animation")
                .with_attr("id", format!("joint-{i}"))
                .with_child(
                    Element::new("source")
                        .with_attr("id", values.as_str())
                        .with_child(Element::new("float_array").with_text("0 10 20 10 0")),
                )
                .with_child(
                    Element::new("sampler")
                        .with_attr("id", sampler.as_str())
                        .with_child(
                            Element::new("input")
                                .with_attr("semantic", "INPUT")
                                .with_attr("source", "#time"),
                        )
                        .with_child(
                            Element::new("input")
                                .with_attr("semantic", "OUTPUT")
                                .with_attr("source", format!("#{values}")),
                        ),
                )
                .with_child(
                    Element::new("channel")
                        .with_attr("source", format!("#{sampler}"))
                        .with_attr("target", format!("joint-{i}/rotateZ.ANGLE")),
                ),
        );
    }
    root
}

fn bench_load(c: &mut Criterion) {
    let wide = wide_document(256);
    c.bench_function("load_wide_256", |b| {
        b.iter(|| load_animation(black_box(&wide)).unwrap())
    });

    let walk = dae_test_fixtures::documents::element("walk-cycle").unwrap();
    let loader = Loader::default();
    c.bench_function("load_walk_cycle", |b| {
        b.iter(|| loader.load_animation(black_box(&walk)).unwrap())
    });
}

criterion_group!(benches, bench_load);
criterion_main!(benches);
