use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scribble_pad::draw::render::{render_strokes_to_rgba, RenderSettings};
use scribble_pad::draw::{Stroke, StrokeColor, StrokeId, StrokeStore, StrokeTool};

fn build_strokes(count: usize) -> Vec<Stroke> {
    (0..count)
        .map(|i| {
            let points = (0..64)
                .flat_map(|step| {
                    let t = step as f64;
                    [20.0 + t * 12.0, 40.0 + (i as f64) * 6.0 + (t * 0.3).sin() * 20.0]
                })
                .collect();
            Stroke {
                id: StrokeId::new(format!("stroke-{i}")),
                points,
                color: StrokeColor::rgb(200, 40, 40),
                tool: if i % 5 == 0 {
                    StrokeTool::Eraser
                } else {
                    StrokeTool::Pen
                },
            }
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let strokes = build_strokes(100);
    c.bench_function("render_100_strokes_1024x768", |b| {
        b.iter(|| {
            render_strokes_to_rgba(
                black_box(&strokes),
                RenderSettings::default(),
                (1024, 768),
            )
        })
    });
}

fn bench_rescale(c: &mut Criterion) {
    let store = StrokeStore::from_strokes(build_strokes(500)).expect("valid strokes");
    c.bench_function("rescale_500_strokes", |b| {
        b.iter(|| {
            let mut store = store.clone();
            store.rescale(black_box(1.25), black_box(0.8));
            store
        })
    });
}

criterion_group!(benches, bench_render, bench_rescale);
criterion_main!(benches);
