use criterion::{Criterion, black_box, criterion_group, criterion_main};
use trace_qr::encoder::render::QrRenderer;
use trace_qr::{ProductInfo, RenderOptions, Renderer, build_envelope, decode_batch, decode_content};

fn envelope_text() -> String {
    build_envelope("TR-2026-0001", Some(&ProductInfo::named("Jasmine Tea")))
        .to_json()
        .unwrap()
}

fn bench_decode_envelope(c: &mut Criterion) {
    let text = envelope_text();
    c.bench_function("decode_envelope", |b| b.iter(|| decode_content(black_box(&text))));
}

fn bench_decode_bare(c: &mut Criterion) {
    c.bench_function("decode_bare_code", |b| {
        b.iter(|| decode_content(black_box("LEGACY-TRACE-000042")))
    });
}

fn bench_decode_batch(c: &mut Criterion) {
    let text = envelope_text();
    let scans: Vec<String> = (0..10_000)
        .map(|i| if i % 2 == 0 { text.clone() } else { format!("LEGACY-{i:06}") })
        .collect();
    c.bench_function("decode_batch_10k", |b| b.iter(|| decode_batch(black_box(&scans))));
}

fn bench_render_png(c: &mut Criterion) {
    let text = envelope_text();
    let renderer = QrRenderer::new();
    let options = RenderOptions {
        pixel_width: 300,
        margin: 2,
        ..RenderOptions::default()
    };
    c.bench_function("render_envelope_png_300", |b| {
        b.iter(|| renderer.render(black_box(&text), black_box(&options)))
    });
}

criterion_group!(
    benches,
    bench_decode_envelope,
    bench_decode_bare,
    bench_decode_batch,
    bench_render_png
);
criterion_main!(benches);
