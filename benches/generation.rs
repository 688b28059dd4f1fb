//! Criterion benchmarks for layout generation at several field sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hallways::{render_ascii, GenerationConfig, Generator, HallwayGenerator};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let generator = HallwayGenerator::new();

    for size in [48u32, 64, 128, 256] {
        let config = GenerationConfig::new(0xC0FFEE)
            .with_field_size(size)
            .with_room_size(3, 6)
            .with_palettes(["clean", "rough"]);
        group.bench_with_input(BenchmarkId::from_parameter(size), &config, |b, config| {
            b.iter(|| generator.generate_from_config(black_box(config)))
        });
    }
    group.finish();
}

fn bench_render_ascii(c: &mut Criterion) {
    let config = GenerationConfig::new(7).with_field_size(128);
    let Ok(layout) = HallwayGenerator::new().generate_from_config(&config) else {
        return;
    };
    c.bench_function("render_ascii_128", |b| {
        b.iter(|| render_ascii(black_box(&layout.grid)))
    });
}

criterion_group!(benches, bench_generate, bench_render_ascii);
criterion_main!(benches);
