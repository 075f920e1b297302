use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use image::{DynamicImage, RgbaImage};
use row_atlas_core::prelude::*;

fn generate_sizes(count: usize, min_size: u32, max_size: u32) -> Vec<(String, u32, u32)> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let w = rng.gen_range(min_size..=max_size);
            let h = rng.gen_range(min_size..=max_size);
            (format!("mat_{}", i), w, h)
        })
        .collect()
}

fn bench_layout_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_row");
    for count in [16, 64, 256] {
        let sizes: Vec<(u32, u32)> = generate_sizes(count, 16, 128)
            .into_iter()
            .map(|(_, w, h)| (w, h))
            .collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &sizes, |b, sizes| {
            b.iter(|| black_box(layout_row(sizes).ok()));
        });
    }
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for count in [4, 16, 64] {
        let sizes = generate_sizes(count, 16, 128);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &sizes, |b, sizes| {
            b.iter_batched(
                || {
                    let mut builder = AtlasBuilder::new();
                    for (key, w, h) in sizes {
                        let img = DynamicImage::ImageRgba8(RgbaImage::new(*w, *h));
                        let _ = builder.add_image(key.clone(), img);
                    }
                    builder
                },
                |mut builder| {
                    let _ = builder.generate();
                    black_box(builder)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout_only, bench_generate);
criterion_main!(benches);
