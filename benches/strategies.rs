//! Compares the three cache strategies on a mid-sized 2-D convolution.
//!
//! All three produce identical outputs; the interesting axis is how much
//! of the input they re-read per pass.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use strider::prelude::*;

fn conv2d_layer(strategy: Strategy) -> Conv2d<f32> {
    let weight: Vec<f32> = (0..3 * 3 * 4 * 8).map(|i| (i % 13) as f32 * 0.1 - 0.6).collect();
    let bias: Vec<f32> = (0..8).map(|i| i as f32 * 0.01).collect();
    Conv2d::new(
        Conv2dConfig {
            filters: 8,
            kernel: (3, 3),
            rows: 64,
            cols: 64,
            channels: 4,
            strategy,
            ..Conv2dConfig::default()
        },
        &weight,
        &bias,
    )
    .unwrap()
}

fn benchmark_conv2d_strategies(c: &mut Criterion) {
    let input: Vec<f32> = (0..64 * 64 * 4).map(|i| (i % 29) as f32 * 0.05 - 0.7).collect();
    let mut group = c.benchmark_group("conv2d_64x64x4_k3_f8");

    for (name, strategy) in [
        ("direct", Strategy::Direct),
        ("block", Strategy::Block),
        ("line_window", Strategy::LineWindow),
    ] {
        let layer = conv2d_layer(strategy);
        let mut out = vec![0.0f32; layer.output_len()];
        group.bench_with_input(BenchmarkId::from_parameter(name), &layer, |b, layer| {
            b.iter(|| {
                layer.feedforward(black_box(&input[..]), &mut out).unwrap();
                black_box(out[0])
            })
        });
    }
    group.finish();
}

fn benchmark_pool2d_strategies(c: &mut Criterion) {
    let input: Vec<f32> = (0..128 * 128).map(|i| (i % 17) as f32).collect();
    let mut group = c.benchmark_group("max_pool2d_128x128_p2");

    for (name, strategy) in [
        ("direct", Strategy::Direct),
        ("block", Strategy::Block),
        ("line_window", Strategy::LineWindow),
    ] {
        let layer = MaxPool2d::new(Pool2dConfig {
            rows: 128,
            cols: 128,
            channels: 1,
            pool: (2, 2),
            strategy,
        })
        .unwrap();
        let mut out = vec![0.0f32; layer.output_len()];
        group.bench_with_input(BenchmarkId::from_parameter(name), &layer, |b, layer| {
            b.iter(|| {
                layer.feedforward(black_box(&input[..]), &mut out).unwrap();
                black_box(out[0])
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_conv2d_strategies, benchmark_pool2d_strategies);
criterion_main!(benches);
