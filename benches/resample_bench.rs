//! Benchmarks for per-frame resampling and rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use phobz_scope::audio::{generate_white_noise, resample_into, SampleSource, SineSweep};
use phobz_scope::gpu::{GpuContext, PlotRenderer, StyleDescriptor};
use phobz_scope::present::{DrawableSource, ManualDriver, OffscreenDrawables};

fn bench_resample_widths(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resample");

    let samples = generate_white_noise(4096, 1.0, 42);
    for width in [320usize, 1280, 1920, 3840] {
        let mut texels = vec![0.0f32; width];
        group.throughput(Throughput::Elements(width as u64));
        group.bench_with_input(BenchmarkId::new("4096_to", width), &width, |b, _| {
            b.iter(|| {
                black_box(resample_into(black_box(&samples), &mut texels));
            });
        });
    }

    group.finish();
}

fn bench_sweep_pull(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sample Source");

    let mut sweep = SineSweep::new(440.0, 48000, 2048);
    group.bench_function("sine_sweep_2048", |b| {
        b.iter(|| {
            black_box(sweep.pull());
        });
    });

    group.finish();
}

fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("GPU Rendering");

    let ctx = match GpuContext::new_blocking() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Skipping GPU benchmarks: {}", e);
            return;
        }
    };

    let drawables = OffscreenDrawables::new(&ctx);
    let renderer = PlotRenderer::new(&ctx, drawables.format(), StyleDescriptor::default());
    let mut driver = ManualDriver::new(renderer, drawables, SineSweep::new(440.0, 48000, 2048));
    driver.notify_size_changed(1920, 1080);

    group.bench_function("render_frame_1080p", |b| {
        b.iter(|| {
            black_box(driver.render_frame());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_resample_widths, bench_sweep_pull, bench_render_frame);
criterion_main!(benches);
