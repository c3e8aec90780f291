use criterion::{Criterion, criterion_group, criterion_main};
use plotline::api::{PlotEngine, PlotEngineConfig};
use plotline::core::{
    AxisOrientation, PixelArea, Range, ScaleTransform, Scaling, TickDensityPolicy,
    generate_ticks, x_based_indices, xy_based_indices,
};
use std::hint::black_box;

fn noisy_series(len: usize) -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..len).map(|i| i as f64).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|v| (v * 0.001).sin() * 100.0 + (v * 0.37).cos() * 5.0)
        .collect();
    (x, y)
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let range = Range::new(0.0, 10_000.0).expect("valid range");
    let transform = ScaleTransform::new(1920.0, range, Scaling::Linear, AxisOrientation::Horizontal)
        .expect("valid transform");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = transform.data_to_pixel(black_box(4_321.123));
            let _ = transform.pixel_to_data(px);
        })
    });
}

fn bench_x_based_1m(c: &mut Criterion) {
    let (x, _) = noisy_series(1_000_000);
    let range = Range::new(0.0, 999_999.0).expect("valid range");

    c.bench_function("x_based_indices_1m", |b| {
        b.iter(|| {
            let _ = x_based_indices(black_box(&x), range, Scaling::Linear, black_box(1920.0))
                .expect("x based");
        })
    });
}

fn bench_xy_based_1m(c: &mut Criterion) {
    let (x, y) = noisy_series(1_000_000);
    let range = Range::new(0.0, 999_999.0).expect("valid range");
    let x_based = x_based_indices(&x, range, Scaling::Linear, 1920.0).expect("x based");

    c.bench_function("xy_based_indices_1m", |b| {
        b.iter(|| {
            let _ = xy_based_indices(black_box(&x_based), black_box(&y)).expect("xy based");
        })
    });
}

fn bench_log_tick_generation(c: &mut Criterion) {
    let policy = TickDensityPolicy::default();
    let range = Range::new(1e-3, 1e6).expect("valid range");

    c.bench_function("log_tick_generation", |b| {
        b.iter(|| {
            let _ = generate_ticks(black_box(range), Scaling::Logarithmic, 1080.0, &policy, &[])
                .expect("ticks");
        })
    });
}

fn bench_engine_recompute_100k(c: &mut Criterion) {
    let config = PlotEngineConfig::new(PixelArea::sized(1600.0, 900.0), 0.0, 99_999.0)
        .with_y_range(-120.0, 120.0);
    let mut engine = PlotEngine::new(config).expect("engine init");
    let (x, y) = noisy_series(100_000);
    engine.add_series_with_data(x, y).expect("series");

    c.bench_function("engine_recompute_100k", |b| {
        b.iter(|| {
            engine.recompute().expect("recompute");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_x_based_1m,
    bench_xy_based_1m,
    bench_log_tick_generation,
    bench_engine_recompute_100k
);
criterion_main!(benches);
