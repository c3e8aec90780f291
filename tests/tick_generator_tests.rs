use approx::assert_relative_eq;
use plotline::PlotError;
use plotline::core::{
    Range, Scaling, TickDensityPolicy, TickGenerator, TickState, centered_linear_ticks,
    generate_ticks, log_decade_ticks,
};

#[test]
fn linear_ticks_are_centered_in_equal_intervals() {
    let range = Range::new(0.0, 10.0).expect("range");
    let ticks = centered_linear_ticks(range, 5);
    assert_eq!(ticks.len(), 5);
    for (tick, expected) in ticks.iter().zip([1.0, 3.0, 5.0, 7.0, 9.0]) {
        assert_relative_eq!(*tick, expected, epsilon = 1e-12);
    }
}

#[test]
fn linear_tick_count_follows_pixel_extent() {
    let policy = TickDensityPolicy::default();
    let range = Range::new(0.0, 1.0).expect("range");

    let dense = generate_ticks(range, Scaling::Linear, 800.0, &policy, &[]).expect("dense");
    let medium = generate_ticks(range, Scaling::Linear, 300.0, &policy, &[]).expect("medium");
    let sparse = generate_ticks(range, Scaling::Linear, 100.0, &policy, &[]).expect("sparse");

    assert_eq!(dense.len(), policy.linear_dense_count);
    assert_eq!(medium.len(), policy.linear_medium_count);
    assert_eq!(sparse.len(), policy.linear_sparse_count);
}

#[test]
fn degenerate_linear_range_is_rejected() {
    let policy = TickDensityPolicy::default();
    let range = Range::new(3.0, 3.0).expect("ordered range");
    let result = generate_ticks(range, Scaling::Linear, 500.0, &policy, &[]);
    assert!(matches!(result, Err(PlotError::InvalidRange { .. })));
}

#[test]
fn log_ticks_cover_each_decade() {
    let range = Range::new(1.0, 1000.0).expect("range");
    let ticks = log_decade_ticks(range, 1, 600.0, 8.0);
    assert_eq!(ticks.len(), 4);
    for (tick, expected) in ticks.iter().zip([1.0, 10.0, 100.0, 1000.0]) {
        assert_relative_eq!(*tick, expected, max_relative = 1e-12);
    }
}

#[test]
fn log_ticks_are_log_spaced_inside_a_decade() {
    let range = Range::new(1.0, 10.0).expect("range");
    let ticks = log_decade_ticks(range, 2, 600.0, 8.0);
    assert_eq!(ticks.len(), 3);
    assert_relative_eq!(ticks[1], 10f64.sqrt(), max_relative = 1e-12);
}

#[test]
fn log_ticks_thin_out_when_too_dense() {
    let range = Range::new(1e-100, 1e100).expect("range");
    let ticks = log_decade_ticks(range, 10, 100.0, 8.0);
    assert!(!ticks.is_empty());
    assert!(ticks.len() <= 13);
    assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn invalid_log_range_yields_no_ticks() {
    let policy = TickDensityPolicy::default();
    let negative = Range::new(-1.0, 10.0).expect("ordered range");
    let degenerate = Range::new(5.0, 5.0).expect("ordered range");

    let ticks = generate_ticks(negative, Scaling::Logarithmic, 500.0, &policy, &[]).expect("ticks");
    assert!(ticks.is_empty());
    let ticks =
        generate_ticks(degenerate, Scaling::Logarithmic, 500.0, &policy, &[]).expect("ticks");
    assert!(ticks.is_empty());
}

#[test]
fn zero_extent_yields_no_ticks() {
    let policy = TickDensityPolicy::default();
    let range = Range::new(0.0, 1.0).expect("range");
    let ticks = generate_ticks(range, Scaling::Linear, 0.0, &policy, &[]).expect("ticks");
    assert!(ticks.is_empty());
}

#[test]
fn ticks_continue_previous_grid_when_zooming_in() {
    let mut generator = TickGenerator::default();
    let wide = Range::new(-1000.2, -1000.0).expect("range");
    let previous = generator
        .generate(wide, Scaling::Linear, 500.0)
        .expect("previous ticks")
        .to_vec();
    let step = (wide.max - wide.min) / previous.len() as f64;

    let narrow = Range::new(-1000.1, -1000.0).expect("range");
    let ticks = generator
        .generate(narrow, Scaling::Linear, 500.0)
        .expect("continued ticks")
        .to_vec();

    assert!(!ticks.is_empty());
    for tick in &ticks {
        assert!(narrow.contains(*tick));
        let closest = previous
            .iter()
            .map(|p| (p - tick).abs())
            .fold(f64::INFINITY, f64::min);
        assert!(closest <= step / 2.0, "tick {tick} drifted from {previous:?}");
    }

    let fresh = generate_ticks(
        narrow,
        Scaling::Linear,
        500.0,
        &TickDensityPolicy::default(),
        &[],
    )
    .expect("fresh ticks");
    assert_ne!(ticks, fresh);
}

#[test]
fn ticks_glide_with_pan() {
    let mut generator = TickGenerator::default();
    let first = generator
        .generate(Range::new(0.0, 10.0).expect("range"), Scaling::Linear, 800.0)
        .expect("ticks")
        .to_vec();
    let panned = generator
        .generate(Range::new(0.3, 10.3).expect("range"), Scaling::Linear, 800.0)
        .expect("ticks")
        .to_vec();

    let shared = panned
        .iter()
        .filter(|tick| first.iter().any(|p| (*p - **tick).abs() <= 1e-9))
        .count();
    assert!(shared >= first.len() - 1);
}

#[test]
fn sub_decade_log_axis_continues_previous_ticks() {
    let policy = TickDensityPolicy::default();
    let previous = [2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    let range = Range::new(2.5, 7.5).expect("range");

    let ticks = generate_ticks(range, Scaling::Logarithmic, 500.0, &policy, &previous)
        .expect("ticks");
    assert!(!ticks.is_empty());
    for tick in &ticks {
        assert!(range.contains(*tick));
        let on_grid = (tick * 2.0).fract().abs() <= 1e-9;
        assert!(on_grid, "tick {tick} is off the previous grid");
    }
}

#[test]
fn multi_decade_log_axis_ignores_previous_ticks() {
    let policy = TickDensityPolicy::default();
    let range = Range::new(1.0, 1000.0).expect("range");
    let previous = [1.5, 2.5, 3.5];

    let with_previous =
        generate_ticks(range, Scaling::Logarithmic, 100.0, &policy, &previous).expect("ticks");
    let without = generate_ticks(range, Scaling::Logarithmic, 100.0, &policy, &[]).expect("ticks");
    assert_eq!(with_previous, without);
}

#[test]
fn independent_generators_do_not_share_state() {
    let mut x_axis = TickGenerator::default();
    let mut y_axis = TickGenerator::default();

    x_axis
        .generate(Range::new(0.0, 100.0).expect("range"), Scaling::Linear, 800.0)
        .expect("x ticks");
    assert!(!x_axis.state().is_empty());
    assert!(y_axis.state().is_empty());

    y_axis
        .generate(Range::new(-1.0, 1.0).expect("range"), Scaling::Linear, 200.0)
        .expect("y ticks");
    assert_ne!(x_axis.state(), y_axis.state());
}

#[test]
fn seeded_state_drives_continuity() {
    let seeded = TickState::from_ticks(vec![4.0, f64::NAN, 0.0, 2.0, 6.0]);
    assert_eq!(seeded.previous(), &[0.0, 2.0, 4.0, 6.0]);

    let mut generator =
        TickGenerator::with_state(TickDensityPolicy::default(), seeded).expect("generator");
    let ticks = generator
        .generate(Range::new(1.0, 5.0).expect("range"), Scaling::Linear, 100.0)
        .expect("ticks")
        .to_vec();
    assert_eq!(ticks, vec![2.0, 4.0]);
}

#[test]
fn failed_generation_keeps_previous_state() {
    let mut generator = TickGenerator::default();
    generator
        .generate(Range::new(0.0, 1.0).expect("range"), Scaling::Linear, 300.0)
        .expect("ticks");
    let before = generator.state().clone();

    let result = generator.generate(Range::new(1.0, 1.0).expect("range"), Scaling::Linear, 300.0);
    assert!(result.is_err());
    assert_eq!(generator.state(), &before);
}

#[test]
fn invalid_policy_is_rejected() {
    let policy = TickDensityPolicy {
        linear_dense_count: 0,
        ..TickDensityPolicy::default()
    };
    assert!(TickGenerator::new(policy).is_err());

    let policy = TickDensityPolicy {
        dense_threshold_px: 100.0,
        medium_threshold_px: 200.0,
        ..TickDensityPolicy::default()
    };
    assert!(policy.validate().is_err());
}
