use plotline::core::{Range, Scaling, TickDensityPolicy, TickGenerator, generate_ticks};
use proptest::prelude::*;

proptest! {
    #[test]
    fn linear_ticks_stay_inside_range_and_increase(
        min in -1e6f64..1e6,
        span in 1e-3f64..1e6,
        extent in 1.0f64..4_000.0
    ) {
        let range = Range::new(min, min + span).expect("range");
        let ticks = generate_ticks(range, Scaling::Linear, extent, &TickDensityPolicy::default(), &[])
            .expect("ticks");

        prop_assert!(!ticks.is_empty());
        prop_assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(ticks.iter().all(|tick| range.contains(*tick)));
    }

    #[test]
    fn panned_ticks_stay_on_previous_grid(
        min in -1_000.0f64..1_000.0,
        span in 1.0f64..1_000.0,
        shift_ratio in -0.4f64..0.4,
        extent in 200.0f64..2_000.0
    ) {
        let mut generator = TickGenerator::default();
        let first = Range::new(min, min + span).expect("range");
        let previous = generator
            .generate(first, Scaling::Linear, extent)
            .expect("ticks")
            .to_vec();
        let step = span / previous.len() as f64;

        let shift = shift_ratio * span;
        let panned = Range::new(min + shift, min + span + shift).expect("range");
        let ticks = generator
            .generate(panned, Scaling::Linear, extent)
            .expect("ticks")
            .to_vec();

        prop_assert!(!ticks.is_empty());
        for tick in &ticks {
            prop_assert!(panned.contains(*tick));
            let offset = (tick - previous[0]) / step;
            prop_assert!((offset - offset.round()).abs() <= 1e-6);
        }
    }

    #[test]
    fn log_ticks_stay_positive_and_inside_range(
        min_exp in -8.0f64..8.0,
        decades in 0.05f64..12.0,
        extent in 1.0f64..3_000.0
    ) {
        let range = Range::new(10f64.powf(min_exp), 10f64.powf(min_exp + decades)).expect("range");
        let ticks = generate_ticks(range, Scaling::Logarithmic, extent, &TickDensityPolicy::default(), &[])
            .expect("ticks");

        prop_assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
        for tick in &ticks {
            prop_assert!(*tick > 0.0);
            prop_assert!(*tick >= range.min * (1.0 - 1e-9) && *tick <= range.max * (1.0 + 1e-9));
        }
    }
}
