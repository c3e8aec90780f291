use plotline::core::{AxisOrientation, Range, ScaleTransform, Scaling};
use proptest::prelude::*;

proptest! {
    #[test]
    fn linear_round_trip_property(
        min in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0,
        vertical in any::<bool>()
    ) {
        let range = Range::new(min, min + span).expect("valid range");
        let value = min + value_factor * span;
        let orientation = if vertical {
            AxisOrientation::Vertical
        } else {
            AxisOrientation::Horizontal
        };

        let transform = ScaleTransform::new(2048.0, range, Scaling::Linear, orientation)
            .expect("valid transform");
        let px = transform.try_data_to_pixel(value).expect("to pixel");
        let recovered = transform.try_pixel_to_data(px).expect("from pixel");

        prop_assert!((recovered - value).abs() <= 1e-7);
    }

    #[test]
    fn log_round_trip_property(
        min_exp in -6.0f64..6.0,
        decades in 0.01f64..8.0,
        value_factor in 0.0f64..1.0,
        vertical in any::<bool>()
    ) {
        let min = 10f64.powf(min_exp);
        let max = 10f64.powf(min_exp + decades);
        let value = 10f64.powf(min_exp + value_factor * decades);
        let orientation = if vertical {
            AxisOrientation::Vertical
        } else {
            AxisOrientation::Horizontal
        };

        let range = Range::new(min, max).expect("valid range");
        let transform = ScaleTransform::new(1024.0, range, Scaling::Logarithmic, orientation)
            .expect("valid transform");
        let px = transform.data_to_pixel(value);
        let recovered = transform.pixel_to_data(px);

        prop_assert!(((recovered - value) / value).abs() <= 1e-9);
    }

    #[test]
    fn vertical_mapping_is_monotonically_decreasing(
        min in -1_000.0f64..1_000.0,
        span in 0.01f64..1_000.0,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0
    ) {
        prop_assume!((a - b).abs() > 1e-6);
        let range = Range::new(min, min + span).expect("valid range");
        let transform = ScaleTransform::new(600.0, range, Scaling::Linear, AxisOrientation::Vertical)
            .expect("valid transform");

        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let low_px = transform.data_to_pixel(min + low * span);
        let high_px = transform.data_to_pixel(min + high * span);
        prop_assert!(high_px < low_px);
    }
}
