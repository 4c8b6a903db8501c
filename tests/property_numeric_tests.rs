use mathviz_charts::core::{
    OptionParams, is_rectangular, linspace, meshgrid, price_call, standard_normal_cdf,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn linspace_hits_both_endpoints_with_even_spacing(
        start in -1_000.0f64..1_000.0,
        span in 0.001f64..1_000.0,
        count in 2usize..500
    ) {
        let end = start + span;
        let values = linspace(start, end, count);
        prop_assert_eq!(values.len(), count);
        prop_assert_eq!(values[0], start);
        prop_assert_eq!(values[count - 1], end);

        let step = span / (count - 1) as f64;
        for pair in values.windows(2) {
            prop_assert!(((pair[1] - pair[0]) - step).abs() <= 1e-9 * span.max(1.0));
        }
    }

    #[test]
    fn meshgrid_is_always_rectangular(
        x_len in 1usize..40,
        y_len in 1usize..40
    ) {
        let xs = linspace(0.0, 1.0, x_len);
        let ys = linspace(-1.0, 0.0, y_len);
        let (grid_x, grid_y) = meshgrid(&xs, &ys);
        prop_assert!(is_rectangular(&grid_x, xs.len(), ys.len()));
        prop_assert!(is_rectangular(&grid_y, xs.len(), ys.len()));
    }

    #[test]
    fn normal_cdf_is_a_monotone_probability(
        a in -8.0f64..8.0,
        gap in 0.001f64..4.0
    ) {
        let lower = standard_normal_cdf(a);
        let upper = standard_normal_cdf(a + gap);
        prop_assert!((0.0..=1.0).contains(&lower));
        prop_assert!((0.0..=1.0).contains(&upper));
        prop_assert!(upper >= lower);
    }

    #[test]
    fn call_price_respects_no_arbitrage_bounds(
        spot in 20.0f64..300.0,
        strike in 20.0f64..300.0,
        rate in 0.0f64..0.1,
        volatility in 0.05f64..0.8,
        time in 0.0f64..3.0
    ) {
        let quote = price_call(OptionParams::new(spot, strike, rate, volatility, time));
        let t = time.max(1e-6);
        let lower = (spot - strike * (-rate * t).exp()).max(0.0);
        let tolerance = 1e-4 * spot;
        prop_assert!(quote.price >= lower - tolerance);
        prop_assert!(quote.price <= spot + tolerance);
        prop_assert!((0.0..=1.0).contains(&quote.delta));
        prop_assert!(quote.gamma >= 0.0);
    }
}
