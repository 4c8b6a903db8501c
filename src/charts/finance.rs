use crate::core::{OptionParams, evaluate_grid, linspace, price_call};
use crate::render::{
    Annotation, Axis, ChartDescriptor, Domain, Fill, LayoutOptions, LineDash, LineStyle,
    NamedColorScale, ScatterMode, ScatterTrace, SceneLayout, SurfaceTrace,
};

use super::{BLUE, DEFAULT_CHART_HEIGHT, GREEN, GREY, ORANGE, RED};

pub const STRIKE: f64 = 100.0;
pub const RATE: f64 = 0.05;
pub const VOLATILITY: f64 = 0.2;

fn option_at(spot: f64, time: f64) -> OptionParams {
    OptionParams::new(spot, STRIKE, RATE, VOLATILITY, time)
}

fn strike_annotation() -> Annotation {
    Annotation::paper(
        format!("K = {STRIKE}, r = {RATE}, σ = {VOLATILITY}"),
        0.02,
        0.98,
    )
}

pub(super) fn call_payoff() -> ChartDescriptor {
    const HALF_YEAR: f64 = 0.5;
    let spots = linspace(50.0, 150.0, 201);
    let payoff = spots.iter().map(|s| (s - STRIKE).max(0.0)).collect();
    let value = spots
        .iter()
        .map(|&s| price_call(option_at(s, HALF_YEAR)).price)
        .collect();

    ChartDescriptor::new(
        LayoutOptions::titled("European call: payoff at expiry vs. value with 6 months left")
            .with_height(450)
            .with_axes(Axis::titled("Spot price S"), Axis::titled("Value"))
            .with_annotation(strike_annotation()),
    )
    .with_trace(
        ScatterTrace::new(spots.clone(), payoff, ScatterMode::Lines)
            .with_line(LineStyle::solid(GREY, 3.0))
            .with_fill(Fill::ToZeroY, GREY.with_alpha(0.15))
            .with_name("max(S − K, 0)"),
    )
    .with_trace(
        ScatterTrace::new(spots, value, ScatterMode::Lines)
            .with_line(LineStyle::solid(BLUE, 3.0).with_dash(LineDash::Dash))
            .with_name("C(S, T = 0.5)"),
    )
}

/// Call price over spot and time-to-maturity. The `T = 0` row is clamped
/// inside the pricer and reproduces the payoff.
pub(super) fn black_scholes_surface() -> ChartDescriptor {
    let spots = linspace(50.0, 150.0, 41);
    let times = linspace(0.0, 2.0, 41);
    let price = evaluate_grid(&spots, &times, |s, t| price_call(option_at(s, t)).price);

    ChartDescriptor::new(
        LayoutOptions::titled("Black–Scholes call price C(S, T)")
            .with_height(DEFAULT_CHART_HEIGHT)
            .with_scene(
                "scene",
                SceneLayout::with_axes("Spot S", "Time to maturity T", "Call price"),
            )
            .with_annotation(strike_annotation()),
    )
    .with_trace(
        SurfaceTrace::new(spots, times, price)
            .with_colorscale(NamedColorScale::Viridis)
            .with_name("C(S, T)"),
    )
}

/// Delta against spot for shrinking maturities; the curve steepens into a
/// step at the strike and the at-the-money value tends to 1/2.
pub(super) fn black_scholes_delta() -> ChartDescriptor {
    let spots = linspace(60.0, 140.0, 161);
    let maturities = [(1.0, BLUE), (0.5, GREEN), (0.1, ORANGE), (0.01, RED)];

    let traces = maturities.into_iter().map(|(time, color)| {
        let delta = spots
            .iter()
            .map(|&s| price_call(option_at(s, time)).delta)
            .collect();
        ScatterTrace::new(spots.clone(), delta, ScatterMode::Lines)
            .with_line(LineStyle::solid(color, 2.5))
            .with_name(format!("T = {time}"))
    });

    ChartDescriptor::new(
        LayoutOptions::titled("Call delta Δ = N(d₁)")
            .with_height(450)
            .with_axes(
                Axis::titled("Spot price S"),
                Axis::titled("Δ").with_range(0.0, 1.0),
            )
            .with_annotation(Annotation::paper("Δ(K) → 0.5 as T → 0", 0.02, 0.98)),
    )
    .with_traces(traces)
}

/// Side-by-side delta and gamma surfaces over spot and maturity.
pub(super) fn black_scholes_greeks() -> ChartDescriptor {
    let spots = linspace(60.0, 140.0, 33);
    let times = linspace(0.05, 1.0, 33);
    let delta = evaluate_grid(&spots, &times, |s, t| price_call(option_at(s, t)).delta);
    let gamma = evaluate_grid(&spots, &times, |s, t| price_call(option_at(s, t)).gamma);

    ChartDescriptor::new(
        LayoutOptions::titled("Greeks: delta and gamma")
            .with_height(520)
            .with_scene(
                "scene",
                SceneLayout::with_axes("S", "T", "Δ")
                    .with_domain(Domain::new([0.0, 0.48], [0.0, 1.0])),
            )
            .with_scene(
                "scene2",
                SceneLayout::with_axes("S", "T", "Γ")
                    .with_domain(Domain::new([0.52, 1.0], [0.0, 1.0])),
            )
            .with_annotation(Annotation::paper("Delta Δ = ∂C/∂S", 0.24, 1.0))
            .with_annotation(Annotation::paper("Gamma Γ = ∂²C/∂S²", 0.76, 1.0)),
    )
    .with_trace(
        SurfaceTrace::new(spots.clone(), times.clone(), delta)
            .with_colorscale(NamedColorScale::Blues)
            .with_showscale(false)
            .with_name("Δ")
            .with_scene("scene"),
    )
    .with_trace(
        SurfaceTrace::new(spots, times, gamma)
            .with_colorscale(NamedColorScale::Portland)
            .with_showscale(false)
            .with_name("Γ")
            .with_scene("scene2"),
    )
}
