use std::f64::consts::PI;

const P: f64 = 0.231_641_9;
const B1: f64 = 0.319_381_530;
const B2: f64 = -0.356_563_782;
const B3: f64 = 1.781_477_937;
const B4: f64 = -1.821_255_978;
const B5: f64 = 1.330_274_429;

/// Standard normal probability density.
#[must_use]
pub fn standard_normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal cumulative distribution.
///
/// Abramowitz & Stegun 26.2.17 rational approximation, absolute error below
/// 7.5e-8 over the whole real line.
#[must_use]
pub fn standard_normal_cdf(x: f64) -> f64 {
    let t = 1.0 / (1.0 + P * x.abs());
    let poly = t * (B1 + t * (B2 + t * (B3 + t * (B4 + t * B5))));
    let upper_tail = standard_normal_pdf(x) * poly;
    if x >= 0.0 { 1.0 - upper_tail } else { upper_tail }
}
