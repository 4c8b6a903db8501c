//! Registry of the pre-defined charts embedded in the documentation pages.
//!
//! Every chart is a pure producer over built-in constants: asking for the same
//! [`ChartId`] twice yields structurally equal descriptors.

mod calculus;
mod finance;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::{ChartError, ChartResult};
use crate::render::{ChartDescriptor, Color};

pub use finance::{RATE, STRIKE, VOLATILITY};

const BLUE: Color = Color::from_rgb8(31, 119, 180);
const ORANGE: Color = Color::from_rgb8(255, 127, 14);
const GREEN: Color = Color::from_rgb8(44, 160, 44);
const RED: Color = Color::from_rgb8(214, 39, 40);
const PURPLE: Color = Color::from_rgb8(148, 103, 189);
const GREY: Color = Color::from_rgb8(127, 127, 127);

/// Default drawing height for charts that do not pick their own.
pub const DEFAULT_CHART_HEIGHT: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartCategory {
    Calculus,
    Finance,
}

/// Identifier of one pre-defined chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartId {
    ParametricHelix,
    SaddleSurface,
    TrigSurface,
    GradientCones,
    GradientContour,
    TangentPlane,
    PartialDerivativeSlices,
    DoubleIntegralBoxes,
    LagrangeConstraint,
    CallPayoff,
    BlackScholesSurface,
    BlackScholesDelta,
    BlackScholesGreeks,
}

impl ChartId {
    pub const ALL: [Self; 13] = [
        Self::ParametricHelix,
        Self::SaddleSurface,
        Self::TrigSurface,
        Self::GradientCones,
        Self::GradientContour,
        Self::TangentPlane,
        Self::PartialDerivativeSlices,
        Self::DoubleIntegralBoxes,
        Self::LagrangeConstraint,
        Self::CallPayoff,
        Self::BlackScholesSurface,
        Self::BlackScholesDelta,
        Self::BlackScholesGreeks,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParametricHelix => "parametric-helix",
            Self::SaddleSurface => "saddle-surface",
            Self::TrigSurface => "trig-surface",
            Self::GradientCones => "gradient-cones",
            Self::GradientContour => "gradient-contour",
            Self::TangentPlane => "tangent-plane",
            Self::PartialDerivativeSlices => "partial-derivative-slices",
            Self::DoubleIntegralBoxes => "double-integral-boxes",
            Self::LagrangeConstraint => "lagrange-constraint",
            Self::CallPayoff => "call-payoff",
            Self::BlackScholesSurface => "black-scholes-surface",
            Self::BlackScholesDelta => "black-scholes-delta",
            Self::BlackScholesGreeks => "black-scholes-greeks",
        }
    }

    #[must_use]
    pub const fn category(self) -> ChartCategory {
        match self {
            Self::CallPayoff
            | Self::BlackScholesSurface
            | Self::BlackScholesDelta
            | Self::BlackScholesGreeks => ChartCategory::Finance,
            _ => ChartCategory::Calculus,
        }
    }

    /// Builds this chart's descriptor.
    #[must_use]
    pub fn produce(self) -> ChartDescriptor {
        let descriptor = match self {
            Self::ParametricHelix => calculus::parametric_helix(),
            Self::SaddleSurface => calculus::saddle_surface(),
            Self::TrigSurface => calculus::trig_surface(),
            Self::GradientCones => calculus::gradient_cones(),
            Self::GradientContour => calculus::gradient_contour(),
            Self::TangentPlane => calculus::tangent_plane(),
            Self::PartialDerivativeSlices => calculus::partial_derivative_slices(),
            Self::DoubleIntegralBoxes => calculus::double_integral_boxes(),
            Self::LagrangeConstraint => calculus::lagrange_constraint(),
            Self::CallPayoff => finance::call_payoff(),
            Self::BlackScholesSurface => finance::black_scholes_surface(),
            Self::BlackScholesDelta => finance::black_scholes_delta(),
            Self::BlackScholesGreeks => finance::black_scholes_greeks(),
        };
        trace!(
            chart = self.as_str(),
            traces = descriptor.trace_count(),
            "produced chart descriptor"
        );
        descriptor
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartId {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ChartError::ChartNotFound { id: s.to_owned() })
    }
}

/// Looks up `id` and builds its descriptor.
///
/// An unknown id is reported as [`ChartError::ChartNotFound`]; callers render
/// it inline instead of treating it as fatal.
pub fn produce(id: &str) -> ChartResult<ChartDescriptor> {
    match id.parse::<ChartId>() {
        Ok(chart) => Ok(chart.produce()),
        Err(err) => {
            warn!(id, "unknown chart identifier");
            Err(err)
        }
    }
}

fn flatten(grid: &[Vec<f64>]) -> Vec<f64> {
    grid.iter().flatten().copied().collect()
}
