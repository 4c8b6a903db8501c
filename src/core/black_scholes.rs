use serde::{Deserialize, Serialize};

use crate::core::normal::{standard_normal_cdf, standard_normal_pdf};
use crate::error::{ChartError, ChartResult};

/// Smallest time-to-maturity used in pricing; keeps `sigma * sqrt(t)` non-zero.
pub const MIN_TIME_TO_MATURITY: f64 = 1e-6;

/// Inputs for a European option under Black-Scholes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionParams {
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub volatility: f64,
    /// Years to maturity.
    pub time: f64,
}

impl OptionParams {
    #[must_use]
    pub const fn new(spot: f64, strike: f64, rate: f64, volatility: f64, time: f64) -> Self {
        Self {
            spot,
            strike,
            rate,
            volatility,
            time,
        }
    }

    #[must_use]
    pub const fn with_spot(mut self, spot: f64) -> Self {
        self.spot = spot;
        self
    }

    #[must_use]
    pub const fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        for (name, value) in [
            ("spot", self.spot),
            ("strike", self.strike),
            ("volatility", self.volatility),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "option `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.rate.is_finite() || !self.time.is_finite() || self.time < 0.0 {
            return Err(ChartError::InvalidData(
                "option rate must be finite and time must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Call price and first/second-order sensitivities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    /// Per year.
    pub theta: f64,
}

/// Prices a European call. `time` is clamped to [`MIN_TIME_TO_MATURITY`].
#[must_use]
pub fn price_call(params: OptionParams) -> OptionQuote {
    let OptionParams {
        spot,
        strike,
        rate,
        volatility,
        time,
    } = params;
    let t = time.max(MIN_TIME_TO_MATURITY);
    let sqrt_t = t.sqrt();
    let sigma_sqrt_t = volatility * sqrt_t;

    let d1 = ((spot / strike).ln() + (rate + 0.5 * volatility * volatility) * t) / sigma_sqrt_t;
    let d2 = d1 - sigma_sqrt_t;
    let discount = (-rate * t).exp();

    let nd1 = standard_normal_cdf(d1);
    let nd2 = standard_normal_cdf(d2);
    let pdf_d1 = standard_normal_pdf(d1);

    OptionQuote {
        price: spot * nd1 - strike * discount * nd2,
        delta: nd1,
        gamma: pdf_d1 / (spot * sigma_sqrt_t),
        vega: spot * pdf_d1 * sqrt_t,
        theta: -spot * pdf_d1 * volatility / (2.0 * sqrt_t) - rate * strike * discount * nd2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ATM: OptionParams = OptionParams::new(100.0, 100.0, 0.05, 0.2, 1.0);

    #[test]
    fn matches_textbook_one_year_at_the_money() {
        let quote = price_call(ATM);
        assert_abs_diff_eq!(quote.price, 10.450_583_572, epsilon = 1e-4);
        assert_abs_diff_eq!(quote.delta, 0.636_830_651, epsilon = 1e-6);
    }

    #[test]
    fn zero_time_is_clamped_instead_of_dividing_by_zero() {
        let quote = price_call(ATM.with_time(0.0));
        assert!(quote.price.is_finite());
        assert!(quote.gamma.is_finite());
        assert_abs_diff_eq!(quote.delta, 0.5, epsilon = 1e-3);
    }

    #[test]
    fn validate_rejects_non_positive_volatility() {
        let params = OptionParams::new(100.0, 100.0, 0.05, 0.0, 1.0);
        assert!(params.validate().is_err());
        assert!(ATM.validate().is_ok());
    }
}
