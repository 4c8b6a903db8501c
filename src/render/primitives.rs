use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serializes as a CSS `rgba(r,g,b,a)` string, the form the plotting engine
/// accepts for every color attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels.
    #[must_use]
    pub const fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Parses the `rgba(r,g,b,a)` / `rgb(r,g,b)` forms produced by `Display`.
    pub fn parse_css(input: &str) -> ChartResult<Self> {
        let trimmed = input.trim();
        let (body, has_alpha) = if let Some(rest) = trimmed.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = trimmed.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(ChartError::InvalidData(format!(
                "unsupported color literal `{input}`"
            )));
        };
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| ChartError::InvalidData(format!("unterminated color `{input}`")))?;

        let parts: Vec<f64> = body
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|e| ChartError::InvalidData(format!("invalid color `{input}`: {e}")))?;
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(ChartError::InvalidData(format!(
                "color `{input}` must have {expected} components"
            )));
        }

        let color = Self::rgba(
            parts[0] / 255.0,
            parts[1] / 255.0,
            parts[2] / 255.0,
            if has_alpha { parts[3] } else { 1.0 },
        );
        color.validate()?;
        Ok(color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to_byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "rgba({},{},{},{})",
            to_byte(self.red),
            to_byte(self.green),
            to_byte(self.blue),
            self.alpha
        )
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_css(&raw).map_err(de::Error::custom)
    }
}

/// Built-in color scales understood by the plotting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamedColorScale {
    Viridis,
    Blues,
    Greens,
    Reds,
    RdBu,
    YlOrRd,
    Portland,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorScale {
    Named(NamedColorScale),
    /// `(stop, color)` pairs with stops increasing over `[0, 1]`.
    Stops(Vec<(f64, Color)>),
}

impl ColorScale {
    pub fn validate(&self) -> ChartResult<()> {
        let Self::Stops(stops) = self else {
            return Ok(());
        };
        if stops.len() < 2 {
            return Err(ChartError::InvalidData(
                "custom color scale needs at least two stops".to_owned(),
            ));
        }
        let mut previous = f64::NEG_INFINITY;
        for (stop, color) in stops {
            if !stop.is_finite() || !(0.0..=1.0).contains(stop) || *stop < previous {
                return Err(ChartError::InvalidData(
                    "color scale stops must be finite, increasing and in [0, 1]".to_owned(),
                ));
            }
            color.validate()?;
            previous = *stop;
        }
        Ok(())
    }
}

impl From<NamedColorScale> for ColorScale {
    fn from(value: NamedColorScale) -> Self {
        Self::Named(value)
    }
}

/// Drawing mode for scatter-like traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScatterMode {
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDash {
    Solid,
    Dash,
    Dot,
    DashDot,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<LineDash>,
}

impl LineStyle {
    #[must_use]
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color: Some(color),
            width: Some(width),
            dash: None,
        }
    }

    #[must_use]
    pub fn with_dash(mut self, dash: LineDash) -> Self {
        self.dash = Some(dash);
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if let Some(width) = self.width {
            if !width.is_finite() || width <= 0.0 {
                return Err(ChartError::InvalidData(
                    "line width must be finite and > 0".to_owned(),
                ));
            }
        }
        match self.color {
            Some(color) => color.validate(),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkerStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl MarkerStyle {
    #[must_use]
    pub fn new(color: Color, size: f64) -> Self {
        Self {
            color: Some(color),
            size: Some(size),
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if let Some(size) = self.size {
            if !size.is_finite() || size <= 0.0 {
                return Err(ChartError::InvalidData(
                    "marker size must be finite and > 0".to_owned(),
                ));
            }
        }
        match self.color {
            Some(color) => color.validate(),
            None => Ok(()),
        }
    }
}
