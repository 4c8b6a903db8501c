use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawConfig, LayoutOptions, Margin};

/// Versioned engine bundle fetched once per page.
pub const DEFAULT_ENGINE_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Layout values the host page supplies to every chart.
///
/// Applied only where a descriptor leaves the field unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostLayoutDefaults {
    #[serde(default = "default_background")]
    pub paper_bgcolor: Color,
    #[serde(default = "default_background")]
    pub plot_bgcolor: Color,
    #[serde(default = "default_margin")]
    pub margin: Margin,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for HostLayoutDefaults {
    fn default() -> Self {
        Self {
            paper_bgcolor: default_background(),
            plot_bgcolor: default_background(),
            margin: default_margin(),
            height: default_height(),
        }
    }
}

impl HostLayoutDefaults {
    pub fn apply(&self, layout: &mut LayoutOptions) {
        layout.paper_bgcolor.get_or_insert(self.paper_bgcolor);
        layout.plot_bgcolor.get_or_insert(self.plot_bgcolor);
        layout.margin.get_or_insert(self.margin);
        layout.height.get_or_insert(self.height);
    }
}

/// Adapter configuration.
///
/// Serializable so a documentation build can ship it next to the pages
/// instead of hard-coding the engine location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererConfig {
    #[serde(default = "default_engine_url")]
    pub engine_url: String,
    #[serde(default)]
    pub host_defaults: HostLayoutDefaults,
    #[serde(default)]
    pub draw: DrawConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            engine_url: default_engine_url(),
            host_defaults: HostLayoutDefaults::default(),
            draw: DrawConfig::default(),
        }
    }
}

impl RendererConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_engine_url(mut self, url: impl Into<String>) -> Self {
        self.engine_url = url.into();
        self
    }

    #[must_use]
    pub fn with_host_defaults(mut self, defaults: HostLayoutDefaults) -> Self {
        self.host_defaults = defaults;
        self
    }

    #[must_use]
    pub fn with_draw_config(mut self, draw: DrawConfig) -> Self {
        self.draw = draw;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        let url = self.engine_url.trim();
        if url.is_empty() {
            return Err(ChartError::InvalidData(
                "engine url must not be empty".to_owned(),
            ));
        }
        if !(url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/')) {
            return Err(ChartError::InvalidData(format!(
                "engine url `{url}` must be absolute or root-relative"
            )));
        }
        if self.host_defaults.height == 0 {
            return Err(ChartError::InvalidData(
                "default chart height must be > 0".to_owned(),
            ));
        }
        self.host_defaults.paper_bgcolor.validate()?;
        self.host_defaults.plot_bgcolor.validate()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::Serialization(format!("invalid renderer config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_engine_url() -> String {
    DEFAULT_ENGINE_URL.to_owned()
}

fn default_background() -> Color {
    Color::TRANSPARENT
}

fn default_margin() -> Margin {
    Margin {
        l: 40,
        r: 20,
        t: 50,
        b: 40,
    }
}

fn default_height() -> u32 {
    crate::charts::DEFAULT_CHART_HEIGHT
}
