use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{ChartDescriptor, LayoutOptions, Trace};

/// Host element that receives a drawing, identified the way the page does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Engine-level draw options passed alongside data and layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawConfig {
    pub responsive: bool,
    pub display_mode_bar: bool,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            responsive: true,
            display_mode_bar: false,
        }
    }
}

/// Fully merged payload for one engine draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub container: ContainerId,
    pub data: Vec<Trace>,
    pub layout: LayoutOptions,
    pub config: DrawConfig,
}

impl RenderFrame {
    #[must_use]
    pub fn new(container: ContainerId, descriptor: ChartDescriptor, config: DrawConfig) -> Self {
        let ChartDescriptor { data, layout } = descriptor;
        Self {
            container,
            data,
            layout,
            config,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.container.as_str().is_empty() {
            return Err(ChartError::InvalidData(
                "container id must not be empty".to_owned(),
            ));
        }
        for trace in &self.data {
            trace.validate()?;
        }
        self.layout.validate()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
