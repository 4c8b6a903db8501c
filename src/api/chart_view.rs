use tracing::warn;

use crate::charts::ChartId;
use crate::error::{ChartError, ChartResult};
use crate::render::ContainerId;

use super::{MountGuard, MountOutcome, RendererAdapter};

/// What the host page shows at the embedding site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutcome {
    Rendered {
        chart: ChartId,
        height_px: u32,
        outcome: MountOutcome,
    },
    /// Message rendered in place of the chart.
    InlineError(String),
    /// Engine not available; the placeholder stays up.
    Loading { height_px: u32 },
}

/// One embedded chart bound to one container for its mounted lifetime.
#[derive(Debug)]
pub struct ChartView<'a> {
    guard: MountGuard<'a>,
    default_height: u32,
}

impl<'a> ChartView<'a> {
    pub fn attach(adapter: &'a RendererAdapter, container: ContainerId) -> ChartResult<Self> {
        let default_height = adapter.config().host_defaults.height;
        Ok(Self {
            guard: adapter.attach(container)?,
            default_height,
        })
    }

    #[must_use]
    pub fn container(&self) -> &ContainerId {
        self.guard.container()
    }

    /// Produces the chart named `id` and draws it into this view's container.
    ///
    /// The descriptor is computed once and also sizes the container. Lookup
    /// misses and draw failures become inline errors; a failed engine load
    /// leaves the view loading. Nothing here panics or propagates.
    pub async fn render_chart(&self, id: &str) -> ViewOutcome {
        let chart = match id.parse::<ChartId>() {
            Ok(chart) => chart,
            Err(err) => {
                warn!(id, container = %self.container(), "chart not rendered: {err}");
                return ViewOutcome::InlineError(err.to_string());
            }
        };
        let descriptor = chart.produce();
        let height_px = descriptor.layout.height.unwrap_or(self.default_height);

        match self.guard.mount(descriptor).await {
            Ok(outcome) => ViewOutcome::Rendered {
                chart,
                height_px,
                outcome,
            },
            Err(ChartError::EngineLoad { .. }) => ViewOutcome::Loading { height_px },
            Err(err) => {
                warn!(%chart, container = %self.container(), error = %err, "chart draw failed");
                ViewOutcome::InlineError(err.to_string())
            }
        }
    }
}
