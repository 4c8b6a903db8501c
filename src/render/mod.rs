mod descriptor;
mod frame;
mod layout;
mod null_engine;
mod primitives;
mod trace;

pub use descriptor::ChartDescriptor;
pub use frame::{ContainerId, DrawConfig, RenderFrame};
pub use layout::{
    Annotation, Axis, AxisRef, DEFAULT_SCENE, Domain, LayoutOptions, Margin, SceneLayout, Title,
};
pub use null_engine::NullEngine;
pub use primitives::{
    Color, ColorScale, LineDash, LineStyle, MarkerStyle, NamedColorScale, ScatterMode,
};
pub use trace::{
    ConeAnchor, ConeSizeMode, ConeTrace, ContourLabels, ContourTrace, Fill, Mesh3dTrace,
    Scatter3dTrace, ScatterTrace, SurfaceTrace, Trace, TraceKind,
};

use crate::error::ChartResult;

/// Contract implemented by the external plotting engine binding.
///
/// The engine receives a fully merged, deterministic `RenderFrame` so the
/// binding stays isolated from chart production and mount bookkeeping.
/// Methods take `&self` because one loaded engine is shared by every
/// container on the page.
pub trait PlotEngine {
    /// Draws `frame` into its container, replacing any previous drawing.
    fn draw(&self, frame: &RenderFrame) -> ChartResult<()>;

    /// Releases everything the engine holds for `container`.
    fn purge(&self, container: &ContainerId);
}
