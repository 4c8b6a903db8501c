//! mathviz-charts: pre-defined calculus and finance charts for documentation pages.
//!
//! A registry maps each [`ChartId`] to a pure producer of a declarative
//! [`ChartDescriptor`]. The [`RendererAdapter`] hands descriptors to an
//! external plotting engine that is loaded once per page.

pub mod api;
pub mod charts;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartView, RendererAdapter, RendererConfig};
pub use charts::{ChartId, produce};
pub use error::{ChartError, ChartResult};
pub use render::ChartDescriptor;
