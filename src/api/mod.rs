//! Host-facing surface: engine loading, container lifecycle, and embedding.

mod adapter;
mod chart_view;
mod engine_loader;
mod json_contract;
mod renderer_config;

pub use adapter::{MountGuard, MountOutcome, RendererAdapter};
pub use chart_view::{ChartView, ViewOutcome};
pub use engine_loader::{EngineCache, EngineHandle, EngineLoader, EngineState};
pub use json_contract::{CHART_DESCRIPTOR_JSON_SCHEMA_V1, ChartDescriptorJsonContractV1};
pub use renderer_config::{DEFAULT_ENGINE_URL, HostLayoutDefaults, RendererConfig};
