use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{DEFAULT_SCENE, LayoutOptions, Trace};

/// Declarative plot: ordered traces plus layout metadata.
///
/// Built fresh by every producer call and never mutated by this crate after
/// it is returned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartDescriptor {
    pub data: Vec<Trace>,
    pub layout: LayoutOptions,
}

impl ChartDescriptor {
    #[must_use]
    pub fn new(layout: LayoutOptions) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }

    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<Trace>) -> Self {
        self.data.push(trace.into());
        self
    }

    #[must_use]
    pub fn with_traces<I>(mut self, traces: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Trace>,
    {
        self.data.extend(traces.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn trace_count(&self) -> usize {
        self.data.len()
    }

    /// Checks every trace, the layout, and that 3D traces target declared scenes.
    pub fn validate(&self) -> ChartResult<()> {
        if self.data.is_empty() {
            return Err(ChartError::InvalidData(
                "descriptor must contain at least one trace".to_owned(),
            ));
        }
        self.layout.validate()?;

        for (index, trace) in self.data.iter().enumerate() {
            trace.validate().map_err(|err| match err {
                ChartError::InvalidData(message) => {
                    ChartError::InvalidData(format!("trace #{index}: {message}"))
                }
                other => other,
            })?;

            if let Some(scene) = trace.scene() {
                let declared = self.layout.has_scene(scene)
                    || (scene == DEFAULT_SCENE && self.layout.scenes.is_empty());
                if !declared {
                    return Err(ChartError::InvalidData(format!(
                        "trace #{index} targets undeclared scene `{scene}`"
                    )));
                }
            }
        }
        Ok(())
    }
}

macro_rules! impl_into_trace {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Trace {
                fn from(value: $ty) -> Self {
                    Trace::$variant(value)
                }
            }
        )*
    };
}

impl_into_trace!(
    Scatter3d => crate::render::Scatter3dTrace,
    Surface => crate::render::SurfaceTrace,
    Cone => crate::render::ConeTrace,
    Contour => crate::render::ContourTrace,
    Scatter => crate::render::ScatterTrace,
    Mesh3d => crate::render::Mesh3dTrace,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{ScatterMode, ScatterTrace, SurfaceTrace};

    #[test]
    fn empty_descriptor_is_invalid() {
        assert!(ChartDescriptor::default().validate().is_err());
    }

    #[test]
    fn undeclared_scene_is_reported_with_trace_index() {
        let descriptor = ChartDescriptor::new(LayoutOptions::titled("t"))
            .with_trace(ScatterTrace::new(vec![0.0], vec![0.0], ScatterMode::Lines))
            .with_trace(
                SurfaceTrace::new(vec![0.0], vec![0.0], vec![vec![0.0]]).with_scene("scene2"),
            );
        let err = descriptor.validate().expect_err("scene2 is not declared");
        assert!(err.to_string().contains("trace #1"));
    }
}
