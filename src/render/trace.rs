use serde::{Deserialize, Serialize};

use crate::core::{BoxMesh, Grid, is_rectangular};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, ColorScale, LineStyle, MarkerStyle, ScatterMode};

/// One visual series inside a descriptor, tagged by the engine's trace `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter3d(Scatter3dTrace),
    Surface(SurfaceTrace),
    Cone(ConeTrace),
    Contour(ContourTrace),
    Scatter(ScatterTrace),
    Mesh3d(Mesh3dTrace),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceKind {
    Scatter3d,
    Surface,
    Cone,
    Contour,
    Scatter,
    Mesh3d,
}

impl Trace {
    #[must_use]
    pub fn kind(&self) -> TraceKind {
        match self {
            Self::Scatter3d(_) => TraceKind::Scatter3d,
            Self::Surface(_) => TraceKind::Surface,
            Self::Cone(_) => TraceKind::Cone,
            Self::Contour(_) => TraceKind::Contour,
            Self::Scatter(_) => TraceKind::Scatter,
            Self::Mesh3d(_) => TraceKind::Mesh3d,
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Scatter3d(trace) => trace.name.as_deref(),
            Self::Surface(trace) => trace.name.as_deref(),
            Self::Cone(trace) => trace.name.as_deref(),
            Self::Contour(trace) => trace.name.as_deref(),
            Self::Scatter(trace) => trace.name.as_deref(),
            Self::Mesh3d(trace) => trace.name.as_deref(),
        }
    }

    /// Scene id for 3D traces. `None` means the default `scene`.
    #[must_use]
    pub fn scene(&self) -> Option<&str> {
        match self {
            Self::Scatter3d(trace) => trace.scene.as_deref(),
            Self::Surface(trace) => trace.scene.as_deref(),
            Self::Cone(trace) => trace.scene.as_deref(),
            Self::Mesh3d(trace) => trace.scene.as_deref(),
            Self::Contour(_) | Self::Scatter(_) => None,
        }
    }

    /// `(x, y, z)` for traces carrying a rectangular z-grid.
    #[must_use]
    pub fn z_grid(&self) -> Option<(&[f64], &[f64], &Grid)> {
        match self {
            Self::Surface(trace) => Some((&trace.x, &trace.y, &trace.z)),
            Self::Contour(trace) => Some((&trace.x, &trace.y, &trace.z)),
            _ => None,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Scatter3d(trace) => trace.validate(),
            Self::Surface(trace) => trace.validate(),
            Self::Cone(trace) => trace.validate(),
            Self::Contour(trace) => trace.validate(),
            Self::Scatter(trace) => trace.validate(),
            Self::Mesh3d(trace) => trace.validate(),
        }
    }
}

fn ensure_finite(label: &str, values: &[f64]) -> ChartResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!(
            "`{label}` values must be finite"
        )))
    }
}

fn ensure_parallel(label: &str, expected: usize, arrays: &[(&str, usize)]) -> ChartResult<()> {
    for (name, len) in arrays {
        if *len != expected {
            return Err(ChartError::InvalidData(format!(
                "{label} `{name}` has {len} values, expected {expected}"
            )));
        }
    }
    Ok(())
}

fn ensure_grid(label: &str, x: &[f64], y: &[f64], z: &Grid) -> ChartResult<()> {
    ensure_finite("x", x)?;
    ensure_finite("y", y)?;
    if !is_rectangular(z, x.len(), y.len()) {
        return Err(ChartError::InvalidData(format!(
            "{label} z-grid must be {} rows of {} values",
            y.len(),
            x.len()
        )));
    }
    for row in z {
        ensure_finite("z", row)?;
    }
    Ok(())
}

fn ensure_opacity(opacity: Option<f64>) -> ChartResult<()> {
    match opacity {
        Some(value) if !value.is_finite() || !(0.0..=1.0).contains(&value) => Err(
            ChartError::InvalidData("opacity must be finite and in [0, 1]".to_owned()),
        ),
        _ => Ok(()),
    }
}

fn ensure_scale(scale: Option<&ColorScale>) -> ChartResult<()> {
    scale.map_or(Ok(()), ColorScale::validate)
}

/// 3D polyline and/or markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scatter3dTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub mode: ScatterMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
}

impl Scatter3dTrace {
    #[must_use]
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>, mode: ScatterMode) -> Self {
        Self {
            x,
            y,
            z,
            mode,
            line: None,
            marker: None,
            name: None,
            scene: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: LineStyle) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: MarkerStyle) -> Self {
        self.marker = Some(marker);
        self
    }

    #[must_use]
    pub fn with_scene(mut self, scene: impl Into<String>) -> Self {
        self.scene = Some(scene.into());
        self
    }

    fn validate(&self) -> ChartResult<()> {
        ensure_parallel(
            "scatter3d",
            self.x.len(),
            &[("y", self.y.len()), ("z", self.z.len())],
        )?;
        ensure_finite("x", &self.x)?;
        ensure_finite("y", &self.y)?;
        ensure_finite("z", &self.z)?;
        if let Some(line) = self.line {
            line.validate()?;
        }
        if let Some(marker) = self.marker {
            marker.validate()?;
        }
        Ok(())
    }
}

/// Surface over a rectangular grid: `z[j][i]` sits above `(x[i], y[j])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Grid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<ColorScale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showscale: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
}

impl SurfaceTrace {
    #[must_use]
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Grid) -> Self {
        Self {
            x,
            y,
            z,
            colorscale: None,
            opacity: None,
            showscale: None,
            name: None,
            scene: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_colorscale(mut self, scale: impl Into<ColorScale>) -> Self {
        self.colorscale = Some(scale.into());
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    #[must_use]
    pub fn with_showscale(mut self, showscale: bool) -> Self {
        self.showscale = Some(showscale);
        self
    }

    #[must_use]
    pub fn with_scene(mut self, scene: impl Into<String>) -> Self {
        self.scene = Some(scene.into());
        self
    }

    fn validate(&self) -> ChartResult<()> {
        ensure_grid("surface", &self.x, &self.y, &self.z)?;
        ensure_opacity(self.opacity)?;
        ensure_scale(self.colorscale.as_ref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConeSizeMode {
    Scaled,
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConeAnchor {
    Tip,
    Tail,
    Center,
    Cm,
}

/// Vector field: cone at `(x, y, z)` pointing along `(u, v, w)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConeTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub u: Vec<f64>,
    pub v: Vec<f64>,
    pub w: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<ColorScale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizemode: Option<ConeSizeMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizeref: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<ConeAnchor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showscale: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
}

impl ConeTrace {
    #[must_use]
    pub fn new(position: [Vec<f64>; 3], direction: [Vec<f64>; 3]) -> Self {
        let [x, y, z] = position;
        let [u, v, w] = direction;
        Self {
            x,
            y,
            z,
            u,
            v,
            w,
            colorscale: None,
            sizemode: None,
            sizeref: None,
            anchor: None,
            showscale: None,
            name: None,
            scene: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_colorscale(mut self, scale: impl Into<ColorScale>) -> Self {
        self.colorscale = Some(scale.into());
        self
    }

    #[must_use]
    pub fn with_sizing(mut self, mode: ConeSizeMode, sizeref: f64) -> Self {
        self.sizemode = Some(mode);
        self.sizeref = Some(sizeref);
        self
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: ConeAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    fn validate(&self) -> ChartResult<()> {
        ensure_parallel(
            "cone",
            self.x.len(),
            &[
                ("y", self.y.len()),
                ("z", self.z.len()),
                ("u", self.u.len()),
                ("v", self.v.len()),
                ("w", self.w.len()),
            ],
        )?;
        for (label, values) in [
            ("x", &self.x),
            ("y", &self.y),
            ("z", &self.z),
            ("u", &self.u),
            ("v", &self.v),
            ("w", &self.w),
        ] {
            ensure_finite(label, values)?;
        }
        if let Some(sizeref) = self.sizeref {
            if !sizeref.is_finite() || sizeref <= 0.0 {
                return Err(ChartError::InvalidData(
                    "cone sizeref must be finite and > 0".to_owned(),
                ));
            }
        }
        ensure_scale(self.colorscale.as_ref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContourLabels {
    pub showlabels: bool,
}

/// 2D contour over a rectangular grid, same layout as [`SurfaceTrace`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Grid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<ColorScale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ncontours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contours: Option<ContourLabels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showscale: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ContourTrace {
    #[must_use]
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Grid) -> Self {
        Self {
            x,
            y,
            z,
            colorscale: None,
            ncontours: None,
            contours: None,
            showscale: None,
            name: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_colorscale(mut self, scale: impl Into<ColorScale>) -> Self {
        self.colorscale = Some(scale.into());
        self
    }

    #[must_use]
    pub fn with_levels(mut self, ncontours: u32, showlabels: bool) -> Self {
        self.ncontours = Some(ncontours);
        self.contours = Some(ContourLabels { showlabels });
        self
    }

    fn validate(&self) -> ChartResult<()> {
        ensure_grid("contour", &self.x, &self.y, &self.z)?;
        ensure_scale(self.colorscale.as_ref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fill {
    #[serde(rename = "tozeroy")]
    ToZeroY,
    #[serde(rename = "tonexty")]
    ToNextY,
}

/// 2D line and/or markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: ScatterMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ScatterTrace {
    #[must_use]
    pub fn new(x: Vec<f64>, y: Vec<f64>, mode: ScatterMode) -> Self {
        Self {
            x,
            y,
            mode,
            line: None,
            marker: None,
            fill: None,
            fillcolor: None,
            name: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: LineStyle) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: MarkerStyle) -> Self {
        self.marker = Some(marker);
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Fill, color: Color) -> Self {
        self.fill = Some(fill);
        self.fillcolor = Some(color);
        self
    }

    fn validate(&self) -> ChartResult<()> {
        ensure_parallel("scatter", self.x.len(), &[("y", self.y.len())])?;
        ensure_finite("x", &self.x)?;
        ensure_finite("y", &self.y)?;
        if let Some(line) = self.line {
            line.validate()?;
        }
        if let Some(marker) = self.marker {
            marker.validate()?;
        }
        match self.fillcolor {
            Some(color) => color.validate(),
            None => Ok(()),
        }
    }
}

/// Triangle mesh; faces index into the vertex arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh3dTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub i: Vec<u32>,
    pub j: Vec<u32>,
    pub k: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flatshading: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
}

impl Mesh3dTrace {
    #[must_use]
    pub fn from_box(mesh: BoxMesh) -> Self {
        let BoxMesh { x, y, z, i, j, k } = mesh;
        Self {
            x,
            y,
            z,
            i,
            j,
            k,
            color: None,
            opacity: None,
            flatshading: Some(true),
            showlegend: None,
            name: None,
            scene: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color, opacity: f64) -> Self {
        self.color = Some(color);
        self.opacity = Some(opacity);
        self
    }

    #[must_use]
    pub fn with_showlegend(mut self, showlegend: bool) -> Self {
        self.showlegend = Some(showlegend);
        self
    }

    fn validate(&self) -> ChartResult<()> {
        ensure_parallel(
            "mesh3d",
            self.x.len(),
            &[("y", self.y.len()), ("z", self.z.len())],
        )?;
        ensure_parallel(
            "mesh3d faces",
            self.i.len(),
            &[("j", self.j.len()), ("k", self.k.len())],
        )?;
        ensure_finite("x", &self.x)?;
        ensure_finite("y", &self.y)?;
        ensure_finite("z", &self.z)?;
        let vertex_count = self.x.len();
        if self
            .i
            .iter()
            .chain(&self.j)
            .chain(&self.k)
            .any(|&index| index as usize >= vertex_count)
        {
            return Err(ChartError::InvalidData(format!(
                "mesh3d face index out of range for {vertex_count} vertices"
            )));
        }
        if let Some(color) = self.color {
            color.validate()?;
        }
        ensure_opacity(self.opacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::box_mesh;

    #[test]
    fn trace_type_tag_uses_engine_names() {
        let trace = Trace::Scatter3d(Scatter3dTrace::new(
            vec![0.0],
            vec![0.0],
            vec![0.0],
            ScatterMode::Markers,
        ));
        let json = serde_json::to_value(&trace).expect("serialize");
        assert_eq!(json["type"], "scatter3d");
        assert_eq!(json["mode"], "markers");
        assert!(json.get("name").is_none());
    }

    #[test]
    fn ragged_surface_is_rejected() {
        let trace = Trace::Surface(SurfaceTrace::new(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![vec![0.0, 1.0], vec![2.0]],
        ));
        assert!(trace.validate().is_err());
    }

    #[test]
    fn box_mesh_trace_is_valid() {
        let trace = Trace::Mesh3d(Mesh3dTrace::from_box(box_mesh(0.0, 1.0, 0.0, 1.0, 0.0, 1.0)));
        assert!(trace.validate().is_ok());
        assert_eq!(trace.kind(), TraceKind::Mesh3d);
    }

    #[test]
    fn mesh_face_out_of_range_is_rejected() {
        let mut mesh = Mesh3dTrace::from_box(box_mesh(0.0, 1.0, 0.0, 1.0, 0.0, 1.0));
        mesh.k[0] = 8;
        assert!(Trace::Mesh3d(mesh).validate().is_err());
    }
}
