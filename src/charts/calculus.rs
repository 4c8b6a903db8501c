use std::f64::consts::{FRAC_1_SQRT_2, PI, TAU};

use crate::core::{box_mesh, evaluate_grid, linspace, meshgrid};
use crate::render::{
    Annotation, Axis, ChartDescriptor, Color, ConeAnchor, ConeSizeMode, ConeTrace, ContourTrace,
    Domain, LayoutOptions, LineDash, LineStyle, MarkerStyle, Mesh3dTrace, NamedColorScale,
    Scatter3dTrace, ScatterMode, ScatterTrace, SceneLayout, SurfaceTrace,
};

use super::{BLUE, DEFAULT_CHART_HEIGHT, GREEN, GREY, ORANGE, PURPLE, RED, flatten};

fn wave(x: f64, y: f64) -> f64 {
    x.sin() * y.cos()
}

fn wave_gradient(x: f64, y: f64) -> (f64, f64) {
    (x.cos() * y.cos(), -x.sin() * y.sin())
}

fn point3d(x: f64, y: f64, z: f64, color: Color, name: &str) -> Scatter3dTrace {
    Scatter3dTrace::new(vec![x], vec![y], vec![z], ScatterMode::Markers)
        .with_marker(MarkerStyle::new(color, 6.0))
        .with_name(name)
}

fn xyz_scene() -> SceneLayout {
    SceneLayout::with_axes("x", "y", "z")
}

pub(super) fn parametric_helix() -> ChartDescriptor {
    let t = linspace(0.0, 4.0 * PI, 300);
    let x = t.iter().map(|t| t.cos()).collect();
    let y = t.iter().map(|t| t.sin()).collect();
    let z = t.iter().map(|t| t / TAU).collect();

    ChartDescriptor::new(
        LayoutOptions::titled("Helix r(t) = (cos t, sin t, t / 2π)")
            .with_height(DEFAULT_CHART_HEIGHT)
            .with_scene("scene", xyz_scene()),
    )
    .with_trace(
        Scatter3dTrace::new(x, y, z, ScatterMode::Lines)
            .with_line(LineStyle::solid(BLUE, 5.0))
            .with_name("r(t)"),
    )
    .with_trace(point3d(1.0, 0.0, 0.0, GREEN, "t = 0"))
    .with_trace(point3d(1.0, 0.0, 2.0, RED, "t = 4π"))
}

pub(super) fn saddle_surface() -> ChartDescriptor {
    let xs = linspace(-2.0, 2.0, 41);
    let ys = linspace(-2.0, 2.0, 41);
    let z = evaluate_grid(&xs, &ys, |x, y| x * x - y * y);

    ChartDescriptor::new(
        LayoutOptions::titled("Saddle z = x² − y²")
            .with_height(DEFAULT_CHART_HEIGHT)
            .with_scene("scene", xyz_scene()),
    )
    .with_trace(
        SurfaceTrace::new(xs, ys, z)
            .with_colorscale(NamedColorScale::RdBu)
            .with_name("z = x² − y²"),
    )
    .with_trace(point3d(0.0, 0.0, 0.0, GREY, "critical point"))
}

pub(super) fn trig_surface() -> ChartDescriptor {
    let xs = linspace(-PI, PI, 60);
    let ys = linspace(-PI, PI, 60);
    let z = evaluate_grid(&xs, &ys, wave);

    ChartDescriptor::new(
        LayoutOptions::titled("z = sin(x) · cos(y)")
            .with_height(DEFAULT_CHART_HEIGHT)
            .with_scene("scene", xyz_scene()),
    )
    .with_trace(
        SurfaceTrace::new(xs, ys, z)
            .with_colorscale(NamedColorScale::Viridis)
            .with_name("sin x cos y"),
    )
}

/// Gradient of `sin x cos y` drawn as cones sitting on the surface.
pub(super) fn gradient_cones() -> ChartDescriptor {
    let xs = linspace(-PI, PI, 9);
    let ys = linspace(-PI, PI, 9);
    let (grid_x, grid_y) = meshgrid(&xs, &ys);
    let x = flatten(&grid_x);
    let y = flatten(&grid_y);
    let z: Vec<f64> = x.iter().zip(&y).map(|(&x, &y)| wave(x, y)).collect();
    let (u, v): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(&y)
        .map(|(&x, &y)| wave_gradient(x, y))
        .unzip();
    let w = vec![0.0; x.len()];

    let surface_xs = linspace(-PI, PI, 40);
    let surface_ys = linspace(-PI, PI, 40);
    let surface_z = evaluate_grid(&surface_xs, &surface_ys, wave);

    ChartDescriptor::new(
        LayoutOptions::titled("∇f for f(x, y) = sin(x) · cos(y)")
            .with_height(550)
            .with_scene("scene", xyz_scene()),
    )
    .with_trace(
        SurfaceTrace::new(surface_xs, surface_ys, surface_z)
            .with_colorscale(NamedColorScale::Greens)
            .with_opacity(0.55)
            .with_showscale(false)
            .with_name("f"),
    )
    .with_trace(
        ConeTrace::new([x, y, z], [u, v, w])
            .with_colorscale(NamedColorScale::Reds)
            .with_sizing(ConeSizeMode::Absolute, 0.4)
            .with_anchor(ConeAnchor::Tail)
            .with_name("∇f"),
    )
}

/// Level sets of an elliptic bowl with a fixed-step gradient-descent path.
pub(super) fn gradient_contour() -> ChartDescriptor {
    const STEP: f64 = 0.1;
    const ITERATIONS: usize = 25;
    let bowl = |x: f64, y: f64| x * x + 3.0 * y * y;

    let xs = linspace(-2.0, 2.0, 81);
    let ys = linspace(-1.5, 1.5, 61);
    let z = evaluate_grid(&xs, &ys, bowl);

    let mut path_x = Vec::with_capacity(ITERATIONS + 1);
    let mut path_y = Vec::with_capacity(ITERATIONS + 1);
    let (mut x, mut y) = (1.8, 1.2);
    path_x.push(x);
    path_y.push(y);
    for _ in 0..ITERATIONS {
        x -= STEP * 2.0 * x;
        y -= STEP * 6.0 * y;
        path_x.push(x);
        path_y.push(y);
    }

    ChartDescriptor::new(
        LayoutOptions::titled("Gradient descent on f(x, y) = x² + 3y²")
            .with_height(DEFAULT_CHART_HEIGHT)
            .with_axes(Axis::titled("x"), Axis::titled("y"))
            .with_annotation(Annotation::paper("step size η = 0.1", 0.02, 0.98)),
    )
    .with_trace(
        ContourTrace::new(xs, ys, z)
            .with_colorscale(NamedColorScale::Blues)
            .with_levels(20, true)
            .with_name("f(x, y)"),
    )
    .with_trace(
        ScatterTrace::new(path_x, path_y, ScatterMode::LinesMarkers)
            .with_line(LineStyle::solid(ORANGE, 2.0))
            .with_marker(MarkerStyle::new(ORANGE, 6.0))
            .with_name("x − η∇f"),
    )
}

pub(super) fn tangent_plane() -> ChartDescriptor {
    let (x0, y0) = (1.0, 1.0);
    let paraboloid = |x: f64, y: f64| x * x + y * y;
    let z0 = paraboloid(x0, y0);
    let (fx, fy) = (2.0 * x0, 2.0 * y0);

    let xs = linspace(-2.0, 2.0, 41);
    let ys = linspace(-2.0, 2.0, 41);
    let z = evaluate_grid(&xs, &ys, paraboloid);

    let plane_xs = linspace(0.0, 2.0, 15);
    let plane_ys = linspace(0.0, 2.0, 15);
    let plane_z = evaluate_grid(&plane_xs, &plane_ys, |x, y| {
        z0 + fx * (x - x0) + fy * (y - y0)
    });

    ChartDescriptor::new(
        LayoutOptions::titled("Tangent plane to z = x² + y² at (1, 1, 2)")
            .with_height(DEFAULT_CHART_HEIGHT)
            .with_scene("scene", xyz_scene()),
    )
    .with_trace(
        SurfaceTrace::new(xs, ys, z)
            .with_colorscale(NamedColorScale::Blues)
            .with_opacity(0.85)
            .with_name("z = x² + y²"),
    )
    .with_trace(
        SurfaceTrace::new(plane_xs, plane_ys, plane_z)
            .with_colorscale(NamedColorScale::Reds)
            .with_opacity(0.6)
            .with_showscale(false)
            .with_name("z = 2 + 2(x − 1) + 2(y − 1)"),
    )
    .with_trace(point3d(x0, y0, z0, RED, "(1, 1, 2)"))
}

/// Two panels: the x-slice with its ∂f/∂x tangent, the y-slice with ∂f/∂y.
pub(super) fn partial_derivative_slices() -> ChartDescriptor {
    let (x0, y0) = (1.0, 0.5);
    let f0 = wave(x0, y0);
    let (fx, fy) = wave_gradient(x0, y0);

    let xs = linspace(-PI, PI, 40);
    let ys = linspace(-PI, PI, 40);
    let z = evaluate_grid(&xs, &ys, wave);

    let slice_t = linspace(-PI, PI, 120);
    let x_slice_z = slice_t.iter().map(|&x| wave(x, y0)).collect();
    let y_slice_z = slice_t.iter().map(|&y| wave(x0, y)).collect();

    let tangent_t = linspace(-0.8, 0.8, 2);
    let x_tangent_x: Vec<f64> = tangent_t.iter().map(|dt| x0 + dt).collect();
    let x_tangent_z = tangent_t.iter().map(|dt| f0 + fx * dt).collect();
    let y_tangent_y: Vec<f64> = tangent_t.iter().map(|dt| y0 + dt).collect();
    let y_tangent_z = tangent_t.iter().map(|dt| f0 + fy * dt).collect();

    let left = Domain::new([0.0, 0.48], [0.0, 1.0]);
    let right = Domain::new([0.52, 1.0], [0.0, 1.0]);
    let tangent_line = LineStyle::solid(RED, 6.0).with_dash(LineDash::Dash);

    ChartDescriptor::new(
        LayoutOptions::titled("Partial derivatives of f(x, y) = sin(x) · cos(y)")
            .with_height(520)
            .with_showlegend(false)
            .with_scene("scene", xyz_scene().with_domain(left))
            .with_scene("scene2", xyz_scene().with_domain(right))
            .with_annotation(Annotation::paper(
                format!("∂f/∂x at (1, 0.5) = {fx:.3}"),
                0.24,
                1.0,
            ))
            .with_annotation(Annotation::paper(
                format!("∂f/∂y at (1, 0.5) = {fy:.3}"),
                0.76,
                1.0,
            )),
    )
    .with_trace(
        SurfaceTrace::new(xs.clone(), ys.clone(), z.clone())
            .with_colorscale(NamedColorScale::Viridis)
            .with_opacity(0.7)
            .with_showscale(false)
            .with_scene("scene"),
    )
    .with_trace(
        Scatter3dTrace::new(
            slice_t.clone(),
            vec![y0; slice_t.len()],
            x_slice_z,
            ScatterMode::Lines,
        )
        .with_line(LineStyle::solid(ORANGE, 5.0))
        .with_name("y = 0.5")
        .with_scene("scene"),
    )
    .with_trace(
        Scatter3dTrace::new(
            x_tangent_x,
            vec![y0; tangent_t.len()],
            x_tangent_z,
            ScatterMode::Lines,
        )
        .with_line(tangent_line)
        .with_name("slope ∂f/∂x")
        .with_scene("scene"),
    )
    .with_trace(
        SurfaceTrace::new(xs, ys, z)
            .with_colorscale(NamedColorScale::Viridis)
            .with_opacity(0.7)
            .with_showscale(false)
            .with_scene("scene2"),
    )
    .with_trace(
        Scatter3dTrace::new(
            vec![x0; slice_t.len()],
            slice_t,
            y_slice_z,
            ScatterMode::Lines,
        )
        .with_line(LineStyle::solid(PURPLE, 5.0))
        .with_name("x = 1")
        .with_scene("scene2"),
    )
    .with_trace(
        Scatter3dTrace::new(
            vec![x0; tangent_t.len()],
            y_tangent_y,
            y_tangent_z,
            ScatterMode::Lines,
        )
        .with_line(tangent_line)
        .with_name("slope ∂f/∂y")
        .with_scene("scene2"),
    )
}

/// Midpoint Riemann sum of `4 − x²/2 − y²/2` over `[0, 2]²` as prisms.
pub(super) fn double_integral_boxes() -> ChartDescriptor {
    const CELLS: usize = 4;
    const EXACT: f64 = 16.0 - 16.0 / 3.0;
    let height = |x: f64, y: f64| 4.0 - 0.5 * x * x - 0.5 * y * y;

    let edges = linspace(0.0, 2.0, CELLS + 1);
    let cell_area = (edges[1] - edges[0]).powi(2);
    let mut boxes = Vec::with_capacity(CELLS * CELLS);
    let mut riemann_sum = 0.0;
    for row in edges.windows(2) {
        for column in edges.windows(2) {
            let mid_x = 0.5 * (column[0] + column[1]);
            let mid_y = 0.5 * (row[0] + row[1]);
            let top = height(mid_x, mid_y);
            riemann_sum += top * cell_area;
            boxes.push(
                Mesh3dTrace::from_box(box_mesh(column[0], column[1], row[0], row[1], 0.0, top))
                    .with_color(BLUE, 0.55)
                    .with_showlegend(false),
            );
        }
    }

    let xs = linspace(0.0, 2.0, 30);
    let ys = linspace(0.0, 2.0, 30);
    let z = evaluate_grid(&xs, &ys, height);

    ChartDescriptor::new(
        LayoutOptions::titled("Double integral as a midpoint Riemann sum")
            .with_height(DEFAULT_CHART_HEIGHT)
            .with_scene("scene", xyz_scene())
            .with_annotation(Annotation::paper(
                format!("Σ f(mᵢⱼ) ΔA = {riemann_sum:.4}   exact = {:.4}", EXACT),
                0.5,
                0.95,
            )),
    )
    .with_trace(
        SurfaceTrace::new(xs, ys, z)
            .with_colorscale(NamedColorScale::YlOrRd)
            .with_opacity(0.45)
            .with_showscale(false)
            .with_name("f(x, y)"),
    )
    .with_traces(boxes)
}

/// Extrema of `xy` on the unit circle, where ∇f is parallel to ∇g.
pub(super) fn lagrange_constraint() -> ChartDescriptor {
    let xs = linspace(-1.5, 1.5, 61);
    let ys = linspace(-1.5, 1.5, 61);
    let z = evaluate_grid(&xs, &ys, |x, y| x * y);

    let theta = linspace(0.0, TAU, 200);
    let circle_x = theta.iter().map(|t| t.cos()).collect();
    let circle_y = theta.iter().map(|t| t.sin()).collect();

    ChartDescriptor::new(
        LayoutOptions::titled("Maximize f(x, y) = xy subject to x² + y² = 1")
            .with_height(DEFAULT_CHART_HEIGHT)
            .with_axes(
                Axis::titled("x").with_range(-1.5, 1.5),
                Axis::titled("y").with_range(-1.5, 1.5),
            )
            .with_annotation(Annotation::paper(
                "∇f = λ∇g at (1/√2, 1/√2) and (−1/√2, −1/√2), f = 1/2",
                0.5,
                1.02,
            )),
    )
    .with_trace(
        ContourTrace::new(xs, ys, z)
            .with_colorscale(NamedColorScale::RdBu)
            .with_levels(24, false)
            .with_name("f(x, y) = xy"),
    )
    .with_trace(
        ScatterTrace::new(circle_x, circle_y, ScatterMode::Lines)
            .with_line(LineStyle::solid(Color::rgb(0.0, 0.0, 0.0), 3.0))
            .with_name("g(x, y) = 1"),
    )
    .with_trace(
        ScatterTrace::new(
            vec![FRAC_1_SQRT_2, -FRAC_1_SQRT_2],
            vec![FRAC_1_SQRT_2, -FRAC_1_SQRT_2],
            ScatterMode::Markers,
        )
        .with_marker(MarkerStyle::new(GREEN, 12.0))
        .with_name("maxima"),
    )
}
