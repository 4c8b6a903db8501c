use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use mathviz_charts::core::{
    BoxMesh, OptionParams, box_mesh, evaluate_grid, linspace, meshgrid, price_call,
    standard_normal_cdf,
};

#[test]
fn linspace_over_half_turn() {
    let values = linspace(0.0, PI, 300);
    assert_eq!(values.len(), 300);
    assert_eq!(values[0], 0.0);
    assert_abs_diff_eq!(values[299], PI, epsilon = 1e-9);
}

#[test]
fn meshgrid_shape_is_rows_of_y_by_columns_of_x() {
    let xs = linspace(-1.0, 1.0, 7);
    let ys = linspace(0.0, 2.0, 4);
    let (grid_x, grid_y) = meshgrid(&xs, &ys);
    assert_eq!(grid_x.len(), 4);
    assert_eq!(grid_y.len(), 4);
    assert!(grid_x.iter().all(|row| row.len() == 7 && row == &xs));
    for (row, &y) in grid_y.iter().zip(&ys) {
        assert!(row.iter().all(|&value| value == y));
    }
}

#[test]
fn evaluate_grid_agrees_with_meshgrid() {
    let xs = linspace(-2.0, 2.0, 5);
    let ys = linspace(-1.0, 1.0, 3);
    let (grid_x, grid_y) = meshgrid(&xs, &ys);
    let z = evaluate_grid(&xs, &ys, |x, y| x * x - y);
    for j in 0..ys.len() {
        for i in 0..xs.len() {
            assert_eq!(z[j][i], grid_x[j][i] * grid_x[j][i] - grid_y[j][i]);
        }
    }
}

#[test]
fn normal_cdf_is_symmetric_around_zero() {
    for x in [0.1, 0.5, 1.0, 2.5, 4.0] {
        assert_abs_diff_eq!(
            standard_normal_cdf(x) + standard_normal_cdf(-x),
            1.0,
            epsilon = 1e-12
        );
    }
}

#[test]
fn box_mesh_spans_requested_bounds() {
    let mesh = box_mesh(0.5, 1.0, 1.5, 2.0, 0.0, 3.25);
    assert_eq!(mesh.vertex_count(), BoxMesh::VERTEX_COUNT);
    assert_eq!(mesh.face_count(), BoxMesh::FACE_COUNT);
    let max_z = mesh.z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_x = mesh.x.iter().copied().fold(f64::INFINITY, f64::min);
    assert_eq!(max_z, 3.25);
    assert_eq!(min_x, 0.5);
}

#[test]
fn at_the_money_delta_tends_to_one_half_as_time_vanishes() {
    for time in [1e-5, 1e-6, 0.0] {
        let quote = price_call(OptionParams::new(100.0, 100.0, 0.05, 0.2, time));
        assert_abs_diff_eq!(quote.delta, 0.5, epsilon = 1e-3);
    }
}

#[test]
fn price_tends_to_intrinsic_value_as_time_vanishes() {
    for spot in [80.0, 95.0, 100.0, 105.0, 120.0] {
        let quote = price_call(OptionParams::new(spot, 100.0, 0.05, 0.2, 0.0));
        let intrinsic = f64::max(spot - 100.0, 0.0);
        assert_abs_diff_eq!(quote.price, intrinsic, epsilon = 1e-2);
    }
}

#[test]
fn deep_in_the_money_delta_is_one() {
    let quote = price_call(OptionParams::new(200.0, 100.0, 0.05, 0.2, 0.1));
    assert_abs_diff_eq!(quote.delta, 1.0, epsilon = 1e-6);
    assert!(quote.gamma >= 0.0);
}
