/// Row-major 2D grid. Rows follow the y axis, columns follow the x axis.
pub type Grid = Vec<Vec<f64>>;

/// Returns `count` evenly spaced values from `start` to `end`, both inclusive.
///
/// Degenerate counts never divide by zero: `0` yields an empty vector and `1`
/// yields `[start]`.
#[must_use]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            // Pin the endpoint so accumulated rounding never drifts past `end`.
            values[count - 1] = end;
            values
        }
    }
}

/// Broadcasts `xs` and `ys` across a `ys.len() x xs.len()` domain.
///
/// `grid_x[j][i] == xs[i]` and `grid_y[j][i] == ys[j]`.
#[must_use]
pub fn meshgrid(xs: &[f64], ys: &[f64]) -> (Grid, Grid) {
    let grid_x = ys.iter().map(|_| xs.to_vec()).collect();
    let grid_y = ys.iter().map(|&y| vec![y; xs.len()]).collect();
    (grid_x, grid_y)
}

/// Evaluates `f(x, y)` over the `meshgrid` layout of `xs` and `ys`.
#[must_use]
pub fn evaluate_grid<F>(xs: &[f64], ys: &[f64], f: F) -> Grid
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    #[cfg(feature = "parallel-eval")]
    {
        use rayon::prelude::*;

        ys.par_iter()
            .map(|&y| xs.iter().map(|&x| f(x, y)).collect())
            .collect()
    }

    #[cfg(not(feature = "parallel-eval"))]
    {
        ys.iter()
            .map(|&y| xs.iter().map(|&x| f(x, y)).collect())
            .collect()
    }
}

/// Returns `true` when `z` has one row per `y` and one column per `x`.
#[must_use]
pub fn is_rectangular(z: &[Vec<f64>], x_len: usize, y_len: usize) -> bool {
    z.len() == y_len && z.iter().all(|row| row.len() == x_len)
}
