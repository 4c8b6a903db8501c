pub mod black_scholes;
pub mod grid;
pub mod mesh;
pub mod normal;

pub use black_scholes::{MIN_TIME_TO_MATURITY, OptionParams, OptionQuote, price_call};
pub use grid::{Grid, evaluate_grid, is_rectangular, linspace, meshgrid};
pub use mesh::{BoxMesh, box_mesh};
pub use normal::{standard_normal_cdf, standard_normal_pdf};
