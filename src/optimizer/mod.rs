//! Portfolio optimization.
//!
//! - [`PortfolioOptimizer`] — Prices every vessel-cargo pair and picks the
//!   profit-maximizing one-to-one assignment
//! - [`max_weight_matching`] — Exact bipartite matching (Kuhn, 1955), O(n³)
//! - [`WeightMatrix`] — Dense rectangular weight matrix with excluded edges

mod hungarian;
mod matrix;
mod portfolio;

pub use hungarian::max_weight_matching;
pub use matrix::WeightMatrix;
pub use portfolio::PortfolioOptimizer;
