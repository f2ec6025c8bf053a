//! Library-wide error type.

use thiserror::Error;

/// Errors reported while constructing a mimetic operator.
///
/// All failures are detected eagerly at construction time; an operator is
/// either fully valid or not constructed at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum OperatorError {
    /// The order of accuracy is not an even integer in the supported range.
    #[error("invalid order of accuracy k = {k}: must be an even integer with 2 <= k <= {max}")]
    InvalidOrder {
        /// The requested order.
        k: usize,
        /// The largest supported order.
        max: usize,
    },

    /// The grid has too few cells to fit non-overlapping boundary stencils.
    #[error("grid too small: {cells} cells along '{axis}' cannot fit order-{k} boundary stencils (need at least {min})")]
    GridTooSmall {
        /// The order of accuracy requested.
        k: usize,
        /// The axis label ("x", "y" or "z").
        axis: &'static str,
        /// The number of cells supplied.
        cells: usize,
        /// The minimum number of cells required for this order.
        min: usize,
    },

    /// A 1-D operator handed to the tensor-product extension does not have
    /// the shape implied by the per-axis cell count.
    #[error("dimension mismatch along '{axis}': expected a {expected_rows} x {expected_cols} operator for {cells} cells, got {rows} x {cols}")]
    DimensionMismatch {
        /// The axis label ("x", "y" or "z").
        axis: &'static str,
        /// The number of cells requested along this axis.
        cells: usize,
        /// Expected number of rows, `cells + 1`.
        expected_rows: usize,
        /// Expected number of columns, `cells + 2`.
        expected_cols: usize,
        /// Actual number of rows.
        rows: usize,
        /// Actual number of columns.
        cols: usize,
    },
}
