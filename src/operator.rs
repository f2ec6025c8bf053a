//! Assembly of the mimetic gradient operator.

use crate::error::OperatorError;
use crate::stencil::StencilSet;
use crate::tensor;
use crate::weights;
use log::debug;
use nalgebra::DVector;
use nalgebra_sparse::{CooMatrix, CsrMatrix};

/// Assembles the 1-D gradient matrix for a grid of `m` cells with spacing
/// `dx` from a solved stencil set.
///
/// The result has `m + 1` rows (faces) and `m + 2` columns (cell centers
/// plus the two boundary points). The first `k/2` rows carry the boundary
/// stencils, the last `k/2` rows their reversed, negated mirror images, and
/// every remaining row the interior stencil; all coefficients are divided
/// by `dx`.
///
/// Fails with [`OperatorError::GridTooSmall`] if `m < 2k`, the smallest
/// grid on which the two boundary regions do not overlap.
///
/// # Panics
///
/// Panics if `dx` is not strictly positive and finite.
pub fn assemble_1d(
    stencils: &StencilSet,
    dx: f64,
    m: usize,
    axis: &'static str,
) -> Result<CsrMatrix<f64>, OperatorError> {
    let k = stencils.order();
    assert!(dx > 0.0 && dx.is_finite(), "cell spacing must be positive");
    if m < 2 * k {
        return Err(OperatorError::GridTooSmall {
            k,
            axis,
            cells: m,
            min: 2 * k,
        });
    }

    let half = k / 2;
    let mut coo = CooMatrix::new(m + 1, m + 2);

    // Boundary rows and their mirror images at the opposite end. Mirroring
    // reverses the column pattern and negates the coefficients, since the
    // derivative changes sign under reflection.
    for (row, coeffs) in stencils.boundary().iter().enumerate() {
        for (col, &c) in coeffs.iter().enumerate() {
            coo.push(row, col, c / dx);
            coo.push(m - row, m + 1 - col, -c / dx);
        }
    }

    // Interior rows: face i reaches the k cell centers straddling it,
    // columns i - k/2 + 1 through i + k/2.
    for i in half..=m - half {
        for (u, &c) in stencils.interior().iter().enumerate() {
            coo.push(i, i - half + 1 + u, c / dx);
        }
    }

    Ok(CsrMatrix::from(&coo))
}

/// A mimetic gradient operator on a 1-, 2- or 3-dimensional uniform grid.
///
/// The operator owns its sparse matrix and the quadrature weight vector and
/// is immutable after construction. See the crate-level documentation for
/// the grid and flattening conventions that fix its shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    order: usize,
    matrix: CsrMatrix<f64>,
    weights: DVector<f64>,
}

impl Gradient {
    /// Constructs the 1-D gradient of order `k` on `m` cells with spacing
    /// `dx`. The result maps `m + 2` scalar unknowns to `m + 1` faces.
    pub fn new(k: usize, m: usize, dx: f64) -> Result<Self, OperatorError> {
        let stencils = StencilSet::solve(k)?;
        let weights = weights::compute(k)?;
        let matrix = assemble_1d(&stencils, dx, m, "x")?;
        debug!(
            "assembled 1-D mimetic gradient: order {}, shape {}x{}, {} nonzeros",
            k,
            matrix.nrows(),
            matrix.ncols(),
            matrix.nnz()
        );
        Ok(Self {
            order: k,
            matrix,
            weights,
        })
    }

    /// Constructs the 2-D gradient of order `k` on an `m × n` cell grid
    /// with spacings `dx`, `dy`.
    ///
    /// Rows are direction-major: the `(m + 1) n` x-derivative rows first,
    /// then the `m (n + 1)` y-derivative rows.
    pub fn new_2d(k: usize, m: usize, n: usize, dx: f64, dy: f64) -> Result<Self, OperatorError> {
        let stencils = StencilSet::solve(k)?;
        let weights = weights::compute(k)?;
        let gx = assemble_1d(&stencils, dx, m, "x")?;
        let gy = assemble_1d(&stencils, dy, n, "y")?;
        let matrix = tensor::extend_to_2d(&gx, &gy, m, n)?;
        debug!(
            "assembled 2-D mimetic gradient: order {}, shape {}x{}, {} nonzeros",
            k,
            matrix.nrows(),
            matrix.ncols(),
            matrix.nnz()
        );
        Ok(Self {
            order: k,
            matrix,
            weights,
        })
    }

    /// Constructs the 3-D gradient of order `k` on an `m × n × o` cell grid
    /// with spacings `dx`, `dy`, `dz`.
    ///
    /// Rows are direction-major: x-derivative rows, then y, then z.
    #[allow(clippy::too_many_arguments)]
    pub fn new_3d(
        k: usize,
        m: usize,
        n: usize,
        o: usize,
        dx: f64,
        dy: f64,
        dz: f64,
    ) -> Result<Self, OperatorError> {
        let stencils = StencilSet::solve(k)?;
        let weights = weights::compute(k)?;
        let gx = assemble_1d(&stencils, dx, m, "x")?;
        let gy = assemble_1d(&stencils, dy, n, "y")?;
        let gz = assemble_1d(&stencils, dz, o, "z")?;
        let matrix = tensor::extend_to_3d(&gx, &gy, &gz, m, n, o)?;
        debug!(
            "assembled 3-D mimetic gradient: order {}, shape {}x{}, {} nonzeros",
            k,
            matrix.nrows(),
            matrix.ncols(),
            matrix.nnz()
        );
        Ok(Self {
            order: k,
            matrix,
            weights,
        })
    }

    /// The order of accuracy the operator was constructed with.
    pub fn order(&self) -> usize {
        self.order
    }

    /// The boundary quadrature weights associated with the operator.
    ///
    /// Informational only: companion operators (divergence, Laplacian) must
    /// be built with the same weights for the pair to satisfy the discrete
    /// summation-by-parts identity. See [`crate::weights`] for the exact
    /// relationship and [`crate::weights::extend`] for the full per-face
    /// vector.
    pub fn weights(&self) -> &DVector<f64> {
        &self.weights
    }

    /// The underlying sparse matrix.
    pub fn matrix(&self) -> &CsrMatrix<f64> {
        &self.matrix
    }

    /// Consumes the operator, returning its sparse matrix.
    pub fn into_matrix(self) -> CsrMatrix<f64> {
        self.matrix
    }

    /// Number of rows (gradient/flux locations).
    pub fn nrows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of columns (scalar field unknowns).
    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }

    /// Applies the operator to a flattened scalar field.
    ///
    /// # Panics
    ///
    /// Panics if `field.len() != self.ncols()`.
    pub fn apply(&self, field: &DVector<f64>) -> DVector<f64> {
        assert_eq!(
            field.len(),
            self.ncols(),
            "field length must match the number of scalar unknowns"
        );
        &self.matrix * field
    }
}
