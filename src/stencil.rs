//! Finite-difference stencil generation for the mimetic gradient.
//!
//! The interior stencil is the unique staggered central difference of a
//! given even order `k`, obtained from the Vandermonde moment system on the
//! symmetric half-integer offsets. Near a boundary the symmetric offsets are
//! not available, so each of the `k/2` faces closest to the boundary gets an
//! asymmetric stencil solved from the same moment system restricted to the
//! one-sided offsets (the boundary point plus the first `k` cell centers).
//!
//! Stencils depend only on the order, never on grid size or spacing; the
//! coefficients are in units of `1/dx` and the spacing is factored in at
//! assembly time.

use crate::error::OperatorError;
use nalgebra::{DMatrix, DVector};

/// The largest supported order of accuracy.
pub const MAX_ORDER: usize = 8;

/// Returns an error unless `k` is an even integer with `2 <= k <= MAX_ORDER`.
pub(crate) fn check_order(k: usize) -> Result<(), OperatorError> {
    if k < 2 || k % 2 != 0 || k > MAX_ORDER {
        return Err(OperatorError::InvalidOrder { k, max: MAX_ORDER });
    }
    Ok(())
}

/// Interior and boundary stencil coefficients for one order of accuracy.
///
/// The same set is reused for every interior row of a 1-D operator and,
/// mirrored, for the opposite boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct StencilSet {
    order: usize,
    interior: DVector<f64>,
    boundary: Vec<DVector<f64>>,
}

impl StencilSet {
    /// Solves the moment systems for order `k`.
    ///
    /// Fails with [`OperatorError::InvalidOrder`] if `k` is odd, smaller
    /// than two or larger than [`MAX_ORDER`].
    pub fn solve(k: usize) -> Result<Self, OperatorError> {
        check_order(k)?;

        // Symmetric half-integer offsets -(k-1)/2, ..., (k-1)/2 around a face.
        let offsets: Vec<f64> = (0..k).map(|u| u as f64 - (k as f64 - 1.0) / 2.0).collect();
        let interior = solve_moment_system(&offsets, 0.0);

        // One-sided offsets: the boundary point and the first k cell centers,
        // in units of dx with the boundary at zero.
        let mut one_sided = Vec::with_capacity(k + 1);
        one_sided.push(0.0);
        one_sided.extend((1..=k).map(|i| i as f64 - 0.5));

        let boundary = (0..k / 2)
            .map(|j| solve_moment_system(&one_sided, j as f64))
            .collect();

        Ok(Self {
            order: k,
            interior,
            boundary,
        })
    }

    /// The order of accuracy these stencils were solved for.
    pub fn order(&self) -> usize {
        self.order
    }

    /// The `k`-point interior stencil, value-antisymmetric about the face.
    pub fn interior(&self) -> &DVector<f64> {
        &self.interior
    }

    /// The `k/2` boundary stencils, ordered from the boundary inward.
    ///
    /// Row `j` approximates the derivative at face `j` from the boundary
    /// point and the first `k` cell centers, so each row has `k + 1`
    /// coefficients. The rows at the opposite boundary are the reversed,
    /// negated copies of these.
    pub fn boundary(&self) -> &[DVector<f64>] {
        &self.boundary
    }
}

/// Solves for coefficients `c` such that `sum_i c_i p(x_i) = p'(eval)` for
/// every polynomial `p` of degree below `nodes.len()`.
///
/// The system matrix is a Vandermonde matrix in the node positions, which is
/// nonsingular for distinct nodes, so the solution exists and is unique.
fn solve_moment_system(nodes: &[f64], eval: f64) -> DVector<f64> {
    let n = nodes.len();
    let vandermonde = DMatrix::from_fn(n, n, |q, i| nodes[i].powi(q as i32));
    let rhs = DVector::from_fn(n, |q, _| {
        if q == 0 {
            0.0
        } else {
            q as f64 * eval.powi(q as i32 - 1)
        }
    });
    vandermonde
        .lu()
        .solve(&rhs)
        .expect("Vandermonde moment system must be nonsingular for distinct nodes")
}
