//! Quadrature weights paired with the mimetic gradient.
//!
//! The weight vector `P` holds the boundary-corrected quadrature weights on
//! the faces nearest a boundary (mirrored at the far end, with unit weight
//! everywhere else). It is metadata: it never enters the operator's
//! numerical output, but a companion divergence operator must use the same
//! weights for the pair to satisfy the discrete summation-by-parts identity.
//!
//! The weights are the Gregory end corrections of depth `k/2`: writing
//! `a_j = p_j - 1` for the faces `j = 0, ..., k/2 - 1`, they solve the
//! Euler–Maclaurin boundary moment system
//!
//! ```text
//! sum_j a_j j^q = c_q,   q = 0, ..., k/2 - 1
//! ```
//!
//! with `c_0 = -1/2`, `c_q = B_{q+1} / (q + 1)` for odd `q` (Bernoulli
//! numbers) and `c_q = 0` for even `q >= 2`. With these corrections the
//! face quadrature satisfies, exactly, the discrete fundamental theorem of
//! calculus
//!
//! ```text
//! dx * sum_i P̂_i (G u)_i = u(b) - u(a)
//! ```
//!
//! for every polynomial `u` of degree at most two, where `P̂` is the
//! extended per-face vector produced by [`extend`].

use crate::error::OperatorError;
use crate::stencil::check_order;
use nalgebra::{DMatrix, DVector};

/// Bernoulli numbers B_2, B_4, B_6, B_8.
const BERNOULLI: [f64; 4] = [1.0 / 6.0, -1.0 / 30.0, 1.0 / 42.0, -1.0 / 30.0];

/// Computes the `k/2` boundary quadrature weights for order `k`.
///
/// The weights are strictly positive for every supported order. Fails with
/// [`OperatorError::InvalidOrder`] for the same inputs as stencil solving.
pub fn compute(k: usize) -> Result<DVector<f64>, OperatorError> {
    check_order(k)?;
    let r = k / 2;

    let vandermonde = DMatrix::from_fn(r, r, |q, j| (j as f64).powi(q as i32));
    let rhs = DVector::from_fn(r, |q, _| match q {
        0 => -0.5,
        q if q % 2 == 1 => BERNOULLI[(q - 1) / 2] / (q as f64 + 1.0),
        _ => 0.0,
    });
    let corrections = vandermonde
        .lu()
        .solve(&rhs)
        .expect("Vandermonde moment system must be nonsingular for distinct nodes");

    Ok(corrections.map(|a| 1.0 + a))
}

/// Extends the boundary weights to the full per-face diagonal of a 1-D
/// operator with `num_faces` rows: `P` at the left end, its mirror image at
/// the right end and unit weight in between.
///
/// # Panics
///
/// Panics if the two boundary runs would overlap, i.e. if
/// `num_faces < 2 * p.len()`. Operators constructed through this crate
/// always satisfy the minimum cell-count constraint, which is stricter.
pub fn extend(p: &DVector<f64>, num_faces: usize) -> DVector<f64> {
    let r = p.len();
    assert!(num_faces >= 2 * r, "boundary weight runs must not overlap");

    let mut extended = DVector::from_element(num_faces, 1.0);
    for j in 0..r {
        extended[j] = p[j];
        extended[num_faces - 1 - j] = p[j];
    }
    extended
}
