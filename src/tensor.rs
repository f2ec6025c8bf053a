//! Tensor-product extension of 1-D operators to 2-D and 3-D.
//!
//! A multi-dimensional gradient is built from 1-D operators by Kronecker
//! products with *interior selectors* along the orthogonal axes: a selector
//! `Ĩ_q` is the `q × (q + 2)` identity-like matrix that keeps the `q`
//! interior cells of an axis and drops its two boundary columns. With the
//! x-major flattening described in the crate documentation, the 2-D blocks
//! are
//!
//! ```text
//! Dx = Gx ⊗ Ĩ_n,    Dy = Ĩ_m ⊗ Gy
//! ```
//!
//! stacked vertically in direction-major order, and analogously with a
//! third factor in 3-D.

use crate::error::OperatorError;
use nalgebra_sparse::{CooMatrix, CsrMatrix};

/// Sparse Kronecker product `a ⊗ b`.
pub fn kron(a: &CsrMatrix<f64>, b: &CsrMatrix<f64>) -> CsrMatrix<f64> {
    let mut coo = CooMatrix::new(a.nrows() * b.nrows(), a.ncols() * b.ncols());
    for (ia, ja, va) in a.triplet_iter() {
        for (ib, jb, vb) in b.triplet_iter() {
            coo.push(ia * b.nrows() + ib, ja * b.ncols() + jb, va * vb);
        }
    }
    CsrMatrix::from(&coo)
}

/// The `q × (q + 2)` interior selector `Ĩ_q`: keeps the `q` interior cells
/// of an axis, dropping the two boundary columns.
pub fn interior_selector(q: usize) -> CsrMatrix<f64> {
    let mut coo = CooMatrix::new(q, q + 2);
    for i in 0..q {
        coo.push(i, i + 1, 1.0);
    }
    CsrMatrix::from(&coo)
}

/// Stacks matrices with identical column counts vertically.
///
/// # Panics
///
/// Panics if the column counts disagree.
pub fn vstack(blocks: &[&CsrMatrix<f64>]) -> CsrMatrix<f64> {
    let ncols = blocks.first().map_or(0, |b| b.ncols());
    assert!(
        blocks.iter().all(|b| b.ncols() == ncols),
        "stacked blocks must have identical column counts"
    );
    let nrows = blocks.iter().map(|b| b.nrows()).sum();

    let mut coo = CooMatrix::new(nrows, ncols);
    let mut row_offset = 0;
    for block in blocks {
        for (i, j, v) in block.triplet_iter() {
            coo.push(row_offset + i, j, *v);
        }
        row_offset += block.nrows();
    }
    CsrMatrix::from(&coo)
}

/// Checks that a 1-D operator has the `(cells + 1) × (cells + 2)` shape
/// implied by the per-axis cell count.
fn expect_1d_shape(
    g: &CsrMatrix<f64>,
    cells: usize,
    axis: &'static str,
) -> Result<(), OperatorError> {
    if g.nrows() != cells + 1 || g.ncols() != cells + 2 {
        return Err(OperatorError::DimensionMismatch {
            axis,
            cells,
            expected_rows: cells + 1,
            expected_cols: cells + 2,
            rows: g.nrows(),
            cols: g.ncols(),
        });
    }
    Ok(())
}

/// Combines 1-D operators on an `m × n` cell grid into the 2-D gradient.
///
/// The result has `(m + 1) n + m (n + 1)` rows (x-derivative rows first,
/// then y) and `(m + 2)(n + 2)` columns. Fails with
/// [`OperatorError::DimensionMismatch`] if either operator does not match
/// its axis cell count.
pub fn extend_to_2d(
    gx: &CsrMatrix<f64>,
    gy: &CsrMatrix<f64>,
    m: usize,
    n: usize,
) -> Result<CsrMatrix<f64>, OperatorError> {
    expect_1d_shape(gx, m, "x")?;
    expect_1d_shape(gy, n, "y")?;

    let dx = kron(gx, &interior_selector(n));
    let dy = kron(&interior_selector(m), gy);
    Ok(vstack(&[&dx, &dy]))
}

/// Combines 1-D operators on an `m × n × o` cell grid into the 3-D
/// gradient.
///
/// The result has `(m + 1) n o + m (n + 1) o + m n (o + 1)` rows
/// (direction-major) and `(m + 2)(n + 2)(o + 2)` columns.
pub fn extend_to_3d(
    gx: &CsrMatrix<f64>,
    gy: &CsrMatrix<f64>,
    gz: &CsrMatrix<f64>,
    m: usize,
    n: usize,
    o: usize,
) -> Result<CsrMatrix<f64>, OperatorError> {
    expect_1d_shape(gx, m, "x")?;
    expect_1d_shape(gy, n, "y")?;
    expect_1d_shape(gz, o, "z")?;

    let sel_m = interior_selector(m);
    let sel_n = interior_selector(n);
    let sel_o = interior_selector(o);

    let dx = kron(gx, &kron(&sel_n, &sel_o));
    let dy = kron(&sel_m, &kron(gy, &sel_o));
    let dz = kron(&sel_m, &kron(&sel_n, gz));
    Ok(vstack(&[&dx, &dy, &dz]))
}
