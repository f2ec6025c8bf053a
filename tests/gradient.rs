//! Property tests for the mimetic gradient operators.

use itertools::izip;
use matrixcompare::assert_scalar_eq;
use mimetic::nalgebra::DVector;
use mimetic::nalgebra_sparse::convert::serial::convert_csr_dense;
use mimetic::{tensor, weights, Gradient, OperatorError, StencilSet};
use proptest::prelude::*;

/// Scalar unknown positions of a 1-D grid: both boundary points and the
/// `m` cell centers.
fn grid_columns(m: usize, dx: f64) -> Vec<f64> {
    let mut x = Vec::with_capacity(m + 2);
    x.push(0.0);
    x.extend((1..=m).map(|i| (i as f64 - 0.5) * dx));
    x.push(m as f64 * dx);
    x
}

/// Face positions of a 1-D grid.
fn grid_faces(m: usize, dx: f64) -> Vec<f64> {
    (0..=m).map(|i| i as f64 * dx).collect()
}

fn poly(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

fn poly_deriv(coeffs: &[f64], x: f64) -> f64 {
    coeffs
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .fold(0.0, |acc, (d, c)| acc * x + d as f64 * c)
}

/// Moment-system conditioning grows with the order, so the achievable
/// floating-point exactness does too.
fn exactness_tol(k: usize) -> f64 {
    match k {
        2 => 1e-11,
        4 => 1e-10,
        6 => 1e-7,
        _ => 1e-5,
    }
}

#[test]
fn gradient_1d_is_exact_for_polynomials_up_to_order_k() {
    for k in [2, 4, 6, 8] {
        // Include the smallest admissible grid.
        for m in [2 * k, 2 * k + 5] {
            let dx = 1.0 / m as f64;
            let grad = Gradient::new(k, m, dx).unwrap();

            // Polynomial of full degree k with O(1) coefficients on [0, 1].
            let coeffs: Vec<f64> = (0..=k).map(|d| 1.0 / (d as f64 + 1.0)).collect();
            let u = DVector::from_iterator(
                m + 2,
                grid_columns(m, dx).iter().map(|&x| poly(&coeffs, x)),
            );
            let du = grad.apply(&u);

            for (face, value) in izip!(grid_faces(m, dx), du.iter()) {
                assert_scalar_eq!(
                    *value,
                    poly_deriv(&coeffs, face),
                    comp = abs,
                    tol = exactness_tol(k)
                );
            }
        }
    }
}

#[test]
fn boundary_rows_mirror_each_other() {
    for k in [2, 4, 6, 8] {
        let m = 2 * k + 3;
        let grad = Gradient::new(k, m, 1.0).unwrap();
        let dense = convert_csr_dense(grad.matrix());
        for row in 0..k / 2 {
            for col in 0..m + 2 {
                assert_scalar_eq!(
                    dense[(m - row, m + 1 - col)],
                    -dense[(row, col)],
                    comp = abs,
                    tol = 1e-12
                );
            }
        }
    }
}

#[test]
fn weights_are_positive_with_length_half_k() {
    for k in [2, 4, 6, 8] {
        let grad = Gradient::new(k, 2 * k + 1, 0.3).unwrap();
        let p = grad.weights();
        assert_eq!(p.len(), k / 2);
        assert!(p.iter().all(|&w| w > 0.0));
    }
}

#[test]
fn second_order_weight_is_the_trapezoid_correction() {
    let grad = Gradient::new(2, 8, 1.0).unwrap();
    assert_eq!(grad.weights().len(), 1);
    assert_scalar_eq!(grad.weights()[0], 0.5, comp = abs, tol = 1e-14);
}

#[test]
fn multi_d_operator_shares_the_1d_weights() {
    let g1 = Gradient::new(4, 9, 1.0).unwrap();
    let g2 = Gradient::new_2d(4, 9, 10, 1.0, 0.5).unwrap();
    assert_eq!(g1.weights(), g2.weights());
}

/// The summation-by-parts surrogate: with the extended per-face weights,
/// the weighted sum of gradient values telescopes to the boundary values,
/// `dx * P̂ᵀ (G u) = u(b) - u(a)`, exactly for polynomials of degree <= 2.
#[test]
fn weighted_gradient_satisfies_discrete_fundamental_theorem() {
    for k in [2, 4, 6, 8] {
        let m = 2 * k + 3;
        let dx = 0.25;
        let grad = Gradient::new(k, m, dx).unwrap();
        let p_hat = weights::extend(grad.weights(), m + 1);

        let coeffs = [0.7, -1.3, 0.4];
        let columns = grid_columns(m, dx);
        let u = DVector::from_iterator(m + 2, columns.iter().map(|&x| poly(&coeffs, x)));
        let du = grad.apply(&u);

        let weighted_sum: f64 = izip!(p_hat.iter(), du.iter()).map(|(w, g)| w * g).sum();
        let boundary_difference = u[m + 1] - u[0];
        assert_scalar_eq!(
            dx * weighted_sum,
            boundary_difference,
            comp = abs,
            tol = exactness_tol(k)
        );
    }
}

#[test]
fn gradient_2d_has_direction_major_shape() {
    let (k, m, n) = (2, 5, 4);
    let grad = Gradient::new_2d(k, m, n, 1.0, 1.0).unwrap();
    assert_eq!(grad.nrows(), (m + 1) * n + m * (n + 1));
    assert_eq!(grad.ncols(), (m + 2) * (n + 2));
}

#[test]
fn gradient_2d_annihilates_constant_fields() {
    let grad = Gradient::new_2d(2, 5, 4, 1.0, 1.0).unwrap();
    let constant = DVector::from_element(grad.ncols(), 3.25);
    let result = grad.apply(&constant);
    for value in result.iter() {
        assert_scalar_eq!(*value, 0.0, comp = abs, tol = 1e-12);
    }
}

#[test]
fn gradient_2d_is_exact_for_linear_fields() {
    let (k, m, n) = (2, 6, 5);
    let (dx, dy) = (0.5, 0.25);
    let grad = Gradient::new_2d(k, m, n, dx, dy).unwrap();

    // u(x, y) = 2x - 3y, flattened x-major with y fastest.
    let xs = grid_columns(m, dx);
    let ys = grid_columns(n, dy);
    let mut field = Vec::with_capacity((m + 2) * (n + 2));
    for &x in &xs {
        for &y in &ys {
            field.push(2.0 * x - 3.0 * y);
        }
    }
    let result = grad.apply(&DVector::from_vec(field));

    let num_x_rows = (m + 1) * n;
    for (row, value) in result.iter().enumerate() {
        let expected = if row < num_x_rows { 2.0 } else { -3.0 };
        assert_scalar_eq!(*value, expected, comp = abs, tol = 1e-11);
    }
}

#[test]
fn gradient_3d_has_direction_major_shape_and_annihilates_constants() {
    let (k, m, n, o) = (2, 4, 5, 6);
    let grad = Gradient::new_3d(k, m, n, o, 0.5, 0.25, 1.0).unwrap();
    assert_eq!(
        grad.nrows(),
        (m + 1) * n * o + m * (n + 1) * o + m * n * (o + 1)
    );
    assert_eq!(grad.ncols(), (m + 2) * (n + 2) * (o + 2));

    let constant = DVector::from_element(grad.ncols(), -1.5);
    for value in grad.apply(&constant).iter() {
        assert_scalar_eq!(*value, 0.0, comp = abs, tol = 1e-12);
    }
}

#[test]
fn gradient_3d_is_exact_for_linear_fields() {
    let (k, m, n, o) = (2, 4, 4, 5);
    let (dx, dy, dz) = (0.5, 0.25, 1.0);
    let grad = Gradient::new_3d(k, m, n, o, dx, dy, dz).unwrap();

    // u(x, y, z) = x + 2y - 3z, flattened x-major with z fastest.
    let xs = grid_columns(m, dx);
    let ys = grid_columns(n, dy);
    let zs = grid_columns(o, dz);
    let mut field = Vec::with_capacity((m + 2) * (n + 2) * (o + 2));
    for &x in &xs {
        for &y in &ys {
            for &z in &zs {
                field.push(x + 2.0 * y - 3.0 * z);
            }
        }
    }
    let result = grad.apply(&DVector::from_vec(field));

    let x_rows = (m + 1) * n * o;
    let y_rows = m * (n + 1) * o;
    for (row, value) in result.iter().enumerate() {
        let expected = if row < x_rows {
            1.0
        } else if row < x_rows + y_rows {
            2.0
        } else {
            -3.0
        };
        assert_scalar_eq!(*value, expected, comp = abs, tol = 1e-11);
    }
}

#[test]
fn invalid_orders_are_rejected_in_every_dimension() {
    assert!(matches!(
        Gradient::new(3, 10, 1.0),
        Err(OperatorError::InvalidOrder { .. })
    ));
    assert!(matches!(
        Gradient::new_2d(0, 10, 10, 1.0, 1.0),
        Err(OperatorError::InvalidOrder { .. })
    ));
    assert!(matches!(
        Gradient::new_3d(10, 25, 25, 25, 1.0, 1.0, 1.0),
        Err(OperatorError::InvalidOrder { .. })
    ));
}

#[test]
fn too_small_grids_are_rejected_per_axis() {
    assert!(matches!(
        Gradient::new(4, 3, 1.0),
        Err(OperatorError::GridTooSmall { .. })
    ));
    // Only the y-axis is too narrow here.
    let err = Gradient::new_2d(4, 9, 5, 1.0, 1.0).unwrap_err();
    assert!(matches!(
        err,
        OperatorError::GridTooSmall { axis: "y", cells: 5, .. }
    ));
}

#[test]
fn tensor_extension_rejects_inconsistent_axis_shapes() {
    let stencils = StencilSet::solve(2).unwrap();
    let gx = mimetic::operator::assemble_1d(&stencils, 1.0, 6, "x").unwrap();
    let gy = mimetic::operator::assemble_1d(&stencils, 1.0, 5, "y").unwrap();
    // gy was assembled for 5 cells but 7 are requested.
    assert!(matches!(
        tensor::extend_to_2d(&gx, &gy, 6, 7),
        Err(OperatorError::DimensionMismatch { axis: "y", .. })
    ));
}

proptest! {
    /// Polynomial exactness with randomized coefficients, for the orders
    /// whose moment systems are well conditioned enough for a tight
    /// tolerance.
    #[test]
    fn gradient_1d_is_exact_for_random_polynomials(
        coeffs in proptest::collection::vec(-1.0f64..1.0, 1..=5),
        k in prop_oneof![Just(2usize), Just(4usize)],
    ) {
        let m = 12;
        let dx = 1.0 / m as f64;
        let degree = coeffs.len() - 1;
        prop_assume!(degree <= k);

        let grad = Gradient::new(k, m, dx).unwrap();
        let u = DVector::from_iterator(
            m + 2,
            grid_columns(m, dx).iter().map(|&x| poly(&coeffs, x)),
        );
        let du = grad.apply(&u);

        for (face, value) in izip!(grid_faces(m, dx), du.iter()) {
            prop_assert!((value - poly_deriv(&coeffs, face)).abs() < 1e-8);
        }
    }
}
