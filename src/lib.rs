//! Mimetic finite difference operators for structured grids.
//!
//! This crate constructs discrete gradient operators that approximate the
//! continuum gradient on 1-, 2- and 3-dimensional uniform staggered grids
//! while preserving a discrete analogue of the divergence theorem
//! (summation-by-parts) together with a companion quadrature weight vector.
//! The operators are building blocks for mimetic discretizations of PDEs;
//! this crate deliberately stops at the operator itself — linear solvers,
//! boundary-condition enforcement and other differential operators are
//! expected to live in the consuming application.
//!
//! # Grid conventions
//!
//! A 1-D grid with `m` cells of width `dx` carries scalar unknowns at the
//! `m` cell centers *and* at the two boundary points, i.e. `m + 2` values at
//! positions
//!
//! ```text
//! 0, dx/2, 3dx/2, ..., (m - 1/2) dx, m dx
//! ```
//!
//! Gradients are produced at the `m + 1` cell faces `0, dx, ..., m dx`, so
//! the 1-D operator has shape `(m + 1) × (m + 2)`.
//!
//! In 2-D and 3-D the scalar field retains its boundary layer, giving
//! `(m + 2)(n + 2)` respectively `(m + 2)(n + 2)(o + 2)` unknowns, flattened
//! x-major with the last axis fastest (2-D index `ix * (n + 2) + iy`). The
//! combined operator stacks the per-axis blocks direction-major: all
//! x-derivative rows first, then y, then z, so callers can slice the result
//! back into directional components.
//!
//! # Example
//!
//! ```
//! use mimetic::Gradient;
//!
//! // Fourth-order 1-D gradient on 10 cells of width 0.1.
//! let grad = Gradient::new(4, 10, 0.1).unwrap();
//! assert_eq!(grad.nrows(), 11);
//! assert_eq!(grad.ncols(), 12);
//! // Quadrature weights for pairing with a divergence operator.
//! assert_eq!(grad.weights().len(), 2);
//! ```

pub mod error;
pub mod operator;
pub mod stencil;
pub mod tensor;
pub mod weights;

pub use error::OperatorError;
pub use operator::Gradient;
pub use stencil::StencilSet;

pub extern crate nalgebra;
pub extern crate nalgebra_sparse;
