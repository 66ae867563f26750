//! Polynomial evaluation and quadrature.
//!
//! This module provides:
//! - 1D Legendre polynomials and their derivatives
//! - Gauss-Lobatto-Legendre nodes, weights, differentiation and
//!   interpolation matrices used by spectral-element spaces

mod gll;
mod legendre;

pub use gll::GllQuadrature;
pub use legendre::{legendre, legendre_and_derivative};
