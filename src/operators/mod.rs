//! Discrete differential operators.
//!
//! This module provides:
//! - Boundary policies for column operators (`BoundaryCondition`, `ColumnBoundaries`)
//! - Staggered finite-difference operators on vertical columns
//! - Strong and weak spectral-element operators on horizontal spaces
//! - Weighted direct stiffness summation (`weighted_dss`)
//!
//! Outputs are written into caller-provided fields; the output must not alias
//! the input. Every `apply` validates spaces and lengths before writing.

mod boundary;
mod column;
mod dss;
mod spectral;

pub use boundary::{BoundaryCondition, ColumnBoundaries, ColumnEdge};
pub use column::{
    AdvectionC2C, ColumnOperator, DivergenceC2F, DivergenceF2C, GradientC2F, GradientF2C,
    InterpolateC2F, InterpolateF2C, UpwindProductC2F,
};
pub use dss::{weighted_dss, DssSpace, DssValue};
pub use spectral::{
    Curl, CurlInput, Divergence, ElementRef, Gradient, Interpolate, Restrict, WeakCurl,
    WeakDivergence, WeakGradient,
};
