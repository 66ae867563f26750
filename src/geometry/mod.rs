//! Local geometry and vector representations.
//!
//! This module provides:
//! - Per-node geometric factors for 1D and 2D spaces (`LocalGeometry1D`,
//!   `LocalGeometry2D`)
//! - Physical, covariant and contravariant vector types with conversions
//!   through the metric tensors

mod local;
mod vectors;

pub use local::{LocalGeometry1D, LocalGeometry2D};
pub use vectors::{
    Contravariant12, Contravariant3, Covariant12, Covariant3, HorizontalVector, UVVector,
    VerticalVector, WVector,
};
