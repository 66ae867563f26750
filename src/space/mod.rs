//! Discrete function spaces.
//!
//! A space fixes where the unknowns of a [`Field`](crate::field::Field) live
//! and precomputes the [`LocalGeometry1D`](crate::geometry::LocalGeometry1D) or
//! [`LocalGeometry2D`](crate::geometry::LocalGeometry2D) of every node once at
//! construction. Spaces are cheap to clone: the geometry is shared behind an
//! `Arc`, so fields carry their space by value.
//!
//! - [`SpectralElementSpace2D`]: GLL nodes on every quad of a [`Topology2D`](crate::topology::Topology2D)
//! - [`FiniteDifferenceSpace`]: cell centers or cell faces of a vertical column
//! - [`ExtrudedSpace`]: a horizontal spectral space times a vertical column

mod extruded;
mod finite_difference;
mod spectral;

pub use extruded::ExtrudedSpace;
pub use finite_difference::{ColumnGeometry, FiniteDifferenceSpace, Staggering};
pub use spectral::SpectralElementSpace2D;

/// Behaviour shared by every discrete space.
pub trait Space: Clone + std::fmt::Debug {
    /// Number of nodes (degrees of freedom per scalar component).
    fn n_nodes(&self) -> usize;

    /// Whether a field on `other` can be used wherever a field on `self` is
    /// expected: same node layout and the same geometry.
    fn is_compatible(&self, other: &Self) -> bool;

    /// Quadrature-weighted Jacobian of `node`.
    fn wj(&self, node: usize) -> f64;

    /// Short description used in error messages.
    fn describe(&self) -> String;
}
