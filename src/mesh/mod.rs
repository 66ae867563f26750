//! Mesh representation.
//!
//! Provides discretizations of domains into elements:
//! - 1D interval meshes (uniform or stretched faces)
//! - 2D logically rectangular quadrilateral meshes (equispaced or explicit
//!   tensor-product vertex grids, optionally warped)

mod interval;
mod rectilinear;
mod stretching;

pub use interval::IntervalMesh;
pub use rectilinear::RectilinearMesh;
pub use stretching::Stretching;
