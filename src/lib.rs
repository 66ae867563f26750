//! # sem-rs
//!
//! Spectral-element and finite-difference discretizations for atmosphere-style
//! models.
//!
//! This crate provides the building blocks:
//! - Domains, meshes (uniform, stretched, warped) and their topology
//! - Gauss-Legendre-Lobatto quadrature
//! - Local metric geometry and covariant/contravariant vector components
//! - Spectral-element, staggered finite-difference and extruded spaces
//! - Fields over those spaces
//! - Strong and weak spectral operators, weighted DSS
//! - Staggered column operators with boundary conditions, and their
//!   bidiagonal matrix forms
//! - Tendencies (`RightHandSide`) and SSP-RK3 time stepping
//!
//! ```
//! use sem_rs::config::HorizontalConfig;
//! use sem_rs::field::Field;
//! use sem_rs::operators::{weighted_dss, WeakDivergence};
//! use sem_rs::geometry::UVVector;
//!
//! let space = HorizontalConfig::unit_square()
//!     .with_resolution(3, 3)
//!     .fully_periodic()
//!     .build()
//!     .unwrap();
//! let u = Field::from_fn(space, |_| UVVector::new(1.0, 2.0));
//! let mut div = WeakDivergence.evaluate(&u).unwrap();
//! weighted_dss(&mut div);
//! assert!(div.max_abs() < 1e-10);
//! ```

pub mod bidiagonal;
pub mod config;
pub mod domain;
pub mod error;
pub mod field;
pub mod geometry;
pub mod mesh;
pub mod operators;
pub mod quadrature;
pub mod rhs;
pub mod space;
pub mod time;
pub mod topology;

// Re-export main types for convenience
pub use bidiagonal::{GeneralBidiagonal, Tridiagonal};
pub use config::{ColumnConfig, HorizontalConfig};
pub use domain::{Axis, CubePanelDomain, Domain, IntervalDomain, RectangleDomain, SphereDomain};
pub use error::{Result, SemError};
pub use field::{Field, FieldValue};
pub use mesh::{IntervalMesh, RectilinearMesh, Stretching};
pub use quadrature::GllQuadrature;
pub use rhs::{ColumnAdvection, RightHandSide, TracerAdvection2D};
pub use space::{ExtrudedSpace, FiniteDifferenceSpace, Space, SpectralElementSpace2D, Staggering};
pub use time::ssp_rk3_step;
pub use topology::Topology2D;
