//! Builders for the common space configurations.
//!
//! Setters only record values; everything is validated in `build()`, which
//! returns the first construction error.
//!
//! ```
//! use sem_rs::config::{ColumnConfig, HorizontalConfig};
//!
//! let horizontal = HorizontalConfig::new(0.0, 1.0, 0.0, 1.0)
//!     .with_resolution(4, 4)
//!     .with_order(3)
//!     .fully_periodic()
//!     .build()
//!     .unwrap();
//! let space = ColumnConfig::new(0.0, 10.0, 20)
//!     .with_scale_height(3.0)
//!     .build_extruded(horizontal)
//!     .unwrap();
//! assert_eq!(space.n_levels(), 20);
//! ```

use crate::domain::{Axis, IntervalDomain, RectangleDomain};
use crate::error::Result;
use crate::mesh::{IntervalMesh, RectilinearMesh, Stretching};
use crate::space::{ExtrudedSpace, FiniteDifferenceSpace, SpectralElementSpace2D, Staggering};
use crate::topology::Topology2D;

/// Boundary names of one axis, or `None` when the axis is periodic.
type AxisBoundary = Option<(String, String)>;

fn names(lo: &str, hi: &str) -> AxisBoundary {
    Some((lo.to_string(), hi.to_string()))
}

/// Horizontal spectral-element space on a rectangle.
///
/// Defaults: 1×1 elements, order 3, bounded on both axes with boundaries
/// `west`/`east` and `south`/`north`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HorizontalConfig {
    x1: [f64; 2],
    x2: [f64; 2],
    n1: usize,
    n2: usize,
    order: usize,
    x1_boundary: AxisBoundary,
    x2_boundary: AxisBoundary,
}

impl HorizontalConfig {
    pub fn new(x1_min: f64, x1_max: f64, x2_min: f64, x2_max: f64) -> Self {
        Self {
            x1: [x1_min, x1_max],
            x2: [x2_min, x2_max],
            n1: 1,
            n2: 1,
            order: 3,
            x1_boundary: names("west", "east"),
            x2_boundary: names("south", "north"),
        }
    }

    /// Unit square [0,1] × [0,1].
    pub fn unit_square() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }

    pub fn with_resolution(mut self, n1: usize, n2: usize) -> Self {
        self.n1 = n1;
        self.n2 = n2;
        self
    }

    /// Polynomial order; the space has `order + 1` GLL nodes per direction.
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Name the low/high boundaries of the first axis, making it bounded.
    pub fn with_x1_boundary(mut self, lo: &str, hi: &str) -> Self {
        self.x1_boundary = names(lo, hi);
        self
    }

    /// Name the low/high boundaries of the second axis, making it bounded.
    pub fn with_x2_boundary(mut self, lo: &str, hi: &str) -> Self {
        self.x2_boundary = names(lo, hi);
        self
    }

    pub fn periodic_x1(mut self) -> Self {
        self.x1_boundary = None;
        self
    }

    pub fn periodic_x2(mut self) -> Self {
        self.x2_boundary = None;
        self
    }

    pub fn fully_periodic(self) -> Self {
        self.periodic_x1().periodic_x2()
    }

    pub fn rectangle(&self) -> Result<RectangleDomain> {
        let x1 = IntervalDomain::try_new(
            self.x1[0],
            self.x1[1],
            Axis::X,
            self.x1_boundary.is_none(),
            self.x1_boundary.clone(),
        )?;
        let x2 = IntervalDomain::try_new(
            self.x2[0],
            self.x2[1],
            Axis::Y,
            self.x2_boundary.is_none(),
            self.x2_boundary.clone(),
        )?;
        RectangleDomain::new(x1, x2)
    }

    pub fn mesh(&self) -> Result<RectilinearMesh> {
        RectilinearMesh::equispaced(self.rectangle()?, self.n1, self.n2)
    }

    pub fn build(&self) -> Result<SpectralElementSpace2D> {
        let space = SpectralElementSpace2D::new(Topology2D::new(self.mesh()?), self.order)?;
        tracing::debug!(
            n1 = self.n1,
            n2 = self.n2,
            order = self.order,
            "built horizontal space from config"
        );
        Ok(space)
    }
}

impl Default for HorizontalConfig {
    fn default() -> Self {
        Self::unit_square()
    }
}

/// Vertical column, optionally stretched towards its bottom.
///
/// Defaults: uniform spacing, boundaries `bottom`/`top`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnConfig {
    bounds: [f64; 2],
    n_elements: usize,
    scale_height: Option<f64>,
    boundary: (String, String),
}

impl ColumnConfig {
    pub fn new(z_min: f64, z_max: f64, n_elements: usize) -> Self {
        Self {
            bounds: [z_min, z_max],
            n_elements,
            scale_height: None,
            boundary: ("bottom".to_string(), "top".to_string()),
        }
    }

    /// Exponential stretching with scale height `h`.
    pub fn with_scale_height(mut self, h: f64) -> Self {
        self.scale_height = Some(h);
        self
    }

    pub fn with_boundary(mut self, bottom: &str, top: &str) -> Self {
        self.boundary = (bottom.to_string(), top.to_string());
        self
    }

    pub fn mesh(&self) -> Result<IntervalMesh> {
        let domain = IntervalDomain::new(
            self.bounds[0],
            self.bounds[1],
            Axis::Z,
            (&self.boundary.0, &self.boundary.1),
        )?;
        let stretching = match self.scale_height {
            Some(h) => Stretching::exponential(h)?,
            None => Stretching::Uniform,
        };
        IntervalMesh::stretched(domain, self.n_elements, stretching)
    }

    /// The cell-center space of the column.
    pub fn build(&self) -> Result<FiniteDifferenceSpace> {
        FiniteDifferenceSpace::new(self.mesh()?, Staggering::CellCenter)
    }

    /// Extrude `horizontal` with this column (cell centers).
    pub fn build_extruded(&self, horizontal: SpectralElementSpace2D) -> Result<ExtrudedSpace> {
        Ok(ExtrudedSpace::new(horizontal, self.build()?))
    }
}
