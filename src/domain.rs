//! Continuous regions that meshes discretize.
//!
//! A domain is an immutable value: coordinate bounds, the axis it lives on,
//! and either a pair of boundary names or a periodic flag. Boundary names are
//! fixed at construction; periodic axes carry none.
//!
//! ```
//! use sem_rs::domain::{Axis, IntervalDomain, RectangleDomain};
//!
//! let column = IntervalDomain::new(0.0, 1000.0, Axis::Z, ("bottom", "top")).unwrap();
//! assert!(!column.is_periodic());
//!
//! let plane = RectangleDomain::new(
//!     IntervalDomain::periodic(0.0, 1.0, Axis::X).unwrap(),
//!     IntervalDomain::new(0.0, 1.0, Axis::Y, ("south", "north")).unwrap(),
//! )
//! .unwrap();
//! assert_eq!(plane.x2_boundary(), Some(("south", "north")));
//! ```

use crate::error::{Result, SemError};

/// Coordinate axis of a one-dimensional domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// First horizontal axis
    X,
    /// Second horizontal axis
    Y,
    /// Vertical axis (finite-difference columns)
    Z,
}

impl Axis {
    /// Lower-case axis label, used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// Coordinate-type metadata exposed by a domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinateKind {
    /// Horizontal line
    X,
    /// Vertical line (finite-difference column)
    Z,
    /// Horizontal plane
    XY,
    /// Latitude/longitude on a sphere
    LatLong,
    /// Cartesian points on a closed 2D surface embedded in 3D
    XYZ,
}

/// A closed interval `[min, max]`, either bounded with two named ends or periodic.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalDomain {
    min: f64,
    max: f64,
    axis: Axis,
    boundary: Option<(String, String)>,
}

impl IntervalDomain {
    /// Bounded interval with the given (low, high) boundary names.
    pub fn new(min: f64, max: f64, axis: Axis, names: (&str, &str)) -> Result<Self> {
        Self::try_new(
            min,
            max,
            axis,
            false,
            Some((names.0.to_string(), names.1.to_string())),
        )
    }

    /// Periodic interval; has no boundary names.
    pub fn periodic(min: f64, max: f64, axis: Axis) -> Result<Self> {
        Self::try_new(min, max, axis, true, None)
    }

    /// General constructor that validates boundary-name arity against periodicity.
    pub fn try_new(
        min: f64,
        max: f64,
        axis: Axis,
        periodic: bool,
        boundary: Option<(String, String)>,
    ) -> Result<Self> {
        if !(min.is_finite() && max.is_finite()) || max <= min {
            return Err(SemError::InvalidDomain(format!(
                "{} interval needs finite bounds with max > min, got [{}, {}]",
                axis.label(),
                min,
                max
            )));
        }
        if periodic == boundary.is_some() {
            return Err(SemError::BoundaryTagArity {
                periodic,
                named: boundary.is_some(),
            });
        }
        if let Some((lo, hi)) = &boundary {
            if lo == hi {
                return Err(SemError::InvalidDomain(format!(
                    "boundary names must differ, got \"{}\" twice",
                    lo
                )));
            }
        }
        Ok(Self {
            min,
            max,
            axis,
            boundary,
        })
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Interval length.
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn is_periodic(&self) -> bool {
        self.boundary.is_none()
    }

    /// (low, high) boundary names, `None` when periodic.
    pub fn boundary_names(&self) -> Option<(&str, &str)> {
        self.boundary
            .as_ref()
            .map(|(lo, hi)| (lo.as_str(), hi.as_str()))
    }

    pub fn coordinate_kind(&self) -> CoordinateKind {
        match self.axis {
            Axis::Z => CoordinateKind::Z,
            Axis::X | Axis::Y => CoordinateKind::X,
        }
    }
}

/// Tensor product of two horizontal intervals.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectangleDomain {
    x1: IntervalDomain,
    x2: IntervalDomain,
}

impl RectangleDomain {
    /// Build a rectangle; the intervals must lie on the X and Y axes respectively.
    pub fn new(x1: IntervalDomain, x2: IntervalDomain) -> Result<Self> {
        if x1.axis() != Axis::X || x2.axis() != Axis::Y {
            return Err(SemError::InvalidDomain(format!(
                "rectangle needs (x, y) intervals, got ({}, {})",
                x1.axis().label(),
                x2.axis().label()
            )));
        }
        Ok(Self { x1, x2 })
    }

    pub fn x1(&self) -> &IntervalDomain {
        &self.x1
    }

    pub fn x2(&self) -> &IntervalDomain {
        &self.x2
    }

    pub fn x1_periodic(&self) -> bool {
        self.x1.is_periodic()
    }

    pub fn x2_periodic(&self) -> bool {
        self.x2.is_periodic()
    }

    /// West/east names.
    pub fn x1_boundary(&self) -> Option<(&str, &str)> {
        self.x1.boundary_names()
    }

    /// South/north names.
    pub fn x2_boundary(&self) -> Option<(&str, &str)> {
        self.x2.boundary_names()
    }

    /// Lower-left and upper-right corners.
    pub fn extents(&self) -> ([f64; 2], [f64; 2]) {
        (
            [self.x1.min(), self.x2.min()],
            [self.x1.max(), self.x2.max()],
        )
    }
}

/// Surface of a sphere. Has no boundaries.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SphereDomain {
    radius: f64,
}

impl SphereDomain {
    pub fn new(radius: f64) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SemError::InvalidDomain(format!(
                "sphere radius must be positive, got {}",
                radius
            )));
        }
        Ok(Self { radius })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Surface of the cube `[-h, h]³`, tiled by its six panels.
///
/// Closed, so it has no boundaries. Each panel is a square face of the cube;
/// panel meshing is not provided and the domain is carried as data.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubePanelDomain {
    half_width: f64,
}

impl CubePanelDomain {
    /// Number of panels covering the cube surface.
    pub const N_PANELS: usize = 6;

    /// # Arguments
    /// * `half_width` - distance from the cube center to each panel, finite and positive
    ///
    /// # Returns
    /// The domain, or `InvalidDomain` for a non-positive or non-finite width.
    pub fn new(half_width: f64) -> Result<Self> {
        if !(half_width.is_finite() && half_width > 0.0) {
            return Err(SemError::InvalidDomain(format!(
                "cube panel half width must be positive, got {}",
                half_width
            )));
        }
        Ok(Self { half_width })
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Corners `(min, max)` of panel coordinates, shared by all panels.
    pub fn panel_extents(&self) -> (f64, f64) {
        (-self.half_width, self.half_width)
    }

    /// Total surface area of the six panels.
    pub fn area(&self) -> f64 {
        let edge = 2.0 * self.half_width;
        Self::N_PANELS as f64 * edge * edge
    }
}

/// Any supported domain.
#[derive(Clone, Debug, PartialEq)]
pub enum Domain {
    Interval(IntervalDomain),
    Rectangle(RectangleDomain),
    Sphere(SphereDomain),
    CubePanel(CubePanelDomain),
}

impl Domain {
    /// Topological dimension.
    pub fn dimension(&self) -> usize {
        match self {
            Domain::Interval(_) => 1,
            Domain::Rectangle(_) | Domain::Sphere(_) | Domain::CubePanel(_) => 2,
        }
    }

    pub fn coordinate_kind(&self) -> CoordinateKind {
        match self {
            Domain::Interval(d) => d.coordinate_kind(),
            Domain::Rectangle(_) => CoordinateKind::XY,
            Domain::Sphere(_) => CoordinateKind::LatLong,
            Domain::CubePanel(_) => CoordinateKind::XYZ,
        }
    }
}

impl From<IntervalDomain> for Domain {
    fn from(d: IntervalDomain) -> Self {
        Domain::Interval(d)
    }
}

impl From<RectangleDomain> for Domain {
    fn from(d: RectangleDomain) -> Self {
        Domain::Rectangle(d)
    }
}

impl From<SphereDomain> for Domain {
    fn from(d: SphereDomain) -> Self {
        Domain::Sphere(d)
    }
}

impl From<CubePanelDomain> for Domain {
    fn from(d: CubePanelDomain) -> Self {
        Domain::CubePanel(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_interval() {
        let d = IntervalDomain::new(-1.0, 3.0, Axis::Z, ("bottom", "top")).unwrap();
        assert_eq!(d.length(), 4.0);
        assert_eq!(d.boundary_names(), Some(("bottom", "top")));
        assert_eq!(d.coordinate_kind(), CoordinateKind::Z);
        assert!(!d.is_periodic());
    }

    #[test]
    fn test_periodic_interval_has_no_names() {
        let d = IntervalDomain::periodic(0.0, 1.0, Axis::X).unwrap();
        assert!(d.is_periodic());
        assert_eq!(d.boundary_names(), None);
    }

    #[test]
    fn test_arity_errors() {
        let err = IntervalDomain::try_new(
            0.0,
            1.0,
            Axis::X,
            true,
            Some(("a".into(), "b".into())),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SemError::BoundaryTagArity {
                periodic: true,
                named: true
            }
        );

        let err = IntervalDomain::try_new(0.0, 1.0, Axis::X, false, None).unwrap_err();
        assert!(matches!(err, SemError::BoundaryTagArity { periodic: false, .. }));
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(IntervalDomain::periodic(1.0, 1.0, Axis::X).is_err());
        assert!(IntervalDomain::periodic(0.0, f64::NAN, Axis::X).is_err());
        assert!(IntervalDomain::new(0.0, 1.0, Axis::Z, ("same", "same")).is_err());
    }

    #[test]
    fn test_rectangle_axes() {
        let x = IntervalDomain::periodic(0.0, 2.0, Axis::X).unwrap();
        let y = IntervalDomain::new(0.0, 1.0, Axis::Y, ("south", "north")).unwrap();
        let rect = RectangleDomain::new(x.clone(), y.clone()).unwrap();
        assert!(rect.x1_periodic());
        assert!(!rect.x2_periodic());
        assert_eq!(rect.extents(), ([0.0, 0.0], [2.0, 1.0]));

        // swapped axes are rejected
        assert!(RectangleDomain::new(y, x).is_err());
    }

    #[test]
    fn test_domain_metadata() {
        let sphere: Domain = SphereDomain::new(6.371e6).unwrap().into();
        assert_eq!(sphere.dimension(), 2);
        assert_eq!(sphere.coordinate_kind(), CoordinateKind::LatLong);
        assert!(SphereDomain::new(-1.0).is_err());

        let col: Domain = IntervalDomain::new(0.0, 1.0, Axis::Z, ("bottom", "top"))
            .unwrap()
            .into();
        assert_eq!(col.dimension(), 1);
        assert_eq!(col.coordinate_kind(), CoordinateKind::Z);
    }

    #[test]
    fn test_cube_panel_domain() {
        let cube = CubePanelDomain::new(0.5).unwrap();
        assert_eq!(cube.panel_extents(), (-0.5, 0.5));
        assert_eq!(cube.area(), 6.0);

        let d: Domain = cube.into();
        assert_eq!(d.dimension(), 2);
        assert_eq!(d.coordinate_kind(), CoordinateKind::XYZ);

        assert!(matches!(CubePanelDomain::new(0.0), Err(SemError::InvalidDomain(_))));
        assert!(CubePanelDomain::new(f64::INFINITY).is_err());
    }
}
