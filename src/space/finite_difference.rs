//! Staggered finite-difference space of a vertical column.
//!
//! A column of `n` cells has `n` centers and `n + 1` faces. Both staggerings
//! share one [`ColumnGeometry`]; switching between them only swaps a tag.
//!
//! Every cell is the image of the reference cell [-1, 1], and the dual cell
//! around a face spans one reference unit between neighbouring centers:
//!
//! ```text
//! center k:         J = Δz_k / 2                    WJ = 2J = Δz_k
//! interior face k:  J = (Δz_{k-1} + Δz_k) / 2       WJ = J
//! boundary face:    J = Δz (one-sided)              WJ = J / 2
//! ```
//!
//! so both staggerings integrate constants exactly, the boundary faces
//! carrying the trapezoidal half weight.

use std::sync::Arc;

use crate::domain::Axis;
use crate::error::{Result, SemError};
use crate::geometry::LocalGeometry1D;
use crate::mesh::IntervalMesh;

use super::Space;

/// Where the unknowns of a column field live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Staggering {
    CellCenter,
    CellFace,
}

/// Geometry of both staggerings of one column.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnGeometry {
    mesh: IntervalMesh,
    centers: Vec<LocalGeometry1D>,
    faces: Vec<LocalGeometry1D>,
}

impl ColumnGeometry {
    /// Compute center and face geometry of a vertical, bounded mesh.
    ///
    /// # Returns
    /// `InvalidDomain` unless the mesh lies on a non-periodic `Axis::Z` interval.
    pub fn new(mesh: IntervalMesh) -> Result<Self> {
        let domain = mesh.domain();
        if domain.axis() != Axis::Z {
            return Err(SemError::InvalidDomain(format!(
                "finite-difference column needs a z interval, got {}",
                domain.axis().label()
            )));
        }
        if domain.is_periodic() {
            return Err(SemError::InvalidDomain(
                "finite-difference column must not be periodic".into(),
            ));
        }

        let z = mesh.face_coordinates();
        let n = mesh.n_elements();
        let dz: Vec<f64> = z.windows(2).map(|w| w[1] - w[0]).collect();

        let centers = (0..n)
            .map(|k| LocalGeometry1D::new(0.5 * (z[k] + z[k + 1]), 0.5 * dz[k], 2.0))
            .collect();

        let faces = (0..=n)
            .map(|k| {
                if k == 0 {
                    LocalGeometry1D::new(z[0], dz[0], 0.5)
                } else if k == n {
                    LocalGeometry1D::new(z[n], dz[n - 1], 0.5)
                } else {
                    LocalGeometry1D::new(z[k], 0.5 * (dz[k - 1] + dz[k]), 1.0)
                }
            })
            .collect();

        Ok(Self {
            mesh,
            centers,
            faces,
        })
    }

    pub fn mesh(&self) -> &IntervalMesh {
        &self.mesh
    }

    pub fn centers(&self) -> &[LocalGeometry1D] {
        &self.centers
    }

    pub fn faces(&self) -> &[LocalGeometry1D] {
        &self.faces
    }
}

/// Centers or faces of a vertical column.
#[derive(Clone, Debug)]
pub struct FiniteDifferenceSpace {
    staggering: Staggering,
    column: Arc<ColumnGeometry>,
}

impl FiniteDifferenceSpace {
    /// Build a column space from a z-axis, non-periodic interval mesh.
    ///
    /// # Arguments
    /// * `mesh` - face positions of the column
    /// * `staggering` - which view to expose; the other is one
    ///   [`center_space`](Self::center_space)/[`face_space`](Self::face_space) call away
    ///
    /// # Returns
    /// The space, or `InvalidDomain` for a horizontal or periodic interval.
    pub fn new(mesh: IntervalMesh, staggering: Staggering) -> Result<Self> {
        let column = Arc::new(ColumnGeometry::new(mesh)?);
        tracing::debug!(
            n_elements = column.centers.len(),
            ?staggering,
            "built finite-difference space"
        );
        Ok(Self { staggering, column })
    }

    pub fn staggering(&self) -> Staggering {
        self.staggering
    }

    /// The same column viewed at cell centers.
    pub fn center_space(&self) -> Self {
        Self {
            staggering: Staggering::CellCenter,
            column: Arc::clone(&self.column),
        }
    }

    /// The same column viewed at cell faces.
    pub fn face_space(&self) -> Self {
        Self {
            staggering: Staggering::CellFace,
            column: Arc::clone(&self.column),
        }
    }

    pub fn column(&self) -> &Arc<ColumnGeometry> {
        &self.column
    }

    pub fn mesh(&self) -> &IntervalMesh {
        &self.column.mesh
    }

    /// Number of cells.
    pub fn n_elements(&self) -> usize {
        self.column.centers.len()
    }

    /// Geometry of this space's nodes.
    pub fn local_geometry(&self) -> &[LocalGeometry1D] {
        match self.staggering {
            Staggering::CellCenter => &self.column.centers,
            Staggering::CellFace => &self.column.faces,
        }
    }

    pub fn coordinates(&self) -> impl Iterator<Item = f64> + '_ {
        self.local_geometry().iter().map(|g| g.coordinate)
    }

    /// Whether both spaces describe the same column, regardless of staggering.
    pub fn same_column(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.column, &other.column) || self.column == other.column
    }
}

impl Space for FiniteDifferenceSpace {
    fn n_nodes(&self) -> usize {
        self.local_geometry().len()
    }

    fn is_compatible(&self, other: &Self) -> bool {
        self.staggering == other.staggering && self.same_column(other)
    }

    #[inline]
    fn wj(&self, node: usize) -> f64 {
        self.local_geometry()[node].wj
    }

    fn describe(&self) -> String {
        let kind = match self.staggering {
            Staggering::CellCenter => "center",
            Staggering::CellFace => "face",
        };
        format!("{} space of a {}-cell column", kind, self.n_elements())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IntervalDomain;
    use crate::mesh::Stretching;

    fn column(n: usize) -> FiniteDifferenceSpace {
        let domain = IntervalDomain::new(0.0, 1.0, Axis::Z, ("bottom", "top")).unwrap();
        let mesh = IntervalMesh::uniform(domain, n).unwrap();
        FiniteDifferenceSpace::new(mesh, Staggering::CellCenter).unwrap()
    }

    #[test]
    fn test_uniform_geometry() {
        let c = column(4);
        let f = c.face_space();
        assert_eq!(c.n_nodes(), 4);
        assert_eq!(f.n_nodes(), 5);
        for g in c.local_geometry() {
            assert!((g.j - 0.125).abs() < 1e-15);
            assert!((g.wj - 0.25).abs() < 1e-15);
        }
        let faces = f.local_geometry();
        for g in faces {
            assert!((g.j - 0.25).abs() < 1e-15);
            assert!((g.dxi_dz - 4.0).abs() < 1e-15);
        }
        assert!((faces[0].wj - 0.125).abs() < 1e-15);
        assert!((faces[2].wj - 0.25).abs() < 1e-15);
        assert!((faces[4].wj - 0.125).abs() < 1e-15);
        let centers: Vec<f64> = c.coordinates().collect();
        assert_eq!(centers, vec![0.125, 0.375, 0.625, 0.875]);
    }

    #[test]
    fn test_weights_integrate_length() {
        let domain = IntervalDomain::new(0.0, 30.0, Axis::Z, ("bottom", "top")).unwrap();
        let mesh = IntervalMesh::stretched(domain, 10, Stretching::exponential(7.0).unwrap()).unwrap();
        let c = FiniteDifferenceSpace::new(mesh, Staggering::CellCenter).unwrap();
        let f = c.face_space();
        let lc: f64 = (0..c.n_nodes()).map(|k| c.wj(k)).sum();
        let lf: f64 = (0..f.n_nodes()).map(|k| f.wj(k)).sum();
        assert!((lc - 30.0).abs() < 1e-12);
        assert!((lf - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_face_jacobians_on_stretched_column() {
        let domain = IntervalDomain::new(0.0, 6.0, Axis::Z, ("bottom", "top")).unwrap();
        let mesh = IntervalMesh::stretched(domain, 3, Stretching::exponential(2.0).unwrap()).unwrap();
        let f = FiniteDifferenceSpace::new(mesh, Staggering::CellFace).unwrap();
        let z = f.mesh().face_coordinates();
        let c: Vec<f64> = f.center_space().coordinates().collect();
        let faces = f.local_geometry();
        // one-sided at the ends, center-to-center in the interior
        assert!((faces[0].j - (z[1] - z[0])).abs() < 1e-14);
        assert!((faces[3].j - (z[3] - z[2])).abs() < 1e-14);
        for k in 1..3 {
            assert!((faces[k].j - (c[k] - c[k - 1])).abs() < 1e-14);
            assert_eq!(faces[k].wj, faces[k].j);
        }
        assert_eq!(faces[0].wj, 0.5 * faces[0].j);
        assert_eq!(faces[3].wj, 0.5 * faces[3].j);
    }

    #[test]
    fn test_views_share_geometry() {
        let c = column(3);
        let f = c.face_space();
        assert!(Arc::ptr_eq(c.column(), f.column()));
        assert!(!c.is_compatible(&f));
        assert!(c.is_compatible(&f.center_space()));
    }

    #[test]
    fn test_rejects_wrong_axis_and_periodic() {
        let x = IntervalDomain::new(0.0, 1.0, Axis::X, ("left", "right")).unwrap();
        let mesh = IntervalMesh::uniform(x, 4).unwrap();
        assert!(matches!(
            FiniteDifferenceSpace::new(mesh, Staggering::CellFace),
            Err(SemError::InvalidDomain(_))
        ));

        let z = IntervalDomain::periodic(0.0, 1.0, Axis::Z).unwrap();
        let mesh = IntervalMesh::uniform(z, 4).unwrap();
        assert!(matches!(
            FiniteDifferenceSpace::new(mesh, Staggering::CellCenter),
            Err(SemError::InvalidDomain(_))
        ));
    }
}
