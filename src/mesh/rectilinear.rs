//! Logically rectangular 2D quadrilateral meshes.
//!
//! Elements are numbered row-major from 1: element `e` sits in column
//! `(e-1) % n1` and row `(e-1) / n1`. Local vertex numbering:
//!
//! ```text
//!   3 ---- 4
//!   |      |
//!   1 ---- 2
//! ```
//!
//! i.e. 1 = (lo, lo), 2 = (hi, lo), 3 = (lo, hi), 4 = (hi, hi) in (ξ1, ξ2).
//!
//! Two representations share this interface:
//! - [`RectilinearMesh::Equispaced`] stores only the domain and counts;
//! - [`RectilinearMesh::TensorProduct`] stores the full `(n1+1) × (n2+1)` vertex
//!   grid, allowing curved or warped elements with the same connectivity.

use crate::domain::RectangleDomain;
use crate::error::{Result, SemError};

/// Logically rectangular mesh of a [`RectangleDomain`].
#[derive(Clone, Debug, PartialEq)]
pub enum RectilinearMesh {
    /// Uniform spacing along both axes.
    Equispaced {
        domain: RectangleDomain,
        n1: usize,
        n2: usize,
    },
    /// Explicit vertex grid: `coordinates[j * (n1 + 1) + i]` is the vertex at
    /// logical position `(i, j)`.
    TensorProduct {
        domain: RectangleDomain,
        n1: usize,
        n2: usize,
        coordinates: Vec<[f64; 2]>,
    },
}

impl RectilinearMesh {
    /// Uniform `n1 × n2` mesh.
    pub fn equispaced(domain: RectangleDomain, n1: usize, n2: usize) -> Result<Self> {
        check_counts(n1, n2)?;
        tracing::debug!(n1, n2, "built equispaced rectilinear mesh");
        Ok(RectilinearMesh::Equispaced { domain, n1, n2 })
    }

    /// Mesh from an explicit vertex grid of length `(n1 + 1) * (n2 + 1)`.
    ///
    /// # Arguments
    /// * `coordinates` - vertex `(i, j)` at `j * (n1 + 1) + i`, including the
    ///   closing row/column of a periodic axis
    ///
    /// # Returns
    /// `InvalidElementCount` or `DimensionMismatch` when the grid does not fit.
    pub fn from_coordinates(
        domain: RectangleDomain,
        n1: usize,
        n2: usize,
        coordinates: Vec<[f64; 2]>,
    ) -> Result<Self> {
        check_counts(n1, n2)?;
        SemError::check_len((n1 + 1) * (n2 + 1), coordinates.len())?;
        tracing::debug!(n1, n2, "built tensor-product rectilinear mesh");
        Ok(RectilinearMesh::TensorProduct {
            domain,
            n1,
            n2,
            coordinates,
        })
    }

    /// Equispaced grid perturbed by `warp`.
    ///
    /// Vertices on a non-periodic domain edge are left untouched. Along a
    /// periodic axis the closing vertex is the warped opening vertex shifted by
    /// the domain length, so the wraparound stays consistent.
    pub fn warped<F>(domain: RectangleDomain, n1: usize, n2: usize, warp: F) -> Result<Self>
    where
        F: Fn([f64; 2]) -> [f64; 2],
    {
        check_counts(n1, n2)?;
        let base = RectilinearMesh::Equispaced {
            domain: domain.clone(),
            n1,
            n2,
        };
        let p1 = domain.x1_periodic();
        let p2 = domain.x2_periodic();
        let (l1, l2) = (domain.x1().length(), domain.x2().length());

        let mut coordinates = Vec::with_capacity((n1 + 1) * (n2 + 1));
        for j in 0..=n2 {
            for i in 0..=n1 {
                let on_fixed_edge =
                    (!p1 && (i == 0 || i == n1)) || (!p2 && (j == 0 || j == n2));
                let point = if on_fixed_edge {
                    base.grid_point(i, j)
                } else {
                    // periodic images are warped at their canonical position
                    let ci = if p1 && i == n1 { 0 } else { i };
                    let cj = if p2 && j == n2 { 0 } else { j };
                    let [x, y] = warp(base.grid_point(ci, cj));
                    let sx = if ci != i { l1 } else { 0.0 };
                    let sy = if cj != j { l2 } else { 0.0 };
                    [x + sx, y + sy]
                };
                coordinates.push(point);
            }
        }
        Self::from_coordinates(domain, n1, n2, coordinates)
    }

    pub fn domain(&self) -> &RectangleDomain {
        match self {
            RectilinearMesh::Equispaced { domain, .. }
            | RectilinearMesh::TensorProduct { domain, .. } => domain,
        }
    }

    /// Elements along ξ1.
    pub fn n1(&self) -> usize {
        match self {
            RectilinearMesh::Equispaced { n1, .. } | RectilinearMesh::TensorProduct { n1, .. } => {
                *n1
            }
        }
    }

    /// Elements along ξ2.
    pub fn n2(&self) -> usize {
        match self {
            RectilinearMesh::Equispaced { n2, .. } | RectilinearMesh::TensorProduct { n2, .. } => {
                *n2
            }
        }
    }

    pub fn n_elements(&self) -> usize {
        self.n1() * self.n2()
    }

    /// Number of distinct topological vertices.
    ///
    /// A periodic axis does not add the closing row/column.
    pub fn n_vertices(&self) -> usize {
        let domain = self.domain();
        let v1 = if domain.x1_periodic() { self.n1() } else { self.n1() + 1 };
        let v2 = if domain.x2_periodic() { self.n2() } else { self.n2() + 1 };
        v1 * v2
    }

    /// Physical position of grid vertex `(i, j)`.
    ///
    /// # Arguments
    /// * `i` - vertex column, `0..=n1`
    /// * `j` - vertex row, `0..=n2`
    ///
    /// # Returns
    /// `IndexOutOfRange` when either index is past the closing vertex.
    pub fn grid_vertex(&self, i: usize, j: usize) -> Result<[f64; 2]> {
        SemError::check_index("grid vertex column", i, self.n1() + 1)?;
        SemError::check_index("grid vertex row", j, self.n2() + 1)?;
        Ok(self.grid_point(i, j))
    }

    fn grid_point(&self, i: usize, j: usize) -> [f64; 2] {
        match self {
            RectilinearMesh::Equispaced { domain, n1, n2 } => {
                let ([x0, y0], [x1, y1]) = domain.extents();
                let x = if i == *n1 {
                    x1
                } else {
                    x0 + (x1 - x0) * i as f64 / *n1 as f64
                };
                let y = if j == *n2 {
                    y1
                } else {
                    y0 + (y1 - y0) * j as f64 / *n2 as f64
                };
                [x, y]
            }
            RectilinearMesh::TensorProduct {
                n1, coordinates, ..
            } => coordinates[j * (n1 + 1) + i],
        }
    }

    /// Validate a 1-based element number and split it into `(row, col)`, both 0-based.
    pub fn element_position(&self, elem: usize) -> Result<(usize, usize)> {
        let n = self.n_elements();
        if elem < 1 || elem > n {
            return Err(SemError::ElementOutOfRange {
                element: elem,
                n_elements: n,
            });
        }
        let n1 = self.n1();
        Ok(((elem - 1) / n1, (elem - 1) % n1))
    }

    /// 1-based element number at 0-based `(row, col)`.
    #[inline]
    pub fn element_at(&self, row: usize, col: usize) -> usize {
        row * self.n1() + col + 1
    }

    /// The four corner coordinates of `elem`, in local vertex order 1..=4.
    pub fn vertex_coordinates(&self, elem: usize) -> Result<[[f64; 2]; 4]> {
        let (row, col) = self.element_position(elem)?;
        Ok([
            self.grid_point(col, row),
            self.grid_point(col + 1, row),
            self.grid_point(col, row + 1),
            self.grid_point(col + 1, row + 1),
        ])
    }

    /// Coordinate of local vertex `vertex` (1..=4) of `elem`.
    pub fn vertex_coordinate(&self, elem: usize, vertex: usize) -> Result<[f64; 2]> {
        if !(1..=4).contains(&vertex) {
            return Err(SemError::VertexOutOfRange(vertex));
        }
        Ok(self.vertex_coordinates(elem)?[vertex - 1])
    }
}

fn check_counts(n1: usize, n2: usize) -> Result<()> {
    if n1 < 1 {
        return Err(SemError::InvalidElementCount {
            axis: "x1",
            count: n1,
        });
    }
    if n2 < 1 {
        return Err(SemError::InvalidElementCount {
            axis: "x2",
            count: n2,
        });
    }
    Ok(())
}
