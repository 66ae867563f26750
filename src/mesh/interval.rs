//! 1D mesh of an interval domain.
//!
//! Uniform meshes keep only the domain and the element count; their faces are
//! derived algebraically. Stretched meshes store the face coordinates computed
//! once at construction.

use super::stretching::Stretching;
use crate::domain::IntervalDomain;
use crate::error::{Result, SemError};

/// Partition of an interval into `n` elements.
#[derive(Clone, Debug, PartialEq)]
pub enum IntervalMesh {
    /// Equal element sizes.
    Uniform {
        domain: IntervalDomain,
        n_elements: usize,
    },
    /// Faces placed by a stretching function.
    Stretched {
        domain: IntervalDomain,
        n_elements: usize,
        stretching: Stretching,
        faces: Vec<f64>,
    },
}

impl IntervalMesh {
    /// Create a uniform mesh with `n_elements` elements.
    ///
    /// # Returns
    /// `InvalidElementCount` when `n_elements == 0`.
    pub fn uniform(domain: IntervalDomain, n_elements: usize) -> Result<Self> {
        check_count(&domain, n_elements)?;
        tracing::debug!(
            axis = domain.axis().label(),
            n_elements,
            "built uniform interval mesh"
        );
        Ok(IntervalMesh::Uniform { domain, n_elements })
    }

    /// Create a mesh whose faces follow `stretching`.
    ///
    /// `Stretching::Uniform` still yields the O(1) uniform representation.
    ///
    /// # Arguments
    /// * `domain` - the interval; its bounds are the exact first and last faces
    /// * `n_elements` - number of cells, at least 1
    /// * `stretching` - face distribution
    ///
    /// # Returns
    /// `InvalidElementCount` or `InvalidStretching` for unusable parameters.
    pub fn stretched(
        domain: IntervalDomain,
        n_elements: usize,
        stretching: Stretching,
    ) -> Result<Self> {
        check_count(&domain, n_elements)?;
        if stretching == Stretching::Uniform {
            return Self::uniform(domain, n_elements);
        }
        let faces = stretching.face_coordinates(domain.min(), domain.max(), n_elements)?;
        tracing::debug!(
            axis = domain.axis().label(),
            n_elements,
            stretching = stretching.name(),
            "built stretched interval mesh"
        );
        Ok(IntervalMesh::Stretched {
            domain,
            n_elements,
            stretching,
            faces,
        })
    }

    pub fn domain(&self) -> &IntervalDomain {
        match self {
            IntervalMesh::Uniform { domain, .. } | IntervalMesh::Stretched { domain, .. } => {
                domain
            }
        }
    }

    pub fn n_elements(&self) -> usize {
        match self {
            IntervalMesh::Uniform { n_elements, .. }
            | IntervalMesh::Stretched { n_elements, .. } => *n_elements,
        }
    }

    /// Number of faces, `n_elements + 1`.
    pub fn n_faces(&self) -> usize {
        self.n_elements() + 1
    }

    /// Coordinate of face `i` (0-based).
    ///
    /// # Arguments
    /// * `i` - face index, `0..=n_elements`
    ///
    /// # Returns
    /// `IndexOutOfRange` past the top face.
    pub fn face_coordinate(&self, i: usize) -> Result<f64> {
        SemError::check_index("face", i, self.n_faces())?;
        Ok(self.face_at(i))
    }

    fn face_at(&self, i: usize) -> f64 {
        match self {
            IntervalMesh::Uniform { domain, n_elements } => {
                if i == *n_elements {
                    domain.max()
                } else {
                    domain.min() + domain.length() * i as f64 / *n_elements as f64
                }
            }
            IntervalMesh::Stretched { faces, .. } => faces[i],
        }
    }

    /// All face coordinates in increasing order.
    pub fn face_coordinates(&self) -> Vec<f64> {
        match self {
            IntervalMesh::Uniform { .. } => {
                (0..self.n_faces()).map(|i| self.face_at(i)).collect()
            }
            IntervalMesh::Stretched { faces, .. } => faces.clone(),
        }
    }

    /// (low, high) face coordinates of element `elem` (1-based).
    pub fn element_bounds(&self, elem: usize) -> Result<(f64, f64)> {
        let n = self.n_elements();
        if elem < 1 || elem > n {
            return Err(SemError::ElementOutOfRange {
                element: elem,
                n_elements: n,
            });
        }
        Ok((self.face_at(elem - 1), self.face_at(elem)))
    }

    /// Smallest element size.
    pub fn h_min(&self) -> f64 {
        (1..=self.n_elements())
            .map(|k| self.face_at(k) - self.face_at(k - 1))
            .fold(f64::INFINITY, f64::min)
    }
}

fn check_count(domain: &IntervalDomain, n_elements: usize) -> Result<()> {
    if n_elements < 1 {
        return Err(SemError::InvalidElementCount {
            axis: domain.axis().label(),
            count: n_elements,
        });
    }
    Ok(())
}
