//! Horizontal spectral space extruded along a vertical column.
//!
//! Node `(h, k)`, with `h` a horizontal node and `k` a vertical level, is
//! stored at `h * n_levels + k`, so every column is contiguous.

use super::{FiniteDifferenceSpace, SpectralElementSpace2D, Space, Staggering};

/// Tensor product of a horizontal spectral space and a vertical column.
#[derive(Clone, Debug)]
pub struct ExtrudedSpace {
    horizontal: SpectralElementSpace2D,
    vertical: FiniteDifferenceSpace,
}

impl ExtrudedSpace {
    /// Stack a copy of `vertical` under every node of `horizontal`.
    ///
    /// # Arguments
    /// * `horizontal` - spectral-element space giving the columns
    /// * `vertical` - column space; its staggering becomes the staggering of the result
    pub fn new(horizontal: SpectralElementSpace2D, vertical: FiniteDifferenceSpace) -> Self {
        tracing::debug!(
            n_columns = horizontal.n_nodes(),
            n_levels = vertical.n_nodes(),
            "built extruded space"
        );
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn horizontal(&self) -> &SpectralElementSpace2D {
        &self.horizontal
    }

    pub fn vertical(&self) -> &FiniteDifferenceSpace {
        &self.vertical
    }

    pub fn staggering(&self) -> Staggering {
        self.vertical.staggering()
    }

    /// The same space with cell-center levels.
    pub fn center_space(&self) -> Self {
        Self {
            horizontal: self.horizontal.clone(),
            vertical: self.vertical.center_space(),
        }
    }

    /// The same space with cell-face levels.
    pub fn face_space(&self) -> Self {
        Self {
            horizontal: self.horizontal.clone(),
            vertical: self.vertical.face_space(),
        }
    }

    pub fn n_columns(&self) -> usize {
        self.horizontal.n_nodes()
    }

    pub fn n_levels(&self) -> usize {
        self.vertical.n_nodes()
    }

    #[inline]
    pub fn node_index(&self, column: usize, level: usize) -> usize {
        column * self.n_levels() + level
    }

    /// Physical `(x, y, z)` of a node.
    pub fn coordinate(&self, node: usize) -> [f64; 3] {
        let nl = self.n_levels();
        let [x, y] = self.horizontal.local_geometry()[node / nl].coordinate;
        let z = self.vertical.local_geometry()[node % nl].coordinate;
        [x, y, z]
    }
}

impl Space for ExtrudedSpace {
    fn n_nodes(&self) -> usize {
        self.n_columns() * self.n_levels()
    }

    fn is_compatible(&self, other: &Self) -> bool {
        self.horizontal.is_compatible(&other.horizontal)
            && self.vertical.is_compatible(&other.vertical)
    }

    #[inline]
    fn wj(&self, node: usize) -> f64 {
        let nl = self.n_levels();
        self.horizontal.wj(node / nl) * self.vertical.wj(node % nl)
    }

    fn describe(&self) -> String {
        format!(
            "extruded space ({} x {})",
            self.horizontal.describe(),
            self.vertical.describe()
        )
    }
}
