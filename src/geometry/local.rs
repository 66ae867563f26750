//! Per-node geometric factors.
//!
//! Every node of a space carries its physical coordinate, the Jacobian
//! determinant of the reference-to-physical map, the quadrature-weighted
//! Jacobian, and the forward and inverse metric tensors:
//!
//! ∂u/∂x^a = Σ_i (∂ξ^i/∂x^a) ∂u/∂ξ^i

/// Geometry of a node of a 1D (vertical) space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalGeometry1D {
    /// Physical coordinate z.
    pub coordinate: f64,
    /// Jacobian ∂z/∂ξ.
    pub j: f64,
    /// Quadrature weight times Jacobian.
    pub wj: f64,
    /// ∂z/∂ξ
    pub dz_dxi: f64,
    /// ∂ξ/∂z
    pub dxi_dz: f64,
}

impl LocalGeometry1D {
    pub fn new(coordinate: f64, j: f64, weight: f64) -> Self {
        Self {
            coordinate,
            j,
            wj: weight * j,
            dz_dxi: j,
            dxi_dz: 1.0 / j,
        }
    }
}

/// Geometry of a node of a 2D (horizontal) space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalGeometry2D {
    /// Physical coordinate (x, y).
    pub coordinate: [f64; 2],
    /// det(∂x/∂ξ)
    pub j: f64,
    /// Tensor-product quadrature weight times `j`.
    pub wj: f64,
    /// `dx_dxi[a][i]` = ∂x^a/∂ξ^i
    pub dx_dxi: [[f64; 2]; 2],
    /// `dxi_dx[i][a]` = ∂ξ^i/∂x^a
    pub dxi_dx: [[f64; 2]; 2],
}

impl LocalGeometry2D {
    /// Build from the forward metric; the inverse and determinant are derived.
    pub fn new(coordinate: [f64; 2], dx_dxi: [[f64; 2]; 2], weight: f64) -> Self {
        let [[x_r, x_s], [y_r, y_s]] = dx_dxi;
        let j = x_r * y_s - x_s * y_r;
        let dxi_dx = [[y_s / j, -x_s / j], [-y_r / j, x_r / j]];
        Self {
            coordinate,
            j,
            wj: weight * j,
            dx_dxi,
            dxi_dx,
        }
    }

    /// Transform reference derivatives (∂u/∂ξ1, ∂u/∂ξ2) to physical (∂u/∂x, ∂u/∂y).
    #[inline]
    pub fn physical_gradient(&self, du_dxi: [f64; 2]) -> [f64; 2] {
        [
            self.dxi_dx[0][0] * du_dxi[0] + self.dxi_dx[1][0] * du_dxi[1],
            self.dxi_dx[0][1] * du_dxi[0] + self.dxi_dx[1][1] * du_dxi[1],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_metric() {
        let g = LocalGeometry2D::new([0.0, 0.0], [[0.7, 0.2], [-0.1, 1.3]], 0.5);
        for a in 0..2 {
            for b in 0..2 {
                let prod: f64 = (0..2).map(|i| g.dx_dxi[a][i] * g.dxi_dx[i][b]).sum();
                let expected = if a == b { 1.0 } else { 0.0 };
                assert!((prod - expected).abs() < 1e-14);
            }
        }
        assert!((g.j - (0.7 * 1.3 + 0.2 * 0.1)).abs() < 1e-14);
        assert!((g.wj - 0.5 * g.j).abs() < 1e-15);
    }

    #[test]
    fn test_physical_gradient_scaled_square() {
        // x = 2ξ1, y = ξ2 / 2
        let g = LocalGeometry2D::new([0.0, 0.0], [[2.0, 0.0], [0.0, 0.5]], 1.0);
        let [gx, gy] = g.physical_gradient([1.0, 1.0]);
        assert!((gx - 0.5).abs() < 1e-14);
        assert!((gy - 2.0).abs() < 1e-14);
    }

    #[test]
    fn test_vertical_geometry() {
        let g = LocalGeometry1D::new(3.0, 0.25, 2.0);
        assert_eq!(g.wj, 0.5);
        assert_eq!(g.dxi_dz, 4.0);
    }
}
