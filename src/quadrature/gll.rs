//! Gauss-Lobatto-Legendre quadrature and its nodal operators.
//!
//! The N+1 GLL nodes are the roots of (1-x²)P'_N(x), so both endpoints are
//! nodes. Collocating the solution at these nodes makes the element mass matrix
//! diagonal (the weights) and lets neighbouring elements share their edge nodes,
//! which is what direct stiffness summation relies on.

use std::f64::consts::PI;

use faer::Mat;

use super::legendre::{legendre, legendre_and_derivative};
use crate::error::{Result, SemError};

/// Nodes, weights and nodal derivative matrix of an order-N GLL rule on [-1, 1].
#[derive(Clone, Debug)]
pub struct GllQuadrature {
    order: usize,
    nodes: Vec<f64>,
    weights: Vec<f64>,
    /// D[i, j] = ℓ'_j(x_i)
    derivative: Mat<f64>,
    /// Barycentric weights λ_j = 1 / Π_{k≠j} (x_j - x_k)
    barycentric: Vec<f64>,
}

impl GllQuadrature {
    /// Build the rule for polynomial order `order` (order + 1 points).
    ///
    /// # Returns
    /// Nodes in increasing order on [-1, 1] with their weights, or
    /// `InvalidOrder` for `order == 0`.
    pub fn new(order: usize) -> Result<Self> {
        if order < 1 {
            return Err(SemError::InvalidOrder(order));
        }
        let nodes = gll_nodes(order);
        let weights = gll_weights(order, &nodes);
        let derivative = derivative_matrix(order, &nodes);
        let barycentric = barycentric_weights(&nodes);
        Ok(Self {
            order,
            nodes,
            weights,
            derivative,
            barycentric,
        })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Points per direction, `order + 1`.
    pub fn n_points(&self) -> usize {
        self.order + 1
    }

    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn derivative_matrix(&self) -> &Mat<f64> {
        &self.derivative
    }

    /// D[i, j], the derivative of the j-th Lagrange basis function at node i.
    #[inline]
    pub fn d(&self, i: usize, j: usize) -> f64 {
        self.derivative[(i, j)]
    }

    /// Matrix `I` with `I[t, j] = ℓ_j(targets[t])`: nodal values → values at `targets`.
    pub fn interpolation_matrix(&self, targets: &[f64]) -> Mat<f64> {
        let n = self.n_points();
        let mut m = Mat::zeros(targets.len(), n);
        for (t, &x) in targets.iter().enumerate() {
            if let Some(j) = self.nodes.iter().position(|&xj| xj == x) {
                m[(t, j)] = 1.0;
                continue;
            }
            let mut denom = 0.0;
            for j in 0..n {
                let c = self.barycentric[j] / (x - self.nodes[j]);
                m[(t, j)] = c;
                denom += c;
            }
            for j in 0..n {
                m[(t, j)] /= denom;
            }
        }
        m
    }
}

/// GLL nodes by Newton iteration from Chebyshev-Lobatto initial guesses.
fn gll_nodes(order: usize) -> Vec<f64> {
    let n = order;
    let mut nodes: Vec<f64> = (0..=n).map(|j| -(PI * j as f64 / n as f64).cos()).collect();
    nodes[0] = -1.0;
    nodes[n] = 1.0;

    // L(x) = (1-x²) P'_N(x) has L'(x) = -N(N+1) P_N(x), giving the update below
    for x in nodes.iter_mut().take(n).skip(1) {
        for _ in 0..100 {
            let (p, dp) = legendre_and_derivative(n, *x);
            let update = (1.0 - *x * *x) * dp / ((n * (n + 1)) as f64 * p);
            *x += update;
            if update.abs() < 1e-15 {
                break;
            }
        }
    }

    // exact symmetry about 0
    for j in 0..(n + 1) / 2 {
        let s = 0.5 * (nodes[n - j] - nodes[j]);
        nodes[j] = -s;
        nodes[n - j] = s;
    }
    if n % 2 == 0 {
        nodes[n / 2] = 0.0;
    }
    nodes
}

/// w_j = 2 / (N(N+1) P_N(x_j)²)
fn gll_weights(order: usize, nodes: &[f64]) -> Vec<f64> {
    let denom = (order * (order + 1)) as f64;
    nodes
        .iter()
        .map(|&x| {
            let p = legendre(order, x);
            2.0 / (denom * p * p)
        })
        .collect()
}

/// Closed-form GLL differentiation matrix.
fn derivative_matrix(order: usize, nodes: &[f64]) -> Mat<f64> {
    let n = order + 1;
    let p: Vec<f64> = nodes.iter().map(|&x| legendre(order, x)).collect();
    let mut d = Mat::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            if i != j {
                d[(i, j)] = p[i] / (p[j] * (nodes[i] - nodes[j]));
            }
        }
    }
    let corner = (order * (order + 1)) as f64 / 4.0;
    d[(0, 0)] = -corner;
    d[(n - 1, n - 1)] = corner;
    d
}

fn barycentric_weights(nodes: &[f64]) -> Vec<f64> {
    nodes
        .iter()
        .enumerate()
        .map(|(j, &xj)| {
            let prod: f64 = nodes
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != j)
                .map(|(_, &xk)| xj - xk)
                .product();
            1.0 / prod
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_zero_rejected() {
        assert!(matches!(GllQuadrature::new(0), Err(SemError::InvalidOrder(0))));
    }

    #[test]
    fn test_known_rule() {
        let q = GllQuadrature::new(2).unwrap();
        assert_eq!(q.nodes(), &[-1.0, 0.0, 1.0]);
        let w = q.weights();
        assert!((w[0] - 1.0 / 3.0).abs() < 1e-14);
        assert!((w[1] - 4.0 / 3.0).abs() < 1e-14);
        assert!((w[2] - 1.0 / 3.0).abs() < 1e-14);
    }

    #[test]
    fn test_nodes_are_roots() {
        for order in 2..=8 {
            let q = GllQuadrature::new(order).unwrap();
            for &x in &q.nodes()[1..order] {
                let (_, dp) = legendre_and_derivative(order, x);
                assert!(dp.abs() < 1e-11, "order {}: P'_N({}) = {}", order, x, dp);
            }
        }
    }

    #[test]
    fn test_quadrature_exactness() {
        // exact for degree <= 2N - 1
        for order in 1..=7 {
            let q = GllQuadrature::new(order).unwrap();
            for k in 0..=(2 * order - 1) {
                let exact = if k % 2 == 0 { 2.0 / (k + 1) as f64 } else { 0.0 };
                let approx: f64 = q
                    .nodes()
                    .iter()
                    .zip(q.weights())
                    .map(|(&x, &w)| w * x.powi(k as i32))
                    .sum();
                assert!((approx - exact).abs() < 1e-12, "order {}, degree {}", order, k);
            }
        }
    }

    #[test]
    fn test_derivative_exact_for_polynomials() {
        for order in 1..=7 {
            let q = GllQuadrature::new(order).unwrap();
            let n = q.n_points();
            for k in 0..=order {
                let f: Vec<f64> = q.nodes().iter().map(|&x| x.powi(k as i32)).collect();
                for i in 0..n {
                    let df: f64 = (0..n).map(|j| q.d(i, j) * f[j]).sum();
                    let exact = if k == 0 {
                        0.0
                    } else {
                        k as f64 * q.nodes()[i].powi(k as i32 - 1)
                    };
                    assert!((df - exact).abs() < 1e-10, "order {}, x^{} at node {}", order, k, i);
                }
            }
        }
    }

    #[test]
    fn test_derivative_rows_sum_to_zero() {
        let q = GllQuadrature::new(5).unwrap();
        let d = q.derivative_matrix();
        for i in 0..d.nrows() {
            let s: f64 = (0..d.ncols()).map(|j| d[(i, j)]).sum();
            assert!(s.abs() < 1e-12);
        }
    }

    #[test]
    fn test_interpolation_matrix() {
        let q = GllQuadrature::new(4).unwrap();
        let targets = [-1.0, -0.37, 0.2, 0.91, 1.0];
        let m = q.interpolation_matrix(&targets);
        let f: Vec<f64> = q.nodes().iter().map(|&x| 1.0 + x - 2.0 * x.powi(3)).collect();
        for (t, &x) in targets.iter().enumerate() {
            let v: f64 = (0..q.n_points()).map(|j| m[(t, j)] * f[j]).sum();
            assert!((v - (1.0 + x - 2.0 * x.powi(3))).abs() < 1e-12);
        }
        // identity on own nodes
        let own = q.interpolation_matrix(q.nodes());
        for i in 0..q.n_points() {
            for j in 0..q.n_points() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(own[(i, j)], expected);
            }
        }
    }
}
