//! Weighted direct stiffness summation.
//!
//! Spectral elements store every shared node once per element touching it.
//! Weak operators leave those copies with different partial contributions;
//! the weighted DSS replaces each copy with
//!
//! v = Σ_e WJ_e v_e / Σ_e WJ_e
//!
//! over all copies. Vectors are averaged in physical components, since
//! covariant and contravariant components of neighbouring elements refer to
//! different bases.

use std::ops::{Add, Mul};

use crate::field::Field;
use crate::geometry::{
    Contravariant12, Contravariant3, Covariant12, Covariant3, HorizontalVector, LocalGeometry2D,
    UVVector, WVector,
};
use crate::space::{ExtrudedSpace, Space, SpectralElementSpace2D};

/// A value that can be averaged across element copies of a node.
pub trait DssValue: Copy {
    /// Representation in which copies are summed.
    type Sum: Copy + Add<Output = Self::Sum> + Mul<f64, Output = Self::Sum>;

    fn to_sum(self, g: &LocalGeometry2D) -> Self::Sum;

    fn from_sum(sum: Self::Sum, g: &LocalGeometry2D) -> Self;
}

impl DssValue for f64 {
    type Sum = f64;

    #[inline]
    fn to_sum(self, _g: &LocalGeometry2D) -> f64 {
        self
    }

    #[inline]
    fn from_sum(sum: f64, _g: &LocalGeometry2D) -> f64 {
        sum
    }
}

macro_rules! horizontal_dss_value {
    ($t:ty, $from:ident) => {
        impl DssValue for $t {
            type Sum = UVVector;

            #[inline]
            fn to_sum(self, g: &LocalGeometry2D) -> UVVector {
                self.to_physical(g)
            }

            #[inline]
            fn from_sum(sum: UVVector, g: &LocalGeometry2D) -> Self {
                sum.$from(g)
            }
        }
    };
}

horizontal_dss_value!(UVVector, to_physical);
horizontal_dss_value!(Covariant12, to_covariant);
horizontal_dss_value!(Contravariant12, to_contravariant);

// vertical components do not depend on the horizontal metric
macro_rules! vertical_dss_value {
    ($t:ty) => {
        impl DssValue for $t {
            type Sum = $t;

            #[inline]
            fn to_sum(self, _g: &LocalGeometry2D) -> $t {
                self
            }

            #[inline]
            fn from_sum(sum: $t, _g: &LocalGeometry2D) -> $t {
                sum
            }
        }
    };
}

vertical_dss_value!(WVector);
vertical_dss_value!(Covariant3);
vertical_dss_value!(Contravariant3);

/// Spaces whose nodes can be shared between elements.
pub trait DssSpace: Space {
    fn weighted_dss_values<T: DssValue>(&self, values: &mut [T]);
}

impl DssSpace for SpectralElementSpace2D {
    fn weighted_dss_values<T: DssValue>(&self, values: &mut [T]) {
        let geometry = self.local_geometry();
        let mut sums: Vec<T::Sum> = values
            .iter()
            .zip(geometry)
            .map(|(v, g)| v.to_sum(g) * g.wj)
            .collect();
        self.direct_stiffness_sum(&mut sums);
        write_back(values, &sums, geometry, self.dss_weights());
    }
}

impl DssSpace for ExtrudedSpace {
    /// Level by level; the vertical geometry is the same on every column of a
    /// level, so only the horizontal weights enter.
    fn weighted_dss_values<T: DssValue>(&self, values: &mut [T]) {
        let horizontal = self.horizontal();
        let geometry = horizontal.local_geometry();
        let nl = self.n_levels();
        let mut sums: Vec<T::Sum> = Vec::with_capacity(self.n_columns());
        let mut level_values: Vec<T> = Vec::with_capacity(self.n_columns());
        for level in 0..nl {
            level_values.clear();
            level_values.extend(values.iter().skip(level).step_by(nl).copied());
            sums.clear();
            sums.extend(
                level_values
                    .iter()
                    .zip(geometry)
                    .map(|(v, g)| v.to_sum(g) * g.wj),
            );
            horizontal.direct_stiffness_sum(&mut sums);
            write_back(&mut level_values, &sums, geometry, horizontal.dss_weights());
            for (h, v) in level_values.iter().enumerate() {
                values[h * nl + level] = *v;
            }
        }
    }
}

/// Divide the summed numerators by the summed weights at shared nodes.
fn write_back<T: DssValue>(
    values: &mut [T],
    sums: &[T::Sum],
    geometry: &[LocalGeometry2D],
    weights: &[f64],
) {
    for (((v, &s), g), &w) in values.iter_mut().zip(sums).zip(geometry).zip(weights) {
        // an unshared node has exactly its own weight
        if w != g.wj {
            *v = T::from_sum(s * (1.0 / w), g);
        }
    }
}

/// Make `field` continuous across element boundaries by weighted averaging.
///
/// Every shared node becomes Σ WJ·v / Σ WJ over its element copies. Extruded
/// fields are averaged level by level.
///
/// The identity on nodes owned by a single element, and idempotent.
///
/// # Arguments
/// * `field` - spectral or extruded field, updated in place
pub fn weighted_dss<S: DssSpace, T: DssValue>(field: &mut Field<S, T>) {
    let (space, values) = field.parts_mut();
    tracing::trace!(n_nodes = values.len(), "weighted dss");
    space.weighted_dss_values(values);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Axis, IntervalDomain, RectangleDomain};
    use crate::mesh::{IntervalMesh, RectilinearMesh};
    use crate::space::{FiniteDifferenceSpace, Staggering};
    use crate::topology::Topology2D;

    fn space(n1: usize, n2: usize, periodic: bool) -> SpectralElementSpace2D {
        let (x, y) = if periodic {
            (
                IntervalDomain::periodic(0.0, 1.0, Axis::X).unwrap(),
                IntervalDomain::periodic(0.0, 1.0, Axis::Y).unwrap(),
            )
        } else {
            (
                IntervalDomain::new(0.0, 1.0, Axis::X, ("west", "east")).unwrap(),
                IntervalDomain::new(0.0, 1.0, Axis::Y, ("south", "north")).unwrap(),
            )
        };
        let mesh = RectilinearMesh::equispaced(RectangleDomain::new(x, y).unwrap(), n1, n2).unwrap();
        SpectralElementSpace2D::new(Topology2D::new(mesh), 3).unwrap()
    }

    #[test]
    fn test_single_element_is_identity() {
        let s = space(1, 1, false);
        let mut f = Field::from_fn(s, |n| (n as f64 * 0.37).sin());
        let before = f.values().to_vec();
        weighted_dss(&mut f);
        assert_eq!(f.values(), &before[..]);
    }

    #[test]
    fn test_shared_nodes_averaged() {
        let s = space(2, 1, false);
        // element 1 holds 1, element 2 holds 3: the shared face averages to 2
        let npe = s.nodes_per_element();
        let mut f = Field::from_fn(s.clone(), |n| if n < npe { 1.0 } else { 3.0 });
        weighted_dss(&mut f);
        for j in 0..s.nq() {
            let a = s.node_index(1, 3, j).unwrap();
            let b = s.node_index(2, 0, j).unwrap();
            assert!((f.values()[a] - 2.0).abs() < 1e-14);
            assert!((f.values()[b] - 2.0).abs() < 1e-14);
        }
        assert_eq!(f.values()[s.node_index(1, 0, 1).unwrap()], 1.0);
    }

    #[test]
    fn test_idempotent_on_periodic_mesh() {
        let s = space(3, 2, true);
        let mut f = Field::from_fn(s, |n| ((n * 7919) % 101) as f64 / 101.0);
        weighted_dss(&mut f);
        let once = f.values().to_vec();
        weighted_dss(&mut f);
        for (a, b) in f.values().iter().zip(&once) {
            assert!((a - b).abs() < 1e-14);
        }
    }

    #[test]
    fn test_vector_dss_preserves_continuous_field() {
        let s = space(2, 2, false);
        let mut f = Field::from_fn(s.clone(), |n| {
            let g = &s.local_geometry()[n];
            let [x, y] = g.coordinate;
            UVVector::new(x + y, x * y).to_covariant(g)
        });
        let before = f.values().to_vec();
        weighted_dss(&mut f);
        for (a, b) in f.values().iter().zip(&before) {
            assert!((a.u1 - b.u1).abs() < 1e-13 && (a.u2 - b.u2).abs() < 1e-13);
        }
    }

    #[test]
    fn test_extruded_dss_per_level() {
        let horizontal = space(2, 1, false);
        let z = IntervalDomain::new(0.0, 1.0, Axis::Z, ("bottom", "top")).unwrap();
        let vertical =
            FiniteDifferenceSpace::new(IntervalMesh::uniform(z, 3).unwrap(), Staggering::CellCenter)
                .unwrap();
        let s = ExtrudedSpace::new(horizontal.clone(), vertical);
        let npe = horizontal.nodes_per_element();
        let mut f = Field::from_fn(s.clone(), |n| {
            let (h, k) = (n / 3, n % 3);
            let side = if h < npe { 0.0 } else { 2.0 };
            side + 10.0 * k as f64
        });
        weighted_dss(&mut f);
        let shared = horizontal.node_index(2, 0, 1).unwrap();
        for k in 0..3 {
            let v = f.values()[s.node_index(shared, k)];
            assert!((v - (1.0 + 10.0 * k as f64)).abs() < 1e-13);
        }
    }
}
