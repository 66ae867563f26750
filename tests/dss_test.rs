//! Weighted direct stiffness summation on whole spaces.

use approx::assert_abs_diff_eq;
use sem_rs::config::{ColumnConfig, HorizontalConfig};
use sem_rs::domain::{Axis, IntervalDomain, RectangleDomain};
use sem_rs::field::Field;
use sem_rs::geometry::{Contravariant12, HorizontalVector, UVVector, WVector};
use sem_rs::mesh::RectilinearMesh;
use sem_rs::operators::weighted_dss;
use sem_rs::space::{Space, SpectralElementSpace2D};
use sem_rs::topology::Topology2D;

fn warped_space(order: usize) -> SpectralElementSpace2D {
    let x = IntervalDomain::periodic(0.0, 1.0, Axis::X).unwrap();
    let y = IntervalDomain::new(0.0, 1.0, Axis::Y, ("south", "north")).unwrap();
    let mesh = RectilinearMesh::warped(RectangleDomain::new(x, y).unwrap(), 4, 3, |[x, y]| {
        [x + 0.03 * (6.0 * y).sin(), y + 0.04 * (5.0 * x).cos()]
    })
    .unwrap();
    SpectralElementSpace2D::new(Topology2D::new(mesh), order).unwrap()
}

fn noise(n: usize) -> f64 {
    ((n * 7919 + 13) % 257) as f64 / 257.0 - 0.5
}

#[test]
fn test_dss_is_idempotent() {
    let space = warped_space(4);
    let mut f = Field::from_fn(space, noise);
    weighted_dss(&mut f);
    let once = f.clone();
    weighted_dss(&mut f);
    for (a, b) in f.values().iter().zip(once.values()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-14);
    }
}

#[test]
fn test_dss_leaves_continuous_scalar_unchanged() {
    let space = warped_space(3);
    let f0 = Field::from_fn(space.clone(), |n| {
        let [x, y] = space.local_geometry()[n].coordinate;
        (2.0 * std::f64::consts::PI * x).cos() + y * y
    });
    let mut f = f0.clone();
    weighted_dss(&mut f);
    for (a, b) in f.values().iter().zip(f0.values()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-13);
    }
}

#[test]
fn test_dss_leaves_continuous_vector_unchanged() {
    let space = warped_space(3);
    let f0: Field<_, Contravariant12> = Field::from_fn(space.clone(), |n| {
        let g = &space.local_geometry()[n];
        let [x, y] = g.coordinate;
        UVVector::new(y, -(2.0 * std::f64::consts::PI * x).sin()).to_contravariant(g)
    });
    let mut f = f0.clone();
    weighted_dss(&mut f);
    for (a, b) in f.values().iter().zip(f0.values()) {
        assert_abs_diff_eq!(a.u1, b.u1, epsilon = 1e-12);
        assert_abs_diff_eq!(a.u2, b.u2, epsilon = 1e-12);
    }
}

#[test]
fn test_dss_preserves_integral() {
    let space = warped_space(4);
    let mut f = Field::from_fn(space, noise);
    let before = f.integrate();
    weighted_dss(&mut f);
    assert_abs_diff_eq!(f.integrate(), before, epsilon = 1e-13);
}

#[test]
fn test_dss_makes_copies_agree() {
    let space = HorizontalConfig::unit_square()
        .with_resolution(3, 3)
        .fully_periodic()
        .build()
        .unwrap();
    let mut f = Field::from_fn(space.clone(), noise);
    weighted_dss(&mut f);
    // the four copies of the element-corner vertex agree
    let nq = space.nq();
    let corners = [
        space.node_index(1, 0, 0).unwrap(),
        space.node_index(3, nq - 1, 0).unwrap(),
        space.node_index(7, 0, nq - 1).unwrap(),
        space.node_index(9, nq - 1, nq - 1).unwrap(),
    ];
    for &c in &corners[1..] {
        assert_abs_diff_eq!(f.values()[c], f.values()[corners[0]], epsilon = 1e-15);
    }
}

#[test]
fn test_extruded_dss_keeps_levels_apart() {
    let horizontal = HorizontalConfig::unit_square()
        .with_resolution(2, 2)
        .with_order(2)
        .build()
        .unwrap();
    let space = ColumnConfig::new(0.0, 1.0, 4)
        .with_scale_height(0.5)
        .build_extruded(horizontal)
        .unwrap();
    let nl = space.n_levels();
    let mut f = Field::from_fn(space.clone(), |n| WVector::new((n % nl) as f64 + noise(n / nl)));
    weighted_dss(&mut f);
    let once = f.clone();
    weighted_dss(&mut f);
    for (n, (a, b)) in f.values().iter().zip(once.values()).enumerate() {
        assert_abs_diff_eq!(a.w, b.w, epsilon = 1e-14);
        // each level stays within its own band
        assert!((a.w - (n % nl) as f64).abs() <= 0.5);
    }
    assert_eq!(f.len(), space.n_nodes());
}
