//! Vector representations and their metric transformations.
//!
//! Horizontal vectors can be stored as physical (u, v) components, as
//! covariant components u_i = u · ∂x/∂ξ^i, or as contravariant components
//! u^i = ∇ξ^i · u. Gradients naturally come out covariant, divergences consume
//! contravariant components. The vertical analogues carry one component.

use std::ops::{Add, Mul, Neg, Sub};

use super::local::{LocalGeometry1D, LocalGeometry2D};

macro_rules! impl_vector_arith {
    ($name:ident { $($f:ident),+ }) => {
        impl Add for $name {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($f: self.$f + rhs.$f),+ }
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($f: self.$f - rhs.$f),+ }
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;
            #[inline]
            fn mul(self, s: f64) -> Self {
                Self { $($f: self.$f * s),+ }
            }
        }

        impl Neg for $name {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self { $($f: -self.$f),+ }
            }
        }
    };
}

/// Physical horizontal components (u, v).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UVVector {
    pub u: f64,
    pub v: f64,
}

/// Covariant horizontal components (u_1, u_2).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Covariant12 {
    pub u1: f64,
    pub u2: f64,
}

/// Contravariant horizontal components (u^1, u^2).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contravariant12 {
    pub u1: f64,
    pub u2: f64,
}

/// Physical vertical component w.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WVector {
    pub w: f64,
}

/// Covariant vertical component u_3.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Covariant3 {
    pub u3: f64,
}

/// Contravariant vertical component u^3.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contravariant3 {
    pub u3: f64,
}

impl_vector_arith!(UVVector { u, v });
impl_vector_arith!(Covariant12 { u1, u2 });
impl_vector_arith!(Contravariant12 { u1, u2 });
impl_vector_arith!(WVector { w });
impl_vector_arith!(Covariant3 { u3 });
impl_vector_arith!(Contravariant3 { u3 });

impl UVVector {
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

impl Covariant12 {
    pub fn new(u1: f64, u2: f64) -> Self {
        Self { u1, u2 }
    }
}

impl Contravariant12 {
    pub fn new(u1: f64, u2: f64) -> Self {
        Self { u1, u2 }
    }
}

impl WVector {
    pub fn new(w: f64) -> Self {
        Self { w }
    }
}

impl Covariant3 {
    pub fn new(u3: f64) -> Self {
        Self { u3 }
    }
}

impl Contravariant3 {
    pub fn new(u3: f64) -> Self {
        Self { u3 }
    }
}

/// A horizontal vector in any representation.
pub trait HorizontalVector: Copy {
    /// Physical components at a node.
    fn to_physical(self, g: &LocalGeometry2D) -> UVVector;

    /// Covariant components at a node.
    fn to_covariant(self, g: &LocalGeometry2D) -> Covariant12 {
        let UVVector { u, v } = self.to_physical(g);
        Covariant12 {
            u1: g.dx_dxi[0][0] * u + g.dx_dxi[1][0] * v,
            u2: g.dx_dxi[0][1] * u + g.dx_dxi[1][1] * v,
        }
    }

    /// Contravariant components at a node.
    fn to_contravariant(self, g: &LocalGeometry2D) -> Contravariant12 {
        let UVVector { u, v } = self.to_physical(g);
        Contravariant12 {
            u1: g.dxi_dx[0][0] * u + g.dxi_dx[0][1] * v,
            u2: g.dxi_dx[1][0] * u + g.dxi_dx[1][1] * v,
        }
    }
}

impl HorizontalVector for UVVector {
    fn to_physical(self, _g: &LocalGeometry2D) -> UVVector {
        self
    }
}

impl HorizontalVector for Covariant12 {
    fn to_physical(self, g: &LocalGeometry2D) -> UVVector {
        UVVector {
            u: g.dxi_dx[0][0] * self.u1 + g.dxi_dx[1][0] * self.u2,
            v: g.dxi_dx[0][1] * self.u1 + g.dxi_dx[1][1] * self.u2,
        }
    }

    fn to_covariant(self, _g: &LocalGeometry2D) -> Covariant12 {
        self
    }
}

impl HorizontalVector for Contravariant12 {
    fn to_physical(self, g: &LocalGeometry2D) -> UVVector {
        UVVector {
            u: g.dx_dxi[0][0] * self.u1 + g.dx_dxi[0][1] * self.u2,
            v: g.dx_dxi[1][0] * self.u1 + g.dx_dxi[1][1] * self.u2,
        }
    }

    fn to_contravariant(self, _g: &LocalGeometry2D) -> Contravariant12 {
        self
    }
}

/// A vertical vector in any representation.
pub trait VerticalVector: Copy {
    fn to_physical(self, g: &LocalGeometry1D) -> WVector;

    fn to_covariant(self, g: &LocalGeometry1D) -> Covariant3 {
        Covariant3 {
            u3: self.to_physical(g).w * g.dz_dxi,
        }
    }

    fn to_contravariant(self, g: &LocalGeometry1D) -> Contravariant3 {
        Contravariant3 {
            u3: self.to_physical(g).w * g.dxi_dz,
        }
    }
}

impl VerticalVector for WVector {
    fn to_physical(self, _g: &LocalGeometry1D) -> WVector {
        self
    }
}

impl VerticalVector for Covariant3 {
    fn to_physical(self, g: &LocalGeometry1D) -> WVector {
        WVector {
            w: self.u3 * g.dxi_dz,
        }
    }

    fn to_covariant(self, _g: &LocalGeometry1D) -> Covariant3 {
        self
    }
}

impl VerticalVector for Contravariant3 {
    fn to_physical(self, g: &LocalGeometry1D) -> WVector {
        WVector {
            w: self.u3 * g.dz_dxi,
        }
    }

    fn to_contravariant(self, _g: &LocalGeometry1D) -> Contravariant3 {
        self
    }
}
