//! Staggered finite-difference operators on vertical columns.
//!
//! Centers `c[0..n]` and faces `f[0..=n]` are related by two-point stencils.
//! Center quantities use the reference cell ξ ∈ [-1, 1], so two neighbouring
//! faces are two units apart. Face quantities use the dual cell, in which two
//! neighbouring centers are one unit apart and a boundary face lies half a
//! unit from its cell center:
//!
//! ```text
//!          f[k] ---- c[k] ---- f[k+1]
//! center ξ: -1        0          1
//!        c[k-1] ---- f[k] ---- c[k]
//! face ξ:   -½        0          ½
//! ```
//!
//! Vector inputs are converted to contravariant components with the geometry
//! of the node they live on; gradients come out covariant.

use std::marker::PhantomData;

use crate::bidiagonal::GeneralBidiagonal;
use crate::error::{Result, SemError};
use crate::field::{Field, FieldValue};
use crate::geometry::{Contravariant3, Covariant3, VerticalVector, WVector};
use crate::space::{ColumnGeometry, ExtrudedSpace, FiniteDifferenceSpace, Space, Staggering};

use super::boundary::{BoundaryCondition, ColumnBoundaries, ColumnEdge};

/// A single-input column stencil.
pub trait ColumnOperator: Sync {
    type Input: FieldValue;
    type Output: FieldValue;

    fn name(&self) -> &'static str;

    fn input_staggering(&self) -> Staggering;

    fn output_staggering(&self) -> Staggering;

    /// Evaluate the stencil on one column. `input` and `out` have the lengths
    /// of their staggerings on `column`.
    fn apply_column(
        &self,
        column: &ColumnGeometry,
        input: &[Self::Input],
        out: &mut [Self::Output],
    );

    /// Write the operator applied to `input` into `out`.
    ///
    /// Both fields are checked before anything is written.
    fn apply(
        &self,
        input: &Field<FiniteDifferenceSpace, Self::Input>,
        out: &mut Field<FiniteDifferenceSpace, Self::Output>,
    ) -> Result<()> {
        check_staggering(self.name(), input.space().staggering(), self.input_staggering())?;
        check_staggering(self.name(), out.space().staggering(), self.output_staggering())?;
        if !input.space().same_column(out.space()) {
            return Err(SemError::SpaceMismatch(format!(
                "{}: input and output live on different columns",
                self.name()
            )));
        }
        self.apply_column(input.space().column(), input.values(), out.values_mut());
        Ok(())
    }

    /// Allocate the output field and apply the operator.
    fn evaluate(
        &self,
        input: &Field<FiniteDifferenceSpace, Self::Input>,
    ) -> Result<Field<FiniteDifferenceSpace, Self::Output>> {
        let space = match self.output_staggering() {
            Staggering::CellCenter => input.space().center_space(),
            Staggering::CellFace => input.space().face_space(),
        };
        let mut out = Field::zeros(space);
        self.apply(input, &mut out)?;
        Ok(out)
    }

    /// Apply the operator independently on every column of an extruded field.
    fn apply_extruded(
        &self,
        input: &Field<ExtrudedSpace, Self::Input>,
        out: &mut Field<ExtrudedSpace, Self::Output>,
    ) -> Result<()> {
        let (si, so) = (input.space(), out.space());
        check_staggering(self.name(), si.staggering(), self.input_staggering())?;
        check_staggering(self.name(), so.staggering(), self.output_staggering())?;
        if !si.horizontal().is_compatible(so.horizontal()) || !si.vertical().same_column(so.vertical()) {
            return Err(SemError::SpaceMismatch(format!(
                "{}: {} vs {}",
                self.name(),
                si.describe(),
                so.describe()
            )));
        }
        let column = si.vertical().column().clone();
        let (ni, no) = (si.n_levels(), so.n_levels());

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            input
                .values()
                .par_chunks(ni)
                .zip(out.values_mut().par_chunks_mut(no))
                .for_each(|(ci, co)| self.apply_column(&column, ci, co));
        }
        #[cfg(not(feature = "parallel"))]
        for (ci, co) in input.values().chunks(ni).zip(out.values_mut().chunks_mut(no)) {
            self.apply_column(&column, ci, co);
        }
        Ok(())
    }
}

fn check_staggering(operator: &str, actual: Staggering, expected: Staggering) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(SemError::SpaceMismatch(format!(
            "{}: expected {:?} field, got {:?}",
            operator, expected, actual
        )))
    }
}

/// Linear interpolation from faces to centers.
#[derive(Clone, Copy, Debug, Default)]
pub struct InterpolateF2C<T = f64> {
    _value: PhantomData<T>,
}

impl<T> InterpolateF2C<T> {
    pub fn new() -> Self {
        Self {
            _value: PhantomData,
        }
    }
}

impl<T: FieldValue> ColumnOperator for InterpolateF2C<T> {
    type Input = T;
    type Output = T;

    fn name(&self) -> &'static str {
        "InterpolateF2C"
    }

    fn input_staggering(&self) -> Staggering {
        Staggering::CellFace
    }

    fn output_staggering(&self) -> Staggering {
        Staggering::CellCenter
    }

    fn apply_column(&self, _column: &ColumnGeometry, f: &[T], out: &mut [T]) {
        for (k, o) in out.iter_mut().enumerate() {
            *o = (f[k] + f[k + 1]) * 0.5;
        }
    }
}

/// Linear interpolation from centers to faces.
///
/// Boundary faces take `SetValue`, `SetGradient` (physical derivative over
/// the half cell) or `Extrapolate` (nearest center value).
#[derive(Clone, Copy, Debug)]
pub struct InterpolateC2F {
    bottom: BoundaryCondition,
    top: BoundaryCondition,
}

impl InterpolateC2F {
    /// # Arguments
    /// * `boundaries` - `SetValue`, `SetGradient` or `Extrapolate` on each edge
    ///
    /// # Returns
    /// `MissingBoundaryCondition` if an edge is unset, `UnsupportedBoundaryCondition`
    /// for any other kind.
    pub fn new(boundaries: ColumnBoundaries) -> Result<Self> {
        boundaries.validate(
            "InterpolateC2F",
            &["SetValue", "SetGradient", "Extrapolate"],
            true,
        )?;
        let (bottom, top) = required_pair(&boundaries, "InterpolateC2F")?;
        Ok(Self { bottom, top })
    }
}

impl ColumnOperator for InterpolateC2F {
    type Input = f64;
    type Output = f64;

    fn name(&self) -> &'static str {
        "InterpolateC2F"
    }

    fn input_staggering(&self) -> Staggering {
        Staggering::CellCenter
    }

    fn output_staggering(&self) -> Staggering {
        Staggering::CellFace
    }

    fn apply_column(&self, column: &ColumnGeometry, c: &[f64], out: &mut [f64]) {
        let n = c.len();
        for k in 1..n {
            out[k] = 0.5 * (c[k - 1] + c[k]);
        }
        let (zc, zf) = (column.centers(), column.faces());
        let half_bottom = zc[0].coordinate - zf[0].coordinate;
        let half_top = zf[n].coordinate - zc[n - 1].coordinate;
        out[0] = match self.bottom {
            BoundaryCondition::SetValue(v) => v,
            BoundaryCondition::SetGradient(g) => c[0] - g * half_bottom,
            _ => c[0],
        };
        out[n] = match self.top {
            BoundaryCondition::SetValue(v) => v,
            BoundaryCondition::SetGradient(g) => c[n - 1] + g * half_top,
            _ => c[n - 1],
        };
    }
}

/// Gradient of a face scalar at centers, as a covariant component.
///
/// An optional `SetValue` replaces the boundary face value before
/// differencing.
#[derive(Clone, Copy, Debug)]
pub struct GradientF2C {
    bottom: Option<f64>,
    top: Option<f64>,
}

impl GradientF2C {
    /// Boundary conditions are optional; only `SetValue` is accepted.
    pub fn new(boundaries: ColumnBoundaries) -> Result<Self> {
        boundaries.validate("GradientF2C", &["SetValue"], false)?;
        Ok(Self {
            bottom: set_value(boundaries.get(ColumnEdge::Bottom)),
            top: set_value(boundaries.get(ColumnEdge::Top)),
        })
    }
}

impl ColumnOperator for GradientF2C {
    type Input = f64;
    type Output = Covariant3;

    fn name(&self) -> &'static str {
        "GradientF2C"
    }

    fn input_staggering(&self) -> Staggering {
        Staggering::CellFace
    }

    fn output_staggering(&self) -> Staggering {
        Staggering::CellCenter
    }

    fn apply_column(&self, _column: &ColumnGeometry, f: &[f64], out: &mut [Covariant3]) {
        let n = out.len();
        let face = |k: usize| match (k, self.bottom, self.top) {
            (0, Some(v), _) => v,
            (k, _, Some(v)) if k == n => v,
            _ => f[k],
        };
        for (k, o) in out.iter_mut().enumerate() {
            *o = Covariant3::new(0.5 * (face(k + 1) - face(k)));
        }
    }
}

/// Gradient of a center scalar at faces, as a covariant component.
///
/// Boundary faces need `SetValue` (one-sided difference over the half cell)
/// or `SetGradient` (prescribed physical derivative).
#[derive(Clone, Copy, Debug)]
pub struct GradientC2F {
    bottom: BoundaryCondition,
    top: BoundaryCondition,
}

impl GradientC2F {
    /// # Arguments
    /// * `boundaries` - `SetValue` or `SetGradient` on both edges
    ///
    /// # Returns
    /// `MissingBoundaryCondition` or `UnsupportedBoundaryCondition` on a bad edge.
    pub fn new(boundaries: ColumnBoundaries) -> Result<Self> {
        boundaries.validate("GradientC2F", &["SetValue", "SetGradient"], true)?;
        let (bottom, top) = required_pair(&boundaries, "GradientC2F")?;
        Ok(Self { bottom, top })
    }

    /// Linear part of the operator as an `(n+1) × n` lower-bidiagonal matrix
    /// mapping center values to covariant face components. Constant boundary
    /// contributions are dropped.
    pub fn matrix(&self, space: &FiniteDifferenceSpace) -> Result<GeneralBidiagonal> {
        let n = space.n_elements();
        let mut m = GeneralBidiagonal::lower(n + 1, n);
        for k in 1..n {
            m.set(k, k - 1, -1.0)?;
            m.set(k, k, 1.0)?;
        }
        if let BoundaryCondition::SetValue(_) = self.bottom {
            m.set(0, 0, 2.0)?;
        }
        if let BoundaryCondition::SetValue(_) = self.top {
            m.set(n, n - 1, -2.0)?;
        }
        Ok(m)
    }
}

impl ColumnOperator for GradientC2F {
    type Input = f64;
    type Output = Covariant3;

    fn name(&self) -> &'static str {
        "GradientC2F"
    }

    fn input_staggering(&self) -> Staggering {
        Staggering::CellCenter
    }

    fn output_staggering(&self) -> Staggering {
        Staggering::CellFace
    }

    fn apply_column(&self, column: &ColumnGeometry, c: &[f64], out: &mut [Covariant3]) {
        let n = c.len();
        for k in 1..n {
            out[k] = Covariant3::new(c[k] - c[k - 1]);
        }
        let faces = column.faces();
        out[0] = match self.bottom {
            BoundaryCondition::SetValue(v) => Covariant3::new(2.0 * (c[0] - v)),
            BoundaryCondition::SetGradient(g) => WVector::new(g).to_covariant(&faces[0]),
            _ => Covariant3::default(),
        };
        out[n] = match self.top {
            BoundaryCondition::SetValue(v) => Covariant3::new(2.0 * (v - c[n - 1])),
            BoundaryCondition::SetGradient(g) => WVector::new(g).to_covariant(&faces[n]),
            _ => Covariant3::default(),
        };
    }
}

/// Divergence of a face vector at centers.
///
/// Optional policies: `SetValue` replaces the boundary flux, `SetDivergence`
/// fixes the edge cell's result, `Extrapolate` copies the neighbouring cell.
#[derive(Clone, Copy, Debug)]
pub struct DivergenceF2C<V = Contravariant3> {
    bottom: Option<BoundaryCondition>,
    top: Option<BoundaryCondition>,
    _vector: PhantomData<V>,
}

impl<V> DivergenceF2C<V> {
    /// # Arguments
    /// * `boundaries` - optional `SetValue`, `SetDivergence` or `Extrapolate` per edge
    ///
    /// # Returns
    /// `UnsupportedBoundaryCondition` for any other kind.
    pub fn new(boundaries: ColumnBoundaries) -> Result<Self> {
        boundaries.validate(
            "DivergenceF2C",
            &["SetValue", "SetDivergence", "Extrapolate"],
            false,
        )?;
        Ok(Self {
            bottom: boundaries.get(ColumnEdge::Bottom),
            top: boundaries.get(ColumnEdge::Top),
            _vector: PhantomData,
        })
    }

    /// Linear part as an `n × (n+1)` upper-bidiagonal matrix acting on
    /// contravariant face components.
    ///
    /// `Extrapolate` couples three faces and has no bidiagonal form.
    pub fn matrix(&self, space: &FiniteDifferenceSpace) -> Result<GeneralBidiagonal> {
        if [self.bottom, self.top].contains(&Some(BoundaryCondition::Extrapolate)) {
            return Err(SemError::StructuralMismatch(
                "DivergenceF2C with Extrapolate is not bidiagonal".into(),
            ));
        }
        let column = space.column();
        let (centers, faces) = (column.centers(), column.faces());
        let n = centers.len();
        let mut m = GeneralBidiagonal::upper(n, n + 1);
        for k in 0..n {
            let s = 0.5 / centers[k].j;
            m.set(k, k, -s * faces[k].j)?;
            m.set(k, k + 1, s * faces[k + 1].j)?;
        }
        match self.bottom {
            Some(BoundaryCondition::SetValue(_)) => m.set(0, 0, 0.0)?,
            Some(BoundaryCondition::SetDivergence(_)) => {
                m.set(0, 0, 0.0)?;
                m.set(0, 1, 0.0)?;
            }
            _ => {}
        }
        match self.top {
            Some(BoundaryCondition::SetValue(_)) => m.set(n - 1, n, 0.0)?,
            Some(BoundaryCondition::SetDivergence(_)) => {
                m.set(n - 1, n - 1, 0.0)?;
                m.set(n - 1, n, 0.0)?;
            }
            _ => {}
        }
        Ok(m)
    }
}

impl<V: VerticalVector + FieldValue> ColumnOperator for DivergenceF2C<V> {
    type Input = V;
    type Output = f64;

    fn name(&self) -> &'static str {
        "DivergenceF2C"
    }

    fn input_staggering(&self) -> Staggering {
        Staggering::CellFace
    }

    fn output_staggering(&self) -> Staggering {
        Staggering::CellCenter
    }

    fn apply_column(&self, column: &ColumnGeometry, u: &[V], out: &mut [f64]) {
        let (centers, faces) = (column.centers(), column.faces());
        let n = out.len();
        // J u^3 at a face
        let flux = |k: usize| -> f64 {
            match (k, self.bottom, self.top) {
                (0, Some(BoundaryCondition::SetValue(v)), _) => v,
                (k, _, Some(BoundaryCondition::SetValue(v))) if k == n => v,
                _ => faces[k].j * u[k].to_contravariant(&faces[k]).u3,
            }
        };
        let mut below = flux(0);
        for k in 0..n {
            let above = flux(k + 1);
            out[k] = 0.5 * (above - below) / centers[k].j;
            below = above;
        }
        match self.bottom {
            Some(BoundaryCondition::SetDivergence(d)) => out[0] = d,
            Some(BoundaryCondition::Extrapolate) if n > 1 => out[0] = out[1],
            _ => {}
        }
        match self.top {
            Some(BoundaryCondition::SetDivergence(d)) => out[n - 1] = d,
            Some(BoundaryCondition::Extrapolate) if n > 1 => out[n - 1] = out[n - 2],
            _ => {}
        }
    }
}

/// Divergence of a center vector at faces.
///
/// Boundary faces need `SetValue` (boundary flux, one-sided difference) or
/// `SetDivergence`.
#[derive(Clone, Copy, Debug)]
pub struct DivergenceC2F<V = Contravariant3> {
    bottom: BoundaryCondition,
    top: BoundaryCondition,
    _vector: PhantomData<V>,
}

impl<V> DivergenceC2F<V> {
    /// Both edges must be set, to `SetValue` or `SetDivergence`.
    pub fn new(boundaries: ColumnBoundaries) -> Result<Self> {
        boundaries.validate("DivergenceC2F", &["SetValue", "SetDivergence"], true)?;
        let (bottom, top) = required_pair(&boundaries, "DivergenceC2F")?;
        Ok(Self {
            bottom,
            top,
            _vector: PhantomData,
        })
    }
}

impl<V: VerticalVector + FieldValue> ColumnOperator for DivergenceC2F<V> {
    type Input = V;
    type Output = f64;

    fn name(&self) -> &'static str {
        "DivergenceC2F"
    }

    fn input_staggering(&self) -> Staggering {
        Staggering::CellCenter
    }

    fn output_staggering(&self) -> Staggering {
        Staggering::CellFace
    }

    fn apply_column(&self, column: &ColumnGeometry, u: &[V], out: &mut [f64]) {
        let (centers, faces) = (column.centers(), column.faces());
        let n = u.len();
        let flux = |k: usize| centers[k].j * u[k].to_contravariant(&centers[k]).u3;
        for k in 1..n {
            out[k] = (flux(k) - flux(k - 1)) / faces[k].j;
        }
        out[0] = match self.bottom {
            BoundaryCondition::SetValue(v) => 2.0 * (flux(0) - v) / faces[0].j,
            BoundaryCondition::SetDivergence(d) => d,
            _ => 0.0,
        };
        out[n] = match self.top {
            BoundaryCondition::SetValue(v) => 2.0 * (v - flux(n - 1)) / faces[n].j,
            BoundaryCondition::SetDivergence(d) => d,
            _ => 0.0,
        };
    }
}

/// Advective tendency `u · ∇θ` of a center scalar by a face velocity.
///
/// Each center averages the two face terms `u^3 ∂θ/∂ξ`. At an edge,
/// `SetValue` differences against the boundary value, `Extrapolate` assumes a
/// zero boundary gradient, and `FluxCorrection` uses the interior face term
/// alone for the whole edge cell.
#[derive(Clone, Copy, Debug)]
pub struct AdvectionC2C<V = Contravariant3> {
    bottom: BoundaryCondition,
    top: BoundaryCondition,
    _vector: PhantomData<V>,
}

impl<V: VerticalVector + FieldValue> AdvectionC2C<V> {
    /// # Arguments
    /// * `boundaries` - `SetValue`, `Extrapolate` or `FluxCorrection` on both edges
    ///
    /// # Returns
    /// `MissingBoundaryCondition` or `UnsupportedBoundaryCondition` on a bad edge.
    pub fn new(boundaries: ColumnBoundaries) -> Result<Self> {
        boundaries.validate(
            "AdvectionC2C",
            &["SetValue", "Extrapolate", "FluxCorrection"],
            true,
        )?;
        let (bottom, top) = required_pair(&boundaries, "AdvectionC2C")?;
        Ok(Self {
            bottom,
            top,
            _vector: PhantomData,
        })
    }

    /// Write the tendency of `theta` under `velocity` into `out`.
    ///
    /// # Arguments
    /// * `velocity` - face field
    /// * `theta` - center scalar
    /// * `out` - center field on the same column as `theta`
    ///
    /// # Returns
    /// `SpaceMismatch` on a wrong staggering or column; `out` is then untouched.
    pub fn apply(
        &self,
        velocity: &Field<FiniteDifferenceSpace, V>,
        theta: &Field<FiniteDifferenceSpace, f64>,
        out: &mut Field<FiniteDifferenceSpace, f64>,
    ) -> Result<()> {
        check_staggering("AdvectionC2C", velocity.space().staggering(), Staggering::CellFace)?;
        check_staggering("AdvectionC2C", theta.space().staggering(), Staggering::CellCenter)?;
        theta.check_space(out)?;
        if !velocity.space().same_column(theta.space()) {
            return Err(SemError::SpaceMismatch(
                "AdvectionC2C: velocity and scalar live on different columns".into(),
            ));
        }
        self.apply_column(
            theta.space().column(),
            velocity.values(),
            theta.values(),
            out.values_mut(),
        );
        Ok(())
    }

    pub fn evaluate(
        &self,
        velocity: &Field<FiniteDifferenceSpace, V>,
        theta: &Field<FiniteDifferenceSpace, f64>,
    ) -> Result<Field<FiniteDifferenceSpace, f64>> {
        let mut out = Field::zeros(theta.space().clone());
        self.apply(velocity, theta, &mut out)?;
        Ok(out)
    }

    /// Stencil on one column.
    pub fn apply_column(&self, column: &ColumnGeometry, w: &[V], theta: &[f64], out: &mut [f64]) {
        let faces = column.faces();
        let n = theta.len();
        let u3 = |k: usize| w[k].to_contravariant(&faces[k]).u3;

        // u^3 ∂θ/∂ξ at every face
        let term = |k: usize| -> f64 {
            if k == 0 {
                match self.bottom {
                    BoundaryCondition::SetValue(v) => 2.0 * u3(0) * (theta[0] - v),
                    _ => 0.0,
                }
            } else if k == n {
                match self.top {
                    BoundaryCondition::SetValue(v) => 2.0 * u3(n) * (v - theta[n - 1]),
                    _ => 0.0,
                }
            } else {
                u3(k) * (theta[k] - theta[k - 1])
            }
        };

        let mut below = term(0);
        for k in 0..n {
            let above = term(k + 1);
            out[k] = 0.5 * (below + above);
            below = above;
        }
        if self.bottom == BoundaryCondition::FluxCorrection {
            out[0] = term(1);
        }
        if self.top == BoundaryCondition::FluxCorrection {
            out[n - 1] = term(n - 1);
        }
    }
}

/// First-order upwind face flux `w θ_upwind` of a center scalar.
///
/// At an inflow edge the upwind value comes from `SetValue`, or from the
/// edge cell under `Extrapolate`.
#[derive(Clone, Copy, Debug)]
pub struct UpwindProductC2F<V = Contravariant3> {
    bottom: BoundaryCondition,
    top: BoundaryCondition,
    _vector: PhantomData<V>,
}

impl<V: VerticalVector + FieldValue> UpwindProductC2F<V> {
    pub fn new(boundaries: ColumnBoundaries) -> Result<Self> {
        boundaries.validate("UpwindProductC2F", &["SetValue", "Extrapolate"], true)?;
        let (bottom, top) = required_pair(&boundaries, "UpwindProductC2F")?;
        Ok(Self {
            bottom,
            top,
            _vector: PhantomData,
        })
    }

    pub fn apply(
        &self,
        velocity: &Field<FiniteDifferenceSpace, V>,
        theta: &Field<FiniteDifferenceSpace, f64>,
        out: &mut Field<FiniteDifferenceSpace, WVector>,
    ) -> Result<()> {
        check_staggering("UpwindProductC2F", velocity.space().staggering(), Staggering::CellFace)?;
        check_staggering("UpwindProductC2F", theta.space().staggering(), Staggering::CellCenter)?;
        velocity.check_space(out)?;
        if !velocity.space().same_column(theta.space()) {
            return Err(SemError::SpaceMismatch(
                "UpwindProductC2F: velocity and scalar live on different columns".into(),
            ));
        }
        self.apply_column(
            theta.space().column(),
            velocity.values(),
            theta.values(),
            out.values_mut(),
        );
        Ok(())
    }

    pub fn evaluate(
        &self,
        velocity: &Field<FiniteDifferenceSpace, V>,
        theta: &Field<FiniteDifferenceSpace, f64>,
    ) -> Result<Field<FiniteDifferenceSpace, WVector>> {
        let mut out = Field::zeros(velocity.space().clone());
        self.apply(velocity, theta, &mut out)?;
        Ok(out)
    }

    pub fn apply_column(
        &self,
        column: &ColumnGeometry,
        w: &[V],
        theta: &[f64],
        out: &mut [WVector],
    ) {
        let faces = column.faces();
        let n = theta.len();
        for k in 0..=n {
            let wk = w[k].to_physical(&faces[k]).w;
            let upwind = if k == 0 {
                match self.bottom {
                    BoundaryCondition::SetValue(v) if wk > 0.0 => v,
                    _ => theta[0],
                }
            } else if k == n {
                match self.top {
                    BoundaryCondition::SetValue(v) if wk < 0.0 => v,
                    _ => theta[n - 1],
                }
            } else if wk > 0.0 {
                theta[k - 1]
            } else {
                theta[k]
            };
            out[k] = WVector::new(wk * upwind);
        }
    }
}

fn set_value(bc: Option<BoundaryCondition>) -> Option<f64> {
    match bc {
        Some(BoundaryCondition::SetValue(v)) => Some(v),
        _ => None,
    }
}

fn required_pair(
    boundaries: &ColumnBoundaries,
    operator: &'static str,
) -> Result<(BoundaryCondition, BoundaryCondition)> {
    let get = |edge: ColumnEdge| {
        boundaries
            .get(edge)
            .ok_or(SemError::MissingBoundaryCondition {
                operator,
                edge: edge.name(),
            })
    };
    Ok((get(ColumnEdge::Bottom)?, get(ColumnEdge::Top)?))
}
