//! Semi-discrete tendencies built from the operators.
//!
//! A [`RightHandSide`] computes `∂state/∂t` for a given state, prescribed
//! parameters and time. It writes only into `out`; no other state changes.

use std::marker::PhantomData;

use crate::error::Result;
use crate::field::{Field, FieldValue};
use crate::geometry::{HorizontalVector, UVVector, VerticalVector};
use crate::operators::{weighted_dss, AdvectionC2C, ColumnBoundaries, WeakDivergence};
use crate::space::{FiniteDifferenceSpace, SpectralElementSpace2D};

/// Tendency of a semi-discrete system.
pub trait RightHandSide: Send + Sync {
    type State;
    type Params;

    /// Write `d state / dt` at time `t` into `out`.
    fn evaluate(
        &self,
        out: &mut Self::State,
        state: &Self::State,
        params: &Self::Params,
        t: f64,
    ) -> Result<()>;
}

/// Conservative transport of a scalar by a prescribed horizontal velocity.
///
/// ∂θ/∂t = -∇·(θu), with the divergence in weak form and made continuous by
/// weighted DSS. The integral of θ is conserved on periodic meshes.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracerAdvection2D<V = UVVector> {
    _velocity: PhantomData<V>,
}

impl<V> TracerAdvection2D<V> {
    pub fn new() -> Self {
        Self {
            _velocity: PhantomData,
        }
    }
}

impl<V: HorizontalVector + FieldValue> RightHandSide for TracerAdvection2D<V> {
    type State = Field<SpectralElementSpace2D, f64>;
    type Params = Field<SpectralElementSpace2D, V>;

    fn evaluate(
        &self,
        out: &mut Self::State,
        state: &Self::State,
        velocity: &Self::Params,
        _t: f64,
    ) -> Result<()> {
        state.check_space(velocity)?;
        let mut flux = velocity.clone();
        for (f, &theta) in flux.values_mut().iter_mut().zip(state.values()) {
            *f = *f * theta;
        }
        WeakDivergence.apply(&flux, out)?;
        weighted_dss(out);
        out.scale(-1.0);
        Ok(())
    }
}

/// Advective form of vertical transport in a single column.
///
/// ∂θ/∂t = -w ∂θ/∂z, with `w` given on cell faces and θ on cell centers.
#[derive(Clone, Copy, Debug)]
pub struct ColumnAdvection<V> {
    operator: AdvectionC2C<V>,
}

impl<V: VerticalVector + FieldValue> ColumnAdvection<V> {
    pub fn new(boundaries: ColumnBoundaries) -> Result<Self> {
        Ok(Self {
            operator: AdvectionC2C::new(boundaries)?,
        })
    }
}

impl<V: VerticalVector + FieldValue> RightHandSide for ColumnAdvection<V> {
    type State = Field<FiniteDifferenceSpace, f64>;
    type Params = Field<FiniteDifferenceSpace, V>;

    fn evaluate(
        &self,
        out: &mut Self::State,
        state: &Self::State,
        velocity: &Self::Params,
        _t: f64,
    ) -> Result<()> {
        self.operator.apply(velocity, state, out)?;
        out.scale(-1.0);
        Ok(())
    }
}
