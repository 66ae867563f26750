//! Strong Stability Preserving Runge-Kutta time integration.
//!
//! SSP-RK3 (Shu-Osher form) keeps the total-variation bounds of a forward
//! Euler step under the same CFL restriction.

use crate::error::Result;
use crate::field::{Field, FieldValue};
use crate::rhs::RightHandSide;
use crate::space::{Space, SpectralElementSpace2D};

/// Vector-space operations needed by the stage updates.
pub trait State: Clone {
    /// self <- c * self
    fn scale(&mut self, c: f64);

    /// self <- self + c * other; fails without writing if the shapes differ
    fn axpy(&mut self, c: f64, other: &Self) -> Result<()>;
}

impl<S: Space, T: FieldValue> State for Field<S, T> {
    fn scale(&mut self, c: f64) {
        Field::scale(self, c);
    }

    fn axpy(&mut self, c: f64, other: &Self) -> Result<()> {
        Field::axpy(self, c, other)
    }
}

/// Advance `state` from `t` to `t + dt`.
///
/// u1 = u + dt L(u, t)
/// u2 = 3/4 u + 1/4 u1 + 1/4 dt L(u1, t + dt)
/// u_new = 1/3 u + 2/3 u2 + 2/3 dt L(u2, t + dt/2)
///
/// On error `state` is left unchanged.
pub fn ssp_rk3_step<R>(
    rhs: &R,
    state: &mut R::State,
    params: &R::Params,
    t: f64,
    dt: f64,
) -> Result<()>
where
    R: RightHandSide,
    R::State: State,
{
    let mut l = state.clone();

    // Stage 1
    rhs.evaluate(&mut l, state, params, t)?;
    let mut u1 = state.clone();
    u1.axpy(dt, &l)?;

    // Stage 2
    rhs.evaluate(&mut l, &u1, params, t + dt)?;
    let mut u2 = state.clone();
    u2.scale(0.75);
    u2.axpy(0.25, &u1)?;
    u2.axpy(0.25 * dt, &l)?;

    // Stage 3
    rhs.evaluate(&mut l, &u2, params, t + 0.5 * dt)?;
    let mut next = state.clone();
    next.scale(1.0 / 3.0);
    next.axpy(2.0 / 3.0, &u2)?;
    next.axpy(2.0 / 3.0 * dt, &l)?;
    *state = next;
    Ok(())
}

/// CFL-limited step for advection at speed `speed` on a spectral-element space.
///
/// dt = cfl · Δx_min / |speed|, where Δx_min is the smallest distance between
/// neighbouring GLL nodes of any element.
pub fn compute_dt(space: &SpectralElementSpace2D, speed: f64, cfl: f64) -> f64 {
    let speed = speed.abs();
    if speed < 1e-14 {
        return f64::INFINITY;
    }
    let nq = space.nq();
    let mut dx_min = f64::INFINITY;
    for geometry in space.local_geometry().chunks(nq * nq) {
        for j in 0..nq {
            for i in 0..nq {
                let [x, y] = geometry[j * nq + i].coordinate;
                let mut neighbours = Vec::with_capacity(2);
                if i + 1 < nq {
                    neighbours.push(geometry[j * nq + i + 1].coordinate);
                }
                if j + 1 < nq {
                    neighbours.push(geometry[(j + 1) * nq + i].coordinate);
                }
                for [xn, yn] in neighbours {
                    dx_min = dx_min.min((xn - x).hypot(yn - y));
                }
            }
        }
    }
    tracing::debug!(dx_min, speed, cfl, "computed advective time step");
    cfl * dx_min / speed
}
