//! Explicit time integration of semi-discrete systems.

mod ssp_rk3;

pub use ssp_rk3::{compute_dt, ssp_rk3_step, State};
