//! Boundary policies for column operators.
//!
//! Each finite-difference operator reads at most one policy per column edge.
//! Policies are checked against what the operator supports when it is
//! constructed; evaluation never fails on a boundary condition.

use crate::error::{Result, SemError};

/// Policy applied at one edge of a column.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryCondition {
    /// Dirichlet value at the boundary face.
    SetValue(f64),
    /// Physical normal derivative at the boundary face.
    SetGradient(f64),
    /// Value of the divergence at the edge node.
    SetDivergence(f64),
    /// Zero-gradient extrapolation from the interior.
    Extrapolate,
    /// One-sided stencil at an edge with no neighbour.
    FluxCorrection,
}

impl BoundaryCondition {
    pub fn name(&self) -> &'static str {
        match self {
            BoundaryCondition::SetValue(_) => "SetValue",
            BoundaryCondition::SetGradient(_) => "SetGradient",
            BoundaryCondition::SetDivergence(_) => "SetDivergence",
            BoundaryCondition::Extrapolate => "Extrapolate",
            BoundaryCondition::FluxCorrection => "FluxCorrection",
        }
    }
}

/// Edge of a vertical column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnEdge {
    Bottom,
    Top,
}

impl ColumnEdge {
    pub fn name(self) -> &'static str {
        match self {
            ColumnEdge::Bottom => "bottom",
            ColumnEdge::Top => "top",
        }
    }
}

/// Policies for both edges of a column.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnBoundaries {
    bottom: Option<BoundaryCondition>,
    top: Option<BoundaryCondition>,
}

impl ColumnBoundaries {
    /// No policy on either edge.
    pub fn none() -> Self {
        Self::default()
    }

    /// The same policy on both edges.
    pub fn both(bc: BoundaryCondition) -> Self {
        Self {
            bottom: Some(bc),
            top: Some(bc),
        }
    }

    pub fn new(bottom: BoundaryCondition, top: BoundaryCondition) -> Self {
        Self {
            bottom: Some(bottom),
            top: Some(top),
        }
    }

    pub fn with(mut self, edge: ColumnEdge, bc: BoundaryCondition) -> Self {
        match edge {
            ColumnEdge::Bottom => self.bottom = Some(bc),
            ColumnEdge::Top => self.top = Some(bc),
        }
        self
    }

    pub fn get(&self, edge: ColumnEdge) -> Option<BoundaryCondition> {
        match edge {
            ColumnEdge::Bottom => self.bottom,
            ColumnEdge::Top => self.top,
        }
    }

    /// Check every given policy against `allowed`; with `required`, both edges
    /// must carry one.
    pub(crate) fn validate(
        &self,
        operator: &'static str,
        allowed: &[&'static str],
        required: bool,
    ) -> Result<()> {
        for edge in [ColumnEdge::Bottom, ColumnEdge::Top] {
            match self.get(edge) {
                None if required => {
                    return Err(SemError::MissingBoundaryCondition {
                        operator,
                        edge: edge.name(),
                    })
                }
                None => {}
                Some(bc) if !allowed.contains(&bc.name()) => {
                    return Err(SemError::UnsupportedBoundaryCondition {
                        operator,
                        edge: edge.name(),
                        condition: bc.name(),
                    })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
