//! Error type shared by every construction and evaluation path.
//!
//! All errors are programming or configuration defects: they are reported
//! immediately to the caller and never retried. Construction errors are raised
//! when a domain, mesh, space or operator is built; range and dimension errors
//! are raised at the call boundary before any output is written.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SemError>;

/// Errors raised by domains, meshes, topologies, spaces and operators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemError {
    /// An element count was smaller than one.
    #[error("invalid element count along {axis}: {count} (need at least 1)")]
    InvalidElementCount { axis: &'static str, count: usize },

    /// A stretching parameter was not strictly positive.
    #[error("invalid stretching scale height {0} (must be finite and > 0)")]
    InvalidStretching(f64),

    /// Polynomial order too low for a spectral-element space.
    #[error("invalid polynomial order {0} (need at least 1)")]
    InvalidOrder(usize),

    /// Domain bounds or coordinate axis are unusable.
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// Boundary names were given for a periodic axis, or omitted for a bounded one.
    #[error("boundary tag arity mismatch: periodic = {periodic}, names given = {named}")]
    BoundaryTagArity { periodic: bool, named: bool },

    /// A bounded column edge has no boundary condition.
    #[error("{operator}: missing boundary condition on {edge} edge")]
    MissingBoundaryCondition {
        operator: &'static str,
        edge: &'static str,
    },

    /// A boundary condition kind that the operator cannot honour.
    #[error("{operator}: boundary condition {condition} is not supported on {edge} edge")]
    UnsupportedBoundaryCondition {
        operator: &'static str,
        edge: &'static str,
        condition: &'static str,
    },

    /// Element number outside `1..=n_elements`.
    #[error("element {element} out of range 1..={n_elements}")]
    ElementOutOfRange { element: usize, n_elements: usize },

    /// Face number outside `1..=4`.
    #[error("face {0} out of range 1..=4")]
    FaceOutOfRange(usize),

    /// A 0-based node, face or grid index past the end of its range.
    #[error("{what} index {index} out of range 0..{len}")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Local vertex number outside `1..=4`.
    #[error("vertex {0} out of range 1..=4")]
    VertexOutOfRange(usize),

    /// Boundary tag outside `1..=4`, or a name not present in the boundary table.
    #[error("unknown boundary: {0}")]
    UnknownBoundary(String),

    /// Array length does not match the declared space size.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Fields live on incompatible spaces (staggering, order or topology).
    #[error("space mismatch: {0}")]
    SpaceMismatch(String),

    /// The requested algebraic operation has no result of the declared shape.
    #[error("structural mismatch: {0}")]
    StructuralMismatch(String),
}

impl SemError {
    /// Shorthand for a length check failure.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Return `Ok(())` when `index < len`, an `IndexOutOfRange` error otherwise.
    pub fn check_index(what: &'static str, index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange { what, index, len })
        }
    }

    /// Return `Ok(())` when `actual == expected`, a dimension error otherwise.
    pub fn check_len(expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::dimension_mismatch(expected, actual))
        }
    }
}
