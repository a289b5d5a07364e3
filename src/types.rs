//! Types specific to helmbem

use thiserror::Error;

/// A point or vector in the boundary plane.
pub type Point2 = [f64; 2];

/// Side of the closed boundary on which the acoustic field lives.
///
/// The orientation controls the sign of the half-jump terms added to the
/// matrix diagonals during assembly and the sign of the representation
/// formula used when sampling the field. A [`crate::solver::BoundarySolution`]
/// produced under one orientation must be sampled under the same orientation;
/// sampling checks this and reports [`BemError::OrientationMismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The solution domain is the region enclosed by the boundary.
    Interior,
    /// The solution domain is the unbounded region outside the boundary.
    Exterior,
}

impl Orientation {
    /// Sign of the half-jump added to the diagonal of the combined operator
    /// matrices: -1 for interior, +1 for exterior problems.
    pub fn jump_sign(self) -> f64 {
        match self {
            Orientation::Interior => -1.0,
            Orientation::Exterior => 1.0,
        }
    }

    /// Sign of the boundary-integral term in the representation formula
    /// (and of the incident term on the combined right-hand side): +1 for
    /// interior, -1 for exterior problems.
    pub fn representation_sign(self) -> f64 {
        match self {
            Orientation::Interior => 1.0,
            Orientation::Exterior => -1.0,
        }
    }
}

/// Errors reported by geometry construction, the boundary solve and field
/// sampling. All are surfaced synchronously at the call that detects them;
/// nothing is retried internally.
#[derive(Error, Debug)]
pub enum BemError {
    /// An input array does not match the expected entry count.
    #[error("shape mismatch for {name}: expected {expected} entries, got {got}")]
    ShapeMismatch {
        /// Which input was mis-sized.
        name: &'static str,
        /// Expected entry count.
        expected: usize,
        /// Actual entry count.
        got: usize,
    },
    /// A sampling call used a different orientation than the solution was
    /// solved under.
    #[error("solution was solved as {solved:?} but sampled as {requested:?}")]
    OrientationMismatch {
        /// Orientation the solution was produced under.
        solved: Orientation,
        /// Orientation passed to the sampling call.
        requested: Orientation,
    },
    /// The combined boundary system is numerically singular, usually a sign
    /// of an interior resonance. The caller decides whether to perturb the
    /// wavenumber or the coupling parameter and retry.
    #[error("boundary system is singular or badly conditioned (condition estimate {estimate:.3e})")]
    SingularSystem {
        /// Cheap condition estimate of the system matrix at failure.
        estimate: f64,
    },
    /// A boundary element with (near) zero length.
    #[error("degenerate boundary element {index} (length {length:.3e})")]
    DegenerateElement {
        /// Element index.
        index: usize,
        /// Offending element length.
        length: f64,
    },
    /// A boundary-condition row with alpha = beta = 0 constrains nothing.
    #[error("boundary condition on element {index} has alpha = beta = 0")]
    DegenerateBoundaryCondition {
        /// Element index.
        index: usize,
    },
}
