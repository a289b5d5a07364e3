//! helmbem
//!
//! Boundary element solver for acoustic radiation and scattering problems
//! governed by the two-dimensional Helmholtz equation. The boundary is a
//! closed chain of straight elements with midpoint collocation; the solver
//! assembles the dense layer-potential operator matrices, combines them in
//! the Burton–Miller form and solves for the boundary pressure and normal
//! velocity under mixed Dirichlet/Neumann/Robin conditions, after which the
//! field can be sampled anywhere off the boundary.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod assembly;
pub mod grid;
pub mod kernels;
pub mod linalg;
pub mod potential;
pub mod quadrature;
pub mod shapes;
pub mod solver;
pub mod traits;
pub mod types;
