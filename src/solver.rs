//! Mixed boundary-condition solver for the combined Helmholtz system.
//!
//! The boundary condition on each element is the Robin form
//! `alpha * phi + beta * v = f`; pure Dirichlet and Neumann conditions are
//! the special cases `beta = 0` and `alpha = 0`. Per element one of `phi`
//! and `v` is eliminated through the condition, the resulting dense system
//! is solved by LU factorization and the eliminated quantity is recovered
//! by back-substitution.

use itertools::izip;
use ndarray::{Array1, Array2};
use num::complex::Complex64;
use std::ops::Range;

use crate::assembly::assemble_boundary_matrices;
use crate::kernels::OptimizedKernel;
use crate::linalg::{norm_inf, LuFactors};
use crate::potential;
use crate::traits::{Geometry, LayerPotentials};
use crate::types::{BemError, Orientation, Point2};

/// Per-element Robin boundary condition `alpha * phi + beta * v = f`.
///
/// All three arrays have one entry per boundary element. Rows with
/// `alpha = beta = 0` are rejected by the solve.
pub struct BoundaryCondition {
    /// Coefficient of the boundary potential.
    pub alpha: Array1<Complex64>,
    /// Coefficient of the boundary normal velocity.
    pub beta: Array1<Complex64>,
    /// Prescribed right-hand side value.
    pub f: Array1<Complex64>,
}

impl BoundaryCondition {
    /// Build a condition from its three coefficient arrays.
    pub fn new(
        alpha: Array1<Complex64>,
        beta: Array1<Complex64>,
        f: Array1<Complex64>,
    ) -> Self {
        assert_eq!(alpha.len(), beta.len());
        assert_eq!(alpha.len(), f.len());
        Self { alpha, beta, f }
    }

    /// Dirichlet condition `phi = f` on every element.
    pub fn dirichlet(f: Array1<Complex64>) -> Self {
        let n = f.len();
        Self {
            alpha: Array1::from_elem(n, Complex64::new(1.0, 0.0)),
            beta: Array1::zeros(n),
            f,
        }
    }

    /// Neumann condition `v = f` on every element.
    pub fn neumann(f: Array1<Complex64>) -> Self {
        let n = f.len();
        Self {
            alpha: Array1::zeros(n),
            beta: Array1::from_elem(n, Complex64::new(1.0, 0.0)),
            f,
        }
    }

    /// Overwrite the condition on a contiguous element range, typically one
    /// obtained from [`Geometry::named_partition`].
    pub fn set_range(
        &mut self,
        range: Range<usize>,
        alpha: Complex64,
        beta: Complex64,
        f: Complex64,
    ) {
        for j in range {
            self.alpha[j] = alpha;
            self.beta[j] = beta;
            self.f[j] = f;
        }
    }

    /// Number of elements the condition covers.
    pub fn len(&self) -> usize {
        self.f.len()
    }

    /// Whether the condition covers no elements.
    pub fn is_empty(&self) -> bool {
        self.f.is_empty()
    }
}

/// Incident field traces on the boundary: potential and normal derivative
/// at each collocation point.
pub struct BoundaryIncidence {
    /// Incident potential at the collocation points.
    pub phi: Array1<Complex64>,
    /// Normal derivative of the incident potential at the collocation
    /// points, taken along the outward normal.
    pub v: Array1<Complex64>,
}

impl BoundaryIncidence {
    /// Incident traces given explicitly.
    pub fn new(phi: Array1<Complex64>, v: Array1<Complex64>) -> Self {
        assert_eq!(phi.len(), v.len());
        Self { phi, v }
    }

    /// No incident field; a pure radiation problem on `n` elements.
    pub fn silent(n: usize) -> Self {
        Self {
            phi: Array1::zeros(n),
            v: Array1::zeros(n),
        }
    }
}

/// Boundary potential and normal velocity produced by a solve, together
/// with the parameters they were solved under.
pub struct BoundarySolution {
    k: f64,
    mu: Complex64,
    orientation: Orientation,
    phis: Array1<Complex64>,
    velocities: Array1<Complex64>,
}

impl BoundarySolution {
    /// Wavenumber the solve used.
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Coupling parameter the solve used.
    pub fn mu(&self) -> Complex64 {
        self.mu
    }

    /// Orientation the solve used; sampling must request the same one.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Potential at each collocation point.
    pub fn phis(&self) -> &Array1<Complex64> {
        &self.phis
    }

    /// Normal velocity at each collocation point.
    pub fn velocities(&self) -> &Array1<Complex64> {
        &self.velocities
    }
}

/// Numerical limits of the solve.
#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
    /// Solves whose condition estimate exceeds this fail with
    /// [`BemError::SingularSystem`] instead of returning garbage.
    pub condition_limit: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            condition_limit: 1e12,
        }
    }
}

/// Boundary element solver for one discretized boundary.
///
/// Owns the geometry, a kernel evaluator chosen at construction and the
/// numerical configuration. One solver handles any number of solves at
/// different wavenumbers and orientations.
pub struct HelmholtzSolver<G: Geometry> {
    geometry: G,
    kernel: Box<dyn LayerPotentials>,
    config: SolverConfig,
}

impl<G: Geometry> HelmholtzSolver<G> {
    /// Create a solver with the throughput-oriented default kernel.
    pub fn new(geometry: G) -> Self {
        Self::with_kernel(geometry, Box::new(OptimizedKernel))
    }

    /// Create a solver with an explicit kernel evaluator, e.g.
    /// [`crate::kernels::ReferenceKernel`] for accuracy studies.
    pub fn with_kernel(geometry: G, kernel: Box<dyn LayerPotentials>) -> Self {
        Self {
            geometry,
            kernel,
            config: SolverConfig::default(),
        }
    }

    /// Replace the numerical configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The boundary this solver was built around.
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Default Burton-Miller coupling parameter, `i / (k + 1)`.
    ///
    /// Purely imaginary coupling keeps the combined operator injective at
    /// the fictitious frequencies of the plain equations; the `+ 1` keeps
    /// the parameter bounded as `k` tends to zero.
    pub fn coupling(k: f64) -> Complex64 {
        Complex64::new(0.0, 1.0 / (k + 1.0))
    }

    /// Assemble the combined operator matrices `(A, B)`.
    pub fn compute_boundary_matrices(
        &self,
        k: f64,
        mu: Complex64,
        orientation: Orientation,
    ) -> (Array2<Complex64>, Array2<Complex64>) {
        assemble_boundary_matrices(&self.geometry, &*self.kernel, k, mu, orientation)
    }

    /// [`Self::compute_boundary_matrices`] for an interior problem.
    pub fn compute_boundary_matrices_interior(
        &self,
        k: f64,
        mu: Complex64,
    ) -> (Array2<Complex64>, Array2<Complex64>) {
        self.compute_boundary_matrices(k, mu, Orientation::Interior)
    }

    /// [`Self::compute_boundary_matrices`] for an exterior problem.
    pub fn compute_boundary_matrices_exterior(
        &self,
        k: f64,
        mu: Complex64,
    ) -> (Array2<Complex64>, Array2<Complex64>) {
        self.compute_boundary_matrices(k, mu, Orientation::Exterior)
    }

    /// Solve for the boundary potential and normal velocity.
    ///
    /// `mu` overrides the coupling parameter; `None` selects
    /// [`Self::coupling`]. `mu = 0` degenerates to the plain boundary
    /// integral equation, which is only safe away from the fictitious
    /// frequencies of the chosen orientation.
    pub fn solve_boundary(
        &self,
        orientation: Orientation,
        k: f64,
        condition: &BoundaryCondition,
        incidence: &BoundaryIncidence,
        mu: Option<Complex64>,
    ) -> Result<BoundarySolution, BemError> {
        let n = self.geometry.element_count();
        check_len("alpha", n, condition.alpha.len())?;
        check_len("beta", n, condition.beta.len())?;
        check_len("f", n, condition.f.len())?;
        check_len("incident phi", n, incidence.phi.len())?;
        check_len("incident v", n, incidence.v.len())?;

        let mu = mu.unwrap_or_else(|| Self::coupling(k));
        let (a, b) = self.compute_boundary_matrices(k, mu, orientation);

        // Combined right-hand side from the incident traces; its sign
        // follows the representation formula of the orientation.
        let sign = orientation.representation_sign();
        let mut rhs: Array1<Complex64> =
            (0..n).map(|i| sign * (incidence.phi[i] + mu * incidence.v[i])).collect();

        // Relative operator scale used to pick the better-conditioned
        // unknown per element.
        let gamma = norm_inf(&b) / norm_inf(&a);

        let mut system = Array2::<Complex64>::zeros((n, n));
        let mut velocity_unknown = vec![false; n];
        for j in 0..n {
            let alpha = condition.alpha[j];
            let beta = condition.beta[j];
            let f = condition.f[j];
            if alpha.norm() == 0.0 && beta.norm() == 0.0 {
                return Err(BemError::DegenerateBoundaryCondition { index: j });
            }
            if beta.norm() < gamma * alpha.norm() {
                // Solve for v_j; phi_j = (f - beta v_j) / alpha.
                velocity_unknown[j] = true;
                let ratio = beta / alpha;
                for i in 0..n {
                    system[[i, j]] = -(a[[i, j]] + ratio * b[[i, j]]);
                    rhs[i] -= b[[i, j]] * f / alpha;
                }
            } else {
                // Solve for phi_j; v_j = (f - alpha phi_j) / beta.
                let ratio = alpha / beta;
                for i in 0..n {
                    system[[i, j]] = b[[i, j]] + ratio * a[[i, j]];
                    rhs[i] += a[[i, j]] * f / beta;
                }
            }
        }

        let factors = LuFactors::factorize(&system)?;
        let estimate = factors.condition_estimate();
        if estimate > self.config.condition_limit {
            log::warn!(
                "combined system at k = {k} has condition estimate {estimate:.3e}, \
                 above the limit {:.3e}",
                self.config.condition_limit
            );
            return Err(BemError::SingularSystem { estimate });
        }
        let x = factors.solve(&rhs);

        let mut phis = Array1::<Complex64>::zeros(n);
        let mut velocities = Array1::<Complex64>::zeros(n);
        for (j, (&xj, &alpha, &beta, &f)) in
            izip!(x.iter(), condition.alpha.iter(), condition.beta.iter(), condition.f.iter())
                .enumerate()
        {
            if velocity_unknown[j] {
                velocities[j] = xj;
                phis[j] = (f - beta * xj) / alpha;
            } else {
                phis[j] = xj;
                velocities[j] = (f - alpha * xj) / beta;
            }
        }

        Ok(BoundarySolution {
            k,
            mu,
            orientation,
            phis,
            velocities,
        })
    }

    /// [`Self::solve_boundary`] for an interior problem.
    pub fn solve_boundary_interior(
        &self,
        k: f64,
        condition: &BoundaryCondition,
        incidence: &BoundaryIncidence,
        mu: Option<Complex64>,
    ) -> Result<BoundarySolution, BemError> {
        self.solve_boundary(Orientation::Interior, k, condition, incidence, mu)
    }

    /// [`Self::solve_boundary`] for an exterior problem.
    pub fn solve_boundary_exterior(
        &self,
        k: f64,
        condition: &BoundaryCondition,
        incidence: &BoundaryIncidence,
        mu: Option<Complex64>,
    ) -> Result<BoundarySolution, BemError> {
        self.solve_boundary(Orientation::Exterior, k, condition, incidence, mu)
    }

    /// Evaluate the field at sample points inside the solution domain.
    ///
    /// See [`potential::evaluate_samples`].
    pub fn solve_samples(
        &self,
        solution: &BoundarySolution,
        incident_phis: &Array1<Complex64>,
        samples: &[Point2],
        orientation: Orientation,
    ) -> Result<Array1<Complex64>, BemError> {
        potential::evaluate_samples(
            &self.geometry,
            &*self.kernel,
            solution,
            incident_phis,
            samples,
            orientation,
        )
    }
}

fn check_len(name: &'static str, expected: usize, got: usize) -> Result<(), BemError> {
    if expected == got {
        Ok(())
    } else {
        Err(BemError::ShapeMismatch {
            name,
            expected,
            got,
        })
    }
}
