//! Dense assembly of the combined boundary operator matrices.
//!
//! For each pair of collocation point `i` and element `j` the four layer
//! potentials are evaluated and combined into
//!
//! ```text
//! A[i, j] = L + mu * Mt        B[i, j] = M + mu * N
//! ```
//!
//! followed by the half-jump adjustment on the diagonal, whose sign depends
//! on the problem [`Orientation`]. Rows are independent and are filled in
//! parallel.

use ndarray::{Array2, Zip};
use num::complex::Complex64;

use crate::traits::{Geometry, LayerPotentials};
use crate::types::Orientation;

/// Assemble the combined operator matrices `(A, B)` for wavenumber `k` and
/// coupling parameter `mu`.
///
/// The boundary condition and the incident field contract these as
/// `B phi - A v = rhs`; see [`crate::solver::HelmholtzSolver::solve_boundary`].
pub fn assemble_boundary_matrices<G, K>(
    geometry: &G,
    kernel: &K,
    k: f64,
    mu: Complex64,
    orientation: Orientation,
) -> (Array2<Complex64>, Array2<Complex64>)
where
    G: Geometry + ?Sized,
    K: LayerPotentials + ?Sized,
{
    let n = geometry.element_count();
    assert!(n >= 1, "boundary must have at least one element");
    assert!(k.is_finite() && k >= 0.0, "wavenumber must be finite and non-negative");
    assert!(mu.re.is_finite() && mu.im.is_finite(), "coupling parameter must be finite");

    log::debug!("assembling {n}x{n} boundary matrices (k = {k}, orientation = {orientation:?})");

    let mut a = Array2::zeros((n, n));
    let mut b = Array2::zeros((n, n));

    Zip::indexed(a.rows_mut())
        .and(b.rows_mut())
        .par_for_each(|i, mut a_row, mut b_row| {
            let p = geometry.center(i);
            let normal_p = geometry.normal(i);
            for j in 0..n {
                let (qa, qb) = geometry.edge_vertices(j);
                let on_element = i == j;
                let l = kernel.l(k, p, qa, qb, on_element);
                let m = kernel.m(k, p, qa, qb, on_element);
                let mt = kernel.mt(k, p, normal_p, qa, qb, on_element);
                let nn = kernel.n(k, p, normal_p, qa, qb, on_element);
                a_row[j] = l + mu * mt;
                b_row[j] = m + mu * nn;
            }
        });

    let half_jump = 0.5 * orientation.jump_sign();
    for i in 0..n {
        a[[i, i]] += half_jump * mu;
        b[[i, i]] -= Complex64::new(half_jump, 0.0);
    }

    (a, b)
}
