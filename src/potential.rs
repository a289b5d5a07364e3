//! Field evaluation away from the boundary.
//!
//! Once the boundary pressure and normal velocity are known, the acoustic
//! potential at any point of the solution domain follows from the
//! representation formula
//!
//! ```text
//! phi(x) = phi_inc(x) + sign * sum_j (L_j(x) v_j - M_j(x) phi_j)
//! ```
//!
//! with `sign` +1 for interior and -1 for exterior problems. Sample points
//! are independent and evaluated in parallel.

use ndarray::Array1;
use num::complex::Complex64;
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

use crate::solver::BoundarySolution;
use crate::traits::{Geometry, LayerPotentials};
use crate::types::{BemError, Orientation, Point2};

/// Evaluate the acoustic potential at the given sample points.
///
/// `incident_phis` holds the incident field at each sample point (zeros for
/// a pure radiation problem) and must match `samples` in length. The
/// requested `orientation` must match the one the solution was produced
/// under. Sample points are assumed to lie inside the solution domain and
/// off the boundary.
pub fn evaluate_samples<G, K>(
    geometry: &G,
    kernel: &K,
    solution: &BoundarySolution,
    incident_phis: &Array1<Complex64>,
    samples: &[Point2],
    orientation: Orientation,
) -> Result<Array1<Complex64>, BemError>
where
    G: Geometry + ?Sized,
    K: LayerPotentials + ?Sized,
{
    if orientation != solution.orientation() {
        return Err(BemError::OrientationMismatch {
            solved: solution.orientation(),
            requested: orientation,
        });
    }
    if incident_phis.len() != samples.len() {
        return Err(BemError::ShapeMismatch {
            name: "incident_phis",
            expected: samples.len(),
            got: incident_phis.len(),
        });
    }
    let n = geometry.element_count();
    if solution.phis().len() != n {
        return Err(BemError::ShapeMismatch {
            name: "solution.phis",
            expected: n,
            got: solution.phis().len(),
        });
    }

    log::debug!(
        "sampling {} field points from {} boundary elements (k = {})",
        samples.len(),
        n,
        solution.k()
    );

    let k = solution.k();
    let sign = orientation.representation_sign();
    let values: Vec<Complex64> = samples
        .par_iter()
        .enumerate()
        .map(|(s, &p)| {
            let mut acc = Complex64::new(0.0, 0.0);
            for j in 0..n {
                let (qa, qb) = geometry.edge_vertices(j);
                let l = kernel.l(k, p, qa, qb, false);
                let m = kernel.m(k, p, qa, qb, false);
                acc += l * solution.velocities()[j] - m * solution.phis()[j];
            }
            incident_phis[s] + sign * acc
        })
        .collect();

    Ok(Array1::from_vec(values))
}
