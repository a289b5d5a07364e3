//! Dense complex linear algebra for the combined boundary system.
//!
//! The combined operator matrices are dense and modestly sized (one row per
//! boundary element), so a straightforward LU factorization with partial
//! pivoting is used rather than an external backend.

use ndarray::{Array1, Array2};
use num::complex::Complex64;

use crate::types::BemError;

/// Pivot magnitudes below this are treated as an exactly singular system.
const PIVOT_TOLERANCE: f64 = 1e-30;

/// LU factorization of a dense complex matrix with partial pivoting.
///
/// The factors are stored packed in a single matrix: the strict lower
/// triangle holds the multipliers of L (unit diagonal implied), the upper
/// triangle holds U.
pub struct LuFactors {
    lu: Array2<Complex64>,
    pivots: Vec<usize>,
    n: usize,
}

impl LuFactors {
    /// Factorize a square matrix. Fails with [`BemError::SingularSystem`]
    /// when a pivot collapses to zero.
    pub fn factorize(a: &Array2<Complex64>) -> Result<Self, BemError> {
        let n = a.nrows();
        assert_eq!(n, a.ncols(), "matrix must be square");
        let mut lu = a.clone();
        let mut pivots = Vec::with_capacity(n);

        for col in 0..n {
            let mut pivot_row = col;
            let mut pivot_mag = lu[[col, col]].norm();
            for row in col + 1..n {
                let mag = lu[[row, col]].norm();
                if mag > pivot_mag {
                    pivot_row = row;
                    pivot_mag = mag;
                }
            }
            if pivot_mag < PIVOT_TOLERANCE {
                return Err(BemError::SingularSystem {
                    estimate: f64::INFINITY,
                });
            }
            pivots.push(pivot_row);
            if pivot_row != col {
                for j in 0..n {
                    let tmp = lu[[col, j]];
                    lu[[col, j]] = lu[[pivot_row, j]];
                    lu[[pivot_row, j]] = tmp;
                }
            }
            let pivot = lu[[col, col]];
            for row in col + 1..n {
                let factor = lu[[row, col]] / pivot;
                lu[[row, col]] = factor;
                for j in col + 1..n {
                    let upper = lu[[col, j]];
                    lu[[row, j]] -= factor * upper;
                }
            }
        }

        Ok(Self { lu, pivots, n })
    }

    /// Ratio of the largest to the smallest pivot magnitude. A cheap lower
    /// bound on the true condition number, good enough to flag resonant or
    /// degenerate systems.
    pub fn condition_estimate(&self) -> f64 {
        let mut max = 0.0f64;
        let mut min = f64::INFINITY;
        for i in 0..self.n {
            let mag = self.lu[[i, i]].norm();
            max = max.max(mag);
            min = min.min(mag);
        }
        if min == 0.0 {
            f64::INFINITY
        } else {
            max / min
        }
    }

    /// Solve `A x = b` using the stored factors.
    pub fn solve(&self, b: &Array1<Complex64>) -> Array1<Complex64> {
        assert_eq!(b.len(), self.n, "right-hand side length must match");
        let mut x = b.clone();

        for col in 0..self.n {
            let p = self.pivots[col];
            if p != col {
                x.swap(col, p);
            }
            let xc = x[col];
            for row in col + 1..self.n {
                x[row] -= self.lu[[row, col]] * xc;
            }
        }
        for col in (0..self.n).rev() {
            x[col] /= self.lu[[col, col]];
            let xc = x[col];
            for row in 0..col {
                x[row] -= self.lu[[row, col]] * xc;
            }
        }
        x
    }
}

/// Infinity norm (maximum absolute row sum) of a complex matrix.
pub fn norm_inf(a: &Array2<Complex64>) -> f64 {
    a.rows()
        .into_iter()
        .map(|row| row.iter().map(|z| z.norm()).sum::<f64>())
        .fold(0.0, f64::max)
}
