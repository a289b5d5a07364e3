//! Layer-potential kernels for the 2D Helmholtz equation.
//!
//! The free-space Green's function is G(r) = (i/4) H0(kr), with the
//! logarithmic kernel -ln(r)/2pi as its k = 0 (Laplace) limit. Kernel
//! integrals over an element are evaluated with Gauss-Legendre quadrature;
//! self-element integrals split the element at the collocation point and
//! combine analytic values for the singular parts with regularized
//! quadrature for the smooth remainder.
//!
//! Two interchangeable [`LayerPotentials`] implementations are provided and
//! selected once when the solver is constructed: [`ReferenceKernel`] favours
//! transparency and accuracy (composite high-order rule), while
//! [`OptimizedKernel`] favours assembly throughput (single fixed 8-point
//! rule per sub-segment).

use num::complex::Complex64;
use spec_math::Bessel;
use std::f64::consts::PI;

use crate::quadrature::{gauss_legendre, integrate_on_segment};
use crate::traits::LayerPotentials;
use crate::types::Point2;

const I: Complex64 = Complex64::new(0.0, 1.0);

/// Euler-Mascheroni constant, used in tests of the small-argument limits.
#[cfg(test)]
const EULER_GAMMA: f64 = 0.5772156649015329;

fn sub(a: Point2, b: Point2) -> Point2 {
    [a[0] - b[0], a[1] - b[1]]
}

fn dot(a: Point2, b: Point2) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

fn norm(a: Point2) -> f64 {
    a[0].hypot(a[1])
}

/// Hankel function of the first kind, order zero.
fn hankel0(x: f64) -> Complex64 {
    Complex64::new(x.bessel_jv(0.0), x.bessel_yv(0.0))
}

/// Hankel function of the first kind, order one.
fn hankel1(x: f64) -> Complex64 {
    Complex64::new(x.bessel_jv(1.0), x.bessel_yv(1.0))
}

/// Green's function G(p, q); single-layer integrand.
#[inline]
fn l_integrand(k: f64, p: Point2, q: Point2) -> Complex64 {
    let r = norm(sub(p, q));
    debug_assert!(r > 0.0, "field point coincides with a quadrature node");
    if k == 0.0 {
        Complex64::new(-r.ln() / (2.0 * PI), 0.0)
    } else {
        0.25 * I * hankel0(k * r)
    }
}

/// dG/dn_q; double-layer integrand.
#[inline]
fn m_integrand(k: f64, p: Point2, q: Point2, n_q: Point2) -> Complex64 {
    let u = sub(p, q);
    let r = norm(u);
    let un = dot(u, n_q);
    if k == 0.0 {
        Complex64::new(un / (2.0 * PI * r * r), 0.0)
    } else {
        0.25 * I * k * hankel1(k * r) * (un / r)
    }
}

/// dG/dn_p; transposed double-layer integrand.
#[inline]
fn mt_integrand(k: f64, p: Point2, q: Point2, n_p: Point2) -> Complex64 {
    let u = sub(p, q);
    let r = norm(u);
    let un = dot(u, n_p);
    if k == 0.0 {
        Complex64::new(-un / (2.0 * PI * r * r), 0.0)
    } else {
        -0.25 * I * k * hankel1(k * r) * (un / r)
    }
}

/// d2G/dn_p dn_q; hypersingular integrand.
#[inline]
fn n_integrand(k: f64, p: Point2, q: Point2, n_p: Point2, n_q: Point2) -> Complex64 {
    let u = sub(p, q);
    let r = norm(u);
    let dpn = dot(u, n_p) / r;
    let dqn = dot(u, n_q) / r;
    let npnq = dot(n_p, n_q);
    if k == 0.0 {
        Complex64::new((npnq - 2.0 * dpn * dqn) / (2.0 * PI * r * r), 0.0)
    } else {
        let kr = k * r;
        let h1 = hankel1(kr);
        // H1'(z) = H0(z) - H1(z)/z
        let h1p = hankel0(kr) - h1 / kr;
        0.25 * I * k * (k * h1p * dpn * dqn + h1 / r * (npnq - dpn * dqn))
    }
}

/// G(p, q) with the logarithmic singularity removed; finite as q -> p.
#[inline]
fn l_self_integrand(k: f64, p: Point2, q: Point2) -> Complex64 {
    let r = norm(sub(p, q));
    0.25 * I * hankel0(k * r) + r.ln() / (2.0 * PI)
}

/// Hypersingular self integrand with the 1/r^2 and log singularities
/// removed; finite as q -> p.
#[inline]
fn n_self_integrand(k: f64, p: Point2, q: Point2) -> Complex64 {
    let r = norm(sub(p, q));
    let smooth = -1.0 / (2.0 * PI * r * r) + k * k * r.ln() / (4.0 * PI);
    0.25 * I * k * hankel1(k * r) / r + smooth
}

/// Analytic single-layer self integral for the Laplace kernel:
/// integral of -ln(R)/2pi over the element, p on the element.
fn l0_self(ra: f64, rb: f64, re: f64) -> f64 {
    (re - (ra * ra.ln() + rb * rb.ln())) / (2.0 * PI)
}

/// Hypersingular finite part of the Laplace kernel over the element,
/// p strictly inside it.
fn n0_self(ra: f64, rb: f64) -> f64 {
    -(1.0 / ra + 1.0 / rb) / (2.0 * PI)
}

fn self_split(p: Point2, qa: Point2, qb: Point2) -> (f64, f64, f64) {
    let ra = norm(sub(p, qa));
    let rb = norm(sub(p, qb));
    let re = norm(sub(qb, qa));
    debug_assert!(ra > 0.0 && rb > 0.0, "collocation point on an element endpoint");
    (ra, rb, re)
}

/// Clarity-first kernel evaluator.
///
/// Integrates each kernel with a composite Gauss-Legendre rule:
/// `subdivisions` equal sub-segments of `order` points each. Self elements
/// are split at the collocation point before subdividing, so quadrature
/// nodes never coincide with the singularity.
pub struct ReferenceKernel {
    order: usize,
    subdivisions: usize,
}

impl ReferenceKernel {
    /// Create a kernel evaluator with the given rule order (promoted to a
    /// tabulated order) and sub-segment count per element.
    pub fn new(order: usize, subdivisions: usize) -> Self {
        assert!(subdivisions >= 1);
        Self {
            order,
            subdivisions,
        }
    }

    fn integrate<F>(&self, qa: Point2, qb: Point2, f: F) -> Complex64
    where
        F: Fn(Point2) -> Complex64,
    {
        let mut acc = Complex64::new(0.0, 0.0);
        let dx = qb[0] - qa[0];
        let dy = qb[1] - qa[1];
        for s in 0..self.subdivisions {
            let t0 = s as f64 / self.subdivisions as f64;
            let t1 = (s + 1) as f64 / self.subdivisions as f64;
            let a = [qa[0] + t0 * dx, qa[1] + t0 * dy];
            let b = [qa[0] + t1 * dx, qa[1] + t1 * dy];
            acc += integrate_on_segment(self.order, a, b, &f);
        }
        acc
    }

    fn integrate_split<F>(&self, p: Point2, qa: Point2, qb: Point2, f: F) -> Complex64
    where
        F: Fn(Point2) -> Complex64,
    {
        self.integrate(qa, p, &f) + self.integrate(p, qb, &f)
    }
}

impl Default for ReferenceKernel {
    fn default() -> Self {
        Self::new(16, 2)
    }
}

impl LayerPotentials for ReferenceKernel {
    fn l(&self, k: f64, p: Point2, qa: Point2, qb: Point2, p_on_element: bool) -> Complex64 {
        if p_on_element {
            let (ra, rb, re) = self_split(p, qa, qb);
            let l0 = Complex64::new(l0_self(ra, rb, re), 0.0);
            if k == 0.0 {
                l0
            } else {
                l0 + self.integrate_split(p, qa, qb, |q| l_self_integrand(k, p, q))
            }
        } else {
            self.integrate(qa, qb, |q| l_integrand(k, p, q))
        }
    }

    fn m(&self, k: f64, p: Point2, qa: Point2, qb: Point2, p_on_element: bool) -> Complex64 {
        if p_on_element {
            // (p - q) is parallel to a straight element, so dG/dn_q
            // vanishes identically.
            return Complex64::new(0.0, 0.0);
        }
        let n_q = edge_normal(qa, qb);
        self.integrate(qa, qb, |q| m_integrand(k, p, q, n_q))
    }

    fn mt(
        &self,
        k: f64,
        p: Point2,
        normal_p: Point2,
        qa: Point2,
        qb: Point2,
        p_on_element: bool,
    ) -> Complex64 {
        if p_on_element {
            return Complex64::new(0.0, 0.0);
        }
        self.integrate(qa, qb, |q| mt_integrand(k, p, q, normal_p))
    }

    fn n(
        &self,
        k: f64,
        p: Point2,
        normal_p: Point2,
        qa: Point2,
        qb: Point2,
        p_on_element: bool,
    ) -> Complex64 {
        if p_on_element {
            let (ra, rb, re) = self_split(p, qa, qb);
            let n0 = n0_self(ra, rb);
            if k == 0.0 {
                return Complex64::new(n0, 0.0);
            }
            let analytic = Complex64::new(n0 + 0.5 * k * k * l0_self(ra, rb, re), 0.0);
            analytic + self.integrate_split(p, qa, qb, |q| n_self_integrand(k, p, q))
        } else {
            let n_q = edge_normal(qa, qb);
            self.integrate(qa, qb, |q| n_integrand(k, p, q, normal_p, n_q))
        }
    }
}

/// Throughput-first kernel evaluator.
///
/// Uses a single fixed 8-point Gauss-Legendre pass per (sub-)segment with
/// the loop written out directly. Accuracy on smooth pairs is a few digits
/// below [`ReferenceKernel`] but far beyond the discretization error of
/// constant-element collocation.
#[derive(Default)]
pub struct OptimizedKernel;

impl OptimizedKernel {
    #[inline]
    fn sum8<F>(qa: Point2, qb: Point2, f: F) -> Complex64
    where
        F: Fn(Point2) -> Complex64,
    {
        let (xs, ws) = gauss_legendre(8);
        let dx = qb[0] - qa[0];
        let dy = qb[1] - qa[1];
        let jacobian = 0.5 * dx.hypot(dy);
        let mut acc = Complex64::new(0.0, 0.0);
        for i in 0..8 {
            let t = 0.5 * (xs[i] + 1.0);
            acc += ws[i] * f([qa[0] + t * dx, qa[1] + t * dy]);
        }
        acc * jacobian
    }
}

impl LayerPotentials for OptimizedKernel {
    fn l(&self, k: f64, p: Point2, qa: Point2, qb: Point2, p_on_element: bool) -> Complex64 {
        if p_on_element {
            let (ra, rb, re) = self_split(p, qa, qb);
            let l0 = Complex64::new(l0_self(ra, rb, re), 0.0);
            if k == 0.0 {
                return l0;
            }
            let f = |q| l_self_integrand(k, p, q);
            l0 + Self::sum8(qa, p, f) + Self::sum8(p, qb, f)
        } else {
            Self::sum8(qa, qb, |q| l_integrand(k, p, q))
        }
    }

    fn m(&self, k: f64, p: Point2, qa: Point2, qb: Point2, p_on_element: bool) -> Complex64 {
        if p_on_element {
            return Complex64::new(0.0, 0.0);
        }
        let n_q = edge_normal(qa, qb);
        Self::sum8(qa, qb, |q| m_integrand(k, p, q, n_q))
    }

    fn mt(
        &self,
        k: f64,
        p: Point2,
        normal_p: Point2,
        qa: Point2,
        qb: Point2,
        p_on_element: bool,
    ) -> Complex64 {
        if p_on_element {
            return Complex64::new(0.0, 0.0);
        }
        Self::sum8(qa, qb, |q| mt_integrand(k, p, q, normal_p))
    }

    fn n(
        &self,
        k: f64,
        p: Point2,
        normal_p: Point2,
        qa: Point2,
        qb: Point2,
        p_on_element: bool,
    ) -> Complex64 {
        if p_on_element {
            let (ra, rb, re) = self_split(p, qa, qb);
            let n0 = n0_self(ra, rb);
            if k == 0.0 {
                return Complex64::new(n0, 0.0);
            }
            let analytic = Complex64::new(n0 + 0.5 * k * k * l0_self(ra, rb, re), 0.0);
            let f = |q| n_self_integrand(k, p, q);
            analytic + Self::sum8(qa, p, f) + Self::sum8(p, qb, f)
        } else {
            let n_q = edge_normal(qa, qb);
            Self::sum8(qa, qb, |q| n_integrand(k, p, q, normal_p, n_q))
        }
    }
}

/// Unit normal of the straight element from `qa` to `qb`, pointing outward
/// for counterclockwise chains. Matches [`crate::grid::Chain`]'s convention.
fn edge_normal(qa: Point2, qb: Point2) -> Point2 {
    let dx = qb[0] - qa[0];
    let dy = qb[1] - qa[1];
    let len = dx.hypot(dy);
    [dy / len, -dx / len]
}
