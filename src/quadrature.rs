//! Gauss-Legendre quadrature on boundary elements.

use num::complex::Complex64;

use crate::types::Point2;

/// Gauss-Legendre abscissas and weights on [-1, 1].
///
/// Orders 2, 4, 8 and 16 are tabulated; other requests are promoted to the
/// next larger tabulated rule (capped at 16).
pub fn gauss_legendre(order: usize) -> (&'static [f64], &'static [f64]) {
    match order {
        0..=2 => (&GL2_X, &GL2_W),
        3..=4 => (&GL4_X, &GL4_W),
        5..=8 => (&GL8_X, &GL8_W),
        _ => (&GL16_X, &GL16_W),
    }
}

/// Integrate `f` over the straight segment from `qa` to `qb` with the given
/// Gauss-Legendre order.
pub fn integrate_on_segment<F>(order: usize, qa: Point2, qb: Point2, f: F) -> Complex64
where
    F: Fn(Point2) -> Complex64,
{
    let (xs, ws) = gauss_legendre(order);
    let dx = qb[0] - qa[0];
    let dy = qb[1] - qa[1];
    let jacobian = 0.5 * dx.hypot(dy);
    let mut acc = Complex64::new(0.0, 0.0);
    for (&x, &w) in xs.iter().zip(ws) {
        let t = 0.5 * (x + 1.0);
        let q = [qa[0] + t * dx, qa[1] + t * dy];
        acc += w * f(q);
    }
    acc * jacobian
}

static GL2_X: [f64; 2] = [-0.5773502691896257, 0.5773502691896257];
static GL2_W: [f64; 2] = [1.0, 1.0];

static GL4_X: [f64; 4] = [
    -0.8611363115940526,
    -0.3399810435848563,
    0.3399810435848563,
    0.8611363115940526,
];
static GL4_W: [f64; 4] = [
    0.3478548451374538,
    0.6521451548625461,
    0.6521451548625461,
    0.3478548451374538,
];

static GL8_X: [f64; 8] = [
    -0.9602898564975363,
    -0.7966664774136267,
    -0.5255324099163290,
    -0.1834346424956498,
    0.1834346424956498,
    0.5255324099163290,
    0.7966664774136267,
    0.9602898564975363,
];
static GL8_W: [f64; 8] = [
    0.1012285362903763,
    0.2223810344533745,
    0.3137066458778873,
    0.3626837833783620,
    0.3626837833783620,
    0.3137066458778873,
    0.2223810344533745,
    0.1012285362903763,
];

static GL16_X: [f64; 16] = [
    -0.9894009349916499,
    -0.9445750230732326,
    -0.8656312023878318,
    -0.7554044083550030,
    -0.6178762444026438,
    -0.4580167776572274,
    -0.2816035507792589,
    -0.0950125098376374,
    0.0950125098376374,
    0.2816035507792589,
    0.4580167776572274,
    0.6178762444026438,
    0.7554044083550030,
    0.8656312023878318,
    0.9445750230732326,
    0.9894009349916499,
];
static GL16_W: [f64; 16] = [
    0.0271524594117541,
    0.0622535239386479,
    0.0951585116824928,
    0.1246289712555339,
    0.1495959888165767,
    0.1691565193950025,
    0.1826034150449236,
    0.1894506104550685,
    0.1894506104550685,
    0.1826034150449236,
    0.1691565193950025,
    0.1495959888165767,
    0.1246289712555339,
    0.0951585116824928,
    0.0622535239386479,
    0.0271524594117541,
];

#[cfg(test)]
mod tests {
    use super::{gauss_legendre, integrate_on_segment};
    use approx::assert_relative_eq;
    use num::complex::Complex64;

    #[test]
    fn weights_sum_to_interval_length() {
        for order in [2, 4, 8, 16] {
            let (_, ws) = gauss_legendre(order);
            assert_relative_eq!(ws.iter().sum::<f64>(), 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn polynomials_are_integrated_exactly() {
        // x^3 over a segment of the x axis: 8-point Gauss is exact far
        // beyond cubic order.
        let value = integrate_on_segment(8, [0.0, 0.0], [2.0, 0.0], |q| {
            Complex64::new(q[0].powi(3), 0.0)
        });
        assert_relative_eq!(value.re, 4.0, epsilon = 1e-12);
        assert_relative_eq!(value.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn segment_length_is_recovered() {
        let one = |_q: [f64; 2]| Complex64::new(1.0, 0.0);
        let value = integrate_on_segment(4, [1.0, 1.0], [4.0, 5.0], one);
        assert_relative_eq!(value.re, 5.0, epsilon = 1e-12);
    }
}
