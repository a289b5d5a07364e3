//! End-to-end solves checked against closed-form solutions on circular
//! boundaries: interior standing waves, an exterior radiator and plane-wave
//! scattering off a rigid cylinder.

use approx::assert_relative_eq;
use helmbem::shapes;
use helmbem::solver::{BoundaryCondition, BoundaryIncidence, HelmholtzSolver, SolverConfig};
use helmbem::traits::Geometry;
use helmbem::types::{BemError, Orientation};
use ndarray::Array1;
use num::complex::Complex64;
use spec_math::Bessel;

fn ones(n: usize) -> Array1<Complex64> {
    Array1::from_elem(n, Complex64::new(1.0, 0.0))
}

fn hankel(order: f64, x: f64) -> Complex64 {
    Complex64::new(x.bessel_jv(order), x.bessel_yv(order))
}

#[test]
fn interior_disk_dirichlet_velocity_matches_bessel_ratio() {
    // phi = 1 on the unit circle at k = 1 continues to J0(kr)/J0(k), whose
    // radial derivative on the boundary is -J1(1)/J0(1).
    let k = 1.0;
    let solver = HelmholtzSolver::new(shapes::circle(64, 1.0));
    let condition = BoundaryCondition::dirichlet(ones(64));
    let incidence = BoundaryIncidence::silent(64);
    let solution = solver
        .solve_boundary_interior(k, &condition, &incidence, None)
        .unwrap();

    let v_exact = -1.0f64.bessel_jv(1.0) / 1.0f64.bessel_jv(0.0);
    for v in solution.velocities() {
        assert_relative_eq!(v.re, v_exact, max_relative = 0.05);
        assert!(v.im.abs() < 0.05 * v_exact.abs());
    }
}

#[test]
fn interior_disk_field_matches_bessel_profile() {
    let k = 1.0;
    let solver = HelmholtzSolver::new(shapes::circle(64, 1.0));
    let condition = BoundaryCondition::dirichlet(ones(64));
    let incidence = BoundaryIncidence::silent(64);
    let solution = solver
        .solve_boundary_interior(k, &condition, &incidence, None)
        .unwrap();

    let samples = [[0.0, 0.0], [0.5, 0.0], [0.0, -0.8]];
    let field = solver
        .solve_samples(&solution, &Array1::zeros(3), &samples, Orientation::Interior)
        .unwrap();

    let j0k = 1.0f64.bessel_jv(0.0);
    for (value, p) in field.iter().zip(samples.iter()) {
        let r = p[0].hypot(p[1]);
        let exact = (k * r).bessel_jv(0.0) / j0k;
        assert_relative_eq!(value.re, exact, max_relative = 0.03);
        assert!(value.im.abs() < 0.03 * exact.abs());
    }
}

#[test]
fn plain_equation_agrees_with_the_combined_one_off_resonance() {
    // mu = 0 drops the hypersingular part; away from the fictitious
    // frequencies both formulations solve the same problem.
    let k = 1.0;
    let solver = HelmholtzSolver::new(shapes::circle(48, 1.0));
    let condition = BoundaryCondition::dirichlet(ones(48));
    let incidence = BoundaryIncidence::silent(48);
    let combined = solver
        .solve_boundary_interior(k, &condition, &incidence, None)
        .unwrap();
    let plain = solver
        .solve_boundary_interior(k, &condition, &incidence, Some(Complex64::new(0.0, 0.0)))
        .unwrap();

    for (a, b) in combined.velocities().iter().zip(plain.velocities().iter()) {
        assert!((a - b).norm() < 0.05 * a.norm(), "{a} vs {b}");
    }
}

#[test]
fn exterior_pulsating_circle_radiates_a_hankel_wave() {
    // Uniform normal velocity v = 1 on the unit circle radiates
    // C H0(kr) with C = -1 / (k H1(k)).
    let k = 2.0;
    let solver = HelmholtzSolver::new(shapes::circle(64, 1.0));
    let condition = BoundaryCondition::neumann(ones(64));
    let incidence = BoundaryIncidence::silent(64);
    let solution = solver
        .solve_boundary_exterior(k, &condition, &incidence, None)
        .unwrap();

    let c = -1.0 / (k * hankel(1.0, k));
    let phi_boundary = c * hankel(0.0, k);
    for phi in solution.phis() {
        assert!(
            (phi - phi_boundary).norm() < 0.03 * phi_boundary.norm(),
            "{phi} vs {phi_boundary}"
        );
    }

    let field = solver
        .solve_samples(&solution, &Array1::zeros(2), &[[2.0, 0.0], [0.0, -3.0]], Orientation::Exterior)
        .unwrap();
    for (value, r) in field.iter().zip([2.0, 3.0]) {
        let exact = c * hankel(0.0, k * r);
        assert!((value - exact).norm() < 0.03 * exact.norm(), "{value} vs {exact}");
    }
}

/// Total field of a plane wave e^{ikx} scattered by a rigid unit cylinder,
/// from the classical partial-wave series.
fn rigid_cylinder_total_field(k: f64, r: f64, theta: f64) -> Complex64 {
    let i = Complex64::new(0.0, 1.0);
    let mut total = Complex64::new(0.0, 0.0);
    for m in 0..=16u32 {
        let mf = f64::from(m);
        // Z_m'(x) = Z_{m-1}(x) - (m / x) Z_m(x), with J0' = -J1.
        let dj = if m == 0 {
            -k.bessel_jv(1.0)
        } else {
            k.bessel_jv(mf - 1.0) - mf / k * k.bessel_jv(mf)
        };
        let dh = if m == 0 {
            -hankel(1.0, k)
        } else {
            hankel(mf - 1.0, k) - mf / k * hankel(mf, k)
        };
        let radial = (k * r).bessel_jv(mf) - dj / dh * hankel(mf, k * r);
        let eps = if m == 0 { 1.0 } else { 2.0 };
        total += eps * i.powu(m) * radial * (mf * theta).cos();
    }
    total
}

#[test]
fn rigid_cylinder_scattering_matches_the_partial_wave_series() {
    let k = 2.0;
    let n = 80;
    let chain = shapes::circle(n, 1.0);
    let solver = HelmholtzSolver::new(chain);

    // Total-field formulation: zero normal velocity on the rigid surface,
    // incident traces of the plane wave on the right-hand side.
    let condition = BoundaryCondition::neumann(Array1::zeros(n));
    let i = Complex64::new(0.0, 1.0);
    let mut phi_inc = Array1::zeros(n);
    let mut v_inc = Array1::zeros(n);
    for j in 0..n {
        let p = solver.geometry().center(j);
        let normal = solver.geometry().normal(j);
        let wave = (i * k * p[0]).exp();
        phi_inc[j] = wave;
        v_inc[j] = i * k * normal[0] * wave;
    }
    let incidence = BoundaryIncidence::new(phi_inc, v_inc);
    let solution = solver
        .solve_boundary_exterior(k, &condition, &incidence, None)
        .unwrap();

    let samples = [[2.0, 0.0], [-2.0, 0.0], [0.0, 2.0]];
    let incident_at_samples: Array1<Complex64> =
        samples.iter().map(|p| (i * k * p[0]).exp()).collect();
    let field = solver
        .solve_samples(&solution, &incident_at_samples, &samples, Orientation::Exterior)
        .unwrap();

    let references = [
        rigid_cylinder_total_field(k, 2.0, 0.0),
        rigid_cylinder_total_field(k, 2.0, std::f64::consts::PI),
        rigid_cylinder_total_field(k, 2.0, std::f64::consts::FRAC_PI_2),
    ];
    for (value, exact) in field.iter().zip(references.iter()) {
        assert!(
            (value - exact).norm() < 0.05 * exact.norm().max(0.2),
            "{value} vs {exact}"
        );
    }
}

#[test]
fn low_frequency_interior_solve_stays_finite() {
    // As k tends to zero the interior Dirichlet problem with phi = 1
    // degenerates to the constant field; the velocity must follow
    // -k J1(k) / J0(k), which is tiny.
    let solver = HelmholtzSolver::new(shapes::circle(32, 1.0));
    let condition = BoundaryCondition::dirichlet(ones(32));
    let incidence = BoundaryIncidence::silent(32);
    let solution = solver
        .solve_boundary_interior(1e-2, &condition, &incidence, None)
        .unwrap();
    for v in solution.velocities() {
        assert!(v.norm() < 1e-3, "velocity {v} should be near zero");
    }
}

#[test]
fn mixed_conditions_on_named_partitions_recover_the_constant_field() {
    // phi = 1 on the lid and zero flux on the cavity wall is solved by the
    // constant field, for the static kernel.
    let chain = shapes::truncated_circle(8, 24);
    let interface = chain.named_partition("interface").unwrap();
    let n = chain.element_count();

    let mut condition = BoundaryCondition::neumann(Array1::zeros(n));
    condition.set_range(
        interface,
        Complex64::new(1.0, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(1.0, 0.0),
    );

    let solver = HelmholtzSolver::new(chain);
    let incidence = BoundaryIncidence::silent(n);
    let solution = solver
        .solve_boundary_interior(0.0, &condition, &incidence, None)
        .unwrap();

    for phi in solution.phis() {
        assert_relative_eq!(phi.re, 1.0, epsilon = 2e-2);
        assert!(phi.im.abs() < 2e-2);
    }

    // A point well inside the truncated disk.
    let field = solver
        .solve_samples(&solution, &Array1::zeros(1), &[[0.0, -0.3]], Orientation::Interior)
        .unwrap();
    assert_relative_eq!(field[0].re, 1.0, epsilon = 2e-2);
    assert!(field[0].im.abs() < 2e-2);
}

#[test]
fn condition_limit_turns_bad_systems_into_errors() {
    let solver = HelmholtzSolver::new(shapes::circle(16, 1.0))
        .with_config(SolverConfig { condition_limit: 1.0 });
    let condition = BoundaryCondition::dirichlet(ones(16));
    let incidence = BoundaryIncidence::silent(16);
    let err = solver
        .solve_boundary_interior(1.0, &condition, &incidence, None)
        .err()
        .expect("condition limit of 1 must reject any real system");
    match err {
        BemError::SingularSystem { estimate } => assert!(estimate > 1.0),
        other => panic!("unexpected error {other:?}"),
    }
}
