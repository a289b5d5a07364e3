//! Trait definitions

use num::complex::Complex64;
use std::ops::Range;

use crate::types::Point2;

/// Read-only provider of a discretized closed boundary.
///
/// Implementations own the mesh data; the assembler, solver and sampler only
/// ever read from it. Element indices run over `0..element_count()`.
pub trait Geometry: Sync {
    /// Number of boundary elements.
    fn element_count(&self) -> usize;

    /// Collocation point (midpoint) of element `j`.
    fn center(&self, j: usize) -> Point2;

    /// Outward unit normal of element `j`.
    fn normal(&self, j: usize) -> Point2;

    /// Length of element `j`.
    fn length(&self, j: usize) -> f64;

    /// Endpoints of element `j`.
    fn edge_vertices(&self, j: usize) -> (Point2, Point2);

    /// Contiguous element range registered under `label`, if any. Used by
    /// calling code to assign boundary conditions to sub-regions; never
    /// written by this crate.
    fn named_partition(&self, label: &str) -> Option<Range<usize>>;
}

/// Evaluator for the four layer-potential contributions of one straight
/// boundary element seen from one field point.
///
/// `p_on_element` marks the singular self-interaction case, where `p` lies
/// on the element itself and the logarithmic/hypersingular parts need
/// analytic treatment. Implementations must be deterministic: returned
/// values depend only on the geometric arguments and `k`, never on call
/// order. `k == 0` selects the static (Laplace) kernels.
pub trait LayerPotentials: Sync {
    /// Single-layer contribution L: the Green's function integrated over
    /// the element.
    fn l(&self, k: f64, p: Point2, qa: Point2, qb: Point2, p_on_element: bool) -> Complex64;

    /// Double-layer contribution M: normal derivative of the Green's
    /// function on the element side.
    fn m(&self, k: f64, p: Point2, qa: Point2, qb: Point2, p_on_element: bool) -> Complex64;

    /// Transposed double-layer contribution Mt: derivative taken at the
    /// field point along `normal_p`.
    fn mt(
        &self,
        k: f64,
        p: Point2,
        normal_p: Point2,
        qa: Point2,
        qb: Point2,
        p_on_element: bool,
    ) -> Complex64;

    /// Hypersingular contribution N: derivative taken at both the field
    /// point and the element.
    fn n(
        &self,
        k: f64,
        p: Point2,
        normal_p: Point2,
        qa: Point2,
        qb: Point2,
        p_on_element: bool,
    ) -> Complex64;
}
