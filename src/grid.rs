//! Boundary chain storage

use std::collections::HashMap;
use std::ops::Range;

use crate::traits::Geometry;
use crate::types::{BemError, Point2};

/// Shortest element length accepted at construction.
const MIN_ELEMENT_LENGTH: f64 = 1.0e-12;

/// A closed polyline boundary in the plane.
///
/// Vertices are connected by straight edges; each edge is one boundary
/// element collocated at its midpoint. For a chain traversed
/// counterclockwise the unit normals point out of the enclosed region.
/// Immutable after construction apart from partition labelling.
pub struct Chain {
    vertices: Vec<Point2>,
    edges: Vec<[usize; 2]>,
    centers: Vec<Point2>,
    normals: Vec<Point2>,
    lengths: Vec<f64>,
    partitions: HashMap<String, Range<usize>>,
}

impl Chain {
    /// Build a chain from vertex positions and edge index pairs.
    ///
    /// Centers, normals and lengths are derived here once. Fails with
    /// [`BemError::DegenerateElement`] if any edge has (near) zero length.
    /// Edge indices out of range are a programming error and panic.
    pub fn new(vertices: Vec<Point2>, edges: Vec<[usize; 2]>) -> Result<Self, BemError> {
        let mut centers = Vec::with_capacity(edges.len());
        let mut normals = Vec::with_capacity(edges.len());
        let mut lengths = Vec::with_capacity(edges.len());

        for (index, edge) in edges.iter().enumerate() {
            assert!(
                edge[0] < vertices.len() && edge[1] < vertices.len(),
                "edge {index} references a vertex out of range"
            );
            let a = vertices[edge[0]];
            let b = vertices[edge[1]];
            let dx = b[0] - a[0];
            let dy = b[1] - a[1];
            let length = dx.hypot(dy);
            if length < MIN_ELEMENT_LENGTH {
                return Err(BemError::DegenerateElement { index, length });
            }
            centers.push([0.5 * (a[0] + b[0]), 0.5 * (a[1] + b[1])]);
            normals.push([dy / length, -dx / length]);
            lengths.push(length);
        }

        Ok(Self {
            vertices,
            edges,
            centers,
            normals,
            lengths,
            partitions: HashMap::new(),
        })
    }

    /// Register a contiguous element range under `label`, replacing any
    /// previous range with the same label.
    pub fn set_named_partition(&mut self, label: &str, range: Range<usize>) {
        assert!(
            range.end <= self.edges.len(),
            "partition {label:?} exceeds the element count"
        );
        self.partitions.insert(label.to_string(), range);
    }

    /// All vertex positions.
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// All edge index pairs.
    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }
}

impl Geometry for Chain {
    fn element_count(&self) -> usize {
        self.edges.len()
    }

    fn center(&self, j: usize) -> Point2 {
        self.centers[j]
    }

    fn normal(&self, j: usize) -> Point2 {
        self.normals[j]
    }

    fn length(&self, j: usize) -> f64 {
        self.lengths[j]
    }

    fn edge_vertices(&self, j: usize) -> (Point2, Point2) {
        let [a, b] = self.edges[j];
        (self.vertices[a], self.vertices[b])
    }

    fn named_partition(&self, label: &str) -> Option<Range<usize>> {
        self.partitions.get(label).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::Chain;
    use crate::shapes;
    use crate::traits::Geometry;
    use approx::assert_relative_eq;

    #[test]
    fn circle_normals_point_outward() {
        let chain = shapes::circle(24, 1.0);
        for j in 0..chain.element_count() {
            let c = chain.center(j);
            let n = chain.normal(j);
            // On a centered circle the outward normal is radial.
            let radial = (c[0] * n[0] + c[1] * n[1]) / c[0].hypot(c[1]);
            assert_relative_eq!(radial, 1.0, epsilon = 1e-12);
            assert_relative_eq!(n[0].hypot(n[1]), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn circle_perimeter_approaches_circumference() {
        let chain = shapes::circle(256, 2.0);
        let perimeter: f64 = (0..chain.element_count()).map(|j| chain.length(j)).sum();
        assert_relative_eq!(
            perimeter,
            2.0 * std::f64::consts::PI * 2.0,
            max_relative = 1e-3
        );
    }

    #[test]
    fn degenerate_edge_is_rejected() {
        let vertices = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 0.0]];
        let edges = vec![[0, 1], [1, 2], [2, 0]];
        assert!(Chain::new(vertices, edges).is_err());
    }

    #[test]
    fn named_partitions_are_returned() {
        let mut chain = shapes::circle(10, 1.0);
        chain.set_named_partition("interface", 0..4);
        chain.set_named_partition("cavity", 4..10);
        assert_eq!(chain.named_partition("interface"), Some(0..4));
        assert_eq!(chain.named_partition("cavity"), Some(4..10));
        assert_eq!(chain.named_partition("nonexistent"), None);
    }
}
