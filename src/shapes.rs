//! Definition of various test boundaries.

use std::f64::consts::PI;

use crate::grid::Chain;

/// Regular polygon approximation of a circle, traversed counterclockwise so
/// that the element normals point outward.
pub fn circle(segments: usize, radius: f64) -> Chain {
    assert!(segments >= 3, "a closed chain needs at least 3 edges");
    let vertices = (0..segments)
        .map(|i| {
            let t = 2.0 * PI * i as f64 / segments as f64;
            [radius * t.cos(), radius * t.sin()]
        })
        .collect::<Vec<_>>();
    let edges = (0..segments)
        .map(|i| [i, (i + 1) % segments])
        .collect::<Vec<_>>();
    Chain::new(vertices, edges).expect("regular polygon has no degenerate edges")
}

/// Axis-aligned square of the given side length with its lower-left corner
/// at the origin, `segments_per_side` elements per side, counterclockwise.
pub fn square(segments_per_side: usize, side: f64) -> Chain {
    assert!(segments_per_side >= 1);
    let n = segments_per_side;
    let h = side / n as f64;
    let mut vertices = Vec::with_capacity(4 * n);
    for i in 0..n {
        vertices.push([i as f64 * h, 0.0]);
    }
    for i in 0..n {
        vertices.push([side, i as f64 * h]);
    }
    for i in 0..n {
        vertices.push([side - i as f64 * h, side]);
    }
    for i in 0..n {
        vertices.push([0.0, side - i as f64 * h]);
    }
    let edges = (0..4 * n).map(|i| [i, (i + 1) % (4 * n)]).collect();
    Chain::new(vertices, edges).expect("square sides have no degenerate edges")
}

/// Unit circle with the upper arc between 45 and 135 degrees replaced by a
/// straight lid, modelling an open cavity closed by an interface.
///
/// The lid elements come first and are registered as the `"interface"`
/// partition; the remaining arc elements form the `"cavity"` partition.
pub fn truncated_circle(lid_segments: usize, arc_segments: usize) -> Chain {
    assert!(lid_segments >= 1 && arc_segments >= 2);
    let start = PI / 4.0;
    let sweep = 3.0 * PI / 2.0;
    let right = [start.cos(), start.sin()];
    let left = [-start.cos(), start.sin()];

    let mut vertices = Vec::with_capacity(lid_segments + arc_segments);
    // Lid runs right to left so the whole chain stays counterclockwise.
    for i in 0..lid_segments {
        let t = i as f64 / lid_segments as f64;
        vertices.push([right[0] + t * (left[0] - right[0]), right[1]]);
    }
    // Arc from 135 degrees counterclockwise through the bottom back to 45.
    for i in 0..arc_segments {
        let t = PI - start + sweep * i as f64 / arc_segments as f64;
        vertices.push([t.cos(), t.sin()]);
    }

    let count = vertices.len();
    let edges = (0..count).map(|i| [i, (i + 1) % count]).collect();
    let mut chain = Chain::new(vertices, edges).expect("truncated circle edges are nondegenerate");
    chain.set_named_partition("interface", 0..lid_segments);
    chain.set_named_partition("cavity", lid_segments..count);
    chain
}
