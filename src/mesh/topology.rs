// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Edge adjacency and hull extraction for 2D cell complexes

use super::{Mesh, NodeId};
use crate::utils::math::signed_area_xy;
use ahash::AHashMap;

/// Undirected edge key
pub fn edge_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Cyclic edges of a polygonal cell, in node order
fn polygon_edges(nodes: &[NodeId]) -> impl Iterator<Item = [NodeId; 2]> + '_ {
    (0..nodes.len()).map(move |i| [nodes[i], nodes[(i + 1) % nodes.len()]])
}

impl Mesh {
    /// Number of 2D cells sharing each edge
    pub fn edge_use_counts(&self) -> AHashMap<(NodeId, NodeId), usize> {
        let mut counts = AHashMap::new();
        for cell in self.cells.iter().filter(|c| c.shape.dim() == 2) {
            for [a, b] in polygon_edges(&cell.nodes) {
                *counts.entry(edge_key(a, b)).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Edges used by exactly one 2D cell, directed so the owning cell lies
    /// on their left in the xy plane. Returned in cell order.
    pub fn hull_edges(&self) -> Vec<[NodeId; 2]> {
        let counts = self.edge_use_counts();
        let mut hull = Vec::new();

        for cell in self.cells.iter().filter(|c| c.shape.dim() == 2) {
            let positions: Vec<_> = cell.nodes.iter().map(|&id| self.nodes[id].pos).collect();
            let clockwise = signed_area_xy(&positions) < 0.0;

            for [a, b] in polygon_edges(&cell.nodes) {
                if counts.get(&edge_key(a, b)) == Some(&1) {
                    hull.push(if clockwise { [b, a] } else { [a, b] });
                }
            }
        }
        hull
    }

    /// The hull as one closed, counter-clockwise node loop.
    ///
    /// `None` when the hull is empty, has holes or several components, or
    /// is pinched (a node with two outgoing hull edges).
    pub fn outer_loop(&self) -> Option<Vec<NodeId>> {
        let hull = self.hull_edges();
        if hull.len() < 3 {
            return None;
        }

        let mut next: AHashMap<NodeId, NodeId> = AHashMap::with_capacity(hull.len());
        for &[a, b] in &hull {
            if next.insert(a, b).is_some() {
                return None;
            }
        }

        let start = hull[0][0];
        let mut loop_nodes = vec![start];
        let mut current = *next.get(&start)?;
        while current != start {
            if loop_nodes.len() >= hull.len() {
                return None;
            }
            loop_nodes.push(current);
            current = *next.get(&current)?;
        }

        (loop_nodes.len() == hull.len()).then_some(loop_nodes)
    }
}
