// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! 2D quad meshes from extruded polylines
//!
//! Every polyline node is copied to each y level. Each polyline edge spans
//! one quadrangle per layer. Edge markers become cell markers, node markers
//! become markers of the vertical side edges running through the layers.

use super::levels::Levels;
use super::markers::{MarkerTable, Side};
use crate::error::{MeshError, MeshResult};
use crate::mesh::{Mesh, NodeId, Shape};
use nalgebra::Vector3;
use tracing::debug;

/// Polyline edge of the source mesh
#[derive(Debug, Clone, Copy)]
struct SourceEdge {
    a: NodeId,
    b: NodeId,
    marker: i32,
}

/// Extrude a polyline into a 2D quad mesh along the levels `y`.
///
/// The polyline is read from the edge cells of a 1D mesh, or from the edge
/// boundaries of a 2D mesh. Node `i` of the polyline at level `j` is placed
/// at `pos_i + (0, y_j)`.
///
/// * Edge markers become cell markers.
/// * Marked nodes become marked side edges through all layers.
/// * Unmarked nodes on the first/last level get `front_marker`/`back_marker`.
/// * Unmarked polyline ends get side edges with `left_marker`/`right_marker`.
/// * `adjust_back` flattens the last level to `y.last()`, see [`adjust_back`].
pub fn create_mesh_2d(
    source: &Mesh,
    y: &[f64],
    front_marker: i32,
    back_marker: i32,
    left_marker: i32,
    right_marker: i32,
    adjust_back: bool,
) -> MeshResult<Mesh> {
    let markers = MarkerTable {
        front: front_marker,
        back: back_marker,
        left: left_marker,
        right: right_marker,
        ..MarkerTable::default()
    };
    extrude_polyline(source, y, &markers, adjust_back)
}

/// [`create_mesh_2d`] with the positional markers given as a table
pub fn extrude_polyline(
    source: &Mesh,
    y: &[f64],
    markers: &MarkerTable,
    adjust: bool,
) -> MeshResult<Mesh> {
    let levels = Levels::new(y)?;
    let edges = polyline_edges(source)?;

    // Compact numbering of the nodes the polyline actually uses
    let mut local: Vec<Option<usize>> = vec![None; source.node_count()];
    let mut active: Vec<NodeId> = Vec::new();
    for edge in &edges {
        for id in [edge.a, edge.b] {
            if local[id].is_none() {
                local[id] = Some(active.len());
                active.push(id);
            }
        }
    }
    let level_size = active.len();
    let node_at = |id: NodeId, level: usize| level * level_size + local[id].unwrap_or_default();

    let mut mesh = Mesh::with_capacity(
        2,
        level_size * levels.len(),
        2 * edges.len() + level_size * levels.layer_count(),
        edges.len() * levels.layer_count(),
    );

    for (level, &offset) in levels.values().iter().enumerate() {
        for &id in &active {
            let node = source.node(id);
            let marker = if level == 0 {
                markers.resolve(Side::Front, node.marker)
            } else if level == levels.last_index() {
                markers.resolve(Side::Back, node.marker)
            } else {
                node.marker
            };
            mesh.create_node(node.pos + Vector3::new(0.0, offset, 0.0), marker);
        }
    }

    for layer in 0..levels.layer_count() {
        for edge in &edges {
            mesh.create_cell(
                vec![
                    node_at(edge.a, layer),
                    node_at(edge.b, layer),
                    node_at(edge.b, layer + 1),
                    node_at(edge.a, layer + 1),
                ],
                Shape::Quadrangle,
                edge.marker,
            )?;
        }
    }

    for edge in &edges {
        mesh.create_boundary(
            vec![node_at(edge.a, 0), node_at(edge.b, 0)],
            Shape::Edge,
            markers.default_for(Side::Front),
        )?;
    }

    let (left, right) = polyline_ends(source, &edges);
    for &id in &active {
        let source_marker = source.node(id).marker;
        let marker = if Some(id) == left {
            markers.resolve(Side::Left, source_marker)
        } else if Some(id) == right {
            markers.resolve(Side::Right, source_marker)
        } else {
            source_marker
        };
        if marker == 0 {
            continue;
        }
        for layer in 0..levels.layer_count() {
            mesh.create_boundary(
                vec![node_at(id, layer), node_at(id, layer + 1)],
                Shape::Edge,
                marker,
            )?;
        }
    }

    let last = levels.last_index();
    for edge in &edges {
        mesh.create_boundary(
            vec![node_at(edge.b, last), node_at(edge.a, last)],
            Shape::Edge,
            markers.default_for(Side::Back),
        )?;
    }

    if adjust {
        adjust_back(&mut mesh, level_size, levels.last());
    }

    debug!(
        nodes = mesh.node_count(),
        cells = mesh.cell_count(),
        boundaries = mesh.boundary_count(),
        "extruded polyline into 2D mesh"
    );
    Ok(mesh)
}

/// Flatten the terminating level of an extruded mesh.
///
/// Nodes are laid out level by level, `level_size` per level; the y
/// coordinate of every node of the last level is set to `y`. Topology and
/// markers are untouched.
pub fn adjust_back(mesh: &mut Mesh, level_size: usize, y: f64) {
    let count = mesh.node_count();
    let start = count.saturating_sub(level_size);
    for node in &mut mesh.nodes_mut()[start..] {
        node.pos.y = y;
    }
}

fn polyline_edges(source: &Mesh) -> MeshResult<Vec<SourceEdge>> {
    let to_edge = |nodes: &[NodeId], marker: i32| SourceEdge {
        a: nodes[0],
        b: nodes[1],
        marker,
    };

    let edges: Vec<SourceEdge> = if source.dim() == 1 {
        source
            .cells()
            .iter()
            .filter(|c| c.shape == Shape::Edge)
            .map(|c| to_edge(&c.nodes, c.marker))
            .collect()
    } else {
        source
            .boundaries()
            .iter()
            .filter(|b| b.shape == Shape::Edge)
            .map(|b| to_edge(&b.nodes, b.marker))
            .collect()
    };

    if edges.is_empty() {
        return Err(MeshError::EmptySource { what: "edges" });
    }
    Ok(edges)
}

/// Free ends of the polyline (degree-1 nodes) with the smallest and the
/// largest x. A closed polyline has none.
fn polyline_ends(source: &Mesh, edges: &[SourceEdge]) -> (Option<NodeId>, Option<NodeId>) {
    let mut degree = vec![0usize; source.node_count()];
    for edge in edges {
        degree[edge.a] += 1;
        degree[edge.b] += 1;
    }

    let ends: Vec<NodeId> = (0..degree.len()).filter(|&id| degree[id] == 1).collect();
    let x = |id: &NodeId| source.node(*id).pos.x;
    let left = ends.iter().min_by(|a, b| x(a).total_cmp(&x(b))).copied();
    let right = ends.iter().max_by(|a, b| x(a).total_cmp(&x(b))).copied();
    (left, right)
}
