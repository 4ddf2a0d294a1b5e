// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! 3D prism/hexahedron meshes from extruded 2D meshes

use super::levels::Levels;
use super::markers::{MarkerTable, Side};
use crate::error::{MeshError, MeshResult};
use crate::mesh::{edge_key, Mesh, NodeId, Shape};
use nalgebra::Vector3;
use tracing::debug;

/// Extrude a 2D mesh along the levels `z`.
///
/// Triangles become prisms and quadrangles hexahedra, keeping the cell
/// marker. Edge boundaries become quadrangle side faces with the edge
/// marker. Faces on the first level get `bottom_marker`, faces on the last
/// level get `top_marker`.
pub fn create_mesh_3d(source: &Mesh, z: &[f64], top_marker: i32, bottom_marker: i32) -> MeshResult<Mesh> {
    let markers = MarkerTable {
        top: top_marker,
        bottom: bottom_marker,
        ..MarkerTable::default()
    };
    extrude_mesh(source, z, &markers)
}

/// [`create_mesh_3d`] with the positional markers given as a table
pub fn extrude_mesh(source: &Mesh, z: &[f64], markers: &MarkerTable) -> MeshResult<Mesh> {
    let levels = Levels::new(z)?;

    if source.dim() != 2 {
        return Err(MeshError::DimensionMismatch {
            expected: 2,
            actual: source.dim(),
        });
    }
    if source.cell_count() == 0 {
        return Err(MeshError::EmptySource { what: "cells" });
    }
    if let Some(cell) = source
        .cells()
        .iter()
        .find(|c| !matches!(c.shape, Shape::Triangle | Shape::Quadrangle))
    {
        return Err(MeshError::UnsupportedShape { shape: cell.shape });
    }

    let walls = wall_edges(source);
    let level_size = source.node_count();
    let node_at = |id: NodeId, level: usize| level * level_size + id;
    let layers = levels.layer_count();

    let mut mesh = Mesh::with_capacity(
        3,
        level_size * levels.len(),
        2 * source.cell_count() + walls.len() * layers,
        source.cell_count() * layers,
    );

    for &offset in levels.values() {
        for node in source.nodes() {
            mesh.create_node(node.pos + Vector3::new(0.0, 0.0, offset), node.marker);
        }
    }

    for layer in 0..layers {
        for cell in source.cells() {
            let nodes = cell
                .nodes
                .iter()
                .map(|&id| node_at(id, layer))
                .chain(cell.nodes.iter().map(|&id| node_at(id, layer + 1)))
                .collect();
            // Shapes were checked above, both lift
            let shape = cell.shape.lifted().unwrap_or(Shape::Hexahedron);
            mesh.create_cell(nodes, shape, cell.marker)?;
        }
    }

    let cap = |mesh: &mut Mesh, level: usize, marker: i32| -> MeshResult<()> {
        for cell in source.cells() {
            let nodes = cell.nodes.iter().map(|&id| node_at(id, level)).collect();
            mesh.create_boundary(nodes, cell.shape, marker)?;
        }
        Ok(())
    };

    cap(&mut mesh, 0, markers.default_for(Side::Bottom))?;

    for layer in 0..layers {
        for &(a, b, marker) in &walls {
            mesh.create_boundary(
                vec![
                    node_at(a, layer),
                    node_at(b, layer),
                    node_at(b, layer + 1),
                    node_at(a, layer + 1),
                ],
                Shape::Quadrangle,
                marker,
            )?;
        }
    }

    cap(&mut mesh, levels.last_index(), markers.default_for(Side::Top))?;

    debug!(
        nodes = mesh.node_count(),
        cells = mesh.cell_count(),
        boundaries = mesh.boundary_count(),
        "extruded 2D mesh into 3D mesh"
    );
    Ok(mesh)
}

/// Source edges that become side walls: every marked edge boundary, and
/// unmarked ones on the hull. Unmarked interior edges are dropped.
fn wall_edges(source: &Mesh) -> Vec<(NodeId, NodeId, i32)> {
    let counts = source.edge_use_counts();
    source
        .boundaries()
        .iter()
        .filter(|b| b.shape == Shape::Edge)
        .filter(|b| {
            b.marker != 0 || counts.get(&edge_key(b.nodes[0], b.nodes[1])).copied() == Some(1)
        })
        .map(|b| (b.nodes[0], b.nodes[1], b.marker))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    /// Unit square split into a quad and two triangles:
    /// quad [0,1,4,3] on x in [0,1], triangles on x in [1,2].
    fn mixed_mesh() -> Mesh {
        let mut mesh = Mesh::new(2);
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 1.0), (1.0, 1.0), (2.0, 1.0)] {
            mesh.create_node(Point3::new(x, y, 0.0), 0);
        }
        mesh.create_cell(vec![0, 1, 4, 3], Shape::Quadrangle, 1).unwrap();
        mesh.create_cell(vec![1, 2, 5], Shape::Triangle, 2).unwrap();
        mesh.create_cell(vec![1, 5, 4], Shape::Triangle, 3).unwrap();

        // Hull edges, bottom edge marked
        mesh.create_boundary(vec![0, 1], Shape::Edge, 7).unwrap();
        mesh.create_boundary(vec![1, 2], Shape::Edge, 7).unwrap();
        mesh.create_boundary(vec![2, 5], Shape::Edge, 0).unwrap();
        mesh.create_boundary(vec![5, 4], Shape::Edge, 0).unwrap();
        mesh.create_boundary(vec![4, 3], Shape::Edge, 0).unwrap();
        mesh.create_boundary(vec![3, 0], Shape::Edge, 0).unwrap();
        // Interior edges: one unmarked, one marked
        mesh.create_boundary(vec![1, 4], Shape::Edge, 0).unwrap();
        mesh.create_boundary(vec![1, 5], Shape::Edge, 8).unwrap();
        mesh
    }

    #[test]
    fn test_cells_lift_shapes_and_markers() {
        let mesh = create_mesh_3d(&mixed_mesh(), &[0.0, 1.0, 3.0], 0, 0).unwrap();

        assert_eq!(mesh.dim(), 3);
        assert_eq!(mesh.node_count(), 18);
        assert_eq!(mesh.cell_count(), 6);
        assert_eq!(mesh.cell_markers(), vec![1, 2, 3, 1, 2, 3]);

        let shapes: Vec<_> = mesh.cells().iter().map(|c| c.shape).collect();
        assert_eq!(shapes[0], Shape::Hexahedron);
        assert_eq!(shapes[1], Shape::TriPrism);
        assert_eq!(mesh.cells()[4].nodes, vec![7, 8, 11, 13, 14, 17]);
    }

    #[test]
    fn test_top_and_bottom_faces() {
        let mesh = create_mesh_3d(&mixed_mesh(), &[0.0, 1.0, 3.0], 10, 20).unwrap();

        let bottom: Vec<_> = mesh.boundaries().iter().filter(|b| b.marker == 20).collect();
        let top: Vec<_> = mesh.boundaries().iter().filter(|b| b.marker == 10).collect();
        assert_eq!(bottom.len(), 3);
        assert_eq!(top.len(), 3);

        for face in bottom {
            assert!(face.nodes.iter().all(|&id| mesh.node(id).pos.z == 0.0));
        }
        for face in top {
            assert!(face.nodes.iter().all(|&id| mesh.node(id).pos.z == 3.0));
        }
    }

    #[test]
    fn test_side_walls() {
        let mesh = create_mesh_3d(&mixed_mesh(), &[0.0, 1.0, 3.0], 10, 20).unwrap();

        let walls: Vec<_> = mesh
            .boundaries()
            .iter()
            .filter(|b| b.shape == Shape::Quadrangle && b.marker != 10 && b.marker != 20)
            .collect();

        // 6 hull edges + 1 marked interior edge, 2 layers each
        assert_eq!(walls.len(), 14);
        assert_eq!(walls.iter().filter(|b| b.marker == 7).count(), 4);
        assert_eq!(walls.iter().filter(|b| b.marker == 8).count(), 2);
    }

    #[test]
    fn test_usage_errors() {
        let source = mixed_mesh();
        assert!(matches!(
            create_mesh_3d(&source, &[0.0, 2.0, 1.0], 0, 0),
            Err(MeshError::NonMonotonicLevels { .. })
        ));
        assert!(matches!(
            create_mesh_3d(&source, &[0.0], 0, 0),
            Err(MeshError::TooFewLevels { .. })
        ));
        assert!(matches!(
            create_mesh_3d(&Mesh::new(2), &[0.0, 1.0], 0, 0),
            Err(MeshError::EmptySource { .. })
        ));
        assert!(matches!(
            create_mesh_3d(&Mesh::new(3), &[0.0, 1.0], 0, 0),
            Err(MeshError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_unsupported_cell_shape() {
        let mut source = Mesh::new(2);
        source.create_node(Point3::new(0.0, 0.0, 0.0), 0);
        source.create_node(Point3::new(1.0, 0.0, 0.0), 0);
        source.create_cell(vec![0, 1], Shape::Edge, 0).unwrap();

        assert_eq!(
            create_mesh_3d(&source, &[0.0, 1.0], 0, 0).unwrap_err(),
            MeshError::UnsupportedShape { shape: Shape::Edge }
        );
    }
}
