// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh container: nodes, boundaries and cells with integer markers

mod topology;

pub use topology::edge_key;

use crate::error::{MeshError, MeshResult};
use crate::geometry::BoundingBox;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Stable index of a node in its mesh
pub type NodeId = usize;

/// Shape of a boundary or cell entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Edge,
    Triangle,
    Quadrangle,
    TriPrism,
    Hexahedron,
}

impl Shape {
    pub fn node_count(&self) -> usize {
        match self {
            Self::Edge => 2,
            Self::Triangle => 3,
            Self::Quadrangle => 4,
            Self::TriPrism => 6,
            Self::Hexahedron => 8,
        }
    }

    /// Topological dimension of the shape
    pub fn dim(&self) -> usize {
        match self {
            Self::Edge => 1,
            Self::Triangle | Self::Quadrangle => 2,
            Self::TriPrism | Self::Hexahedron => 3,
        }
    }

    /// Shape obtained by sweeping this one along a new axis
    pub fn lifted(&self) -> Option<Shape> {
        match self {
            Self::Edge => Some(Self::Quadrangle),
            Self::Triangle => Some(Self::TriPrism),
            Self::Quadrangle => Some(Self::Hexahedron),
            Self::TriPrism | Self::Hexahedron => None,
        }
    }

    /// Inverse of `lifted`: the cross-section a swept shape was made from
    pub fn base(&self) -> Option<Shape> {
        match self {
            Self::TriPrism => Some(Self::Triangle),
            Self::Hexahedron => Some(Self::Quadrangle),
            Self::Quadrangle => Some(Self::Edge),
            Self::Edge | Self::Triangle => None,
        }
    }
}

/// Mesh node with position and marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub pos: Point3<f64>,
    pub marker: i32,
}

impl Node {
    pub fn new(pos: Point3<f64>, marker: i32) -> Self {
        Self { pos, marker }
    }
}

/// Cell: a full-dimensional element of the mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub nodes: Vec<NodeId>,
    pub shape: Shape,
    pub marker: i32,
}

/// Boundary entity: an edge in 2D, a face in 3D
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub nodes: Vec<NodeId>,
    pub shape: Shape,
    pub marker: i32,
}

/// Unstructured mesh of a fixed dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    dim: usize,
    nodes: Vec<Node>,
    boundaries: Vec<Boundary>,
    cells: Vec<Cell>,
}

impl Mesh {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            nodes: Vec::new(),
            boundaries: Vec::new(),
            cells: Vec::new(),
        }
    }

    pub fn with_capacity(dim: usize, node_count: usize, boundary_count: usize, cell_count: usize) -> Self {
        Self {
            dim,
            nodes: Vec::with_capacity(node_count),
            boundaries: Vec::with_capacity(boundary_count),
            cells: Vec::with_capacity(cell_count),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Add a node and return its index
    pub fn create_node(&mut self, pos: Point3<f64>, marker: i32) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(pos, marker));
        id
    }

    /// Add a cell over existing nodes and return its index
    pub fn create_cell(&mut self, nodes: Vec<NodeId>, shape: Shape, marker: i32) -> MeshResult<usize> {
        self.check_entity(&nodes, shape)?;
        self.cells.push(Cell {
            nodes,
            shape,
            marker,
        });
        Ok(self.cells.len() - 1)
    }

    /// Add a boundary entity over existing nodes and return its index
    pub fn create_boundary(&mut self, nodes: Vec<NodeId>, shape: Shape, marker: i32) -> MeshResult<usize> {
        self.check_entity(&nodes, shape)?;
        self.boundaries.push(Boundary {
            nodes,
            shape,
            marker,
        });
        Ok(self.boundaries.len() - 1)
    }

    fn check_entity(&self, nodes: &[NodeId], shape: Shape) -> MeshResult<()> {
        if nodes.len() != shape.node_count() {
            return Err(MeshError::NodeCountMismatch {
                shape,
                expected: shape.node_count(),
                actual: nodes.len(),
            });
        }
        match nodes.iter().find(|&&id| id >= self.nodes.len()) {
            Some(&index) => Err(MeshError::InvalidNodeIndex {
                index,
                count: self.nodes.len(),
            }),
            None => Ok(()),
        }
    }

    /// Re-check every entity against the node table, e.g. after deserialising
    pub fn validate(&self) -> MeshResult<()> {
        for cell in &self.cells {
            self.check_entity(&cell.nodes, cell.shape)?;
        }
        for boundary in &self.boundaries {
            self.check_entity(&boundary.nodes, boundary.shape)?;
        }
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node positions and markers may change freely; connectivity may not
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn boundary_count(&self) -> usize {
        self.boundaries.len()
    }

    pub fn cell_markers(&self) -> Vec<i32> {
        self.cells.iter().map(|c| c.marker).collect()
    }

    pub fn boundary_markers(&self) -> Vec<i32> {
        self.boundaries.iter().map(|b| b.marker).collect()
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.nodes.iter().map(|n| &n.pos))
    }
}
