// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for mesh construction and extrusion

use crate::mesh::Shape;
use thiserror::Error;

/// Errors raised when a generator refuses its input.
///
/// These are usage errors: the caller handed over an axis sequence or a
/// source mesh that cannot be lifted. No partial mesh is ever returned
/// alongside them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// Extrusion needs at least two levels to form one layer
    #[error("Extrusion needs at least 2 levels, got {count}")]
    TooFewLevels { count: usize },

    /// Levels must be strictly increasing or strictly decreasing
    #[error("Levels are not strictly monotonic at index {index}: {previous} -> {value}")]
    NonMonotonicLevels {
        index: usize,
        previous: f64,
        value: f64,
    },

    /// NaN or infinite level value
    #[error("Level {index} is not finite: {value}")]
    NonFiniteLevel { index: usize, value: f64 },

    /// Source mesh has nothing to extrude
    #[error("Source mesh has no {what} to extrude")]
    EmptySource { what: &'static str },

    /// Source entity shape cannot be lifted
    #[error("Cannot extrude {shape:?} entity")]
    UnsupportedShape { shape: Shape },

    /// Source mesh has the wrong dimension for this generator
    #[error("Expected a {expected}D source mesh, got {actual}D")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Entity references a node that does not exist
    #[error("Node index {index} out of range (mesh has {count} nodes)")]
    InvalidNodeIndex { index: usize, count: usize },

    /// Entity node list does not match its shape
    #[error("{shape:?} needs {expected} nodes, got {actual}")]
    NodeCountMismatch {
        shape: Shape,
        expected: usize,
        actual: usize,
    },
}

/// Result alias for mesh operations
pub type MeshResult<T> = Result<T, MeshError>;

/// Reasons a triangle boundary cannot be added around a mesh.
///
/// The mesh is left untouched whenever one of these is reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundaryError {
    /// Boundary widths must be positive and finite
    #[error("Boundary extents must be positive, got x={x}, y={y}")]
    InvalidExtent { x: f64, y: f64 },

    #[error("Mesh has no cells")]
    EmptyMesh,

    /// Mesh collapses to a point or a line in the xy plane
    #[error("Mesh has zero extent in the xy plane")]
    DegenerateMesh,

    #[error("Cannot add a triangle boundary to a {0}D mesh")]
    UnsupportedDimension(usize),

    /// Hull has holes, several components, or is pinched
    #[error("Mesh hull is not a single closed loop")]
    OpenHull,

    /// A ray from the hull centroid crosses the hull twice
    #[error("Mesh hull is not star-shaped around its centroid")]
    NotStarShaped,

    /// Stitched triangles are inverted or do not tile the ring
    #[error("Boundary ring triangles overlap or are inverted")]
    InvalidRing,

    /// 3D hull node without a partner on another level
    #[error("3D mesh is not layered: hull node {node} has no partner at z = {z}")]
    NotLayered { node: usize, z: f64 },
}
