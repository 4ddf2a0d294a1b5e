// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh generators - dimension lifting by extrusion and boundary rings

pub mod batch;
mod boundary;
mod extrude2d;
mod extrude3d;
mod levels;
mod markers;

pub use boundary::{add_triangle_boundary, TriangleBoundary, ARTIFACT_FILE};
pub use extrude2d::{adjust_back, create_mesh_2d, extrude_polyline};
pub use extrude3d::{create_mesh_3d, extrude_mesh};
pub use levels::Levels;
pub use markers::{MarkerTable, Side};
