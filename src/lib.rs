// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Terramesh
//!
//! Structured mesh generation by extrusion: lift a polyline into a 2D mesh
//! or a 2D mesh into a 3D mesh along a sequence of levels, carry boundary
//! markers across, and pad the result with a ring of boundary triangles.
//! Also provides a plane in Hessian normal form with intersection queries.

pub mod config;
pub mod error;
pub mod generators;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod utils;

pub use config::JobConfig;
pub use error::{BoundaryError, MeshError, MeshResult};
pub use generators::{add_triangle_boundary, create_mesh_2d, create_mesh_3d, MarkerTable};
pub use geometry::{Line, Plane, TOLERANCE};
pub use mesh::{Mesh, Shape};

use anyhow::Result;
use std::path::Path;

/// Run the extrusion job described by a TOML file
pub fn extrude_file(path: impl AsRef<Path>) -> Result<Mesh> {
    JobConfig::load(path)?.run()
}
