// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON mesh files

use crate::mesh::Mesh;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write a mesh as pretty-printed JSON
pub fn save_mesh(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(mesh).context("Failed to serialize mesh")?;
    fs::write(path, json).with_context(|| format!("Failed to write mesh file: {:?}", path))?;
    Ok(())
}

/// Read a mesh from JSON and check its node references
pub fn load_mesh(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read mesh file: {:?}", path))?;
    let mesh: Mesh = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse mesh file: {:?}", path))?;
    mesh.validate()
        .with_context(|| format!("Invalid mesh in {:?}", path))?;
    Ok(mesh)
}
