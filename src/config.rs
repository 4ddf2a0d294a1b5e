// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Extrusion job configuration

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::generators::{
    extrude_mesh, extrude_polyline, MarkerTable, TriangleBoundary, ARTIFACT_FILE,
};
use crate::io;
use crate::mesh::Mesh;

/// Which generator a job runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Polyline to 2D mesh along y
    Mesh2d,
    /// 2D mesh to 3D mesh along z
    Mesh3d,
}

/// Optional triangle ring added after extrusion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConfig {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub marker: i32,
}

/// A single extrusion job read from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Source mesh (JSON)
    pub source: PathBuf,
    pub operation: Operation,
    /// Level coordinates along the new axis
    pub levels: Vec<f64>,
    /// Pin the last level back onto the final coordinate (2D only)
    #[serde(default)]
    pub adjust_back: bool,
    /// Where the generated mesh is written
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Also write the staged boundary mesh next to the output
    #[serde(default)]
    pub save_artifacts: bool,
    #[serde(default)]
    pub markers: MarkerTable,
    #[serde(default)]
    pub boundary: Option<BoundaryConfig>,
}

fn default_output() -> PathBuf {
    PathBuf::from("mesh.json")
}

impl JobConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file: {:?}", path))?;
        let mut config: JobConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse job file: {:?}", path))?;

        // Relative source paths are resolved against the job file
        if config.source.is_relative() {
            if let Some(dir) = path.parent() {
                config.source = dir.join(&config.source);
            }
        }
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::from_file(path)?;

        if let Ok(output) = std::env::var("TERRAMESH_OUTPUT") {
            config.output = PathBuf::from(output);
        }

        if let Ok(save) = std::env::var("TERRAMESH_SAVE_ARTIFACTS") {
            config.save_artifacts = save.parse().unwrap_or(false);
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize job")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write job file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Load the source mesh, extrude it, and apply the boundary step if configured
    pub fn run(&self) -> Result<Mesh> {
        let source = io::load_mesh(&self.source)?;
        let mut mesh = match self.operation {
            Operation::Mesh2d => {
                extrude_polyline(&source, &self.levels, &self.markers, self.adjust_back)
            }
            Operation::Mesh3d => extrude_mesh(&source, &self.levels, &self.markers),
        }
        .with_context(|| format!("Extrusion of {:?} failed", self.source))?;

        if let Some(boundary) = &self.boundary {
            let ring = TriangleBoundary {
                x_boundary: boundary.x,
                y_boundary: boundary.y,
                cell_marker: boundary.marker,
                artifact_path: self
                    .save_artifacts
                    .then(|| self.output.with_file_name(ARTIFACT_FILE)),
            };
            if let Err(err) = ring.try_apply(&mut mesh) {
                bail!("Triangle boundary failed: {}", err);
            }
        }

        Ok(mesh)
    }
}
