// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Coarse triangle boundary around an existing mesh
//!
//! The hull loop of the mesh is projected radially onto a box enlarged by
//! the requested widths. The ring between hull and box is stitched into a
//! single layer of triangles by walking both loops in angle order. Layered
//! 3D meshes get the same ring, swept into prisms across their z levels.
//!
//! The ring is fully built and checked before the mesh is touched; on any
//! failure the mesh is unchanged.

use crate::error::BoundaryError;
use crate::geometry::BoundingBox;
use crate::io;
use crate::mesh::{Mesh, NodeId, Shape};
use crate::utils::math::{centroid_xy, polar_angle_xy, signed_area_xy};
use nalgebra::Point3;
use std::f64::consts::TAU;
use std::path::PathBuf;
use tracing::{debug, warn};

/// File the staged ring is written to when saving is requested
pub const ARTIFACT_FILE: &str = "boundary_mesh.json";

/// Relative tolerance for angle order, areas and level snapping
const RELATIVE_EPS: f64 = 1e-9;

/// Add a ring of triangles (2D) or prisms (3D) around `mesh`, reaching
/// `x_boundary`/`y_boundary` beyond its extent on every side.
///
/// New cells carry `cell_marker`. The new outer shell gets boundaries with
/// marker 0: box edges in 2D; box walls and ring caps on the first and last
/// level in 3D. Existing boundaries are kept as they are, so the former hull
/// edges or faces and their front/back/left/right markers end up inside the
/// enlarged mesh.
///
/// Returns false, leaving the mesh unchanged, when no consistent ring can
/// be built. With `save`, the staged ring is written to [`ARTIFACT_FILE`]
/// for inspection.
pub fn add_triangle_boundary(
    mesh: &mut Mesh,
    x_boundary: f64,
    y_boundary: f64,
    cell_marker: i32,
    save: bool,
) -> bool {
    TriangleBoundary {
        x_boundary,
        y_boundary,
        cell_marker,
        artifact_path: save.then(|| PathBuf::from(ARTIFACT_FILE)),
    }
    .apply(mesh)
}

/// Parameters of a triangle boundary
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleBoundary {
    pub x_boundary: f64,
    pub y_boundary: f64,
    pub cell_marker: i32,
    /// Where to write the staged ring, if anywhere
    pub artifact_path: Option<PathBuf>,
}

/// Corner of a ring triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RingVertex {
    /// Index into the hull loop
    Inner(usize),
    /// Index into the outer loop
    Outer(usize),
}

/// Ring triangulation in the xy plane
#[derive(Debug)]
struct Ring {
    inner: Vec<Point3<f64>>,
    outer: Vec<Point3<f64>>,
    triangles: Vec<[RingVertex; 3]>,
}

impl TriangleBoundary {
    /// Apply to `mesh`; false and a warning on failure
    pub fn apply(&self, mesh: &mut Mesh) -> bool {
        match self.try_apply(mesh) {
            Ok(added) => {
                debug!(added, marker = self.cell_marker, "added triangle boundary");
                true
            }
            Err(reason) => {
                warn!(%reason, "triangle boundary rejected");
                false
            }
        }
    }

    /// Apply to `mesh` and return the number of cells added
    pub fn try_apply(&self, mesh: &mut Mesh) -> Result<usize, BoundaryError> {
        let (x, y) = (self.x_boundary, self.y_boundary);
        if !(x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0) {
            return Err(BoundaryError::InvalidExtent { x, y });
        }
        if mesh.cell_count() == 0 {
            return Err(BoundaryError::EmptyMesh);
        }

        let bounds = mesh.bounding_box();
        let size = bounds.size();
        let scale = size.x.max(size.y);
        if size.x <= RELATIVE_EPS * scale || size.y <= RELATIVE_EPS * scale || scale <= 0.0 {
            return Err(BoundaryError::DegenerateMesh);
        }

        let staged = match mesh.dim() {
            2 => self.stage_2d(mesh, &bounds)?,
            3 => self.stage_3d(mesh, &bounds)?,
            dim => return Err(BoundaryError::UnsupportedDimension(dim)),
        };

        let added = staged.cell_count() - mesh.cell_count();
        *mesh = staged;
        Ok(added)
    }

    fn stage_2d(&self, mesh: &Mesh, bounds: &BoundingBox) -> Result<Mesh, BoundaryError> {
        let hull = mesh.outer_loop().ok_or(BoundaryError::OpenHull)?;
        let inner: Vec<_> = hull.iter().map(|&id| mesh.node(id).pos).collect();
        let ring = self.build_ring(inner, bounds)?;
        self.save_artifact(&ring);

        let mut staged = mesh.clone();
        let outer: Vec<NodeId> = ring
            .outer
            .iter()
            .map(|p| staged.create_node(Point3::new(p.x, p.y, 0.0), 0))
            .collect();

        for triangle in &ring.triangles {
            let nodes = triangle
                .iter()
                .map(|v| match *v {
                    RingVertex::Inner(i) => hull[i],
                    RingVertex::Outer(o) => outer[o],
                })
                .collect();
            staged
                .create_cell(nodes, Shape::Triangle, self.cell_marker)
                .map_err(|_| BoundaryError::InvalidRing)?;
        }

        for k in 0..outer.len() {
            staged
                .create_boundary(vec![outer[k], outer[(k + 1) % outer.len()]], Shape::Edge, 0)
                .map_err(|_| BoundaryError::InvalidRing)?;
        }

        Ok(staged)
    }

    fn stage_3d(&self, mesh: &Mesh, bounds: &BoundingBox) -> Result<Mesh, BoundaryError> {
        let snap = RELATIVE_EPS * (1.0 + bounds.size().amax());
        let levels = z_levels(mesh, snap);
        if levels.len() < 2 {
            return Err(BoundaryError::DegenerateMesh);
        }

        // Nodes grouped by level
        let mut on_level: Vec<Vec<NodeId>> = vec![Vec::new(); levels.len()];
        for (id, node) in mesh.nodes().iter().enumerate() {
            if let Some(level) = level_of(&levels, node.pos.z, snap) {
                on_level[level].push(id);
            }
        }

        let footprint = footprint(mesh, levels[0], snap)?;
        let hull = footprint.outer_loop().ok_or(BoundaryError::OpenHull)?;

        // Hull node ids on every level, matched by xy
        let mut hull_levels: Vec<Vec<NodeId>> = Vec::with_capacity(levels.len());
        for (level, &z) in levels.iter().enumerate() {
            let ids = hull
                .iter()
                .map(|&id| {
                    let p = mesh.node(id).pos;
                    on_level[level]
                        .iter()
                        .copied()
                        .find(|&other| {
                            let q = mesh.node(other).pos;
                            (p.x - q.x).abs() <= snap && (p.y - q.y).abs() <= snap
                        })
                        .ok_or(BoundaryError::NotLayered { node: id, z })
                })
                .collect::<Result<Vec<_>, _>>()?;
            hull_levels.push(ids);
        }

        let inner: Vec<_> = hull.iter().map(|&id| mesh.node(id).pos).collect();
        let ring = self.build_ring(inner, bounds)?;
        self.save_artifact(&ring);

        let mut staged = mesh.clone();
        let outer_levels: Vec<Vec<NodeId>> = levels
            .iter()
            .map(|&z| {
                ring.outer
                    .iter()
                    .map(|p| staged.create_node(Point3::new(p.x, p.y, z), 0))
                    .collect()
            })
            .collect();

        let corner = |v: RingVertex, level: usize| match v {
            RingVertex::Inner(i) => hull_levels[level][i],
            RingVertex::Outer(o) => outer_levels[level][o],
        };

        for layer in 0..levels.len() - 1 {
            for triangle in &ring.triangles {
                let nodes = triangle
                    .iter()
                    .map(|&v| corner(v, layer))
                    .chain(triangle.iter().map(|&v| corner(v, layer + 1)))
                    .collect();
                staged
                    .create_cell(nodes, Shape::TriPrism, self.cell_marker)
                    .map_err(|_| BoundaryError::InvalidRing)?;
            }
        }

        // Outer shell: box walls per layer, ring caps on the extreme levels
        let m = ring.outer.len();
        for layer in 0..levels.len() - 1 {
            let (lower, upper) = (&outer_levels[layer], &outer_levels[layer + 1]);
            for k in 0..m {
                let next = (k + 1) % m;
                staged
                    .create_boundary(
                        vec![lower[k], lower[next], upper[next], upper[k]],
                        Shape::Quadrangle,
                        0,
                    )
                    .map_err(|_| BoundaryError::InvalidRing)?;
            }
        }
        for level in [0, levels.len() - 1] {
            for triangle in &ring.triangles {
                let nodes = triangle.iter().map(|&v| corner(v, level)).collect();
                staged
                    .create_boundary(nodes, Shape::Triangle, 0)
                    .map_err(|_| BoundaryError::InvalidRing)?;
            }
        }

        Ok(staged)
    }

    /// Stitch the ring between the counter-clockwise hull `inner` and the
    /// box around `bounds`.
    fn build_ring(&self, inner: Vec<Point3<f64>>, bounds: &BoundingBox) -> Result<Ring, BoundaryError> {
        let outer_box = bounds.grown(self.x_boundary, self.y_boundary, 0.0);
        let center = centroid_xy(&inner);
        let n = inner.len();
        let length_eps = RELATIVE_EPS * outer_box.size().amax();

        // Hull angles, unwrapped from the first node; must strictly increase
        let start = polar_angle_xy(&center, &inner[0]);
        let unwrap = |p: &Point3<f64>| (polar_angle_xy(&center, p) - start).rem_euclid(TAU);
        let mut inner_angles = Vec::with_capacity(n);
        for p in &inner {
            if (p - center).xy().norm() <= length_eps {
                return Err(BoundaryError::NotStarShaped);
            }
            inner_angles.push(unwrap(p));
        }
        inner_angles[0] = 0.0;
        if inner_angles.windows(2).any(|w| w[1] - w[0] <= RELATIVE_EPS) {
            return Err(BoundaryError::NotStarShaped);
        }

        // Outer loop: radial projections plus the box corners
        let mut outer: Vec<(f64, Point3<f64>)> = inner
            .iter()
            .zip(&inner_angles)
            .map(|(p, &angle)| (angle, project_to_box(&center, p, &outer_box)))
            .collect();
        let corners = [
            Point3::new(outer_box.min.x, outer_box.min.y, 0.0),
            Point3::new(outer_box.max.x, outer_box.min.y, 0.0),
            Point3::new(outer_box.max.x, outer_box.max.y, 0.0),
            Point3::new(outer_box.min.x, outer_box.max.y, 0.0),
        ];
        for corner in corners {
            let taken = outer.iter().any(|(_, p)| (p - corner).xy().norm() <= length_eps);
            if !taken {
                outer.push((unwrap(&corner), corner));
            }
        }
        outer.sort_by(|a, b| a.0.total_cmp(&b.0));
        let outer_angles: Vec<f64> = outer.iter().map(|(angle, _)| *angle).collect();
        let outer: Vec<Point3<f64>> = outer.into_iter().map(|(_, p)| p).collect();
        let m = outer.len();

        // Merge both loops by angle
        let next_angle = |angles: &[f64], k: usize| if k + 1 < angles.len() { angles[k + 1] } else { TAU };
        let mut triangles = Vec::with_capacity(n + m);
        let (mut i, mut o) = (0, 0);
        while i < n || o < m {
            let advance_inner = i < n && (o >= m || next_angle(&inner_angles, i) <= next_angle(&outer_angles, o));
            if advance_inner {
                triangles.push([
                    RingVertex::Inner(i),
                    RingVertex::Outer(o % m),
                    RingVertex::Inner((i + 1) % n),
                ]);
                i += 1;
            } else {
                triangles.push([
                    RingVertex::Inner(i % n),
                    RingVertex::Outer(o),
                    RingVertex::Outer((o + 1) % m),
                ]);
                o += 1;
            }
        }

        let ring = Ring {
            inner,
            outer,
            triangles,
        };
        ring.check(&outer_box)?;
        Ok(ring)
    }

    fn save_artifact(&self, ring: &Ring) {
        let Some(path) = &self.artifact_path else {
            return;
        };
        let saved = ring
            .to_mesh(self.cell_marker)
            .map_err(anyhow::Error::from)
            .and_then(|artifact| io::save_mesh(&artifact, path));
        match saved {
            Ok(()) => debug!(path = %path.display(), "saved boundary ring"),
            Err(err) => warn!(path = %path.display(), error = %err, "could not save boundary ring"),
        }
    }
}

impl Ring {
    fn position(&self, v: RingVertex) -> Point3<f64> {
        match v {
            RingVertex::Inner(i) => self.inner[i],
            RingVertex::Outer(o) => self.outer[o],
        }
    }

    /// Every triangle strictly counter-clockwise. Both loops advance
    /// monotonically in angle, so this rules out folds and overlaps.
    fn check(&self, outer_box: &BoundingBox) -> Result<(), BoundaryError> {
        let box_size = outer_box.size();
        let min_area = RELATIVE_EPS * box_size.x * box_size.y;

        for triangle in &self.triangles {
            let corners = triangle.map(|v| self.position(v));
            if signed_area_xy(&corners) <= min_area {
                return Err(BoundaryError::InvalidRing);
            }
        }
        Ok(())
    }

    /// Standalone 2D mesh of the ring, for diagnostics
    fn to_mesh(&self, marker: i32) -> Result<Mesh, BoundaryError> {
        let mut mesh = Mesh::with_capacity(2, self.inner.len() + self.outer.len(), 0, self.triangles.len());
        for p in self.inner.iter().chain(&self.outer) {
            mesh.create_node(Point3::new(p.x, p.y, 0.0), 0);
        }
        let offset = self.inner.len();
        for triangle in &self.triangles {
            let nodes = triangle
                .iter()
                .map(|v| match *v {
                    RingVertex::Inner(i) => i,
                    RingVertex::Outer(o) => offset + o,
                })
                .collect();
            mesh.create_cell(nodes, Shape::Triangle, marker)
                .map_err(|_| BoundaryError::InvalidRing)?;
        }
        Ok(mesh)
    }
}

/// Where the ray from `center` through `p` leaves `outer_box`
fn project_to_box(center: &Point3<f64>, p: &Point3<f64>, outer_box: &BoundingBox) -> Point3<f64> {
    let dir = (p - center).xy();
    let reach = |dir: f64, origin: f64, min: f64, max: f64| {
        if dir > 0.0 {
            (max - origin) / dir
        } else if dir < 0.0 {
            (min - origin) / dir
        } else {
            f64::INFINITY
        }
    };
    let t = reach(dir.x, center.x, outer_box.min.x, outer_box.max.x)
        .min(reach(dir.y, center.y, outer_box.min.y, outer_box.max.y));
    Point3::new(center.x + t * dir.x, center.y + t * dir.y, 0.0)
}

/// Distinct node z values, ascending, merged within `snap`
fn z_levels(mesh: &Mesh, snap: f64) -> Vec<f64> {
    let mut zs: Vec<f64> = mesh.nodes().iter().map(|n| n.pos.z).collect();
    zs.sort_by(f64::total_cmp);
    let mut levels: Vec<f64> = Vec::new();
    for z in zs {
        match levels.last() {
            Some(&last) if z - last <= snap => {}
            _ => levels.push(z),
        }
    }
    levels
}

fn level_of(levels: &[f64], z: f64, snap: f64) -> Option<usize> {
    let index = levels.partition_point(|&level| level < z - snap);
    (index < levels.len() && (levels[index] - z).abs() <= snap).then_some(index)
}

/// 2D mesh of the cell faces lying on `z`, sharing node ids with `mesh`
fn footprint(mesh: &Mesh, z: f64, snap: f64) -> Result<Mesh, BoundaryError> {
    let mut footprint = Mesh::with_capacity(2, mesh.node_count(), 0, 0);
    for node in mesh.nodes() {
        footprint.create_node(node.pos, node.marker);
    }

    let on_level = |ids: &[NodeId]| ids.iter().all(|&id| (mesh.node(id).pos.z - z).abs() <= snap);
    for cell in mesh.cells() {
        let Some(base) = cell.shape.base().filter(|s| s.dim() == 2) else {
            continue;
        };
        let (lower, upper) = cell.nodes.split_at(base.node_count());
        for face in [lower, upper] {
            if on_level(face) {
                footprint
                    .create_cell(face.to_vec(), base, cell.marker)
                    .map_err(|_| BoundaryError::InvalidRing)?;
            }
        }
    }
    Ok(footprint)
}
