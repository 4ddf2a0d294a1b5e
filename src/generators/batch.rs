// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parallel extrusion of independent meshes using rayon

use super::extrude2d::extrude_polyline;
use super::extrude3d::extrude_mesh;
use super::markers::MarkerTable;
use crate::error::MeshResult;
use crate::mesh::Mesh;
use rayon::prelude::*;

/// One polyline to extrude into a 2D mesh
#[derive(Debug, Clone)]
pub struct Extrude2dJob<'a> {
    pub source: &'a Mesh,
    pub levels: &'a [f64],
    pub markers: MarkerTable,
    pub adjust_back: bool,
}

/// One 2D mesh to extrude into a 3D mesh
#[derive(Debug, Clone)]
pub struct Extrude3dJob<'a> {
    pub source: &'a Mesh,
    pub levels: &'a [f64],
    pub markers: MarkerTable,
}

/// Run 2D extrusions in parallel; results keep the job order
pub fn create_meshes_2d(jobs: &[Extrude2dJob<'_>]) -> Vec<MeshResult<Mesh>> {
    jobs.par_iter()
        .map(|job| extrude_polyline(job.source, job.levels, &job.markers, job.adjust_back))
        .collect()
}

/// Run 3D extrusions in parallel; results keep the job order
pub fn create_meshes_3d(jobs: &[Extrude3dJob<'_>]) -> Vec<MeshResult<Mesh>> {
    jobs.par_iter()
        .map(|job| extrude_mesh(job.source, job.levels, &job.markers))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Shape;
    use nalgebra::Point3;

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new(2);
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)] {
            mesh.create_node(Point3::new(x, y, 0.0), 0);
        }
        mesh.create_cell(vec![0, 1, 2], Shape::Triangle, 4).unwrap();
        mesh
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let source = triangle();
        let level_sets: Vec<Vec<f64>> = (2..10).map(|n| (0..n).map(|i| i as f64).collect()).collect();
        let jobs: Vec<_> = level_sets
            .iter()
            .map(|levels| Extrude3dJob {
                source: &source,
                levels,
                markers: MarkerTable::default(),
            })
            .collect();

        let results = create_meshes_3d(&jobs);
        assert_eq!(results.len(), jobs.len());
        for (levels, result) in level_sets.iter().zip(&results) {
            let mesh = result.as_ref().unwrap();
            assert_eq!(mesh.cell_count(), levels.len() - 1);
            let sequential = extrude_mesh(&source, levels, &MarkerTable::default()).unwrap();
            assert_eq!(mesh.cells(), sequential.cells());
        }
    }

    #[test]
    fn test_errors_stay_with_their_job() {
        let source = triangle();
        let good = [0.0, 1.0];
        let bad = [0.0, 2.0, 1.0];
        let jobs = [
            Extrude3dJob {
                source: &source,
                levels: &good,
                markers: MarkerTable::default(),
            },
            Extrude3dJob {
                source: &source,
                levels: &bad,
                markers: MarkerTable::default(),
            },
        ];

        let results = create_meshes_3d(&jobs);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_parallel_polylines() {
        let mut line = Mesh::new(1);
        line.create_node(Point3::new(0.0, 0.0, 0.0), 0);
        line.create_node(Point3::new(2.0, 0.0, 0.0), 0);
        line.create_cell(vec![0, 1], Shape::Edge, 3).unwrap();

        let levels = [0.0, 1.0, 2.0];
        let jobs: Vec<_> = (0..4)
            .map(|front| Extrude2dJob {
                source: &line,
                levels: &levels,
                markers: MarkerTable {
                    front,
                    ..MarkerTable::default()
                },
                adjust_back: false,
            })
            .collect();

        for (front, result) in create_meshes_2d(&jobs).into_iter().enumerate() {
            let mesh = result.unwrap();
            assert_eq!(mesh.cell_markers(), vec![3, 3]);
            assert_eq!(mesh.boundaries()[0].marker, front as i32);
        }
    }
}
