// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Randomized checks of the plane queries

use approx::assert_abs_diff_eq;
use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use terramesh::{Line, Plane, TOLERANCE};

const SAMPLES: usize = 500;

fn random_unit(rng: &mut StdRng) -> Vector3<f64> {
    loop {
        let v = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if v.norm() > 0.1 {
            return v.normalize();
        }
    }
}

fn random_point(rng: &mut StdRng) -> Point3<f64> {
    Point3::new(
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
    )
}

#[test]
fn test_foot_point_has_zero_distance() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..SAMPLES {
        let n = random_unit(&mut rng);
        let d = rng.gen_range(-10.0..10.0);
        let plane = Plane::new(n, d);

        assert!(plane.is_valid());
        assert_abs_diff_eq!(plane.distance(&Point3::from(n * d)), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_intersection_line_lies_on_both_planes() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut checked = 0;
    while checked < SAMPLES {
        let a = Plane::new(random_unit(&mut rng), rng.gen_range(-10.0..10.0));
        let b = Plane::new(random_unit(&mut rng), rng.gen_range(-10.0..10.0));
        if a.norm().cross(b.norm()).norm() < 0.1 {
            continue;
        }

        let line = a.intersect_plane(&b, TOLERANCE).expect("planes are not parallel");
        for t in [-5.0, 0.0, 1.0, 3.5] {
            let p = line.at(t);
            assert_abs_diff_eq!(a.distance(&p), 0.0, epsilon = 1e-8);
            assert_abs_diff_eq!(b.distance(&p), 0.0, epsilon = 1e-8);
        }
        checked += 1;
    }
}

#[test]
fn test_self_intersection_is_invalid() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..SAMPLES {
        let plane = Plane::new(random_unit(&mut rng), rng.gen_range(-10.0..10.0));
        assert!(plane.intersect_plane(&plane, TOLERANCE).is_none());
        assert!(plane.intersect_plane(&plane.flipped(), TOLERANCE).is_none());
    }
}

#[test]
fn test_three_point_plane_touches_its_points() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut checked = 0;
    while checked < SAMPLES {
        let (p0, p1, p2) = (random_point(&mut rng), random_point(&mut rng), random_point(&mut rng));
        if (p1 - p0).cross(&(p2 - p0)).norm() < 1e-3 {
            continue;
        }

        let plane = Plane::from_points(&p0, &p1, &p2);
        assert!(plane.is_valid());
        for p in [p0, p1, p2] {
            assert!(plane.touch(&p, 1e-9), "{} does not touch {}", plane, p);
        }
        checked += 1;
    }
}

#[test]
fn test_segment_crossing_hits_plane() {
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..SAMPLES {
        let n = random_unit(&mut rng);
        let plane = Plane::new(n, rng.gen_range(-5.0..5.0));
        let foot = plane.x0();
        // Segment from one side of the plane to the other through `foot`
        let offset = rng.gen_range(0.5..3.0);
        let line = Line::new(foot - n * offset, foot + n * offset);

        let hit = plane.intersect_line(&line, TOLERANCE, true).expect("segment crosses plane");
        assert_abs_diff_eq!(plane.distance(&hit), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!((hit - foot).norm(), 0.0, epsilon = 1e-9);
    }
}
