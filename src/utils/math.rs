// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::Point3;

/// Check if two floats are approximately equal
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Signed area of a polygon projected onto the xy plane.
/// Positive for counter-clockwise node order.
pub fn signed_area_xy(points: &[Point3<f64>]) -> f64 {
    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let p = &points[i];
            let q = &points[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum();
    twice / 2.0
}

/// Area centroid of a simple polygon in the xy plane.
/// Falls back to the vertex average for a polygon without area.
pub fn centroid_xy(points: &[Point3<f64>]) -> Point3<f64> {
    let n = points.len();
    let area = signed_area_xy(points);
    if area.abs() < f64::EPSILON || n < 3 {
        let sum = points.iter().fold(Point3::origin(), |acc, p| acc + p.coords);
        return sum / n.max(1) as f64;
    }

    let (mut cx, mut cy) = (0.0, 0.0);
    for i in 0..n {
        let p = &points[i];
        let q = &points[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    Point3::new(cx / (6.0 * area), cy / (6.0 * area), 0.0)
}

/// Polar angle of `p` around `center` in the xy plane, in `[0, 2π)`
pub fn polar_angle_xy(center: &Point3<f64>, p: &Point3<f64>) -> f64 {
    let angle = (p.y - center.y).atan2(p.x - center.x);
    if angle < 0.0 {
        angle + std::f64::consts::TAU
    } else {
        angle
    }
}
