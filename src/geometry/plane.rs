// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Plane in Hessian normal form
//!
//! A plane is stored as a unit normal `norm` and the signed distance `d` of
//! the plane from the origin, so that points `x` on the plane satisfy
//! `norm · x = d`. Degenerate construction never panics: it yields a plane
//! whose `is_valid()` is false, and every query on an invalid plane reports
//! "no result".

use super::{Line, TOLERANCE};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Plane `norm · x = d` with `|norm| = 1`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Plane {
    norm: Vector3<f64>,
    d: f64,
    valid: bool,
}

impl Plane {
    /// Plane from a unit normal and its distance from the origin.
    ///
    /// The normal is stored as given; a normal that is not unit length
    /// produces an invalid plane.
    pub fn new(norm: Vector3<f64>, d: f64) -> Self {
        let mut plane = Self {
            norm,
            d,
            valid: false,
        };
        plane.valid = plane.check_validity(TOLERANCE);
        plane
    }

    /// Plane through `x0` with normal direction `norm` (normalised here)
    pub fn from_point(norm: Vector3<f64>, x0: &Point3<f64>) -> Self {
        match norm.try_normalize(TOLERANCE) {
            Some(n) => Self::new(n, n.dot(&x0.coords)),
            None => Self::invalid(),
        }
    }

    /// Plane through three points. Collinear points give an invalid plane.
    ///
    /// The normal follows the right-hand rule over `p0 -> p1 -> p2`.
    pub fn from_points(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Self {
        let normal = (p1 - p0).cross(&(p2 - p0));
        Self::from_point(normal, p0)
    }

    /// Plane from the general equation `a x + b y + c z = d`
    pub fn from_equation(a: f64, b: f64, c: f64, d: f64) -> Self {
        let normal = Vector3::new(a, b, c);
        let len = normal.norm();
        if len < TOLERANCE {
            return Self::invalid();
        }
        Self::new(normal / len, d / len)
    }

    /// An invalid, empty plane
    pub fn invalid() -> Self {
        Self {
            norm: Vector3::zeros(),
            d: 0.0,
            valid: false,
        }
    }

    pub fn norm(&self) -> &Vector3<f64> {
        &self.norm
    }

    pub fn d(&self) -> f64 {
        self.d
    }

    /// Foot of the perpendicular from the origin, `norm * d`
    pub fn x0(&self) -> Point3<f64> {
        Point3::from(self.norm * self.d)
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// True when the stored normal has unit length within `tol`.
    /// Does not change the stored validity.
    pub fn check_validity(&self, tol: f64) -> bool {
        (self.norm.norm() - 1.0).abs() < tol
    }

    /// Signed distance of `pos` from the plane, positive on the normal side
    pub fn distance(&self, pos: &Point3<f64>) -> f64 {
        self.norm.dot(&pos.coords) - self.d
    }

    /// True if the plane is valid and `pos` lies on it within `tol`
    pub fn touch(&self, pos: &Point3<f64>, tol: f64) -> bool {
        self.valid && self.distance(pos).abs() < tol
    }

    /// Compare stored normal form. Orientation matters: a plane and its
    /// flipped twin (`-norm`, `-d`) do not compare equal.
    pub fn compare(&self, other: &Plane, tol: f64) -> bool {
        self.valid
            && other.valid
            && (self.norm - other.norm).norm() < tol
            && (self.d - other.d).abs() < tol
    }

    /// Compare the point sets, ignoring orientation
    pub fn same_geometry(&self, other: &Plane, tol: f64) -> bool {
        self.compare(other, tol) || self.compare(&other.flipped(), tol)
    }

    /// Same plane with the opposite orientation
    pub fn flipped(&self) -> Plane {
        Plane {
            norm: -self.norm,
            d: -self.d,
            valid: self.valid,
        }
    }

    /// Line of intersection with another plane.
    ///
    /// `None` when either plane is invalid or the normals are parallel,
    /// which includes coincident planes. The returned line passes through
    /// the point of both planes closest to the origin and has a unit
    /// direction `norm × other.norm`.
    pub fn intersect_plane(&self, other: &Plane, tol: f64) -> Option<Line> {
        if !self.valid || !other.valid {
            return None;
        }

        let cross = self.norm.cross(&other.norm);
        let sin = cross.norm();
        if sin < tol {
            return None;
        }

        // Minimum-norm solution of n1·x = d1, n2·x = d2 in span(n1, n2).
        // The denominator is sin², bounded away from zero by the test above.
        let cos = self.norm.dot(&other.norm);
        let denom = sin * sin;
        let a = (self.d - other.d * cos) / denom;
        let b = (other.d - self.d * cos) / denom;
        let origin = Point3::from(self.norm * a + other.norm * b);

        Some(Line::from_point_dir(origin, cross / sin))
    }

    /// Point where `line` crosses the plane.
    ///
    /// `None` when the plane or line is invalid, or when the line is
    /// parallel to the plane (lying in it or not). With `inside`, a
    /// crossing outside the segment's endpoints is also `None`.
    pub fn intersect_line(&self, line: &Line, tol: f64, inside: bool) -> Option<Point3<f64>> {
        if !self.valid || !line.is_valid_with(tol) {
            return None;
        }

        let dir = line.direction();
        let denom = self.norm.dot(&dir);
        if (denom / dir.norm()).abs() < tol {
            return None;
        }

        let t = (self.d - self.norm.dot(&line.p0.coords)) / denom;
        if inside && (t < -tol || t > 1.0 + tol) {
            return None;
        }

        Some(line.at(t))
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::invalid()
    }
}

impl PartialEq for Plane {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other, TOLERANCE)
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return write!(f, "Plane(invalid)");
        }
        write!(
            f,
            "Plane(norm: ({}, {}, {}), d: {})",
            self.norm.x, self.norm.y, self.norm.z, self.d
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_plane_from_points() {
        let plane = Plane::from_points(
            &Point3::new(0.0, 0.0, 2.0),
            &Point3::new(1.0, 0.0, 2.0),
            &Point3::new(0.0, 1.0, 2.0),
        );

        assert!(plane.is_valid());
        assert_relative_eq!(*plane.norm(), Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(plane.d(), 2.0);
        assert_relative_eq!(plane.x0(), Point3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_collinear_points_invalid() {
        let plane = Plane::from_points(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 1.0, 1.0),
            &Point3::new(2.0, 2.0, 2.0),
        );
        assert!(!plane.is_valid());
        assert!(!plane.touch(&Point3::origin(), TOL));
    }

    #[test]
    fn test_non_unit_normal_invalid() {
        let plane = Plane::new(Vector3::new(0.0, 0.0, 2.0), 1.0);
        assert!(!plane.is_valid());
        assert!(!plane.check_validity(TOL));
        assert!(!Plane::new(Vector3::zeros(), 0.0).is_valid());
    }

    #[test]
    fn test_from_equation_normalises() {
        let plane = Plane::from_equation(0.0, 0.0, 2.0, 4.0);
        assert!(plane.is_valid());
        assert_relative_eq!(plane.d(), 2.0);
        assert!(plane.touch(&Point3::new(5.0, -3.0, 2.0), TOL));
        assert!(!Plane::from_equation(0.0, 0.0, 0.0, 1.0).is_valid());
    }

    #[test]
    fn test_signed_distance() {
        let plane = Plane::new(Vector3::new(0.0, 1.0, 0.0), 1.0);
        assert_relative_eq!(plane.distance(&Point3::new(0.0, 3.0, 0.0)), 2.0);
        assert_relative_eq!(plane.distance(&Point3::new(7.0, -1.0, 0.0)), -2.0);
    }

    #[test]
    fn test_compare_is_orientation_sensitive() {
        let a = Plane::new(Vector3::new(1.0, 0.0, 0.0), 3.0);
        let b = a.flipped();

        assert!(a.compare(&a, TOL));
        assert!(!a.compare(&b, TOL));
        assert!(a != b);
        assert!(a.same_geometry(&b, TOL));
        assert!(!a.compare(&Plane::invalid(), TOL));
    }

    #[test]
    fn test_intersect_orthogonal_planes() {
        let xy = Plane::new(Vector3::new(0.0, 0.0, 1.0), 1.0);
        let xz = Plane::new(Vector3::new(0.0, 1.0, 0.0), 2.0);

        let line = xy.intersect_plane(&xz, TOL).unwrap();
        assert_relative_eq!(line.p0, Point3::new(0.0, 2.0, 1.0), epsilon = TOL);
        assert_relative_eq!(line.direction().norm(), 1.0, epsilon = TOL);
        assert!(xy.touch(&line.at(5.0), TOL));
        assert!(xz.touch(&line.at(-3.0), TOL));
    }

    #[test]
    fn test_intersect_parallel_planes_is_none() {
        let a = Plane::new(Vector3::new(0.0, 0.0, 1.0), 0.0);
        let b = Plane::new(Vector3::new(0.0, 0.0, 1.0), 5.0);
        assert!(a.intersect_plane(&b, TOL).is_none());
        assert!(a.intersect_plane(&a, TOL).is_none());
        assert!(a.intersect_plane(&a.flipped(), TOL).is_none());
    }

    #[test]
    fn test_intersect_line() {
        let plane = Plane::new(Vector3::new(0.0, 0.0, 1.0), 1.0);
        let line = Line::new(Point3::new(1.0, 1.0, 0.0), Point3::new(1.0, 1.0, 4.0));

        let hit = plane.intersect_line(&line, TOL, true).unwrap();
        assert_relative_eq!(hit, Point3::new(1.0, 1.0, 1.0), epsilon = TOL);
    }

    #[test]
    fn test_intersect_line_inside_check() {
        let plane = Plane::new(Vector3::new(0.0, 0.0, 1.0), 10.0);
        let segment = Line::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 1.0));

        assert!(plane.intersect_line(&segment, TOL, true).is_none());
        let hit = plane.intersect_line(&segment, TOL, false).unwrap();
        assert_relative_eq!(hit.z, 10.0, epsilon = TOL);

        // Endpoints count as inside
        let touching = Line::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 10.0));
        assert!(plane.intersect_line(&touching, TOL, true).is_some());
    }

    #[test]
    fn test_intersect_parallel_line_is_none() {
        let plane = Plane::new(Vector3::new(0.0, 0.0, 1.0), 0.0);
        let above = Line::new(Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 0.0, 1.0));
        let within = Line::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0));

        assert!(plane.intersect_line(&above, TOL, false).is_none());
        assert!(plane.intersect_line(&within, TOL, false).is_none());
    }

    #[test]
    fn test_display() {
        let plane = Plane::new(Vector3::new(0.0, 0.0, 1.0), 2.5);
        assert_eq!(plane.to_string(), "Plane(norm: (0, 0, 1), d: 2.5)");
        assert_eq!(Plane::invalid().to_string(), "Plane(invalid)");
    }
}
