// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Line segment in 3D

use super::TOLERANCE;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Segment from `p0` to `p1`, parameterised as `p(t) = p0 + t * (p1 - p0)`.
///
/// The segment covers `t` in `[0, 1]`. Lines returned from plane/plane
/// intersection have `p1 = p0 + dir` with a unit `dir`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub p0: Point3<f64>,
    pub p1: Point3<f64>,
}

impl Line {
    pub fn new(p0: Point3<f64>, p1: Point3<f64>) -> Self {
        Self { p0, p1 }
    }

    /// Line through `origin` along `dir`, with `p1 = origin + dir`
    pub fn from_point_dir(origin: Point3<f64>, dir: Vector3<f64>) -> Self {
        Self {
            p0: origin,
            p1: origin + dir,
        }
    }

    /// Unnormalised direction `p1 - p0`
    pub fn direction(&self) -> Vector3<f64> {
        self.p1 - self.p0
    }

    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// A line is valid when its endpoints are distinct
    pub fn is_valid(&self) -> bool {
        self.is_valid_with(TOLERANCE)
    }

    pub fn is_valid_with(&self, tol: f64) -> bool {
        self.length() >= tol
    }

    /// Point at parameter `t`
    pub fn at(&self, t: f64) -> Point3<f64> {
        self.p0 + self.direction() * t
    }

    /// Parameter of the point on the infinite line closest to `pos`.
    /// Returns `None` for a degenerate line.
    pub fn closest_parameter(&self, pos: &Point3<f64>, tol: f64) -> Option<f64> {
        let dir = self.direction();
        let len2 = dir.norm_squared();
        if len2 < tol * tol {
            return None;
        }
        Some((pos - self.p0).dot(&dir) / len2)
    }

    /// Distance from `pos` to the infinite line
    pub fn distance(&self, pos: &Point3<f64>, tol: f64) -> Option<f64> {
        self.closest_parameter(pos, tol)
            .map(|t| (pos - self.at(t)).norm())
    }
}
