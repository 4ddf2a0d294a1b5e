// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - analytic primitives and spatial queries

mod bbox;
mod line;
mod plane;

pub use bbox::BoundingBox;
pub use line::Line;
pub use plane::Plane;

/// Default tolerance for every geometric comparison in the crate.
///
/// Queries take an explicit `tol`; this is the value callers pass when they
/// have no reason to pick another.
pub const TOLERANCE: f64 = 1e-12;
