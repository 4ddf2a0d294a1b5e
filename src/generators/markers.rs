// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Marker precedence for extruded meshes
//!
//! A marker carried by the source entity always wins. Only where the
//! source is unmarked (0) does the positional default of the side apply.

use serde::{Deserialize, Serialize};

/// Position of an entity on the hull of an extruded mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// First level of a 2D extrusion
    Front,
    /// Last level of a 2D extrusion
    Back,
    /// Polyline end with the smaller x
    Left,
    /// Polyline end with the larger x
    Right,
    /// Last level of a 3D extrusion
    Top,
    /// First level of a 3D extrusion
    Bottom,
}

/// Default marker for every side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerTable {
    pub front: i32,
    pub back: i32,
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl MarkerTable {
    pub fn default_for(&self, side: Side) -> i32 {
        match side {
            Side::Front => self.front,
            Side::Back => self.back,
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }

    /// Marker of an entity at `side` whose source carries `source`
    pub fn resolve(&self, side: Side, source: i32) -> i32 {
        if source != 0 {
            source
        } else {
            self.default_for(side)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MarkerTable {
        MarkerTable {
            front: 1,
            back: 2,
            left: 3,
            right: 4,
            top: 5,
            bottom: 6,
        }
    }

    #[test]
    fn test_source_marker_wins() {
        let table = table();
        for side in [Side::Front, Side::Back, Side::Left, Side::Right, Side::Top, Side::Bottom] {
            assert_eq!(table.resolve(side, -99), -99);
        }
    }

    #[test]
    fn test_default_fills_unmarked() {
        let table = table();
        assert_eq!(table.resolve(Side::Front, 0), 1);
        assert_eq!(table.resolve(Side::Back, 0), 2);
        assert_eq!(table.resolve(Side::Left, 0), 3);
        assert_eq!(table.resolve(Side::Right, 0), 4);
        assert_eq!(table.resolve(Side::Top, 0), 5);
        assert_eq!(table.resolve(Side::Bottom, 0), 6);
    }

    #[test]
    fn test_empty_table_keeps_zero() {
        assert_eq!(MarkerTable::default().resolve(Side::Front, 0), 0);
    }
}
