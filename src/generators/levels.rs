// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Validated extrusion axis sequence

use crate::error::{MeshError, MeshResult};
use crate::geometry::TOLERANCE;

/// At least two finite, strictly monotonic coordinates along the new axis
#[derive(Debug, Clone, PartialEq)]
pub struct Levels<'a> {
    values: &'a [f64],
}

impl<'a> Levels<'a> {
    pub fn new(values: &'a [f64]) -> MeshResult<Self> {
        if values.len() < 2 {
            return Err(MeshError::TooFewLevels {
                count: values.len(),
            });
        }

        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(MeshError::NonFiniteLevel { index, value });
        }

        let increasing = values[1] > values[0];
        for (index, pair) in values.windows(2).enumerate() {
            let step = if increasing {
                pair[1] - pair[0]
            } else {
                pair[0] - pair[1]
            };
            if step <= TOLERANCE {
                return Err(MeshError::NonMonotonicLevels {
                    index: index + 1,
                    previous: pair[0],
                    value: pair[1],
                });
            }
        }

        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a valid sequence holds at least two levels
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of layers between consecutive levels
    pub fn layer_count(&self) -> usize {
        self.values.len() - 1
    }

    pub fn is_increasing(&self) -> bool {
        self.values[1] > self.values[0]
    }

    pub fn first(&self) -> f64 {
        self.values[0]
    }

    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn last_index(&self) -> usize {
        self.values.len() - 1
    }

    /// Bounds of each layer, first level to last
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.windows(2).map(|w| (w[0], w[1]))
    }
}
