// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - mesh persistence

mod json;

pub use json::{load_mesh, save_mesh};
