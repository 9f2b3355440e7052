// Dweve Dispatch - Method Dispatch Cost Benchmarks
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Direct calls on concrete arrays.
//!
//! No trait is involved: the loop body calls the inherent `area` of a known
//! type, which the compiler inlines. This is the baseline every other
//! strategy is normalized against.

use crate::shape::{Square, Triangle};
use crate::strategy::KindGroups;

/// Sums the areas of a square array.
#[inline]
pub fn sum_squares(squares: &[Square]) -> f64 {
    squares.iter().map(|s| s.area()).sum()
}

/// Sums the areas of a triangle array.
#[inline]
pub fn sum_triangles(triangles: &[Triangle]) -> f64 {
    triangles.iter().map(|t| t.area()).sum()
}

/// Sums every group, squares first.
#[inline]
pub fn sum_area(groups: &KindGroups) -> f64 {
    sum_squares(&groups.squares) + sum_triangles(&groups.triangles)
}
