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

//! Compile-time bound dispatch.
//!
//! [`sum_static`] is generic over one concrete kind and is monomorphized once
//! per kind, so every call has a fixed target. A mixed dataset is handled by
//! grouping shapes per kind and running each group through its own
//! specialization.

use crate::shape::{ShapeKind, Square, Triangle};
use crate::strategy::KindGroups;

/// Area computation resolved at compile time.
pub trait StaticArea: Copy {
    /// Kind this implementation is bound to.
    const KIND: ShapeKind;

    /// Area of the shape.
    fn static_area(&self) -> f64;
}

impl StaticArea for Square {
    const KIND: ShapeKind = ShapeKind::Square;

    #[inline(always)]
    fn static_area(&self) -> f64 {
        self.area()
    }
}

impl StaticArea for Triangle {
    const KIND: ShapeKind = ShapeKind::Triangle;

    #[inline(always)]
    fn static_area(&self) -> f64 {
        self.area()
    }
}

/// Sums a monomorphic slice through the specialization for `S`.
#[inline]
pub fn sum_static<S: StaticArea>(shapes: &[S]) -> f64 {
    shapes.iter().map(S::static_area).sum()
}

/// Sums every group through its own specialization.
#[inline]
pub fn sum_area(groups: &KindGroups) -> f64 {
    sum_static::<Square>(&groups.squares) + sum_static::<Triangle>(&groups.triangles)
}
