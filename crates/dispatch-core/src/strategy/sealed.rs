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

//! Dispatch over a sealed trait.
//!
//! [`SealedShape`] can only be implemented inside this crate, so the set of
//! implementors is closed. When the concrete type is known at the call site
//! ([`sum_known`]) calls resolve statically and inline. Through an erased
//! `Box<dyn SealedShape>` the compiler still has to go through the vtable;
//! sealing the trait does not change that.
//!
//! [`SealedLayout`] picks between the two: a single-kind collection is kept
//! as a concrete array, a mixed one as erased handles.

use crate::error::Result;
use crate::shape::{ShapeKind, ShapeValue, Square, Triangle};

mod private {
    pub trait Sealed {}

    impl Sealed for crate::shape::Square {}
    impl Sealed for crate::shape::Triangle {}
}

/// Closed interface: implementors are fixed by this crate.
pub trait SealedShape: private::Sealed {
    /// Area of the shape.
    fn area(&self) -> f64;

    /// Concrete kind behind the handle.
    fn kind(&self) -> ShapeKind;
}

impl SealedShape for Square {
    #[inline]
    fn area(&self) -> f64 {
        Square::area(self)
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Square
    }
}

impl SealedShape for Triangle {
    #[inline]
    fn area(&self) -> f64 {
        Triangle::area(self)
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
    }
}

/// Binds a sealed handle declared for `expected` over `value`.
///
/// # Errors
///
/// [`CoreError::TypeMismatch`](crate::CoreError::TypeMismatch) when the value
/// is of another kind.
pub fn bind(expected: ShapeKind, value: ShapeValue) -> Result<Box<dyn SealedShape>> {
    Ok(match expected {
        ShapeKind::Square => Box::new(Square::try_from(value)?),
        ShapeKind::Triangle => Box::new(Triangle::try_from(value)?),
    })
}

/// Boxes every value in order.
pub fn handles(values: &[ShapeValue]) -> Result<Vec<Box<dyn SealedShape>>> {
    values.iter().map(|v| bind(v.kind(), *v)).collect()
}

/// Storage for the sealed strategy.
pub enum SealedLayout {
    /// Every element is a square.
    Squares(Vec<Square>),
    /// Every element is a triangle.
    Triangles(Vec<Triangle>),
    /// Mixed kinds behind erased handles, in dataset order.
    Erased(Vec<Box<dyn SealedShape>>),
}

impl SealedLayout {
    /// Lays out `values`, keeping the concrete type when only one kind is
    /// present.
    ///
    /// # Errors
    ///
    /// Propagates [`CoreError::TypeMismatch`](crate::CoreError::TypeMismatch)
    /// from binding.
    pub fn build(values: &[ShapeValue]) -> Result<Self> {
        let single_kind = values
            .first()
            .map(|v| v.kind())
            .filter(|&kind| values.iter().all(|v| v.kind() == kind));
        Ok(match single_kind {
            Some(ShapeKind::Square) => SealedLayout::Squares(
                values.iter().map(|v| Square::try_from(*v)).collect::<Result<_>>()?,
            ),
            Some(ShapeKind::Triangle) => SealedLayout::Triangles(
                values.iter().map(|v| Triangle::try_from(*v)).collect::<Result<_>>()?,
            ),
            None => SealedLayout::Erased(handles(values)?),
        })
    }

    /// Whether calls resolve statically.
    pub fn is_concrete(&self) -> bool {
        !matches!(self, SealedLayout::Erased(_))
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        match self {
            SealedLayout::Squares(v) => v.len(),
            SealedLayout::Triangles(v) => v.len(),
            SealedLayout::Erased(v) => v.len(),
        }
    }

    /// Whether there are no shapes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total area through the layout's call path.
    #[inline]
    pub fn sum_area(&self) -> f64 {
        match self {
            SealedLayout::Squares(v) => sum_known(v),
            SealedLayout::Triangles(v) => sum_known(v),
            SealedLayout::Erased(v) => sum_area(v),
        }
    }
}

/// Sums through erased handles; one indirect call per element.
#[inline]
pub fn sum_area(shapes: &[Box<dyn SealedShape>]) -> f64 {
    shapes.iter().map(|s| s.area()).sum()
}

/// Sums a monomorphic array of a known sealed type; calls are direct.
#[inline]
pub fn sum_known<T: SealedShape>(shapes: &[T]) -> f64 {
    shapes.iter().map(SealedShape::area).sum()
}
