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

//! Dynamic dispatch through trait objects.
//!
//! Each shape lives in its own heap cell behind a `Box<dyn Shape>`, and every
//! `area` call loads the target from the vtable. On a mixed dataset the target
//! alternates unpredictably between the square and triangle implementations.

use crate::error::Result;
use crate::shape::{ShapeKind, ShapeValue, Square, Triangle};

/// Open interface for shapes reached through an erased handle.
pub trait Shape {
    /// Area of the shape.
    fn area(&self) -> f64;

    /// Concrete kind behind the handle.
    fn kind(&self) -> ShapeKind;
}

impl Shape for Square {
    fn area(&self) -> f64 {
        Square::area(self)
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Square
    }
}

impl Shape for Triangle {
    fn area(&self) -> f64 {
        Triangle::area(self)
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
    }
}

/// Binds a handle declared for `expected` over `value`.
///
/// # Errors
///
/// [`CoreError::TypeMismatch`](crate::CoreError::TypeMismatch) when the value
/// is of another kind.
pub fn bind(expected: ShapeKind, value: ShapeValue) -> Result<Box<dyn Shape>> {
    Ok(match expected {
        ShapeKind::Square => Box::new(Square::try_from(value)?),
        ShapeKind::Triangle => Box::new(Triangle::try_from(value)?),
    })
}

/// Boxes every value in order.
pub fn handles(values: &[ShapeValue]) -> Result<Vec<Box<dyn Shape>>> {
    values.iter().map(|v| bind(v.kind(), *v)).collect()
}

/// Sums areas with one indirect call per element.
#[inline]
pub fn sum_area(shapes: &[Box<dyn Shape>]) -> f64 {
    shapes.iter().map(|s| s.area()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;

    #[test]
    fn test_bind_matching_kind() {
        let handle = bind(ShapeKind::Square, ShapeValue::square(2.0).unwrap()).unwrap();
        assert_eq!(handle.kind(), ShapeKind::Square);
        assert_eq!(handle.area(), 4.0);
    }

    #[test]
    fn test_bind_mismatched_kind() {
        let result = bind(ShapeKind::Triangle, ShapeValue::square(2.0).unwrap());
        assert!(matches!(
            result,
            Err(CoreError::TypeMismatch {
                expected: ShapeKind::Triangle,
                found: ShapeKind::Square,
            })
        ));
    }

    #[test]
    fn test_sum_area_mixed() {
        let values = vec![
            ShapeValue::square(2.0).unwrap(),
            ShapeValue::triangle(4.0, 1.0).unwrap(),
        ];
        let shapes = handles(&values).unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(sum_area(&shapes), 6.0);
    }
}
