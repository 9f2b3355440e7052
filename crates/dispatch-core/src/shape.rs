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

//! Shape model.
//!
//! The values every dispatch strategy computes areas for. Concrete kinds are
//! small `Copy` structs so the per-strategy storage layouts differ only in how
//! they reach the area computation, never in the data itself.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a concrete shape kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// A square.
    Square,
    /// A triangle.
    Triangle,
}

impl ShapeKind {
    /// Returns the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
        }
    }

    /// Returns all kinds.
    pub fn all() -> &'static [ShapeKind] {
        &[ShapeKind::Square, ShapeKind::Triangle]
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn check_dimension(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CoreError::InvalidDimension { field, value })
    }
}

/// A square with a strictly positive side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SquareFields")]
pub struct Square {
    side: f64,
}

/// Unvalidated wire form of [`Square`].
#[derive(Deserialize)]
struct SquareFields {
    side: f64,
}

impl TryFrom<SquareFields> for Square {
    type Error = CoreError;

    fn try_from(fields: SquareFields) -> Result<Self> {
        Square::new(fields.side)
    }
}

impl Square {
    /// Creates a square, rejecting non-positive or non-finite sides.
    pub fn new(side: f64) -> Result<Self> {
        Ok(Self {
            side: check_dimension("side", side)?,
        })
    }

    /// Side length.
    pub fn side(&self) -> f64 {
        self.side
    }

    /// Area of the square.
    #[inline]
    pub fn area(&self) -> f64 {
        self.side * self.side
    }
}

/// A triangle described by base and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TriangleFields")]
pub struct Triangle {
    base: f64,
    height: f64,
}

/// Unvalidated wire form of [`Triangle`].
#[derive(Deserialize)]
struct TriangleFields {
    base: f64,
    height: f64,
}

impl TryFrom<TriangleFields> for Triangle {
    type Error = CoreError;

    fn try_from(fields: TriangleFields) -> Result<Self> {
        Triangle::new(fields.base, fields.height)
    }
}

impl Triangle {
    /// Creates a triangle, rejecting non-positive or non-finite dimensions.
    pub fn new(base: f64, height: f64) -> Result<Self> {
        Ok(Self {
            base: check_dimension("base", base)?,
            height: check_dimension("height", height)?,
        })
    }

    /// Base length.
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Area of the triangle.
    #[inline]
    pub fn area(&self) -> f64 {
        0.5 * self.base * self.height
    }
}

/// Tagged shape value as produced by the dataset generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeValue {
    /// A square.
    Square(Square),
    /// A triangle.
    Triangle(Triangle),
}

impl ShapeValue {
    /// Builds a validated square value.
    pub fn square(side: f64) -> Result<Self> {
        Square::new(side).map(ShapeValue::Square)
    }

    /// Builds a validated triangle value.
    pub fn triangle(base: f64, height: f64) -> Result<Self> {
        Triangle::new(base, height).map(ShapeValue::Triangle)
    }

    /// Kind of this value.
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeValue::Square(_) => ShapeKind::Square,
            ShapeValue::Triangle(_) => ShapeKind::Triangle,
        }
    }

    /// Area of this value.
    #[inline]
    pub fn area(&self) -> f64 {
        match self {
            ShapeValue::Square(s) => s.area(),
            ShapeValue::Triangle(t) => t.area(),
        }
    }

    /// Dimensions in generation order (`[side]` or `[base, height]`).
    pub fn dimensions(&self) -> Vec<f64> {
        match self {
            ShapeValue::Square(s) => vec![s.side],
            ShapeValue::Triangle(t) => vec![t.base, t.height],
        }
    }
}

impl TryFrom<ShapeValue> for Square {
    type Error = CoreError;

    fn try_from(value: ShapeValue) -> Result<Self> {
        match value {
            ShapeValue::Square(s) => Ok(s),
            other => Err(CoreError::TypeMismatch {
                expected: ShapeKind::Square,
                found: other.kind(),
            }),
        }
    }
}

impl TryFrom<ShapeValue> for Triangle {
    type Error = CoreError;

    fn try_from(value: ShapeValue) -> Result<Self> {
        match value {
            ShapeValue::Triangle(t) => Ok(t),
            other => Err(CoreError::TypeMismatch {
                expected: ShapeKind::Triangle,
                found: other.kind(),
            }),
        }
    }
}
