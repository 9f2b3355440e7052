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

//! Dispatch strategies and their storage layouts.
//!
//! All four strategies compute the same total area; they differ only in how a
//! call reaches the concrete `area` implementation:
//!
//! - [`direct`]: inherent calls on concrete arrays
//! - [`dynamic`]: `Box<dyn Shape>` with a vtable lookup per call
//! - [`sealed`]: a closed trait; concrete arrays for single-kind data,
//!   `Box<dyn SealedShape>` for mixed data
//! - [`static_bound`]: generic code monomorphized per kind
//!
//! A [`Workload`] is a dataset converted into the representation a strategy
//! needs. It is built once per configuration and read-only afterwards.

pub mod direct;
pub mod dynamic;
pub mod sealed;
pub mod static_bound;

use crate::barrier::{observe, opaque};
use crate::dataset::Dataset;
use crate::error::{CoreError, Result};
use crate::shape::{ShapeValue, Square, Triangle};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use dynamic::Shape;
pub use sealed::{SealedLayout, SealedShape};
pub use static_bound::StaticArea;

/// Relative tolerance used when comparing strategy sums.
pub const SUM_TOLERANCE: f64 = 1e-9;

/// Mechanism used to reach the concrete area implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStrategy {
    /// Inherent calls on concrete arrays.
    Direct,
    /// Trait objects over an open trait.
    Dynamic,
    /// Sealed trait: statically known on single-kind data, trait objects on
    /// mixed data.
    Sealed,
    /// Generic code bound to one kind at compile time.
    StaticBound,
}

impl DispatchStrategy {
    /// Short identifier used in benchmark names and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            DispatchStrategy::Direct => "direct",
            DispatchStrategy::Dynamic => "dynamic",
            DispatchStrategy::Sealed => "sealed",
            DispatchStrategy::StaticBound => "static",
        }
    }

    /// Returns all strategies, baseline first.
    pub fn all() -> &'static [DispatchStrategy] {
        &[
            DispatchStrategy::Direct,
            DispatchStrategy::Dynamic,
            DispatchStrategy::Sealed,
            DispatchStrategy::StaticBound,
        ]
    }

    /// Whether calls go through a vtable on mixed data.
    pub fn is_indirect(&self) -> bool {
        matches!(self, DispatchStrategy::Dynamic | DispatchStrategy::Sealed)
    }
}

impl fmt::Display for DispatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DispatchStrategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "direct" => Ok(DispatchStrategy::Direct),
            "dynamic" | "dyn" | "virtual" => Ok(DispatchStrategy::Dynamic),
            "sealed" | "final" => Ok(DispatchStrategy::Sealed),
            "static" | "static-bound" | "static_bound" | "staticbound" => {
                Ok(DispatchStrategy::StaticBound)
            }
            other => Err(CoreError::invalid_config(
                "strategy",
                format!(
                    "unrecognized strategy '{}' (expected direct, dynamic, sealed or static)",
                    other
                ),
            )),
        }
    }
}

/// Shapes partitioned into one concrete array per kind.
///
/// Relative order inside each kind is preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KindGroups {
    /// All squares, in dataset order.
    pub squares: Vec<Square>,
    /// All triangles, in dataset order.
    pub triangles: Vec<Triangle>,
}

impl KindGroups {
    /// Partitions `values` by kind.
    pub fn partition(values: &[ShapeValue]) -> Self {
        let mut groups = KindGroups::default();
        for value in values {
            match value {
                ShapeValue::Square(s) => groups.squares.push(*s),
                ShapeValue::Triangle(t) => groups.triangles.push(*t),
            }
        }
        groups
    }

    /// Total number of shapes.
    pub fn len(&self) -> usize {
        self.squares.len() + self.triangles.len()
    }

    /// Whether there are no shapes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A dataset laid out for one strategy.
pub enum Workload {
    /// Concrete arrays, inherent calls.
    Direct(KindGroups),
    /// One `Box<dyn Shape>` per element, dataset order.
    Dynamic(Vec<Box<dyn Shape>>),
    /// Concrete array for one kind, erased handles otherwise.
    Sealed(SealedLayout),
    /// Concrete arrays, generic calls.
    StaticBound(KindGroups),
}

impl Workload {
    /// Lays out `dataset` for `strategy`.
    ///
    /// # Errors
    ///
    /// Propagates [`CoreError::TypeMismatch`] from handle binding.
    pub fn prepare(strategy: DispatchStrategy, dataset: &Dataset) -> Result<Self> {
        let shapes = dataset.shapes();
        Ok(match strategy {
            DispatchStrategy::Direct => Workload::Direct(KindGroups::partition(shapes)),
            DispatchStrategy::Dynamic => Workload::Dynamic(dynamic::handles(shapes)?),
            DispatchStrategy::Sealed => Workload::Sealed(SealedLayout::build(shapes)?),
            DispatchStrategy::StaticBound => Workload::StaticBound(KindGroups::partition(shapes)),
        })
    }

    /// Strategy this workload was laid out for.
    pub fn strategy(&self) -> DispatchStrategy {
        match self {
            Workload::Direct(_) => DispatchStrategy::Direct,
            Workload::Dynamic(_) => DispatchStrategy::Dynamic,
            Workload::Sealed(_) => DispatchStrategy::Sealed,
            Workload::StaticBound(_) => DispatchStrategy::StaticBound,
        }
    }

    /// Number of shapes (area calls per `sum_area`).
    pub fn len(&self) -> usize {
        match self {
            Workload::Direct(g) | Workload::StaticBound(g) => g.len(),
            Workload::Dynamic(v) => v.len(),
            Workload::Sealed(l) => l.len(),
        }
    }

    /// Whether there are no shapes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total area through this workload's strategy.
    pub fn sum_area(&self) -> f64 {
        match self {
            Workload::Direct(g) => direct::sum_area(g),
            Workload::Dynamic(v) => dynamic::sum_area(v),
            Workload::Sealed(l) => l.sum_area(),
            Workload::StaticBound(g) => static_bound::sum_area(g),
        }
    }

    /// Runs `sum_area` `iterations` times and returns the accumulated total.
    ///
    /// The variant is matched once, outside the loop. Each iteration hides
    /// the storage from the optimizer and observes the running accumulator,
    /// so neither the loop nor the per-iteration sum can be folded away.
    pub fn run_iterations(&self, iterations: u64) -> f64 {
        match self {
            Workload::Direct(g) => repeat(iterations, || direct::sum_area(opaque(g))),
            Workload::Dynamic(v) => repeat(iterations, || dynamic::sum_area(opaque(v))),
            Workload::Sealed(SealedLayout::Squares(v)) => {
                repeat(iterations, || sealed::sum_known(opaque(v)))
            }
            Workload::Sealed(SealedLayout::Triangles(v)) => {
                repeat(iterations, || sealed::sum_known(opaque(v)))
            }
            Workload::Sealed(SealedLayout::Erased(v)) => {
                repeat(iterations, || sealed::sum_area(opaque(v)))
            }
            Workload::StaticBound(g) => repeat(iterations, || static_bound::sum_area(opaque(g))),
        }
    }
}

impl fmt::Debug for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workload")
            .field("strategy", &self.strategy())
            .field("len", &self.len())
            .finish()
    }
}

#[inline(always)]
fn repeat<F: Fn() -> f64>(iterations: u64, body: F) -> f64 {
    let mut acc = 0.0;
    for _ in 0..iterations {
        acc = observe(acc + body());
    }
    acc
}

/// Per-strategy totals for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossCheck {
    /// Sum computed straight off the tagged values.
    pub reference: f64,
    /// Sum computed by each strategy.
    pub sums: Vec<(DispatchStrategy, f64)>,
    /// Largest relative deviation from the reference.
    pub max_relative_error: f64,
}

impl CrossCheck {
    /// Whether every strategy agrees with the reference within tolerance.
    pub fn is_consistent(&self) -> bool {
        self.max_relative_error <= SUM_TOLERANCE
    }
}

/// Relative difference with an absolute floor for values near zero.
pub fn relative_error(value: f64, reference: f64) -> f64 {
    (value - reference).abs() / reference.abs().max(1.0)
}

/// Runs every strategy over `dataset` and compares the totals.
pub fn cross_validate(dataset: &Dataset) -> Result<CrossCheck> {
    let reference = dataset.reference_area();
    let mut sums = Vec::with_capacity(DispatchStrategy::all().len());
    let mut max_relative_error: f64 = 0.0;

    for &strategy in DispatchStrategy::all() {
        let sum = Workload::prepare(strategy, dataset)?.sum_area();
        max_relative_error = max_relative_error.max(relative_error(sum, reference));
        sums.push((strategy, sum));
    }

    Ok(CrossCheck {
        reference,
        sums,
        max_relative_error,
    })
}
