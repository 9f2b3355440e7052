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

//! Per-kind element counts.
//!
//! Counts live in a registry keyed by [`ShapeKind`] that the harness owns and
//! fills once per dataset. The shape types themselves carry no counters.

use dispatch_core::{Dataset, ShapeKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of elements of each kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCensus {
    counts: BTreeMap<ShapeKind, usize>,
}

impl KindCensus {
    /// Creates an empty census.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every element of `dataset`.
    pub fn of_dataset(dataset: &Dataset) -> Self {
        let mut census = Self::new();
        census.record_dataset(dataset);
        census
    }

    /// Records one element.
    pub fn record(&mut self, kind: ShapeKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    /// Records every element of `dataset`.
    pub fn record_dataset(&mut self, dataset: &Dataset) {
        for shape in dataset.shapes() {
            self.record(shape.kind());
        }
    }

    /// Count for one kind; zero if never recorded.
    pub fn count(&self, kind: ShapeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Sum over all kinds.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Fraction of elements of `kind`, if anything was recorded.
    pub fn share(&self, kind: ShapeKind) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| self.count(kind) as f64 / total as f64)
    }

    /// Counts in kind order.
    pub fn counts(&self) -> &BTreeMap<ShapeKind, usize> {
        &self.counts
    }

    /// Clears all counts.
    pub fn reset(&mut self) {
        self.counts.clear();
    }
}
