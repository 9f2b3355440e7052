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

//! Benchmark registration and discovery.
//!
//! A benchmark unit is a `(name, strategy, dataset config)` triple. The
//! registry is an owned value rather than process-global state, keeps
//! registration order, and validates each unit on the way in so a bad
//! configuration is rejected on its own without affecting the others.

use crate::error::{BenchError, Result};
use dispatch_core::{DatasetConfig, DispatchStrategy, KindMix};
use tracing::debug;

/// A registered benchmark unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkInfo {
    /// Unique name of the benchmark.
    pub name: String,
    /// Dispatch strategy under test.
    pub strategy: DispatchStrategy,
    /// Dataset the strategy runs over.
    pub dataset: DatasetConfig,
}

/// Canonical benchmark name, e.g. `dynamic/mixed/10000`.
pub fn benchmark_name(strategy: DispatchStrategy, dataset: &DatasetConfig) -> String {
    format!("{}/{}/{}", strategy, dataset.kind_mix, dataset.size)
}

/// Name filter applied at execution time.
#[derive(Debug, Clone)]
pub enum NameFilter {
    /// Matches every benchmark.
    All,
    /// Matches names containing the text.
    Substring(String),
    /// Matches names against a glob pattern.
    Glob(glob::Pattern),
}

impl NameFilter {
    /// Parses a filter; text with glob metacharacters becomes a pattern.
    ///
    /// # Errors
    ///
    /// [`BenchError::InvalidConfiguration`] for a malformed glob.
    pub fn parse(filter: Option<&str>) -> Result<Self> {
        match filter {
            None => Ok(NameFilter::All),
            Some(text) if text.contains(['*', '?', '[']) => glob::Pattern::new(text)
                .map(NameFilter::Glob)
                .map_err(|e| BenchError::invalid_config("filter", e.to_string())),
            Some(text) => Ok(NameFilter::Substring(text.to_string())),
        }
    }

    /// Whether `name` passes the filter.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameFilter::All => true,
            NameFilter::Substring(text) => name.contains(text.as_str()),
            NameFilter::Glob(pattern) => pattern.matches(name),
        }
    }
}

/// Ordered collection of benchmark units.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkRegistry {
    benchmarks: Vec<BenchmarkInfo>,
    rejected: Vec<(String, BenchError)>,
}

impl BenchmarkRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a benchmark unit.
    ///
    /// # Errors
    ///
    /// - [`BenchError::InvalidConfiguration`] for an empty name, a zero or
    ///   oversized dataset
    /// - [`BenchError::DuplicateBenchmark`] if the name is taken
    ///
    /// # Example
    ///
    /// ```
    /// use dispatch_bench::core::registry::BenchmarkRegistry;
    /// use dispatch_core::{DatasetConfig, DispatchStrategy, KindMix};
    ///
    /// let mut registry = BenchmarkRegistry::new();
    /// registry
    ///     .register(
    ///         "dyn_mixed",
    ///         DispatchStrategy::Dynamic,
    ///         DatasetConfig::new(1_000, 42, KindMix::UniformRandomMix),
    ///     )
    ///     .unwrap();
    /// assert_eq!(registry.len(), 1);
    /// ```
    pub fn register(
        &mut self,
        name: impl Into<String>,
        strategy: DispatchStrategy,
        dataset: DatasetConfig,
    ) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BenchError::invalid_config("name", "must not be empty"));
        }
        dataset.validate()?;
        if self.get(&name).is_some() {
            return Err(BenchError::DuplicateBenchmark { name });
        }

        debug!(
            name = %name,
            strategy = %strategy,
            dataset = %dataset.label(),
            "registered benchmark"
        );
        self.benchmarks.push(BenchmarkInfo {
            name,
            strategy,
            dataset,
        });
        Ok(())
    }

    /// Registers every strategy x kind mix x size combination.
    ///
    /// Names follow [`benchmark_name`]. Accepted units stay registered.
    /// Rejected units are kept in [`rejected`](Self::rejected) so a run can
    /// report them, and are also returned to the caller.
    pub fn register_matrix(
        &mut self,
        sizes: &[usize],
        seed: u64,
        mixes: &[KindMix],
        strategies: &[DispatchStrategy],
    ) -> Vec<(String, BenchError)> {
        let mut rejected = Vec::new();
        for &size in sizes {
            for &mix in mixes {
                let dataset = DatasetConfig::new(size, seed, mix);
                for &strategy in strategies {
                    let name = benchmark_name(strategy, &dataset);
                    if let Err(err) = self.register(name.clone(), strategy, dataset) {
                        debug!(name = %name, error = %err, "registration rejected");
                        rejected.push((name, err));
                    }
                }
            }
        }
        self.rejected.extend(rejected.iter().cloned());
        rejected
    }

    /// Units rejected by [`register_matrix`](Self::register_matrix), in order.
    pub fn rejected(&self) -> &[(String, BenchError)] {
        &self.rejected
    }

    /// Looks up a benchmark by name.
    pub fn get(&self, name: &str) -> Option<&BenchmarkInfo> {
        self.benchmarks.iter().find(|b| b.name == name)
    }

    /// All benchmarks in registration order.
    pub fn benchmarks(&self) -> &[BenchmarkInfo] {
        &self.benchmarks
    }

    /// Benchmarks passing `filter`, in registration order.
    pub fn filter<'a>(
        &'a self,
        filter: &'a NameFilter,
    ) -> impl Iterator<Item = &'a BenchmarkInfo> + 'a {
        self.benchmarks.iter().filter(move |b| filter.matches(&b.name))
    }

    /// Benchmarks using the given strategy.
    pub fn filter_by_strategy(&self, strategy: DispatchStrategy) -> Vec<&BenchmarkInfo> {
        self.benchmarks
            .iter()
            .filter(|b| b.strategy == strategy)
            .collect()
    }

    /// Number of registered benchmarks.
    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}
