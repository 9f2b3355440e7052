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

//! Dispatch Benchmark Harness
//!
//! Measures what each dispatch strategy in `dispatch-core` costs per call,
//! and correlates the timings with hardware counters when they are available.
//!
//! ## Features
//!
//! - **Registry**: named `(strategy, dataset)` units with name filtering
//! - **Trial runner**: warmup, iteration calibration, repeated outer trials
//! - **Counters**: `perf_event` on Linux (feature `perf`), graceful fallback
//! - **Reports**: console table, Markdown and JSON export
//!
//! ## Usage
//!
//! ```
//! use dispatch_bench::{
//!     BenchConfig, BenchmarkRegistry, BenchmarkReport, BenchmarkRunner, RunOptions,
//!     UnavailableCounters,
//! };
//! use dispatch_core::{DispatchStrategy, KindMix};
//!
//! let mut registry = BenchmarkRegistry::new();
//! registry.register_matrix(&[256], 42, &[KindMix::AllSquares], DispatchStrategy::all());
//!
//! let runner = BenchmarkRunner::new(BenchConfig::quick(), registry);
//! let mut counters = UnavailableCounters::new("not needed here");
//! let summary = runner.run(&RunOptions::new(3), &mut counters).unwrap();
//!
//! let report = BenchmarkReport::from_summary("Dispatch cost", &summary);
//! assert_eq!(report.result_count(), 4);
//! ```
//!
//! Run the release-mode timing checks:
//! ```bash
//! cargo test --release --package dispatch-bench -- --ignored
//! ```

pub mod core;
pub mod error;
pub mod harness;
pub mod reporters;

pub use crate::core::{
    benchmark_name, BenchConfig, BenchmarkInfo, BenchmarkRegistry, NameFilter, RunOptions,
    TrialSample, DEFAULT_REPETITIONS, STANDARD_SIZES,
};
pub use error::{BenchError, Result};
pub use harness::{
    collect_counters, default_source, AggregateResult, BenchmarkFailure, BenchmarkRunner,
    CounterDelta, CounterOutcome, CounterSource, FixedCounters, KindCensus, MeasurementWarning,
    RunSummary, RunnerState, Statistics, TrialRunner, UnavailableCounters,
};
#[cfg(all(target_os = "linux", feature = "perf"))]
pub use harness::PerfCounters;
pub use reporters::{export_json, export_markdown, print_report, BenchmarkReport};
