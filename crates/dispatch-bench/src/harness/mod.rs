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

//! Benchmark harness for unified reporting.
//!
//! # Modules
//!
//! - `runner`: Trial state machine and benchmark execution
//! - `counters`: Hardware counter backends and region bracketing
//! - `aggregator`: Statistics and measurement warnings
//! - `census`: Per-kind element counts

pub mod aggregator;
pub mod census;
pub mod counters;
pub mod runner;

pub use aggregator::{
    compute_statistics, find_baseline, flag_calibration_mismatches, ratio_to_baseline, summarize,
    AggregateResult, MeasurementWarning, Statistics,
};
pub use census::KindCensus;
pub use counters::{
    collect_counters, default_source, CounterDelta, CounterOutcome, CounterSource, FixedCounters,
    PerIterationCounters, RegionHandle, RegionTracker, UnavailableCounters,
};
#[cfg(all(target_os = "linux", feature = "perf"))]
pub use counters::PerfCounters;
pub use runner::{
    calibrate, BenchmarkFailure, BenchmarkRunner, RunSummary, RunnerState, TrialRun, TrialRunner,
};
