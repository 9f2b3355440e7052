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

//! Measurement primitives.
//!
//! A trial times a calibrated number of `sum_area` passes over one workload.
//! The only per-iteration work besides the pass itself is the optimization
//! barrier on the accumulator.

use dispatch_core::Workload;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// One measured outer trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialSample {
    /// Wall time of the whole trial.
    pub elapsed: Duration,
    /// Number of `sum_area` passes timed.
    pub iterations: u64,
}

impl TrialSample {
    /// Creates a sample.
    pub fn new(elapsed: Duration, iterations: u64) -> Self {
        Self {
            elapsed,
            iterations,
        }
    }

    /// Mean time of one `sum_area` pass in nanoseconds.
    pub fn per_iteration_ns(&self) -> f64 {
        self.elapsed.as_nanos() as f64 / self.iterations.max(1) as f64
    }
}

/// Times `iterations` passes of `workload`.
///
/// Returns the elapsed wall time and the accumulated total, which callers use
/// as a checksum.
///
/// # Example
///
/// ```
/// use dispatch_bench::core::measurement::time_iterations;
/// use dispatch_core::{Dataset, DatasetConfig, DispatchStrategy, KindMix, Workload};
///
/// let dataset = Dataset::generate(DatasetConfig::new(100, 1, KindMix::AllSquares)).unwrap();
/// let workload = Workload::prepare(DispatchStrategy::Direct, &dataset).unwrap();
/// let (_elapsed, total) = time_iterations(&workload, 10);
/// assert!(total > 0.0);
/// ```
#[inline(never)]
pub fn time_iterations(workload: &Workload, iterations: u64) -> (Duration, f64) {
    let start = Instant::now();
    let total = workload.run_iterations(iterations);
    (start.elapsed(), total)
}

/// Measures one trial of `iterations` passes.
pub fn measure_trial(workload: &Workload, iterations: u64) -> (TrialSample, f64) {
    let (elapsed, total) = time_iterations(workload, iterations);
    (TrialSample::new(elapsed, iterations), total)
}
