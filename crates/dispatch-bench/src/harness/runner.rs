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

//! Benchmark runner for executing and collecting results.
//!
//! Each registered benchmark goes through `Idle -> Warmup -> Measuring ->
//! Done`. Warmup also calibrates the inner iteration count. The counter
//! region brackets the measuring phase only, so warmup and calibration passes
//! never show up in counter totals.

use crate::core::config::{BenchConfig, RunOptions};
use crate::core::measurement::{measure_trial, time_iterations, TrialSample};
use crate::core::registry::{BenchmarkInfo, BenchmarkRegistry, NameFilter};
use crate::error::{BenchError, Result};
use crate::harness::aggregator::{
    flag_calibration_mismatches, summarize, AggregateResult, MeasurementWarning,
};
use crate::harness::census::KindCensus;
use crate::harness::counters::{collect_counters, CounterOutcome, CounterSource};
use chrono::{DateTime, Utc};
use dispatch_core::{observe, relative_error, Dataset, DatasetConfig, Workload, SUM_TOLERANCE};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Phase of a [`TrialRunner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunnerState {
    /// Nothing has run yet.
    Idle,
    /// Warming caches and calibrating.
    Warmup,
    /// Timing outer trials.
    Measuring,
    /// All trials recorded.
    Done,
}

impl RunnerState {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunnerState::Idle => "idle",
            RunnerState::Warmup => "warmup",
            RunnerState::Measuring => "measuring",
            RunnerState::Done => "done",
        }
    }

    /// Whether `next` directly follows this state.
    pub fn can_transition_to(self, next: RunnerState) -> bool {
        matches!(
            (self, next),
            (RunnerState::Idle, RunnerState::Warmup)
                | (RunnerState::Warmup, RunnerState::Measuring)
                | (RunnerState::Measuring, RunnerState::Done)
        )
    }
}

impl fmt::Display for RunnerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Samples from one measuring phase.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialRun {
    /// One sample per outer trial.
    pub samples: Vec<TrialSample>,
    /// Inner iterations used by every trial.
    pub inner_iterations: u64,
    /// Sum of all trial totals.
    pub accumulated: f64,
}

/// Outcome of [`calibrate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    /// Chosen inner iteration count.
    pub iterations: u64,
    /// Duration of the last calibration trial.
    pub trial_time: Duration,
}

impl Calibration {
    /// Whether the last trial reached `min_trial_time`.
    pub fn reached(&self, min_trial_time: Duration) -> bool {
        self.trial_time >= min_trial_time
    }

    /// Warning for a trial cut short by the iteration cap.
    pub fn cap_warning(&self, min_trial_time: Duration) -> Option<MeasurementWarning> {
        if self.reached(min_trial_time) {
            return None;
        }
        Some(MeasurementWarning::IterationCapReached {
            iterations: self.iterations,
            trial_ns: duration_ns(self.trial_time),
            min_trial_ns: duration_ns(min_trial_time),
        })
    }
}

fn duration_ns(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

/// Doubles the iteration count until one trial lasts at least
/// `min_trial_time`, stopping at `max_inner_iterations`.
pub fn calibrate(workload: &Workload, config: &BenchConfig) -> Calibration {
    let cap = config.max_inner_iterations.max(1);
    let mut iterations: u64 = 1;
    loop {
        let (elapsed, total) = time_iterations(workload, iterations);
        observe(total);
        if elapsed >= config.min_trial_time || iterations >= cap {
            return Calibration {
                iterations,
                trial_time: elapsed,
            };
        }
        iterations = iterations.saturating_mul(2).min(cap);
    }
}

/// Drives warmup, calibration and measurement over one workload.
#[derive(Debug)]
pub struct TrialRunner<'a> {
    workload: &'a Workload,
    config: &'a BenchConfig,
    state: RunnerState,
    calibration: Option<Calibration>,
}

impl<'a> TrialRunner<'a> {
    /// Creates an idle runner.
    pub fn new(workload: &'a Workload, config: &'a BenchConfig) -> Self {
        Self {
            workload,
            config,
            state: RunnerState::Idle,
            calibration: None,
        }
    }

    /// Current phase.
    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// Calibrated inner iterations, zero before warmup.
    pub fn inner_iterations(&self) -> u64 {
        self.calibration.map_or(0, |c| c.iterations)
    }

    /// Calibration outcome, `None` before warmup.
    pub fn calibration(&self) -> Option<Calibration> {
        self.calibration
    }

    fn transition(&mut self, to: RunnerState) -> Result<()> {
        if !self.state.can_transition_to(to) {
            return Err(BenchError::InvalidState {
                from: self.state,
                to,
            });
        }
        debug!(from = %self.state, to = %to, "trial runner transition");
        self.state = to;
        Ok(())
    }

    /// Runs the workload for the warmup duration, then calibrates.
    ///
    /// Returns the calibrated inner iteration count.
    pub fn warmup(&mut self) -> Result<u64> {
        self.transition(RunnerState::Warmup)?;

        let start = Instant::now();
        let mut passes: u64 = 0;
        loop {
            observe(self.workload.run_iterations(1));
            passes += 1;
            if start.elapsed() >= self.config.warmup {
                break;
            }
        }

        let calibration = calibrate(self.workload, self.config);
        if !calibration.reached(self.config.min_trial_time) {
            warn!(
                inner_iterations = calibration.iterations,
                trial_time = ?calibration.trial_time,
                "iteration cap reached before the minimum trial time"
            );
        }
        debug!(
            warmup_passes = passes,
            inner_iterations = calibration.iterations,
            "calibrated"
        );
        self.calibration = Some(calibration);
        Ok(calibration.iterations)
    }

    /// Times `repetitions` outer trials and moves to `Done`.
    pub fn measure(&mut self, repetitions: u32) -> Result<TrialRun> {
        self.transition(RunnerState::Measuring)?;

        let inner_iterations = self.inner_iterations();
        let mut samples = Vec::with_capacity(repetitions as usize);
        let mut accumulated = 0.0;
        for _ in 0..repetitions {
            let (sample, total) = measure_trial(self.workload, inner_iterations);
            accumulated += total;
            samples.push(sample);
        }

        self.transition(RunnerState::Done)?;
        Ok(TrialRun {
            samples,
            inner_iterations,
            accumulated: observe(accumulated),
        })
    }
}

/// A benchmark that could not be measured.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkFailure {
    /// Benchmark name.
    pub name: String,
    /// What went wrong.
    pub error: BenchError,
}

/// Outcome of one [`BenchmarkRunner::run`].
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Results in registration order.
    pub results: Vec<AggregateResult>,
    /// Benchmarks that failed, in registration order.
    pub failures: Vec<BenchmarkFailure>,
    /// Name of the counter backend.
    pub counter_source: String,
    /// Outer trials per benchmark.
    pub repetitions: u32,
    /// When the run finished.
    pub timestamp: DateTime<Utc>,
}

impl RunSummary {
    /// Looks up a result by benchmark name.
    pub fn get(&self, name: &str) -> Option<&AggregateResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Whether every selected benchmark produced a result.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether any result carries hardware counters.
    pub fn has_counters(&self) -> bool {
        self.results.iter().any(|r| r.counters.is_available())
    }
}

/// Whether no benchmark after `index` uses the same dataset.
fn is_last_use(selected: &[&BenchmarkInfo], index: usize) -> bool {
    let dataset = selected[index].dataset;
    !selected[index + 1..].iter().any(|b| b.dataset == dataset)
}

/// Runner for executing registered benchmarks with one configuration.
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    config: BenchConfig,
    registry: BenchmarkRegistry,
}

impl BenchmarkRunner {
    /// Creates a runner over `registry`.
    pub fn new(config: BenchConfig, registry: BenchmarkRegistry) -> Self {
        Self { config, registry }
    }

    /// Trial settings.
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Registered benchmarks.
    pub fn registry(&self) -> &BenchmarkRegistry {
        &self.registry
    }

    /// Mutable access for late registration.
    pub fn registry_mut(&mut self) -> &mut BenchmarkRegistry {
        &mut self.registry
    }

    /// Runs every benchmark that passes the filter, sequentially.
    ///
    /// A failing benchmark is recorded in [`RunSummary::failures`] and the
    /// run continues. Units the registry rejected are reported there too.
    /// Missing counters never fail a benchmark. Each dataset is dropped once
    /// the last selected benchmark using it has run.
    ///
    /// # Errors
    ///
    /// [`BenchError::InvalidConfiguration`] for zero repetitions, invalid
    /// trial settings or a malformed filter, before any trial runs.
    pub fn run(
        &self,
        options: &RunOptions,
        counters: &mut dyn CounterSource,
    ) -> Result<RunSummary> {
        self.config.validate()?;
        options.validate()?;
        let filter = NameFilter::parse(options.filter.as_deref())?;

        let mut datasets: HashMap<DatasetConfig, Dataset> = HashMap::new();
        let mut results = Vec::new();
        let mut failures: Vec<BenchmarkFailure> = self
            .registry
            .rejected()
            .iter()
            .filter(|(name, _)| filter.matches(name))
            .map(|(name, error)| {
                warn!(name = %name, error = %error, "registration rejected");
                BenchmarkFailure {
                    name: name.clone(),
                    error: error.clone(),
                }
            })
            .collect();

        let selected: Vec<&BenchmarkInfo> = self.registry.filter(&filter).collect();
        for (index, info) in selected.iter().enumerate() {
            match self.run_one(info, options.repetitions, &mut datasets, counters) {
                Ok(result) => results.push(result),
                Err(error) => {
                    warn!(name = %info.name, error = %error, "benchmark failed");
                    failures.push(BenchmarkFailure {
                        name: info.name.clone(),
                        error,
                    });
                }
            }
            if is_last_use(&selected, index) {
                datasets.remove(&info.dataset);
            }
        }

        flag_calibration_mismatches(&mut results);

        if let Some(CounterOutcome::Unavailable { reason }) = results
            .iter()
            .map(|r| &r.counters)
            .find(|c| !c.is_available())
        {
            warn!(
                source = counters.name(),
                reason = %reason,
                "hardware counters unavailable, timing only"
            );
        }

        info!(
            results = results.len(),
            failures = failures.len(),
            "benchmark run complete"
        );

        Ok(RunSummary {
            results,
            failures,
            counter_source: counters.name().to_string(),
            repetitions: options.repetitions,
            timestamp: Utc::now(),
        })
    }

    fn run_one(
        &self,
        info: &BenchmarkInfo,
        repetitions: u32,
        datasets: &mut HashMap<DatasetConfig, Dataset>,
        counters: &mut dyn CounterSource,
    ) -> Result<AggregateResult> {
        let dataset = match datasets.entry(info.dataset) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(Dataset::generate(info.dataset)?),
        };

        let workload = Workload::prepare(info.strategy, dataset)?;
        let checksum = workload.sum_area();
        let reference = dataset.reference_area();
        if relative_error(checksum, reference) > SUM_TOLERANCE {
            return Err(BenchError::CrossValidation {
                name: info.name.clone(),
                expected: reference,
                actual: checksum,
            });
        }

        let mut trial = TrialRunner::new(&workload, &self.config);
        let inner_iterations = trial.warmup()?;
        let cap_warning = trial
            .calibration()
            .and_then(|c| c.cap_warning(self.config.min_trial_time));

        let (run, counter_outcome) = collect_counters(counters, || trial.measure(repetitions));
        let run = run?;

        let mut result = AggregateResult {
            name: info.name.clone(),
            strategy: info.strategy,
            dataset: info.dataset,
            statistics: summarize(&run.samples),
            inner_iterations,
            repetitions,
            counters: counter_outcome,
            checksum,
            census: KindCensus::of_dataset(dataset),
            warnings: vec![MeasurementWarning::BarrierInLoop],
        };
        result.warnings.extend(cap_warning);
        result.check_variance(self.config.cv_warning_threshold);

        info!(
            name = %result.name,
            mean_ns = result.statistics.mean,
            median_ns = result.statistics.median,
            inner_iterations,
            "benchmark complete"
        );
        Ok(result)
    }
}
