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

//! Report types and structures.
//!
//! A [`BenchmarkReport`] is a flat, serializable view of a [`RunSummary`]:
//! one row per benchmark with times, the ratio to the matching `Direct`
//! baseline and approximate counters per call, plus run-wide notes.

use crate::harness::aggregator::{ratio_to_baseline, MeasurementWarning};
use crate::harness::counters::{CounterOutcome, PerIterationCounters};
use crate::harness::runner::RunSummary;
use dispatch_core::{DispatchStrategy, KindMix, BARRIER_NOTE};
use serde::{Deserialize, Serialize};

/// Caveat printed whenever counter columns are filled.
pub const COUNTER_CAVEAT: &str = "Counter columns are run-wide totals divided by every timed \
    sum_area call; counters are not reset between trials, so per-call figures are approximate.";

/// One benchmark in a report. Times are nanoseconds per `sum_area` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Benchmark name.
    pub name: String,
    /// Strategy under test.
    pub strategy: DispatchStrategy,
    /// Dataset kind mix.
    pub kind_mix: KindMix,
    /// Dataset size.
    pub size: usize,
    /// Mean time.
    pub mean_ns: f64,
    /// Median time.
    pub median_ns: f64,
    /// Sample standard deviation.
    pub std_dev_ns: f64,
    /// Fastest trial.
    pub min_ns: f64,
    /// Slowest trial.
    pub max_ns: f64,
    /// Coefficient of variation; `None` when undefined.
    pub cv: Option<f64>,
    /// Mean time relative to the `Direct` baseline.
    pub ratio_to_direct: Option<f64>,
    /// Calibrated calls per trial.
    pub inner_iterations: u64,
    /// Outer trials.
    pub repetitions: u32,
    /// Single-call `sum_area` result.
    pub checksum: f64,
    /// Approximate counters per call.
    pub counters: Option<PerIterationCounters>,
    /// Warnings other than the run-wide barrier note.
    pub warnings: Vec<String>,
}

impl ReportRow {
    /// Mean time per shape in nanoseconds.
    pub fn mean_ns_per_element(&self) -> f64 {
        self.mean_ns / self.size.max(1) as f64
    }
}

/// A benchmark that produced no result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRow {
    /// Benchmark name.
    pub name: String,
    /// Error message.
    pub error: String,
}

/// Complete benchmark report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Report title.
    pub title: String,
    /// Report timestamp (RFC 3339).
    pub timestamp: String,
    /// Counter backend name.
    pub counter_source: String,
    /// Rows in registration order.
    pub rows: Vec<ReportRow>,
    /// Failed benchmarks.
    pub failures: Vec<FailureRow>,
    /// Additional notes.
    pub notes: Vec<String>,
}

impl BenchmarkReport {
    /// Creates an empty report stamped with the current time.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            counter_source: String::new(),
            rows: Vec::new(),
            failures: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Builds a report from a finished run.
    pub fn from_summary(title: impl Into<String>, summary: &RunSummary) -> Self {
        let mut report = Self::new(title);
        report.timestamp = summary.timestamp.to_rfc3339();
        report.counter_source = summary.counter_source.clone();

        for result in &summary.results {
            let warnings = result
                .warnings
                .iter()
                .filter(|w| **w != MeasurementWarning::BarrierInLoop)
                .map(|w| w.to_string())
                .collect();

            report.rows.push(ReportRow {
                name: result.name.clone(),
                strategy: result.strategy,
                kind_mix: result.dataset.kind_mix,
                size: result.dataset.size,
                mean_ns: result.statistics.mean,
                median_ns: result.statistics.median,
                std_dev_ns: result.statistics.std_dev,
                min_ns: result.statistics.min,
                max_ns: result.statistics.max,
                cv: result.statistics.cv,
                ratio_to_direct: ratio_to_baseline(&summary.results, result),
                inner_iterations: result.inner_iterations,
                repetitions: result.repetitions,
                checksum: result.checksum,
                counters: result.approx_counters_per_iteration(),
                warnings,
            });
        }

        report.failures = summary
            .failures
            .iter()
            .map(|f| FailureRow {
                name: f.name.clone(),
                error: f.error.to_string(),
            })
            .collect();

        if summary
            .results
            .iter()
            .any(|r| r.warnings.contains(&MeasurementWarning::BarrierInLoop))
        {
            report.add_note(BARRIER_NOTE);
        }

        let unavailable = summary.results.iter().find_map(|r| match &r.counters {
            CounterOutcome::Unavailable { reason } => Some(reason.clone()),
            CounterOutcome::Available { .. } => None,
        });
        if let Some(reason) = unavailable {
            report.add_note(format!("Hardware counters unavailable: {}", reason));
        }
        if summary.has_counters() {
            report.add_note(COUNTER_CAVEAT);
        }

        report
    }

    /// Adds a note.
    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Number of rows.
    pub fn result_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of per-row warnings.
    pub fn warning_count(&self) -> usize {
        self.rows.iter().map(|r| r.warnings.len()).sum()
    }

    /// Looks up a row by benchmark name.
    pub fn row(&self, name: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    /// Whether any row has counter figures.
    pub fn has_counters(&self) -> bool {
        self.rows.iter().any(|r| r.counters.is_some())
    }
}
