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

//! Result aggregation and statistics computation.
//!
//! Reduces per-trial samples to summary statistics over per-iteration times
//! (nanoseconds per `sum_area` pass) and attaches measurement warnings.
//! All samples are kept; there is no outlier rejection.

use crate::core::measurement::TrialSample;
use crate::harness::census::KindCensus;
use crate::harness::counters::{CounterOutcome, PerIterationCounters};
use dispatch_core::{DatasetConfig, DispatchStrategy, BARRIER_NOTE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Statistical summary of per-iteration times in nanoseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Mean.
    pub mean: f64,
    /// Median; average of the two middle values for an even count.
    pub median: f64,
    /// Sample standard deviation (n - 1).
    pub std_dev: f64,
    /// Coefficient of variation, `None` when the mean is zero.
    pub cv: Option<f64>,
    /// Minimum.
    pub min: f64,
    /// Maximum.
    pub max: f64,
    /// Number of samples.
    pub count: usize,
}

impl Statistics {
    fn empty() -> Self {
        Self {
            mean: 0.0,
            median: 0.0,
            std_dev: 0.0,
            cv: None,
            min: 0.0,
            max: 0.0,
            count: 0,
        }
    }
}

/// Computes statistics over `values`.
///
/// # Example
///
/// ```
/// use dispatch_bench::harness::aggregator::compute_statistics;
///
/// let stats = compute_statistics(&[4.0, 1.0, 3.0, 2.0]);
/// assert_eq!(stats.median, 2.5);
/// assert_eq!(stats.min, 1.0);
/// assert_eq!(stats.max, 4.0);
/// ```
pub fn compute_statistics(values: &[f64]) -> Statistics {
    if values.is_empty() {
        return Statistics::empty();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;

    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };

    let std_dev = if count > 1 {
        let variance = sorted
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / (count - 1) as f64;
        variance.sqrt()
    } else {
        0.0
    };

    let cv = (mean != 0.0).then(|| std_dev / mean.abs());

    Statistics {
        mean,
        median,
        std_dev,
        cv,
        min: sorted[0],
        max: sorted[count - 1],
        count,
    }
}

/// Statistics over the per-iteration times of `samples`.
pub fn summarize(samples: &[TrialSample]) -> Statistics {
    let per_iteration: Vec<f64> = samples.iter().map(TrialSample::per_iteration_ns).collect();
    compute_statistics(&per_iteration)
}

/// Measurement-quality issue attached to a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeasurementWarning {
    /// CV above the configured threshold.
    HighVariance {
        /// Observed CV.
        cv: f64,
        /// Configured threshold.
        threshold: f64,
    },
    /// Inner iteration count differs from the baseline's.
    CalibrationMismatch {
        /// This result's inner iterations.
        iterations: u64,
        /// Baseline's inner iterations.
        baseline_iterations: u64,
    },
    /// Calibration hit the iteration cap before reaching the minimum trial
    /// time, so trials are shorter than requested.
    IterationCapReached {
        /// Capped inner iterations.
        iterations: u64,
        /// Duration of the last calibration trial.
        trial_ns: u64,
        /// Requested minimum trial duration.
        min_trial_ns: u64,
    },
    /// The barrier sits inside the measured loop.
    BarrierInLoop,
}

impl fmt::Display for MeasurementWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementWarning::HighVariance { cv, threshold } => write!(
                f,
                "high variance: CV {:.1}% exceeds {:.1}%",
                cv * 100.0,
                threshold * 100.0
            ),
            MeasurementWarning::CalibrationMismatch {
                iterations,
                baseline_iterations,
            } => write!(
                f,
                "calibration mismatch: {} inner iterations vs {} for the direct baseline",
                iterations, baseline_iterations
            ),
            MeasurementWarning::IterationCapReached {
                iterations,
                trial_ns,
                min_trial_ns,
            } => write!(
                f,
                "iteration cap reached: {} inner iterations took {} ns, below the {} ns minimum",
                iterations, trial_ns, min_trial_ns
            ),
            MeasurementWarning::BarrierInLoop => f.write_str(BARRIER_NOTE),
        }
    }
}

/// Everything measured for one registered benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Benchmark name.
    pub name: String,
    /// Strategy under test.
    pub strategy: DispatchStrategy,
    /// Dataset configuration.
    pub dataset: DatasetConfig,
    /// Per-iteration time statistics.
    pub statistics: Statistics,
    /// Calibrated `sum_area` passes per trial.
    pub inner_iterations: u64,
    /// Number of outer trials.
    pub repetitions: u32,
    /// Counters over all trials.
    pub counters: CounterOutcome,
    /// Single-pass `sum_area` result.
    pub checksum: f64,
    /// Element counts per kind.
    pub census: KindCensus,
    /// Measurement-quality warnings.
    pub warnings: Vec<MeasurementWarning>,
}

impl AggregateResult {
    /// Total `sum_area` passes inside the counter region.
    pub fn total_iterations(&self) -> u64 {
        self.inner_iterations
            .saturating_mul(u64::from(self.repetitions))
    }

    /// Counters per pass, derived from the run-wide totals.
    ///
    /// Approximate: counters are not isolated per trial.
    pub fn approx_counters_per_iteration(&self) -> Option<PerIterationCounters> {
        self.counters
            .delta()
            .map(|delta| delta.per_iteration(self.total_iterations()))
    }

    /// Whether this result is a `Direct` baseline.
    pub fn is_baseline(&self) -> bool {
        self.strategy == DispatchStrategy::Direct
    }

    /// Adds `HighVariance` if the CV exceeds `threshold`.
    pub fn check_variance(&mut self, threshold: f64) {
        if let Some(cv) = self.statistics.cv {
            if cv > threshold {
                self.warnings
                    .push(MeasurementWarning::HighVariance { cv, threshold });
            }
        }
    }
}

/// Finds the `Direct` result that `result` should be compared against.
///
/// Prefers the same size and kind mix, then any `Direct` result with the same
/// size.
pub fn find_baseline<'a>(
    results: &'a [AggregateResult],
    result: &AggregateResult,
) -> Option<&'a AggregateResult> {
    let baselines = || results.iter().filter(|r| r.is_baseline());
    baselines()
        .find(|r| {
            r.dataset.size == result.dataset.size && r.dataset.kind_mix == result.dataset.kind_mix
        })
        .or_else(|| baselines().find(|r| r.dataset.size == result.dataset.size))
}

/// Ratio of `result`'s mean time to its baseline's.
pub fn ratio_to_baseline(results: &[AggregateResult], result: &AggregateResult) -> Option<f64> {
    let baseline = find_baseline(results, result)?;
    (baseline.statistics.mean > 0.0).then(|| result.statistics.mean / baseline.statistics.mean)
}

/// Adds `CalibrationMismatch` where a result's inner iterations differ from
/// its baseline's.
pub fn flag_calibration_mismatches(results: &mut [AggregateResult]) {
    let mismatches: Vec<(usize, u64)> = results
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.is_baseline())
        .filter_map(|(index, r)| {
            let baseline = find_baseline(results, r)?;
            (baseline.inner_iterations != r.inner_iterations)
                .then_some((index, baseline.inner_iterations))
        })
        .collect();

    for (index, baseline_iterations) in mismatches {
        let result = &mut results[index];
        result.warnings.push(MeasurementWarning::CalibrationMismatch {
            iterations: result.inner_iterations,
            baseline_iterations,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_core::KindMix;
    use std::time::Duration;

    fn result(
        strategy: DispatchStrategy,
        mix: KindMix,
        size: usize,
        mean: f64,
        iters: u64,
    ) -> AggregateResult {
        let statistics = compute_statistics(&[mean]);
        AggregateResult {
            name: format!("{}/{}/{}", strategy, mix, size),
            strategy,
            dataset: DatasetConfig::new(size, 42, mix),
            statistics,
            inner_iterations: iters,
            repetitions: 10,
            counters: CounterOutcome::Unavailable {
                reason: "test".to_string(),
            },
            checksum: 1.0,
            census: KindCensus::new(),
            warnings: vec![MeasurementWarning::BarrierInLoop],
        }
    }

    #[test]
    fn test_compute_statistics() {
        let stats = compute_statistics(&[100.0, 200.0, 300.0]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean, 200.0);
        assert_eq!(stats.median, 200.0);
        assert_eq!(stats.min, 100.0);
        assert_eq!(stats.max, 300.0);
        assert_eq!(stats.std_dev, 100.0);
        assert_eq!(stats.cv, Some(0.5));
    }

    #[test]
    fn test_even_count_median() {
        let stats = compute_statistics(&[1.0, 10.0, 2.0, 3.0]);
        assert_eq!(stats.median, 2.5);
    }

    #[test]
    fn test_single_sample() {
        let stats = compute_statistics(&[42.0]);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.cv, Some(0.0));
        assert_eq!(stats.median, 42.0);
    }

    #[test]
    fn test_zero_mean_has_no_cv() {
        let stats = compute_statistics(&[0.0, 0.0, 0.0]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.cv, None);

        let empty = compute_statistics(&[]);
        assert_eq!(empty.count, 0);
        assert_eq!(empty.cv, None);
    }

    #[test]
    fn test_summarize_uses_per_iteration_time() {
        let samples = vec![
            TrialSample::new(Duration::from_micros(10), 10),
            TrialSample::new(Duration::from_micros(30), 10),
        ];
        let stats = summarize(&samples);
        assert_eq!(stats.mean, 2_000.0);
        assert_eq!(stats.min, 1_000.0);
        assert_eq!(stats.max, 3_000.0);
    }

    #[test]
    fn test_check_variance() {
        let mut r = result(DispatchStrategy::Dynamic, KindMix::AllSquares, 100, 10.0, 8);
        r.statistics.cv = Some(0.25);
        r.check_variance(0.10);
        assert!(r
            .warnings
            .iter()
            .any(|w| matches!(w, MeasurementWarning::HighVariance { .. })));

        let mut quiet = result(DispatchStrategy::Dynamic, KindMix::AllSquares, 100, 10.0, 8);
        quiet.statistics.cv = None;
        quiet.check_variance(0.10);
        assert_eq!(quiet.warnings, vec![MeasurementWarning::BarrierInLoop]);
    }

    #[test]
    fn test_find_baseline_prefers_same_mix() {
        let results = vec![
            result(DispatchStrategy::Direct, KindMix::AllSquares, 100, 10.0, 8),
            result(DispatchStrategy::Direct, KindMix::UniformRandomMix, 100, 20.0, 8),
            result(DispatchStrategy::Dynamic, KindMix::UniformRandomMix, 100, 80.0, 8),
            result(DispatchStrategy::Dynamic, KindMix::AllTriangles, 100, 30.0, 8),
            result(DispatchStrategy::Dynamic, KindMix::AllSquares, 500, 30.0, 8),
        ];
        let baseline = find_baseline(&results, &results[2]).unwrap();
        assert_eq!(baseline.dataset.kind_mix, KindMix::UniformRandomMix);
        assert_eq!(ratio_to_baseline(&results, &results[2]), Some(4.0));

        // No triangle baseline: fall back to same size.
        let baseline = find_baseline(&results, &results[3]).unwrap();
        assert_eq!(baseline.dataset.kind_mix, KindMix::AllSquares);

        assert!(find_baseline(&results, &results[4]).is_none());
    }

    #[test]
    fn test_flag_calibration_mismatches() {
        let mut results = vec![
            result(DispatchStrategy::Direct, KindMix::AllSquares, 100, 10.0, 64),
            result(DispatchStrategy::StaticBound, KindMix::AllSquares, 100, 10.0, 64),
            result(DispatchStrategy::Dynamic, KindMix::AllSquares, 100, 30.0, 16),
        ];
        flag_calibration_mismatches(&mut results);
        assert_eq!(results[0].warnings.len(), 1);
        assert_eq!(results[1].warnings.len(), 1);
        assert_eq!(
            results[2].warnings[1],
            MeasurementWarning::CalibrationMismatch {
                iterations: 16,
                baseline_iterations: 64
            }
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = MeasurementWarning::HighVariance {
            cv: 0.15,
            threshold: 0.10,
        };
        assert_eq!(warning.to_string(), "high variance: CV 15.0% exceeds 10.0%");
        assert_eq!(MeasurementWarning::BarrierInLoop.to_string(), BARRIER_NOTE);
        let capped = MeasurementWarning::IterationCapReached {
            iterations: 8,
            trial_ns: 1_500,
            min_trial_ns: 10_000_000,
        };
        assert_eq!(
            capped.to_string(),
            "iteration cap reached: 8 inner iterations took 1500 ns, below the 10000000 ns minimum"
        );
    }
}
