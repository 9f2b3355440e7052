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

//! Centralized benchmark configuration.
//!
//! Provides standardized configuration for trial execution: warmup, the
//! minimum wall time per trial used for iteration calibration, and the
//! thresholds that turn measurement-quality issues into report warnings.

use crate::error::{BenchError, Result};
use std::time::Duration;

/// Standard dataset sizes for benchmarks.
pub const STANDARD_SIZES: &[usize] = &[1_000, 10_000, 100_000];

/// Default number of outer trials per benchmark.
pub const DEFAULT_REPETITIONS: u32 = 50;

/// Default warmup duration for stable measurements.
pub const DEFAULT_WARMUP: Duration = Duration::from_millis(100);

/// Default minimum wall time of one trial, well above clock resolution.
pub const DEFAULT_MIN_TRIAL_TIME: Duration = Duration::from_millis(10);

/// Upper bound for the calibrated inner iteration count.
pub const DEFAULT_MAX_INNER_ITERATIONS: u64 = 1 << 24;

/// Coefficient of variation above which a result is flagged as noisy.
pub const DEFAULT_CV_WARNING_THRESHOLD: f64 = 0.10;

/// Trial execution settings shared by every registered benchmark.
///
/// # Example
///
/// ```
/// use dispatch_bench::core::config::BenchConfig;
/// use std::time::Duration;
///
/// let config = BenchConfig::default()
///     .with_warmup(Duration::from_millis(50))
///     .with_min_trial_time(Duration::from_millis(5));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Warmup duration before calibration.
    pub warmup: Duration,
    /// Minimum wall time a calibrated trial must reach.
    pub min_trial_time: Duration,
    /// Cap on inner iterations per trial.
    pub max_inner_iterations: u64,
    /// CV above which a `HighVariance` warning is attached.
    pub cv_warning_threshold: f64,
}

impl BenchConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            warmup: DEFAULT_WARMUP,
            min_trial_time: DEFAULT_MIN_TRIAL_TIME,
            max_inner_iterations: DEFAULT_MAX_INNER_ITERATIONS,
            cv_warning_threshold: DEFAULT_CV_WARNING_THRESHOLD,
        }
    }

    /// Fast settings for tests and smoke runs.
    pub fn quick() -> Self {
        Self {
            warmup: Duration::from_millis(1),
            min_trial_time: Duration::from_micros(200),
            max_inner_iterations: 1 << 12,
            cv_warning_threshold: DEFAULT_CV_WARNING_THRESHOLD,
        }
    }

    /// Sets warmup duration.
    pub fn with_warmup(mut self, warmup: Duration) -> Self {
        self.warmup = warmup;
        self
    }

    /// Sets the minimum trial duration.
    pub fn with_min_trial_time(mut self, min_trial_time: Duration) -> Self {
        self.min_trial_time = min_trial_time;
        self
    }

    /// Sets the inner iteration cap.
    pub fn with_max_inner_iterations(mut self, max: u64) -> Self {
        self.max_inner_iterations = max;
        self
    }

    /// Sets the CV warning threshold.
    pub fn with_cv_warning_threshold(mut self, threshold: f64) -> Self {
        self.cv_warning_threshold = threshold;
        self
    }

    /// Checks the settings before any trial runs.
    pub fn validate(&self) -> Result<()> {
        if self.min_trial_time.is_zero() {
            return Err(BenchError::invalid_config(
                "min_trial_time",
                "must be greater than zero",
            ));
        }
        if self.max_inner_iterations == 0 {
            return Err(BenchError::invalid_config(
                "max_inner_iterations",
                "must be at least 1",
            ));
        }
        if !(self.cv_warning_threshold.is_finite() && self.cv_warning_threshold > 0.0) {
            return Err(BenchError::invalid_config(
                "cv_warning_threshold",
                "must be a positive finite number",
            ));
        }
        Ok(())
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-run execution options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Outer trials per benchmark.
    pub repetitions: u32,
    /// Name filter: glob if it contains `*`, `?` or `[`, substring otherwise.
    pub filter: Option<String>,
}

impl RunOptions {
    /// Creates options with the given repetition count and no filter.
    pub fn new(repetitions: u32) -> Self {
        Self {
            repetitions,
            filter: None,
        }
    }

    /// Sets the name filter.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Rejects a zero repetition count.
    pub fn validate(&self) -> Result<()> {
        if self.repetitions == 0 {
            return Err(BenchError::invalid_config(
                "repetitions",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::new(DEFAULT_REPETITIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BenchConfig::default();
        assert_eq!(config.warmup, DEFAULT_WARMUP);
        assert_eq!(config.min_trial_time, DEFAULT_MIN_TRIAL_TIME);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = BenchConfig::default()
            .with_warmup(Duration::from_millis(5))
            .with_max_inner_iterations(64)
            .with_cv_warning_threshold(0.2);
        assert_eq!(config.warmup, Duration::from_millis(5));
        assert_eq!(config.max_inner_iterations, 64);
        assert_eq!(config.cv_warning_threshold, 0.2);
    }

    #[test]
    fn test_invalid_config() {
        assert!(BenchConfig::default()
            .with_min_trial_time(Duration::ZERO)
            .validate()
            .is_err());
        assert!(BenchConfig::default()
            .with_max_inner_iterations(0)
            .validate()
            .is_err());
        assert!(BenchConfig::default()
            .with_cv_warning_threshold(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_run_options() {
        let options = RunOptions::default();
        assert_eq!(options.repetitions, DEFAULT_REPETITIONS);
        assert!(options.validate().is_ok());

        let options = RunOptions::new(0).with_filter("dynamic");
        assert_eq!(options.filter.as_deref(), Some("dynamic"));
        assert!(matches!(
            options.validate(),
            Err(BenchError::InvalidConfiguration { ref parameter, .. }) if parameter == "repetitions"
        ));
    }
}
