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

//! Error types for benchmark registration, execution and reporting.
//!
//! Configuration problems are raised before any trial runs and abort only the
//! registration they belong to. Missing hardware counters are recoverable: the
//! runner degrades to timing-only results instead of failing.

use crate::harness::runner::RunnerState;
use dispatch_core::CoreError;
use thiserror::Error;

/// Result type for benchmarking operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors that can occur during benchmarking operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BenchError {
    /// Shape or handle construction failed.
    #[error(transparent)]
    Core(CoreError),

    /// Invalid configuration parameter
    #[error("Invalid configuration parameter '{parameter}': {reason}")]
    InvalidConfiguration {
        /// Parameter name
        parameter: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The hardware counter facility is absent or not accessible.
    #[error("Hardware counters unavailable: {reason}")]
    CountersUnavailable {
        /// Reason reported by the counter backend
        reason: String,
    },

    /// Counter regions were opened or closed out of order.
    #[error("Counter region error: {0}")]
    CounterRegion(String),

    /// A benchmark with the same name was already registered.
    #[error("Benchmark '{name}' is already registered")]
    DuplicateBenchmark {
        /// Benchmark name
        name: String,
    },

    /// A strategy computed a different total than the reference.
    #[error("Cross-validation failed for '{name}': sum {actual} differs from reference {expected}")]
    CrossValidation {
        /// Benchmark name
        name: String,
        /// Reference total
        expected: f64,
        /// Total computed by the strategy
        actual: f64,
    },

    /// A trial runner was driven out of order.
    #[error("Invalid trial runner transition from {from} to {to}")]
    InvalidState {
        /// State the runner was in
        from: RunnerState,
        /// State that was requested
        to: RunnerState,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Report serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BenchError {
    /// Shorthand for [`BenchError::InvalidConfiguration`].
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        BenchError::InvalidConfiguration {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`BenchError::CountersUnavailable`].
    pub fn counters_unavailable(reason: impl Into<String>) -> Self {
        BenchError::CountersUnavailable {
            reason: reason.into(),
        }
    }

    /// Whether the error only affects counter columns.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BenchError::CountersUnavailable { .. })
    }
}

impl From<CoreError> for BenchError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidConfiguration { parameter, reason } => {
                BenchError::InvalidConfiguration { parameter, reason }
            }
            other => BenchError::Core(other),
        }
    }
}

impl From<std::io::Error> for BenchError {
    fn from(err: std::io::Error) -> Self {
        BenchError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::Serialization(err.to_string())
    }
}
