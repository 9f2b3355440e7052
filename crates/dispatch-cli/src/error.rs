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

//! Structured error types for the dispatch CLI.
//!
//! All command handlers return `Result<T, CliError>`; `main` prints the
//! message as `Error: <message>` and exits with a failure code.

use dispatch_bench::BenchError;
use dispatch_core::{CoreError, KindMix};
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for dispatch CLI operations.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// Harness error: configuration, counters, cross-validation.
    #[error(transparent)]
    Bench(#[from] BenchError),

    /// Writing an export file failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// Output path
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Arguments were well-formed but select nothing usable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Some benchmarks could not be measured.
    #[error("{failed} of {total} benchmarks failed")]
    BenchmarksFailed {
        /// Failed benchmarks
        failed: usize,
        /// Selected benchmarks
        total: usize,
    },

    /// Strategies disagree on the total area.
    #[error("Strategies disagree on {mix}/{size}: max relative error {max_relative_error:e}")]
    VerificationFailed {
        /// Kind mix of the dataset
        mix: KindMix,
        /// Dataset size
        size: usize,
        /// Largest deviation from the reference
        max_relative_error: f64,
    },
}

impl CliError {
    /// Creates an I/O error for `path`.
    pub fn io_error(path: impl Into<PathBuf>, source: impl std::fmt::Display) -> Self {
        CliError::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates an invalid-input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        CliError::InvalidInput(msg.into())
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::Bench(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bench_error_is_transparent() {
        let err: CliError = BenchError::invalid_config("repetitions", "must be at least 1").into();
        assert_eq!(
            err.to_string(),
            "Invalid configuration parameter 'repetitions': must be at least 1"
        );
    }

    #[test]
    fn test_core_error_converts() {
        let err: CliError = CoreError::invalid_config("size", "zero").into();
        assert!(matches!(
            err,
            CliError::Bench(BenchError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_io_error_display() {
        let err = CliError::io_error("out.json", "permission denied");
        let msg = err.to_string();
        assert!(msg.contains("out.json"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_failure_counts() {
        let err = CliError::BenchmarksFailed { failed: 2, total: 12 };
        assert_eq!(err.to_string(), "2 of 12 benchmarks failed");
    }
}
