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

//! Core benchmark infrastructure.
//!
//! Provides centralized configuration, measurement primitives and the
//! benchmark registry.
//!
//! # Modules
//!
//! - `config`: Trial settings and per-run options
//! - `measurement`: Timing of calibrated `sum_area` passes
//! - `registry`: Benchmark registration and name filtering

pub mod config;
pub mod measurement;
pub mod registry;

// Re-export commonly used types
pub use config::{
    BenchConfig, RunOptions, DEFAULT_CV_WARNING_THRESHOLD, DEFAULT_MIN_TRIAL_TIME,
    DEFAULT_REPETITIONS, DEFAULT_WARMUP, STANDARD_SIZES,
};
pub use measurement::{measure_trial, time_iterations, TrialSample};
pub use registry::{benchmark_name, BenchmarkInfo, BenchmarkRegistry, NameFilter};
