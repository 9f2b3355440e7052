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

//! Negative tests for dispatch-bench error handling and robustness.
//!
//! Tests error paths for:
//! - Invalid run options and trial settings
//! - Rejected registrations (zero, oversized, duplicate)
//! - Unknown kind mixes and strategies
//! - Absent hardware counters
//!
//! All tests verify:
//! 1. Errors are returned (not panics)
//! 2. A bad unit never takes the rest of the run down with it

use dispatch_bench::{
    BenchConfig, BenchError, BenchmarkRegistry, BenchmarkReport, BenchmarkRunner, CounterDelta,
    CounterOutcome, FixedCounters, RunOptions, UnavailableCounters,
};
use dispatch_core::{
    CoreError, DatasetConfig, DispatchStrategy, KindMix, ShapeKind, ShapeValue, Square,
    MAX_DATASET_SIZE,
};
use std::time::Duration;

fn runner(sizes: &[usize], mixes: &[KindMix]) -> BenchmarkRunner {
    let mut registry = BenchmarkRegistry::new();
    registry.register_matrix(sizes, 42, mixes, DispatchStrategy::all());
    BenchmarkRunner::new(BenchConfig::quick(), registry)
}

// ============================================================================
// CATEGORY 1: Configuration Errors
// ============================================================================

#[test]
fn test_zero_repetitions_is_invalid_configuration() {
    let runner = runner(&[100], &[KindMix::AllSquares]);
    let mut counters = UnavailableCounters::new("absent");
    let err = runner.run(&RunOptions::new(0), &mut counters).unwrap_err();
    match err {
        BenchError::InvalidConfiguration { parameter, .. } => assert_eq!(parameter, "repetitions"),
        other => panic!("Expected InvalidConfiguration, got {:?}", other),
    }
}

#[test]
fn test_zero_min_trial_time_is_rejected() {
    let mut registry = BenchmarkRegistry::new();
    registry
        .register(
            "direct",
            DispatchStrategy::Direct,
            DatasetConfig::new(10, 1, KindMix::AllSquares),
        )
        .unwrap();
    let runner = BenchmarkRunner::new(
        BenchConfig::quick().with_min_trial_time(Duration::ZERO),
        registry,
    );
    let mut counters = UnavailableCounters::new("absent");
    assert!(matches!(
        runner.run(&RunOptions::new(1), &mut counters),
        Err(BenchError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_malformed_filter_is_rejected() {
    let runner = runner(&[100], &[KindMix::AllSquares]);
    let mut counters = UnavailableCounters::new("absent");
    let options = RunOptions::new(1).with_filter("[dynamic");
    assert!(matches!(
        runner.run(&options, &mut counters),
        Err(BenchError::InvalidConfiguration { .. })
    ));
}

// ============================================================================
// CATEGORY 2: Registration Errors
// ============================================================================

#[test]
fn test_zero_size_rejects_only_that_registration() {
    let mut registry = BenchmarkRegistry::new();
    let rejected = registry.register_matrix(
        &[0, 64],
        42,
        &[KindMix::UniformRandomMix],
        DispatchStrategy::all(),
    );
    assert_eq!(rejected.len(), 4);
    assert!(rejected
        .iter()
        .all(|(_, e)| matches!(e, BenchError::InvalidConfiguration { .. })));
    assert_eq!(registry.len(), 4);

    let runner = BenchmarkRunner::new(BenchConfig::quick(), registry);
    let mut counters = UnavailableCounters::new("absent");
    let summary = runner.run(&RunOptions::new(2), &mut counters).unwrap();
    assert_eq!(summary.results.len(), 4);
    assert!(summary.is_complete());
}

#[test]
fn test_oversized_dataset_is_rejected() {
    let mut registry = BenchmarkRegistry::new();
    let err = registry
        .register(
            "huge",
            DispatchStrategy::Dynamic,
            DatasetConfig::new(MAX_DATASET_SIZE + 1, 42, KindMix::AllSquares),
        )
        .unwrap_err();
    assert!(err.to_string().contains("size"));
}

#[test]
fn test_unknown_kind_mix_is_rejected() {
    let err = "circles".parse::<KindMix>().unwrap_err();
    assert!(matches!(err, CoreError::InvalidConfiguration { .. }));
    let err: BenchError = err.into();
    assert!(matches!(
        err,
        BenchError::InvalidConfiguration { ref parameter, .. } if parameter == "kind_mix"
    ));
}

#[test]
fn test_unknown_strategy_is_rejected() {
    assert!("jump-table".parse::<DispatchStrategy>().is_err());
}

#[test]
fn test_invalid_dimensions_are_rejected() {
    assert!(matches!(
        Square::new(0.0),
        Err(CoreError::InvalidDimension { .. })
    ));
    assert!(ShapeValue::triangle(-1.0, 2.0).is_err());
    assert!(ShapeValue::square(f64::NAN).is_err());
}

#[test]
fn test_type_mismatch_on_conversion() {
    let triangle = ShapeValue::triangle(2.0, 3.0).unwrap();
    let err = Square::try_from(triangle).unwrap_err();
    assert_eq!(
        err,
        CoreError::TypeMismatch {
            expected: ShapeKind::Square,
            found: ShapeKind::Triangle
        }
    );
}

// ============================================================================
// CATEGORY 3: Counter Facility
// ============================================================================

#[test]
fn test_counters_unavailable_still_produces_timing_results() {
    let runner = runner(&[256], KindMix::all());
    let mut counters = UnavailableCounters::new("simulated absence");
    let summary = runner.run(&RunOptions::new(3), &mut counters).unwrap();

    assert_eq!(summary.results.len(), 12);
    for result in &summary.results {
        assert!(matches!(result.counters, CounterOutcome::Unavailable { .. }));
        assert!(result.approx_counters_per_iteration().is_none());
        assert_eq!(result.statistics.count, 3);
        assert!(result.statistics.mean > 0.0);
        assert!(result.statistics.min <= result.statistics.median);
        assert!(result.statistics.median <= result.statistics.max);
    }

    let report = BenchmarkReport::from_summary("absent", &summary);
    assert!(!report.has_counters());
    assert!(report.notes.iter().any(|n| n.contains("simulated absence")));
}

#[test]
fn test_fixed_counters_divide_over_all_calls() {
    let runner = runner(&[128], &[KindMix::UniformRandomMix]);
    let delta = CounterDelta {
        cycles: 9_000,
        instructions: 18_000,
        cache_misses: 30,
        branch_misses: 3_000,
    };
    let mut counters = FixedCounters::new(delta);
    let summary = runner.run(&RunOptions::new(5), &mut counters).unwrap();

    for result in &summary.results {
        let calls = (result.inner_iterations * 5) as f64;
        let per = result.approx_counters_per_iteration().unwrap();
        assert!((per.branch_misses - 3_000.0 / calls).abs() < 1e-9);
        assert!((per.cycles - 9_000.0 / calls).abs() < 1e-9);
    }
}

// ============================================================================
// CATEGORY 4: Statistics Edge Cases
// ============================================================================

#[test]
fn test_single_repetition_has_zero_stddev() {
    let runner = runner(&[64], &[KindMix::AllTriangles]);
    let mut counters = UnavailableCounters::new("absent");
    let summary = runner.run(&RunOptions::new(1), &mut counters).unwrap();
    for result in &summary.results {
        assert_eq!(result.statistics.std_dev, 0.0);
        assert_eq!(result.statistics.min, result.statistics.max);
    }
}
