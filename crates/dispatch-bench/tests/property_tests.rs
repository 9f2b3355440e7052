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

//! Property-based tests for the statistics aggregator and counter math.

use dispatch_bench::harness::aggregator::{compute_statistics, summarize};
use dispatch_bench::{CounterDelta, TrialSample};
use proptest::prelude::*;
use std::time::Duration;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Median always lies between min and max.
    #[test]
    fn prop_median_within_bounds(values in prop::collection::vec(0.0f64..1e9, 1..200)) {
        let stats = compute_statistics(&values);
        prop_assert!(stats.min <= stats.median);
        prop_assert!(stats.median <= stats.max);
        prop_assert!(stats.min <= stats.mean + 1e-6 * stats.mean.abs().max(1.0));
        prop_assert!(stats.mean <= stats.max + 1e-6 * stats.max.abs().max(1.0));
    }

    /// Standard deviation and CV are never negative.
    #[test]
    fn prop_dispersion_non_negative(values in prop::collection::vec(0.0f64..1e9, 1..200)) {
        let stats = compute_statistics(&values);
        prop_assert!(stats.std_dev >= 0.0);
        if let Some(cv) = stats.cv {
            prop_assert!(cv >= 0.0);
        } else {
            prop_assert_eq!(stats.mean, 0.0);
        }
    }

    /// Input order does not matter.
    #[test]
    fn prop_order_independent(mut values in prop::collection::vec(1.0f64..1e6, 1..100)) {
        let forward = compute_statistics(&values);
        values.reverse();
        let backward = compute_statistics(&values);
        prop_assert_eq!(forward.median, backward.median);
        prop_assert_eq!(forward.min, backward.min);
        prop_assert_eq!(forward.max, backward.max);
    }

    /// Identical samples have no spread.
    #[test]
    fn prop_constant_samples(value in 1.0f64..1e6, count in 1usize..50) {
        let stats = compute_statistics(&vec![value; count]);
        prop_assert_eq!(stats.median, value);
        prop_assert!(stats.std_dev.abs() <= 1e-9 * value);
        prop_assert_eq!(stats.count, count);
    }

    /// Per-trial samples reduce to per-call times.
    #[test]
    fn prop_summarize_per_call(
        nanos in prop::collection::vec(1u64..10_000_000, 1..50),
        iterations in 1u64..10_000,
    ) {
        let samples: Vec<TrialSample> = nanos
            .iter()
            .map(|&n| TrialSample::new(Duration::from_nanos(n), iterations))
            .collect();
        let stats = summarize(&samples);
        let slowest = *nanos.iter().max().unwrap() as f64 / iterations as f64;
        prop_assert!((stats.max - slowest).abs() <= 1e-9 * slowest.max(1.0));
    }

    /// Per-call counters scale back to the total.
    #[test]
    fn prop_counter_division(branch_misses in 0u64..1_000_000_000, calls in 1u64..1_000_000) {
        let delta = CounterDelta { branch_misses, ..CounterDelta::default() };
        let per = delta.per_iteration(calls);
        let rebuilt = per.branch_misses * calls as f64;
        let tolerance = 1e-6 * (branch_misses as f64).max(1.0);
        prop_assert!((rebuilt - branch_misses as f64).abs() <= tolerance);
    }
}

#[test]
fn test_zero_mean_reports_no_cv() {
    let stats = compute_statistics(&[0.0; 5]);
    assert_eq!(stats.cv, None);
    assert_eq!(stats.std_dev, 0.0);
}
