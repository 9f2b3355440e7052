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

//! Hardware counter collection.
//!
//! Counters are read through the narrow [`CounterSource`] interface: open a
//! region, run the measured batch, close the region and get the cumulative
//! delta. Regions bracket all trials of one benchmark, so only the aggregate
//! over the run is reliable. Per-iteration figures are that aggregate divided
//! by the total number of passes and are labeled approximate in reports.
//!
//! Backends:
//!
//! - [`PerfCounters`]: Linux `perf_event_open` (cargo feature `perf`)
//! - [`UnavailableCounters`]: no facility; every region fails
//! - [`FixedCounters`]: returns a preset delta, for tests and dry runs

use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Add;
use tracing::debug;

#[cfg(all(target_os = "linux", feature = "perf"))]
pub use perf::PerfCounters;

/// Cumulative counter values over one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CounterDelta {
    /// CPU cycles.
    pub cycles: u64,
    /// Retired instructions.
    pub instructions: u64,
    /// Last-level cache misses.
    pub cache_misses: u64,
    /// Mispredicted branches.
    pub branch_misses: u64,
}

impl CounterDelta {
    /// Divides every counter by `iterations`.
    pub fn per_iteration(&self, iterations: u64) -> PerIterationCounters {
        let n = iterations.max(1) as f64;
        PerIterationCounters {
            cycles: self.cycles as f64 / n,
            instructions: self.instructions as f64 / n,
            cache_misses: self.cache_misses as f64 / n,
            branch_misses: self.branch_misses as f64 / n,
        }
    }

    /// Instructions per cycle, if any cycles were counted.
    pub fn instructions_per_cycle(&self) -> Option<f64> {
        (self.cycles > 0).then(|| self.instructions as f64 / self.cycles as f64)
    }
}

impl Add for CounterDelta {
    type Output = CounterDelta;

    fn add(self, rhs: CounterDelta) -> CounterDelta {
        CounterDelta {
            cycles: self.cycles.saturating_add(rhs.cycles),
            instructions: self.instructions.saturating_add(rhs.instructions),
            cache_misses: self.cache_misses.saturating_add(rhs.cache_misses),
            branch_misses: self.branch_misses.saturating_add(rhs.branch_misses),
        }
    }
}

/// Approximate counter values per `sum_area` pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerIterationCounters {
    /// Cycles per pass.
    pub cycles: f64,
    /// Instructions per pass.
    pub instructions: f64,
    /// Cache misses per pass.
    pub cache_misses: f64,
    /// Branch misses per pass.
    pub branch_misses: f64,
}

/// Token for an open counter region. Consumed when the region ends.
#[derive(Debug, PartialEq, Eq)]
pub struct RegionHandle {
    id: u64,
}

impl RegionHandle {
    /// Creates a handle with the given region id.
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    /// Region id.
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Access to a hardware counter facility.
pub trait CounterSource {
    /// Backend name shown in reports.
    fn name(&self) -> &str;

    /// Starts counting.
    fn begin_region(&mut self) -> Result<RegionHandle>;

    /// Stops counting and returns the delta since `begin_region`.
    fn end_region(&mut self, handle: RegionHandle) -> Result<CounterDelta>;
}

/// Keeps at most one region open and checks handles on close.
#[derive(Debug, Default)]
pub struct RegionTracker {
    next_id: u64,
    open: Option<u64>,
}

impl RegionTracker {
    /// Opens a region.
    pub fn begin(&mut self) -> Result<RegionHandle> {
        if let Some(id) = self.open {
            return Err(BenchError::CounterRegion(format!(
                "region {} is still open",
                id
            )));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.open = Some(id);
        Ok(RegionHandle::new(id))
    }

    /// Closes the region `handle` refers to.
    pub fn end(&mut self, handle: &RegionHandle) -> Result<()> {
        match self.open {
            Some(id) if id == handle.id => {
                self.open = None;
                Ok(())
            }
            Some(id) => Err(BenchError::CounterRegion(format!(
                "handle {} does not match open region {}",
                handle.id, id
            ))),
            None => Err(BenchError::CounterRegion(format!(
                "handle {} closed with no open region",
                handle.id
            ))),
        }
    }

    /// Opens a region, then runs `start`. If `start` fails the region is
    /// closed again, so the next `begin` is not blocked.
    pub fn begin_with<F>(&mut self, start: F) -> Result<RegionHandle>
    where
        F: FnOnce() -> Result<()>,
    {
        let handle = self.begin()?;
        if let Err(err) = start() {
            self.open = None;
            return Err(err);
        }
        Ok(handle)
    }

    /// Closes the region `handle` refers to, then runs `stop`. The region
    /// stays closed even if `stop` fails.
    pub fn end_with<T, F>(&mut self, handle: &RegionHandle, stop: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        self.end(handle)?;
        stop()
    }

    /// Whether a region is open.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }
}

/// Backend for platforms or permissions without counter access.
#[derive(Debug, Clone)]
pub struct UnavailableCounters {
    reason: String,
}

impl UnavailableCounters {
    /// Creates the backend with the reason reported for every region.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl CounterSource for UnavailableCounters {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn begin_region(&mut self) -> Result<RegionHandle> {
        Err(BenchError::counters_unavailable(self.reason.clone()))
    }

    fn end_region(&mut self, _handle: RegionHandle) -> Result<CounterDelta> {
        Err(BenchError::counters_unavailable(self.reason.clone()))
    }
}

/// Backend that reports the same delta for every region.
#[derive(Debug, Default)]
pub struct FixedCounters {
    delta: CounterDelta,
    tracker: RegionTracker,
    regions: u64,
}

impl FixedCounters {
    /// Creates the backend.
    pub fn new(delta: CounterDelta) -> Self {
        Self {
            delta,
            tracker: RegionTracker::default(),
            regions: 0,
        }
    }

    /// Number of regions closed so far.
    pub fn regions(&self) -> u64 {
        self.regions
    }
}

impl CounterSource for FixedCounters {
    fn name(&self) -> &str {
        "fixed"
    }

    fn begin_region(&mut self) -> Result<RegionHandle> {
        self.tracker.begin()
    }

    fn end_region(&mut self, handle: RegionHandle) -> Result<CounterDelta> {
        self.tracker.end(&handle)?;
        self.regions += 1;
        Ok(self.delta)
    }
}

/// Counter result attached to a benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CounterOutcome {
    /// Counters were read for the whole batch.
    Available {
        /// Cumulative delta over all trials.
        delta: CounterDelta,
    },
    /// Counters could not be read; timing results are still valid.
    Unavailable {
        /// Reason reported by the backend.
        reason: String,
    },
}

impl CounterOutcome {
    fn from_error(err: BenchError) -> Self {
        let reason = match err {
            BenchError::CountersUnavailable { reason } => reason,
            other => other.to_string(),
        };
        CounterOutcome::Unavailable { reason }
    }

    /// Whether counters were read.
    pub fn is_available(&self) -> bool {
        matches!(self, CounterOutcome::Available { .. })
    }

    /// The delta, if available.
    pub fn delta(&self) -> Option<CounterDelta> {
        match self {
            CounterOutcome::Available { delta } => Some(*delta),
            CounterOutcome::Unavailable { .. } => None,
        }
    }
}

/// Runs `f` inside a counter region.
///
/// Counter failures never abort `f`; they turn into
/// [`CounterOutcome::Unavailable`].
pub fn collect_counters<T, F>(source: &mut dyn CounterSource, f: F) -> (T, CounterOutcome)
where
    F: FnOnce() -> T,
{
    let handle = match source.begin_region() {
        Ok(handle) => handle,
        Err(err) => {
            debug!(source = source.name(), error = %err, "counter region not opened");
            return (f(), CounterOutcome::from_error(err));
        }
    };

    let output = f();

    let outcome = match source.end_region(handle) {
        Ok(delta) => CounterOutcome::Available { delta },
        Err(err) => {
            debug!(source = source.name(), error = %err, "counter region not closed cleanly");
            CounterOutcome::from_error(err)
        }
    };
    (output, outcome)
}

/// Picks the best backend for this build and platform.
#[cfg(all(target_os = "linux", feature = "perf"))]
pub fn default_source() -> Box<dyn CounterSource> {
    match PerfCounters::open() {
        Ok(counters) => Box::new(counters),
        Err(err) => {
            tracing::warn!(error = %err, "hardware counters unavailable, reporting timing only");
            Box::new(UnavailableCounters::new(err.to_string()))
        }
    }
}

/// Picks the best backend for this build and platform.
#[cfg(not(all(target_os = "linux", feature = "perf")))]
pub fn default_source() -> Box<dyn CounterSource> {
    Box::new(UnavailableCounters::new(
        "built without the `perf` feature or not running on Linux",
    ))
}

#[cfg(all(target_os = "linux", feature = "perf"))]
mod perf {
    use super::{CounterDelta, CounterSource, RegionHandle, RegionTracker};
    use crate::error::{BenchError, Result};
    use perf_event::events::Hardware;
    use perf_event::{Builder, Counter, Group};

    fn unavailable(err: std::io::Error) -> BenchError {
        BenchError::counters_unavailable(format!("perf_event_open: {}", err))
    }

    /// Counter group over cycles, instructions, cache and branch misses.
    pub struct PerfCounters {
        group: Group,
        cycles: Counter,
        instructions: Counter,
        cache_misses: Counter,
        branch_misses: Counter,
        tracker: RegionTracker,
    }

    impl PerfCounters {
        /// Opens the counter group for the calling process.
        ///
        /// Fails with [`BenchError::CountersUnavailable`] when the kernel
        /// refuses access (e.g. `perf_event_paranoid`) or the PMU is absent.
        pub fn open() -> Result<Self> {
            let mut group = Group::new().map_err(unavailable)?;
            let cycles = Builder::new()
                .group(&mut group)
                .kind(Hardware::CPU_CYCLES)
                .build()
                .map_err(unavailable)?;
            let instructions = Builder::new()
                .group(&mut group)
                .kind(Hardware::INSTRUCTIONS)
                .build()
                .map_err(unavailable)?;
            let cache_misses = Builder::new()
                .group(&mut group)
                .kind(Hardware::CACHE_MISSES)
                .build()
                .map_err(unavailable)?;
            let branch_misses = Builder::new()
                .group(&mut group)
                .kind(Hardware::BRANCH_MISSES)
                .build()
                .map_err(unavailable)?;

            Ok(Self {
                group,
                cycles,
                instructions,
                cache_misses,
                branch_misses,
                tracker: RegionTracker::default(),
            })
        }
    }

    impl CounterSource for PerfCounters {
        fn name(&self) -> &str {
            "perf_event"
        }

        fn begin_region(&mut self) -> Result<RegionHandle> {
            let group = &mut self.group;
            self.tracker.begin_with(|| {
                group.reset().map_err(unavailable)?;
                group.enable().map_err(unavailable)
            })
        }

        fn end_region(&mut self, handle: RegionHandle) -> Result<CounterDelta> {
            let group = &mut self.group;
            let (cycles, instructions) = (&self.cycles, &self.instructions);
            let (cache_misses, branch_misses) = (&self.cache_misses, &self.branch_misses);
            self.tracker.end_with(&handle, || {
                group.disable().map_err(unavailable)?;
                let counts = group.read().map_err(unavailable)?;
                Ok(CounterDelta {
                    cycles: counts[cycles],
                    instructions: counts[instructions],
                    cache_misses: counts[cache_misses],
                    branch_misses: counts[branch_misses],
                })
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta() -> CounterDelta {
        CounterDelta {
            cycles: 1_000,
            instructions: 2_500,
            cache_misses: 10,
            branch_misses: 40,
        }
    }

    #[test]
    fn test_per_iteration() {
        let per = delta().per_iteration(10);
        assert_eq!(per.cycles, 100.0);
        assert_eq!(per.instructions, 250.0);
        assert_eq!(per.cache_misses, 1.0);
        assert_eq!(per.branch_misses, 4.0);
        assert_eq!(delta().instructions_per_cycle(), Some(2.5));
        assert_eq!(CounterDelta::default().instructions_per_cycle(), None);
    }

    #[test]
    fn test_add_saturates() {
        let big = CounterDelta {
            cycles: u64::MAX,
            ..CounterDelta::default()
        };
        assert_eq!((big + delta()).cycles, u64::MAX);
        assert_eq!((delta() + delta()).instructions, 5_000);
    }

    #[test]
    fn test_region_tracker() {
        let mut tracker = RegionTracker::default();
        let first = tracker.begin().unwrap();
        assert!(tracker.is_open());
        assert!(tracker.begin().is_err());
        tracker.end(&first).unwrap();
        assert!(!tracker.is_open());
        assert!(tracker.end(&first).is_err());

        let second = tracker.begin().unwrap();
        assert_ne!(second.id(), first.id());
        assert!(tracker.end(&RegionHandle::new(99)).is_err());
    }

    #[test]
    fn test_collect_with_fixed_counters() {
        let mut source = FixedCounters::new(delta());
        let (value, outcome) = collect_counters(&mut source, || 7);
        assert_eq!(value, 7);
        assert_eq!(outcome.delta(), Some(delta()));
        assert_eq!(source.regions(), 1);
    }

    #[test]
    fn test_collect_with_unavailable_counters() {
        let mut source = UnavailableCounters::new("no PMU");
        let mut ran = false;
        let ((), outcome) = collect_counters(&mut source, || ran = true);
        assert!(ran);
        assert!(!outcome.is_available());
        assert_eq!(
            outcome,
            CounterOutcome::Unavailable {
                reason: "no PMU".to_string()
            }
        );
    }

    /// Backend whose start or stop step fails on request.
    #[derive(Default)]
    struct FlakyCounters {
        tracker: RegionTracker,
        fail_start: bool,
        fail_stop: bool,
    }

    impl CounterSource for FlakyCounters {
        fn name(&self) -> &str {
            "flaky"
        }

        fn begin_region(&mut self) -> Result<RegionHandle> {
            let fail = self.fail_start;
            self.tracker.begin_with(|| {
                if fail {
                    Err(BenchError::counters_unavailable("enable failed"))
                } else {
                    Ok(())
                }
            })
        }

        fn end_region(&mut self, handle: RegionHandle) -> Result<CounterDelta> {
            let fail = self.fail_stop;
            self.tracker.end_with(&handle, || {
                if fail {
                    Err(BenchError::counters_unavailable("disable failed"))
                } else {
                    Ok(delta())
                }
            })
        }
    }

    #[test]
    fn test_failed_start_does_not_leave_region_open() {
        let mut source = FlakyCounters {
            fail_start: true,
            ..FlakyCounters::default()
        };
        let (_, outcome) = collect_counters(&mut source, || ());
        assert_eq!(
            outcome,
            CounterOutcome::Unavailable {
                reason: "enable failed".to_string()
            }
        );
        assert!(!source.tracker.is_open());

        source.fail_start = false;
        let (_, outcome) = collect_counters(&mut source, || ());
        assert_eq!(outcome.delta(), Some(delta()));
    }

    #[test]
    fn test_failed_stop_does_not_leave_region_open() {
        let mut source = FlakyCounters {
            fail_stop: true,
            ..FlakyCounters::default()
        };
        let (_, outcome) = collect_counters(&mut source, || ());
        assert!(!outcome.is_available());
        assert!(!source.tracker.is_open());

        source.fail_stop = false;
        let (_, outcome) = collect_counters(&mut source, || ());
        assert_eq!(outcome.delta(), Some(delta()));
    }

    #[test]
    fn test_default_source_never_panics() {
        let mut source = default_source();
        let (value, outcome) = collect_counters(source.as_mut(), || 1 + 1);
        assert_eq!(value, 2);
        match outcome {
            CounterOutcome::Available { .. } => assert_eq!(source.name(), "perf_event"),
            CounterOutcome::Unavailable { reason } => assert!(!reason.is_empty()),
        }
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = CounterOutcome::Unavailable {
            reason: "absent".to_string(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"status\":\"unavailable\""));
    }
}
