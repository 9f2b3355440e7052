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

//! `run` command.

use crate::cli::RunArgs;
use crate::error::CliError;
use dispatch_bench::{
    default_source, export_json, export_markdown, print_report, BenchmarkRegistry,
    BenchmarkReport, BenchmarkRunner, CounterSource, RunSummary, UnavailableCounters,
};
use tracing::{info, warn};

/// Registers the requested grid, runs it and emits the report.
pub fn run(args: &RunArgs) -> Result<(), CliError> {
    let (summary, report) = run_report(args)?;

    if !args.quiet {
        print_report(&report);
    }
    if let Some(path) = &args.json {
        export_json(&report, path).map_err(|e| CliError::io_error(path, e))?;
        info!(path = %path.display(), "wrote JSON report");
    }
    if let Some(path) = &args.markdown {
        export_markdown(&report, path).map_err(|e| CliError::io_error(path, e))?;
        info!(path = %path.display(), "wrote Markdown report");
    }

    if !summary.is_complete() {
        return Err(CliError::BenchmarksFailed {
            failed: summary.failures.len(),
            total: summary.failures.len() + summary.results.len(),
        });
    }
    Ok(())
}

/// Runs the benchmarks and builds the report without printing anything.
///
/// Rejected registrations are reported as failures next to the results of
/// the accepted ones.
pub fn run_report(args: &RunArgs) -> Result<(RunSummary, BenchmarkReport), CliError> {
    let mut registry = BenchmarkRegistry::new();
    let rejected =
        registry.register_matrix(&args.sizes(), args.seed, &args.mixes(), &args.strategies());
    if !rejected.is_empty() {
        warn!(
            rejected = rejected.len(),
            registered = registry.len(),
            "some benchmarks were rejected at registration"
        );
    }

    let runner = BenchmarkRunner::new(args.bench_config(), registry);
    let mut counters: Box<dyn CounterSource> = if args.no_counters {
        Box::new(UnavailableCounters::new("disabled with --no-counters"))
    } else {
        default_source()
    };

    let summary = runner.run(&args.run_options(), counters.as_mut())?;
    if summary.results.is_empty() && summary.failures.is_empty() {
        return Err(CliError::invalid_input(format!(
            "filter '{}' matched no benchmarks",
            args.filter.as_deref().unwrap_or_default()
        )));
    }

    let report = BenchmarkReport::from_summary("Method dispatch cost", &summary);
    Ok((summary, report))
}
