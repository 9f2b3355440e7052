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

//! Console reporter for benchmark results.
//!
//! Formats and prints benchmark reports to the console.

use crate::reporters::types::{BenchmarkReport, ReportRow};
use std::fmt::Write;

/// Placeholder for undefined or unavailable values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Formats nanoseconds with a readable unit.
pub fn format_ns(ns: f64) -> String {
    if ns >= 1_000_000_000.0 {
        format!("{:.2} s", ns / 1_000_000_000.0)
    } else if ns >= 1_000_000.0 {
        format!("{:.2} ms", ns / 1_000_000.0)
    } else if ns >= 1_000.0 {
        format!("{:.2} µs", ns / 1_000.0)
    } else {
        format!("{:.1} ns", ns)
    }
}

/// Formats a CV as a percentage, `N/A` when undefined.
pub fn format_cv(cv: Option<f64>) -> String {
    cv.map(|c| format!("{:.1}%", c * 100.0))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Formats a ratio to the baseline, `N/A` when there is none.
pub fn format_ratio(ratio: Option<f64>) -> String {
    ratio
        .map(|r| format!("{:.2}x", r))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn format_count(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn counter_cells(row: &ReportRow) -> [String; 4] {
    [
        format_count(row.counters.map(|c| c.cycles)),
        format_count(row.counters.map(|c| c.instructions)),
        format_count(row.counters.map(|c| c.cache_misses)),
        format_count(row.counters.map(|c| c.branch_misses)),
    ]
}

/// Renders the result table as plain text.
pub fn render_table(report: &BenchmarkReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<26} {:>11} {:>11} {:>11} {:>7} {:>9} {:>12} {:>12} {:>10} {:>11}",
        "Benchmark",
        "Mean",
        "Median",
        "StdDev",
        "CV",
        "vs direct",
        "Cycles",
        "Instr",
        "CacheMiss",
        "BranchMiss"
    );
    let _ = writeln!(out, "{}", "-".repeat(128));

    for row in &report.rows {
        let [cycles, instructions, cache_misses, branch_misses] = counter_cells(row);
        let _ = writeln!(
            out,
            "{:<26} {:>11} {:>11} {:>11} {:>7} {:>9} {:>12} {:>12} {:>10} {:>11}",
            row.name,
            format_ns(row.mean_ns),
            format_ns(row.median_ns),
            format_ns(row.std_dev_ns),
            format_cv(row.cv),
            format_ratio(row.ratio_to_direct),
            cycles,
            instructions,
            cache_misses,
            branch_misses
        );
    }
    out
}

/// Prints the full benchmark report to console.
pub fn print_report(report: &BenchmarkReport) {
    println!("\n{}", "=".repeat(80));
    println!("BENCHMARK REPORT: {}", report.title);
    println!("{}", "=".repeat(80));
    println!("Timestamp: {}", report.timestamp);
    println!("Counters: {}", report.counter_source);
    println!("Results: {}", report.result_count());
    println!("Times are per sum_area call; counters are per call (approximate).");

    println!("\n{}", render_table(report));

    let warned: Vec<&ReportRow> = report.rows.iter().filter(|r| !r.warnings.is_empty()).collect();
    if !warned.is_empty() {
        println!("{}", "-".repeat(80));
        println!("WARNINGS:");
        println!("{}", "-".repeat(80));
        for row in warned {
            for warning in &row.warnings {
                println!("  {}: {}", row.name, warning);
            }
        }
    }

    if !report.failures.is_empty() {
        println!("{}", "-".repeat(80));
        println!("FAILURES:");
        println!("{}", "-".repeat(80));
        for failure in &report.failures {
            println!("  {}: {}", failure.name, failure.error);
        }
    }

    if !report.notes.is_empty() {
        println!("\nNotes:");
        for note in &report.notes {
            println!("  - {}", note);
        }
    }

    println!("{}\n", "=".repeat(80));
}
