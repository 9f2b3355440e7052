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

//! Markdown export for benchmark reports.

use crate::reporters::console::{format_cv, format_ns, format_ratio, NOT_AVAILABLE};
use crate::reporters::types::BenchmarkReport;
use std::fs;
use std::io;
use std::path::Path;

/// Renders the report as Markdown.
pub fn render_markdown(report: &BenchmarkReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", report.title));
    md.push_str(&format!("**Timestamp:** {}\n\n", report.timestamp));
    md.push_str(&format!("**Counters:** {}\n\n", report.counter_source));

    md.push_str("## Results\n\n");
    md.push_str("Times are per `sum_area` call. Counter columns are approximate per-call figures.\n\n");
    md.push_str("| Benchmark | Strategy | Mix | Size | Mean | Median | StdDev | CV | vs direct | Cycles | Instr | Cache misses | Branch misses |\n");
    md.push_str("|-----------|----------|-----|-----:|-----:|-------:|-------:|---:|----------:|-------:|------:|-------------:|--------------:|\n");

    for row in &report.rows {
        let counter = |value: Option<f64>| {
            value
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
            row.name,
            row.strategy,
            row.kind_mix,
            row.size,
            format_ns(row.mean_ns),
            format_ns(row.median_ns),
            format_ns(row.std_dev_ns),
            format_cv(row.cv),
            format_ratio(row.ratio_to_direct),
            counter(row.counters.map(|c| c.cycles)),
            counter(row.counters.map(|c| c.instructions)),
            counter(row.counters.map(|c| c.cache_misses)),
            counter(row.counters.map(|c| c.branch_misses)),
        ));
    }

    if report.rows.iter().any(|r| !r.warnings.is_empty()) {
        md.push_str("\n## Warnings\n\n");
        for row in &report.rows {
            for warning in &row.warnings {
                md.push_str(&format!("- **{}**: {}\n", row.name, warning));
            }
        }
    }

    if !report.failures.is_empty() {
        md.push_str("\n## Failures\n\n");
        for failure in &report.failures {
            md.push_str(&format!("- **{}**: {}\n", failure.name, failure.error));
        }
    }

    if !report.notes.is_empty() {
        md.push_str("\n## Notes\n\n");
        for note in &report.notes {
            md.push_str(&format!("- {}\n", note));
        }
    }

    md
}

/// Exports benchmark report as Markdown.
pub fn export_markdown(report: &BenchmarkReport, path: &Path) -> io::Result<()> {
    fs::write(path, render_markdown(report))
}
