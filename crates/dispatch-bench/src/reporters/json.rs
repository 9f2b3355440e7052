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

//! JSON export for benchmark reports.

use crate::error::Result;
use crate::reporters::types::BenchmarkReport;
use std::fs;
use std::path::Path;

/// Serializes the report as pretty-printed JSON.
pub fn render_json(report: &BenchmarkReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Exports benchmark report as JSON.
pub fn export_json(report: &BenchmarkReport, path: &Path) -> Result<()> {
    fs::write(path, render_json(report)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::types::tests::sample_summary;
    use tempfile::NamedTempFile;

    #[test]
    fn test_export_json() {
        let report = BenchmarkReport::from_summary("Dispatch", &sample_summary(true));
        let temp = NamedTempFile::new().unwrap();

        export_json(&report, temp.path()).unwrap();

        let content = fs::read_to_string(temp.path()).unwrap();
        let parsed: BenchmarkReport = serde_json::from_str(&content).unwrap();
        let names: Vec<&str> = parsed.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["direct/mixed/1000", "dynamic/mixed/1000"]);
        assert_eq!(parsed.rows[1].counters.unwrap().branch_misses, 500.0);
        assert_eq!(parsed.failures.len(), 1);
    }

    #[test]
    fn test_undefined_cv_serializes_as_null() {
        let mut report = BenchmarkReport::from_summary("Dispatch", &sample_summary(false));
        report.rows[0].cv = None;
        let json = render_json(&report).unwrap();
        assert!(json.contains("\"cv\": null"));
        assert!(json.contains("\"strategy\": \"direct\""));
    }
}
