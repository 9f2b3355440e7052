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

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn dispatch_cmd() -> Command {
    Command::cargo_bin("dispatch-bench").expect("Failed to find dispatch-bench binary")
}

/// Small, fast run settings shared by the `run` tests.
const QUICK: &[&str] = &[
    "run",
    "--size",
    "256",
    "--repetitions",
    "3",
    "--min-trial-ms",
    "1",
    "--warmup-ms",
    "1",
    "--max-iterations",
    "256",
    "--no-counters",
];

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    dispatch_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Method dispatch cost benchmarks"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_output() {
    dispatch_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dispatch-bench"));
}

#[test]
fn test_no_subcommand_fails() {
    dispatch_cmd().assert().failure();
}

// ===== Run Command Tests =====

#[test]
fn test_run_prints_table() {
    dispatch_cmd()
        .args(QUICK)
        .args(["--mix", "squares"])
        .assert()
        .success()
        .stdout(predicate::str::contains("direct/squares/256"))
        .stdout(predicate::str::contains("dynamic/squares/256"))
        .stdout(predicate::str::contains("sealed/squares/256"))
        .stdout(predicate::str::contains("static/squares/256"))
        .stdout(predicate::str::contains("N/A"));
}

#[test]
fn test_run_with_filter() {
    dispatch_cmd()
        .args(QUICK)
        .args(["--filter", "*/mixed/*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dynamic/mixed/256"))
        .stdout(predicate::str::contains("dynamic/squares/256").not());
}

#[test]
fn test_run_zero_repetitions_fails() {
    dispatch_cmd()
        .args([
            "run",
            "--size",
            "64",
            "--repetitions",
            "0",
            "--no-counters",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("repetitions"));
}

#[test]
fn test_run_zero_size_fails() {
    dispatch_cmd()
        .args(["run", "--size", "0", "--no-counters"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAILURES:"))
        .stdout(predicate::str::contains("dataset size must be at least 1"))
        .stderr(predicate::str::contains("Error: 12 of 12 benchmarks failed"));
}

#[test]
fn test_run_rejected_size_does_not_block_others() {
    dispatch_cmd()
        .args([
            "run",
            "--size",
            "0",
            "--size",
            "64",
            "--strategy",
            "direct",
            "--mix",
            "squares",
            "--repetitions",
            "2",
            "--min-trial-ms",
            "1",
            "--warmup-ms",
            "1",
            "--max-iterations",
            "64",
            "--no-counters",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("direct/squares/64"))
        .stdout(predicate::str::contains("FAILURES:"))
        .stdout(predicate::str::contains("direct/squares/0: "))
        .stderr(predicate::str::contains("Error: 1 of 2 benchmarks failed"));
}

#[test]
fn test_run_unknown_mix_fails() {
    dispatch_cmd()
        .args(["run", "--mix", "hexagons"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hexagons"));
}

#[test]
fn test_run_filter_matching_nothing_fails() {
    dispatch_cmd()
        .args(QUICK)
        .args(["--filter", "no-such-benchmark"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("matched no benchmarks"));
}

#[test]
fn test_run_exports() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("report.json");
    let markdown = dir.path().join("report.md");

    dispatch_cmd()
        .args(QUICK)
        .args(["--mix", "mixed", "--strategy", "dynamic", "--quiet"])
        .arg("--json")
        .arg(&json)
        .arg("--markdown")
        .arg(&markdown)
        .assert()
        .success();

    let content = fs::read_to_string(&json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    let rows = value["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "dynamic/mixed/256");
    assert!(rows[0]["counters"].is_null());

    let md = fs::read_to_string(&markdown).unwrap();
    assert!(md.contains("| dynamic/mixed/256 |"));
    assert!(md.contains("## Notes"));
}

// ===== Verify Command Tests =====

#[test]
fn test_verify_succeeds() {
    dispatch_cmd()
        .args(["verify", "--size", "1000", "--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("squares/1000"))
        .stdout(predicate::str::contains("triangles/1000"))
        .stdout(predicate::str::contains("mixed/1000"))
        .stdout(predicate::str::contains("[ok]"))
        .stdout(predicate::str::contains("MISMATCH").not());
}

#[test]
fn test_verify_zero_size_fails() {
    dispatch_cmd()
        .args(["verify", "--size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("size"));
}
