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

//! CLI command definitions and argument parsing.
//!
//! - `run`: register the strategy x kind-mix x size grid, measure, report
//! - `verify`: cross-validate every strategy's total area

use crate::commands;
use crate::error::CliError;
use clap::{Args, Subcommand};
use dispatch_bench::{BenchConfig, RunOptions, DEFAULT_REPETITIONS};
use dispatch_core::{DispatchStrategy, KindMix, DEFAULT_SEED};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Measure dispatch strategies and print a comparison table
    ///
    /// Registers one benchmark per strategy, kind mix and size, runs them
    /// sequentially and reports mean, median, CV, ratio to the direct
    /// baseline and approximate hardware counters per call.
    Run(RunArgs),

    /// Check that every strategy computes the same total area
    ///
    /// Exits with a failure code if any strategy deviates from the
    /// reference sum by more than the relative tolerance.
    Verify(VerifyArgs),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Configuration errors, export failures, failed benchmarks or a failed
    /// cross-validation.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Run(args) => commands::run(&args),
            Commands::Verify(args) => commands::verify(&args),
        }
    }
}

/// Arguments of `run`.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Dataset size (repeatable; defaults to 1000, 10000 and 100000)
    #[arg(long = "size", value_name = "N")]
    pub sizes: Vec<usize>,

    /// Seed of the dataset generator
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Kind mix: squares, triangles or mixed (repeatable; defaults to all)
    #[arg(long = "mix", value_name = "MIX")]
    pub mixes: Vec<KindMix>,

    /// Strategy: direct, dynamic, sealed or static (repeatable; defaults to all)
    #[arg(long = "strategy", value_name = "STRATEGY")]
    pub strategies: Vec<DispatchStrategy>,

    /// Outer trials per benchmark
    #[arg(short, long, default_value_t = DEFAULT_REPETITIONS)]
    pub repetitions: u32,

    /// Only run benchmarks whose name matches (glob or substring)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Minimum wall time of one calibrated trial, in milliseconds
    #[arg(long, default_value_t = 10)]
    pub min_trial_ms: u64,

    /// Warmup duration per benchmark, in milliseconds
    #[arg(long, default_value_t = 100)]
    pub warmup_ms: u64,

    /// Upper bound for calibrated inner iterations
    #[arg(long)]
    pub max_iterations: Option<u64>,

    /// CV above which a result is flagged as noisy
    #[arg(long)]
    pub cv_threshold: Option<f64>,

    /// Report timing only, without touching hardware counters
    #[arg(long)]
    pub no_counters: bool,

    /// Write the report as JSON
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Write the report as Markdown
    #[arg(long, value_name = "FILE")]
    pub markdown: Option<PathBuf>,

    /// Do not print the console table
    #[arg(short, long)]
    pub quiet: bool,
}

impl RunArgs {
    /// Sizes to register.
    pub fn sizes(&self) -> Vec<usize> {
        if self.sizes.is_empty() {
            dispatch_bench::STANDARD_SIZES.to_vec()
        } else {
            self.sizes.clone()
        }
    }

    /// Kind mixes to register.
    pub fn mixes(&self) -> Vec<KindMix> {
        if self.mixes.is_empty() {
            KindMix::all().to_vec()
        } else {
            self.mixes.clone()
        }
    }

    /// Strategies to register, `Direct` always first so baselines exist.
    pub fn strategies(&self) -> Vec<DispatchStrategy> {
        if self.strategies.is_empty() {
            return DispatchStrategy::all().to_vec();
        }
        let mut strategies = self.strategies.clone();
        strategies.sort();
        strategies.dedup();
        strategies
    }

    /// Trial settings.
    pub fn bench_config(&self) -> BenchConfig {
        let mut config = BenchConfig::default()
            .with_warmup(Duration::from_millis(self.warmup_ms))
            .with_min_trial_time(Duration::from_millis(self.min_trial_ms));
        if let Some(max) = self.max_iterations {
            config = config.with_max_inner_iterations(max);
        }
        if let Some(threshold) = self.cv_threshold {
            config = config.with_cv_warning_threshold(threshold);
        }
        config
    }

    /// Per-run options.
    pub fn run_options(&self) -> RunOptions {
        let options = RunOptions::new(self.repetitions);
        match &self.filter {
            Some(filter) => options.with_filter(filter.clone()),
            None => options,
        }
    }
}

/// Arguments of `verify`.
#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    /// Dataset size
    #[arg(long, default_value_t = 10_000)]
    pub size: usize,

    /// Seed of the dataset generator
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    fn parse_run(args: &[&str]) -> RunArgs {
        let mut argv = vec!["dispatch-bench", "run"];
        argv.extend_from_slice(args);
        match TestCli::parse_from(argv).command {
            Commands::Run(args) => args,
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn test_run_defaults() {
        let args = parse_run(&[]);
        assert_eq!(args.sizes(), vec![1_000, 10_000, 100_000]);
        assert_eq!(args.mixes().len(), 3);
        assert_eq!(args.strategies().len(), 4);
        assert_eq!(args.repetitions, DEFAULT_REPETITIONS);
        assert_eq!(args.seed, DEFAULT_SEED);
        assert_eq!(args.bench_config(), BenchConfig::default());
    }

    #[test]
    fn test_run_repeated_flags() {
        let args = parse_run(&[
            "--size", "100", "--size", "200", "--mix", "mixed", "--strategy", "dynamic",
            "--strategy", "direct", "--strategy", "dynamic",
        ]);
        assert_eq!(args.sizes(), vec![100, 200]);
        assert_eq!(args.mixes(), vec![KindMix::UniformRandomMix]);
        assert_eq!(
            args.strategies(),
            vec![DispatchStrategy::Direct, DispatchStrategy::Dynamic]
        );
    }

    #[test]
    fn test_run_settings() {
        let args = parse_run(&[
            "--min-trial-ms", "2", "--warmup-ms", "0", "--max-iterations", "64",
            "--cv-threshold", "0.2", "-r", "7", "-f", "*/mixed/*",
        ]);
        let config = args.bench_config();
        assert_eq!(config.min_trial_time, Duration::from_millis(2));
        assert_eq!(config.warmup, Duration::ZERO);
        assert_eq!(config.max_inner_iterations, 64);
        assert_eq!(config.cv_warning_threshold, 0.2);
        let options = args.run_options();
        assert_eq!(options.repetitions, 7);
        assert_eq!(options.filter.as_deref(), Some("*/mixed/*"));
    }

    #[test]
    fn test_unknown_mix_is_a_parse_error() {
        let result = TestCli::try_parse_from(["dispatch-bench", "run", "--mix", "hexagons"]);
        assert!(result.is_err());
    }
}
