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

//! Dispatch cost benchmark binary.
//!
//! # Usage
//!
//! ```bash
//! # Full grid with defaults
//! dispatch-bench run
//!
//! # One scenario, timing only, JSON export
//! dispatch-bench run --size 10000 --mix mixed --no-counters --json report.json
//!
//! # With debug logging
//! RUST_LOG=debug dispatch-bench run --size 1000
//! ```

use clap::Parser;
use dispatch_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Method dispatch cost benchmarks
///
/// Compares direct calls, trait objects, sealed trait objects and
/// monomorphized generics over collections of shapes.
#[derive(Parser)]
#[command(name = "dispatch-bench")]
#[command(author, version, about = "Method dispatch cost benchmarks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dispatch_bench=info,dispatch_cli=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
