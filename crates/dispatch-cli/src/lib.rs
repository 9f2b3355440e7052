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

//! Dispatch CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **run**: measure the strategy x kind-mix x size grid and report it as a
//!   console table, JSON or Markdown
//! - **verify**: cross-validate the total area computed by every strategy
//!
//! # Examples
//!
//! ```no_run
//! use clap::Parser;
//! use dispatch_cli::cli::Commands;
//!
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(subcommand)]
//!     command: Commands,
//! }
//!
//! let cli = Cli::parse_from(["dispatch-bench", "verify", "--size", "1000"]);
//! cli.command.execute().unwrap();
//! ```

pub mod cli;
pub mod commands;
pub mod error;

pub use error::CliError;
