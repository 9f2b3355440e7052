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

//! `verify` command.

use crate::cli::VerifyArgs;
use crate::error::CliError;
use dispatch_core::{cross_validate, Dataset, DatasetConfig, KindMix};
use tracing::debug;

/// Cross-validates every strategy on every kind mix.
///
/// Prints one block per kind mix; fails on the first disagreement after all
/// mixes have been printed.
pub fn verify(args: &VerifyArgs) -> Result<(), CliError> {
    let mut failure = None;

    for &mix in KindMix::all() {
        let dataset = Dataset::generate(DatasetConfig::new(args.size, args.seed, mix))?;
        let check = cross_validate(&dataset)?;
        debug!(mix = %mix, reference = check.reference, "cross-validated");

        let status = if check.is_consistent() { "ok" } else { "MISMATCH" };
        println!(
            "{}/{} (seed {}): reference {:.6}, max relative error {:.3e} [{}]",
            mix, args.size, args.seed, check.reference, check.max_relative_error, status
        );
        for (strategy, sum) in &check.sums {
            println!("  {:<8} {:.6}", strategy.id(), sum);
        }

        if !check.is_consistent() && failure.is_none() {
            failure = Some(CliError::VerificationFailed {
                mix,
                size: args.size,
                max_relative_error: check.max_relative_error,
            });
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
