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

//! Optimization barrier for measured loops.
//!
//! The measured `sum_area` result has no consumer, so an optimizing build is
//! free to delete the whole loop. [`observe`] hands the value to
//! [`std::hint::black_box`], which the compiler must treat as an opaque use.
//!
//! The barrier runs once per inner iteration on the running accumulator. It
//! neither allocates nor branches on the value. Because it sits inside the
//! timed loop it can keep the compiler from vectorizing across iterations;
//! that skew is a known artifact and every result carries
//! [`BARRIER_NOTE`] so reports state it.

/// Note attached to every benchmark result about the in-loop barrier.
pub const BARRIER_NOTE: &str =
    "optimization barrier runs inside the measured loop and may suppress auto-vectorization";

/// Marks `value` as observed so the computation producing it cannot be removed.
#[inline(always)]
pub fn observe<T>(value: T) -> T {
    std::hint::black_box(value)
}

/// Hides a reference from the optimizer so loads through it are not hoisted.
#[inline(always)]
pub fn opaque<T: ?Sized>(value: &T) -> &T {
    std::hint::black_box(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_is_identity() {
        assert_eq!(observe(42.5_f64), 42.5);
        assert_eq!(observe(0_u64), 0);
    }

    #[test]
    fn test_opaque_is_identity() {
        let data = vec![1.0, 2.0, 3.0];
        assert_eq!(opaque(&data[..]), &[1.0, 2.0, 3.0]);
    }
}
