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

//! Dispatch Core
//!
//! The measured side of the dispatch-cost benchmarks: a small shape model,
//! four interchangeable ways of calling its `area` computation, seeded dataset
//! generation and the optimization barrier used inside measured loops.
//!
//! ## Usage
//!
//! ```
//! use dispatch_core::{
//!     cross_validate, Dataset, DatasetConfig, DispatchStrategy, KindMix, Workload,
//! };
//!
//! let config = DatasetConfig::new(1_000, 42, KindMix::UniformRandomMix);
//! let dataset = Dataset::generate(config).unwrap();
//! let workload = Workload::prepare(DispatchStrategy::Dynamic, &dataset).unwrap();
//! let total = workload.sum_area();
//! assert!(total > 0.0);
//! assert!(cross_validate(&dataset).unwrap().is_consistent());
//! ```

pub mod barrier;
pub mod dataset;
pub mod error;
pub mod shape;
pub mod strategy;

pub use barrier::{observe, BARRIER_NOTE};
pub use dataset::{Dataset, DatasetConfig, KindMix, DEFAULT_SEED};
pub use error::{CoreError, Result, MAX_DATASET_SIZE};
pub use shape::{ShapeKind, ShapeValue, Square, Triangle};
pub use strategy::{
    cross_validate, relative_error, CrossCheck, DispatchStrategy, KindGroups, Workload,
    SUM_TOLERANCE,
};
