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

//! Seeded dataset generation.
//!
//! Every benchmark configuration is described by a [`DatasetConfig`]. Two
//! datasets generated from the same config hold byte-identical dimension
//! sequences, which is what makes cross-strategy comparisons fair.

use crate::error::{CoreError, Result, MAX_DATASET_SIZE};
use crate::shape::{ShapeKind, ShapeValue};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower bound (inclusive) for generated dimensions.
pub const MIN_DIMENSION: f64 = 1.0;

/// Upper bound (exclusive) for generated dimensions.
pub const MAX_DIMENSION: f64 = 10.0;

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 42;

/// Which concrete kinds a dataset contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindMix {
    /// Squares only.
    AllSquares,
    /// Triangles only.
    AllTriangles,
    /// Fair coin per element from the seeded stream.
    UniformRandomMix,
}

impl KindMix {
    /// Short identifier used in benchmark names and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            KindMix::AllSquares => "squares",
            KindMix::AllTriangles => "triangles",
            KindMix::UniformRandomMix => "mixed",
        }
    }

    /// Returns all kind mixes.
    pub fn all() -> &'static [KindMix] {
        &[
            KindMix::AllSquares,
            KindMix::AllTriangles,
            KindMix::UniformRandomMix,
        ]
    }

    /// Whether the dataset holds a single concrete kind.
    pub fn is_homogeneous(&self) -> bool {
        !matches!(self, KindMix::UniformRandomMix)
    }
}

impl fmt::Display for KindMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for KindMix {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "squares" | "all-squares" | "all_squares" => Ok(KindMix::AllSquares),
            "triangles" | "all-triangles" | "all_triangles" => Ok(KindMix::AllTriangles),
            "mixed" | "mix" | "uniform" | "uniform-random-mix" | "uniform_random_mix" => {
                Ok(KindMix::UniformRandomMix)
            }
            other => Err(CoreError::invalid_config(
                "kind_mix",
                format!("unrecognized kind mix '{}' (expected squares, triangles or mixed)", other),
            )),
        }
    }
}

/// Parameters that fully determine a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Number of shapes.
    pub size: usize,
    /// Seed of the pseudo-random stream.
    pub seed: u64,
    /// Kind composition.
    pub kind_mix: KindMix,
}

impl DatasetConfig {
    /// Creates a configuration.
    pub fn new(size: usize, seed: u64, kind_mix: KindMix) -> Self {
        Self {
            size,
            seed,
            kind_mix,
        }
    }

    /// Rejects empty or oversized datasets.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(CoreError::invalid_config("size", "dataset size must be at least 1"));
        }
        if self.size > MAX_DATASET_SIZE {
            return Err(CoreError::invalid_config(
                "size",
                format!(
                    "dataset size {} exceeds maximum allowed limit of {}",
                    self.size, MAX_DATASET_SIZE
                ),
            ));
        }
        Ok(())
    }

    /// Human-readable label, e.g. `mixed/10000`.
    pub fn label(&self) -> String {
        format!("{}/{}", self.kind_mix, self.size)
    }
}

/// An immutable, ordered sequence of generated shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    config: DatasetConfig,
    shapes: Vec<ShapeValue>,
}

impl Dataset {
    /// Generates the dataset described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfiguration`] for a zero or oversized
    /// size.
    ///
    /// # Examples
    ///
    /// ```
    /// use dispatch_core::dataset::{Dataset, DatasetConfig, KindMix};
    ///
    /// let config = DatasetConfig::new(100, 42, KindMix::UniformRandomMix);
    /// let a = Dataset::generate(config).unwrap();
    /// let b = Dataset::generate(config).unwrap();
    /// assert_eq!(a.dimension_bytes(), b.dimension_bytes());
    /// ```
    pub fn generate(config: DatasetConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut shapes = Vec::with_capacity(config.size);

        for _ in 0..config.size {
            let kind = match config.kind_mix {
                KindMix::AllSquares => ShapeKind::Square,
                KindMix::AllTriangles => ShapeKind::Triangle,
                KindMix::UniformRandomMix => {
                    if rng.gen_bool(0.5) {
                        ShapeKind::Square
                    } else {
                        ShapeKind::Triangle
                    }
                }
            };

            let shape = match kind {
                ShapeKind::Square => {
                    ShapeValue::square(rng.gen_range(MIN_DIMENSION..MAX_DIMENSION))?
                }
                ShapeKind::Triangle => {
                    let base = rng.gen_range(MIN_DIMENSION..MAX_DIMENSION);
                    let height = rng.gen_range(MIN_DIMENSION..MAX_DIMENSION);
                    ShapeValue::triangle(base, height)?
                }
            };
            shapes.push(shape);
        }

        Ok(Self { config, shapes })
    }

    /// Builds a dataset from explicit values (mainly for tests).
    pub fn from_shapes(config: DatasetConfig, shapes: Vec<ShapeValue>) -> Result<Self> {
        if shapes.is_empty() {
            return Err(CoreError::invalid_config("size", "dataset size must be at least 1"));
        }
        Ok(Self {
            config: DatasetConfig {
                size: shapes.len(),
                ..config
            },
            shapes,
        })
    }

    /// Configuration this dataset was built from.
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// The shapes in generation order.
    pub fn shapes(&self) -> &[ShapeValue] {
        &self.shapes
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Always false for a generated dataset.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of shapes of the given kind.
    pub fn count_of(&self, kind: ShapeKind) -> usize {
        self.shapes.iter().filter(|s| s.kind() == kind).count()
    }

    /// Reference total computed straight off the tagged values.
    pub fn reference_area(&self) -> f64 {
        self.shapes.iter().map(ShapeValue::area).sum()
    }

    /// Little-endian byte image of every dimension, in order.
    pub fn dimension_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.shapes.len() * 16);
        for shape in &self.shapes {
            for dim in shape.dimensions() {
                bytes.extend_from_slice(&dim.to_le_bytes());
            }
        }
        bytes
    }
}
