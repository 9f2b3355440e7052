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

//! Error types for the shape model and dataset generation.

use crate::shape::ShapeKind;
use thiserror::Error;

/// Maximum number of shapes in a single dataset (10 million).
///
/// Keeps a mistyped `--size` from exhausting memory before a trial starts.
pub const MAX_DATASET_SIZE: usize = 10_000_000;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while building shapes, handles and datasets.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A shape dimension was zero, negative or not finite.
    #[error("invalid dimension '{field}' = {value}: dimensions must be finite and strictly positive")]
    InvalidDimension {
        /// Name of the offending dimension (`side`, `base`, `height`).
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A handle was bound for one kind over a value of another kind.
    #[error("type mismatch: handle declared for {expected} but value is a {found}")]
    TypeMismatch {
        /// Kind the handle was declared for.
        expected: ShapeKind,
        /// Kind of the value actually supplied.
        found: ShapeKind,
    },

    /// Dataset configuration rejected before generation.
    #[error("invalid configuration '{parameter}': {reason}")]
    InvalidConfiguration {
        /// Parameter name.
        parameter: String,
        /// Reason for invalidity.
        reason: String,
    },
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidConfiguration`].
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidDimension {
            field: "side",
            value: -1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("side"));
        assert!(msg.contains("-1"));

        let err = CoreError::TypeMismatch {
            expected: ShapeKind::Square,
            found: ShapeKind::Triangle,
        };
        let msg = err.to_string();
        assert!(msg.contains("square"));
        assert!(msg.contains("triangle"));
    }

    #[test]
    fn test_invalid_config_helper() {
        let err = CoreError::invalid_config("size", "must be positive");
        assert_eq!(
            err,
            CoreError::InvalidConfiguration {
                parameter: "size".to_string(),
                reason: "must be positive".to_string(),
            }
        );
    }
}
