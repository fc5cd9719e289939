// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for topology construction.

/// Errors detected while validating a topology.
///
/// Every variant is fatal at initialization time; none can occur during
/// evaluation, because evaluation only ever sees a validated topology.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    /// The topology contains no layers.
    #[error("topology '{0}' contains no layers")]
    Empty(String),

    /// Layer indices are not consecutive from zero.
    #[error("layer '{layer}': expected index {expected}, got {actual}")]
    BadIndex {
        layer: String,
        expected: usize,
        actual: usize,
    },

    /// A layer has a zero-sized input or output dimension.
    #[error("layer '{layer}' has a zero-sized dimension ({inputs}→{outputs})")]
    ZeroDimension {
        layer: String,
        inputs: usize,
        outputs: usize,
    },

    /// Adjacent layers disagree on the vector length flowing between them.
    #[error(
        "dimension mismatch: layer '{from}' produces {from_outputs} values \
         but layer '{to}' consumes {to_inputs}"
    )]
    DimensionMismatch {
        from: String,
        from_outputs: usize,
        to: String,
        to_inputs: usize,
    },

    /// A stage budget has zero units.
    #[error("layer '{layer}' has a stage with zero arithmetic units")]
    ZeroBudget { layer: String },
}
