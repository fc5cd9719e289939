// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for coefficient loading.

/// Errors detected while building a coefficient store.
///
/// All variants are fatal at initialization; no evaluation may proceed
/// with a partially loaded store.
#[derive(Debug, thiserror::Error)]
pub enum CoeffError {
    /// The number of flat tables does not match the number of layers.
    #[error("coefficient tables supplied for {actual} layers, topology has {expected}")]
    LayerCountMismatch { expected: usize, actual: usize },

    /// A layer's flat table has the wrong number of values.
    #[error("layer '{layer}': flat table holds {actual} values, expected {expected}")]
    TableLengthMismatch {
        layer: String,
        expected: usize,
        actual: usize,
    },

    /// A fixed-point container rejected the data.
    #[error("fixed-point error: {0}")]
    FixedPoint(#[from] fixed_core::FixedPointError),
}
