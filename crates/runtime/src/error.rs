// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the inference runtime.

use fixed_core::FixedFormat;

/// Errors that can occur while configuring or driving the pipeline.
///
/// Everything except [`RuntimeError::InputLengthMismatch`] and
/// [`RuntimeError::PipelineClosed`] surfaces during initialization;
/// a prepared engine's evaluation path cannot fail beyond the input-size
/// check.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// The configured numeric format does not match the compiled scalar.
    #[error(
        "numeric format mismatch: configuration says {configured}, \
         this build evaluates in {compiled}"
    )]
    FormatMismatch {
        configured: FixedFormat,
        compiled: FixedFormat,
    },

    /// An input vector of the wrong length was offered for evaluation.
    #[error("input vector holds {actual} values, network expects {expected}")]
    InputLengthMismatch { expected: usize, actual: usize },

    /// The streaming pipeline has shut down and can accept no more work.
    #[error("streaming pipeline is closed")]
    PipelineClosed,

    /// Topology validation failed.
    #[error("topology error: {0}")]
    Topology(#[from] net_ir::TopologyError),

    /// Coefficient loading failed.
    #[error("coefficient error: {0}")]
    Coefficients(#[from] coeff_store::CoeffError),

    /// A fixed-point format or container error.
    #[error("numeric error: {0}")]
    FixedPoint(#[from] fixed_core::FixedPointError),
}
