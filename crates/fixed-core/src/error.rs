// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for fixed-point construction and parsing.

use crate::FixedFormat;

/// Errors that can occur while parsing formats or building containers.
///
/// Arithmetic itself never fails: overflow saturates by contract.
#[derive(Debug, thiserror::Error)]
pub enum FixedPointError {
    /// The format string could not be parsed.
    #[error("unrecognized numeric format '{0}' — expected e.g. 'q16.16'")]
    InvalidFormat(String),

    /// The format parsed but does not fit the available storage.
    #[error("unsupported numeric format {format}: only 32-bit storage is available")]
    UnsupportedWidth { format: FixedFormat },

    /// The provided value list does not match the matrix dimensions.
    #[error("matrix data length mismatch: {rows}x{cols} needs {expected} values, got {actual}")]
    DataLengthMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },
}
