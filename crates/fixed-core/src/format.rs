// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Numeric format descriptors.

use crate::FixedPointError;
use std::fmt;

/// Describes a Q-format fixed-point layout: total storage width and the
/// number of fractional bits. The integer field (sign included) occupies
/// the remaining `total_bits - frac_bits` bits.
///
/// Configuration carries formats as strings like `"q16.16"` (integer
/// bits, then fractional bits); [`FixedFormat::parse`] turns them back
/// into a descriptor so the engine can assert that the configured format
/// matches the compiled scalar.
///
/// # Examples
/// ```
/// use fixed_core::{FixedFormat, Fx};
///
/// let f = FixedFormat::parse("q16.16").unwrap();
/// assert_eq!(f, Fx::format());
/// assert_eq!(f.to_string(), "q16.16");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FixedFormat {
    /// Total storage width in bits.
    pub total_bits: u32,
    /// Bits below the binary point.
    pub frac_bits: u32,
}

impl FixedFormat {
    /// Integer bits, sign included.
    pub fn int_bits(&self) -> u32 {
        self.total_bits - self.frac_bits
    }

    /// Parses a `"q<int>.<frac>"` format string (case-insensitive).
    ///
    /// Only 32-bit storage is supported; anything else is rejected so a
    /// mis-configured width fails at startup instead of silently
    /// evaluating in the wrong quantization.
    pub fn parse(s: &str) -> Result<Self, FixedPointError> {
        let body = s
            .trim()
            .strip_prefix(['q', 'Q'])
            .ok_or_else(|| FixedPointError::InvalidFormat(s.to_string()))?;
        let (int_str, frac_str) = body
            .split_once('.')
            .ok_or_else(|| FixedPointError::InvalidFormat(s.to_string()))?;
        let int_bits: u32 = int_str
            .parse()
            .map_err(|_| FixedPointError::InvalidFormat(s.to_string()))?;
        let frac_bits: u32 = frac_str
            .parse()
            .map_err(|_| FixedPointError::InvalidFormat(s.to_string()))?;

        if int_bits == 0 || frac_bits == 0 {
            return Err(FixedPointError::InvalidFormat(s.to_string()));
        }
        let format = Self {
            total_bits: int_bits + frac_bits,
            frac_bits,
        };
        if format.total_bits != 32 {
            return Err(FixedPointError::UnsupportedWidth { format });
        }
        Ok(format)
    }
}

impl fmt::Display for FixedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}.{}", self.int_bits(), self.frac_bits)
    }
}
