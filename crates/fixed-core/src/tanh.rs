// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Lookup-table hyperbolic tangent (tansig).
//!
//! The nonlinearity mirrors a ROM-backed hardware realization:
//!
//! 1. The input saturates to the LUT input format, Q3.9 — range
//!    `[-4.0, 4.0 - 2^-9]`. Beyond ±4, tanh is within one output LSB of
//!    ±1, so clamping there loses nothing.
//! 2. The saturated value's 12-bit two's-complement pattern is the table
//!    address (4096 entries).
//! 3. Entries hold tanh of the quantized input in Q8.24 and are narrowed
//!    to the caller's format by truncation.
//!
//! The table is computed once on first use and cached for the process
//! lifetime. Every step is integer-exact, so the function is pure, total,
//! and has input-independent cost.

use crate::Fixed;
use std::sync::OnceLock;

/// LUT input format: 12 bits, 3 integer (sign included), 9 fractional.
const LUT_INPUT_BITS: u32 = 12;
const LUT_INPUT_FRAC: u32 = 9;
const LUT_SIZE: usize = 1 << LUT_INPUT_BITS;
const LUT_INPUT_MAX: i64 = (1 << (LUT_INPUT_BITS - 1)) - 1;
const LUT_INPUT_MIN: i64 = -(1 << (LUT_INPUT_BITS - 1));

/// LUT entry format: Q8.24.
const LUT_OUTPUT_FRAC: u32 = 24;

static TANSIG_LUT: OnceLock<Vec<i32>> = OnceLock::new();

fn lut() -> &'static [i32] {
    TANSIG_LUT.get_or_init(|| {
        (0..LUT_SIZE)
            .map(|addr| {
                // Reinterpret the address as a two's-complement Q3.9 value.
                let raw = ((addr as i32) << (32 - LUT_INPUT_BITS)) >> (32 - LUT_INPUT_BITS);
                let x = raw as f64 / (1i64 << LUT_INPUT_FRAC) as f64;
                (x.tanh() * (1i64 << LUT_OUTPUT_FRAC) as f64).floor() as i32
            })
            .collect()
    })
}

/// Hyperbolic tangent at the fixed-point type's defined precision.
///
/// # Examples
/// ```
/// use fixed_core::{tansig, Fx};
///
/// assert_eq!(tansig(Fx::ZERO), Fx::ZERO);
/// // Saturating region: tanh is flat beyond the LUT input range.
/// assert_eq!(tansig(Fx::from_f64(100.0)), tansig(Fx::MAX));
/// ```
pub fn tansig<const FRAC_BITS: u32>(x: Fixed<FRAC_BITS>) -> Fixed<FRAC_BITS> {
    // Saturate into the LUT input format. Truncation before clamping is
    // fine: both maps are monotone.
    let raw = x.raw() as i64;
    let shifted = if FRAC_BITS >= LUT_INPUT_FRAC {
        raw >> (FRAC_BITS - LUT_INPUT_FRAC)
    } else {
        raw << (LUT_INPUT_FRAC - FRAC_BITS)
    };
    let raw9 = shifted.clamp(LUT_INPUT_MIN, LUT_INPUT_MAX) as i32;

    let addr = (raw9 & (LUT_SIZE as i32 - 1)) as usize;
    let q24 = lut()[addr];

    // Narrow Q8.24 to the caller's format by truncation. tanh is within
    // (-1, 1), so widening for FRAC_BITS > 24 cannot overflow either.
    let out = if FRAC_BITS <= LUT_OUTPUT_FRAC {
        q24 >> (LUT_OUTPUT_FRAC - FRAC_BITS)
    } else {
        q24 << (FRAC_BITS - LUT_OUTPUT_FRAC)
    };
    Fixed::from_raw(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fx;

    #[test]
    fn test_zero_is_exact() {
        assert_eq!(tansig(Fx::ZERO), Fx::ZERO);
    }

    #[test]
    fn test_odd_symmetry_near_origin() {
        // Quantization breaks exact odd symmetry in general, but the
        // magnitudes must stay within one LSB of each other.
        for v in [0.25, 0.5, 1.0, 2.0] {
            let pos = tansig(Fx::from_f64(v)).raw();
            let neg = tansig(Fx::from_f64(-v)).raw();
            let asym = (pos + neg).abs();
            assert!(asym <= 1, "tansig(±{v}) asymmetry {asym} LSB");
        }
    }

    #[test]
    fn test_matches_f64_tanh_within_lut_step() {
        // The LUT quantizes the input to steps of 2^-9 and the output to
        // the network LSB; the combined error is bounded by
        // d/dx tanh <= 1 times the input step plus one output LSB.
        let tol = 1.0 / 512.0 + 1.0 / 65536.0;
        for v in [-3.5, -1.0, -0.3, 0.2, 0.75, 1.5, 3.9] {
            let got = tansig(Fx::from_f64(v)).to_f64();
            let want = v.tanh();
            assert!(
                (got - want).abs() <= tol,
                "tansig({v}) = {got}, want ~{want}",
            );
        }
    }

    #[test]
    fn test_saturates_beyond_lut_range() {
        let top = tansig(Fx::MAX);
        assert_eq!(tansig(Fx::from_f64(4.0)), top);
        assert_eq!(tansig(Fx::from_f64(1000.0)), top);
        let bottom = tansig(Fx::MIN);
        assert_eq!(tansig(Fx::from_f64(-4.5)), bottom);
        // The clamped outputs sit just inside ±1.
        assert!(top.to_f64() > 0.999 && top.to_f64() < 1.0);
        assert!(bottom.to_f64() < -0.999 && bottom.to_f64() >= -1.0);
    }

    #[test]
    fn test_monotone_over_samples() {
        let mut prev = tansig(Fx::from_f64(-4.0));
        let mut x = -4.0;
        while x <= 4.0 {
            let y = tansig(Fx::from_f64(x));
            assert!(y >= prev, "tansig not monotone at {x}");
            prev = y;
            x += 0.0625;
        }
    }

    #[test]
    fn test_deterministic() {
        let x = Fx::from_f64(0.7371);
        assert_eq!(tansig(x).raw(), tansig(x).raw());
    }
}
