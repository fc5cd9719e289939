// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The reduce-add stage: row summation fused with bias addition.

use fixed_core::{Fx, Matrix};

/// Folds each partial-product row into its bias:
/// `y[i] = b[i] + Σ_j P[i][j]`, accumulated strictly in ascending `j`.
///
/// The accumulation order is part of the numeric contract — fixed-point
/// truncation and saturation do not commute, so a fixed order is what
/// makes results reproducible.
///
/// `adders` caps the rows in flight per modelled time slot. Rows are
/// whole units of work: a budget never splits or reorders a row's
/// accumulation, so the result is budget-invariant.
///
/// # Panics
/// Panics if `bias.len() != products.rows()` or `adders == 0`; both are
/// ruled out by initialization-time validation.
pub fn reduce_add(products: &Matrix, bias: &[Fx], adders: usize) -> Vec<Fx> {
    assert_eq!(
        bias.len(),
        products.rows(),
        "reduce-add stage: bias length {} vs {} product rows",
        bias.len(),
        products.rows(),
    );
    assert!(adders > 0, "reduce-add stage: zero adder units");

    let rows = products.rows();
    let mut out = vec![Fx::ZERO; rows];

    // One pass per admission slot of `adders` rows.
    for slot_start in (0..rows).step_by(adders) {
        let slot_end = (slot_start + adders).min(rows);
        for i in slot_start..slot_end {
            let mut acc = bias[i];
            for &p in products.row(i) {
                acc = acc + p;
            }
            out[i] = acc;
        }
    }

    out
}
