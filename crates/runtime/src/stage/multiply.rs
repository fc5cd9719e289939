// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The multiply stage: elementwise scaling, no summation.

use fixed_core::{Fx, Matrix};

/// Scales the input vector by each output neuron's weight row:
/// `P[i][j] = x[j] * W[i][j]`.
///
/// Produces the unreduced partial-product matrix; summation is deferred
/// to the reduce-add stage so multiplier and adder budgets can be tuned
/// independently.
///
/// `multipliers` is the concurrent-unit cap: the flat product index space
/// is walked in chunks of that many elements, one chunk per modelled time
/// slot. Every product is computed exactly once whatever the chunking, so
/// the result is budget-invariant.
///
/// # Panics
/// Panics if `input.len() != weights.cols()` or `multipliers == 0`; both
/// are ruled out by topology validation before a layer can exist.
pub fn multiply(input: &[Fx], weights: &Matrix, multipliers: usize) -> Matrix {
    assert_eq!(
        input.len(),
        weights.cols(),
        "multiply stage: input length {} vs weight columns {}",
        input.len(),
        weights.cols(),
    );
    assert!(multipliers > 0, "multiply stage: zero multiplier units");

    let rows = weights.rows();
    let cols = weights.cols();
    let total = rows * cols;
    let mut products = Matrix::zeros(rows, cols);

    // One pass per admission slot of `multipliers` concurrent products.
    for slot_start in (0..total).step_by(multipliers) {
        let slot_end = (slot_start + multipliers).min(total);
        for flat in slot_start..slot_end {
            let i = flat / cols;
            let j = flat % cols;
            products.set(i, j, input[j] * weights.get(i, j));
        }
    }

    products
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fx(v: f64) -> Fx {
        Fx::from_f64(v)
    }

    #[test]
    fn test_elementwise_products_no_summation() {
        // W = [[1, 2], [3, 4]], x = [10, 100].
        let w = Matrix::from_f64(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let p = multiply(&[fx(10.0), fx(100.0)], &w, 1);
        assert_eq!(p.get(0, 0), fx(10.0));
        assert_eq!(p.get(0, 1), fx(200.0));
        assert_eq!(p.get(1, 0), fx(30.0));
        assert_eq!(p.get(1, 1), fx(400.0));
    }

    #[test]
    fn test_budget_invariance() {
        let w = Matrix::from_f64(3, 5, &(0..15).map(|k| k as f64 / 7.0).collect::<Vec<_>>())
            .unwrap();
        let x: Vec<Fx> = (0..5).map(|k| fx(k as f64 - 2.5)).collect();

        let reference = multiply(&x, &w, 1);
        for units in [2, 3, 7, 15, 1000] {
            assert_eq!(multiply(&x, &w, units), reference, "units = {units}");
        }
    }

    #[test]
    fn test_zero_input_zeroes_products() {
        let w = Matrix::from_f64(2, 3, &[1.0; 6]).unwrap();
        let p = multiply(&[Fx::ZERO; 3], &w, 4);
        assert!(p.as_slice().iter().all(|&v| v == Fx::ZERO));
    }

    #[test]
    fn test_products_saturate() {
        let w = Matrix::from_f64(1, 1, &[30000.0]).unwrap();
        let p = multiply(&[fx(30000.0)], &w, 1);
        assert_eq!(p.get(0, 0), Fx::MAX);
    }

    #[test]
    #[should_panic(expected = "input length")]
    fn test_length_mismatch_panics() {
        let w = Matrix::zeros(2, 3);
        let _ = multiply(&[Fx::ZERO; 2], &w, 1);
    }
}
