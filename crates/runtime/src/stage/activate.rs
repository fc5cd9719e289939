// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The activation stage: elementwise nonlinearity.

use fixed_core::{tansig, Fx};
use net_ir::Activation;

/// Applies the layer's nonlinearity elementwise.
///
/// - [`Activation::Tansig`]: `y[i] = tansig(x[i])` through the lookup
///   table.
/// - [`Activation::Linear`]: `y[i] = x[i] * gains[i]` — the per-neuron
///   gain head.
///
/// `activators` caps the elements in flight per modelled time slot;
/// chunking never changes an elementwise result.
///
/// # Panics
/// Panics if `activators == 0`, or if a linear activation is requested
/// without a gain vector of matching length. The coefficient loader rules
/// the latter out for any store built against a validated topology.
pub fn activate(pre: &[Fx], activation: Activation, gains: Option<&[Fx]>, activators: usize) -> Vec<Fx> {
    assert!(activators > 0, "activation stage: zero activation units");

    let mut out = vec![Fx::ZERO; pre.len()];
    for slot_start in (0..pre.len()).step_by(activators) {
        let slot_end = (slot_start + activators).min(pre.len());
        for i in slot_start..slot_end {
            out[i] = match activation {
                Activation::Tansig => tansig(pre[i]),
                Activation::Linear => {
                    let gains = gains.expect("linear activation requires a gain vector");
                    assert_eq!(
                        gains.len(),
                        pre.len(),
                        "activation stage: gain length {} vs {} inputs",
                        gains.len(),
                        pre.len(),
                    );
                    pre[i] * gains[i]
                }
            };
        }
    }
    out
}
