// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Layer composition: multiply → reduce-add → activation.

use crate::stage::{activate, multiply, reduce_add};
use coeff_store::LayerCoefficients;
use fixed_core::Fx;
use net_ir::LayerSpec;
use std::sync::Arc;

/// One dense layer: a spec plus a shared handle to its coefficients.
///
/// Stateless across calls — evaluation owns its transient buffers
/// exclusively, and the coefficients behind the [`Arc`] are never
/// written. `Clone` is cheap (spec copy + refcount), which is how the
/// streaming pipeline hands each layer to its own task.
#[derive(Debug, Clone)]
pub struct Layer {
    spec: LayerSpec,
    coeffs: Arc<LayerCoefficients>,
}

impl Layer {
    /// Binds a spec to its coefficient set.
    ///
    /// # Panics
    /// Panics if the coefficient dimensions disagree with the spec; a
    /// store built by the loader against the same validated topology can
    /// never trip this.
    pub fn new(spec: LayerSpec, coeffs: Arc<LayerCoefficients>) -> Self {
        assert_eq!(
            (coeffs.weights.rows(), coeffs.weights.cols()),
            (spec.outputs, spec.inputs),
            "layer '{}': weight matrix {}x{} vs spec {}→{}",
            spec.name,
            coeffs.weights.rows(),
            coeffs.weights.cols(),
            spec.inputs,
            spec.outputs,
        );
        assert_eq!(
            coeffs.bias.len(),
            spec.outputs,
            "layer '{}': bias length {} vs {} outputs",
            spec.name,
            coeffs.bias.len(),
            spec.outputs,
        );
        Self { spec, coeffs }
    }

    /// The layer's specification.
    pub fn spec(&self) -> &LayerSpec {
        &self.spec
    }

    /// Evaluates the layer:
    /// `activate(reduce_add(multiply(x, W), b))`.
    ///
    /// # Panics
    /// Panics if `input.len()` differs from the spec's input count. The
    /// engine checks the network input once per call and the validated
    /// chain guarantees every inner hand-off.
    pub fn evaluate(&self, input: &[Fx]) -> Vec<Fx> {
        assert_eq!(
            input.len(),
            self.spec.inputs,
            "layer '{}': input length {} vs {} expected",
            self.spec.name,
            input.len(),
            self.spec.inputs,
        );

        let budget = self.spec.budget;
        let products = multiply(input, &self.coeffs.weights, budget.multipliers);
        let pre = reduce_add(&products, &self.coeffs.bias, budget.adders);
        activate(
            &pre,
            self.spec.activation,
            self.coeffs.gains.as_deref(),
            budget.activators,
        )
    }
}
