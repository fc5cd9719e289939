// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Layer specifications.
//!
//! A [`LayerSpec`] describes a single dense layer: its dimensions, the
//! nonlinearity applied to its pre-activation vector, and the arithmetic
//! resource budget each of its three stages may occupy. Coefficient data
//! is **not** stored here — the coefficient store owns it and checks it
//! against these specs at load time.

use crate::ResourceBudget;

/// The nonlinearity applied at the end of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// Hyperbolic tangent through the lookup table.
    Tansig,
    /// Per-neuron linear gain (`y[i] = x[i] * g[i]`); requires a gain
    /// vector in the layer's coefficient set.
    Linear,
}

impl Activation {
    /// Parses an activation from a configuration string.
    ///
    /// Accepts the canonical names and common aliases (`"tanh"`,
    /// `"purelin"`).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tansig" | "tanh" => Some(Self::Tansig),
            "linear" | "purelin" | "gain" => Some(Self::Linear),
            _ => None,
        }
    }

    /// Returns a human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tansig => "tansig",
            Self::Linear => "linear",
        }
    }
}

impl std::fmt::Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Specification of a single dense layer: `inputs → outputs` through
/// multiply, reduce-add-with-bias, and activation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayerSpec {
    /// Unique identifier (e.g., `"hidden.0"`).
    pub name: String,
    /// Position in the evaluation order (0-based).
    pub index: usize,
    /// Input vector length.
    pub inputs: usize,
    /// Output vector length.
    pub outputs: usize,
    /// Per-stage arithmetic-unit budget.
    #[serde(default)]
    pub budget: ResourceBudget,
    /// Nonlinearity applied to the pre-activation vector.
    pub activation: Activation,
}

impl LayerSpec {
    /// Number of weight values this layer requires (`outputs × inputs`).
    pub fn weight_count(&self) -> usize {
        self.outputs * self.inputs
    }

    /// Number of flat coefficient values this layer requires: row-major
    /// weights, then bias, then — for a linear activation — the gain
    /// vector.
    pub fn coeff_len(&self) -> usize {
        let gains = match self.activation {
            Activation::Linear => self.outputs,
            Activation::Tansig => 0,
        };
        self.weight_count() + self.outputs + gains
    }

    /// Returns a concise summary string for display.
    pub fn summary(&self) -> String {
        format!(
            "[{}] {} — {}→{} {}, {}",
            self.index, self.name, self.inputs, self.outputs, self.activation, self.budget,
        )
    }
}
