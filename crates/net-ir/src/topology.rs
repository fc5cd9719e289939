// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The network topology: an ordered chain of dense layers.
//!
//! # Type-State Pattern
//!
//! A topology transitions through states enforced at compile time:
//!
//! ```text
//! Topology<Unchecked>   — layers assembled, not yet checked.
//!       │  .validate()
//!       ▼
//! Topology<Validated>   — dimensions proven consistent, ready to load
//!                         coefficients and build an engine.
//! ```
//!
//! The coefficient store and the engine only accept `Topology<Validated>`,
//! so a dimension mismatch can fail exactly once — at initialization —
//! and never at evaluation time. The markers are zero-sized; the
//! transition consumes the unchecked value.

use crate::{LayerSpec, TopologyError};
use std::fmt;

// ── Type-state markers ─────────────────────────────────────────────

/// Marker: topology has been assembled but not validated.
#[derive(Debug, Clone)]
pub struct Unchecked;

/// Marker: topology has passed validation.
#[derive(Debug, Clone)]
pub struct Validated;

/// Sealed trait for topology states.
pub trait TopologyState: fmt::Debug + Clone {}
impl TopologyState for Unchecked {}
impl TopologyState for Validated {}

// ── Topology ───────────────────────────────────────────────────────

/// An ordered, strictly linear chain of dense layers.
///
/// Data flows input → layer 0 → layer 1 → … → output; no branching, no
/// feedback, no re-entry. The generic parameter `S` encodes the
/// validation state at compile time.
#[derive(Debug, Clone)]
pub struct Topology<S: TopologyState = Unchecked> {
    /// Human-readable network name.
    pub name: String,
    /// Ordered layer specifications.
    layers: Vec<LayerSpec>,
    _state: std::marker::PhantomData<S>,
}

impl Topology<Unchecked> {
    /// Assembles a topology in the `Unchecked` state.
    pub fn new(name: impl Into<String>, layers: Vec<LayerSpec>) -> Self {
        Self {
            name: name.into(),
            layers,
            _state: std::marker::PhantomData,
        }
    }

    /// Validates the chain and transitions to the `Validated` state.
    ///
    /// # Checks (all fatal)
    /// - The chain is non-empty.
    /// - Layer indices are consecutive starting from 0.
    /// - No layer has a zero-sized dimension.
    /// - Every adjacent pair satisfies `layer[k].outputs == layer[k+1].inputs`.
    /// - Every stage budget has at least one unit.
    pub fn validate(self) -> Result<Topology<Validated>, TopologyError> {
        if self.layers.is_empty() {
            return Err(TopologyError::Empty(self.name));
        }

        for (i, layer) in self.layers.iter().enumerate() {
            if layer.index != i {
                return Err(TopologyError::BadIndex {
                    layer: layer.name.clone(),
                    expected: i,
                    actual: layer.index,
                });
            }
            if layer.inputs == 0 || layer.outputs == 0 {
                return Err(TopologyError::ZeroDimension {
                    layer: layer.name.clone(),
                    inputs: layer.inputs,
                    outputs: layer.outputs,
                });
            }
            if !layer.budget.is_realizable() {
                return Err(TopologyError::ZeroBudget {
                    layer: layer.name.clone(),
                });
            }
        }

        for pair in self.layers.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            if current.outputs != next.inputs {
                return Err(TopologyError::DimensionMismatch {
                    from: current.name.clone(),
                    from_outputs: current.outputs,
                    to: next.name.clone(),
                    to_inputs: next.inputs,
                });
            }
        }

        Ok(Topology {
            name: self.name,
            layers: self.layers,
            _state: std::marker::PhantomData,
        })
    }
}

impl Topology<Validated> {
    /// Number of layers in the chain.
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Length of the network's input vector (first layer's inputs).
    pub fn input_count(&self) -> usize {
        self.layers[0].inputs
    }

    /// Length of the network's output vector (last layer's outputs).
    pub fn output_count(&self) -> usize {
        self.layers[self.layers.len() - 1].outputs
    }

    /// Total number of coefficient values across all layers.
    pub fn total_coeff_len(&self) -> usize {
        self.layers.iter().map(|l| l.coeff_len()).sum()
    }

    /// Returns a layer specification by index.
    pub fn layer(&self, index: usize) -> Option<&LayerSpec> {
        self.layers.get(index)
    }

    /// Iterates over the layers in evaluation order.
    pub fn iter_layers(&self) -> impl Iterator<Item = &LayerSpec> {
        self.layers.iter()
    }

    /// Rebuilds the topology with new layer specs of identical dimensions.
    ///
    /// Used by the scheduler to swap budgets without re-proving dimension
    /// consistency; callers must not change dimensions or ordering.
    pub(crate) fn with_layers(&self, layers: Vec<LayerSpec>) -> Topology<Validated> {
        debug_assert_eq!(layers.len(), self.layers.len());
        Topology {
            name: self.name.clone(),
            layers,
            _state: std::marker::PhantomData,
        }
    }

    /// Returns a summary string describing the network.
    pub fn summary(&self) -> String {
        let chain: Vec<String> = std::iter::once(self.input_count().to_string())
            .chain(self.layers.iter().map(|l| l.outputs.to_string()))
            .collect();
        format!(
            "Network '{}': {} layers ({}), {} coefficients",
            self.name,
            self.num_layers(),
            chain.join("→"),
            self.total_coeff_len(),
        )
    }
}

impl<S: TopologyState> fmt::Display for Topology<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Topology '{}' ({} layers):", self.name, self.layers.len())?;
        for layer in &self.layers {
            writeln!(f, "  {}", layer.summary())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Activation, ResourceBudget};

    /// Helper: builds a dimension-consistent chain.
    pub(crate) fn make_chain(dims: &[usize]) -> Vec<LayerSpec> {
        dims.windows(2)
            .enumerate()
            .map(|(i, pair)| LayerSpec {
                name: format!("hidden.{i}"),
                index: i,
                inputs: pair[0],
                outputs: pair[1],
                budget: ResourceBudget::default(),
                activation: Activation::Tansig,
            })
            .collect()
    }

    #[test]
    fn test_validate_ok() {
        let t = Topology::new("ref", make_chain(&[784, 8, 16, 12, 8, 40]))
            .validate()
            .unwrap();
        assert_eq!(t.num_layers(), 5);
        assert_eq!(t.input_count(), 784);
        assert_eq!(t.output_count(), 40);
    }

    #[test]
    fn test_validate_empty() {
        let err = Topology::new("empty", vec![]).validate().unwrap_err();
        assert!(matches!(err, TopologyError::Empty(_)));
    }

    #[test]
    fn test_validate_bad_index() {
        let mut layers = make_chain(&[4, 3, 2]);
        layers[1].index = 7;
        let err = Topology::new("bad", layers).validate().unwrap_err();
        assert!(matches!(err, TopologyError::BadIndex { .. }));
    }

    #[test]
    fn test_validate_zero_dimension() {
        let mut layers = make_chain(&[4, 3]);
        layers[0].outputs = 0;
        let err = Topology::new("zero", layers).validate().unwrap_err();
        assert!(matches!(err, TopologyError::ZeroDimension { .. }));
    }

    #[test]
    fn test_validate_dimension_mismatch_is_fatal() {
        let mut layers = make_chain(&[4, 3, 2]);
        layers[1].inputs = 5; // layer 0 produces 3
        let err = Topology::new("mismatch", layers).validate().unwrap_err();
        match err {
            TopologyError::DimensionMismatch {
                from_outputs,
                to_inputs,
                ..
            } => {
                assert_eq!(from_outputs, 3);
                assert_eq!(to_inputs, 5);
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_zero_budget() {
        let mut layers = make_chain(&[4, 3]);
        layers[0].budget.adders = 0;
        let err = Topology::new("nobudget", layers).validate().unwrap_err();
        assert!(matches!(err, TopologyError::ZeroBudget { .. }));
    }

    #[test]
    fn test_total_coeff_len() {
        let t = Topology::new("t", make_chain(&[4, 3, 2])).validate().unwrap();
        // layer 0: 3*4 + 3 = 15; layer 1: 2*3 + 2 = 8.
        assert_eq!(t.total_coeff_len(), 23);
    }

    #[test]
    fn test_summary_and_display() {
        let t = Topology::new("ref", make_chain(&[784, 8, 16]))
            .validate()
            .unwrap();
        let s = t.summary();
        assert!(s.contains("784→8→16"));
        assert!(s.contains("2 layers"));

        let d = format!("{t}");
        assert!(d.contains("hidden.0"));
        assert!(d.contains("hidden.1"));
    }

    #[test]
    fn test_layer_access() {
        let t = Topology::new("t", make_chain(&[4, 3, 2])).validate().unwrap();
        assert_eq!(t.layer(0).unwrap().inputs, 4);
        assert_eq!(t.layer(1).unwrap().outputs, 2);
        assert!(t.layer(2).is_none());
    }
}
