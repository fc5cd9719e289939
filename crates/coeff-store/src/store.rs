// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Read-only coefficient containers.

use fixed_core::{Fx, Matrix};
use std::sync::Arc;

/// One layer's coefficient set.
///
/// Immutable after construction. Shared between the batch engine and the
/// streaming pipeline's per-layer tasks via [`Arc`], which is the only
/// concurrency discipline the data needs: there is no writer once a store
/// exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerCoefficients {
    /// Weight matrix, `outputs × inputs`, row per output neuron.
    pub weights: Matrix,
    /// Bias vector, length `outputs`.
    pub bias: Vec<Fx>,
    /// Per-neuron gains for a linear activation, length `outputs`.
    /// `None` for tansig layers.
    pub gains: Option<Vec<Fx>>,
}

/// The process-wide coefficient store: one [`LayerCoefficients`] per
/// layer, in evaluation order.
///
/// Built exactly once by the loader (see [`CoeffStore::from_flat`] and
/// [`CoeffStore::synthetic`]); exposes read-only views only.
///
/// [`CoeffStore::from_flat`]: crate::CoeffStore::from_flat
/// [`CoeffStore::synthetic`]: crate::CoeffStore::synthetic
#[derive(Debug, Clone)]
pub struct CoeffStore {
    pub(crate) layers: Vec<Arc<LayerCoefficients>>,
}

impl CoeffStore {
    /// Number of layers with loaded coefficients.
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Returns a shared handle to one layer's coefficients.
    pub fn layer(&self, index: usize) -> Option<Arc<LayerCoefficients>> {
        self.layers.get(index).cloned()
    }

    /// Iterates over the per-layer coefficient sets in evaluation order.
    pub fn iter_layers(&self) -> impl Iterator<Item = &Arc<LayerCoefficients>> {
        self.layers.iter()
    }

    /// Total number of stored coefficient values.
    pub fn total_values(&self) -> usize {
        self.layers
            .iter()
            .map(|l| {
                l.weights.rows() * l.weights.cols()
                    + l.bias.len()
                    + l.gains.as_ref().map_or(0, Vec::len)
            })
            .sum()
    }
}
