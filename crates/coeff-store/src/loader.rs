// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Coefficient loading from flat literal tables.
//!
//! Each layer arrives as one flat ordered list of `f64` literals:
//! row-major weights, then the bias vector, then — for a linear
//! activation — the gain vector. Dimension checks happen here, against a
//! validated topology, so the store can never hold a partially or
//! inconsistently sized table.

use crate::{CoeffError, CoeffStore, LayerCoefficients};
use fixed_core::{Fx, Matrix};
use net_ir::{Activation, Topology, Validated};
use std::sync::Arc;

impl CoeffStore {
    /// Builds the store from one flat table per layer.
    ///
    /// # Errors
    /// - [`CoeffError::LayerCountMismatch`] if `tables.len()` differs
    ///   from the topology's layer count.
    /// - [`CoeffError::TableLengthMismatch`] if any table's length is not
    ///   exactly `weights + bias (+ gains)` for its layer.
    pub fn from_flat(
        topology: &Topology<Validated>,
        tables: &[Vec<f64>],
    ) -> Result<Self, CoeffError> {
        if tables.len() != topology.num_layers() {
            return Err(CoeffError::LayerCountMismatch {
                expected: topology.num_layers(),
                actual: tables.len(),
            });
        }

        let mut layers = Vec::with_capacity(tables.len());
        for (spec, table) in topology.iter_layers().zip(tables) {
            if table.len() != spec.coeff_len() {
                return Err(CoeffError::TableLengthMismatch {
                    layer: spec.name.clone(),
                    expected: spec.coeff_len(),
                    actual: table.len(),
                });
            }

            let (weight_part, rest) = table.split_at(spec.weight_count());
            let (bias_part, gain_part) = rest.split_at(spec.outputs);

            let weights = Matrix::from_f64(spec.outputs, spec.inputs, weight_part)?;
            let bias: Vec<Fx> = bias_part.iter().copied().map(Fx::from_f64).collect();
            let gains = match spec.activation {
                Activation::Linear => {
                    Some(gain_part.iter().copied().map(Fx::from_f64).collect())
                }
                Activation::Tansig => None,
            };

            layers.push(Arc::new(LayerCoefficients {
                weights,
                bias,
                gains,
            }));
        }

        let store = Self { layers };
        tracing::info!(
            "coefficient store loaded: {} layers, {} values",
            store.num_layers(),
            store.total_values(),
        );
        Ok(store)
    }

    /// Builds a deterministic synthetic store for tests and benchmarks.
    ///
    /// Values follow a fixed small-magnitude pattern — no file, no
    /// randomness — so two synthetic stores for the same topology are
    /// bit-identical.
    pub fn synthetic(topology: &Topology<Validated>) -> Self {
        let layers = topology
            .iter_layers()
            .map(|spec| {
                let weights: Vec<f64> = (0..spec.outputs)
                    .flat_map(|i| (0..spec.inputs).map(move |j| synthetic_weight(i, j)))
                    .collect();
                let bias: Vec<Fx> = (0..spec.outputs)
                    .map(|i| Fx::from_f64(synthetic_bias(i)))
                    .collect();
                let gains = match spec.activation {
                    Activation::Linear => Some(
                        (0..spec.outputs)
                            .map(|i| Fx::from_f64(((i % 3) as f64 + 1.0) / 2.0))
                            .collect(),
                    ),
                    Activation::Tansig => None,
                };
                Arc::new(LayerCoefficients {
                    weights: Matrix::from_f64(spec.outputs, spec.inputs, &weights)
                        .expect("synthetic table length is exact by construction"),
                    bias,
                    gains,
                })
            })
            .collect();

        tracing::debug!("synthetic coefficient store for '{}'", topology.name);
        Self { layers }
    }
}

fn synthetic_weight(i: usize, j: usize) -> f64 {
    (((i * 7 + j * 3) % 11) as f64 - 5.0) / 16.0
}

fn synthetic_bias(i: usize) -> f64 {
    ((i % 5) as f64 - 2.0) / 8.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use net_ir::{LayerSpec, ResourceBudget};

    fn topology(dims: &[usize]) -> Topology<Validated> {
        let layers = dims
            .windows(2)
            .enumerate()
            .map(|(i, pair)| LayerSpec {
                name: format!("hidden.{i}"),
                index: i,
                inputs: pair[0],
                outputs: pair[1],
                budget: ResourceBudget::default(),
                activation: Activation::Tansig,
            })
            .collect();
        Topology::new("test", layers).validate().unwrap()
    }

    #[test]
    fn test_from_flat_ok() {
        let t = topology(&[4, 3, 2]);
        // layer 0: 12 weights + 3 bias; layer 1: 6 weights + 2 bias.
        let tables = vec![vec![0.5; 15], vec![-0.25; 8]];
        let store = CoeffStore::from_flat(&t, &tables).unwrap();
        assert_eq!(store.num_layers(), 2);
        assert_eq!(store.total_values(), 23);

        let l0 = store.layer(0).unwrap();
        assert_eq!(l0.weights.rows(), 3);
        assert_eq!(l0.weights.cols(), 4);
        assert_eq!(l0.bias.len(), 3);
        assert_eq!(l0.bias[0], Fx::from_f64(0.5));
        assert!(l0.gains.is_none());
    }

    #[test]
    fn test_flat_layout_order() {
        let t = topology(&[2, 2]);
        // weights row-major: w00 w01 w10 w11, then bias: b0 b1.
        let tables = vec![vec![1.0, 2.0, 3.0, 4.0, 10.0, 20.0]];
        let store = CoeffStore::from_flat(&t, &tables).unwrap();
        let l0 = store.layer(0).unwrap();
        assert_eq!(l0.weights.get(0, 1), Fx::from_f64(2.0));
        assert_eq!(l0.weights.get(1, 0), Fx::from_f64(3.0));
        assert_eq!(l0.bias[1], Fx::from_f64(20.0));
    }

    #[test]
    fn test_layer_count_mismatch() {
        let t = topology(&[4, 3]);
        let err = CoeffStore::from_flat(&t, &[]).unwrap_err();
        assert!(matches!(err, CoeffError::LayerCountMismatch { expected: 1, actual: 0 }));
    }

    #[test]
    fn test_short_table_is_fatal() {
        let t = topology(&[4, 3]);
        let err = CoeffStore::from_flat(&t, &[vec![0.0; 14]]).unwrap_err();
        match err {
            CoeffError::TableLengthMismatch { expected, actual, .. } => {
                assert_eq!(expected, 15);
                assert_eq!(actual, 14);
            }
            other => panic!("expected TableLengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_linear_layer_reads_gains() {
        let layers = vec![LayerSpec {
            name: "head".into(),
            index: 0,
            inputs: 2,
            outputs: 2,
            budget: ResourceBudget::default(),
            activation: Activation::Linear,
        }];
        let t = Topology::new("lin", layers).validate().unwrap();
        // 4 weights, 2 bias, 2 gains.
        let tables = vec![vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 3.0]];
        let store = CoeffStore::from_flat(&t, &tables).unwrap();
        let gains = store.layer(0).unwrap().gains.clone().unwrap();
        assert_eq!(gains, vec![Fx::from_f64(2.0), Fx::from_f64(3.0)]);
    }

    #[test]
    fn test_synthetic_is_deterministic() {
        let t = topology(&[8, 4, 2]);
        let a = CoeffStore::synthetic(&t);
        let b = CoeffStore::synthetic(&t);
        for i in 0..a.num_layers() {
            assert_eq!(a.layer(i).unwrap(), b.layer(i).unwrap());
        }
    }

    #[test]
    fn test_synthetic_values_are_small() {
        let t = topology(&[8, 4]);
        let store = CoeffStore::synthetic(&t);
        let l0 = store.layer(0).unwrap();
        for &w in l0.weights.as_slice() {
            assert!(w.to_f64().abs() <= 0.5);
        }
    }
}
