// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: the full evaluation path on the reference network.
//!
//! These tests exercise configuration → validation → coefficient loading
//! → engine preparation → evaluation across all four crates, and pin the
//! numeric contract: determinism, budget invariance, the zero-input and
//! saturation boundaries, and batch/streaming agreement.

use fixed_core::{tansig, Fx};
use runtime::{CoeffSource, InferenceEngine, Ready, RuntimeConfig, RuntimeError, StreamingPipeline};
use std::time::Duration;

// ── Helpers ────────────────────────────────────────────────────

/// The reference network (784→8→16→12→8→40) with synthetic coefficients.
fn reference_engine() -> InferenceEngine<Ready> {
    InferenceEngine::new(RuntimeConfig::default())
        .load_coefficients(CoeffSource::Synthetic)
        .unwrap()
        .prepare()
        .unwrap()
}

/// A deterministic, full-range 784-element input vector.
fn ramp_input() -> Vec<Fx> {
    (0..784)
        .map(|k| Fx::from_f64((k as f64 / 784.0) * 2.0 - 1.0))
        .collect()
}

/// Zero-weight flat tables for the reference topology, with the given
/// per-layer bias value.
fn zero_weight_tables(bias: f64) -> Vec<Vec<f64>> {
    let dims: [(usize, usize); 5] = [(784, 8), (8, 16), (16, 12), (12, 8), (8, 40)];
    dims.iter()
        .map(|&(inputs, outputs)| {
            let mut table = vec![0.0; inputs * outputs];
            table.extend(std::iter::repeat(bias).take(outputs));
            table
        })
        .collect()
}

// ── Determinism ────────────────────────────────────────────────

#[test]
fn test_evaluate_is_bit_deterministic() {
    let engine = reference_engine();
    let input = ramp_input();

    let first = engine.evaluate(&input).unwrap().values;
    let second = engine.evaluate(&input).unwrap().values;

    assert_eq!(first.len(), 40);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.raw(), b.raw());
    }
}

#[test]
fn test_concurrent_callers_agree() {
    let engine = std::sync::Arc::new(reference_engine());
    let input = ramp_input();
    let reference = engine.evaluate(&input).unwrap().values;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            let input = input.clone();
            std::thread::spawn(move || engine.evaluate(&input).unwrap().values)
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), reference);
    }
}

// ── Composition law ────────────────────────────────────────────

#[test]
fn test_pipeline_matches_direct_affine_chain() {
    let engine = reference_engine();
    let input = ramp_input();
    let got = engine.evaluate(&input).unwrap().values;

    // Independent reference computation: plain affine-then-tansig per
    // layer, same scalar ops, same index-ascending accumulation, no
    // staging and no budgets.
    let topology = engine.topology();
    let store = coeff_store::CoeffStore::synthetic(topology);
    let mut current = input;
    for spec in topology.iter_layers() {
        let coeffs = store.layer(spec.index).unwrap();
        current = (0..spec.outputs)
            .map(|i| {
                let mut acc = coeffs.bias[i];
                for j in 0..spec.inputs {
                    acc = acc + current[j] * coeffs.weights.get(i, j);
                }
                tansig(acc)
            })
            .collect();
    }

    assert_eq!(got, current);
}

// ── Resource-budget invariance ─────────────────────────────────

#[test]
fn test_budgets_never_change_results() {
    let input = ramp_input();
    let mut reference: Option<Vec<Fx>> = None;

    for (multipliers, adders) in [(1, 1), (7, 3), (49, 47), (10_000, 10_000)] {
        let mut config = RuntimeConfig::default();
        for layer in &mut config.layers {
            layer.multipliers = multipliers;
            layer.adders = adders;
        }
        let engine = InferenceEngine::new(config)
            .load_coefficients(CoeffSource::Synthetic)
            .unwrap()
            .prepare()
            .unwrap();
        let values = engine.evaluate(&input).unwrap().values;

        match &reference {
            None => reference = Some(values),
            Some(expected) => {
                assert_eq!(&values, expected, "budget {multipliers}/{adders}")
            }
        }
    }
}

#[test]
fn test_target_interval_preserves_results() {
    let input = ramp_input();
    let baseline = reference_engine().evaluate(&input).unwrap().values;

    let config = RuntimeConfig {
        target_interval: Some(64),
        ..Default::default()
    };
    let engine = InferenceEngine::new(config)
        .load_coefficients(CoeffSource::Synthetic)
        .unwrap()
        .prepare()
        .unwrap();

    assert!(engine.timing().initiation_interval() <= 64);
    assert_eq!(engine.evaluate(&input).unwrap().values, baseline);
}

// ── Boundary fixtures ──────────────────────────────────────────

#[test]
fn test_zero_coefficients_yield_zero_output() {
    let engine = InferenceEngine::new(RuntimeConfig::default())
        .load_coefficients(CoeffSource::Flat(zero_weight_tables(0.0)))
        .unwrap()
        .prepare()
        .unwrap();

    let output = engine.evaluate(&ramp_input()).unwrap().values;
    assert_eq!(output, vec![Fx::ZERO; 40]);
}

#[test]
fn test_zero_weights_yield_tansig_of_bias_per_layer() {
    // With all weights zero, every layer ignores its input and produces
    // tansig(bias) — the bias-only regression fixture.
    let engine = InferenceEngine::new(RuntimeConfig::default())
        .load_coefficients(CoeffSource::Flat(zero_weight_tables(0.75)))
        .unwrap()
        .prepare()
        .unwrap();

    let expected = tansig(Fx::from_f64(0.75));
    let output = engine.evaluate(&ramp_input()).unwrap().values;
    assert_eq!(output, vec![expected; 40]);
}

#[test]
fn test_zero_input_first_layer_is_bias_only() {
    let engine = reference_engine();
    let layer0 = &engine.layers()[0];

    let store = coeff_store::CoeffStore::synthetic(engine.topology());
    let bias = &store.layer(0).unwrap().bias;

    let y = layer0.evaluate(&vec![Fx::ZERO; 784]);
    let expected: Vec<Fx> = bias.iter().map(|&b| tansig(b)).collect();
    assert_eq!(y, expected);
}

#[test]
fn test_saturation_clamps_instead_of_wrapping() {
    // One layer, every weight and bias positive, input at the numeric
    // maximum: the accumulation must clamp at MAX and the activation must
    // stay in the positive saturating region — a wraparound would flip
    // the sign.
    let config = RuntimeConfig {
        network_name: "sat".into(),
        layers: vec![runtime::LayerEntry {
            name: None,
            inputs: 4,
            outputs: 2,
            multipliers: 1,
            adders: 1,
            activators: 1,
            activation: "tansig".into(),
        }],
        ..Default::default()
    };
    let tables = vec![vec![1.0; 8].into_iter().chain([1.0, 1.0]).collect()];
    let engine = InferenceEngine::new(config)
        .load_coefficients(CoeffSource::Flat(tables))
        .unwrap()
        .prepare()
        .unwrap();

    let output = engine.evaluate(&[Fx::MAX; 4]).unwrap().values;
    let expected = tansig(Fx::MAX);
    assert_eq!(output, vec![expected; 2]);
    assert!(expected > Fx::ZERO, "saturated output must not wrap negative");
}

// ── Initialization failures ────────────────────────────────────

#[test]
fn test_adjacent_dimension_mismatch_fails_at_load() {
    let mut config = RuntimeConfig::default();
    config.layers[2].inputs = 17; // layer 1 produces 16
    let err = InferenceEngine::new(config)
        .load_coefficients(CoeffSource::Synthetic)
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Topology(_)));
}

#[test]
fn test_short_coefficient_table_fails_at_load() {
    let mut tables = zero_weight_tables(0.0);
    tables[3].pop();
    let err = InferenceEngine::new(RuntimeConfig::default())
        .load_coefficients(CoeffSource::Flat(tables))
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Coefficients(_)));
}

#[test]
fn test_input_length_is_the_only_runtime_check() {
    let engine = reference_engine();
    let err = engine.evaluate(&[Fx::ZERO; 783]).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::InputLengthMismatch { expected: 784, actual: 783 }
    ));
}

// ── Streaming realization ──────────────────────────────────────

#[tokio::test]
async fn test_streaming_matches_batch_on_reference_network() {
    let engine = reference_engine();

    let inputs: Vec<Vec<Fx>> = (0..4)
        .map(|k| {
            (0..784)
                .map(|j| Fx::from_f64(((k * 997 + j) % 64) as f64 / 32.0 - 1.0))
                .collect()
        })
        .collect();

    let batch: Vec<Vec<Fx>> = inputs
        .iter()
        .map(|v| engine.evaluate(v).unwrap().values)
        .collect();

    let streamed =
        StreamingPipeline::evaluate_all(&engine, inputs, Duration::from_micros(100))
            .await
            .unwrap();

    assert_eq!(streamed, batch);
}

// ── Configuration ──────────────────────────────────────────────

#[test]
fn test_config_toml_roundtrip_builds_same_topology() {
    let config = RuntimeConfig::default();
    let toml = config.to_toml().unwrap();
    let back = RuntimeConfig::from_toml(&toml).unwrap();

    let a = config.build_topology().unwrap();
    let b = back.build_topology().unwrap();
    assert_eq!(a.num_layers(), b.num_layers());
    for (x, y) in a.iter_layers().zip(b.iter_layers()) {
        assert_eq!(x, y);
    }
}
