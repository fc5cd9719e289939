// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The core inference engine with type-state–enforced setup.
//!
//! ```text
//! InferenceEngine<Idle>
//!     │  .load_coefficients()
//!     ▼
//! InferenceEngine<Loaded>
//!     │  .prepare()
//!     ▼
//! InferenceEngine<Ready>
//!     │  .evaluate()
//!     ▼
//!   EvaluationOutput
//! ```
//!
//! Each transition consumes the old value and returns a new one, making
//! invalid sequences a compile error: there is no way to evaluate before
//! coefficients are loaded and checked.

use crate::{EvaluationMetrics, Layer, RuntimeConfig, RuntimeError};
use coeff_store::CoeffStore;
use fixed_core::Fx;
use net_ir::{timing::PipelineTiming, Topology, Validated};
use std::time::Instant;

// ── Type-state markers ─────────────────────────────────────────

/// Engine is created but coefficients are not loaded.
#[derive(Debug)]
pub struct Idle;

/// Topology is validated and coefficients are loaded.
#[derive(Debug)]
pub struct Loaded;

/// Engine is ready to evaluate.
#[derive(Debug)]
pub struct Ready;

/// Sealed trait for engine states.
pub trait EngineState: std::fmt::Debug {}
impl EngineState for Idle {}
impl EngineState for Loaded {}
impl EngineState for Ready {}

// ── Coefficient source ─────────────────────────────────────────

/// Where the one-time coefficient load reads from.
#[derive(Debug, Clone)]
pub enum CoeffSource {
    /// One flat table per layer: row-major weights, then bias, then
    /// gains for linear layers.
    Flat(Vec<Vec<f64>>),
    /// The deterministic synthetic pattern (tests, benchmarks, demos).
    Synthetic,
}

// ── Evaluation output ──────────────────────────────────────────

/// The result of a single evaluation.
#[derive(Debug)]
pub struct EvaluationOutput {
    /// The network's output vector.
    pub values: Vec<Fx>,
    /// Timing metrics for this call (empty layers when profiling is off).
    pub metrics: EvaluationMetrics,
}

// ── Engine ─────────────────────────────────────────────────────

/// The primary inference engine.
///
/// `S` is a type-state marker enforcing the setup order at compile time.
/// A `Ready` engine is immutable: `evaluate` takes `&self`, owns its
/// transient vectors exclusively, and may be called concurrently from
/// independent threads.
///
/// # Example
/// ```no_run
/// use runtime::{CoeffSource, InferenceEngine, RuntimeConfig};
///
/// # fn example() -> Result<(), runtime::RuntimeError> {
/// let engine = InferenceEngine::new(RuntimeConfig::default())
///     .load_coefficients(CoeffSource::Synthetic)?
///     .prepare()?;
/// let input = vec![fixed_core::Fx::ZERO; 784];
/// let output = engine.evaluate(&input)?;
/// println!("{}", output.metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct InferenceEngine<S: EngineState = Idle> {
    config: RuntimeConfig,
    _state: std::marker::PhantomData<S>,
    // Fields populated as the engine transitions through states:
    topology: Option<Topology<Validated>>,
    store: Option<CoeffStore>,
    timing: Option<PipelineTiming>,
    layers: Vec<Layer>,
}

// ── Idle → Loaded ──────────────────────────────────────────────

impl InferenceEngine<Idle> {
    /// Creates a new engine from the given configuration.
    pub fn new(config: RuntimeConfig) -> Self {
        tracing::info!("engine created for network '{}'", config.network_name);
        Self {
            config,
            _state: std::marker::PhantomData,
            topology: None,
            store: None,
            timing: None,
            layers: Vec::new(),
        }
    }

    /// Checks the numeric format, validates the topology, and loads the
    /// coefficient store exactly once. Transitions to `Loaded`.
    ///
    /// Every fatal condition — format mismatch, dimension mismatch,
    /// short or missing coefficient tables — surfaces here, before any
    /// input can be offered.
    pub fn load_coefficients(
        self,
        source: CoeffSource,
    ) -> Result<InferenceEngine<Loaded>, RuntimeError> {
        let format = self.config.check_format()?;
        tracing::info!("numeric format: {format}");

        let topology = self.config.build_topology()?;
        tracing::info!("{}", topology.summary());

        let store = match source {
            CoeffSource::Flat(tables) => CoeffStore::from_flat(&topology, &tables)?,
            CoeffSource::Synthetic => CoeffStore::synthetic(&topology),
        };

        let timing = PipelineTiming::of(&topology);
        tracing::info!(
            "cycle model: interval {} cycles, latency {} cycles",
            timing.initiation_interval(),
            timing.latency(),
        );

        Ok(InferenceEngine {
            config: self.config,
            _state: std::marker::PhantomData,
            topology: Some(topology),
            store: Some(store),
            timing: Some(timing),
            layers: Vec::new(),
        })
    }
}

// ── Loaded → Ready ─────────────────────────────────────────────

impl InferenceEngine<Loaded> {
    /// Returns the validated topology.
    pub fn topology(&self) -> &Topology<Validated> {
        self.topology.as_ref().expect("topology exists in Loaded state")
    }

    /// Returns the derived cycle model.
    pub fn timing(&self) -> &PipelineTiming {
        self.timing.as_ref().expect("timing exists in Loaded state")
    }

    /// Instantiates the layer chain. Transitions to `Ready`.
    pub fn prepare(self) -> Result<InferenceEngine<Ready>, RuntimeError> {
        let topology = self.topology.as_ref().expect("topology exists in Loaded state");
        let store = self.store.as_ref().expect("store exists in Loaded state");

        let layers: Vec<Layer> = topology
            .iter_layers()
            .map(|spec| {
                let coeffs = store
                    .layer(spec.index)
                    .expect("store was built against this topology");
                Layer::new(spec.clone(), coeffs)
            })
            .collect();
        tracing::info!("pipeline prepared: {} layers", layers.len());

        Ok(InferenceEngine {
            config: self.config,
            _state: std::marker::PhantomData,
            topology: self.topology,
            store: self.store,
            timing: self.timing,
            layers,
        })
    }
}

// ── Ready: evaluate ────────────────────────────────────────────

impl InferenceEngine<Ready> {
    /// Returns the validated topology.
    pub fn topology(&self) -> &Topology<Validated> {
        self.topology.as_ref().expect("topology exists in Ready state")
    }

    /// Returns the derived cycle model.
    pub fn timing(&self) -> &PipelineTiming {
        self.timing.as_ref().expect("timing exists in Ready state")
    }

    /// Returns the engine's configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Returns the instantiated layer chain in evaluation order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Evaluates the network on one input vector.
    ///
    /// The only runtime check is the input length; past it, evaluation is
    /// total — numeric overflow saturates, every stage has bounded cost,
    /// and identical inputs yield bit-identical outputs.
    pub fn evaluate(&self, input: &[Fx]) -> Result<EvaluationOutput, RuntimeError> {
        let expected = self.topology().input_count();
        if input.len() != expected {
            return Err(RuntimeError::InputLengthMismatch {
                expected,
                actual: input.len(),
            });
        }

        let run_start = Instant::now();
        let profiling = self.config.enable_profiling;
        let mut metrics = EvaluationMetrics::new();

        let mut current = input.to_vec();
        for layer in &self.layers {
            let layer_start = Instant::now();
            current = layer.evaluate(&current);
            if profiling {
                metrics.record_layer(layer.spec().name.clone(), layer_start.elapsed());
            }
        }

        metrics.finalise(run_start.elapsed());
        tracing::debug!("{}", metrics.summary());

        Ok(EvaluationOutput {
            values: current,
            metrics,
        })
    }

    /// Convenience: quantizes an `f64` input vector and evaluates.
    pub fn evaluate_f64(&self, input: &[f64]) -> Result<EvaluationOutput, RuntimeError> {
        let fixed: Vec<Fx> = input.iter().copied().map(Fx::from_f64).collect();
        self.evaluate(&fixed)
    }
}

impl<S: EngineState> std::fmt::Debug for InferenceEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceEngine")
            .field("state", &std::any::type_name::<S>())
            .field("network", &self.config.network_name)
            .field("has_topology", &self.topology.is_some())
            .field("has_store", &self.store.is_some())
            .field("num_layers", &self.layers.len())
            .finish()
    }
}
