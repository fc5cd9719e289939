// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # runtime
//!
//! The inference pipeline: stage kernels, layer composition, and the two
//! realizations of the evaluation contract.
//!
//! A layer is the composition of three stage kernels —
//! elementwise multiply, reduce-add-with-bias, activation — each bounded
//! by its arithmetic-unit budget. Five such layers chain into one fixed
//! evaluation path.
//!
//! # Type-State Pipeline
//! Engine construction is compile-time ordered:
//! ```text
//! InferenceEngine<Idle> → InferenceEngine<Loaded> → InferenceEngine<Ready>
//! ```
//! `Idle → Loaded` validates the topology, checks the numeric format, and
//! loads coefficients exactly once. `Loaded → Ready` instantiates the
//! layer chain. Only a `Ready` engine can evaluate, so every fatal
//! condition has already surfaced before the first input is accepted.
//!
//! # Realizations
//! - **Batch**: [`InferenceEngine::evaluate`] — synchronous, one call per
//!   input, no suspension points, callable concurrently from independent
//!   threads (the coefficient store is the only shared state and is
//!   read-only).
//! - **Streaming**: [`StreamingPipeline`] — one asynchronous task per
//!   layer, inputs admitted at a fixed interval, outputs emitted in
//!   strict FIFO order, bit-identical to the batch results.

mod config;
mod engine;
mod error;
mod layer;
mod metrics;
mod stage;
mod streaming;

pub use config::{LayerEntry, Realization, RuntimeConfig};
pub use engine::{
    CoeffSource, EngineState, EvaluationOutput, Idle, InferenceEngine, Loaded, Ready,
};
pub use error::RuntimeError;
pub use layer::Layer;
pub use metrics::{EvaluationMetrics, LayerMetrics};
pub use stage::{activate, multiply, reduce_add};
pub use streaming::StreamingPipeline;
