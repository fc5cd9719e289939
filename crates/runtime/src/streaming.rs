// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The streaming realization: fixed-interval admission through a staged
//! pipeline.
//!
//! One asynchronous task per layer, connected by bounded single-slot
//! channels — the software analogue of pipeline registers. An admission
//! governor paces inputs at the configured interval, so several inputs
//! occupy different layers simultaneously while outputs still leave in
//! exactly the order inputs were admitted: the chain is linear, every
//! channel is FIFO, and no task reorders.
//!
//! Once admitted, an input always produces an output; there is no
//! cancellation path. Results are bit-identical to the batch engine's,
//! because each stage task runs the very same [`Layer::evaluate`].

use crate::{InferenceEngine, Layer, Ready, RuntimeError};
use fixed_core::Fx;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Capacity of the admission queue ahead of the pacing governor.
const INTAKE_DEPTH: usize = 8;

/// A launched streaming pipeline.
///
/// Admit inputs with [`admit`](Self::admit), read ordered results with
/// [`collect`](Self::collect), and tear down with
/// [`shutdown`](Self::shutdown). For whole batches,
/// [`evaluate_all`](Self::evaluate_all) wraps the full cycle.
pub struct StreamingPipeline {
    intake: Option<mpsc::Sender<Vec<Fx>>>,
    outlet: mpsc::Receiver<Vec<Fx>>,
    input_len: usize,
    handles: Vec<JoinHandle<()>>,
}

impl StreamingPipeline {
    /// Spawns the admission governor and one task per layer.
    ///
    /// The pipeline borrows nothing from the engine — layers are cloned
    /// (shared coefficient handles) into their tasks — so the engine
    /// remains usable for batch calls alongside the stream.
    pub fn launch(engine: &InferenceEngine<Ready>, admission_period: Duration) -> Self {
        // The timer rejects a zero period.
        let admission_period = admission_period.max(Duration::from_micros(1));
        let input_len = engine.topology().input_count();
        let mut handles = Vec::with_capacity(engine.layers().len() + 1);

        // Admission governor: forwards queued inputs at the fixed period.
        let (intake_tx, mut intake_rx) = mpsc::channel::<Vec<Fx>>(INTAKE_DEPTH);
        let (head_tx, head_rx) = mpsc::channel::<Vec<Fx>>(1);
        handles.push(tokio::spawn(async move {
            let mut ticker = time::interval(admission_period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            while let Some(input) = intake_rx.recv().await {
                ticker.tick().await;
                if head_tx.send(input).await.is_err() {
                    break;
                }
            }
        }));

        // One stage task per layer, single-slot channels between them.
        let layers: Vec<Layer> = engine.layers().to_vec();
        let mut prev_rx = head_rx;
        for layer in layers {
            let (tx, rx) = mpsc::channel::<Vec<Fx>>(1);
            let mut stage_rx = prev_rx;
            handles.push(tokio::spawn(async move {
                while let Some(vector) = stage_rx.recv().await {
                    let out = layer.evaluate(&vector);
                    if tx.send(out).await.is_err() {
                        break;
                    }
                }
            }));
            prev_rx = rx;
        }

        tracing::info!(
            "streaming pipeline launched: {} stages, {:?} admission period",
            handles.len() - 1,
            admission_period,
        );

        Self {
            intake: Some(intake_tx),
            outlet: prev_rx,
            input_len,
            handles,
        }
    }

    /// Queues one input for admission.
    ///
    /// Backpressure: awaits while the admission queue is full. The input
    /// length is the only validation, mirroring the batch entry point.
    pub async fn admit(&self, input: Vec<Fx>) -> Result<(), RuntimeError> {
        if input.len() != self.input_len {
            return Err(RuntimeError::InputLengthMismatch {
                expected: self.input_len,
                actual: input.len(),
            });
        }
        let intake = self.intake.as_ref().ok_or(RuntimeError::PipelineClosed)?;
        intake
            .send(input)
            .await
            .map_err(|_| RuntimeError::PipelineClosed)
    }

    /// Receives the next output, in admission order.
    ///
    /// Returns `None` once the intake is closed and every in-flight input
    /// has drained.
    pub async fn collect(&mut self) -> Option<Vec<Fx>> {
        self.outlet.recv().await
    }

    /// Closes the intake; in-flight inputs still complete.
    pub fn close_intake(&mut self) {
        self.intake = None;
    }

    /// Drains remaining outputs and joins every stage task.
    pub async fn shutdown(mut self) {
        self.intake = None;
        while self.outlet.recv().await.is_some() {}
        for handle in self.handles.drain(..) {
            let _ = handle.await;
        }
    }

    /// Runs a whole batch through a fresh pipeline: admits every input in
    /// order, collects every output in order, then shuts down.
    pub async fn evaluate_all(
        engine: &InferenceEngine<Ready>,
        inputs: Vec<Vec<Fx>>,
        admission_period: Duration,
    ) -> Result<Vec<Vec<Fx>>, RuntimeError> {
        let expected = engine.topology().input_count();
        for input in &inputs {
            if input.len() != expected {
                return Err(RuntimeError::InputLengthMismatch {
                    expected,
                    actual: input.len(),
                });
            }
        }

        let mut pipeline = Self::launch(engine, admission_period);
        let count = inputs.len();

        let feeder_tx = pipeline
            .intake
            .clone()
            .expect("intake is open right after launch");
        let feeder = tokio::spawn(async move {
            for input in inputs {
                if feeder_tx.send(input).await.is_err() {
                    break;
                }
            }
        });

        let mut outputs = Vec::with_capacity(count);
        while outputs.len() < count {
            match pipeline.collect().await {
                Some(output) => outputs.push(output),
                None => return Err(RuntimeError::PipelineClosed),
            }
        }

        let _ = feeder.await;
        pipeline.shutdown().await;
        Ok(outputs)
    }
}

impl std::fmt::Debug for StreamingPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingPipeline")
            .field("input_len", &self.input_len)
            .field("intake_open", &self.intake.is_some())
            .field("stages", &self.handles.len().saturating_sub(1))
            .finish()
    }
}
