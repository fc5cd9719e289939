// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-evaluation profiling metrics.
//!
//! Metrics are collected into the evaluation's own output — never stored
//! on the engine — so concurrent callers cannot observe each other.

use std::time::Duration;

/// Timing for a single layer within one evaluation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LayerMetrics {
    /// Layer name.
    pub layer_name: String,
    /// Wall-clock time spent in the layer's three stages.
    pub compute_duration: Duration,
}

/// Aggregate timing for one complete evaluation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EvaluationMetrics {
    /// Total wall-clock time for the call.
    pub total_duration: Duration,
    /// Per-layer timings (empty when profiling is disabled).
    pub layer_metrics: Vec<LayerMetrics>,
}

impl EvaluationMetrics {
    /// Creates an empty metrics container.
    pub fn new() -> Self {
        Self {
            total_duration: Duration::ZERO,
            layer_metrics: Vec::new(),
        }
    }

    /// Records one layer's compute time.
    pub fn record_layer(&mut self, name: String, compute: Duration) {
        self.layer_metrics.push(LayerMetrics {
            layer_name: name,
            compute_duration: compute,
        });
    }

    /// Finalises with the call's total wall-clock time.
    pub fn finalise(&mut self, total: Duration) {
        self.total_duration = total;
    }

    /// Sum of the recorded per-layer times.
    pub fn total_compute_duration(&self) -> Duration {
        self.layer_metrics.iter().map(|l| l.compute_duration).sum()
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "Evaluation: {:.3}ms total, {} layers profiled, {:.3}ms layer compute",
            self.total_duration.as_secs_f64() * 1000.0,
            self.layer_metrics.len(),
            self.total_compute_duration().as_secs_f64() * 1000.0,
        )
    }
}

impl Default for EvaluationMetrics {
    fn default() -> Self {
        Self::new()
    }
}
