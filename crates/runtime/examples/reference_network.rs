// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Evaluates the reference network (784→8→16→12→8→40) with synthetic
//! coefficients and prints the cycle model and one evaluation's metrics.
//!
//! ```bash
//! cargo run --example reference_network
//! ```

use fixed_core::Fx;
use runtime::{CoeffSource, InferenceEngine, RuntimeConfig};

fn main() -> Result<(), runtime::RuntimeError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let engine = InferenceEngine::new(RuntimeConfig::default())
        .load_coefficients(CoeffSource::Synthetic)?
        .prepare()?;

    println!("{}", engine.topology().summary());
    println!("{}", engine.timing().table());

    let input: Vec<Fx> = (0..784)
        .map(|k| Fx::from_f64((k as f64 / 784.0) * 2.0 - 1.0))
        .collect();

    let output = engine.evaluate(&input)?;
    println!("{}", output.metrics.summary());

    let head: Vec<String> = output
        .values
        .iter()
        .take(8)
        .map(|v| format!("{:.6}", v.to_f64()))
        .collect();
    println!("first outputs: [{}, ...]", head.join(", "));

    Ok(())
}
