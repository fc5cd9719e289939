// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `fixnn stream`: fixed-interval admission through the staged pipeline.

use anyhow::Context;
use fixed_core::Fx;
use runtime::StreamingPipeline;
use std::path::PathBuf;
use std::time::Duration;

pub async fn execute(
    config: Option<PathBuf>,
    coefficients: Option<PathBuf>,
    inputs: PathBuf,
    period_us: Option<u64>,
) -> anyhow::Result<()> {
    println!("fixnn · stream");
    println!();

    let loaded_config = super::load_config(config.as_deref())?;
    let period = period_us
        .map(Duration::from_micros)
        .unwrap_or_else(|| loaded_config.admission_period());

    let source = super::load_coefficients(coefficients.as_deref())?;
    let engine = runtime::InferenceEngine::new(loaded_config)
        .load_coefficients(source)?
        .prepare()?;
    println!("  {}", engine.topology().summary());
    println!("  admission period: {period:?}");

    let content = std::fs::read_to_string(&inputs)
        .with_context(|| format!("reading inputs '{}'", inputs.display()))?;
    let batches: Vec<Vec<f64>> = serde_json::from_str(&content)
        .with_context(|| format!("parsing inputs '{}'", inputs.display()))?;
    let vectors: Vec<Vec<Fx>> = batches
        .into_iter()
        .map(|v| v.into_iter().map(Fx::from_f64).collect())
        .collect();
    println!("  admitting {} inputs", vectors.len());
    println!();

    let outputs = StreamingPipeline::evaluate_all(&engine, vectors, period).await?;

    for (i, output) in outputs.iter().enumerate() {
        println!("  [{i}] {}", super::render_vector(output));
    }

    Ok(())
}
