// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `fixnn run`: one synchronous evaluation.

use fixed_core::Fx;
use std::path::PathBuf;

pub async fn execute(
    config: Option<PathBuf>,
    coefficients: Option<PathBuf>,
    input: Option<PathBuf>,
) -> anyhow::Result<()> {
    println!("fixnn · run");
    println!();

    let engine = super::build_engine(config, coefficients)?;
    println!("  {}", engine.topology().summary());

    let expected = engine.topology().input_count();
    let input_values: Vec<Fx> = match input {
        Some(path) => super::read_vector(&path)?
            .into_iter()
            .map(Fx::from_f64)
            .collect(),
        None => {
            println!("  No input file given — using the all-zero vector.");
            vec![Fx::ZERO; expected]
        }
    };

    let output = engine.evaluate(&input_values)?;

    println!();
    println!("  {}", output.metrics.summary());
    println!("  output: {}", super::render_vector(&output.values));

    Ok(())
}
