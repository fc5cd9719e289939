// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared helpers.

pub mod inspect;
pub mod run;
pub mod schedule;
pub mod stream;

use anyhow::Context;
use runtime::{CoeffSource, InferenceEngine, Ready, RuntimeConfig};
use std::path::{Path, PathBuf};

/// Initializes the tracing subscriber from the `-v` count.
pub fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

/// Loads the configuration file, or the built-in reference network when
/// no path is given.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<RuntimeConfig> {
    match path {
        Some(path) => RuntimeConfig::from_file(path)
            .with_context(|| format!("loading configuration '{}'", path.display())),
        None => {
            println!("  No configuration given — using the built-in reference network.");
            Ok(RuntimeConfig::default())
        }
    }
}

/// Reads the coefficient tables, or falls back to the synthetic set.
pub(crate) fn load_coefficients(path: Option<&Path>) -> anyhow::Result<CoeffSource> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading coefficients '{}'", path.display()))?;
            let tables: Vec<Vec<f64>> = serde_json::from_str(&content)
                .with_context(|| format!("parsing coefficients '{}'", path.display()))?;
            Ok(CoeffSource::Flat(tables))
        }
        None => {
            println!("  No coefficient file given — using the synthetic set.");
            Ok(CoeffSource::Synthetic)
        }
    }
}

/// Builds a ready engine from the common `--config`/`--coefficients`
/// options.
pub(crate) fn build_engine(
    config: Option<PathBuf>,
    coefficients: Option<PathBuf>,
) -> anyhow::Result<InferenceEngine<Ready>> {
    let config = load_config(config.as_deref())?;
    let source = load_coefficients(coefficients.as_deref())?;
    let engine = InferenceEngine::new(config)
        .load_coefficients(source)?
        .prepare()?;
    Ok(engine)
}

/// Reads a JSON vector of `f64` values.
pub(crate) fn read_vector(path: &Path) -> anyhow::Result<Vec<f64>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading vector '{}'", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing vector '{}'", path.display()))
}

/// Renders a fixed-point vector as a JSON array of `f64`.
pub(crate) fn render_vector(values: &[fixed_core::Fx]) -> String {
    let floats: Vec<f64> = values.iter().map(|v| v.to_f64()).collect();
    serde_json::to_string(&floats).expect("a float vector always serialises")
}
