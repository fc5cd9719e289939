// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Runtime configuration loaded from TOML files or constructed
//! programmatically.
//!
//! # TOML Format
//! ```toml
//! network_name        = "reference"
//! numeric_format      = "q16.16"
//! realization         = "batch"        # or "streaming"
//! admission_period_us = 250            # streaming only
//! enable_profiling    = true
//! # target_interval   = 128            # optional: auto-size budgets
//!
//! [[layer]]
//! name        = "hidden.0"
//! inputs      = 784
//! outputs     = 8
//! multipliers = 49
//! adders      = 47
//! activation  = "tansig"
//! ```

use crate::RuntimeError;
use fixed_core::{FixedFormat, Fx};
use net_ir::{timing, Activation, LayerSpec, ResourceBudget, Topology, Validated};
use std::path::Path;

/// Which realization of the evaluation contract to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Realization {
    /// One synchronous call per input.
    Batch,
    /// Fixed-interval admission through the staged pipeline.
    Streaming,
}

/// One `[[layer]]` table in the configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LayerEntry {
    /// Layer name; defaults to `"hidden.<index>"`.
    pub name: Option<String>,
    /// Input vector length.
    pub inputs: usize,
    /// Output vector length.
    pub outputs: usize,
    /// Concurrent multiplier instances.
    #[serde(default = "one")]
    pub multipliers: usize,
    /// Concurrent adder instances.
    #[serde(default = "one")]
    pub adders: usize,
    /// Concurrent activation-function instances.
    #[serde(default = "one")]
    pub activators: usize,
    /// Activation name: `"tansig"` (alias `"tanh"`) or `"linear"`
    /// (alias `"purelin"`).
    #[serde(default = "default_activation")]
    pub activation: String,
}

fn one() -> usize {
    1
}

fn default_activation() -> String {
    "tansig".to_string()
}

fn default_true() -> bool {
    true
}

/// Configuration for the inference runtime.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RuntimeConfig {
    /// Human-readable network name.
    #[serde(default = "default_name")]
    pub network_name: String,
    /// Numeric format string (must match the compiled scalar).
    #[serde(default = "default_format")]
    pub numeric_format: String,
    /// Realization name: `"batch"` or `"streaming"`.
    #[serde(default = "default_realization")]
    pub realization: String,
    /// Target initiation interval in cycles; when set, stage budgets are
    /// auto-sized to fit it and the per-layer unit counts are ignored.
    pub target_interval: Option<u64>,
    /// Admission period for the streaming realization, in microseconds.
    pub admission_period_us: Option<u64>,
    /// Whether to collect per-layer profiling metrics.
    #[serde(default = "default_true")]
    pub enable_profiling: bool,
    /// Ordered layer chain.
    #[serde(rename = "layer")]
    pub layers: Vec<LayerEntry>,
}

fn default_name() -> String {
    "network".to_string()
}

fn default_format() -> String {
    "q16.16".to_string()
}

fn default_realization() -> String {
    "batch".to_string()
}

impl RuntimeConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, RuntimeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RuntimeError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, RuntimeError> {
        toml::from_str(toml_str)
            .map_err(|e| RuntimeError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, RuntimeError> {
        toml::to_string_pretty(self)
            .map_err(|e| RuntimeError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Parses and checks the numeric format against the compiled scalar.
    pub fn check_format(&self) -> Result<FixedFormat, RuntimeError> {
        let configured = FixedFormat::parse(&self.numeric_format)?;
        let compiled = Fx::format();
        if configured != compiled {
            return Err(RuntimeError::FormatMismatch {
                configured,
                compiled,
            });
        }
        Ok(configured)
    }

    /// Resolves the realization name.
    pub fn resolve_realization(&self) -> Result<Realization, RuntimeError> {
        match self.realization.to_lowercase().as_str() {
            "batch" => Ok(Realization::Batch),
            "streaming" | "stream" => Ok(Realization::Streaming),
            other => Err(RuntimeError::ConfigError(format!(
                "unknown realization '{other}'; expected 'batch' or 'streaming'"
            ))),
        }
    }

    /// Builds and validates the topology, applying the target-interval
    /// budget sizing when configured.
    pub fn build_topology(&self) -> Result<Topology<Validated>, RuntimeError> {
        let mut specs = Vec::with_capacity(self.layers.len());
        for (i, entry) in self.layers.iter().enumerate() {
            let activation = Activation::from_str_loose(&entry.activation).ok_or_else(|| {
                RuntimeError::ConfigError(format!(
                    "layer {i}: unknown activation '{}'",
                    entry.activation
                ))
            })?;
            specs.push(LayerSpec {
                name: entry
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("hidden.{i}")),
                index: i,
                inputs: entry.inputs,
                outputs: entry.outputs,
                budget: ResourceBudget {
                    multipliers: entry.multipliers,
                    adders: entry.adders,
                    activators: entry.activators,
                },
                activation,
            });
        }

        let topology = Topology::new(self.network_name.clone(), specs).validate()?;
        Ok(match self.target_interval {
            Some(target) => timing::fit_to_interval(&topology, target),
            None => topology,
        })
    }

    /// The streaming admission period. Never zero — the admission
    /// governor's timer requires a positive interval.
    pub fn admission_period(&self) -> std::time::Duration {
        std::time::Duration::from_micros(self.admission_period_us.unwrap_or(250).max(1))
    }
}

impl Default for RuntimeConfig {
    /// The reference network: 784→8→16→12→8→40, tansig throughout, with
    /// the hand-tuned per-layer budgets.
    fn default() -> Self {
        let dims: [(usize, usize, usize, usize); 5] = [
            (784, 8, 49, 47),
            (8, 16, 1, 1),
            (16, 12, 2, 2),
            (12, 8, 1, 1),
            (8, 40, 3, 3),
        ];
        Self {
            network_name: "reference".to_string(),
            numeric_format: default_format(),
            realization: default_realization(),
            target_interval: None,
            admission_period_us: None,
            enable_profiling: true,
            layers: dims
                .iter()
                .map(|&(inputs, outputs, multipliers, adders)| LayerEntry {
                    name: None,
                    inputs,
                    outputs,
                    multipliers,
                    adders,
                    activators: 1,
                    activation: default_activation(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_network() {
        let c = RuntimeConfig::default();
        let t = c.build_topology().unwrap();
        assert_eq!(t.num_layers(), 5);
        assert_eq!(t.input_count(), 784);
        assert_eq!(t.output_count(), 40);
        assert_eq!(t.layer(0).unwrap().budget.multipliers, 49);
        assert_eq!(t.layer(4).unwrap().budget.adders, 3);
    }

    #[test]
    fn test_check_format_ok() {
        let c = RuntimeConfig::default();
        assert_eq!(c.check_format().unwrap(), Fx::format());
    }

    #[test]
    fn test_check_format_mismatch() {
        let c = RuntimeConfig {
            numeric_format: "q8.24".into(),
            ..Default::default()
        };
        assert!(matches!(
            c.check_format(),
            Err(RuntimeError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
network_name = "tiny"
numeric_format = "q16.16"
realization = "streaming"
admission_period_us = 100

[[layer]]
inputs = 4
outputs = 2
multipliers = 2
adders = 2

[[layer]]
name = "head"
inputs = 2
outputs = 1
activation = "tanh"
"#;
        let c = RuntimeConfig::from_toml(toml).unwrap();
        assert_eq!(c.network_name, "tiny");
        assert_eq!(c.resolve_realization().unwrap(), Realization::Streaming);
        assert_eq!(c.admission_period(), std::time::Duration::from_micros(100));

        let t = c.build_topology().unwrap();
        assert_eq!(t.num_layers(), 2);
        assert_eq!(t.layer(0).unwrap().name, "hidden.0");
        assert_eq!(t.layer(1).unwrap().name, "head");
        assert_eq!(t.layer(1).unwrap().activation, Activation::Tansig);
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = RuntimeConfig::default();
        let toml = c.to_toml().unwrap();
        let back = RuntimeConfig::from_toml(&toml).unwrap();
        assert_eq!(back.network_name, c.network_name);
        assert_eq!(back.layers.len(), c.layers.len());
        assert_eq!(back.layers[0].multipliers, 49);
    }

    #[test]
    fn test_unknown_activation_rejected() {
        let mut c = RuntimeConfig::default();
        c.layers[0].activation = "relu".into();
        assert!(matches!(
            c.build_topology(),
            Err(RuntimeError::ConfigError(_))
        ));
    }

    #[test]
    fn test_unknown_realization_rejected() {
        let c = RuntimeConfig {
            realization: "quantum".into(),
            ..Default::default()
        };
        assert!(c.resolve_realization().is_err());
    }

    #[test]
    fn test_target_interval_resizes_budgets() {
        let c = RuntimeConfig {
            target_interval: Some(128),
            ..Default::default()
        };
        let t = c.build_topology().unwrap();
        // 784×8 products / 128 cycles → 49 multipliers.
        assert_eq!(t.layer(0).unwrap().budget.multipliers, 49);
        let timing = net_ir::timing::PipelineTiming::of(&t);
        assert!(timing.initiation_interval() <= 128);
    }

    #[test]
    fn test_dimension_mismatch_fails_at_build() {
        let mut c = RuntimeConfig::default();
        c.layers[1].inputs = 9; // layer 0 produces 8
        assert!(matches!(
            c.build_topology(),
            Err(RuntimeError::Topology(_))
        ));
    }
}
