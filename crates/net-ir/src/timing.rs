// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The cycle model: how long each stage occupies its arithmetic units.
//!
//! Costs are abstract cycles with unit cost 1 per multiply, add, and LUT
//! lookup. A stage with `work` operations and `units` instances needs
//! `ceil(work / units)` cycles; the reduce-add stage is additionally
//! bounded below by its adder-tree depth, `ceil(log2(inputs + 1))`, which
//! no number of adders can beat.
//!
//! In a pipelined realization the initiation interval is the slowest
//! stage's cycle count and the latency is the sum over all stages. The
//! model drives [`fit_to_interval`], which grows unit counts until every
//! stage fits a target interval — the throughput/area exploration knob.
//! None of this can affect numeric results.

use crate::{LayerSpec, ResourceBudget, Topology, Validated};
use std::fmt::Write as _;

/// Occupancy of one stage: its unit count and derived cycle count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTiming {
    /// Arithmetic-unit instances allotted to the stage.
    pub units: usize,
    /// Cycles the stage occupies per admitted input.
    pub cycles: u64,
}

/// Cycle breakdown for one layer's three stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerTiming {
    pub name: String,
    pub index: usize,
    pub inputs: usize,
    pub outputs: usize,
    pub multiply: StageTiming,
    pub reduce_add: StageTiming,
    pub activation: StageTiming,
}

impl LayerTiming {
    fn of(spec: &LayerSpec) -> Self {
        Self {
            name: spec.name.clone(),
            index: spec.index,
            inputs: spec.inputs,
            outputs: spec.outputs,
            multiply: StageTiming {
                units: spec.budget.multipliers,
                cycles: ceil_div(multiply_work(spec), spec.budget.multipliers as u64),
            },
            reduce_add: StageTiming {
                units: spec.budget.adders,
                cycles: ceil_div(reduce_work(spec), spec.budget.adders as u64)
                    .max(adder_tree_depth(spec.inputs)),
            },
            activation: StageTiming {
                units: spec.budget.activators,
                cycles: ceil_div(spec.outputs as u64, spec.budget.activators as u64),
            },
        }
    }

    /// Total cycles this layer contributes to pipeline latency.
    pub fn total_cycles(&self) -> u64 {
        self.multiply.cycles + self.reduce_add.cycles + self.activation.cycles
    }

    /// The slowest of the three stages.
    pub fn max_stage_cycles(&self) -> u64 {
        self.multiply
            .cycles
            .max(self.reduce_add.cycles)
            .max(self.activation.cycles)
    }
}

/// Cycle model for a whole pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineTiming {
    pub layers: Vec<LayerTiming>,
}

impl PipelineTiming {
    /// Derives the timing of every stage in the topology.
    pub fn of(topology: &Topology<Validated>) -> Self {
        Self {
            layers: topology.iter_layers().map(LayerTiming::of).collect(),
        }
    }

    /// The initiation interval: cycles between successive admissions in a
    /// pipelined realization, i.e. the slowest stage anywhere.
    pub fn initiation_interval(&self) -> u64 {
        self.layers
            .iter()
            .map(LayerTiming::max_stage_cycles)
            .max()
            .unwrap_or(0)
    }

    /// The pipeline latency: cycles from an input's admission to its
    /// output's availability.
    pub fn latency(&self) -> u64 {
        self.layers.iter().map(LayerTiming::total_cycles).sum()
    }

    /// Renders the per-stage occupancy table.
    pub fn table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "| LAYER |            NAME |      STAGE | INPUTS | OUTPUTS | UNITS | CYCLES |"
        );
        for layer in &self.layers {
            for (stage, timing) in [
                ("multiply", layer.multiply),
                ("reduce-add", layer.reduce_add),
                ("activation", layer.activation),
            ] {
                let _ = writeln!(
                    out,
                    "| {:5} | {:>15} | {:>10} | {:6} | {:7} | {:5} | {:6} |",
                    layer.index, layer.name, stage, layer.inputs, layer.outputs,
                    timing.units, timing.cycles,
                );
            }
        }
        let _ = writeln!(
            out,
            "Initiation interval: {} cycles, latency: {} cycles",
            self.initiation_interval(),
            self.latency(),
        );
        out
    }
}

/// Grows stage budgets until every stage fits `target` cycles.
///
/// For stages whose physical minimum (the adder-tree depth) exceeds the
/// target, the minimum wins and a warning is logged — matching the
/// behaviour of requesting an interval the hardware cannot reach.
/// Dimensions are untouched, so the result stays validated.
pub fn fit_to_interval(topology: &Topology<Validated>, target: u64) -> Topology<Validated> {
    let target = target.max(1);
    let layers: Vec<LayerSpec> = topology
        .iter_layers()
        .map(|spec| {
            let depth = adder_tree_depth(spec.inputs);
            if depth > target {
                tracing::warn!(
                    "layer '{}': requested interval {} is below the adder-tree \
                     minimum of {} cycles; using the minimum",
                    spec.name,
                    target,
                    depth,
                );
            }
            let add_target = target.max(depth);
            let budget = ResourceBudget {
                multipliers: units_for(multiply_work(spec), target),
                adders: units_for(reduce_work(spec), add_target),
                activators: units_for(spec.outputs as u64, target),
            };
            LayerSpec {
                budget,
                ..spec.clone()
            }
        })
        .collect();
    topology.with_layers(layers)
}

// ── Cost helpers ───────────────────────────────────────────────────

fn multiply_work(spec: &LayerSpec) -> u64 {
    (spec.outputs * spec.inputs) as u64
}

/// Each output row folds `inputs` partial products into the bias.
fn reduce_work(spec: &LayerSpec) -> u64 {
    (spec.outputs * spec.inputs) as u64
}

/// Depth of a balanced adder tree over `inputs + 1` terms.
fn adder_tree_depth(inputs: usize) -> u64 {
    let terms = (inputs + 1) as u64;
    (u64::BITS - (terms - 1).leading_zeros()) as u64
}

fn ceil_div(work: u64, units: u64) -> u64 {
    work.div_ceil(units)
}

/// Smallest unit count that fits `work` into `target` cycles.
fn units_for(work: u64, target: u64) -> usize {
    ceil_div(work, target).max(1) as usize
}
