// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `fixnn schedule`: size stage budgets for a target initiation interval.

use net_ir::timing::{fit_to_interval, PipelineTiming};
use std::path::PathBuf;

pub async fn execute(config: Option<PathBuf>, target_interval: u64) -> anyhow::Result<()> {
    println!("fixnn · schedule (target interval: {target_interval} cycles)");
    println!();

    let config = super::load_config(config.as_deref())?;
    let topology = config.build_topology()?;

    let before = PipelineTiming::of(&topology);
    println!("  As configured:");
    println!("{}", before.table());

    let fitted = fit_to_interval(&topology, target_interval);
    let after = PipelineTiming::of(&fitted);
    println!("  Fitted to {target_interval} cycles:");
    println!("{}", after.table());

    for spec in fitted.iter_layers() {
        println!("  {}", spec.summary());
    }

    Ok(())
}
