// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `fixnn inspect`: print the layer chain and the cycle model.

use net_ir::timing::PipelineTiming;
use std::path::PathBuf;

pub async fn execute(config: Option<PathBuf>) -> anyhow::Result<()> {
    println!("fixnn · inspect");
    println!();

    let config = super::load_config(config.as_deref())?;
    println!("  numeric format: {}", config.check_format()?);
    println!("  realization:    {:?}", config.resolve_realization()?);
    println!();

    let topology = config.build_topology()?;
    println!("{topology}");

    let timing = PipelineTiming::of(&topology);
    println!("{}", timing.table());

    Ok(())
}
