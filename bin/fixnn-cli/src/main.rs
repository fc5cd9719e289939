// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # fixnn
//!
//! Command-line interface for the fixnn inference pipeline.
//!
//! ## Usage
//! ```bash
//! # One synchronous evaluation (synthetic coefficients, zero input)
//! fixnn run --config net.toml
//!
//! # Stream a batch through the pipelined realization
//! fixnn stream --config net.toml --inputs inputs.json --period-us 250
//!
//! # Print the layer/timing table
//! fixnn inspect --config net.toml
//!
//! # Size stage budgets for a target initiation interval
//! fixnn schedule --config net.toml --target-interval 128
//! ```
//!
//! Without `--config`, every command falls back to the built-in reference
//! network (784→8→16→12→8→40).

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fixnn",
    about = "Bit-exact fixed-point feed-forward inference pipeline",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one input vector synchronously.
    Run {
        /// Path to a TOML network configuration.
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// JSON file with one flat coefficient table per layer
        /// (row-major weights, then bias, then gains for linear layers).
        /// Omit for the deterministic synthetic set.
        #[arg(short = 'w', long)]
        coefficients: Option<std::path::PathBuf>,

        /// JSON file with the input vector. Omit for an all-zero input.
        #[arg(short, long)]
        input: Option<std::path::PathBuf>,
    },

    /// Admit a batch of inputs through the streaming pipeline.
    Stream {
        /// Path to a TOML network configuration.
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// JSON file with one flat coefficient table per layer.
        #[arg(short = 'w', long)]
        coefficients: Option<std::path::PathBuf>,

        /// JSON file with a list of input vectors.
        #[arg(short, long)]
        inputs: std::path::PathBuf,

        /// Admission period in microseconds (overrides the config).
        #[arg(long)]
        period_us: Option<u64>,
    },

    /// Print the network's layer chain and cycle model.
    Inspect {
        /// Path to a TOML network configuration.
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },

    /// Size stage budgets for a target initiation interval.
    Schedule {
        /// Path to a TOML network configuration.
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Target initiation interval in cycles.
        #[arg(short, long)]
        target_interval: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            coefficients,
            input,
        } => commands::run::execute(config, coefficients, input).await,
        Commands::Stream {
            config,
            coefficients,
            inputs,
            period_us,
        } => commands::stream::execute(config, coefficients, inputs, period_us).await,
        Commands::Inspect { config } => commands::inspect::execute(config).await,
        Commands::Schedule {
            config,
            target_interval,
        } => commands::schedule::execute(config, target_interval).await,
    }
}
