// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # coeff-store
//!
//! The coefficient store: per-layer weight matrices, bias vectors, and
//! (for linear activations) gain vectors.
//!
//! A [`CoeffStore`] is built exactly once, before the first evaluation,
//! from flat ordered `f64` literal tables — row-major weights, then bias,
//! then gains — and is read-only afterwards. There is no mutation API, so
//! concurrent readers never need synchronization.
//!
//! Loading checks dimensions against a validated topology and fails fatally
//! on any mismatch; coefficient *content* is deliberately not validated.
//! For tests and benchmarks, [`CoeffStore::synthetic`] produces a
//! deterministic pattern without any external data.

mod error;
mod loader;
mod store;

pub use error::CoeffError;
pub use store::{CoeffStore, LayerCoefficients};
