// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-stage arithmetic-unit budgets.

use std::fmt;

/// Caps on the number of arithmetic-unit instances a layer's stages may
/// occupy concurrently.
///
/// Work beyond the cap is time-multiplexed across additional cycles, so a
/// budget trades throughput against area. It can never change a numeric
/// result — the evaluation order within each reduction is fixed
/// regardless of how many units execute it.
///
/// The default is one unit per stage, the most area-frugal realization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ResourceBudget {
    /// Concurrent multiplier instances for the multiply stage.
    #[serde(default = "one")]
    pub multipliers: usize,
    /// Concurrent adder instances for the reduce-add stage.
    #[serde(default = "one")]
    pub adders: usize,
    /// Concurrent activation-function instances.
    #[serde(default = "one")]
    pub activators: usize,
}

fn one() -> usize {
    1
}

impl ResourceBudget {
    /// Creates a budget with the given multiplier and adder counts and a
    /// single activation unit.
    pub fn new(multipliers: usize, adders: usize) -> Self {
        Self {
            multipliers,
            adders,
            activators: 1,
        }
    }

    /// Returns `true` if every stage has at least one unit.
    pub fn is_realizable(&self) -> bool {
        self.multipliers > 0 && self.adders > 0 && self.activators > 0
    }
}

impl Default for ResourceBudget {
    fn default() -> Self {
        Self {
            multipliers: 1,
            adders: 1,
            activators: 1,
        }
    }
}

impl fmt::Display for ResourceBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}mul/{}add/{}act",
            self.multipliers, self.adders, self.activators,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_single_unit() {
        let b = ResourceBudget::default();
        assert_eq!(b, ResourceBudget::new(1, 1));
        assert!(b.is_realizable());
    }

    #[test]
    fn test_zero_units_not_realizable() {
        let b = ResourceBudget {
            multipliers: 0,
            ..Default::default()
        };
        assert!(!b.is_realizable());
    }

    #[test]
    fn test_display() {
        assert_eq!(ResourceBudget::new(49, 47).to_string(), "49mul/47add/1act");
    }

    #[test]
    fn test_serde_defaults_missing_fields() {
        let b: ResourceBudget = serde_json::from_str(r#"{"multipliers": 4}"#).unwrap();
        assert_eq!(b.multipliers, 4);
        assert_eq!(b.adders, 1);
        assert_eq!(b.activators, 1);
    }
}
