// src/strategy/traits.rs

use crate::engine::Totals;
use crate::scenario::ScenarioParams;
use std::fmt::Debug;

/// Reduces an evaluated configuration to the scalar the optimizer climbs.
///
/// We require `Debug` so a run can log which objective it used, and
/// `Send` + `Sync` so objectives can be shared across sweep drivers.
pub trait Objective: Debug + Send + Sync {
    /// Higher is better. Must stay within 0..=1000.
    fn score(&self, totals: &Totals, params: &ScenarioParams) -> u32;
}
