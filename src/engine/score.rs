// src/engine/score.rs

use crate::engine::totals::Totals;
use crate::scenario::ScenarioParams;

pub const MAX_SCORE: f64 = 1000.0;
const MAX_NORMALIZED: f64 = 2.0;

/// Scalar fitness of a configuration, 0..=1000 (higher is better).
pub fn score(totals: &Totals, params: &ScenarioParams) -> u32 {
    score_with_cost(totals.total_cost, totals, params)
}

/// Same formula with the cost term supplied by the caller.
///
/// Degenerate evaluations (no cost or no emissions) score 0.
pub fn score_with_cost(cost: f64, totals: &Totals, params: &ScenarioParams) -> u32 {
    if cost <= 0.0 || totals.total_emissions <= 0.0 {
        return 0;
    }

    let norm = |value: f64, target: f64| (value / target).clamp(0.0, MAX_NORMALIZED);
    let norm_cost = norm(cost, params.target_cost);
    let norm_emissions = norm(totals.total_emissions, params.target_emissions);
    let norm_inventory = norm(totals.inventory_emissions, params.target_inventory_emissions);

    let w = &params.weights;
    let raw = MAX_SCORE - norm_cost * w.cost - norm_emissions * w.emissions
        - norm_inventory * w.inventory_emissions
        + totals.reliability * w.reliability
        - totals.service_lead * w.service;

    raw.clamp(0.0, MAX_SCORE).round() as u32
}
