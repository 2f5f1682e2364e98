// src/strategy/implementations.rs

use crate::engine::score::score_with_cost;
use crate::engine::Totals;
use crate::scenario::ScenarioParams;
use crate::strategy::traits::Objective;

/// Cost charged per unit of emissions above a cap.
pub const CAP_EXCESS_PENALTY_PER_UNIT: f64 = 5.0;

// =========================================================================
// 1. Weighted Score
// =========================================================================

/// The standard fitness: cost, emissions, inventory emissions, reliability
/// and service lead time against the scenario targets and weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedScore;

impl Objective for WeightedScore {
    fn score(&self, totals: &Totals, params: &ScenarioParams) -> u32 {
        score_with_cost(totals.total_cost, totals, params)
    }
}

// =========================================================================
// 2. Carbon Tax Score
// =========================================================================

/// Weighted score where every unit of emissions is also paid for.
///
/// Cost term = total cost + rate * total emissions. Used by the carbon tax
/// sweep to see how buffer and supplier choices shift as carbon gets pricier.
#[derive(Debug, Clone, Copy)]
pub struct CarbonTaxScore {
    pub rate: f64,
}

impl CarbonTaxScore {
    pub fn new(rate: f64) -> Self {
        Self {
            rate: rate.max(0.0),
        }
    }
}

impl Objective for CarbonTaxScore {
    fn score(&self, totals: &Totals, params: &ScenarioParams) -> u32 {
        let taxed = totals.total_cost + self.rate * totals.total_emissions;
        score_with_cost(taxed, totals, params)
    }
}

// =========================================================================
// 3. Carbon Cap Score
// =========================================================================

/// Weighted score with a soft emissions cap.
///
/// Every unit of emissions above `cap` adds `penalty_per_unit` to the cost
/// term. Below the cap this is exactly the weighted score.
#[derive(Debug, Clone, Copy)]
pub struct CarbonCapScore {
    pub cap: f64,
    pub penalty_per_unit: f64,
}

impl CarbonCapScore {
    pub fn new(cap: f64) -> Self {
        Self {
            cap: cap.max(0.0),
            penalty_per_unit: CAP_EXCESS_PENALTY_PER_UNIT,
        }
    }

    pub fn excess(&self, totals: &Totals) -> f64 {
        (totals.total_emissions - self.cap).max(0.0)
    }
}

impl Objective for CarbonCapScore {
    fn score(&self, totals: &Totals, params: &ScenarioParams) -> u32 {
        let capped = totals.total_cost + self.penalty_per_unit * self.excess(totals);
        score_with_cost(capped, totals, params)
    }
}

// =========================================================================
// 4. Hybrid Carbon Score
// =========================================================================

/// Carbon tax on all emissions plus the cap penalty on the excess.
#[derive(Debug, Clone, Copy)]
pub struct HybridCarbonScore {
    pub tax: CarbonTaxScore,
    pub cap: CarbonCapScore,
}

impl HybridCarbonScore {
    pub fn new(rate: f64, cap: f64) -> Self {
        Self {
            tax: CarbonTaxScore::new(rate),
            cap: CarbonCapScore::new(cap),
        }
    }
}

impl Objective for HybridCarbonScore {
    fn score(&self, totals: &Totals, params: &ScenarioParams) -> u32 {
        let cost = totals.total_cost
            + self.tax.rate * totals.total_emissions
            + self.cap.penalty_per_unit * self.cap.excess(totals);
        score_with_cost(cost, totals, params)
    }
}
