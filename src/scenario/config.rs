// src/scenario/config.rs

use serde::{Deserialize, Serialize};

/// Weights of the scalar fitness function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub cost: f64,
    pub emissions: f64,
    pub inventory_emissions: f64,
    pub reliability: f64,
    pub service: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            cost: 250.0,
            emissions: 200.0,
            inventory_emissions: 80.0,
            reliability: 1.5,
            service: 12.0,
        }
    }
}

/// Scenario-wide constants. Assumed valid (targets positive); not re-checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParams {
    /// LTF: share of ADU x DLT held as red base.
    pub lead_time_factor: f64,
    /// VF: red safety as a share of red base.
    pub variability_factor: f64,
    /// Inventory emissions per unit of holding rate, when a node has no explicit factor.
    pub inventory_emissions_factor: f64,
    /// Maximum service lead time (days) before penalties apply.
    pub service_target: f64,
    pub target_cost: f64,
    pub target_emissions: f64,
    pub target_inventory_emissions: f64,
    pub weights: ScoreWeights,
    /// Price per unit of emissions. Only used by reporting and `CarbonTaxScore`.
    pub carbon_tax_rate: f64,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            lead_time_factor: 0.5,
            variability_factor: 0.5,
            inventory_emissions_factor: 0.2,
            service_target: 8.0,
            target_cost: 2500.0,
            target_emissions: 900.0,
            target_inventory_emissions: 60.0,
            weights: ScoreWeights::default(),
            carbon_tax_rate: 0.0,
        }
    }
}
