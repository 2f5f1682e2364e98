// src/study/sweeps.rs

use crate::engine::{evaluate, score, Totals};
use crate::model::Configuration;
use crate::scenario::{Scenario, ScenarioParams};
use crate::strategy::{
    optimize, optimize_with, CarbonCapScore, CarbonTaxScore, HybridCarbonScore, Objective,
};
use serde::Serialize;
use tracing::debug;

/// How emissions were priced when a sweep point was optimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CarbonPolicy {
    Unpriced,
    Tax,
    Cap,
    Hybrid,
}

/// One point of a parameter sweep, ready for CSV export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub instance_id: String,
    pub strategy: CarbonPolicy,
    pub parameter: String,
    pub value: f64,
    pub tax_rate: f64,
    pub emission_cap: Option<f64>,
    pub total_cost: f64,
    pub total_cost_with_tax: f64,
    pub total_emissions: f64,
    pub buffer_count: usize,
    pub service_lead: f64,
    pub days_inventory_outstanding: f64,
    pub score: u32,
}

impl SweepRow {
    fn new(
        scenario: &Scenario,
        strategy: CarbonPolicy,
        emission_cap: Option<f64>,
        (parameter, value): (&str, f64),
        totals: &Totals,
        score: u32,
    ) -> Self {
        Self {
            instance_id: scenario.name().to_string(),
            strategy,
            parameter: parameter.to_string(),
            value,
            tax_rate: scenario.params().carbon_tax_rate,
            emission_cap,
            total_cost: totals.total_cost,
            total_cost_with_tax: totals.total_cost_with_tax,
            total_emissions: totals.total_emissions,
            buffer_count: totals.buffer_count,
            service_lead: totals.service_lead,
            days_inventory_outstanding: totals.days_inventory_outstanding,
            score,
        }
    }
}

fn with_tax(scenario: &Scenario, rate: f64) -> Scenario {
    scenario.with_params(ScenarioParams {
        carbon_tax_rate: rate.max(0.0),
        ..scenario.params().clone()
    })
}

/// Emissions of `config` scaled to `pct` percent.
fn cap_from_pct(scenario: &Scenario, config: &Configuration, pct: f64) -> f64 {
    evaluate(scenario, config).total_emissions * pct.max(0.0) / 100.0
}

fn priced_point(
    scenario: &Scenario,
    config: &Configuration,
    strategy: CarbonPolicy,
    emission_cap: Option<f64>,
    parameter: (&str, f64),
    objective: &dyn Objective,
) -> SweepRow {
    let result = optimize_with(scenario, config, objective);
    debug!(?strategy, value = parameter.1, score = result.score, "carbon policy point");
    SweepRow::new(
        scenario,
        strategy,
        emission_cap,
        parameter,
        &result.totals,
        result.score,
    )
}

/// Re-optimizes from `config` for each promised service time.
pub fn service_target_sweep(
    scenario: &Scenario,
    config: &Configuration,
    targets: &[f64],
) -> Vec<SweepRow> {
    targets
        .iter()
        .map(|&target| {
            let variant = scenario.with_params(ScenarioParams {
                service_target: target,
                ..scenario.params().clone()
            });
            let result = optimize(&variant, config);
            debug!(target, score = result.score, "service target point");
            SweepRow::new(
                &variant,
                CarbonPolicy::Unpriced,
                None,
                ("service_target", target),
                &result.totals,
                result.score,
            )
        })
        .collect()
}

/// Re-optimizes from `config` with emissions priced at each rate.
pub fn carbon_tax_sweep(scenario: &Scenario, config: &Configuration, rates: &[f64]) -> Vec<SweepRow> {
    rates
        .iter()
        .map(|&rate| {
            let variant = with_tax(scenario, rate);
            priced_point(
                &variant,
                config,
                CarbonPolicy::Tax,
                None,
                ("carbon_tax_rate", rate),
                &CarbonTaxScore::new(rate),
            )
        })
        .collect()
}

/// Re-optimizes from `config` under emission caps given as a percent of the
/// emissions of `config` itself.
pub fn carbon_cap_sweep(
    scenario: &Scenario,
    config: &Configuration,
    cap_pcts: &[f64],
) -> Vec<SweepRow> {
    cap_pcts
        .iter()
        .map(|&pct| {
            let cap = cap_from_pct(scenario, config, pct);
            priced_point(
                scenario,
                config,
                CarbonPolicy::Cap,
                Some(cap),
                ("carbon_cap_pct", pct),
                &CarbonCapScore::new(cap),
            )
        })
        .collect()
}

/// Tax rate x cap grid. Rates vary slowest.
pub fn hybrid_sweep(
    scenario: &Scenario,
    config: &Configuration,
    rates: &[f64],
    cap_pcts: &[f64],
) -> Vec<SweepRow> {
    let mut rows = Vec::with_capacity(rates.len() * cap_pcts.len());
    for &rate in rates {
        let variant = with_tax(scenario, rate);
        for &pct in cap_pcts {
            let cap = cap_from_pct(scenario, config, pct);
            rows.push(priced_point(
                &variant,
                config,
                CarbonPolicy::Hybrid,
                Some(cap),
                ("carbon_cap_pct", pct),
                &HybridCarbonScore::new(rate, cap),
            ));
        }
    }
    rows
}

/// One row per policy (tax, cap, hybrid) at the same rate and cap percent.
pub fn carbon_policy_comparison(
    scenario: &Scenario,
    config: &Configuration,
    rate: f64,
    cap_pct: f64,
) -> Vec<SweepRow> {
    let mut rows = carbon_tax_sweep(scenario, config, &[rate]);
    rows.extend(carbon_cap_sweep(scenario, config, &[cap_pct]));
    rows.extend(hybrid_sweep(scenario, config, &[rate], &[cap_pct]));
    rows
}

/// Evaluates `config` as-is under each final demand. No re-optimization.
pub fn demand_sensitivity(
    scenario: &Scenario,
    config: &Configuration,
    demands: &[f64],
) -> Vec<SweepRow> {
    demands
        .iter()
        .map(|&demand| {
            let mut variant = config.clone();
            variant.final_demand = demand;
            let totals = evaluate(scenario, &variant);
            let fitness = score(&totals, scenario.params());
            SweepRow::new(
                scenario,
                CarbonPolicy::Unpriced,
                None,
                ("final_demand", demand),
                &totals,
                fitness,
            )
        })
        .collect()
}
