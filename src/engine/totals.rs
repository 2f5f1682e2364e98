// src/engine/totals.rs

use crate::engine::explosion::explode;
use crate::engine::lead_time::propagate;
use crate::engine::sourcing::{aggregate, effective_lead_time, SourcingSummary};
use crate::engine::zones::{average_daily_usage, size_buffer, BufferZones, ZoneFactors};
use crate::model::{Configuration, NodeId, NodeKind};
use crate::scenario::Scenario;
use serde::Serialize;

// Soft-constraint penalties folded into total cost.
pub const RELIABILITY_FLOOR: f64 = 76.0;
pub const RELIABILITY_PENALTY_PER_POINT: f64 = 130.0;
pub const SERVICE_PENALTY_PER_DAY: f64 = 350.0;
pub const UNSOURCED_NODE_PENALTY: f64 = 20_000.0;

pub const MAX_FLOW_RESPONSIVENESS: f64 = 95.0;
pub const MIN_INVENTORY_EMISSION_FACTOR: f64 = 0.01;

/// Everything derived for one node in one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStats {
    pub id: String,
    pub kind: NodeKind,
    pub required_qty: f64,
    pub effective_lead_time: f64,
    pub raw_dlt: f64,
    pub dlt: f64,
    pub buffered: bool,
    pub zones: BufferZones,
    /// `Some` for purchased nodes only.
    pub sourcing: Option<SourcingSummary>,
}

/// Top-line KPIs of one configuration plus the per-node breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub purchased_cost: f64,
    pub inventory_cost: f64,
    pub penalty_cost: f64,
    pub total_cost: f64,

    pub purchased_emissions: f64,
    pub internal_emissions: f64,
    pub inventory_emissions: f64,
    pub total_emissions: f64,

    /// Demand-weighted effective reliability of purchased nodes, 0..=100.
    pub reliability: f64,
    pub raw_lead: f64,
    pub service_lead: f64,
    /// Share of the unbuffered service lead removed by buffers, 0..=95.
    pub flow_responsiveness: f64,

    pub buffer_count: usize,
    pub invalid_supplier_nodes: usize,

    pub average_inventory: f64,
    pub days_inventory_outstanding: f64,
    pub total_cost_with_tax: f64,

    pub nodes: Vec<NodeStats>,
}

impl Totals {
    pub fn node(&self, id: NodeId) -> &NodeStats {
        &self.nodes[id.index()]
    }
}

/// Evaluates a configuration from scratch. Nothing is cached between calls.
pub fn evaluate(scenario: &Scenario, config: &Configuration) -> Totals {
    let bom = scenario.bom();
    let registry = scenario.suppliers();
    let params = scenario.params();
    let n = bom.len();

    let required = explode(bom, config.final_demand);

    let sourcing: Vec<Option<SourcingSummary>> = bom
        .nodes()
        .map(|(id, node)| {
            node.is_purchased()
                .then(|| aggregate(config.suppliers_for(id).filter_map(|s| registry.get(s))))
        })
        .collect();

    let lead_times: Vec<f64> = bom
        .nodes()
        .map(|(id, node)| effective_lead_time(node, sourcing[id.index()].as_ref()))
        .collect();

    let buffered = config.buffered_mask(n);
    let profile = propagate(bom, &lead_times, &buffered);

    let factors = ZoneFactors {
        lead_time_factor: params.lead_time_factor,
        variability_factor: params.variability_factor,
    };

    let mut purchased_cost = 0.0;
    let mut inventory_cost = 0.0;
    let mut purchased_emissions = 0.0;
    let mut internal_emissions = 0.0;
    let mut inventory_emissions = 0.0;
    let mut average_inventory = 0.0;
    let mut weighted_reliability = 0.0;
    let mut purchased_demand = 0.0;
    let mut invalid_supplier_nodes = 0;

    let mut nodes = Vec::with_capacity(n);
    for (id, node) in bom.nodes() {
        let i = id.index();
        let req = required[i];

        match &sourcing[i] {
            Some(summary) => {
                purchased_cost += req * summary.eff_cost;
                purchased_emissions += req * summary.eff_emissions;
                if req > 0.0 {
                    weighted_reliability += summary.eff_reliability * req;
                    purchased_demand += req;
                }
                if !summary.valid {
                    invalid_supplier_nodes += 1;
                }
            }
            None => internal_emissions += req * node.internal_emission_factor,
        }

        let zones = if buffered[i] {
            let zones = size_buffer(
                req,
                config.period_days,
                profile.dlt[i],
                factors,
                config.net_flow_input(id),
            );
            let emission_factor = node.inventory_emission_factor.unwrap_or_else(|| {
                (node.holding_rate * params.inventory_emissions_factor)
                    .max(MIN_INVENTORY_EMISSION_FACTOR)
            });
            inventory_cost += zones.avg_inventory * node.holding_rate;
            inventory_emissions += zones.avg_inventory * emission_factor;
            average_inventory += zones.avg_inventory;
            zones
        } else {
            BufferZones::pass_through()
        };

        nodes.push(NodeStats {
            id: node.id.clone(),
            kind: node.kind,
            required_qty: req,
            effective_lead_time: lead_times[i],
            raw_dlt: profile.raw_dlt[i],
            dlt: profile.dlt[i],
            buffered: buffered[i],
            zones,
            sourcing: sourcing[i],
        });
    }

    let reliability = if purchased_demand > 0.0 {
        weighted_reliability / purchased_demand
    } else {
        0.0
    };

    let raw_lead = profile.raw_service_lead;
    let service_lead = profile.service_lead;
    let flow_responsiveness = if raw_lead > 0.0 {
        ((raw_lead - service_lead) / raw_lead * 100.0).clamp(0.0, MAX_FLOW_RESPONSIVENESS)
    } else {
        0.0
    };

    let penalty_cost = (RELIABILITY_FLOOR - reliability).max(0.0) * RELIABILITY_PENALTY_PER_POINT
        + (service_lead - params.service_target).max(0.0) * SERVICE_PENALTY_PER_DAY
        + invalid_supplier_nodes as f64 * UNSOURCED_NODE_PENALTY;

    let total_cost = purchased_cost + inventory_cost + penalty_cost;
    let total_emissions = purchased_emissions + internal_emissions + inventory_emissions;

    let root_adu = average_daily_usage(required[bom.root().index()], config.period_days);
    let days_inventory_outstanding = if root_adu > 0.0 {
        average_inventory / root_adu
    } else {
        0.0
    };

    Totals {
        purchased_cost,
        inventory_cost,
        penalty_cost,
        total_cost,
        purchased_emissions,
        internal_emissions,
        inventory_emissions,
        total_emissions,
        reliability,
        raw_lead,
        service_lead,
        flow_responsiveness,
        buffer_count: buffered.iter().filter(|b| **b).count(),
        invalid_supplier_nodes,
        average_inventory,
        days_inventory_outstanding,
        total_cost_with_tax: total_cost + params.carbon_tax_rate * total_emissions,
        nodes,
    }
}
