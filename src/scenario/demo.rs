// src/scenario/demo.rs

use super::{Scenario, ScenarioParams};
use crate::error::Result;
use crate::model::{Edge, Node, NodeKind, Supplier};

pub const DEMO_FINAL_DEMAND: f64 = 500.0;
pub const DEMO_PERIOD_DAYS: u32 = 30;

/// A two-branch kettle BOM with a component shared by both branches.
///
/// KETTLE -> HEATING-UNIT -> {ELEMENT, THERMOSTAT, FASTENERS x4}
/// KETTLE -> BODY         -> {SHELL, FASTENERS x6}
pub fn kettle_scenario() -> Result<Scenario> {
    let nodes = vec![
        Node::new("KETTLE", NodeKind::FinishedGood, 2.0, 4.0).with_internal_emissions(1.2),
        Node::new("HEATING-UNIT", NodeKind::SubAssembly, 3.0, 2.5).with_internal_emissions(0.8),
        Node::new("BODY", NodeKind::SubAssembly, 2.0, 2.0).with_internal_emissions(0.5),
        Node::new("ELEMENT", NodeKind::Purchased, 1.0, 1.2).with_default_supplier("S-ALPHA"),
        Node::new("THERMOSTAT", NodeKind::Purchased, 1.0, 0.8).with_default_supplier("S-BETA"),
        Node::new("SHELL", NodeKind::Purchased, 1.0, 1.5).with_default_supplier("S-GAMMA"),
        Node::new("FASTENERS", NodeKind::Purchased, 0.5, 0.1)
            .with_default_supplier("S-DELTA")
            .with_inventory_emissions(0.01),
    ];

    let edges = vec![
        Edge::new("KETTLE", "HEATING-UNIT", 1.0),
        Edge::new("KETTLE", "BODY", 1.0),
        Edge::new("HEATING-UNIT", "ELEMENT", 1.0),
        Edge::new("HEATING-UNIT", "THERMOSTAT", 1.0),
        Edge::new("HEATING-UNIT", "FASTENERS", 4.0),
        Edge::new("BODY", "SHELL", 1.0),
        Edge::new("BODY", "FASTENERS", 6.0),
    ];

    let suppliers = vec![
        Supplier::new("S-ALPHA", 6.0, 2.5, 10.0, 92.0),
        Supplier::new("S-BETA", 4.0, 3.4, 6.0, 80.0),
        Supplier::new("S-GAMMA", 5.0, 1.8, 14.0, 88.0),
        Supplier::new("S-DELTA", 3.0, 4.0, 4.0, 72.0),
    ];

    let params = ScenarioParams {
        service_target: 10.0,
        target_cost: 40_000.0,
        target_emissions: 30_000.0,
        target_inventory_emissions: 400.0,
        ..ScenarioParams::default()
    };

    Scenario::new("kettle", nodes, edges, suppliers, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scenario_is_valid() {
        let scenario = kettle_scenario().unwrap();
        assert_eq!(scenario.bom().len(), 7);
        let fasteners = scenario.bom().node_id("FASTENERS").unwrap();
        assert_eq!(scenario.bom().parents(fasteners).len(), 2);

        let config = scenario.default_configuration(DEMO_FINAL_DEMAND, DEMO_PERIOD_DAYS);
        for (id, _) in scenario.bom().purchased() {
            assert_eq!(config.supplier_count(id), 1);
        }
    }
}
