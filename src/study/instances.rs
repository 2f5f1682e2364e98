// src/study/instances.rs

use crate::engine::evaluate;
use crate::error::Result;
use crate::model::{Edge, Node, NodeKind, Supplier};
use crate::scenario::{Scenario, ScenarioParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const INSTANCE_FINAL_DEMAND: f64 = 100.0;
pub const INSTANCE_PERIOD_DAYS: u32 = 30;
const SUPPLIER_COUNT: usize = 4;
const SHARED_COMPONENT_PROBABILITY: f64 = 0.25;

/// Shape of a generated BOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    /// One chain from the finished good to a single purchased part.
    Serial,
    /// Random tree of depth > 1 with some components shared between parents.
    MultiLevel,
    /// A few independent sub-assembly branches under the finished good.
    Parallel,
}

/// Builds a random but valid scenario of `size` nodes (at least 2).
///
/// Edges always point from a lower to a higher node index, so the graph is
/// acyclic by construction. Nodes with children become sub-assemblies and
/// childless nodes become purchased parts. Targets and the service target are
/// calibrated on the session-default configuration so scores stay informative.
pub fn generate_instance(size: usize, topology: Topology, seed: u64) -> Result<Scenario> {
    let size = size.max(2);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut parents_of: Vec<Vec<usize>> = vec![Vec::new(); size];
    let branches = (size - 1).clamp(1, 3);
    for i in 1..size {
        let primary = match topology {
            Topology::Serial => i - 1,
            Topology::MultiLevel => rng.gen_range(0..i),
            Topology::Parallel if i <= branches => 0,
            Topology::Parallel => 1 + (i - 1) % branches,
        };
        parents_of[i].push(primary);

        if topology == Topology::MultiLevel && i > 1 && rng.gen_bool(SHARED_COMPONENT_PROBABILITY)
        {
            let extra = rng.gen_range(0..i);
            if extra != primary {
                parents_of[i].push(extra);
            }
        }
    }

    let has_children: Vec<bool> = (0..size)
        .map(|i| parents_of.iter().any(|ps| ps.contains(&i)))
        .collect();

    let suppliers: Vec<Supplier> = (0..SUPPLIER_COUNT)
        .map(|k| {
            Supplier::new(
                format!("S{:02}", k + 1),
                rng.gen_range(2.0..12.0),
                rng.gen_range(0.5..5.0),
                rng.gen_range(0..=10) as f64,
                rng.gen_range(65..=99) as f64,
            )
        })
        .collect();

    let nodes: Vec<Node> = (0..size)
        .map(|i| {
            let kind = if i == 0 {
                NodeKind::FinishedGood
            } else if has_children[i] {
                NodeKind::SubAssembly
            } else {
                NodeKind::Purchased
            };
            let name = if i == 0 {
                "FG".to_string()
            } else {
                format!("N{i:03}")
            };
            let node = Node::new(
                name,
                kind,
                rng.gen_range(1..=6) as f64,
                rng.gen_range(0.2..2.0),
            );
            if kind == NodeKind::Purchased {
                let pick = rng.gen_range(0..SUPPLIER_COUNT);
                node.with_default_supplier(suppliers[pick].id.clone())
            } else {
                node.with_internal_emissions(rng.gen_range(0.1..1.5))
            }
        })
        .collect();

    let edges: Vec<Edge> = parents_of
        .iter()
        .enumerate()
        .flat_map(|(child, parents)| {
            parents.iter().map(move |&parent| (parent, child))
        })
        .map(|(parent, child)| {
            Edge::new(
                nodes[parent].id.clone(),
                nodes[child].id.clone(),
                rng.gen_range(1..=4) as f64,
            )
        })
        .collect();

    let name = format!("bom_{size}_{topology:?}").to_lowercase();
    let scenario = Scenario::new(name, nodes, edges, suppliers, ScenarioParams::default())?;
    Ok(calibrate(scenario))
}

fn calibrate(scenario: Scenario) -> Scenario {
    let config = scenario.default_configuration(INSTANCE_FINAL_DEMAND, INSTANCE_PERIOD_DAYS);
    let baseline = evaluate(&scenario, &config);

    let params = ScenarioParams {
        target_cost: baseline.total_cost.max(1.0),
        target_emissions: baseline.total_emissions.max(1.0),
        target_inventory_emissions: (baseline.total_emissions * 0.05).max(1.0),
        service_target: (baseline.raw_lead * 0.5).max(1.0),
        ..scenario.params().clone()
    };
    scenario.with_params(params)
}
