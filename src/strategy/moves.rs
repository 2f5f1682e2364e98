// src/strategy/moves.rs

use crate::model::{Configuration, NodeId, SupplierId};
use crate::scenario::Scenario;
use tracing::warn;

/// A single neighbourhood step of the local search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    ToggleBuffer(NodeId),
    AddSupplier { node: NodeId, supplier: SupplierId },
    RemoveSupplier { node: NodeId, supplier: SupplierId },
}

impl Move {
    /// Canonical `kind|node|supplier|operation` key. Candidates are compared
    /// in ascending key order, so ties go to the earliest key.
    pub fn key(&self, scenario: &Scenario) -> String {
        let node_name = |id: NodeId| scenario.bom().node(id).id.as_str();
        let supplier_name =
            |id: SupplierId| scenario.suppliers().get(id).map_or("", |s| s.id.as_str());
        match *self {
            Move::ToggleBuffer(node) => format!("buffer|{}||toggle", node_name(node)),
            Move::AddSupplier { node, supplier } => format!(
                "supplier|{}|{}|add",
                node_name(node),
                supplier_name(supplier)
            ),
            Move::RemoveSupplier { node, supplier } => format!(
                "supplier|{}|{}|remove",
                node_name(node),
                supplier_name(supplier)
            ),
        }
    }

    pub fn apply(&self, config: &mut Configuration) {
        match *self {
            Move::ToggleBuffer(node) => config.toggle_buffer(node),
            Move::AddSupplier { node, supplier } => {
                config.select_supplier(node, supplier);
            }
            Move::RemoveSupplier { node, supplier } => {
                config.deselect_supplier(node, supplier);
            }
        }
    }
}

/// Every legal move from `config`, sorted by canonical key.
///
/// Any node may toggle its buffer. A purchased node may add any supplier it
/// does not use yet, and may drop one only while it has more than one.
pub fn legal_moves(scenario: &Scenario, config: &Configuration) -> Vec<(String, Move)> {
    let bom = scenario.bom();
    let mut moves: Vec<Move> = bom.ids().map(Move::ToggleBuffer).collect();

    for (node, _) in bom.purchased() {
        let removable = config.supplier_count(node) > 1;
        for (supplier, _) in scenario.suppliers().iter() {
            if !config.is_selected(node, supplier) {
                moves.push(Move::AddSupplier { node, supplier });
            } else if removable {
                moves.push(Move::RemoveSupplier { node, supplier });
            }
        }
    }

    let mut keyed: Vec<(String, Move)> = moves
        .into_iter()
        .map(|m| (m.key(scenario), m))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed
}

/// Gives every purchased node with no known supplier its scenario fallback.
///
/// Returns how many nodes were repaired.
pub fn repair(scenario: &Scenario, config: &mut Configuration) -> usize {
    let registry = scenario.suppliers();
    let mut repaired = 0;
    for (node, item) in scenario.bom().purchased() {
        if config.suppliers_for(node).any(|s| registry.get(s).is_some()) {
            continue;
        }
        match scenario.fallback_supplier(node) {
            Some(supplier) => {
                config.select_supplier(node, supplier);
                repaired += 1;
            }
            None => warn!(node = %item.id, "no fallback supplier; node stays unsourced"),
        }
    }
    repaired
}
