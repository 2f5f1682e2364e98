// src/model/configuration.rs

use crate::model::bom::NodeId;
use crate::model::supplier::SupplierId;
use std::collections::{BTreeMap, BTreeSet};

/// Net-flow inputs of one node, as percentages of its top of green.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetFlowInput {
    pub on_hand_pct: f64,
    pub open_supply_pct: f64,
}

impl NetFlowInput {
    /// Both percentages are clamped to 0..=100.
    pub fn new(on_hand_pct: f64, open_supply_pct: f64) -> Self {
        Self {
            on_hand_pct: on_hand_pct.clamp(0.0, 100.0),
            open_supply_pct: open_supply_pct.clamp(0.0, 100.0),
        }
    }
}

impl Default for NetFlowInput {
    fn default() -> Self {
        Self::new(50.0, 25.0)
    }
}

/// The decision state: where buffers sit and who supplies each purchased node.
///
/// Owned by the caller and passed by value. The engine treats it as an
/// immutable snapshot; the optimizer clones before every change.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Indexed by `NodeId`.
    pub buffered: Vec<bool>,
    /// Purchased node -> selected suppliers. An empty or missing set is
    /// tolerated and penalized at evaluation time.
    pub supplier_assignments: BTreeMap<NodeId, BTreeSet<SupplierId>>,
    /// Indexed by `NodeId`; missing entries fall back to `NetFlowInput::default()`.
    pub net_flow: Vec<NetFlowInput>,
    pub final_demand: f64,
    pub period_days: u32,
}

impl Configuration {
    /// No buffers, no suppliers.
    pub fn unbuffered(node_count: usize, final_demand: f64, period_days: u32) -> Self {
        Self {
            buffered: vec![false; node_count],
            supplier_assignments: BTreeMap::new(),
            net_flow: vec![NetFlowInput::default(); node_count],
            final_demand,
            period_days,
        }
    }

    pub fn is_buffered(&self, id: NodeId) -> bool {
        self.buffered.get(id.index()).copied().unwrap_or(false)
    }

    pub fn set_buffered(&mut self, id: NodeId, buffered: bool) {
        if self.buffered.len() <= id.index() {
            self.buffered.resize(id.index() + 1, false);
        }
        self.buffered[id.index()] = buffered;
    }

    pub fn toggle_buffer(&mut self, id: NodeId) {
        let current = self.is_buffered(id);
        self.set_buffered(id, !current);
    }

    pub fn buffer_count(&self) -> usize {
        self.buffered.iter().filter(|b| **b).count()
    }

    /// Buffer flags resized to exactly `node_count` entries.
    pub fn buffered_mask(&self, node_count: usize) -> Vec<bool> {
        let mut mask = self.buffered.clone();
        mask.resize(node_count, false);
        mask
    }

    pub fn suppliers_for(&self, id: NodeId) -> impl Iterator<Item = SupplierId> + '_ {
        self.supplier_assignments
            .get(&id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn supplier_count(&self, id: NodeId) -> usize {
        self.supplier_assignments.get(&id).map_or(0, BTreeSet::len)
    }

    pub fn is_selected(&self, node: NodeId, supplier: SupplierId) -> bool {
        self.supplier_assignments
            .get(&node)
            .is_some_and(|set| set.contains(&supplier))
    }

    /// Returns false if the supplier was already selected.
    pub fn select_supplier(&mut self, node: NodeId, supplier: SupplierId) -> bool {
        self.supplier_assignments
            .entry(node)
            .or_default()
            .insert(supplier)
    }

    /// Returns false if the supplier was not selected. May leave the set empty.
    pub fn deselect_supplier(&mut self, node: NodeId, supplier: SupplierId) -> bool {
        self.supplier_assignments
            .get_mut(&node)
            .is_some_and(|set| set.remove(&supplier))
    }

    pub fn net_flow_input(&self, id: NodeId) -> NetFlowInput {
        self.net_flow.get(id.index()).copied().unwrap_or_default()
    }

    pub fn set_net_flow(&mut self, id: NodeId, input: NetFlowInput) {
        if self.net_flow.len() <= id.index() {
            self.net_flow.resize(id.index() + 1, NetFlowInput::default());
        }
        self.net_flow[id.index()] = input;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_toggling() {
        let mut config = Configuration::unbuffered(3, 100.0, 30);
        let sub = NodeId(1);
        assert!(!config.is_buffered(sub));

        config.toggle_buffer(sub);
        assert!(config.is_buffered(sub));
        assert_eq!(config.buffer_count(), 1);

        config.toggle_buffer(sub);
        assert_eq!(config.buffer_count(), 0);

        // Out-of-range ids read as unbuffered
        assert!(!config.is_buffered(NodeId(7)));
        assert_eq!(config.buffered_mask(5), vec![false; 5]);
    }

    #[test]
    fn test_supplier_selection() {
        let mut config = Configuration::unbuffered(3, 100.0, 30);
        let rm = NodeId(2);
        assert!(config.select_supplier(rm, SupplierId(0)));
        assert!(!config.select_supplier(rm, SupplierId(0)));
        assert!(config.select_supplier(rm, SupplierId(1)));
        assert_eq!(config.supplier_count(rm), 2);

        assert!(config.deselect_supplier(rm, SupplierId(0)));
        assert!(!config.deselect_supplier(rm, SupplierId(0)));
        assert_eq!(config.suppliers_for(rm).collect::<Vec<_>>(), vec![SupplierId(1)]);
    }

    #[test]
    fn test_net_flow_percentages_are_clamped() {
        let input = NetFlowInput::new(140.0, -5.0);
        assert_eq!(input.on_hand_pct, 100.0);
        assert_eq!(input.open_supply_pct, 0.0);
    }
}
