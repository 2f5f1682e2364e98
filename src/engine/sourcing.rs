// src/engine/sourcing.rs

use crate::model::{Node, NodeKind, Supplier};
use serde::Serialize;

// Sentinels for an empty assignment. Worse than any real supplier so that
// under-sourcing shows up as a cost instead of a failure.
pub const FALLBACK_COST: f64 = 18.0;
pub const FALLBACK_EMISSIONS: f64 = 7.0;
pub const FALLBACK_LEAD_TIME: f64 = 12.0;
pub const FALLBACK_RELIABILITY: f64 = 50.0;

/// One effective supplier tuple for a purchased node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SourcingSummary {
    pub valid: bool,
    pub selected_count: usize,
    pub eff_cost: f64,
    pub eff_emissions: f64,
    pub eff_lead_time: f64,
    pub eff_reliability: f64,
}

impl SourcingSummary {
    fn unsourced() -> Self {
        Self {
            valid: false,
            selected_count: 0,
            eff_cost: FALLBACK_COST,
            eff_emissions: FALLBACK_EMISSIONS,
            eff_lead_time: FALLBACK_LEAD_TIME,
            eff_reliability: FALLBACK_RELIABILITY,
        }
    }
}

/// Reduces the selected suppliers of one node.
///
/// Cost and emissions are averaged. Lead time takes the slowest source and
/// reliability the weakest one: multi-sourcing never improves either.
pub fn aggregate<'a, I>(selected: I) -> SourcingSummary
where
    I: IntoIterator<Item = &'a Supplier>,
{
    let mut count = 0usize;
    let mut cost = 0.0;
    let mut emissions = 0.0;
    let mut lead_time = f64::NEG_INFINITY;
    let mut reliability = f64::INFINITY;

    for supplier in selected {
        count += 1;
        cost += supplier.unit_cost;
        emissions += supplier.unit_emissions;
        lead_time = lead_time.max(supplier.lead_time);
        reliability = reliability.min(supplier.reliability);
    }

    if count == 0 {
        return SourcingSummary::unsourced();
    }

    let n = count as f64;
    SourcingSummary {
        valid: true,
        selected_count: count,
        eff_cost: cost / n,
        eff_emissions: emissions / n,
        eff_lead_time: lead_time,
        eff_reliability: reliability,
    }
}

/// Intrinsic lead time, plus the supplier lead time for purchased nodes.
pub fn effective_lead_time(node: &Node, sourcing: Option<&SourcingSummary>) -> f64 {
    match (node.kind, sourcing) {
        (NodeKind::Purchased, Some(summary)) => node.lead_time + summary.eff_lead_time,
        _ => node.lead_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_sourcing_takes_worst_lead_time_and_reliability() {
        let fast = Supplier::new("FAST", 10.0, 2.0, 4.0, 90.0);
        let slow = Supplier::new("SLOW", 6.0, 4.0, 9.0, 70.0);

        let summary = aggregate([&fast, &slow]);
        assert!(summary.valid);
        assert_eq!(summary.selected_count, 2);
        assert_eq!(summary.eff_cost, 8.0);
        assert_eq!(summary.eff_emissions, 3.0);
        assert_eq!(summary.eff_lead_time, 9.0);
        assert_eq!(summary.eff_reliability, 70.0);
    }

    #[test]
    fn test_empty_selection_uses_sentinels() {
        let summary = aggregate(std::iter::empty());
        assert!(!summary.valid);
        assert_eq!(summary.selected_count, 0);
        assert_eq!(summary.eff_cost, FALLBACK_COST);
        assert_eq!(summary.eff_emissions, FALLBACK_EMISSIONS);
        assert_eq!(summary.eff_lead_time, FALLBACK_LEAD_TIME);
        assert_eq!(summary.eff_reliability, FALLBACK_RELIABILITY);
    }

    #[test]
    fn test_effective_lead_time_only_adds_supplier_for_purchased() {
        let summary = aggregate([&Supplier::new("S", 1.0, 1.0, 6.0, 99.0)]);
        let rm = Node::new("RM", NodeKind::Purchased, 2.0, 1.0);
        let sub = Node::new("SUB", NodeKind::SubAssembly, 2.0, 1.0);

        assert_eq!(effective_lead_time(&rm, Some(&summary)), 8.0);
        assert_eq!(effective_lead_time(&sub, Some(&summary)), 2.0);
        assert_eq!(effective_lead_time(&rm, None), 2.0);
    }
}
