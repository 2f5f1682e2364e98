// src/engine/lead_time.rs

use crate::model::Bom;

/// Both lead-time measures of one evaluation, indexed by `NodeId`.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadTimeProfile {
    /// Downstream exposure with no buffers anywhere (critical path below each node).
    pub raw_dlt: Vec<f64>,
    /// Downstream exposure up to the next decoupling point.
    pub dlt: Vec<f64>,
    /// Customer-facing lead time with no buffers.
    pub raw_service_lead: f64,
    /// Customer-facing lead time with the actual buffers.
    pub service_lead: f64,
}

pub fn propagate(bom: &Bom, lead_times: &[f64], buffered: &[bool]) -> LeadTimeProfile {
    let unbuffered = vec![false; bom.len()];
    LeadTimeProfile {
        raw_dlt: decoupled_lead_times(bom, lead_times, &unbuffered),
        dlt: decoupled_lead_times(bom, lead_times, buffered),
        raw_service_lead: service_lead_time(bom, lead_times, &unbuffered),
        service_lead: service_lead_time(bom, lead_times, buffered),
    }
}

/// `DLT(n) = lt(n) + max(0, max DLT(c) over unbuffered children c)`.
///
/// Evaluated children-first over the reverse topological order, so each node
/// is computed exactly once no matter how many parents share it.
pub fn decoupled_lead_times(bom: &Bom, lead_times: &[f64], buffered: &[bool]) -> Vec<f64> {
    let mut dlt = vec![0.0; bom.len()];

    for &id in bom.topological_order().iter().rev() {
        let below = bom
            .children(id)
            .iter()
            .filter(|(child, _)| !buffered[child.index()])
            .map(|(child, _)| dlt[child.index()])
            .fold(0.0, f64::max);
        dlt[id.index()] = lead_times[id.index()] + below;
    }

    dlt
}

/// Lead time the customer waits at the finished good.
///
/// A root-to-leaves pass accumulates a segment per node from the finished
/// good down through its parents. A buffered node has stock on hand, so it
/// stops the accumulation: neither it nor anything below it inherits a
/// segment. The result is the longest accumulated segment, or 0 when the
/// finished good itself is buffered. Adding a buffer can only cut segments.
pub fn service_lead_time(bom: &Bom, lead_times: &[f64], buffered: &[bool]) -> f64 {
    let root = bom.root();
    if buffered[root.index()] {
        return 0.0;
    }

    let mut segment: Vec<Option<f64>> = vec![None; bom.len()];
    segment[root.index()] = Some(lead_times[root.index()]);
    let mut longest = lead_times[root.index()];

    for &id in bom.topological_order() {
        if id == root || buffered[id.index()] {
            continue;
        }
        let inherited = bom
            .parents(id)
            .iter()
            .filter_map(|p| segment[p.index()])
            .reduce(f64::max);
        if let Some(upstream) = inherited {
            let own = lead_times[id.index()] + upstream;
            segment[id.index()] = Some(own);
            longest = longest.max(own);
        }
    }

    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, Node, NodeKind};

    fn chain() -> (Bom, Vec<f64>) {
        let nodes = vec![
            Node::new("FG", NodeKind::FinishedGood, 2.0, 1.0),
            Node::new("SUB", NodeKind::SubAssembly, 3.0, 1.0),
            Node::new("RM", NodeKind::Purchased, 5.0, 1.0),
        ];
        let edges = vec![Edge::new("FG", "SUB", 1.0), Edge::new("SUB", "RM", 1.0)];
        (Bom::new(nodes, &edges).unwrap(), vec![2.0, 3.0, 5.0])
    }

    /// FG -> {A, B}, A -> {C, D}, B -> D; D is shared.
    fn diamond() -> (Bom, Vec<f64>) {
        let nodes = vec![
            Node::new("FG", NodeKind::FinishedGood, 1.0, 1.0),
            Node::new("A", NodeKind::SubAssembly, 4.0, 1.0),
            Node::new("B", NodeKind::SubAssembly, 2.0, 1.0),
            Node::new("C", NodeKind::Purchased, 3.0, 1.0),
            Node::new("D", NodeKind::Purchased, 7.0, 1.0),
        ];
        let edges = vec![
            Edge::new("FG", "A", 1.0),
            Edge::new("FG", "B", 1.0),
            Edge::new("A", "C", 1.0),
            Edge::new("A", "D", 1.0),
            Edge::new("B", "D", 1.0),
        ];
        (Bom::new(nodes, &edges).unwrap(), vec![1.0, 4.0, 2.0, 3.0, 7.0])
    }

    #[test]
    fn test_unbuffered_chain_is_the_critical_path() {
        let (bom, lt) = chain();
        let profile = propagate(&bom, &lt, &[false, false, false]);
        assert_eq!(profile.raw_dlt, vec![10.0, 8.0, 5.0]);
        assert_eq!(profile.dlt, profile.raw_dlt);
        assert_eq!(profile.raw_service_lead, 10.0);
        assert_eq!(profile.service_lead, 10.0);
    }

    #[test]
    fn test_buffer_decouples_downstream_exposure() {
        let (bom, lt) = chain();
        let profile = propagate(&bom, &lt, &[false, true, false]);
        // SUB's own exposure still reaches RM; FG no longer sees it.
        assert_eq!(profile.dlt, vec![2.0, 8.0, 5.0]);
        assert_eq!(profile.raw_dlt, vec![10.0, 8.0, 5.0]);
        assert_eq!(profile.service_lead, 2.0);
        assert_eq!(profile.raw_service_lead, 10.0);
    }

    #[test]
    fn test_buffered_root_has_no_service_lead() {
        let (bom, lt) = chain();
        assert_eq!(service_lead_time(&bom, &lt, &[true, false, false]), 0.0);
    }

    #[test]
    fn test_shared_child_counted_once_per_path() {
        let (bom, lt) = diamond();
        let dlt = decoupled_lead_times(&bom, &lt, &[false; 5]);
        // FG -> A -> D = 1 + 4 + 7
        assert_eq!(dlt[0], 12.0);
        assert_eq!(dlt[2], 9.0);

        // Buffering A leaves FG -> B -> D as the longest open path.
        let mut buffered = [false; 5];
        buffered[1] = true;
        assert_eq!(service_lead_time(&bom, &lt, &buffered), 10.0);
    }

    #[test]
    fn test_adding_any_buffer_never_lengthens_service_lead() {
        let (bom, lt) = diamond();
        let n = bom.len();
        for mask in 0u32..(1 << n) {
            let buffered: Vec<bool> = (0..n).map(|i| mask & (1 << i) != 0).collect();
            let base = service_lead_time(&bom, &lt, &buffered);
            for extra in (0..n).filter(|i| !buffered[*i]) {
                let mut more = buffered.clone();
                more[extra] = true;
                assert!(service_lead_time(&bom, &lt, &more) <= base);
            }
        }
    }

    #[test]
    fn test_service_lead_matches_root_exposure() {
        let (bom, lt) = diamond();
        let n = bom.len();
        for mask in 0u32..(1 << n) {
            let buffered: Vec<bool> = (0..n).map(|i| mask & (1 << i) != 0).collect();
            if buffered[0] {
                continue;
            }
            let dlt = decoupled_lead_times(&bom, &lt, &buffered);
            assert_eq!(service_lead_time(&bom, &lt, &buffered), dlt[0]);
        }
    }
}
