// src/engine/explosion.rs

use crate::model::Bom;

/// Propagates finished-good demand down the BOM.
///
/// Nodes are finalized in topological order, so a node's requirement is
/// complete before it is pushed to its children. Shared components receive
/// the sum over all parents; nodes not reachable from the root stay at 0.
pub fn explode(bom: &Bom, final_demand: f64) -> Vec<f64> {
    let mut required = vec![0.0; bom.len()];
    required[bom.root().index()] = final_demand.max(0.0);

    for &id in bom.topological_order() {
        let qty = required[id.index()];
        if qty == 0.0 {
            continue;
        }
        for &(child, multiplier) in bom.children(id) {
            required[child.index()] += qty * multiplier;
        }
    }

    required
}
