// src/strategy/optimization.rs

//! Bounded hill-climbing over buffer placement and supplier assignment.
//!
//! Each iteration regenerates the neighbourhood of the current configuration,
//! evaluates every move on its own clone, and adopts the strictly best one.
//! The search stops at a local optimum or after `MAX_ITERATIONS` passes.
//! It is a heuristic: the result is a local optimum, not a proven one.

use crate::engine::{evaluate, Totals};
use crate::model::Configuration;
use crate::scenario::Scenario;
use crate::strategy::implementations::WeightedScore;
use crate::strategy::moves::{legal_moves, repair};
use crate::strategy::traits::Objective;
use serde::Serialize;
use tracing::{debug, info, instrument};

pub const MAX_ITERATIONS: usize = 18;

/// The headline numbers of an optimization result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiView {
    pub cost: f64,
    pub emissions: f64,
    pub reliability: f64,
    pub service_lead: f64,
    pub inventory_cost: f64,
    pub inventory_emissions: f64,
    pub score: u32,
}

impl KpiView {
    pub fn new(totals: &Totals, score: u32) -> Self {
        Self {
            cost: totals.total_cost,
            emissions: totals.total_emissions,
            reliability: totals.reliability,
            service_lead: totals.service_lead,
            inventory_cost: totals.inventory_cost,
            inventory_emissions: totals.inventory_emissions,
            score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// No move strictly improved the score.
    LocalOptimum,
    /// The iteration cap cut the search short.
    IterationCap,
    /// The neighbourhood was empty.
    NoMoves,
}

#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub configuration: Configuration,
    pub totals: Totals,
    pub score: u32,
    pub kpis: KpiView,
    pub iterations: usize,
    pub termination: Termination,
}

struct Candidate {
    key: String,
    configuration: Configuration,
    totals: Totals,
    score: u32,
}

/// Optimizes with the standard weighted score.
pub fn optimize(scenario: &Scenario, config: &Configuration) -> OptimizationResult {
    optimize_with(scenario, config, &WeightedScore)
}

/// Optimizes with any objective. `config` is never modified.
#[instrument(skip_all, fields(scenario = scenario.name(), objective = ?objective))]
pub fn optimize_with(
    scenario: &Scenario,
    config: &Configuration,
    objective: &dyn Objective,
) -> OptimizationResult {
    let params = scenario.params();

    let mut current = config.clone();
    let mut current_totals = evaluate(scenario, &current);
    let mut current_score = objective.score(&current_totals, params);
    let start_score = current_score;

    let mut best = Candidate {
        key: String::new(),
        configuration: current.clone(),
        totals: current_totals.clone(),
        score: current_score,
    };

    let mut iterations = 0;
    let mut termination = Termination::IterationCap;

    while iterations < MAX_ITERATIONS {
        iterations += 1;

        // Strict comparison keeps the first key among equal scores.
        let mut winner: Option<Candidate> = None;
        for (key, mv) in legal_moves(scenario, &current) {
            let mut candidate = current.clone();
            mv.apply(&mut candidate);
            repair(scenario, &mut candidate);

            let totals = evaluate(scenario, &candidate);
            let score = objective.score(&totals, params);
            if winner.as_ref().map_or(true, |w| score > w.score) {
                winner = Some(Candidate {
                    key,
                    configuration: candidate,
                    totals,
                    score,
                });
            }
        }

        let Some(winner) = winner else {
            termination = Termination::NoMoves;
            break;
        };
        if winner.score <= current_score {
            termination = Termination::LocalOptimum;
            break;
        }

        debug!(
            iteration = iterations,
            chosen = %winner.key,
            from = current_score,
            to = winner.score,
            "adopted move"
        );
        current = winner.configuration.clone();
        current_totals = winner.totals.clone();
        current_score = winner.score;
        if winner.score > best.score {
            best = winner;
        }
    }

    info!(
        iterations,
        ?termination,
        start_score,
        best_score = best.score,
        buffers = best.totals.buffer_count,
        "optimization finished"
    );
    debug!(final_score = current_score, final_buffers = current_totals.buffer_count);

    OptimizationResult {
        kpis: KpiView::new(&best.totals, best.score),
        configuration: best.configuration,
        totals: best.totals,
        score: best.score,
        iterations,
        termination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;
    use crate::model::{Edge, Node, NodeKind, Supplier};
    use crate::scenario::demo::{kettle_scenario, DEMO_FINAL_DEMAND, DEMO_PERIOD_DAYS};
    use crate::scenario::ScenarioParams;
    use crate::strategy::implementations::CarbonTaxScore;

    /// A finished good over `parts` purchased parts, all on the expensive
    /// supplier "C". Every lead time is zero, so buffers change nothing and
    /// only supplier moves can move the score.
    fn flat_scenario(parts: usize, cheap: &[&str]) -> Scenario {
        let mut nodes = vec![Node::new("FG", NodeKind::FinishedGood, 0.0, 1.0)];
        let mut edges = Vec::new();
        for i in 0..parts {
            let name = format!("P{i:02}");
            nodes.push(Node::new(&name, NodeKind::Purchased, 0.0, 1.0).with_default_supplier("C"));
            edges.push(Edge::new("FG", name, 1.0));
        }
        let mut suppliers = vec![Supplier::new("C", 20.0, 1.0, 0.0, 90.0)];
        suppliers.extend(cheap.iter().map(|id| Supplier::new(*id, 5.0, 1.0, 0.0, 90.0)));

        let params = ScenarioParams {
            service_target: 100.0,
            target_cost: 20.0 * 100.0 * parts as f64,
            target_emissions: 100.0 * parts as f64,
            ..ScenarioParams::default()
        };
        Scenario::new("flat", nodes, edges, suppliers, params).unwrap()
    }

    #[test]
    fn test_optimizer_improves_demo_and_leaves_input_alone() {
        logging::init_test();
        let scenario = kettle_scenario().unwrap();
        let config = scenario.default_configuration(DEMO_FINAL_DEMAND, DEMO_PERIOD_DAYS);
        let before = config.clone();

        let start = WeightedScore.score(&evaluate(&scenario, &config), scenario.params());
        let result = optimize(&scenario, &config);

        assert_eq!(config, before);
        assert!(result.score >= start);
        assert!(result.iterations <= MAX_ITERATIONS);
        assert_eq!(result.kpis.score, result.score);
        assert_eq!(result.kpis.cost, result.totals.total_cost);
        // The result is consistent with a fresh evaluation of the returned configuration.
        assert_eq!(evaluate(&scenario, &result.configuration), result.totals);
    }

    #[test]
    fn test_optimizer_is_deterministic() {
        let scenario = kettle_scenario().unwrap();
        let config = scenario.default_configuration(DEMO_FINAL_DEMAND, DEMO_PERIOD_DAYS);
        let a = optimize(&scenario, &config);
        let b = optimize(&scenario, &config);
        assert_eq!(a.configuration, b.configuration);
        assert_eq!(a.score, b.score);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_optimizer_repairs_unsourced_start() {
        let scenario = kettle_scenario().unwrap();
        let mut config = scenario.default_configuration(DEMO_FINAL_DEMAND, DEMO_PERIOD_DAYS);
        config.supplier_assignments.clear();

        let start = evaluate(&scenario, &config);
        assert_eq!(start.invalid_supplier_nodes, 4);

        let result = optimize(&scenario, &config);
        assert_eq!(result.totals.invalid_supplier_nodes, 0);
        assert!(config.supplier_assignments.is_empty());
    }

    #[test]
    fn test_local_optimum_terminates_before_cap() {
        let scenario = kettle_scenario().unwrap();
        let config = scenario.default_configuration(DEMO_FINAL_DEMAND, DEMO_PERIOD_DAYS);
        let first = optimize(&scenario, &config);
        if first.termination == Termination::LocalOptimum {
            let again = optimize(&scenario, &first.configuration);
            assert_eq!(again.score, first.score);
            assert_eq!(again.iterations, 1);
            assert_eq!(again.termination, Termination::LocalOptimum);
        }
    }

    #[test]
    fn test_custom_objective_is_used() {
        let scenario = kettle_scenario().unwrap();
        let config = scenario.default_configuration(DEMO_FINAL_DEMAND, DEMO_PERIOD_DAYS);
        let objective = CarbonTaxScore::new(0.5);
        let result = optimize_with(&scenario, &config, &objective);
        assert_eq!(
            result.score,
            objective.score(&result.totals, scenario.params())
        );
    }

    #[test]
    fn test_ties_go_to_the_earliest_key() {
        let scenario = flat_scenario(1, &["A", "B"]);
        let part = scenario.bom().node_id("P00").unwrap();
        let a = scenario.suppliers().id_of("A").unwrap();
        let b = scenario.suppliers().id_of("B").unwrap();
        let config = scenario.default_configuration(100.0, 30);

        let score_after = |key: &str| {
            let (_, mv) = legal_moves(&scenario, &config)
                .into_iter()
                .find(|(k, _)| k == key)
                .unwrap();
            let mut candidate = config.clone();
            mv.apply(&mut candidate);
            WeightedScore.score(&evaluate(&scenario, &candidate), scenario.params())
        };
        assert_eq!(
            score_after("supplier|P00|A|add"),
            score_after("supplier|P00|B|add")
        );

        // add A, then drop C; adding B afterwards only ties and is refused
        let result = optimize(&scenario, &config);
        assert_eq!(result.configuration.suppliers_for(part).collect::<Vec<_>>(), vec![a]);
        assert!(!result.configuration.is_selected(part, b));
        assert_eq!(result.iterations, 3);
        assert_eq!(result.termination, Termination::LocalOptimum);
    }

    #[test]
    fn test_iteration_cap_keeps_the_best_configuration() {
        let scenario = flat_scenario(20, &["A"]);
        let config = scenario.default_configuration(100.0, 30);
        let start = WeightedScore.score(&evaluate(&scenario, &config), scenario.params());

        let result = optimize(&scenario, &config);
        assert_eq!(result.termination, Termination::IterationCap);
        assert_eq!(result.iterations, MAX_ITERATIONS);
        assert!(result.score > start);
        assert_eq!(
            WeightedScore.score(&evaluate(&scenario, &result.configuration), scenario.params()),
            result.score
        );

        // the truncated search still improves when resumed
        let resumed = optimize(&scenario, &result.configuration);
        assert!(resumed.score > result.score);
    }
}
