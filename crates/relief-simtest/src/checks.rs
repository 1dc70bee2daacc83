//! Invariant checks over allocation runs.

use rand::rngs::StdRng;
use rand::SeedableRng;
use relief_logic::allocation::{allocate, AllocationPlan, Strategy};
use relief_logic::graph::Graph;
use relief_logic::scenario::Scenario;
use relief_logic::shortest_path::Reach;
use relief_logic::zone::{Resource, Zone};

use crate::generate::random_scenario;
use crate::report::plan_summary;

pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

// ── Scenario runs ──────────────────────────────────────────────────────

/// Run every strategy on `scenario` from its original demands and check
/// the plan invariants.
pub fn validate_scenario_runs(
    scenario: &Scenario,
    graph: &Graph,
    strategies: &[Strategy],
) -> Vec<TestResult> {
    println!("\n--- Allocation invariants: {} ---", scenario.name);
    let mut results = Vec::new();

    results.push(check_distance_table(graph, scenario.camp, "scenario"));
    for &strategy in strategies {
        results.extend(check_strategy(scenario, graph, strategy, "scenario"));
    }
    results
}

// ── Random sweep ───────────────────────────────────────────────────────

pub fn validate_random_sweep(seed: u64, rounds: usize) -> Vec<TestResult> {
    println!("--- Random sweep: {} scenarios, seed {} ---", rounds, seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut failures = Vec::new();
    let mut checks = 0usize;

    for i in 0..rounds {
        let scenario = random_scenario(&mut rng, i, 12);
        let graph = match scenario.build_graph() {
            Ok(g) => g,
            Err(e) => {
                failures.push(TestResult {
                    name: format!("sweep_{}_graph", i),
                    passed: false,
                    detail: e.to_string(),
                });
                continue;
            }
        };

        let strategies = [
            Strategy::Urgency,
            Strategy::UrgencyDistance {
                camp: scenario.camp,
            },
        ];
        let tag = format!("sweep_{}", i);
        let mut round = vec![check_distance_table(&graph, scenario.camp, &tag)];
        for strategy in strategies {
            round.extend(check_strategy(&scenario, &graph, strategy, &tag));
        }
        checks += round.len();
        failures.extend(round.into_iter().filter(|r| !r.passed));
    }

    let mut results = vec![TestResult {
        name: "random_sweep".into(),
        passed: failures.is_empty(),
        detail: format!(
            "{} checks over {} scenarios, {} failed",
            checks,
            rounds,
            failures.len()
        ),
    }];
    results.extend(failures);
    results
}

// ── Individual checks ──────────────────────────────────────────────────

fn check_strategy(
    scenario: &Scenario,
    graph: &Graph,
    strategy: Strategy,
    tag: &str,
) -> Vec<TestResult> {
    let short = match strategy {
        Strategy::Urgency => "urgency",
        Strategy::UrgencyDistance { .. } => "distance",
    };
    let mut zones = scenario.zones.clone();
    let plan = match allocate(&mut zones, scenario.supply, strategy, graph) {
        Ok(plan) => plan,
        Err(e) => {
            return vec![TestResult {
                name: format!("{}_{}_runs", tag, short),
                passed: false,
                detail: e.to_string(),
            }]
        }
    };

    let mut repeat_zones = scenario.zones.clone();
    let repeat = allocate(&mut repeat_zones, scenario.supply, strategy, graph);

    vec![
        check_supply_bound(&plan, &format!("{}_{}_supply_bound", tag, short)),
        check_demand_bound(&plan, &scenario.zones, &format!("{}_{}_demand_bound", tag, short)),
        check_score_order(&plan, &format!("{}_{}_score_order", tag, short)),
        TestResult {
            name: format!("{}_{}_repeatable", tag, short),
            passed: repeat.as_ref().is_ok_and(|r| *r == plan) && repeat_zones == zones,
            detail: plan_summary(&plan),
        },
    ]
}

fn check_supply_bound(plan: &AllocationPlan, name: &str) -> TestResult {
    let sent = plan.total_sent();
    let supply = plan.initial_supply;
    TestResult {
        name: name.into(),
        passed: sent.food <= supply.food
            && sent.water <= supply.water
            && sent.food + plan.remaining.food == supply.food
            && sent.water + plan.remaining.water == supply.water,
        detail: format!(
            "sent food {}/{} water {}/{}",
            sent.food, supply.food, sent.water, supply.water
        ),
    }
}

fn check_demand_bound(plan: &AllocationPlan, original: &[Zone], name: &str) -> TestResult {
    let over: Vec<_> = plan
        .transfers
        .iter()
        .filter(|t| match original.get(t.zone_index) {
            Some(z) => Resource::ALL
                .iter()
                .any(|&r| t.shipment(r).sent > z.demand(r)),
            None => true,
        })
        .map(|t| t.zone_id)
        .collect();
    TestResult {
        name: name.into(),
        passed: over.is_empty(),
        detail: if over.is_empty() {
            format!("{} transfers within demand", plan.transfers.len())
        } else {
            format!("over-served zones: {:?}", over)
        },
    }
}

fn check_score_order(plan: &AllocationPlan, name: &str) -> TestResult {
    let ordered = plan.transfers.windows(2).all(|w| w[0].score >= w[1].score);
    TestResult {
        name: name.into(),
        passed: ordered,
        detail: "transfers in non-increasing score order".into(),
    }
}

fn check_distance_table(graph: &Graph, source: usize, tag: &str) -> TestResult {
    let name = format!("{}_distance_table", tag);
    let table = match graph.shortest_distances(source) {
        Ok(t) => t,
        Err(e) => {
            return TestResult {
                name,
                passed: false,
                detail: e.to_string(),
            }
        }
    };

    let source_zero = table.distance(source) == Some(0);
    let relaxed = graph.edges().iter().all(|e| match table.distance(e.from) {
        Some(du) => table
            .distance(e.to)
            .is_some_and(|dv| dv <= du + u64::from(e.weight)),
        None => true,
    });
    let paths_monotone = table.iter().all(|(node, reach)| match reach {
        Reach::Distance(_) => table.path_to(node).is_some_and(|path| {
            path.windows(2)
                .all(|w| table.distance(w[0]) <= table.distance(w[1]))
        }),
        _ => true,
    });

    TestResult {
        name,
        passed: source_zero && relaxed && paths_monotone,
        detail: format!(
            "{}/{} nodes reachable from {}",
            table.reachable_count(),
            table.len(),
            source
        ),
    }
}

// ── Summary ────────────────────────────────────────────────────────────

/// Print the results, returning `true` when everything passed.
pub fn print_summary(results: &[TestResult], verbose: bool) -> bool {
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    for r in results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );
    failed == 0
}
