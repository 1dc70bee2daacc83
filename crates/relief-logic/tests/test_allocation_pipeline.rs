//! Integration tests for the full allocation pipeline.
//!
//! Exercises: Scenario JSON → Graph → DistanceTable → AllocationPlan
//! → CoverageReport
//!
//! All tests are pure logic, no I/O beyond the bundled scenario files.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use relief_logic::allocation::{
    allocate, allocate_by_urgency, allocate_by_urgency_and_distance, run_sequence, CarryOver,
    Strategy,
};
use relief_logic::coverage::CoverageReport;
use relief_logic::graph::Graph;
use relief_logic::scenario::Scenario;
use relief_logic::shortest_path::Reach;
use relief_logic::zone::{SupplyPool, Zone};

const THREE_VILLAGES: &str = include_str!("../../../data/scenarios/three_villages.json");
const RIVER_DELTA: &str = include_str!("../../../data/scenarios/river_delta.json");

// ── Helpers ────────────────────────────────────────────────────────────

fn random_scenario(rng: &mut StdRng) -> (Graph, Vec<Zone>, SupplyPool) {
    let nodes = rng.gen_range(1..=12);
    let mut graph = Graph::new(nodes).unwrap();
    for _ in 0..rng.gen_range(0..=nodes * 3) {
        let from = rng.gen_range(0..nodes);
        let to = rng.gen_range(0..nodes);
        graph.add_edge(from, to, rng.gen_range(0..=50)).unwrap();
    }

    let zones = (0..rng.gen_range(0..=15))
        .map(|_| {
            Zone::new(
                rng.gen_range(-2..=(nodes as i64 + 2)),
                rng.gen_range(0..=60),
                rng.gen_range(0..=60),
                rng.gen_range(0..=300),
            )
        })
        .collect();
    let supply = SupplyPool::new(rng.gen_range(0..=300), rng.gen_range(0..=300));
    (graph, zones, supply)
}

fn strategies() -> [Strategy; 2] {
    [Strategy::Urgency, Strategy::UrgencyDistance { camp: 0 }]
}

// ── Worked examples ────────────────────────────────────────────────────

#[test]
fn three_villages_both_strategies_agree() {
    let scenario = Scenario::from_json(THREE_VILLAGES).unwrap();
    let graph = scenario.build_graph().unwrap();

    for strategy in strategies() {
        let mut zones = scenario.zones.clone();
        let plan = allocate(&mut zones, scenario.supply, strategy, &graph).unwrap();
        assert_eq!(plan.order(), vec![2, 1], "{}", strategy.label());

        let sent: Vec<(u32, u32)> = plan
            .transfers
            .iter()
            .map(|t| (t.food.sent, t.water.sent))
            .collect();
        assert_eq!(sent, vec![(5, 5), (7, 3)]);
        assert_eq!(plan.remaining, SupplyPool::new(0, 0));
        assert_eq!(plan.unvisited, vec![3]);
    }
}

#[test]
fn river_delta_urgency_only() {
    let scenario = Scenario::from_json(RIVER_DELTA).unwrap();
    let mut zones = scenario.zones.clone();
    let plan = allocate_by_urgency(&mut zones, scenario.supply).unwrap();

    // Zones 3 and 4 tie at urgency 90: the lower id goes first.
    assert_eq!(plan.order(), vec![7, 5, 3, 4, 11, 1]);
    assert_eq!(plan.unvisited, vec![6]);
    assert_eq!(plan.remaining, SupplyPool::new(0, 0));

    let z4 = plan.transfer_for(4).unwrap();
    assert_eq!((z4.food.sent, z4.water.sent), (60, 10));
    let z1 = plan.transfer_for(1).unwrap();
    assert_eq!((z1.food.sent, z1.water.sent), (20, 0));
}

#[test]
fn river_delta_distance_aware() {
    let scenario = Scenario::from_json(RIVER_DELTA).unwrap();
    // The road to node 9 is outside the graph and gets skipped.
    assert_eq!(scenario.invalid_roads().len(), 1);
    let graph = scenario.build_graph().unwrap();
    assert_eq!(graph.num_edges(), 10);

    let table = graph.shortest_distances(scenario.camp).unwrap();
    assert_eq!(table.distance(3), Some(14));
    assert_eq!(table.path_to(3), Some(vec![0, 1, 2, 4, 3]));
    assert_eq!(table.reach(7), Reach::Unreachable);

    let mut zones = scenario.zones.clone();
    let plan =
        allocate_by_urgency_and_distance(&mut zones, scenario.supply, &graph, scenario.camp)
            .unwrap();

    assert_eq!(plan.order(), vec![5, 4, 3, 1, 6]);
    assert_eq!(plan.transfers[0].score, 119_984);
    // Unreachable node 7 outranks off-graph zone 11 on urgency alone.
    assert_eq!(plan.unvisited, vec![7, 11]);
    assert_eq!(plan.remaining, SupplyPool::new(0, 0));

    let before = scenario.zones.clone();
    let coverage = CoverageReport::compute(&before, &plan);
    assert_eq!(coverage.food.total_sent, 150);
    assert_eq!(coverage.water.total_sent, 90);
    assert_eq!(coverage.food.none, 2);
}

#[test]
fn sequence_depleted_replays_original_ordering() {
    let scenario = Scenario::from_json(THREE_VILLAGES).unwrap();
    let graph = scenario.build_graph().unwrap();
    let runs = run_sequence(
        &scenario.zones,
        scenario.supply,
        &strategies(),
        &graph,
        CarryOver::Depleted,
    )
    .unwrap();

    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].starting_zones, scenario.zones);
    assert_eq!(runs[1].plan.order(), vec![1, 3]);
    assert_eq!(runs[1].plan.remaining, SupplyPool::new(0, 6));
}

// ── Properties over random scenarios ───────────────────────────────────

#[test]
fn random_plans_respect_supply_and_demand() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let (graph, original, supply) = random_scenario(&mut rng);
        for strategy in strategies() {
            let mut zones = original.clone();
            let plan = allocate(&mut zones, supply, strategy, &graph).unwrap();

            let sent = plan.total_sent();
            assert!(sent.food <= supply.food);
            assert!(sent.water <= supply.water);
            assert_eq!(sent.food + plan.remaining.food, supply.food);
            assert_eq!(sent.water + plan.remaining.water, supply.water);

            for t in &plan.transfers {
                let zone = &original[t.zone_index];
                assert!(t.food.sent <= zone.food_demand);
                assert!(t.water.sent <= zone.water_demand);
                assert!(t.food.sent + t.water.sent > 0);
            }

            // Each zone is extracted at most once.
            let mut seen: Vec<usize> = plan.transfers.iter().map(|t| t.zone_index).collect();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), plan.transfers.len());

            let handled = plan.transfers.len() + plan.skipped.len() + plan.unvisited.len();
            assert_eq!(handled, original.len());
        }
    }
}

#[test]
fn random_plans_served_in_non_increasing_score() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let (graph, original, supply) = random_scenario(&mut rng);
        for strategy in strategies() {
            let mut zones = original.clone();
            let plan = allocate(&mut zones, supply, strategy, &graph).unwrap();
            assert!(plan
                .transfers
                .windows(2)
                .all(|w| w[0].score >= w[1].score));
        }
    }
}

#[test]
fn random_runs_are_repeatable() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..100 {
        let (graph, original, supply) = random_scenario(&mut rng);
        for strategy in strategies() {
            let mut first = original.clone();
            let mut second = original.clone();
            let a = allocate(&mut first, supply, strategy, &graph).unwrap();
            let b = allocate(&mut second, supply, strategy, &graph).unwrap();
            assert_eq!(a, b);
            assert_eq!(first, second);
        }
    }
}

#[test]
fn random_distance_tables_are_consistent() {
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..200 {
        let (graph, _, _) = random_scenario(&mut rng);
        let table = graph.shortest_distances(0).unwrap();
        assert_eq!(table.distance(0), Some(0));

        // No edge can shorten a settled distance.
        for edge in graph.edges() {
            if let Some(du) = table.distance(edge.from) {
                let dv = table.distance(edge.to).expect("successor of a reachable node");
                assert!(dv <= du + u64::from(edge.weight));
            }
        }

        for (node, reach) in table.iter() {
            match reach {
                Reach::Distance(d) => {
                    let path = table.path_to(node).unwrap();
                    assert_eq!(path.first(), Some(&0));
                    assert_eq!(path.last(), Some(&node));
                    let along: Vec<u64> =
                        path.iter().map(|&n| table.distance(n).unwrap()).collect();
                    assert!(along.windows(2).all(|w| w[0] <= w[1]));
                    assert_eq!(along.last(), Some(&d));
                }
                Reach::Unreachable => assert!(table.path_to(node).is_none()),
                Reach::OffGraph => unreachable!("iter covers graph nodes only"),
            }
        }
    }
}
