//! Text rendering of scenarios and allocation runs.

use relief_logic::allocation::{AllocationPlan, SequencedRun, Transfer};
use relief_logic::coverage::{CoverageReport, ResourceCoverage};
use relief_logic::graph::Graph;
use relief_logic::scenario::Scenario;
use relief_logic::zone::UrgencyTier;

pub fn print_scenario(scenario: &Scenario, graph: &Graph) {
    let title = if scenario.name.is_empty() {
        "unnamed scenario"
    } else {
        scenario.name.as_str()
    };
    println!("=== Disaster Resource Allocation: {} ===\n", title);
    println!(
        "{} nodes, {} roads, camp at node {}",
        graph.num_nodes(),
        graph.num_edges(),
        scenario.camp
    );
    let skipped = scenario.invalid_roads();
    if !skipped.is_empty() {
        println!("{} road(s) ignored: endpoint outside the graph", skipped.len());
    }
    print!("{}", graph);
    println!(
        "\nCamp total supply: food={}, water={} units",
        scenario.supply.food, scenario.supply.water
    );
}

pub fn print_run(run: &SequencedRun) {
    let plan = &run.plan;
    println!(
        "\n=== Allocation plan ({}, 2 resources) ===",
        plan.strategy.label()
    );
    for t in &plan.transfers {
        println!("{}", format_transfer(t));
    }
    if !plan.skipped.is_empty() {
        println!("Skipped (nothing sendable): {}", join_ids(&plan.skipped));
    }
    if !plan.unvisited.is_empty() {
        println!("Not reached (supply exhausted): {}", join_ids(&plan.unvisited));
    }
    println!(
        "Remaining at camp: food={}, water={}",
        plan.remaining.food, plan.remaining.water
    );
    print_coverage(&CoverageReport::compute(&run.starting_zones, plan));
}

fn format_transfer(t: &Transfer) -> String {
    let tier = UrgencyTier::from_urgency(t.urgency).label();
    let dist = t
        .distance
        .map(|d| format!(", dist={}", d))
        .unwrap_or_default();
    format!(
        "Zone {} [{} urgency={}{}]: food (demand={}, send={}), water (demand={}, send={})",
        t.zone_id, tier, t.urgency, dist, t.food.demand, t.food.sent, t.water.demand, t.water.sent
    )
}

fn print_coverage(report: &CoverageReport) {
    println!(
        "Zones: {} | Food {} | Water {}",
        report.zones,
        format_coverage(&report.food),
        format_coverage(&report.water)
    );
}

fn format_coverage(c: &ResourceCoverage) -> String {
    format!(
        "fully {}, partial {}, none {}, coverage {}/{} ({:.1}%)",
        c.fully,
        c.partial,
        c.none,
        c.total_sent,
        c.total_demand,
        c.percent()
    )
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line summary used by the harness in verbose mode.
pub fn plan_summary(plan: &AllocationPlan) -> String {
    let sent = plan.total_sent();
    format!(
        "{}: order [{}], sent food={} water={}, left food={} water={}",
        plan.strategy.label(),
        join_ids(&plan.order()),
        sent.food,
        sent.water,
        plan.remaining.food,
        plan.remaining.water
    )
}
