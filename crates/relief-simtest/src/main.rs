//! Relief Headless Allocation Harness
//!
//! Loads a scenario, prints the road network, runs the allocation
//! strategies and reports the transfer trace, leftover supply and coverage.
//! With `--check` it also validates allocation invariants over the scenario
//! and a sweep of seeded random scenarios.
//!
//! Usage:
//!   cargo run -p relief-simtest
//!   cargo run -p relief-simtest -- --scenario data/scenarios/river_delta.json --check
//!   cargo run -p relief-simtest -- --chained --verbose

mod checks;
mod generate;
mod report;

use std::process;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use relief_logic::allocation::{run_sequence, CarryOver, SequencedRun, Strategy};
use relief_logic::scenario::Scenario;

// ── Built-in scenario (the three-village worked example) ───────────────
const DEFAULT_SCENARIO_JSON: &str = include_str!("../../../data/scenarios/three_villages.json");

const SCENARIO_ARG: &str = "scenario";
const STRATEGY_ARG: &str = "strategy";
const CHAINED_ARG: &str = "chained";
const JSON_ARG: &str = "json";
const CHECK_ARG: &str = "check";
const ROUNDS_ARG: &str = "rounds";
const SEED_ARG: &str = "seed";
const VERBOSE_ARG: &str = "verbose";

fn cli() -> Command {
    Command::new("relief-simtest")
        .about("Greedy food and water allocation for disaster relief zones")
        .arg(
            Arg::new(SCENARIO_ARG)
                .help("Scenario JSON file (defaults to the built-in three-village scenario)")
                .short('s')
                .long(SCENARIO_ARG)
                .value_name("FILE"),
        )
        .arg(
            Arg::new(STRATEGY_ARG)
                .help("Which allocation strategy to run")
                .long(STRATEGY_ARG)
                .value_parser(["urgency", "distance", "both"])
                .default_value("both"),
        )
        .arg(
            Arg::new(CHAINED_ARG)
                .help("Start each strategy from the demands left by the previous one")
                .long(CHAINED_ARG)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(JSON_ARG)
                .help("Print the allocation plans as JSON instead of text")
                .long(JSON_ARG)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(CHECK_ARG)
                .help("Validate allocation invariants and exit non-zero on failure")
                .long(CHECK_ARG)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ROUNDS_ARG)
                .help("Random scenarios to sweep with --check")
                .long(ROUNDS_ARG)
                .value_parser(value_parser!(usize))
                .default_value("100"),
        )
        .arg(
            Arg::new(SEED_ARG)
                .help("Seed for the random sweep")
                .long(SEED_ARG)
                .value_parser(value_parser!(u64))
                .default_value("42"),
        )
        .arg(
            Arg::new(VERBOSE_ARG)
                .help("Debug logging and passing checks in the summary")
                .short('v')
                .long(VERBOSE_ARG)
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = cli().get_matches();
    let verbose = matches.get_flag(VERBOSE_ARG);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "warn" }),
    )
    .init();

    if let Err(err) = run(&matches, verbose) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = match matches.get_one::<String>(SCENARIO_ARG) {
        Some(path) => Scenario::load(path)?,
        None => Scenario::from_json(DEFAULT_SCENARIO_JSON)?,
    };
    for id in scenario.duplicate_zone_ids() {
        log::warn!("Zone id {} appears more than once", id);
    }

    let graph = scenario.build_graph()?;
    let strategies = selected_strategies(matches, scenario.camp);
    let carry = if matches.get_flag(CHAINED_ARG) {
        CarryOver::Depleted
    } else {
        CarryOver::Fresh
    };

    let runs: Vec<SequencedRun> =
        run_sequence(&scenario.zones, scenario.supply, &strategies, &graph, carry)?;

    if matches.get_flag(JSON_ARG) {
        let plans: Vec<_> = runs.iter().map(|r| &r.plan).collect();
        println!("{}", serde_json::to_string_pretty(&plans)?);
    } else {
        report::print_scenario(&scenario, &graph);
        for run in &runs {
            report::print_run(run);
        }
    }

    if matches.get_flag(CHECK_ARG) {
        let rounds = *matches.get_one::<usize>(ROUNDS_ARG).unwrap_or(&100);
        let seed = *matches.get_one::<u64>(SEED_ARG).unwrap_or(&42);

        let mut results = checks::validate_scenario_runs(&scenario, &graph, &strategies);
        results.extend(checks::validate_random_sweep(seed, rounds));

        if !checks::print_summary(&results, verbose) {
            process::exit(1);
        }
    }

    Ok(())
}

fn selected_strategies(matches: &ArgMatches, camp: usize) -> Vec<Strategy> {
    let distance = Strategy::UrgencyDistance { camp };
    match matches.get_one::<String>(STRATEGY_ARG).map(String::as_str) {
        Some("urgency") => vec![Strategy::Urgency],
        Some("distance") => vec![distance],
        _ => vec![Strategy::Urgency, distance],
    }
}
