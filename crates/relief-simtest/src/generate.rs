//! Seeded random scenarios for the invariant sweep.

use rand::rngs::StdRng;
use rand::Rng;
use relief_logic::scenario::{Road, Scenario, ScenarioLimits, MAX_SUPPLY, MAX_URGENCY};
use relief_logic::zone::{SupplyPool, Zone};

/// A valid scenario with up to `max_nodes` nodes. Zone ids stray one past
/// either end of the node range so off-graph zones are exercised too.
pub fn random_scenario(rng: &mut StdRng, index: usize, max_nodes: usize) -> Scenario {
    let limits = ScenarioLimits::default();
    let nodes = rng.gen_range(1..=max_nodes.max(1));

    let road_count = rng.gen_range(0..=nodes * 3);
    let roads = (0..road_count)
        .map(|_| Road {
            from: rng.gen_range(0..nodes) as i64,
            to: rng.gen_range(0..nodes) as i64,
            weight: rng.gen_range(0..=100),
        })
        .collect();

    let zone_count = rng.gen_range(1..=limits.max_zones.min(20));
    let zones = (0..zone_count)
        .map(|_| {
            Zone::new(
                rng.gen_range(-1..=nodes as i64),
                rng.gen_range(0..=80),
                rng.gen_range(0..=80),
                rng.gen_range(0..=MAX_URGENCY),
            )
        })
        .collect();

    Scenario {
        name: format!("random-{}", index),
        nodes,
        camp: 0,
        roads,
        zones,
        supply: SupplyPool::new(rng.gen_range(0..=MAX_SUPPLY), rng.gen_range(0..=MAX_SUPPLY)),
        limits,
    }
}
