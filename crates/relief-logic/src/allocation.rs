//! Greedy two-resource allocation.
//!
//! Every zone is scored, loaded into a [`PriorityRanking`] and then served
//! strictly in descending score order. For each extracted zone the engine
//! sends `min(stock, demand)` of food and of water independently. A zone is
//! extracted once per run: if it was only partly served it is not revisited,
//! even when stock is left over after the lower-ranked zones.
//!
//! Two scoring rules are available:
//!
//! | Strategy | Score |
//! |----------|-------|
//! | [`Strategy::Urgency`] | `urgency` |
//! | [`Strategy::UrgencyDistance`] | `urgency × 1000 − distance from camp` |
//!
//! Zones whose id is not a reachable node are charged
//! [`UNREACHABLE_DISTANCE`](crate::shortest_path::UNREACHABLE_DISTANCE),
//! which drops them below every reachable zone. Equal scores are served in
//! ascending zone id, then input order.

use serde::{Deserialize, Serialize};

use crate::error::{try_reserve, ReliefError};
use crate::graph::{Graph, NodeId};
use crate::ranking::{PriorityRanking, Score};
use crate::shortest_path::Reach;
use crate::zone::{Resource, SupplyPool, Zone, ZoneId};

/// Urgency multiplier in the urgency + distance score.
pub const DISTANCE_WEIGHT: Score = 1000;

/// Scoring rule used to rank zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Score = urgency.
    Urgency,
    /// Score = urgency × 1000 − shortest distance from `camp`.
    UrgencyDistance { camp: NodeId },
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Urgency => "urgency-based",
            Strategy::UrgencyDistance { .. } => "urgency + distance",
        }
    }
}

/// Ranking entity. Field order gives the tie-break: zone id, then position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Slot {
    id: ZoneId,
    index: usize,
}

/// One resource of one transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    /// Outstanding demand before the transfer.
    pub demand: u32,
    pub sent: u32,
}

impl Shipment {
    /// Outstanding demand after the transfer.
    pub fn remaining(&self) -> u32 {
        self.demand.saturating_sub(self.sent)
    }
}

/// A committed transfer to one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub zone_id: ZoneId,
    /// Position of the zone in the input slice.
    pub zone_index: usize,
    pub urgency: u32,
    pub score: Score,
    /// Distance from the camp; `None` for the urgency-only strategy.
    pub distance: Option<Reach>,
    pub food: Shipment,
    pub water: Shipment,
}

impl Transfer {
    pub fn shipment(&self, resource: Resource) -> &Shipment {
        match resource {
            Resource::Food => &self.food,
            Resource::Water => &self.water,
        }
    }
}

/// Result of one strategy run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub strategy: Strategy,
    pub initial_supply: SupplyPool,
    /// Transfers in the order zones were extracted from the ranking.
    pub transfers: Vec<Transfer>,
    /// Zones extracted with nothing sendable, in extraction order.
    pub skipped: Vec<ZoneId>,
    /// Zones still ranked when both pools ran dry, in ranking order.
    pub unvisited: Vec<ZoneId>,
    pub remaining: SupplyPool,
}

impl AllocationPlan {
    pub fn total_sent(&self) -> SupplyPool {
        self.transfers
            .iter()
            .fold(SupplyPool::default(), |acc, t| SupplyPool {
                food: acc.food + t.food.sent,
                water: acc.water + t.water.sent,
            })
    }

    /// Zone ids in the order they were served.
    pub fn order(&self) -> Vec<ZoneId> {
        self.transfers.iter().map(|t| t.zone_id).collect()
    }

    pub fn transfer_for(&self, zone_id: ZoneId) -> Option<&Transfer> {
        self.transfers.iter().find(|t| t.zone_id == zone_id)
    }
}

/// Score for [`Strategy::Urgency`].
pub fn urgency_score(zone: &Zone) -> Score {
    Score::from(zone.urgency)
}

/// Score for [`Strategy::UrgencyDistance`].
pub fn distance_score(zone: &Zone, reach: Reach) -> Score {
    let penalty = Score::try_from(reach.penalty()).unwrap_or(Score::MAX);
    Score::from(zone.urgency)
        .saturating_mul(DISTANCE_WEIGHT)
        .saturating_sub(penalty)
}

/// Allocate, ranking zones by urgency alone.
pub fn allocate_by_urgency(
    zones: &mut [Zone],
    supply: SupplyPool,
) -> Result<AllocationPlan, ReliefError> {
    distribute(zones, supply, Strategy::Urgency, |zone| {
        (urgency_score(zone), None)
    })
}

/// Allocate, ranking zones by urgency discounted by road distance from `camp`.
pub fn allocate_by_urgency_and_distance(
    zones: &mut [Zone],
    supply: SupplyPool,
    graph: &Graph,
    camp: NodeId,
) -> Result<AllocationPlan, ReliefError> {
    let table = graph.shortest_distances(camp)?;
    distribute(zones, supply, Strategy::UrgencyDistance { camp }, |zone| {
        let reach = table.reach_id(zone.id);
        (distance_score(zone, reach), Some(reach))
    })
}

/// Run `strategy`. The graph is only consulted by the distance strategy.
pub fn allocate(
    zones: &mut [Zone],
    supply: SupplyPool,
    strategy: Strategy,
    graph: &Graph,
) -> Result<AllocationPlan, ReliefError> {
    match strategy {
        Strategy::Urgency => allocate_by_urgency(zones, supply),
        Strategy::UrgencyDistance { camp } => {
            allocate_by_urgency_and_distance(zones, supply, graph, camp)
        }
    }
}

fn distribute<F>(
    zones: &mut [Zone],
    supply: SupplyPool,
    strategy: Strategy,
    mut rate: F,
) -> Result<AllocationPlan, ReliefError>
where
    F: FnMut(&Zone) -> (Score, Option<Reach>),
{
    let mut ranking = PriorityRanking::with_capacity(zones.len())?;
    let mut distances: Vec<Option<Reach>> = Vec::new();
    try_reserve(&mut distances, zones.len(), "zone distances")?;

    for (index, zone) in zones.iter().enumerate() {
        let (score, distance) = rate(zone);
        distances.push(distance);
        ranking.push(Slot { id: zone.id, index }, score)?;
    }

    let mut pool = supply;
    let mut transfers: Vec<Transfer> = Vec::new();
    try_reserve(&mut transfers, zones.len(), "transfers")?;
    let mut skipped: Vec<ZoneId> = Vec::new();
    try_reserve(&mut skipped, zones.len(), "skipped zones")?;

    while !ranking.is_empty() && !pool.is_exhausted() {
        let ranked = ranking.pop()?;
        let zone = &mut zones[ranked.entity.index];

        let food = Shipment {
            demand: zone.food_demand,
            sent: zone.food_demand.min(pool.food),
        };
        let water = Shipment {
            demand: zone.water_demand,
            sent: zone.water_demand.min(pool.water),
        };

        if food.sent == 0 && water.sent == 0 {
            log::debug!("Zone {} skipped: nothing sendable", zone.id);
            skipped.push(zone.id);
            continue;
        }

        pool.take(Resource::Food, food.sent);
        pool.take(Resource::Water, water.sent);
        zone.receive(Resource::Food, food.sent);
        zone.receive(Resource::Water, water.sent);

        log::debug!(
            "Zone {} [score={}]: food {}/{}, water {}/{}",
            zone.id,
            ranked.priority,
            food.sent,
            food.demand,
            water.sent,
            water.demand
        );

        transfers.push(Transfer {
            zone_id: zone.id,
            zone_index: ranked.entity.index,
            urgency: zone.urgency,
            score: ranked.priority,
            distance: distances[ranked.entity.index],
            food,
            water,
        });
    }

    let unvisited: Vec<ZoneId> = ranking
        .into_ranked_vec()?
        .into_iter()
        .map(|r| r.entity.id)
        .collect();

    log::info!(
        "{} allocation: {} transfers, {} skipped, {} unvisited, remaining food={} water={}",
        strategy.label(),
        transfers.len(),
        skipped.len(),
        unvisited.len(),
        pool.food,
        pool.water
    );

    Ok(AllocationPlan {
        strategy,
        initial_supply: supply,
        transfers,
        skipped,
        unvisited,
        remaining: pool,
    })
}

/// How zone demand carries from one strategy to the next in [`run_sequence`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarryOver {
    /// Every strategy starts from the original demands.
    #[default]
    Fresh,
    /// Each strategy starts from the demands left by the previous one.
    /// Supply is still reset to the full totals.
    Depleted,
}

/// One entry of [`run_sequence`]'s output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedRun {
    /// Zone demands at the start of this run.
    pub starting_zones: Vec<Zone>,
    pub plan: AllocationPlan,
}

/// Run several strategies one after another against the same zones.
pub fn run_sequence(
    zones: &[Zone],
    supply: SupplyPool,
    strategies: &[Strategy],
    graph: &Graph,
    carry: CarryOver,
) -> Result<Vec<SequencedRun>, ReliefError> {
    let mut working = zones.to_vec();
    let mut runs = Vec::with_capacity(strategies.len());

    for &strategy in strategies {
        if carry == CarryOver::Fresh {
            working.clone_from_slice(zones);
        }
        let starting_zones = working.clone();
        let plan = allocate(&mut working, supply, strategy, graph)?;
        runs.push(SequencedRun {
            starting_zones,
            plan,
        });
    }

    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_zones() -> Vec<Zone> {
        vec![
            Zone::new(1, 10, 5, 50),
            Zone::new(2, 5, 5, 80),
            Zone::new(3, 20, 0, 10),
        ]
    }

    fn camp_graph() -> Graph {
        let mut g = Graph::new(4).unwrap();
        g.add_edge(0, 1, 5).unwrap();
        g.add_edge(0, 2, 2).unwrap();
        g.add_edge(0, 3, 10).unwrap();
        g
    }

    #[test]
    fn test_urgency_worked_example() {
        let mut zones = sample_zones();
        let plan = allocate_by_urgency(&mut zones, SupplyPool::new(12, 8)).unwrap();

        assert_eq!(plan.order(), vec![2, 1]);
        let z2 = &plan.transfers[0];
        assert_eq!((z2.food.sent, z2.water.sent), (5, 5));
        let z1 = &plan.transfers[1];
        assert_eq!((z1.food.sent, z1.water.sent), (7, 3));
        assert_eq!((z1.food.remaining(), z1.water.remaining()), (3, 2));

        assert_eq!(plan.unvisited, vec![3]);
        assert_eq!(plan.remaining, SupplyPool::new(0, 0));
        assert_eq!(zones[0], Zone::new(1, 3, 2, 50));
        assert_eq!(zones[2], Zone::new(3, 20, 0, 10));
    }

    #[test]
    fn test_distance_worked_example() {
        let mut zones = sample_zones();
        let plan =
            allocate_by_urgency_and_distance(&mut zones, SupplyPool::new(12, 8), &camp_graph(), 0)
                .unwrap();

        assert_eq!(plan.order(), vec![2, 1]);
        assert_eq!(plan.transfers[0].score, 79_998);
        assert_eq!(plan.transfers[0].distance, Some(Reach::Distance(2)));
        assert_eq!(plan.transfers[1].score, 49_995);
        assert_eq!(plan.remaining, SupplyPool::new(0, 0));
    }

    #[test]
    fn test_partly_served_zone_not_revisited() {
        // Zone 1 drains the water; zone 2 wants only water and is skipped
        // although food is left.
        let mut zones = vec![Zone::new(1, 10, 10, 90), Zone::new(2, 0, 10, 10)];
        let plan = allocate_by_urgency(&mut zones, SupplyPool::new(20, 10)).unwrap();

        assert_eq!(plan.order(), vec![1]);
        assert_eq!(plan.skipped, vec![2]);
        assert_eq!(plan.remaining, SupplyPool::new(10, 0));
        assert_eq!(zones[1].water_demand, 10);
    }

    #[test]
    fn test_never_revisits_after_lower_zones() {
        let mut zones = vec![Zone::new(1, 0, 5, 90), Zone::new(2, 3, 0, 10)];
        let plan = allocate_by_urgency(&mut zones, SupplyPool::new(10, 2)).unwrap();
        assert_eq!(plan.order(), vec![1, 2]);
        // Zone 1 still wants 3 water and stays short after zone 2 is served.
        assert_eq!(zones[0].water_demand, 3);
        assert_eq!(plan.remaining, SupplyPool::new(7, 0));
    }

    #[test]
    fn test_zero_supply_sends_nothing() {
        let mut zones = sample_zones();
        let plan = allocate_by_urgency(&mut zones, SupplyPool::new(0, 0)).unwrap();
        assert!(plan.transfers.is_empty());
        assert_eq!(plan.unvisited, vec![2, 1, 3]);
        assert_eq!(zones, sample_zones());
    }

    #[test]
    fn test_no_zones() {
        let mut zones: Vec<Zone> = Vec::new();
        let plan = allocate_by_urgency(&mut zones, SupplyPool::new(5, 5)).unwrap();
        assert!(plan.transfers.is_empty());
        assert_eq!(plan.remaining, SupplyPool::new(5, 5));
    }

    #[test]
    fn test_ties_served_by_ascending_id() {
        let mut zones = vec![
            Zone::new(9, 1, 1, 40),
            Zone::new(4, 1, 1, 40),
            Zone::new(6, 1, 1, 40),
        ];
        let plan = allocate_by_urgency(&mut zones, SupplyPool::new(10, 10)).unwrap();
        assert_eq!(plan.order(), vec![4, 6, 9]);
    }

    #[test]
    fn test_duplicate_ids_each_served_once() {
        let mut zones = vec![Zone::new(1, 4, 0, 70), Zone::new(1, 6, 0, 30)];
        let plan = allocate_by_urgency(&mut zones, SupplyPool::new(100, 0)).unwrap();
        assert_eq!(plan.transfers.len(), 2);
        assert_eq!(plan.transfers[0].zone_index, 0);
        assert_eq!(plan.transfers[1].zone_index, 1);
        assert!(zones.iter().all(Zone::is_satisfied));
    }

    #[test]
    fn test_off_graph_and_unreachable_rank_last() {
        let mut g = Graph::new(3).unwrap();
        g.add_edge(0, 1, 500).unwrap();
        let mut zones = vec![
            Zone::new(7, 1, 1, 300), // not a node
            Zone::new(2, 1, 1, 300), // node with no road
            Zone::new(1, 1, 1, 1),
        ];
        let plan =
            allocate_by_urgency_and_distance(&mut zones, SupplyPool::new(10, 10), &g, 0).unwrap();
        assert_eq!(plan.order(), vec![1, 2, 7]);
        assert_eq!(plan.transfers[0].score, 500);
        assert_eq!(plan.transfers[1].distance, Some(Reach::Unreachable));
        assert_eq!(plan.transfers[1].score, 300_000 - 1_000_000_000);
        assert_eq!(plan.transfers[2].distance, Some(Reach::OffGraph));
    }

    #[test]
    fn test_distance_breaks_equal_urgency() {
        let mut zones = sample_zones();
        for z in &mut zones {
            z.urgency = 50;
        }
        let plan =
            allocate_by_urgency_and_distance(&mut zones, SupplyPool::new(100, 100), &camp_graph(), 0)
                .unwrap();
        assert_eq!(plan.order(), vec![2, 1, 3]);
    }

    #[test]
    fn test_camp_out_of_range() {
        let mut zones = sample_zones();
        let err =
            allocate_by_urgency_and_distance(&mut zones, SupplyPool::new(1, 1), &camp_graph(), 9)
                .unwrap_err();
        assert_eq!(
            err,
            ReliefError::NodeOutOfRange {
                node: 9,
                num_nodes: 4
            }
        );
        assert_eq!(zones, sample_zones());
    }

    #[test]
    fn test_score_formulas() {
        let zone = Zone::new(3, 0, 0, 10);
        assert_eq!(urgency_score(&zone), 10);
        assert_eq!(distance_score(&zone, Reach::Distance(10)), 9_990);
        assert_eq!(distance_score(&zone, Reach::OffGraph), 10_000 - 1_000_000_000);
        assert_eq!(distance_score(&zone, Reach::Distance(u64::MAX)), 10_000 - i64::MAX);
    }

    #[test]
    fn test_sequence_fresh_vs_depleted() {
        let zones = sample_zones();
        let strategies = [Strategy::Urgency, Strategy::UrgencyDistance { camp: 0 }];
        let g = camp_graph();
        let supply = SupplyPool::new(12, 8);

        let fresh = run_sequence(&zones, supply, &strategies, &g, CarryOver::Fresh).unwrap();
        assert_eq!(fresh[0].plan.order(), fresh[1].plan.order());
        assert_eq!(fresh[1].starting_zones, zones);
        assert_eq!(fresh[1].plan.remaining, SupplyPool::new(0, 0));

        let depleted = run_sequence(&zones, supply, &strategies, &g, CarryOver::Depleted).unwrap();
        let second = &depleted[1].plan;
        assert_eq!(depleted[1].starting_zones[1], Zone::new(2, 0, 0, 80));
        assert_eq!(second.skipped, vec![2]);
        assert_eq!(second.order(), vec![1, 3]);
        assert_eq!(second.transfers[0].food.sent, 3);
        assert_eq!(second.transfers[1].food.sent, 9);
        assert_eq!(second.remaining, SupplyPool::new(0, 6));
    }

    #[test]
    fn test_totals() {
        let mut zones = sample_zones();
        let plan = allocate_by_urgency(&mut zones, SupplyPool::new(40, 40)).unwrap();
        assert_eq!(plan.total_sent(), SupplyPool::new(35, 10));
        assert_eq!(plan.remaining, SupplyPool::new(5, 30));
        assert_eq!(plan.transfer_for(3).map(|t| t.food.sent), Some(20));
        assert_eq!(Strategy::Urgency.label(), "urgency-based");
    }

    #[test]
    fn test_shipment_by_resource() {
        let mut zones = sample_zones();
        let plan = allocate_by_urgency(&mut zones, SupplyPool::new(12, 8)).unwrap();
        let first = &plan.transfers[0];
        assert_eq!(first.shipment(Resource::Food), &first.food);
        assert_eq!(first.shipment(Resource::Water), &first.water);

        let second = &plan.transfers[1];
        assert_eq!(second.zone_id, 1);
        assert_eq!(second.shipment(Resource::Water).sent, 3);
        assert_eq!(second.shipment(Resource::Water).remaining(), 2);
    }
}
