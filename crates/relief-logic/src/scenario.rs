//! Scenario documents: the road network, zones and camp supply for one run.
//!
//! A scenario is plain JSON:
//!
//! ```json
//! {
//!   "name": "Three villages",
//!   "nodes": 4,
//!   "camp": 0,
//!   "roads": [{ "from": 0, "to": 1, "weight": 5 }],
//!   "zones": [{ "id": 1, "food_demand": 10, "water_demand": 5, "urgency": 50 }],
//!   "supply": { "food": 12, "water": 8 }
//! }
//! ```
//!
//! `camp` defaults to node 0 and `limits` to [`ScenarioLimits::default`].
//! Validation rejects values outside the limits. Roads with endpoints
//! outside the graph are not validation errors: [`Scenario::build_graph`]
//! warns about them and skips them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReliefError;
use crate::graph::{Graph, NodeId};
use crate::zone::{Resource, SupplyPool, Zone, ZoneId};

/// Most zones a scenario may list.
pub const MAX_ZONES: usize = 50;
/// Most units of either resource the camp may hold.
pub const MAX_SUPPLY: u32 = 300;
/// Highest urgency rating.
pub const MAX_URGENCY: u32 = 300;

/// Input bounds checked by [`validate_scenario`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioLimits {
    pub max_zones: usize,
    pub max_supply: u32,
    pub max_urgency: u32,
}

impl Default for ScenarioLimits {
    fn default() -> Self {
        Self {
            max_zones: MAX_ZONES,
            max_supply: MAX_SUPPLY,
            max_urgency: MAX_URGENCY,
        }
    }
}

/// A road as entered. Endpoints are signed so bad input survives parsing
/// and can be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Road {
    pub from: i64,
    pub to: i64,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    /// Node count, camp included.
    pub nodes: usize,
    #[serde(default)]
    pub camp: NodeId,
    #[serde(default)]
    pub roads: Vec<Road>,
    pub zones: Vec<Zone>,
    pub supply: SupplyPool,
    #[serde(default)]
    pub limits: ScenarioLimits,
}

/// Scenario validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    /// The road network needs at least one node.
    NoNodes,
    /// Camp is not a node of the graph.
    CampOutOfRange { camp: NodeId, nodes: usize },
    /// At least one zone is required.
    NoZones,
    /// More zones than the limit allows.
    TooManyZones { count: usize, max: usize },
    /// Urgency above the limit.
    UrgencyOutOfRange { zone: ZoneId, urgency: u32, max: u32 },
    /// Camp stock above the limit.
    SupplyOutOfRange {
        resource: Resource,
        amount: u32,
        max: u32,
    },
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::NoNodes => write!(f, "number of nodes must be positive"),
            ScenarioError::CampOutOfRange { camp, nodes } => {
                write!(f, "camp node {} is not in 0..{}", camp, nodes)
            }
            ScenarioError::NoZones => write!(f, "at least one zone is required"),
            ScenarioError::TooManyZones { count, max } => {
                write!(f, "{} zones given, at most {} allowed", count, max)
            }
            ScenarioError::UrgencyOutOfRange { zone, urgency, max } => {
                write!(f, "zone {} urgency {} is not in 0..={}", zone, urgency, max)
            }
            ScenarioError::SupplyOutOfRange {
                resource,
                amount,
                max,
            } => write!(
                f,
                "total {} supply {} is not in 0..={}",
                resource.name(),
                amount,
                max
            ),
        }
    }
}

/// Validate a scenario, returning all errors found.
pub fn validate_scenario(scenario: &Scenario) -> Vec<ScenarioError> {
    let mut errors = Vec::new();
    let limits = &scenario.limits;

    if scenario.nodes == 0 {
        errors.push(ScenarioError::NoNodes);
    } else if scenario.camp >= scenario.nodes {
        errors.push(ScenarioError::CampOutOfRange {
            camp: scenario.camp,
            nodes: scenario.nodes,
        });
    }

    if scenario.zones.is_empty() {
        errors.push(ScenarioError::NoZones);
    }
    if scenario.zones.len() > limits.max_zones {
        errors.push(ScenarioError::TooManyZones {
            count: scenario.zones.len(),
            max: limits.max_zones,
        });
    }
    for zone in &scenario.zones {
        if zone.urgency > limits.max_urgency {
            errors.push(ScenarioError::UrgencyOutOfRange {
                zone: zone.id,
                urgency: zone.urgency,
                max: limits.max_urgency,
            });
        }
    }

    for resource in Resource::ALL {
        let amount = scenario.supply.get(resource);
        if amount > limits.max_supply {
            errors.push(ScenarioError::SupplyOutOfRange {
                resource,
                amount,
                max: limits.max_supply,
            });
        }
    }

    errors
}

/// Errors that can occur while loading a scenario.
#[derive(Debug)]
pub enum ScenarioLoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(Vec<ScenarioError>),
}

impl From<std::io::Error> for ScenarioLoadError {
    fn from(e: std::io::Error) -> Self {
        ScenarioLoadError::Io(e)
    }
}

impl From<serde_json::Error> for ScenarioLoadError {
    fn from(e: serde_json::Error) -> Self {
        ScenarioLoadError::Json(e)
    }
}

impl std::fmt::Display for ScenarioLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioLoadError::Io(e) => write!(f, "IO error: {}", e),
            ScenarioLoadError::Json(e) => write!(f, "Scenario parse error: {}", e),
            ScenarioLoadError::Invalid(errors) => {
                write!(f, "Invalid scenario: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ScenarioLoadError {}

impl Scenario {
    /// Parse and validate a JSON scenario.
    pub fn from_json(json: &str) -> Result<Self, ScenarioLoadError> {
        let scenario: Scenario = serde_json::from_str(json)?;
        let errors = validate_scenario(&scenario);
        if !errors.is_empty() {
            return Err(ScenarioLoadError::Invalid(errors));
        }
        Ok(scenario)
    }

    /// Read, parse and validate a JSON scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioLoadError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build the road graph. Roads with endpoints outside the graph are
    /// logged and skipped.
    pub fn build_graph(&self) -> Result<Graph, ReliefError> {
        let mut graph = Graph::new(self.nodes)?;
        for road in &self.roads {
            let endpoints = (usize::try_from(road.from), usize::try_from(road.to));
            let (Ok(from), Ok(to)) = endpoints else {
                log::warn!("Invalid edge {} -> {}", road.from, road.to);
                continue;
            };
            match graph.add_edge(from, to, road.weight) {
                Ok(_) => {}
                Err(ReliefError::EdgeOutOfRange { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(graph)
    }

    /// Roads that [`build_graph`](Self::build_graph) would skip.
    pub fn invalid_roads(&self) -> Vec<Road> {
        let in_range = |n: i64| usize::try_from(n).is_ok_and(|n| n < self.nodes);
        self.roads
            .iter()
            .filter(|r| !(in_range(r.from) && in_range(r.to)))
            .copied()
            .collect()
    }

    /// Zone ids that appear more than once.
    pub fn duplicate_zone_ids(&self) -> Vec<ZoneId> {
        let mut ids: Vec<ZoneId> = self.zones.iter().map(|z| z.id).collect();
        ids.sort_unstable();
        let mut dups: Vec<ZoneId> = ids
            .windows(2)
            .filter(|w| w[0] == w[1])
            .map(|w| w[0])
            .collect();
        dups.dedup();
        dups
    }
}
