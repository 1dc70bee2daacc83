//! Pure allocation logic for disaster relief.
//!
//! This crate contains everything needed to decide how a camp's limited
//! food and water should be split across affected zones. Functions take
//! plain data and return results: no terminal I/O, no persistence, no
//! threads. Data entry and reporting live in the `relief-simtest` harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`allocation`] | Greedy two-resource distribution, urgency and urgency+distance scoring |
//! | [`coverage`] | Fully/partially/unserved zone counts and coverage percentages |
//! | [`error`] | Library error type |
//! | [`graph`] | Directed weighted road network (edge arena + per-node edge lists) |
//! | [`heap`] | Generic binary heap, min-first or max-first, deterministic ties |
//! | [`ranking`] | Max-priority ranking of zones by score |
//! | [`scenario`] | JSON scenario document, limits and validation |
//! | [`shortest_path`] | Dijkstra distances from the camp, routes, reachability |
//! | [`zone`] | Zones, resources, supply pool, urgency tiers |

pub mod allocation;
pub mod coverage;
pub mod error;
pub mod graph;
pub mod heap;
pub mod ranking;
pub mod scenario;
pub mod shortest_path;
pub mod zone;

pub use error::ReliefError;
