//! Single-source shortest distances over the road network.
//!
//! Dijkstra on a [`MinHeap`] keyed by tentative distance. Decrease-key is
//! lazy: an improved node is pushed again and the outdated entry is skipped
//! when it surfaces. Edge weights are unsigned, so the non-negativity
//! precondition holds by construction.

use serde::{Deserialize, Serialize};

use crate::error::{try_reserve, ReliefError};
use crate::graph::{Graph, NodeId};
use crate::heap::MinHeap;

/// Distance charged for a node that cannot be reached from the source, or
/// for an id that is not a node at all. Only the scoring formula uses it.
pub const UNREACHABLE_DISTANCE: u64 = 1_000_000_000;

/// Reachability of a node from the table's source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reach {
    /// Minimum total weight from the source.
    Distance(u64),
    /// A node of the graph with no path from the source.
    Unreachable,
    /// Not a node of the graph.
    OffGraph,
}

impl Reach {
    /// Distance to charge when scoring: the real distance, or
    /// [`UNREACHABLE_DISTANCE`].
    pub fn penalty(self) -> u64 {
        match self {
            Reach::Distance(d) => d,
            Reach::Unreachable | Reach::OffGraph => UNREACHABLE_DISTANCE,
        }
    }

    pub fn distance(self) -> Option<u64> {
        match self {
            Reach::Distance(d) => Some(d),
            _ => None,
        }
    }
}

impl std::fmt::Display for Reach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reach::Distance(d) => write!(f, "{}", d),
            Reach::Unreachable => write!(f, "unreachable"),
            Reach::OffGraph => write!(f, "off-graph"),
        }
    }
}

/// Minimum known distance from one source to every node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceTable {
    source: NodeId,
    /// `None` until the node is reached.
    dist: Vec<Option<u64>>,
    /// Previous node on the best known path.
    prev: Vec<Option<NodeId>>,
}

impl DistanceTable {
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Number of nodes covered.
    pub fn len(&self) -> usize {
        self.dist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }

    /// Distance to `node`, `None` if unreachable or not a node.
    pub fn distance(&self, node: NodeId) -> Option<u64> {
        self.dist.get(node).copied().flatten()
    }

    pub fn reach(&self, node: NodeId) -> Reach {
        match self.dist.get(node) {
            Some(Some(d)) => Reach::Distance(*d),
            Some(None) => Reach::Unreachable,
            None => Reach::OffGraph,
        }
    }

    /// Reachability of a zone id, which may be negative or beyond the graph.
    pub fn reach_id(&self, id: i64) -> Reach {
        usize::try_from(id).map_or(Reach::OffGraph, |node| self.reach(node))
    }

    /// Node sequence from the source to `node`, inclusive.
    pub fn path_to(&self, node: NodeId) -> Option<Vec<NodeId>> {
        self.distance(node)?;
        let mut path = vec![node];
        let mut current = node;
        while current != self.source {
            current = self.prev[current]?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }

    /// `(node, reach)` for every node of the graph.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Reach)> + '_ {
        (0..self.dist.len()).map(move |node| (node, self.reach(node)))
    }

    /// Number of nodes with a path from the source, source included.
    pub fn reachable_count(&self) -> usize {
        self.dist.iter().filter(|d| d.is_some()).count()
    }
}

impl Graph {
    /// Shortest distances from `source` to every node, in O((V + E) log V).
    pub fn shortest_distances(&self, source: NodeId) -> Result<DistanceTable, ReliefError> {
        let n = self.num_nodes();
        if source >= n {
            return Err(ReliefError::NodeOutOfRange {
                node: source,
                num_nodes: n,
            });
        }

        let mut dist: Vec<Option<u64>> = Vec::new();
        try_reserve(&mut dist, n, "distance table")?;
        dist.resize(n, None);
        let mut prev: Vec<Option<NodeId>> = Vec::new();
        try_reserve(&mut prev, n, "predecessor table")?;
        prev.resize(n, None);

        let mut heap: MinHeap<u64, NodeId> = MinHeap::with_capacity(n)?;
        dist[source] = Some(0);
        heap.push(0, source)?;

        while !heap.is_empty() {
            let entry = heap.pop()?;
            let (d, u) = (entry.key, entry.item);

            // Stale entry: a shorter path to `u` was settled already.
            if dist[u].is_some_and(|best| d > best) {
                continue;
            }

            for edge in self.neighbors(u) {
                let v = edge.to;
                let candidate = d.saturating_add(u64::from(edge.weight));
                if dist[v].map_or(true, |best| candidate < best) {
                    dist[v] = Some(candidate);
                    prev[v] = Some(u);
                    heap.push(candidate, v)?;
                }
            }
        }

        log::debug!(
            "Distances from node {}: {} of {} nodes reachable",
            source,
            dist.iter().filter(|d| d.is_some()).count(),
            n
        );

        Ok(DistanceTable { source, dist, prev })
    }
}
