//! Directed, weighted road network.
//!
//! Nodes are contiguous indices `0..num_nodes`; node 0 is conventionally the
//! camp. Edges live in a single arena and each node keeps the ids of its
//! outgoing edges, in insertion order. Parallel edges are allowed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{try_reserve, ReliefError};

/// Node index, `0..num_nodes`.
pub type NodeId = usize;

/// Index into the graph's edge arena.
pub type EdgeId = usize;

/// A directed road `from -> to` with a travel cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    /// Time or distance cost. Non-negative by construction.
    pub weight: u32,
}

#[derive(Debug, Clone)]
pub struct Graph {
    edges: Vec<Edge>,
    /// node → ids of outgoing edges
    outgoing: Vec<Vec<EdgeId>>,
}

impl Graph {
    /// Graph with `num_nodes` nodes and no edges.
    pub fn new(num_nodes: usize) -> Result<Self, ReliefError> {
        if num_nodes == 0 {
            return Err(ReliefError::EmptyGraph);
        }
        let mut outgoing = Vec::new();
        try_reserve(&mut outgoing, num_nodes, "adjacency lists")?;
        outgoing.resize_with(num_nodes, Vec::new);
        Ok(Self {
            edges: Vec::new(),
            outgoing,
        })
    }

    /// Add a directed edge `from -> to`.
    ///
    /// An endpoint outside the graph is a structural input error: it is
    /// logged, the graph is left unchanged and `EdgeOutOfRange` is returned
    /// so the caller can carry on.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: u32) -> Result<EdgeId, ReliefError> {
        let num_nodes = self.num_nodes();
        if from >= num_nodes || to >= num_nodes {
            log::warn!("Invalid edge {} -> {} (graph has {} nodes)", from, to, num_nodes);
            return Err(ReliefError::EdgeOutOfRange {
                from,
                to,
                num_nodes,
            });
        }

        try_reserve(&mut self.edges, 1, "edge arena")?;
        try_reserve(&mut self.outgoing[from], 1, "adjacency list")?;

        let id = self.edges.len();
        self.edges.push(Edge { from, to, weight });
        self.outgoing[from].push(id);
        Ok(id)
    }

    pub fn num_nodes(&self) -> usize {
        self.outgoing.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        node < self.num_nodes()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Outgoing edges of `node`. Empty for an unknown node.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.outgoing
            .get(node)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&id| &self.edges[id])
    }

    pub fn out_degree(&self, node: NodeId) -> usize {
        self.outgoing.get(node).map_or(0, Vec::len)
    }
}

/// Adjacency listing, one line per node.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph adjacency lists:")?;
        for node in 0..self.num_nodes() {
            write!(f, "Node {}:", node)?;
            if self.out_degree(node) == 0 {
                write!(f, " (no outgoing edges)")?;
            }
            for edge in self.neighbors(node) {
                write!(f, " -> ({}, w={})", edge.to, edge.weight)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
