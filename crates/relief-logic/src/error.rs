//! Library error type.

/// Errors surfaced by graph construction, shortest paths, heaps and allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReliefError {
    /// Pop on an empty heap or ranking.
    EmptyQueue,
    /// A graph must have at least one node.
    EmptyGraph,
    /// Edge endpoint outside `0..num_nodes`. The graph is left untouched.
    EdgeOutOfRange {
        from: usize,
        to: usize,
        num_nodes: usize,
    },
    /// Node index outside `0..num_nodes`.
    NodeOutOfRange { node: usize, num_nodes: usize },
    /// Reserving storage failed.
    StorageExhausted {
        what: &'static str,
        requested: usize,
    },
}

/// Reserve room for `additional` more elements, reporting failure instead of aborting.
pub(crate) fn try_reserve<T>(
    buf: &mut Vec<T>,
    additional: usize,
    what: &'static str,
) -> Result<(), ReliefError> {
    buf.try_reserve(additional)
        .map_err(|_| ReliefError::StorageExhausted {
            what,
            requested: buf.len().saturating_add(additional),
        })
}

impl std::fmt::Display for ReliefError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReliefError::EmptyQueue => write!(f, "priority queue is empty"),
            ReliefError::EmptyGraph => write!(f, "graph must have at least one node"),
            ReliefError::EdgeOutOfRange {
                from,
                to,
                num_nodes,
            } => write!(
                f,
                "invalid edge {} -> {} (graph has {} nodes)",
                from, to, num_nodes
            ),
            ReliefError::NodeOutOfRange { node, num_nodes } => {
                write!(f, "node {} out of range (graph has {} nodes)", node, num_nodes)
            }
            ReliefError::StorageExhausted { what, requested } => {
                write!(f, "failed to allocate {} ({} entries)", what, requested)
            }
        }
    }
}

impl std::error::Error for ReliefError {}
