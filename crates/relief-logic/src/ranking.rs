//! Max-priority ranking of entities by integer score.
//!
//! Thin wrapper over [`MaxHeap`] with the vocabulary the allocation engine
//! uses. Equal scores come out in ascending entity order.

use crate::error::ReliefError;
use crate::heap::MaxHeap;

/// Ranking score. Higher is served first.
pub type Score = i64;

/// An entity extracted from the ranking together with its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranked<T> {
    pub entity: T,
    pub priority: Score,
}

#[derive(Debug, Clone)]
pub struct PriorityRanking<T> {
    heap: MaxHeap<Score, T>,
}

impl<T: Ord> PriorityRanking<T> {
    /// Preallocate room for `capacity` entries. The ranking still grows past it.
    pub fn with_capacity(capacity: usize) -> Result<Self, ReliefError> {
        Ok(Self {
            heap: MaxHeap::with_capacity(capacity)?,
        })
    }

    pub fn push(&mut self, entity: T, priority: Score) -> Result<(), ReliefError> {
        self.heap.push(priority, entity)
    }

    /// Remove the highest-scoring entity, or [`ReliefError::EmptyQueue`].
    pub fn pop(&mut self) -> Result<Ranked<T>, ReliefError> {
        self.heap.pop().map(|e| Ranked {
            entity: e.item,
            priority: e.key,
        })
    }

    pub fn peek(&self) -> Option<(&T, Score)> {
        self.heap.peek().map(|e| (&e.item, e.key))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Remaining entities in extraction order.
    pub fn into_ranked_vec(self) -> Result<Vec<Ranked<T>>, ReliefError> {
        Ok(self
            .heap
            .into_sorted_vec()?
            .into_iter()
            .map(|e| Ranked {
                entity: e.item,
                priority: e.key,
            })
            .collect())
    }
}

impl<T: Ord> Default for PriorityRanking<T> {
    fn default() -> Self {
        Self {
            heap: MaxHeap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_descending_priority() {
        let mut ranking = PriorityRanking::with_capacity(3).unwrap();
        ranking.push(1, 50).unwrap();
        ranking.push(2, 80).unwrap();
        ranking.push(3, 10).unwrap();

        assert_eq!(ranking.pop().unwrap().entity, 2);
        assert_eq!(ranking.pop().unwrap().entity, 1);
        assert_eq!(ranking.pop().unwrap().entity, 3);
        assert_eq!(ranking.pop(), Err(ReliefError::EmptyQueue));
    }

    #[test]
    fn test_push_beyond_capacity_is_kept() {
        let mut ranking = PriorityRanking::with_capacity(1).unwrap();
        ranking.push(10, 1).unwrap();
        ranking.push(11, 2).unwrap();
        ranking.push(12, 3).unwrap();
        assert_eq!(ranking.len(), 3);
        assert_eq!(ranking.peek(), Some((&12, 3)));
    }

    #[test]
    fn test_zero_capacity_ranking_accepts_entries() {
        let mut ranking = PriorityRanking::with_capacity(0).unwrap();
        ranking.push(4, -7).unwrap();
        assert_eq!(
            ranking.pop(),
            Ok(Ranked {
                entity: 4,
                priority: -7
            })
        );
    }

    #[test]
    fn test_equal_scores_ascending_entity() {
        let mut ranking = PriorityRanking::default();
        for id in [9, 2, 5] {
            ranking.push(id, 100).unwrap();
        }
        ranking.push(1, 99).unwrap();
        let order: Vec<i32> = ranking
            .into_ranked_vec()
            .unwrap()
            .iter()
            .map(|r| r.entity)
            .collect();
        assert_eq!(order, vec![2, 5, 9, 1]);
    }

    #[test]
    fn test_negative_scores_rank_below_positive() {
        let mut ranking = PriorityRanking::default();
        ranking.push("far", -999_990_000).unwrap();
        ranking.push("near", 49_995).unwrap();
        assert_eq!(ranking.pop().unwrap().entity, "near");
        assert_eq!(ranking.pop().unwrap().entity, "far");
        assert!(ranking.is_empty());
    }
}
