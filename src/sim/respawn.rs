//! Deferred enemy respawns, keyed by deadline

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use super::entity::Enemy;

/// A dead enemy waiting to come back
#[derive(Debug, Clone)]
pub struct RespawnEntry {
    pub enemy: Enemy,
    pub deadline: Duration,
    /// Insertion order, breaks deadline ties
    seq: u64,
}

impl PartialEq for RespawnEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Eq for RespawnEntry {}

impl PartialOrd for RespawnEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RespawnEntry {
    // Reversed so the max-heap pops the earliest deadline first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of pending respawns
#[derive(Debug, Clone, Default)]
pub struct RespawnQueue {
    heap: BinaryHeap<RespawnEntry>,
    next_seq: u64,
}

impl RespawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, enemy: Enemy, deadline: Duration) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(RespawnEntry {
            enemy,
            deadline,
            seq,
        });
    }

    /// Remove and return every entry whose deadline is at or before `now`,
    /// earliest first.
    pub fn drain_due(&mut self, now: Duration) -> Vec<Enemy> {
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|e| e.deadline <= now) {
            if let Some(entry) = self.heap.pop() {
                due.push(entry.enemy);
            }
        }
        due
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|e| e.deadline)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
