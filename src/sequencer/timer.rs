// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Monotonic timer queue.
//!
//! Armed triggers pop in deadline order; triggers sharing a deadline pop
//! in the order they were armed.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

/// Opaque handle of an armed trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A trigger waiting for its deadline
#[derive(Debug, Clone)]
pub struct ArmedTrigger<T> {
    pub id: TimerId,
    pub deadline: Instant,
    pub payload: T,
}

// For BinaryHeap - we want the earliest deadline, then the lowest id, first
impl<T> Eq for ArmedTrigger<T> {}

impl<T> PartialEq for ArmedTrigger<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.id == other.id
    }
}

impl<T> Ord for ArmedTrigger<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl<T> PartialOrd for ArmedTrigger<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of delayed triggers
#[derive(Debug)]
pub struct TimerQueue<T> {
    heap: BinaryHeap<ArmedTrigger<T>>,
    next_id: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_id: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_id: 0,
        }
    }

    /// Arm a trigger firing at `deadline`
    pub fn arm(&mut self, deadline: Instant, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.heap.push(ArmedTrigger { id, deadline, payload });
        id
    }

    /// Remove and return the next trigger whose deadline is at or before `now`
    pub fn pop_due(&mut self, now: Instant) -> Option<ArmedTrigger<T>> {
        if self.heap.peek()?.deadline <= now {
            self.heap.pop()
        } else {
            None
        }
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|t| t.deadline)
    }

    /// Cancel every pending trigger, returning how many were dropped
    pub fn clear(&mut self) -> usize {
        let pending = self.heap.len();
        self.heap.clear();
        pending
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
