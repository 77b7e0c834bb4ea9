//! Deduplicated FIFO of pending field actions.
//!
//! Every queued entry and the in-flight request own exactly one reservation
//! key. Re-submitting a reserved key is a silent no-op, which is what absorbs
//! repeated clicks while a long walk or animation is in progress.

use std::collections::{HashSet, VecDeque};

use crate::action::{PendingAction, ReservationKey};

#[derive(Debug, Default)]
pub struct ActionQueue {
    entries: VecDeque<PendingAction>,
    reserved: HashSet<ReservationKey>,
    in_flight: Option<ReservationKey>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `action` unless its key is already reserved.
    ///
    /// Returns `false` for a duplicate.
    pub fn enqueue(&mut self, action: PendingAction) -> bool {
        let key = action.key();
        if !self.reserved.insert(key) {
            return false;
        }
        self.entries.push_back(action);
        self.debug_check();
        true
    }

    /// Removes the head entry and marks its key as in flight.
    ///
    /// # Panics
    ///
    /// Debug builds assert that no other request is in flight.
    pub fn dequeue(&mut self) -> Option<PendingAction> {
        debug_assert!(self.in_flight.is_none(), "dequeue while a request is in flight");
        let action = self.entries.pop_front()?;
        self.in_flight = Some(action.key());
        self.debug_check();
        Some(action)
    }

    /// Returns the in-flight request to the head of the queue, keeping its
    /// reservation.
    pub fn requeue_front(&mut self, action: PendingAction) {
        let key = action.key();
        if self.in_flight == Some(key) {
            self.in_flight = None;
        } else if !self.reserved.insert(key) {
            return;
        }
        self.entries.push_front(action);
        self.debug_check();
    }

    /// Drops the in-flight reservation after the request finished or was
    /// discarded.
    pub fn release_in_flight(&mut self) -> Option<ReservationKey> {
        let key = self.in_flight.take()?;
        self.reserved.remove(&key);
        self.debug_check();
        Some(key)
    }

    /// Drops every pending entry and the in-flight reservation.
    ///
    /// Returns the number of pending entries discarded.
    pub fn clear_all(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        self.reserved.clear();
        self.in_flight = None;
        dropped
    }

    pub fn is_reserved(&self, key: &ReservationKey) -> bool {
        self.reserved.contains(key)
    }

    pub fn head(&self) -> Option<&PendingAction> {
        self.entries.front()
    }

    pub fn in_flight(&self) -> Option<ReservationKey> {
        self.in_flight
    }

    /// Number of pending entries, excluding the in-flight request.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingAction> {
        self.entries.iter()
    }

    pub fn keys(&self) -> Vec<ReservationKey> {
        self.entries.iter().map(PendingAction::key).collect()
    }

    fn debug_check(&self) {
        debug_assert_eq!(
            self.reserved.len(),
            self.entries.len() + usize::from(self.in_flight.is_some()),
            "reservation set out of sync with queue entries"
        );
    }
}
