// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batched vote lookups with stale-result dropping.
//!
//! Every change of the visible event set (once the axis has settled) issues a
//! [`VoteBatchTicket`] with a fresh generation. The host fetches the tallies
//! however it likes and hands them back with the ticket. Results for any
//! ticket other than the latest are ignored.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::{HashMap, HashSet};
use timeladder_render::VoteTally;

use crate::event::EventId;

/// A request for the vote tallies of a set of events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteBatchTicket {
    /// Generation the results must be returned with.
    pub generation: u64,
    /// Events to look up.
    pub ids: Vec<EventId>,
}

/// Why one event's tally could not be delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteFetchError {
    /// The lookup failed or timed out.
    Unavailable,
    /// The response could not be understood.
    Malformed,
}

impl fmt::Display for VoteFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("vote tally unavailable"),
            Self::Malformed => f.write_str("vote tally response malformed"),
        }
    }
}

impl core::error::Error for VoteFetchError {}

/// Tracks the latest batch and the tallies received so far.
#[derive(Clone, Debug, Default)]
pub(crate) struct VoteBatcher {
    generation: u64,
    pending: Option<u64>,
    requested: HashSet<EventId>,
    tallies: HashMap<EventId, VoteTally>,
    failed: HashSet<EventId>,
}

impl VoteBatcher {
    /// Issues a ticket for `ids`, superseding any outstanding one.
    ///
    /// Returns `None` if `ids` is exactly the set already requested and no
    /// lookup failed since.
    pub(crate) fn issue(&mut self, ids: Vec<EventId>, force: bool) -> Option<VoteBatchTicket> {
        let set: HashSet<EventId> = ids.iter().copied().collect();
        if !force && set == self.requested && self.failed.is_empty() {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(self.generation);
        self.requested = set;
        tracing::debug!(generation = self.generation, count = ids.len(), "vote batch issued");
        Some(VoteBatchTicket {
            generation: self.generation,
            ids,
        })
    }

    /// Invalidates any outstanding ticket and forgets the requested set.
    pub(crate) fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
        self.requested.clear();
    }

    /// Applies results for `generation`. Returns `false` (changing nothing) if stale.
    pub(crate) fn complete(
        &mut self,
        generation: u64,
        results: impl IntoIterator<Item = (EventId, Result<VoteTally, VoteFetchError>)>,
    ) -> bool {
        if self.pending != Some(generation) {
            tracing::warn!(
                generation,
                latest = self.generation,
                "dropping stale vote batch"
            );
            return false;
        }
        self.pending = None;
        let mut failures = 0_usize;
        for (id, result) in results {
            match result {
                Ok(tally) => {
                    self.failed.remove(&id);
                    self.tallies.insert(id, tally);
                }
                Err(err) => {
                    failures += 1;
                    tracing::debug!(event = %id, %err, "vote lookup failed");
                    self.tallies.remove(&id);
                    self.failed.insert(id);
                }
            }
        }
        tracing::debug!(generation, failures, "vote batch applied");
        true
    }

    /// Returns `true` while a ticket is outstanding.
    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// All tallies received so far.
    pub(crate) fn tallies(&self) -> impl Iterator<Item = (EventId, VoteTally)> + '_ {
        self.tallies.iter().map(|(id, t)| (*id, *t))
    }

    /// Drops everything, e.g. when the event list is replaced.
    pub(crate) fn clear(&mut self) {
        self.invalidate();
        self.tallies.clear();
        self.failed.clear();
    }

    /// Records tallies that arrived with the events themselves.
    ///
    /// Batch results applied afterwards replace these per event.
    pub(crate) fn seed(&mut self, known: impl IntoIterator<Item = (EventId, VoteTally)>) {
        self.tallies.extend(known);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use timeladder_render::VoteTally;

    use super::{VoteBatcher, VoteFetchError};
    use crate::EventId;

    #[test]
    fn newer_ticket_supersedes_older() {
        let mut b = VoteBatcher::default();
        let first = b.issue(vec![EventId(1)], false).unwrap();
        let second = b.issue(vec![EventId(1), EventId(2)], false).unwrap();
        assert!(second.generation > first.generation);

        assert!(!b.complete(first.generation, [(EventId(1), Ok(VoteTally::new(9, 0)))]));
        assert_eq!(b.tallies().count(), 0);
        assert!(b.is_pending());

        assert!(b.complete(
            second.generation,
            [
                (EventId(1), Ok(VoteTally::new(1, 0))),
                (EventId(2), Err(VoteFetchError::Unavailable)),
            ]
        ));
        assert!(!b.is_pending());
        assert_eq!(b.tallies().collect::<vec::Vec<_>>(), [(EventId(1), VoteTally::new(1, 0))]);

        // Completing twice is stale too.
        assert!(!b.complete(second.generation, core::iter::empty()));
    }

    #[test]
    fn unchanged_set_is_not_refetched_unless_something_failed() {
        let mut b = VoteBatcher::default();
        let t = b.issue(vec![EventId(1), EventId(2)], false).unwrap();
        b.complete(t.generation, [(EventId(1), Ok(VoteTally::new(1, 1)))]);
        assert!(b.issue(vec![EventId(2), EventId(1)], false).is_none());
        assert!(b.issue(vec![EventId(2), EventId(1)], true).is_some());

        let t = b.issue(vec![EventId(3)], false).unwrap();
        b.complete(t.generation, [(EventId(3), Err(VoteFetchError::Malformed))]);
        assert!(b.issue(vec![EventId(3)], false).is_some());
    }

    #[test]
    fn invalidate_drops_outstanding() {
        let mut b = VoteBatcher::default();
        let t = b.issue(vec![EventId(1)], false).unwrap();
        b.invalidate();
        assert!(!b.complete(t.generation, [(EventId(1), Ok(VoteTally::new(1, 0)))]));
    }
}
