//! In-memory canonical collection with fetch tickets and optimistic
//! mutations.
//!
//! A collection is replaced wholesale on each fetch. A fetch is started with
//! [`Collection::begin_fetch`]; only the most recent ticket may install its
//! records, so a slow response can never overwrite a newer one.
//!
//! Record mutations follow a small state machine:
//!
//! ```text
//! Clean --begin_update/begin_remove--> Pending(snapshot)
//! Pending --commit--> Clean
//! Pending --revert--> Clean (snapshot restored)
//! ```
//!
//! At most one mutation is pending at a time. Its record id is the
//! collection's busy id, and further mutations fail with
//! [`MutationError::Busy`] until it settles.

use crate::entities::Entity;

/// Errors from starting or settling a record mutation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// Another record mutation is still in flight.
    #[error("record {0} is busy with another change")]
    Busy(String),

    #[error("record {0} not found")]
    NotFound(String),

    /// The ticket does not belong to the pending mutation.
    #[error("mutation ticket is stale")]
    StaleTicket,
}

/// Proof that a fetch was started. Passed back to
/// [`Collection::complete_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct FetchTicket {
    generation: u64,
}

/// Proof that a mutation is pending. Consumed by commit or revert.
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct MutationTicket<Id> {
    id: Id,
    seq: u64,
}

impl<Id: Copy> MutationTicket<Id> {
    /// Record the mutation targets.
    pub const fn id(&self) -> Id {
        self.id
    }
}

/// How a pending mutation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Committed,
    /// Local state was rolled back to the snapshot.
    Reverted,
    /// A newer fetch replaced the records while the mutation was pending, so
    /// there was nothing to roll back.
    Superseded,
}

#[derive(Debug, Clone)]
enum Snapshot<E> {
    Updated { previous: E },
    Removed { previous: E, index: usize },
}

#[derive(Debug, Clone)]
struct Pending<E: Entity> {
    id: E::Id,
    seq: u64,
    snapshot: Snapshot<E>,
    superseded: bool,
}

/// Canonical records of one kind.
#[derive(Debug, Clone)]
pub struct Collection<E: Entity> {
    records: Vec<E>,
    generation: u64,
    next_seq: u64,
    pending: Option<Pending<E>>,
}

impl<E: Entity> Default for Collection<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Collection<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
            generation: 0,
            next_seq: 0,
            pending: None,
        }
    }

    /// A collection already holding `records`.
    #[must_use]
    pub const fn from_records(records: Vec<E>) -> Self {
        Self {
            records,
            generation: 0,
            next_seq: 0,
            pending: None,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[E] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: E::Id) -> Option<&E> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Id of the record with a pending mutation.
    #[must_use]
    pub fn busy_id(&self) -> Option<E::Id> {
        self.pending.as_ref().map(|p| p.id)
    }

    // -------------------------------------------------------------------------
    // Fetching
    // -------------------------------------------------------------------------

    /// Start a fetch. Any earlier ticket becomes stale.
    pub const fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Install fetched records if `ticket` is still the latest.
    ///
    /// Returns `false` and leaves the collection untouched for a stale
    /// ticket.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, records: Vec<E>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                kind = E::KIND,
                ticket = ticket.generation,
                latest = self.generation,
                "discarding stale fetch"
            );
            return false;
        }
        self.records = records;
        if let Some(pending) = self.pending.as_mut() {
            pending.superseded = true;
        }
        true
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Apply `change` to record `id` immediately and remember its previous
    /// value.
    ///
    /// # Errors
    ///
    /// [`MutationError::Busy`] if a mutation is pending, or
    /// [`MutationError::NotFound`] if no record has this id.
    pub fn begin_update(
        &mut self,
        id: E::Id,
        change: impl FnOnce(&mut E),
    ) -> Result<MutationTicket<E::Id>, MutationError> {
        self.ensure_idle()?;
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| MutationError::NotFound(id.to_string()))?;
        let previous = record.clone();
        change(record);
        Ok(self.mark_pending(id, Snapshot::Updated { previous }))
    }

    /// Remove record `id` immediately and remember it with its position.
    ///
    /// # Errors
    ///
    /// Same as [`Collection::begin_update`].
    pub fn begin_remove(&mut self, id: E::Id) -> Result<MutationTicket<E::Id>, MutationError> {
        self.ensure_idle()?;
        let index = self.index_of(id)?;
        let previous = self.records.remove(index);
        Ok(self.mark_pending(id, Snapshot::Removed { previous, index }))
    }

    /// Keep the local change.
    ///
    /// # Errors
    ///
    /// [`MutationError::StaleTicket`] if `ticket` is not the pending one.
    pub fn commit(&mut self, ticket: MutationTicket<E::Id>) -> Result<Settled, MutationError> {
        let pending = self.take_pending(&ticket)?;
        Ok(if pending.superseded {
            Settled::Superseded
        } else {
            Settled::Committed
        })
    }

    /// Roll the touched record back to its snapshot. Other records are left
    /// alone.
    ///
    /// # Errors
    ///
    /// [`MutationError::StaleTicket`] if `ticket` is not the pending one.
    pub fn revert(&mut self, ticket: MutationTicket<E::Id>) -> Result<Settled, MutationError> {
        let pending = self.take_pending(&ticket)?;
        if pending.superseded {
            return Ok(Settled::Superseded);
        }
        match pending.snapshot {
            Snapshot::Updated { previous } => {
                if let Some(slot) = self.records.iter_mut().find(|r| r.id() == pending.id) {
                    *slot = previous;
                }
            }
            Snapshot::Removed { previous, index } => {
                let index = index.min(self.records.len());
                self.records.insert(index, previous);
            }
        }
        tracing::debug!(kind = E::KIND, id = %pending.id, "reverted local change");
        Ok(Settled::Reverted)
    }

    /// Commit on `Ok`, revert on `Err`.
    ///
    /// # Errors
    ///
    /// [`MutationError::StaleTicket`] if `ticket` is not the pending one.
    pub fn settle<T, X>(
        &mut self,
        ticket: MutationTicket<E::Id>,
        outcome: &Result<T, X>,
    ) -> Result<Settled, MutationError> {
        if outcome.is_ok() {
            self.commit(ticket)
        } else {
            self.revert(ticket)
        }
    }

    fn ensure_idle(&self) -> Result<(), MutationError> {
        match &self.pending {
            Some(pending) => Err(MutationError::Busy(pending.id.to_string())),
            None => Ok(()),
        }
    }

    fn index_of(&self, id: E::Id) -> Result<usize, MutationError> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| MutationError::NotFound(id.to_string()))
    }

    fn mark_pending(&mut self, id: E::Id, snapshot: Snapshot<E>) -> MutationTicket<E::Id> {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.pending = Some(Pending {
            id,
            seq,
            snapshot,
            superseded: false,
        });
        MutationTicket { id, seq }
    }

    fn take_pending(&mut self, ticket: &MutationTicket<E::Id>) -> Result<Pending<E>, MutationError> {
        match self.pending.take() {
            Some(pending) if pending.seq == ticket.seq && pending.id == ticket.id => Ok(pending),
            other => {
                self.pending = other;
                Err(MutationError::StaleTicket)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::Food;
    use crate::types::{Availability, FoodId};
    use serde_json::json;

    fn collection() -> Collection<Food> {
        Collection::from_records(
            [
                json!({ "FoodID": 1, "FoodName": "Daal", "IsAvailable": true }),
                json!({ "FoodID": 2, "FoodName": "Naan", "IsAvailable": false }),
                json!({ "FoodID": 3, "FoodName": "Kheer", "IsAvailable": true }),
            ]
            .iter()
            .map(Food::normalize)
            .collect(),
        )
    }

    fn availability(c: &Collection<Food>, id: i64) -> Option<Availability> {
        c.get(FoodId::new(id)).map(|f| f.availability)
    }

    #[test]
    fn test_update_applies_immediately_and_commits() {
        let mut c = collection();
        let ticket = c
            .begin_update(FoodId::new(2), |f| f.availability = f.availability.toggled())
            .unwrap();
        assert_eq!(availability(&c, 2), Some(Availability::Available));
        assert_eq!(c.busy_id(), Some(FoodId::new(2)));
        assert_eq!(c.commit(ticket), Ok(Settled::Committed));
        assert_eq!(availability(&c, 2), Some(Availability::Available));
        assert_eq!(c.busy_id(), None);
    }

    #[test]
    fn test_revert_touches_only_one_record() {
        let mut c = collection();
        let before = c.records().to_vec();
        let ticket = c
            .begin_update(FoodId::new(1), |f| f.availability = Availability::Unavailable)
            .unwrap();
        assert_eq!(c.revert(ticket), Ok(Settled::Reverted));
        assert_eq!(c.records(), before.as_slice());
    }

    #[test]
    fn test_remove_and_revert_restores_position() {
        let mut c = collection();
        let ticket = c.begin_remove(FoodId::new(2)).unwrap();
        assert_eq!(c.len(), 2);
        assert!(c.get(FoodId::new(2)).is_none());
        c.revert(ticket).unwrap();
        let ids: Vec<i64> = c.records().iter().map(|f| f.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_busy_blocks_second_mutation() {
        let mut c = collection();
        let ticket = c.begin_remove(FoodId::new(1)).unwrap();
        assert_eq!(
            c.begin_update(FoodId::new(3), |_| {}).err(),
            Some(MutationError::Busy("1".to_owned()))
        );
        assert_eq!(
            c.begin_remove(FoodId::new(3)).err(),
            Some(MutationError::Busy("1".to_owned()))
        );
        c.commit(ticket).unwrap();
        assert!(c.begin_remove(FoodId::new(3)).is_ok());
    }

    #[test]
    fn test_not_found() {
        let mut c = collection();
        assert_eq!(
            c.begin_remove(FoodId::new(99)).err(),
            Some(MutationError::NotFound("99".to_owned()))
        );
        assert_eq!(c.busy_id(), None);
    }

    #[test]
    fn test_stale_ticket_keeps_pending() {
        let mut c = collection();
        let first = c.begin_remove(FoodId::new(1)).unwrap();
        c.commit(first).unwrap();
        let second = c.begin_remove(FoodId::new(2)).unwrap();
        let forged = MutationTicket { id: FoodId::new(2), seq: 0 };
        assert_eq!(c.revert(forged), Err(MutationError::StaleTicket));
        assert_eq!(c.busy_id(), Some(FoodId::new(2)));
        assert_eq!(c.revert(second), Ok(Settled::Reverted));
    }

    #[test]
    fn test_settle_dispatches_on_outcome() {
        let mut c = collection();
        let ticket = c.begin_remove(FoodId::new(3)).unwrap();
        let failed: Result<(), &str> = Err("boom");
        assert_eq!(c.settle(ticket, &failed), Ok(Settled::Reverted));
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut c: Collection<Food> = Collection::new();
        let slow = c.begin_fetch();
        let fast = c.begin_fetch();
        assert!(c.complete_fetch(fast, vec![Food::normalize(&json!({ "FoodID": 2 }))]));
        assert!(!c.complete_fetch(slow, vec![Food::normalize(&json!({ "FoodID": 1 }))]));
        assert_eq!(c.len(), 1);
        assert!(c.get(FoodId::new(2)).is_some());
    }

    #[test]
    fn test_fetch_during_mutation_supersedes_rollback() {
        let mut c = collection();
        let ticket = c.begin_remove(FoodId::new(1)).unwrap();
        let fetch = c.begin_fetch();
        assert!(c.complete_fetch(fetch, vec![Food::normalize(&json!({ "FoodID": 7 }))]));
        assert_eq!(c.revert(ticket), Ok(Settled::Superseded));
        assert_eq!(c.len(), 1);
        assert_eq!(c.busy_id(), None);
    }
}
