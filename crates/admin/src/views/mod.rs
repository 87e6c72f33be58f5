//! Live views: one canonical collection per entity kind, kept in sync with
//! the API.
//!
//! A [`View`] owns a [`Collection`] behind an async `RwLock` and the
//! transport used to refresh and mutate it. Locks are never held across an
//! API call.
//!
//! Mutations are optimistic. The local record changes first, the API call
//! runs, and the record is committed or rolled back depending on the
//! outcome. Only one record mutation may be in flight per view. A mutation
//! whose future is dropped before the API answers is rolled back.

mod delivery;
mod food;
mod order;
mod user;

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::instrument;

use tanawal_core::{
    Collection, Delivery, Entity, Food, MutationError, MutationTicket, Purchase, Settled, User,
};

use crate::client::{ApiError, Transport};
use crate::error::AdminError;
use crate::repositories;

/// An entity kind that can be listed from the API.
pub trait Listed: Entity + Send + Sync + 'static {
    /// Fetch and normalize the full collection.
    fn fetch_all<T: Transport>(
        transport: &T,
    ) -> impl Future<Output = Result<Vec<Self>, ApiError>> + Send;
}

impl Listed for Food {
    fn fetch_all<T: Transport>(
        transport: &T,
    ) -> impl Future<Output = Result<Vec<Self>, ApiError>> + Send {
        repositories::food::list(transport)
    }
}

impl Listed for User {
    fn fetch_all<T: Transport>(
        transport: &T,
    ) -> impl Future<Output = Result<Vec<Self>, ApiError>> + Send {
        repositories::user::list(transport)
    }
}

impl Listed for Purchase {
    fn fetch_all<T: Transport>(
        transport: &T,
    ) -> impl Future<Output = Result<Vec<Self>, ApiError>> + Send {
        repositories::order::list(transport)
    }
}

impl Listed for Delivery {
    fn fetch_all<T: Transport>(
        transport: &T,
    ) -> impl Future<Output = Result<Vec<Self>, ApiError>> + Send {
        repositories::delivery::list(transport)
    }
}

/// Result of [`View::refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Records were replaced; holds the new count.
    Applied(usize),
    /// A newer refresh started while this one was in flight.
    Stale,
}

pub type FoodView<T> = View<Food, T>;
pub type UserView<T> = View<User, T>;
pub type OrderView<T> = View<Purchase, T>;
pub type DeliveryView<T> = View<Delivery, T>;

/// Canonical collection of one entity kind plus its transport.
#[derive(Debug)]
pub struct View<E: Entity, T> {
    transport: T,
    collection: Arc<RwLock<Collection<E>>>,
}

impl<E: Listed, T: Transport> View<E, T> {
    /// An empty view. Call [`View::refresh`] to load it.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            collection: Arc::new(RwLock::new(Collection::new())),
        }
    }

    /// A view pre-loaded with `records`.
    pub fn with_records(transport: T, records: Vec<E>) -> Self {
        Self {
            transport,
            collection: Arc::new(RwLock::new(Collection::from_records(records))),
        }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Replace the collection with a fresh fetch.
    ///
    /// The response is dropped if another refresh started after this one.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Api` if the fetch fails; the collection is left
    /// unchanged.
    #[instrument(skip(self), fields(kind = E::KIND))]
    pub async fn refresh(&self) -> Result<Refresh, AdminError> {
        let ticket = self.collection.write().await.begin_fetch();
        let records = E::fetch_all(&self.transport).await?;
        let count = records.len();
        if self.collection.write().await.complete_fetch(ticket, records) {
            tracing::info!(count, "refreshed");
            Ok(Refresh::Applied(count))
        } else {
            Ok(Refresh::Stale)
        }
    }

    /// Clone of the current records.
    pub async fn snapshot(&self) -> Vec<E> {
        self.collection.read().await.records().to_vec()
    }

    /// Run `f` against the current records under a read lock.
    pub async fn read<R>(&self, f: impl FnOnce(&[E]) -> R) -> R {
        f(self.collection.read().await.records())
    }

    /// Clone of one record.
    pub async fn get(&self, id: E::Id) -> Option<E> {
        self.collection.read().await.get(id).cloned()
    }

    /// Record with a mutation in flight.
    pub async fn busy_id(&self) -> Option<E::Id> {
        self.collection.read().await.busy_id()
    }

    pub async fn len(&self) -> usize {
        self.collection.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.collection.read().await.is_empty()
    }

    /// Read one field of a record, or fail with `NotFound`.
    pub(crate) async fn inspect<R>(&self, id: E::Id, f: impl FnOnce(&E) -> R) -> Result<R, AdminError> {
        self.collection
            .read()
            .await
            .get(id)
            .map(f)
            .ok_or_else(|| AdminError::NotFound(format!("{} {id}", E::KIND)))
    }

    /// Apply `change` locally, then confirm with `remote`.
    pub(crate) async fn update_optimistically(
        &self,
        id: E::Id,
        change: impl FnOnce(&mut E) + Send,
        remote: impl Future<Output = Result<Value, ApiError>> + Send,
    ) -> Result<Settled, AdminError> {
        let ticket = self.collection.write().await.begin_update(id, change)?;
        let pending = PendingChange::new(&self.collection, ticket);
        let outcome = remote.await;
        self.settle(pending, outcome).await
    }

    /// Remove locally, then confirm with `remote`.
    pub(crate) async fn remove_optimistically(
        &self,
        id: E::Id,
        remote: impl Future<Output = Result<Value, ApiError>> + Send,
    ) -> Result<Settled, AdminError> {
        let ticket = self.collection.write().await.begin_remove(id)?;
        let pending = PendingChange::new(&self.collection, ticket);
        let outcome = remote.await;
        self.settle(pending, outcome).await
    }

    async fn settle(
        &self,
        pending: PendingChange<E>,
        outcome: Result<Value, ApiError>,
    ) -> Result<Settled, AdminError> {
        let id = pending.id;
        let mut collection = self.collection.write().await;
        let ticket = pending.disarm().ok_or(MutationError::StaleTicket)?;
        let settled = collection.settle(ticket, &outcome)?;
        drop(collection);
        match outcome {
            Ok(_) => {
                tracing::info!(kind = E::KIND, %id, ?settled, "change confirmed");
                Ok(settled)
            }
            Err(e) => {
                tracing::warn!(kind = E::KIND, %id, error = %e, ?settled, "change failed, rolled back");
                Err(e.into())
            }
        }
    }
}

/// A pending mutation that rolls itself back unless settled.
///
/// Held across the API call so that dropping the mutation future (a
/// timeout, a `select!` branch losing) still releases the record.
struct PendingChange<E: Listed> {
    collection: Arc<RwLock<Collection<E>>>,
    id: E::Id,
    ticket: Option<MutationTicket<E::Id>>,
}

impl<E: Listed> PendingChange<E> {
    fn new(collection: &Arc<RwLock<Collection<E>>>, ticket: MutationTicket<E::Id>) -> Self {
        Self {
            collection: Arc::clone(collection),
            id: ticket.id(),
            ticket: Some(ticket),
        }
    }

    fn disarm(mut self) -> Option<MutationTicket<E::Id>> {
        self.ticket.take()
    }
}

impl<E: Listed> Drop for PendingChange<E> {
    fn drop(&mut self) {
        let Some(ticket) = self.ticket.take() else {
            return;
        };
        tracing::warn!(kind = E::KIND, id = %self.id, "change abandoned, rolling back");

        // Locks are never held across an await, so this rarely contends.
        match self.collection.try_write() {
            Ok(mut collection) => revert_abandoned(&mut collection, ticket),
            Err(_) => {
                let collection = Arc::clone(&self.collection);
                if let Ok(runtime) = tokio::runtime::Handle::try_current() {
                    runtime.spawn(async move {
                        revert_abandoned(&mut *collection.write().await, ticket);
                    });
                }
            }
        }
    }
}

fn revert_abandoned<E: Entity>(collection: &mut Collection<E>, ticket: MutationTicket<E::Id>) {
    if let Err(e) = collection.revert(ticket) {
        tracing::debug!(kind = E::KIND, error = %e, "abandoned change already settled");
    }
}
