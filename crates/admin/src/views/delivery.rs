//! Delivery dispatch actions.

use tanawal_core::{Delivery, DeliveryId, DeliveryStatus, Settled};
use tracing::instrument;

use super::View;
use crate::client::Transport;
use crate::error::AdminError;
use crate::repositories::delivery::{self as repo, DeliveryUpdate};

impl<T: Transport> View<Delivery, T> {
    /// Move a delivery to `status`, optionally replacing its notes.
    ///
    /// # Errors
    ///
    /// `AdminError::Mutation` if another change is in flight or the delivery
    /// is unknown, `AdminError::Api` if the update is rejected.
    #[instrument(skip(self, notes))]
    pub async fn set_status(
        &self,
        id: DeliveryId,
        status: DeliveryStatus,
        notes: Option<String>,
    ) -> Result<Settled, AdminError> {
        let update = DeliveryUpdate {
            status,
            notes: notes.clone(),
        };
        self.update_optimistically(
            id,
            move |delivery| {
                delivery.status = status;
                if notes.is_some() {
                    delivery.notes = notes;
                }
            },
            repo::update(self.transport(), id, &update),
        )
        .await
    }

    /// Cancel a delivery. The record stays in the view with status
    /// `Cancelled`.
    ///
    /// # Errors
    ///
    /// Same as [`View::set_status`].
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: DeliveryId) -> Result<Settled, AdminError> {
        self.update_optimistically(
            id,
            |delivery| delivery.status = DeliveryStatus::Cancelled,
            repo::cancel(self.transport(), id),
        )
        .await
    }
}
