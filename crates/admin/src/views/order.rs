//! Order fulfilment actions.

use tanawal_core::{OrderStatus, Purchase, PurchaseId, Settled};
use tracing::instrument;

use super::View;
use crate::client::Transport;
use crate::error::AdminError;
use crate::repositories::order::{self as repo, OrderUpdate};

impl<T: Transport> View<Purchase, T> {
    /// Move an order to `status`, optionally with a note.
    ///
    /// # Errors
    ///
    /// `AdminError::Mutation` if another change is in flight or the order is
    /// unknown, `AdminError::Api` if the update is rejected.
    #[instrument(skip(self, note))]
    pub async fn set_status(
        &self,
        id: PurchaseId,
        status: OrderStatus,
        note: Option<String>,
    ) -> Result<Settled, AdminError> {
        let update = OrderUpdate {
            purchase_id: id,
            status,
            note: note.clone(),
        };
        self.update_optimistically(
            id,
            move |order| {
                order.status = status;
                if note.is_some() {
                    order.note = note;
                }
            },
            repo::update(self.transport(), &update),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: PurchaseId) -> Result<Settled, AdminError> {
        self.remove_optimistically(id, repo::delete(self.transport(), id))
            .await
    }
}
