//! Food catalog actions.

use tanawal_core::{Availability, Food, FoodId, Settled};
use tracing::instrument;

use super::View;
use crate::client::Transport;
use crate::error::AdminError;
use crate::repositories::food as repo;

impl<T: Transport> View<Food, T> {
    /// Flip a food item between available and unavailable.
    ///
    /// Returns the availability the item now has. On API failure the item
    /// goes back to its previous state and the error is returned.
    ///
    /// # Errors
    ///
    /// `AdminError::Mutation` if another change is in flight or the item is
    /// unknown, `AdminError::Api` if the update is rejected.
    #[instrument(skip(self))]
    pub async fn toggle_availability(&self, id: FoodId) -> Result<Availability, AdminError> {
        let target = self.inspect(id, |f| f.availability.toggled()).await?;
        let settled = self
            .update_optimistically(
                id,
                move |food| food.availability = target,
                repo::set_availability(self.transport(), id, target.is_available()),
            )
            .await?;
        if settled == Settled::Superseded {
            return Ok(self
                .inspect(id, |f| f.availability)
                .await
                .unwrap_or(target));
        }
        Ok(target)
    }

    /// Delete a food item.
    ///
    /// # Errors
    ///
    /// Same as [`View::toggle_availability`].
    #[instrument(skip(self))]
    pub async fn delete(&self, id: FoodId) -> Result<Settled, AdminError> {
        self.remove_optimistically(id, repo::delete(self.transport(), id))
            .await
    }
}
