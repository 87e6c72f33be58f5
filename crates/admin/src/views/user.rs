//! User moderation actions.

use tanawal_core::{Settled, User, UserId, UserStatus};
use tracing::instrument;

use super::View;
use crate::client::Transport;
use crate::error::AdminError;
use crate::repositories::user::{self as repo, StatusChange};

impl<T: Transport> View<User, T> {
    /// Block or unblock a user.
    ///
    /// # Errors
    ///
    /// `AdminError::Mutation` if another change is in flight or the user is
    /// unknown, `AdminError::Api` if the change is rejected. A rejected
    /// change leaves the user's previous status in place.
    #[instrument(skip(self, change), fields(block = change.block))]
    pub async fn set_blocked(&self, id: UserId, change: &StatusChange) -> Result<Settled, AdminError> {
        let status = UserStatus::from_blocked(change.block);
        self.update_optimistically(
            id,
            move |user| user.status = status,
            repo::change_status(self.transport(), id, change),
        )
        .await
    }

    /// Delete a user account.
    ///
    /// # Errors
    ///
    /// Same as [`View::set_blocked`].
    #[instrument(skip(self))]
    pub async fn delete(&self, id: UserId) -> Result<Settled, AdminError> {
        self.remove_optimistically(id, repo::delete(self.transport(), id))
            .await
    }
}
