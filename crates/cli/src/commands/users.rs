//! `tanawal users ...`

use clap::Subcommand;

use tanawal_admin::AdminConfig;
use tanawal_admin::repositories::{AddressInput, StatusChange, UserUpdate, user as user_repo};
use tanawal_core::query::{Filter, Selection, UserFilter, UserKpis};
use tanawal_core::{User, UserId, UserStatus};

use super::{CliError, Output, load_view};

#[derive(Subcommand)]
pub enum UserAction {
    /// List users, optionally filtered
    List {
        /// Free-text search
        #[arg(short, long, default_value = "")]
        query: String,

        /// `active`, `blocked` or `all`
        #[arg(long, default_value = "all")]
        status: Selection<UserStatus>,
    },
    /// User KPIs
    Kpis,
    /// Block a user
    Block {
        id: i64,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Lift a block
    Unblock { id: i64 },
    /// Delete a user account
    Delete { id: i64 },
    /// Saved addresses of a user
    Addresses { id: i64 },
    /// Save a new address for a user
    AddAddress { id: i64, address: String },
    /// Change profile fields
    Update {
        id: i64,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        /// Account type, e.g. `Chef`
        #[arg(long = "type")]
        account_type: Option<String>,
    },
}

pub async fn run(config: &AdminConfig, action: UserAction, out: Output) -> Result<(), CliError> {
    let view = load_view::<User>(config).await?;
    match action {
        UserAction::List { query, status } => {
            let filter = UserFilter { query, status };
            view.read(|users| out.records(&filter.apply(users))).await
        }
        UserAction::Kpis => {
            let kpis = view
                .read(|users| UserKpis::compute(users, chrono::Utc::now()))
                .await;
            out.value(&kpis)
        }
        UserAction::Block { id, reason } => set_blocked(config, &view, id, true, reason, out).await,
        UserAction::Unblock { id } => set_blocked(config, &view, id, false, None, out).await,
        UserAction::Delete { id } => {
            let id = UserId::new(id);
            view.delete(id).await?;
            out.line(&format!("user {id} deleted"));
            Ok(())
        }
        UserAction::Addresses { id } => {
            let addresses = user_repo::addresses(view.transport(), UserId::new(id)).await?;
            out.value(&addresses)
        }
        UserAction::AddAddress { id, address } => {
            let input = AddressInput {
                user_id: UserId::new(id),
                address,
            };
            user_repo::add_address(view.transport(), &input).await?;
            out.line(&format!("address saved for user {}", input.user_id));
            Ok(())
        }
        UserAction::Update {
            id,
            first_name,
            last_name,
            gender,
            account_type,
        } => {
            let update = UserUpdate {
                user_id: UserId::new(id),
                first_name,
                last_name,
                gender,
                account_type,
            };
            user_repo::update(view.transport(), &update).await?;
            view.refresh().await?;
            out.line(&format!("user {} updated", update.user_id));
            Ok(())
        }
    }
}

async fn set_blocked(
    config: &AdminConfig,
    view: &tanawal_admin::UserView<tanawal_admin::ApiClient>,
    id: i64,
    block: bool,
    reason: Option<String>,
    out: Output,
) -> Result<(), CliError> {
    let id = UserId::new(id);
    let change = StatusChange {
        block,
        reason,
        acted_by_user_id: config.admin_user_id,
    };
    view.set_blocked(id, &change).await?;
    out.line(&format!("user {id} is now {}", UserStatus::from_blocked(block).label()));
    Ok(())
}
