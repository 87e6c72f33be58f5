//! `tanawal deliveries ...`

use clap::Subcommand;

use tanawal_admin::AdminConfig;
use tanawal_admin::repositories::delivery as delivery_repo;
use tanawal_core::query::{DeliveryFilter, DeliveryKpis, Filter, Selection};
use tanawal_core::{Delivery, DeliveryId, DeliveryStatus};

use super::{CliError, Output, load_view};

#[derive(Subcommand)]
pub enum DeliveryAction {
    /// List deliveries, newest first
    List {
        #[arg(short, long, default_value = "")]
        query: String,

        /// Delivery status, or `all`
        #[arg(long, default_value = "all")]
        status: Selection<DeliveryStatus>,
    },
    /// Delivery KPIs
    Kpis,
    /// Fetch one delivery straight from the API
    Show { id: i64 },
    /// Move a delivery to a new status
    SetStatus {
        id: i64,
        status: DeliveryStatus,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Cancel a delivery
    Cancel { id: i64 },
}

pub async fn run(config: &AdminConfig, action: DeliveryAction, out: Output) -> Result<(), CliError> {
    let view = load_view::<Delivery>(config).await?;
    match action {
        DeliveryAction::List { query, status } => {
            let filter = DeliveryFilter { query, status };
            let mut deliveries: Vec<Delivery> = view
                .read(|all| filter.apply(all).into_iter().cloned().collect())
                .await;
            Delivery::sort_newest_first(&mut deliveries);
            out.records(&deliveries.iter().collect::<Vec<_>>())
        }
        DeliveryAction::Kpis => {
            let kpis = view.read(|all| DeliveryKpis::compute(all.iter())).await;
            out.value(&kpis)
        }
        DeliveryAction::Show { id } => {
            let delivery = delivery_repo::get(view.transport(), DeliveryId::new(id)).await?;
            out.value(&delivery)
        }
        DeliveryAction::SetStatus { id, status, notes } => {
            let id = DeliveryId::new(id);
            view.set_status(id, status, notes).await?;
            out.line(&format!("delivery {id} is now {status}"));
            Ok(())
        }
        DeliveryAction::Cancel { id } => {
            let id = DeliveryId::new(id);
            view.cancel(id).await?;
            out.line(&format!("delivery {id} cancelled"));
            Ok(())
        }
    }
}
