//! `tanawal orders ...`

use clap::Subcommand;

use tanawal_admin::AdminConfig;
use tanawal_admin::repositories::order as order_repo;
use tanawal_core::query::{Filter, OrderFilter, OrderKpis, Selection};
use tanawal_core::{OrderStatus, Purchase, PurchaseId};

use super::{CliError, Output, load_view};

#[derive(Subcommand)]
pub enum OrderAction {
    /// List orders, newest first
    List {
        #[arg(short, long, default_value = "")]
        query: String,

        /// Order status, or `all`
        #[arg(long, default_value = "all")]
        status: Selection<OrderStatus>,
    },
    /// Order KPIs
    Kpis,
    /// Fetch one order straight from the API
    Show { id: i64 },
    /// Move an order to a new status
    SetStatus {
        id: i64,
        status: OrderStatus,
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete an order
    Delete { id: i64 },
}

pub async fn run(config: &AdminConfig, action: OrderAction, out: Output) -> Result<(), CliError> {
    let view = load_view::<Purchase>(config).await?;
    match action {
        OrderAction::List { query, status } => {
            let filter = OrderFilter { query, status };
            let mut orders: Vec<Purchase> = view
                .read(|orders| filter.apply(orders).into_iter().cloned().collect())
                .await;
            Purchase::sort_newest_first(&mut orders);
            out.records(&orders.iter().collect::<Vec<_>>())
        }
        OrderAction::Kpis => {
            let kpis = view.read(|orders| OrderKpis::compute(orders.iter())).await;
            out.value(&kpis)
        }
        OrderAction::Show { id } => {
            let order = order_repo::get(view.transport(), PurchaseId::new(id)).await?;
            out.value(&order)
        }
        OrderAction::SetStatus { id, status, note } => {
            let id = PurchaseId::new(id);
            view.set_status(id, status, note).await?;
            out.line(&format!("order {id} is now {status}"));
            Ok(())
        }
        OrderAction::Delete { id } => {
            let id = PurchaseId::new(id);
            view.delete(id).await?;
            out.line(&format!("order {id} deleted"));
            Ok(())
        }
    }
}
