//! `tanawal foods ...`

use clap::{Args, Subcommand};
use serde::Serialize;

use tanawal_admin::repositories::{FoodInput, food as food_repo};
use tanawal_admin::{AdminConfig, AdminError};
use tanawal_core::entities::Calories;
use tanawal_core::query::{Filter, FoodFacets, FoodFilter, FoodKpis, Selection};
use tanawal_core::{Availability, Food, FoodId};

use super::{CliError, Output, load_view};

#[derive(Subcommand)]
pub enum FoodAction {
    /// List food items, optionally filtered
    List(FoodListArgs),
    /// Catalog KPIs
    Kpis,
    /// Distinct cuisines and categories
    Facets,
    /// Full detail for one item, with calories and allergens
    Show { id: i64 },
    /// Flip an item between available and unavailable
    Toggle { id: i64 },
    /// Delete an item
    Delete { id: i64 },
    /// Create an item
    Add {
        name: String,
        #[command(flatten)]
        fields: FoodFields,
    },
    /// Change fields of an existing item
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: FoodFields,
    },
}

/// Editable food fields shared by `add` and `update`.
#[derive(Args)]
pub struct FoodFields {
    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    price: Option<f64>,

    /// Food type, e.g. `Main Course`
    #[arg(long = "type")]
    food_type: Option<String>,

    #[arg(long)]
    cuisine: Option<String>,

    /// `true` or `false`
    #[arg(long)]
    available: Option<bool>,

    /// Repeat for each ingredient
    #[arg(long = "ingredient")]
    ingredients: Vec<String>,

    /// Repeat for each tag
    #[arg(long = "tag")]
    tags: Vec<String>,
}

impl FoodFields {
    fn into_input(self, id: Option<FoodId>, name: Option<String>) -> FoodInput {
        FoodInput {
            id,
            food_name: name,
            food_description: self.description,
            price: self.price,
            food_type: self.food_type,
            cuisine: self.cuisine,
            is_available: self.available,
            ingredients: self.ingredients,
            tags: self.tags,
        }
    }
}

#[derive(Args)]
pub struct FoodListArgs {
    /// Free-text search
    #[arg(short, long, default_value = "")]
    query: String,

    /// Cuisine, or `all`
    #[arg(long, default_value = "all")]
    cuisine: Selection<String>,

    /// Food type, or `all`
    #[arg(long, default_value = "all")]
    category: Selection<String>,

    /// `available`, `unavailable` or `all`
    #[arg(long, default_value = "all")]
    availability: Selection<Availability>,

    /// Minimum rating, or `all`
    #[arg(long, default_value = "all")]
    min_rating: Selection<f64>,
}

impl From<FoodListArgs> for FoodFilter {
    fn from(args: FoodListArgs) -> Self {
        Self {
            query: args.query,
            cuisine: args.cuisine,
            category: args.category,
            availability: args.availability,
            min_rating: args.min_rating,
        }
    }
}

#[derive(Serialize)]
struct FoodDetail<'a> {
    #[serde(flatten)]
    food: &'a Food,
    calories: Calories,
    allergens: Vec<&'a str>,
}

pub async fn run(config: &AdminConfig, action: FoodAction, out: Output) -> Result<(), CliError> {
    let view = load_view::<Food>(config).await?;
    match action {
        FoodAction::List(args) => {
            let filter = FoodFilter::from(args);
            view.read(|foods| out.records(&filter.apply(foods))).await
        }
        FoodAction::Kpis => {
            let kpis = view
                .read(|foods| FoodKpis::compute(foods, chrono::Utc::now()))
                .await;
            out.value(&kpis)
        }
        FoodAction::Facets => {
            let facets = view.read(|foods| FoodFacets::collect(foods.iter())).await;
            out.value(&serde_json::json!({
                "cuisines": facets.cuisines,
                "categories": facets.categories,
            }))
        }
        FoodAction::Show { id } => {
            let id = FoodId::new(id);
            let food = view
                .get(id)
                .await
                .ok_or_else(|| AdminError::NotFound(format!("food {id}")))?;
            out.value(&FoodDetail {
                calories: food.nutrition.calories(),
                allergens: food.allergens().map(|i| i.name.as_str()).collect(),
                food: &food,
            })
        }
        FoodAction::Toggle { id } => {
            let id = FoodId::new(id);
            let availability = view.toggle_availability(id).await?;
            out.line(&format!("food {id} is now {}", availability.label()));
            Ok(())
        }
        FoodAction::Delete { id } => {
            let id = FoodId::new(id);
            view.delete(id).await?;
            out.line(&format!("food {id} deleted"));
            Ok(())
        }
        FoodAction::Add { name, fields } => {
            let input = fields.into_input(None, Some(name));
            food_repo::add(view.transport(), &input).await?;
            view.refresh().await?;
            out.line(&format!("{} added", input.food_name.as_deref().unwrap_or_default()));
            Ok(())
        }
        FoodAction::Update { id, name, fields } => {
            let id = FoodId::new(id);
            if view.get(id).await.is_none() {
                return Err(AdminError::NotFound(format!("food {id}")).into());
            }
            food_repo::update(view.transport(), &fields.into_input(Some(id), name)).await?;
            view.refresh().await?;
            out.line(&format!("food {id} updated"));
            Ok(())
        }
    }
}
