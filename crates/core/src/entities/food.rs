//! Menu items, with nutrition reconciliation and allergen flags.

use serde::Serialize;
use serde_json::Value;

use super::Entity;
use crate::normalize::RawRecord;
use crate::query::Searchable;
use crate::types::{AddressId, Availability, FoodId, Timestamp};

/// Field spellings seen across API versions, highest priority first.
pub mod keys {
    pub const ID: &[&str] = &["FoodID", "foodId", "id"];
    pub const NAME: &[&str] = &["FoodName", "foodName", "name"];
    pub const DESCRIPTION: &[&str] = &["foodDescription", "Description", "description"];
    pub const PRICE: &[&str] = &["Price", "price"];
    pub const CATEGORY: &[&str] = &["FoodType", "foodType", "Category", "category"];
    pub const CUISINE: &[&str] = &["Cuisine", "cuisine"];
    pub const AVAILABILITY: &[&str] = &[
        "IsAvailable",
        "isAvailable",
        "Available",
        "available",
        "Status",
        "status",
    ];
    pub const RATING: &[&str] = &["Rating", "rating"];
    pub const COOKING_TIME: &[&str] = &["cookingTime", "CookingTime"];
    pub const INGREDIENTS: &[&str] = &["Ingredients", "ingredients"];
    pub const TAGS: &[&str] = &["TagsJson", "tagsJson", "Tags", "tags"];
    pub const CHEF_ID: &[&str] = &["ChefID", "chefId"];
    pub const ADDRESS_ID: &[&str] = &["AddressID", "addressId"];
    pub const ORIGIN_CODE: &[&str] = &["FoodOriginCode", "foodOriginCode"];
    pub const INGREDIENT_TYPE_CODE: &[&str] = &["IngredientTypeCode", "ingredientTypeCode"];
    pub const ADDED_BY: &[&str] = &["AddedBy", "addedBy"];
    pub const ESTIMATED_CALORIES: &[&str] = &["EstimatedCalories", "estimatedCalories"];
    pub const CONFIDENCE: &[&str] = &["Confidence", "confidence"];
    pub const SERVING_SIZE: &[&str] = &["ServingSize", "servingSize"];
    pub const PROTEIN: &[&str] = &["ProteinGrams", "proteinGrams"];
    pub const CARBS: &[&str] = &["CarbsGrams", "carbsGrams"];
    pub const FAT: &[&str] = &["FatGrams", "fatGrams"];
    pub const SUGAR: &[&str] = &["SugarGrams", "sugarGrams"];
    pub const FIBER: &[&str] = &["Fiber", "fiber"];
    pub const SODIUM: &[&str] = &["Sodium", "sodium"];
    pub const ORIGIN: &[&str] = &["Origin", "origin"];
    pub const DISCLAIMER: &[&str] = &["Disclaimer", "disclaimer"];
    pub const CREATED: &[&str] = &["DateAdded", "dateAdded", "CreatedAt", "createdAt"];
    pub const UPDATED: &[&str] = &["DateUpdated", "dateUpdated", "UpdatedAt", "updatedAt"];
}

/// Ingredient words that flag a common allergen. Matched as a
/// case-insensitive substring of the ingredient name.
pub const ALLERGEN_KEYWORDS: &[&str] = &[
    "milk", "cream", "butter", "cheese", "yogurt", "lactose", "egg", "eggs", "peanut",
    "peanuts", "tree nut", "almond", "walnut", "cashew", "pecan", "hazelnut", "pistachio",
    "soy", "soybean", "wheat", "gluten", "flour", "fish", "salmon", "tuna", "cod",
    "shellfish", "shrimp", "prawn", "lobster", "crab", "clam", "clams", "oyster", "mussel",
    "sesame",
];

/// Relative gap between estimated and calculated calories above which both
/// are surfaced.
pub const CALORIE_TOLERANCE: f64 = 0.15;

/// One ingredient with its allergen flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub name: String,
    pub allergen: bool,
}

impl Ingredient {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let allergen = is_allergen(&name);
        Self { name, allergen }
    }
}

/// Whether an ingredient name contains an allergen keyword.
#[must_use]
pub fn is_allergen(ingredient: &str) -> bool {
    let lower = ingredient.to_lowercase();
    ALLERGEN_KEYWORDS.iter().any(|word| lower.contains(word))
}

/// Macro and micro nutrients as reported, plus both calorie figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Nutrition {
    pub protein_grams: Option<f64>,
    pub carbs_grams: Option<f64>,
    pub fat_grams: Option<f64>,
    pub sugar_grams: Option<f64>,
    pub fiber_grams: Option<f64>,
    pub sodium_mg: Option<f64>,
    /// Reported by the backend.
    pub estimated_calories: Option<f64>,
    /// Derived from macros; `None` when no macro is known.
    pub calculated_calories: Option<i64>,
}

/// Calorie figure to show, after reconciling both sources.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Calories {
    Unknown,
    /// Only the estimate exists, or both agree within tolerance.
    Estimated { value: f64 },
    /// Only the macro calculation exists.
    Calculated { value: i64 },
    /// Both exist and disagree beyond tolerance.
    Disputed { estimated: f64, calculated: i64 },
}

/// `round(protein*4 + carbs*4 + fat*9)`. Missing macros count as zero as
/// long as one of them is present.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn calories_from_macros(
    protein: Option<f64>,
    carbs: Option<f64>,
    fat: Option<f64>,
) -> Option<i64> {
    if protein.is_none() && carbs.is_none() && fat.is_none() {
        return None;
    }
    let kcal = fat.unwrap_or(0.0).mul_add(
        9.0,
        carbs.unwrap_or(0.0).mul_add(4.0, protein.unwrap_or(0.0) * 4.0),
    );
    Some(kcal.round() as i64)
}

impl Nutrition {
    fn from_record(record: &RawRecord<'_>) -> Self {
        let protein_grams = record.number(keys::PROTEIN);
        let carbs_grams = record.number(keys::CARBS);
        let fat_grams = record.number(keys::FAT);
        Self {
            protein_grams,
            carbs_grams,
            fat_grams,
            sugar_grams: record.number(keys::SUGAR),
            fiber_grams: record.number(keys::FIBER),
            sodium_mg: record.number(keys::SODIUM),
            estimated_calories: record.number(keys::ESTIMATED_CALORIES),
            calculated_calories: calories_from_macros(protein_grams, carbs_grams, fat_grams),
        }
    }

    /// Reconcile the two calorie figures.
    ///
    /// ```
    /// use tanawal_core::entities::{Calories, Nutrition};
    ///
    /// let nutrition = Nutrition {
    ///     estimated_calories: Some(250.0),
    ///     calculated_calories: Some(165),
    ///     ..Nutrition::default()
    /// };
    /// assert_eq!(
    ///     nutrition.calories(),
    ///     Calories::Disputed { estimated: 250.0, calculated: 165 }
    /// );
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn calories(&self) -> Calories {
        match (self.estimated_calories, self.calculated_calories) {
            (None, None) => Calories::Unknown,
            (Some(value), None) => Calories::Estimated { value },
            (None, Some(value)) => Calories::Calculated { value },
            (Some(estimated), Some(calculated)) => {
                let gap = (estimated - calculated as f64).abs() / estimated.max(1.0);
                if gap > CALORIE_TOLERANCE {
                    Calories::Disputed {
                        estimated,
                        calculated,
                    }
                } else {
                    Calories::Estimated { value: estimated }
                }
            }
        }
    }
}

/// Canonical menu item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Food {
    pub id: FoodId,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Non-negative, or `None` when missing or unreadable. An explicit `0`
    /// stays `Some(0.0)`.
    pub price: Option<f64>,
    pub category: Option<String>,
    pub cuisine: Option<String>,
    pub availability: Availability,
    /// Clamped to `0..=5`, `0` when missing.
    pub rating: f64,
    pub cooking_time_minutes: Option<f64>,
    pub ingredients: Vec<Ingredient>,
    pub tags: Vec<String>,
    pub nutrition: Nutrition,
    pub serving_size: Option<String>,
    pub confidence: Option<f64>,
    pub chef_id: Option<String>,
    pub address_id: Option<AddressId>,
    pub origin_code: Option<i64>,
    pub ingredient_type_code: Option<i64>,
    pub added_by: Option<String>,
    pub origin: Option<String>,
    pub disclaimer: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl Food {
    /// Price as shown in listings.
    #[must_use]
    pub fn price_label(&self) -> String {
        format_price(self.price)
    }

    /// Ingredients that carry an allergen flag.
    pub fn allergens(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter().filter(|i| i.allergen)
    }
}

/// `₨{price}` rounded to whole rupees; `—` when absent or zero.
#[must_use]
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p != 0.0 => format!("₨{p:.0}"),
        _ => "—".to_owned(),
    }
}

impl Entity for Food {
    type Id = FoodId;
    const COLLECTION_KEY: &'static str = "Foods";
    const KIND: &'static str = "food";

    fn normalize(raw: &Value) -> Self {
        let record = RawRecord::new(raw);
        let ingredients = record
            .list(keys::INGREDIENTS)
            .into_iter()
            .map(Ingredient::new)
            .collect();

        Self {
            id: FoodId::new(record.integer(keys::ID).unwrap_or_default()),
            name: record.text(keys::NAME),
            description: record.text(keys::DESCRIPTION),
            price: record.number(keys::PRICE).filter(|p| *p >= 0.0),
            category: record.text(keys::CATEGORY),
            cuisine: record.text(keys::CUISINE),
            availability: record.get(keys::AVAILABILITY),
            rating: record
                .number(keys::RATING)
                .unwrap_or(0.0)
                .clamp(0.0, 5.0),
            cooking_time_minutes: record.number(keys::COOKING_TIME),
            ingredients,
            tags: record.list(keys::TAGS),
            nutrition: Nutrition::from_record(&record),
            serving_size: record.text(keys::SERVING_SIZE),
            confidence: record.number(keys::CONFIDENCE),
            chef_id: record.text(keys::CHEF_ID),
            address_id: record.integer(keys::ADDRESS_ID).map(AddressId::new),
            origin_code: record.integer(keys::ORIGIN_CODE),
            ingredient_type_code: record.integer(keys::INGREDIENT_TYPE_CODE),
            added_by: record.text(keys::ADDED_BY),
            origin: record.text(keys::ORIGIN),
            disclaimer: record.text(keys::DISCLAIMER),
            created_at: record.date(keys::CREATED),
            updated_at: record.date(keys::UPDATED),
        }
    }

    fn id(&self) -> FoodId {
        self.id
    }
}

impl Searchable for Food {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone().unwrap_or_default(),
            self.description.clone().unwrap_or_default(),
            self.category.clone().unwrap_or_default(),
            self.cuisine.clone().unwrap_or_default(),
            self.availability.label().to_owned(),
            self.price_label(),
            self.ingredients
                .iter()
                .map(|i| i.name.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            self.tags.join(" "),
            self.added_by.clone().unwrap_or_default(),
        ]
    }
}
