use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

/// Storage and reporting bucket for an ingredient.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Display,
    EnumString,
    AsRefStr,
    VariantArray,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
    Produce,
    Dairy,
    Meat,
    Seafood,
    Bakery,
    Pantry,
    Frozen,
    Beverage,
    #[default]
    Other,
}

/// Fields a caller supplies when creating or replacing an ingredient.
/// `cost_per_unit` is never part of the input: it is derived from the
/// pack fields on every write.
#[derive(Debug, Clone, Validate)]
pub struct IngredientInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub category: IngredientCategory,
    #[validate(length(min = 1, max = 25))]
    pub purchase_unit: String,
    #[validate(range(exclusive_min = 0.0))]
    pub pack_size: f64,
    #[validate(range(min = 0.0))]
    pub pack_price: f64,
    #[validate(length(min = 1, max = 25))]
    pub cost_unit: String,
    #[validate(range(min = 0.0, max = 100.0))]
    pub wastage_pct: f64,
    #[validate(range(min = 0.0))]
    pub stock_qty: f64,
    #[validate(range(min = 0.0))]
    pub reorder_level: f64,
}
