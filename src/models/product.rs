use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Electronics,
    Fashion,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    Books,
    Sports,
    #[serde(rename = "Health & Beauty")]
    HealthAndBeauty,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Electronics,
        Category::Fashion,
        Category::HomeAndGarden,
        Category::Books,
        Category::Sports,
        Category::HealthAndBeauty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Fashion => "Fashion",
            Category::HomeAndGarden => "Home & Garden",
            Category::Books => "Books",
            Category::Sports => "Sports",
            Category::HealthAndBeauty => "Health & Beauty",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub product_id: String,
    pub sku: String,
    pub product_name: String,
    pub category: Category,
    pub subcategory: String,
    pub brand: String,
    pub price: f64,
    pub cost: f64,
    pub stock_quantity: i64,
    pub avg_rating: f64,
    pub num_reviews: i64,
    pub launch_date: NaiveDate,
    pub weight: f64,
    pub is_eco_friendly: bool,
    pub is_ai_enabled: bool,
    pub is_bestseller: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Bestseller status is never sampled, only derived.
    pub fn bestseller_rule(avg_rating: f64, num_reviews: i64) -> bool {
        avg_rating > 4.5 && num_reviews > 100
    }

    /// Weight used when picking products for an order.
    pub fn popularity_weight(&self) -> f64 {
        self.avg_rating * (self.num_reviews.max(0) as f64).ln_1p() + 1.0
    }
}
