use crate::config::validate_count;
use crate::error::{AppError, AppResult};
use crate::models::{Category, Product};
use crate::utils::{
    NormalSpec, days_in_year, midnight, pick, producer_rng, round2, sample_clamped, year_start,
};
use chrono::Duration;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp};
use std::collections::BTreeMap;

pub const PRODUCER: &str = "products";

pub struct CategoryProfile {
    pub category: Category,
    pub subcategories: &'static [&'static str],
    pub brands: &'static [&'static str],
    pub price_range: (f64, f64),
}

pub static CATALOG: [CategoryProfile; 6] = [
    CategoryProfile {
        category: Category::Electronics,
        subcategories: &["Smartphones", "Laptops", "Tablets", "Headphones", "Smart Home", "Gaming"],
        brands: &["Apple", "Samsung", "Sony", "Microsoft", "Google", "Dell", "HP"],
        price_range: (50.0, 3000.0),
    },
    CategoryProfile {
        category: Category::Fashion,
        subcategories: &["Clothing", "Shoes", "Accessories", "Bags", "Jewelry", "Watches"],
        brands: &["Nike", "Adidas", "Zara", "H&M", "Gucci", "Prada", "Uniqlo"],
        price_range: (20.0, 800.0),
    },
    CategoryProfile {
        category: Category::HomeAndGarden,
        subcategories: &["Furniture", "Decor", "Kitchen", "Lighting", "Garden", "Tools"],
        brands: &["IKEA", "West Elm", "CB2", "Williams Sonoma", "Home Depot", "Lowes"],
        price_range: (15.0, 1500.0),
    },
    CategoryProfile {
        category: Category::Books,
        subcategories: &["Fiction", "Non-Fiction", "Educational", "Comics", "Children", "E-books"],
        brands: &["Penguin", "Random House", "HarperCollins", "Scholastic", "Marvel", "DC"],
        price_range: (8.0, 60.0),
    },
    CategoryProfile {
        category: Category::Sports,
        subcategories: &["Fitness", "Outdoor", "Team Sports", "Individual Sports", "Water Sports"],
        brands: &["Nike", "Adidas", "Under Armour", "Patagonia", "North Face", "REI"],
        price_range: (25.0, 1200.0),
    },
    CategoryProfile {
        category: Category::HealthAndBeauty,
        subcategories: &["Skincare", "Makeup", "Supplements", "Personal Care", "Wellness"],
        brands: &["L'Oreal", "Nivea", "Clinique", "The Body Shop", "Sephora", "Ulta"],
        price_range: (10.0, 300.0),
    },
];

const QUALIFIERS: [&str; 8] = [
    "Pro", "Max", "Ultra", "Premium", "Elite", "Smart", "Advanced", "Classic",
];
/// Names containing any of these sell better.
const TRENDING_KEYWORDS: [&str; 4] = ["smart", "ai", "eco", "sustainable"];
const TRENDING_BOOST: f64 = 1.5;

const INFLATION_RANGE: (f64, f64) = (1.05, 1.08);
const COST_RATIO_RANGE: (f64, f64) = (0.60, 0.80);
const RATING: NormalSpec = NormalSpec::new(4.2, 0.5, 0.0);
const MAX_RATING: f64 = 5.0;
const MEAN_REVIEWS: f64 = 50.0;
const ECO_PROBABILITY: f64 = 0.3;
const AI_PROBABILITY: f64 = 0.4;
const PROGRESS_EVERY: usize = 200;

pub struct ProductCatalogGenerator {
    rng: ChaCha8Rng,
    year: i32,
    reviews: Exp<f64>,
}

impl ProductCatalogGenerator {
    pub fn new(seed: u64, year: i32) -> AppResult<Self> {
        let reviews = Exp::new(1.0 / MEAN_REVIEWS)
            .map_err(|e| AppError::Distribution(format!("exp(1/{MEAN_REVIEWS}): {e}")))?;
        Ok(Self {
            rng: producer_rng(seed, PRODUCER),
            year,
            reviews,
        })
    }

    pub fn generate(&mut self, count: i64) -> AppResult<Vec<Product>> {
        let count = validate_count(PRODUCER, count)?;
        log::info!("Generating {count} products for {}", self.year);

        let mut products = Vec::with_capacity(count);
        for i in 0..count {
            products.push(self.product(i)?);
            if (i + 1) % PROGRESS_EVERY == 0 {
                log::debug!("  generated {} products", i + 1);
            }
        }
        Ok(products)
    }

    fn product(&mut self, index: usize) -> AppResult<Product> {
        let rng = &mut self.rng;
        let year = self.year;

        let profile = pick(rng, &CATALOG);
        let subcategory = *pick(rng, profile.subcategories);
        let brand = *pick(rng, profile.brands);
        let product_name = format!("{brand} {subcategory} {} {year}", pick(rng, &QUALIFIERS));

        let (min, max) = profile.price_range;
        let base_price = rng.gen_range(min..max);
        let price = round2(base_price * rng.gen_range(INFLATION_RANGE.0..INFLATION_RANGE.1));
        let cost = round2(price * rng.gen_range(COST_RATIO_RANGE.0..COST_RATIO_RANGE.1));
        let stock_quantity = rng.gen_range(10..=500);

        let boost = popularity_boost(&product_name);
        let avg_rating = round2((sample_clamped(rng, RATING)? * boost).min(MAX_RATING));
        let num_reviews = (self.reviews.sample(rng) * boost).floor() as i64;

        let launch_offset = rng.gen_range(0..days_in_year(year)?);
        let launch_date = year_start(year)? + Duration::days(launch_offset);
        let weight = round2(rng.gen_range(0.1..10.0));
        let is_eco_friendly = rng.gen_bool(ECO_PROBABILITY);
        let is_ai_enabled =
            profile.category == Category::Electronics && rng.gen_bool(AI_PROBABILITY);

        Ok(Product {
            product_id: format!("PROD-{year}-{:06}", index + 1),
            sku: sku(brand, profile.category, index),
            product_name,
            category: profile.category,
            subcategory: subcategory.to_string(),
            brand: brand.to_string(),
            price,
            cost,
            stock_quantity,
            avg_rating,
            num_reviews,
            launch_date,
            weight,
            is_eco_friendly,
            is_ai_enabled,
            is_bestseller: Product::bestseller_rule(avg_rating, num_reviews),
            created_at: midnight(year_start(year)?),
            updated_at: midnight(launch_date),
        })
    }
}

pub fn popularity_boost(product_name: &str) -> f64 {
    let lower = product_name.to_lowercase();
    if TRENDING_KEYWORDS.iter().any(|k| lower.contains(k)) {
        TRENDING_BOOST
    } else {
        1.0
    }
}

/// `APP-ELE-0001` style stock keeping unit.
fn sku(brand: &str, category: Category, index: usize) -> String {
    let prefix = |s: &str| s.chars().take(3).collect::<String>().to_uppercase();
    format!("{}-{}-{:04}", prefix(brand), prefix(category.as_str()), index + 1)
}

pub fn log_summary(products: &[Product]) {
    let total = products.len();
    let denom = total.max(1) as f64;
    log::info!("Products summary: total={total}");
    let mut by_category: BTreeMap<Category, usize> = BTreeMap::new();
    for p in products {
        *by_category.entry(p.category).or_default() += 1;
    }
    for (category, n) in &by_category {
        log::info!("  {category}: {n} ({:.1}%)", 100.0 * *n as f64 / denom);
    }
    let avg_price = products.iter().map(|p| p.price).sum::<f64>() / denom;
    let eco = products.iter().filter(|p| p.is_eco_friendly).count();
    log::info!("  average price: ${avg_price:.2}");
    log::info!("  eco-friendly: {eco} ({:.1}%)", 100.0 * eco as f64 / denom);
}
