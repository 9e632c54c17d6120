use crate::config::validate_count;
use crate::error::{AppError, AppResult};
use crate::models::{
    Category, Customer, Order, OrderBatch, OrderItem, OrderStatus, PaymentMethod, Product,
    SalesChannel, Segment,
};
use crate::utils::{Quarter, WeightedChoice, days_in_year, midnight, producer_rng, round2, year_start};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Poisson};
use std::collections::{BTreeMap, HashMap};

pub const PRODUCER: &str = "orders";

const PAYMENT_METHODS: [(PaymentMethod, f64); 6] = [
    (PaymentMethod::CreditCard, 0.45),
    (PaymentMethod::PayPal, 0.25),
    (PaymentMethod::ApplePay, 0.15),
    (PaymentMethod::GooglePay, 0.10),
    (PaymentMethod::BankTransfer, 0.03),
    (PaymentMethod::Cryptocurrency, 0.02),
];

const ORDER_STATUSES: [(OrderStatus, f64); 4] = [
    (OrderStatus::Completed, 0.85),
    (OrderStatus::Pending, 0.08),
    (OrderStatus::Cancelled, 0.05),
    (OrderStatus::Refunded, 0.02),
];

const MAX_ITEMS: usize = 20;
const PREFERRED_CATEGORY_PROBABILITY: f64 = 0.7;
const PROMOTION_PROBABILITY: f64 = 0.15;
const PROMOTION_DISCOUNT: (f64, f64) = (0.05, 0.25);
const FREE_SHIPPING_THRESHOLD: f64 = 50.0;
const SHIPPING_COST: (f64, f64) = (3.0, 12.0);
const SHIP_DELAY_DAYS: (i64, i64) = (1, 5);
const DELIVERY_DELAY_DAYS: (i64, i64) = (1, 10);
const MOBILE_APP_PROBABILITY: f64 = 0.6;
const PHYSICAL_STORE_PROBABILITY: f64 = 0.1;
const PROGRESS_EVERY: usize = 5000;

/// Mean basket size (before the +1) per segment.
fn basket_rate(segment: Segment) -> f64 {
    match segment {
        Segment::Enterprise => 8.0,
        Segment::Premium => 4.0,
        Segment::Regular => 2.0,
        Segment::Budget => 1.0,
    }
}

pub struct OrderGenerator {
    rng: ChaCha8Rng,
    year: i32,
    payments: WeightedChoice<PaymentMethod>,
    statuses: WeightedChoice<OrderStatus>,
    basket_sizes: BTreeMap<Segment, Poisson<f64>>,
}

impl OrderGenerator {
    pub fn new(seed: u64, year: i32) -> AppResult<Self> {
        let mut basket_sizes = BTreeMap::new();
        for segment in Segment::ALL {
            let rate = basket_rate(segment);
            let poisson = Poisson::new(rate)
                .map_err(|e| AppError::Distribution(format!("poisson({rate}): {e}")))?;
            basket_sizes.insert(segment, poisson);
        }

        Ok(Self {
            rng: producer_rng(seed, PRODUCER),
            year,
            payments: WeightedChoice::new(PAYMENT_METHODS)?,
            statuses: WeightedChoice::new(ORDER_STATUSES)?,
            basket_sizes,
        })
    }

    /// Attempts `candidates` orders. Each candidate may be dropped by the
    /// seasonal filter, so the batch usually holds fewer orders than that.
    pub fn generate(
        &mut self,
        candidates: i64,
        customers: &[Customer],
        products: &[Product],
    ) -> AppResult<OrderBatch> {
        let candidates = validate_count(PRODUCER, candidates)?;
        if customers.is_empty() {
            return Err(empty_input("customers"));
        }
        if products.is_empty() {
            return Err(empty_input("products"));
        }
        log::info!(
            "Generating up to {candidates} orders for {} from {} customers and {} products",
            self.year,
            customers.len(),
            products.len()
        );

        let buyers = WeightedChoice::new(
            customers
                .iter()
                .enumerate()
                .map(|(i, c)| (i, c.order_frequency)),
        )?;
        let mut catalog = ProductPool::new(products)?;

        let first_day = year_start(self.year)?;
        let days = days_in_year(self.year)?;

        let mut batch = OrderBatch {
            candidates,
            ..Default::default()
        };
        for i in 0..candidates {
            let customer = &customers[buyers.sample_index(&mut self.rng)];
            let order_date = first_day + Duration::days(self.rng.gen_range(0..days));

            let keep = self.rng.gen_range(0.0..1.0);
            if keep <= Quarter::of(order_date).order_acceptance() {
                self.order(i, customer, order_date, &mut catalog, &mut batch)?;
            }

            if (i + 1) % PROGRESS_EVERY == 0 {
                log::debug!("  processed {} order candidates", i + 1);
            }
        }

        log::info!(
            "Accepted {} of {} order candidates ({} dropped by seasonality)",
            batch.orders.len(),
            batch.candidates,
            batch.rejected()
        );
        Ok(batch)
    }

    fn order(
        &mut self,
        index: usize,
        customer: &Customer,
        order_date: NaiveDate,
        catalog: &mut ProductPool<'_>,
        batch: &mut OrderBatch,
    ) -> AppResult<()> {
        let order_id = format!("ORDER-{}-{:08}", self.year, index + 1);
        let num_items = self.basket_size(customer.customer_segment);

        let mut subtotal = 0.0;
        for _ in 0..num_items {
            let restrict = self.rng.gen_bool(PREFERRED_CATEGORY_PROBABILITY)
                && !customer.preferred_categories.is_empty();
            let choice = if restrict {
                catalog.in_categories(customer.preferred_categories.as_slice())?
            } else {
                catalog.all()
            };
            let picked = choice.sample_index(&mut self.rng);
            let product = &catalog.products[picked];

            let quantity: i64 = self.rng.gen_range(1..=3);
            let mut unit_price = product.price;
            if self.rng.gen_bool(PROMOTION_PROBABILITY) {
                let discount = self.rng.gen_range(PROMOTION_DISCOUNT.0..PROMOTION_DISCOUNT.1);
                unit_price = round2(unit_price * (1.0 - discount));
            }
            let total_price = round2(unit_price * quantity as f64);
            subtotal += total_price;

            batch.items.push(OrderItem {
                order_id: order_id.clone(),
                product_id: product.product_id.clone(),
                product_name: product.product_name.clone(),
                category: product.category,
                quantity,
                unit_price,
                total_price,
            });
        }

        let shipping_cost = if subtotal > FREE_SHIPPING_THRESHOLD || customer.is_vip {
            0.0
        } else {
            round2(self.rng.gen_range(SHIPPING_COST.0..=SHIPPING_COST.1))
        };

        let payment_method = *self.payments.sample(&mut self.rng);
        let order_status = *self.statuses.sample(&mut self.rng);

        let (shipped_date, delivered_date) = if order_status == OrderStatus::Completed {
            let shipped =
                order_date + Duration::days(self.rng.gen_range(SHIP_DELAY_DAYS.0..=SHIP_DELAY_DAYS.1));
            let delivered = shipped
                + Duration::days(self.rng.gen_range(DELIVERY_DELAY_DAYS.0..=DELIVERY_DELAY_DAYS.1));
            (Some(shipped), Some(delivered))
        } else {
            (None, None)
        };

        let sales_channel = if customer.mobile_app_user && self.rng.gen_bool(MOBILE_APP_PROBABILITY) {
            SalesChannel::MobileApp
        } else if self.rng.gen_bool(PHYSICAL_STORE_PROBABILITY) {
            SalesChannel::PhysicalStore
        } else {
            SalesChannel::Website
        };

        batch.orders.push(Order {
            order_id,
            customer_id: customer.customer_id.clone(),
            order_date,
            total_amount: round2(subtotal + shipping_cost),
            shipping_cost,
            payment_method,
            order_status,
            sales_channel,
            num_items: num_items as i64,
            shipped_date,
            delivered_date,
            created_at: midnight(order_date),
        });
        Ok(())
    }

    fn basket_size(&mut self, segment: Segment) -> usize {
        let drawn = self
            .basket_sizes
            .get(&segment)
            .map(|p| p.sample(&mut self.rng) as usize)
            .unwrap_or(0);
        (drawn + 1).min(MAX_ITEMS)
    }
}

fn empty_input(table: &str) -> AppError {
    AppError::MissingInput {
        table: table.to_string(),
        path: "table has no rows".to_string(),
    }
}

/// Popularity-weighted product choice, with per-category-set subsets built
/// on first use.
struct ProductPool<'a> {
    products: &'a [Product],
    all: WeightedChoice<usize>,
    /// `None` when no product falls in the category set.
    preferred: HashMap<Vec<Category>, Option<WeightedChoice<usize>>>,
}

impl<'a> ProductPool<'a> {
    fn new(products: &'a [Product]) -> AppResult<Self> {
        let all = WeightedChoice::new(
            products
                .iter()
                .enumerate()
                .map(|(i, p)| (i, p.popularity_weight())),
        )?;
        Ok(Self {
            products,
            all,
            preferred: HashMap::new(),
        })
    }

    fn all(&self) -> &WeightedChoice<usize> {
        &self.all
    }

    /// Falls back to the whole catalogue when nothing matches.
    fn in_categories(&mut self, categories: &[Category]) -> AppResult<&WeightedChoice<usize>> {
        let mut key = categories.to_vec();
        key.sort();
        key.dedup();

        if !self.preferred.contains_key(&key) {
            let matching: Vec<(usize, f64)> = self
                .products
                .iter()
                .enumerate()
                .filter(|(_, p)| key.contains(&p.category))
                .map(|(i, p)| (i, p.popularity_weight()))
                .collect();
            let subset = if matching.is_empty() {
                log::debug!("No products in {key:?}, falling back to full catalogue");
                None
            } else {
                Some(WeightedChoice::new(matching)?)
            };
            self.preferred.insert(key.clone(), subset);
        }

        match self.preferred.get(&key) {
            Some(Some(subset)) => Ok(subset),
            _ => Ok(&self.all),
        }
    }
}

pub fn log_summary(batch: &OrderBatch) {
    let orders = &batch.orders;
    let revenue: f64 = orders.iter().map(|o| o.total_amount).sum();
    let denom = orders.len().max(1) as f64;
    log::info!(
        "Orders summary: orders={} items={} avg_order_value=${:.2} revenue=${revenue:.2}",
        orders.len(),
        batch.items.len(),
        revenue / denom
    );
    for status in OrderStatus::ALL {
        let n = orders.iter().filter(|o| o.order_status == status).count();
        log::info!("  {status}: {n} ({:.1}%)", 100.0 * n as f64 / denom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PreferredCategories;
    use crate::services::{CustomerGenerator, ProductCatalogGenerator};
    use chrono::NaiveDateTime;
    use std::collections::HashSet;

    fn inputs(customers: i64, products: i64) -> (Vec<Customer>, Vec<Product>) {
        (
            CustomerGenerator::new(11, 2025)
                .unwrap()
                .generate(customers)
                .unwrap(),
            ProductCatalogGenerator::new(11, 2025)
                .unwrap()
                .generate(products)
                .unwrap(),
        )
    }

    fn product(id: &str, category: Category, price: f64) -> Product {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let ts: NaiveDateTime = midnight(date);
        Product {
            product_id: id.into(),
            sku: "TST-BOO-0001".into(),
            product_name: format!("Test {id}"),
            category,
            subcategory: "Fiction".into(),
            brand: "Penguin".into(),
            price,
            cost: price * 0.7,
            stock_quantity: 10,
            avg_rating: 4.0,
            num_reviews: 10,
            launch_date: date,
            weight: 1.0,
            is_eco_friendly: false,
            is_ai_enabled: false,
            is_bestseller: false,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn customer(segment: Segment, is_vip: bool, prefs: Vec<Category>) -> Customer {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Customer {
            customer_id: "CUST-2025-000001".into(),
            first_name: "Jo".into(),
            last_name: "Doe".into(),
            email: "jo.doe@gmail.com".into(),
            country: "US".into(),
            city: "Boston".into(),
            created_at: date,
            customer_segment: segment,
            lifetime_value: 1000.0,
            avg_order_value: 50.0,
            order_frequency: 3.0,
            preferred_categories: PreferredCategories(prefs),
            is_vip,
            newsletter_subscriber: false,
            mobile_app_user: true,
            last_active_date: date,
        }
    }

    #[test]
    fn test_small_scenario_resolves_references() {
        let (customers, products) = inputs(5, 10);
        let batch = OrderGenerator::new(42, 2025)
            .unwrap()
            .generate(100, &customers, &products)
            .unwrap();
        assert!(!batch.orders.is_empty());
        assert!(batch.orders.len() <= 100);
        assert_eq!(batch.candidates, 100);

        let customer_ids: HashSet<_> = customers.iter().map(|c| c.customer_id.as_str()).collect();
        let product_ids: HashSet<_> = products.iter().map(|p| p.product_id.as_str()).collect();
        let order_ids: HashSet<_> = batch.orders.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(order_ids.len(), batch.orders.len());
        for o in &batch.orders {
            assert!(customer_ids.contains(o.customer_id.as_str()));
        }
        for item in &batch.items {
            assert!(order_ids.contains(item.order_id.as_str()));
            assert!(product_ids.contains(item.product_id.as_str()));
        }

        let again = OrderGenerator::new(42, 2025)
            .unwrap()
            .generate(100, &customers, &products)
            .unwrap();
        assert_eq!(batch, again);
    }

    #[test]
    fn test_order_invariants_hold() {
        let (customers, products) = inputs(200, 300);
        let batch = OrderGenerator::new(7, 2025)
            .unwrap()
            .generate(3_000, &customers, &products)
            .unwrap();
        let vip: HashMap<_, _> = customers
            .iter()
            .map(|c| (c.customer_id.as_str(), c.is_vip))
            .collect();

        let mut items_by_order: HashMap<&str, Vec<&OrderItem>> = HashMap::new();
        for item in &batch.items {
            assert!((1..=3).contains(&item.quantity));
            assert_eq!(item.total_price, round2(item.unit_price * item.quantity as f64));
            items_by_order.entry(item.order_id.as_str()).or_default().push(item);
        }

        for o in &batch.orders {
            let items = &items_by_order[o.order_id.as_str()];
            assert_eq!(items.len() as i64, o.num_items);
            assert!((1..=20).contains(&o.num_items));
            let subtotal: f64 = items.iter().map(|i| i.total_price).sum();
            assert_eq!(o.total_amount, round2(subtotal + o.shipping_cost));

            if subtotal > 50.0 || vip[o.customer_id.as_str()] {
                assert_eq!(o.shipping_cost, 0.0);
            } else {
                assert!((3.0..=12.0).contains(&o.shipping_cost));
            }

            match o.order_status {
                OrderStatus::Completed => {
                    let shipped = o.shipped_date.unwrap();
                    let delivered = o.delivered_date.unwrap();
                    assert!(o.order_date < shipped && shipped < delivered);
                }
                _ => {
                    assert!(o.shipped_date.is_none());
                    assert!(o.delivered_date.is_none());
                }
            }
            assert_eq!(o.order_date.format("%Y").to_string(), "2025");
        }
    }

    #[test]
    fn test_vip_with_cheap_item_ships_free() {
        let customers = vec![customer(Segment::Budget, true, vec![Category::Books])];
        let products = vec![product("PROD-2025-000001", Category::Books, 5.0)];
        let batch = OrderGenerator::new(1, 2025)
            .unwrap()
            .generate(500, &customers, &products)
            .unwrap();
        assert!(!batch.orders.is_empty());
        for o in &batch.orders {
            assert_eq!(o.shipping_cost, 0.0);
        }
    }

    #[test]
    fn test_non_vip_small_order_pays_shipping() {
        let customers = vec![customer(Segment::Budget, false, vec![Category::Books])];
        let products = vec![product("PROD-2025-000001", Category::Books, 1.0)];
        let batch = OrderGenerator::new(1, 2025)
            .unwrap()
            .generate(200, &customers, &products)
            .unwrap();
        // Budget baskets stay far below the threshold at 1.00 per unit
        for o in batch.orders.iter().filter(|o| o.num_items <= 5) {
            assert!(o.shipping_cost >= 3.0 && o.shipping_cost <= 12.0);
        }
    }

    #[test]
    fn test_non_app_users_never_order_via_app() {
        let products = vec![product("PROD-2025-000001", Category::Books, 20.0)];
        let mut offline = customer(Segment::Regular, false, vec![Category::Books]);
        offline.mobile_app_user = false;
        let batch = OrderGenerator::new(12, 2025)
            .unwrap()
            .generate(1_000, &[offline], &products)
            .unwrap();
        assert!(batch
            .orders
            .iter()
            .all(|o| o.sales_channel != SalesChannel::MobileApp));
        assert!(batch
            .orders
            .iter()
            .any(|o| o.sales_channel == SalesChannel::PhysicalStore));

        let app_user = customer(Segment::Regular, false, vec![Category::Books]);
        let batch = OrderGenerator::new(12, 2025)
            .unwrap()
            .generate(1_000, &[app_user], &products)
            .unwrap();
        let via_app = batch
            .orders
            .iter()
            .filter(|o| o.sales_channel == SalesChannel::MobileApp)
            .count();
        let share = via_app as f64 / batch.orders.len() as f64;
        assert!(share > 0.5 && share < 0.7, "{share}");
    }

    #[test]
    fn test_preferred_categories_without_stock_fall_back() {
        let customers = vec![customer(Segment::Regular, false, vec![Category::Sports])];
        let products = vec![
            product("PROD-2025-000001", Category::Books, 20.0),
            product("PROD-2025-000002", Category::Fashion, 30.0),
        ];
        let batch = OrderGenerator::new(5, 2025)
            .unwrap()
            .generate(100, &customers, &products)
            .unwrap();
        assert!(!batch.items.is_empty());
        assert!(batch.items.iter().all(|i| i.category != Category::Sports));
    }

    #[test]
    fn test_preferred_categories_bias_selection() {
        let customers = vec![customer(Segment::Enterprise, false, vec![Category::Books])];
        let products: Vec<Product> = (0..10)
            .map(|i| {
                let category = if i == 0 { Category::Books } else { Category::Fashion };
                product(&format!("PROD-2025-{:06}", i + 1), category, 10.0)
            })
            .collect();
        let batch = OrderGenerator::new(9, 2025)
            .unwrap()
            .generate(500, &customers, &products)
            .unwrap();
        let books = batch
            .items
            .iter()
            .filter(|i| i.category == Category::Books)
            .count();
        // ~0.7 + 0.3 / 10 of all items
        let share = books as f64 / batch.items.len() as f64;
        assert!(share > 0.6 && share < 0.85, "{share}");
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let (customers, products) = inputs(3, 3);
        let mut generator = OrderGenerator::new(1, 2025).unwrap();
        assert!(matches!(
            generator.generate(10, &[], &products),
            Err(AppError::MissingInput { .. })
        ));
        assert!(matches!(
            generator.generate(10, &customers, &[]),
            Err(AppError::MissingInput { .. })
        ));
        assert!(matches!(
            generator.generate(0, &customers, &products),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_seasonal_filter_drops_some_candidates() {
        let (customers, products) = inputs(20, 20);
        let batch = OrderGenerator::new(3, 2025)
            .unwrap()
            .generate(4_000, &customers, &products)
            .unwrap();
        // expected keep rate is about 0.9 over a year
        let kept = batch.orders.len() as f64 / 4_000.0;
        assert!(kept > 0.85 && kept < 0.95, "{kept}");
        assert!(batch.rejected() > 0);
    }
}
