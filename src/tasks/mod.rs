//! Pipeline steps over the table store.
//!
//! Each step is idempotent: it regenerates its table(s) from the seed and
//! overwrites the previous files. `generate_all` runs the three independent
//! producers concurrently, then the order producer once they have all landed.

use crate::config::{Config, validate_count};
use crate::error::{AppError, AppResult};
use crate::models::{Campaign, Customer, Order, OrderItem, Product, TableKind};
use crate::services::integrity::{self, Dataset};
use crate::services::{
    CustomerGenerator, IntegrityReport, MarketingCampaignGenerator, OrderGenerator,
    ProductCatalogGenerator, campaign_generator, customer_generator, order_generator,
    product_generator,
};
use crate::storage::TableStore;
use chrono::NaiveDate;

/// Parameters shared by every producer in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSettings {
    pub seed: u64,
    pub year: i32,
    pub reference_date: NaiveDate,
}

impl RunSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            seed: config.generation.seed,
            year: config.generation.year,
            reference_date: config.reference_date(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub customers: i64,
    pub products: i64,
    pub orders: i64,
    pub campaigns: i64,
}

impl Counts {
    pub fn from_config(config: &Config) -> Self {
        let g = &config.generation;
        Self {
            customers: g.customers,
            products: g.products,
            orders: g.orders,
            campaigns: g.campaigns,
        }
    }
}

pub fn generate_customers(store: &TableStore, run: RunSettings, count: i64) -> AppResult<usize> {
    let customers = CustomerGenerator::new(run.seed, run.year)?.generate(count)?;
    store.write(TableKind::Customers, &customers)?;
    customer_generator::log_summary(&customers);
    Ok(customers.len())
}

pub fn generate_products(store: &TableStore, run: RunSettings, count: i64) -> AppResult<usize> {
    let products = ProductCatalogGenerator::new(run.seed, run.year)?.generate(count)?;
    store.write(TableKind::Products, &products)?;
    product_generator::log_summary(&products);
    Ok(products.len())
}

pub fn generate_campaigns(store: &TableStore, run: RunSettings, count: i64) -> AppResult<usize> {
    let campaigns =
        MarketingCampaignGenerator::new(run.seed, run.year, run.reference_date).generate(count)?;
    store.write(TableKind::MarketingCampaigns, &campaigns)?;
    campaign_generator::log_summary(&campaigns);
    Ok(campaigns.len())
}

/// Needs `customers.csv` and `products.csv`; fails with `MissingInput`
/// before sampling if either is absent, and writes nothing on failure.
pub fn generate_orders(store: &TableStore, run: RunSettings, candidates: i64) -> AppResult<usize> {
    validate_count(order_generator::PRODUCER, candidates)?;
    let customers: Vec<Customer> = store.read(TableKind::Customers)?;
    let products: Vec<Product> = store.read(TableKind::Products)?;
    log::info!(
        "Loaded {} customers and {} products",
        customers.len(),
        products.len()
    );

    let batch = OrderGenerator::new(run.seed, run.year)?.generate(candidates, &customers, &products)?;
    store.write_orders(&batch)?;
    order_generator::log_summary(&batch);
    Ok(batch.orders.len())
}

pub async fn generate_all(store: TableStore, run: RunSettings, counts: Counts) -> AppResult<()> {
    // reject bad counts before any table is touched
    validate_count(customer_generator::PRODUCER, counts.customers)?;
    validate_count(product_generator::PRODUCER, counts.products)?;
    validate_count(campaign_generator::PRODUCER, counts.campaigns)?;
    validate_count(order_generator::PRODUCER, counts.orders)?;

    let customers = {
        let store = store.clone();
        tokio::task::spawn_blocking(move || generate_customers(&store, run, counts.customers))
    };
    let products = {
        let store = store.clone();
        tokio::task::spawn_blocking(move || generate_products(&store, run, counts.products))
    };
    let campaigns = {
        let store = store.clone();
        tokio::task::spawn_blocking(move || generate_campaigns(&store, run, counts.campaigns))
    };

    let (customers, products, campaigns) = tokio::join!(customers, products, campaigns);
    let customers = customers.map_err(|e| AppError::Task(format!("customers: {e}")))??;
    let products = products.map_err(|e| AppError::Task(format!("products: {e}")))??;
    let campaigns = campaigns.map_err(|e| AppError::Task(format!("campaigns: {e}")))??;
    log::info!(
        "Leaf tables ready: {customers} customers, {products} products, {campaigns} campaigns"
    );

    let orders = tokio::task::spawn_blocking(move || generate_orders(&store, run, counts.orders))
        .await
        .map_err(|e| AppError::Task(format!("orders: {e}")))??;
    log::info!("Pipeline complete: {orders} orders");
    Ok(())
}

pub fn verify(store: &TableStore) -> AppResult<IntegrityReport> {
    let customers: Vec<Customer> = store.read(TableKind::Customers)?;
    let products: Vec<Product> = store.read(TableKind::Products)?;
    let orders: Vec<Order> = store.read(TableKind::Orders)?;
    let items: Vec<OrderItem> = store.read(TableKind::OrderItems)?;
    let campaigns: Vec<Campaign> = store.read(TableKind::MarketingCampaigns)?;

    let report = integrity::check_dataset(&Dataset {
        customers: &customers,
        products: &products,
        orders: &orders,
        items: &items,
        campaigns: &campaigns,
    });
    integrity::log_report(&report);
    Ok(report)
}
