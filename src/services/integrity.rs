//! Cross-table checks over a generated dataset: references resolve and the
//! derived columns agree with the rows they were derived from.

use crate::models::{
    Campaign, Customer, Order, OrderItem, OrderStatus, Product, TableKind,
};
use crate::utils::round2;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Violation {
    pub table: TableKind,
    pub row: String,
    pub rule: &'static str,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct IntegrityReport {
    pub rows: Vec<(TableKind, usize)>,
    pub violations: Vec<Violation>,
}

impl IntegrityReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    fn flag(&mut self, table: TableKind, row: &str, rule: &'static str, detail: String) {
        self.violations.push(Violation {
            table,
            row: row.to_string(),
            rule,
            detail,
        });
    }
}

pub struct Dataset<'a> {
    pub customers: &'a [Customer],
    pub products: &'a [Product],
    pub orders: &'a [Order],
    pub items: &'a [OrderItem],
    pub campaigns: &'a [Campaign],
}

pub fn check_dataset(data: &Dataset<'_>) -> IntegrityReport {
    let mut report = IntegrityReport {
        rows: vec![
            (TableKind::Customers, data.customers.len()),
            (TableKind::Products, data.products.len()),
            (TableKind::Orders, data.orders.len()),
            (TableKind::OrderItems, data.items.len()),
            (TableKind::MarketingCampaigns, data.campaigns.len()),
        ],
        violations: Vec::new(),
    };

    check_customers(data.customers, &mut report);
    check_products(data.products, &mut report);
    check_orders(data, &mut report);
    check_campaigns(data.campaigns, &mut report);
    report
}

fn check_unique<'a>(
    table: TableKind,
    ids: impl Iterator<Item = &'a str>,
    report: &mut IntegrityReport,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            report.flag(table, id, "unique_id", "duplicate id".into());
        }
    }
    seen
}

fn check_customers(customers: &[Customer], report: &mut IntegrityReport) {
    let table = TableKind::Customers;
    check_unique(table, customers.iter().map(|c| c.customer_id.as_str()), report);
    for c in customers {
        if c.lifetime_value < 0.0 || c.avg_order_value < 10.0 || c.order_frequency < 1.0 {
            report.flag(
                table,
                &c.customer_id,
                "behaviour_floor",
                format!(
                    "ltv={} aov={} freq={}",
                    c.lifetime_value, c.avg_order_value, c.order_frequency
                ),
            );
        }
        let n = c.preferred_categories.as_slice().len();
        if !(1..=3).contains(&n) {
            report.flag(table, &c.customer_id, "preferred_categories", format!("{n} categories"));
        }
        if c.is_vip && !c.customer_segment.is_vip_eligible() {
            report.flag(
                table,
                &c.customer_id,
                "vip_segment",
                format!("VIP in segment {}", c.customer_segment),
            );
        }
    }
}

fn check_products(products: &[Product], report: &mut IntegrityReport) {
    let table = TableKind::Products;
    check_unique(table, products.iter().map(|p| p.product_id.as_str()), report);
    for p in products {
        if p.cost >= p.price {
            report.flag(
                table,
                &p.product_id,
                "cost_below_price",
                format!("cost {} >= price {}", p.cost, p.price),
            );
        }
        if p.is_bestseller != Product::bestseller_rule(p.avg_rating, p.num_reviews) {
            report.flag(
                table,
                &p.product_id,
                "bestseller_rule",
                format!("rating={} reviews={}", p.avg_rating, p.num_reviews),
            );
        }
    }
}

fn check_orders(data: &Dataset<'_>, report: &mut IntegrityReport) {
    let customers: HashMap<&str, &Customer> = data
        .customers
        .iter()
        .map(|c| (c.customer_id.as_str(), c))
        .collect();
    let product_ids: HashSet<&str> = data.products.iter().map(|p| p.product_id.as_str()).collect();
    let order_ids = check_unique(
        TableKind::Orders,
        data.orders.iter().map(|o| o.order_id.as_str()),
        report,
    );

    let mut items_by_order: HashMap<&str, Vec<&OrderItem>> = HashMap::new();
    for item in data.items {
        let row = format!("{}/{}", item.order_id, item.product_id);
        if !order_ids.contains(item.order_id.as_str()) {
            report.flag(TableKind::OrderItems, &row, "order_ref", "unknown order".into());
        }
        if !product_ids.contains(item.product_id.as_str()) {
            report.flag(TableKind::OrderItems, &row, "product_ref", "unknown product".into());
        }
        if item.total_price != round2(item.unit_price * item.quantity as f64) {
            report.flag(
                TableKind::OrderItems,
                &row,
                "line_total",
                format!("{} x {} != {}", item.unit_price, item.quantity, item.total_price),
            );
        }
        items_by_order
            .entry(item.order_id.as_str())
            .or_default()
            .push(item);
    }

    let table = TableKind::Orders;
    for o in data.orders {
        let items = items_by_order
            .get(o.order_id.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        if items.len() as i64 != o.num_items {
            report.flag(
                table,
                &o.order_id,
                "num_items",
                format!("{} items listed, {} recorded", items.len(), o.num_items),
            );
        }

        let subtotal: f64 = items.iter().map(|i| i.total_price).sum();
        if o.total_amount != round2(subtotal + o.shipping_cost) {
            report.flag(
                table,
                &o.order_id,
                "order_total",
                format!("{} != {subtotal} + {}", o.total_amount, o.shipping_cost),
            );
        }

        match customers.get(o.customer_id.as_str()) {
            None => report.flag(table, &o.order_id, "customer_ref", o.customer_id.clone()),
            Some(c) => {
                let free = subtotal > 50.0 || c.is_vip;
                let ok = if free {
                    o.shipping_cost == 0.0
                } else {
                    (3.0..=12.0).contains(&o.shipping_cost)
                };
                if !ok {
                    report.flag(
                        table,
                        &o.order_id,
                        "shipping_cost",
                        format!("subtotal={subtotal} vip={} shipping={}", c.is_vip, o.shipping_cost),
                    );
                }
            }
        }

        let dates_ok = match (o.order_status, o.shipped_date, o.delivered_date) {
            (OrderStatus::Completed, Some(shipped), Some(delivered)) => {
                o.order_date < shipped && shipped < delivered
            }
            (OrderStatus::Completed, _, _) => false,
            (_, None, None) => true,
            _ => false,
        };
        if !dates_ok {
            report.flag(
                table,
                &o.order_id,
                "fulfilment_dates",
                format!(
                    "{} ordered={} shipped={:?} delivered={:?}",
                    o.order_status, o.order_date, o.shipped_date, o.delivered_date
                ),
            );
        }
    }
}

fn check_campaigns(campaigns: &[Campaign], report: &mut IntegrityReport) {
    let table = TableKind::MarketingCampaigns;
    check_unique(table, campaigns.iter().map(|c| c.campaign_id.as_str()), report);
    for c in campaigns {
        if !c.campaign_type.books_revenue() && (c.total_revenue != 0.0 || c.roas != 0.0) {
            report.flag(
                table,
                &c.campaign_id,
                "revenue_type",
                format!("{} booked revenue {}", c.campaign_type, c.total_revenue),
            );
        }
        let expected_cpc = if c.total_conversions > 0 {
            round2(c.total_budget / c.total_conversions as f64)
        } else {
            0.0
        };
        if c.cost_per_conversion != expected_cpc {
            report.flag(
                table,
                &c.campaign_id,
                "cost_per_conversion",
                format!("{} != {expected_cpc}", c.cost_per_conversion),
            );
        }
        let expected_roas = if c.campaign_type.books_revenue() && c.total_budget > 0.0 {
            round2(c.total_revenue / c.total_budget)
        } else {
            0.0
        };
        if c.roas != expected_roas {
            report.flag(
                table,
                &c.campaign_id,
                "roas",
                format!("{} != {expected_roas}", c.roas),
            );
        }
        if (c.end_date - c.start_date).num_days() != c.duration_days {
            report.flag(
                table,
                &c.campaign_id,
                "duration",
                format!("{}..{} vs {} days", c.start_date, c.end_date, c.duration_days),
            );
        }
    }
}

pub fn log_report(report: &IntegrityReport) {
    for (table, n) in &report.rows {
        log::info!("  {table}: {n} rows");
    }
    if report.is_ok() {
        log::info!("Integrity check passed");
        return;
    }
    for v in report.violations.iter().take(50) {
        log::warn!("  [{}] {} {}: {}", v.table, v.row, v.rule, v.detail);
    }
    log::error!("Integrity check failed: {} violations", report.violations.len());
}
