//! Table descriptions handed to the warehouse loader.
//!
//! Column order here is the column order of the written files; the loader
//! relies on it when it is given an explicit mapping instead of inferring one.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Customers,
    Products,
    Orders,
    OrderItems,
    MarketingCampaigns,
}

impl TableKind {
    pub const ALL: [TableKind; 5] = [
        TableKind::Customers,
        TableKind::Products,
        TableKind::Orders,
        TableKind::OrderItems,
        TableKind::MarketingCampaigns,
    ];

    pub fn table_name(&self) -> &'static str {
        match self {
            TableKind::Customers => "customers",
            TableKind::Products => "products",
            TableKind::Orders => "orders",
            TableKind::OrderItems => "order_items",
            TableKind::MarketingCampaigns => "marketing_campaigns",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.csv", self.table_name())
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    String,
    Float64,
    Integer,
    Date,
    Timestamp,
    Boolean,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSchema {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSchema {
    pub table: TableKind,
    pub file: String,
    pub columns: Vec<ColumnSchema>,
    /// DAY-partitioned on this column when set.
    pub partition_field: Option<&'static str>,
    pub clustering_fields: Vec<&'static str>,
}

impl TableSchema {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }
}

fn columns(defs: &[(&'static str, ColumnType)]) -> Vec<ColumnSchema> {
    defs.iter()
        .map(|&(name, column_type)| ColumnSchema { name, column_type })
        .collect()
}

pub fn table_schema(kind: TableKind) -> TableSchema {
    use ColumnType::*;

    let (cols, partition_field, clustering_fields): (Vec<ColumnSchema>, _, Vec<&'static str>) =
        match kind {
            TableKind::Customers => (
                columns(&[
                    ("customer_id", String),
                    ("first_name", String),
                    ("last_name", String),
                    ("email", String),
                    ("country", String),
                    ("city", String),
                    ("created_at", Date),
                    ("customer_segment", String),
                    ("lifetime_value", Float64),
                    ("avg_order_value", Float64),
                    ("order_frequency", Float64),
                    ("preferred_categories", String),
                    ("is_vip", Boolean),
                    ("newsletter_subscriber", Boolean),
                    ("mobile_app_user", Boolean),
                    ("last_active_date", Date),
                ]),
                Some("created_at"),
                vec!["customer_segment", "country"],
            ),
            TableKind::Products => (
                columns(&[
                    ("product_id", String),
                    ("sku", String),
                    ("product_name", String),
                    ("category", String),
                    ("subcategory", String),
                    ("brand", String),
                    ("price", Float64),
                    ("cost", Float64),
                    ("stock_quantity", Integer),
                    ("avg_rating", Float64),
                    ("num_reviews", Integer),
                    ("launch_date", Date),
                    ("weight", Float64),
                    ("is_eco_friendly", Boolean),
                    ("is_ai_enabled", Boolean),
                    ("is_bestseller", Boolean),
                    ("created_at", Timestamp),
                    ("updated_at", Timestamp),
                ]),
                Some("launch_date"),
                vec!["category", "brand"],
            ),
            TableKind::Orders => (
                columns(&[
                    ("order_id", String),
                    ("customer_id", String),
                    ("order_date", Date),
                    ("total_amount", Float64),
                    ("shipping_cost", Float64),
                    ("payment_method", String),
                    ("order_status", String),
                    ("sales_channel", String),
                    ("num_items", Integer),
                    ("shipped_date", Date),
                    ("delivered_date", Date),
                    ("created_at", Timestamp),
                ]),
                Some("order_date"),
                vec!["customer_id", "order_status"],
            ),
            TableKind::OrderItems => (
                columns(&[
                    ("order_id", String),
                    ("product_id", String),
                    ("product_name", String),
                    ("category", String),
                    ("quantity", Integer),
                    ("unit_price", Float64),
                    ("total_price", Float64),
                ]),
                None,
                vec!["order_id", "product_id"],
            ),
            TableKind::MarketingCampaigns => (
                columns(&[
                    ("campaign_id", String),
                    ("campaign_name", String),
                    ("campaign_type", String),
                    ("channel", String),
                    ("objective", String),
                    ("start_date", Date),
                    ("end_date", Date),
                    ("duration_days", Integer),
                    ("daily_budget", Float64),
                    ("total_budget", Float64),
                    ("total_impressions", Integer),
                    ("total_clicks", Integer),
                    ("total_conversions", Integer),
                    ("total_revenue", Float64),
                    ("avg_cpc", Float64),
                    ("cost_per_conversion", Float64),
                    ("conversion_rate", Float64),
                    ("roas", Float64),
                    ("status", String),
                    ("uses_ai_optimization", Boolean),
                    ("is_sustainable_focused", Boolean),
                    ("targets_gen_z", Boolean),
                    ("created_at", Timestamp),
                ]),
                Some("start_date"),
                vec!["channel", "campaign_type"],
            ),
        };

    TableSchema {
        table: kind,
        file: kind.file_name(),
        columns: cols,
        partition_field,
        clustering_fields,
    }
}

pub fn all_table_schemas() -> Vec<TableSchema> {
    TableKind::ALL.into_iter().map(table_schema).collect()
}
