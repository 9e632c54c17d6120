use crate::models::Category;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    PayPal,
    #[serde(rename = "Apple Pay")]
    ApplePay,
    #[serde(rename = "Google Pay")]
    GooglePay,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    Cryptocurrency,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Completed,
    Pending,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Completed,
        OrderStatus::Pending,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
    ];
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Completed => write!(f, "Completed"),
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
            OrderStatus::Refunded => write!(f, "Refunded"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SalesChannel {
    Website,
    #[serde(rename = "Mobile App")]
    MobileApp,
    #[serde(rename = "Physical Store")]
    PhysicalStore,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    pub order_date: NaiveDate,
    pub total_amount: f64,
    pub shipping_cost: f64,
    pub payment_method: PaymentMethod,
    pub order_status: OrderStatus,
    pub sales_channel: SalesChannel,
    pub num_items: i64,
    pub shipped_date: Option<NaiveDate>,
    pub delivered_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub order_id: String,
    pub product_id: String,
    pub product_name: String,
    pub category: Category,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Orders and their line items from a single run, persisted together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBatch {
    pub orders: Vec<Order>,
    pub items: Vec<OrderItem>,
    /// Number of candidates attempted; `orders.len()` can be lower.
    pub candidates: usize,
}

impl OrderBatch {
    pub fn rejected(&self) -> usize {
        self.candidates.saturating_sub(self.orders.len())
    }
}
