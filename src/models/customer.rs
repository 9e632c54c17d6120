use crate::models::Category;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    Premium,
    Regular,
    Budget,
    Enterprise,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::Premium,
        Segment::Regular,
        Segment::Budget,
        Segment::Enterprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Premium => "Premium",
            Segment::Regular => "Regular",
            Segment::Budget => "Budget",
            Segment::Enterprise => "Enterprise",
        }
    }

    /// Only these segments are eligible for VIP status.
    pub fn is_vip_eligible(&self) -> bool {
        matches!(self, Segment::Premium | Segment::Enterprise)
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored as a single comma-joined column, e.g. `Books,Home & Garden`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreferredCategories(pub Vec<Category>);

impl PreferredCategories {
    pub fn as_slice(&self) -> &[Category] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for PreferredCategories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let joined = self
            .0
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(",");
        serializer.serialize_str(&joined)
    }
}

impl<'de> Deserialize<'de> for PreferredCategories {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<Category>().map_err(serde::de::Error::custom))
            .collect::<Result<Vec<_>, _>>()
            .map(PreferredCategories)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: String,
    pub city: String,
    pub created_at: NaiveDate,
    pub customer_segment: Segment,
    pub lifetime_value: f64,
    pub avg_order_value: f64,
    pub order_frequency: f64,
    pub preferred_categories: PreferredCategories,
    pub is_vip: bool,
    pub newsletter_subscriber: bool,
    pub mobile_app_user: bool,
    pub last_active_date: NaiveDate,
}
