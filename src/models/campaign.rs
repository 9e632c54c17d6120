use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CampaignType {
    #[serde(rename = "Brand Awareness")]
    BrandAwareness,
    #[serde(rename = "Lead Generation")]
    LeadGeneration,
    #[serde(rename = "Sales Conversion")]
    SalesConversion,
    Retargeting,
    #[serde(rename = "Product Launch")]
    ProductLaunch,
}

impl CampaignType {
    pub const ALL: [CampaignType; 5] = [
        CampaignType::BrandAwareness,
        CampaignType::LeadGeneration,
        CampaignType::SalesConversion,
        CampaignType::Retargeting,
        CampaignType::ProductLaunch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignType::BrandAwareness => "Brand Awareness",
            CampaignType::LeadGeneration => "Lead Generation",
            CampaignType::SalesConversion => "Sales Conversion",
            CampaignType::Retargeting => "Retargeting",
            CampaignType::ProductLaunch => "Product Launch",
        }
    }

    pub fn objectives(&self) -> &'static [&'static str] {
        match self {
            CampaignType::BrandAwareness => &["Reach", "Impressions", "Video Views"],
            CampaignType::LeadGeneration => &["Leads", "Sign-ups", "Downloads"],
            CampaignType::SalesConversion => &["Sales", "Revenue", "ROAS"],
            CampaignType::Retargeting => &["Conversions", "Re-engagement", "Customer Return"],
            CampaignType::ProductLaunch => &["Awareness", "Trial", "Early Adopters"],
        }
    }

    /// Only conversion-oriented campaigns book revenue.
    pub fn books_revenue(&self) -> bool {
        matches!(
            self,
            CampaignType::SalesConversion | CampaignType::Retargeting
        )
    }

    pub fn daily_budget_range(&self) -> (f64, f64) {
        match self {
            CampaignType::ProductLaunch => (500.0, 2000.0),
            CampaignType::BrandAwareness => (300.0, 1500.0),
            _ => (100.0, 800.0),
        }
    }
}

impl std::fmt::Display for CampaignType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Channel {
    #[serde(rename = "Google Ads")]
    GoogleAds,
    #[serde(rename = "Facebook Ads")]
    FacebookAds,
    #[serde(rename = "Instagram Ads")]
    InstagramAds,
    #[serde(rename = "TikTok Ads")]
    TikTokAds,
    #[serde(rename = "YouTube Ads")]
    YouTubeAds,
    #[serde(rename = "LinkedIn Ads")]
    LinkedInAds,
    #[serde(rename = "Email Marketing")]
    EmailMarketing,
    #[serde(rename = "Influencer Marketing")]
    InfluencerMarketing,
}

/// Channel economics: cost-per-click and conversion-rate ranges.
#[derive(Debug, Clone, Copy)]
pub struct ChannelRates {
    pub cost_per_click: (f64, f64),
    pub conversion_rate: (f64, f64),
}

impl Channel {
    pub const ALL: [Channel; 8] = [
        Channel::GoogleAds,
        Channel::FacebookAds,
        Channel::InstagramAds,
        Channel::TikTokAds,
        Channel::YouTubeAds,
        Channel::LinkedInAds,
        Channel::EmailMarketing,
        Channel::InfluencerMarketing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::GoogleAds => "Google Ads",
            Channel::FacebookAds => "Facebook Ads",
            Channel::InstagramAds => "Instagram Ads",
            Channel::TikTokAds => "TikTok Ads",
            Channel::YouTubeAds => "YouTube Ads",
            Channel::LinkedInAds => "LinkedIn Ads",
            Channel::EmailMarketing => "Email Marketing",
            Channel::InfluencerMarketing => "Influencer Marketing",
        }
    }

    pub fn rates(&self) -> ChannelRates {
        let (cost_per_click, conversion_rate) = match self {
            Channel::GoogleAds => ((0.5, 3.0), (0.02, 0.08)),
            Channel::FacebookAds => ((0.3, 2.5), (0.015, 0.06)),
            Channel::InstagramAds => ((0.4, 2.8), (0.018, 0.07)),
            Channel::TikTokAds => ((0.2, 2.0), (0.01, 0.05)),
            Channel::YouTubeAds => ((0.6, 3.5), (0.025, 0.09)),
            Channel::LinkedInAds => ((1.0, 5.0), (0.03, 0.12)),
            Channel::EmailMarketing => ((0.1, 0.5), (0.05, 0.15)),
            Channel::InfluencerMarketing => ((2.0, 10.0), (0.04, 0.15)),
        };
        ChannelRates {
            cost_per_click,
            conversion_rate,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CampaignStatus {
    Completed,
    Active,
    Scheduled,
}

impl CampaignStatus {
    /// Status relative to `reference`: past, running, or upcoming.
    pub fn at(start: NaiveDate, end: NaiveDate, reference: NaiveDate) -> Self {
        if end < reference {
            CampaignStatus::Completed
        } else if start <= reference {
            CampaignStatus::Active
        } else {
            CampaignStatus::Scheduled
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub campaign_id: String,
    pub campaign_name: String,
    pub campaign_type: CampaignType,
    pub channel: Channel,
    pub objective: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
    pub daily_budget: f64,
    pub total_budget: f64,
    pub total_impressions: i64,
    pub total_clicks: i64,
    pub total_conversions: i64,
    pub total_revenue: f64,
    pub avg_cpc: f64,
    pub cost_per_conversion: f64,
    pub conversion_rate: f64,
    pub roas: f64,
    pub status: CampaignStatus,
    pub uses_ai_optimization: bool,
    pub is_sustainable_focused: bool,
    pub targets_gen_z: bool,
    pub created_at: NaiveDateTime,
}
