pub mod campaign_generator;
pub mod customer_generator;
pub mod integrity;
pub mod order_generator;
pub mod product_generator;

pub use campaign_generator::MarketingCampaignGenerator;
pub use customer_generator::CustomerGenerator;
pub use integrity::{Dataset, IntegrityReport, Violation, check_dataset};
pub use order_generator::OrderGenerator;
pub use product_generator::ProductCatalogGenerator;
