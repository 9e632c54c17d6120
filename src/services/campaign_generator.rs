use crate::config::validate_count;
use crate::error::AppResult;
use crate::models::{Campaign, CampaignStatus, CampaignType, Channel};
use crate::utils::{Quarter, midnight, pick, producer_rng, round_to, round2, year_start};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

pub const PRODUCER: &str = "marketing_campaigns";

const MAX_START_OFFSET_DAYS: i64 = 300;
const DURATION_DAYS: (i64, i64) = (7, 90);
const CLICK_THROUGH_RATE: (f64, f64) = (0.01, 0.05);
const ORDER_VALUE: (f64, f64) = (80.0, 300.0);
const AI_OPTIMIZATION_PROBABILITY: f64 = 0.6;
const SUSTAINABLE_PROBABILITY: f64 = 0.3;
const GEN_Z_PROBABILITY: f64 = 0.5;
const PROGRESS_EVERY: usize = 10;

pub struct MarketingCampaignGenerator {
    rng: ChaCha8Rng,
    year: i32,
    reference_date: NaiveDate,
}

impl MarketingCampaignGenerator {
    /// `reference_date` decides each campaign's status; pass a fixed date
    /// for reproducible output.
    pub fn new(seed: u64, year: i32, reference_date: NaiveDate) -> Self {
        Self {
            rng: producer_rng(seed, PRODUCER),
            year,
            reference_date,
        }
    }

    pub fn generate(&mut self, count: i64) -> AppResult<Vec<Campaign>> {
        let count = validate_count(PRODUCER, count)?;
        log::info!(
            "Generating {count} marketing campaigns for {} (status as of {})",
            self.year,
            self.reference_date
        );

        let first_day = year_start(self.year)?;
        let mut campaigns = Vec::with_capacity(count);
        for i in 0..count {
            campaigns.push(self.campaign(i, first_day));
            if (i + 1) % PROGRESS_EVERY == 0 {
                log::debug!("  generated {} campaigns", i + 1);
            }
        }
        Ok(campaigns)
    }

    fn campaign(&mut self, index: usize, first_day: NaiveDate) -> Campaign {
        let rng = &mut self.rng;
        let year = self.year;

        let campaign_type = *pick(rng, &CampaignType::ALL);
        let channel = *pick(rng, &Channel::ALL);
        let objective = *pick(rng, campaign_type.objectives());
        let campaign_name = campaign_name(rng, year, campaign_type, channel, objective);

        let start_date = first_day + Duration::days(rng.gen_range(0..=MAX_START_OFFSET_DAYS));
        let duration_days = rng.gen_range(DURATION_DAYS.0..=DURATION_DAYS.1);
        let end_date = start_date + Duration::days(duration_days);

        let (budget_min, budget_max) = campaign_type.daily_budget_range();
        let daily_budget = rng.gen_range(budget_min..budget_max);
        let total_budget = round2(daily_budget * duration_days as f64);

        let rates = channel.rates();
        let avg_cpc = rng.gen_range(rates.cost_per_click.0..rates.cost_per_click.1);
        let conversion_rate = rng.gen_range(rates.conversion_rate.0..rates.conversion_rate.1);

        let clicks = (total_budget / avg_cpc).floor();
        let ctr = rng.gen_range(CLICK_THROUGH_RATE.0..CLICK_THROUGH_RATE.1);
        let total_impressions = (clicks / ctr).floor() as i64;
        let conversions = (clicks * conversion_rate).floor();

        let revenue = if campaign_type.books_revenue() {
            conversions * rng.gen_range(ORDER_VALUE.0..ORDER_VALUE.1)
        } else {
            0.0
        };

        let multiplier = Quarter::of(start_date).campaign_performance();
        let total_clicks = (clicks * multiplier).floor() as i64;
        let total_conversions = (conversions * multiplier).floor() as i64;
        let total_revenue = round2(revenue * multiplier);

        let cost_per_conversion = if total_conversions > 0 {
            round2(total_budget / total_conversions as f64)
        } else {
            0.0
        };
        let roas = if campaign_type.books_revenue() && total_budget > 0.0 {
            round2(total_revenue / total_budget)
        } else {
            0.0
        };

        let uses_ai_optimization = rng.gen_bool(AI_OPTIMIZATION_PROBABILITY);
        let is_sustainable_focused = rng.gen_bool(SUSTAINABLE_PROBABILITY);
        let targets_gen_z = rng.gen_bool(GEN_Z_PROBABILITY);

        Campaign {
            campaign_id: format!("CAMP-{year}-{:04}", index + 1),
            campaign_name,
            campaign_type,
            channel,
            objective: objective.to_string(),
            start_date,
            end_date,
            duration_days,
            daily_budget: round2(daily_budget),
            total_budget,
            total_impressions,
            total_clicks,
            total_conversions,
            total_revenue,
            avg_cpc: round_to(avg_cpc, 3),
            cost_per_conversion,
            conversion_rate: round_to(conversion_rate, 4),
            roas,
            status: CampaignStatus::at(start_date, end_date, self.reference_date),
            uses_ai_optimization,
            is_sustainable_focused,
            targets_gen_z,
            created_at: midnight(first_day),
        }
    }
}

fn campaign_name<R: Rng + ?Sized>(
    rng: &mut R,
    year: i32,
    campaign_type: CampaignType,
    channel: Channel,
    objective: &str,
) -> String {
    let quarter = rng.gen_range(1..=4);
    match rng.gen_range(0..4) {
        0 => format!("{year} {campaign_type} - {channel}"),
        1 => format!("Spring {year} {objective} Campaign"),
        2 => format!("Q{quarter} {year} {channel} Drive"),
        _ => format!("New Year {year} {campaign_type}"),
    }
}

pub fn log_summary(campaigns: &[Campaign]) {
    let budget: f64 = campaigns.iter().map(|c| c.total_budget).sum();
    let revenue: f64 = campaigns.iter().map(|c| c.total_revenue).sum();
    let roas = if budget > 0.0 { revenue / budget } else { 0.0 };
    log::info!(
        "Campaigns summary: total={} budget=${budget:.2} revenue=${revenue:.2} roas={roas:.2}",
        campaigns.len()
    );
    let mut by_channel: BTreeMap<&str, usize> = BTreeMap::new();
    for c in campaigns {
        *by_channel.entry(c.channel.as_str()).or_default() += 1;
    }
    for (channel, n) in by_channel {
        log::info!("  {channel}: {n}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_brand_awareness_books_no_revenue() {
        let mut generator = MarketingCampaignGenerator::new(2025, 2025, reference());
        let campaigns = generator.generate(500).unwrap();
        let awareness: Vec<_> = campaigns
            .iter()
            .filter(|c| c.campaign_type == CampaignType::BrandAwareness)
            .collect();
        assert!(!awareness.is_empty());
        for c in awareness {
            assert_eq!(c.total_revenue, 0.0);
            assert_eq!(c.roas, 0.0);
        }
    }

    #[test]
    fn test_derived_metrics_are_consistent() {
        let mut generator = MarketingCampaignGenerator::new(3, 2025, reference());
        for c in generator.generate(300).unwrap() {
            assert_eq!(c.campaign_id.len(), "CAMP-2025-0001".len());
            assert!((7..=90).contains(&c.duration_days));
            assert_eq!((c.end_date - c.start_date).num_days(), c.duration_days);
            assert!(c.campaign_type.objectives().contains(&c.objective.as_str()));
            if c.total_conversions > 0 {
                assert_eq!(
                    c.cost_per_conversion,
                    round2(c.total_budget / c.total_conversions as f64)
                );
            } else {
                assert_eq!(c.cost_per_conversion, 0.0);
            }
            assert!(c.total_impressions >= c.total_clicks || c.total_clicks == 0);
            assert_eq!(
                c.status,
                CampaignStatus::at(c.start_date, c.end_date, reference())
            );
        }
    }

    #[test]
    fn test_quarter_multiplier_scales_clicks_and_conversions() {
        let mut generator = MarketingCampaignGenerator::new(21, 2025, reference());
        let mut quarters = HashSet::new();
        for c in generator.generate(400).unwrap() {
            let base_clicks = c.total_budget / c.avg_cpc;
            if base_clicks < 500.0 {
                continue;
            }
            let quarter = Quarter::of(c.start_date);
            let multiplier = quarter.campaign_performance();
            let clicks_ratio = c.total_clicks as f64 / base_clicks;
            assert!(
                (clicks_ratio - multiplier).abs() < 0.02,
                "{}: {clicks_ratio} vs {multiplier}",
                c.campaign_id
            );

            let base_conversions = base_clicks * c.conversion_rate;
            if base_conversions >= 500.0 {
                let ratio = c.total_conversions as f64 / base_conversions;
                assert!((ratio - multiplier).abs() < 0.03, "{}: {ratio}", c.campaign_id);
            }
            quarters.insert(quarter);
        }
        assert_eq!(quarters.len(), 4);
    }

    #[test]
    fn test_roas_matches_revenue_over_budget() {
        let mut generator = MarketingCampaignGenerator::new(13, 2025, reference());
        for c in generator.generate(300).unwrap() {
            if c.campaign_type.books_revenue() {
                assert_eq!(c.roas, round2(c.total_revenue / c.total_budget));
                if c.total_conversions > 0 {
                    assert!(c.total_revenue > 0.0);
                }
            } else {
                assert_eq!(c.roas, 0.0);
            }
        }
    }

    #[test]
    fn test_status_depends_only_on_reference_date() {
        let early = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let late = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let scheduled = MarketingCampaignGenerator::new(8, 2025, early)
            .generate(20)
            .unwrap();
        let completed = MarketingCampaignGenerator::new(8, 2025, late)
            .generate(20)
            .unwrap();
        assert!(scheduled.iter().all(|c| c.status == CampaignStatus::Scheduled));
        assert!(completed.iter().all(|c| c.status == CampaignStatus::Completed));
        // everything else is identical
        for (a, b) in scheduled.iter().zip(&completed) {
            assert_eq!(a.total_budget, b.total_budget);
            assert_eq!(a.campaign_name, b.campaign_name);
        }
    }
}
