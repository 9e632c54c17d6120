use crate::config::validate_count;
use crate::error::AppResult;
use crate::models::{Category, Customer, PreferredCategories, Segment};
use crate::utils::names::{COUNTRIES, CountryProfile, EMAIL_DOMAINS, email_address};
use crate::utils::{
    NormalSpec, WeightedChoice, pick, pick_distinct, producer_rng, round_to, round2,
    sample_clamped, uniform_date, year_end, year_start,
};
use chrono::NaiveDate;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

pub const PRODUCER: &str = "customers";

/// Behavioural distribution parameters for one segment.
#[derive(Debug, Clone, Copy)]
pub struct SegmentProfile {
    pub segment: Segment,
    pub weight: f64,
    pub lifetime_value: NormalSpec,
    pub avg_order_value: NormalSpec,
    pub order_frequency: NormalSpec,
}

pub const SEGMENT_PROFILES: [SegmentProfile; 4] = [
    SegmentProfile {
        segment: Segment::Premium,
        weight: 0.15,
        lifetime_value: NormalSpec::new(5000.0, 1500.0, 0.0),
        avg_order_value: NormalSpec::new(300.0, 80.0, 10.0),
        order_frequency: NormalSpec::new(8.0, 2.0, 1.0),
    },
    SegmentProfile {
        segment: Segment::Regular,
        weight: 0.45,
        lifetime_value: NormalSpec::new(1500.0, 500.0, 0.0),
        avg_order_value: NormalSpec::new(120.0, 40.0, 10.0),
        order_frequency: NormalSpec::new(4.0, 1.0, 1.0),
    },
    SegmentProfile {
        segment: Segment::Budget,
        weight: 0.30,
        lifetime_value: NormalSpec::new(400.0, 150.0, 0.0),
        avg_order_value: NormalSpec::new(60.0, 20.0, 10.0),
        order_frequency: NormalSpec::new(2.0, 0.5, 1.0),
    },
    SegmentProfile {
        segment: Segment::Enterprise,
        weight: 0.10,
        lifetime_value: NormalSpec::new(15000.0, 5000.0, 0.0),
        avg_order_value: NormalSpec::new(800.0, 200.0, 10.0),
        order_frequency: NormalSpec::new(12.0, 3.0, 1.0),
    },
];

const VIP_PROBABILITY: f64 = 0.3;
const NEWSLETTER_PROBABILITY: f64 = 0.7;
const MOBILE_APP_PROBABILITY: f64 = 0.6;
const PROGRESS_EVERY: usize = 1000;

pub struct CustomerGenerator {
    rng: ChaCha8Rng,
    year: i32,
    segments: WeightedChoice<SegmentProfile>,
    countries: WeightedChoice<&'static CountryProfile>,
}

impl CustomerGenerator {
    pub fn new(seed: u64, year: i32) -> AppResult<Self> {
        Ok(Self {
            rng: producer_rng(seed, PRODUCER),
            year,
            segments: WeightedChoice::new(SEGMENT_PROFILES.iter().map(|p| (*p, p.weight)))?,
            countries: WeightedChoice::new(COUNTRIES.iter().map(|c| (c, c.weight)))?,
        })
    }

    /// Exactly `count` customers; `count <= 0` is rejected before sampling.
    pub fn generate(&mut self, count: i64) -> AppResult<Vec<Customer>> {
        let count = validate_count(PRODUCER, count)?;
        log::info!("Generating {count} customers for {}", self.year);

        let first_day = year_start(self.year - 2)?;
        let last_day = year_end(self.year)?;

        let mut customers = Vec::with_capacity(count);
        for i in 0..count {
            customers.push(self.customer(i, first_day, last_day)?);
            if (i + 1) % PROGRESS_EVERY == 0 {
                log::debug!("  generated {} customers", i + 1);
            }
        }
        Ok(customers)
    }

    fn customer(&mut self, index: usize, first_day: NaiveDate, last_day: NaiveDate) -> AppResult<Customer> {
        let rng = &mut self.rng;

        let country = *self.countries.sample(rng);
        let first_name = pick(rng, country.locale.first_names()).to_string();
        let last_name = pick(rng, country.locale.last_names()).to_string();
        let email = email_address(&first_name, &last_name, *pick(rng, &EMAIL_DOMAINS));
        let city = pick(rng, country.cities).to_string();
        let created_at = uniform_date(rng, first_day, last_day);

        let profile = *self.segments.sample(rng);
        let lifetime_value = sample_clamped(rng, profile.lifetime_value)?;
        let avg_order_value = sample_clamped(rng, profile.avg_order_value)?;
        let order_frequency = sample_clamped(rng, profile.order_frequency)?;

        let how_many = rng.gen_range(1..=3);
        let preferred = pick_distinct(rng, &Category::ALL, how_many);

        let is_vip = profile.segment.is_vip_eligible() && rng.gen_bool(VIP_PROBABILITY);
        let newsletter_subscriber = rng.gen_bool(NEWSLETTER_PROBABILITY);
        let mobile_app_user = rng.gen_bool(MOBILE_APP_PROBABILITY);
        let last_active_date = uniform_date(rng, created_at, last_day);

        Ok(Customer {
            customer_id: format!("CUST-{}-{:06}", self.year, index + 1),
            first_name,
            last_name,
            email,
            country: country.code.to_string(),
            city,
            created_at,
            customer_segment: profile.segment,
            lifetime_value: round2(lifetime_value),
            avg_order_value: round2(avg_order_value),
            order_frequency: round_to(order_frequency, 1),
            preferred_categories: PreferredCategories(preferred),
            is_vip,
            newsletter_subscriber,
            mobile_app_user,
            last_active_date,
        })
    }
}

pub fn log_summary(customers: &[Customer]) {
    let total = customers.len();
    log::info!("Customers summary: total={total}");
    let mut by_segment: BTreeMap<Segment, usize> = BTreeMap::new();
    for c in customers {
        *by_segment.entry(c.customer_segment).or_default() += 1;
    }
    for segment in Segment::ALL {
        let n = by_segment.get(&segment).copied().unwrap_or(0);
        log::info!(
            "  {segment}: {n} ({:.1}%)",
            100.0 * n as f64 / total.max(1) as f64
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_generates_exact_count() {
        let mut generator = CustomerGenerator::new(2025, 2025).unwrap();
        let customers = generator.generate(37).unwrap();
        assert_eq!(customers.len(), 37);
        assert_eq!(customers[0].customer_id, "CUST-2025-000001");
        assert_eq!(customers[36].customer_id, "CUST-2025-000037");
    }

    #[test]
    fn test_rejects_non_positive_count() {
        let mut generator = CustomerGenerator::new(2025, 2025).unwrap();
        assert!(matches!(
            generator.generate(0),
            Err(AppError::ValidationError(_))
        ));
        assert!(generator.generate(-5).is_err());
    }

    #[test]
    fn test_attribute_floors_and_flags() {
        let mut generator = CustomerGenerator::new(7, 2025).unwrap();
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        for c in generator.generate(2_000).unwrap() {
            assert!(c.lifetime_value >= 0.0);
            assert!(c.avg_order_value >= 10.0);
            assert!(c.order_frequency >= 1.0);
            let prefs = c.preferred_categories.as_slice();
            assert!((1..=3).contains(&prefs.len()));
            let mut dedup = prefs.to_vec();
            dedup.sort();
            dedup.dedup();
            assert_eq!(dedup.len(), prefs.len());
            if c.is_vip {
                assert!(c.customer_segment.is_vip_eligible());
            }
            assert!(c.created_at >= start && c.created_at <= end);
            assert!(c.last_active_date >= c.created_at && c.last_active_date <= end);
            assert!(c.email.contains('@'));
        }
    }

    #[test]
    fn test_segment_distribution_within_tolerance() {
        let mut generator = CustomerGenerator::new(2025, 2025).unwrap();
        let customers = generator.generate(10_000).unwrap();
        for profile in SEGMENT_PROFILES {
            let n = customers
                .iter()
                .filter(|c| c.customer_segment == profile.segment)
                .count();
            let share = n as f64 / customers.len() as f64;
            assert!(
                (share - profile.weight).abs() < 0.02,
                "{}: {share}",
                profile.segment
            );
        }
    }

    #[test]
    fn test_same_seed_same_customers() {
        let a = CustomerGenerator::new(99, 2025).unwrap().generate(50).unwrap();
        let b = CustomerGenerator::new(99, 2025).unwrap().generate(50).unwrap();
        let c = CustomerGenerator::new(100, 2025).unwrap().generate(50).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
