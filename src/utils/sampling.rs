use crate::error::{AppError, AppResult};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;
use rand_distr::{Distribution, Normal};

/// Parameters for a normal draw clamped from below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalSpec {
    pub mean: f64,
    pub std_dev: f64,
    pub floor: f64,
}

impl NormalSpec {
    pub const fn new(mean: f64, std_dev: f64, floor: f64) -> Self {
        Self {
            mean,
            std_dev,
            floor,
        }
    }
}

pub fn sample_clamped<R: Rng + ?Sized>(rng: &mut R, params: NormalSpec) -> AppResult<f64> {
    let normal = Normal::new(params.mean, params.std_dev)
        .map_err(|e| AppError::Distribution(format!("normal({}, {}): {e}", params.mean, params.std_dev)))?;
    Ok(normal.sample(rng).max(params.floor))
}

/// Round to cents.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Uniform date in `[start, end]`, both inclusive.
pub fn uniform_date<R: Rng + ?Sized>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    if end <= start {
        return start;
    }
    let span = (end - start).num_days();
    start + Duration::days(rng.gen_range(0..=span))
}

pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    // callers only pass non-empty static tables
    &items[rng.gen_range(0..items.len())]
}

/// `amount` distinct elements, in draw order.
pub fn pick_distinct<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T], amount: usize) -> Vec<T> {
    items
        .choose_multiple(rng, amount.min(items.len()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_sample_clamped_respects_floor() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let params = NormalSpec::new(0.0, 10.0, 1.0);
        for _ in 0..1_000 {
            assert!(sample_clamped(&mut rng, params).unwrap() >= 1.0);
        }
    }

    #[test]
    fn test_sample_clamped_rejects_bad_sd() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(sample_clamped(&mut rng, NormalSpec::new(0.0, f64::NAN, 0.0)).is_err());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.345_6), 12.35);
        assert_eq!(round2(0.004), 0.0);
        assert_eq!(round_to(0.123_456, 4), 0.1235);
    }

    #[test]
    fn test_uniform_date_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        for _ in 0..500 {
            let d = uniform_date(&mut rng, start, end);
            assert!(d >= start && d <= end);
        }
        assert_eq!(uniform_date(&mut rng, end, start), end);
    }

    #[test]
    fn test_pick_distinct_has_no_duplicates() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let items = [1, 2, 3, 4, 5, 6];
        for amount in 1..=3 {
            let mut picked = pick_distinct(&mut rng, &items, amount);
            assert_eq!(picked.len(), amount);
            picked.sort();
            picked.dedup();
            assert_eq!(picked.len(), amount);
        }
    }
}
