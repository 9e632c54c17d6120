use crate::error::{AppError, AppResult};
use rand::Rng;

/// Categorical distribution over `items`, sampled by drawing a uniform value
/// in `[0, total)` and binary-searching the cumulative weights.
#[derive(Debug, Clone)]
pub struct WeightedChoice<T> {
    items: Vec<T>,
    cumulative: Vec<f64>,
}

impl<T> WeightedChoice<T> {
    pub fn new(pairs: impl IntoIterator<Item = (T, f64)>) -> AppResult<Self> {
        let mut items = Vec::new();
        let mut cumulative = Vec::new();
        let mut acc = 0.0;

        for (item, weight) in pairs {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AppError::Distribution(format!(
                    "weight must be finite and non-negative, got {weight}"
                )));
            }
            acc += weight;
            items.push(item);
            cumulative.push(acc);
        }

        if items.is_empty() || acc <= 0.0 {
            return Err(AppError::Distribution(
                "weighted choice needs at least one positive weight".into(),
            ));
        }

        Ok(Self { items, cumulative })
    }

    pub fn total_weight(&self) -> f64 {
        // never empty after construction
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let pick = rng.gen_range(0.0..self.total_weight());
        // first bucket whose upper bound exceeds the pick; zero-weight
        // buckets share their bound with the previous one and are skipped
        let idx = self.cumulative.partition_point(|&c| c <= pick);
        idx.min(self.items.len() - 1)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        &self.items[self.sample_index(rng)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rejects_empty_and_zero_weights() {
        assert!(WeightedChoice::<u8>::new(vec![]).is_err());
        assert!(WeightedChoice::new(vec![('a', 0.0), ('b', 0.0)]).is_err());
        assert!(WeightedChoice::new(vec![('a', -1.0), ('b', 2.0)]).is_err());
        assert!(WeightedChoice::new(vec![('a', f64::NAN)]).is_err());
    }

    #[test]
    fn test_zero_weight_item_never_sampled() {
        let choice = WeightedChoice::new(vec![('a', 1.0), ('b', 0.0), ('c', 1.0)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..5_000 {
            assert_ne!(*choice.sample(&mut rng), 'b');
        }
    }

    #[test]
    fn test_proportions_follow_weights() {
        let choice = WeightedChoice::new(vec![(0usize, 0.7), (1, 0.2), (2, 0.1)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut counts = [0usize; 3];
        let n = 20_000;
        for _ in 0..n {
            counts[*choice.sample(&mut rng)] += 1;
        }
        let share = |i: usize| counts[i] as f64 / n as f64;
        assert!((share(0) - 0.7).abs() < 0.02);
        assert!((share(1) - 0.2).abs() < 0.02);
        assert!((share(2) - 0.1).abs() < 0.02);
    }

    #[test]
    fn test_single_item_always_chosen() {
        let choice = WeightedChoice::new(vec![("only", 3.5)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(*choice.sample(&mut rng), "only");
        assert_eq!(choice.total_weight(), 3.5);
    }
}
