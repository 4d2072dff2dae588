//! Seeded train/test split.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Seed used by the evaluation and training commands.
pub const DEFAULT_SEED: u64 = 42;
/// Fraction of rows held out for evaluation.
pub const DEFAULT_TEST_RATIO: f64 = 0.2;

/// Train and held-out partitions of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplit<T> {
    pub train: Vec<T>,
    pub test: Vec<T>,
}

/// Shuffle `data` with a seeded RNG and hold out `ceil(len * test_ratio)` rows.
///
/// The same `data`, `test_ratio`, and `seed` always produce the same split.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "row counts are far below f64 precision limits"
)]
pub fn train_test_split<T: Clone>(data: &[T], test_ratio: f64, seed: u64) -> DatasetSplit<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..data.len()).collect();
    indices.shuffle(&mut rng);

    let test_size = ((data.len() as f64) * test_ratio.clamp(0.0, 1.0)).ceil() as usize;
    let (test_indices, train_indices) = indices.split_at(test_size.min(data.len()));

    let pick = |idx: &[usize]| idx.iter().map(|&i| data[i].clone()).collect::<Vec<_>>();
    DatasetSplit {
        train: pick(train_indices),
        test: pick(test_indices),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10, 0.2, 2)]
    #[case(11, 0.2, 3)]
    #[case(5110, 0.2, 1022)]
    #[case(3, 0.0, 0)]
    fn holds_out_ceiling_of_ratio(
        #[case] len: usize,
        #[case] ratio: f64,
        #[case] expected_test: usize,
    ) {
        let data: Vec<usize> = (0..len).collect();
        let split = train_test_split(&data, ratio, DEFAULT_SEED);
        assert_eq!(split.test.len(), expected_test);
        assert_eq!(split.train.len(), len - expected_test);
    }

    #[rstest]
    fn same_seed_gives_same_split() {
        let data: Vec<usize> = (0..100).collect();
        let first = train_test_split(&data, DEFAULT_TEST_RATIO, DEFAULT_SEED);
        let second = train_test_split(&data, DEFAULT_TEST_RATIO, DEFAULT_SEED);
        assert_eq!(first, second);
    }

    #[rstest]
    fn partitions_are_disjoint_and_complete() {
        let data: Vec<usize> = (0..50).collect();
        let split = train_test_split(&data, DEFAULT_TEST_RATIO, 7);
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, data);
    }
}
