//! Seeded, stratified train/test splitting.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Row indices of a train/test split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split sample indices so each class is represented proportionally.
///
/// Each class contributes `round(count * test_size)` rows to the test set,
/// capped so that at least one row stays in the training set. Rows are
/// shuffled with a generator seeded by `seed`, so the split is
/// reproducible. Output index lists are sorted.
pub fn stratified_split(labels: &[usize], test_size: f64, seed: u64) -> TrainTestSplit {
    let n_classes = labels.iter().max().map_or(0, |m| m + 1);
    let mut by_class: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
    for (row, &label) in labels.iter().enumerate() {
        by_class[label].push(row);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();

    for mut rows in by_class.into_iter().filter(|rows| !rows.is_empty()) {
        rows.shuffle(&mut rng);
        let n_test = ((rows.len() as f64 * test_size).round() as usize).min(rows.len() - 1);
        test.extend_from_slice(&rows[..n_test]);
        train.extend_from_slice(&rows[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    TrainTestSplit { train, test }
}
