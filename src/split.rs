use crate::parse::{Label, Sample};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct Split {
    pub train: Vec<Sample>,
    pub test: Vec<Sample>,
}

/// Partitions `samples` so both sides keep the class proportions of the
/// whole set. The same `seed` always yields the same partition.
///
/// The test side receives `ceil(test_ratio * n)` rows, shared between the
/// classes by largest remainder. A class with at least two rows always keeps
/// one row on each side.
pub fn stratified_split(samples: &[Sample], test_ratio: f64, seed: u64) -> Split {
    let mut class_buckets: BTreeMap<Label, Vec<usize>> = BTreeMap::new();
    for (index, sample) in samples.iter().enumerate() {
        class_buckets.entry(sample.label).or_default().push(index);
    }

    let test_counts = allocate_test_rows(&class_buckets, samples.len(), test_ratio);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut test_indices = Vec::new();

    for (label, indices) in &mut class_buckets {
        indices.shuffle(&mut rng);
        let count = test_counts.get(label).copied().unwrap_or(0);
        test_indices.extend_from_slice(&indices[..count]);
    }

    test_indices.sort_unstable();

    let mut split = Split::default();
    let mut test_iter = test_indices.iter().peekable();
    for (index, sample) in samples.iter().enumerate() {
        if test_iter.next_if(|&&test_index| test_index == index).is_some() {
            split.test.push(*sample);
        } else {
            split.train.push(*sample);
        }
    }

    split
}

fn allocate_test_rows(
    class_buckets: &BTreeMap<Label, Vec<usize>>,
    total: usize,
    test_ratio: f64,
) -> BTreeMap<Label, usize> {
    if total == 0 {
        return BTreeMap::new();
    }

    let test_ratio = test_ratio.clamp(0.0, 1.0);

    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    let test_total = ((total as f64 * test_ratio).ceil() as usize).min(total);

    let mut counts = BTreeMap::new();
    let mut remainders = Vec::new();
    let mut assigned = 0;

    for (&label, indices) in class_buckets {
        let exact = test_total as f64 * indices.len() as f64 / total as f64;

        #[allow(clippy::cast_possible_truncation)]
        #[allow(clippy::cast_sign_loss)]
        let floor = exact.floor() as usize;

        counts.insert(label, floor);
        remainders.push((label, exact - floor as f64));
        assigned += floor;
    }

    remainders.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (label, _) in remainders.into_iter().take(test_total.saturating_sub(assigned)) {
        if let Some(count) = counts.get_mut(&label) {
            *count += 1;
        }
    }

    if test_ratio > 0.0 && test_ratio < 1.0 {
        for (label, indices) in class_buckets {
            let size = indices.len();
            if let Some(count) = counts.get_mut(label) {
                if size >= 2 {
                    *count = (*count).clamp(1, size - 1);
                }
            }
        }
    }

    counts
}
