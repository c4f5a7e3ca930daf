//! k-fold splitting for cross-validation.
//!
//! Without a seed the folds are contiguous runs of the dataset order; the
//! first `n % k` folds hold one extra instance.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{EvaluationError, EvaluationResult};

/// Train/test indices of one fold, both ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KFold {
    instances: usize,
    folds: usize,
    seed: Option<u64>,
}

impl KFold {
    pub fn new(instances: usize, folds: usize) -> EvaluationResult<Self> {
        if folds < 2 {
            return Err(EvaluationError::TooFewFolds(folds));
        }
        if instances == 0 {
            return Err(EvaluationError::EmptyDataset);
        }
        if folds > instances {
            return Err(EvaluationError::TooManyFolds { folds, instances });
        }
        Ok(Self {
            instances,
            folds,
            seed: None,
        })
    }

    /// Shuffle instances with a seeded RNG before splitting.
    pub fn with_shuffle(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn folds(&self) -> usize {
        self.folds
    }

    pub fn splits(&self) -> Vec<Fold> {
        let mut order: Vec<usize> = (0..self.instances).collect();
        if let Some(seed) = self.seed {
            order.shuffle(&mut StdRng::seed_from_u64(seed));
        }

        let base = self.instances / self.folds;
        let extra = self.instances % self.folds;
        let mut start = 0;
        (0..self.folds)
            .map(|k| {
                let size = base + usize::from(k < extra);
                let end = start + size;
                let mut test = order[start..end].to_vec();
                let mut train: Vec<usize> = order[..start]
                    .iter()
                    .chain(&order[end..])
                    .copied()
                    .collect();
                test.sort_unstable();
                train.sort_unstable();
                start = end;
                Fold { train, test }
            })
            .collect()
    }
}
