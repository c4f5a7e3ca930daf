//! Per-sensor evidence sources.
//!
//! An [`EvidenceSource`] models "given that this sensor last changed `t`
//! seconds ago, which action follows?" as co-occurrence counts over elapsed
//! time bins. Counts are written only while fitting; predictions read them.

use std::sync::Arc;

use crate::belief::{ActionSet, MassFunction};
use crate::binning::Bins;
use crate::error::{Error, Result};
use crate::matrix::LabeledMatrix;

#[derive(Debug, Clone)]
pub struct EvidenceSource {
    name: String,
    bins: Arc<Bins>,
    /// `counts[bin][action]`
    counts: Vec<Vec<u64>>,
    totals: Vec<u64>,
    min_support: u32,
}

impl EvidenceSource {
    /// Empty source for `actions` target actions.
    ///
    /// `min_support` is clamped to at least 1.
    pub fn new(name: impl Into<String>, bins: Arc<Bins>, actions: usize, min_support: u32) -> Self {
        let n_bins = bins.len();
        Self {
            name: name.into(),
            bins,
            counts: vec![vec![0; actions]; n_bins],
            totals: vec![0; n_bins],
            min_support: min_support.max(1),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bins(&self) -> &Bins {
        &self.bins
    }

    pub fn min_support(&self) -> u32 {
        self.min_support
    }

    /// Bin for an elapsed time, reporting this source's name on failure.
    pub fn bin_of(&self, elapsed: f64) -> Result<usize> {
        self.bins.bin_of(elapsed).map_err(|_| Error::Domain {
            feature: self.name.clone(),
            value: elapsed,
            start: self.bins.start(),
        })
    }

    /// Record one observation of `action` in `bin`.
    ///
    /// An index past the end is a [`Error::Shape`] reporting the number of
    /// bins (or actions) against the count the index would need; nothing is
    /// recorded.
    pub fn accumulate(&mut self, bin: usize, action: usize) -> Result<()> {
        let n_bins = self.totals.len();
        let row = self
            .counts
            .get_mut(bin)
            .ok_or_else(|| Error::shape("bins", n_bins, bin + 1))?;
        let n_actions = row.len();
        let cell = row
            .get_mut(action)
            .ok_or_else(|| Error::shape("actions", n_actions, action + 1))?;
        *cell += 1;
        self.totals[bin] += 1;
        Ok(())
    }

    pub fn count(&self, bin: usize, action: usize) -> u64 {
        self.counts
            .get(bin)
            .and_then(|row| row.get(action))
            .copied()
            .unwrap_or(0)
    }

    /// Observations recorded in `bin` across all actions.
    pub fn total(&self, bin: usize) -> u64 {
        self.totals.get(bin).copied().unwrap_or(0)
    }

    /// Belief mass this source assigns when an instance falls in `bin`.
    ///
    /// With `n` observations in the bin, each action gets its empirical
    /// frequency scaled by `min(1, n / min_support)`; the shortfall goes to
    /// "unknown". An unobserved (or out-of-range) bin yields the vacuous
    /// belief.
    pub fn belief(&self, bin: usize) -> MassFunction {
        let actions = self.counts.first().map_or(0, Vec::len);
        let n = self.total(bin);
        if n == 0 {
            return MassFunction::vacuous(actions);
        }

        let reliability = (n as f64 / f64::from(self.min_support)).min(1.0);
        let scale = reliability / n as f64;
        let masses = self.counts[bin]
            .iter()
            .map(|&c| c as f64 * scale)
            .collect();
        MassFunction::new(masses, 1.0 - reliability)
    }

    /// Raw counts as a bins × actions table, e.g. for plotting which actions
    /// typically follow a change of this sensor.
    pub fn observations(&self, actions: &ActionSet) -> LabeledMatrix<u64> {
        let rows: Vec<String> = self.bins.iter().map(|b| b.to_string()).collect();
        let mut table = LabeledMatrix::zeros(rows, actions.labels().to_vec());
        for (bin, row) in self.counts.iter().enumerate() {
            for (action, &count) in row.iter().enumerate() {
                if let Some(cell) = table.get_mut(bin, action) {
                    *cell = count;
                }
            }
        }
        table
    }
}
