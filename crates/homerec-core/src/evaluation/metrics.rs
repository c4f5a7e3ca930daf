//! Quality of ranked recommendations at increasing list lengths.
//!
//! For a cutoff `x`, an instance counts as a hit for its actual action when
//! that action is among the best `x` recommendations. Every other action in
//! the list is a false positive for that action; a missed actual action is a
//! false negative. Per-action precision, recall and F1 are averaged with
//! weights proportional to how often each action actually occurred.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{EvaluationError, EvaluationResult};
use crate::belief::{ActionSet, Belief};
use crate::classifier::Prediction;
use crate::matrix::LabeledMatrix;
use crate::postprocess::best_x_predictions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityMetric {
    Precision,
    Recall,
    F1,
}

impl QualityMetric {
    pub const ALL: [QualityMetric; 3] = [QualityMetric::Precision, QualityMetric::Recall, QualityMetric::F1];
}

impl fmt::Display for QualityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QualityMetric::Precision => "Precision",
            QualityMetric::Recall => "Recall",
            QualityMetric::F1 => "F1",
        })
    }
}

/// Weighted quality at one cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMeasurement {
    pub cutoff: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl QualityMeasurement {
    pub fn get(&self, metric: QualityMetric) -> f64 {
        match metric {
            QualityMetric::Precision => self.precision,
            QualityMetric::Recall => self.recall,
            QualityMetric::F1 => self.f1,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Counts {
    tp: u64,
    fp: u64,
    fn_: u64,
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

pub struct QualityMetricsCalculator<'a> {
    actions: &'a ActionSet,
    /// Actual action index per instance.
    actual: Vec<usize>,
    beliefs: Vec<&'a Belief>,
    /// Occurrences of each action among the actual labels.
    support: Vec<u64>,
}

impl<'a> QualityMetricsCalculator<'a> {
    pub fn new(
        actions: &'a ActionSet,
        actual: &[String],
        predictions: &'a [Prediction],
    ) -> EvaluationResult<Self> {
        Self::from_beliefs(actions, actual, predictions.iter().map(|p| &p.belief).collect())
    }

    /// Score beliefs that were already post-processed, e.g. by a dynamic cutoff.
    pub fn from_beliefs(
        actions: &'a ActionSet,
        actual: &[String],
        beliefs: Vec<&'a Belief>,
    ) -> EvaluationResult<Self> {
        if actual.len() != beliefs.len() {
            return Err(EvaluationError::LengthMismatch {
                predictions: beliefs.len(),
                labels: actual.len(),
            });
        }
        if actual.is_empty() {
            return Err(EvaluationError::EmptyDataset);
        }
        let actual = actual
            .iter()
            .map(|label| actions.require(label))
            .collect::<crate::error::Result<Vec<_>>>()?;
        let mut support = vec![0; actions.len()];
        for &a in &actual {
            support[a] += 1;
        }
        Ok(Self {
            actions,
            actual,
            beliefs,
            support,
        })
    }

    /// Action indices recommended at cutoff `x`; labels outside the
    /// vocabulary are ignored.
    fn recommended(&self, belief: &Belief, x: usize) -> HashSet<usize> {
        best_x_predictions(belief, x)
            .labels()
            .filter_map(|label| self.actions.index_of(label))
            .collect()
    }

    fn counts_at(&self, x: usize) -> Vec<Counts> {
        let mut counts = vec![Counts::default(); self.actions.len()];
        for (&actual, belief) in self.actual.iter().zip(&self.beliefs) {
            let recommended = self.recommended(belief, x);
            if recommended.contains(&actual) {
                counts[actual].tp += 1;
            } else {
                counts[actual].fn_ += 1;
            }
            for &r in recommended.iter().filter(|&&r| r != actual) {
                counts[r].fp += 1;
            }
        }
        counts
    }

    /// Default largest cutoff: the vocabulary size.
    pub fn default_max_cutoff(&self) -> usize {
        self.actions.len()
    }

    pub fn measure(&self, x: usize) -> QualityMeasurement {
        let total = self.actual.len() as f64;
        let mut m = QualityMeasurement {
            cutoff: x,
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
        };
        for (c, &support) in self.counts_at(x).iter().zip(&self.support) {
            if support == 0 {
                continue;
            }
            let weight = support as f64 / total;
            let precision = ratio(c.tp, c.tp + c.fp);
            let recall = ratio(c.tp, c.tp + c.fn_);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            m.precision += weight * precision;
            m.recall += weight * recall;
            m.f1 += weight * f1;
        }
        m
    }

    /// Quality for every cutoff `1..=max_cutoff`.
    pub fn calculate(&self, max_cutoff: Option<usize>) -> Vec<QualityMeasurement> {
        let max = max_cutoff.unwrap_or_else(|| self.default_max_cutoff());
        (1..=max).map(|x| self.measure(x)).collect()
    }

    /// True positives per cutoff (rows) and action (columns).
    pub fn true_positives_for_all(&self, max_cutoff: Option<usize>) -> LabeledMatrix<u64> {
        let max = max_cutoff.unwrap_or_else(|| self.default_max_cutoff());
        let rows = (1..=max).map(|x| x.to_string()).collect();
        let mut table = LabeledMatrix::zeros(rows, self.actions.labels().to_vec());
        for x in 1..=max {
            for (action, c) in self.counts_at(x).iter().enumerate() {
                if let Some(cell) = table.get_mut(x - 1, action) {
                    *cell = c.tp;
                }
            }
        }
        table
    }

    /// How often each actual action (rows) got each top-ranked
    /// recommendation (columns).
    pub fn confusion_matrix(&self) -> LabeledMatrix<u64> {
        let labels = self.actions.labels().to_vec();
        let mut matrix = LabeledMatrix::zeros(labels.clone(), labels);
        for (&actual, belief) in self.actual.iter().zip(&self.beliefs) {
            let top = belief.top().and_then(|(label, _)| self.actions.index_of(label));
            if let Some(cell) = top.and_then(|t| matrix.get_mut(actual, t)) {
                *cell += 1;
            }
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(masses: &[(&str, f64)]) -> Prediction {
        Prediction::from_belief(Belief::from_masses(masses.iter().copied()))
    }

    fn setup() -> (ActionSet, Vec<String>, Vec<Prediction>) {
        let actions = ActionSet::new(["a", "b", "c"]).unwrap();
        let actual = vec!["a".to_string(), "b".to_string(), "a".to_string(), "c".to_string()];
        let predictions = vec![
            prediction(&[("a", 0.6), ("b", 0.3), ("c", 0.1)]),
            prediction(&[("a", 0.5), ("b", 0.4), ("c", 0.1)]),
            prediction(&[("a", 0.7), ("c", 0.2), ("b", 0.1)]),
            prediction(&[("b", 0.5), ("a", 0.3), ("c", 0.2)]),
        ];
        (actions, actual, predictions)
    }

    #[test]
    fn top_one_quality() {
        let (actions, actual, predictions) = setup();
        let calc = QualityMetricsCalculator::new(&actions, &actual, &predictions).unwrap();
        let m = calc.measure(1);
        // a: tp 2, fp 1 -> p 2/3, r 1; b: tp 0, fp 1; c: tp 0
        assert!((m.recall - 0.5).abs() < 1e-12);
        assert!((m.precision - 0.5 * 2.0 / 3.0).abs() < 1e-12);
        assert!((m.f1 - 0.5 * 0.8).abs() < 1e-12);
    }

    #[test]
    fn full_list_has_perfect_recall() {
        let (actions, actual, predictions) = setup();
        let calc = QualityMetricsCalculator::new(&actions, &actual, &predictions).unwrap();
        let all = calc.calculate(None);
        assert_eq!(all.len(), 3);
        assert!((all[2].recall - 1.0).abs() < 1e-12);
        assert!(all.windows(2).all(|w| w[0].recall <= w[1].recall));
    }

    #[test]
    fn true_positives_grow_with_cutoff() {
        let (actions, actual, predictions) = setup();
        let calc = QualityMetricsCalculator::new(&actions, &actual, &predictions).unwrap();
        let tp = calc.true_positives_for_all(Some(2));
        assert_eq!(tp.shape(), (2, 3));
        assert_eq!(tp.at("1", "a"), Some(&2));
        assert_eq!(tp.at("2", "b"), Some(&1));
        assert_eq!(tp.at("2", "c"), Some(&0));
    }

    #[test]
    fn confusion_matrix_counts_top_one() {
        let (actions, actual, predictions) = setup();
        let calc = QualityMetricsCalculator::new(&actions, &actual, &predictions).unwrap();
        let m = calc.confusion_matrix();
        assert_eq!(m.at("a", "a"), Some(&2));
        assert_eq!(m.at("b", "a"), Some(&1));
        assert_eq!(m.at("c", "b"), Some(&1));
        let total: u64 = m.rows().flat_map(|(_, r)| r.iter()).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn rejects_mismatched_and_unknown_labels() {
        let (actions, actual, predictions) = setup();
        assert!(matches!(
            QualityMetricsCalculator::new(&actions, &actual[..2], &predictions),
            Err(EvaluationError::LengthMismatch { .. })
        ));
        let bogus = vec!["z".to_string(); 4];
        assert!(matches!(
            QualityMetricsCalculator::new(&actions, &bogus, &predictions),
            Err(EvaluationError::Core(_))
        ));
        assert_eq!(
            QualityMetricsCalculator::new(&actions, &[], &[]).err(),
            Some(EvaluationError::EmptyDataset)
        );
    }
}
