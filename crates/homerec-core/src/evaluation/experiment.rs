//! Cross-validated comparison of recommenders.
//!
//! Every classifier is trained and tested on the same folds. Quality is
//! measured at every cutoff and runtime in milliseconds; both are summarized
//! over folds as mean, standard deviation and confidence interval.

use std::fmt;
use std::time::Instant;

use chrono::{DateTime, Utc};
use homerec_config::EvaluationConfig;
use homerec_math::Summary;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::folds::KFold;
use super::metrics::{QualityMeasurement, QualityMetric, QualityMetricsCalculator};
use super::stats::{format_interval, Statistic};
use super::{EvaluationError, EvaluationResult};
use crate::classifier::Recommender;
use crate::dataset::Dataset;
use crate::logging::{event_names, generate_run_id};
use crate::matrix::LabeledMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuntimeMetric {
    TrainingTime,
    OverallTestingTime,
    IndividualTestingTime,
}

impl RuntimeMetric {
    pub const ALL: [RuntimeMetric; 3] = [
        RuntimeMetric::TrainingTime,
        RuntimeMetric::OverallTestingTime,
        RuntimeMetric::IndividualTestingTime,
    ];
}

impl fmt::Display for RuntimeMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RuntimeMetric::TrainingTime => "Training time",
            RuntimeMetric::OverallTestingTime => "Overall testing time",
            RuntimeMetric::IndividualTestingTime => "Individual testing time",
        })
    }
}

/// Milliseconds measured on one fold.
#[derive(Debug, Clone, Copy)]
struct RuntimeMeasurement {
    training_ms: f64,
    testing_ms: f64,
    per_instance_ms: f64,
}

/// Quality at one cutoff, summarized over folds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutoffQuality {
    pub cutoff: usize,
    pub precision: Summary,
    pub recall: Summary,
    pub f1: Summary,
}

impl CutoffQuality {
    pub fn get(&self, metric: QualityMetric) -> &Summary {
        match metric {
            QualityMetric::Precision => &self.precision,
            QualityMetric::Recall => &self.recall,
            QualityMetric::F1 => &self.f1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuntimeSummary {
    pub training: Summary,
    pub overall_testing: Summary,
    pub individual_testing: Summary,
}

impl RuntimeSummary {
    pub fn get(&self, metric: RuntimeMetric) -> &Summary {
        match metric {
            RuntimeMetric::TrainingTime => &self.training,
            RuntimeMetric::OverallTestingTime => &self.overall_testing,
            RuntimeMetric::IndividualTestingTime => &self.individual_testing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierResults {
    pub name: String,
    pub quality: Vec<CutoffQuality>,
    pub runtime: RuntimeSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Results {
    pub run_id: String,
    pub dataset: String,
    pub folds: usize,
    pub alpha: f64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub classifiers: Vec<ClassifierResults>,
}

impl Results {
    pub fn classifier(&self, name: &str) -> EvaluationResult<&ClassifierResults> {
        self.classifiers
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| EvaluationError::UnknownClassifier(name.to_string()))
    }

    /// One column per classifier, one row per cutoff.
    pub fn compare_quality(&self, metric: QualityMetric, statistic: Statistic) -> LabeledMatrix<f64> {
        let cutoffs = self
            .classifiers
            .iter()
            .map(|c| c.quality.len())
            .max()
            .unwrap_or(0);
        let rows = (1..=cutoffs).map(|x| x.to_string()).collect();
        let columns = self.classifiers.iter().map(|c| c.name.clone()).collect();
        let mut table = LabeledMatrix::zeros(rows, columns);
        for (col, classifier) in self.classifiers.iter().enumerate() {
            for (row, quality) in classifier.quality.iter().enumerate() {
                if let Some(cell) = table.get_mut(row, col) {
                    *cell = statistic.of(quality.get(metric));
                }
            }
        }
        table
    }

    /// `"mean +/- half width"` cells in the layout of [`compare_quality`](Self::compare_quality).
    pub fn quality_intervals(&self, metric: QualityMetric) -> LabeledMatrix<String> {
        let mean = self.compare_quality(metric, Statistic::Mean);
        let mut table = LabeledMatrix::zeros(mean.row_labels().to_vec(), mean.column_labels().to_vec());
        for (col, classifier) in self.classifiers.iter().enumerate() {
            for (row, quality) in classifier.quality.iter().enumerate() {
                if let Some(cell) = table.get_mut(row, col) {
                    *cell = format_interval(quality.get(metric));
                }
            }
        }
        table
    }

    /// One row per classifier, one column per runtime metric.
    pub fn compare_runtime(&self, statistic: Statistic) -> LabeledMatrix<f64> {
        let rows = self.classifiers.iter().map(|c| c.name.clone()).collect();
        let columns = RuntimeMetric::ALL.iter().map(ToString::to_string).collect();
        let mut table = LabeledMatrix::zeros(rows, columns);
        for (row, classifier) in self.classifiers.iter().enumerate() {
            for (col, metric) in RuntimeMetric::ALL.iter().enumerate() {
                if let Some(cell) = table.get_mut(row, col) {
                    *cell = statistic.of(classifier.runtime.get(*metric));
                }
            }
        }
        table
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub struct Experiment {
    dataset: Dataset,
    classifiers: Vec<Box<dyn Recommender>>,
    alpha: f64,
    shuffle_seed: Option<u64>,
    max_cutoff: Option<usize>,
}

impl Experiment {
    pub fn new(dataset: Dataset) -> Self {
        Self::from_config(dataset, &EvaluationConfig::default())
    }

    pub fn from_config(dataset: Dataset, config: &EvaluationConfig) -> Self {
        Self {
            dataset,
            classifiers: Vec::new(),
            alpha: config.alpha,
            shuffle_seed: config.shuffle_seed,
            max_cutoff: config.max_cutoff,
        }
    }

    pub fn add_classifier(&mut self, classifier: Box<dyn Recommender>) -> &mut Self {
        self.classifiers.push(classifier);
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Cross-validate every classifier with `folds` folds.
    pub fn run(&mut self, folds: usize) -> EvaluationResult<Results> {
        let splits = KFold::new(self.dataset.len(), folds)?
            .with_shuffle(self.shuffle_seed)
            .splits();
        let run_id = generate_run_id();
        let started_at = Utc::now();
        info!(
            target: event_names::EXPERIMENT_STARTED,
            run_id = %run_id,
            dataset = self.dataset.name(),
            instances = self.dataset.len(),
            classifiers = self.classifiers.len(),
            folds,
            "experiment started"
        );

        let max_cutoff = self.max_cutoff.unwrap_or(self.dataset.actions().len());
        let mut classifiers = Vec::with_capacity(self.classifiers.len());
        for classifier in self.classifiers.iter_mut() {
            let mut quality: Vec<Vec<QualityMeasurement>> = Vec::with_capacity(splits.len());
            let mut runtimes = Vec::with_capacity(splits.len());

            for (k, fold) in splits.iter().enumerate() {
                let train = self.dataset.subset(&fold.train)?;
                let test = self.dataset.subset(&fold.test)?;

                let t0 = Instant::now();
                classifier.fit(train.data(), train.target())?;
                let training_ms = t0.elapsed().as_secs_f64() * 1e3;

                let t0 = Instant::now();
                let predictions = classifier.predict(test.data())?;
                let testing_ms = t0.elapsed().as_secs_f64() * 1e3;

                let calculator =
                    QualityMetricsCalculator::new(self.dataset.actions(), test.target(), &predictions)?;
                let measured = calculator.calculate(Some(max_cutoff));
                info!(
                    target: event_names::EXPERIMENT_FOLD,
                    run_id = %run_id,
                    classifier = classifier.name(),
                    fold = k,
                    training_ms,
                    testing_ms,
                    top1_recall = measured.first().map_or(0.0, |m| m.recall),
                    "fold finished"
                );
                quality.push(measured);
                runtimes.push(RuntimeMeasurement {
                    training_ms,
                    testing_ms,
                    per_instance_ms: testing_ms / test.len() as f64,
                });
            }

            classifiers.push(ClassifierResults {
                name: classifier.name().to_string(),
                quality: summarize_quality(&quality, max_cutoff, self.alpha),
                runtime: summarize_runtime(&runtimes, self.alpha),
            });
        }

        let finished_at = Utc::now();
        info!(
            target: event_names::EXPERIMENT_FINISHED,
            run_id = %run_id,
            duration_ms = (finished_at - started_at).num_milliseconds(),
            "experiment finished"
        );
        Ok(Results {
            run_id,
            dataset: self.dataset.name().to_string(),
            folds,
            alpha: self.alpha,
            started_at,
            finished_at,
            classifiers,
        })
    }
}

fn summarize_quality(per_fold: &[Vec<QualityMeasurement>], max_cutoff: usize, alpha: f64) -> Vec<CutoffQuality> {
    (1..=max_cutoff)
        .map(|cutoff| {
            let column = |metric: QualityMetric| -> Vec<f64> {
                per_fold
                    .iter()
                    .filter_map(|fold| fold.get(cutoff - 1))
                    .map(|m| m.get(metric))
                    .collect()
            };
            CutoffQuality {
                cutoff,
                precision: Summary::from_samples(&column(QualityMetric::Precision), alpha),
                recall: Summary::from_samples(&column(QualityMetric::Recall), alpha),
                f1: Summary::from_samples(&column(QualityMetric::F1), alpha),
            }
        })
        .collect()
}

fn summarize_runtime(per_fold: &[RuntimeMeasurement], alpha: f64) -> RuntimeSummary {
    let column = |f: fn(&RuntimeMeasurement) -> f64| -> Vec<f64> { per_fold.iter().map(f).collect() };
    RuntimeSummary {
        training: Summary::from_samples(&column(|m| m.training_ms), alpha),
        overall_testing: Summary::from_samples(&column(|m| m.testing_ms), alpha),
        individual_testing: Summary::from_samples(&column(|m| m.per_instance_ms), alpha),
    }
}
