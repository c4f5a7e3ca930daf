//! Temporal Evidences Classifier.
//!
//! One [`EvidenceSource`] per feature learns which action tends to follow a
//! change of that sensor after a given elapsed time. At prediction time every
//! source contributes the belief of the bin the instance falls in, and the
//! beliefs are fused in feature declaration order.
//!
//! The classifier is either unfitted or fitted; `fit` always rebuilds the
//! sources from scratch and `predict` only reads them, so prediction batches
//! can be split across worker threads without locking.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use homerec_config::{BinningConfig, RecommenderConfig};
use tracing::{debug, info};

use super::{Prediction, Recommender};
use crate::belief::{ActionSet, Belief};
use crate::binning::Bins;
use crate::error::{Error, Result};
use crate::evidence::EvidenceSource;
use crate::fusion::Fusion;
use crate::logging::event_names;

pub const DEFAULT_NAME: &str = "Temporal Evidences Classifier";

/// Construction-time settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierSettings {
    pub binning: BinningConfig,
    pub min_support: u32,
    /// Features whose source ignores elapsed time.
    pub exempt_features: Vec<String>,
    /// Worker threads for a predict batch.
    pub threads: usize,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self::from_config(&RecommenderConfig::default())
    }
}

impl ClassifierSettings {
    pub fn from_config(config: &RecommenderConfig) -> Self {
        Self {
            binning: config.binning.clone(),
            min_support: config.evidence.min_support,
            exempt_features: config.evidence.exempt_features.clone(),
            threads: config.prediction.threads,
        }
    }

    /// Regular grid `[start, end)` in steps of `width`.
    pub fn with_grid(mut self, start: f64, end: f64, width: f64) -> Self {
        self.binning = BinningConfig {
            start,
            end,
            width,
            edges: None,
        };
        self
    }

    pub fn with_min_support(mut self, min_support: u32) -> Self {
        self.min_support = min_support;
        self
    }

    pub fn with_exempt<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exempt_features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }
}

#[derive(Debug, Clone)]
enum State {
    Unfitted,
    Fitted(Vec<EvidenceSource>),
}

#[derive(Debug, Clone)]
pub struct TemporalEvidencesClassifier {
    name: String,
    features: Vec<String>,
    actions: ActionSet,
    /// Per-feature bins; exempt features get a single unbounded bin.
    bins: Vec<Arc<Bins>>,
    min_support: u32,
    threads: usize,
    state: State,
}

impl TemporalEvidencesClassifier {
    pub fn new<I, S>(features: I, actions: ActionSet, settings: ClassifierSettings) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let features: Vec<String> = features.into_iter().map(Into::into).collect();
        if features.is_empty() {
            return Err(Error::InvalidConfig("at least one feature is required".into()));
        }
        for (i, feature) in features.iter().enumerate() {
            if features[..i].contains(feature) {
                return Err(Error::InvalidConfig(format!("duplicate feature '{feature}'")));
            }
        }
        if let Some(unknown) = settings
            .exempt_features
            .iter()
            .find(|f| !features.contains(f))
        {
            return Err(Error::InvalidConfig(format!(
                "exempt feature '{unknown}' is not a declared feature"
            )));
        }

        let shared = Arc::new(Bins::from_config(&settings.binning)?);
        let exempt = Arc::new(Bins::unbounded(shared.start())?);
        let bins = features
            .iter()
            .map(|f| {
                if settings.exempt_features.contains(f) {
                    Arc::clone(&exempt)
                } else {
                    Arc::clone(&shared)
                }
            })
            .collect();

        Ok(Self {
            name: DEFAULT_NAME.to_string(),
            features,
            actions,
            bins,
            min_support: settings.min_support,
            threads: settings.threads.max(1),
            state: State::Unfitted,
        })
    }

    pub fn from_config<I, S>(config: &RecommenderConfig, features: I, actions: ActionSet) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(features, actions, ClassifierSettings::from_config(config))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, State::Fitted(_))
    }

    /// Fitted evidence sources in feature order.
    pub fn sources(&self) -> Result<&[EvidenceSource]> {
        match &self.state {
            State::Fitted(sources) => Ok(sources),
            State::Unfitted => Err(Error::NotFitted),
        }
    }

    fn check_width(&self, row: &[f64]) -> Result<()> {
        if row.len() != self.features.len() {
            return Err(Error::shape("features", self.features.len(), row.len()));
        }
        Ok(())
    }

    fn empty_sources(&self) -> Vec<EvidenceSource> {
        self.features
            .iter()
            .zip(&self.bins)
            .map(|(name, bins)| {
                EvidenceSource::new(name.clone(), Arc::clone(bins), self.actions.len(), self.min_support)
            })
            .collect()
    }

    /// Train on `data` rows and their `labels`.
    ///
    /// On error the classifier keeps its previous state.
    pub fn fit(&mut self, data: &[Vec<f64>], labels: &[String]) -> Result<()> {
        if data.len() != labels.len() {
            return Err(Error::shape("labels", data.len(), labels.len()));
        }
        let started = Instant::now();

        let mut sources = self.empty_sources();
        for (row, label) in data.iter().zip(labels) {
            self.check_width(row)?;
            let action = self.actions.require(label)?;
            for (source, &elapsed) in sources.iter_mut().zip(row) {
                let bin = source.bin_of(elapsed)?;
                source.accumulate(bin, action)?;
            }
        }
        self.state = State::Fitted(sources);

        info!(
            target: event_names::CLASSIFIER_FIT,
            classifier = %self.name,
            instances = data.len(),
            features = self.features.len(),
            actions = self.actions.len(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
            "classifier fitted"
        );
        Ok(())
    }

    /// Predict every row, preserving input order.
    pub fn predict(&self, data: &[Vec<f64>]) -> Result<Vec<Prediction>> {
        let sources = self.sources()?;
        if data.is_empty() {
            return Ok(Vec::new());
        }

        let workers = self.threads.min(data.len());
        debug!(
            target: event_names::CLASSIFIER_PREDICT,
            classifier = %self.name,
            instances = data.len(),
            workers,
            "predicting batch"
        );

        if workers <= 1 {
            return data.iter().map(|row| self.predict_one(sources, row)).collect();
        }

        let chunk_size = data.len().div_ceil(workers);
        let chunks: Vec<Result<Vec<Prediction>>> = thread::scope(|s| {
            let handles: Vec<_> = data
                .chunks(chunk_size)
                .map(|chunk| {
                    s.spawn(move || {
                        chunk
                            .iter()
                            .map(|row| self.predict_one(sources, row))
                            .collect::<Result<Vec<_>>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        });

        let mut predictions = Vec::with_capacity(data.len());
        for chunk in chunks {
            predictions.extend(chunk?);
        }
        Ok(predictions)
    }

    fn predict_one(&self, sources: &[EvidenceSource], row: &[f64]) -> Result<Prediction> {
        self.check_width(row)?;
        let mut fusion = Fusion::new(self.actions.len());
        for (source, &elapsed) in sources.iter().zip(row) {
            let bin = source.bin_of(elapsed)?;
            fusion.absorb(&source.belief(bin));
        }
        let fused = fusion.finish();
        Ok(Prediction {
            belief: Belief::from_mass_function(&fused.mass, &self.actions),
            conflict: fused.conflict,
            theta: fused.theta,
            saturated: fused.saturated,
        })
    }
}

impl Recommender for TemporalEvidencesClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn fit(&mut self, data: &[Vec<f64>], labels: &[String]) -> Result<()> {
        TemporalEvidencesClassifier::fit(self, data, labels)
    }

    fn predict(&self, data: &[Vec<f64>]) -> Result<Vec<Prediction>> {
        TemporalEvidencesClassifier::predict(self, data)
    }
}
