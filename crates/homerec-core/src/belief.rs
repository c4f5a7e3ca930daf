//! Action vocabulary, mass functions and ranked beliefs.
//!
//! Fusion works on [`MassFunction`]s, dense vectors indexed by action
//! position plus an explicit "unknown" residual. Callers receive a
//! [`Belief`]: the same masses keyed by action label and kept ordered by mass
//! descending, ties broken by label ascending, so rankings are reproducible.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fixed target vocabulary, established before training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSet {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl ActionSet {
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(Error::InvalidConfig("action vocabulary is empty".into()));
        }
        let mut index = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return Err(Error::InvalidConfig(format!("duplicate action '{label}'")));
            }
        }
        Ok(Self { labels, index })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Like [`index_of`](Self::index_of) but fails with `UnknownAction`.
    pub fn require(&self, label: &str) -> Result<usize> {
        self.index_of(label)
            .ok_or_else(|| Error::UnknownAction(label.to_string()))
    }
}

/// Basic mass assignment over singleton actions plus "unknown".
///
/// Masses are non-negative and, together with `unknown`, sum to 1 for every
/// well-formed function (a saturated fusion result is the one exception, see
/// `fusion`).
#[derive(Debug, Clone, PartialEq)]
pub struct MassFunction {
    masses: Vec<f64>,
    unknown: f64,
}

impl MassFunction {
    /// All mass on "unknown": the identity element of combination.
    pub fn vacuous(actions: usize) -> Self {
        Self {
            masses: vec![0.0; actions],
            unknown: 1.0,
        }
    }

    pub fn new(masses: Vec<f64>, unknown: f64) -> Self {
        Self { masses, unknown }
    }

    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    pub fn mass(&self, action: usize) -> f64 {
        self.masses.get(action).copied().unwrap_or(0.0)
    }

    pub fn unknown(&self) -> f64 {
        self.unknown
    }

    /// Mass committed to some action.
    pub fn assigned(&self) -> f64 {
        self.masses.iter().sum()
    }

    pub fn total(&self) -> f64 {
        self.assigned() + self.unknown
    }

    pub fn is_vacuous(&self) -> bool {
        self.assigned() == 0.0
    }

    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }
}

fn by_rank(a: &(String, f64), b: &(String, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Ranked mapping from action label to mass, plus the unknown residual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBelief")]
pub struct Belief {
    entries: Vec<(String, f64)>,
    unknown: f64,
}

/// Serialized form of [`Belief`]; entries are re-ranked on load.
#[derive(Deserialize)]
struct RawBelief {
    entries: Vec<(String, f64)>,
    #[serde(default)]
    unknown: f64,
}

impl From<RawBelief> for Belief {
    fn from(raw: RawBelief) -> Self {
        Belief::from_masses(raw.entries).with_unknown(raw.unknown)
    }
}

impl Belief {
    /// Build from arbitrary `(label, mass)` pairs with no unknown mass.
    pub fn from_masses<I, S>(masses: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut entries: Vec<(String, f64)> =
            masses.into_iter().map(|(l, m)| (l.into(), m)).collect();
        entries.sort_by(by_rank);
        Self {
            entries,
            unknown: 0.0,
        }
    }

    pub fn from_mass_function(mass: &MassFunction, actions: &ActionSet) -> Self {
        let mut belief = Self::from_masses(
            actions
                .labels()
                .iter()
                .zip(mass.masses())
                .map(|(label, m)| (label.clone(), *m)),
        );
        belief.unknown = mass.unknown();
        belief
    }

    pub fn with_unknown(mut self, unknown: f64) -> Self {
        self.unknown = unknown;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Residual mass not assigned to any action.
    pub fn unknown(&self) -> f64 {
        self.unknown
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, m)| *m)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(l, _)| l == label)
    }

    /// Highest-ranked action.
    pub fn top(&self) -> Option<(&str, f64)> {
        self.entries.first().map(|(l, m)| (l.as_str(), *m))
    }

    /// Entries in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(l, m)| (l.as_str(), *m))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    /// Sum of action masses (unknown excluded).
    pub fn assigned(&self) -> f64 {
        self.entries.iter().map(|(_, m)| m).sum()
    }

    /// First `x` entries in rank order; the unknown residual is carried over.
    pub fn truncated(&self, x: usize) -> Self {
        Self {
            entries: self.entries.iter().take(x).cloned().collect(),
            unknown: self.unknown,
        }
    }
}
