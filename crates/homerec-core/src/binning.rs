//! Elapsed-time discretization.
//!
//! A [`Bins`] value is an ordered partition of `[start, ∞)`: contiguous
//! half-open intervals `[edge_i, edge_{i+1})` followed by one unbounded
//! terminal bin `[last_edge, ∞)`. Sensors that never changed state report an
//! infinite elapsed time and land in the terminal bin.
//!
//! Bins are immutable after construction and are shared between evidence
//! sources through `Arc`.

use std::fmt;

use homerec_config::BinningConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Guard against grids that would allocate absurd numbers of bins.
pub const MAX_BINS: usize = 100_000;

/// One interval of elapsed time. `upper == None` marks the terminal bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: Option<f64>,
}

impl Bin {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && self.upper.map_or(true, |upper| value < upper)
    }

    pub fn is_terminal(&self) -> bool {
        self.upper.is_none()
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "[{}, {})", self.lower, upper),
            None => write!(f, "[{}, inf)", self.lower),
        }
    }
}

/// Ordered, gap-free partition of `[start, ∞)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBins")]
pub struct Bins {
    /// Lower bound of every bin; the last one opens the terminal bin.
    edges: Vec<f64>,
}

/// Serialized form of [`Bins`], validated on the way in.
#[derive(Deserialize)]
struct RawBins {
    edges: Vec<f64>,
}

impl TryFrom<RawBins> for Bins {
    type Error = Error;

    fn try_from(raw: RawBins) -> Result<Self> {
        Bins::from_edges(raw.edges)
    }
}

/// Regular grid over `[start, end)` in steps of `width`, plus `[end, ∞)`.
///
/// The last finite bin is narrower than `width` when `end - start` is not a
/// multiple of it.
pub fn build_bins(start: f64, end: f64, width: f64) -> Result<Bins> {
    if !start.is_finite() || !end.is_finite() || !width.is_finite() {
        return Err(Error::InvalidBins(format!(
            "start, end and width must be finite (got {start}, {end}, {width})"
        )));
    }
    if width <= 0.0 {
        return Err(Error::InvalidBins(format!("width must be positive, got {width}")));
    }
    if end <= start {
        return Err(Error::InvalidBins(format!(
            "end ({end}) must be greater than start ({start})"
        )));
    }

    let steps = ((end - start) / width).ceil();
    if steps > MAX_BINS as f64 {
        return Err(Error::InvalidBins(format!(
            "grid would create {steps} bins (limit {MAX_BINS})"
        )));
    }

    let mut edges: Vec<f64> = (0..steps as usize)
        .map(|i| start + i as f64 * width)
        .take_while(|edge| *edge < end)
        .collect();
    edges.push(end);
    Ok(Bins { edges })
}

impl Bins {
    /// Partition from explicit, strictly ascending boundaries.
    pub fn from_edges(edges: Vec<f64>) -> Result<Self> {
        if edges.is_empty() {
            return Err(Error::InvalidBins("at least one edge is required".into()));
        }
        if edges.len() > MAX_BINS {
            return Err(Error::InvalidBins(format!(
                "{} edges exceed the limit of {MAX_BINS}",
                edges.len()
            )));
        }
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(Error::InvalidBins("edges must be finite".into()));
        }
        if edges.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::InvalidBins("edges must be strictly ascending".into()));
        }
        Ok(Self { edges })
    }

    /// A single unbounded bin `[start, ∞)`; used for time-exempt sources.
    pub fn unbounded(start: f64) -> Result<Self> {
        Self::from_edges(vec![start])
    }

    pub fn from_config(config: &BinningConfig) -> Result<Self> {
        match &config.edges {
            Some(edges) => Self::from_edges(edges.clone()),
            None => build_bins(config.start, config.end, config.width),
        }
    }

    /// Number of bins, terminal bin included.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Always false: every constructor requires at least one edge.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn start(&self) -> f64 {
        self.edges[0]
    }

    pub fn terminal_index(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn bin(&self, index: usize) -> Option<Bin> {
        let lower = *self.edges.get(index)?;
        Some(Bin {
            lower,
            upper: self.edges.get(index + 1).copied(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Bin> + '_ {
        (0..self.len()).filter_map(move |i| self.bin(i))
    }

    /// Index of the unique bin containing `value`.
    ///
    /// Infinite values map to the terminal bin. Values below `start` and NaN
    /// are rejected with [`Error::Domain`].
    pub fn bin_of(&self, value: f64) -> Result<usize> {
        if value.is_nan() || value < self.start() {
            return Err(Error::Domain {
                feature: "elapsed time".to_string(),
                value,
                start: self.start(),
            });
        }
        // edges[0] <= value, so the partition point is at least 1.
        Ok(self.edges.partition_point(|edge| *edge <= value) - 1)
    }
}

impl fmt::Display for Bins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.iter().map(|b| b.to_string()).collect();
        write!(f, "{}", labels.join(" "))
    }
}
