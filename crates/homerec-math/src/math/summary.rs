//! Sample summaries used when aggregating cross-validation folds.

use super::student_t::student_t_isf;
use serde::{Deserialize, Serialize};

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation with Bessel's correction (ddof = 1).
///
/// NaN for fewer than two samples.
pub fn sample_std_dev(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return f64::NAN;
    }
    let m = mean(samples);
    let ss: f64 = samples.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (samples.len() - 1) as f64).sqrt()
}

/// Half width of the two-sided `1 - alpha` Student-t confidence interval
/// for the mean: `t_{alpha/2, n-1} * s / sqrt(n)`.
pub fn t_confidence_half_width(samples: &[f64], alpha: f64) -> f64 {
    let n = samples.len();
    if n < 2 || !(alpha > 0.0 && alpha < 1.0) {
        return f64::NAN;
    }
    let t = student_t_isf(alpha / 2.0, (n - 1) as f64);
    t * sample_std_dev(samples) / (n as f64).sqrt()
}

/// Mean, spread and confidence interval of one measured quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub samples: usize,
    pub mean: f64,
    pub std_dev: f64,
    /// Half width of the confidence interval around `mean`.
    pub ci_half_width: f64,
}

impl Summary {
    pub fn from_samples(samples: &[f64], alpha: f64) -> Self {
        Self {
            samples: samples.len(),
            mean: mean(samples),
            std_dev: sample_std_dev(samples),
            ci_half_width: t_confidence_half_width(samples, alpha),
        }
    }

    /// `(lower, upper)` bounds of the confidence interval.
    pub fn interval(&self) -> (f64, f64) {
        (self.mean - self.ci_half_width, self.mean + self.ci_half_width)
    }
}
