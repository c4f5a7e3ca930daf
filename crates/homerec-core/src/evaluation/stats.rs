//! Statistics reported over cross-validation folds.

use std::fmt;

use homerec_math::Summary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    Mean,
    StdDeviation,
    /// Half width of the Student-t confidence interval around the mean.
    ConfidenceInterval,
}

impl Statistic {
    pub const ALL: [Statistic; 3] = [
        Statistic::Mean,
        Statistic::StdDeviation,
        Statistic::ConfidenceInterval,
    ];

    pub fn of(&self, summary: &Summary) -> f64 {
        match self {
            Statistic::Mean => summary.mean,
            Statistic::StdDeviation => summary.std_dev,
            Statistic::ConfidenceInterval => summary.ci_half_width,
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Statistic::Mean => "Mean",
            Statistic::StdDeviation => "Std deviation",
            Statistic::ConfidenceInterval => "Confidence interval",
        })
    }
}

/// `"0.73 +/- 0.0125"` rendering of a summary.
pub fn format_interval(summary: &Summary) -> String {
    format!("{:.2} +/- {:.4}", summary.mean, summary.ci_half_width)
}
