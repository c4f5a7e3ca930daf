//! Turning a ranked belief into the recommendations shown to the user.

use homerec_config::DynamicCutoffConfig;
use serde::{Deserialize, Serialize};

use crate::belief::Belief;
use crate::classifier::Prediction;

/// Top `x` actions by mass, ties broken by label.
///
/// Returns every action when `x` exceeds the belief's size. The unknown
/// residual is carried over unchanged.
pub fn best_x_predictions(belief: &Belief, x: usize) -> Belief {
    belief.truncated(x)
}

/// Adaptive list length as a closure over `(belief, conflict, theta)`.
///
/// The full belief is returned when `conflict >= max_conflict` or
/// `theta >= max_theta`; otherwise only the best `cutoff` actions.
pub fn dynamic_cutoff(
    max_conflict: f64,
    max_theta: f64,
    cutoff: usize,
) -> impl Fn(&Belief, f64, f64) -> Belief {
    let policy = DynamicCutoff {
        max_conflict,
        max_theta,
        cutoff,
    };
    move |belief, conflict, theta| policy.apply(belief, conflict, theta)
}

/// The dynamic cutoff policy as a value, e.g. built from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynamicCutoff {
    pub max_conflict: f64,
    pub max_theta: f64,
    pub cutoff: usize,
}

impl From<DynamicCutoffConfig> for DynamicCutoff {
    fn from(config: DynamicCutoffConfig) -> Self {
        Self {
            max_conflict: config.max_conflict,
            max_theta: config.max_theta,
            cutoff: config.cutoff,
        }
    }
}

impl Default for DynamicCutoff {
    fn default() -> Self {
        DynamicCutoffConfig::default().into()
    }
}

impl DynamicCutoff {
    /// Whether the evidence is reliable enough to narrow the list.
    pub fn is_confident(&self, conflict: f64, theta: f64) -> bool {
        conflict < self.max_conflict && theta < self.max_theta
    }

    pub fn apply(&self, belief: &Belief, conflict: f64, theta: f64) -> Belief {
        if self.is_confident(conflict, theta) {
            best_x_predictions(belief, self.cutoff)
        } else {
            belief.clone()
        }
    }

    pub fn apply_to(&self, prediction: &Prediction) -> Belief {
        self.apply(&prediction.belief, prediction.conflict, prediction.theta)
    }
}
