//! Dempster-Shafer combination of per-source beliefs.
//!
//! Focal elements are the singleton actions plus the whole frame ("unknown").
//! Combining two mass functions:
//!
//! - `a_i · b_i`, `a_i · b_unknown` and `a_unknown · b_i` support action `i`
//! - `a_unknown · b_unknown` stays unknown
//! - `a_i · b_j` with `i ≠ j` is conflict `k`
//!
//! and the surviving mass is renormalized by `1 − k`.
//!
//! Conflict reported for a whole fusion is the accumulated value
//! `1 − Π (1 − k_step)`: the share of the raw n-way product discarded as
//! contradictory. It does not depend on the order in which sources are
//! folded in.
//!
//! When a step is (numerically) total conflict, normalization is skipped:
//! the unnormalized action masses are kept, the discarded mass is moved to
//! unknown, and the result is flagged as saturated.

use tracing::debug;

use crate::belief::MassFunction;
use crate::logging::event_names;

/// Survivor mass below which a step is treated as total conflict.
pub const SATURATION_EPS: f64 = 1e-9;

/// Result of combining two mass functions.
#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    pub mass: MassFunction,
    /// Conflict of this single step.
    pub conflict: f64,
    /// True if normalization was skipped because of total conflict.
    pub saturated: bool,
}

/// Combine two mass functions over the same action set.
///
/// Actions missing from the shorter function are treated as zero mass.
pub fn combine(a: &MassFunction, b: &MassFunction) -> Combination {
    let n = a.len().max(b.len());
    let (au, bu) = (a.unknown(), b.unknown());

    let mut agreement = 0.0;
    let raw: Vec<f64> = (0..n)
        .map(|i| {
            let (ai, bi) = (a.mass(i), b.mass(i));
            agreement += ai * bi;
            ai * bi + ai * bu + au * bi
        })
        .collect();

    let conflict = (a.assigned() * b.assigned() - agreement).clamp(0.0, 1.0);
    let survivor = 1.0 - conflict;

    if survivor < SATURATION_EPS {
        let assigned: f64 = raw.iter().sum();
        let unknown = (1.0 - assigned).clamp(0.0, 1.0);
        return Combination {
            mass: MassFunction::new(raw, unknown),
            conflict,
            saturated: true,
        };
    }

    let masses = raw.into_iter().map(|m| m / survivor).collect();
    Combination {
        mass: MassFunction::new(masses, au * bu / survivor),
        conflict,
        saturated: false,
    }
}

/// Fused belief for one instance with its diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Fused {
    pub mass: MassFunction,
    /// Accumulated conflict in `[0, 1]`.
    pub conflict: f64,
    /// Final unknown mass in `[0, 1]`.
    pub theta: f64,
    pub saturated: bool,
}

/// Running left fold of source beliefs, starting from the vacuous belief.
#[derive(Debug, Clone)]
pub struct Fusion {
    running: MassFunction,
    retained: f64,
    saturated: bool,
    steps: usize,
}

impl Fusion {
    pub fn new(actions: usize) -> Self {
        Self {
            running: MassFunction::vacuous(actions),
            retained: 1.0,
            saturated: false,
            steps: 0,
        }
    }

    /// Fold one more source belief into the running combination.
    pub fn absorb(&mut self, source: &MassFunction) {
        let step = combine(&self.running, source);
        if step.saturated {
            debug!(
                target: event_names::FUSION_SATURATED,
                step = self.steps,
                conflict = step.conflict,
                "total conflict between sources; keeping unnormalized belief"
            );
        }
        self.retained *= 1.0 - step.conflict;
        self.saturated |= step.saturated;
        self.running = step.mass;
        self.steps += 1;
    }

    /// Accumulated conflict so far.
    pub fn conflict(&self) -> f64 {
        (1.0 - self.retained).clamp(0.0, 1.0)
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn finish(self) -> Fused {
        let conflict = self.conflict();
        let theta = self.running.unknown().clamp(0.0, 1.0);
        Fused {
            mass: self.running,
            conflict,
            theta,
            saturated: self.saturated,
        }
    }
}

/// Fuse a sequence of source beliefs in the given order.
pub fn fuse<'a, I>(actions: usize, sources: I) -> Fused
where
    I: IntoIterator<Item = &'a MassFunction>,
{
    let mut fusion = Fusion::new(actions);
    for source in sources {
        fusion.absorb(source);
    }
    fusion.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn vacuous_is_identity() {
        let m = MassFunction::new(vec![0.2, 0.5], 0.3);
        let c = combine(&MassFunction::vacuous(2), &m);
        assert_eq!(c.conflict, 0.0);
        assert!(!c.saturated);
        assert!(close(c.mass.mass(0), 0.2));
        assert!(close(c.mass.mass(1), 0.5));
        assert!(close(c.mass.unknown(), 0.3));
    }

    #[test]
    fn disagreement_produces_conflict() {
        // certain "open" vs 60/40 open/close
        let a = MassFunction::new(vec![1.0, 0.0], 0.0);
        let b = MassFunction::new(vec![0.6, 0.4], 0.0);
        let c = combine(&a, &b);
        assert!(close(c.conflict, 0.4));
        assert!(close(c.mass.mass(0), 1.0));
        assert!(close(c.mass.mass(1), 0.0));
    }

    #[test]
    fn combined_mass_sums_to_one() {
        let a = MassFunction::new(vec![0.3, 0.2, 0.1], 0.4);
        let b = MassFunction::new(vec![0.1, 0.5, 0.2], 0.2);
        let c = combine(&a, &b);
        assert!((c.mass.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn total_conflict_saturates_softly() {
        let a = MassFunction::new(vec![1.0, 0.0], 0.0);
        let b = MassFunction::new(vec![0.0, 1.0], 0.0);
        let c = combine(&a, &b);
        assert!(c.saturated);
        assert!(close(c.conflict, 1.0));
        assert_eq!(c.mass.masses(), &[0.0, 0.0]);
        assert!(close(c.mass.unknown(), 1.0));
    }

    #[test]
    fn accumulated_conflict_is_order_independent() {
        let sources = [
            MassFunction::new(vec![0.7, 0.2, 0.0], 0.1),
            MassFunction::new(vec![0.1, 0.6, 0.1], 0.2),
            MassFunction::new(vec![0.3, 0.3, 0.3], 0.1),
        ];
        let forward = fuse(3, sources.iter());
        let backward = fuse(3, sources.iter().rev());
        assert!((forward.conflict - backward.conflict).abs() < 1e-12);
        for i in 0..3 {
            assert!((forward.mass.mass(i) - backward.mass.mass(i)).abs() < 1e-12);
        }
    }

    #[test]
    fn fusing_nothing_is_fully_unknown() {
        let fused = fuse(4, std::iter::empty());
        assert_eq!(fused.theta, 1.0);
        assert_eq!(fused.conflict, 0.0);
        assert!(!fused.saturated);
    }
}
