//! Numerical helpers for the smart-home action recommender.
//!
//! The evaluation layer needs Student-t quantiles for confidence intervals;
//! everything here exists to compute those without pulling in a stats crate.

pub mod math;

pub use math::special::*;
pub use math::student_t::*;
pub use math::summary::*;
