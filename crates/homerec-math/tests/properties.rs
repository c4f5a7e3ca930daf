//! Property-based tests for homerec-math.
//!
//! Uses proptest to check identities across many random inputs.

use proptest::prelude::*;
use homerec_math::{
    inverse_regularized_incomplete_beta, ln_beta, ln_gamma, mean, regularized_incomplete_beta,
    sample_std_dev, student_t_cdf, student_t_isf, Summary,
};

const TOL: f64 = 1e-8;

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() <= tol.max(tol * a.abs().max(b.abs()))
}

// ============================================================================
// Special functions
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Γ(z+1) = zΓ(z).
    #[test]
    fn ln_gamma_recurrence(z in 0.1..50.0f64) {
        let lhs = ln_gamma(z + 1.0);
        let rhs = z.ln() + ln_gamma(z);
        prop_assert!(approx_eq(lhs, rhs, TOL), "lgamma({}+1)={} vs {}", z, lhs, rhs);
    }

    /// B(a,b) is symmetric.
    #[test]
    fn ln_beta_symmetric(a in 0.1..30.0f64, b in 0.1..30.0f64) {
        prop_assert!(approx_eq(ln_beta(a, b), ln_beta(b, a), TOL));
    }

    /// I_x(a,b) = 1 - I_{1-x}(b,a).
    #[test]
    fn incomplete_beta_reflection(x in 0.01..0.99f64, a in 0.2..20.0f64, b in 0.2..20.0f64) {
        let lhs = regularized_incomplete_beta(x, a, b);
        let rhs = 1.0 - regularized_incomplete_beta(1.0 - x, b, a);
        prop_assert!(approx_eq(lhs, rhs, 1e-9), "I={} vs 1-I'={}", lhs, rhs);
    }

    /// I_x(a,b) is monotone in x.
    #[test]
    fn incomplete_beta_monotone(x in 0.01..0.98f64, dx in 0.001..0.02f64, a in 0.2..10.0f64, b in 0.2..10.0f64) {
        let lo = regularized_incomplete_beta(x, a, b);
        let hi = regularized_incomplete_beta(x + dx, a, b);
        prop_assert!(hi >= lo - 1e-12);
    }

    /// The inverse lands back on p.
    #[test]
    fn incomplete_beta_inverse(p in 0.01..0.99f64, a in 0.5..10.0f64, b in 0.5..10.0f64) {
        let x = inverse_regularized_incomplete_beta(p, a, b);
        prop_assert!((0.0..=1.0).contains(&x));
        prop_assert!(approx_eq(regularized_incomplete_beta(x, a, b), p, 1e-8));
    }
}

// ============================================================================
// Student t
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// isf is the upper-tail inverse of the cdf.
    #[test]
    fn t_isf_inverts_cdf(q in 0.01..0.49f64, dof in 1.0..60.0f64) {
        let t = student_t_isf(q, dof);
        prop_assert!(t > 0.0);
        prop_assert!(approx_eq(1.0 - student_t_cdf(t, dof), q, 1e-7));
    }

    /// More degrees of freedom means thinner tails.
    #[test]
    fn t_quantile_shrinks_with_dof(q in 0.01..0.2f64, dof in 1.0..40.0f64) {
        prop_assert!(student_t_isf(q, dof + 1.0) <= student_t_isf(q, dof) + 1e-9);
    }
}

// ============================================================================
// Summaries
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Shifting every sample moves the mean and keeps the spread.
    #[test]
    fn summary_shift_invariance(samples in prop::collection::vec(-100.0..100.0f64, 2..30), shift in -50.0..50.0f64) {
        let shifted: Vec<f64> = samples.iter().map(|v| v + shift).collect();
        prop_assert!(approx_eq(mean(&shifted), mean(&samples) + shift, 1e-9));
        prop_assert!(approx_eq(sample_std_dev(&shifted), sample_std_dev(&samples), 1e-7));
    }

    /// The confidence interval always contains the mean.
    #[test]
    fn summary_interval_contains_mean(samples in prop::collection::vec(0.0..1.0f64, 2..30)) {
        let s = Summary::from_samples(&samples, 0.1);
        let (lo, hi) = s.interval();
        prop_assert!(lo <= s.mean && s.mean <= hi);
    }
}
