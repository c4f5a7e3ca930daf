//! Student's t distribution.
//!
//! Both directions go through the incomplete beta identity
//! `P(|T| > t) = I_{v/(v+t²)}(v/2, 1/2)`.

use super::special::{inverse_regularized_incomplete_beta, regularized_incomplete_beta};

/// CDF of Student's t with `dof` degrees of freedom.
pub fn student_t_cdf(t: f64, dof: f64) -> f64 {
    if t.is_nan() || dof.is_nan() || dof <= 0.0 {
        return f64::NAN;
    }
    if t == f64::INFINITY {
        return 1.0;
    }
    if t == f64::NEG_INFINITY {
        return 0.0;
    }
    let x = dof / (dof + t * t);
    let tail = 0.5 * regularized_incomplete_beta(x, 0.5 * dof, 0.5);
    if t > 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

/// Inverse survival function: the `t` with `P(T > t) = q`.
///
/// Matches `scipy.stats.t.isf`. NaN when `q` is outside `(0, 1)` or
/// `dof <= 0`.
pub fn student_t_isf(q: f64, dof: f64) -> f64 {
    if q.is_nan() || dof.is_nan() || dof <= 0.0 || q <= 0.0 || q >= 1.0 {
        return f64::NAN;
    }
    if q == 0.5 {
        return 0.0;
    }
    if q > 0.5 {
        return -student_t_isf(1.0 - q, dof);
    }
    let x = inverse_regularized_incomplete_beta(2.0 * q, 0.5 * dof, 0.5);
    if x <= 0.0 {
        return f64::INFINITY;
    }
    (dof * (1.0 - x) / x).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        !a.is_nan() && (a - b).abs() <= tol
    }

    #[test]
    fn isf_matches_tables() {
        assert!(close(student_t_isf(0.05, 9.0), 1.833_113, 1e-5));
        assert!(close(student_t_isf(0.025, 10.0), 2.228_139, 1e-5));
        assert!(close(student_t_isf(0.05, 1.0), 6.313_752, 1e-4));
    }

    #[test]
    fn cauchy_quartile_is_one() {
        assert!(close(student_t_isf(0.25, 1.0), 1.0, 1e-8));
    }

    #[test]
    fn isf_is_antisymmetric() {
        let upper = student_t_isf(0.1, 4.0);
        let lower = student_t_isf(0.9, 4.0);
        assert!(close(upper, -lower, 1e-9));
    }

    #[test]
    fn cdf_centre_and_tails() {
        assert!(close(student_t_cdf(0.0, 5.0), 0.5, 1e-12));
        assert_eq!(student_t_cdf(f64::INFINITY, 5.0), 1.0);
        assert_eq!(student_t_cdf(f64::NEG_INFINITY, 5.0), 0.0);
    }

    #[test]
    fn invalid_inputs_are_nan() {
        assert!(student_t_isf(0.0, 3.0).is_nan());
        assert!(student_t_isf(0.1, 0.0).is_nan());
        assert!(student_t_cdf(1.0, -1.0).is_nan());
    }
}
