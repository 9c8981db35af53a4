//! Boundary checks for easing functions.
//!
//! Uses `Validation` to report every broken endpoint at once instead of
//! stopping at the first one.

use super::{EaseFn, Easing};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// An easing function that does not start at 0 or end at 1.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EasingViolation {
    #[error("Easing '{name}' returned {value} at progress 0, expected exactly 0")]
    StartNotZero { name: String, value: f32 },

    #[error("Easing '{name}' returned {value} at progress 1, expected exactly 1")]
    EndNotOne { name: String, value: f32 },
}

/// Checks `f(0) == 0` and `f(1) == 1` for an arbitrary function.
pub fn validate_function(name: &str, function: EaseFn) -> Validation<(), NonEmptyVec<EasingViolation>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<EasingViolation>>> = Vec::new();

    let start = function(0.0);
    let check = if start == 0.0 {
        Validation::success(())
    } else {
        Validation::fail(EasingViolation::StartNotZero {
            name: name.to_string(),
            value: start,
        })
    };
    checks.push(check);

    let end = function(1.0);
    let check = if end == 1.0 {
        Validation::success(())
    } else {
        Validation::fail(EasingViolation::EndNotOne {
            name: name.to_string(),
            value: end,
        })
    };
    checks.push(check);

    Validation::all_vec(checks).map(|_| ())
}

/// Checks one named curve.
pub fn validate(easing: Easing) -> Validation<(), NonEmptyVec<EasingViolation>> {
    validate_function(easing.name(), easing.function())
}

/// Checks every named curve, accumulating all violations.
pub fn validate_all() -> Validation<(), NonEmptyVec<EasingViolation>> {
    let checks: Vec<Validation<(), NonEmptyVec<EasingViolation>>> =
        Easing::ALL.into_iter().map(validate).collect();

    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_curves_pass() {
        assert!(validate_all().is_success());
    }

    #[test]
    fn single_curve_passes() {
        assert!(validate(Easing::ElasticInOut).is_success());
    }

    #[test]
    fn offset_function_reports_both_endpoints() {
        let result = validate_function("offset", |x| x + 0.5);

        match result {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, EasingViolation::StartNotZero { .. })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, EasingViolation::EndNotOne { .. })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn scaled_function_reports_only_end() {
        let result = validate_function("half", |x| x * 0.5);

        assert!(result.is_failure());
        if let Validation::Failure(errors) = result {
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors.iter().next().map(|e| e.to_string()),
                Some("Easing 'half' returned 0.5 at progress 1, expected exactly 1".to_string())
            );
        }
    }
}
