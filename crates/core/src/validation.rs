//! Input validation utilities.
//!
//! These checks belong to the input collector (CLI flags, REST bodies), mirroring the bounds
//! the dashboard form enforces. The assessment engine never calls them: it scores whatever it
//! is given.

use crate::constants::{
    AGE_RANGE, BMI_RANGE, DIASTOLIC_RANGE, GLUCOSE_RANGE, HBA1C_RANGE, SYSTOLIC_RANGE,
};
use crate::{CareError, CareResult, PatientObservation};

/// Validates that an observation falls inside the dashboard form's input domains.
///
/// # Errors
///
/// Returns `CareError::InvalidInput` naming the first field that is out of range (or not a
/// finite number, for the floating-point fields).
pub fn validate_observation(observation: &PatientObservation) -> CareResult<()> {
    check_range("age", observation.age, AGE_RANGE)?;
    check_range("sys", observation.sys, SYSTOLIC_RANGE)?;
    check_range("dia", observation.dia, DIASTOLIC_RANGE)?;
    check_range("glucose", observation.glucose, GLUCOSE_RANGE)?;
    check_finite_range("hba1c", observation.hba1c, HBA1C_RANGE)?;
    check_finite_range("bmi", observation.bmi, BMI_RANGE)?;
    Ok(())
}

fn check_range<T>(field: &str, value: T, (min, max): (T, T)) -> CareResult<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        return Err(CareError::InvalidInput(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

fn check_finite_range(field: &str, value: f64, range: (f64, f64)) -> CareResult<()> {
    if !value.is_finite() {
        return Err(CareError::InvalidInput(format!(
            "{field} must be a finite number"
        )));
    }
    check_range(field, value, range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_observation_is_valid() {
        assert!(validate_observation(&PatientObservation::default()).is_ok());
    }

    #[test]
    fn bounds_are_inclusive() {
        let obs = PatientObservation {
            age: 100,
            sys: 80,
            dia: 150,
            glucose: 400,
            hba1c: 4.0,
            bmi: 40.0,
            ..PatientObservation::default()
        };
        assert!(validate_observation(&obs).is_ok());
    }

    #[test]
    fn reports_the_offending_field() {
        let obs = PatientObservation {
            glucose: -5,
            ..PatientObservation::default()
        };
        match validate_observation(&obs) {
            Err(CareError::InvalidInput(msg)) => assert!(msg.starts_with("glucose")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn rejects_nan_hba1c() {
        let obs = PatientObservation {
            hba1c: f64::NAN,
            ..PatientObservation::default()
        };
        assert!(validate_observation(&obs).is_err());
    }
}
