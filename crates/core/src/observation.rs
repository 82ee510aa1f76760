//! The patient observation record consumed by the assessment engine.

use crate::constants::{
    DEFAULT_AGE, DEFAULT_BMI, DEFAULT_DIASTOLIC, DEFAULT_GLUCOSE, DEFAULT_HBA1C, DEFAULT_SYSTOLIC,
};
use serde::{Deserialize, Serialize};

/// One snapshot of patient vitals supplied for a single assessment call.
///
/// Values are taken as given. Range checks belong to the input collector (see
/// [`crate::validation::validate_observation`]); the scoring functions are total over any
/// numeric input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientObservation {
    /// Free-text label. Not used in scoring.
    #[serde(default)]
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Systolic blood pressure (mmHg).
    pub sys: i32,
    /// Diastolic blood pressure (mmHg). Not used in scoring.
    pub dia: i32,
    /// Blood glucose (mg/dL).
    pub glucose: i32,
    /// Glycated haemoglobin (%).
    pub hba1c: f64,
    /// Body mass index. Collected but not used in scoring.
    pub bmi: f64,
}

impl Default for PatientObservation {
    /// The values a freshly opened dashboard form starts with.
    fn default() -> Self {
        Self {
            name: String::new(),
            age: DEFAULT_AGE,
            sys: DEFAULT_SYSTOLIC,
            dia: DEFAULT_DIASTOLIC,
            glucose: DEFAULT_GLUCOSE,
            hba1c: DEFAULT_HBA1C,
            bmi: DEFAULT_BMI,
        }
    }
}
