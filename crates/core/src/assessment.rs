//! Risk scoring and clinical recommendations for diabetes and hypertension.
//!
//! Both assessments are pure: they read a [`PatientObservation`], touch no shared state and
//! always return a complete [`AssessmentResult`]. Threshold ladders are first-match-wins; a
//! value that satisfies a higher tier never also collects the points of the tiers below it.
//!
//! The advisory bundles are fixed per condition and do not vary with the computed score.

use crate::constants::{
    DIABETES_ADVICE, DIABETES_MEDICATIONS, DIABETES_RISK_LABEL, GLUCOSE_HIGH,
    GLUCOSE_HIGH_POINTS, HBA1C_ELEVATED, HBA1C_ELEVATED_POINTS, HBA1C_HIGH, HBA1C_HIGH_POINTS,
    HYPERTENSION_ADVICE, HYPERTENSION_MEDICATIONS, HYPERTENSION_RISK_LABEL,
    HYPERTENSIVE_CRISIS_ADVICE, SYSTOLIC_CRISIS, SYSTOLIC_TIERS,
};
use crate::PatientObservation;
use diabp_types::RiskScore;
use serde::{Deserialize, Serialize};

/// Conditions the engine can assess.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Diabetes,
    Hypertension,
}

impl Condition {
    /// Bilingual dashboard label for this condition's risk metric.
    pub fn risk_label(self) -> &'static str {
        match self {
            Condition::Diabetes => DIABETES_RISK_LABEL,
            Condition::Hypertension => HYPERTENSION_RISK_LABEL,
        }
    }

    /// Runs the assessment for this condition.
    pub fn assess(self, observation: &PatientObservation) -> AssessmentResult {
        match self {
            Condition::Diabetes => diabetes_assessment(observation),
            Condition::Hypertension => hypertension_assessment(observation),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Diabetes => f.write_str("diabetes"),
            Condition::Hypertension => f.write_str("hypertension"),
        }
    }
}

/// Risk score plus advisory bundle for one condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub risk_score: RiskScore,
    /// Ordered, condition-specific medication strings.
    pub medications: Vec<String>,
    /// Ordered lifestyle strings. For hypertension in crisis, the emergency string comes first.
    pub advice: Vec<String>,
}

/// Both assessments for a single observation, as shown side by side on the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub diabetes: AssessmentResult,
    pub hypertension: AssessmentResult,
}

/// Scores diabetes risk from HbA1c and glucose.
///
/// Scoring:
/// - HbA1c `>= 8.0` adds 40; otherwise HbA1c `>= 6.5` adds 25 (exclusive tiers).
/// - Glucose `>= 180` independently adds 30.
/// - The total is clipped to 100.
///
/// The medication (3 items) and advice (2 items) lists are the same for every input.
///
/// # Arguments
///
/// * `observation` - Patient vitals. Only `hba1c` and `glucose` are read.
///
/// # Returns
///
/// A complete [`AssessmentResult`]. This function cannot fail; out-of-range values (including
/// NaN HbA1c, which matches no tier) yield a numerically valid score.
pub fn diabetes_assessment(observation: &PatientObservation) -> AssessmentResult {
    let mut points = 0u32;

    if observation.hba1c >= HBA1C_HIGH {
        points += HBA1C_HIGH_POINTS;
    } else if observation.hba1c >= HBA1C_ELEVATED {
        points += HBA1C_ELEVATED_POINTS;
    }

    if observation.glucose >= GLUCOSE_HIGH {
        points += GLUCOSE_HIGH_POINTS;
    }

    AssessmentResult {
        risk_score: RiskScore::clipped(points),
        medications: owned(&DIABETES_MEDICATIONS),
        advice: owned(&DIABETES_ADVICE),
    }
}

/// Scores hypertension risk from systolic pressure.
///
/// Tiers are evaluated highest first and the first match wins:
///
/// | systolic (mmHg) | risk |
/// |-----------------|------|
/// | `>= 180`        | 60   |
/// | `>= 160`        | 40   |
/// | `>= 140`        | 25   |
/// | otherwise       | 0    |
///
/// In the `>= 180` tier the hypertensive-crisis string is placed before the two standing
/// advice items, so the advice list has three entries instead of two. Medications (2 items)
/// never change.
///
/// # Arguments
///
/// * `observation` - Patient vitals. Only `sys` is read.
pub fn hypertension_assessment(observation: &PatientObservation) -> AssessmentResult {
    let points = SYSTOLIC_TIERS
        .iter()
        .find(|(threshold, _)| observation.sys >= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(0);

    let mut advice = Vec::with_capacity(HYPERTENSION_ADVICE.len() + 1);
    if observation.sys >= SYSTOLIC_CRISIS {
        advice.push(HYPERTENSIVE_CRISIS_ADVICE.to_string());
    }
    advice.extend(HYPERTENSION_ADVICE.iter().map(|s| s.to_string()));

    AssessmentResult {
        risk_score: RiskScore::clipped(points),
        medications: owned(&HYPERTENSION_MEDICATIONS),
        advice,
    }
}

/// Runs both assessments once each for the dashboard.
pub fn assess(observation: &PatientObservation) -> DashboardSummary {
    DashboardSummary {
        diabetes: diabetes_assessment(observation),
        hypertension: hypertension_assessment(observation),
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(sys: i32, glucose: i32, hba1c: f64) -> PatientObservation {
        PatientObservation {
            name: "Test".into(),
            age: 55,
            sys,
            dia: 90,
            glucose,
            hba1c,
            bmi: 27.0,
        }
    }

    #[test]
    fn hba1c_tiers_are_exclusive() {
        assert_eq!(diabetes_assessment(&obs(120, 100, 8.0)).risk_score.value(), 40);
        assert_eq!(diabetes_assessment(&obs(120, 100, 12.5)).risk_score.value(), 40);
        assert_eq!(diabetes_assessment(&obs(120, 100, 7.99)).risk_score.value(), 25);
        assert_eq!(diabetes_assessment(&obs(120, 100, 6.5)).risk_score.value(), 25);
        assert_eq!(diabetes_assessment(&obs(120, 100, 6.49)).risk_score.value(), 0);
    }

    #[test]
    fn glucose_adds_independently() {
        assert_eq!(diabetes_assessment(&obs(120, 180, 5.0)).risk_score.value(), 30);
        assert_eq!(diabetes_assessment(&obs(120, 179, 5.0)).risk_score.value(), 0);
        assert_eq!(diabetes_assessment(&obs(120, 180, 7.0)).risk_score.value(), 55);
        assert_eq!(diabetes_assessment(&obs(120, 200, 9.0)).risk_score.value(), 70);
    }

    #[test]
    fn out_of_range_values_still_score() {
        assert_eq!(diabetes_assessment(&obs(-10, -50, -1.0)).risk_score.value(), 0);
        assert_eq!(diabetes_assessment(&obs(120, 100, f64::NAN)).risk_score.value(), 0);
        assert_eq!(
            diabetes_assessment(&obs(120, i32::MAX, f64::INFINITY)).risk_score.value(),
            70
        );
        assert_eq!(hypertension_assessment(&obs(i32::MIN, 0, 0.0)).risk_score.value(), 0);
        assert_eq!(hypertension_assessment(&obs(i32::MAX, 0, 0.0)).risk_score.value(), 60);
    }

    #[test]
    fn diabetes_bundle_is_constant() {
        let low = diabetes_assessment(&obs(100, 80, 5.0));
        let high = diabetes_assessment(&obs(100, 390, 14.0));
        assert_eq!(low.medications, high.medications);
        assert_eq!(low.advice, high.advice);
        assert_eq!(low.medications.len(), 3);
        assert_eq!(low.advice.len(), 2);
        assert_eq!(low.medications[0], "Metformin 500mg twice daily (2 lần/ngày)");
        assert_eq!(low.advice[1], "Exercise 30 min/day (Tập 30 phút mỗi ngày)");
    }

    #[test]
    fn systolic_tiers_first_match_wins() {
        let cases = [
            (220, 60, 3),
            (180, 60, 3),
            (179, 40, 2),
            (160, 40, 2),
            (159, 25, 2),
            (140, 25, 2),
            (139, 0, 2),
            (80, 0, 2),
        ];
        for (sys, risk, advice_len) in cases {
            let result = hypertension_assessment(&obs(sys, 100, 5.0));
            assert_eq!(result.risk_score.value(), risk, "sys={sys}");
            assert_eq!(result.advice.len(), advice_len, "sys={sys}");
            assert_eq!(result.medications.len(), 2, "sys={sys}");
        }
    }

    #[test]
    fn crisis_advice_comes_first() {
        let result = hypertension_assessment(&obs(185, 100, 5.0));
        assert_eq!(
            result.advice,
            vec![
                "Hypertensive crisis – Emergency (Cơn THA – Cấp cứu)".to_string(),
                "Low salt diet (Chế độ ăn giảm muối)".to_string(),
                "Home BP monitoring (Theo dõi HA tại nhà)".to_string(),
            ]
        );

        let below = hypertension_assessment(&obs(175, 100, 5.0));
        assert!(!below.advice.iter().any(|a| a.starts_with("Hypertensive crisis")));
    }

    #[test]
    fn dashboard_example() {
        let summary = assess(&obs(150, 180, 8.0));
        assert_eq!(summary.diabetes.risk_score.value(), 70);
        assert_eq!(summary.hypertension.risk_score.value(), 25);
    }

    #[test]
    fn assessments_are_repeatable_and_independent() {
        let observation = obs(185, 250, 9.1);
        let first = assess(&observation);
        let second = assess(&observation);
        assert_eq!(first, second);
        assert_eq!(first.diabetes, diabetes_assessment(&observation));
        assert_eq!(first.hypertension, hypertension_assessment(&observation));
        assert_eq!(Condition::Diabetes.assess(&observation), first.diabetes);
    }

    #[test]
    fn bmi_and_age_do_not_affect_scores() {
        let base = obs(165, 190, 7.0);
        let other = PatientObservation {
            age: 99,
            bmi: 39.9,
            dia: 140,
            name: String::new(),
            ..base.clone()
        };
        assert_eq!(assess(&base), assess(&other));
    }
}
