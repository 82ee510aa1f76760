//! Request and response bodies shared by the API surfaces.
//!
//! These are wire types: they derive `ToSchema` for the OpenAPI document and convert to and
//! from the domain types in `diabp_core`. Field names are the public JSON contract.

use chrono::NaiveDate;
use diabp_core::{
    AnalyticsSeries, AssessmentResult, ChatTurn, Condition, DashboardSummary, Finding,
    Landmark, LandmarkFrame, MetricSummary, PatientObservation, Prescription, ScreeningVerdict,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Assessments
// ---------------------------------------------------------------------------

/// Patient vitals, checked against the dashboard input domains before scoring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ObservationReq {
    #[serde(default)]
    pub name: String,
    pub age: u32,
    pub sys: i32,
    pub dia: i32,
    pub glucose: i32,
    pub hba1c: f64,
    pub bmi: f64,
}

impl From<ObservationReq> for PatientObservation {
    fn from(req: ObservationReq) -> Self {
        PatientObservation {
            name: req.name,
            age: req.age,
            sys: req.sys,
            dia: req.dia,
            glucose: req.glucose,
            hba1c: req.hba1c,
            bmi: req.bmi,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssessmentRes {
    /// Condition assessed (`diabetes` or `hypertension`).
    pub condition: String,
    /// Bilingual label for the risk metric.
    pub label: String,
    /// Risk percentage in `0..=100`.
    pub risk_score: u8,
    pub medications: Vec<String>,
    pub advice: Vec<String>,
}

impl AssessmentRes {
    pub fn new(condition: Condition, result: AssessmentResult) -> Self {
        Self {
            condition: condition.to_string(),
            label: condition.risk_label().to_string(),
            risk_score: result.risk_score.value(),
            medications: result.medications,
            advice: result.advice,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardRes {
    pub diabetes: AssessmentRes,
    pub hypertension: AssessmentRes,
}

impl From<DashboardSummary> for DashboardRes {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            diabetes: AssessmentRes::new(Condition::Diabetes, summary.diabetes),
            hypertension: AssessmentRes::new(Condition::Hypertension, summary.hypertension),
        }
    }
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateChatSessionRes {
    pub session_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessageReq {
    /// Free-text symptom description. Must not be blank.
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatTurnRes {
    /// Display label of the speaker (`You` or `AI Doctor`).
    pub speaker: String,
    pub text: String,
}

impl From<ChatTurn> for ChatTurnRes {
    fn from(turn: ChatTurn) -> Self {
        Self {
            speaker: turn.speaker.label().to_string(),
            text: turn.text,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessageRes {
    pub session_id: Uuid,
    pub reply: String,
    pub transcript: Vec<ChatTurnRes>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatTranscriptRes {
    pub session_id: Uuid,
    pub turns: Vec<ChatTurnRes>,
}

// ---------------------------------------------------------------------------
// Prescription
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PrescriptionRes {
    pub items: Vec<String>,
    /// The items as a bulleted plain-text list.
    pub text: String,
}

impl From<Prescription> for PrescriptionRes {
    fn from(prescription: Prescription) -> Self {
        let text = prescription.render();
        Self {
            items: prescription.items,
            text,
        }
    }
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    /// Number of days; defaults to the server's configured window.
    pub days: Option<usize>,
    /// Seed for reproducible values.
    pub seed: Option<u64>,
    /// First date of the window; defaults to today.
    pub start: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyReadingRes {
    pub date: NaiveDate,
    pub blood_pressure: f64,
    pub glucose: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetricSummaryRes {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl From<MetricSummary> for MetricSummaryRes {
    fn from(m: MetricSummary) -> Self {
        Self {
            mean: m.mean,
            min: m.min,
            max: m.max,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsRes {
    pub readings: Vec<DailyReadingRes>,
    pub blood_pressure: Option<MetricSummaryRes>,
    pub glucose: Option<MetricSummaryRes>,
}

impl From<AnalyticsSeries> for AnalyticsRes {
    fn from(series: AnalyticsSeries) -> Self {
        let summary = series.summary();
        Self {
            readings: series
                .readings
                .into_iter()
                .map(|r| DailyReadingRes {
                    date: r.date,
                    blood_pressure: r.blood_pressure,
                    glucose: r.glucose,
                })
                .collect(),
            blood_pressure: summary.map(|s| s.blood_pressure.into()),
            glucose: summary.map(|s| s.glucose.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Stroke screening
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LandmarkReq {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct StrokeScreenReq {
    /// One landmark list per detected face mesh.
    #[serde(default)]
    pub faces: Vec<Vec<LandmarkReq>>,
    /// Body pose landmarks, if a body was detected.
    #[serde(default)]
    pub pose: Option<Vec<LandmarkReq>>,
}

fn to_landmarks(points: Vec<LandmarkReq>) -> Vec<Landmark> {
    points
        .into_iter()
        .map(|p| Landmark {
            x: p.x,
            y: p.y,
            z: p.z,
        })
        .collect()
}

impl From<StrokeScreenReq> for LandmarkFrame {
    fn from(req: StrokeScreenReq) -> Self {
        LandmarkFrame {
            faces: req.faces.into_iter().map(to_landmarks).collect(),
            pose: req.pose.map(to_landmarks),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StrokeScreenRes {
    pub alert: bool,
    /// Human-readable description of each finding.
    pub findings: Vec<String>,
    /// Warning banner, present only when `alert` is true.
    pub banner: Option<String>,
    pub disclaimer: String,
}

impl From<ScreeningVerdict> for StrokeScreenRes {
    fn from(verdict: ScreeningVerdict) -> Self {
        Self {
            alert: verdict.alert,
            findings: verdict.findings.iter().map(Finding::describe).collect(),
            banner: verdict.banner().map(str::to_string),
            disclaimer: verdict.disclaimer().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diabp_core::assess;

    #[test]
    fn dashboard_res_carries_labels_and_scores() {
        let obs = PatientObservation {
            sys: 185,
            ..PatientObservation::default()
        };
        let res = DashboardRes::from(assess(&obs));
        assert_eq!(res.diabetes.condition, "diabetes");
        assert_eq!(res.diabetes.label, "Diabetes Risk (%) (Nguy cơ ĐTĐ)");
        assert_eq!(res.diabetes.risk_score, 70);
        assert_eq!(res.hypertension.risk_score, 60);
        assert_eq!(res.hypertension.advice.len(), 3);
    }

    #[test]
    fn observation_req_accepts_missing_name() {
        let req: ObservationReq = serde_json::from_str(
            r#"{"age":40,"sys":120,"dia":80,"glucose":95,"hba1c":5.4,"bmi":22.0}"#,
        )
        .unwrap();
        let obs = PatientObservation::from(req);
        assert_eq!(obs.name, "");
        assert_eq!(obs.glucose, 95);
    }

    #[test]
    fn stroke_req_rejects_unknown_fields() {
        let bad_frame = serde_json::from_str::<StrokeScreenReq>(r#"{"faces":[],"hands":[]}"#);
        assert!(bad_frame.is_err());
        let bad_point =
            serde_json::from_str::<StrokeScreenReq>(r#"{"pose":[{"x":0.1,"y":0.2,"v":0.9}]}"#);
        assert!(bad_point.is_err());
        let ok = serde_json::from_str::<StrokeScreenReq>(r#"{"pose":[{"x":0.1,"y":0.2}]}"#);
        assert!(ok.is_ok());
    }

    #[test]
    fn stroke_res_omits_banner_when_clear() {
        let res = StrokeScreenRes::from(ScreeningVerdict::default());
        assert!(!res.alert);
        assert!(res.banner.is_none());
        assert!(res.disclaimer.starts_with("FAST+ Screening"));
    }
}
