//! # DiaBP Core
//!
//! Core logic for the DiaBP diabetes and hypertension screening tool.
//!
//! This crate contains pure clinical operations and the small amount of state they need:
//! - Risk scoring and advisory bundles for diabetes and hypertension ([`assessment`])
//! - The virtual doctor keyword responder and chat transcripts ([`chat`])
//! - The fixed digital prescription ([`prescription`])
//! - Synthetic 28-day analytics series ([`analytics`])
//! - FAST+ stroke screening over detected landmarks ([`stroke`])
//! - The PDF report export ([`report`])
//!
//! **No API concerns**: HTTP servers, authentication and CLI parsing belong in `api-rest`,
//! `api-shared` and `cli`.

pub mod analytics;
pub mod assessment;
pub mod chat;
pub mod config;
pub mod constants;
pub mod error;
pub mod observation;
pub mod prescription;
pub mod report;
pub mod stroke;
pub mod validation;

pub use analytics::{
    generate_series, AnalyticsSeries, DailyReading, MetricSummary, SeriesSummary,
};
pub use assessment::{
    assess, diabetes_assessment, hypertension_assessment, AssessmentResult, Condition,
    DashboardSummary,
};
pub use chat::{ChatReply, ChatSessions, ChatTurn, ConversationLog, Responder, Speaker};
pub use config::CoreConfig;
pub use error::{CareError, CareResult};
pub use observation::PatientObservation;
pub use prescription::Prescription;
pub use report::{render_report, RenderedReport};
pub use stroke::{screen_frame, Finding, Landmark, LandmarkFrame, ScreeningVerdict};
pub use validation::validate_observation;

pub use diabp_types::{NonEmptyText, RiskScore, TextError};
