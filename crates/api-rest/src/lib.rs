//! # API REST
//!
//! REST API implementation for DiaBP.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, CORS, optional API key)
//!
//! Uses `api-shared` for wire types and `diabp-core` for every clinical operation.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use api_shared::{
    validate_api_key, AnalyticsQuery, AnalyticsRes, AssessmentRes, ChatMessageReq,
    ChatMessageRes, ChatTranscriptRes, ChatTurnRes, CreateChatSessionRes, DailyReadingRes,
    DashboardRes, HealthRes, HealthService, LandmarkReq, MetricSummaryRes, ObservationReq,
    PrescriptionRes, StrokeScreenReq, StrokeScreenRes, API_KEY_HEADER,
};
use diabp_core::{
    assess, generate_series, render_report, screen_frame, validate_observation, CareError,
    ChatSessions, Condition, CoreConfig, LandmarkFrame, NonEmptyText, PatientObservation,
    Prescription,
};

type ApiError = (StatusCode, &'static str);

/// Application state shared across REST API handlers.
///
/// Holds the startup configuration, the chat session registry (each session owns its
/// transcript) and the optional API key.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CoreConfig>,
    sessions: ChatSessions,
    api_key: Option<Arc<str>>,
}

impl AppState {
    /// Builds the state. A blank `api_key` is treated as "no key configured".
    pub fn new(cfg: Arc<CoreConfig>, api_key: Option<String>) -> Self {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .map(Arc::from);
        Self {
            cfg,
            sessions: ChatSessions::new(),
            api_key,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        assess_both,
        assess_condition,
        create_chat_session,
        read_chat_transcript,
        close_chat_session,
        send_chat_message,
        prescription,
        analytics,
        report,
        screen_stroke,
    ),
    components(schemas(
        HealthRes,
        ObservationReq,
        AssessmentRes,
        DashboardRes,
        CreateChatSessionRes,
        ChatMessageReq,
        ChatMessageRes,
        ChatTranscriptRes,
        ChatTurnRes,
        PrescriptionRes,
        AnalyticsRes,
        DailyReadingRes,
        MetricSummaryRes,
        LandmarkReq,
        StrokeScreenReq,
        StrokeScreenRes,
    ))
)]
struct ApiDoc;

/// Builds the REST router with all routes, Swagger UI and CORS.
///
/// `/health` and the documentation routes are always open. Every other route requires the
/// `x-api-key` header when the state carries an API key.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/assessments", post(assess_both))
        .route("/assessments/:condition", post(assess_condition))
        .route("/chat/sessions", post(create_chat_session))
        .route(
            "/chat/sessions/:id",
            get(read_chat_transcript).delete(close_chat_session),
        )
        .route("/chat/sessions/:id/messages", post(send_chat_message))
        .route("/prescription", get(prescription))
        .route("/analytics", get(analytics))
        .route("/report", get(report))
        .route("/stroke/screen", post(screen_stroke))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves the router until the process is stopped.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("-- DiaBP REST API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.api_key.clone() else {
        return Ok(next.run(request).await);
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match validate_api_key(provided, &expected) {
        Ok(()) => Ok(next.run(request).await),
        Err(e) => {
            tracing::warn!("Rejected request to {}: {}", request.uri().path(), e);
            Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
    }
}

/// Maps a core error to a status code, logging the detail server-side.
fn care_error(context: &str, e: CareError) -> ApiError {
    match e {
        CareError::InvalidInput(_) | CareError::Text(_) | CareError::FrameParse { .. } => {
            tracing::warn!("{} rejected: {}", context, e);
            (StatusCode::BAD_REQUEST, "Bad request")
        }
        CareError::SessionNotFound(_) => {
            tracing::warn!("{} failed: {}", context, e);
            (StatusCode::NOT_FOUND, "Chat session not found")
        }
        other => {
            tracing::error!("{} error: {:?}", context, other);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

fn checked_observation(req: ObservationReq) -> Result<PatientObservation, ApiError> {
    let observation = PatientObservation::from(req);
    validate_observation(&observation).map_err(|e| care_error("Assessment", e))?;
    Ok(observation)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API.
///
/// Used for monitoring and load balancer health checks; never requires an API key.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/assessments",
    request_body = ObservationReq,
    responses(
        (status = 200, description = "Diabetes and hypertension assessments", body = DashboardRes),
        (status = 400, description = "Observation outside the accepted input domains"),
        (status = 401, description = "Missing or invalid API key")
    )
)]
/// Assess both conditions for one observation
///
/// Runs the diabetes and hypertension assessments once each, as the dashboard does.
///
/// # Errors
/// Returns `400 Bad Request` if any vital is outside the dashboard form's range.
#[axum::debug_handler]
async fn assess_both(
    State(_state): State<AppState>,
    Json(req): Json<ObservationReq>,
) -> Result<Json<DashboardRes>, ApiError> {
    let observation = checked_observation(req)?;
    let summary = assess(&observation);
    tracing::info!(
        diabetes = summary.diabetes.risk_score.value(),
        hypertension = summary.hypertension.risk_score.value(),
        "assessed observation"
    );
    Ok(Json(summary.into()))
}

#[utoipa::path(
    post,
    path = "/assessments/{condition}",
    request_body = ObservationReq,
    params(
        ("condition" = String, Path, description = "`diabetes` or `hypertension`")
    ),
    responses(
        (status = 200, description = "Assessment for one condition", body = AssessmentRes),
        (status = 400, description = "Unknown condition or observation out of range"),
        (status = 401, description = "Missing or invalid API key")
    )
)]
/// Assess a single condition
#[axum::debug_handler]
async fn assess_condition(
    State(_state): State<AppState>,
    Path(condition): Path<Condition>,
    Json(req): Json<ObservationReq>,
) -> Result<Json<AssessmentRes>, ApiError> {
    let observation = checked_observation(req)?;
    let result = condition.assess(&observation);
    tracing::info!(%condition, risk = result.risk_score.value(), "assessed observation");
    Ok(Json(AssessmentRes::new(condition, result)))
}

#[utoipa::path(
    post,
    path = "/chat/sessions",
    responses(
        (status = 201, description = "Chat session created", body = CreateChatSessionRes),
        (status = 401, description = "Missing or invalid API key"),
        (status = 500, description = "Internal server error")
    )
)]
/// Open a virtual doctor chat session
///
/// Each session owns its own transcript; messages sent to one session never appear in
/// another.
#[axum::debug_handler]
async fn create_chat_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateChatSessionRes>), ApiError> {
    let session_id = state
        .sessions
        .create()
        .map_err(|e| care_error("Create chat session", e))?;
    Ok((StatusCode::CREATED, Json(CreateChatSessionRes { session_id })))
}

#[utoipa::path(
    get,
    path = "/chat/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Chat session identifier")
    ),
    responses(
        (status = 200, description = "Session transcript", body = ChatTranscriptRes),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Unknown session")
    )
)]
/// Read a chat session's transcript
#[axum::debug_handler]
async fn read_chat_transcript(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatTranscriptRes>, ApiError> {
    let turns = state
        .sessions
        .transcript(id)
        .map_err(|e| care_error("Read chat transcript", e))?;
    Ok(Json(ChatTranscriptRes {
        session_id: id,
        turns: turns.into_iter().map(ChatTurnRes::from).collect(),
    }))
}

#[utoipa::path(
    delete,
    path = "/chat/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Chat session identifier")
    ),
    responses(
        (status = 204, description = "Session closed and transcript dropped"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Unknown session")
    )
)]
/// Close a chat session
#[axum::debug_handler]
async fn close_chat_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .sessions
        .remove(id)
        .map_err(|e| care_error("Close chat session", e))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/chat/sessions/{id}/messages",
    request_body = ChatMessageReq,
    params(
        ("id" = Uuid, Path, description = "Chat session identifier")
    ),
    responses(
        (status = 200, description = "Reply and updated transcript", body = ChatMessageRes),
        (status = 400, description = "Blank or oversized message"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Unknown session")
    )
)]
/// Send a message to the virtual doctor
///
/// Appends the patient's message and the keyword-matched reply to the session transcript.
///
/// # Errors
/// Returns `400 Bad Request` for a blank or oversized message and `404 Not Found` for an
/// unknown or closed session.
#[axum::debug_handler]
async fn send_chat_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ChatMessageReq>,
) -> Result<Json<ChatMessageRes>, ApiError> {
    let message = NonEmptyText::new(&req.message)
        .map_err(|e| care_error("Send chat message", e.into()))?;
    let reply = state
        .sessions
        .send(id, &message)
        .map_err(|e| care_error("Send chat message", e))?;
    Ok(Json(ChatMessageRes {
        session_id: id,
        reply: reply.reply.to_string(),
        transcript: reply.transcript.into_iter().map(ChatTurnRes::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/prescription",
    responses(
        (status = 200, description = "Digital prescription", body = PrescriptionRes),
        (status = 401, description = "Missing or invalid API key")
    )
)]
/// Generate the digital prescription
#[axum::debug_handler]
async fn prescription(State(_state): State<AppState>) -> Json<PrescriptionRes> {
    Json(Prescription::standard().into())
}

#[utoipa::path(
    get,
    path = "/analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Synthetic daily series with summary", body = AnalyticsRes),
        (status = 400, description = "Invalid window"),
        (status = 401, description = "Missing or invalid API key")
    )
)]
/// Synthetic blood pressure and glucose series
///
/// Window length and seed fall back to the server configuration; the start date falls back
/// to today.
#[axum::debug_handler]
async fn analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsRes>, ApiError> {
    let days = query.days.unwrap_or_else(|| state.cfg.analytics_days());
    let seed = query.seed.or_else(|| state.cfg.analytics_seed());
    let start = query
        .start
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let series = generate_series(start, days, seed).map_err(|e| care_error("Analytics", e))?;
    Ok(Json(series.into()))
}

#[utoipa::path(
    get,
    path = "/report",
    responses(
        (status = 200, description = "PDF report download (application/pdf)"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 500, description = "Internal server error")
    )
)]
/// Download the PDF clinical report
#[axum::debug_handler]
async fn report(State(_state): State<AppState>) -> Result<Response, ApiError> {
    let report = render_report().map_err(|e| care_error("Render report", e))?;
    let disposition = format!("attachment; filename=\"{}\"", report.file_name());
    Ok((
        [
            (header::CONTENT_TYPE, report.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/stroke/screen",
    request_body = StrokeScreenReq,
    responses(
        (status = 200, description = "FAST+ screening verdict", body = StrokeScreenRes),
        (status = 401, description = "Missing or invalid API key")
    )
)]
/// Screen one frame of landmarks for stroke warning signs
///
/// Not a diagnosis: the response always carries the screening disclaimer.
#[axum::debug_handler]
async fn screen_stroke(
    State(_state): State<AppState>,
    Json(req): Json<StrokeScreenReq>,
) -> Json<StrokeScreenRes> {
    let frame = LandmarkFrame::from(req);
    Json(screen_frame(&frame).into())
}
