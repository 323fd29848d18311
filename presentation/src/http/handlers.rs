//! Route handlers
//!
//! Thin adapters: parse and validate the request, call one use case, and
//! shape the JSON reply. Behaviour lives in the application layer.

use super::dto::{
    AskAiRequest, AskAiResponse, HealthResponse, MessageResponse, SendCommandRequest,
    SendCommandResponse, SessionListResponse, SessionSummaryView, SessionView,
    StartSessionResponse,
};
use super::error::ApiError;
use super::state::AppState;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::{error, warn};
use voicelog_domain::{SessionId, Transcript};

type ApiResult<T> = Result<T, ApiError>;

/// Ids in the path that do not parse can never name a session.
fn parse_path_id(raw: &str) -> ApiResult<SessionId> {
    raw.parse().map_err(|_| ApiError::session_not_found())
}

pub async fn start_session(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<StartSessionResponse>)> {
    let session = state.sessions.create_session().await.map_err(|e| {
        error!("Failed to start session: {}", e);
        ApiError::Internal("Failed to start session".to_string())
    })?;

    Ok((
        StatusCode::CREATED,
        Json(StartSessionResponse {
            message: "Session started successfully",
            data: SessionView::from(&session),
        }),
    ))
}

pub async fn send_command(
    State(state): State<AppState>,
    payload: Result<Json<SendCommandRequest>, JsonRejection>,
) -> ApiResult<Json<SendCommandResponse>> {
    let Json(request) = payload?;
    let valid = request
        .validate(state.max_command_chars)
        .map_err(ApiError::Validation)?;

    let outcome = state
        .commands
        .execute(valid.session_id, &valid.command)
        .await?;
    Ok(Json(SendCommandResponse {
        response: outcome.response_text,
    }))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<SessionView>> {
    let session_id = parse_path_id(&session_id)?;
    let session = state.sessions.get_session(session_id).await?;
    Ok(Json(SessionView::from(&session)))
}

pub async fn transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<Transcript>> {
    let session_id = parse_path_id(&session_id)?;
    Ok(Json(state.transcripts.execute(session_id).await?))
}

pub async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let not_ended = || ApiError::NotFound("Session not found or already ended".to_string());
    let session_id = session_id.parse::<SessionId>().map_err(|_| not_ended())?;

    let ended = state.sessions.end_session(session_id).await.map_err(|e| {
        error!(session_id = %session_id, "Error ending session: {}", e);
        ApiError::internal()
    })?;
    if !ended {
        return Err(not_ended());
    }

    Ok(Json(MessageResponse {
        message: "Session ended successfully",
    }))
}

pub async fn ask_ai(
    State(state): State<AppState>,
    payload: Result<Json<AskAiRequest>, JsonRejection>,
) -> ApiResult<Json<AskAiResponse>> {
    let Json(request) = payload?;
    let (input, rejected_session) = request.into_input();
    if let Some(raw) = rejected_session {
        warn!(
            "Ignoring malformed session id on ask-ai, interaction will not be logged: {}",
            raw
        );
    }

    let output = state.ask.execute(input).await?;
    Ok(Json(output.into()))
}

pub async fn list_sessions(State(state): State<AppState>) -> ApiResult<Json<SessionListResponse>> {
    let summaries = state.sessions.list_sessions().await.map_err(|e| {
        error!("Error listing sessions: {}", e);
        ApiError::internal()
    })?;

    Ok(Json(SessionListResponse {
        sessions: summaries.iter().map(SessionSummaryView::from).collect(),
    }))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<StatusCode> {
    let session_id = parse_path_id(&session_id)?;

    let removed = state.sessions.delete_session(session_id).await.map_err(|e| {
        error!(session_id = %session_id, "Error deleting session: {}", e);
        ApiError::internal()
    })?;
    if !removed {
        return Err(ApiError::session_not_found());
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
