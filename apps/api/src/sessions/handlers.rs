use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::fold::{FoldSimulator, FoldView, NumericInput, SimulationParameters};
use crate::sessions::Session;
use crate::state::AppState;

/// Parameters as sent by the page: numbers or raw input-field text.
#[derive(Debug, Deserialize)]
pub struct ParametersRequest {
    pub base_thickness_mm: NumericInput,
    pub side_length_cm: NumericInput,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub parameters: SimulationParameters,
    pub view: FoldView,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn respond(state: &AppState, id: Uuid, session: &Session) -> Json<SessionResponse> {
    Json(SessionResponse {
        session_id: id,
        parameters: *session.simulator.parameters(),
        view: session.simulator.view(state.config.locale),
        created_at: session.created_at,
        updated_at: session.updated_at,
    })
}

/// POST /api/v1/sessions
///
/// A request without a JSON body starts from the configured defaults.
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Result<Json<ParametersRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let simulator = match body {
        Ok(Json(req)) => FoldSimulator::from_inputs(&req.base_thickness_mm, &req.side_length_cm),
        Err(JsonRejection::MissingJsonContentType(_)) => {
            FoldSimulator::new(state.config.default_parameters)
        }
        Err(rejection) => return Err(rejection.into()),
    };
    let (id, session) = state.sessions.create(simulator).await?;
    Ok((StatusCode::CREATED, respond(&state, id, &session)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(respond(&state, id, &session))
}

/// POST /api/v1/sessions/:id/increment
pub async fn handle_increment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let (_, session) = state.sessions.update(id, |sim| sim.increment()).await?;
    Ok(respond(&state, id, &session))
}

/// POST /api/v1/sessions/:id/decrement
pub async fn handle_decrement(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let (changed, session) = state.sessions.update(id, |sim| sim.decrement()).await?;
    if !changed {
        debug!(session_id = %id, "Decrement at zero folds ignored");
    }
    Ok(respond(&state, id, &session))
}

/// PUT /api/v1/sessions/:id/parameters
///
/// Invalid values are stored as-is; the response view is in the invalid state until
/// they are corrected.
pub async fn handle_set_parameters(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<ParametersRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let (valid, session) = state
        .sessions
        .update(id, |sim| {
            sim.set_parameter_inputs(&req.base_thickness_mm, &req.side_length_cm);
            sim.parameters().validate()
        })
        .await?;
    if let Err(e) = valid {
        debug!(session_id = %id, "Invalid parameters: {e}");
    }
    Ok(respond(&state, id, &session))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
