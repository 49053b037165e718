use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::ApiQuery;
use crate::fold::format::to_js_string;
use crate::fold::params::parse_leading_number;
use crate::fold::{compute, FoldResult, FoldView, SimulationParameters};
use crate::state::AppState;

/// Omitted parameters fall back to the configured defaults.
#[derive(Debug, Deserialize)]
pub struct FoldQuery {
    #[serde(default)]
    pub folds: u32,
    pub base_thickness_mm: Option<String>,
    pub side_length_cm: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FoldResponse {
    pub parameters: SimulationParameters,
    pub result: FoldResult,
    pub view: FoldView,
}

/// GET /api/v1/fold
/// One-shot computation without a session. Invalid parameters are a 400 here.
pub async fn handle_fold(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<FoldQuery>,
) -> Result<Json<FoldResponse>, AppError> {
    let defaults = state.config.default_parameters;
    let parameters = SimulationParameters::new(
        resolve(query.base_thickness_mm.as_deref(), defaults.base_thickness_mm),
        resolve(query.side_length_cm.as_deref(), defaults.initial_side_length_cm),
    );

    let result = compute(&parameters, query.folds)?;
    let base_label = query
        .base_thickness_mm
        .unwrap_or_else(|| to_js_string(parameters.base_thickness_mm));
    let view = FoldView::from_result(&result, &base_label, state.config.locale);

    Ok(Json(FoldResponse {
        parameters,
        result,
        view,
    }))
}

fn resolve(raw: Option<&str>, default: f64) -> f64 {
    raw.map_or(default, |text| parse_leading_number(text).unwrap_or(f64::NAN))
}
