use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::cache::RiskScore;
use crate::error::Result;
use crate::AppState;

/// Average risk score for a country
///
/// 200 with the value once cached, 202 while it is being computed, 404 for an
/// unknown country. Never waits on the computation.
pub async fn get_risk_score(
    State(state): State<AppState>,
    country: std::result::Result<Path<String>, PathRejection>,
) -> Result<Response> {
    let Path(country) = country?;
    let response = match state.risk_scores.get(&country).await? {
        RiskScore::Cached(average) => Json(json!({
            "country": country,
            "average_risk_score": average,
        }))
        .into_response(),
        RiskScore::Accepted => (
            StatusCode::ACCEPTED,
            Json(json!({
                "detail": format!("Computing risk score average for {}", country),
            })),
        )
            .into_response(),
    };

    Ok(response)
}
