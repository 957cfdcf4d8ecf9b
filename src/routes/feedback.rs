use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::db::{conflicts, feedback, Db};
use crate::error::{AppError, Result};
use crate::models::{ConflictRecord, Feedback, RegionCandidate};
use crate::routes::params::{self, QueryPairs};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub feedback_text: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub message: &'static str,
    pub feedback_id: i64,
}

/// Resolve an admin1 name, optionally narrowed by country, to exactly one row
///
/// No match is `NotFound`; several matches are `Ambiguous` and carry every
/// candidate so the caller can retry with `?country=`.
pub async fn resolve_region(pool: &Db, admin1: &str, country: Option<&str>) -> Result<ConflictRecord> {
    let mut matches = conflicts::find_by_region(pool, admin1, country).await?;

    match matches.len() {
        0 => {
            let scope = country
                .map(|c| format!(" and country '{}'", c))
                .unwrap_or_default();
            Err(AppError::NotFound(format!(
                "No region found matching '{}'{}",
                admin1, scope
            )))
        }
        1 => Ok(matches.remove(0)),
        _ => Err(AppError::Ambiguous {
            message: format!(
                "Multiple regions found for '{}'. Specify ?country=<name> to disambiguate.",
                admin1
            ),
            matches: matches.iter().map(RegionCandidate::from).collect(),
        }),
    }
}

/// Leave feedback on an admin1 region
///
/// POST /v1/conflictdata/{admin1}/userfeedback?country=<optional>
pub async fn submit_feedback(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    admin1: std::result::Result<Path<String>, PathRejection>,
    query: std::result::Result<Query<QueryPairs>, QueryRejection>,
    payload: std::result::Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FeedbackResponse>)> {
    let Path(admin1) = admin1?;
    let Query(query) = query?;
    let Json(payload) = payload?;
    Feedback::validate_text(&payload.feedback_text).map_err(AppError::InvalidInput)?;

    let country = params::first(&query, "country");
    let record = resolve_region(&state.pool, &admin1, country).await?;

    let feedback_id =
        feedback::insert_feedback(&state.pool, user.id, record.id, &payload.feedback_text)
            .await?;

    tracing::info!(
        "User {} left feedback {} on {} / {}",
        user.id,
        feedback_id,
        record.country,
        record.admin1
    );

    Ok((
        StatusCode::CREATED,
        Json(FeedbackResponse {
            message: "Feedback submitted",
            feedback_id,
        }),
    ))
}
