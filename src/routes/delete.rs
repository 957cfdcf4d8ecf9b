use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Serialize;

use crate::auth::AdminUser;
use crate::db::conflicts;
use crate::error::{AppError, Result};
use crate::routes::params::{self, QueryPairs};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DeleteConflictResponse {
    pub message: String,
}

/// Delete one conflict row by admin1 and country (admin only)
///
/// DELETE /v1/conflictdata?admin1=<region>&country=<country>
///
/// Both parameters are required. Feedback on the row is removed with it.
pub async fn delete_conflict(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    query: std::result::Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<DeleteConflictResponse>> {
    let Query(query) = query?;
    let admin1 = params::required(&query, "admin1")?;
    let country = params::required(&query, "country")?;

    tracing::info!(
        "Admin user {} requested deletion of {}, {}",
        admin.email,
        admin1,
        country
    );

    let deleted = conflicts::delete_by_region(&state.pool, admin1, country)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No rows found matching admin1='{}' and country='{}'",
                admin1, country
            ))
        })?;

    tracing::info!("Deleted row id {} for {}, {}", deleted.id, admin1, country);

    Ok(Json(DeleteConflictResponse {
        message: format!(
            "Deleted conflict data for admin1='{}' in country='{}'",
            admin1, country
        ),
    }))
}
