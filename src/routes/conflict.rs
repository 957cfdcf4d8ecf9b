use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Serialize;

use crate::constants::{MAX_COUNTRY_ROWS, WARN_TRUNCATED_LISTING};
use crate::db::conflicts;
use crate::error::{AppError, Result};
use crate::models::{ConflictRecord, PageParams};
use crate::routes::params::{self, QueryPairs};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ConflictPage {
    pub rows_returned: i64,
    pub offset: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub items: Vec<ConflictRecord>,
}

#[derive(Debug, Serialize)]
pub struct CountryListing {
    pub rows_returned: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub items: Vec<ConflictRecord>,
}

/// Paginated listing, optionally filtered to a set of countries
///
/// GET /v1/conflictdata?offset=0&page_size=20&country=Mali&country=Niger
///
/// Returns 404 when the offset is at or past the number of matching rows,
/// including when nothing matches.
pub async fn list_conflicts(
    State(state): State<AppState>,
    query: std::result::Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<ConflictPage>> {
    let Query(query) = query?;
    let defaults = PageParams::default();
    let page = PageParams::new(
        params::integer(&query, "offset", defaults.offset)?,
        params::integer(&query, "page_size", defaults.page_size)?,
    )
    .map_err(AppError::InvalidInput)?;
    let countries = params::all(&query, "country");

    tracing::debug!(
        "Listing conflict data: offset {}, page_size {}, countries {:?}",
        page.offset,
        page.page_size,
        countries
    );

    let row_count = conflicts::count_conflicts(&state.pool, &countries).await?;
    if !page.in_range(row_count) {
        return Err(AppError::NotFound(format!(
            "Rows returned: {}. Offset parameter exceeds dataset length",
            row_count
        )));
    }

    let items = conflicts::list_page(&state.pool, &countries, page).await?;

    Ok(Json(ConflictPage {
        rows_returned: row_count,
        offset: page.offset,
        page_size: page.page_size,
        total_pages: page.total_pages(row_count),
        items,
    }))
}

/// Every admin1 row for one country, capped at MAX_COUNTRY_ROWS
pub async fn list_by_country(
    State(state): State<AppState>,
    country: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<CountryListing>> {
    let Path(country) = country?;
    let row_count = conflicts::count_by_country(&state.pool, &country).await?;
    if row_count == 0 {
        return Err(AppError::NotFound(format!("No data found for \"{}\"", country)));
    }

    let items = conflicts::list_by_country(&state.pool, &country, MAX_COUNTRY_ROWS).await?;

    let warning = (row_count > MAX_COUNTRY_ROWS).then(|| {
        tracing::info!(
            "Country listing for '{}' truncated: {} rows (max: {})",
            country,
            row_count,
            MAX_COUNTRY_ROWS
        );
        format!(
            "Result set restricted to {} rows. {}",
            MAX_COUNTRY_ROWS, WARN_TRUNCATED_LISTING
        )
    });

    Ok(Json(CountryListing {
        rows_returned: row_count,
        warning,
        items,
    }))
}
