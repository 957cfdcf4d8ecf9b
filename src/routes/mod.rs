pub mod auth;
pub mod conflict;
pub mod delete;
pub mod feedback;
pub mod health;
pub mod params;
pub mod riskscore;

use axum::{
    routing::{get, post},
    Router,
};

use crate::constants::API_PREFIX;
use crate::AppState;

pub use auth::{login, me, register};
pub use conflict::{list_by_country, list_conflicts};
pub use delete::delete_conflict;
pub use feedback::submit_feedback;
pub use health::health_check;
pub use riskscore::get_risk_score;

/// Full HTTP surface: `/health` plus every versioned endpoint
pub fn router(state: AppState) -> Router {
    // One parameter name for the segment after /conflictdata so the routes
    // below do not conflict; each handler reads it as country or admin1.
    let v1 = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route(
            "/conflictdata",
            get(list_conflicts).delete(delete_conflict),
        )
        .route("/conflictdata/:name", get(list_by_country))
        .route("/conflictdata/:name/riskscore", get(get_risk_score))
        .route("/conflictdata/:name/userfeedback", post(submit_feedback));

    Router::new()
        .route("/health", get(health_check))
        .nest(API_PREFIX, v1)
        .with_state(state)
}
