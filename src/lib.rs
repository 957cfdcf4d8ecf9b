//! Conflict Data API Library
//!
//! Conflict-event statistics per country and admin1 region, with user
//! accounts, feedback, and a cached per-country average risk score.

pub mod auth;
pub mod cache;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod security;
pub mod seed;

pub use cache::{RiskScore, RiskScoreCache};
pub use config::Config;
pub use db::{create_pool, run_migrations, Db};
pub use error::{AppError, Result};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: Db,
    pub config: Config,
    pub risk_scores: RiskScoreCache<Db>,
}

impl AppState {
    /// Create a new AppState; the risk score cache starts empty
    pub fn new(pool: Db, config: Config) -> Self {
        let risk_scores = RiskScoreCache::new(pool.clone());
        Self {
            pool,
            config,
            risk_scores,
        }
    }
}
