//! Request-coalescing cache for per-country average risk scores.
//!
//! Each country key moves through `Unknown -> Pending -> Cached`. The first
//! caller for a key schedules the aggregation on the runtime and gets
//! `Accepted` back immediately; callers arriving while it runs also get
//! `Accepted` without scheduling anything. Once the value is published the
//! key stays cached for the life of the process.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::match_key;

/// Where the cache reads its data from
///
/// Both lookups match the country case-insensitively.
pub trait RiskScoreSource: Clone + Send + Sync + 'static {
    /// Whether at least one record exists for the country
    fn country_exists(&self, country: &str) -> impl Future<Output = Result<bool>> + Send;

    /// Average risk score over the country's records, `None` if there are none
    fn average_risk_score(
        &self,
        country: &str,
    ) -> impl Future<Output = Result<Option<f64>>> + Send;
}

/// Answer from [`RiskScoreCache::get`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiskScore {
    /// Value already computed. `None` if every matching row vanished between
    /// the existence check and the aggregation.
    Cached(Option<f64>),
    /// Computation scheduled or still running; ask again later
    Accepted,
}

/// Observable state of a single key
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CacheState {
    Unknown,
    Pending,
    Cached(Option<f64>),
}

enum Entry {
    /// A detached task is computing the value; it replaces or removes this entry
    Pending,
    Cached(Option<f64>),
}

/// Shared, cloneable handle to the risk score cache
pub struct RiskScoreCache<S> {
    source: S,
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl<S: Clone> Clone for RiskScoreCache<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<S: RiskScoreSource> RiskScoreCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Look up the average risk score for `country`
    ///
    /// Unknown countries fail with `NotFound` and leave the cache untouched.
    /// Never waits for the aggregation itself.
    pub async fn get(&self, country: &str) -> Result<RiskScore> {
        if !self.source.country_exists(country).await? {
            return Err(AppError::NotFound(format!("No data found for \"{}\"", country)));
        }

        let key = match_key(country);

        // The lock is held across the check and the insert of the Pending
        // entry, so exactly one caller schedules the computation per key.
        let mut entries = self.entries.lock().await;
        match entries.get(&key) {
            Some(Entry::Cached(value)) => return Ok(RiskScore::Cached(*value)),
            Some(Entry::Pending) => {
                tracing::debug!("Risk score for '{}' already being computed", key);
                return Ok(RiskScore::Accepted);
            }
            None => {}
        }

        tracing::info!("Scheduling risk score computation for '{}'", key);
        tokio::spawn(compute(
            self.source.clone(),
            Arc::clone(&self.entries),
            key.clone(),
            country.to_string(),
        ));
        entries.insert(key, Entry::Pending);

        Ok(RiskScore::Accepted)
    }

    /// Current state of the key for `country`
    pub async fn state(&self, country: &str) -> CacheState {
        let entries = self.entries.lock().await;
        match entries.get(&match_key(country)) {
            None => CacheState::Unknown,
            Some(Entry::Pending) => CacheState::Pending,
            Some(Entry::Cached(value)) => CacheState::Cached(*value),
        }
    }
}

/// Background task: run the aggregation for `country` and publish the result
/// under `key`.
///
/// On failure the key is dropped back to Unknown so the next caller
/// reschedules it. Errors are logged, never returned to a caller.
async fn compute<S: RiskScoreSource>(
    source: S,
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    key: String,
    country: String,
) {
    let result = source.average_risk_score(&country).await;

    let mut entries = entries.lock().await;
    match result {
        Ok(average) => {
            tracing::info!("Cached risk score for '{}': {:?}", key, average);
            entries.insert(key, Entry::Cached(average));
        }
        Err(e) => {
            tracing::error!("Error computing risk score for '{}': {}", key, e);
            if matches!(entries.get(&key), Some(Entry::Pending)) {
                entries.remove(&key);
            }
        }
    }
}
