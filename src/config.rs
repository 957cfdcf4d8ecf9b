use std::env;

use chrono::Duration;

use crate::constants::DEFAULT_DATABASE_PATH;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    pub secret_key: String,
    pub access_token_expire_minutes: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let secret_key =
            env::var("SECRET_KEY").map_err(|_| "SECRET_KEY must be set for token signing")?;
        if secret_key.is_empty() {
            return Err("SECRET_KEY must not be empty".to_string());
        }

        let access_token_expire_minutes = parse_expire_minutes(
            &env::var("ACCESS_TOKEN_EXPIRE_MINUTES").unwrap_or_else(|_| "30".to_string()),
        )?;

        Ok(Config {
            server_host,
            server_port,
            database_path,
            allowed_origins,
            environment,
            secret_key,
            access_token_expire_minutes,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Lifetime of newly issued access tokens
    pub fn token_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expire_minutes)
    }
}

fn parse_expire_minutes(raw: &str) -> Result<i64, String> {
    match raw.trim().parse::<i64>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err("Invalid ACCESS_TOKEN_EXPIRE_MINUTES".to_string()),
    }
}
