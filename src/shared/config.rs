use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_info};

pub const DEFAULT_CLIENT_ID_PREFIX: &str = "C";
pub const DEFAULT_CLIENT_ID_WIDTH: usize = 4;
pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const DEFAULT_ALLOCATION_ATTEMPTS: u32 = 3;

/// Runtime configuration, read from the process environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub pool_max_size: Option<u32>,
    pub client_ids: ClientIdSettings,
    pub seed_demo_users: bool,
}

/// Knobs for client identifier allocation and search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdSettings {
    pub prefix: String,
    pub width: usize,
    pub search_default_limit: usize,
    pub max_attempts: u32,
}

impl Default for ClientIdSettings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_CLIENT_ID_PREFIX.to_string(),
            width: DEFAULT_CLIENT_ID_WIDTH,
            search_default_limit: DEFAULT_SEARCH_LIMIT,
            max_attempts: DEFAULT_ALLOCATION_ATTEMPTS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").map_err(|_| {
            AppError::ValidationError("DATABASE_URL environment variable not found".to_string())
        })?;

        let client_ids = ClientIdSettings {
            prefix: env::var("CLIENT_ID_PREFIX")
                .unwrap_or_else(|_| DEFAULT_CLIENT_ID_PREFIX.to_string()),
            width: load_or("CLIENT_ID_WIDTH", DEFAULT_CLIENT_ID_WIDTH)?,
            search_default_limit: load_or("CLIENT_SEARCH_DEFAULT_LIMIT", DEFAULT_SEARCH_LIMIT)?,
            max_attempts: load_or("CLIENT_ID_MAX_ATTEMPTS", DEFAULT_ALLOCATION_ATTEMPTS)?,
        };
        client_ids.validate()?;

        let config = Self {
            database_url,
            host: env::var("TOWDESK_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: load_or("TOWDESK_PORT", 5000)?,
            pool_max_size: load_optional("DB_POOL_MAX_SIZE")?,
            client_ids,
            seed_demo_users: load_or("TOWDESK_SEED_DEMO_USERS", 0u8)? == 1,
        };

        log_info!(
            "Configuration loaded: bind {}:{}, client ids {}{}",
            config.host,
            config.port,
            config.client_ids.prefix,
            "0".repeat(config.client_ids.width)
        );

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Width of `client_profiles.client_id_number`.
pub const CLIENT_ID_MAX_LEN: usize = 32;
// Digits in the largest counter an identifier can carry past its padding.
const COUNTER_DIGITS_MAX: usize = 20;

impl ClientIdSettings {
    pub fn validate(&self) -> AppResult<()> {
        if self.prefix.is_empty() || !self.prefix.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::ValidationError(format!(
                "CLIENT_ID_PREFIX must be non-empty ASCII letters, got '{}'",
                self.prefix
            )));
        }
        if self.width == 0 {
            return Err(AppError::ValidationError(
                "CLIENT_ID_WIDTH must be at least 1".to_string(),
            ));
        }
        let longest = self.prefix.len() + self.width.max(COUNTER_DIGITS_MAX);
        if longest > CLIENT_ID_MAX_LEN {
            return Err(AppError::ValidationError(format!(
                "CLIENT_ID_PREFIX and CLIENT_ID_WIDTH allow identifiers of {longest} characters, \
                 the column holds {CLIENT_ID_MAX_LEN}"
            )));
        }
        if self.search_default_limit == 0 {
            return Err(AppError::ValidationError(
                "CLIENT_SEARCH_DEFAULT_LIMIT must be positive".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(AppError::ValidationError(
                "CLIENT_ID_MAX_ATTEMPTS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn load_or<T: FromStr>(key: &str, default: T) -> AppResult<T>
where
    T::Err: Display,
{
    match load_optional(key)? {
        Some(value) => Ok(value),
        None => {
            log_debug!("{key} not set, using default");
            Ok(default)
        }
    }
}

fn load_optional<T: FromStr>(key: &str) -> AppResult<Option<T>>
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AppError::ValidationError(format!("Invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(None),
    }
}
