//! Environment-driven configuration
//!
//! Values come from the process environment, after `.env` has been loaded
//! with dotenvy. Every setting has a default so a bare checkout runs.

use std::env;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const DEFAULT_DATABASE_URL: &str = "sqlite://training-dashboard.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_PREVIEW_ROWS: usize = 20;
const DEFAULT_RECENT_LIMIT: i64 = 50;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid value for {name}: '{value}' ({reason})")]
  Invalid {
    name: &'static str,
    value: String,
    reason: String,
  },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
  pub database_url: String,
  pub max_connections: u32,
  /// Rows shown in an import preview before "... and N more"
  pub preview_rows: usize,
  /// Default row limit for the recent workouts listing
  pub recent_limit: i64,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      database_url: DEFAULT_DATABASE_URL.to_string(),
      max_connections: DEFAULT_MAX_CONNECTIONS,
      preview_rows: DEFAULT_PREVIEW_ROWS,
      recent_limit: DEFAULT_RECENT_LIMIT,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    let defaults = Self::default();
    Ok(Self {
      database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
      max_connections: positive_var("DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
      preview_rows: positive_var("PREVIEW_ROWS", defaults.preview_rows)?,
      recent_limit: positive_var("RECENT_WORKOUTS_LIMIT", defaults.recent_limit)?,
    })
  }
}

fn positive_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
  T: std::str::FromStr + PartialOrd + Default,
  T::Err: std::fmt::Display,
{
  let raw = match env::var(name) {
    Ok(raw) => raw,
    Err(_) => return Ok(default),
  };

  let value: T = raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
    name,
    value: raw.clone(),
    reason: e.to_string(),
  })?;

  if value <= T::default() {
    return Err(ConfigError::Invalid {
      name,
      value: raw,
      reason: "must be greater than zero".to_string(),
    });
  }

  Ok(value)
}
