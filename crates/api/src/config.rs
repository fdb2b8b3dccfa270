use std::time::Duration;

use recordshelf_db::PoolConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development except
/// `DATABASE_URL`, which must be set.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4000`).
    pub port: u16,
    /// Deployment environment reported by `/health` (default: `development`).
    pub environment: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Database pool settings.
    pub database: PoolConfig,
}

/// Accepted values for `APP_ENV`.
pub const ENVIRONMENTS: &[&str] = &["development", "staging", "production"];

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `4000`                     |
    /// | `APP_ENV`              | `development`              |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATABASE_URL`         | (required)                 |
    /// | `DB_MAX_CONNECTIONS`   | `25`                       |
    /// | `DB_MIN_CONNECTIONS`   | `0`                        |
    /// | `DB_IDLE_TIMEOUT_SECS` | `900`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "4000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        assert!(
            ENVIRONMENTS.contains(&environment.as_str()),
            "APP_ENV must be one of {ENVIRONMENTS:?}, got {environment:?}"
        );

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let mut database = PoolConfig::new(database_url);

        if let Ok(raw) = std::env::var("DB_MAX_CONNECTIONS") {
            database.max_connections = raw.parse().expect("DB_MAX_CONNECTIONS must be a valid u32");
        }
        if let Ok(raw) = std::env::var("DB_MIN_CONNECTIONS") {
            database.min_connections = raw.parse().expect("DB_MIN_CONNECTIONS must be a valid u32");
        }
        if let Ok(raw) = std::env::var("DB_IDLE_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().expect("DB_IDLE_TIMEOUT_SECS must be a valid u64");
            database.idle_timeout = Duration::from_secs(secs);
        }

        Self {
            host,
            port,
            environment,
            cors_origins,
            request_timeout_secs,
            database,
        }
    }
}
