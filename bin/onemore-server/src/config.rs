//! Server configuration, loaded from environment variables at startup.

use std::path::PathBuf;

/// Runtime configuration for onemore-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// sqlx SQLite URL (default: `"sqlite://onemore.db"`). The file is
    /// created on first start.
    pub database_url: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// When set, logs go to a daily-rolling file in this directory instead
    /// of stdout.
    pub log_dir: Option<PathBuf>,

    /// Comma-separated list of allowed CORS origins; `None` means wildcard.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI and the OpenAPI document.
    pub enable_swagger: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_owned(),
            database_url: "sqlite://onemore.db".to_owned(),
            log_level: "info".to_owned(),
            log_json: false,
            log_dir: None,
            cors_allowed_origins: None,
            enable_swagger: true,
        }
    }
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: env_or("ONEMORE_BIND", &defaults.bind_address),
            database_url: env_or("ONEMORE_DATABASE_URL", &defaults.database_url),
            log_level: env_or("ONEMORE_LOG", &defaults.log_level),
            log_json: env_flag("ONEMORE_LOG_JSON", defaults.log_json),
            log_dir: std::env::var("ONEMORE_LOG_DIR").ok().map(PathBuf::from),
            cors_allowed_origins: std::env::var("ONEMORE_CORS_ORIGINS").ok(),
            enable_swagger: env_flag("ONEMORE_ENABLE_SWAGGER", defaults.enable_swagger),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| parse_flag(&v).unwrap_or(default))
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "1" => Some(true),
        "0" => Some(false),
        v if v.eq_ignore_ascii_case("true") => Some(true),
        v if v.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}
