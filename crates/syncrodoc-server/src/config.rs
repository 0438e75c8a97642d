use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use syncrodoc_api::router::RateLimits;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "secret",
    "change-me",
    "change-me-to-a-random-string",
    "dev-secret-change-me",
];

/// Immutable process configuration, read once at startup and passed
/// explicitly into the components that need it. Nothing reads the
/// environment after this point.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub jwt_secret: String,
    pub allowed_origins: Vec<String>,
    pub rate_limits: Option<RateLimits>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Fail-closed: no secret, no server. There is no default.
        let jwt_secret = std::env::var("SYNCRODOC_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!(
                "SYNCRODOC_JWT_SECRET is unset or still a placeholder; \
                 set it to a long random value and restart"
            );
        }

        let host = env_or("SYNCRODOC_HOST", "0.0.0.0");
        let port: u16 = env_or("SYNCRODOC_PORT", "5000")
            .parse()
            .context("SYNCRODOC_PORT must be a port number")?;
        let db_path: PathBuf = env_or("SYNCRODOC_DB_PATH", "users.db").into();

        let allowed_origins = std::env::var("SYNCRODOC_ALLOWED_ORIGINS")
            .ok()
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(default_origins);

        let rate_limits = if env_flag("SYNCRODOC_DISABLE_RATE_LIMITS") {
            None
        } else {
            let defaults = RateLimits::default();
            Some(RateLimits {
                login_max: env_u32("SYNCRODOC_LOGIN_MAX", defaults.login_max)?,
                register_max: env_u32("SYNCRODOC_REGISTER_MAX", defaults.register_max)?,
                general_max: env_u32("SYNCRODOC_GENERAL_MAX", defaults.general_max)?,
                ..defaults
            })
        };

        Ok(Self {
            host,
            port,
            db_path,
            jwt_secret,
            allowed_origins,
            rate_limits,
        })
    }
}

fn default_origins() -> Vec<String> {
    ["http://localhost:3000", "http://127.0.0.1:3000"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_flag(key: &str) -> bool {
    matches!(
        std::env::var(key).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

fn env_u32(key: &str, default: u32) -> Result<u32> {
    match std::env::var(key) {
        Ok(v) => v.parse().with_context(|| format!("{key} must be a number")),
        Err(_) => Ok(default),
    }
}
