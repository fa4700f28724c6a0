//! Server Configuration
//!
//! Everything the binary reads from the environment.

use anyhow::{Context, bail};
use quiz::QuizConfig;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FRONTEND_ORIGINS: &str =
    "http://localhost:8080,http://localhost:3000,https://flashmath.fun";

/// Deployment environment, reported by `/health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }

    /// Log filter used when `RUST_LOG` is unset
    pub const fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Dev => "api=debug,quiz=debug,tower_http=debug",
            Environment::Staging => "api=info,quiz=info,tower_http=info",
            Environment::Prod => "api=info,quiz=info,tower_http=warn",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Prod),
            other => bail!("unknown environment `{other}` (expected dev, staging or prod)"),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: Environment,
    pub frontend_origins: Vec<String>,
    pub quiz: QuizConfig,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset and empty values fall back
    /// to defaults, unparsable values are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got `{v}`"))?,
            None => DEFAULT_PORT,
        };

        let environment = match get("ENVIRONMENT") {
            Some(v) => v.parse().context("invalid ENVIRONMENT")?,
            None => Environment::default(),
        };

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let mut quiz = QuizConfig::default();
        if let Some(v) = get("QUIZ_SESSION_IDLE_SECS") {
            quiz.session_idle_ttl = Duration::from_secs(parse_u64("QUIZ_SESSION_IDLE_SECS", &v)?);
        }
        if let Some(v) = get("QUIZ_SWEEP_INTERVAL_SECS") {
            let secs = parse_u64("QUIZ_SWEEP_INTERVAL_SECS", &v)?;
            if secs == 0 {
                bail!("QUIZ_SWEEP_INTERVAL_SECS must be greater than zero");
            }
            quiz.sweep_interval = Duration::from_secs(secs);
        }
        if let Some(v) = get("QUIZ_MAX_SESSIONS") {
            quiz.max_sessions = v
                .trim()
                .parse()
                .with_context(|| format!("QUIZ_MAX_SESSIONS must be an integer, got `{v}`"))?;
        }

        Ok(Self {
            port,
            environment,
            frontend_origins,
            quiz,
        })
    }
}

fn parse_u64(key: &str, value: &str) -> anyhow::Result<u64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a number of seconds, got `{value}`"))
}
