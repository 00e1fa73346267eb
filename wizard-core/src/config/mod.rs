pub mod proxy;

pub use proxy::{ProxyRule, API_PREFIX, DEV_BACKEND_ORIGIN};

use reqwest::Url;
use serde::Serialize;

use crate::error::{ApiError, Result};

pub const ENV_API_URL: &str = "WIZARD_API_URL";
pub const ENV_PRODUCTION: &str = "WIZARD_PRODUCTION";
pub const ENV_PUBLIC_ORIGIN: &str = "WIZARD_PUBLIC_ORIGIN";

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    Production,
}

/// Where the backend lives.
///
/// The base URL is resolved once, first match wins:
/// 1. `WIZARD_API_URL`, taken verbatim;
/// 2. `WIZARD_PRODUCTION` truthy: `{WIZARD_PUBLIC_ORIGIN}/api` (the origin is
///    required, a bare `/api` cannot be requested from outside a browser);
/// 3. development: the dev proxy target plus its prefix,
///    `http://localhost:8000/api`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    environment: Environment,
    proxy: ProxyRule,
}

impl ApiConfig {
    /// Config pointing straight at `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let base_url = validate_base_url(base_url.into())?;
        Ok(Self {
            base_url,
            environment: Environment::Development,
            proxy: ProxyRule::dev_default(),
        })
    }

    pub fn development() -> Self {
        let proxy = ProxyRule::dev_default();
        Self {
            base_url: proxy.direct_base_url(),
            environment: Environment::Development,
            proxy,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve against an arbitrary key lookup. `from_env` is this over
    /// `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let environment = if get(ENV_PRODUCTION).as_deref().is_some_and(is_truthy) {
            Environment::Production
        } else {
            Environment::Development
        };

        let proxy = ProxyRule::dev_default();

        let base_url = if let Some(url) = get(ENV_API_URL) {
            url
        } else {
            match environment {
                Environment::Production => {
                    let origin = get(ENV_PUBLIC_ORIGIN).ok_or_else(|| {
                        ApiError::Config(format!(
                            "{ENV_PRODUCTION} is set but {ENV_PUBLIC_ORIGIN} is missing"
                        ))
                    })?;
                    format!("{}{}", origin.trim_end_matches('/'), API_PREFIX)
                }
                Environment::Development => proxy.direct_base_url(),
            }
        };

        Ok(Self {
            base_url: validate_base_url(base_url)?,
            environment,
            proxy,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn proxy(&self) -> &ProxyRule {
        &self.proxy
    }

    /// `{base_url}/{endpoint}` with exactly one slash at the join.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn validate_base_url(raw: String) -> Result<String> {
    let url = Url::parse(&raw).map_err(|e| ApiError::Config(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        other => Err(ApiError::Config(format!(
            "{raw}: unsupported scheme '{other}'"
        ))),
    }
}
