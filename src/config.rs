//! API client configuration parsed from environment variables.

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Backend base URL, no trailing slash. Request paths are appended as-is.
    pub base_url: String,
    pub timeouts: HttpTimeouts,
    /// Whether the access-token mirror cookie is written with the Secure flag.
    pub cookie_secure: bool,
}

impl ApiConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `TASKMARKET_API_BASE_URL`: default `http://localhost:8000/api`
    /// - `TASKMARKET_REQUEST_TIMEOUT_SECS`: default 30
    /// - `TASKMARKET_CONNECT_TIMEOUT_SECS`: default 10
    /// - `TASKMARKET_COOKIE_SECURE`: default false, true when the app is
    ///   served over https
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("TASKMARKET_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = HttpTimeouts {
            request_secs: env_parse_u64("TASKMARKET_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("TASKMARKET_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let cookie_secure = env_bool("TASKMARKET_COOKIE_SECURE").unwrap_or(false);

        Self { base_url, timeouts, cookie_secure }
    }

    /// Config pointed at an explicit base URL with default timeouts.
    #[must_use]
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeouts: HttpTimeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
            cookie_secure: false,
        }
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
