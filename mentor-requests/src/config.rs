//! Application configuration from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `MENTOR_CLUB_API_URL` | unset: in-process backend |
//! | `MENTOR_CLUB_REQUEST_ROUTE` | `/mentor-requests/{id}` |
//! | `MENTOR_CLUB_SUBMIT_COLLECTED_INPUT` | `false` |
//! | `MENTOR_CLUB_LOG` | `mentor_requests=info,mentor_club_runtime=info` |
//! | `MENTOR_CLUB_SHUTDOWN_TIMEOUT_SECS` | `5` |

use crate::page::{DEFAULT_REQUEST_ROUTE, PageConfig, SubmitPayload};
use std::time::Duration;
use thiserror::Error;

/// Backend base URL; unset selects the in-process backend
pub const API_URL_VAR: &str = "MENTOR_CLUB_API_URL";
/// Route template for created requests
pub const REQUEST_ROUTE_VAR: &str = "MENTOR_CLUB_REQUEST_ROUTE";
/// Whether `submit` sends the form input instead of a placeholder
pub const SUBMIT_COLLECTED_INPUT_VAR: &str = "MENTOR_CLUB_SUBMIT_COLLECTED_INPUT";
/// `tracing-subscriber` filter directives
pub const LOG_VAR: &str = "MENTOR_CLUB_LOG";
/// Seconds to wait for in-flight effects at shutdown
pub const SHUTDOWN_TIMEOUT_VAR: &str = "MENTOR_CLUB_SHUTDOWN_TIMEOUT_SECS";

const DEFAULT_LOG_FILTER: &str = "mentor_requests=info,mentor_club_runtime=info";
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Route template cannot produce a request-specific path
    #[error("MENTOR_CLUB_REQUEST_ROUTE must contain `{{id}}`, got `{0}`")]
    MissingIdPlaceholder(String),

    /// A variable could not be parsed
    #[error("invalid value for {var}: `{value}` ({reason})")]
    Invalid {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// What was expected
        reason: &'static str,
    },
}

/// Top-level configuration for the binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend base URL, `None` for the in-process backend
    pub api_url: Option<String>,
    /// Page behavior
    pub page: PageConfig,
    /// Log filter directives
    pub log_filter: String,
    /// Store shutdown timeout
    pub shutdown_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            page: PageConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the route template lacks `{id}` or a
    /// boolean or number fails to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let request_route = get(REQUEST_ROUTE_VAR).unwrap_or(defaults.page.request_route);
        if !request_route.contains("{id}") {
            return Err(ConfigError::MissingIdPlaceholder(request_route));
        }

        let submit_payload = match get(SUBMIT_COLLECTED_INPUT_VAR) {
            Some(value) => {
                if parse_bool(SUBMIT_COLLECTED_INPUT_VAR, &value)? {
                    SubmitPayload::Collected
                } else {
                    SubmitPayload::Placeholder
                }
            },
            None => defaults.page.submit_payload,
        };

        let shutdown_timeout = match get(SHUTDOWN_TIMEOUT_VAR) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid {
                    var: SHUTDOWN_TIMEOUT_VAR,
                    value,
                    reason: "expected whole seconds",
                })?,
            None => defaults.shutdown_timeout,
        };

        Ok(Self {
            api_url: get(API_URL_VAR),
            page: PageConfig {
                request_route,
                submit_payload,
            },
            log_filter: get(LOG_VAR).unwrap_or(defaults.log_filter),
            shutdown_timeout,
        })
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: "expected true or false",
        }),
    }
}
