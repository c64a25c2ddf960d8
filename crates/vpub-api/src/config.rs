//! API configuration.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use vpub_publisher::{PipelineConfig, RetryConfig};
use vpub_seo::ContentLimits;

/// Configuration that cannot serve requests correctly.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("publish can take up to {budget:?}, which does not fit in the request timeout of {request_timeout:?}")]
    PublishBudgetExceedsTimeout {
        budget: Duration,
        request_timeout: Duration,
    },
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Rate limit requests per second
    pub rate_limit_rps: u32,
    /// Rate limit burst
    pub rate_limit_burst: u32,
    /// Request timeout
    pub request_timeout: Duration,
    /// Max request body size (uploads included)
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
    /// Expose Prometheus metrics at /metrics
    pub metrics_enabled: bool,
    /// Optional JSON catalog replacing the built-in categories
    pub catalog_path: Option<PathBuf>,
    /// Simulated upload latency
    pub publish_latency: Duration,
    /// Per-attempt publish timeout
    pub publish_timeout: Duration,
    /// Retries after a transient publish failure
    pub publish_max_retries: u32,
    /// Caps for generated content
    pub content_limits: ContentLimits,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: 10,
            rate_limit_burst: 20,
            request_timeout: Duration::from_secs(120),
            max_body_size: 512 * 1024 * 1024, // 512MB
            environment: "development".to_string(),
            metrics_enabled: true,
            catalog_path: None,
            publish_latency: Duration::from_secs(2),
            publish_timeout: Duration::from_secs(30),
            publish_max_retries: 2,
            content_limits: ContentLimits::default(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let limits = defaults.content_limits;

        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: env_parse("API_PORT", defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| parse_list(&s))
                .unwrap_or(defaults.cors_origins),
            rate_limit_rps: env_parse("RATE_LIMIT_RPS", defaults.rate_limit_rps).max(1),
            rate_limit_burst: env_parse("RATE_LIMIT_BURST", defaults.rate_limit_burst).max(1),
            request_timeout: Duration::from_secs(env_parse(
                "REQUEST_TIMEOUT",
                defaults.request_timeout.as_secs(),
            )),
            max_body_size: env_parse("MAX_BODY_SIZE", defaults.max_body_size),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            metrics_enabled: std::env::var("METRICS_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.metrics_enabled),
            catalog_path: std::env::var("CATALOG_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            publish_latency: Duration::from_millis(env_parse(
                "PUBLISH_LATENCY_MS",
                defaults.publish_latency.as_millis() as u64,
            )),
            publish_timeout: Duration::from_secs(env_parse(
                "PUBLISH_TIMEOUT_SECS",
                defaults.publish_timeout.as_secs(),
            )),
            publish_max_retries: env_parse("PUBLISH_MAX_RETRIES", defaults.publish_max_retries),
            content_limits: ContentLimits {
                max_title_chars: env_parse("SEO_MAX_TITLE_CHARS", limits.max_title_chars),
                max_hashtags: env_parse("SEO_MAX_HASHTAGS", limits.max_hashtags),
                max_tags: env_parse("SEO_MAX_TAGS", limits.max_tags),
                ..limits
            },
        }
    }

    /// Publish pipeline settings derived from this config.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            attempt_timeout: self.publish_timeout,
            retry: RetryConfig::default().with_max_retries(self.publish_max_retries),
        }
    }

    /// Reject settings where a slow publish would be cut off by the
    /// request timeout instead of failing through the pipeline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let budget = self.pipeline_config().worst_case_duration();
        if budget >= self.request_timeout {
            return Err(ConfigError::PublishBudgetExceedsTimeout {
                budget,
                request_timeout: self.request_timeout,
            });
        }
        Ok(())
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}

/// Read and parse an env var, falling back to `default` when unset or invalid.
fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.publish_latency, Duration::from_secs(2));
        assert_eq!(config.content_limits.max_title_chars, 70);
        assert!(!config.is_production());
    }

    #[test]
    fn test_default_publish_budget_fits_request_timeout() {
        assert!(ApiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_publish_budget_over_request_timeout_is_rejected() {
        let config = ApiConfig {
            publish_timeout: Duration::from_secs(60),
            ..ApiConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::PublishBudgetExceedsTimeout { request_timeout, .. }
                if request_timeout == Duration::from_secs(120)
        ));

        let config = ApiConfig {
            request_timeout: Duration::from_secs(10),
            publish_timeout: Duration::from_secs(5),
            publish_max_retries: 0,
            ..ApiConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list("https://a.example, https://b.example,,"),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" 1 "));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("off"));
    }

    #[test]
    fn test_env_parse_falls_back_on_missing_var() {
        assert_eq!(env_parse("VPUB_TEST_UNSET_VARIABLE", 42u32), 42);
    }
}
