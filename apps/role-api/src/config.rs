use std::time::Duration;

use crate::constants::{
    CORS_ALLOWED_ORIGINS, MAX_BODY_SIZE_BYTES, RATE_LIMIT_BURST, RATE_LIMIT_PER_MINUTE,
    REQUEST_TIMEOUT_SECS, SHUTDOWN_TIMEOUT_SECS,
};

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(env_var = name, value = %raw, "ignoring unparsable configuration value");
            default
        }),
        Err(_) => default,
    }
}

#[derive(Debug, Clone)]
pub struct MiddlewareConfig {
    pub rate_limit_per_minute: u32,
    pub rate_limit_burst: u32,
    pub request_timeout: Duration,
    pub max_body_size: usize,
    pub shutdown_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            rate_limit_per_minute: 100,
            rate_limit_burst: 150,
            request_timeout: Duration::from_secs(30),
            max_body_size: 1_048_576, // 1MB
            shutdown_timeout: Duration::from_secs(30),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl MiddlewareConfig {
    pub fn from_env() -> Self {
        let default = Self::default();

        // Zero would make the governor replenish interval a division by zero.
        let rate_limit_per_minute = env_or(RATE_LIMIT_PER_MINUTE, default.rate_limit_per_minute).max(1);
        let rate_limit_burst = env_or(RATE_LIMIT_BURST, default.rate_limit_burst).max(1);
        let request_timeout_secs = env_or(REQUEST_TIMEOUT_SECS, default.request_timeout.as_secs());
        let max_body_size = env_or(MAX_BODY_SIZE_BYTES, default.max_body_size);
        let shutdown_timeout_secs = env_or(SHUTDOWN_TIMEOUT_SECS, default.shutdown_timeout.as_secs());

        let cors_allowed_origins = std::env::var(CORS_ALLOWED_ORIGINS)
            .ok()
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or(default.cors_allowed_origins);

        Self {
            rate_limit_per_minute,
            rate_limit_burst,
            request_timeout: Duration::from_secs(request_timeout_secs),
            max_body_size,
            shutdown_timeout: Duration::from_secs(shutdown_timeout_secs),
            cors_allowed_origins,
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }

    /// Milliseconds between two replenished rate limit tokens.
    ///
    /// Never zero: the governor rejects a zero interval, so rates above one
    /// token per millisecond are capped there.
    pub fn replenish_interval_ms(&self) -> u64 {
        (60_000 / u64::from(self.rate_limit_per_minute.max(1))).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_governor::governor::GovernorConfigBuilder;

    #[test]
    fn default_allows_any_origin() {
        let config = MiddlewareConfig::default();
        assert!(config.allows_any_origin());
        assert_eq!(config.replenish_interval_ms(), 600);
    }

    #[test]
    fn replenish_interval_never_divides_by_zero() {
        let config = MiddlewareConfig {
            rate_limit_per_minute: 0,
            ..MiddlewareConfig::default()
        };
        assert_eq!(config.replenish_interval_ms(), 60_000);
    }

    #[test]
    fn replenish_interval_stays_positive_for_huge_rates() {
        let config = MiddlewareConfig {
            rate_limit_per_minute: 120_000,
            ..MiddlewareConfig::default()
        };
        assert_eq!(config.replenish_interval_ms(), 1);
        assert!(GovernorConfigBuilder::default()
            .per_millisecond(config.replenish_interval_ms())
            .burst_size(config.rate_limit_burst)
            .finish()
            .is_some());
    }
}
