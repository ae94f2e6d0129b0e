//! Rate limiting configuration for authentication endpoints.
//!
//! Register and login are limited per client IP to slow down credential
//! stuffing. Other endpoints are not limited.
//!
//! # Configuration
//!
//! - `RATE_LIMIT_ENABLED`: Turn limiting on or off (default: true)
//! - `RATE_LIMIT_AUTH_PER_SECOND`: Tokens replenished per second (default: 10)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: Maximum burst size (default: 5)
//! - `RATE_LIMIT_TRUST_PROXY`: Key on `X-Forwarded-For` / `X-Real-IP`
//!   instead of the peer address (default: false). Only enable behind a
//!   reverse proxy that overwrites these headers.
//!
//! # Rate Limiting Strategy
//!
//! The limiter uses governor's GCRA, which behaves like a token bucket:
//!
//! - Tokens are added at the configured rate (per second)
//! - Each request consumes one token
//! - Burst size defines the maximum tokens that can accumulate
//! - Requests are rejected with 429 when no tokens are available

use std::num::NonZeroU32;

use governor::Quota;

use crate::env_or;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,

    /// Requests per second for auth endpoints.
    pub auth_per_second: u32,

    /// Burst size for auth endpoints.
    pub auth_burst_size: u32,

    /// Whether client-supplied proxy headers identify the caller.
    pub trust_proxy_headers: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auth_per_second: 10,
            auth_burst_size: 5,
            trust_proxy_headers: false,
        }
    }
}

impl RateLimitConfig {
    /// Creates a new `RateLimitConfig` from environment variables.
    ///
    /// Falls back to default values if environment variables are not set
    /// or cannot be parsed.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            enabled: env_or("RATE_LIMIT_ENABLED", defaults.enabled),
            auth_per_second: env_or("RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: env_or("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
            trust_proxy_headers: env_or("RATE_LIMIT_TRUST_PROXY", defaults.trust_proxy_headers),
        }
    }

    /// Governor quota for auth endpoints.
    ///
    /// Returns `None` when limiting is disabled or either value is zero.
    #[must_use]
    pub fn auth_quota(&self) -> Option<Quota> {
        if !self.enabled {
            return None;
        }

        let per_second = NonZeroU32::new(self.auth_per_second)?;
        let burst_size = NonZeroU32::new(self.auth_burst_size)?;

        Some(Quota::per_second(per_second).allow_burst(burst_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.auth_per_second, 10);
        assert_eq!(config.auth_burst_size, 5);
        assert!(!config.trust_proxy_headers);
    }

    #[test]
    fn test_auth_quota_uses_burst_size() {
        let quota = RateLimitConfig::default().auth_quota().unwrap();
        assert_eq!(quota.burst_size().get(), 5);
    }

    #[test]
    fn test_disabled_config_has_no_quota() {
        let config = RateLimitConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(config.auth_quota().is_none());
    }

    #[test]
    fn test_zero_rate_has_no_quota() {
        let config = RateLimitConfig {
            auth_per_second: 0,
            ..Default::default()
        };
        assert!(config.auth_quota().is_none());
    }
}
