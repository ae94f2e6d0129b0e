//! Allowed browser origins for cross-origin requests.
//!
//! # Configuration
//!
//! - `ALLOWED_ORIGINS`: Comma-separated origins (default: `http://localhost:3000`)
//!
//! Blank entries are dropped. Origins that are not valid header values are
//! skipped when the CORS layer is built.

use std::env;

pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
        }
    }
}

impl CorsConfig {
    #[must_use]
    pub fn from_env() -> Self {
        match env::var("ALLOWED_ORIGINS") {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Self::default(),
        }
    }

    /// Splits a comma-separated origin list. An empty list falls back to
    /// the default origin.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let allowed_origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if allowed_origins.is_empty() {
            return Self::default();
        }
        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allows_local_frontend_only() {
        assert_eq!(
            CorsConfig::default().allowed_origins,
            vec!["http://localhost:3000"]
        );
    }

    #[test]
    fn test_parse_trims_and_drops_blanks() {
        let config = CorsConfig::parse(" https://inkpost.dev , ,http://localhost:5173 ");
        assert_eq!(
            config.allowed_origins,
            vec!["https://inkpost.dev", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_parse_empty_list_uses_default() {
        assert_eq!(CorsConfig::parse(" , "), CorsConfig::default());
    }
}
